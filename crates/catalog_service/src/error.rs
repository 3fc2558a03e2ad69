//! Error and status types for the catalog service.

use catalog_codec::CodecError;
use catalog_core::CoreError;
use catalog_storage::Interrupted;
use std::fmt;
use thiserror::Error;

/// Result type for service internals.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failures raised while serving a request.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The repository failed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A record could not be expressed as a wire product.
    #[error("converting product{}: {source}", at_index(.index))]
    Convert {
        /// Position in the list being converted, if any.
        index: Option<usize>,
        /// The attribute conversion failure.
        #[source]
        source: CodecError,
    },
}

fn at_index(index: &Option<usize>) -> String {
    index.map(|i| format!(" at index {i}")).unwrap_or_default()
}

impl From<CodecError> for ServiceError {
    fn from(source: CodecError) -> Self {
        Self::Convert {
            index: None,
            source,
        }
    }
}

impl ServiceError {
    /// The status code this error is reported with.
    pub fn code(&self) -> Code {
        match self {
            Self::Core(CoreError::NotFound { .. }) => Code::NotFound,
            Self::Core(CoreError::Canceled { reason, .. }) => match reason {
                Interrupted::Canceled => Code::Cancelled,
                Interrupted::DeadlineExceeded => Code::DeadlineExceeded,
            },
            Self::Core(_) | Self::Convert { .. } => Code::Internal,
        }
    }
}

/// Transport-neutral status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Code {
    /// The requested product does not exist.
    NotFound,
    /// The caller cancelled the request.
    Cancelled,
    /// The request ran out of time.
    DeadlineExceeded,
    /// Anything else.
    Internal,
}

impl Code {
    /// Canonical upper-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::Cancelled => "CANCELLED",
            Self::DeadlineExceeded => "DEADLINE_EXCEEDED",
            Self::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed request as reported to the transport.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{code}: {message}")]
pub struct Status {
    code: Code,
    message: String,
}

impl Status {
    /// Creates a status.
    pub fn new(code: Code, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// The status code.
    pub fn code(&self) -> Code {
        self.code
    }

    /// Human-readable detail.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<&ServiceError> for Status {
    fn from(err: &ServiceError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

impl From<ServiceError> for Status {
    fn from(err: ServiceError) -> Self {
        Self::from(&err)
    }
}
