//! Lazy record stream over a store cursor.

use crate::error::{CoreError, CoreResult, Operation};
use crate::id::RecordId;
use crate::record::{Record, FIELD_ID};
use catalog_codec::Value;
use catalog_storage::{BoxCursor, Context};
use std::fmt;
use tracing::debug;

/// Records from a listing, decoded one at a time as they are pulled.
///
/// The underlying cursor is released when the stream is exhausted, when it
/// reports an error, when [`close`](Self::close) is called, or when the
/// stream is dropped, whichever happens first. After any error the stream
/// is finished and yields `Ok(None)`.
pub struct RecordStream {
    cursor: Option<BoxCursor>,
    ctx: Context,
    position: usize,
}

impl RecordStream {
    pub(crate) fn new(cursor: BoxCursor, ctx: Context) -> Self {
        Self {
            cursor: Some(cursor),
            ctx,
            position: 0,
        }
    }

    /// Pulls and decodes the next record.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Persistence`] if the cursor fails or a document
    /// does not decode, [`CoreError::Codec`] if a document holds an
    /// unrepresentable attribute, and [`CoreError::Canceled`] if the listing
    /// context is cancelled or past its deadline.
    pub async fn next(&mut self) -> CoreResult<Option<Record>> {
        let Some(cursor) = self.cursor.as_mut() else {
            return Ok(None);
        };

        let document = match self.ctx.run(cursor.next(&self.ctx)).await {
            Ok(Ok(Some(document))) => document,
            Ok(Ok(None)) => {
                self.close().await?;
                return Ok(None);
            }
            Ok(Err(err)) => {
                self.abandon().await;
                return Err(CoreError::from_store(Operation::List, None, err));
            }
            Err(reason) => {
                self.abandon().await;
                return Err(CoreError::canceled(Operation::List, None, reason));
            }
        };

        let position = self.position;
        self.position += 1;
        match Record::from_document(&document) {
            Ok(record) => Ok(Some(record)),
            Err(err) => {
                self.abandon().await;
                let id = document
                    .get(FIELD_ID)
                    .and_then(Value::as_text)
                    .map(RecordId::from);
                debug!(position, error = %err, "undecodable product document");
                Err(CoreError::from_document(Operation::List, id, err))
            }
        }
    }

    /// Releases the cursor. Later calls to [`next`](Self::next) yield
    /// `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Persistence`] if the store fails to release
    /// the cursor.
    pub async fn close(&mut self) -> CoreResult<()> {
        if let Some(mut cursor) = self.cursor.take() {
            cursor
                .close()
                .await
                .map_err(|err| CoreError::from_store(Operation::List, None, err))?;
        }
        Ok(())
    }

    /// Returns true once the cursor has been released.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.cursor.is_none()
    }

    /// Number of documents pulled so far.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Drains the stream.
    ///
    /// # Errors
    ///
    /// Fails on the first error; records read before it are discarded.
    pub async fn try_collect(mut self) -> CoreResult<Vec<Record>> {
        let mut records = Vec::new();
        while let Some(record) = self.next().await? {
            records.push(record);
        }
        Ok(records)
    }

    // Close errors are logged, not returned.
    async fn abandon(&mut self) {
        if let Err(err) = self.close().await {
            debug!(error = %err, "failed to release product cursor");
        }
    }
}

impl fmt::Debug for RecordStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordStream")
            .field("open", &self.cursor.is_some())
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}
