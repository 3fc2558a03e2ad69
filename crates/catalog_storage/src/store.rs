//! Document store and cursor contracts.

use crate::context::Context;
use crate::error::StoreResult;
use crate::filter::Filter;
use async_trait::async_trait;
use catalog_codec::Value;

/// Outcome of a single-document replace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateResult {
    /// Documents that matched the filter (0 or 1).
    pub matched_count: u64,
    /// Documents that were rewritten (0 or 1).
    pub modified_count: u64,
}

/// Outcome of a single-document delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteResult {
    /// Documents removed (0 or 1).
    pub deleted_count: u64,
}

/// A lazily-consumed, single-pass sequence of documents.
///
/// # Invariants
///
/// - Once `next` returns `Ok(None)` or an error, later calls keep returning
///   `Ok(None)` or [`StoreError::CursorClosed`](crate::StoreError::CursorClosed).
/// - `close` releases the underlying resources and is idempotent.
/// - Dropping an open cursor releases its resources as well.
#[async_trait]
pub trait DocumentCursor: Send {
    /// Advances to the next document.
    async fn next(&mut self, ctx: &Context) -> StoreResult<Option<Value>>;

    /// Releases the cursor.
    async fn close(&mut self) -> StoreResult<()>;
}

/// Boxed cursor returned by [`DocumentStore::find`].
pub type BoxCursor = Box<dyn DocumentCursor>;

/// Single-collection document operations a store must provide.
///
/// Documents are [`Value::Map`]s with text keys. Every call takes the
/// caller's [`Context`] and must give up once it is cancelled or past its
/// deadline.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Inserts one document as a single write.
    async fn insert_one(&self, ctx: &Context, collection: &str, document: Value)
        -> StoreResult<()>;

    /// Returns the first document matching `filter`, if any.
    async fn find_one(
        &self,
        ctx: &Context,
        collection: &str,
        filter: &Filter,
    ) -> StoreResult<Option<Value>>;

    /// Opens a cursor over every document matching `filter`.
    async fn find(&self, ctx: &Context, collection: &str, filter: &Filter)
        -> StoreResult<BoxCursor>;

    /// Replaces the first document matching `filter` with `replacement`.
    async fn replace_one(
        &self,
        ctx: &Context,
        collection: &str,
        filter: &Filter,
        replacement: Value,
    ) -> StoreResult<UpdateResult>;

    /// Removes the first document matching `filter`.
    async fn delete_one(
        &self,
        ctx: &Context,
        collection: &str,
        filter: &Filter,
    ) -> StoreResult<DeleteResult>;
}
