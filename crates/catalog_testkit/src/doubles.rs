//! Store doubles with scripted failures.

use async_trait::async_trait;
use catalog_codec::Value;
use catalog_storage::{
    BoxCursor, Context, DeleteResult, DocumentCursor, DocumentStore, Filter, InMemoryStore,
    StoreError, StoreResult, UpdateResult,
};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};

/// A [`DocumentStore`] call, for scripting and call history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    /// `insert_one`
    Insert,
    /// `find_one`
    FindOne,
    /// `find`
    Find,
    /// `replace_one`
    Replace,
    /// `delete_one`
    Delete,
}

#[derive(Debug, Default)]
struct Script {
    failures: HashMap<StoreOp, String>,
    hangs: HashSet<StoreOp>,
    cursor_fail_at: Option<usize>,
    calls: Vec<StoreOp>,
}

/// An in-memory store whose calls can be made to fail or stall.
///
/// Unscripted calls go to an [`InMemoryStore`]. Scripts stay in effect
/// until [`reset`](Self::reset).
///
/// # Example
///
/// ```rust
/// use catalog_storage::{Context, DocumentStore, Filter, StoreError};
/// use catalog_testkit::{ScriptedStore, StoreOp};
///
/// # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
/// let store = ScriptedStore::new();
/// store.fail(StoreOp::FindOne, "connection reset");
///
/// let err = store
///     .find_one(&Context::background(), "products", &Filter::all())
///     .await
///     .unwrap_err();
/// assert!(matches!(err, StoreError::Unavailable(_)));
/// # });
/// ```
#[derive(Debug, Default)]
pub struct ScriptedStore {
    inner: InMemoryStore,
    script: Mutex<Script>,
}

impl ScriptedStore {
    /// Creates an empty store with nothing scripted.
    pub fn new() -> Self {
        Self::default()
    }

    /// The backing store, for seeding and inspection.
    pub fn inner(&self) -> &InMemoryStore {
        &self.inner
    }

    /// Makes every `op` call fail with [`StoreError::Unavailable`].
    pub fn fail(&self, op: StoreOp, message: impl Into<String>) {
        self.script.lock().failures.insert(op, message.into());
    }

    /// Makes every `op` call wait until its context is cancelled or
    /// expires.
    pub fn hang(&self, op: StoreOp) {
        self.script.lock().hangs.insert(op);
    }

    /// Makes cursors fail after yielding `n` documents.
    pub fn fail_cursor_at(&self, n: usize) {
        self.script.lock().cursor_fail_at = Some(n);
    }

    /// Clears every script and the call history.
    pub fn reset(&self) {
        *self.script.lock() = Script::default();
    }

    /// Calls made so far, in order.
    pub fn calls(&self) -> Vec<StoreOp> {
        self.script.lock().calls.clone()
    }

    /// Number of calls made to `op`.
    pub fn call_count(&self, op: StoreOp) -> usize {
        self.script.lock().calls.iter().filter(|c| **c == op).count()
    }

    /// Number of cursors opened and not yet released.
    pub fn open_cursors(&self) -> usize {
        self.inner.open_cursors()
    }

    async fn enter(&self, ctx: &Context, op: StoreOp) -> StoreResult<()> {
        let (failure, hang) = {
            let mut script = self.script.lock();
            script.calls.push(op);
            (script.failures.get(&op).cloned(), script.hangs.contains(&op))
        };
        if hang {
            ctx.run(std::future::pending::<()>()).await?;
        }
        match failure {
            Some(message) => Err(StoreError::unavailable(message)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DocumentStore for ScriptedStore {
    async fn insert_one(
        &self,
        ctx: &Context,
        collection: &str,
        document: Value,
    ) -> StoreResult<()> {
        self.enter(ctx, StoreOp::Insert).await?;
        self.inner.insert_one(ctx, collection, document).await
    }

    async fn find_one(
        &self,
        ctx: &Context,
        collection: &str,
        filter: &Filter,
    ) -> StoreResult<Option<Value>> {
        self.enter(ctx, StoreOp::FindOne).await?;
        self.inner.find_one(ctx, collection, filter).await
    }

    async fn find(
        &self,
        ctx: &Context,
        collection: &str,
        filter: &Filter,
    ) -> StoreResult<BoxCursor> {
        self.enter(ctx, StoreOp::Find).await?;
        let cursor = self.inner.find(ctx, collection, filter).await?;
        let fail_at = self.script.lock().cursor_fail_at;
        Ok(Box::new(ScriptedCursor {
            inner: cursor,
            yielded: 0,
            fail_at,
        }))
    }

    async fn replace_one(
        &self,
        ctx: &Context,
        collection: &str,
        filter: &Filter,
        replacement: Value,
    ) -> StoreResult<UpdateResult> {
        self.enter(ctx, StoreOp::Replace).await?;
        self.inner
            .replace_one(ctx, collection, filter, replacement)
            .await
    }

    async fn delete_one(
        &self,
        ctx: &Context,
        collection: &str,
        filter: &Filter,
    ) -> StoreResult<DeleteResult> {
        self.enter(ctx, StoreOp::Delete).await?;
        self.inner.delete_one(ctx, collection, filter).await
    }
}

/// Wraps a real cursor and fails it after a set number of documents.
struct ScriptedCursor {
    inner: BoxCursor,
    yielded: usize,
    fail_at: Option<usize>,
}

#[async_trait]
impl DocumentCursor for ScriptedCursor {
    async fn next(&mut self, ctx: &Context) -> StoreResult<Option<Value>> {
        if self.fail_at == Some(self.yielded) {
            self.inner.close().await?;
            return Err(StoreError::unavailable("cursor terminated"));
        }
        let next = self.inner.next(ctx).await?;
        if next.is_some() {
            self.yielded += 1;
        }
        Ok(next)
    }

    async fn close(&mut self) -> StoreResult<()> {
        self.inner.close().await
    }
}
