//! In-memory document store.

use crate::context::Context;
use crate::error::{StoreError, StoreResult};
use crate::filter::Filter;
use crate::store::{BoxCursor, DeleteResult, DocumentCursor, DocumentStore, UpdateResult};
use async_trait::async_trait;
use catalog_codec::{from_cbor, to_canonical_cbor, Value};
use parking_lot::RwLock;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Encoded documents per collection, in insertion order.
pub(crate) type Collections = HashMap<String, Vec<Vec<u8>>>;

/// An in-memory document store.
///
/// Documents are kept as canonical CBOR, so a document that cannot be
/// encoded is rejected on write exactly as a persistent store would.
/// Natural order is insertion order; a replaced document keeps its slot.
///
/// Suitable for tests and ephemeral catalogs. Thread-safe.
///
/// # Example
///
/// ```rust
/// use catalog_codec::Value;
/// use catalog_storage::{Context, DocumentStore, Filter, InMemoryStore};
///
/// # tokio_test_block(async {
/// let store = InMemoryStore::new();
/// let ctx = Context::background();
/// let doc = Value::text_map([("uuid", Value::from("a1"))]);
/// store.insert_one(&ctx, "products", doc.clone()).await.unwrap();
///
/// let found = store
///     .find_one(&ctx, "products", &Filter::eq("uuid", "a1"))
///     .await
///     .unwrap();
/// assert_eq!(found, Some(doc));
/// # });
/// # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(f)
/// # }
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    collections: RwLock<Collections>,
    open_cursors: Arc<AtomicUsize>,
}

impl InMemoryStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_collections(collections: Collections) -> Self {
        Self {
            collections: RwLock::new(collections),
            open_cursors: Arc::default(),
        }
    }

    pub(crate) fn snapshot(&self) -> Collections {
        self.collections.read().clone()
    }

    pub(crate) fn into_collections(self) -> Collections {
        self.collections.into_inner()
    }

    pub(crate) fn replace_collections(&self, collections: Collections) {
        *self.collections.write() = collections;
    }

    /// Appends already-encoded bytes to a collection without validating
    /// them.
    ///
    /// Useful for simulating documents written by other producers,
    /// including corrupted ones.
    pub fn insert_encoded(&self, collection: &str, bytes: Vec<u8>) {
        self.collections
            .write()
            .entry(collection.to_string())
            .or_default()
            .push(bytes);
    }

    /// Number of documents in a collection.
    #[must_use]
    pub fn len(&self, collection: &str) -> usize {
        self.collections.read().get(collection).map_or(0, Vec::len)
    }

    /// Returns true if the collection holds no documents.
    #[must_use]
    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }

    /// Number of cursors opened and not yet released.
    #[must_use]
    pub fn open_cursors(&self) -> usize {
        self.open_cursors.load(Ordering::SeqCst)
    }

    /// Position of the first document in `docs` that matches `filter`.
    fn position(docs: &[Vec<u8>], filter: &Filter) -> StoreResult<Option<usize>> {
        for (i, bytes) in docs.iter().enumerate() {
            let doc = from_cbor(bytes).map_err(StoreError::Decode)?;
            if filter.matches(&doc) {
                return Ok(Some(i));
            }
        }
        Ok(None)
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn insert_one(
        &self,
        ctx: &Context,
        collection: &str,
        document: Value,
    ) -> StoreResult<()> {
        ctx.check()?;
        let bytes = to_canonical_cbor(&document).map_err(StoreError::Encode)?;
        self.insert_encoded(collection, bytes);
        Ok(())
    }

    async fn find_one(
        &self,
        ctx: &Context,
        collection: &str,
        filter: &Filter,
    ) -> StoreResult<Option<Value>> {
        ctx.check()?;
        let collections = self.collections.read();
        let Some(docs) = collections.get(collection) else {
            return Ok(None);
        };
        match Self::position(docs, filter)? {
            Some(i) => Ok(Some(from_cbor(&docs[i]).map_err(StoreError::Decode)?)),
            None => Ok(None),
        }
    }

    async fn find(
        &self,
        ctx: &Context,
        collection: &str,
        filter: &Filter,
    ) -> StoreResult<BoxCursor> {
        ctx.check()?;
        let pending: VecDeque<Vec<u8>> = self
            .collections
            .read()
            .get(collection)
            .map(|docs| docs.iter().cloned().collect())
            .unwrap_or_default();
        Ok(Box::new(MemoryCursor::open(
            pending,
            filter.clone(),
            Arc::clone(&self.open_cursors),
        )))
    }

    async fn replace_one(
        &self,
        ctx: &Context,
        collection: &str,
        filter: &Filter,
        replacement: Value,
    ) -> StoreResult<UpdateResult> {
        ctx.check()?;
        let bytes = to_canonical_cbor(&replacement).map_err(StoreError::Encode)?;
        let mut collections = self.collections.write();
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(UpdateResult::default());
        };
        match Self::position(docs, filter)? {
            Some(i) => {
                let modified = u64::from(docs[i] != bytes);
                docs[i] = bytes;
                Ok(UpdateResult {
                    matched_count: 1,
                    modified_count: modified,
                })
            }
            None => Ok(UpdateResult::default()),
        }
    }

    async fn delete_one(
        &self,
        ctx: &Context,
        collection: &str,
        filter: &Filter,
    ) -> StoreResult<DeleteResult> {
        ctx.check()?;
        let mut collections = self.collections.write();
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(DeleteResult::default());
        };
        match Self::position(docs, filter)? {
            Some(i) => {
                docs.remove(i);
                Ok(DeleteResult { deleted_count: 1 })
            }
            None => Ok(DeleteResult::default()),
        }
    }
}

/// Cursor over a snapshot of encoded documents, decoded one at a time.
struct MemoryCursor {
    pending: VecDeque<Vec<u8>>,
    filter: Filter,
    open_cursors: Option<Arc<AtomicUsize>>,
}

impl MemoryCursor {
    fn open(pending: VecDeque<Vec<u8>>, filter: Filter, open_cursors: Arc<AtomicUsize>) -> Self {
        open_cursors.fetch_add(1, Ordering::SeqCst);
        Self {
            pending,
            filter,
            open_cursors: Some(open_cursors),
        }
    }

    fn release(&mut self) {
        self.pending.clear();
        if let Some(counter) = self.open_cursors.take() {
            counter.fetch_sub(1, Ordering::SeqCst);
        }
    }
}

#[async_trait]
impl DocumentCursor for MemoryCursor {
    async fn next(&mut self, ctx: &Context) -> StoreResult<Option<Value>> {
        if self.open_cursors.is_none() {
            return Err(StoreError::CursorClosed);
        }
        ctx.check()?;
        while let Some(bytes) = self.pending.pop_front() {
            let doc = match from_cbor(&bytes) {
                Ok(doc) => doc,
                Err(err) => {
                    self.release();
                    return Err(StoreError::Decode(err));
                }
            };
            if self.filter.matches(&doc) {
                return Ok(Some(doc));
            }
        }
        Ok(None)
    }

    async fn close(&mut self) -> StoreResult<()> {
        self.release();
        Ok(())
    }
}

impl Drop for MemoryCursor {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, name: &str) -> Value {
        Value::text_map([("uuid", Value::from(id)), ("name", Value::from(name))])
    }

    #[tokio::test]
    async fn memory_new_is_empty() {
        let store = InMemoryStore::new();
        assert!(store.is_empty("products"));
        assert_eq!(store.open_cursors(), 0);
    }

    #[tokio::test]
    async fn memory_insert_then_find_one() {
        let store = InMemoryStore::new();
        let ctx = Context::background();
        store.insert_one(&ctx, "products", doc("a", "one")).await.unwrap();
        store.insert_one(&ctx, "products", doc("b", "two")).await.unwrap();

        let found = store
            .find_one(&ctx, "products", &Filter::eq("uuid", "b"))
            .await
            .unwrap();
        assert_eq!(found, Some(doc("b", "two")));

        let missing = store
            .find_one(&ctx, "products", &Filter::eq("uuid", "zz"))
            .await
            .unwrap();
        assert_eq!(missing, None);
        assert_eq!(store.len("products"), 2);
    }

    #[tokio::test]
    async fn memory_collections_are_isolated() {
        let store = InMemoryStore::new();
        let ctx = Context::background();
        store.insert_one(&ctx, "a", doc("1", "x")).await.unwrap();
        assert!(store.is_empty("b"));
        let found = store.find_one(&ctx, "b", &Filter::all()).await.unwrap();
        assert_eq!(found, None);
    }

    #[tokio::test]
    async fn memory_insert_rejects_nan() {
        let store = InMemoryStore::new();
        let ctx = Context::background();
        let bad = Value::text_map([("price", Value::Float(f64::NAN))]);
        let err = store.insert_one(&ctx, "products", bad).await.unwrap_err();
        assert!(matches!(err, StoreError::Encode(_)));
        assert!(store.is_empty("products"));
    }

    #[tokio::test]
    async fn memory_replace_keeps_position() {
        let store = InMemoryStore::new();
        let ctx = Context::background();
        store.insert_one(&ctx, "p", doc("a", "one")).await.unwrap();
        store.insert_one(&ctx, "p", doc("b", "two")).await.unwrap();

        let result = store
            .replace_one(&ctx, "p", &Filter::eq("uuid", "a"), doc("a", "uno"))
            .await
            .unwrap();
        assert_eq!(
            result,
            UpdateResult {
                matched_count: 1,
                modified_count: 1
            }
        );

        let mut cursor = store.find(&ctx, "p", &Filter::all()).await.unwrap();
        assert_eq!(cursor.next(&ctx).await.unwrap(), Some(doc("a", "uno")));
        assert_eq!(cursor.next(&ctx).await.unwrap(), Some(doc("b", "two")));
        assert_eq!(cursor.next(&ctx).await.unwrap(), None);
    }

    #[tokio::test]
    async fn memory_replace_missing_matches_nothing() {
        let store = InMemoryStore::new();
        let ctx = Context::background();
        let result = store
            .replace_one(&ctx, "p", &Filter::eq("uuid", "a"), doc("a", "x"))
            .await
            .unwrap();
        assert_eq!(result, UpdateResult::default());
        assert!(store.is_empty("p"));
    }

    #[tokio::test]
    async fn memory_delete_is_idempotent() {
        let store = InMemoryStore::new();
        let ctx = Context::background();
        store.insert_one(&ctx, "p", doc("a", "one")).await.unwrap();

        let filter = Filter::eq("uuid", "a");
        let first = store.delete_one(&ctx, "p", &filter).await.unwrap();
        let second = store.delete_one(&ctx, "p", &filter).await.unwrap();
        assert_eq!(first.deleted_count, 1);
        assert_eq!(second.deleted_count, 0);
    }

    #[tokio::test]
    async fn memory_cursor_released_on_exhaustion_close_and_drop() {
        let store = InMemoryStore::new();
        let ctx = Context::background();
        store.insert_one(&ctx, "p", doc("a", "one")).await.unwrap();

        let mut cursor = store.find(&ctx, "p", &Filter::all()).await.unwrap();
        assert_eq!(store.open_cursors(), 1);
        cursor.close().await.unwrap();
        assert_eq!(store.open_cursors(), 0);
        assert!(matches!(
            cursor.next(&ctx).await,
            Err(StoreError::CursorClosed)
        ));

        let cursor = store.find(&ctx, "p", &Filter::all()).await.unwrap();
        assert_eq!(store.open_cursors(), 1);
        drop(cursor);
        assert_eq!(store.open_cursors(), 0);
    }

    #[tokio::test]
    async fn memory_cursor_reports_undecodable_document() {
        let store = InMemoryStore::new();
        let ctx = Context::background();
        store.insert_one(&ctx, "p", doc("a", "one")).await.unwrap();
        store.insert_encoded("p", vec![0xff, 0x00]);

        let mut cursor = store.find(&ctx, "p", &Filter::all()).await.unwrap();
        assert!(cursor.next(&ctx).await.unwrap().is_some());
        assert!(matches!(
            cursor.next(&ctx).await,
            Err(StoreError::Decode(_))
        ));
        assert_eq!(store.open_cursors(), 0);
    }

    #[tokio::test]
    async fn memory_cursor_sees_snapshot() {
        let store = InMemoryStore::new();
        let ctx = Context::background();
        store.insert_one(&ctx, "p", doc("a", "one")).await.unwrap();

        let mut cursor = store.find(&ctx, "p", &Filter::all()).await.unwrap();
        store.insert_one(&ctx, "p", doc("b", "two")).await.unwrap();
        assert!(cursor.next(&ctx).await.unwrap().is_some());
        assert_eq!(cursor.next(&ctx).await.unwrap(), None);
    }

    #[tokio::test]
    async fn memory_operations_respect_cancelled_context() {
        let store = InMemoryStore::new();
        let ctx = Context::background();
        ctx.cancel();
        let err = store
            .insert_one(&ctx, "p", doc("a", "one"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Canceled));
        assert!(store.is_empty("p"));
    }
}
