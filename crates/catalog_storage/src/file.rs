//! File-backed document store.

use crate::context::Context;
use crate::error::{StoreError, StoreResult};
use crate::filter::Filter;
use crate::memory::{Collections, InMemoryStore};
use crate::store::{BoxCursor, DeleteResult, DocumentStore, UpdateResult};
use async_trait::async_trait;
use catalog_codec::{from_cbor, to_canonical_cbor, Value};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, trace};

/// A document store persisted to a single file.
///
/// All collections live in memory and the whole store is rewritten after
/// every successful mutation. A mutation is applied to a staged copy of the
/// collections; the copy is written to a sibling temporary file which then
/// replaces the original, and only then becomes the visible state. A failed
/// write leaves both memory and disk as they were.
///
/// # Example
///
/// ```no_run
/// use catalog_storage::{Context, DocumentStore, FileStore};
/// use catalog_codec::Value;
///
/// # async fn demo() -> catalog_storage::StoreResult<()> {
/// let store = FileStore::open("catalog.db").await?;
/// let doc = Value::text_map([("uuid", Value::from("a1"))]);
/// store.insert_one(&Context::background(), "products", doc).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    inner: InMemoryStore,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Opens the store at `path`, loading its contents if the file exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file cannot be read and
    /// [`StoreError::Corrupted`] if its contents are not a valid store image.
    pub async fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let collections = match tokio::fs::read(&path).await {
            Ok(bytes) => decode_image(&bytes)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Collections::new(),
            Err(err) => return Err(err.into()),
        };
        debug!(
            path = %path.display(),
            collections = collections.len(),
            "opened file store"
        );
        Ok(Self {
            path,
            inner: InMemoryStore::with_collections(collections),
            write_lock: Mutex::new(()),
        })
    }

    /// Opens the store, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directories cannot be created or the file cannot
    /// be loaded.
    pub async fn open_with_create_dirs(path: impl AsRef<Path>) -> StoreResult<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        Self::open(path).await
    }

    /// Returns the path to the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of documents in a collection.
    #[must_use]
    pub fn len(&self, collection: &str) -> usize {
        self.inner.len(collection)
    }

    /// Returns true if the collection holds no documents.
    #[must_use]
    pub fn is_empty(&self, collection: &str) -> bool {
        self.inner.is_empty(collection)
    }

    /// Number of cursors opened and not yet released.
    #[must_use]
    pub fn open_cursors(&self) -> usize {
        self.inner.open_cursors()
    }

    /// A copy of the current collections to apply a mutation to.
    fn stage(&self) -> InMemoryStore {
        InMemoryStore::with_collections(self.inner.snapshot())
    }

    /// Writes the staged collections to disk and makes them visible.
    ///
    /// Callers hold `write_lock`.
    async fn commit(&self, staged: InMemoryStore) -> StoreResult<()> {
        let collections = staged.into_collections();
        let image = encode_image(&collections)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        tokio::fs::write(&tmp, &image).await?;
        // Rename and swap run in one poll so a dropped call cannot split them.
        std::fs::rename(&tmp, &self.path)?;
        self.inner.replace_collections(collections);
        trace!(path = %self.path.display(), bytes = image.len(), "persisted store");
        Ok(())
    }
}

fn encode_image(collections: &Collections) -> StoreResult<Vec<u8>> {
    let image = Value::map(
        collections
            .iter()
            .map(|(name, docs)| {
                let docs = docs.iter().cloned().map(Value::Bytes).collect();
                (Value::Text(name.clone()), Value::Array(docs))
            })
            .collect(),
    );
    to_canonical_cbor(&image).map_err(StoreError::Encode)
}

fn decode_image(bytes: &[u8]) -> StoreResult<Collections> {
    let image = from_cbor(bytes).map_err(|e| StoreError::Corrupted(e.to_string()))?;
    let entries = match image {
        Value::Map(entries) => entries,
        other => {
            return Err(StoreError::Corrupted(format!(
                "expected map at top level, found {}",
                other.kind_name()
            )))
        }
    };
    let mut collections = Collections::with_capacity(entries.len());
    for (name, docs) in entries {
        let (Value::Text(name), Value::Array(docs)) = (name, docs) else {
            return Err(StoreError::Corrupted(
                "collection entries must map text to arrays".into(),
            ));
        };
        let docs = docs
            .into_iter()
            .map(|doc| match doc {
                Value::Bytes(bytes) => Ok(bytes),
                other => Err(StoreError::Corrupted(format!(
                    "collection {name:?} holds a {} instead of a document",
                    other.kind_name()
                ))),
            })
            .collect::<StoreResult<Vec<_>>>()?;
        collections.insert(name, docs);
    }
    Ok(collections)
}

#[async_trait]
impl DocumentStore for FileStore {
    async fn insert_one(
        &self,
        ctx: &Context,
        collection: &str,
        document: Value,
    ) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;
        let staged = self.stage();
        staged.insert_one(ctx, collection, document).await?;
        self.commit(staged).await
    }

    async fn find_one(
        &self,
        ctx: &Context,
        collection: &str,
        filter: &Filter,
    ) -> StoreResult<Option<Value>> {
        self.inner.find_one(ctx, collection, filter).await
    }

    async fn find(
        &self,
        ctx: &Context,
        collection: &str,
        filter: &Filter,
    ) -> StoreResult<BoxCursor> {
        self.inner.find(ctx, collection, filter).await
    }

    async fn replace_one(
        &self,
        ctx: &Context,
        collection: &str,
        filter: &Filter,
        replacement: Value,
    ) -> StoreResult<UpdateResult> {
        let _guard = self.write_lock.lock().await;
        let staged = self.stage();
        let result = staged
            .replace_one(ctx, collection, filter, replacement)
            .await?;
        if result.modified_count > 0 {
            self.commit(staged).await?;
        }
        Ok(result)
    }

    async fn delete_one(
        &self,
        ctx: &Context,
        collection: &str,
        filter: &Filter,
    ) -> StoreResult<DeleteResult> {
        let _guard = self.write_lock.lock().await;
        let staged = self.stage();
        let result = staged.delete_one(ctx, collection, filter).await?;
        if result.deleted_count > 0 {
            self.commit(staged).await?;
        }
        Ok(result)
    }
}
