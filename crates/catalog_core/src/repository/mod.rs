//! Product repository over a document store.

mod stream;

pub use stream::RecordStream;

use crate::config::RepositoryConfig;
use crate::error::{CoreError, CoreResult, Operation};
use crate::id::{IdGenerator, RecordId, UuidGenerator};
use crate::record::{Record, FIELD_ID};
use catalog_storage::{Context, DocumentStore, Filter, StoreResult};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};

/// Create, read, update, delete and list catalog records.
///
/// Each record is one document in the configured collection, keyed by its
/// `uuid` field. Every call is a single store round trip bounded by the
/// caller's [`Context`] (and by [`RepositoryConfig::default_timeout`] when
/// set). Nothing is retried.
///
/// The repository holds no mutable state and can be shared behind an `Arc`.
///
/// # Example
///
/// ```rust
/// use catalog_core::{ProductRepository, Record};
/// use catalog_storage::{Context, InMemoryStore};
/// use std::sync::Arc;
///
/// # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
/// let repo = ProductRepository::new(Arc::new(InMemoryStore::new()));
/// let ctx = Context::background();
///
/// let created = repo
///     .create(&ctx, Record::new("Lamp", "Desk lamp", 19.5).with_attribute("color", "blue"))
///     .await
///     .unwrap();
/// assert!(!created.id.is_empty());
///
/// let fetched = repo.get(&ctx, &created.id).await.unwrap();
/// assert_eq!(fetched, created);
/// # });
/// ```
pub struct ProductRepository<S: ?Sized = dyn DocumentStore> {
    store: Arc<S>,
    ids: Arc<dyn IdGenerator>,
    config: RepositoryConfig,
}

impl<S: DocumentStore + ?Sized> ProductRepository<S> {
    /// Creates a repository with the default configuration and random UUID
    /// identifiers.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            ids: Arc::new(UuidGenerator),
            config: RepositoryConfig::default(),
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: RepositoryConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the identifier source.
    #[must_use]
    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Arc::new(ids);
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Persists `record` under a freshly generated identifier.
    ///
    /// Any identifier already on `record` is replaced. Returns the record as
    /// stored.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Persistence`] if the store rejects the write
    /// (including a document it cannot serialize) and
    /// [`CoreError::Canceled`] if the context gives up first.
    pub async fn create(&self, ctx: &Context, mut record: Record) -> CoreResult<Record> {
        record.id = self.ids.generate();
        let document = record.to_document();
        let ctx = self.scope(ctx);

        call(
            &ctx,
            Operation::Create,
            Some(&record.id),
            self.store
                .insert_one(&ctx, &self.config.collection, document),
        )
        .await?;

        debug!(id = %record.id, collection = %self.config.collection, "created product");
        Ok(record)
    }

    /// Fetches the record with identifier `id`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] if no such record exists,
    /// [`CoreError::Codec`] if an attribute cannot be represented, and
    /// [`CoreError::Persistence`] if the store fails or the stored document
    /// does not describe a record.
    pub async fn get(&self, ctx: &Context, id: &RecordId) -> CoreResult<Record> {
        let ctx = self.scope(ctx);
        let filter = by_id(id);

        let document = call(
            &ctx,
            Operation::Get,
            Some(id),
            self.store
                .find_one(&ctx, &self.config.collection, &filter),
        )
        .await?
        .ok_or_else(|| CoreError::not_found(id.clone()))?;

        let record = Record::from_document(&document)
            .map_err(|err| CoreError::from_document(Operation::Get, Some(id.clone()), err))?;
        debug!(id = %id, "fetched product");
        Ok(record)
    }

    /// Replaces the stored record that has `record.id` with `record`.
    ///
    /// The whole document is overwritten; fields absent from `record` do not
    /// survive. When no record matches, the call succeeds as a no-op unless
    /// [`RepositoryConfig::strict_updates`] is set.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Persistence`] if the store fails,
    /// [`CoreError::NotFound`] for an unknown id under strict updates, and
    /// [`CoreError::Canceled`] if the context gives up first.
    pub async fn update(&self, ctx: &Context, record: Record) -> CoreResult<Record> {
        let ctx = self.scope(ctx);
        let filter = by_id(&record.id);

        let result = call(
            &ctx,
            Operation::Update,
            Some(&record.id),
            self.store.replace_one(
                &ctx,
                &self.config.collection,
                &filter,
                record.to_document(),
            ),
        )
        .await?;

        if result.matched_count == 0 {
            if self.config.strict_updates {
                return Err(CoreError::not_found(record.id));
            }
            warn!(id = %record.id, "update matched no product");
        } else {
            debug!(id = %record.id, modified = result.modified_count, "updated product");
        }
        Ok(record)
    }

    /// Removes the record with identifier `id`.
    ///
    /// Returns how many records were removed; removing an unknown id
    /// succeeds with zero.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Persistence`] if the store fails and
    /// [`CoreError::Canceled`] if the context gives up first.
    pub async fn delete(&self, ctx: &Context, id: &RecordId) -> CoreResult<u64> {
        let ctx = self.scope(ctx);
        let filter = by_id(id);

        let result = call(
            &ctx,
            Operation::Delete,
            Some(id),
            self.store
                .delete_one(&ctx, &self.config.collection, &filter),
        )
        .await?;

        debug!(id = %id, deleted = result.deleted_count, "deleted product");
        Ok(result.deleted_count)
    }

    /// Opens a stream over every record, in store order.
    ///
    /// The stream keeps the context of this call, so a deadline covers the
    /// whole listing, not each pull.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Persistence`] if the cursor cannot be opened and
    /// [`CoreError::Canceled`] if the context gives up first.
    pub async fn list(&self, ctx: &Context) -> CoreResult<RecordStream> {
        let ctx = self.scope(ctx);
        let cursor = call(
            &ctx,
            Operation::List,
            None,
            self.store
                .find(&ctx, &self.config.collection, &Filter::all()),
        )
        .await?;
        Ok(RecordStream::new(cursor, ctx))
    }

    /// Lists every record into memory.
    ///
    /// # Errors
    ///
    /// Fails like [`list`](Self::list) and [`RecordStream::next`]. No
    /// partial result is returned.
    pub async fn list_all(&self, ctx: &Context) -> CoreResult<Vec<Record>> {
        let records = self.list(ctx).await?.try_collect().await?;
        debug!(count = records.len(), "listed products");
        Ok(records)
    }

    fn scope(&self, ctx: &Context) -> Context {
        match self.config.default_timeout {
            Some(timeout) => ctx.with_timeout(timeout),
            None => ctx.child(),
        }
    }
}

impl<S: ?Sized> fmt::Debug for ProductRepository<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProductRepository")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn by_id(id: &RecordId) -> Filter {
    Filter::eq(FIELD_ID, id.as_str())
}

/// Runs one store call under `ctx`, classifying its failure.
async fn call<T>(
    ctx: &Context,
    operation: Operation,
    id: Option<&RecordId>,
    fut: impl Future<Output = StoreResult<T>>,
) -> CoreResult<T> {
    match ctx.run(fut).await {
        Ok(result) => result.map_err(|err| CoreError::from_store(operation, id.cloned(), err)),
        Err(reason) => Err(CoreError::canceled(operation, id.cloned(), reason)),
    }
}
