//! Test fixtures and catalog helpers.
//!
//! Provides the canonical sample product plus ready-wired repositories and
//! services over in-memory, scripted and file-backed stores.

use crate::doubles::ScriptedStore;
use crate::ids::SequentialIdGenerator;
use catalog_codec::{Value, WireValue};
use catalog_core::{ProductRepository, Record};
use catalog_service::{CatalogService, Product};
use catalog_storage::{FileStore, InMemoryStore};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// Name of the sample product.
pub const SAMPLE_NAME: &str = "Test Product Name";
/// Description of the sample product.
pub const SAMPLE_DESCRIPTION: &str = "Test Product Description";
/// Price of the sample product.
pub const SAMPLE_PRICE: f32 = 9.99;

/// The sample product as sent by a client: no id, `color` and `size`
/// attributes.
pub fn sample_product() -> Product {
    let mut product = Product::new(SAMPLE_NAME, SAMPLE_DESCRIPTION, SAMPLE_PRICE);
    product
        .attributes
        .insert("color".into(), WireValue::from("blue"));
    product
        .attributes
        .insert("size".into(), WireValue::Number(12.0));
    product
}

/// The sample product as an unpersisted record.
pub fn sample_record() -> Record {
    Record::new(SAMPLE_NAME, SAMPLE_DESCRIPTION, SAMPLE_PRICE)
        .with_attribute("color", "blue")
        .with_attribute("size", Value::Float(12.0))
}

/// A repository over a fresh in-memory store with sequential ids.
pub fn memory_repository() -> (Arc<InMemoryStore>, ProductRepository<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    let repo = ProductRepository::new(Arc::clone(&store))
        .with_id_generator(SequentialIdGenerator::default());
    (store, repo)
}

/// A repository over a fresh scripted store with sequential ids.
pub fn scripted_repository() -> (Arc<ScriptedStore>, ProductRepository<ScriptedStore>) {
    let store = Arc::new(ScriptedStore::new());
    let repo = ProductRepository::new(Arc::clone(&store))
        .with_id_generator(SequentialIdGenerator::default());
    (store, repo)
}

/// A service over a fresh in-memory store.
pub fn memory_service() -> (Arc<InMemoryStore>, CatalogService<InMemoryStore>) {
    let (store, repo) = memory_repository();
    (store, CatalogService::new(Arc::new(repo)))
}

/// A file-backed store in a temporary directory, removed on drop.
pub struct TestFileStore {
    /// The store.
    pub store: Arc<FileStore>,
    /// The temporary directory (kept alive to prevent cleanup).
    _temp_dir: TempDir,
}

impl TestFileStore {
    /// Opens a new empty store.
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = FileStore::open(temp_dir.path().join("catalog.db"))
            .await
            .expect("Failed to open file store");
        Self {
            store: Arc::new(store),
            _temp_dir: temp_dir,
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> PathBuf {
        self.store.path().to_path_buf()
    }

    /// Reopens the backing file as a second, independent store.
    pub async fn reopen(&self) -> FileStore {
        FileStore::open(self.path())
            .await
            .expect("Failed to reopen file store")
    }

    /// A repository over this store with sequential ids.
    pub fn repository(&self) -> ProductRepository<FileStore> {
        ProductRepository::new(Arc::clone(&self.store))
            .with_id_generator(SequentialIdGenerator::default())
    }
}
