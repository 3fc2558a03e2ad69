//! Request handlers for the catalog.

use crate::config::ServiceConfig;
use crate::error::{Code, ServiceError, ServiceResult, Status};
use crate::mapper::{product_to_record, record_to_product, records_to_products};
use crate::messages::{
    DeleteProductRequest, DeleteProductResponse, GetProductRequest, ListProductsRequest,
    ListProductsResponse, Product,
};
use catalog_core::{ProductRepository, RecordId};
use catalog_storage::{Context, DocumentStore};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Serves catalog requests on top of a [`ProductRepository`].
///
/// Each handler derives a request context from the caller's (bounded by
/// [`ServiceConfig::request_timeout`]), converts between wire products and
/// records, and turns failures into a [`Status`]. Failures are logged here
/// and nowhere below.
pub struct CatalogService<S: ?Sized = dyn DocumentStore> {
    repository: Arc<ProductRepository<S>>,
    config: ServiceConfig,
}

impl<S: DocumentStore + ?Sized> CatalogService<S> {
    /// Creates a service with the default configuration.
    pub fn new(repository: Arc<ProductRepository<S>>) -> Self {
        Self::with_config(repository, ServiceConfig::default())
    }

    /// Creates a service with the given configuration.
    pub fn with_config(repository: Arc<ProductRepository<S>>, config: ServiceConfig) -> Self {
        Self { repository, config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Returns the repository.
    pub fn repository(&self) -> &Arc<ProductRepository<S>> {
        &self.repository
    }

    /// Creates a product. The returned product carries its new identifier.
    pub async fn create_product(&self, ctx: &Context, product: Product) -> Result<Product, Status> {
        let ctx = self.request_context(ctx);
        let result = async {
            let record = self
                .repository
                .create(&ctx, product_to_record(&product))
                .await?;
            Ok::<_, ServiceError>(record_to_product(&record)?)
        }
        .await;
        report("create_product", result)
    }

    /// Fetches one product.
    pub async fn get_product(
        &self,
        ctx: &Context,
        request: GetProductRequest,
    ) -> Result<Product, Status> {
        let ctx = self.request_context(ctx);
        let result = async {
            let record = self
                .repository
                .get(&ctx, &RecordId::new(request.uuid))
                .await?;
            Ok::<_, ServiceError>(record_to_product(&record)?)
        }
        .await;
        report("get_product", result)
    }

    /// Replaces a product entirely.
    pub async fn update_product(&self, ctx: &Context, product: Product) -> Result<Product, Status> {
        let ctx = self.request_context(ctx);
        let result = async {
            let record = self
                .repository
                .update(&ctx, product_to_record(&product))
                .await?;
            Ok::<_, ServiceError>(record_to_product(&record)?)
        }
        .await;
        report("update_product", result)
    }

    /// Removes a product. Succeeds whether or not it existed.
    pub async fn delete_product(
        &self,
        ctx: &Context,
        request: DeleteProductRequest,
    ) -> Result<DeleteProductResponse, Status> {
        let ctx = self.request_context(ctx);
        let result = async {
            self.repository
                .delete(&ctx, &RecordId::new(request.uuid))
                .await?;
            Ok::<_, ServiceError>(DeleteProductResponse::success())
        }
        .await;
        report("delete_product", result)
    }

    /// Lists every product.
    pub async fn list_products(
        &self,
        ctx: &Context,
        _request: ListProductsRequest,
    ) -> Result<ListProductsResponse, Status> {
        let ctx = self.request_context(ctx);
        let result = async {
            let records = self.repository.list_all(&ctx).await?;
            Ok::<_, ServiceError>(ListProductsResponse {
                products: records_to_products(&records)?,
            })
        }
        .await;
        report("list_products", result)
    }

    fn request_context(&self, ctx: &Context) -> Context {
        match self.config.request_timeout {
            Some(timeout) => ctx.with_timeout(timeout),
            None => ctx.child(),
        }
    }
}

fn report<T>(handler: &'static str, result: ServiceResult<T>) -> Result<T, Status> {
    result.map_err(|err| {
        let status = Status::from(&err);
        match status.code() {
            Code::NotFound => info!(handler, error = %err, "request failed"),
            Code::Cancelled | Code::DeadlineExceeded => {
                warn!(handler, error = %err, "request interrupted");
            }
            Code::Internal => error!(handler, error = %err, "request failed"),
        }
        status
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_codec::{Value, WireValue};
    use catalog_storage::InMemoryStore;
    use std::time::Duration;

    fn service() -> (Arc<InMemoryStore>, CatalogService<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::new());
        let repo = Arc::new(ProductRepository::new(Arc::clone(&store)));
        (store, CatalogService::new(repo))
    }

    fn lamp() -> Product {
        let mut product = Product::new("Lamp", "Desk lamp", 19.5);
        product
            .attributes
            .insert("color".into(), WireValue::from("blue"));
        product
    }

    #[tokio::test]
    async fn create_then_get() {
        let (_, service) = service();
        let ctx = Context::background();

        let created = service.create_product(&ctx, lamp()).await.unwrap();
        assert!(!created.uuid.is_empty());

        let fetched = service
            .get_product(
                &ctx,
                GetProductRequest {
                    uuid: created.uuid.clone(),
                },
            )
            .await
            .unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn get_missing_is_not_found_status() {
        let (_, service) = service();
        let status = service
            .get_product(
                &Context::background(),
                GetProductRequest {
                    uuid: "missing".into(),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::NotFound);
    }

    #[tokio::test]
    async fn delete_reports_success() {
        let (_, service) = service();
        let response = service
            .delete_product(
                &Context::background(),
                DeleteProductRequest {
                    uuid: "whatever".into(),
                },
            )
            .await
            .unwrap();
        assert_eq!(response.result, "success");
    }

    #[tokio::test]
    async fn list_with_unrepresentable_attribute_is_internal() {
        let (store, service) = service();
        let ctx = Context::background();
        service.create_product(&ctx, lamp()).await.unwrap();
        let foreign = Value::text_map([
            ("uuid", Value::from("foreign")),
            ("attributes", Value::text_map([("raw", Value::Bytes(vec![0]))])),
        ]);
        store.insert_one(&ctx, "products", foreign).await.unwrap();

        let status = service
            .list_products(&ctx, ListProductsRequest::default())
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::Internal);
        assert!(status.message().contains("index 1"));
        assert!(status.message().contains("raw"));
    }

    #[tokio::test]
    async fn elapsed_request_timeout_is_deadline_exceeded() {
        let store = Arc::new(InMemoryStore::new());
        let repo = Arc::new(ProductRepository::new(store));
        let service = CatalogService::with_config(
            repo,
            ServiceConfig::new().with_request_timeout(Duration::ZERO),
        );
        let status = service
            .list_products(&Context::background(), ListProductsRequest::default())
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::DeadlineExceeded);
    }

    #[tokio::test]
    async fn cancelled_caller_is_cancelled_status() {
        let (_, service) = service();
        let ctx = Context::background();
        ctx.cancel();
        let status = service.create_product(&ctx, lamp()).await.unwrap_err();
        assert_eq!(status.code(), Code::Cancelled);
    }
}
