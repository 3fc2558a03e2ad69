//! End-to-end service behaviour.

use catalog_codec::WireValue;
use catalog_service::{
    CatalogService, Code, DeleteProductRequest, GetProductRequest, ListProductsRequest,
    ServiceConfig,
};
use catalog_storage::Context;
use catalog_testkit::prelude::*;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn sample_product_lifecycle() {
    let (_store, service) = memory_service();
    let ctx = Context::background();

    let created = service.create_product(&ctx, sample_product()).await.unwrap();
    assert!(!created.uuid.is_empty());
    assert_eq!(created.name, SAMPLE_NAME);
    assert_eq!(created.description, SAMPLE_DESCRIPTION);
    assert_eq!(created.price, SAMPLE_PRICE);
    assert_eq!(created.attributes, sample_product().attributes);

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

    let deleted = service
        .delete_product(
            &ctx,
            DeleteProductRequest {
                uuid: created.uuid.clone(),
            },
        )
        .await
        .unwrap();
    assert_eq!(deleted.result, "success");

    let status = service
        .get_product(&ctx, GetProductRequest { uuid: created.uuid })
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::NotFound);
}

#[tokio::test]
async fn nested_attributes_survive() {
    let (_store, service) = memory_service();
    let ctx = Context::background();

    let mut product = sample_product();
    product.attributes.insert(
        "dimensions".into(),
        WireValue::structure([
            ("width", WireValue::Number(30.5)),
            ("unit", WireValue::from("cm")),
            (
                "tags",
                WireValue::List(vec![WireValue::Bool(true), WireValue::Null]),
            ),
        ]),
    );

    let created = service.create_product(&ctx, product.clone()).await.unwrap();
    product.uuid = created.uuid.clone();
    assert_eq!(created, product);

    let listed = service
        .list_products(&ctx, ListProductsRequest::default())
        .await
        .unwrap();
    assert_eq!(listed.products, vec![product]);
}

#[tokio::test]
async fn update_then_list() {
    let (_store, service) = memory_service();
    let ctx = Context::background();

    let created = service.create_product(&ctx, sample_product()).await.unwrap();
    let mut changed = created.clone();
    changed.price = 4.5;
    changed.attributes.clear();

    let updated = service.update_product(&ctx, changed.clone()).await.unwrap();
    assert_eq!(updated, changed);

    let listed = service
        .list_products(&ctx, ListProductsRequest::default())
        .await
        .unwrap();
    assert_eq!(listed.products, vec![changed]);
}

#[tokio::test]
async fn store_failure_is_internal() {
    let (store, repo) = scripted_repository();
    let service = CatalogService::new(Arc::new(repo));
    store.fail(StoreOp::Find, "connection refused");

    let status = service
        .list_products(&Context::background(), ListProductsRequest::default())
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::Internal);
    assert!(status.message().contains("connection refused"));
}

#[tokio::test]
async fn request_timeout_is_deadline_exceeded() {
    let (store, repo) = scripted_repository();
    let service = CatalogService::with_config(
        Arc::new(repo),
        ServiceConfig::new().with_request_timeout(Duration::from_millis(20)),
    );
    store.hang(StoreOp::FindOne);

    let status = service
        .get_product(
            &Context::background(),
            GetProductRequest { uuid: "x".into() },
        )
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::DeadlineExceeded);
}
