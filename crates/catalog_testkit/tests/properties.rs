//! Property tests over generated catalogs.

use catalog_core::RecordId;
use catalog_service::mapper::{product_to_record, record_to_product};
use catalog_storage::Context;
use catalog_testkit::prelude::*;
use proptest::prelude::*;
use std::collections::BTreeMap;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(PropTestConfig::quick().to_proptest_config())]

    #[test]
    fn stored_product_reads_back_equal(product in product_strategy()) {
        let (_store, repo) = memory_repository();
        let ctx = Context::background();
        let (created, fetched) = runtime().block_on(async {
            let created = repo.create(&ctx, product_to_record(&product)).await.unwrap();
            let fetched = repo.get(&ctx, &created.id).await.unwrap();
            (created, fetched)
        });
        prop_assert_eq!(&fetched, &created);

        let mut expected = product;
        expected.uuid = created.id.as_str().to_string();
        prop_assert_eq!(record_to_product(&fetched).unwrap(), expected);
    }

    #[test]
    fn repository_matches_model(ops in operation_sequence_strategy(1, 24)) {
        let (_store, repo) = memory_repository();
        let ctx = Context::background();
        let mut created: Vec<RecordId> = Vec::new();
        let mut model = BTreeMap::new();

        runtime().block_on(async {
            for op in ops {
                match op {
                    CatalogOperation::Create(product) => {
                        let record = repo.create(&ctx, product_to_record(&product)).await.unwrap();
                        created.push(record.id.clone());
                        model.insert(record.id.clone(), record);
                    }
                    CatalogOperation::Update(n, product) if !created.is_empty() => {
                        let id = created[n % created.len()].clone();
                        let record = product_to_record(&product).with_id(id.clone());
                        repo.update(&ctx, record.clone()).await.unwrap();
                        if let Some(slot) = model.get_mut(&id) {
                            *slot = record;
                        }
                    }
                    CatalogOperation::Delete(n) if !created.is_empty() => {
                        let id = &created[n % created.len()];
                        let removed = repo.delete(&ctx, id).await.unwrap();
                        assert_eq!(removed, u64::from(model.remove(id).is_some()));
                    }
                    CatalogOperation::Get(n) if !created.is_empty() => {
                        let id = &created[n % created.len()];
                        match (repo.get(&ctx, id).await, model.get(id)) {
                            (Ok(found), Some(expected)) => assert_eq!(&found, expected),
                            (Err(err), None) => assert!(err.is_not_found()),
                            (got, want) => panic!("store and model disagree: {got:?} vs {want:?}"),
                        }
                    }
                    _ => {}
                }
            }

            let mut listed = repo.list_all(&ctx).await.unwrap();
            listed.sort_by(|a, b| a.id.cmp(&b.id));
            let expected: Vec<_> = model.values().cloned().collect();
            assert_eq!(listed, expected);
        });
    }
}
