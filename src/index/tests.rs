//! Index Module Tests
//!
//! ## Test Scopes
//! - **Validation**: Negative price/stock and empty ids are refused by `upsert`.
//! - **Keyed Operations**: Replace-on-upsert, idempotent delete, get.
//! - **Lifecycle**: A closed store reports `StorageFailure`.

#[cfg(test)]
mod tests {
    use crate::error::Error;
    use crate::index::memory::{MemoryIndexStore, MemoryWatermarkStore};
    use crate::index::store::{IndexStore, WatermarkStore};
    use crate::index::types::{Product, ProductStatus};
    use crate::search::types::SearchQuery;
    use crate::testing::product;

    // ============================================================
    // PRODUCT VALIDATION
    // ============================================================

    #[test]
    fn test_validate_rejects_negative_price() {
        let p = product("p-1", "Shirt", -0.01);
        assert!(matches!(p.validate(), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_validate_rejects_nan_price() {
        let p = product("p-1", "Shirt", f64::NAN);
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_stock() {
        let mut p = product("p-1", "Shirt", 10.0);
        p.stock = -1;
        assert!(matches!(p.validate(), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_validate_accepts_zero_price_and_stock() {
        let mut p = product("p-1", "Free sample", 0.0);
        p.stock = 0;
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!("active".parse::<ProductStatus>().unwrap(), ProductStatus::Active);
        assert_eq!("INACTIVE".parse::<ProductStatus>().unwrap(), ProductStatus::Inactive);
        assert!("archived".parse::<ProductStatus>().is_err());
    }

    #[test]
    fn test_product_wire_format() {
        let json = serde_json::json!({
            "id": "p-7",
            "name": "Linen Shirt",
            "price": 12.5,
            "sku": "LS-7",
            "category_id": null,
            "status": "ACTIVE",
            "stock": 4
        });

        let p: Product = serde_json::from_value(json).unwrap();

        assert_eq!(p.status, ProductStatus::Active);
        assert!(p.active, "active defaults to true");
        assert!(p.category_id.is_none());
        assert_eq!(p.description, "");
    }

    // ============================================================
    // MEMORY INDEX STORE
    // ============================================================

    #[tokio::test]
    async fn test_upsert_replaces_existing() {
        let store = MemoryIndexStore::open();

        store.upsert(product("p-1", "Shirt", 10.0)).await.unwrap();
        store.upsert(product("p-1", "Shirt v2", 12.0)).await.unwrap();

        let stored = store.get("p-1").await.unwrap().unwrap();
        assert_eq!(stored.name, "Shirt v2");
        assert_eq!(stored.price, 12.0);
        assert_eq!(store.len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_upsert_invalid_leaves_store_untouched() {
        let store = MemoryIndexStore::open();
        store.upsert(product("p-1", "Shirt", 10.0)).await.unwrap();

        let result = store.upsert(product("p-1", "Shirt", -5.0)).await;

        assert!(matches!(result, Err(Error::InvalidArgument(_))));
        assert_eq!(store.get("p-1").await.unwrap().unwrap().price, 10.0);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = MemoryIndexStore::open();
        store.upsert(product("p-1", "Shirt", 10.0)).await.unwrap();

        assert!(store.delete("p-1").await.unwrap());
        assert!(!store.delete("p-1").await.unwrap());
        assert!(!store.delete("never-existed").await.unwrap());
        assert!(!store.delete("never-existed").await.unwrap());

        assert_eq!(store.len().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_query_counts_all_matches() {
        let store = MemoryIndexStore::open();
        for i in 0..25 {
            store
                .upsert(product(&format!("p-{:02}", i), "Shirt", i as f64))
                .await
                .unwrap();
        }

        let result = store.query(&SearchQuery::new(3, 10)).await.unwrap();

        assert_eq!(result.total, 25);
        assert_eq!(result.products.len(), 5);
    }

    #[tokio::test]
    async fn test_query_rejects_zero_page_and_limit() {
        let store = MemoryIndexStore::open();
        store.upsert(product("p-1", "Shirt", 10.0)).await.unwrap();

        assert!(matches!(
            store.query(&SearchQuery::new(0, 10)).await,
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            store.query(&SearchQuery::new(1, 0)).await,
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            store
                .query(&SearchQuery::new(1, 10).price_range(Some(-1.0), None))
                .await,
            Err(Error::InvalidArgument(_))
        ));

        let result = store.query(&SearchQuery::new(1, 10)).await.unwrap();
        assert_eq!(result.page, 1);
        assert_eq!(result.total, 1);
    }

    #[tokio::test]
    async fn test_closed_index_reports_storage_failure() {
        let store = MemoryIndexStore::open();
        store.upsert(product("p-1", "Shirt", 10.0)).await.unwrap();

        store.close().await;

        assert!(!store.is_open());
        assert!(matches!(
            store.upsert(product("p-2", "Hat", 5.0)).await,
            Err(Error::StorageFailure(_))
        ));
        assert!(matches!(store.get("p-1").await, Err(Error::StorageFailure(_))));
        assert!(matches!(store.delete("p-1").await, Err(Error::StorageFailure(_))));
        assert!(store.query(&SearchQuery::new(1, 10)).await.is_err());
    }

    // ============================================================
    // MEMORY WATERMARK STORE
    // ============================================================

    #[tokio::test]
    async fn test_watermark_set_and_get() {
        let store = MemoryWatermarkStore::open();

        assert_eq!(store.get("p-1").await.unwrap(), None);
        store.set("p-1", 42).await.unwrap();
        assert_eq!(store.get("p-1").await.unwrap(), Some(42));
        assert_eq!(store.get("p-2").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_closed_watermark_store_fails() {
        let store = MemoryWatermarkStore::open();
        store.close().await;

        assert!(matches!(store.get("p-1").await, Err(Error::StorageFailure(_))));
        assert!(matches!(store.set("p-1", 1).await, Err(Error::StorageFailure(_))));
    }
}
