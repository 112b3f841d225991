//! Search Module Tests
//!
//! ## Test Scopes
//! - **Tokenizer**: Query splitting and normalization.
//! - **Matcher**: Free-text matching, filters, ordering with id tie-break, paging.
//! - **Engine**: Validation of pagination and price bounds, end-to-end queries.
//! - **HTTP**: Query-string parsing and error statuses.

#[cfg(test)]
mod tests {
    use crate::config::SearchConfig;
    use crate::error::Error;
    use crate::index::memory::MemoryIndexStore;
    use crate::index::store::IndexStore;
    use crate::index::types::{Product, ProductStatus};
    use crate::search::engine::QueryEngine;
    use crate::search::matcher;
    use crate::search::tokenizer::tokenize_query;
    use crate::search::types::{
        SearchParams, SearchQuery, SearchResult, SortField, SortOrder, SortSpec,
    };
    use crate::testing::{product, spawn_node};
    use std::sync::Arc;

    fn ids(result: &SearchResult) -> Vec<&str> {
        result.products.iter().map(|p| p.id.as_str()).collect()
    }

    async fn engine_with(products: Vec<Product>) -> Arc<QueryEngine> {
        let store = MemoryIndexStore::open();
        for p in products {
            store.upsert(p).await.unwrap();
        }
        QueryEngine::new(store, SearchConfig::default())
    }

    fn catalogue() -> Vec<Product> {
        let mut shirt_a = product("p-3", "Oxford Shirt", 30.0);
        shirt_a.description = "Cotton, button-down collar".to_string();
        shirt_a.category_id = Some("tops".to_string());

        let mut shirt_b = product("p-1", "Linen shirt", 20.0);
        shirt_b.category_id = Some("tops".to_string());

        let mut shirt_c = product("p-2", "Flannel Shirt", 20.0);
        shirt_c.category_id = Some("tops".to_string());

        let mut retired = product("p-4", "Denim Shirt", 15.0);
        retired.status = ProductStatus::Inactive;

        let mut tee = product("p-5", "Basic Tee", 8.0);
        tee.description = "Pairs well with any shirt".to_string();
        tee.category_id = Some("tops".to_string());

        let mut boots = product("p-6", "Chelsea Boots", 120.0);
        boots.category_id = Some("shoes".to_string());

        vec![shirt_a, shirt_b, shirt_c, retired, tee, boots]
    }

    // ============================================================
    // TOKENIZER TESTS
    // ============================================================

    #[test]
    fn test_tokenize_query_lowercases_and_orders() {
        let tokens = tokenize_query("Blue OXFORD Shirt");
        assert_eq!(tokens, vec!["blue", "oxford", "shirt"]);
    }

    #[test]
    fn test_tokenize_query_drops_short_words_and_punctuation() {
        let tokens = tokenize_query("a shirt, in XL!");
        assert_eq!(tokens, vec!["shirt"]);
    }

    #[test]
    fn test_tokenize_query_empty() {
        assert!(tokenize_query("").is_empty());
        assert!(tokenize_query("   ").is_empty());
    }

    // ============================================================
    // MATCHER TESTS
    // ============================================================

    #[test]
    fn test_text_match_is_case_insensitive_substring() {
        let p = product("p-1", "Oxford Shirt", 30.0);

        assert!(matcher::matches_text(&p, Some("SHIRT")));
        assert!(matcher::matches_text(&p, Some("ford sh")));
        assert!(!matcher::matches_text(&p, Some("boots")));
    }

    #[test]
    fn test_text_match_covers_description() {
        let mut p = product("p-1", "Basic Tee", 8.0);
        p.description = "Organic cotton".to_string();

        assert!(matcher::matches_text(&p, Some("cotton")));
    }

    #[test]
    fn test_text_match_tokens_in_any_order() {
        let mut p = product("p-1", "Oxford Shirt", 30.0);
        p.description = "Blue cotton".to_string();

        assert!(matcher::matches_text(&p, Some("blue shirt")));
        assert!(!matcher::matches_text(&p, Some("blue boots")));
    }

    #[test]
    fn test_empty_text_matches_everything() {
        let p = product("p-1", "Anything", 1.0);
        assert!(matcher::matches_text(&p, None));
        assert!(matcher::matches_text(&p, Some("  ")));
    }

    #[test]
    fn test_sort_price_ties_break_on_id() {
        let mut products = vec![
            product("p-9", "A", 20.0),
            product("p-2", "B", 20.0),
            product("p-5", "C", 10.0),
        ];

        matcher::sort(&mut products, &SortSpec::new(SortField::Price, SortOrder::Asc));
        let order: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(order, vec!["p-5", "p-2", "p-9"]);

        matcher::sort(&mut products, &SortSpec::new(SortField::Price, SortOrder::Desc));
        let order: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(order, vec!["p-2", "p-9", "p-5"]);
    }

    #[test]
    fn test_sort_negative_zero_price_ties_on_id() {
        let mut products = vec![product("b", "x", -0.0), product("a", "x", 0.0)];

        matcher::sort(&mut products, &SortSpec::new(SortField::Price, SortOrder::Asc));

        let order: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(order, vec!["a", "b"]);
    }

    #[test]
    fn test_sort_by_id_descending() {
        let mut products = vec![product("a", "x", 1.0), product("c", "x", 1.0), product("b", "x", 1.0)];

        matcher::sort(&mut products, &SortSpec::new(SortField::Id, SortOrder::Desc));

        let order: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(order, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_paginate_past_the_end() {
        let products = vec![product("a", "x", 1.0), product("b", "x", 1.0)];

        let result = matcher::paginate(products, 5, 10);

        assert!(result.products.is_empty());
        assert_eq!(result.total, 2);
        assert_eq!(result.page, 5);
    }

    // ============================================================
    // ENGINE TESTS
    // ============================================================

    #[tokio::test]
    async fn test_search_shirt_active_by_price() {
        let engine = engine_with(catalogue()).await;

        let query = SearchQuery::new(1, 10)
            .text("shirt")
            .status(ProductStatus::Active)
            .sort_by(SortField::Price, SortOrder::Asc);
        let result = engine.search(&query).await.unwrap();

        // p-5 mentions "shirt" in its description; p-4 is inactive; p-6 does not match.
        assert_eq!(ids(&result), vec!["p-5", "p-1", "p-2", "p-3"]);
        assert_eq!(result.total, 4);
        assert!(result.products.len() <= 10);
        assert!(result.products.iter().all(|p| p.status == ProductStatus::Active));
    }

    #[tokio::test]
    async fn test_total_is_independent_of_page_size() {
        let engine = engine_with(catalogue()).await;

        for limit in [1, 2, 3, 10] {
            let query = SearchQuery::new(1, limit)
                .text("shirt")
                .status(ProductStatus::Active);
            let result = engine.search(&query).await.unwrap();
            assert_eq!(result.total, 4, "limit {}", limit);
            assert_eq!(result.products.len(), limit.min(4));
            assert_eq!(result.limit, limit);
        }
    }

    #[tokio::test]
    async fn test_pages_do_not_overlap() {
        let engine = engine_with(catalogue()).await;
        let sort = (SortField::Price, SortOrder::Asc);

        let first = engine
            .search(&SearchQuery::new(1, 2).sort_by(sort.0, sort.1))
            .await
            .unwrap();
        let second = engine
            .search(&SearchQuery::new(2, 2).sort_by(sort.0, sort.1))
            .await
            .unwrap();

        assert_eq!(ids(&first), vec!["p-5", "p-4"]);
        assert_eq!(ids(&second), vec!["p-1", "p-2"]);
        assert_eq!(first.total, 6);
    }

    #[tokio::test]
    async fn test_filters_are_conjunctive() {
        let engine = engine_with(catalogue()).await;

        let query = SearchQuery::new(1, 10)
            .category("tops")
            .price_range(Some(10.0), Some(25.0))
            .sort_by(SortField::Id, SortOrder::Asc);
        let result = engine.search(&query).await.unwrap();

        assert_eq!(ids(&result), vec!["p-1", "p-2"]);
    }

    #[tokio::test]
    async fn test_page_zero_is_invalid() {
        let engine = engine_with(catalogue()).await;

        let result = engine.search(&SearchQuery::new(0, 10)).await;

        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_limit_bounds() {
        let engine = engine_with(catalogue()).await;

        assert!(matches!(
            engine.search(&SearchQuery::new(1, 0)).await,
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            engine.search(&SearchQuery::new(1, 101)).await,
            Err(Error::InvalidArgument(_))
        ));
        assert!(engine.search(&SearchQuery::new(1, 100)).await.is_ok());
    }

    #[tokio::test]
    async fn test_inverted_price_range_is_invalid() {
        let engine = engine_with(catalogue()).await;

        let query = SearchQuery::new(1, 10).price_range(Some(50.0), Some(10.0));

        assert!(matches!(
            engine.search(&query).await,
            Err(Error::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn test_get_product() {
        let engine = engine_with(catalogue()).await;

        assert_eq!(engine.get_product("p-6").await.unwrap().name, "Chelsea Boots");
        assert!(matches!(
            engine.get_product("p-404").await,
            Err(Error::NotFound { .. })
        ));
    }

    // ============================================================
    // PARAMETER PARSING
    // ============================================================

    #[test]
    fn test_from_params_applies_defaults() {
        let query = SearchQuery::from_params(SearchParams::default(), &SearchConfig::default())
            .unwrap();

        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 10);
        assert_eq!(query.sort, SortSpec::default());
        assert!(query.query.is_none());
    }

    #[test]
    fn test_from_params_parses_enums() {
        let params = SearchParams {
            q: Some("shirt".to_string()),
            status: Some("active".to_string()),
            sort: Some("price".to_string()),
            order: Some("asc".to_string()),
            ..SearchParams::default()
        };

        let query = SearchQuery::from_params(params, &SearchConfig::default()).unwrap();

        assert_eq!(query.filters.status, Some(ProductStatus::Active));
        assert_eq!(query.sort, SortSpec::new(SortField::Price, SortOrder::Asc));
    }

    #[test]
    fn test_query_validate_respects_page_size_cap() {
        assert!(SearchQuery::new(1, 50).validate(50).is_ok());
        assert!(matches!(
            SearchQuery::new(1, 51).validate(50),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            SearchQuery::new(0, 1).validate(50),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_from_params_rejects_unknown_sort() {
        let params = SearchParams {
            sort: Some("popularity".to_string()),
            ..SearchParams::default()
        };

        let result = SearchQuery::from_params(params, &SearchConfig::default());
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    // ============================================================
    // HTTP TESTS
    // ============================================================

    #[tokio::test]
    async fn test_http_search() {
        let node = spawn_node().await;
        for p in catalogue() {
            node.index.upsert(p).await.unwrap();
        }

        let result: SearchResult = reqwest::get(node.url(
            "/search?q=shirt&status=ACTIVE&sort=price&order=asc&page=1&limit=2",
        ))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

        assert_eq!(ids(&result), vec!["p-5", "p-1"]);
        assert_eq!(result.total, 4);
    }

    #[tokio::test]
    async fn test_http_search_page_zero_is_bad_request() {
        let node = spawn_node().await;

        let response = reqwest::get(node.url("/search?page=0")).await.unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_http_get_product_not_found() {
        let node = spawn_node().await;

        let response = reqwest::get(node.url("/products/p-404")).await.unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
    }
}
