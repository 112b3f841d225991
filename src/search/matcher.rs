//! Pure predicate, ordering and paging functions over product documents.
//!
//! Kept free of storage concerns so any `IndexStore` backend evaluating queries in process
//! produces identical results.

use std::cmp::Ordering;

use super::tokenizer::tokenize_query;
use super::types::{SearchQuery, SearchResult, SortField, SortOrder, SortSpec};
use crate::index::types::Product;

pub fn matches(product: &Product, query: &SearchQuery) -> bool {
    matches_text(product, query.query.as_deref()) && matches_filters(product, query)
}

/// Case-insensitive match over name and description: either the whole term appears as a
/// substring, or every significant token of the term does.
pub fn matches_text(product: &Product, term: Option<&str>) -> bool {
    let term = match term.map(str::trim) {
        Some(term) if !term.is_empty() => term.to_lowercase(),
        _ => return true,
    };

    let haystack = format!("{} {}", product.name, product.description).to_lowercase();
    if haystack.contains(&term) {
        return true;
    }

    let tokens = tokenize_query(&term);
    !tokens.is_empty() && tokens.iter().all(|token| haystack.contains(token.as_str()))
}

fn matches_filters(product: &Product, query: &SearchQuery) -> bool {
    let filters = &query.filters;

    if let Some(category) = &filters.category_id
        && product.category_id.as_ref() != Some(category)
    {
        return false;
    }
    if let Some(min) = filters.min_price
        && product.price < min
    {
        return false;
    }
    if let Some(max) = filters.max_price
        && product.price > max
    {
        return false;
    }
    if let Some(status) = filters.status
        && product.status != status
    {
        return false;
    }
    true
}

pub fn compare(a: &Product, b: &Product, sort: &SortSpec) -> Ordering {
    let primary = match sort.field {
        SortField::Id => Ordering::Equal,
        SortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        // Prices are finite once indexed, so -0.0 and 0.0 compare equal and fall to the id.
        SortField::Price => a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal),
        SortField::Stock => a.stock.cmp(&b.stock),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
    };

    let primary = match sort.order {
        SortOrder::Asc => primary,
        SortOrder::Desc => primary.reverse(),
    };

    // Sorting by id honours the requested direction; every other field breaks ties
    // on ascending id.
    match (sort.field, sort.order) {
        (SortField::Id, SortOrder::Desc) => b.id.cmp(&a.id),
        _ => primary.then_with(|| a.id.cmp(&b.id)),
    }
}

pub fn sort(products: &mut [Product], sort: &SortSpec) {
    products.sort_by(|a, b| compare(a, b, sort));
}

/// Cuts one page out of an already sorted match list. `total` is the full match count.
pub fn paginate(products: Vec<Product>, page: usize, limit: usize) -> SearchResult {
    let total = products.len();
    let offset = page.saturating_sub(1).saturating_mul(limit);
    let products = products.into_iter().skip(offset).take(limit).collect();

    SearchResult {
        products,
        total,
        page,
        limit,
    }
}
