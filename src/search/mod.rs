//! Product Search Module
//!
//! Answers storefront search requests against the product index.
//!
//! ## Responsibilities
//! - **Validation**: Rejects out-of-range pagination and contradictory price filters.
//! - **Matching**: Case-insensitive free-text match over name and description, plus
//!   conjunctive structured filters (category, price range, status).
//! - **Ordering**: Sorts on the requested field with a stable tie-break on product id.
//! - **Paging**: Returns one page together with the full match count.
//!
//! ## Submodules
//! - **`engine`**: `QueryEngine`, the entry point for searches.
//! - **`matcher`**: Pure match/sort/paginate functions used by index backends.
//! - **`tokenizer`**: Query tokenization.
//! - **`types`**: Query and result types.
//! - **`handlers`**: HTTP handlers for the Axum server.

pub mod engine;
pub mod handlers;
pub mod matcher;
pub mod tokenizer;
pub mod types;

#[cfg(test)]
mod tests;
