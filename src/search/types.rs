use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::config::SearchConfig;
use crate::error::{Error, Result};
use crate::index::types::{Product, ProductStatus};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Id,
    Name,
    Price,
    Stock,
    #[default]
    CreatedAt,
    UpdatedAt,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "id" => Ok(Self::Id),
            "name" => Ok(Self::Name),
            "price" => Ok(Self::Price),
            "stock" => Ok(Self::Stock),
            "created_at" => Ok(Self::CreatedAt),
            "updated_at" => Ok(Self::UpdatedAt),
            other => Err(Error::invalid(format!("unknown sort field '{}'", other))),
        }
    }
}

impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(Error::invalid(format!("unknown sort order '{}'", other))),
        }
    }
}

/// Sort key plus direction. Ties always fall back to ascending product id.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SortSpec {
    pub field: SortField,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }
}

/// Structured filters, applied conjunctively. `None` means "don't filter on this".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchFilters {
    pub category_id: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub status: Option<ProductStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchQuery {
    pub query: Option<String>,
    #[serde(default)]
    pub filters: SearchFilters,
    #[serde(default)]
    pub sort: SortSpec,
    /// 1-based.
    pub page: usize,
    pub limit: usize,
}

impl SearchQuery {
    pub fn new(page: usize, limit: usize) -> Self {
        Self {
            query: None,
            filters: SearchFilters::default(),
            sort: SortSpec::default(),
            page,
            limit,
        }
    }

    pub fn text(mut self, term: impl Into<String>) -> Self {
        self.query = Some(term.into());
        self
    }

    pub fn status(mut self, status: ProductStatus) -> Self {
        self.filters.status = Some(status);
        self
    }

    pub fn category(mut self, category_id: impl Into<String>) -> Self {
        self.filters.category_id = Some(category_id.into());
        self
    }

    pub fn price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.filters.min_price = min;
        self.filters.max_price = max;
        self
    }

    pub fn sort_by(mut self, field: SortField, order: SortOrder) -> Self {
        self.sort = SortSpec::new(field, order);
        self
    }

    /// Rejects out-of-range pagination and price bounds. Nothing is clamped.
    pub fn validate(&self, max_page_size: usize) -> Result<()> {
        if self.page < 1 {
            return Err(Error::invalid(format!("page must be >= 1, got {}", self.page)));
        }
        if self.limit == 0 || self.limit > max_page_size {
            return Err(Error::invalid(format!(
                "limit must be within 1..={}, got {}",
                max_page_size, self.limit
            )));
        }

        let filters = &self.filters;
        for (label, bound) in [("min_price", filters.min_price), ("max_price", filters.max_price)] {
            if let Some(value) = bound
                && (!value.is_finite() || value < 0.0)
            {
                return Err(Error::invalid(format!("{} must be >= 0, got {}", label, value)));
            }
        }
        if let (Some(min), Some(max)) = (filters.min_price, filters.max_price)
            && min > max
        {
            return Err(Error::invalid(format!(
                "min_price {} exceeds max_price {}",
                min, max
            )));
        }

        Ok(())
    }
}

/// Raw query-string parameters of `GET /search`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub status: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

impl SearchQuery {
    /// Builds a query from raw parameters, filling in the configured defaults.
    /// Unknown enum values are rejected here; bounds are checked by `validate`.
    pub fn from_params(params: SearchParams, config: &SearchConfig) -> Result<Self> {
        let status = params
            .status
            .as_deref()
            .map(str::parse::<ProductStatus>)
            .transpose()?;
        let field = match params.sort.as_deref() {
            Some(field) => field.parse()?,
            None => SortField::default(),
        };
        let order = match params.order.as_deref() {
            Some(order) => order.parse()?,
            None => SortOrder::default(),
        };

        Ok(Self {
            query: params.q.filter(|q| !q.trim().is_empty()),
            filters: SearchFilters {
                category_id: params.category,
                min_price: params.min_price,
                max_price: params.max_price,
                status,
            },
            sort: SortSpec::new(field, order),
            page: params.page.unwrap_or(1),
            limit: params.limit.unwrap_or(config.default_page_size),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub products: Vec<Product>,
    /// Matches across all pages, not just this one.
    pub total: usize,
    pub page: usize,
    pub limit: usize,
}
