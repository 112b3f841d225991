use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProductStatus {
    Active,
    Inactive,
}

impl std::str::FromStr for ProductStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(Self::Active),
            "INACTIVE" => Ok(Self::Inactive),
            other => Err(Error::invalid(format!("unknown product status '{}'", other))),
        }
    }
}

/// A product document as held by the search index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub sku: String,
    #[serde(default)]
    pub category_id: Option<String>,
    pub status: ProductStatus,
    pub stock: i64,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub created_at: u64,
    #[serde(default)]
    pub updated_at: u64,
}

fn default_active() -> bool {
    true
}

impl Product {
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::invalid("product id must not be empty"));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(Error::invalid(format!(
                "product '{}' has invalid price {}",
                self.id, self.price
            )));
        }
        if self.stock < 0 {
            return Err(Error::invalid(format!(
                "product '{}' has negative stock {}",
                self.id, self.stock
            )));
        }
        Ok(())
    }
}
