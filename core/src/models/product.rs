// storefront/src/models/product.rs

use super::id::{EntityId, Identified};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
  #[serde(alias = "_id")]
  pub id: EntityId,
  pub name: String,
  #[serde(default)]
  pub slug: Option<String>,
}

/// Category as embedded in a product: either a bare id or the populated record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
  Id(EntityId),
  Populated(Category),
}

impl CategoryRef {
  pub fn id(&self) -> &EntityId {
    match self {
      CategoryRef::Id(id) => id,
      CategoryRef::Populated(category) => &category.id,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
  #[serde(alias = "_id")]
  pub id: EntityId,
  pub name: String,
  #[serde(default)]
  pub slug: Option<String>,
  #[serde(default)]
  pub description: Option<String>,
  /// Cheapest subscription duration price.
  #[serde(default)]
  pub min_price: Option<f64>,
  #[serde(default)]
  pub max_price: Option<f64>,
  #[serde(default)]
  pub category: Option<CategoryRef>,
  #[serde(default)]
  pub image: Option<String>,
  #[serde(default, alias = "sold")]
  pub sales_count: u64,
}

impl Identified for Product {
  fn id(&self) -> &EntityId {
    &self.id
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductSort {
  Newest,
  PriceAsc,
  PriceDesc,
  BestSelling,
}

impl ProductSort {
  pub fn as_param(&self) -> &'static str {
    match self {
      ProductSort::Newest => "newest",
      ProductSort::PriceAsc => "price_asc",
      ProductSort::PriceDesc => "price_desc",
      ProductSort::BestSelling => "best_selling",
    }
  }
}

/// Query parameters for the product listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductQuery {
  pub search: Option<String>,
  pub category: Option<String>,
  pub min_price: Option<u64>,
  pub max_price: Option<u64>,
  pub sort: Option<ProductSort>,
  pub page: Option<u32>,
  pub limit: Option<u32>,
}

impl ProductQuery {
  pub fn to_pairs(&self) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
      pairs.push(("search".to_string(), search.to_string()));
    }
    if let Some(category) = &self.category {
      pairs.push(("category".to_string(), category.clone()));
    }
    if let Some(min) = self.min_price {
      pairs.push(("minPrice".to_string(), min.to_string()));
    }
    if let Some(max) = self.max_price {
      pairs.push(("maxPrice".to_string(), max.to_string()));
    }
    if let Some(sort) = self.sort {
      pairs.push(("sort".to_string(), sort.as_param().to_string()));
    }
    if let Some(page) = self.page {
      pairs.push(("page".to_string(), page.to_string()));
    }
    if let Some(limit) = self.limit {
      pairs.push(("limit".to_string(), limit.to_string()));
    }
    pairs
  }
}
