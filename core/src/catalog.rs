// storefront/src/catalog.rs

//! Price filters, currency formatting and category grouping for the catalog page.

use crate::models::{Category, Product, ProductQuery, ProductSort};

/// Upper bound used for open-ended "above X" filters.
pub const PRICE_CEILING: u64 = 999_999_999;

/// Filter labels offered by the catalog, in display order.
pub const PRICE_FILTERS: [&str; 6] = [
  "Tất cả",
  "Dưới 200.000đ",
  "200.000đ - 500.000đ",
  "500.000đ - 1.000.000đ",
  "1.000.000đ - 2.000.000đ",
  "Trên 2.000.000đ",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
  pub min: u64,
  pub max: u64,
}

fn parse_amount(raw: &str) -> Option<u64> {
  let digits: String = raw
    .trim()
    .trim_end_matches(['đ', '₫'])
    .chars()
    .filter(|c| !matches!(c, '.' | ',') && !c.is_whitespace())
    .collect();
  if digits.is_empty() {
    return None;
  }
  digits.parse().ok()
}

/// Turns a filter label into bounds.
///
/// `"Dưới X"` is `0..=X`, `"Trên X"` is `X..=PRICE_CEILING` and `"X - Y"`
/// is `X..=Y`. "Tất cả", blank and unrecognised labels mean no price filter.
pub fn parse_price_range(label: &str) -> Option<PriceRange> {
  let label = label.trim();
  let lower = label.to_lowercase();

  if let Some(rest) = lower.strip_prefix("dưới") {
    return parse_amount(rest).map(|max| PriceRange { min: 0, max });
  }
  if let Some(rest) = lower.strip_prefix("trên") {
    return parse_amount(rest).map(|min| PriceRange { min, max: PRICE_CEILING });
  }
  let (from, to) = label.split_once('-')?;
  let range = PriceRange {
    min: parse_amount(from)?,
    max: parse_amount(to)?,
  };
  (range.min <= range.max).then_some(range)
}

/// `200000.0` → `"200.000đ"`. Fractions are rounded to whole dong.
pub fn format_vnd(amount: f64) -> String {
  let whole = amount.max(0.0).round() as u64;
  let digits = whole.to_string();
  let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 2);
  for (i, c) in digits.chars().enumerate() {
    if i > 0 && (digits.len() - i) % 3 == 0 {
      out.push('.');
    }
    out.push(c);
  }
  out.push('đ');
  out
}

/// Filter controls of the catalog page. Any change re-fetches the whole list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogFilter {
  pub category: Option<String>,
  pub price_label: Option<String>,
  pub search: Option<String>,
  pub sort: Option<ProductSort>,
}

impl CatalogFilter {
  pub fn to_query(&self) -> ProductQuery {
    let range = self.price_label.as_deref().and_then(parse_price_range);
    ProductQuery {
      search: self.search.clone(),
      category: self.category.clone().filter(|c| !c.trim().is_empty()),
      min_price: range.map(|r| r.min),
      max_price: range.map(|r| r.max),
      sort: self.sort,
      ..ProductQuery::default()
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategorySection {
  pub category: Category,
  pub products: Vec<Product>,
}

/// Groups products under their category, keeping category order.
/// Categories without products are left out.
pub fn categories_with_products(categories: &[Category], products: &[Product]) -> Vec<CategorySection> {
  categories
    .iter()
    .filter_map(|category| {
      let members: Vec<Product> = products
        .iter()
        .filter(|p| p.category.as_ref().is_some_and(|c| c.id() == &category.id))
        .cloned()
        .collect();
      (!members.is_empty()).then(|| CategorySection {
        category: category.clone(),
        products: members,
      })
    })
    .collect()
}

/// What the catalog page renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogView {
  pub sections: Vec<CategorySection>,
  pub total: usize,
}

impl CatalogView {
  pub fn build(categories: &[Category], products: &[Product]) -> Self {
    Self {
      sections: categories_with_products(categories, products),
      total: products.len(),
    }
  }

  pub fn is_empty(&self) -> bool {
    self.sections.is_empty()
  }
}
