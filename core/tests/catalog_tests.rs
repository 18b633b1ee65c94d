// tests/catalog_tests.rs
mod common;

use common::*;
use serde_json::json;
use storefront::catalog::{
  categories_with_products, format_vnd, parse_price_range, CatalogFilter, CatalogView, PriceRange, PRICE_CEILING,
  PRICE_FILTERS,
};
use storefront::models::{Category, CategoryRef, Product, ProductSort};

fn category(id: &str, name: &str) -> Category {
  Category {
    id: id.into(),
    name: name.to_string(),
    slug: None,
  }
}

fn product(id: &str, category_id: Option<&str>) -> Product {
  Product {
    id: id.into(),
    name: format!("Product {}", id),
    slug: None,
    description: None,
    min_price: Some(100000.0),
    max_price: None,
    category: category_id.map(|c| CategoryRef::Id(c.into())),
    image: None,
    sales_count: 0,
  }
}

#[test]
fn test_documented_price_labels() {
  assert_eq!(parse_price_range("Dưới 200.000đ"), Some(PriceRange { min: 0, max: 200_000 }));
  assert_eq!(
    parse_price_range("500.000đ - 1.000.000đ"),
    Some(PriceRange {
      min: 500_000,
      max: 1_000_000
    })
  );
  assert_eq!(
    parse_price_range("Trên 2.000.000đ"),
    Some(PriceRange {
      min: 2_000_000,
      max: 999_999_999
    })
  );
  assert_eq!(PRICE_CEILING, 999_999_999);
}

#[test]
fn test_unfiltered_and_unparsable_labels() {
  assert_eq!(parse_price_range("Tất cả"), None);
  assert_eq!(parse_price_range(""), None);
  assert_eq!(parse_price_range("cheap"), None);
  assert_eq!(parse_price_range("900.000đ - 100.000đ"), None);
}

#[test]
fn test_every_offered_filter_except_all_parses() {
  let parsed: Vec<bool> = PRICE_FILTERS.iter().map(|l| parse_price_range(l).is_some()).collect();
  assert_eq!(parsed, vec![false, true, true, true, true, true]);
}

#[test]
fn test_format_vnd_groups_thousands() {
  assert_eq!(format_vnd(200000.0), "200.000đ");
  assert_eq!(format_vnd(1_234_567.4), "1.234.567đ");
  assert_eq!(format_vnd(999.0), "999đ");
  assert_eq!(format_vnd(0.0), "0đ");
}

#[test]
fn test_filter_becomes_product_query() {
  let filter = CatalogFilter {
    category: Some("c1".to_string()),
    price_label: Some("Dưới 200.000đ".to_string()),
    search: None,
    sort: Some(ProductSort::PriceAsc),
  };
  let pairs = filter.to_query().to_pairs();
  assert_eq!(
    pairs,
    vec![
      ("category".to_string(), "c1".to_string()),
      ("minPrice".to_string(), "0".to_string()),
      ("maxPrice".to_string(), "200000".to_string()),
      ("sort".to_string(), "price_asc".to_string()),
    ]
  );
}

#[test]
fn test_grouping_drops_empty_categories() {
  let categories = vec![category("c1", "Streaming"), category("c2", "Music"), category("c3", "Cloud")];
  let products = vec![product("p1", Some("c3")), product("p2", Some("c1")), product("p3", None), product("p4", Some("c3"))];

  let sections = categories_with_products(&categories, &products);
  let summary: Vec<(&str, usize)> = sections
    .iter()
    .map(|s| (s.category.name.as_str(), s.products.len()))
    .collect();
  assert_eq!(summary, vec![("Streaming", 1), ("Cloud", 2)]);
}

#[test]
fn test_empty_product_list_gives_empty_view() {
  let categories = vec![category("c1", "Streaming")];
  assert!(categories_with_products(&categories, &[]).is_empty());

  let view = CatalogView::build(&categories, &[]);
  assert!(view.is_empty());
  assert_eq!(view.total, 0);
}

#[test]
fn test_populated_category_reference_is_grouped() {
  setup_tracing();
  let raw = json!({
    "_id": "p9",
    "name": "Spotify",
    "category": { "_id": "c2", "name": "Music" }
  });
  let product: Product = serde_json::from_value(raw).unwrap();
  let sections = categories_with_products(&[category("c2", "Music")], &[product]);
  assert_eq!(sections.len(), 1);
}
