// storefront/src/services/product.rs

use crate::error::ApiResult;
use crate::http::{ApiRequest, HttpClient};
use crate::models::{Category, Product, ProductQuery};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct ProductService {
  http: HttpClient,
}

impl ProductService {
  pub fn new(http: HttpClient) -> Self {
    Self { http }
  }

  #[instrument(name = "product_service::list", skip(self), err(Display))]
  pub async fn list(&self, query: &ProductQuery) -> ApiResult<Vec<Product>> {
    let products: Vec<Product> = self.http.send(ApiRequest::get(&["products"]).query(query.to_pairs())).await?;
    debug!(count = products.len(), "Products fetched.");
    Ok(products)
  }

  #[instrument(name = "product_service::by_slug", skip(self), err(Display))]
  pub async fn by_slug(&self, slug: &str) -> ApiResult<Product> {
    self.http.send(ApiRequest::get(&["products", "by-slug", slug])).await
  }

  #[instrument(name = "product_service::search", skip(self), err(Display))]
  pub async fn search(&self, term: &str) -> ApiResult<Vec<Product>> {
    let term = term.trim();
    if term.is_empty() {
      return Ok(Vec::new());
    }
    self.http.send(ApiRequest::get(&["products", "search"]).param("q", term)).await
  }

  #[instrument(name = "product_service::categories", skip(self), err(Display))]
  pub async fn categories(&self) -> ApiResult<Vec<Category>> {
    self.http.send(ApiRequest::get(&["categories"])).await
  }
}
