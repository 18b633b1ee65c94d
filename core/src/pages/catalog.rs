// storefront/src/pages/catalog.rs

use crate::catalog::{CatalogFilter, CatalogView};
use crate::core::{ContextData, PipelineControl};
use crate::error::{ApiError, ApiResult, PipelineError};
use crate::models::{Category, Product};
use crate::pipeline::Pipeline;
use crate::services::ProductService;
use futures_util::future::try_join;
use tracing::{event, instrument, Level};

#[derive(Debug, Clone, Default)]
pub struct CatalogContext {
  pub filter: CatalogFilter,
  pub categories: Vec<Category>,
  pub products: Vec<Product>,
  pub view: CatalogView,
}

impl CatalogContext {
  pub fn new(filter: CatalogFilter) -> Self {
    Self {
      filter,
      ..Self::default()
    }
  }
}

pub fn catalog_pipeline(products: ProductService) -> Result<Pipeline<CatalogContext, ApiError>, PipelineError> {
  let mut pipeline = Pipeline::new("catalog", &["load_catalog", "group_by_category"]);

  // Both lists or neither: a failed fetch leaves the context untouched.
  pipeline.on_root("load_catalog", move |ctx: ContextData<CatalogContext>| {
    let products = products.clone();
    async move {
      let query = ctx.read().filter.to_query();
      let (categories, items) = try_join(products.categories(), products.list(&query)).await?;
      event!(Level::DEBUG, categories = categories.len(), products = items.len(), "Catalog fetched.");
      ctx.update(|c| {
        c.categories = categories;
        c.products = items;
      });
      Ok::<_, ApiError>(PipelineControl::Continue)
    }
  })?;

  pipeline.on_root("group_by_category", |ctx: ContextData<CatalogContext>| async move {
    ctx.update(|c| c.view = CatalogView::build(&c.categories, &c.products));
    Ok::<_, ApiError>(PipelineControl::Continue)
  })?;

  Ok(pipeline)
}

#[instrument(name = "pages::load_catalog", skip(products), err(Display))]
pub async fn load_catalog(products: &ProductService, filter: CatalogFilter) -> ApiResult<CatalogView> {
  let pipeline = catalog_pipeline(products.clone())?;
  let ctx = ContextData::new(CatalogContext::new(filter));
  pipeline.run(ctx.clone()).await?;
  let view = ctx.read().view.clone();
  Ok(view)
}
