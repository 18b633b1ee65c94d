// storefront/src/pages/mod.rs

//! Page loads expressed as pipelines. Each page owns a context type, a
//! pipeline constructor and a `load_*` entry point that runs it.

pub mod affiliate;
pub mod catalog;
pub mod checkout;

pub use affiliate::{affiliate_pipeline, load_affiliate_access, AffiliateAccess, AffiliateContext};
pub use catalog::{catalog_pipeline, load_catalog, CatalogContext};
pub use checkout::{checkout_pipeline, run_checkout, CheckoutContext, CheckoutOutcome, CheckoutRequest};
