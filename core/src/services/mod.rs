// storefront/src/services/mod.rs

//! One service per REST resource. Each method issues exactly one request.

pub mod affiliate;
pub mod affiliate_link;
pub mod order;
pub mod payment;
pub mod product;
pub mod subscription;

pub use affiliate::AffiliateService;
pub use affiliate_link::AffiliateLinkService;
pub use order::OrderService;
pub use payment::PaymentService;
pub use product::ProductService;
pub use subscription::{SubscriptionDurationService, SubscriptionTypeService};
