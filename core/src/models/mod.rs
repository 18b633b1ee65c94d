// storefront/src/models/mod.rs

//! Records mirrored from the backend. Field names are camelCase on the wire.

pub mod affiliate;
pub mod affiliate_link;
pub mod id;
pub mod order;
pub mod payment;
pub mod product;
pub mod subscription;
pub mod user;

pub use affiliate::{
  AffiliateProfile, AffiliateStats, AffiliateStatus, AffiliateSummary, BankInfo, Commission, CommissionStatus,
  PayoutRequest, RegisterAffiliateRequest,
};
pub use affiliate_link::{AffiliateLink, AffiliateLinkInput, AffiliateLinkStatus};
pub use id::{EntityId, Identified};
pub use order::{BuyNowRequest, CreateOrderRequest, Order, OrderItem, OrderItemInput, OrderQuery, OrderStatus, ShippingAddress};
pub use payment::{BankTransferInfo, CreatePaymentRequest, Payment, PaymentMethod, PaymentStatus};
pub use product::{Category, CategoryRef, Product, ProductQuery, ProductSort};
pub use subscription::{
  ActivityStatus, SubscriptionDuration, SubscriptionDurationInput, SubscriptionType, SubscriptionTypeInput,
};
pub use user::UserProfile;
