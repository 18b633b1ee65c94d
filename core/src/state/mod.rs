// storefront/src/state/mod.rs

//! Per-resource state stores: the list, the current entity, a loading flag
//! and the last error message, updated from service results.

pub mod admin_auth;
pub mod affiliate_link;
pub mod order;
pub mod payment;
pub mod store;

pub use admin_auth::{AdminAuthState, AdminSession};
pub use affiliate_link::AffiliateLinkState;
pub use order::OrderState;
pub use payment::PaymentState;
pub use store::{EntityStore, StoreState};
