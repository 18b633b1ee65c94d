// storefront/src/lib.rs

//! Typed async client for the storefront backend: products and their
//! subscription plans, orders, payments and the affiliate program.
//!
//! ```text
//!  Storefront ── HttpClient ── Transport (reqwest)
//!      │              └── Session (token, referral code, admin login)
//!      ├── services::*        one method per REST call
//!      ├── state::*           list / current / loading / error stores
//!      └── pages::*           page loads as step pipelines
//! ```
//!
//! Every failure is an [`ApiError`] whose `Display` text is the message to
//! show the user. Nothing is retried.

pub mod catalog;
pub mod client;
pub mod config;
pub mod core;
pub mod error;
pub mod http;
pub mod models;
pub mod pages;
pub mod pipeline;
pub mod services;
pub mod session;
pub mod state;

pub use crate::client::Storefront;
pub use crate::config::ClientConfig;
pub use crate::core::{ContextData, Handler, PipelineControl, PipelineResult, SkipCondition, StepDef};
pub use crate::error::{ApiError, ApiResult, PipelineError};
pub use crate::pipeline::Pipeline;
pub use crate::session::{FileStorage, MemoryStorage, Session, SessionStorage, StorageScope};
