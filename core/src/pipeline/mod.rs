// storefront/src/pipeline/mod.rs

//! `Pipeline<TData, Err>`: named steps with before/on/after handlers, run in order.

pub mod definition;
pub mod execution;
pub mod hooks;

pub use definition::Pipeline;
