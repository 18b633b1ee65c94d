// storefront/src/core/mod.rs

//! Building blocks shared by the pipeline engine and the entity stores.

pub mod context_data;
pub mod control;
pub mod handler;
pub mod step;

pub use context_data::ContextData;
pub use control::{PipelineControl, PipelineResult};
pub use handler::Handler;
pub use step::{SkipCondition, StepDef};
