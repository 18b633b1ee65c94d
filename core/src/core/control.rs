// storefront/src/core/control.rs

/// Returned by a handler: keep going, or end the run here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineControl {
  Continue,
  /// No further handlers in this step or later steps run.
  Stop,
}

/// Outcome of a pipeline run that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineResult {
  /// Every step ran (or was skipped by its condition).
  Completed,
  /// A handler returned `PipelineControl::Stop`.
  Stopped,
}
