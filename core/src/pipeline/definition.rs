// storefront/src/pipeline/definition.rs

use crate::core::handler::Handler;
use crate::core::step::{SkipCondition, StepDef};
use crate::error::PipelineError;
use std::collections::HashMap;

/// Ordered steps over a shared `ContextData<TData>`.
///
/// Framework failures (unknown step, missing handler) surface as
/// [`PipelineError`] converted into the handlers' own `Err`.
pub struct Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  pub(crate) name: String,
  pub(crate) steps: Vec<StepDef<TData>>,
  pub(crate) before: HashMap<String, Vec<Handler<TData, Err>>>,
  pub(crate) on: HashMap<String, Vec<Handler<TData, Err>>>,
  pub(crate) after: HashMap<String, Vec<Handler<TData, Err>>>,
}

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  /// Creates a pipeline whose steps are all required and unconditional.
  pub fn new(name: impl Into<String>, step_names: &[&str]) -> Self {
    Self {
      name: name.into(),
      steps: step_names.iter().map(|s| StepDef::new(*s)).collect(),
      before: HashMap::new(),
      on: HashMap::new(),
      after: HashMap::new(),
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn step_names(&self) -> Vec<&str> {
    self.steps.iter().map(|s| s.name.as_str()).collect()
  }

  fn position(&self, step_name: &str) -> Result<usize, PipelineError> {
    self
      .steps
      .iter()
      .position(|s| s.name == step_name)
      .ok_or_else(|| PipelineError::StepNotFound {
        step_name: step_name.to_string(),
      })
  }

  pub(crate) fn ensure_step_exists(&self, step_name: &str) -> Result<(), PipelineError> {
    self.position(step_name).map(|_| ())
  }

  fn ensure_step_not_exists(&self, step_name: &str) -> Result<(), PipelineError> {
    if self.steps.iter().any(|s| s.name == step_name) {
      return Err(PipelineError::Internal(format!("step '{}' already exists", step_name)));
    }
    Ok(())
  }

  pub fn insert_before_step(&mut self, existing: &str, new_step: impl Into<String>) -> Result<(), PipelineError> {
    let idx = self.position(existing)?;
    let name = new_step.into();
    self.ensure_step_not_exists(&name)?;
    self.steps.insert(idx, StepDef::new(name));
    Ok(())
  }

  pub fn insert_after_step(&mut self, existing: &str, new_step: impl Into<String>) -> Result<(), PipelineError> {
    let idx = self.position(existing)?;
    let name = new_step.into();
    self.ensure_step_not_exists(&name)?;
    self.steps.insert(idx + 1, StepDef::new(name));
    Ok(())
  }

  /// Removes the step and its handlers. Unknown names are a no-op.
  pub fn remove_step(&mut self, step_name: &str) {
    if let Ok(idx) = self.position(step_name) {
      self.steps.remove(idx);
      self.before.remove(step_name);
      self.on.remove(step_name);
      self.after.remove(step_name);
    }
  }

  pub fn set_optional(&mut self, step_name: &str, optional: bool) -> Result<(), PipelineError> {
    let idx = self.position(step_name)?;
    self.steps[idx].optional = optional;
    Ok(())
  }

  pub fn set_skip_condition(
    &mut self,
    step_name: &str,
    skip_if: Option<SkipCondition<TData>>,
  ) -> Result<(), PipelineError> {
    let idx = self.position(step_name)?;
    self.steps[idx].skip_if = skip_if;
    Ok(())
  }
}
