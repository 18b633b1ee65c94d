// storefront/src/pipeline/execution.rs

use crate::core::context_data::ContextData;
use crate::core::control::{PipelineControl, PipelineResult};
use crate::core::handler::Handler;
use crate::error::PipelineError;
use crate::pipeline::definition::Pipeline;
use tracing::{event, info_span, instrument, Instrument, Level};

enum PhaseOutcome<Err> {
  Continue,
  Stop,
  Failed(Err),
}

async fn run_phase<TData, Err>(
  phase: &'static str,
  handlers: Option<&Vec<Handler<TData, Err>>>,
  ctx_data: &ContextData<TData>,
) -> PhaseOutcome<Err>
where
  TData: 'static + Send + Sync,
  Err: std::fmt::Display,
{
  for (handler_idx, handler_fn) in handlers.into_iter().flatten().enumerate() {
    let span = tracing::debug_span!("handler", phase, handler_index = handler_idx);
    match handler_fn(ctx_data.clone()).instrument(span).await {
      Ok(PipelineControl::Continue) => {}
      Ok(PipelineControl::Stop) => {
        event!(Level::INFO, phase, "Pipeline stopped by a handler.");
        return PhaseOutcome::Stop;
      }
      Err(e) => {
        event!(Level::ERROR, phase, error = %e, "Handler failed.");
        return PhaseOutcome::Failed(e);
      }
    }
  }
  PhaseOutcome::Continue
}

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  /// Runs every step in order against `ctx_data`.
  ///
  /// A step whose `skip_if` returns true is skipped. A step with no handlers
  /// is skipped when optional and fails with `PipelineError::HandlerMissing`
  /// otherwise. The first handler error ends the run and is returned as is.
  #[instrument(
    name = "Pipeline::run",
    skip_all,
    fields(pipeline = %self.name, num_steps = self.steps.len()),
    err(Display)
  )]
  pub async fn run(&self, ctx_data: ContextData<TData>) -> Result<PipelineResult, Err> {
    event!(Level::DEBUG, "Pipeline execution starting.");

    for (step_idx, step_def) in self.steps.iter().enumerate() {
      let step_name = step_def.name.as_str();
      let step_span = info_span!("pipeline_step", step_name, step_index = step_idx, optional = step_def.optional);

      if let Some(skip_if) = &step_def.skip_if {
        if skip_if(&ctx_data) {
          event!(parent: &step_span, Level::INFO, "Step skipped by its condition.");
          continue;
        }
      }

      let has_handlers = [&self.before, &self.on, &self.after]
        .iter()
        .any(|phase| phase.get(step_name).is_some_and(|v| !v.is_empty()));
      if !has_handlers {
        if step_def.optional {
          event!(parent: &step_span, Level::DEBUG, "Optional step has no handlers, skipping.");
          continue;
        }
        event!(parent: &step_span, Level::ERROR, "Non-optional step has no handlers.");
        return Err(Err::from(PipelineError::HandlerMissing {
          step_name: step_def.name.clone(),
        }));
      }

      let phases = [
        ("before", self.before.get(step_name)),
        ("on", self.on.get(step_name)),
        ("after", self.after.get(step_name)),
      ];
      for (phase, handlers) in phases {
        match run_phase(phase, handlers, &ctx_data).instrument(step_span.clone()).await {
          PhaseOutcome::Continue => {}
          PhaseOutcome::Stop => return Ok(PipelineResult::Stopped),
          PhaseOutcome::Failed(e) => return Err(e),
        }
      }
      event!(parent: &step_span, Level::DEBUG, "Step finished.");
    }

    event!(Level::DEBUG, "Pipeline execution completed.");
    Ok(PipelineResult::Completed)
  }
}
