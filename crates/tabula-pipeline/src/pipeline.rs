//! Ordered step execution.
//!
//! A pipeline is an ordered list of named steps over a [`PipelineContext`],
//! executed once, top to bottom, with no branching or retries. The first
//! failing step aborts the run; its error names the pipeline and the step.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use crate::context::PipelineContext;

type StepFn = Box<dyn Fn(&mut PipelineContext) -> Result<()>>;

struct Step {
    name: String,
    run: StepFn,
}

pub struct Pipeline {
    name: String,
    steps: Vec<Step>,
}

impl Pipeline {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
        }
    }

    /// Appends a named step.
    pub fn step<F>(mut self, name: impl Into<String>, run: F) -> Self
    where
        F: Fn(&mut PipelineContext) -> Result<()> + 'static,
    {
        self.steps.push(Step {
            name: name.into(),
            run: Box::new(run),
        });
        self
    }

    /// Runs every step in order, fail-fast.
    pub fn run(&self, ctx: &mut PipelineContext) -> Result<()> {
        info!(pipeline = %self.name, steps = self.steps.len(), "running pipeline");
        for step in &self.steps {
            let span = info_span!("step", pipeline = %self.name, step = %step.name);
            let _guard = span.enter();
            (step.run)(ctx).with_context(|| {
                format!("pipeline '{}' failed at step '{}'", self.name, step.name)
            })?;
        }
        Ok(())
    }
}
