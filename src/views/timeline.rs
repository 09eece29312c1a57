use std::collections::HashMap;

use log::warn;

use super::time::pipeline_duration;
use crate::model::{FlowExecution, FlowStep, PipelineExecution, PipelineStatus};

/// One row of the pipeline timeline: a flow step and what ran for it.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEntry<'a> {
    pub step: &'a FlowStep,
    /// `None` means no pipeline has started for this step yet
    pub pipeline: Option<&'a PipelineExecution>,
}

impl TimelineEntry<'_> {
    pub fn is_pending(&self) -> bool {
        self.pipeline.is_none()
    }

    /// Pipeline status; pending when nothing ran.
    pub fn status(&self) -> PipelineStatus {
        self.pipeline.map_or(PipelineStatus::Pending, |p| p.status)
    }

    pub fn duration(&self) -> Option<String> {
        self.pipeline.map(pipeline_duration)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Timeline<'a> {
    pub entries: Vec<TimelineEntry<'a>>,
    /// Step ids that had more than one pipeline execution
    pub conflicts: Vec<&'a str>,
}

/// Lines up the execution's flow steps, in `order`, with the pipeline
/// executions that reference them through `step_id`.
///
/// When several pipelines claim the same step the first one in the
/// execution's list wins and the step id is reported in `conflicts`.
pub fn build_timeline(execution: &FlowExecution) -> Timeline<'_> {
    let mut by_step: HashMap<&str, &PipelineExecution> = HashMap::new();
    let mut conflicts: Vec<&str> = Vec::new();

    for pipeline in &execution.pipeline_executions {
        let step_id = pipeline.step_id.as_str();
        if by_step.contains_key(step_id) {
            if !conflicts.contains(&step_id) {
                warn!(
                    "Execution {} has several pipelines for step {step_id}; keeping the first",
                    execution.id
                );
                conflicts.push(step_id);
            }
        } else {
            by_step.insert(step_id, pipeline);
        }
    }

    let entries = execution
        .flow
        .ordered_steps()
        .into_iter()
        .map(|step| TimelineEntry {
            step,
            pipeline: by_step.get(step.id.as_str()).copied(),
        })
        .collect();

    Timeline { entries, conflicts }
}
