use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Flow, Variables};

/// One run of a flow.
///
/// `flow` is the flow as it looked when the run started, so history stays
/// readable after the flow is edited or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowExecution {
    pub id: String,
    pub flow_id: String,
    pub flow: Flow,
    pub status: ExecutionStatus,
    pub start_time: DateTime<Utc>,
    /// Absent while the execution is still running
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub runtime_variables: Variables,
    #[serde(default)]
    pub pipeline_executions: Vec<PipelineExecution>,
    pub triggered_by: String,
}

impl FlowExecution {
    pub fn passed_pipelines(&self) -> usize {
        self.pipeline_executions
            .iter()
            .filter(|p| p.status == PipelineStatus::Passed)
            .count()
    }
}

/// A single GitLab pipeline run, tied to one flow step through `step_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineExecution {
    pub id: String,
    pub pipeline_id: u64,
    pub pipeline_url: String,
    pub status: PipelineStatus,
    pub start_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    /// Duration in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    #[serde(default)]
    pub initial_test_data: Variables,
    #[serde(default)]
    pub runtime_test_data: Variables,
    pub step_id: String,
}

impl PipelineExecution {
    /// Whether the pipeline reached a final pass/fail verdict.
    pub fn is_settled(&self) -> bool {
        matches!(self.status, PipelineStatus::Passed | PipelineStatus::Failed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    #[default]
    Pending,
    Running,
    Completed,
    Failed,
    Cancelled,
}

string_enum!(ExecutionStatus, "execution status", {
    Pending => "pending",
    Running => "running",
    Completed => "completed",
    Failed => "failed",
    Cancelled => "cancelled",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStatus {
    #[default]
    Pending,
    Running,
    Passed,
    Failed,
    Cancelled,
}

string_enum!(PipelineStatus, "pipeline status", {
    Pending => "pending",
    Running => "running",
    Passed => "passed",
    Failed => "failed",
    Cancelled => "cancelled",
});
