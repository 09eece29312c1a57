use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Application, Variables};

/// An ordered template of steps executed across applications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flow {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Steps in execution order; `order` runs contiguously from 1.
    pub steps: Vec<FlowStep>,
    #[serde(default)]
    pub global_variables: Variables,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub status: FlowStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub squash_test_case_id: Option<i64>,
}

impl Flow {
    /// Steps sorted by their `order` field.
    pub fn ordered_steps(&self) -> Vec<&FlowStep> {
        let mut steps: Vec<&FlowStep> = self.steps.iter().collect();
        steps.sort_by_key(|s| s.order);
        steps
    }
}

/// One stage of a flow, bound to an application, branch and test selector.
///
/// `application` is a snapshot taken when the step was created; later edits
/// to the registered application do not flow back into existing steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowStep {
    pub id: String,
    pub application_id: String,
    pub application: Application,
    pub branch: String,
    pub test_stage: String,
    pub test_tag: String,
    pub order: u32,
    #[serde(default)]
    pub initial_test_data: Variables,
    #[serde(default)]
    pub squash_step_ids: Vec<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FlowStatus {
    Active,
    Inactive,
    #[default]
    Draft,
}

string_enum!(FlowStatus, "flow status", {
    Active => "active",
    Inactive => "inactive",
    Draft => "draft",
});

impl FlowStatus {
    /// Status a flow takes when saved: active once it has steps, draft otherwise.
    pub fn for_step_count(steps: usize) -> Self {
        if steps > 0 {
            FlowStatus::Active
        } else {
            FlowStatus::Draft
        }
    }
}
