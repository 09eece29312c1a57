use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{Application, Flow, FlowExecution};

/// Mutations the store accepts.
///
/// On the wire an action is `{"type": "ADD_FLOW", "payload": {...}}`. Any
/// other `type` decodes to [`Action::Unknown`], which leaves state untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    UpdateFlow(Flow),
    AddFlow(Flow),
    DeleteFlow(String),
    UpdateExecution(FlowExecution),
    AddExecution(FlowExecution),
    AddApplication(Application),
    UpdateApplication(Application),
    DeleteApplication(String),
    ToggleTheme,
    #[serde(other)]
    Unknown,
}

const KNOWN_TYPES: [&str; 9] = [
    "UPDATE_FLOW",
    "ADD_FLOW",
    "DELETE_FLOW",
    "UPDATE_EXECUTION",
    "ADD_EXECUTION",
    "ADD_APPLICATION",
    "UPDATE_APPLICATION",
    "DELETE_APPLICATION",
    "TOGGLE_THEME",
];

impl Action {
    /// Decodes one wire action.
    ///
    /// An unrecognized `type` yields [`Action::Unknown`] whatever its payload;
    /// a known `type` with a malformed payload is an error.
    pub fn from_json(value: Value) -> serde_json::Result<Self> {
        match value.get("type").and_then(Value::as_str) {
            Some(kind) if !KNOWN_TYPES.contains(&kind) => Ok(Action::Unknown),
            _ => serde_json::from_value(value),
        }
    }

    /// Decodes either a single action object or an array of them.
    pub fn parse_batch(input: &str) -> serde_json::Result<Vec<Self>> {
        match serde_json::from_str(input)? {
            Value::Array(items) => items.into_iter().map(Self::from_json).collect(),
            single => Ok(vec![Self::from_json(single)?]),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::UpdateFlow(_) => "UPDATE_FLOW",
            Action::AddFlow(_) => "ADD_FLOW",
            Action::DeleteFlow(_) => "DELETE_FLOW",
            Action::UpdateExecution(_) => "UPDATE_EXECUTION",
            Action::AddExecution(_) => "ADD_EXECUTION",
            Action::AddApplication(_) => "ADD_APPLICATION",
            Action::UpdateApplication(_) => "UPDATE_APPLICATION",
            Action::DeleteApplication(_) => "DELETE_APPLICATION",
            Action::ToggleTheme => "TOGGLE_THEME",
            Action::Unknown => "UNKNOWN",
        }
    }
}
