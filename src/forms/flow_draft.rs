use chrono::{DateTime, Utc};
use log::debug;

use super::{generate_id, unique_id};
use crate::model::{Flow, FlowStatus, FlowStep, Variables};
use crate::store::{Action, AppState};

/// Flow being edited in the builder.
///
/// Steps keep `order` contiguous from 1 through every add and delete.
#[derive(Debug, Clone)]
pub struct FlowDraft {
    flow: Flow,
}

impl FlowDraft {
    /// Empty draft with a generated id that none of `flows` uses.
    pub fn new(flows: &[Flow], now: DateTime<Utc>) -> Self {
        Self {
            flow: Flow {
                id: generate_id("flow", now, |id| flows.iter().any(|f| f.id == id)),
                name: String::new(),
                description: String::new(),
                steps: Vec::new(),
                global_variables: Variables::new(),
                created_at: now,
                updated_at: now,
                status: FlowStatus::Draft,
                squash_test_case_id: None,
            },
        }
    }

    pub fn edit(flow: Flow) -> Self {
        Self { flow }
    }

    pub fn flow(&self) -> &Flow {
        &self.flow
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.flow.name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.flow.description = description.into();
    }

    pub fn set_variable(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.flow.global_variables.insert(key.into(), value);
    }

    /// Appends a step at the end of the flow, suffixing its id if another
    /// step already uses it.
    pub fn add_step(&mut self, step: FlowStep) -> &FlowStep {
        let steps = &mut self.flow.steps;
        let id = unique_id(step.id, |id| steps.iter().any(|s| s.id == id));
        let order = next_order(steps.len());
        steps.push(FlowStep { id, order, ..step });
        &steps[steps.len() - 1]
    }

    /// Replaces the step with the same id in its current position; returns
    /// whether one matched.
    pub fn update_step(&mut self, step: FlowStep) -> bool {
        match self.flow.steps.iter_mut().find(|s| s.id == step.id) {
            Some(slot) => {
                *slot = FlowStep {
                    order: slot.order,
                    ..step
                };
                true
            }
            None => false,
        }
    }

    /// Removes a step and renumbers the rest from 1; returns whether one matched.
    pub fn delete_step(&mut self, step_id: &str) -> bool {
        let before = self.flow.steps.len();
        self.flow.steps.retain(|s| s.id != step_id);
        for (index, step) in self.flow.steps.iter_mut().enumerate() {
            step.order = next_order(index);
        }
        self.flow.steps.len() != before
    }

    /// Number of distinct applications the steps touch.
    pub fn application_count(&self) -> usize {
        let mut ids: Vec<&str> = self
            .flow
            .steps
            .iter()
            .map(|s| s.application_id.as_str())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids.len()
    }

    /// Finalizes the draft into the action that stores it.
    ///
    /// The saved flow is active when it has steps and a draft otherwise.
    /// Flows already present in `state` are updated, new ones added.
    pub fn save(self, state: &AppState, now: DateTime<Utc>) -> Action {
        let flow = Flow {
            updated_at: now,
            status: FlowStatus::for_step_count(self.flow.steps.len()),
            ..self.flow
        };

        debug!(
            "Saving flow {} with {} steps as {}",
            flow.id,
            flow.steps.len(),
            flow.status
        );

        if state.find_flow(&flow.id).is_some() {
            Action::UpdateFlow(flow)
        } else {
            Action::AddFlow(flow)
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn next_order(index: usize) -> u32 {
    index as u32 + 1
}
