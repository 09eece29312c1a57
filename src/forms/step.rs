use chrono::{DateTime, Utc};

use super::{generate_id, is_blank, FormErrors};
use crate::model::{Application, FlowStep, Variables};

/// Fields of the add/edit step dialog, as typed by the user.
#[derive(Debug, Clone)]
pub struct StepForm {
    pub application_id: String,
    pub branch: String,
    pub test_stage: String,
    pub test_tag: String,
    /// JSON object text
    pub initial_test_data: String,
    /// Comma-separated integers, e.g. "1001, 1002"
    pub squash_step_ids: String,
}

impl Default for StepForm {
    fn default() -> Self {
        Self {
            application_id: String::new(),
            branch: "main".to_string(),
            test_stage: String::new(),
            test_tag: String::new(),
            initial_test_data: "{}".to_string(),
            squash_step_ids: String::new(),
        }
    }
}

impl StepForm {
    /// Prefills the form from an existing step.
    pub fn edit(step: &FlowStep) -> Self {
        Self {
            application_id: step.application_id.clone(),
            branch: step.branch.clone(),
            test_stage: step.test_stage.clone(),
            test_tag: step.test_tag.clone(),
            initial_test_data: serde_json::to_string_pretty(&step.initial_test_data)
                .unwrap_or_else(|_| "{}".to_string()),
            squash_step_ids: step
                .squash_step_ids
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    /// Builds the step, embedding a copy of the selected application.
    ///
    /// Editing keeps `existing`'s id and order; a new step gets a generated
    /// id and order 1 until the flow draft places it, which also makes the
    /// id unique within the flow.
    ///
    /// # Errors
    ///
    /// Returns every failing field when validation does not pass.
    pub fn submit(
        &self,
        applications: &[Application],
        existing: Option<&FlowStep>,
        now: DateTime<Utc>,
    ) -> Result<FlowStep, FormErrors> {
        let mut errors = FormErrors::new();

        let application = if is_blank(&self.application_id) {
            errors.add("applicationId", "Application is required");
            None
        } else {
            let found = applications
                .iter()
                .find(|a| a.id == self.application_id.trim());
            if found.is_none() {
                errors.add(
                    "applicationId",
                    format!("Unknown application '{}'", self.application_id.trim()),
                );
            }
            found
        };

        if is_blank(&self.test_stage) {
            errors.add("testStage", "Test stage is required");
        }
        if is_blank(&self.test_tag) {
            errors.add("testTag", "Test tag is required");
        }

        let initial_test_data = match serde_json::from_str::<Variables>(&self.initial_test_data) {
            Ok(data) => Some(data),
            Err(_) => {
                errors.add("initialTestData", "Invalid JSON format");
                None
            }
        };

        match (application, initial_test_data) {
            (Some(application), Some(initial_test_data)) if errors.is_empty() => Ok(FlowStep {
                id: existing.map_or_else(|| generate_id("step", now, |_| false), |s| s.id.clone()),
                application_id: application.id.clone(),
                application: application.clone(),
                branch: self.branch.trim().to_string(),
                test_stage: self.test_stage.trim().to_string(),
                test_tag: self.test_tag.trim().to_string(),
                order: existing.map_or(1, |s| s.order),
                initial_test_data,
                squash_step_ids: parse_squash_ids(&self.squash_step_ids),
            }),
            _ => Err(errors),
        }
    }
}

/// Parses a comma-separated id list, silently dropping entries that are not integers.
fn parse_squash_ids(input: &str) -> Vec<i64> {
    input
        .split(',')
        .filter_map(|id| id.trim().parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::AppState;

    fn now() -> DateTime<Utc> {
        "2025-01-08T14:00:00Z".parse().unwrap()
    }

    fn applications() -> Vec<Application> {
        AppState::demo().unwrap().applications
    }

    fn filled() -> StepForm {
        StepForm {
            application_id: "app-2".to_string(),
            test_stage: "api".to_string(),
            test_tag: "contract".to_string(),
            initial_test_data: r#"{"token": "abc", "retries": 2}"#.to_string(),
            squash_step_ids: "7001, 7002".to_string(),
            ..StepForm::default()
        }
    }

    #[test]
    fn defaults_match_new_step_dialog() {
        let form = StepForm::default();
        assert_eq!(form.branch, "main");
        assert_eq!(form.initial_test_data, "{}");
    }

    #[test]
    fn blank_form_reports_required_fields() {
        let errors = StepForm::default()
            .submit(&applications(), None, now())
            .unwrap_err();
        assert_eq!(errors.get("applicationId"), Some("Application is required"));
        assert_eq!(errors.get("testStage"), Some("Test stage is required"));
        assert_eq!(errors.get("testTag"), Some("Test tag is required"));
        assert_eq!(errors.get("initialTestData"), None);
    }

    #[test]
    fn invalid_json_is_reported() {
        let mut form = filled();
        form.initial_test_data = "{not json".to_string();
        let errors = form.submit(&applications(), None, now()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("initialTestData"), Some("Invalid JSON format"));
    }

    #[test]
    fn non_object_json_is_rejected() {
        let mut form = filled();
        form.initial_test_data = "[1, 2]".to_string();
        assert!(form.submit(&applications(), None, now()).is_err());
    }

    #[test]
    fn unknown_application_is_reported() {
        let mut form = filled();
        form.application_id = "app-404".to_string();
        let errors = form.submit(&applications(), None, now()).unwrap_err();
        assert_eq!(
            errors.get("applicationId"),
            Some("Unknown application 'app-404'")
        );
    }

    #[test]
    fn new_step_embeds_application_snapshot() {
        let step = filled().submit(&applications(), None, now()).unwrap();
        assert_eq!(step.id, "step-1736344800000");
        assert_eq!(step.application.name, "API Gateway");
        assert_eq!(step.branch, "main");
        assert_eq!(step.order, 1);
        assert_eq!(step.initial_test_data["retries"], 2);
        assert_eq!(step.squash_step_ids, [7001, 7002]);
    }

    #[test]
    fn squash_ids_drop_non_numeric_entries() {
        assert_eq!(parse_squash_ids("1, x, 3,, 4 "), [1, 3, 4]);
        assert!(parse_squash_ids("").is_empty());
    }

    #[test]
    fn editing_keeps_id_and_order() {
        let state = AppState::demo().unwrap();
        let existing = &state.flows[0].steps[1];
        let mut form = StepForm::edit(existing);
        assert_eq!(form.squash_step_ids, "2001");
        form.test_tag = "user-validation-v2".to_string();

        let step = form.submit(&state.applications, Some(existing), now()).unwrap();
        assert_eq!(step.id, "step-2");
        assert_eq!(step.order, 2);
        assert_eq!(step.test_tag, "user-validation-v2");
    }
}
