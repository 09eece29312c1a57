use chrono::{DateTime, Utc};

use super::{generate_id, is_blank, FormErrors};
use crate::model::{Application, ApplicationStatus};

/// Fields of the add/edit application dialog.
#[derive(Debug, Clone, Default)]
pub struct ApplicationForm {
    pub name: String,
    pub gitlab_project_id: String,
    pub personal_access_token: String,
    pub description: String,
    pub status: ApplicationStatus,
}

impl ApplicationForm {
    /// Prefills the form from an existing application.
    pub fn edit(application: &Application) -> Self {
        Self {
            name: application.name.clone(),
            gitlab_project_id: application.gitlab_project_id.clone(),
            personal_access_token: application.personal_access_token.clone(),
            description: application.description.clone(),
            status: application.status,
        }
    }

    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::new();

        if is_blank(&self.name) {
            errors.add("name", "Application name is required");
        }
        if is_blank(&self.gitlab_project_id) {
            errors.add("gitlabProjectId", "GitLab project ID is required");
        }
        if is_blank(&self.personal_access_token) {
            errors.add("personalAccessToken", "Personal access token is required");
        }
        if is_blank(&self.description) {
            errors.add("description", "Description is required");
        }

        errors
    }

    /// Builds the trimmed application, keeping `existing`'s id when editing.
    ///
    /// New applications get an id no entry of `applications` already uses.
    ///
    /// # Errors
    ///
    /// Returns every failing field when validation does not pass.
    pub fn submit(
        &self,
        applications: &[Application],
        existing: Option<&Application>,
        now: DateTime<Utc>,
    ) -> Result<Application, FormErrors> {
        self.validate().into_result(|| Application {
            id: existing.map_or_else(
                || generate_id("app", now, |id| applications.iter().any(|a| a.id == id)),
                |a| a.id.clone(),
            ),
            name: self.name.trim().to_string(),
            gitlab_project_id: self.gitlab_project_id.trim().to_string(),
            personal_access_token: self.personal_access_token.trim().to_string(),
            description: self.description.trim().to_string(),
            status: self.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        "2025-01-08T14:00:00Z".parse().unwrap()
    }

    fn filled() -> ApplicationForm {
        ApplicationForm {
            name: "  Inventory Service ".to_string(),
            gitlab_project_id: "orkestra/inventory".to_string(),
            personal_access_token: "glpat-abc".to_string(),
            description: "Stock levels".to_string(),
            status: ApplicationStatus::default(),
        }
    }

    #[test]
    fn blank_form_reports_every_required_field() {
        let errors = ApplicationForm::default().validate();
        let fields: Vec<&str> = errors.iter().map(|(field, _)| field).collect();
        assert_eq!(
            fields,
            ["name", "gitlabProjectId", "personalAccessToken", "description"]
        );
    }

    #[test]
    fn whitespace_only_counts_as_missing() {
        let mut form = filled();
        form.description = "   ".to_string();
        let errors = form.submit(&[], None, now()).unwrap_err();
        assert_eq!(errors.get("description"), Some("Description is required"));
    }

    #[test]
    fn new_application_gets_generated_id_and_trimmed_fields() {
        let application = filled().submit(&[], None, now()).unwrap();
        assert_eq!(application.id, "app-1736344800000");
        assert_eq!(application.name, "Inventory Service");
        assert_eq!(application.status, ApplicationStatus::Active);
    }

    #[test]
    fn editing_keeps_id() {
        let existing = filled().submit(&[], None, now()).unwrap();
        let mut form = ApplicationForm::edit(&existing);
        form.status = ApplicationStatus::Inactive;

        let updated = form.submit(&[], Some(&existing), now()).unwrap();
        assert_eq!(updated.id, existing.id);
        assert_eq!(updated.status, ApplicationStatus::Inactive);
    }

    #[test]
    fn same_instant_applications_get_distinct_ids() {
        let first = filled().submit(&[], None, now()).unwrap();
        let second = filled()
            .submit(std::slice::from_ref(&first), None, now())
            .unwrap();
        assert_eq!(first.id, "app-1736344800000");
        assert_eq!(second.id, "app-1736344800000-2");
    }
}
