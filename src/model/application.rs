use serde::{Deserialize, Serialize};

/// A registered GitLab project that flow steps can target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: String,
    pub name: String,
    /// Project path on the GitLab instance (e.g., "orkestra/frontend-app")
    pub gitlab_project_id: String,
    pub personal_access_token: String,
    pub description: String,
    pub status: ApplicationStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Active,
    Inactive,
}

string_enum!(ApplicationStatus, "application status", {
    Active => "active",
    Inactive => "inactive",
});
