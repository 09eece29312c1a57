use crate::model::{
    Application, ApplicationStatus, ExecutionStatus, Flow, FlowExecution, FlowStatus, Role, User,
};

/// A record that list views can search and narrow by status.
pub trait Searchable {
    type Status: PartialEq + Copy;

    /// Fields the free-text search looks at.
    fn search_fields(&self) -> Vec<&str>;

    fn status_key(&self) -> Self::Status;
}

impl Searchable for Flow {
    type Status = FlowStatus;

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.description.as_str()]
    }

    fn status_key(&self) -> FlowStatus {
        self.status
    }
}

impl Searchable for FlowExecution {
    type Status = ExecutionStatus;

    fn search_fields(&self) -> Vec<&str> {
        vec![self.flow.name.as_str(), self.triggered_by.as_str()]
    }

    fn status_key(&self) -> ExecutionStatus {
        self.status
    }
}

impl Searchable for Application {
    type Status = ApplicationStatus;

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.gitlab_project_id.as_str()]
    }

    fn status_key(&self) -> ApplicationStatus {
        self.status
    }
}

impl Searchable for User {
    type Status = Role;

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str(), self.role.as_str()]
    }

    fn status_key(&self) -> Role {
        self.role
    }
}

/// Search term plus optional exact status, applied as a conjunction.
#[derive(Debug, Clone)]
pub struct ListQuery<S> {
    search: String,
    status: Option<S>,
}

impl<S: PartialEq + Copy> ListQuery<S> {
    pub fn new(search: Option<&str>, status: Option<S>) -> Self {
        Self {
            search: search.unwrap_or_default().trim().to_lowercase(),
            status,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.status.is_none()
    }

    pub fn matches<T: Searchable<Status = S>>(&self, item: &T) -> bool {
        self.matches_text(item) && self.matches_status(item)
    }

    fn matches_text<T: Searchable<Status = S>>(&self, item: &T) -> bool {
        self.search.is_empty()
            || item
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&self.search))
    }

    fn matches_status<T: Searchable<Status = S>>(&self, item: &T) -> bool {
        self.status.map_or(true, |status| item.status_key() == status)
    }
}

impl<S> Default for ListQuery<S> {
    fn default() -> Self {
        Self {
            search: String::new(),
            status: None,
        }
    }
}

pub fn filter<'a, T: Searchable>(items: &'a [T], query: &ListQuery<T::Status>) -> Vec<&'a T> {
    items.iter().filter(|item| query.matches(*item)).collect()
}

/// Executions newest first.
pub fn newest_first(executions: &[FlowExecution]) -> Vec<&FlowExecution> {
    let mut sorted: Vec<&FlowExecution> = executions.iter().collect();
    sorted.sort_by(|a, b| b.start_time.cmp(&a.start_time));
    sorted
}

/// The `limit` most recently started executions.
pub fn recent_executions(executions: &[FlowExecution], limit: usize) -> Vec<&FlowExecution> {
    newest_first(executions).into_iter().take(limit).collect()
}

/// Up to `limit` flows whose status is active, in collection order.
pub fn active_flows(flows: &[Flow], limit: usize) -> Vec<&Flow> {
    flows
        .iter()
        .filter(|f| f.status == FlowStatus::Active)
        .take(limit)
        .collect()
}
