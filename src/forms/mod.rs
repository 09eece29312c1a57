//! Input validation that runs before anything is dispatched to the store.
//!
//! Each form collects every failing field at once so callers can report
//! them together; the store itself never validates.

mod application;
mod flow_draft;
mod step;

pub use application::ApplicationForm;
pub use flow_draft::FlowDraft;
pub use step::StepForm;

use std::fmt;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

/// Per-field validation messages, in the order fields were checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(IndexMap<&'static str, String>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    /// `Ok(value)` when no field failed, otherwise the collected errors.
    pub fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FormErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

/// Id for a newly created record, e.g. `step-1736344800000`.
///
/// While `taken` reports the id in use it gets a `-2`, `-3`, ... suffix.
pub(crate) fn generate_id(
    prefix: &str,
    now: DateTime<Utc>,
    taken: impl Fn(&str) -> bool,
) -> String {
    unique_id(format!("{prefix}-{}", now.timestamp_millis()), taken)
}

pub(crate) fn unique_id(base: String, taken: impl Fn(&str) -> bool) -> String {
    if !taken(&base) {
        return base;
    }
    let mut suffix = 2;
    loop {
        let candidate = format!("{base}-{suffix}");
        if !taken(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_errors_in_order() {
        let mut errors = FormErrors::new();
        errors.add("name", "Application name is required");
        errors.add("description", "Description is required");

        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.to_string(),
            "name: Application name is required; description: Description is required"
        );
        assert_eq!(errors.get("name"), Some("Application name is required"));
        assert_eq!(errors.get("status"), None);
    }

    #[test]
    fn empty_errors_yield_value() {
        let result = FormErrors::new().into_result(|| 42);
        assert_eq!(result, Ok(42));
    }

    #[test]
    fn generated_ids_use_millis() {
        let now = "2025-01-08T14:00:00Z".parse().unwrap();
        assert_eq!(generate_id("app", now, |_| false), "app-1736344800000");
    }

    #[test]
    fn generated_ids_skip_taken_ones() {
        let now = "2025-01-08T14:00:00Z".parse().unwrap();
        let taken = ["app-1736344800000", "app-1736344800000-2"];
        assert_eq!(
            generate_id("app", now, |id| taken.contains(&id)),
            "app-1736344800000-3"
        );
        assert_eq!(unique_id("step-4".to_string(), |id| id == "step-5"), "step-4");
    }
}
