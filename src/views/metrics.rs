use serde::Serialize;

use crate::model::{ExecutionStatus, FlowExecution};

/// Headline numbers shown on the dashboard cards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionMetrics {
    pub total_executions: usize,
    /// Completed over total, as a percentage (0-100)
    pub success_rate: f64,
    /// Mean wall-clock minutes over completed executions that have an end time
    pub average_duration_minutes: f64,
    /// Executions currently running
    pub active_executions: usize,
    pub failed_executions: usize,
}

/// Recomputes the dashboard metrics from scratch.
pub fn calculate_metrics(executions: &[FlowExecution]) -> ExecutionMetrics {
    let total_executions = executions.len();
    let completed = count_status(executions, ExecutionStatus::Completed);

    ExecutionMetrics {
        total_executions,
        success_rate: success_rate(completed, total_executions),
        average_duration_minutes: average_duration_minutes(executions),
        active_executions: count_status(executions, ExecutionStatus::Running),
        failed_executions: count_status(executions, ExecutionStatus::Failed),
    }
}

pub(super) fn count_status(executions: &[FlowExecution], status: ExecutionStatus) -> usize {
    executions.iter().filter(|e| e.status == status).count()
}

#[allow(clippy::cast_precision_loss)]
pub(super) fn success_rate(completed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (completed as f64 / total as f64) * 100.0
}

#[allow(clippy::cast_precision_loss)]
fn average_duration_minutes(executions: &[FlowExecution]) -> f64 {
    let durations: Vec<f64> = executions
        .iter()
        .filter(|e| e.status == ExecutionStatus::Completed)
        .filter_map(|e| {
            e.end_time
                .map(|end| end.signed_duration_since(e.start_time).num_milliseconds() as f64)
        })
        .collect();

    if durations.is_empty() {
        return 0.0;
    }

    durations.iter().sum::<f64>() / durations.len() as f64 / 1000.0 / 60.0
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::store::AppState;

    fn demo_executions() -> Vec<FlowExecution> {
        AppState::demo().unwrap().executions
    }

    #[test]
    fn empty_collection_yields_zero_rates() {
        let metrics = calculate_metrics(&[]);
        assert_eq!(metrics.total_executions, 0);
        assert_eq!(metrics.success_rate, 0.0);
        assert_eq!(metrics.average_duration_minutes, 0.0);
        assert_eq!(metrics.active_executions, 0);
    }

    #[test]
    fn demo_metrics() {
        let metrics = calculate_metrics(&demo_executions());
        assert_eq!(metrics.total_executions, 3);
        assert!((metrics.success_rate - 100.0 / 3.0).abs() < 1e-9);
        // only exec-2 is completed: 12:00:00 -> 12:08:45
        assert_eq!(metrics.average_duration_minutes, 8.75);
        assert_eq!(metrics.active_executions, 1);
        assert_eq!(metrics.failed_executions, 1);
    }

    #[test]
    fn completed_without_end_time_is_excluded_from_average() {
        let mut executions = demo_executions();
        executions[2].status = ExecutionStatus::Completed;
        assert!(executions[2].end_time.is_none());

        let metrics = calculate_metrics(&executions);
        assert_eq!(metrics.average_duration_minutes, 8.75);
        assert!((metrics.success_rate - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn success_rate_stays_within_bounds() {
        for total in 0..20 {
            for completed in 0..=total {
                let rate = success_rate(completed, total);
                assert!((0.0..=100.0).contains(&rate), "{completed}/{total} -> {rate}");
            }
        }
    }
}
