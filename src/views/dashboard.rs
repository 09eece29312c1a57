use chrono::{DateTime, TimeZone};
use serde::Serialize;

use super::filter::{active_flows, recent_executions};
use super::histogram::{daily_histogram, ExecutionHistogram};
use super::metrics::{calculate_metrics, ExecutionMetrics};
use crate::config::DashboardConfig;
use crate::model::{Flow, FlowExecution};
use crate::store::AppState;

/// Everything the dashboard page shows, derived from one snapshot.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard<'a> {
    pub metrics: ExecutionMetrics,
    pub histogram: ExecutionHistogram,
    pub recent_executions: Vec<&'a FlowExecution>,
    pub active_flows: Vec<&'a Flow>,
}

impl<'a> Dashboard<'a> {
    /// `now` fixes both "today" and the time zone histogram days are cut in.
    pub fn build<Tz: TimeZone>(
        state: &'a AppState,
        config: &DashboardConfig,
        now: &DateTime<Tz>,
    ) -> Self {
        Self {
            metrics: calculate_metrics(&state.executions),
            histogram: daily_histogram(&state.executions, now, config.histogram_days),
            recent_executions: recent_executions(&state.executions, config.recent_executions),
            active_flows: active_flows(&state.flows, config.active_flows),
        }
    }
}
