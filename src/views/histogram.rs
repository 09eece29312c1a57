use chrono::{DateTime, Days, NaiveDate, TimeZone};
use serde::Serialize;

use super::metrics::success_rate;
use crate::model::{ExecutionStatus, FlowExecution};

/// Executions that started on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayBucket {
    pub date: NaiveDate,
    /// Short weekday name (e.g., "Mon")
    pub label: String,
    pub completed: usize,
    pub failed: usize,
    pub total: usize,
    pub success_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionHistogram {
    /// Oldest day first, today last
    pub days: Vec<DayBucket>,
    /// Largest daily total, never below 1 so bar heights can divide by it
    pub max_total: usize,
}

/// Buckets executions by the calendar date of `start_time` in `now`'s time
/// zone, covering `days` days ending today.
pub fn daily_histogram<Tz: TimeZone>(
    executions: &[FlowExecution],
    now: &DateTime<Tz>,
    days: u32,
) -> ExecutionHistogram {
    let tz = now.timezone();
    let today = now.date_naive();

    let start_dates: Vec<(NaiveDate, ExecutionStatus)> = executions
        .iter()
        .map(|e| (e.start_time.with_timezone(&tz).date_naive(), e.status))
        .collect();

    let days: Vec<DayBucket> = (0..days)
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(u64::from(offset))))
        .map(|date| bucket_for(date, &start_dates))
        .collect();

    let max_total = days.iter().map(|d| d.total).max().unwrap_or(0).max(1);

    ExecutionHistogram { days, max_total }
}

fn bucket_for(date: NaiveDate, start_dates: &[(NaiveDate, ExecutionStatus)]) -> DayBucket {
    let statuses: Vec<ExecutionStatus> = start_dates
        .iter()
        .filter(|(d, _)| *d == date)
        .map(|(_, status)| *status)
        .collect();

    let completed = statuses
        .iter()
        .filter(|s| **s == ExecutionStatus::Completed)
        .count();
    let failed = statuses
        .iter()
        .filter(|s| **s == ExecutionStatus::Failed)
        .count();
    let total = statuses.len();

    DayBucket {
        date,
        label: date.format("%a").to_string(),
        completed,
        failed,
        total,
        success_rate: success_rate(completed, total),
    }
}
