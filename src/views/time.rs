use chrono::{DateTime, Utc};

use crate::model::PipelineExecution;

/// Source of "now" for every time-relative display.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Short relative time such as "5m ago", "2h ago" or "3d ago".
///
/// Anything under a minute old, or in the future, reads "just now".
pub fn format_relative(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(timestamp);

    if elapsed.num_minutes() < 1 {
        "just now".to_string()
    } else if elapsed.num_hours() < 1 {
        format!("{}m ago", elapsed.num_minutes())
    } else if elapsed.num_days() < 1 {
        format!("{}h ago", elapsed.num_hours())
    } else {
        format!("{}d ago", elapsed.num_days())
    }
}

/// Wall-clock span of an execution in whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionDuration {
    Finished(i64),
    /// Still running; minutes elapsed so far
    Running(i64),
}

impl std::fmt::Display for ExecutionDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutionDuration::Finished(minutes) => write!(f, "{minutes}m"),
            ExecutionDuration::Running(minutes) => write!(f, "{minutes}m (running)"),
        }
    }
}

pub fn execution_duration(
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> ExecutionDuration {
    match end {
        Some(end) => ExecutionDuration::Finished(rounded_minutes(start, end)),
        None => ExecutionDuration::Running(rounded_minutes(start, now)),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn rounded_minutes(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    let millis = end.signed_duration_since(start).num_milliseconds();
    (millis as f64 / 60_000.0).round() as i64
}

/// Pipeline duration as "Mm Ss", or "Running..." until it has an end time.
///
/// Uses the recorded `duration` in seconds and falls back to end minus start
/// when the pipeline never reported one.
pub fn pipeline_duration(pipeline: &PipelineExecution) -> String {
    let Some(end) = pipeline.end_time else {
        return "Running...".to_string();
    };

    let seconds = pipeline.duration.unwrap_or_else(|| {
        u64::try_from(end.signed_duration_since(pipeline.start_time).num_seconds()).unwrap_or(0)
    });

    format!("{}m {}s", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 8, h, m, s).unwrap()
    }

    mod format_relative {
        use super::*;

        #[test]
        fn under_a_minute_is_just_now() {
            assert_eq!(format_relative(at(12, 0, 0), at(12, 0, 59)), "just now");
        }

        #[test]
        fn future_timestamps_are_just_now() {
            assert_eq!(format_relative(at(13, 0, 0), at(12, 0, 0)), "just now");
        }

        #[test]
        fn minutes_hours_days() {
            let now = at(16, 0, 0);
            assert_eq!(format_relative(now - Duration::minutes(5), now), "5m ago");
            assert_eq!(format_relative(now - Duration::minutes(59), now), "59m ago");
            assert_eq!(format_relative(now - Duration::hours(2), now), "2h ago");
            assert_eq!(format_relative(now - Duration::hours(23), now), "23h ago");
            assert_eq!(format_relative(now - Duration::days(3), now), "3d ago");
        }
    }

    mod execution_duration {
        use super::*;

        #[test]
        fn finished_rounds_to_nearest_minute() {
            // 25m30s rounds up
            let duration = execution_duration(at(14, 0, 0), Some(at(14, 25, 30)), at(18, 0, 0));
            assert_eq!(duration, ExecutionDuration::Finished(26));
            assert_eq!(duration.to_string(), "26m");
        }

        #[test]
        fn running_measures_against_now() {
            let duration = execution_duration(at(16, 0, 0), None, at(16, 42, 10));
            assert_eq!(duration, ExecutionDuration::Running(42));
            assert_eq!(duration.to_string(), "42m (running)");
        }
    }

    mod pipeline_duration {
        use super::*;
        use crate::model::{PipelineStatus, Variables};

        fn pipeline(end: Option<DateTime<Utc>>, duration: Option<u64>) -> PipelineExecution {
            PipelineExecution {
                id: "pipe-1".to_string(),
                pipeline_id: 12345,
                pipeline_url: "https://gitlab.com/group/project/-/pipelines/12345".to_string(),
                status: PipelineStatus::Passed,
                start_time: at(14, 0, 0),
                end_time: end,
                duration,
                initial_test_data: Variables::new(),
                runtime_test_data: Variables::new(),
                step_id: "step-1".to_string(),
            }
        }

        #[test]
        fn uses_recorded_seconds() {
            assert_eq!(pipeline_duration(&pipeline(Some(at(14, 15, 30)), Some(930))), "15m 30s");
        }

        #[test]
        fn falls_back_to_timestamps() {
            assert_eq!(pipeline_duration(&pipeline(Some(at(14, 6, 45)), None)), "6m 45s");
        }

        #[test]
        fn running_without_end_time() {
            assert_eq!(pipeline_duration(&pipeline(None, Some(0))), "Running...");
        }
    }

    #[test]
    fn fixed_clock_is_stable() {
        let clock = FixedClock(at(9, 30, 0));
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.now(), at(9, 30, 0));
    }
}
