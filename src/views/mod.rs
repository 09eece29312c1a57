//! Read-model computations over an [`AppState`](crate::store::AppState)
//! snapshot. Everything here is pure and recomputed on every render.

mod dashboard;
mod filter;
mod histogram;
mod links;
mod metrics;
mod progress;
mod time;
mod timeline;
mod tone;

pub use dashboard::Dashboard;
pub use filter::{filter, newest_first, ListQuery};
pub use histogram::ExecutionHistogram;
pub use links::{application_url, pipeline_label};
pub use progress::progress_percentage;
pub use time::{execution_duration, format_relative, Clock, FixedClock, SystemClock};
pub use timeline::build_timeline;
pub use tone::{Tone, Toned};
