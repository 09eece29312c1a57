use std::fmt::Write;

use chrono::{DateTime, Utc};
use comfy_table::Cell;

use super::styling::{bright, bright_green, bright_red, bright_yellow, cyan, dim, success_rate};
use super::tables::{
    bar, color_coded_success_cell, create_cyan_header, create_table, toned_cell,
};
use crate::views::{execution_duration, format_relative, Dashboard, ExecutionHistogram};

/// Prints the dashboard page to stdout.
///
/// Displays:
/// - Metric cards: total executions, success rate, average duration, active executions
/// - Execution Trends: completed/failed per day over the histogram window
/// - Recent Executions: newest runs with status and duration
/// - Active Flows: flows ready to run
pub fn print_dashboard(dashboard: &Dashboard<'_>, now: DateTime<Utc>) {
    println!("{}", render_dashboard(dashboard, now));
}

pub(super) fn add_section_header(output: &mut String, emoji: &str, title: &str) {
    let _ = writeln!(output, "{} {}", bright(emoji), bright(title).underlined());
}

fn render_dashboard(dashboard: &Dashboard<'_>, now: DateTime<Utc>) -> String {
    let mut output = String::new();
    let metrics = &dashboard.metrics;

    add_section_header(&mut output, "📊", "Overview");

    let health = if metrics.failed_executions > 0 {
        bright_red(format!("{} failed", metrics.failed_executions))
    } else {
        bright_green("All healthy")
    };

    let _ = writeln!(
        output,
        "  {} {}\n  {} {}\n  {} {}\n  {} {} {}\n",
        dim("Total executions:"),
        bright_yellow(metrics.total_executions),
        dim("Success rate:"),
        success_rate(metrics.success_rate),
        dim("Avg duration:"),
        cyan(format!("{:.1}m", metrics.average_duration_minutes)),
        dim("Active executions:"),
        bright_yellow(metrics.active_executions),
        health,
    );

    add_section_header(&mut output, "📈", "Execution Trends");
    let _ = writeln!(output, "{}\n", render_histogram(&dashboard.histogram));

    add_section_header(&mut output, "🕒", "Recent Executions");
    if dashboard.recent_executions.is_empty() {
        let _ = writeln!(output, "  {}\n", dim("No executions yet."));
    } else {
        let mut table = create_table();
        table.set_header(create_cyan_header(&["Flow", "Status", "Duration", "Started"]));
        for execution in &dashboard.recent_executions {
            let duration = execution_duration(execution.start_time, execution.end_time, now);
            table.add_row(vec![
                Cell::new(&execution.flow.name),
                toned_cell(&execution.status),
                Cell::new(duration.to_string()),
                Cell::new(format!("Started {}", format_relative(execution.start_time, now))),
            ]);
        }
        let _ = writeln!(output, "{table}\n");
    }

    add_section_header(&mut output, "🔀", "Active Flows");
    if dashboard.active_flows.is_empty() {
        let _ = writeln!(output, "  {}", dim("No active flows."));
    } else {
        for flow in &dashboard.active_flows {
            let _ = writeln!(
                output,
                "  {} {}\n    {} · {} · Updated {}",
                bright(&flow.name),
                dim(format!("({})", flow.id)),
                dim(&flow.description),
                cyan(format!("{} steps", flow.steps.len())),
                dim(format_relative(flow.updated_at, now)),
            );
        }
    }

    output
}

fn render_histogram(histogram: &ExecutionHistogram) -> String {
    let mut table = create_table();
    table.set_header(create_cyan_header(&[
        "Day", "Completed", "Failed", "Total", "Success",
    ]));

    #[allow(clippy::cast_precision_loss)]
    let max = histogram.max_total as f64;

    for day in &histogram.days {
        #[allow(clippy::cast_precision_loss)]
        let (completed, failed) = (day.completed as f64, day.failed as f64);
        table.add_row(vec![
            Cell::new(format!("{} {}", day.label, day.date.format("%m-%d"))),
            Cell::new(format!("{} {}", bar(completed, max, 8), day.completed))
                .fg(comfy_table::Color::Green),
            Cell::new(format!("{} {}", bar(failed, max, 8), day.failed))
                .fg(comfy_table::Color::Red),
            Cell::new(day.total),
            color_coded_success_cell(day.success_rate),
        ]);
    }

    table.to_string()
}
