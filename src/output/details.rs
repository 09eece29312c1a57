use std::fmt::Write;

use chrono::{DateTime, Utc};
use comfy_table::Cell;

use super::dashboard::add_section_header;
use super::styling::{bright, bright_yellow, cyan, dim, status, toned};
use super::tables::{bar, create_cyan_header, create_table, toned_cell};
use crate::model::{Flow, FlowExecution, Variables};
use crate::views::{
    build_timeline, execution_duration, format_relative, pipeline_label, progress_percentage,
    Toned,
};

pub fn print_flow(flow: &Flow, now: DateTime<Utc>) {
    println!("{}", render_flow(flow, now));
}

pub fn print_execution(execution: &FlowExecution, now: DateTime<Utc>) {
    println!("{}", render_execution(execution, now));
}

/// Shown instead of an error when an execution id does not resolve.
pub fn print_execution_not_found(id: &str) {
    println!("{}", render_execution_not_found(id));
}

fn render_variables(output: &mut String, variables: &Variables) {
    if variables.is_empty() {
        let _ = writeln!(output, "  {}", dim("None"));
        return;
    }
    for (key, value) in variables {
        let _ = writeln!(output, "  {} {}", cyan(format!("{key}:")), value);
    }
}

fn render_flow(flow: &Flow, now: DateTime<Utc>) -> String {
    let mut output = String::new();

    let _ = writeln!(
        output,
        "{} {} {}",
        bright(&flow.name),
        dim(format!("({})", flow.id)),
        status(&flow.status),
    );
    let _ = writeln!(output, "  {}", dim(&flow.description));
    let _ = writeln!(
        output,
        "  {} {} · {} {}",
        dim("Created"),
        format_relative(flow.created_at, now),
        dim("Updated"),
        format_relative(flow.updated_at, now),
    );
    if let Some(case_id) = flow.squash_test_case_id {
        let _ = writeln!(output, "  {} {}", dim("Squash test case:"), case_id);
    }
    let _ = writeln!(output);

    add_section_header(&mut output, "🔧", "Global Variables");
    render_variables(&mut output, &flow.global_variables);
    let _ = writeln!(output);

    add_section_header(&mut output, "🧩", &format!("Steps ({})", flow.steps.len()));
    if flow.steps.is_empty() {
        let _ = writeln!(output, "  {}", dim("No steps yet."));
        return output;
    }

    let mut table = create_table();
    table.set_header(create_cyan_header(&[
        "#", "ID", "Application", "Branch", "Stage", "Tag", "Test Data",
    ]));
    for step in flow.ordered_steps() {
        table.add_row(vec![
            Cell::new(step.order),
            Cell::new(&step.id),
            Cell::new(&step.application.name),
            Cell::new(&step.branch),
            Cell::new(&step.test_stage),
            Cell::new(&step.test_tag),
            Cell::new(format!("{} keys", step.initial_test_data.len())),
        ]);
    }
    let _ = write!(output, "{table}");
    output
}

fn render_execution(execution: &FlowExecution, now: DateTime<Utc>) -> String {
    let mut output = String::new();

    let _ = writeln!(
        output,
        "{} {} {}",
        bright(&execution.flow.name),
        dim(format!("({})", execution.id)),
        status(&execution.status),
    );
    let _ = writeln!(
        output,
        "  {} {} · {} {} · {} {}",
        dim("Started"),
        format_relative(execution.start_time, now),
        dim("Duration"),
        bright_yellow(execution_duration(
            execution.start_time,
            execution.end_time,
            now
        )),
        dim("By"),
        execution.triggered_by,
    );
    let _ = writeln!(
        output,
        "  {} {}/{} pipelines passed\n",
        dim("Progress"),
        execution.passed_pipelines(),
        execution.flow.steps.len(),
    );

    add_section_header(&mut output, "🔧", "Runtime Variables");
    render_variables(&mut output, &execution.runtime_variables);
    let _ = writeln!(output);

    add_section_header(&mut output, "🧭", "Pipeline Timeline");
    let timeline = build_timeline(execution);

    let mut table = create_table();
    table.set_header(create_cyan_header(&[
        "#", "Application", "Stage", "Tag", "Pipeline", "Status", "Duration",
    ]));
    for entry in &timeline.entries {
        let pipeline = entry
            .pipeline
            .map_or_else(|| "-".to_string(), |p| pipeline_label(&p.pipeline_url, p.pipeline_id));
        table.add_row(vec![
            Cell::new(entry.step.order),
            Cell::new(&entry.step.application.name),
            Cell::new(&entry.step.test_stage),
            Cell::new(&entry.step.test_tag),
            Cell::new(pipeline),
            toned_cell(&entry.status()),
            Cell::new(entry.duration().unwrap_or_else(|| "-".to_string())),
        ]);
    }
    let _ = writeln!(output, "{table}");

    let percentage = progress_percentage(execution);
    let _ = writeln!(
        output,
        "  {} {}",
        dim("Overall progress"),
        toned(
            format!("{} {percentage:.0}%", bar(percentage, 100.0, 20)),
            execution.status.tone()
        ),
    );

    if !timeline.conflicts.is_empty() {
        let _ = writeln!(
            output,
            "  {} several pipelines ran for {}; showing the first",
            bright_yellow("Note:"),
            timeline.conflicts.join(", "),
        );
    }

    output
}

fn render_execution_not_found(id: &str) -> String {
    format!(
        "{}\n  {}\n  {} {}",
        bright("Execution not found"),
        dim(format!("No execution with id '{id}' exists.")),
        dim("See all runs with"),
        cyan("orkestra executions list"),
    )
}
