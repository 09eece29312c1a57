use std::fmt::Write;

use chrono::{DateTime, Utc};
use comfy_table::Cell;

use super::dashboard::add_section_header;
use super::styling::dim;
use super::tables::{create_cyan_header, create_table, progress_cell, toned_cell};
use crate::model::{Application, Flow, FlowExecution, User};
use crate::views::{
    application_url, execution_duration, format_relative, progress_percentage, Toned,
};

pub fn print_flows(flows: &[&Flow], now: DateTime<Utc>) {
    println!("{}", render_flows(flows, now));
}

pub fn print_executions(executions: &[&FlowExecution], now: DateTime<Utc>) {
    println!("{}", render_executions(executions, now));
}

pub fn print_applications(applications: &[&Application], gitlab_base_url: &str) {
    println!("{}", render_applications(applications, gitlab_base_url));
}

pub fn print_users(users: &[&User], now: DateTime<Utc>) {
    println!("{}", render_users(users, now));
}

fn empty_state(output: &mut String, message: &str) {
    let _ = writeln!(output, "  {}", dim(message));
}

fn render_flows(flows: &[&Flow], now: DateTime<Utc>) -> String {
    let mut output = String::new();
    add_section_header(&mut output, "🔀", &format!("Flows ({})", flows.len()));

    if flows.is_empty() {
        empty_state(&mut output, "No flows match.");
        return output;
    }

    let mut table = create_table();
    table.set_header(create_cyan_header(&[
        "ID", "Name", "Status", "Steps", "Variables", "Updated",
    ]));
    for flow in flows {
        table.add_row(vec![
            Cell::new(&flow.id),
            Cell::new(format!("{}\n{}", flow.name, flow.description)),
            toned_cell(&flow.status),
            Cell::new(flow.steps.len()),
            Cell::new(flow.global_variables.len()),
            Cell::new(format_relative(flow.updated_at, now)),
        ]);
    }
    let _ = write!(output, "{table}");
    output
}

fn render_executions(executions: &[&FlowExecution], now: DateTime<Utc>) -> String {
    let mut output = String::new();
    add_section_header(
        &mut output,
        "▶️",
        &format!("Executions ({})", executions.len()),
    );

    if executions.is_empty() {
        empty_state(&mut output, "No executions match.");
        return output;
    }

    let mut table = create_table();
    table.set_header(create_cyan_header(&[
        "ID", "Flow", "Status", "Progress", "Duration", "Started", "Triggered By",
    ]));
    for execution in executions {
        table.add_row(vec![
            Cell::new(&execution.id),
            Cell::new(&execution.flow.name),
            toned_cell(&execution.status),
            progress_cell(progress_percentage(execution), execution.status.tone()),
            Cell::new(
                execution_duration(execution.start_time, execution.end_time, now).to_string(),
            ),
            Cell::new(format_relative(execution.start_time, now)),
            Cell::new(&execution.triggered_by),
        ]);
    }
    let _ = write!(output, "{table}");
    output
}

fn render_applications(applications: &[&Application], gitlab_base_url: &str) -> String {
    let mut output = String::new();
    add_section_header(
        &mut output,
        "📦",
        &format!("Applications ({})", applications.len()),
    );

    if applications.is_empty() {
        empty_state(&mut output, "No applications match.");
        return output;
    }

    let mut table = create_table();
    table.set_header(create_cyan_header(&["ID", "Name", "Status", "Project", "Description"]));
    for application in applications {
        table.add_row(vec![
            Cell::new(&application.id),
            Cell::new(&application.name),
            toned_cell(&application.status),
            Cell::new(application_url(gitlab_base_url, &application.gitlab_project_id)),
            Cell::new(&application.description),
        ]);
    }
    let _ = write!(output, "{table}");
    output
}

fn render_users(users: &[&User], now: DateTime<Utc>) -> String {
    let mut output = String::new();
    add_section_header(&mut output, "👥", &format!("Users ({})", users.len()));

    if users.is_empty() {
        empty_state(&mut output, "No users match.");
        return output;
    }

    let mut table = create_table();
    table.set_header(create_cyan_header(&["ID", "Name", "Email", "Role", "Last Active"]));
    for user in users {
        table.add_row(vec![
            Cell::new(&user.id),
            Cell::new(&user.name),
            Cell::new(&user.email),
            toned_cell(&user.role),
            Cell::new(format_relative(user.last_active, now)),
        ]);
    }
    let _ = write!(output, "{table}");
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::AppState;

    fn now() -> DateTime<Utc> {
        "2025-01-08T18:00:00Z".parse().unwrap()
    }

    #[test]
    fn flows_table_lists_every_flow() {
        let state = AppState::demo().unwrap();
        let flows: Vec<&Flow> = state.flows.iter().collect();
        let output = render_flows(&flows, now());

        assert!(output.contains("Flows (2)"));
        assert!(output.contains("E2E User Journey"));
        assert!(output.contains("Smoke Test Suite"));
        assert!(output.contains("2h ago"));
    }

    #[test]
    fn executions_table_shows_progress_and_duration() {
        let state = AppState::demo().unwrap();
        let executions: Vec<&FlowExecution> = state.executions.iter().collect();
        let output = render_executions(&executions, now());

        assert!(output.contains("26m"));
        assert!(output.contains("120m (running)"));
        assert!(output.contains("100%"));
        assert!(output.contains("mike.johnson@company.com"));
    }

    #[test]
    fn applications_table_links_to_gitlab() {
        let state = AppState::demo().unwrap();
        let applications: Vec<&Application> = state.applications.iter().collect();
        let output = render_applications(&applications, "https://gitlab.example.com");

        assert!(output.contains("https://gitlab.example.com/orkestra/api-gateway"));
    }

    #[test]
    fn users_table_shows_roles() {
        let state = AppState::demo().unwrap();
        let users: Vec<&User> = state.users.iter().collect();
        let output = render_users(&users, now());

        assert!(output.contains("operator"));
        assert!(output.contains("4h ago"));
    }

    #[test]
    fn empty_lists_render_a_placeholder() {
        let output = render_users(&[], now());
        assert!(output.contains("Users (0)"));
        assert!(output.contains("No users match."));
    }
}
