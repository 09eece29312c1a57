use anyhow::{Context, Result};
use chrono::{DateTime, Local, Utc};
use clap::{Args, Parser, Subcommand};
use log::{info, warn};
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::config::{Config, OutputFormat};
use crate::error::OrkestraError;
use crate::forms::{ApplicationForm, FlowDraft, StepForm};
use crate::model::{ApplicationStatus, ExecutionStatus, FlowStatus, Role};
use crate::output;
use crate::store::{Action, AppState, Store};
use crate::views::{
    filter, newest_first, Clock, Dashboard, FixedClock, ListQuery, SystemClock,
};

#[derive(Parser)]
#[command(name = "orkestra")]
#[command(author, version, about = "Test flow orchestration dashboard", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (TOML, JSON or YAML)
    #[arg(short, long, global = true, env = "ORKESTRA_CONFIG")]
    config: Option<PathBuf>,

    /// State snapshot to load; the bundled demo data is used when absent
    #[arg(short, long, global = true, env = "ORKESTRA_STATE")]
    state: Option<PathBuf>,

    /// Write the resulting snapshot back to the state file
    #[arg(long, global = true, default_value_t = false)]
    save: bool,

    #[arg(short, long, global = true, value_enum)]
    format: Option<OutputFormat>,

    #[arg(short, long, global = true, default_value_t = false)]
    pretty: bool,

    /// Write JSON output to a file instead of stdout
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Pin "now" (RFC 3339) for relative times and the histogram window
    #[arg(long, global = true, env = "ORKESTRA_NOW")]
    now: Option<DateTime<Utc>>,
}

#[derive(Subcommand)]
enum Commands {
    /// Metrics, execution trends, recent executions and active flows
    Dashboard,
    /// Build and manage test flows
    Flows {
        #[command(subcommand)]
        command: FlowCommands,
    },
    /// Inspect flow executions
    Executions {
        #[command(subcommand)]
        command: ExecutionCommands,
    },
    /// Manage GitLab applications
    Applications {
        #[command(subcommand)]
        command: ApplicationCommands,
    },
    Users {
        #[command(subcommand)]
        command: UserCommands,
    },
    Theme {
        #[command(subcommand)]
        command: ThemeCommands,
    },
    /// Write the effective configuration to a file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Apply actions from a JSON file ("-" reads stdin)
    Dispatch { input: String },
    /// Print the whole state snapshot as JSON
    Export,
}

#[derive(Subcommand)]
enum FlowCommands {
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        status: Option<FlowStatus>,
    },
    Show {
        id: String,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Global variable, repeatable; values are parsed as JSON when possible
        #[arg(long = "var", value_name = "KEY=VALUE")]
        variables: Vec<String>,
    },
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long = "var", value_name = "KEY=VALUE")]
        variables: Vec<String>,
    },
    AddStep {
        flow_id: String,
        #[command(flatten)]
        step: StepArgs,
    },
    EditStep {
        flow_id: String,
        step_id: String,
        #[command(flatten)]
        step: StepArgs,
    },
    RemoveStep {
        flow_id: String,
        step_id: String,
    },
    Delete {
        id: String,
    },
}

/// Step fields; omitted ones keep the form default (or the current value when editing).
#[derive(Args)]
struct StepArgs {
    /// Application id the step's pipeline runs in
    #[arg(long)]
    application: Option<String>,
    #[arg(long)]
    branch: Option<String>,
    #[arg(long)]
    stage: Option<String>,
    #[arg(long)]
    tag: Option<String>,
    /// Initial test data as a JSON object
    #[arg(long)]
    data: Option<String>,
    /// Comma-separated Squash step ids
    #[arg(long)]
    squash_ids: Option<String>,
}

impl StepArgs {
    fn apply(&self, form: &mut StepForm) {
        overwrite(&mut form.application_id, &self.application);
        overwrite(&mut form.branch, &self.branch);
        overwrite(&mut form.test_stage, &self.stage);
        overwrite(&mut form.test_tag, &self.tag);
        overwrite(&mut form.initial_test_data, &self.data);
        overwrite(&mut form.squash_step_ids, &self.squash_ids);
    }
}

#[derive(Subcommand)]
enum ExecutionCommands {
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        status: Option<ExecutionStatus>,
    },
    Show {
        id: String,
    },
}

#[derive(Subcommand)]
enum ApplicationCommands {
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        status: Option<ApplicationStatus>,
    },
    Add {
        #[command(flatten)]
        fields: ApplicationArgs,
    },
    Edit {
        id: String,
        #[command(flatten)]
        fields: ApplicationArgs,
    },
    Delete {
        id: String,
    },
}

#[derive(Args)]
struct ApplicationArgs {
    #[arg(long)]
    name: Option<String>,
    /// GitLab project path, e.g. group/project
    #[arg(long)]
    project: Option<String>,
    /// GitLab personal access token
    #[arg(long)]
    token: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    status: Option<ApplicationStatus>,
}

impl ApplicationArgs {
    fn apply(&self, form: &mut ApplicationForm) {
        overwrite(&mut form.name, &self.name);
        overwrite(&mut form.gitlab_project_id, &self.project);
        overwrite(&mut form.personal_access_token, &self.token);
        overwrite(&mut form.description, &self.description);
        if let Some(status) = self.status {
            form.status = status;
        }
    }
}

#[derive(Subcommand)]
enum UserCommands {
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        role: Option<Role>,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Format follows the extension (.toml, .json, .yaml)
    Init {
        #[arg(default_value = "orkestra.toml")]
        path: PathBuf,
    },
}

#[derive(Subcommand)]
enum ThemeCommands {
    /// Switch between dark and light
    Toggle,
}

fn overwrite(field: &mut String, value: &Option<String>) {
    if let Some(value) = value {
        field.clone_from(value);
    }
}

/// Splits `KEY=VALUE`, reading the value as JSON and falling back to a string.
fn parse_variable(input: &str) -> Result<(String, serde_json::Value)> {
    let (key, value) = input
        .split_once('=')
        .with_context(|| format!("Expected KEY=VALUE, got '{input}'"))?;
    let key = key.trim();
    if key.is_empty() {
        anyhow::bail!("Variable name is empty in '{input}'");
    }
    let value = value.trim();
    let value = serde_json::from_str(value)
        .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

/// Loaded config and store for one invocation.
struct Session {
    config: Config,
    store: Store,
    state_path: Option<PathBuf>,
    now: DateTime<Utc>,
    format: OutputFormat,
    pretty: bool,
}

impl Session {
    fn state(&self) -> &AppState {
        self.store.state()
    }

    fn dispatch(&mut self, action: Action) {
        self.store.dispatch(action);
    }
}

impl Cli {
    fn open_session(&self, clock: &dyn Clock) -> Result<Session> {
        let config = Config::load(self.config.as_deref())?;
        let state_path = self
            .state
            .clone()
            .or_else(|| config.store.state_file.clone());

        let state = match &state_path {
            Some(path) if path.exists() => AppState::load(path)
                .with_context(|| format!("Failed to load snapshot: {}", path.display()))?,
            Some(path) => {
                info!("No snapshot at {}, starting from demo data", path.display());
                demo_state(&config)?
            }
            None => demo_state(&config)?,
        };

        if state.find_user(&state.current_user.id).is_none() {
            warn!(
                "Current user {} is not in the users list",
                state.current_user.id
            );
        }

        Ok(Session {
            format: self.format.unwrap_or(config.output.format),
            pretty: self.pretty || config.output.pretty,
            store: Store::new(state),
            state_path,
            now: clock.now(),
            config,
        })
    }

    fn emit<T: Serialize + ?Sized>(
        &self,
        session: &Session,
        value: &T,
        summary: impl FnOnce(),
    ) -> Result<()> {
        match session.format {
            OutputFormat::Summary => {
                if self.output.is_some() {
                    warn!("--output only applies to JSON output");
                }
                summary();
                Ok(())
            }
            OutputFormat::Json => self.write_json(value, session.pretty),
        }
    }

    fn write_json<T: Serialize + ?Sized>(&self, value: &T, pretty: bool) -> Result<()> {
        if let Some(output_path) = &self.output {
            let mut file = std::fs::File::create(output_path).with_context(|| {
                format!("Failed to create output file: {}", output_path.display())
            })?;
            output::export_json(value, pretty, &mut file)?;
            info!("Output written to: {}", output_path.display());
        } else {
            output::export_json(value, pretty, &mut std::io::stdout().lock())?;
        }
        Ok(())
    }

    fn confirm(&self, session: &Session, message: &str) {
        if session.format == OutputFormat::Summary {
            println!("{} {message}", output::bright_green("✓"));
        }
    }

    fn finish(&self, session: Session) -> Result<()> {
        if !self.save {
            info!("Changes were not persisted; pass --save to keep them");
            return Ok(());
        }
        let path = session.state_path.ok_or_else(|| {
            OrkestraError::Config(
                "--save needs a snapshot path from --state or store.state-file".to_string(),
            )
        })?;
        session.store.into_state().save(&path)?;
        Ok(())
    }

    pub fn execute(self) -> Result<()> {
        let clock: Box<dyn Clock> = match self.now {
            Some(now) => Box::new(FixedClock(now)),
            None => Box::new(SystemClock),
        };
        let mut session = self.open_session(clock.as_ref())?;
        output::print_banner(&session.state().current_user, session.state().theme);

        let mutated = match &self.command {
            Commands::Dashboard => {
                self.execute_dashboard(&session)?;
                false
            }
            Commands::Flows { command } => self.execute_flows(&mut session, command)?,
            Commands::Executions { command } => {
                self.execute_executions(&session, command)?;
                false
            }
            Commands::Applications { command } => {
                self.execute_applications(&mut session, command)?
            }
            Commands::Users { command } => {
                self.execute_users(&session, command)?;
                false
            }
            Commands::Theme {
                command: ThemeCommands::Toggle,
            } => {
                session.dispatch(Action::ToggleTheme);
                let theme = session.state().theme;
                self.confirm(&session, &format!("Theme set to {theme}"));
                true
            }
            Commands::Config {
                command: ConfigCommands::Init { path },
            } => {
                session.config.save(path)?;
                self.confirm(&session, &format!("Wrote {}", path.display()));
                false
            }
            Commands::Dispatch { input } => {
                self.execute_dispatch(&mut session, input)?;
                true
            }
            Commands::Export => {
                self.write_json(session.state(), session.pretty)?;
                false
            }
        };

        if mutated {
            self.finish(session)?;
        }
        Ok(())
    }

    fn execute_dashboard(&self, session: &Session) -> Result<()> {
        let local_now = session.now.with_timezone(&Local);
        let dashboard = Dashboard::build(session.state(), &session.config.dashboard, &local_now);
        self.emit(session, &dashboard, || {
            output::print_dashboard(&dashboard, session.now);
        })
    }

    fn execute_flows(&self, session: &mut Session, command: &FlowCommands) -> Result<bool> {
        match command {
            FlowCommands::List { search, status } => {
                let query = ListQuery::new(search.as_deref(), *status);
                let flows = filter(&session.state().flows, &query);
                self.emit(session, &flows, || output::print_flows(&flows, session.now))?;
                Ok(false)
            }
            FlowCommands::Show { id } => {
                let flow = session
                    .state()
                    .find_flow(id)
                    .ok_or_else(|| OrkestraError::not_found("Flow", id))?;
                self.emit(session, flow, || output::print_flow(flow, session.now))?;
                Ok(false)
            }
            FlowCommands::Create {
                name,
                description,
                variables,
            } => {
                let mut draft = FlowDraft::new(&session.state().flows, session.now);
                draft.set_name(name.trim());
                draft.set_description(description.trim());
                for variable in variables {
                    let (key, value) = parse_variable(variable)?;
                    draft.set_variable(key, value);
                }
                let id = draft.flow().id.clone();
                self.save_draft(session, draft);
                self.confirm(session, &format!("Created flow {id}"));
                Ok(true)
            }
            FlowCommands::Edit {
                id,
                name,
                description,
                variables,
            } => {
                let mut draft = self.draft_for(session, id)?;
                if let Some(name) = name {
                    draft.set_name(name.trim());
                }
                if let Some(description) = description {
                    draft.set_description(description.trim());
                }
                for variable in variables {
                    let (key, value) = parse_variable(variable)?;
                    draft.set_variable(key, value);
                }
                self.save_draft(session, draft);
                self.confirm(session, &format!("Updated flow {id}"));
                Ok(true)
            }
            FlowCommands::AddStep { flow_id, step } => {
                let mut draft = self.draft_for(session, flow_id)?;
                let mut form = StepForm::default();
                step.apply(&mut form);
                let step = form
                    .submit(&session.state().applications, None, session.now)
                    .map_err(OrkestraError::from)?;
                let step_id = draft.add_step(step).id.clone();
                let summary = format!(
                    "Added step {step_id} to {flow_id} ({} steps across {} applications)",
                    draft.flow().steps.len(),
                    draft.application_count()
                );
                self.save_draft(session, draft);
                self.confirm(session, &summary);
                Ok(true)
            }
            FlowCommands::EditStep {
                flow_id,
                step_id,
                step,
            } => {
                let mut draft = self.draft_for(session, flow_id)?;
                let existing = draft
                    .flow()
                    .steps
                    .iter()
                    .find(|s| s.id == *step_id)
                    .cloned()
                    .ok_or_else(|| OrkestraError::not_found("Step", step_id))?;
                let mut form = StepForm::edit(&existing);
                step.apply(&mut form);
                let updated = form
                    .submit(&session.state().applications, Some(&existing), session.now)
                    .map_err(OrkestraError::from)?;
                draft.update_step(updated);
                self.save_draft(session, draft);
                self.confirm(session, &format!("Updated step {step_id}"));
                Ok(true)
            }
            FlowCommands::RemoveStep { flow_id, step_id } => {
                let mut draft = self.draft_for(session, flow_id)?;
                if !draft.delete_step(step_id) {
                    return Err(OrkestraError::not_found("Step", step_id).into());
                }
                self.save_draft(session, draft);
                self.confirm(session, &format!("Removed step {step_id} from {flow_id}"));
                Ok(true)
            }
            FlowCommands::Delete { id } => {
                if session.state().find_flow(id).is_none() {
                    return Err(OrkestraError::not_found("Flow", id).into());
                }
                session.dispatch(Action::DeleteFlow(id.clone()));
                self.confirm(session, &format!("Deleted flow {id}"));
                Ok(true)
            }
        }
    }

    fn draft_for(&self, session: &Session, flow_id: &str) -> Result<FlowDraft> {
        let flow = session
            .state()
            .find_flow(flow_id)
            .cloned()
            .ok_or_else(|| OrkestraError::not_found("Flow", flow_id))?;
        Ok(FlowDraft::edit(flow))
    }

    fn save_draft(&self, session: &mut Session, draft: FlowDraft) {
        let action = draft.save(session.state(), session.now);
        session.dispatch(action);
    }

    fn execute_executions(&self, session: &Session, command: &ExecutionCommands) -> Result<()> {
        match command {
            ExecutionCommands::List { search, status } => {
                let query = ListQuery::new(search.as_deref(), *status);
                let executions: Vec<_> = newest_first(&session.state().executions)
                    .into_iter()
                    .filter(|e| query.matches(*e))
                    .collect();
                self.emit(session, &executions, || {
                    output::print_executions(&executions, session.now);
                })
            }
            ExecutionCommands::Show { id } => match session.state().find_execution(id) {
                Some(execution) => self.emit(session, execution, || {
                    output::print_execution(execution, session.now);
                }),
                None => {
                    warn!("Execution {id} not found");
                    self.emit(session, &serde_json::Value::Null, || {
                        output::print_execution_not_found(id);
                    })
                }
            },
        }
    }

    fn execute_applications(
        &self,
        session: &mut Session,
        command: &ApplicationCommands,
    ) -> Result<bool> {
        match command {
            ApplicationCommands::List { search, status } => {
                let query = ListQuery::new(search.as_deref(), *status);
                let applications = filter(&session.state().applications, &query);
                self.emit(session, &applications, || {
                    output::print_applications(&applications, &session.config.gitlab.base_url);
                })?;
                Ok(false)
            }
            ApplicationCommands::Add { fields } => {
                let mut form = ApplicationForm::default();
                fields.apply(&mut form);
                let application = form
                    .submit(&session.state().applications, None, session.now)
                    .map_err(OrkestraError::from)?;
                let id = application.id.clone();
                session.dispatch(Action::AddApplication(application));
                self.confirm(session, &format!("Added application {id}"));
                Ok(true)
            }
            ApplicationCommands::Edit { id, fields } => {
                let existing = session
                    .state()
                    .find_application(id)
                    .cloned()
                    .ok_or_else(|| OrkestraError::not_found("Application", id))?;
                let mut form = ApplicationForm::edit(&existing);
                fields.apply(&mut form);
                let application = form
                    .submit(&session.state().applications, Some(&existing), session.now)
                    .map_err(OrkestraError::from)?;
                session.dispatch(Action::UpdateApplication(application));
                self.confirm(session, &format!("Updated application {id}"));
                Ok(true)
            }
            ApplicationCommands::Delete { id } => {
                if session.state().find_application(id).is_none() {
                    return Err(OrkestraError::not_found("Application", id).into());
                }
                session.dispatch(Action::DeleteApplication(id.clone()));
                self.confirm(session, &format!("Deleted application {id}"));
                Ok(true)
            }
        }
    }

    fn execute_users(&self, session: &Session, command: &UserCommands) -> Result<()> {
        match command {
            UserCommands::List { search, role } => {
                let query = ListQuery::new(search.as_deref(), *role);
                let users = filter(&session.state().users, &query);
                self.emit(session, &users, || output::print_users(&users, session.now))
            }
        }
    }

    fn execute_dispatch(&self, session: &mut Session, input: &str) -> Result<()> {
        let text = read_input(input)?;
        let actions = Action::parse_batch(&text)
            .with_context(|| format!("Failed to parse actions from {input}"))?;

        for action in actions {
            if action == Action::Unknown {
                warn!("Ignoring action with unrecognized type");
            }
            session.dispatch(action);
        }

        self.confirm(session, "Actions applied");
        Ok(())
    }
}

fn demo_state(config: &Config) -> Result<AppState> {
    let mut state = AppState::demo()?;
    state.theme = config.store.theme;
    Ok(state)
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read actions from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(Path::new(input))
        .with_context(|| format!("Failed to read actions file: {input}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("orkestra").chain(args.iter().copied())).unwrap()
    }

    fn clock() -> FixedClock {
        FixedClock("2025-01-08T18:00:00Z".parse().unwrap())
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_now_flag_parses_rfc3339() {
        let cli = parse(&["--now", "2025-01-08T18:00:00Z", "dashboard"]);
        assert_eq!(cli.now, Some(clock().0));
        assert!(Cli::try_parse_from(["orkestra", "--now", "yesterday", "dashboard"]).is_err());
    }

    #[test]
    fn test_parse_variable() {
        assert_eq!(
            parse_variable("timeout=300").unwrap(),
            ("timeout".to_string(), serde_json::json!(300))
        );
        assert_eq!(
            parse_variable("env = staging").unwrap(),
            ("env".to_string(), serde_json::json!("staging"))
        );
        assert!(parse_variable("novalue").is_err());
        assert!(parse_variable("=1").is_err());
    }

    #[test]
    fn test_status_filters_parse_case_insensitively() {
        let cli = parse(&["executions", "list", "--status", "Running"]);
        match cli.command {
            Commands::Executions {
                command: ExecutionCommands::List { status, .. },
            } => assert_eq!(status, Some(ExecutionStatus::Running)),
            _ => panic!("unexpected command"),
        }

        let err = Cli::try_parse_from(["orkestra", "users", "list", "--role", "owner"]);
        assert!(err.is_err());
    }

    #[test]
    fn test_session_defaults_to_demo_data() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("state.json");
        let cli = parse(&["--state", missing.to_str().unwrap(), "export"]);

        let session = cli.open_session(&clock()).unwrap();
        assert_eq!(session.state().flows.len(), 2);
        assert_eq!(session.state_path.as_deref(), Some(missing.as_path()));
        assert_eq!(session.format, OutputFormat::Summary);
    }

    #[test]
    fn test_add_step_then_save_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let state_arg = path.to_str().unwrap();

        let cli = parse(&[
            "--state", state_arg, "--save", "--format", "json", "flows", "add-step", "flow-2",
            "--application", "app-3", "--stage", "smoke", "--tag", "payments",
        ]);
        let mut session = cli.open_session(&clock()).unwrap();
        let Commands::Flows { command } = &cli.command else {
            panic!("unexpected command");
        };
        assert!(cli.execute_flows(&mut session, command).unwrap());
        cli.finish(session).unwrap();

        let saved = AppState::load(&path).unwrap();
        let flow = saved.find_flow("flow-2").unwrap();
        assert_eq!(flow.steps.len(), 3);
        assert_eq!(flow.steps[2].order, 3);
        assert_eq!(flow.steps[2].application.name, "Payment Service");
        assert_eq!(flow.steps[2].branch, "main");
    }

    fn run_flows_and_save(path: &std::path::Path, args: &[&str]) {
        let mut full = vec!["--state", path.to_str().unwrap(), "--save", "--format", "json"];
        full.extend_from_slice(args);
        let cli = parse(&full);
        let mut session = cli.open_session(&clock()).unwrap();
        let Commands::Flows { command } = &cli.command else {
            panic!("unexpected command");
        };
        assert!(cli.execute_flows(&mut session, command).unwrap());
        cli.finish(session).unwrap();
    }

    #[test]
    fn test_flows_created_at_the_same_instant_both_survive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        run_flows_and_save(&path, &["flows", "create", "--name", "Alpha"]);
        run_flows_and_save(&path, &["flows", "create", "--name", "Beta"]);

        let saved = AppState::load(&path).unwrap();
        let flows: Vec<(&str, &str)> = saved
            .flows
            .iter()
            .map(|f| (f.id.as_str(), f.name.as_str()))
            .collect();
        assert_eq!(
            flows[2..],
            [
                ("flow-1736359200000", "Alpha"),
                ("flow-1736359200000-2", "Beta")
            ]
        );
        assert_eq!(saved.flows.len(), 4);
    }

    #[test]
    fn test_removing_one_of_two_added_steps_keeps_the_other() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let add_step = [
            "flows", "add-step", "flow-2", "--application", "app-3", "--stage", "smoke", "--tag",
            "payments",
        ];

        run_flows_and_save(&path, &add_step);
        run_flows_and_save(&path, &add_step);
        let saved = AppState::load(&path).unwrap();
        let ids: Vec<&str> = saved
            .find_flow("flow-2")
            .unwrap()
            .steps
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(
            ids,
            ["step-4", "step-5", "step-1736359200000", "step-1736359200000-2"]
        );

        run_flows_and_save(&path, &["flows", "remove-step", "flow-2", "step-1736359200000"]);
        let saved = AppState::load(&path).unwrap();
        let steps: Vec<(&str, u32)> = saved
            .find_flow("flow-2")
            .unwrap()
            .steps
            .iter()
            .map(|s| (s.id.as_str(), s.order))
            .collect();
        assert_eq!(
            steps,
            [("step-4", 1), ("step-5", 2), ("step-1736359200000-2", 3)]
        );
    }

    #[test]
    fn test_invalid_step_reports_every_field() {
        let cli = parse(&["--format", "json", "flows", "add-step", "flow-1", "--data", "[1]"]);
        let mut session = cli.open_session(&clock()).unwrap();
        let Commands::Flows { command } = &cli.command else {
            panic!("unexpected command");
        };

        let err = cli.execute_flows(&mut session, command).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Application is required"));
        assert!(message.contains("Test stage is required"));
        assert!(message.contains("Invalid JSON format"));
        assert_eq!(session.state().find_flow("flow-1").unwrap().steps.len(), 3);
    }

    #[test]
    fn test_remove_unknown_step_is_not_found() {
        let cli = parse(&["--format", "json", "flows", "remove-step", "flow-1", "step-9"]);
        let mut session = cli.open_session(&clock()).unwrap();
        let Commands::Flows { command } = &cli.command else {
            panic!("unexpected command");
        };

        let err = cli.execute_flows(&mut session, command).unwrap_err();
        assert_eq!(err.to_string(), "Step not found: step-9");
    }

    #[test]
    fn test_save_without_path_is_a_config_error() {
        let cli = parse(&["--save", "theme", "toggle"]);
        let cli = Cli { state: None, ..cli };
        let session = cli.open_session(&clock()).unwrap();

        let err = cli.finish(session).unwrap_err();
        assert!(err.to_string().starts_with("Invalid configuration"));
    }

    #[test]
    fn test_dispatch_applies_batch_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let actions = dir.path().join("actions.json");
        std::fs::write(
            &actions,
            r#"[{"type": "DELETE_APPLICATION", "payload": "app-3"}, {"type": "TOGGLE_THEME"}]"#,
        )
        .unwrap();

        let cli = parse(&["--format", "json", "dispatch", actions.to_str().unwrap()]);
        let mut session = cli.open_session(&clock()).unwrap();
        cli.execute_dispatch(&mut session, actions.to_str().unwrap())
            .unwrap();

        assert_eq!(session.state().applications.len(), 2);
        assert_eq!(session.state().theme.to_string(), "light");
    }
}
