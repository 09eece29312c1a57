mod dashboard;
mod details;
mod exports;
mod lists;
mod styling;
mod tables;

pub use dashboard::print_dashboard;
pub use details::{print_execution, print_execution_not_found, print_flow};
pub use exports::export_json;
pub use lists::{print_applications, print_executions, print_flows, print_users};
pub use styling::{bright_green, dim, magenta_bold};

use crate::model::{Theme, User};

/// Prints the Orkestra banner to stderr.
///
/// Displays the tool name, version, the signed-in user and the active theme.
pub fn print_banner(user: &User, theme: Theme) {
    eprintln!(
        r"
{} {}
  {}
  {} {} · {}
",
        magenta_bold("🎼 Orkestra"),
        dim(env!("CARGO_PKG_VERSION")),
        dim("Test flow orchestration across GitLab pipelines"),
        dim("Signed in as"),
        user.name,
        dim(format!("{} · {theme} theme", user.role)),
    );
}
