//! Entity records shared by the store, the derived views and the CLI.
//!
//! All records serialize with camelCase keys so snapshots keep the same
//! shape as the dashboard's wire format.

/// Free-form key/value data attached to flows, steps and executions.
///
/// Insertion order is preserved so variables render in the order they were defined.
pub type Variables = indexmap::IndexMap<String, serde_json::Value>;

/// Error returned when parsing a status or role name fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseKindError {
    pub kind: &'static str,
    pub value: String,
}

// Must stay above the submodule declarations so they can expand it.
/// Implements `as_str`, `Display` and `FromStr` for a lowercase string enum.
macro_rules! string_enum {
    ($ty:ident, $kind:literal, { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            pub fn as_str(self) -> &'static str {
                match self {
                    $($ty::$variant => $name),+
                }
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $ty {
            type Err = $crate::model::ParseKindError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($name => Ok($ty::$variant),)+
                    _ => Err($crate::model::ParseKindError {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

mod application;
mod execution;
mod flow;
mod user;

pub use application::{Application, ApplicationStatus};
pub use execution::{ExecutionStatus, FlowExecution, PipelineExecution, PipelineStatus};
pub use flow::{Flow, FlowStatus, FlowStep};
pub use user::{Role, Theme, User};
