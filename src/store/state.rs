use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{Application, Flow, FlowExecution, Theme, User};

const DEMO_SNAPSHOT: &str = include_str!("demo.json");

/// Immutable snapshot of everything the dashboard shows.
///
/// Snapshots are replaced wholesale by the reducer; nothing holds a writable
/// alias into one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub flows: Vec<Flow>,
    pub executions: Vec<FlowExecution>,
    pub applications: Vec<Application>,
    pub users: Vec<User>,
    pub current_user: User,
    #[serde(default)]
    pub theme: Theme,
}

impl AppState {
    /// The bundled demo dataset: three applications, two flows, three
    /// executions and four users, with the first user signed in.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded snapshot fails to deserialize.
    pub fn demo() -> Result<Self> {
        Ok(serde_json::from_str(DEMO_SNAPSHOT)?)
    }

    /// Loads a snapshot from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid snapshot.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let state: Self = serde_json::from_str(&content)?;
        debug!(
            "Loaded snapshot from {}: {} flows, {} executions, {} applications, {} users",
            path.display(),
            state.flows.len(),
            state.executions.len(),
            state.applications.len(),
            state.users.len()
        );
        Ok(state)
    }

    /// Writes the snapshot to disk as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        info!("Snapshot written to: {}", path.display());
        Ok(())
    }

    pub fn find_flow(&self, id: &str) -> Option<&Flow> {
        self.flows.iter().find(|f| f.id == id)
    }

    pub fn find_execution(&self, id: &str) -> Option<&FlowExecution> {
        self.executions.iter().find(|e| e.id == id)
    }

    pub fn find_application(&self, id: &str) -> Option<&Application> {
        self.applications.iter().find(|a| a.id == id)
    }

    pub fn find_user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }
}
