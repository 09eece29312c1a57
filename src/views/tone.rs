use crate::model::{ApplicationStatus, ExecutionStatus, FlowStatus, PipelineStatus, Role};

/// Visual emphasis a status or role is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// green
    Success,
    /// red
    Failure,
    /// cyan
    Active,
    /// amber
    Warning,
    /// purple
    Accent,
    /// gray
    Neutral,
}

pub trait Toned {
    fn tone(&self) -> Tone;
}

impl Toned for ExecutionStatus {
    fn tone(&self) -> Tone {
        match self {
            ExecutionStatus::Completed => Tone::Success,
            ExecutionStatus::Failed => Tone::Failure,
            ExecutionStatus::Running => Tone::Active,
            ExecutionStatus::Pending | ExecutionStatus::Cancelled => Tone::Neutral,
        }
    }
}

impl Toned for PipelineStatus {
    fn tone(&self) -> Tone {
        match self {
            PipelineStatus::Passed => Tone::Success,
            PipelineStatus::Failed => Tone::Failure,
            PipelineStatus::Running => Tone::Active,
            PipelineStatus::Pending | PipelineStatus::Cancelled => Tone::Neutral,
        }
    }
}

impl Toned for FlowStatus {
    fn tone(&self) -> Tone {
        match self {
            FlowStatus::Active => Tone::Success,
            FlowStatus::Draft => Tone::Warning,
            FlowStatus::Inactive => Tone::Neutral,
        }
    }
}

impl Toned for ApplicationStatus {
    fn tone(&self) -> Tone {
        match self {
            ApplicationStatus::Active => Tone::Success,
            ApplicationStatus::Inactive => Tone::Neutral,
        }
    }
}

impl Toned for Role {
    fn tone(&self) -> Tone {
        match self {
            Role::Admin => Tone::Failure,
            Role::Operator => Tone::Active,
            Role::Editor => Tone::Accent,
            Role::Auditor => Tone::Warning,
            Role::Viewer => Tone::Neutral,
        }
    }
}
