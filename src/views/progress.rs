use crate::model::{ExecutionStatus, FlowExecution};

/// How far an execution has got, as a percentage of its flow's steps.
///
/// Finished executions (completed or failed) always read 100. Otherwise each
/// pipeline that passed or failed counts as one settled step.
#[allow(clippy::cast_precision_loss)]
pub fn progress_percentage(execution: &FlowExecution) -> f64 {
    if matches!(
        execution.status,
        ExecutionStatus::Completed | ExecutionStatus::Failed
    ) {
        return 100.0;
    }

    let total_steps = execution.flow.steps.len();
    if total_steps == 0 {
        return 0.0;
    }

    let settled = execution
        .pipeline_executions
        .iter()
        .filter(|p| p.is_settled())
        .count();

    ((settled as f64 / total_steps as f64) * 100.0).min(100.0)
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::model::PipelineStatus;
    use crate::store::AppState;

    fn demo_execution(id: &str) -> FlowExecution {
        AppState::demo()
            .unwrap()
            .find_execution(id)
            .unwrap()
            .clone()
    }

    #[test]
    fn finished_executions_are_complete() {
        assert_eq!(progress_percentage(&demo_execution("exec-1")), 100.0);
        assert_eq!(progress_percentage(&demo_execution("exec-2")), 100.0);
    }

    #[test]
    fn running_pipeline_does_not_count() {
        // exec-3 has one running pipeline out of three steps
        assert_eq!(progress_percentage(&demo_execution("exec-3")), 0.0);
    }

    #[test]
    fn settled_pipelines_count_towards_progress() {
        let mut execution = demo_execution("exec-3");
        execution.pipeline_executions[0].status = PipelineStatus::Passed;
        let progress = progress_percentage(&execution);
        assert!((progress - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn cancelled_execution_uses_step_ratio() {
        let mut execution = demo_execution("exec-1");
        execution.status = ExecutionStatus::Cancelled;
        // two passed + one failed out of three steps
        assert_eq!(progress_percentage(&execution), 100.0);
    }

    #[test]
    fn flow_without_steps_reads_zero() {
        let mut execution = demo_execution("exec-3");
        execution.flow.steps.clear();
        assert_eq!(progress_percentage(&execution), 0.0);
    }

    #[test]
    fn extra_pipelines_are_clamped() {
        let mut execution = demo_execution("exec-2");
        execution.status = ExecutionStatus::Running;
        let extra = execution.pipeline_executions[0].clone();
        execution.pipeline_executions.push(extra);
        assert_eq!(progress_percentage(&execution), 100.0);
    }
}
