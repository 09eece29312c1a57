use log::debug;

use super::{Action, AppState};

/// Pure state transition: consumes a snapshot and returns its successor.
///
/// Add and update actions both replace the entity whose `id` matches and
/// append it when none does. Deletes filter by id. Unknown actions return
/// the state as-is.
pub fn reduce(state: AppState, action: Action) -> AppState {
    debug!("Reducing {}", action.name());

    match action {
        Action::UpdateFlow(flow) => AppState {
            flows: upsert(state.flows, flow, |f| &f.id),
            ..state
        },
        Action::AddFlow(flow) => AppState {
            flows: upsert(state.flows, flow, |f| &f.id),
            ..state
        },
        Action::DeleteFlow(id) => AppState {
            flows: remove(state.flows, &id, |f| &f.id),
            ..state
        },
        Action::UpdateExecution(execution) => AppState {
            executions: upsert(state.executions, execution, |e| &e.id),
            ..state
        },
        Action::AddExecution(execution) => AppState {
            executions: upsert(state.executions, execution, |e| &e.id),
            ..state
        },
        Action::AddApplication(application) => AppState {
            applications: upsert(state.applications, application, |a| &a.id),
            ..state
        },
        Action::UpdateApplication(application) => AppState {
            applications: upsert(state.applications, application, |a| &a.id),
            ..state
        },
        Action::DeleteApplication(id) => AppState {
            applications: remove(state.applications, &id, |a| &a.id),
            ..state
        },
        Action::ToggleTheme => AppState {
            theme: state.theme.toggle(),
            ..state
        },
        Action::Unknown => state,
    }
}

fn upsert<T>(items: Vec<T>, item: T, id: impl Fn(&T) -> &String) -> Vec<T> {
    if items.iter().any(|existing| id(existing) == id(&item)) {
        let mut replacement = Some(item);
        items
            .into_iter()
            .map(|existing| {
                if replacement.as_ref().is_some_and(|r| id(r) == id(&existing)) {
                    replacement.take().unwrap_or(existing)
                } else {
                    existing
                }
            })
            .collect()
    } else {
        items.into_iter().chain(std::iter::once(item)).collect()
    }
}

fn remove<T>(items: Vec<T>, target: &str, id: impl Fn(&T) -> &String) -> Vec<T> {
    items.into_iter().filter(|item| id(item) != target).collect()
}
