use crate::{ClearOutcome, Effect, ListState, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: ListState, msg: Msg) -> (ListState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_draft(text);
            Vec::new()
        }
        Msg::RefreshRequested => refresh(&mut state),
        Msg::TasksLoaded(result) => {
            state.finish_load(result);
            Vec::new()
        }
        Msg::AddSubmitted => {
            let label = state.draft().trim().to_owned();
            if label.is_empty() {
                return (state, Vec::new());
            }
            state.clear_error();
            vec![Effect::CreateTask { label }]
        }
        Msg::TaskCreated(Ok(())) => {
            state.set_draft(String::new());
            refresh(&mut state)
        }
        Msg::TaskCreated(Err(failure)) => {
            state.set_error(format!("Could not create task ({failure})"));
            Vec::new()
        }
        Msg::ToggleRequested(id) => match state.apply_toggle(&id) {
            Some((ticket, label)) => vec![Effect::UpdateTask { ticket, label }],
            None => Vec::new(),
        },
        Msg::TaskUpdated { result: Ok(()), .. } => Vec::new(),
        Msg::TaskUpdated {
            ticket,
            result: Err(failure),
        } => {
            state.revert_toggle(&ticket);
            state.set_error(format!("Could not update task ({failure})"));
            Vec::new()
        }
        Msg::RemoveRequested(id) => {
            // No local presence check: the server decides, and a stale id
            // surfaces as a failed delete.
            state.clear_error();
            vec![Effect::DeleteTask { id }]
        }
        Msg::TaskRemoved { result: Ok(()), .. } => refresh(&mut state),
        Msg::TaskRemoved {
            id,
            result: Err(failure),
        } => {
            state.set_error(format!("Could not delete task {id} ({failure})"));
            Vec::new()
        }
        Msg::ClearAllRequested => {
            if state.tasks().is_empty() || state.is_clearing() {
                return (state, Vec::new());
            }
            vec![Effect::ConfirmClearAll {
                task_count: state.tasks().len(),
            }]
        }
        Msg::ClearAllConfirmed(false) => Vec::new(),
        Msg::ClearAllConfirmed(true) => {
            // The list may have changed while the prompt was open.
            if state.tasks().is_empty() || state.is_clearing() {
                return (state, Vec::new());
            }
            state.clear_error();
            let ids = state.begin_clear();
            vec![Effect::DeleteTasks { ids }]
        }
        Msg::TasksCleared(outcome) => {
            state.finish_clear();
            if let Some(message) = clear_failure_message(&outcome) {
                state.set_error_until_reload(message);
            }
            // Reconcile even after failures: some deletes may have landed.
            refresh(&mut state)
        }
    };

    (state, effects)
}

fn refresh(state: &mut ListState) -> Vec<Effect> {
    state.begin_load();
    vec![Effect::FetchTasks]
}

fn clear_failure_message(outcome: &ClearOutcome) -> Option<String> {
    let (_, first) = outcome.failures.first()?;
    Some(format!(
        "Could not delete {} of {} tasks ({first})",
        outcome.failures.len(),
        outcome.attempted
    ))
}
