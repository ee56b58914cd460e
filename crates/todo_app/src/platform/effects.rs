use todo_core::{ClearOutcome, Effect, Msg, RequestFailure, Task, TaskId, ToggleTicket};
use todo_engine::{ApiError, ApiSettings, EngineError, EngineEvent, EngineHandle, FailureKind, RemoteTask};
use todo_logging::{todo_info, todo_warn};

use super::confirm::Confirm;

/// Executes controller effects against the engine and turns engine
/// completions back into messages.
pub(crate) struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: ApiSettings) -> Result<Self, EngineError> {
        Ok(Self::with_engine(EngineHandle::new(settings)?))
    }

    pub fn with_engine(engine: EngineHandle) -> Self {
        Self { engine }
    }

    /// Dispatches `effects`. Effects answered locally (confirmation) yield
    /// their follow-up messages immediately; network effects report later
    /// through [`EffectRunner::poll`].
    pub fn enqueue(&self, effects: Vec<Effect>, confirm: &mut dyn Confirm) -> Vec<Msg> {
        let mut follow_ups = Vec::new();
        for effect in effects {
            match effect {
                Effect::FetchTasks => {
                    self.engine.fetch_tasks();
                }
                Effect::CreateTask { label } => {
                    todo_info!("CreateTask label_len={}", label.len());
                    self.engine.create_task(label);
                }
                Effect::UpdateTask { ticket, label } => {
                    todo_info!("UpdateTask id={} is_done={}", ticket.id, ticket.requested());
                    self.engine
                        .update_task(ticket.id.as_str(), label, ticket.requested());
                }
                Effect::DeleteTask { id } => {
                    todo_info!("DeleteTask id={}", id);
                    self.engine.delete_task(id.as_str());
                }
                Effect::ConfirmClearAll { task_count } => {
                    let confirmed = confirm.confirm(&clear_all_prompt(task_count));
                    todo_info!("ConfirmClearAll task_count={} confirmed={}", task_count, confirmed);
                    follow_ups.push(Msg::ClearAllConfirmed(confirmed));
                }
                Effect::DeleteTasks { ids } => {
                    todo_info!("DeleteTasks count={}", ids.len());
                    self.engine
                        .delete_tasks(ids.iter().map(|id| id.as_str().to_owned()).collect());
                }
            }
        }
        follow_ups
    }

    /// Drains finished requests without blocking.
    pub fn poll(&self) -> Vec<Msg> {
        std::iter::from_fn(|| self.engine.try_recv())
            .map(map_event)
            .collect()
    }
}

fn clear_all_prompt(task_count: usize) -> String {
    format!("Delete ALL {task_count} tasks from the server?")
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::TasksFetched(result) => Msg::TasksLoaded(
            result
                .map(|tasks| tasks.into_iter().map(map_task).collect())
                .map_err(map_failure),
        ),
        EngineEvent::TaskCreated(result) => Msg::TaskCreated(result.map_err(map_failure)),
        EngineEvent::TaskUpdated {
            id,
            is_done,
            result,
        } => Msg::TaskUpdated {
            ticket: ToggleTicket {
                id: TaskId::new(id),
                previous: !is_done,
            },
            result: result.map_err(map_failure),
        },
        EngineEvent::TaskDeleted { id, result } => Msg::TaskRemoved {
            id: TaskId::new(id),
            result: result.map_err(map_failure),
        },
        EngineEvent::TasksDeleted { results } => {
            let attempted = results.len();
            let failures: Vec<(TaskId, RequestFailure)> = results
                .into_iter()
                .filter_map(|(id, result)| {
                    result.err().map(|err| (TaskId::new(id), map_failure(err)))
                })
                .collect();
            let outcome = ClearOutcome {
                attempted,
                failures,
            };
            if outcome.failures.is_empty() {
                todo_info!("Cleared {} tasks", attempted);
            } else {
                todo_warn!(
                    "Clear all deleted {} of {} tasks",
                    outcome.succeeded(),
                    attempted
                );
            }
            Msg::TasksCleared(outcome)
        }
    }
}

fn map_task(task: RemoteTask) -> Task {
    Task {
        id: TaskId::new(task.id),
        label: task.label,
        done: task.is_done,
    }
}

fn map_failure(err: ApiError) -> RequestFailure {
    match err.kind {
        FailureKind::HttpStatus(code) => RequestFailure::Status(code),
        FailureKind::InvalidResponse => RequestFailure::InvalidResponse(err.message),
        FailureKind::Network => RequestFailure::Network(err.message),
        FailureKind::InvalidUrl | FailureKind::Timeout => RequestFailure::Network(err.to_string()),
    }
}
