use crate::{ClearOutcome, RequestFailure, Task, TaskId, ToggleTicket};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the new-task input.
    InputChanged(String),
    /// User submitted the current input as a new task.
    AddSubmitted,
    /// Reload the list from the server.
    RefreshRequested,
    /// Server answered a list request.
    TasksLoaded(Result<Vec<Task>, RequestFailure>),
    /// Server answered a create request.
    TaskCreated(Result<(), RequestFailure>),
    /// User checked or unchecked a row.
    ToggleRequested(TaskId),
    /// Server answered an update request issued for `ticket`.
    TaskUpdated {
        ticket: ToggleTicket,
        result: Result<(), RequestFailure>,
    },
    /// User asked to delete a single row.
    RemoveRequested(TaskId),
    /// Server answered a delete request.
    TaskRemoved {
        id: TaskId,
        result: Result<(), RequestFailure>,
    },
    /// User clicked "clear all".
    ClearAllRequested,
    /// Answer from the confirmation prompt.
    ClearAllConfirmed(bool),
    /// All deletes of a clear-all batch have finished.
    TasksCleared(ClearOutcome),
}
