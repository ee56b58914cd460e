use crate::{TaskId, ToggleTicket};

/// Side effects requested by `update`; executed by the platform layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Load the full task collection for the configured user.
    FetchTasks,
    CreateTask { label: String },
    /// Push the tentative done value from `ticket` to the server.
    UpdateTask { ticket: ToggleTicket, label: String },
    DeleteTask { id: TaskId },
    /// Ask the user before wiping the list. Answered with `Msg::ClearAllConfirmed`.
    ConfirmClearAll { task_count: usize },
    /// Delete every id concurrently and report all results together.
    DeleteTasks { ids: Vec<TaskId> },
}
