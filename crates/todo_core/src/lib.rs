//! To-do core: pure task-list controller and view-model helpers.
mod effect;
mod msg;
mod outcome;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use outcome::{ClearOutcome, RequestFailure};
pub use state::{ListState, Task, TaskId, ToggleTicket};
pub use update::update;
pub use view_model::{ListViewModel, TaskRowView};
