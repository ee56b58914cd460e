use std::time::Duration;

pub const TITLE: &str = "To Do List";
pub const INPUT_TITLE: &str = "New task";
pub const INPUT_PLACEHOLDER: &str = "Type a task and press Enter";
pub const LIST_TITLE: &str = "Tasks";
pub const EMPTY_HINT: &str = "No tasks yet. Add one above.";
pub const LOADING_TEXT: &str = "Loading…";
pub const CONFIRM_TITLE: &str = "Clear all";

/// Widest the main column grows on large terminals.
pub const MAX_COLUMN_WIDTH: u16 = 72;
/// Key polling interval; engine completions are drained at the same pace.
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);
