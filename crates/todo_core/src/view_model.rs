use crate::TaskId;

/// Render-ready projection of `ListState`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListViewModel {
    pub rows: Vec<TaskRowView>,
    pub draft: String,
    pub loading: bool,
    pub error_message: Option<String>,
    /// The add form accepts submissions.
    pub can_submit: bool,
    /// "Clear all" is enabled: idle and something to delete.
    pub can_clear_all: bool,
    pub done_count: usize,
    pub dirty: bool,
}

impl ListViewModel {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRowView {
    pub id: TaskId,
    pub label: String,
    pub done: bool,
}
