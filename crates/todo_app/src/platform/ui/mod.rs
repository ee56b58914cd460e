pub(crate) mod constants;
pub(crate) mod layout;
pub(crate) mod render;

use chrono::{DateTime, Local};

/// Which widget receives typed keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Focus {
    #[default]
    Input,
    List,
}

/// Presentation-only state: focus, cursor and decorations. Task data lives in
/// `todo_core::ListState`.
#[derive(Debug, Clone, Default)]
pub(crate) struct UiState {
    pub focus: Focus,
    pub selected: usize,
    pub last_sync: Option<DateTime<Local>>,
    pub show_row_delete: bool,
    pub user: String,
}

impl UiState {
    pub fn new(user: impl Into<String>, show_row_delete: bool) -> Self {
        Self {
            user: user.into(),
            show_row_delete,
            ..Self::default()
        }
    }

    pub fn clamp_selection(&mut self, row_count: usize) {
        self.selected = self.selected.min(row_count.saturating_sub(1));
    }
}
