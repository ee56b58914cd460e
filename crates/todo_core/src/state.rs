use std::fmt;

use crate::view_model::{ListViewModel, TaskRowView};
use crate::RequestFailure;

/// Server-assigned task identifier. Opaque to the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub label: String,
    pub done: bool,
}

impl Task {
    pub fn new(id: impl Into<TaskId>, label: impl Into<String>, done: bool) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            done,
        }
    }
}

/// A tentative toggle applied locally, holding the done value to restore if
/// the server rejects it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleTicket {
    pub id: TaskId,
    pub previous: bool,
}

impl ToggleTicket {
    /// The done value sent to the server.
    pub fn requested(&self) -> bool {
        !self.previous
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListState {
    tasks: Vec<Task>,
    draft: String,
    loads_in_flight: usize,
    clear_in_flight: bool,
    error_message: Option<String>,
    // Set by a partially failed clear-all. Successful reloads leave the
    // report alone until every outstanding reload, including the one the
    // clear-all started, has finished.
    keep_error_on_reload: bool,
    dirty: bool,
}

impl ListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> ListViewModel {
        let loading = self.is_loading();
        let rows: Vec<TaskRowView> = self
            .tasks
            .iter()
            .map(|task| TaskRowView {
                id: task.id.clone(),
                label: task.label.clone(),
                done: task.done,
            })
            .collect();
        ListViewModel {
            done_count: rows.iter().filter(|row| row.done).count(),
            can_clear_all: !loading && !rows.is_empty(),
            can_submit: !loading,
            rows,
            draft: self.draft.clone(),
            loading,
            error_message: self.error_message.clone(),
            dirty: self.dirty,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// True while a list reload or a clear-all batch is outstanding.
    pub fn is_loading(&self) -> bool {
        self.loads_in_flight > 0 || self.clear_in_flight
    }

    pub fn is_clearing(&self) -> bool {
        self.clear_in_flight
    }

    /// Returns whether a render is pending and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_draft(&mut self, text: String) {
        if self.draft != text {
            self.draft = text;
            self.mark_dirty();
        }
    }

    pub(crate) fn begin_load(&mut self) {
        self.loads_in_flight += 1;
        self.mark_dirty();
    }

    pub(crate) fn finish_load(&mut self, result: Result<Vec<Task>, RequestFailure>) {
        self.loads_in_flight = self.loads_in_flight.saturating_sub(1);
        let keep_error = self.keep_error_on_reload;
        if self.loads_in_flight == 0 {
            self.keep_error_on_reload = false;
        }
        match result {
            Ok(tasks) => {
                self.tasks = tasks;
                if !keep_error {
                    self.error_message = None;
                }
            }
            Err(failure) => {
                self.error_message = Some(format!("Could not load tasks ({failure})"));
            }
        }
        self.mark_dirty();
    }

    /// Phase one of a toggle: flip locally and capture the previous value.
    pub(crate) fn apply_toggle(&mut self, id: &TaskId) -> Option<(ToggleTicket, String)> {
        let task = self.tasks.iter_mut().find(|task| &task.id == id)?;
        let ticket = ToggleTicket {
            id: task.id.clone(),
            previous: task.done,
        };
        task.done = ticket.requested();
        let label = task.label.clone();
        self.mark_dirty();
        Some((ticket, label))
    }

    /// Phase two on failure: restore the value captured in `ticket`.
    pub(crate) fn revert_toggle(&mut self, ticket: &ToggleTicket) {
        if let Some(task) = self.tasks.iter_mut().find(|task| task.id == ticket.id) {
            task.done = ticket.previous;
            self.mark_dirty();
        }
    }

    pub(crate) fn begin_clear(&mut self) -> Vec<TaskId> {
        self.clear_in_flight = true;
        self.mark_dirty();
        self.tasks.iter().map(|task| task.id.clone()).collect()
    }

    pub(crate) fn finish_clear(&mut self) {
        self.clear_in_flight = false;
        self.mark_dirty();
    }

    pub(crate) fn set_error(&mut self, message: String) {
        self.error_message = Some(message);
        self.keep_error_on_reload = false;
        self.mark_dirty();
    }

    /// Like `set_error`, but successful reloads leave it in place until no
    /// reload is outstanding.
    pub(crate) fn set_error_until_reload(&mut self, message: String) {
        self.error_message = Some(message);
        self.keep_error_on_reload = true;
        self.mark_dirty();
    }

    pub(crate) fn clear_error(&mut self) {
        if self.error_message.take().is_some() {
            self.mark_dirty();
        }
        self.keep_error_on_reload = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> ListState {
        let mut state = ListState::new();
        state.begin_load();
        state.finish_load(Ok(vec![Task::new("1", "a", false), Task::new("2", "b", true)]));
        state
    }

    #[test]
    fn toggle_round_trip_restores_captured_value() {
        let mut state = seeded();
        let id = TaskId::from("2");

        let (ticket, label) = state.apply_toggle(&id).expect("task exists");
        assert_eq!(label, "b");
        assert!(ticket.previous);
        assert!(!state.task(&id).unwrap().done);

        state.revert_toggle(&ticket);
        assert!(state.task(&id).unwrap().done);
    }

    #[test]
    fn overlapping_loads_keep_loading_until_last_finishes() {
        let mut state = ListState::new();
        state.begin_load();
        state.begin_load();
        state.finish_load(Ok(Vec::new()));
        assert!(state.is_loading());
        state.finish_load(Ok(Vec::new()));
        assert!(!state.is_loading());
    }

    #[test]
    fn kept_error_survives_exactly_one_reload() {
        let mut state = seeded();
        state.set_error_until_reload("boom".to_string());

        state.begin_load();
        state.finish_load(Ok(Vec::new()));
        assert_eq!(state.error_message(), Some("boom"));

        state.begin_load();
        state.finish_load(Ok(Vec::new()));
        assert_eq!(state.error_message(), None);
    }

    #[test]
    fn kept_error_outlasts_overlapping_reloads() {
        let mut state = seeded();
        state.begin_load();
        state.begin_load();
        state.set_error_until_reload("boom".to_string());

        state.finish_load(Ok(Vec::new()));
        assert_eq!(state.error_message(), Some("boom"));
        state.finish_load(Ok(Vec::new()));
        assert_eq!(state.error_message(), Some("boom"));

        state.begin_load();
        state.finish_load(Ok(Vec::new()));
        assert_eq!(state.error_message(), None);
    }

    #[test]
    fn consume_dirty_resets_flag() {
        let mut state = seeded();
        assert!(state.consume_dirty());
        assert!(!state.consume_dirty());
    }
}
