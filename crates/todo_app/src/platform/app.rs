use std::collections::VecDeque;

use anyhow::Context;
use chrono::Local;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;
use todo_core::{update, ListState, ListViewModel, Msg};
use todo_logging::{todo_info, todo_warn, LogTarget};

use super::config::{self, ClientConfig};
use super::confirm::TerminalConfirm;
use super::effects::EffectRunner;
use super::ui::constants::POLL_INTERVAL;
use super::ui::{render, Focus, UiState};

pub fn run_app() -> anyhow::Result<()> {
    let config_path = config::config_path();
    let (config, config_error) = match config::load(&config_path) {
        Ok(config) => (config, None),
        Err(err) => (ClientConfig::default(), Some(err)),
    };

    todo_logging::initialize(LogTarget::File(config.log_file.clone()), config.level_filter());
    if let Some(err) = config_error {
        todo_warn!("Using default configuration: {}", err);
    }
    todo_info!(
        "Starting to-do client user={} base_url={}",
        config.user,
        config.base_url
    );

    let runner = EffectRunner::new(config.api_settings()).context("failed to start request engine")?;
    let ui = UiState::new(config.user.clone(), config.show_row_delete);

    let mut terminal = ratatui::try_init().context("failed to initialize terminal")?;
    let result = event_loop(&mut terminal, &runner, ui);
    ratatui::restore();
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    runner: &EffectRunner,
    mut ui: UiState,
) -> anyhow::Result<()> {
    let mut state = ListState::new();
    let mut inbox = VecDeque::from([Msg::RefreshRequested]);
    let mut view = state.view();
    let mut redraw = true;

    loop {
        inbox.extend(runner.poll());
        while let Some(msg) = inbox.pop_front() {
            let synced = matches!(msg, Msg::TasksLoaded(Ok(_)));
            let (next, effects) = update(std::mem::take(&mut state), msg);
            state = next;
            if synced {
                ui.last_sync = Some(Local::now());
            }
            if !effects.is_empty() {
                let backdrop = state.view();
                let mut confirm = TerminalConfirm::new(terminal, &backdrop, &ui);
                inbox.extend(runner.enqueue(effects, &mut confirm));
                // The prompt may have painted over the screen.
                redraw = true;
            }
        }

        if state.consume_dirty() || redraw {
            view = state.view();
            ui.clamp_selection(view.rows.len());
            terminal
                .draw(|frame| render::render(frame, &view, &ui))
                .context("failed to draw")?;
            redraw = false;
        }

        if !event::poll(POLL_INTERVAL).context("failed to poll terminal events")? {
            continue;
        }
        match event::read().context("failed to read terminal event")? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                match handle_key(key, &view, &mut ui) {
                    KeyAction::Send(msg) => inbox.push_back(msg),
                    KeyAction::Redraw => redraw = true,
                    KeyAction::Quit => {
                        todo_info!("Quit requested");
                        return Ok(());
                    }
                    KeyAction::Ignore => {}
                }
            }
            Event::Resize(..) => redraw = true,
            _ => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum KeyAction {
    Send(Msg),
    Redraw,
    Quit,
    Ignore,
}

fn handle_key(key: KeyEvent, view: &ListViewModel, ui: &mut UiState) -> KeyAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyAction::Quit;
    }
    if matches!(key.code, KeyCode::Tab | KeyCode::BackTab) {
        ui.focus = match ui.focus {
            Focus::Input => Focus::List,
            Focus::List => Focus::Input,
        };
        return KeyAction::Redraw;
    }

    match ui.focus {
        Focus::Input => handle_input_key(key, view, ui),
        Focus::List => handle_list_key(key, view, ui),
    }
}

fn handle_input_key(key: KeyEvent, view: &ListViewModel, ui: &mut UiState) -> KeyAction {
    match key.code {
        KeyCode::Enter if view.can_submit => KeyAction::Send(Msg::AddSubmitted),
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let mut draft = view.draft.clone();
            draft.push(ch);
            KeyAction::Send(Msg::InputChanged(draft))
        }
        KeyCode::Backspace if !view.draft.is_empty() => {
            let mut draft = view.draft.clone();
            draft.pop();
            KeyAction::Send(Msg::InputChanged(draft))
        }
        KeyCode::Esc => {
            ui.focus = Focus::List;
            KeyAction::Redraw
        }
        _ => KeyAction::Ignore,
    }
}

fn handle_list_key(key: KeyEvent, view: &ListViewModel, ui: &mut UiState) -> KeyAction {
    let selected = view.rows.get(ui.selected).map(|row| row.id.clone());
    match key.code {
        KeyCode::Up | KeyCode::Char('k') if ui.selected > 0 => {
            ui.selected -= 1;
            KeyAction::Redraw
        }
        KeyCode::Down | KeyCode::Char('j') if ui.selected + 1 < view.rows.len() => {
            ui.selected += 1;
            KeyAction::Redraw
        }
        KeyCode::Char(' ') | KeyCode::Enter => selected
            .map(|id| KeyAction::Send(Msg::ToggleRequested(id)))
            .unwrap_or(KeyAction::Ignore),
        KeyCode::Char('d') | KeyCode::Delete if ui.show_row_delete => selected
            .map(|id| KeyAction::Send(Msg::RemoveRequested(id)))
            .unwrap_or(KeyAction::Ignore),
        KeyCode::Char('c') if view.can_clear_all => KeyAction::Send(Msg::ClearAllRequested),
        KeyCode::Char('r') => KeyAction::Send(Msg::RefreshRequested),
        KeyCode::Char('a') | KeyCode::Char('i') => {
            ui.focus = Focus::Input;
            KeyAction::Redraw
        }
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        _ => KeyAction::Ignore,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use todo_core::{TaskId, TaskRowView};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn two_rows() -> ListViewModel {
        ListViewModel {
            rows: vec![
                TaskRowView {
                    id: TaskId::from("1"),
                    label: "a".to_string(),
                    done: false,
                },
                TaskRowView {
                    id: TaskId::from("2"),
                    label: "b".to_string(),
                    done: true,
                },
            ],
            can_submit: true,
            can_clear_all: true,
            ..ListViewModel::default()
        }
    }

    fn list_ui(show_row_delete: bool) -> UiState {
        let mut ui = UiState::new("sam", show_row_delete);
        ui.focus = Focus::List;
        ui
    }

    #[test]
    fn typing_extends_draft_and_enter_submits() {
        let mut view = two_rows();
        view.draft = "bu".to_string();
        let mut ui = UiState::new("sam", false);

        assert_eq!(
            handle_key(press(KeyCode::Char('y')), &view, &mut ui),
            KeyAction::Send(Msg::InputChanged("buy".to_string()))
        );
        assert_eq!(
            handle_key(press(KeyCode::Backspace), &view, &mut ui),
            KeyAction::Send(Msg::InputChanged("b".to_string()))
        );
        assert_eq!(
            handle_key(press(KeyCode::Enter), &view, &mut ui),
            KeyAction::Send(Msg::AddSubmitted)
        );
    }

    #[test]
    fn enter_ignored_while_loading() {
        let mut view = two_rows();
        view.can_submit = false;
        let mut ui = UiState::new("sam", false);

        assert_eq!(
            handle_key(press(KeyCode::Enter), &view, &mut ui),
            KeyAction::Ignore
        );
    }

    #[test]
    fn space_toggles_selected_row() {
        let view = two_rows();
        let mut ui = list_ui(false);

        assert_eq!(handle_key(press(KeyCode::Down), &view, &mut ui), KeyAction::Redraw);
        assert_eq!(
            handle_key(press(KeyCode::Char(' ')), &view, &mut ui),
            KeyAction::Send(Msg::ToggleRequested(TaskId::from("2")))
        );
        // Already on the last row.
        assert_eq!(handle_key(press(KeyCode::Down), &view, &mut ui), KeyAction::Ignore);
    }

    #[test]
    fn delete_key_requires_opt_in() {
        let view = two_rows();

        let mut ui = list_ui(false);
        assert_eq!(
            handle_key(press(KeyCode::Char('d')), &view, &mut ui),
            KeyAction::Ignore
        );

        let mut ui = list_ui(true);
        assert_eq!(
            handle_key(press(KeyCode::Char('d')), &view, &mut ui),
            KeyAction::Send(Msg::RemoveRequested(TaskId::from("1")))
        );
    }

    #[test]
    fn clear_all_key_follows_view_gate() {
        let mut view = two_rows();
        let mut ui = list_ui(false);
        assert_eq!(
            handle_key(press(KeyCode::Char('c')), &view, &mut ui),
            KeyAction::Send(Msg::ClearAllRequested)
        );

        view.can_clear_all = false;
        assert_eq!(
            handle_key(press(KeyCode::Char('c')), &view, &mut ui),
            KeyAction::Ignore
        );
    }

    #[test]
    fn tab_switches_focus_and_ctrl_c_quits() {
        let view = two_rows();
        let mut ui = UiState::new("sam", false);

        assert_eq!(handle_key(press(KeyCode::Tab), &view, &mut ui), KeyAction::Redraw);
        assert_eq!(ui.focus, Focus::List);
        assert_eq!(
            handle_key(
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
                &view,
                &mut ui
            ),
            KeyAction::Quit
        );
    }
}
