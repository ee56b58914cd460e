use ratatui::crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::DefaultTerminal;
use todo_core::ListViewModel;
use todo_logging::todo_warn;

use super::ui::{render, UiState};

/// Asks the user a yes/no question before a destructive action.
pub(crate) trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Modal prompt over the current screen; blocks until the user answers.
pub(crate) struct TerminalConfirm<'a> {
    terminal: &'a mut DefaultTerminal,
    backdrop: &'a ListViewModel,
    ui: &'a UiState,
}

impl<'a> TerminalConfirm<'a> {
    pub fn new(terminal: &'a mut DefaultTerminal, backdrop: &'a ListViewModel, ui: &'a UiState) -> Self {
        Self {
            terminal,
            backdrop,
            ui,
        }
    }
}

impl Confirm for TerminalConfirm<'_> {
    fn confirm(&mut self, prompt: &str) -> bool {
        let (backdrop, ui) = (self.backdrop, self.ui);
        loop {
            let drawn = self.terminal.draw(|frame| {
                render::render(frame, backdrop, ui);
                render::render_confirm(frame, prompt);
            });
            if let Err(err) = drawn {
                todo_warn!("Could not draw confirmation prompt: {}", err);
                return false;
            }

            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('y' | 'Y') => return true,
                    KeyCode::Char('n' | 'N') | KeyCode::Esc => return false,
                    _ => {}
                },
                // Resize and other events just redraw.
                Ok(_) => {}
                Err(err) => {
                    todo_warn!("Could not read confirmation answer: {}", err);
                    return false;
                }
            }
        }
    }
}
