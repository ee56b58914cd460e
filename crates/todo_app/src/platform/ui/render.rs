use ratatui::layout::{Alignment, Position, Rect};
use ratatui::style::{Color, Modifier, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState as RowCursor, Paragraph, Wrap};
use ratatui::Frame;
use todo_core::{ListViewModel, TaskRowView};

use super::constants::*;
use super::layout::{centered, AppLayout};
use super::{Focus, UiState};

pub(crate) fn render(frame: &mut Frame, view: &ListViewModel, ui: &UiState) {
    let layout = AppLayout::split(frame.area());

    render_title(frame, layout.title, ui);
    render_status(frame, layout.status, view, ui);
    render_input(frame, layout.input, view, ui);
    render_list(frame, layout.list, view, ui);
    render_help(frame, layout.help, ui);
}

/// Modal prompt drawn over the main screen.
pub(crate) fn render_confirm(frame: &mut Frame, prompt: &str) {
    let area = centered(frame.area(), 52, 6);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(CONFIRM_TITLE)
        .border_style(Style::default().fg(Color::Red));
    let body = vec![
        Line::from(prompt.to_string()),
        Line::default(),
        Line::from(vec![
            Span::styled("y", Style::default().fg(Color::Yellow).bold()),
            Span::raw(" yes   "),
            Span::styled("n", Style::default().fg(Color::Yellow).bold()),
            Span::raw(" no"),
        ]),
    ];

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(body)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn render_title(frame: &mut Frame, area: Rect, ui: &UiState) {
    let title = Line::from(vec![
        Span::styled(TITLE, Style::default().bold().fg(Color::Cyan)),
        Span::raw(" | "),
        Span::styled(ui.user.as_str(), Style::default().fg(Color::Yellow)),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(title, area);
}

fn render_status(frame: &mut Frame, area: Rect, view: &ListViewModel, ui: &UiState) {
    let mut spans = Vec::new();
    if view.loading {
        spans.push(Span::styled(
            LOADING_TEXT,
            Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
        ));
        spans.push(Span::raw(" "));
    }
    match &view.error_message {
        Some(message) => spans.push(Span::styled(
            message.as_str(),
            Style::default().fg(Color::White).bg(Color::Red),
        )),
        None if !view.loading => spans.push(Span::styled(
            summary_text(view, ui),
            Style::default().fg(Color::DarkGray),
        )),
        None => {}
    }
    frame.render_widget(Line::from(spans), area);
}

fn render_input(frame: &mut Frame, area: Rect, view: &ListViewModel, ui: &UiState) {
    let focused = ui.focus == Focus::Input;
    let border = match (focused, view.can_submit) {
        (true, true) => Style::default().fg(Color::Cyan),
        (true, false) => Style::default().fg(Color::DarkGray),
        (false, _) => Style::default(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(INPUT_TITLE)
        .border_style(border);

    let text = if view.draft.is_empty() {
        Line::from(Span::styled(
            INPUT_PLACEHOLDER,
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(view.draft.as_str())
    };
    frame.render_widget(Paragraph::new(text).block(block), area);

    if focused && area.width > 2 && area.height > 2 {
        let typed = u16::try_from(view.draft.chars().count()).unwrap_or(u16::MAX);
        let x = area.x + 1 + typed.min(area.width - 3);
        frame.set_cursor_position(Position::new(x, area.y + 1));
    }
}

fn render_list(frame: &mut Frame, area: Rect, view: &ListViewModel, ui: &UiState) {
    let focused = ui.focus == Focus::List;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("{LIST_TITLE} ({})", view.rows.len()))
        .border_style(if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        });

    if view.is_empty() {
        let hint = Paragraph::new(EMPTY_HINT)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Blue))
            .block(block);
        frame.render_widget(hint, area);
        return;
    }

    let items: Vec<ListItem> = view
        .rows
        .iter()
        .map(|row| ListItem::new(format_row(row, ui.show_row_delete)))
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut cursor = RowCursor::default();
    if focused {
        cursor.select(Some(ui.selected));
    }
    frame.render_stateful_widget(list, area, &mut cursor);
}

fn render_help(frame: &mut Frame, area: Rect, ui: &UiState) {
    let mut spans = match ui.focus {
        Focus::Input => vec![key_hint("Enter", "add"), key_hint("Tab", "list")],
        Focus::List => vec![
            key_hint("Space", "toggle"),
            key_hint("c", "clear all"),
            key_hint("r", "refresh"),
            key_hint("Tab", "input"),
        ],
    };
    if ui.focus == Focus::List && ui.show_row_delete {
        spans.insert(1, key_hint("d", "delete"));
    }
    spans.push(key_hint("q", "quit"));

    let line = Line::from(spans.into_iter().flatten().collect::<Vec<_>>());
    frame.render_widget(line, area);
}

fn format_row(row: &TaskRowView, show_delete: bool) -> Line<'static> {
    let (checkbox, label_style) = if row.done {
        (
            "[x] ",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT),
        )
    } else {
        ("[ ] ", Style::default())
    };
    let mut spans = vec![
        Span::styled(checkbox, Style::default().fg(Color::Green)),
        Span::styled(row.label.clone(), label_style),
    ];
    if show_delete {
        spans.push(Span::styled("  ×", Style::default().fg(Color::Red)));
    }
    Line::from(spans)
}

fn summary_text(view: &ListViewModel, ui: &UiState) -> String {
    let counts = format!("{} tasks, {} done", view.rows.len(), view.done_count);
    match ui.last_sync {
        Some(at) => format!("{counts} | synced {}", at.format("%H:%M:%S")),
        None => counts,
    }
}

fn key_hint(key: &'static str, action: &'static str) -> [Span<'static>; 2] {
    [
        Span::styled(key, Style::default().fg(Color::Yellow).bold()),
        Span::raw(format!(" {action}  ")),
    ]
}
