use ratatui::layout::{Constraint, Flex, Layout, Rect};

use super::constants::MAX_COLUMN_WIDTH;

/// Regions of the main screen, top to bottom.
pub(crate) struct AppLayout {
    pub title: Rect,
    pub status: Rect,
    pub input: Rect,
    pub list: Rect,
    pub help: Rect,
}

impl AppLayout {
    pub fn split(area: Rect) -> Self {
        let width = MAX_COLUMN_WIDTH.min(area.width);
        let [column] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(area);
        let [title, status, input, list, help] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(column);

        Self {
            title,
            status,
            input,
            list,
            help,
        }
    }
}

/// A `width` x `height` box centered in `area`, shrunk to fit.
pub(crate) fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_is_capped_and_centered() {
        let layout = AppLayout::split(Rect::new(0, 0, 120, 30));
        assert_eq!(layout.list.width, MAX_COLUMN_WIDTH);
        assert_eq!(layout.list.x, (120 - MAX_COLUMN_WIDTH) / 2);
        assert_eq!(layout.input.height, 3);
        assert_eq!(layout.help.y, 29);
    }

    #[test]
    fn centered_box_fits_small_area() {
        let area = Rect::new(0, 0, 20, 4);
        let popup = centered(area, 50, 5);
        assert_eq!((popup.width, popup.height), (20, 4));
    }
}
