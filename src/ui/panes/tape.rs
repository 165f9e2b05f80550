//! Tape pane rendering
//!
//! One row per cell: index, signed value, low byte in hex and as a
//! character. The head is marked and kept in view.

use crate::memory::tape::Cell;
use crate::ui::panes::{border_style, clamp_scroll};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

fn printable(byte: u8) -> String {
    if (0x20..=0x7E).contains(&byte) {
        format!("'{}'", byte as char)
    } else {
        String::from("   ")
    }
}

#[allow(clippy::too_many_arguments)]
pub fn render_tape_pane(
    frame: &mut Frame,
    area: Rect,
    cells: &[Cell],
    head: usize,
    limit: usize,
    is_focused: bool,
    scroll_offset: &mut usize,
    follow_head: bool,
) {
    let block = Block::default()
        .title(format!(" Tape {}/{} ", cells.len(), limit))
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    if follow_head {
        if head < *scroll_offset {
            *scroll_offset = head;
        } else if head >= *scroll_offset + visible_height {
            *scroll_offset = head + 1 - visible_height;
        }
    }
    *scroll_offset = clamp_scroll(*scroll_offset, cells.len(), visible_height);

    let items: Vec<ListItem> = cells
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, &value)| {
            let is_head = idx == head;
            let marker = if is_head { "▶ " } else { "  " };
            let low = value as u8;

            let value_style = if value == 0 {
                Style::default().fg(DEFAULT_THEME.comment)
            } else {
                Style::default().fg(DEFAULT_THEME.fg)
            };

            let mut line = Line::from(vec![
                Span::styled(marker, Style::default().fg(DEFAULT_THEME.head)),
                Span::styled(format!("[{:3}] ", idx), Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(format!("{:>11} ", value), value_style),
                Span::styled(format!("0x{:02x} ", low), Style::default().fg(DEFAULT_THEME.primary)),
                Span::styled(printable(low), Style::default().fg(DEFAULT_THEME.secondary)),
            ]);

            if is_head {
                line = line.style(
                    Style::default()
                        .bg(DEFAULT_THEME.current_line_bg)
                        .add_modifier(Modifier::BOLD),
                );
            }

            ListItem::new(line)
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_printable() {
        assert_eq!(printable(b'A'), "'A'");
        assert_eq!(printable(b'\n'), "   ");
    }
}
