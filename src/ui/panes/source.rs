//! Source pane rendering with operator highlighting
//!
//! The source is shown line by line as written, including comment bytes.
//! Each operator gets a color by category and the instruction about to
//! execute is drawn in reverse video. Bytes from the terminator onward were
//! never parsed and are dimmed.

use crate::parser::program::{Op, is_terminator};
use crate::ui::panes::border_style;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

fn op_style(op: Op) -> Style {
    match op {
        Op::Increment | Op::Decrement => Style::default().fg(DEFAULT_THEME.arithmetic),
        Op::MoveLeft | Op::MoveRight => Style::default().fg(DEFAULT_THEME.movement),
        Op::Output | Op::Input => Style::default().fg(DEFAULT_THEME.io),
        Op::LoopOpen | Op::LoopClose => Style::default()
            .fg(DEFAULT_THEME.bracket)
            .add_modifier(Modifier::BOLD),
        Op::Comment(_) => Style::default().fg(DEFAULT_THEME.comment),
    }
}

fn display_char(byte: u8) -> char {
    match byte {
        b'\t' => ' ',
        0x20..=0x7E => byte as char,
        _ => '·',
    }
}

/// Scroll state for the source pane
#[derive(Debug, Default)]
pub struct SourceScrollState {
    pub offset: usize,
    /// Visual row the current line is pinned to (None = center on first render)
    pub target_line_row: Option<usize>,
}

/// Render the source pane.
///
/// `parsed_len` is the number of bytes that became instructions; `ip` is the
/// instruction about to execute, `None` once the program has halted.
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source: &[u8],
    parsed_len: usize,
    ip: Option<usize>,
    is_focused: bool,
    scroll_state: &mut SourceScrollState,
) {
    let block = Block::default()
        .title(" Source ")
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    // (line start offset, line bytes)
    let mut lines: Vec<(usize, &[u8])> = Vec::new();
    let mut start = 0;
    for (i, &byte) in source.iter().enumerate() {
        if byte == b'\n' {
            lines.push((start, &source[start..i]));
            start = i + 1;
        }
    }
    lines.push((start, &source[start..]));

    let current_line = ip.map(|ip| {
        source[..ip.min(source.len())]
            .iter()
            .filter(|&&b| b == b'\n')
            .count()
    });

    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    if scroll_state.target_line_row.is_none() {
        scroll_state.target_line_row = Some(visible_height / 2);
    }
    let target_row = scroll_state
        .target_line_row
        .unwrap_or(0)
        .min(visible_height.saturating_sub(1));
    scroll_state.target_line_row = Some(target_row);

    if let Some(line) = current_line {
        scroll_state.offset = line.saturating_sub(target_row);
    }
    scroll_state.offset = super::clamp_scroll(scroll_state.offset, lines.len(), visible_height);

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, &(line_start, bytes))| {
            let is_current = current_line == Some(idx);
            let num_style = if is_current {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            let mut spans = vec![Span::styled(format!("{:4} ", idx + 1), num_style)];
            for (col, &byte) in bytes.iter().enumerate() {
                let offset = line_start + col;
                let mut style = if offset < parsed_len {
                    op_style(Op::from_byte(byte))
                } else if offset == parsed_len && is_terminator(byte) {
                    Style::default()
                        .fg(DEFAULT_THEME.error)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                        .fg(DEFAULT_THEME.comment)
                        .add_modifier(Modifier::DIM)
                };
                if is_current {
                    style = style.bg(DEFAULT_THEME.current_line_bg);
                }
                if ip == Some(offset) {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                spans.push(Span::styled(display_char(byte).to_string(), style));
            }

            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_char() {
        assert_eq!(display_char(b'+'), '+');
        assert_eq!(display_char(b'\t'), ' ');
        assert_eq!(display_char(0), '·');
        assert_eq!(display_char(0xC0), '·');
    }
}
