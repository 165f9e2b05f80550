//! TUI pane rendering modules
//!
//! - [`source`]: program source with the current instruction highlighted
//! - [`tape`]: tape cells with the head marked
//! - [`output`]: bytes written so far, decoded one byte per character
//! - [`status`]: status bar with keybindings and execution state
//!
//! Each pane module exports a `render_*` function that draws from borrowed
//! state plus a scroll offset owned by the [`App`](crate::ui::App).

pub mod output;
pub mod source;
pub mod status;
pub mod tape;

pub use output::render_output_pane;
pub use source::render_source_pane;
pub use status::render_status_bar;
pub use tape::render_tape_pane;

use crate::ui::theme::DEFAULT_THEME;
use ratatui::style::{Modifier, Style};

pub(crate) fn border_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    }
}

/// Clamp `offset` so that a window of `visible` rows over `total` rows stays
/// in range
pub(crate) fn clamp_scroll(offset: usize, total: usize, visible: usize) -> usize {
    if total > visible {
        offset.min(total - visible)
    } else {
        0
    }
}
