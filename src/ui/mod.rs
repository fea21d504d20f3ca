//! Terminal UI for Awase

mod diff_view;

use colored::{Color, Colorize};

pub use diff_view::{render_diff_stats, DiffView};

/// Colors for panel rows. Whether escapes are emitted at all is decided by
/// `colored::control` (`NO_COLOR`, `CLICOLOR`, tty detection or an override).
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub diff_add_fg: Color,
    pub diff_delete_fg: Color,
    pub line_number: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            diff_add_fg: Color::Green,
            diff_delete_fg: Color::Red,
            line_number: Color::BrightBlack,
        }
    }

    pub(crate) fn paint(&self, color: Option<Color>, text: &str) -> String {
        match color {
            Some(color) => text.color(color).to_string(),
            None => text.to_string(),
        }
    }

    pub(crate) fn muted(&self, text: &str) -> String {
        text.dimmed().to_string()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
