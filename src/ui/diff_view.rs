//! Side-by-side panel rendering for the terminal
//!
//! Each panel lists its own render lines top to bottom, the way the two
//! scrolling columns of the diff view do. Rows are padded by display width so
//! wide characters keep the divider aligned.

use crate::config::DiffSettings;
use crate::diff::{DiffStats, RenderLine};
use crate::ui::Theme;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const DIVIDER: &str = " │ ";
const LINE_NUMBER_WIDTH: usize = 5;
const TAB_WIDTH: usize = 4;
const MIN_CONTENT_WIDTH: usize = 8;

pub struct DiffView {
    panel_width: usize,
    show_line_numbers: bool,
    show_whitespace: bool,
    word_wrap: bool,
    theme: Theme,
}

impl DiffView {
    pub fn new(settings: &DiffSettings, panel_width: usize, theme: Theme) -> Self {
        Self {
            panel_width,
            show_line_numbers: settings.show_line_numbers,
            show_whitespace: settings.show_whitespace,
            word_wrap: settings.word_wrap,
            theme,
        }
    }

    fn gutter_width(&self) -> usize {
        if self.show_line_numbers {
            LINE_NUMBER_WIDTH + 3
        } else {
            2
        }
    }

    fn content_width(&self) -> usize {
        self.panel_width
            .saturating_sub(self.gutter_width())
            .max(MIN_CONTENT_WIDTH)
    }

    /// Rows for one panel, each padded to the panel width.
    pub fn render_panel(&self, lines: &[RenderLine]) -> Vec<String> {
        let mut rows = Vec::with_capacity(lines.len());
        let content_width = self.content_width();

        for line in lines {
            let text = self.visible_text(&line.content);
            let chunks = if self.word_wrap {
                wrap(&text, content_width)
            } else {
                vec![truncate(&text, content_width)]
            };

            let (marker, color) = if line.is_added {
                ("+", Some(self.theme.diff_add_fg))
            } else if line.is_removed {
                ("-", Some(self.theme.diff_delete_fg))
            } else {
                (" ", None)
            };

            for (i, chunk) in chunks.iter().enumerate() {
                let gutter = if i > 0 {
                    " ".repeat(self.gutter_width())
                } else if self.show_line_numbers {
                    let number = format!(
                        "{:>width$}",
                        line.own_line_number().unwrap_or(line.display_line_number),
                        width = LINE_NUMBER_WIDTH
                    );
                    format!("{} {} ", self.theme.paint(Some(self.theme.line_number), &number), marker)
                } else {
                    format!("{} ", marker)
                };
                rows.push(format!(
                    "{}{}",
                    gutter,
                    self.theme.paint(color, &pad(chunk, content_width))
                ));
            }
        }

        rows
    }

    /// Both panels next to each other. The shorter panel is padded with blank rows.
    pub fn render(&self, left: &[RenderLine], right: &[RenderLine]) -> String {
        let left_rows = self.render_panel(left);
        let right_rows = self.render_panel(right);
        let blank = " ".repeat(self.gutter_width() + self.content_width());

        let height = left_rows.len().max(right_rows.len());
        let mut out = String::new();
        for i in 0..height {
            let l = left_rows.get(i).unwrap_or(&blank);
            let r = right_rows.get(i).map(String::as_str).unwrap_or("");
            out.push_str(l);
            out.push_str(DIVIDER);
            out.push_str(r.trim_end());
            out.push('\n');
        }
        out
    }

    fn visible_text(&self, content: &str) -> String {
        let mut text = String::with_capacity(content.len());
        for c in content.chars() {
            match c {
                '\t' if self.show_whitespace => {
                    text.push('→');
                    text.push_str(&" ".repeat(TAB_WIDTH - 1));
                }
                '\t' => text.push_str(&" ".repeat(TAB_WIDTH)),
                ' ' if self.show_whitespace => text.push('·'),
                '\r' => {}
                c => text.push(c),
            }
        }
        text
    }
}

fn pad(text: &str, width: usize) -> String {
    let used = text.width();
    if used >= width {
        text.to_string()
    } else {
        format!("{}{}", text, " ".repeat(width - used))
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width.saturating_sub(1) {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            used = 0;
        }
        current.push(c);
        used += w;
    }
    chunks.push(current);
    chunks
}

pub fn render_diff_stats(stats: &DiffStats, theme: &Theme) -> String {
    format!(
        "{} {} {}",
        theme.paint(Some(theme.diff_add_fg), &format!("+{}", stats.added_lines)),
        theme.paint(Some(theme.diff_delete_fg), &format!("-{}", stats.removed_lines)),
        theme.muted(&format!(
            "~{} changes · {} lines · {}% similar",
            stats.changed_lines, stats.total_lines, stats.similarity
        )),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{project, DiffPart, Side};
    use pretty_assertions::assert_eq;

    fn view(settings: DiffSettings, width: usize) -> DiffView {
        colored::control::set_override(false);
        DiffView::new(&settings, width, Theme::dark())
    }

    fn parts() -> Vec<DiffPart> {
        vec![
            DiffPart::equal("a\n"),
            DiffPart::removed("b\n"),
            DiffPart::added("x\n"),
            DiffPart::equal("c"),
        ]
    }

    #[test]
    fn test_panel_rows() {
        let rows = view(DiffSettings::default(), 20).render_panel(&project(&parts(), Side::Left));
        assert_eq!(
            rows,
            vec![
                "    1   a           ".to_string(),
                "    2 - b           ".to_string(),
                "    3   c           ".to_string(),
            ]
        );
    }

    #[test]
    fn test_without_line_numbers() {
        let settings = DiffSettings {
            show_line_numbers: false,
            ..DiffSettings::default()
        };
        let rows = view(settings, 12).render_panel(&project(&parts(), Side::Right));
        assert_eq!(rows[1], "+ x         ");
    }

    #[test]
    fn test_show_whitespace() {
        let lines = project(&[DiffPart::equal(" \tz")], Side::Left);
        let shown = view(DiffSettings::default(), 20).render_panel(&lines);
        assert!(shown[0].contains("·→   z"));

        let hidden = view(
            DiffSettings {
                show_whitespace: false,
                ..DiffSettings::default()
            },
            20,
        )
        .render_panel(&lines);
        assert!(hidden[0].contains("      z"));
    }

    #[test]
    fn test_truncate_and_wrap() {
        let lines = project(&[DiffPart::equal("abcdefghijklmnop")], Side::Left);
        let truncated = view(DiffSettings::default(), 18).render_panel(&lines);
        assert_eq!(truncated, vec!["    1   abcdefghi…".to_string()]);

        let wrapped = view(
            DiffSettings {
                word_wrap: true,
                ..DiffSettings::default()
            },
            18,
        )
        .render_panel(&lines);
        assert_eq!(
            wrapped,
            vec![
                "    1   abcdefghij".to_string(),
                "        klmnop    ".to_string(),
            ]
        );
    }

    #[test]
    fn test_wide_characters_keep_alignment() {
        assert_eq!(pad("日本", 6), "日本  ");
        assert_eq!(truncate("日本語テキスト", 7), "日本語…");
        assert_eq!(wrap("日本語", 4), vec!["日本".to_string(), "語".to_string()]);
    }

    #[test]
    fn test_side_by_side_height() {
        let parts = vec![DiffPart::equal("a\n"), DiffPart::added("b\nc\n")];
        let v = view(DiffSettings::default(), 16);
        let out = v.render(&project(&parts, Side::Left), &project(&parts, Side::Right));
        let rows: Vec<&str> = out.lines().collect();
        assert_eq!(rows.len(), 3);
        assert!(rows[2].starts_with(&" ".repeat(16)));
        assert!(rows[2].ends_with("+ c"));
    }

    #[test]
    fn test_stats_line() {
        let stats = DiffStats {
            added_lines: 1,
            removed_lines: 1,
            changed_lines: 2,
            total_lines: 3,
            similarity: 33,
        };
        colored::control::set_override(false);
        assert_eq!(
            render_diff_stats(&stats, &Theme::dark()),
            "+1 -1 ~2 changes · 3 lines · 33% similar"
        );
    }
}
