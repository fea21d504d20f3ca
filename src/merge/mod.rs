//! Single-line merge between the two panels
//!
//! A merge takes one clicked render line and pushes it across to the other
//! panel. The clicked line is always resolved against a fresh projection of
//! the current parts, and the result replaces exactly one side's text with an
//! edit of at most one line.

use crate::diff::{join_text_lines, project, split_text_lines, DiffPart, RenderLine, Side};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    #[error("No {side} line at index {index} ({available} lines shown)")]
    LineNotFound {
        side: Side,
        index: usize,
        available: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeDirection {
    LeftToRight,
    RightToLeft,
}

impl MergeDirection {
    /// The side whose text is replaced.
    pub fn target(self) -> Side {
        match self {
            MergeDirection::LeftToRight => Side::Right,
            MergeDirection::RightToLeft => Side::Left,
        }
    }
}

/// A click on a rendered line, identified by its position in the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeRequest {
    pub side: Side,
    /// 0-based index into the side's render lines
    pub line_index: usize,
    pub direction: MergeDirection,
}

/// Edit applied to the target text. Indices are 0-based line positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEdit {
    Overwrite { index: usize, content: String },
    Insert { index: usize, content: String },
    Delete { index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub target: Side,
    /// Full replacement text for `target`
    pub text: String,
    /// `None` when nothing changed
    pub edit: Option<LineEdit>,
}

impl MergeOutcome {
    fn unchanged(target: Side, text: &str) -> Self {
        Self {
            target,
            text: text.to_string(),
            edit: None,
        }
    }

    pub fn is_noop(&self) -> bool {
        self.edit.is_none()
    }
}

/// Resolve `request` against the current parts and apply it.
pub fn merge(
    parts: &[DiffPart],
    original: &str,
    modified: &str,
    request: MergeRequest,
) -> Result<MergeOutcome, MergeError> {
    let lines = project(parts, request.side);
    let clicked = lines
        .get(request.line_index)
        .ok_or_else(|| MergeError::LineNotFound {
            side: request.side,
            index: request.line_index,
            available: lines.len(),
        })?;
    Ok(merge_line(parts, original, modified, clicked, request.direction))
}

/// Push `clicked` across in `direction`.
pub fn merge_line(
    parts: &[DiffPart],
    original: &str,
    modified: &str,
    clicked: &RenderLine,
    direction: MergeDirection,
) -> MergeOutcome {
    let target = direction.target();
    let target_text = match target {
        Side::Left => original,
        Side::Right => modified,
    };

    let edit = match direction {
        MergeDirection::LeftToRight if clicked.is_removed => {
            let right = project(parts, Side::Right);
            let index = CounterpartIndex::by_original(&right);
            Some(carry_over(
                clicked,
                clicked.original_line_number,
                index.find(clicked.original_line_number),
                |line| line.modified_line_number,
            ))
        }
        MergeDirection::LeftToRight if clicked.is_added => {
            Some(PlannedEdit::Delete(clicked.modified_line_number))
        }
        MergeDirection::RightToLeft if clicked.is_added => {
            let left = project(parts, Side::Left);
            let index = CounterpartIndex::by_modified(&left);
            Some(carry_over(
                clicked,
                clicked.modified_line_number,
                index.find(clicked.modified_line_number),
                |line| line.original_line_number,
            ))
        }
        MergeDirection::RightToLeft if clicked.is_removed => {
            Some(PlannedEdit::Delete(clicked.original_line_number))
        }
        _ => None,
    };

    let Some(edit) = edit else {
        tracing::debug!("Ignoring merge of unchanged line {}", clicked.display_line_number);
        return MergeOutcome::unchanged(target, target_text);
    };

    let mut lines = split_text_lines(target_text);
    match edit.apply(&mut lines) {
        Some(applied) => {
            tracing::info!(side = target.label(), edit = ?applied, "Merged line");
            MergeOutcome {
                target,
                text: join_text_lines(&lines),
                edit: Some(applied),
            }
        }
        None => {
            tracing::warn!(side = target.label(), edit = ?edit, "Merge position out of range");
            MergeOutcome::unchanged(target, target_text)
        }
    }
}

/// Overwrite the aligned counterpart if there is one, otherwise insert at the
/// clicked line's own position.
fn carry_over(
    clicked: &RenderLine,
    position: Option<usize>,
    counterpart: Option<&RenderLine>,
    counterpart_number: impl Fn(&RenderLine) -> Option<usize>,
) -> PlannedEdit {
    match counterpart.and_then(counterpart_number) {
        Some(number) => PlannedEdit::Overwrite(number.saturating_sub(1), clicked.content.clone()),
        None => PlannedEdit::Insert(position, clicked.content.clone()),
    }
}

/// Edit before it is checked against the target's line list.
#[derive(Debug)]
enum PlannedEdit {
    Overwrite(usize, String),
    /// 1-based position; `None` appends
    Insert(Option<usize>, String),
    /// 1-based position; `None` removes the last line
    Delete(Option<usize>),
}

impl PlannedEdit {
    fn apply(&self, lines: &mut Vec<String>) -> Option<LineEdit> {
        match self {
            PlannedEdit::Overwrite(index, content) => {
                let slot = lines.get_mut(*index)?;
                *slot = content.clone();
                Some(LineEdit::Overwrite {
                    index: *index,
                    content: content.clone(),
                })
            }
            PlannedEdit::Insert(position, content) => {
                let index = position
                    .map(|n| n.saturating_sub(1))
                    .unwrap_or(lines.len())
                    .min(lines.len());
                lines.insert(index, content.clone());
                Some(LineEdit::Insert {
                    index,
                    content: content.clone(),
                })
            }
            PlannedEdit::Delete(position) => {
                let index = match position {
                    Some(n) => n.saturating_sub(1),
                    None => lines.len().checked_sub(1)?,
                };
                if index >= lines.len() {
                    return None;
                }
                lines.remove(index);
                Some(LineEdit::Delete { index })
            }
        }
    }
}

/// Lookup of render lines by a cross-side line number. First line wins.
struct CounterpartIndex<'a> {
    by_number: HashMap<usize, &'a RenderLine>,
}

impl<'a> CounterpartIndex<'a> {
    fn build(lines: &'a [RenderLine], key: impl Fn(&RenderLine) -> Option<usize>) -> Self {
        let mut by_number = HashMap::with_capacity(lines.len());
        for line in lines {
            if let Some(number) = key(line) {
                by_number.entry(number).or_insert(line);
            }
        }
        Self { by_number }
    }

    fn by_original(lines: &'a [RenderLine]) -> Self {
        Self::build(lines, |l| l.original_line_number)
    }

    fn by_modified(lines: &'a [RenderLine]) -> Self {
        Self::build(lines, |l| l.modified_line_number)
    }

    fn find(&self, number: Option<usize>) -> Option<&'a RenderLine> {
        number.and_then(|n| self.by_number.get(&n).copied())
    }
}
