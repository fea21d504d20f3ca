//! Line diff calculation using the similar crate
//!
//! Produces runs of equal/added/removed lines ("parts"). Every other component
//! works on the part sequence: the projector turns it into per-side render
//! lines, the stats aggregator summarises it and the merge engine resolves
//! clicked lines against it.

mod project;
mod stats;

pub use project::{project, RenderLine};
pub use stats::{aggregate, DiffStats};

use crate::config::DiffSettings;
use similar::{capture_diff_slices, Algorithm, DiffTag};
use std::borrow::Cow;
use std::fmt;

/// Panel side. Left holds the original text, right the modified text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn label(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartKind {
    Equal,
    Added,
    Removed,
}

/// A run of consecutive lines sharing the same change kind.
///
/// `value` keeps the line terminators, so concatenating the values of all
/// non-removed parts yields the modified text and concatenating the values of
/// all non-added parts yields the original text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffPart {
    pub value: String,
    pub kind: PartKind,
}

impl DiffPart {
    pub fn new(kind: PartKind, value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            kind,
        }
    }

    pub fn equal(value: impl Into<String>) -> Self {
        Self::new(PartKind::Equal, value)
    }

    pub fn added(value: impl Into<String>) -> Self {
        Self::new(PartKind::Added, value)
    }

    pub fn removed(value: impl Into<String>) -> Self {
        Self::new(PartKind::Removed, value)
    }

    pub fn is_added(&self) -> bool {
        self.kind == PartKind::Added
    }

    pub fn is_removed(&self) -> bool {
        self.kind == PartKind::Removed
    }

    pub fn is_equal(&self) -> bool {
        self.kind == PartKind::Equal
    }

    /// Whether this part is shown in the panel for `side`.
    pub fn is_visible_on(&self, side: Side) -> bool {
        match side {
            Side::Left => !self.is_added(),
            Side::Right => !self.is_removed(),
        }
    }

    pub fn lines(&self) -> Vec<&str> {
        split_part_lines(&self.value)
    }
}

/// Compute the line diff between `original` and `modified`.
///
/// Removed runs always precede the added run they are paired with. When
/// `ignore_whitespace` or `ignore_case` is set, lines are compared on a
/// normalised key and equal runs carry the modified text's lines.
pub fn compute_diff(original: &str, modified: &str, settings: &DiffSettings) -> Vec<DiffPart> {
    let old_lines: Vec<&str> = original.split_inclusive('\n').collect();
    let new_lines: Vec<&str> = modified.split_inclusive('\n').collect();

    let old_keys: Vec<Cow<'_, str>> = old_lines.iter().map(|l| line_key(l, settings)).collect();
    let new_keys: Vec<Cow<'_, str>> = new_lines.iter().map(|l| line_key(l, settings)).collect();

    let mut parts: Vec<DiffPart> = Vec::new();
    for op in capture_diff_slices(Algorithm::Myers, &old_keys, &new_keys) {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        match tag {
            DiffTag::Equal => push_run(&mut parts, PartKind::Equal, &new_lines[new_range]),
            DiffTag::Delete => push_run(&mut parts, PartKind::Removed, &old_lines[old_range]),
            DiffTag::Insert => push_run(&mut parts, PartKind::Added, &new_lines[new_range]),
            DiffTag::Replace => {
                push_run(&mut parts, PartKind::Removed, &old_lines[old_range]);
                push_run(&mut parts, PartKind::Added, &new_lines[new_range]);
            }
        }
    }

    tracing::debug!(
        parts = parts.len(),
        old_lines = old_lines.len(),
        new_lines = new_lines.len(),
        "computed line diff"
    );
    parts
}

fn line_key<'a>(line: &'a str, settings: &DiffSettings) -> Cow<'a, str> {
    let line = if settings.ignore_whitespace {
        line.trim()
    } else {
        line
    };
    if settings.ignore_case {
        Cow::Owned(line.to_lowercase())
    } else {
        Cow::Borrowed(line)
    }
}

fn push_run(parts: &mut Vec<DiffPart>, kind: PartKind, lines: &[&str]) {
    if lines.is_empty() {
        return;
    }
    match parts.last_mut() {
        Some(last) if last.kind == kind => last.value.extend(lines.iter().copied()),
        _ => parts.push(DiffPart::new(kind, lines.concat())),
    }
}

/// Split a part value into display lines.
///
/// The segment after a terminating newline is not a line, but empty lines
/// inside the value (including a value that is just `"\n"`) are kept.
pub fn split_part_lines(value: &str) -> Vec<&str> {
    let mut segments: Vec<&str> = value.split('\n').collect();
    if segments.len() > 1 && segments.last() == Some(&"") {
        segments.pop();
    } else if value.is_empty() {
        segments.clear();
    }
    segments
}

/// Split a whole panel text into editable lines. `""` is a single empty line.
pub fn split_text_lines(text: &str) -> Vec<String> {
    text.split('\n').map(str::to_owned).collect()
}

pub fn join_text_lines(lines: &[String]) -> String {
    lines.join("\n")
}

/// Number of newline-separated segments; an empty text counts as one line.
pub fn line_count(text: &str) -> usize {
    text.split('\n').count()
}
