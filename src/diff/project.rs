//! Projection of diff parts onto one panel

use super::{DiffPart, Side};

/// One line as shown in a panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderLine {
    /// Line text without its terminator
    pub content: String,
    /// 1-based position among the lines shown on this side
    pub display_line_number: usize,
    /// Set on left-side lines only
    pub original_line_number: Option<usize>,
    /// Set on right-side lines only
    pub modified_line_number: Option<usize>,
    pub is_added: bool,
    pub is_removed: bool,
    /// Index of the part this line came from
    pub part_index: usize,
    /// Index of this line within its part
    pub intra_part_line_index: usize,
}

impl RenderLine {
    pub fn is_changed(&self) -> bool {
        self.is_added || self.is_removed
    }

    /// Line number on the side this line belongs to.
    pub fn own_line_number(&self) -> Option<usize> {
        self.original_line_number.or(self.modified_line_number)
    }
}

/// Running counters threaded through the projection.
///
/// Both the original and the modified counter advance on every pass, so the
/// numbers emitted on one side agree with what the other side's projection
/// computes for the same position.
#[derive(Debug, Default)]
struct Counters {
    display: usize,
    original: usize,
    modified: usize,
}

impl Counters {
    fn advance(&mut self, part: &DiffPart) {
        if !part.is_added() {
            self.original += 1;
        }
        if !part.is_removed() {
            self.modified += 1;
        }
    }
}

/// Build the render lines for `side` from a part sequence.
pub fn project(parts: &[DiffPart], side: Side) -> Vec<RenderLine> {
    let (lines, counters) = parts.iter().enumerate().fold(
        (Vec::new(), Counters::default()),
        |(mut lines, mut counters), (part_index, part)| {
            let visible = part.is_visible_on(side);
            for (intra_part_line_index, content) in part.lines().into_iter().enumerate() {
                if visible {
                    lines.push(RenderLine {
                        content: content.to_string(),
                        display_line_number: counters.display + 1,
                        original_line_number: (side == Side::Left)
                            .then_some(counters.original + 1),
                        modified_line_number: (side == Side::Right)
                            .then_some(counters.modified + 1),
                        is_added: part.is_added(),
                        is_removed: part.is_removed(),
                        part_index,
                        intra_part_line_index,
                    });
                    counters.display += 1;
                }
                counters.advance(part);
            }
            (lines, counters)
        },
    );

    debug_assert_eq!(lines.len(), counters.display);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DiffSettings;
    use crate::diff::compute_diff;
    use pretty_assertions::assert_eq;

    fn single_change_parts() -> Vec<DiffPart> {
        vec![
            DiffPart::equal("a\n"),
            DiffPart::removed("b\n"),
            DiffPart::added("x\n"),
            DiffPart::equal("c"),
        ]
    }

    fn summary(lines: &[RenderLine]) -> Vec<(&str, Option<usize>, Option<usize>, bool, bool)> {
        lines
            .iter()
            .map(|l| {
                (
                    l.content.as_str(),
                    l.original_line_number,
                    l.modified_line_number,
                    l.is_added,
                    l.is_removed,
                )
            })
            .collect()
    }

    #[test]
    fn test_left_projection() {
        let left = project(&single_change_parts(), Side::Left);
        assert_eq!(
            summary(&left),
            vec![
                ("a", Some(1), None, false, false),
                ("b", Some(2), None, false, true),
                ("c", Some(3), None, false, false),
            ]
        );
        let display: Vec<usize> = left.iter().map(|l| l.display_line_number).collect();
        assert_eq!(display, vec![1, 2, 3]);
    }

    #[test]
    fn test_right_projection() {
        let right = project(&single_change_parts(), Side::Right);
        assert_eq!(
            summary(&right),
            vec![
                ("a", None, Some(1), false, false),
                ("x", None, Some(2), true, false),
                ("c", None, Some(3), false, false),
            ]
        );
    }

    #[test]
    fn test_part_indices() {
        let right = project(&single_change_parts(), Side::Right);
        let indices: Vec<(usize, usize)> = right
            .iter()
            .map(|l| (l.part_index, l.intra_part_line_index))
            .collect();
        assert_eq!(indices, vec![(0, 0), (2, 0), (3, 0)]);
    }

    #[test]
    fn test_multi_line_parts() {
        let parts = vec![
            DiffPart::removed("one\ntwo\nthree\n"),
            DiffPart::added("uno\n"),
            DiffPart::equal("same\n\n"),
        ];
        let left = project(&parts, Side::Left);
        let right = project(&parts, Side::Right);

        assert_eq!(
            left.iter().map(|l| l.content.as_str()).collect::<Vec<_>>(),
            vec!["one", "two", "three", "same", ""]
        );
        assert_eq!(
            left.iter().filter_map(|l| l.original_line_number).collect::<Vec<_>>(),
            vec![1, 2, 3, 4, 5]
        );
        assert_eq!(
            right.iter().filter_map(|l| l.modified_line_number).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(left[2].intra_part_line_index, 2);
    }

    #[test]
    fn test_empty_parts() {
        assert!(project(&[], Side::Left).is_empty());
        assert!(project(&[], Side::Right).is_empty());
    }

    #[test]
    fn test_projection_is_idempotent() {
        let parts = compute_diff(
            "alpha\nbeta\ngamma\ndelta\n",
            "alpha\nBETA\ngamma\nepsilon\nzeta\n",
            &DiffSettings::default(),
        );
        for side in [Side::Left, Side::Right] {
            assert_eq!(project(&parts, side), project(&parts, side));
        }
    }

    #[test]
    fn test_numbering_is_monotonic() {
        let original: String = (0..40).map(|i| format!("row {}\n", i)).collect();
        let modified: String = (0..40)
            .filter(|i| i % 5 != 0)
            .map(|i| {
                if i % 3 == 0 {
                    format!("ROW {}\n", i)
                } else {
                    format!("row {}\n", i)
                }
            })
            .collect();
        let parts = compute_diff(&original, &modified, &DiffSettings::default());

        let left = project(&parts, Side::Left);
        for pair in left.windows(2) {
            assert!(pair[1].original_line_number > pair[0].original_line_number);
            assert!(pair[0].modified_line_number.is_none());
        }
        let right = project(&parts, Side::Right);
        for pair in right.windows(2) {
            assert!(pair[1].modified_line_number > pair[0].modified_line_number);
            assert!(pair[0].original_line_number.is_none());
        }
        assert!(right
            .iter()
            .chain(left.iter())
            .all(|l| l.part_index < parts.len()));
    }

    #[test]
    fn test_side_content_matches_text() {
        let original = "keep\ndrop\nkeep too";
        let modified = "keep\nkeep too\nnew";
        let parts = compute_diff(original, modified, &DiffSettings::default());

        let left: Vec<String> = project(&parts, Side::Left)
            .into_iter()
            .map(|l| l.content)
            .collect();
        let right: Vec<String> = project(&parts, Side::Right)
            .into_iter()
            .map(|l| l.content)
            .collect();
        assert_eq!(left.join("\n"), original);
        assert_eq!(right.join("\n"), modified);
    }
}
