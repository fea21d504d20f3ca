//! At-a-glance diff summary

use super::{line_count, DiffPart};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffStats {
    /// Number of added parts (changed clusters, not lines)
    pub added_lines: usize,
    /// Number of removed parts
    pub removed_lines: usize,
    pub changed_lines: usize,
    pub total_lines: usize,
    /// Percentage in 0..=100
    pub similarity: u8,
}

impl DiffStats {
    /// Stats shown when there is nothing to compare.
    pub fn empty() -> Self {
        Self {
            added_lines: 0,
            removed_lines: 0,
            changed_lines: 0,
            total_lines: 0,
            similarity: 100,
        }
    }
}

impl Default for DiffStats {
    fn default() -> Self {
        Self::empty()
    }
}

pub fn aggregate(parts: &[DiffPart], original: &str, modified: &str) -> DiffStats {
    if original.is_empty() && modified.is_empty() {
        return DiffStats::empty();
    }

    let added_lines = parts.iter().filter(|p| p.is_added()).count();
    let removed_lines = parts.iter().filter(|p| p.is_removed()).count();
    let changed_lines = added_lines + removed_lines;
    let total_lines = line_count(original).max(line_count(modified));

    let similarity = if total_lines > 0 {
        let ratio = (total_lines as f64 - changed_lines as f64) / total_lines as f64;
        (ratio * 100.0).max(0.0).round() as u8
    } else {
        100
    };

    DiffStats {
        added_lines,
        removed_lines,
        changed_lines,
        total_lines,
        similarity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DiffSettings;
    use crate::diff::compute_diff;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_inputs() {
        assert_eq!(aggregate(&[], "", ""), DiffStats::empty());
        assert_eq!(aggregate(&[], "", "").similarity, 100);
    }

    #[test]
    fn test_single_change() {
        let parts = compute_diff("a\nb\nc", "a\nx\nc", &DiffSettings::default());
        assert_eq!(
            aggregate(&parts, "a\nb\nc", "a\nx\nc"),
            DiffStats {
                added_lines: 1,
                removed_lines: 1,
                changed_lines: 2,
                total_lines: 3,
                similarity: 33,
            }
        );
    }

    #[test]
    fn test_counts_clusters_not_lines() {
        let parts = vec![
            DiffPart::removed("1\n2\n3\n"),
            DiffPart::added("4\n5\n6\n"),
            DiffPart::equal("7"),
        ];
        let stats = aggregate(&parts, "1\n2\n3\n7", "4\n5\n6\n7");
        assert_eq!(stats.added_lines, 1);
        assert_eq!(stats.removed_lines, 1);
        assert_eq!(stats.total_lines, 4);
        assert_eq!(stats.similarity, 50);
    }

    #[test]
    fn test_similarity_clamps_at_zero() {
        let parts = vec![
            DiffPart::removed("a\n"),
            DiffPart::added("b\n"),
            DiffPart::equal("c\n"),
            DiffPart::removed("d"),
            DiffPart::added("e"),
        ];
        let stats = aggregate(&parts, "a\nc\nd", "b\nc\ne");
        assert_eq!(stats.changed_lines, 4);
        assert_eq!(stats.total_lines, 3);
        assert_eq!(stats.similarity, 0);
    }

    #[test]
    fn test_identical_texts() {
        let text = "one\ntwo\n";
        let parts = compute_diff(text, text, &DiffSettings::default());
        let stats = aggregate(&parts, text, text);
        assert_eq!(stats.changed_lines, 0);
        assert_eq!(stats.total_lines, 3);
        assert_eq!(stats.similarity, 100);
    }

    #[test]
    fn test_one_side_empty() {
        let parts = compute_diff("", "hello", &DiffSettings::default());
        let stats = aggregate(&parts, "", "hello");
        assert_eq!(stats.added_lines, 1);
        assert_eq!(stats.total_lines, 1);
        assert_eq!(stats.similarity, 0);
    }
}
