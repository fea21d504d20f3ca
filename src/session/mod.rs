//! Diff session
//!
//! Owns the two panel texts, their names and the settings. The part sequence
//! and stats are recomputed eagerly on every change, so anything read from a
//! session always reflects its current texts.

use crate::config::{DiffSettings, UploadConfig};
use crate::diff::{aggregate, compute_diff, project, DiffPart, DiffStats, RenderLine, Side};
use crate::export::DiffExport;
use crate::merge::{self, MergeError, MergeOutcome, MergeRequest};
use crate::upload::{self, UploadError};
use std::path::Path;

/// Text shown in one panel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub text: String,
    /// File name when loaded from disk
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct DiffSession {
    left: Document,
    right: Document,
    settings: DiffSettings,
    parts: Vec<DiffPart>,
    stats: DiffStats,
}

impl DiffSession {
    pub fn new(settings: DiffSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn with_texts(original: &str, modified: &str, settings: DiffSettings) -> Self {
        let mut session = Self::new(settings);
        session.left.text = original.to_string();
        session.right.text = modified.to_string();
        session.recompute();
        session
    }

    pub fn document(&self, side: Side) -> &Document {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    fn document_mut(&mut self, side: Side) -> &mut Document {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn text(&self, side: Side) -> &str {
        &self.document(side).text
    }

    pub fn settings(&self) -> &DiffSettings {
        &self.settings
    }

    pub fn parts(&self) -> &[DiffPart] {
        &self.parts
    }

    pub fn stats(&self) -> DiffStats {
        self.stats
    }

    /// Render lines for one panel.
    pub fn project(&self, side: Side) -> Vec<RenderLine> {
        project(&self.parts, side)
    }

    pub fn set_text(&mut self, side: Side, text: impl Into<String>) {
        self.document_mut(side).text = text.into();
        self.recompute();
    }

    pub fn set_settings(&mut self, settings: DiffSettings) {
        if settings == self.settings {
            return;
        }
        self.settings = settings;
        self.recompute();
    }

    /// Load a file into a panel. A rejected file leaves the session untouched.
    pub fn load_file(
        &mut self,
        side: Side,
        path: impl AsRef<Path>,
        policy: &UploadConfig,
    ) -> Result<(), UploadError> {
        let loaded = upload::load_file(path, policy)?;
        let document = self.document_mut(side);
        document.text = loaded.content;
        document.name = Some(loaded.name);
        self.recompute();
        Ok(())
    }

    /// Exchange texts and names between the panels.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.left, &mut self.right);
        self.recompute();
    }

    /// Empty both panels. Settings are kept.
    pub fn clear(&mut self) {
        self.left = Document::default();
        self.right = Document::default();
        self.recompute();
    }

    /// Apply a merge and publish the new text for the target side.
    ///
    /// A stale line index is logged and ignored; the returned outcome is then
    /// a no-op carrying the unchanged target text.
    pub fn merge(&mut self, request: MergeRequest) -> MergeOutcome {
        match self.try_merge(request) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!("Merge ignored: {}", e);
                let target = request.direction.target();
                MergeOutcome {
                    target,
                    text: self.text(target).to_string(),
                    edit: None,
                }
            }
        }
    }

    /// Like [`DiffSession::merge`], but reports stale indices to the caller.
    pub fn try_merge(&mut self, request: MergeRequest) -> Result<MergeOutcome, MergeError> {
        let outcome = merge::merge(&self.parts, &self.left.text, &self.right.text, request)?;
        if !outcome.is_noop() {
            self.document_mut(outcome.target).text = outcome.text.clone();
            self.recompute();
        }
        Ok(outcome)
    }

    pub fn export(&self) -> DiffExport {
        DiffExport {
            original_name: self.left.name.clone(),
            modified_name: self.right.name.clone(),
            original: self.left.text.clone(),
            modified: self.right.text.clone(),
        }
    }

    fn recompute(&mut self) {
        if self.left.text.is_empty() && self.right.text.is_empty() {
            self.parts.clear();
            self.stats = DiffStats::empty();
            return;
        }
        self.parts = compute_diff(&self.left.text, &self.right.text, &self.settings);
        self.stats = aggregate(&self.parts, &self.left.text, &self.right.text);
        tracing::debug!(
            added = self.stats.added_lines,
            removed = self.stats.removed_lines,
            similarity = self.stats.similarity,
            "Recomputed diff"
        );
    }
}
