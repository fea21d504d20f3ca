//! Awase - Side-by-side text diff with click-to-merge
//!
//! Two texts are compared line by line. [`diff::project`] turns the diff into
//! the lines shown in each panel, [`diff::aggregate`] summarises it, and
//! [`merge`] pushes a single clicked line from one panel into the other.
//! [`session::DiffSession`] ties these together and keeps them in sync.

pub mod config;
pub mod diff;
pub mod export;
pub mod merge;
pub mod session;
pub mod ui;
pub mod upload;
