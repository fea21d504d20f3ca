//! Awase - Side-by-side text diff with click-to-merge

use anyhow::{bail, Context, Result};
use awase::config::Config;
use awase::diff::Side;
use awase::merge::{MergeDirection, MergeRequest};
use awase::session::DiffSession;
use awase::ui::{render_diff_stats, DiffView, Theme};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(
    name = "awase",
    about = "Compare two text files side by side and merge single lines",
    version
)]
struct Opts {
    /// Original (left) file
    original: PathBuf,

    /// Modified (right) file
    modified: PathBuf,

    /// Merge a line: SIDE:LINE:DIRECTION, e.g. left:3:ltr. LINE is the 1-based
    /// row in that panel, after earlier merges. Repeatable; applied in order.
    #[arg(long = "merge", value_name = "SIDE:LINE:DIRECTION", value_parser = parse_merge)]
    merges: Vec<MergeRequest>,

    /// Save merged texts back to their files
    #[arg(long)]
    write: bool,

    /// Write a diff-<date>.txt export into this directory
    #[arg(long, value_name = "DIR")]
    export: Option<PathBuf>,

    /// Compare lines ignoring surrounding whitespace
    #[arg(long)]
    ignore_whitespace: bool,

    /// Compare lines case-insensitively
    #[arg(long)]
    ignore_case: bool,

    /// Width of each panel in columns
    #[arg(long, default_value_t = 60)]
    width: usize,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Store the effective settings (including the flags above) in the config file
    #[arg(long)]
    save_config: bool,
}

fn main() -> Result<()> {
    let opts = Opts::parse();
    init_tracing();

    let config = match &opts.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load_or_default(),
    };

    let mut settings = config.settings;
    settings.ignore_whitespace |= opts.ignore_whitespace;
    settings.ignore_case |= opts.ignore_case;

    if opts.save_config {
        let updated = Config {
            settings,
            upload: config.upload.clone(),
        };
        let path = match &opts.config {
            Some(path) => {
                updated.save_to(path)?;
                path.clone()
            }
            None => updated.save()?,
        };
        tracing::info!("Saved settings to {}", path.display());
    }

    let mut session = DiffSession::new(settings);
    session
        .load_file(Side::Left, &opts.original, &config.upload)
        .with_context(|| format!("Cannot open {}", opts.original.display()))?;
    session
        .load_file(Side::Right, &opts.modified, &config.upload)
        .with_context(|| format!("Cannot open {}", opts.modified.display()))?;

    if opts.no_color {
        colored::control::set_override(false);
    }
    let theme = Theme::dark();
    let view = DiffView::new(session.settings(), opts.width, theme);

    let loaded = [
        session.text(Side::Left).to_string(),
        session.text(Side::Right).to_string(),
    ];

    for request in &opts.merges {
        let outcome = session.merge(*request);
        if outcome.is_noop() {
            tracing::warn!(
                "Merge {}:{} left {} unchanged",
                request.side,
                request.line_index + 1,
                outcome.target
            );
        }
    }

    print!(
        "{}",
        view.render(&session.project(Side::Left), &session.project(Side::Right))
    );
    println!("{}", render_diff_stats(&session.stats(), &theme));

    if opts.write {
        for (side, path, before) in [
            (Side::Left, &opts.original, &loaded[0]),
            (Side::Right, &opts.modified, &loaded[1]),
        ] {
            if session.text(side) != before.as_str() {
                std::fs::write(path, session.text(side))
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                tracing::info!("Saved {} panel to {}", side, path.display());
            }
        }
    }

    if let Some(dir) = &opts.export {
        let path = session.export().write_to_dir(dir)?;
        println!("Exported to {}", path.display());
    }

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn parse_merge(arg: &str) -> Result<MergeRequest> {
    let fields: Vec<&str> = arg.split(':').collect();
    let [side, line, direction] = fields.as_slice() else {
        bail!("expected SIDE:LINE:DIRECTION, got {:?}", arg);
    };

    let side = match side.to_ascii_lowercase().as_str() {
        "left" | "l" => Side::Left,
        "right" | "r" => Side::Right,
        other => bail!("unknown side {:?} (use left or right)", other),
    };
    let line: usize = line
        .parse()
        .with_context(|| format!("invalid line number {:?}", line))?;
    if line == 0 {
        bail!("line numbers start at 1");
    }
    let direction = match direction.to_ascii_lowercase().as_str() {
        "ltr" | "left-to-right" => MergeDirection::LeftToRight,
        "rtl" | "right-to-left" => MergeDirection::RightToLeft,
        other => bail!("unknown direction {:?} (use ltr or rtl)", other),
    };

    Ok(MergeRequest {
        side,
        line_index: line - 1,
        direction,
    })
}
