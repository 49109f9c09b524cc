//! CLI entry and dispatch.

use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use vellum_core::config::Tuning;
use vellum_core::content::Script;
use vellum_core::geometry::Axis;
use vellum_tui::events::ColorScheme;

use crate::logging;

/// Paging axis for section navigation.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum AxisArg {
    #[default]
    Vertical,
    Horizontal,
}

impl From<AxisArg> for Axis {
    fn from(axis: AxisArg) -> Axis {
        match axis {
            AxisArg::Vertical => Axis::Vertical,
            AxisArg::Horizontal => Axis::Horizontal,
        }
    }
}

#[derive(Parser)]
#[command(name = "vellum")]
#[command(version = "0.1")]
#[command(about = "Typewriter walkthroughs in the terminal")]
struct Cli {
    /// Walkthrough script (TOML). Runs the built-in script if omitted.
    #[arg(value_name = "SCRIPT")]
    script: Option<PathBuf>,

    /// Timing and layout tuning file (TOML)
    #[arg(long, value_name = "PATH")]
    tuning: Option<PathBuf>,

    /// Axis sections page along
    #[arg(long, value_enum, default_value = "vertical")]
    axis: AxisArg,

    /// Render text for a light terminal background
    #[arg(long)]
    light: bool,

    /// Append logs to this file (filter via RUST_LOG)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // The guard flushes buffered log lines when dropped at exit.
    let _guard = cli.log_file.as_deref().map(logging::init).transpose()?;

    let script = match &cli.script {
        Some(path) => Script::load(path)?,
        None => Script::builtin(),
    };
    let tuning = Tuning::load(cli.tuning.as_deref())?;
    tracing::info!(sections = script.sections.len(), "starting walkthrough");
    let scheme = if cli.light {
        ColorScheme::Light
    } else {
        ColorScheme::Dark
    };

    // The completion callback fires inside the alternate screen, so it only
    // records the outcome; the farewell prints after restore.
    let finished = Rc::new(Cell::new(false));
    let flag = Rc::clone(&finished);
    vellum_tui::run_walkthrough(script, tuning, scheme, cli.axis.into(), move || {
        flag.set(true);
    })?;

    if finished.get() {
        println!("Walkthrough complete.");
    }
    Ok(())
}
