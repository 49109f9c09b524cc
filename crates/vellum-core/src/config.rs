//! Tuning configuration.
//!
//! Spacing, pacing, and control-appearance constants, overridable from a
//! TOML file. A missing file means defaults; a present-but-invalid file is
//! an error.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Pacing and spacing knobs for the walkthrough.
///
/// Lengths are in layout units (terminal cells for the bundled renderer),
/// times in seconds.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Tuning {
    /// Maximum width of the text content column.
    pub text_content_max_width: f32,
    /// Spacing between walkthrough sections along the paging axis.
    pub section_spacing: f32,
    /// Spacing between paragraphs within a section.
    pub paragraph_spacing: f32,
    /// Seconds before a section title begins typing.
    pub title_appear_delay: f64,
    /// Seconds between the title finishing and the body beginning.
    pub body_appear_delay: f64,
    /// Seconds paused between body paragraphs.
    pub paragraph_pause: f64,
    /// Seconds after mount before the fast-forward control appears.
    pub fast_forward_appear_delay: f64,
    /// Extra seconds after a section finishes writing before the continue
    /// control appears.
    pub continue_appear_delay: f64,
    /// Seconds the view settles after the continue control hides before the
    /// next section is presented.
    pub advance_settle_delay: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Tuning {
            text_content_max_width: 76.0,
            section_spacing: 8.0,
            paragraph_spacing: 1.0,
            title_appear_delay: 1.0,
            body_appear_delay: 0.5,
            paragraph_pause: 0.1,
            fast_forward_appear_delay: 5.0,
            continue_appear_delay: 0.0,
            advance_settle_delay: 0.5,
        }
    }
}

impl Tuning {
    /// Loads tuning from a TOML file, or defaults when `path` is `None` or
    /// the file does not exist.
    pub fn load(path: Option<&Path>) -> Result<Tuning> {
        let Some(path) = path else {
            return Ok(Tuning::default());
        };
        if !path.exists() {
            debug!(path = %path.display(), "tuning file missing, using defaults");
            return Ok(Tuning::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read tuning file: {}", path.display()))?;
        let tuning = toml::from_str(&raw)
            .with_context(|| format!("Invalid tuning file: {}", path.display()))?;
        debug!(path = %path.display(), "tuning loaded");
        Ok(tuning)
    }
}
