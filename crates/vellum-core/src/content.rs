//! Walkthrough content ("scripts").
//!
//! A script is an ordered list of sections, each with an optional title and
//! one or more body paragraphs. Scripts load from TOML; failure to load is
//! the one fatal error in this system and surfaces as an `anyhow` chain for
//! the binary to report.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One walkthrough section.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Section {
    /// Optional heading, typed out before the body starts.
    pub title: Option<String>,
    /// Body paragraphs, revealed one after another.
    pub body: Vec<String>,
}

/// A complete walkthrough script.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Script {
    #[serde(rename = "section")]
    pub sections: Vec<Section>,
}

impl Script {
    /// Loads and validates a script from a TOML file.
    pub fn load(path: &Path) -> Result<Script> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read script file: {}", path.display()))?;
        let script = Script::from_toml(&raw)
            .with_context(|| format!("Invalid script file: {}", path.display()))?;
        debug!(path = %path.display(), sections = script.sections.len(), "script loaded");
        Ok(script)
    }

    /// Parses and validates a script from TOML text.
    pub fn from_toml(raw: &str) -> Result<Script> {
        let script: Script = toml::from_str(raw).context("Failed to parse script TOML")?;
        script.validate()?;
        Ok(script)
    }

    fn validate(&self) -> Result<()> {
        if self.sections.is_empty() {
            bail!("A script needs at least one section");
        }
        for (index, section) in self.sections.iter().enumerate() {
            if section.body.is_empty() {
                bail!("Section {index} has no body paragraphs");
            }
        }
        Ok(())
    }

    /// The bundled walkthrough, used when no script file is given.
    pub fn builtin() -> Script {
        Script {
            sections: vec![
                Section {
                    title: Some("Welcome".to_string()),
                    body: vec![
                        "Take a moment to settle in.".to_string(),
                        "These short pages read themselves out, one letter at a time."
                            .to_string(),
                    ],
                },
                Section {
                    title: Some("At your pace".to_string()),
                    body: vec![
                        "When a page finishes, a continue control appears below.".to_string(),
                        "You can always swipe back to revisit anything you have already seen."
                            .to_string(),
                    ],
                },
                Section {
                    title: None,
                    body: vec![
                        "In a hurry? Fast-forward skips ahead and lays everything out at once."
                            .to_string(),
                        "That is all there is to it. Ready when you are.".to_string(),
                    ],
                },
            ],
        }
    }
}
