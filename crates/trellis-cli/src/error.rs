//! Error type of the Trellis CLI.

use std::{io, ops::Range, path::PathBuf};

use thiserror::Error;

use trellis::LayoutError;

/// Everything that can stop a CLI run.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Failed to parse TOML configuration: {0}")]
    Config(String),

    /// The scene file is not valid TOML or does not describe a diagram
    #[error("{message}")]
    Scene {
        message: String,
        span: Option<Range<usize>>,
        src: String,
    },

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),
}

impl CliError {
    /// Creates a scene error carrying the source for snippet rendering
    pub fn new_scene_error(err: toml::de::Error, src: &str) -> Self {
        CliError::Scene {
            message: err.message().to_string(),
            span: err.span(),
            src: src.to_string(),
        }
    }
}
