//! Trellis CLI library
//!
//! This module contains the core CLI logic for the Trellis layout tool: load
//! a scene, lay it out and write a plain-text report of the result.

pub mod error_adapter;

mod args;
mod config;
mod error;
mod report;
mod scene;

pub use args::Args;
pub use config::AppConfig;
pub use error::CliError;
pub use scene::Scene;

use std::fs;

use log::info;

use trellis::LayoutBuilder;

/// Run the Trellis CLI application
///
/// This function lays out the scene in the input file and writes the
/// resulting layout report to the output file.
///
/// # Errors
///
/// Returns `CliError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Scene parsing errors
/// - Layout errors
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing scene"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;
    let scene = Scene::parse(&source)?;
    let bounds = scene.bounds();
    let set = scene.into_visible_set(app_config.layout().limits())?;

    let builder = LayoutBuilder::new(app_config.layout().clone());
    let layout = builder.layout(&set, bounds)?;

    fs::write(&args.output, report::render(&layout))?;

    info!(output_file = args.output; "Layout report written");

    Ok(())
}
