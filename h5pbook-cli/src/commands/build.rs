//! Build command implementation

use super::{compile_options, load_template, write_package};
use crate::BuildArgs;
use anyhow::{Context, Result};
use h5pbook_core::{package_file_name, Compiler};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Compile one Markdown document into a package
pub fn build(input: &str, template: &str, output: Option<&str>, args: &BuildArgs) -> Result<()> {
    let input_path = Path::new(input);
    let output_path = match output {
        Some(output) => PathBuf::from(output),
        None => input_path.with_file_name(package_file_name(input_path)),
    };

    // Set up progress bar with animation
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));

    pb.set_message("Loading template...");
    let compiler = Compiler::with_options(load_template(template)?, compile_options(args));

    let unavailable = compiler.libraries().unavailable();
    if !unavailable.is_empty() {
        tracing::warn!(
            "Template lacks libraries for: {}",
            unavailable
                .iter()
                .map(|t| t.display_name())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    pb.set_message("Reading source...");
    let source = fs::read_to_string(input_path)
        .with_context(|| format!("Failed to read input file: {}", input))?;

    pb.set_message("Compiling...");
    let bytes = compiler
        .compile(&source)
        .with_context(|| format!("Failed to compile {}", input))?;

    // Only touch the output once the whole package exists
    write_package(&output_path, &bytes)?;

    pb.finish_with_message(format!(
        "Compiled {} -> {} ({} bytes)",
        input,
        output_path.display(),
        bytes.len()
    ));

    Ok(())
}
