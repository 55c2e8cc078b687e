//! CLI command implementations

mod batch;
mod build;
mod check;
mod inspect;

pub use batch::batch;
pub use build::build;
pub use check::check;
pub use inspect::inspect;

use crate::BuildArgs;
use anyhow::{Context, Result};
use h5pbook_core::{CompileOptions, Template};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Load and validate a template archive
fn load_template(path: &str) -> Result<Template> {
    Template::open(path).with_context(|| format!("Failed to load template: {}", path))
}

fn compile_options(args: &BuildArgs) -> CompileOptions {
    CompileOptions::new()
        .with_tables(!args.no_tables)
        .with_parallel_chapters(!args.sequential)
        .with_compression_level(args.compression_level)
}

/// Write a finished package to `path`.
///
/// The bytes go to a temporary file next to the destination which is then
/// renamed over it, so an interrupted write never leaves a truncated package.
fn write_package(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    file.write_all(bytes)
        .and_then(|_| file.as_file().sync_all())
        .with_context(|| format!("Failed to write output file: {}", path.display()))?;
    file.persist(path)
        .with_context(|| format!("Failed to write output file: {}", path.display()))?;

    Ok(())
}
