//! Batch build command implementation

use super::{compile_options, load_template, write_package};
use crate::BuildArgs;
use anyhow::{bail, Context, Result};
use h5pbook_core::{package_file_name, Compiler};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Source file extensions picked up by the batch command
const SOURCE_EXTENSIONS: &[&str] = &["md", "markdown", "txt"];

/// Compile every source document in a directory against one template
pub fn batch(
    input_dir: &str,
    template: &str,
    output_dir: &str,
    jobs: usize,
    args: &BuildArgs,
) -> Result<()> {
    let input_path = Path::new(input_dir);
    let output_path = Path::new(output_dir);

    // Ensure output directory exists
    fs::create_dir_all(output_path)
        .with_context(|| format!("Failed to create output directory: {}", output_dir))?;

    // Find all source files
    let mut files: Vec<_> = fs::read_dir(input_path)
        .with_context(|| format!("Failed to read input directory: {}", input_dir))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .map(|ext| SOURCE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
                .unwrap_or(false)
        })
        .collect();
    files.sort();

    if files.is_empty() {
        println!("No Markdown files found in {}", input_dir);
        return Ok(());
    }

    println!("Found {} files to compile", files.len());

    // Sources whose packages would land on the same output file are not built
    let (files, conflicts) = split_output_conflicts(files);
    for (name, sources) in &conflicts {
        tracing::error!(
            "Skipping {} sources that would all write {}: {:?}",
            sources.len(),
            name,
            sources
        );
    }
    let conflicting: usize = conflicts.values().map(Vec::len).sum();

    // One template validation and library resolution for the whole batch
    let compiler = Compiler::with_options(load_template(template)?, compile_options(args));

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}")?
            .progress_chars("##-"),
    );

    let success_count = AtomicUsize::new(0);
    let error_count = AtomicUsize::new(conflicting);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build()
        .context("Failed to start worker pool")?;

    pool.install(|| {
        files.par_iter().for_each(|file_path| {
            match process_file(file_path, output_path, &compiler) {
                Ok(_) => {
                    success_count.fetch_add(1, Ordering::Relaxed);
                }
                Err(e) => {
                    error_count.fetch_add(1, Ordering::Relaxed);
                    tracing::error!("Failed to compile {:?}: {:#}", file_path, e);
                }
            }

            overall_pb.inc(1);
        });
    });

    overall_pb.finish();

    let success = success_count.load(Ordering::Relaxed);
    let errors = error_count.load(Ordering::Relaxed);

    println!("\nBatch build complete:");
    println!("  Success: {}", success);
    println!("  Errors:  {}", errors);

    if errors > 0 {
        bail!("Batch build completed with {} errors", errors);
    }

    Ok(())
}

/// Separate sources with a unique package name from those sharing one,
/// such as `a.md` and `a.txt`
fn split_output_conflicts(
    files: Vec<PathBuf>,
) -> (Vec<PathBuf>, BTreeMap<String, Vec<PathBuf>>) {
    let mut by_output: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    for file in files {
        by_output.entry(package_file_name(&file)).or_default().push(file);
    }

    let mut unique = Vec::new();
    let mut conflicts = BTreeMap::new();
    for (name, mut sources) in by_output {
        if sources.len() == 1 {
            unique.append(&mut sources);
        } else {
            conflicts.insert(name, sources);
        }
    }
    unique.sort();
    (unique, conflicts)
}

fn process_file(input_path: &Path, output_dir: &Path, compiler: &Compiler) -> Result<()> {
    let source = fs::read_to_string(input_path)?;
    let bytes = compiler.compile(&source)?;

    let output_file = output_dir.join(package_file_name(input_path));
    write_package(&output_file, &bytes)?;

    tracing::info!("Compiled {:?} -> {:?}", input_path, output_file);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_output_conflicts() {
        let files = vec![
            PathBuf::from("in/a.md"),
            PathBuf::from("in/a.txt"),
            PathBuf::from("in/b.markdown"),
            PathBuf::from("in/c.md"),
        ];

        let (unique, conflicts) = split_output_conflicts(files);

        assert_eq!(unique, [PathBuf::from("in/b.markdown"), PathBuf::from("in/c.md")]);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(
            conflicts["a.h5p"],
            [PathBuf::from("in/a.md"), PathBuf::from("in/a.txt")]
        );
    }
}
