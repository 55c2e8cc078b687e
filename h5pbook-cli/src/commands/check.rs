//! Check command implementation

use super::load_template;
use anyhow::{bail, Context, Result};
use h5pbook_core::builder::builder_for_kind;
use h5pbook_core::decoder::ChapterOutline;
use h5pbook_core::{outline_source, LibraryTable};
use serde::Serialize;
use std::fs;

#[derive(Serialize)]
struct CheckReport {
    chapters: Vec<ChapterOutline>,
    /// `chapter: block kind` for every block that would fall back to text
    fallbacks: Vec<String>,
}

/// Check a source document's structure, optionally against a template
pub fn check(input: &str, template: Option<&str>, json: bool) -> Result<()> {
    let source =
        fs::read_to_string(input).with_context(|| format!("Failed to read input file: {}", input))?;

    let chapters = match outline_source(&source) {
        Ok(chapters) => chapters,
        Err(e) => {
            eprintln!("Invalid source: {}", e);
            bail!("Check failed for {}", input);
        }
    };

    let fallbacks = match template {
        Some(path) => fallbacks(&chapters, &load_template(path)?.resolve_libraries()),
        None => Vec::new(),
    };

    let report = CheckReport {
        chapters,
        fallbacks,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{} chapters", report.chapters.len());
    for chapter in &report.chapters {
        println!("  {}", chapter.title);
        for block in &chapter.blocks {
            println!("    {:<20} {} lines", block.kind.label(), block.lines);
        }
    }
    for fallback in &report.fallbacks {
        println!("Fallback: {}", fallback);
    }

    Ok(())
}

fn fallbacks(chapters: &[ChapterOutline], libraries: &LibraryTable) -> Vec<String> {
    chapters
        .iter()
        .flat_map(|chapter| {
            chapter
                .blocks
                .iter()
                .filter(|block| {
                    !libraries
                        .get(builder_for_kind(block.kind).content_type())
                        .is_available()
                })
                .map(move |block| format!("{}: {}", chapter.title, block.kind.label()))
        })
        .collect()
}
