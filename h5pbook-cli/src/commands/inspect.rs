//! Inspect command implementation

use super::load_template;
use anyhow::Result;
use h5pbook_core::LibraryEntry;

/// Display the libraries a template provides
pub fn inspect(template: &str, json: bool) -> Result<()> {
    let report = load_template(template)?.report();

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if let Some(title) = &report.title {
        println!("Title:        {}", title);
    }
    println!("Main library: {}", report.main_library);
    println!(
        "Text:         {}",
        if report.advanced_text { "advanced" } else { "plain" }
    );
    println!("Libraries:");
    for (content_type, entry) in report.libraries.iter() {
        match entry {
            LibraryEntry::Available(id) => {
                println!("  {:<18} {}", content_type.display_name(), id)
            }
            LibraryEntry::Unavailable => {
                println!("  {:<18} (missing, text fallback)", content_type.display_name())
            }
        }
    }

    Ok(())
}
