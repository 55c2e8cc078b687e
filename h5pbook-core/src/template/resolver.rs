//! Library version resolver
//!
//! Each content type resolves by, in order: an exact machine-name match among
//! the manifest's preloaded dependencies, then an installed library folder
//! named `<machineName>-<major>.<minor>/` at the archive's top level. Types
//! that match neither are marked unavailable; resolution never fails.

use super::Manifest;
use crate::types::{ContentType, LibraryEntry, LibraryId, LibraryTable};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static LIBRARY_FOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9_.\-]+)-(\d+)\.(\d+)$").expect("library folder pattern is valid")
});

/// Build the library table for a template
pub fn resolve_libraries<S: AsRef<str>>(manifest: &Manifest, entries: &[S]) -> LibraryTable {
    let folders = installed_folders(entries);
    let mut table = LibraryTable::empty();

    for content_type in ContentType::ALL {
        let entry = content_type
            .machine_names()
            .iter()
            .find_map(|name| resolve_name(name, manifest, &folders))
            .map(LibraryEntry::Available)
            .unwrap_or(LibraryEntry::Unavailable);

        match entry.id() {
            Some(id) => tracing::debug!("Resolved {} to {}", content_type, id),
            None => tracing::warn!(
                "No library found for {} (tried {}); its blocks will fall back to text",
                content_type,
                content_type.machine_names().join(", ")
            ),
        }

        table.insert(content_type, entry);
    }

    table
}

fn resolve_name(
    machine_name: &str,
    manifest: &Manifest,
    folders: &BTreeMap<String, LibraryId>,
) -> Option<LibraryId> {
    manifest
        .preloaded_dependencies
        .iter()
        .find(|dep| dep.machine_name == machine_name)
        .map(|dep| LibraryId::new(&dep.machine_name, dep.major_version, dep.minor_version))
        .or_else(|| folders.get(machine_name).cloned())
}

/// Library folders at the archive's top level, keeping the highest version per name
fn installed_folders<S: AsRef<str>>(entries: &[S]) -> BTreeMap<String, LibraryId> {
    let mut folders: BTreeMap<String, LibraryId> = BTreeMap::new();

    for entry in entries {
        let Some((folder, _)) = entry.as_ref().split_once('/') else {
            continue;
        };
        let Some(id) = parse_library_folder(folder) else {
            continue;
        };

        match folders.get(&id.machine_name) {
            Some(existing) if existing >= &id => {}
            _ => {
                folders.insert(id.machine_name.clone(), id);
            }
        }
    }

    folders
}

/// Parse a folder name such as `H5P.Accordion-1.0`
pub fn parse_library_folder(folder: &str) -> Option<LibraryId> {
    let caps = LIBRARY_FOLDER_RE.captures(folder)?;
    let major = caps[2].parse().ok()?;
    let minor = caps[3].parse().ok()?;
    Some(LibraryId::new(&caps[1], major, minor))
}
