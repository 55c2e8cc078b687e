//! Template archive loading and validation
//!
//! A template is an existing Interactive Book package. It is checked once,
//! before any building starts: it must be a readable zip, carry an `h5p.json`
//! manifest, and name the Interactive Book as its main library.

mod resolver;

pub use resolver::{parse_library_folder, resolve_libraries};

use crate::error::{H5pBookError, TemplateError};
use crate::types::{ContentType, LibraryTable};
use serde::{Deserialize, Deserializer, Serialize};
use std::io::{Cursor, Read};
use std::path::Path;
use zip::result::ZipError;
use zip::ZipArchive;

/// Path of the package manifest inside the archive
pub const MANIFEST_PATH: &str = "h5p.json";

/// Main library prefix every accepted template must carry
pub const MAIN_LIBRARY_PREFIX: &str = "H5P.InteractiveBook";

/// The parts of `h5p.json` the compiler reads
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    pub main_library: String,

    #[serde(default)]
    pub preloaded_dependencies: Vec<Dependency>,
}

/// One `preloadedDependencies` entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    pub machine_name: String,
    #[serde(deserialize_with = "version_number")]
    pub major_version: u32,
    #[serde(deserialize_with = "version_number")]
    pub minor_version: u32,
}

impl Dependency {
    pub fn new(machine_name: impl Into<String>, major_version: u32, minor_version: u32) -> Self {
        Self {
            machine_name: machine_name.into(),
            major_version,
            minor_version,
        }
    }
}

/// Some authoring tools write versions as strings
fn version_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Version {
        Number(u32),
        Text(String),
    }

    match Version::deserialize(deserializer)? {
        Version::Number(n) => Ok(n),
        Version::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// A validated template archive, kept read-only for the whole run
#[derive(Debug, Clone)]
pub struct Template {
    bytes: Vec<u8>,
    manifest: Manifest,
    entries: Vec<String>,
}

impl Template {
    /// Validate template archive bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, TemplateError> {
        let (entries, manifest) = {
            let mut archive = ZipArchive::new(Cursor::new(bytes.as_slice()))
                .map_err(|e| TemplateError::CorruptTemplate(e.to_string()))?;

            let mut entries = Vec::with_capacity(archive.len());
            for i in 0..archive.len() {
                let file = archive
                    .by_index_raw(i)
                    .map_err(|e| TemplateError::CorruptTemplate(e.to_string()))?;
                entries.push(file.name().to_string());
            }

            (entries, read_manifest(&mut archive)?)
        };

        if !manifest.main_library.starts_with(MAIN_LIBRARY_PREFIX) {
            return Err(TemplateError::InvalidTemplate(format!(
                "main library is '{}', expected an {} package",
                manifest.main_library, MAIN_LIBRARY_PREFIX
            )));
        }

        tracing::debug!(
            "Loaded template '{}' with {} entries",
            manifest.title.as_deref().unwrap_or("untitled"),
            entries.len()
        );

        Ok(Self {
            bytes,
            manifest,
            entries,
        })
    }

    /// Read and validate a template file
    pub fn open(path: impl AsRef<Path>) -> Result<Self, H5pBookError> {
        let bytes = std::fs::read(path)?;
        Ok(Self::from_bytes(bytes)?)
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Entry names in archive order
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// The original archive bytes
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Resolve every content type against this template
    pub fn resolve_libraries(&self) -> LibraryTable {
        resolve_libraries(&self.manifest, &self.entries)
    }

    /// Summarise the template for display
    pub fn report(&self) -> TemplateReport {
        let libraries = self.resolve_libraries();
        TemplateReport {
            title: self.manifest.title.clone(),
            main_library: self.manifest.main_library.clone(),
            advanced_text: libraries.is_advanced_text(),
            unavailable: libraries.unavailable(),
            libraries,
        }
    }
}

fn read_manifest(archive: &mut ZipArchive<Cursor<&[u8]>>) -> Result<Manifest, TemplateError> {
    let mut file = match archive.by_name(MANIFEST_PATH) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Err(TemplateError::MissingManifest),
        Err(e) => return Err(TemplateError::CorruptTemplate(e.to_string())),
    };

    let mut raw = Vec::new();
    file.read_to_end(&mut raw)
        .map_err(|e| TemplateError::CorruptTemplate(e.to_string()))?;

    let text = String::from_utf8(raw)
        .map_err(|e| TemplateError::MalformedManifest(format!("not UTF-8: {}", e)))?;

    serde_json::from_str(text.trim_start_matches('\u{feff}'))
        .map_err(|e| TemplateError::MalformedManifest(e.to_string()))
}

/// What a template provides, as shown to users before they build
#[derive(Debug, Clone, Serialize)]
pub struct TemplateReport {
    pub title: Option<String>,
    pub main_library: String,
    pub libraries: LibraryTable,
    pub advanced_text: bool,
    pub unavailable: Vec<ContentType>,
}
