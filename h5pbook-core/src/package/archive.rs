//! In-memory working copy of a zip archive
//!
//! The template bytes are never touched; every mutation happens on this
//! copy, which is serialized once at the end.

use crate::error::PackageError;
use std::collections::BTreeSet;
use std::io::{Cursor, Read, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipArchive, ZipWriter};

/// One archive entry with its uncompressed data
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveEntry {
    pub name: String,
    pub data: Vec<u8>,
    /// Explicit directory entry (name ends in `/`)
    pub is_dir: bool,
}

impl ArchiveEntry {
    /// A zero-length entry ending in a path separator
    pub fn is_directory_marker(&self) -> bool {
        self.is_dir && self.name.ends_with('/') && self.data.is_empty()
    }
}

/// An archive held entirely in memory, in original entry order
#[derive(Debug, Clone, Default)]
pub struct PackageArchive {
    entries: Vec<ArchiveEntry>,
}

impl PackageArchive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every entry from zip bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PackageError> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| PackageError::ArchiveRead(e.to_string()))?;

        let mut entries = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let mut file = archive
                .by_index(i)
                .map_err(|e| PackageError::ArchiveRead(e.to_string()))?;

            let mut data = Vec::new();
            file.read_to_end(&mut data)
                .map_err(|e| PackageError::ArchiveRead(format!("{}: {}", file.name(), e)))?;

            entries.push(ArchiveEntry {
                name: file.name().to_string(),
                is_dir: file.is_dir(),
                data,
            });
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    /// Data of a file entry
    pub fn read(&self, name: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|e| e.name == name && !e.is_dir)
            .map(|e| e.data.as_slice())
    }

    /// Write a file, replacing an existing entry in place or appending a new one
    pub fn write_file(&mut self, name: &str, data: Vec<u8>) {
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => {
                entry.data = data;
                entry.is_dir = false;
            }
            None => self.entries.push(ArchiveEntry {
                name: name.to_string(),
                data,
                is_dir: false,
            }),
        }
    }

    /// Add an explicit directory entry
    pub fn add_directory(&mut self, name: &str) {
        let name = if name.ends_with('/') {
            name.to_string()
        } else {
            format!("{}/", name)
        };
        if !self.contains(&name) {
            self.entries.push(ArchiveEntry {
                name,
                data: Vec::new(),
                is_dir: true,
            });
        }
    }

    /// Names of every file (non-directory) entry
    pub fn file_names(&self) -> BTreeSet<&str> {
        self.entries
            .iter()
            .filter(|e| !e.is_dir)
            .map(|e| e.name.as_str())
            .collect()
    }

    /// Remove the explicit directory entries under `prefix`, never the files
    /// beneath them. Returns the removed names.
    ///
    /// Some hosts reject packages that list folders under the content root
    /// explicitly, yet still need every file there at its original path.
    pub fn remove_directory_entries(&mut self, prefix: &str) -> Result<Vec<String>, PackageError> {
        let files_before: BTreeSet<String> =
            self.file_names().into_iter().map(str::to_string).collect();

        let mut removed = Vec::new();
        self.entries.retain(|entry| {
            if entry.name.starts_with(prefix) && entry.is_directory_marker() {
                removed.push(entry.name.clone());
                false
            } else {
                true
            }
        });

        let files_after = self.file_names();
        if files_after.len() != files_before.len()
            || files_before.iter().any(|name| !files_after.contains(name.as_str()))
        {
            return Err(PackageError::RepairInvariant(format!(
                "{} files before repair, {} after",
                files_before.len(),
                files_after.len()
            )));
        }

        Ok(removed)
    }

    /// Serialize with deflate at `compression_level` and fixed timestamps, so
    /// equal inputs give equal bytes. Level 0 stores entries uncompressed.
    pub fn to_bytes(&self, compression_level: i64) -> Result<Vec<u8>, PackageError> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = if compression_level <= 0 {
            SimpleFileOptions::default().compression_method(CompressionMethod::Stored)
        } else {
            SimpleFileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .compression_level(Some(compression_level))
        }
        .last_modified_time(DateTime::default());

        for entry in &self.entries {
            if entry.is_dir {
                writer
                    .add_directory(entry.name.as_str(), options)
                    .map_err(|e| PackageError::ArchiveWrite(e.to_string()))?;
            } else {
                writer
                    .start_file(entry.name.as_str(), options)
                    .map_err(|e| PackageError::ArchiveWrite(e.to_string()))?;
                writer
                    .write_all(&entry.data)
                    .map_err(|e| PackageError::ArchiveWrite(e.to_string()))?;
            }
        }

        let cursor = writer
            .finish()
            .map_err(|e| PackageError::ArchiveWrite(e.to_string()))?;
        Ok(cursor.into_inner())
    }
}
