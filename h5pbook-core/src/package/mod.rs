//! Package assembly
//!
//! Copies the template into memory, replaces its content document with the
//! built chapters, adds the placeholder image when something references it,
//! strips explicit directory entries under the content root and serializes the
//! result. Nothing is returned unless every step succeeds.

mod archive;
mod chapter;

pub use archive::{ArchiveEntry, PackageArchive};
pub use chapter::{assemble_chapter, assemble_chapters};

use crate::builder::PLACEHOLDER_IMAGE_PATH;
use crate::error::PackageError;
use crate::types::ContentObject;
use base64::Engine;
use serde_json::{Map, Value};

/// Prefix of every entry that belongs to the content root
pub const CONTENT_ROOT: &str = "content/";

/// Archive path of the content document
pub const CONTENT_PATH: &str = "content/content.json";

/// Default deflate level for the output archive
pub const DEFAULT_COMPRESSION_LEVEL: i64 = 6;

/// 1x1 transparent PNG
const PLACEHOLDER_IMAGE_PNG: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

/// Bytes of the placeholder image asset
pub fn placeholder_image() -> Result<Vec<u8>, PackageError> {
    base64::engine::general_purpose::STANDARD
        .decode(PLACEHOLDER_IMAGE_PNG)
        .map_err(|e| PackageError::Serialize(format!("placeholder image: {}", e)))
}

/// Archive path of the placeholder image
pub fn placeholder_image_entry() -> String {
    format!("{}{}", CONTENT_ROOT, PLACEHOLDER_IMAGE_PATH)
}

/// Produce the output archive bytes from template bytes and built chapters.
///
/// Keys of the template's content document other than `chapters` are kept.
pub fn assemble_package(
    template_bytes: &[u8],
    chapters: &[ContentObject],
    compression_level: i64,
) -> Result<Vec<u8>, PackageError> {
    let mut archive = PackageArchive::from_bytes(template_bytes)?;

    let mut document = existing_document(&archive);
    let chapters =
        serde_json::to_value(chapters).map_err(|e| PackageError::Serialize(e.to_string()))?;
    document.insert("chapters".to_string(), chapters);

    let serialized = serde_json::to_string(&Value::Object(document))
        .map_err(|e| PackageError::Serialize(e.to_string()))?;

    let needs_placeholder = serialized.contains(PLACEHOLDER_IMAGE_PATH);
    archive.write_file(CONTENT_PATH, serialized.into_bytes());

    let image_entry = placeholder_image_entry();
    if needs_placeholder && !archive.contains(&image_entry) {
        tracing::debug!("Adding placeholder image at {}", image_entry);
        archive.write_file(&image_entry, placeholder_image()?);
    }

    let removed = archive.remove_directory_entries(CONTENT_ROOT)?;
    if !removed.is_empty() {
        tracing::debug!("Removed {} directory entries: {:?}", removed.len(), removed);
    }

    let bytes = archive.to_bytes(compression_level)?;
    tracing::info!(
        "Assembled package: {} entries, {} bytes",
        archive.len(),
        bytes.len()
    );
    Ok(bytes)
}

/// The template's content document as a JSON object, or an empty one when it
/// is absent or not an object
fn existing_document(archive: &PackageArchive) -> Map<String, Value> {
    match archive
        .read(CONTENT_PATH)
        .map(|data| serde_json::from_slice::<Value>(data))
    {
        Some(Ok(Value::Object(map))) => map,
        Some(_) => {
            tracing::warn!("Template {} is not a JSON object, replacing it", CONTENT_PATH);
            Map::new()
        }
        None => Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::test_support::*;
    use crate::builder::{BlockBuilder, BuildContext, ImageBuilder};
    use crate::types::{ContentMetadata, ContentParams, ContentType, LibraryId, TextParams};

    fn template_archive(content: Option<&str>) -> Vec<u8> {
        let mut archive = PackageArchive::new();
        archive.write_file("h5p.json", br#"{"mainLibrary":"H5P.InteractiveBook"}"#.to_vec());
        archive.add_directory("content/");
        archive.add_directory("content/images/");
        if let Some(content) = content {
            archive.write_file(CONTENT_PATH, content.as_bytes().to_vec());
        }
        archive.write_file("content/images/cover.jpg", vec![0xff, 0xd8]);
        archive.add_directory("H5P.Column-1.18/");
        archive.write_file("H5P.Column-1.18/library.json", b"{}".to_vec());
        archive.to_bytes(6).unwrap()
    }

    fn text_chapter(title: &str) -> ContentObject {
        ContentObject::new(
            LibraryId::new("H5P.AdvancedText", 1, 1),
            ContentParams::Text(TextParams::new("<p>x</p>")),
            ContentMetadata::new(title, ContentType::Text),
        )
    }

    fn content_document(bytes: &[u8]) -> Value {
        let archive = PackageArchive::from_bytes(bytes).unwrap();
        serde_json::from_slice(archive.read(CONTENT_PATH).unwrap()).unwrap()
    }

    #[test]
    fn test_replaces_chapters_and_keeps_other_keys() {
        let template = template_archive(Some(r#"{"chapters":[],"behaviour":{"displaySummary":true}}"#));

        let bytes = assemble_package(&template, &[text_chapter("A"), text_chapter("B")], 6).unwrap();
        let document = content_document(&bytes);

        assert_eq!(document["chapters"].as_array().unwrap().len(), 2);
        assert_eq!(document["chapters"][1]["metadata"]["title"], "B");
        assert_eq!(document["behaviour"]["displaySummary"], true);
    }

    #[test]
    fn test_creates_content_document_when_absent() {
        let bytes = assemble_package(&template_archive(None), &[text_chapter("A")], 6).unwrap();
        assert_eq!(content_document(&bytes)["chapters"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_directory_entries_under_content_are_removed() {
        let bytes = assemble_package(&template_archive(Some("{}")), &[text_chapter("A")], 6).unwrap();
        let archive = PackageArchive::from_bytes(&bytes).unwrap();

        assert!(!archive.contains("content/"));
        assert!(!archive.contains("content/images/"));
        assert!(archive.contains("content/images/cover.jpg"));
        assert!(archive.contains("H5P.Column-1.18/"));
        assert!(archive.contains("H5P.Column-1.18/library.json"));
    }

    #[test]
    fn test_placeholder_added_only_when_referenced() {
        let template = template_archive(Some("{}"));
        let bytes = assemble_package(&template, &[text_chapter("A")], 6).unwrap();
        assert!(!PackageArchive::from_bytes(&bytes).unwrap().contains(&placeholder_image_entry()));

        let table = full_table();
        let ctx = BuildContext::new(&table, &RENDERER);
        let image = ImageBuilder.build_with(
            LibraryId::new("H5P.Image", 1, 1),
            &lines(&["![x](y.png)"]),
            &ctx,
        );
        let bytes = assemble_package(&template, &[image], 6).unwrap();
        let archive = PackageArchive::from_bytes(&bytes).unwrap();

        let png = archive.read("content/images/placeholder.png").unwrap();
        assert_eq!(&png[..4], b"\x89PNG");
    }

    #[test]
    fn test_existing_placeholder_is_kept() {
        let mut archive = PackageArchive::from_bytes(&template_archive(Some("{}"))).unwrap();
        archive.write_file(&placeholder_image_entry(), vec![7, 7, 7]);
        let template = archive.to_bytes(6).unwrap();

        let table = full_table();
        let ctx = BuildContext::new(&table, &RENDERER);
        let image = ImageBuilder.build_with(
            LibraryId::new("H5P.Image", 1, 1),
            &lines(&["![x](y.png)"]),
            &ctx,
        );
        let bytes = assemble_package(&template, &[image], 6).unwrap();
        let archive = PackageArchive::from_bytes(&bytes).unwrap();

        assert_eq!(archive.read("content/images/placeholder.png"), Some(&[7u8, 7, 7][..]));
        let placeholders = archive
            .entries()
            .iter()
            .filter(|e| e.name == "content/images/placeholder.png")
            .count();
        assert_eq!(placeholders, 1);
    }

    #[test]
    fn test_corrupt_template_fails() {
        assert!(matches!(
            assemble_package(b"not a zip", &[], 6),
            Err(PackageError::ArchiveRead(_))
        ));
    }
}
