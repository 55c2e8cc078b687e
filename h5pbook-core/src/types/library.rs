//! Library identifiers and the resolved library table

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// The fixed set of content types a book can contain
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ContentType {
    Column,
    Text,
    Accordion,
    SingleChoiceSet,
    Image,
    Video,
    Blanks,
    DragText,
}

/// Machine name of the rich text renderer
pub const ADVANCED_TEXT: &str = "H5P.AdvancedText";

/// Machine name of the plain text renderer, tried when the rich one is absent
pub const PLAIN_TEXT: &str = "H5P.Text";

impl ContentType {
    pub const ALL: [ContentType; 8] = [
        ContentType::Column,
        ContentType::Text,
        ContentType::Accordion,
        ContentType::SingleChoiceSet,
        ContentType::Image,
        ContentType::Video,
        ContentType::Blanks,
        ContentType::DragText,
    ];

    /// Candidate machine names, in resolution order
    pub fn machine_names(&self) -> &'static [&'static str] {
        match self {
            ContentType::Column => &["H5P.Column"],
            ContentType::Text => &[ADVANCED_TEXT, PLAIN_TEXT],
            ContentType::Accordion => &["H5P.Accordion"],
            ContentType::SingleChoiceSet => &["H5P.SingleChoiceSet"],
            ContentType::Image => &["H5P.Image"],
            ContentType::Video => &["H5P.Video"],
            ContentType::Blanks => &["H5P.Blanks"],
            ContentType::DragText => &["H5P.DragText"],
        }
    }

    /// Value used for `metadata.contentType`
    pub fn display_name(&self) -> &'static str {
        match self {
            ContentType::Column => "Column",
            ContentType::Text => "Text",
            ContentType::Accordion => "Accordion",
            ContentType::SingleChoiceSet => "Single Choice Set",
            ContentType::Image => "Image",
            ContentType::Video => "Video",
            ContentType::Blanks => "Fill in the Blanks",
            ContentType::DragText => "Drag the Words",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A version-qualified library identifier such as `H5P.Accordion 1.0`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LibraryId {
    pub machine_name: String,
    pub major: u32,
    pub minor: u32,
}

impl LibraryId {
    pub fn new(machine_name: impl Into<String>, major: u32, minor: u32) -> Self {
        Self {
            machine_name: machine_name.into(),
            major,
            minor,
        }
    }
}

impl fmt::Display for LibraryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}.{}", self.machine_name, self.major, self.minor)
    }
}

impl Serialize for LibraryId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Resolution outcome for one content type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryEntry {
    Available(LibraryId),
    Unavailable,
}

impl LibraryEntry {
    pub fn id(&self) -> Option<&LibraryId> {
        match self {
            LibraryEntry::Available(id) => Some(id),
            LibraryEntry::Unavailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, LibraryEntry::Available(_))
    }
}

impl Serialize for LibraryEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            LibraryEntry::Available(id) => serializer.collect_str(id),
            LibraryEntry::Unavailable => serializer.serialize_none(),
        }
    }
}

/// Content type to library mapping, built once per run and read-only afterwards
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LibraryTable {
    entries: BTreeMap<ContentType, LibraryEntry>,

    /// Whether the text entry resolved to the rich text renderer
    advanced_text: bool,
}

impl LibraryTable {
    /// A table with every content type unavailable
    pub fn empty() -> Self {
        Self {
            entries: ContentType::ALL
                .iter()
                .map(|t| (*t, LibraryEntry::Unavailable))
                .collect(),
            advanced_text: false,
        }
    }

    /// Record the resolution for one content type
    pub fn insert(&mut self, content_type: ContentType, entry: LibraryEntry) {
        if content_type == ContentType::Text {
            self.advanced_text = entry
                .id()
                .map(|id| id.machine_name == ADVANCED_TEXT)
                .unwrap_or(false);
        }
        self.entries.insert(content_type, entry);
    }

    /// Builder-style variant of [`insert`](Self::insert)
    pub fn with(mut self, content_type: ContentType, id: LibraryId) -> Self {
        self.insert(content_type, LibraryEntry::Available(id));
        self
    }

    pub fn get(&self, content_type: ContentType) -> &LibraryEntry {
        self.entries
            .get(&content_type)
            .unwrap_or(&LibraryEntry::Unavailable)
    }

    pub fn is_advanced_text(&self) -> bool {
        self.advanced_text
    }

    /// Content types that did not resolve
    pub fn unavailable(&self) -> Vec<ContentType> {
        ContentType::ALL
            .iter()
            .copied()
            .filter(|t| !self.get(*t).is_available())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ContentType, &LibraryEntry)> {
        self.entries.iter()
    }
}

impl Default for LibraryTable {
    fn default() -> Self {
        Self::empty()
    }
}
