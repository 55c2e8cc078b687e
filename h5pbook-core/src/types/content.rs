//! Structured content objects, the unit of output content

use super::{ContentType, LibraryId};
use super::params::*;
use serde::Serialize;
use uuid::Uuid;

/// One type-tagged unit of output content
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ContentObject {
    /// Version-qualified library identifier, e.g. `H5P.AdvancedText 1.1`
    pub library: LibraryId,

    pub params: ContentParams,

    /// Fresh for every object; never repeats within one package
    #[serde(rename = "subContentId")]
    pub sub_content_id: Uuid,

    pub metadata: ContentMetadata,
}

impl ContentObject {
    /// Create an object with a freshly generated sub-content id
    pub fn new(library: LibraryId, params: ContentParams, metadata: ContentMetadata) -> Self {
        Self {
            library,
            params,
            sub_content_id: Uuid::new_v4(),
            metadata,
        }
    }

    /// Visit this object and every object nested inside it, depth first
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a ContentObject)) {
        visit(self);
        match &self.params {
            ContentParams::Column(column) => {
                for item in &column.content {
                    item.content.walk(visit);
                }
            }
            ContentParams::Accordion(accordion) => {
                for panel in &accordion.panels {
                    panel.content.walk(visit);
                }
            }
            _ => {}
        }
    }
}

/// Object metadata as the runtime expects it
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ContentMetadata {
    pub license: String,
    pub title: String,
    #[serde(rename = "contentType")]
    pub content_type: String,
}

impl ContentMetadata {
    /// Metadata with the "undisclosed" license
    pub fn new(title: impl Into<String>, content_type: ContentType) -> Self {
        Self {
            license: "U".to_string(),
            title: title.into(),
            content_type: content_type.display_name().to_string(),
        }
    }
}

/// Type-specific parameters
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum ContentParams {
    Column(ColumnParams),
    Text(TextParams),
    Accordion(AccordionParams),
    SingleChoiceSet(SingleChoiceSetParams),
    Blanks(BlanksParams),
    DragText(DragTextParams),
    Image(ImageParams),
    Video(VideoParams),
}

/// How the column separates one item from the next
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SeparatorMode {
    #[default]
    Auto,
}

/// One entry of a chapter container
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ColumnItem {
    pub content: ContentObject,
    #[serde(rename = "useSeparator")]
    pub separator_mode: SeparatorMode,
}

impl ColumnItem {
    pub fn new(content: ContentObject) -> Self {
        Self {
            content,
            separator_mode: SeparatorMode::Auto,
        }
    }
}

/// Parameters of a chapter container
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct ColumnParams {
    pub content: Vec<ColumnItem>,
}
