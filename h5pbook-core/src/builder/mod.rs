//! Content block builders
//!
//! One builder per block kind. A builder either produces a content object or
//! refuses with [`Built::Unavailable`] when the template lacks its library;
//! the chapter assembler then substitutes [`fallback_object`].

mod accordion;
mod exercise;
mod media;
mod quiz;
mod text;

pub use accordion::{split_panels, AccordionBuilder, DEFAULT_PANEL_TITLE};
pub use exercise::{
    DragWordsBuilder, FillBlanksBuilder, DRAG_WORDS_DESCRIPTION, FILL_BLANKS_DESCRIPTION,
};
pub use media::{
    ImageBuilder, VideoBuilder, DEFAULT_IMAGE_ALT, PLACEHOLDER_IMAGE_MIME, PLACEHOLDER_IMAGE_PATH,
};
pub use quiz::{parse_questions, Question, QuizBuilder};
pub use text::{fallback_object, text_object, TextBuilder};

use crate::render::{html, MarkdownRenderer};
use crate::types::{BlockKind, ContentBlock, ContentObject, ContentType, LibraryId, LibraryTable};

/// Used for fallbacks and panel bodies when the template resolves no text library
pub const DEFAULT_TEXT_LIBRARY: (&str, u32, u32) = ("H5P.AdvancedText", 1, 1);

/// Used for chapter containers when the template resolves no column library
pub const DEFAULT_COLUMN_LIBRARY: (&str, u32, u32) = ("H5P.Column", 1, 18);

/// Outcome of building one block
#[derive(Debug, Clone, PartialEq)]
pub enum Built {
    Object(ContentObject),
    Unavailable(ContentType),
}

impl Built {
    pub fn into_object(self) -> Option<ContentObject> {
        match self {
            Built::Object(object) => Some(object),
            Built::Unavailable(_) => None,
        }
    }
}

/// Read-only inputs shared by every builder call
#[derive(Clone, Copy)]
pub struct BuildContext<'a> {
    pub libraries: &'a LibraryTable,
    pub renderer: &'a dyn MarkdownRenderer,
}

impl<'a> BuildContext<'a> {
    pub fn new(libraries: &'a LibraryTable, renderer: &'a dyn MarkdownRenderer) -> Self {
        Self {
            libraries,
            renderer,
        }
    }

    /// Render Markdown and apply the text post-processing
    pub fn render(&self, markdown: &str) -> String {
        html::postprocess(&self.renderer.render(markdown))
    }

    /// The resolved text library, or the built-in default
    pub fn text_library(&self) -> LibraryId {
        self.library_or_default(ContentType::Text, DEFAULT_TEXT_LIBRARY)
    }

    /// The resolved column library, or the built-in default
    pub fn column_library(&self) -> LibraryId {
        self.library_or_default(ContentType::Column, DEFAULT_COLUMN_LIBRARY)
    }

    fn library_or_default(&self, content_type: ContentType, default: (&str, u32, u32)) -> LibraryId {
        match self.libraries.get(content_type).id() {
            Some(id) => id.clone(),
            None => {
                let (name, major, minor) = default;
                tracing::warn!("Using default {} library {} {}.{}", content_type, name, major, minor);
                LibraryId::new(name, major, minor)
            }
        }
    }
}

/// Builds one kind of content block
pub trait BlockBuilder: Send + Sync {
    /// The library this builder needs
    fn content_type(&self) -> ContentType;

    /// Build with an already resolved library
    fn build_with(
        &self,
        library: LibraryId,
        lines: &[String],
        ctx: &BuildContext<'_>,
    ) -> ContentObject;

    /// Build, or refuse when the library is unavailable
    fn build(&self, lines: &[String], ctx: &BuildContext<'_>) -> Built {
        let content_type = self.content_type();
        match ctx.libraries.get(content_type).id() {
            Some(id) => Built::Object(self.build_with(id.clone(), lines, ctx)),
            None => Built::Unavailable(content_type),
        }
    }
}

/// Get the builder for a block kind
pub fn builder_for_kind(kind: BlockKind) -> &'static dyn BlockBuilder {
    match kind {
        BlockKind::Text => &TextBuilder,
        BlockKind::Accordion => &AccordionBuilder,
        BlockKind::Quiz => &QuizBuilder,
        BlockKind::Image => &ImageBuilder,
        BlockKind::Video => &VideoBuilder,
        BlockKind::FillBlanks => &FillBlanksBuilder,
        BlockKind::DragWords => &DragWordsBuilder,
    }
}

/// Build a block with its matching builder
pub fn build_block(block: &ContentBlock, ctx: &BuildContext<'_>) -> Built {
    builder_for_kind(block.kind).build(&block.lines, ctx)
}
