//! Text builder and the library-missing fallback

use super::{BlockBuilder, BuildContext};
use crate::render::html::escape_html;
use crate::types::{
    ContentBlock, ContentMetadata, ContentObject, ContentParams, ContentType, LibraryId, TextParams,
};

/// Renders Markdown prose through the text renderer
pub struct TextBuilder;

impl BlockBuilder for TextBuilder {
    fn content_type(&self) -> ContentType {
        ContentType::Text
    }

    fn build_with(
        &self,
        library: LibraryId,
        lines: &[String],
        ctx: &BuildContext<'_>,
    ) -> ContentObject {
        let html = ctx.render(&lines.join("\n"));
        text_object(library, html, "Text")
    }
}

/// Wrap already rendered HTML in a text content object
pub fn text_object(library: LibraryId, html: String, title: &str) -> ContentObject {
    ContentObject::new(
        library,
        ContentParams::Text(TextParams::new(html)),
        ContentMetadata::new(title, ContentType::Text),
    )
}

/// Plain-text stand-in for a block whose library the template lacks.
///
/// Renders the block's own lines under a visible "library missing" note.
pub fn fallback_object(block: &ContentBlock, ctx: &BuildContext<'_>) -> ContentObject {
    let notice = format!(
        "<p><strong>[{}: library missing]</strong></p>\n",
        escape_html(block.kind.label())
    );

    let body = if block.is_blank() {
        String::new()
    } else {
        ctx.render(&block.source())
    };

    text_object(
        ctx.text_library(),
        format!("{}{}", notice, body),
        &format!("{} (library missing)", block.kind.label()),
    )
}
