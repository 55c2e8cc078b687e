//! Chapter assembly: one column container per chapter

use crate::builder::{build_block, fallback_object, text_object, BuildContext, Built};
use crate::decoder::DecodedChapter;
use crate::render::html::EMPTY_PARAGRAPH;
use crate::types::{
    ColumnItem, ColumnParams, ContentMetadata, ContentObject, ContentParams, ContentType,
};
use rayon::prelude::*;

/// Build every block of a chapter and wrap the results in a column.
///
/// A block whose library is missing becomes a fallback text object, so the
/// column always holds one item per block. A chapter without blocks gets a
/// single empty text item.
pub fn assemble_chapter(chapter: &DecodedChapter, ctx: &BuildContext<'_>) -> ContentObject {
    let mut items: Vec<ColumnItem> = chapter
        .blocks
        .iter()
        .map(|block| {
            let object = match build_block(block, ctx) {
                Built::Object(object) => object,
                Built::Unavailable(content_type) => {
                    tracing::warn!(
                        "Chapter '{}': no {} library in template, using text fallback for {} block",
                        chapter.title,
                        content_type,
                        block.kind
                    );
                    fallback_object(block, ctx)
                }
            };
            ColumnItem::new(object)
        })
        .collect();

    if items.is_empty() {
        items.push(ColumnItem::new(text_object(
            ctx.text_library(),
            EMPTY_PARAGRAPH.to_string(),
            "Text",
        )));
    }

    tracing::debug!("Assembled chapter '{}' with {} items", chapter.title, items.len());

    ContentObject::new(
        ctx.column_library(),
        ContentParams::Column(ColumnParams { content: items }),
        ContentMetadata::new(chapter.title.clone(), ContentType::Column),
    )
}

/// Assemble all chapters, keeping source order whether or not `parallel` is set
pub fn assemble_chapters(
    chapters: &[DecodedChapter],
    ctx: &BuildContext<'_>,
    parallel: bool,
) -> Vec<ContentObject> {
    if parallel {
        chapters
            .par_iter()
            .map(|chapter| assemble_chapter(chapter, ctx))
            .collect()
    } else {
        chapters
            .iter()
            .map(|chapter| assemble_chapter(chapter, ctx))
            .collect()
    }
}
