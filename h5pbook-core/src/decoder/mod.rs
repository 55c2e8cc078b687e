//! Decoders turning the tag-annotated Markdown source into chapters and blocks

mod chapters;
mod segment;

pub use chapters::{split_chapters, IMPLICIT_CHAPTER_TITLE, UNTITLED_CHAPTER_TITLE};
pub use segment::{parse_image_line, segment, ImageRef};

use crate::error::ParseError;
use crate::types::{BlockKind, ContentBlock};
use serde::Serialize;

/// A chapter after segmentation
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedChapter {
    pub title: String,
    pub blocks: Vec<ContentBlock>,
}

/// Unify CRLF and lone CR line terminators to LF
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Split and segment a whole source document
pub fn decode_source(text: &str) -> Result<Vec<DecodedChapter>, ParseError> {
    let chapters = split_chapters(text)?;
    Ok(chapters
        .into_iter()
        .map(|chapter| DecodedChapter {
            blocks: segment(&chapter.body_lines),
            title: chapter.title,
        })
        .collect())
}

/// Summary of one chapter's structure, for authors checking their source
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChapterOutline {
    pub title: String,
    pub blocks: Vec<BlockOutline>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BlockOutline {
    pub kind: BlockKind,
    pub lines: usize,
}

/// Decode a source document into its chapter/block outline
pub fn outline_source(text: &str) -> Result<Vec<ChapterOutline>, ParseError> {
    Ok(decode_source(text)?
        .into_iter()
        .map(|chapter| ChapterOutline {
            title: chapter.title,
            blocks: chapter
                .blocks
                .iter()
                .map(|b| BlockOutline {
                    kind: b.kind,
                    lines: b.lines.len(),
                })
                .collect(),
        })
        .collect())
}
