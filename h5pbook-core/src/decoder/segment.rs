//! Segmentation parser: splits a chapter body into typed content blocks
//!
//! A single pass over the lines with one accumulator. Sentinel tag lines
//! flush the accumulator and switch the block kind; a Markdown image line
//! seen while accumulating text becomes its own one-line image block.

use crate::types::{BlockKind, ContentBlock};
use regex::Regex;
use std::sync::LazyLock;

/// A `![alt](path)` reference parsed from a whole line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub alt: String,
    pub path: String,
}

static IMAGE_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^!\[([^\]]*)\]\(([^)]*)\)$").expect("image line pattern is valid")
});

/// Parse a line that consists of exactly one Markdown image
pub fn parse_image_line(line: &str) -> Option<ImageRef> {
    let caps = IMAGE_LINE_RE.captures(line.trim())?;
    Some(ImageRef {
        alt: caps[1].trim().to_string(),
        path: caps[2].trim().to_string(),
    })
}

/// Split body lines into content blocks, preserving source order
pub fn segment<S: AsRef<str>>(lines: &[S]) -> Vec<ContentBlock> {
    let mut segmenter = Segmenter::new();
    for line in lines {
        segmenter.feed(line.as_ref());
    }
    segmenter.finish()
}

struct Segmenter {
    blocks: Vec<ContentBlock>,
    kind: BlockKind,
    lines: Vec<String>,
}

impl Segmenter {
    fn new() -> Self {
        Self {
            blocks: Vec::new(),
            kind: BlockKind::Text,
            lines: Vec::new(),
        }
    }

    fn feed(&mut self, line: &str) {
        if let Some(kind) = BlockKind::from_tag(line) {
            self.flush();
            self.kind = kind;
            return;
        }

        if self.kind == BlockKind::Text && parse_image_line(line).is_some() {
            self.flush();
            self.blocks
                .push(ContentBlock::new(BlockKind::Image, vec![line.to_string()]));
            return;
        }

        self.lines.push(line.to_string());
    }

    /// Emit the current block. Blank text blocks are dropped; other kinds
    /// are always emitted since a tag alone (e.g. `[VIDEO]`) is meaningful.
    fn flush(&mut self) {
        let block = ContentBlock::new(self.kind, std::mem::take(&mut self.lines));
        if block.kind == BlockKind::Text && block.is_blank() {
            return;
        }
        self.blocks.push(block);
    }

    fn finish(mut self) -> Vec<ContentBlock> {
        self.flush();
        self.blocks
    }
}
