//! Content blocks produced by the segmentation parser

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of a content block
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    /// Free-form Markdown prose
    Text,

    /// Collapsible panels split on `+++` markers
    Accordion,

    /// Single-choice question set
    Quiz,

    /// One `![alt](path)` line
    Image,

    /// Empty video player
    Video,

    /// Fill-in-the-blanks exercise
    FillBlanks,

    /// Drag-the-words exercise
    DragWords,
}

impl BlockKind {
    /// Match a sentinel tag line. The line must be exactly the tag once trimmed.
    pub fn from_tag(line: &str) -> Option<Self> {
        match line.trim() {
            "[TEXT]" => Some(BlockKind::Text),
            "[ACCORDION]" => Some(BlockKind::Accordion),
            "[QUIZ]" => Some(BlockKind::Quiz),
            "[VIDEO]" => Some(BlockKind::Video),
            "[FILL]" => Some(BlockKind::FillBlanks),
            "[DRAG]" => Some(BlockKind::DragWords),
            _ => None,
        }
    }

    /// Human-readable label used in fallback annotations and outlines
    pub fn label(&self) -> &'static str {
        match self {
            BlockKind::Text => "Text",
            BlockKind::Accordion => "Accordion",
            BlockKind::Quiz => "Quiz",
            BlockKind::Image => "Image",
            BlockKind::Video => "Video",
            BlockKind::FillBlanks => "Fill in the blanks",
            BlockKind::DragWords => "Drag the words",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A contiguous span of source lines recognised as one unit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContentBlock {
    pub kind: BlockKind,

    /// Raw lines; sentinel tag lines are never stored
    pub lines: Vec<String>,
}

impl ContentBlock {
    pub fn new(kind: BlockKind, lines: Vec<String>) -> Self {
        Self { kind, lines }
    }

    /// Shorthand for a text block
    pub fn text<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(BlockKind::Text, lines.into_iter().map(Into::into).collect())
    }

    /// Whether every line is blank (or there are none)
    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|l| l.trim().is_empty())
    }

    /// The block's lines joined back into Markdown source
    pub fn source(&self) -> String {
        self.lines.join("\n")
    }
}
