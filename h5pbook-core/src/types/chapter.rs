//! Chapter type representing one top-level page of the book

use serde::{Deserialize, Serialize};

/// A chapter as cut from the source document, before segmentation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chapter {
    /// Chapter title (text after the `# ` heading marker)
    pub title: String,

    /// Raw body lines, in document order, without the heading line
    pub body_lines: Vec<String>,
}

impl Chapter {
    /// Create a new chapter with a title and no body
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body_lines: Vec::new(),
        }
    }

    /// Replace the body lines
    pub fn with_lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.body_lines = lines.into_iter().map(Into::into).collect();
        self
    }

    /// Append a single body line
    pub fn push_line(&mut self, line: impl Into<String>) {
        self.body_lines.push(line.into());
    }

    /// Whether any body line carries non-whitespace text
    pub fn has_content(&self) -> bool {
        self.body_lines.iter().any(|l| !l.trim().is_empty())
    }
}
