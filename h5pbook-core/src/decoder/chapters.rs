//! Chapter splitter: cuts the source at `# ` heading lines

use super::normalize_line_endings;
use crate::error::ParseError;
use crate::types::Chapter;

/// Title given to content that appears before the first heading
pub const IMPLICIT_CHAPTER_TITLE: &str = "Introduction";

/// Title given to a `# ` heading with no text but with body content
pub const UNTITLED_CHAPTER_TITLE: &str = "Untitled";

/// Split source text into chapters, in document order
pub fn split_chapters(text: &str) -> Result<Vec<Chapter>, ParseError> {
    let normalized = normalize_line_endings(text);

    let mut chapters = Vec::new();
    let mut current = Chapter::new(IMPLICIT_CHAPTER_TITLE);
    let mut implicit = true;

    for line in normalized.lines() {
        if let Some(title) = heading_title(line) {
            push_chapter(&mut chapters, current, implicit);
            current = Chapter::new(title);
            implicit = false;
        } else {
            current.push_line(line);
        }
    }
    push_chapter(&mut chapters, current, implicit);

    if chapters.is_empty() {
        return Err(ParseError::NoChaptersFound);
    }

    tracing::debug!("Split source into {} chapters", chapters.len());
    Ok(chapters)
}

/// Title of a level-1 heading line, if the line is one
fn heading_title(line: &str) -> Option<&str> {
    line.strip_prefix("# ").map(str::trim)
}

fn push_chapter(chapters: &mut Vec<Chapter>, mut chapter: Chapter, implicit: bool) {
    if implicit {
        // Leading blank lines alone do not make an introduction
        if chapter.has_content() {
            chapters.push(chapter);
        }
        return;
    }

    if chapter.title.is_empty() {
        if !chapter.has_content() {
            return;
        }
        chapter.title = UNTITLED_CHAPTER_TITLE.to_string();
    }
    chapters.push(chapter);
}
