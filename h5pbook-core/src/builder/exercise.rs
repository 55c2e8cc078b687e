//! Word exercises: fill in the blanks and drag the words.
//!
//! Neither builder interprets the `*word*` markers; the runtime does.

use super::{BlockBuilder, BuildContext};
use crate::types::{
    BlanksBehaviour, BlanksParams, ContentMetadata, ContentObject, ContentParams, ContentType,
    DragTextBehaviour, DragTextParams, LibraryId,
};

pub const FILL_BLANKS_DESCRIPTION: &str = "<p>Fill in the missing words.</p>";

pub const DRAG_WORDS_DESCRIPTION: &str = "Drag the words into the correct boxes.";

pub struct FillBlanksBuilder;

impl BlockBuilder for FillBlanksBuilder {
    fn content_type(&self) -> ContentType {
        ContentType::Blanks
    }

    fn build_with(
        &self,
        library: LibraryId,
        lines: &[String],
        _ctx: &BuildContext<'_>,
    ) -> ContentObject {
        // Each non-blank line is graded on its own
        let questions = lines
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .map(|l| format!("<p>{}</p>", l))
            .collect();

        ContentObject::new(
            library,
            ContentParams::Blanks(BlanksParams {
                text: FILL_BLANKS_DESCRIPTION.to_string(),
                questions,
                behaviour: BlanksBehaviour::default(),
            }),
            ContentMetadata::new("Fill in the blanks", ContentType::Blanks),
        )
    }
}

pub struct DragWordsBuilder;

impl BlockBuilder for DragWordsBuilder {
    fn content_type(&self) -> ContentType {
        ContentType::DragText
    }

    fn build_with(
        &self,
        library: LibraryId,
        lines: &[String],
        _ctx: &BuildContext<'_>,
    ) -> ContentObject {
        ContentObject::new(
            library,
            ContentParams::DragText(DragTextParams {
                task_description: DRAG_WORDS_DESCRIPTION.to_string(),
                text_field: lines.join("\n"),
                behaviour: DragTextBehaviour::default(),
            }),
            ContentMetadata::new("Drag the words", ContentType::DragText),
        )
    }
}
