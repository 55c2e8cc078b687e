//! Core types shared by the parser, builders and assemblers

mod block;
mod chapter;
mod content;
mod library;
mod params;

pub use block::{BlockKind, ContentBlock};
pub use chapter::Chapter;
pub use content::{
    ColumnItem, ColumnParams, ContentMetadata, ContentObject, ContentParams, SeparatorMode,
};
pub use library::{
    ContentType, LibraryEntry, LibraryId, LibraryTable, ADVANCED_TEXT, PLAIN_TEXT,
};
pub use params::{
    AccordionPanel, AccordionParams, BlanksBehaviour, BlanksParams, Copyright, DragTextBehaviour,
    DragTextParams, FeedbackRange, ImageFile, ImageParams, SingleChoice, SingleChoiceBehaviour,
    SingleChoiceSetParams, TextParams, VideoParams, VideoPlayback, VideoSource, VideoVisuals,
};
