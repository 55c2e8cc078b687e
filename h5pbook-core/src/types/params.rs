//! Parameter schemas for each supported content type
//!
//! Field names follow the runtime's semantics.json for the respective
//! library, so these structs serialize straight into `content.json`.

use super::ContentObject;
use serde::Serialize;
use uuid::Uuid;

/// Rich or plain text
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TextParams {
    pub text: String,
}

impl TextParams {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Collapsible panels
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AccordionParams {
    pub panels: Vec<AccordionPanel>,
    #[serde(rename = "hTag")]
    pub heading_tag: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AccordionPanel {
    pub content: ContentObject,
    pub title: String,
}

/// A set of single-choice questions
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SingleChoiceSetParams {
    pub choices: Vec<SingleChoice>,
    pub behaviour: SingleChoiceBehaviour,
    pub overall_feedback: Vec<FeedbackRange>,
}

/// One question; `answers[0]` is the correct answer
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SingleChoice {
    pub sub_content_id: Uuid,
    pub question: String,
    pub answers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SingleChoiceBehaviour {
    pub auto_continue: bool,
    /// Milliseconds before advancing after a correct answer
    pub timeout_correct: u32,
    /// Milliseconds before advancing after a wrong answer
    pub timeout_wrong: u32,
    pub sound_effects_enabled: bool,
    pub enable_retry: bool,
    pub enable_solutions_button: bool,
    pub pass_percentage: u8,
}

impl Default for SingleChoiceBehaviour {
    fn default() -> Self {
        Self {
            auto_continue: true,
            timeout_correct: 2000,
            timeout_wrong: 3000,
            sound_effects_enabled: true,
            enable_retry: true,
            enable_solutions_button: true,
            pass_percentage: 100,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FeedbackRange {
    pub from: u8,
    pub to: u8,
}

/// Fill in the blanks; blanks stay as literal `*word*` markers
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BlanksParams {
    /// Task description shown above the paragraphs
    pub text: String,
    /// One independently graded paragraph per entry
    pub questions: Vec<String>,
    pub behaviour: BlanksBehaviour,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlanksBehaviour {
    pub enable_retry: bool,
    pub enable_solutions_button: bool,
    pub enable_check_button: bool,
    pub auto_check: bool,
    pub case_sensitive: bool,
    pub show_solutions_requires_input: bool,
    pub separate_lines: bool,
    pub accept_spelling_errors: bool,
}

impl Default for BlanksBehaviour {
    fn default() -> Self {
        Self {
            enable_retry: true,
            enable_solutions_button: true,
            enable_check_button: true,
            auto_check: true,
            case_sensitive: false,
            show_solutions_requires_input: true,
            separate_lines: false,
            accept_spelling_errors: false,
        }
    }
}

/// Drag the words; the text field keeps its `*word*` markers
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DragTextParams {
    pub task_description: String,
    pub text_field: String,
    pub behaviour: DragTextBehaviour,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DragTextBehaviour {
    pub enable_retry: bool,
    pub enable_solutions_button: bool,
    pub enable_check_button: bool,
    pub instant_feedback: bool,
}

impl Default for DragTextBehaviour {
    fn default() -> Self {
        Self {
            enable_retry: true,
            enable_solutions_button: true,
            enable_check_button: true,
            instant_feedback: false,
        }
    }
}

/// Image pointing at a packaged asset
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImageParams {
    pub content_name: String,
    pub file: ImageFile,
    pub alt: String,
    pub decorative: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ImageFile {
    /// Path relative to the content root
    pub path: String,
    pub mime: String,
    pub copyright: Copyright,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Copyright {
    pub license: String,
}

/// Video player with no sources attached yet
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VideoParams {
    pub visuals: VideoVisuals,
    pub playback: VideoPlayback,
    pub sources: Vec<VideoSource>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VideoVisuals {
    pub fit: bool,
    pub controls: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VideoPlayback {
    pub autoplay: bool,
    #[serde(rename = "loop")]
    pub loop_playback: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VideoSource {
    pub path: String,
    pub mime: String,
}

impl Default for VideoParams {
    fn default() -> Self {
        Self {
            visuals: VideoVisuals {
                fit: true,
                controls: true,
            },
            playback: VideoPlayback {
                autoplay: false,
                loop_playback: false,
            },
            sources: Vec::new(),
        }
    }
}
