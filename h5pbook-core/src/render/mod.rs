//! Markdown to HTML rendering
//!
//! Rendering itself is delegated to pulldown-cmark behind the
//! [`MarkdownRenderer`] trait; [`html`] holds the post-processing the text
//! builder applies to whatever the renderer returns.

pub mod html;

use pulldown_cmark::{html as cmark_html, Options, Parser};

/// Pure Markdown to HTML function used by every builder that renders prose
pub trait MarkdownRenderer: Send + Sync {
    fn render(&self, markdown: &str) -> String;
}

/// CommonMark renderer backed by pulldown-cmark
#[derive(Debug, Clone)]
pub struct CmarkRenderer {
    /// Whether to enable tables extension
    enable_tables: bool,
    /// Whether to enable strikethrough extension
    enable_strikethrough: bool,
}

impl CmarkRenderer {
    pub const fn new() -> Self {
        Self {
            enable_tables: true,
            enable_strikethrough: true,
        }
    }

    /// Enable or disable tables parsing
    pub fn with_tables(mut self, enable: bool) -> Self {
        self.enable_tables = enable;
        self
    }

    /// Enable or disable strikethrough parsing
    pub fn with_strikethrough(mut self, enable: bool) -> Self {
        self.enable_strikethrough = enable;
        self
    }

    fn get_parser_options(&self) -> Options {
        let mut options = Options::empty();
        if self.enable_tables {
            options.insert(Options::ENABLE_TABLES);
        }
        if self.enable_strikethrough {
            options.insert(Options::ENABLE_STRIKETHROUGH);
        }
        options
    }
}

impl Default for CmarkRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer for CmarkRenderer {
    fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.get_parser_options());
        let mut output = String::with_capacity(markdown.len() * 3 / 2);
        cmark_html::push_html(&mut output, parser);
        output
    }
}
