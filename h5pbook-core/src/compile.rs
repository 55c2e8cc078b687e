//! The compile pipeline: source text + template archive -> package bytes

use crate::builder::BuildContext;
use crate::decoder::decode_source;
use crate::error::{ParseError, Result};
use crate::package::{assemble_chapters, assemble_package, DEFAULT_COMPRESSION_LEVEL};
use crate::render::{CmarkRenderer, MarkdownRenderer};
use crate::template::Template;
use crate::types::{ContentObject, LibraryTable};
use std::io::Write;
use std::path::Path;

/// File extension of compiled packages
pub const PACKAGE_EXTENSION: &str = "h5p";

/// MIME type packages are served with
pub const PACKAGE_MIME_TYPE: &str = "application/zip";

/// Options for a compile run
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Whether to enable the Markdown tables extension
    pub tables: bool,
    /// Whether to enable the Markdown strikethrough extension
    pub strikethrough: bool,
    /// Deflate level of the output archive
    pub compression_level: i64,
    /// Build chapters concurrently
    pub parallel: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            tables: true,
            strikethrough: true,
            compression_level: DEFAULT_COMPRESSION_LEVEL,
            parallel: true,
        }
    }
}

impl CompileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tables(mut self, enable: bool) -> Self {
        self.tables = enable;
        self
    }

    pub fn with_strikethrough(mut self, enable: bool) -> Self {
        self.strikethrough = enable;
        self
    }

    /// Clamped to the deflate range 0..=9
    pub fn with_compression_level(mut self, level: i64) -> Self {
        self.compression_level = level.clamp(0, 9);
        self
    }

    pub fn with_parallel_chapters(mut self, enable: bool) -> Self {
        self.parallel = enable;
        self
    }

    fn renderer(&self) -> CmarkRenderer {
        CmarkRenderer::new()
            .with_tables(self.tables)
            .with_strikethrough(self.strikethrough)
    }
}

/// Compiles sources against one validated template.
///
/// Libraries are resolved once at construction, so one compiler can build
/// any number of sources.
pub struct Compiler {
    template: Template,
    libraries: LibraryTable,
    renderer: Box<dyn MarkdownRenderer>,
    options: CompileOptions,
}

impl Compiler {
    pub fn new(template: Template) -> Self {
        Self::with_options(template, CompileOptions::default())
    }

    pub fn with_options(template: Template, options: CompileOptions) -> Self {
        let libraries = template.resolve_libraries();
        Self {
            renderer: Box::new(options.renderer()),
            template,
            libraries,
            options,
        }
    }

    /// Replace the Markdown renderer
    pub fn with_renderer(mut self, renderer: impl MarkdownRenderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn libraries(&self) -> &LibraryTable {
        &self.libraries
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Decode the source and build one chapter container per chapter, in source order
    pub fn build_chapters(&self, source: &str) -> std::result::Result<Vec<ContentObject>, ParseError> {
        let chapters = decode_source(source)?;
        tracing::debug!("Decoded {} chapters", chapters.len());

        let ctx = BuildContext::new(&self.libraries, self.renderer.as_ref());
        Ok(assemble_chapters(&chapters, &ctx, self.options.parallel))
    }

    /// Compile a source document into package bytes
    pub fn compile(&self, source: &str) -> Result<Vec<u8>> {
        let chapters = self.build_chapters(source)?;
        let bytes = assemble_package(
            self.template.bytes(),
            &chapters,
            self.options.compression_level,
        )?;

        tracing::info!(
            "Compiled {} chapters into {} byte package",
            chapters.len(),
            bytes.len()
        );
        Ok(bytes)
    }

    /// Compile and write the package. Nothing is written unless compiling succeeded.
    pub fn compile_to(&self, source: &str, writer: &mut dyn Write) -> Result<()> {
        let bytes = self.compile(source)?;
        writer.write_all(&bytes)?;
        Ok(())
    }
}

/// Compile a source against template bytes with default options
pub fn compile(source: &str, template_bytes: Vec<u8>) -> Result<Vec<u8>> {
    let template = Template::from_bytes(template_bytes)?;
    Compiler::new(template).compile(source)
}

/// Output file name for an input document: its base name with a `.h5p` extension
pub fn package_file_name(input: impl AsRef<Path>) -> String {
    let stem = input
        .as_ref()
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "book".to_string());
    format!("{}.{}", stem, PACKAGE_EXTENSION)
}
