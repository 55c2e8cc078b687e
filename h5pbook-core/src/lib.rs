//! H5pBook Core Library
//!
//! Compiles tag-annotated Markdown into an H5P Interactive Book package.
//! The source is split into chapters and typed blocks, each block is built
//! into an H5P content object using the library versions the template
//! archive ships, and the result is written back into a copy of the
//! template.

pub mod builder;
pub mod compile;
pub mod decoder;
pub mod error;
pub mod package;
pub mod render;
pub mod template;
pub mod types;

pub use compile::{compile, package_file_name, CompileOptions, Compiler};
pub use decoder::{decode_source, outline_source, split_chapters, DecodedChapter};
pub use error::{H5pBookError, PackageError, ParseError, Result, TemplateError};
pub use template::{Template, TemplateReport};
pub use types::{
    BlockKind, Chapter, ContentBlock, ContentObject, ContentType, LibraryEntry, LibraryId,
    LibraryTable,
};
