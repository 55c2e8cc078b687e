//! Application state

use anyhow::{Context, Result};
use h5pbook_core::{CompileOptions, Compiler, Template};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Compiler for the configured default template, used when a request
    /// brings no template of its own
    pub default_compiler: Option<Arc<Compiler>>,

    /// Options for every compile this server runs
    pub options: CompileOptions,
}

impl AppState {
    /// Create state with an optional default template
    pub fn new(default_template: Option<Template>, options: CompileOptions) -> Self {
        Self {
            default_compiler: default_template
                .map(|template| Arc::new(Compiler::with_options(template, options.clone()))),
            options,
        }
    }

    /// Create state from the environment.
    ///
    /// `H5PBOOK_TEMPLATE` names a template archive loaded once at startup.
    pub fn from_env() -> Result<Self> {
        let default_template = match std::env::var("H5PBOOK_TEMPLATE").ok() {
            Some(path) if !path.trim().is_empty() => {
                let template = Template::open(&path)
                    .with_context(|| format!("Failed to load default template: {}", path))?;
                tracing::info!("Loaded default template from {}", path);
                Some(template)
            }
            _ => {
                tracing::info!("No default template configured; requests must upload one");
                None
            }
        };

        Ok(Self::new(default_template, CompileOptions::default()))
    }

    /// Build a compiler for an uploaded template, or reuse the default one
    pub fn compiler_for(&self, uploaded: Option<Template>) -> Option<Arc<Compiler>> {
        match uploaded {
            Some(template) => Some(Arc::new(Compiler::with_options(
                template,
                self.options.clone(),
            ))),
            None => self.default_compiler.clone(),
        }
    }
}
