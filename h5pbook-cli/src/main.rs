//! H5pBook CLI - compile tag-annotated Markdown into Interactive Book packages

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Parse and validate jobs argument (must be at least 1)
fn parse_jobs(s: &str) -> Result<usize, String> {
    let n: usize = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
    if n < 1 {
        Err("jobs must be at least 1".to_string())
    } else {
        Ok(n)
    }
}

/// Parse a deflate level (0-9)
fn parse_level(s: &str) -> Result<i64, String> {
    let n: i64 = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
    if (0..=9).contains(&n) {
        Ok(n)
    } else {
        Err("compression level must be between 0 and 9".to_string())
    }
}

#[derive(Parser)]
#[command(name = "h5pbook")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command that compiles
#[derive(Args, Clone, Debug)]
pub struct BuildArgs {
    /// Disable the Markdown tables extension
    #[arg(long)]
    pub no_tables: bool,

    /// Build chapters one after another instead of in parallel
    #[arg(long)]
    pub sequential: bool,

    /// Deflate level of the output archive (0-9)
    #[arg(long, default_value = "6", value_parser = parse_level)]
    pub compression_level: i64,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a Markdown document into an .h5p package
    Build {
        /// Input Markdown file
        input: String,

        /// Interactive Book template (.h5p)
        #[arg(short, long)]
        template: String,

        /// Output file path (defaults to the input name with .h5p)
        #[arg(short, long)]
        output: Option<String>,

        #[command(flatten)]
        options: BuildArgs,
    },

    /// Show which content libraries a template provides
    Inspect {
        /// Template file path
        template: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check a Markdown document's chapter and block structure
    Check {
        /// Input Markdown file
        input: String,

        /// Also report blocks the template cannot build
        #[arg(short, long)]
        template: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compile every Markdown document in a directory
    Batch {
        /// Input directory
        input_dir: String,

        /// Interactive Book template (.h5p)
        #[arg(short, long)]
        template: String,

        /// Output directory
        #[arg(short, long)]
        output_dir: String,

        /// Number of parallel jobs (must be at least 1)
        #[arg(short, long, default_value = "4", value_parser = parse_jobs)]
        jobs: usize,

        #[command(flatten)]
        options: BuildArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "h5pbook_cli=debug,h5pbook_core=debug"
    } else {
        "h5pbook_cli=info,h5pbook_core=warn"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Build {
            input,
            template,
            output,
            options,
        } => commands::build(&input, &template, output.as_deref(), &options),

        Commands::Inspect { template, json } => commands::inspect(&template, json),

        Commands::Check {
            input,
            template,
            json,
        } => commands::check(&input, template.as_deref(), json),

        Commands::Batch {
            input_dir,
            template,
            output_dir,
            jobs,
            options,
        } => commands::batch(&input_dir, &template, &output_dir, jobs, &options),
    }
}
