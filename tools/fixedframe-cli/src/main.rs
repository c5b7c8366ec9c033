//! fixedframe Command Line Interface
//!
//! Encodes, decodes and inspects fixed-width records described by schema files.

mod commands;
mod convert;
mod error;
mod output;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::filter::{Directive, EnvFilter};

use crate::commands::{codec, layout};
use crate::error::Result;

/// fixedframe Command Line Interface
///
/// Schema files are TOML, or JSON when the file name ends in `.json`.
#[derive(Parser, Debug)]
#[command(name = "fixedframe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for the layout command
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed table format
    Table,
    /// JSON format
    Json,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the byte layout of a schema
    Layout {
        /// Path to the schema description file
        #[arg(short, long, env = "FIXEDFRAME_SCHEMA")]
        schema: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Encode JSON records to fixed-width bytes
    Encode {
        /// Path to the schema description file
        #[arg(short, long, env = "FIXEDFRAME_SCHEMA")]
        schema: PathBuf,

        /// JSON object or array of objects (defaults to stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Terminate each record with a newline
        #[arg(long)]
        lines: bool,
    },

    /// Decode fixed-width bytes to a JSON array
    Decode {
        /// Path to the schema description file
        #[arg(short, long, env = "FIXEDFRAME_SCHEMA")]
        schema: PathBuf,

        /// Fixed-width input (defaults to stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Byte offset of the first record
        #[arg(long, default_value = "0")]
        offset: usize,

        /// Maximum number of records to decode
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Skip line breaks between records
        #[arg(long)]
        lines: bool,

        /// Strip trailing padding from text fields
        #[arg(long)]
        trim: bool,
    },

    /// Round-trip JSON records through their fixed-width form
    Normalize {
        /// Path to the schema description file
        #[arg(short, long, env = "FIXEDFRAME_SCHEMA")]
        schema: PathBuf,

        /// JSON object or array of objects (defaults to stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Commands::Layout { schema, format } => layout::run(&schema, format),
        Commands::Encode { schema, input, output, lines } => {
            codec::encode(&schema, input.as_deref(), output.as_deref(), lines)
        }
        Commands::Decode { schema, input, output, offset, count, lines, trim } => codec::decode(
            &schema,
            input.as_deref(),
            output.as_deref(),
            &codec::DecodeOptions { offset, count, lines, trim },
        ),
        Commands::Normalize { schema, input, output } => {
            codec::normalize(&schema, input.as_deref(), output.as_deref())
        }
    }
}

/// Logs go to stderr so they never mix with encoded output.
fn init_logging(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = if verbose == 0 && std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
        EnvFilter::from_default_env()
    } else {
        let directive: Directive = format!("fixedframe={level}").parse()?;
        EnvFilter::from_default_env().add_directive(directive)
    };

    tracing_subscriber::fmt().with_writer(std::io::stderr).with_env_filter(filter).init();
    Ok(())
}
