use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "javadoc-index")]
#[command(about = "Extract JavaDoc from Java sources into a searchable, path-keyed index")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log filter, e.g. `debug` or `javadoc_index=debug` (overridden by RUST_LOG)
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Print every indexed entry
    Index {
        /// Source directories or files (default: $JAVADOC_INDEX_SOURCES, then src/main/java)
        #[arg(value_name = "SOURCE")]
        sources: Vec<PathBuf>,

        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        #[arg(short = 'o', long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Print every canonical path, one per line
    Paths {
        #[arg(value_name = "SOURCE")]
        sources: Vec<PathBuf>,
    },
    /// Print the entry for one canonical path
    Show {
        /// e.g. `basic.NodeProcessor#accept(org.w3c.dom.Node)`
        path: String,

        #[arg(value_name = "SOURCE")]
        sources: Vec<PathBuf>,

        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}
