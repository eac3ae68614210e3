//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Flatten paginated search results into one hit per line
#[derive(Parser, Debug)]
#[command(name = "hitscroll")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Dotted path to the hit list in each page
    #[arg(long, global = true)]
    pub hits_path: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scroll through an Elasticsearch index
    Scroll {
        /// Scroll configuration file (YAML or JSON)
        #[arg(short = 'C', long)]
        config: Option<PathBuf>,

        /// Cluster URL (overrides config)
        #[arg(long)]
        url: Option<String>,

        /// Index name or pattern (overrides config)
        #[arg(short, long)]
        index: Option<String>,

        /// Inline query clause JSON (overrides config)
        #[arg(short, long)]
        query: Option<String>,

        /// Hits per page (overrides config)
        #[arg(long)]
        size: Option<u32>,

        /// Scroll keep-alive, e.g. 1m (overrides config)
        #[arg(long)]
        scroll: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Flatten a JSON array of search responses from a file
    Flatten {
        /// File holding a JSON array of pages
        file: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Validate a scroll configuration file
    Validate {
        /// Scroll configuration file (YAML or JSON)
        #[arg(short = 'C', long)]
        config: PathBuf,
    },
}

/// Options shared by commands that print hits
#[derive(clap::Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Stop after this many hits
    #[arg(long)]
    pub max_hits: Option<u64>,

    /// Wrap each hit as {"position": n, "hit": ...}
    #[arg(long)]
    pub with_position: bool,
}
