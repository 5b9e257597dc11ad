use clap::{Parser, Subcommand, ValueEnum};

pub mod commands;
pub mod output;

#[derive(Parser)]
#[command(
    name = "declgraph",
    version,
    about = "Declaration-level dependency closure for TypeScript and JavaScript"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Path to config file (default: declgraph.toml or .declgraph/config.toml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Include only files matching this glob (scan)
    #[arg(long, global = true)]
    pub include: Vec<String>,

    /// Exclude files matching this glob (scan)
    #[arg(long, global = true)]
    pub exclude: Vec<String>,

    /// Show debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Transitive dependency tree of a declaration
    Deps {
        /// File the identifier is used or declared in
        file: String,
        /// Identifier to analyze
        identifier: String,
        /// Print each declaration's source below its entry (text format)
        #[arg(long)]
        source: bool,
    },

    /// Where an identifier used in a file is declared
    Definition {
        /// File the identifier is used in
        file: String,
        /// Identifier to look up
        identifier: String,
    },

    /// Source text of a declaration in a file
    Chunk {
        /// File declaring the identifier
        file: String,
        /// Declared name
        identifier: String,
    },

    /// List the module-level declarations and re-exports of a file
    Exports {
        /// File to inspect
        file: String,
    },

    /// Analyze every exported declaration of a project
    Scan {
        /// Project path (default: current directory)
        #[arg(default_value = ".")]
        path: String,
    },
}

#[derive(Clone, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Compact,
}
