use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "doxy-search")]
#[command(about = "Query a generated documentation symbol index", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ranked search for symbols matching a partial, case-insensitive name
    Query {
        text: String,
        #[arg(short, long, default_value = "search")]
        dir: PathBuf,
        #[arg(short = 'n', long, default_value = "25")]
        limit: usize,
        /// Only report exact and prefix matches
        #[arg(long)]
        no_substring: bool,
        /// Emit structured JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Exact lookup of one normalized key
    Lookup {
        key: String,
        #[arg(short, long, default_value = "search")]
        dir: PathBuf,
        /// Emit structured JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print shard and entry counts for a shard directory
    Stats {
        #[arg(short, long, default_value = "search")]
        dir: PathBuf,
    },
}
