use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "video-storage-query")]
#[command(author, version, about = "Video listing and thumbnail bridge")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the bridge channels over stdin/stdout
    Serve,

    /// List every video in the storage roots
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Extract a PNG thumbnail from a video
    Thumbnail {
        /// Video file
        #[arg(required = true)]
        file: PathBuf,

        /// Output file (defaults to <file stem>.png in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check read access to the storage roots
    CheckAccess {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that required external tools are available
    CheckTools,

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
