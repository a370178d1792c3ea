pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "lazycat-stars")]
#[command(about = "GitHub statistics for LazyCat app-store entries", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the API server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long, env = "HOST")]
        host: Option<String>,
    },

    /// Look up GitHub statistics for one app
    Check {
        /// Store app id
        app_id: String,

        /// Bypass the cache and fetch fresh data
        #[arg(long)]
        refresh: bool,
    },

    /// Search the catalog through a running server
    Search {
        /// Search query
        query: String,

        /// Result page
        #[arg(long)]
        page: Option<usize>,

        /// Results per page
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Check a newline-separated list of app names against the catalog
    BatchCheck {
        /// File with one app name per line
        file: String,
    },

    /// Re-fetch statistics for every cached app
    RefreshAll {
        /// Concurrent lookups
        #[arg(long, default_value_t = 4)]
        concurrency: usize,
    },

    /// Evict cached statistics, for one app or for everything
    ClearCache {
        /// Store app id; omit to clear the whole cache
        app_id: Option<String>,
    },

    /// Show the current GitHub API quota
    RateLimit,

    /// Run database migrations
    Migrate,
}
