//! Command line configuration for the server.

use std::{path::PathBuf, time::Duration};

use clap::Parser;

/// The base URL of the events REST server when none is given.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3001";

/// The web server for tracking event expenses.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(version, about, long_about = None)]
pub struct ServerConfig {
    /// The base URL of the events REST server.
    #[arg(long, env = "EVENTS_BACKEND_URL", default_value = DEFAULT_BACKEND_URL)]
    pub backend_url: String,

    /// File path to a SQLite database to store events in instead of using
    /// the REST server.
    #[arg(long)]
    pub db_path: Option<PathBuf>,

    /// The port to serve the app from.
    #[arg(short, long, default_value_t = 3000)]
    pub port: u16,

    /// How long to wait for the REST server before giving up, in seconds.
    #[arg(long, default_value_t = 10)]
    pub request_timeout_secs: u64,

    /// File path to write the debug log to.
    #[arg(long, default_value = "debug.log")]
    pub log_path: PathBuf,
}

impl ServerConfig {
    /// The timeout for requests to the REST server.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
