use std::path::PathBuf;

use clap::Parser;
use newsdesk_engine::ApiSettings;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid server url {url:?}: {reason}")]
    InvalidServerUrl { url: String, reason: String },
}

#[derive(Debug, Clone, Parser)]
#[command(
    name = "newsdesk",
    version,
    about = "Terminal client for the news gathering server: run jobs, browse results, export them and follow the server log"
)]
pub struct Cli {
    /// Base URL of the news server
    #[arg(long, env = "NEWSDESK_SERVER", default_value = "http://127.0.0.1:5000")]
    pub server: String,

    /// Directory that receives exported files
    #[arg(long, env = "NEWSDESK_DOWNLOAD_DIR", default_value = ".")]
    pub download_dir: PathBuf,

    /// Directory holding the saved access key
    #[arg(long, env = "NEWSDESK_STATE_DIR", default_value = ".")]
    pub state_dir: PathBuf,

    /// Log file for client diagnostics
    #[arg(long, env = "NEWSDESK_LOG_FILE", default_value = "newsdesk.log")]
    pub log_file: PathBuf,

    /// Log to stderr instead of the log file
    #[arg(long)]
    pub log_to_terminal: bool,

    /// Number of server log lines kept visible
    #[arg(long, default_value_t = newsdesk_core::DEFAULT_LOG_HEIGHT)]
    pub log_lines: usize,
}

impl Cli {
    pub fn api_settings(&self) -> Result<ApiSettings, ConfigError> {
        ApiSettings::parse(&self.server).map_err(|err| ConfigError::InvalidServerUrl {
            url: self.server.clone(),
            reason: err.message,
        })
    }
}
