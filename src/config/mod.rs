//! Configuration management
//!
//! Values are resolved in three layers: built-in defaults, an optional TOML
//! file (`--config`), then command-line flags.

use crate::engine::{RetryPolicy, DEFAULT_PAGE_SIZE};
use crate::remote::drive::DEFAULT_API_BASE;
use crate::remote::Credentials;
use crate::store::failure_log::DEFAULT_FAILURE_LOG;
use crate::store::DEFAULT_PROGRESS_FILE;
use crate::types::ForkError;
use clap::{Args, Parser, Subcommand};
use serde::Deserialize;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::{Path, PathBuf};

/// Default listen address for `dfork serve`
pub const DEFAULT_BIND: SocketAddr =
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 8080));

/// Provider page size ceiling
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Resumable Google Drive folder copy
#[derive(Debug, Parser)]
#[command(name = "dfork", version, about, long_about = None)]
pub struct Cli {
    /// TOML config file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Verbose logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Copy a folder tree (prompts for ids that are not given)
    Copy(CopyArgs),
    /// Serve the copy form over HTTP
    Serve(ServeArgs),
}

#[derive(Debug, Args)]
pub struct CopyArgs {
    /// Source folder id or folder URL
    pub source: Option<String>,

    /// Destination folder id or folder URL
    pub destination: Option<String>,

    /// Discard the saved progress before starting
    #[arg(long)]
    pub fresh: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Listen address
    #[arg(long, value_name = "ADDR")]
    pub bind: Option<SocketAddr>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Flags shared by every driver
#[derive(Debug, Default, Args)]
pub struct CommonArgs {
    /// Checkpoint file [default: copy_progress.json]
    #[arg(long, value_name = "FILE")]
    pub progress_file: Option<PathBuf>,

    /// Failure log [default: failed_files.log]
    #[arg(long, value_name = "FILE")]
    pub failure_log: Option<PathBuf>,

    /// OAuth access token for the Drive API
    #[arg(long, env = "DFORK_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// JSON file holding `access_token`
    #[arg(long, value_name = "FILE")]
    pub token_file: Option<PathBuf>,

    /// Drive API base URL
    #[arg(long, value_name = "URL")]
    pub api_base: Option<String>,

    /// Items per listing page (1-1000) [default: 100]
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Copy attempts per rate-limited file [default: 3]
    #[arg(long)]
    pub max_retries: Option<u32>,
}

/// Optional TOML config file
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub progress_file: Option<PathBuf>,
    pub failure_log: Option<PathBuf>,
    pub token_file: Option<PathBuf>,
    pub api_base: Option<String>,
    pub page_size: Option<u32>,
    pub max_retries: Option<u32>,
    pub bind: Option<SocketAddr>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, ForkError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ForkError::Config(format!("Cannot read config {}: {}", path.display(), e))
        })?;
        toml::from_str(&content)
            .map_err(|e| ForkError::Config(format!("Invalid config {}: {}", path.display(), e)))
    }
}

/// Resolved configuration shared by the drivers
#[derive(Debug, Clone)]
pub struct Config {
    pub progress_file: PathBuf,
    pub failure_log: PathBuf,
    pub api_base: String,
    pub page_size: u32,
    pub max_retries: u32,
    pub bind: SocketAddr,

    /// `None` until a token is supplied; drivers refuse to run without one
    pub credentials: Option<Credentials>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            progress_file: PathBuf::from(DEFAULT_PROGRESS_FILE),
            failure_log: PathBuf::from(DEFAULT_FAILURE_LOG),
            api_base: DEFAULT_API_BASE.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            max_retries: RetryPolicy::DEFAULT_MAX_ATTEMPTS,
            bind: DEFAULT_BIND,
            credentials: None,
        }
    }
}

impl Config {
    /// Layer `file` (if any) and `args` over the defaults, then validate.
    pub fn resolve(file: Option<&Path>, args: &CommonArgs) -> Result<Self, ForkError> {
        let file = match file {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Self::from_layers(file, args)
    }

    pub fn from_layers(file: FileConfig, args: &CommonArgs) -> Result<Self, ForkError> {
        let defaults = Config::default();

        let token_file = args.token_file.clone().or(file.token_file);
        let credentials = match (&args.access_token, token_file) {
            (Some(token), _) if !token.trim().is_empty() => Some(Credentials::new(token.trim())),
            (_, Some(path)) => Some(Credentials::from_token_file(&path)?),
            _ => None,
        };

        let config = Config {
            progress_file: args
                .progress_file
                .clone()
                .or(file.progress_file)
                .unwrap_or(defaults.progress_file),
            failure_log: args
                .failure_log
                .clone()
                .or(file.failure_log)
                .unwrap_or(defaults.failure_log),
            api_base: args
                .api_base
                .clone()
                .or(file.api_base)
                .unwrap_or(defaults.api_base),
            page_size: args.page_size.or(file.page_size).unwrap_or(defaults.page_size),
            max_retries: args
                .max_retries
                .or(file.max_retries)
                .unwrap_or(defaults.max_retries),
            bind: file.bind.unwrap_or(defaults.bind),
            credentials,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ForkError> {
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(ForkError::Config(format!(
                "page size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE, self.page_size
            )));
        }

        if self.max_retries == 0 {
            return Err(ForkError::Config(
                "max retries must be at least 1".to_string(),
            ));
        }

        if self.progress_file.as_os_str().is_empty() {
            return Err(ForkError::Config(
                "progress file path cannot be empty".to_string(),
            ));
        }

        if !self.api_base.starts_with("http://") && !self.api_base.starts_with("https://") {
            return Err(ForkError::Config(format!(
                "API base must be an http(s) URL: {}",
                self.api_base
            )));
        }

        Ok(())
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries)
    }
}

/// Extract a folder id from a bare id or a `.../folders/<id>[?...]` URL.
///
/// ```
/// use dfork::config::parse_folder_id;
///
/// assert_eq!(parse_folder_id("https://drive.example.com/drive/folders/ABC123?usp=sharing"), "ABC123");
/// assert_eq!(parse_folder_id("  XYZ789  "), "XYZ789");
/// ```
pub fn parse_folder_id(input: &str) -> String {
    let trimmed = input.trim();
    match trimmed.split_once("/folders/") {
        Some((_, rest)) => rest
            .split(['?', '/', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
        None => trimmed.to_string(),
    }
}
