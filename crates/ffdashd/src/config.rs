//! Daemon configuration
//!
//! Values come from CLI flags (and their environment variables), then the
//! TOML config file, then built-in defaults.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use ffdash_api::state::DEFAULT_UPLOAD_LIMIT;
use serde::Deserialize;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_SEED_FILE: &str = "fantasy_results_2019_2024_v26.xlsx";
pub const DEFAULT_PUBLIC_DIR: &str = "public";

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "ffdashd")]
#[command(version, about = "Fantasy league dashboard server")]
pub struct Args {
    /// Daemon config file (TOML)
    #[arg(short, long, env = "FFDASH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Address to bind
    #[arg(long)]
    pub bind: Option<IpAddr>,

    /// Workbook loaded at startup [default: fantasy_results_2019_2024_v26.xlsx]
    ///
    /// Relative paths resolve against the working directory, not the
    /// location of the binary.
    #[arg(long, value_name = "FILE")]
    pub seed: Option<PathBuf>,

    /// Start with an empty store
    #[arg(long, conflicts_with = "seed")]
    pub no_seed: bool,

    /// Directory with the dashboard page and assets [default: public]
    ///
    /// Relative paths resolve against the working directory.
    #[arg(long, value_name = "DIR")]
    pub public_dir: Option<PathBuf>,
}

/// Config file contents
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DaemonConfig {
    pub server: ServerConfig,
    pub data: DataConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    pub bind: IpAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub seed_file: PathBuf,
    pub public_dir: PathBuf,
    pub upload_limit_bytes: usize,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            seed_file: PathBuf::from(DEFAULT_SEED_FILE),
            public_dir: PathBuf::from(DEFAULT_PUBLIC_DIR),
            upload_limit_bytes: DEFAULT_UPLOAD_LIMIT,
        }
    }
}

impl DaemonConfig {
    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Merge CLI arguments over config file values
    pub fn merge_with_args(self, args: &Args) -> Settings {
        let port = args.port.unwrap_or(self.server.port);
        let bind = args.bind.unwrap_or(self.server.bind);

        let seed_file = if args.no_seed {
            None
        } else {
            Some(args.seed.clone().unwrap_or(self.data.seed_file))
        };

        Settings {
            addr: SocketAddr::new(bind, port),
            seed_file,
            public_dir: args.public_dir.clone().unwrap_or(self.data.public_dir),
            upload_limit: self.data.upload_limit_bytes,
        }
    }
}

/// Fully resolved daemon settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub addr: SocketAddr,
    /// `None` when seeding is disabled
    pub seed_file: Option<PathBuf>,
    pub public_dir: PathBuf,
    pub upload_limit: usize,
}

impl Settings {
    /// Resolve settings from parsed arguments, reading the config file if given
    pub fn resolve(args: &Args) -> Result<Self> {
        let config = match &args.config {
            Some(path) => DaemonConfig::load_from(path)?,
            None => DaemonConfig::default(),
        };
        Ok(config.merge_with_args(args))
    }
}
