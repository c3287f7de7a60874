use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::scoring::ranking::DEFAULT_RANKING_LIMIT;
use crate::types::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PageRequest};

pub const DB_FILE_NAME: &str = "dramascore.db";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub listing: ListingConfig,
    pub rankings: RankingConfig,
}

/// Paging limits applied to list endpoints.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    pub default_page_size: u32,
    pub max_page_size: u32,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Upper bound on ranking rows; also the default when a request gives none.
    pub limit: u32,
}

impl ServerConfig {
    /// Reads a TOML config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.listing.max_page_size == 0 {
            return Err(Error::Config(
                "listing.max_page_size must be at least 1".to_string(),
            ));
        }
        if self.rankings.limit == 0 {
            return Err(Error::Config("rankings.limit must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> std::result::Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    #[must_use]
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }
}

impl ListingConfig {
    #[must_use]
    pub fn page(&self, page: Option<u32>, limit: Option<u32>) -> PageRequest {
        PageRequest::new(page, limit, self.default_page_size, self.max_page_size)
    }
}

impl RankingConfig {
    /// Requested row count, capped at the configured limit.
    #[must_use]
    pub fn resolve(&self, requested: Option<u32>) -> u32 {
        requested
            .filter(|n| *n > 0)
            .map_or(self.limit, |n| n.min(self.limit))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            data_dir: PathBuf::from("./data"),
            listing: ListingConfig::default(),
            rankings: RankingConfig::default(),
        }
    }
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_RANKING_LIMIT,
        }
    }
}
