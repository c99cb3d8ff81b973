use std::path::PathBuf;

use serde::Deserialize;

use crate::api::handlers::{MAX_NEIGHBORS, MAX_TOP_N};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Path of the product catalog file
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    /// Number of products synthesized when the catalog file does not exist
    #[serde(default = "default_catalog_size")]
    pub catalog_size: usize,

    /// Number of simulated users
    #[serde(default = "default_num_users")]
    pub num_users: usize,

    /// Fewest distinct products a simulated user purchases
    #[serde(default = "default_min_purchases")]
    pub min_purchases: usize,

    /// Most distinct products a simulated user purchases
    #[serde(default = "default_max_purchases")]
    pub max_purchases: usize,

    /// Default number of products returned by the popularity ranking
    #[serde(default = "default_top_n")]
    pub default_top_n: usize,

    /// Default number of neighbors returned by the similarity search
    #[serde(default = "default_neighbors")]
    pub default_neighbors: usize,

    /// Fixed seed for dataset and interaction simulation; random when unset
    #[serde(default)]
    pub rng_seed: Option<u64>,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("products_dataset.csv")
}

fn default_catalog_size() -> usize {
    1000
}

fn default_num_users() -> usize {
    500
}

fn default_min_purchases() -> usize {
    5
}

fn default_max_purchases() -> usize {
    20
}

fn default_top_n() -> usize {
    5
}

fn default_neighbors() -> usize {
    5
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            catalog_size: default_catalog_size(),
            num_users: default_num_users(),
            min_purchases: default_min_purchases(),
            max_purchases: default_max_purchases(),
            default_top_n: default_top_n(),
            default_neighbors: default_neighbors(),
            rng_seed: None,
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings the simulator and handlers cannot honor
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.min_purchases == 0 || self.min_purchases > self.max_purchases {
            anyhow::bail!(
                "Invalid purchase range {}..={}",
                self.min_purchases,
                self.max_purchases
            );
        }
        if self.default_top_n == 0 || self.default_neighbors == 0 {
            anyhow::bail!("DEFAULT_TOP_N and DEFAULT_NEIGHBORS must be at least 1");
        }
        if self.default_top_n > MAX_TOP_N {
            anyhow::bail!("DEFAULT_TOP_N must not exceed {}", MAX_TOP_N);
        }
        if self.default_neighbors > MAX_NEIGHBORS {
            anyhow::bail!("DEFAULT_NEIGHBORS must not exceed {}", MAX_NEIGHBORS);
        }
        Ok(())
    }

    /// Socket address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_top_n, 5);
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
    }

    #[test]
    fn test_inverted_purchase_range_rejected() {
        let config = Config {
            min_purchases: 10,
            max_purchases: 3,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_default_top_n_rejected() {
        let config = Config {
            default_top_n: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_defaults_above_request_caps_rejected() {
        let config = Config {
            default_top_n: MAX_TOP_N + 5,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            default_neighbors: MAX_NEIGHBORS + 1,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            default_top_n: MAX_TOP_N,
            default_neighbors: MAX_NEIGHBORS,
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }
}
