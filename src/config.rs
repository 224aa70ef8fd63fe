//! Configuration module

use crate::trainer::{DEFAULT_SEED, DEFAULT_TEST_SIZE};
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Raw listings CSV
    pub dataset: PathBuf,

    /// Directory holding the model and `columns.json`
    pub artifact_dir: PathBuf,

    /// Address the HTTP server binds to
    pub host: IpAddr,

    /// Server port
    pub port: u16,

    /// Holdout fraction used by the build
    pub test_size: f64,

    /// Split seed used by the build
    pub split_seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset: PathBuf::from("Bengaluru_House_Data.csv"),
            artifact_dir: PathBuf::from("artifacts"),
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8000,
            test_size: DEFAULT_TEST_SIZE,
            split_seed: DEFAULT_SEED,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with a custom variable source.
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            dataset: lookup("HOMEPRICE_DATASET")
                .map(PathBuf::from)
                .unwrap_or(defaults.dataset),

            artifact_dir: lookup("HOMEPRICE_ARTIFACT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.artifact_dir),

            host: lookup("HOST")
                .and_then(|h| h.parse().ok())
                .unwrap_or(defaults.host),

            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),

            test_size: lookup("HOMEPRICE_TEST_SIZE")
                .and_then(|t| t.parse().ok())
                .unwrap_or(defaults.test_size),

            split_seed: lookup("HOMEPRICE_SPLIT_SEED")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.split_seed),
        }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_empty_environment_gives_defaults() {
        assert_eq!(Config::from_lookup(|_| None), Config::default());
    }

    #[test]
    fn test_values_are_read() {
        let vars: HashMap<&str, &str> = [
            ("HOMEPRICE_DATASET", "/data/raw.csv"),
            ("HOMEPRICE_ARTIFACT_DIR", "/srv/model"),
            ("HOST", "0.0.0.0"),
            ("PORT", "9000"),
            ("HOMEPRICE_TEST_SIZE", "0.25"),
            ("HOMEPRICE_SPLIT_SEED", "7"),
        ]
        .into_iter()
        .collect();
        let c = Config::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(c.dataset, PathBuf::from("/data/raw.csv"));
        assert_eq!(c.artifact_dir, PathBuf::from("/srv/model"));
        assert_eq!(c.bind_addr().to_string(), "0.0.0.0:9000");
        assert_eq!(c.test_size, 0.25);
        assert_eq!(c.split_seed, 7);
    }

    #[test]
    fn test_bad_port_falls_back() {
        let c = Config::from_lookup(|k| (k == "PORT").then(|| "eighty".to_string()));
        assert_eq!(c.port, 8000);
    }
}
