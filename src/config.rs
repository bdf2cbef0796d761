//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::fmt::Display;
use std::str::FromStr;

use tracing::warn;

use crate::cache::PolicyKind;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of products the cache can hold
    pub capacity: usize,
    /// Eviction policy used when the cache is full
    pub policy: PolicyKind,
    /// HTTP server port
    pub server_port: u16,
    /// Interval in seconds between stats log lines (0 disables the reporter)
    pub stats_interval: u64,
    /// Pre-load the demo catalog on startup
    pub seed_products: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cached products (default: 1000)
    /// - `EVICTION_POLICY` - `lfu` or `arc` (default: lfu)
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `STATS_INTERVAL` - Stats reporting frequency in seconds (default: 60)
    /// - `SEED_PRODUCTS` - Load the demo catalog at boot (default: true)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            capacity: parse_var("CACHE_CAPACITY").unwrap_or(defaults.capacity),
            policy: parse_var("EVICTION_POLICY").unwrap_or(defaults.policy),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            stats_interval: parse_var("STATS_INTERVAL").unwrap_or(defaults.stats_interval),
            seed_products: parse_var("SEED_PRODUCTS").unwrap_or(defaults.seed_products),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: 1000,
            policy: PolicyKind::Lfu,
            server_port: 8080,
            stats_interval: 60,
            seed_products: true,
        }
    }
}

/// Reads and parses an environment variable.
///
/// Unset variables fall back silently; set but unparsable ones are logged
/// and fall back as well.
fn parse_var<T>(name: &str) -> Option<T>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(variable = name, value = %raw, error = %e, "Ignoring unparsable environment variable");
            None
        }
    }
}
