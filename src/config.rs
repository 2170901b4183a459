use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_DATABASE_URL: &str = "srs.db";
pub const DEFAULT_POOL_SIZE: u32 = 8;
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_MAX_CONFLICT_RETRIES: u32 = 3;

/// Runtime settings for the scheduler's storage layer
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulerConfig {
    pub database_url: String,
    pub pool_size: u32,
    /// How long a connection waits on a locked database before reporting busy
    pub busy_timeout: Duration,
    /// Extra attempts after a write conflict before giving up
    pub max_conflict_retries: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            pool_size: DEFAULT_POOL_SIZE,
            busy_timeout: Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS),
            max_conflict_retries: DEFAULT_MAX_CONFLICT_RETRIES,
        }
    }
}

impl SchedulerConfig {
    /// Loads `.env` if present, then reads the process environment
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let database_url = lookup("DATABASE_URL").unwrap_or(defaults.database_url);
        let pool_size = parse_var(&lookup, "SRS_POOL_SIZE")?.unwrap_or(defaults.pool_size);
        let busy_timeout = parse_var::<u64, _>(&lookup, "SRS_BUSY_TIMEOUT_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.busy_timeout);
        let max_conflict_retries = parse_var(&lookup, "SRS_MAX_CONFLICT_RETRIES")?
            .unwrap_or(defaults.max_conflict_retries);

        anyhow::ensure!(pool_size > 0, "SRS_POOL_SIZE must be at least 1");

        Ok(Self {
            database_url,
            pool_size,
            busy_timeout,
            max_conflict_retries,
        })
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .with_context(|| format!("Invalid value for {}: {:?}", key, raw))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = SchedulerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, SchedulerConfig::default());
    }

    #[test]
    fn reads_overrides() {
        let config = SchedulerConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "/tmp/reviews.db"),
            ("SRS_POOL_SIZE", "2"),
            ("SRS_BUSY_TIMEOUT_MS", " 250 "),
            ("SRS_MAX_CONFLICT_RETRIES", "0"),
        ]))
        .unwrap();

        assert_eq!(config.database_url, "/tmp/reviews.db");
        assert_eq!(config.pool_size, 2);
        assert_eq!(config.busy_timeout, Duration::from_millis(250));
        assert_eq!(config.max_conflict_retries, 0);
    }

    #[test]
    fn rejects_garbage_numbers() {
        let err = SchedulerConfig::from_lookup(lookup_from(&[("SRS_POOL_SIZE", "many")]))
            .unwrap_err();
        assert!(err.to_string().contains("SRS_POOL_SIZE"));
    }

    #[test]
    fn rejects_empty_pool() {
        assert!(SchedulerConfig::from_lookup(lookup_from(&[("SRS_POOL_SIZE", "0")])).is_err());
    }
}
