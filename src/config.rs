use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use tracing::Level;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub database_url: String,
    pub database_name: String,
    pub collection_name: String,

    /// Upper bound for every persistence call, and for the driver's
    /// connect / server-selection phases.
    pub store_timeout: Duration,

    // Logging
    pub log_dir: String,
    pub log_level: Level,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let or_default =
            |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let store_timeout_secs: u64 = parse_var(
            "STORE_TIMEOUT_SECS",
            or_default("STORE_TIMEOUT_SECS", "5"),
        )?;
        if store_timeout_secs == 0 {
            return Err(anyhow!("STORE_TIMEOUT_SECS must be greater than zero"));
        }

        Ok(Self {
            server_addr: or_default("SERVER_ADDR", "0.0.0.0:3000"),
            database_url: lookup("DATABASE_URL").context("DATABASE_URL must be set")?,
            database_name: or_default("DATABASE_NAME", "attendanceDB"),
            collection_name: or_default("ATTENDANCE_COLLECTION", "attendances"),
            store_timeout: Duration::from_secs(store_timeout_secs),
            log_dir: or_default("LOG_DIR", "logs"),
            log_level: parse_var("LOG_LEVEL", or_default("LOG_LEVEL", "info"))?,
        })
    }
}

fn parse_var<T>(key: &str, raw: String) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| anyhow!("{key} has an invalid value {raw:?}: {e}"))
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
    fn defaults_apply_when_only_database_url_is_set() {
        let config =
            Config::from_lookup(lookup_from(&[("DATABASE_URL", "mongodb://localhost:27017")]))
                .unwrap();

        assert_eq!(config.server_addr, "0.0.0.0:3000");
        assert_eq!(config.database_url, "mongodb://localhost:27017");
        assert_eq!(config.database_name, "attendanceDB");
        assert_eq!(config.collection_name, "attendances");
        assert_eq!(config.store_timeout, Duration::from_secs(5));
        assert_eq!(config.log_dir, "logs");
        assert_eq!(config.log_level, Level::INFO);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "mongodb://db:27017"),
            ("SERVER_ADDR", "127.0.0.1:8080"),
            ("DATABASE_NAME", "school"),
            ("ATTENDANCE_COLLECTION", "scans"),
            ("STORE_TIMEOUT_SECS", "12"),
            ("LOG_LEVEL", "debug"),
        ]))
        .unwrap();

        assert_eq!(config.server_addr, "127.0.0.1:8080");
        assert_eq!(config.database_name, "school");
        assert_eq!(config.collection_name, "scans");
        assert_eq!(config.store_timeout, Duration::from_secs(12));
        assert_eq!(config.log_level, Level::DEBUG);
    }

    #[test]
    fn missing_database_url_is_an_error() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn bad_timeout_is_rejected() {
        let base = [("DATABASE_URL", "mongodb://localhost:27017")];

        let err = Config::from_lookup(lookup_from(&[base[0], ("STORE_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains("STORE_TIMEOUT_SECS"));

        assert!(Config::from_lookup(lookup_from(&[base[0], ("STORE_TIMEOUT_SECS", "0")])).is_err());
    }

    #[test]
    fn bad_log_level_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "mongodb://localhost:27017"),
            ("LOG_LEVEL", "chatty"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("LOG_LEVEL"));
    }
}
