//! Runtime settings sourced from the environment (optionally a `.env` file).

use crate::error::ConfigError;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_DATABASE_URL: &str = "postgres://localhost/questoes";

/// How `update` picks between a submitted value and the stored one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MergePolicy {
    /// Keep the stored value whenever the submitted one is falsy (absent, null, "", 0, false).
    #[default]
    Truthy,
    /// Keep the stored value only when the key is absent from the request.
    Presence,
}

impl FromStr for MergePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "truthy" => Ok(MergePolicy::Truthy),
            "presence" => Ok(MergePolicy::Presence),
            other => Err(ConfigError::Invalid {
                key: "MERGE_POLICY",
                value: other.to_string(),
            }),
        }
    }
}

/// Backing store selected with `STORE`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StoreKind {
    #[default]
    Postgres,
    /// In-process tables; data is lost on exit.
    Memory,
}

impl FromStr for StoreKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreKind::Postgres),
            "memory" => Ok(StoreKind::Memory),
            other => Err(ConfigError::Invalid {
                key: "STORE",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Clone, Debug)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub store: StoreKind,
    pub database: DatabaseSettings,
    pub bind_addr: String,
    pub port: u16,
    pub request_timeout: Duration,
    pub merge_policy: MergePolicy,
    pub api_title: String,
    pub api_author: String,
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid { key, value: raw }),
        None => Ok(default),
    }
}

impl Settings {
    /// Load from the process environment, after reading `.env` if one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from any key lookup. `DATABASE_URL` wins over the legacy `URL_BD`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let url = lookup("DATABASE_URL")
            .or_else(|| lookup("URL_BD"))
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.into());
        let database = DatabaseSettings {
            url,
            max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 5)?,
            acquire_timeout: Duration::from_secs(parse_or(&lookup, "DB_ACQUIRE_TIMEOUT_SECS", 30)?),
        };
        Ok(Settings {
            store: parse_or(&lookup, "STORE", StoreKind::default())?,
            database,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_or(&lookup, "PORT", 3000)?,
            request_timeout: Duration::from_secs(parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30)?),
            merge_policy: parse_or(&lookup, "MERGE_POLICY", MergePolicy::default())?,
            api_title: lookup("API_TITLE").unwrap_or_else(|| "API para Questões".into()),
            api_author: lookup("API_AUTHOR").unwrap_or_else(|| "Arthur Porto".into()),
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|k| env.get(k).cloned())
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let s = from_pairs(&[]).unwrap();
        assert_eq!(s.database.url, DEFAULT_DATABASE_URL);
        assert_eq!(s.database.max_connections, 5);
        assert_eq!(s.listen_addr(), "0.0.0.0:3000");
        assert_eq!(s.merge_policy, MergePolicy::Truthy);
        assert_eq!(s.request_timeout, Duration::from_secs(30));
        assert_eq!(s.store, StoreKind::Postgres);
    }

    #[test]
    fn selects_memory_store() {
        let s = from_pairs(&[("STORE", "memory")]).unwrap();
        assert_eq!(s.store, StoreKind::Memory);
        assert!(matches!(
            from_pairs(&[("STORE", "sqlite")]),
            Err(ConfigError::Invalid { key: "STORE", .. })
        ));
    }

    #[test]
    fn legacy_url_variable_is_a_fallback() {
        let s = from_pairs(&[("URL_BD", "postgres://legacy/db")]).unwrap();
        assert_eq!(s.database.url, "postgres://legacy/db");
        let s = from_pairs(&[("URL_BD", "postgres://legacy/db"), ("DATABASE_URL", "postgres://new/db")]).unwrap();
        assert_eq!(s.database.url, "postgres://new/db");
    }

    #[test]
    fn parses_merge_policy_and_rejects_garbage() {
        let s = from_pairs(&[("MERGE_POLICY", "Presence")]).unwrap();
        assert_eq!(s.merge_policy, MergePolicy::Presence);
        assert!(matches!(
            from_pairs(&[("MERGE_POLICY", "sometimes")]),
            Err(ConfigError::Invalid { key: "MERGE_POLICY", .. })
        ));
        assert!(matches!(
            from_pairs(&[("PORT", "http")]),
            Err(ConfigError::Invalid { key: "PORT", .. })
        ));
    }
}
