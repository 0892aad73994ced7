use std::env;
use std::str::FromStr;

pub const DEFAULT_REDIS_URL: &str = "redis://0.0.0.0:6379";
pub const DEFAULT_PORT: u16 = 1080;
pub const DEFAULT_ADDRESS: &str = "0.0.0.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Memory,
    Redis,
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "mem" => Ok(BackendKind::Memory),
            "redis" => Ok(BackendKind::Redis),
            other => Err(format!("unknown voter store backend '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub backend: BackendKind,
    pub redis_url: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Redis,
            redis_url: DEFAULT_REDIS_URL.to_string(),
        }
    }
}

impl StoreConfig {
    /// Reads `VOTER_STORE` and `REDIS_URL`.
    pub fn from_env() -> Result<Self, String> {
        Self::from_vars(env::var("VOTER_STORE").ok(), env::var("REDIS_URL").ok())
    }

    pub fn from_vars(backend: Option<String>, redis_url: Option<String>) -> Result<Self, String> {
        let mut config = Self::default();
        if let Some(kind) = backend.filter(|s| !s.trim().is_empty()) {
            config.backend = kind.parse()?;
        }
        if let Some(url) = redis_url.filter(|s| !s.trim().is_empty()) {
            config.redis_url = normalize_redis_url(url.trim());
        }
        Ok(config)
    }
}

/// Accepts a bare `host:port` as well as a full `redis://` URL.
fn normalize_redis_url(url: &str) -> String {
    if url.contains("://") {
        url.to_string()
    } else {
        format!("redis://{url}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::from_vars(None, None).unwrap();
        assert_eq!(config, StoreConfig::default());
        assert_eq!(config.backend, BackendKind::Redis);
        assert_eq!(config.redis_url, "redis://0.0.0.0:6379");
    }

    #[test]
    fn test_overrides() {
        let config = StoreConfig::from_vars(Some("Memory".into()), Some("cache:6380".into())).unwrap();
        assert_eq!(config.backend, BackendKind::Memory);
        assert_eq!(config.redis_url, "redis://cache:6380");

        let config = StoreConfig::from_vars(Some("".into()), Some("rediss://h:1/0".into())).unwrap();
        assert_eq!(config.backend, BackendKind::Redis);
        assert_eq!(config.redis_url, "rediss://h:1/0");
    }

    #[test]
    fn test_unknown_backend() {
        assert!(StoreConfig::from_vars(Some("postgres".into()), None).is_err());
    }
}
