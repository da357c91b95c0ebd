use std::path::PathBuf;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_DATABASE_URL: &str = "sqlite://data/app.db";
const DEFAULT_BLOB_DIR: &str = "data/blobs";
const DEFAULT_BLOB_PUBLIC_PATH: &str = "/blobs";
const DEFAULT_STATIC_DIR: &str = "./static";
/// Inline uploads travel base64-encoded inside the JSON body.
const DEFAULT_MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

/// Runtime settings, read from the environment (and `.env` when present).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub database_url: String,
    pub blob_dir: PathBuf,
    pub blob_public_path: String,
    pub static_dir: PathBuf,
    pub max_body_bytes: usize,
}

impl AppConfig {
    pub fn from_env() -> Self {
        if dotenvy::dotenv().is_ok() {
            log::info!("Loaded environment from .env");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Missing keys take defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let max_body_bytes = match lookup("MAX_BODY_BYTES") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    log::warn!(
                        "MAX_BODY_BYTES={raw:?} is not a positive integer, using {DEFAULT_MAX_BODY_BYTES}"
                    );
                    DEFAULT_MAX_BODY_BYTES
                }
            },
            None => DEFAULT_MAX_BODY_BYTES,
        };

        Self {
            bind_addr: get("BIND_ADDR", DEFAULT_BIND_ADDR),
            database_url: get("DATABASE_URL", DEFAULT_DATABASE_URL),
            blob_dir: PathBuf::from(get("BLOB_DIR", DEFAULT_BLOB_DIR)),
            blob_public_path: get("BLOB_PUBLIC_PATH", DEFAULT_BLOB_PUBLIC_PATH),
            static_dir: PathBuf::from(get("STATIC_DIR", DEFAULT_STATIC_DIR)),
            max_body_bytes,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_env_is_empty() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.bind_addr, "127.0.0.1:8080");
        assert_eq!(cfg.database_url, "sqlite://data/app.db");
        assert_eq!(cfg.blob_dir, PathBuf::from("data/blobs"));
        assert_eq!(cfg.blob_public_path, "/blobs");
        assert_eq!(cfg.max_body_bytes, 25 * 1024 * 1024);
    }

    #[test]
    fn test_overrides_from_lookup() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("BIND_ADDR", "0.0.0.0:9000"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("BLOB_DIR", "/tmp/blobs"),
            ("MAX_BODY_BYTES", "1024"),
        ]);
        let cfg = AppConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.bind_addr, "0.0.0.0:9000");
        assert_eq!(cfg.database_url, "sqlite::memory:");
        assert_eq!(cfg.blob_dir, PathBuf::from("/tmp/blobs"));
        assert_eq!(cfg.max_body_bytes, 1024);
    }

    #[test]
    fn test_bad_body_limit_falls_back() {
        let cfg = AppConfig::from_lookup(|k| (k == "MAX_BODY_BYTES").then(|| "lots".to_string()));
        assert_eq!(cfg.max_body_bytes, DEFAULT_MAX_BODY_BYTES);

        let cfg = AppConfig::from_lookup(|k| (k == "MAX_BODY_BYTES").then(|| "0".to_string()));
        assert_eq!(cfg.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let cfg = AppConfig::from_lookup(|k| (k == "BIND_ADDR").then(|| "  ".to_string()));
        assert_eq!(cfg.bind_addr, "127.0.0.1:8080");
    }
}
