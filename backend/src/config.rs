use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Result};

pub const DEFAULT_API_URL: &str = "https://api.beehiiv.com/v2";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_FRONTEND_DIST: &str = "frontend/dist";

#[derive(Clone, Debug)]
pub struct BeehiivConfig {
    pub api_key: String,
    pub publication_id: String,
    pub api_url: String,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub beehiiv: BeehiivConfig,
    pub bind_addr: String,
    pub frontend_dist: PathBuf,
    pub sentry_dsn: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        // values pasted into .env files often carry stray whitespace
        let get = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        // older deployments spell the provider with a single I
        let required = |name: &str, legacy: &str| {
            get(name)
                .or_else(|| {
                    let value = get(legacy)?;
                    tracing::warn!("{} is deprecated, rename it to {}", legacy, name);
                    Some(value)
                })
                .ok_or_else(|| anyhow!("{} must be set (or the older {})", name, legacy))
        };

        let beehiiv = BeehiivConfig {
            api_key: required("BEEHIIV_API_KEY", "BEEHIV_API_KEY")?,
            publication_id: normalize_publication_id(&required(
                "BEEHIIV_PUBLICATION_ID",
                "BEEHIV_PUBLICATION_ID",
            )?),
            api_url: get("BEEHIIV_API_URL")
                .unwrap_or_else(|| DEFAULT_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
        };

        Ok(Config {
            beehiiv,
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            frontend_dist: get("FRONTEND_DIST")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_FRONTEND_DIST)),
            sentry_dsn: get("SENTRY_DSN"),
        })
    }
}

impl BeehiivConfig {
    /// Keys are `sk_...` or long opaque strings; anything else is usually a
    /// publication id pasted into the wrong variable.
    pub fn key_looks_valid(&self) -> bool {
        self.api_key.starts_with("sk_") || self.api_key.len() > 30
    }

    pub fn log_summary(&self) {
        if !self.key_looks_valid() {
            tracing::warn!(
                "BEEHIIV_API_KEY does not look like an API key (expected 'sk_live_' / 'sk_test_' prefix or 40+ characters); check it is not the publication id"
            );
        }
        tracing::info!(
            api_key = %masked_key(&self.api_key),
            api_key_length = self.api_key.len(),
            publication_id = %self.publication_id,
            api_url = %self.api_url,
            "Beehiiv configuration loaded"
        );
    }
}

/// The v2 API addresses publications as `pub_<uuid>`.
pub fn normalize_publication_id(raw: &str) -> String {
    if raw.starts_with("pub_") {
        raw.to_string()
    } else {
        format!("pub_{}", raw)
    }
}

pub fn masked_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 14 {
        let head: String = chars[..10].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    } else {
        "***".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_and_trimming() {
        let config = Config::from_lookup(lookup(&[
            ("BEEHIIV_API_KEY", "  sk_live_abc  "),
            ("BEEHIIV_PUBLICATION_ID", "1234\n"),
        ]))
        .unwrap();
        assert_eq!(config.beehiiv.api_key, "sk_live_abc");
        assert_eq!(config.beehiiv.publication_id, "pub_1234");
        assert_eq!(config.beehiiv.api_url, DEFAULT_API_URL);
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(config.frontend_dist, PathBuf::from(DEFAULT_FRONTEND_DIST));
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn missing_key_names_the_variable() {
        let err = Config::from_lookup(lookup(&[("BEEHIIV_PUBLICATION_ID", "pub_1")])).unwrap_err();
        assert!(err.to_string().contains("BEEHIIV_API_KEY"));

        let err = Config::from_lookup(lookup(&[
            ("BEEHIIV_API_KEY", "sk_x"),
            ("BEEHIIV_PUBLICATION_ID", "   "),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("BEEHIIV_PUBLICATION_ID"));
    }

    #[test]
    fn single_i_names_still_work() {
        let config = Config::from_lookup(lookup(&[
            ("BEEHIV_API_KEY", "sk_live_old"),
            ("BEEHIV_PUBLICATION_ID", "abc"),
        ]))
        .unwrap();
        assert_eq!(config.beehiiv.api_key, "sk_live_old");
        assert_eq!(config.beehiiv.publication_id, "pub_abc");

        // the current spelling wins when both are present
        let config = Config::from_lookup(lookup(&[
            ("BEEHIIV_API_KEY", "sk_live_new"),
            ("BEEHIV_API_KEY", "sk_live_old"),
            ("BEEHIIV_PUBLICATION_ID", "pub_1"),
        ]))
        .unwrap();
        assert_eq!(config.beehiiv.api_key, "sk_live_new");

        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(err.to_string().contains("BEEHIV_API_KEY"));
    }

    #[test]
    fn api_url_override_drops_trailing_slash() {
        let config = Config::from_lookup(lookup(&[
            ("BEEHIIV_API_KEY", "sk_x"),
            ("BEEHIIV_PUBLICATION_ID", "pub_1"),
            ("BEEHIIV_API_URL", "http://127.0.0.1:9999/"),
        ]))
        .unwrap();
        assert_eq!(config.beehiiv.api_url, "http://127.0.0.1:9999");
        assert_eq!(config.beehiiv.publication_id, "pub_1");
    }

    #[test]
    fn key_masking() {
        assert_eq!(masked_key("short"), "***");
        assert_eq!(masked_key("sk_live_0123456789abcd"), "sk_live_01...abcd");
    }

    #[test]
    fn key_shape_heuristic() {
        let mut beehiiv = BeehiivConfig {
            api_key: "sk_test_1".into(),
            publication_id: "pub_1".into(),
            api_url: DEFAULT_API_URL.into(),
        };
        assert!(beehiiv.key_looks_valid());
        beehiiv.api_key = "6f1c2b".into();
        assert!(!beehiiv.key_looks_valid());
    }
}
