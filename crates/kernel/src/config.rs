//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use site_counts::FilteredListSettings;
use site_counts_sdk::types::HourWindow;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port (default: 3000).
    pub port: u16,

    /// PostgreSQL connection URL. When unset the fixture host is used.
    pub database_url: Option<String>,

    /// Maximum database connections in pool (default: 10).
    pub database_max_connections: u32,

    /// YAML fixture backing the in-memory host (default: ./fixtures/content.yaml).
    pub content_fixture: PathBuf,

    /// Optional directory of Tera templates overriding inline rendering.
    pub theme_dir: Option<PathBuf>,

    /// Directory holding `.po` catalogs (default: ./languages).
    pub locale_dir: PathBuf,

    /// Language used when a request names none (default: "en").
    pub default_language: String,

    /// Filter for the Site Counts post list.
    pub list: FilteredListSettings,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .context("PORT must be a valid u16")?;

        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let database_max_connections = lookup("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|| "10".to_string())
            .parse()
            .context("DATABASE_MAX_CONNECTIONS must be a valid u32")?;

        let content_fixture = lookup("CONTENT_FIXTURE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./fixtures/content.yaml"));

        let theme_dir = lookup("THEME_DIR").map(PathBuf::from);

        let locale_dir = lookup("LOCALE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./languages"));

        let default_language = lookup("DEFAULT_LANGUAGE")
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| "en".to_string());

        let defaults = FilteredListSettings::default();
        let hours = match lookup("SITE_COUNTS_HOURS") {
            Some(raw) => parse_hours(&raw).context("SITE_COUNTS_HOURS must look like 9-17")?,
            None => defaults.hours,
        };
        let list = FilteredListSettings {
            tag: lookup("SITE_COUNTS_TAG").unwrap_or(defaults.tag),
            category: lookup("SITE_COUNTS_CATEGORY").unwrap_or(defaults.category),
            hours,
            cap: defaults.cap,
        };

        Ok(Self {
            port,
            database_url,
            database_max_connections,
            content_fixture,
            theme_dir,
            locale_dir,
            default_language,
            list,
        })
    }
}

/// Parse an inclusive hour window written as `from-to`.
pub fn parse_hours(raw: &str) -> Result<HourWindow> {
    let Some((from, to)) = raw.split_once('-') else {
        bail!("missing '-' in hour window {raw:?}");
    };
    let from: u32 = from.trim().parse().context("invalid start hour")?;
    let to: u32 = to.trim().parse().context("invalid end hour")?;
    HourWindow::new(from, to)
        .with_context(|| format!("hour window {from}-{to} must satisfy from <= to <= 23"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let config = config(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert!(config.database_url.is_none());
        assert_eq!(config.database_max_connections, 10);
        assert_eq!(config.content_fixture, PathBuf::from("./fixtures/content.yaml"));
        assert_eq!(config.default_language, "en");
        assert_eq!(config.list, FilteredListSettings::default());
    }

    #[test]
    fn list_overrides_apply() {
        let config = config(&[
            ("SITE_COUNTS_TAG", "rust"),
            ("SITE_COUNTS_CATEGORY", "news"),
            ("SITE_COUNTS_HOURS", "8 - 12"),
        ])
        .unwrap();
        assert_eq!(config.list.tag, "rust");
        assert_eq!(config.list.category, "news");
        assert_eq!(config.list.hours, HourWindow { from: 8, to: 12 });
        assert_eq!(config.list.cap, 5);
    }

    #[test]
    fn blank_database_url_means_fixture_host() {
        let config = config(&[("DATABASE_URL", "  ")]).unwrap();
        assert!(config.database_url.is_none());
    }

    #[test]
    fn invalid_port_is_rejected() {
        assert!(config(&[("PORT", "http")]).is_err());
    }

    #[test]
    fn hour_window_parsing() {
        assert_eq!(parse_hours("9-17").unwrap(), HourWindow { from: 9, to: 17 });
        assert!(parse_hours("17-9").is_err());
        assert!(parse_hours("9").is_err());
        assert!(parse_hours("9-24").is_err());
    }
}
