//! Translation catalog loaded from `.po` files.
//!
//! Files are named `{domain}-{language}.po` (e.g. `site-counts-fr.po`).
//! The catalog is loaded once at startup and read-only afterwards.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use site_counts_sdk::i18n::Translator;
use tracing::{debug, info};

use super::po_parser::{PoEntry, parse_po};

/// In-memory translations for one text domain, across languages.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    domain: String,
    /// Key = "language\0source" → entry.
    entries: HashMap<String, PoEntry>,
    languages: Vec<String>,
}

impl Catalog {
    /// An empty catalog: every lookup returns the source strings.
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            ..Self::default()
        }
    }

    /// Load every `{domain}-{language}.po` file found in `dir`.
    ///
    /// A missing directory yields an empty catalog.
    pub fn load_dir(domain: impl Into<String>, dir: &Path) -> Result<Self> {
        let mut catalog = Self::new(domain);

        if !dir.is_dir() {
            info!(dir = %dir.display(), "no locale directory, using source strings");
            return Ok(catalog);
        }

        let prefix = format!("{}-", catalog.domain);
        let mut paths: Vec<_> = fs::read_dir(dir)
            .with_context(|| format!("failed to read locale directory {}", dir.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "po"))
            .collect();
        paths.sort();

        for path in paths {
            let Some(language) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| stem.strip_prefix(&prefix))
                .map(str::to_string)
            else {
                continue;
            };

            let content = fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let count = catalog.add_po(&language, &content);
            info!(language = %language, count, file = %path.display(), "loaded translations");
        }

        Ok(catalog)
    }

    /// Add the entries of one `.po` document under `language`.
    ///
    /// Block strings carry no `msgctxt`, so entries with a context are
    /// skipped. Returns the number of entries added.
    pub fn add_po(&mut self, language: &str, content: &str) -> usize {
        let mut count = 0;
        for entry in parse_po(content) {
            if !entry.context.is_empty() {
                debug!(language, source = %entry.source, "skipping entry with msgctxt");
                continue;
            }
            self.entries.insert(cache_key(language, &entry.source), entry);
            count += 1;
        }
        if count > 0 && !self.languages.iter().any(|l| l == language) {
            self.languages.push(language.to_string());
        }
        count
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Languages with at least one translation, in load order.
    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// Find the entry for `source`, trying `fr-CA` then `fr`.
    fn lookup(&self, domain: &str, language: Option<&str>, source: &str) -> Option<&PoEntry> {
        if domain != self.domain {
            return None;
        }
        let language = language?;

        let found = self.entries.get(&cache_key(language, source));
        if found.is_some() {
            return found;
        }

        let (base, _) = language.split_once(['-', '_'])?;
        debug!(language, base, "falling back to base language");
        self.entries.get(&cache_key(base, source))
    }
}

impl Translator for Catalog {
    fn translate(&self, domain: &str, language: Option<&str>, source: &str) -> String {
        self.lookup(domain, language, source)
            .and_then(|entry| entry.form(0))
            .unwrap_or(source)
            .to_string()
    }

    fn translate_plural(
        &self,
        domain: &str,
        language: Option<&str>,
        singular: &str,
        plural: &str,
        n: u64,
    ) -> String {
        let fallback = if n == 1 { singular } else { plural };

        let Some(entry) = self.lookup(domain, language, singular) else {
            return fallback.to_string();
        };

        // Two-form rule: index 0 for one, 1 otherwise, clamped to the forms present
        let wanted = usize::from(n != 1);
        let index = wanted.min(entry.translations.len().saturating_sub(1));
        entry.form(index).unwrap_or(fallback).to_string()
    }
}

/// Build a lookup key from language and source.
///
/// Uses null byte separator (`\0`) so that colons in source strings cannot
/// collide with the separator.
fn cache_key(language: &str, source: &str) -> String {
    format!("{language}\0{source}")
}
