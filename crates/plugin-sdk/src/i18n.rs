//! Translation lookup for block strings.
//!
//! Source strings carry named placeholders (`{count}`, `{label}`) that are
//! substituted after lookup, so translators may reorder them freely.

/// Looks up translated strings within a text domain.
pub trait Translator: Send + Sync {
    /// Translate a singular string.
    fn translate(&self, domain: &str, language: Option<&str>, source: &str) -> String;

    /// Translate a string with singular and plural source forms, picked by `n`.
    fn translate_plural(
        &self,
        domain: &str,
        language: Option<&str>,
        singular: &str,
        plural: &str,
        n: u64,
    ) -> String;
}

/// Pass-through translator that returns the source strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceStrings;

impl Translator for SourceStrings {
    fn translate(&self, _domain: &str, _language: Option<&str>, source: &str) -> String {
        source.to_string()
    }

    fn translate_plural(
        &self,
        _domain: &str,
        _language: Option<&str>,
        singular: &str,
        plural: &str,
        n: u64,
    ) -> String {
        if n == 1 { singular } else { plural }.to_string()
    }
}

/// Replace `{name}` placeholders in `template`.
///
/// Unknown placeholders are left untouched.
pub fn interpolate(template: &str, args: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (name, value) in args {
        out = out.replace(&format!("{{{name}}}"), value);
    }
    out
}
