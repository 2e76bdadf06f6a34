//! Gettext .po file parser.
//!
//! Parses .po format files into entries keyed by context and source,
//! including plural entries (`msgid_plural` / `msgstr[n]`).

/// A parsed .po entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoEntry {
    pub context: String,
    pub source: String,
    /// Plural source form, when the entry has one.
    pub plural: Option<String>,
    /// `msgstr` for singular entries, `msgstr[0..]` for plural ones.
    pub translations: Vec<String>,
}

impl PoEntry {
    /// Translation for plural form `index`, if present and non-empty.
    pub fn form(&self, index: usize) -> Option<&str> {
        self.translations
            .get(index)
            .map(String::as_str)
            .filter(|t| !t.is_empty())
    }
}

/// Highest accepted `msgstr[n]` index plus one; gettext languages use at most six.
const MAX_PLURAL_FORMS: usize = 16;

#[derive(Clone, Copy)]
enum Field {
    Context,
    Id,
    Plural,
    Str(usize),
}

#[derive(Default)]
struct Pending {
    context: String,
    msgid: String,
    plural: Option<String>,
    msgstr: Vec<String>,
}

impl Pending {
    /// Emit the entry when it has a source and at least one translation.
    fn finish(&mut self, entries: &mut Vec<PoEntry>) {
        let pending = std::mem::take(self);
        if !pending.msgid.is_empty() && pending.msgstr.iter().any(|s| !s.is_empty()) {
            entries.push(PoEntry {
                context: pending.context,
                source: pending.msgid,
                plural: pending.plural,
                translations: pending.msgstr,
            });
        }
    }

    fn set_msgstr(&mut self, index: usize, value: String) {
        if self.msgstr.len() <= index {
            self.msgstr.resize(index + 1, String::new());
        }
        self.msgstr[index] = value;
    }

    fn append(&mut self, field: Field, text: &str) {
        match field {
            Field::Context => self.context.push_str(text),
            Field::Id => self.msgid.push_str(text),
            Field::Plural => self.plural.get_or_insert_with(String::new).push_str(text),
            Field::Str(i) => {
                if let Some(s) = self.msgstr.get_mut(i) {
                    s.push_str(text);
                }
            }
        }
    }
}

/// Parse a .po file contents into entries.
///
/// Handles multiline strings, msgctxt, msgid, msgid_plural and indexed
/// msgstr directives. The header entry (empty msgid) is skipped.
pub fn parse_po(content: &str) -> Vec<PoEntry> {
    let mut entries = Vec::new();
    let mut pending = Pending::default();
    let mut current: Option<Field> = None;

    for line in content.lines() {
        let line = line.trim();

        if line.starts_with('#') {
            continue;
        }

        if line.is_empty() {
            pending.finish(&mut entries);
            current = None;
            continue;
        }

        if let Some(rest) = line.strip_prefix("msgctxt ") {
            // A new entry may start without a separating blank line
            if !pending.msgid.is_empty() {
                pending.finish(&mut entries);
            }
            pending.context = unquote(rest);
            current = Some(Field::Context);
        } else if let Some(rest) = line.strip_prefix("msgid_plural ") {
            pending.plural = Some(unquote(rest));
            current = Some(Field::Plural);
        } else if let Some(rest) = line.strip_prefix("msgid ") {
            if !pending.msgid.is_empty() {
                pending.finish(&mut entries);
            }
            pending.msgid = unquote(rest);
            current = Some(Field::Id);
        } else if let Some(rest) = line.strip_prefix("msgstr[") {
            let Some((index, value)) = rest.split_once(']') else {
                current = None;
                continue;
            };
            let Some(index) = index
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|i| *i < MAX_PLURAL_FORMS)
            else {
                current = None;
                continue;
            };
            pending.set_msgstr(index, unquote(value));
            current = Some(Field::Str(index));
        } else if let Some(rest) = line.strip_prefix("msgstr ") {
            pending.set_msgstr(0, unquote(rest));
            current = Some(Field::Str(0));
        } else if line.starts_with('"') {
            if let Some(field) = current {
                pending.append(field, &unquote(line));
            }
        }
    }

    // Handle last entry (file may not end with empty line)
    pending.finish(&mut entries);

    entries
}

/// Remove surrounding quotes and unescape basic sequences.
///
/// Uses a single-pass character-by-character parser to avoid ordering bugs
/// where chained `.replace()` calls could double-unescape sequences like `\\n`.
fn unquote(s: &str) -> String {
    let s = s.trim();
    let s = s.strip_prefix('"').unwrap_or(s);
    let s = s.strip_suffix('"').unwrap_or(s);

    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => result.push('\n'),
                Some('t') => result.push('\t'),
                Some('"') => result.push('"'),
                Some('\\') => result.push('\\'),
                Some(other) => {
                    result.push('\\');
                    result.push(other);
                }
                None => result.push('\\'),
            }
        } else {
            result.push(c);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_po() {
        let content = r#"
msgid "Post Counts"
msgstr "Nombre de publications"

msgid "There are no {label}."
msgstr "Il n'y a aucun {label}."
"#;
        let entries = parse_po(content);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].source, "Post Counts");
        assert_eq!(entries[0].form(0), Some("Nombre de publications"));
        assert_eq!(entries[1].plural, None);
    }

    #[test]
    fn parse_plural_entry() {
        let content = r#"
msgid "There is {count} {label}."
msgid_plural "There are {count} {label}."
msgstr[0] "Il y a {count} {label}."
msgstr[1] "Il y a {count} {label} au total."
"#;
        let entries = parse_po(content);
        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].plural.as_deref(),
            Some("There are {count} {label}.")
        );
        assert_eq!(entries[0].form(1), Some("Il y a {count} {label} au total."));
        assert_eq!(entries[0].form(2), None);
    }

    #[test]
    fn out_of_range_plural_index_is_skipped() {
        let content = concat!(
            "msgid \"a\"\n",
            "msgid_plural \"b\"\n",
            "msgstr[0] \"x\"\n",
            "msgstr[18446744073709551615] \"y\"\n",
            "\"continued\"\n",
            "msgstr[16] \"z\"\n",
        );
        let entries = parse_po(content);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].translations, vec!["x".to_string()]);
    }

    #[test]
    fn parse_with_context() {
        let content = r#"
msgctxt "menu"
msgid "File"
msgstr "Fichier"
"#;
        let entries = parse_po(content);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].context, "menu");
        assert_eq!(entries[0].source, "File");
    }

    #[test]
    fn header_and_untranslated_entries_are_skipped() {
        let content = r#"
msgid ""
msgstr ""
"Content-Type: text/plain; charset=UTF-8\n"

msgid "Untranslated"
msgstr ""

msgid "Translated"
msgstr "Traduit"
"#;
        let entries = parse_po(content);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].source, "Translated");
    }

    #[test]
    fn parse_multiline() {
        let content = r#"
msgid ""
"Hello "
"World"
msgstr ""
"Bonjour "
"Monde"
"#;
        let entries = parse_po(content);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].source, "Hello World");
        assert_eq!(entries[0].form(0), Some("Bonjour Monde"));
    }

    #[test]
    fn entries_without_blank_separator() {
        let content = "msgid \"a\"\nmsgstr \"A\"\nmsgid \"b\"\nmsgstr \"B\"\n";
        let entries = parse_po(content);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].form(0), Some("B"));
    }

    #[test]
    fn unescape_double_backslash_then_n() {
        assert_eq!(unquote(r#""line\\nend""#), "line\\nend");
        assert_eq!(unquote(r#""line\nend""#), "line\nend");
    }

    #[test]
    fn skip_comments() {
        let content = r#"
# Translator comment
#: src/count_summary.rs:16
msgid "Hello"
msgstr "Bonjour"
"#;
        assert_eq!(parse_po(content).len(), 1);
    }
}
