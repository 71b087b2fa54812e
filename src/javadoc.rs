//! JavaDoc comment blocks parsed into free text plus tags.
//!
//! Parsing never fails. Lines before the first tag line form the comment
//! (joined by single spaces, blank lines dropped). A tag line is `@name value`;
//! the lines after it continue the value until the next tag line. Tags that
//! repeat within a block are merged into one value joined with `", "`.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

pub const TAG_VALUE_SEPARATOR: &str = ", ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JavaDocData {
    comment: String,
    tags: BTreeMap<String, String>,
}

impl JavaDocData {
    /// Stands in for a missing or blank comment body.
    pub const NO_COMMENT: &'static str = "(no comment)";

    pub fn new(comment: impl Into<String>, tags: BTreeMap<String, String>) -> Self {
        let comment = comment.into();
        let comment = if comment.trim().is_empty() {
            Self::NO_COMMENT.to_string()
        } else {
            comment
        };
        Self { comment, tags }
    }

    /// Data for a declaration without a documentation block.
    pub fn undocumented() -> Self {
        Self::new(String::new(), BTreeMap::new())
    }

    /// Parses one `/** ... */` block. The delimiters are optional.
    pub fn parse(raw: &str) -> Self {
        let body = strip_delimiters(raw);

        let mut comment: Vec<&str> = Vec::new();
        let mut tags: Vec<(String, String)> = Vec::new();

        for line in body.lines().map(clean_line) {
            if let Some((name, value)) = split_tag_line(line) {
                tags.push((name.to_string(), value.to_string()));
                continue;
            }
            if line.is_empty() {
                continue;
            }
            match tags.last_mut() {
                Some((_, value)) => append_words(value, line),
                None => comment.push(line),
            }
        }

        let mut merged: BTreeMap<String, String> = BTreeMap::new();
        for (name, value) in tags {
            match merged.get_mut(&name) {
                Some(existing) if existing.is_empty() => *existing = value,
                Some(existing) => {
                    if !value.is_empty() {
                        existing.push_str(TAG_VALUE_SEPARATOR);
                        existing.push_str(&value);
                    }
                }
                None => {
                    merged.insert(name, value);
                }
            }
        }

        Self::new(comment.join(" "), merged)
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn has_comment(&self) -> bool {
        self.comment != Self::NO_COMMENT
    }

    /// Tag name to merged value, sorted by tag name.
    pub fn tags(&self) -> &BTreeMap<String, String> {
        &self.tags
    }

    pub fn tag(&self, name: &str) -> Option<&str> {
        self.tags.get(name).map(String::as_str)
    }
}

impl Default for JavaDocData {
    fn default() -> Self {
        Self::undocumented()
    }
}

impl fmt::Display for JavaDocData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "+=================")?;
        writeln!(f, "| Comment: {}", self.comment)?;
        if self.tags.is_empty() {
            writeln!(f, "| No JavaDoc tags.")?;
        } else {
            writeln!(f, "| {} JavaDoc tags ...", self.tags.len())?;
            for (name, value) in &self.tags {
                writeln!(f, "| {name}: {value}")?;
            }
        }
        write!(f, "+=================")
    }
}

fn strip_delimiters(raw: &str) -> &str {
    let s = raw.trim();
    let s = s.strip_prefix("/**").unwrap_or(s);
    s.strip_suffix("*/").unwrap_or(s)
}

fn clean_line(line: &str) -> &str {
    line.trim().trim_start_matches('*').trim()
}

/// `@name rest` with `name` starting right after the `@`. A bare `@` is text.
fn split_tag_line(line: &str) -> Option<(&str, &str)> {
    let rest = line.strip_prefix('@')?;
    let first = rest.chars().next()?;
    if !(first.is_alphanumeric() || first == '_') {
        return None;
    }
    match rest.find(char::is_whitespace) {
        Some(end) => Some((&rest[..end], rest[end..].trim())),
        None => Some((rest, "")),
    }
}

fn append_words(dest: &mut String, text: &str) {
    if !dest.is_empty() {
        dest.push(' ');
    }
    dest.push_str(text);
}
