//! Rules and art key/value store.
//!
//! The game describes every object type in INI-like files: one section per
//! type, keyed by name. Parsing those files is someone else's job; this
//! module is the lookup side the drawables read from, with the engine's
//! typed-default semantics.

use std::collections::HashMap;

/// One named section of ordered `key=value` entries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IniSection {
    name: String,
    entries: Vec<(String, String)>,
}

impl IniSection {
    /// Creates an empty section.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Builder-style [`IniSection::set`].
    #[must_use]
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.set(key, value);
        self
    }

    /// Section name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inserts or replaces an entry. Keys are matched case-insensitively.
    pub fn set(&mut self, key: &str, value: &str) {
        match self.entries.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(key)) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.push((key.to_string(), value.to_string())),
        }
    }

    /// Entries in file order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn raw(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.trim())
    }

    /// Reads a string, `""` when absent.
    #[must_use]
    pub fn read_string(&self, key: &str) -> &str {
        self.read_string_or(key, "")
    }

    /// Reads a string with a default for absent keys.
    #[must_use]
    pub fn read_string_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.raw(key).unwrap_or(default)
    }

    /// Reads a boolean, `false` when absent.
    #[must_use]
    pub fn read_bool(&self, key: &str) -> bool {
        self.read_bool_or(key, false)
    }

    /// Reads a boolean. Only the first character matters, as in the game:
    /// `y`, `t`, `1` are true; `n`, `f`, `0` are false; anything else yields
    /// the default.
    #[must_use]
    pub fn read_bool_or(&self, key: &str, default: bool) -> bool {
        match self.raw(key).and_then(|v| v.chars().next()) {
            Some('y' | 'Y' | 't' | 'T' | '1') => true,
            Some('n' | 'N' | 'f' | 'F' | '0') => false,
            _ => default,
        }
    }

    /// Reads an integer, falling back to `default` when absent or malformed.
    #[must_use]
    pub fn read_int_or(&self, key: &str, default: i32) -> i32 {
        self.raw(key).and_then(|v| v.parse().ok()).unwrap_or(default)
    }

    /// Reads a float, falling back to `default` when absent or malformed.
    #[must_use]
    pub fn read_double_or(&self, key: &str, default: f64) -> f64 {
        self.raw(key).and_then(|v| v.parse().ok()).unwrap_or(default)
    }
}

/// A set of named sections (one rules or art file).
#[derive(Clone, Debug, Default)]
pub struct IniFile {
    sections: HashMap<String, IniSection>,
}

impl IniFile {
    /// Creates an empty file.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a section.
    pub fn insert(&mut self, section: IniSection) {
        self.sections.insert(section.name.clone(), section);
    }

    /// Builder-style [`IniFile::insert`].
    #[must_use]
    pub fn with_section(mut self, section: IniSection) -> Self {
        self.insert(section);
        self
    }

    /// Looks up a section.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&IniSection> {
        self.sections.get(name)
    }

    /// Returns a copy of the named section, or an empty one carrying the
    /// name when it does not exist.
    #[must_use]
    pub fn get_or_create_section(&self, name: &str) -> IniSection {
        self.sections
            .get(name)
            .cloned()
            .unwrap_or_else(|| IniSection::new(name))
    }
}
