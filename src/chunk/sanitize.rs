//! Identifier sanitizing supplied by the host.

use regex::Regex;
use std::sync::OnceLock;

use crate::error::Result;

/// Turns a file name into a string safe for use in document keys.
///
/// Any closure `Fn(&str) -> Result<String>` is a sanitizer.
pub trait Sanitizer {
    /// Sanitize `name`.
    fn sanitize(&self, name: &str) -> Result<String>;
}

impl<F> Sanitizer for F
where
    F: Fn(&str) -> Result<String>,
{
    fn sanitize(&self, name: &str) -> Result<String> {
        self(name)
    }
}

/// Replaces every character outside `[A-Za-z0-9_=-]` with `_`.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeySanitizer;

impl KeySanitizer {
    /// Sanitize a document key.
    pub fn sanitize_key(name: &str) -> String {
        key_regex().replace_all(name, "_").into_owned()
    }
}

impl Sanitizer for KeySanitizer {
    fn sanitize(&self, name: &str) -> Result<String> {
        Ok(Self::sanitize_key(name))
    }
}

fn key_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^A-Za-z0-9_=-]").expect("valid key pattern"))
}
