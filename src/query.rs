//! Query-string construction for list/search endpoints.
//!
//! Keys keep their insertion order. Absent values and blank strings are
//! skipped entirely rather than serialized as empty parameters, matching
//! what the backend expects from its filter parameters.

use std::fmt::Display;

use url::form_urlencoded;

/// An ordered set of query parameters.
///
/// Pure accumulator with no I/O; encoding happens once at the end via
/// `url::form_urlencoded`.
#[derive(Debug, Clone, Default)]
pub struct QueryString {
    pairs: Vec<(String, String)>,
}

impl QueryString {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a string parameter. `None`, empty, and whitespace-only values
    /// are dropped; surviving values are appended untrimmed.
    pub fn push_str(&mut self, key: &str, value: Option<&str>) {
        if let Some(v) = value {
            if !v.trim().is_empty() {
                self.pairs.push((key.to_string(), v.to_string()));
            }
        }
    }

    /// Append a scalar (number or boolean) via its canonical `Display` form.
    pub fn push<T: Display>(&mut self, key: &str, value: Option<T>) {
        if let Some(v) = value {
            self.pairs.push((key.to_string(), v.to_string()));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Percent-encoded pairs without the leading `?`, or `None` when no
    /// parameter survived filtering. This is what gets attached to a `Url`.
    pub fn query(&self) -> Option<String> {
        if self.pairs.is_empty() {
            return None;
        }
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.pairs {
            serializer.append_pair(key, value);
        }
        Some(serializer.finish())
    }

    /// Full query string with the leading `?`, or the empty string.
    pub fn to_query_string(&self) -> String {
        match self.query() {
            Some(encoded) => format!("?{encoded}"),
            None => String::new(),
        }
    }
}
