//! Case-insensitive header map for the parsed upgrade request.

use std::borrow::Cow;
use std::collections::HashMap;

/// HTTP headers collection.
///
/// Header names are normalized to lowercase at insertion time for
/// case-insensitive matching. Lookups avoid allocation when the lookup
/// key is already lowercase.
#[derive(Debug, Default, Clone)]
pub struct Headers {
    inner: HashMap<String, String>,
}

impl Headers {
    /// Create empty headers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a header value by name (case-insensitive).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner
            .get(lowercase_header_key(name).as_ref())
            .map(String::as_str)
    }

    /// Insert a header.
    ///
    /// The header name is normalized to lowercase. A later insert with
    /// the same name (in any casing) replaces the earlier value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.inner
            .insert(name.into().to_ascii_lowercase(), value.into());
    }

    /// Check if a header exists (case-insensitive).
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.inner.contains_key(lowercase_header_key(name).as_ref())
    }

    /// Iterate over all headers as (name, value) pairs.
    ///
    /// Names are in their normalized lowercase form.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Returns the number of headers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if there are no headers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for Headers {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut headers = Headers::new();
        for (name, value) in iter {
            headers.insert(name, value);
        }
        headers
    }
}

/// Lowercase a header name for lookup.
///
/// Returns a borrowed `Cow` when the name is already lowercase, so the
/// common case of programmatic access with lowercase literals is
/// zero-alloc.
#[inline]
fn lowercase_header_key(name: &str) -> Cow<'_, str> {
    if name.bytes().any(|b| b.is_ascii_uppercase()) {
        Cow::Owned(name.to_ascii_lowercase())
    } else {
        Cow::Borrowed(name)
    }
}
