//! Heading slugs.

use std::collections::HashMap;

/// Generate URL-friendly slug from heading text.
///
/// # Examples
///
/// ```
/// use treetoc::parser::content::slugify;
///
/// assert_eq!(slugify("Hello World"), "hello-world");
/// assert_eq!(slugify("API Reference"), "api-reference");
/// ```
pub fn slugify(text: &str) -> String {
    turbovault_parser::slugify(text)
}

/// Hands out unique slugs within one document.
///
/// The first use of a slug is returned as is; repeats get `-1`, `-2`, ...
#[derive(Debug, Default)]
pub struct SlugRegistry {
    seen: HashMap<String, usize>,
}

impl SlugRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve an id chosen elsewhere, e.g. an explicit heading id.
    pub fn reserve(&mut self, id: &str) {
        self.seen.entry(id.to_string()).or_insert(0);
    }

    /// A unique slug for `text`, or `None` if the text has no sluggable
    /// characters.
    pub fn unique(&mut self, text: &str) -> Option<String> {
        let base = slugify(text);
        if base.is_empty() {
            return None;
        }
        if !self.seen.contains_key(&base) {
            self.seen.insert(base.clone(), 0);
            return Some(base);
        }
        let mut count = self.seen.get(&base).copied().unwrap_or(0);
        let candidate = loop {
            count += 1;
            let candidate = format!("{}-{}", base, count);
            if !self.seen.contains_key(&candidate) {
                break candidate;
            }
        };
        self.seen.insert(base, count);
        self.seen.insert(candidate.clone(), 0);
        Some(candidate)
    }
}
