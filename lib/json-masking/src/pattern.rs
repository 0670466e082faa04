//! Wildcard patterns matched against property paths.
//!
//! A wildcard pattern is a property path where `*` stands for any sequence of
//! characters, path separators included:
//!
//! - `password` - the root-level `Password` property only
//! - `*password` - every property whose path ends with `password`
//! - `*.password` - a `password` property nested in at least one object
//! - `*card.number` - the `Number` of any `Card`, at any depth
//!
//! Matching is case-insensitive and always covers the whole path.

use regex::{Regex, RegexBuilder};

use crate::error::MaskingError;

/// A compiled wildcard pattern.
#[derive(Debug, Clone, derive_more::Display)]
#[display("{pattern}")]
pub struct WildcardPattern {
    pattern: String,
    regex: Regex,
}

impl WildcardPattern {
    /// Compiles a wildcard pattern.
    ///
    /// # Errors
    ///
    /// Returns [`MaskingError::InvalidPattern`] if the resulting expression
    /// exceeds the regex engine limits.
    pub fn new(pattern: impl Into<String>) -> Result<Self, MaskingError> {
        let pattern = pattern.into();
        let expression = ["^", &regex::escape(&pattern).replace(r"\*", ".*"), "$"].concat();
        let regex = RegexBuilder::new(&expression)
            .case_insensitive(true)
            .build()
            .map_err(|error| MaskingError::InvalidPattern {
                pattern: pattern.clone(),
                error,
            })?;

        Ok(Self { pattern, regex })
    }

    /// The raw wildcard pattern.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Returns `true` if the whole `path` matches this pattern.
    #[must_use]
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }
}

/// Checks a single path against a raw wildcard pattern.
///
/// Prefer [`WildcardPattern`] or [`Blacklist`] when the same pattern is used
/// more than once.
///
/// # Errors
///
/// Returns [`MaskingError::InvalidPattern`] if the pattern cannot be compiled.
pub fn wildcard_match(path: &str, pattern: &str) -> Result<bool, MaskingError> {
    WildcardPattern::new(pattern).map(|compiled| compiled.is_match(path))
}

/// An ordered list of compiled wildcard patterns, plus optional field names.
///
/// A property is blacklisted if any of the patterns matches its path, or if
/// its own name equals one of the field names (case-insensitive), whatever
/// its depth.
#[derive(Debug, Clone, Default)]
pub struct Blacklist {
    patterns: Vec<WildcardPattern>,
    field_names: Vec<String>,
}

impl Blacklist {
    /// Compiles every pattern, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns the first [`MaskingError::InvalidPattern`] encountered.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, MaskingError> {
        let patterns = patterns
            .iter()
            .map(|pattern| WildcardPattern::new(pattern.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            patterns,
            field_names: Vec::new(),
        })
    }

    /// Appends an already compiled pattern.
    pub fn push(&mut self, pattern: WildcardPattern) {
        self.patterns.push(pattern);
    }

    /// Appends a field name matched against property names at any depth.
    ///
    /// Unlike a pattern, the name is compared with the raw property name, so
    /// `password` matches `Password` and `DepthObject.Password` but not
    /// `MyPassword`.
    pub fn push_field_name(&mut self, name: impl AsRef<str>) {
        self.field_names.push(name.as_ref().to_lowercase());
    }

    /// Returns `true` if at least one pattern matches `path`.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(path))
    }

    /// Returns `true` if the property `name` found at `path` is blacklisted,
    /// by a pattern or by a field name.
    #[must_use]
    pub fn matches_property(&self, path: &str, name: &str) -> bool {
        self.matches(path) || self.matches_field_name(name)
    }

    fn matches_field_name(&self, name: &str) -> bool {
        if self.field_names.is_empty() {
            return false;
        }
        let name = name.to_lowercase();
        self.field_names.contains(&name)
    }

    /// Number of patterns and field names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len() + self.field_names.len()
    }

    /// Returns `true` if there is neither pattern nor field name.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty() && self.field_names.is_empty()
    }

    /// Iterates over the compiled patterns.
    pub fn iter(&self) -> impl Iterator<Item = &WildcardPattern> {
        self.patterns.iter()
    }

    /// Iterates over the field names, lowercased.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.field_names.iter().map(String::as_str)
    }
}
