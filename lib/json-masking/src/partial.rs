//! Partial (format-preserving) masks.
//!
//! A partial mask receives the textual value of a matched property and returns
//! a redacted version of it, e.g. keeping the first six and last four digits
//! of a card number. Partial masks are selected by matching the property path
//! against the wildcard keys of [`PartialMasks`].
//!
//! # Examples
//!
//! ```rust
//! use json_masking::{PartialMasks, partial};
//!
//! # fn main() -> Result<(), json_masking::MaskingError> {
//! let partial_masks = PartialMasks::new()
//!     // fallible closure
//!     .with("*card.number", |text: &str| -> Result<String, std::num::ParseIntError> {
//!         let number = text.parse::<u64>()?;
//!         Ok(format!("****{}", number % 10_000))
//!     })?
//!     // infallible closure
//!     .with("*email", partial::from_fn(|text| text.replace(|ch: char| ch != '@', "*")))?;
//!
//! assert_eq!(partial_masks.len(), 2);
//! # Ok(())
//! # }
//! ```

use std::fmt;

use indexmap::IndexMap;

use crate::error::{BoxError, MaskingError};
use crate::pattern::WildcardPattern;

/// A transformation producing a partially redacted value.
///
/// Returning the input unchanged means the value could not be partially
/// redacted; the property is then fully masked instead.
///
/// This trait is implemented for closures `Fn(&str) -> Result<String, E>`.
/// Use [`from_fn`] for infallible closures.
pub trait PartialMask: Send + Sync {
    /// Redacts `value`.
    ///
    /// # Errors
    ///
    /// Any error aborts the masking of the whole document with
    /// [`MaskingError::TransformFailure`].
    fn mask(&self, value: &str) -> Result<String, BoxError>;
}

impl<F, E> PartialMask for F
where
    F: Fn(&str) -> Result<String, E> + Send + Sync,
    E: Into<BoxError>,
{
    fn mask(&self, value: &str) -> Result<String, BoxError> {
        self(value).map_err(Into::into)
    }
}

/// A [`PartialMask`] wrapping an infallible closure, see [`from_fn`].
#[derive(derive_more::Debug, Clone, Copy)]
pub struct Infallible<F>(#[debug(skip)] F);

impl<F> PartialMask for Infallible<F>
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn mask(&self, value: &str) -> Result<String, BoxError> {
        Ok((self.0)(value))
    }
}

/// Wraps an infallible `Fn(&str) -> String` into a [`PartialMask`].
pub fn from_fn<F>(mask: F) -> Infallible<F>
where
    F: Fn(&str) -> String + Send + Sync,
{
    Infallible(mask)
}

struct Entry {
    pattern: WildcardPattern,
    mask: Box<dyn PartialMask>,
}

/// Ordered mapping from wildcard pattern to [`PartialMask`].
///
/// Keys are wildcard patterns matched case-insensitively against the path of
/// a blacklisted property. They are independent of the blacklist pattern that
/// caused the match. When several keys match, the first inserted wins.
#[derive(Default)]
pub struct PartialMasks {
    entries: IndexMap<String, Entry>,
}

impl fmt::Debug for PartialMasks {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_tuple("PartialMasks")
            .field(&self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl PartialMasks {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a partial mask for a wildcard pattern.
    ///
    /// Registering the same pattern again replaces the previous mask and
    /// keeps its position.
    ///
    /// # Errors
    ///
    /// Returns [`MaskingError::InvalidPattern`] if the pattern cannot be compiled.
    pub fn with(
        mut self,
        pattern: impl Into<String>,
        mask: impl PartialMask + 'static,
    ) -> Result<Self, MaskingError> {
        self.insert(pattern, mask)?;
        Ok(self)
    }

    /// Registers a partial mask for a wildcard pattern, in place.
    ///
    /// # Errors
    ///
    /// Returns [`MaskingError::InvalidPattern`] if the pattern cannot be compiled.
    pub fn insert(
        &mut self,
        pattern: impl Into<String>,
        mask: impl PartialMask + 'static,
    ) -> Result<(), MaskingError> {
        let pattern = WildcardPattern::new(pattern)?;
        let entry = Entry {
            pattern: pattern.clone(),
            mask: Box::new(mask),
        };
        self.entries.insert(pattern.as_str().to_string(), entry);
        Ok(())
    }

    /// Finds the first partial mask whose pattern matches `path`.
    pub(crate) fn find(&self, path: &str) -> Option<&dyn PartialMask> {
        self.entries
            .values()
            .find(|entry| entry.pattern.is_match(path))
            .map(|entry| entry.mask.as_ref())
    }

    /// Number of registered patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no pattern is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
