use serde_json::Value;
use tracing::debug;

use crate::apply::apply_redactions;
use crate::error::MaskingError;
use crate::partial::{PartialMask, PartialMasks};
use crate::pattern::Blacklist;
use crate::walker::collect_matches;

/// Mask used by [`JsonMaskerBuilder`] when none is configured.
pub const DEFAULT_MASK: &str = "*******";

/// Masks the blacklisted properties of a JSON document.
///
/// Every property whose path matches one of the `blacklist` wildcard patterns
/// is replaced by `mask`, or by the result of the first partial mask whose
/// pattern matches the path. A partial mask returning its input unchanged
/// falls back to `mask`.
///
/// If the document is an array, each element is masked as its own document:
/// paths start again from each element.
///
/// The result is pretty-printed with two spaces of indentation and the
/// original key order.
///
/// # Errors
///
/// - [`MaskingError::InvalidInput`] if `json` is missing or blank, or if
///   `blacklist` is missing
/// - [`MaskingError::MalformedInput`] if `json` is not valid JSON
/// - [`MaskingError::TransformFailure`] if a partial mask fails
///
/// An empty `blacklist` is not an error: `json` is returned as is, without
/// being parsed.
///
/// # Example
///
/// ```rust
/// use json_masking::mask_fields;
///
/// # fn main() -> Result<(), json_masking::MaskingError> {
/// let json = r#"{"Test":"1","Password":"somepass#here"}"#;
///
/// let masked = mask_fields(Some(json), Some(&["password"]), "----", None)?;
///
/// assert_eq!(masked, "{\n  \"Test\": \"1\",\n  \"Password\": \"----\"\n}");
/// # Ok(())
/// # }
/// ```
pub fn mask_fields<I>(
    json: Option<&str>,
    blacklist: Option<I>,
    mask: &str,
    partial_masks: Option<&PartialMasks>,
) -> Result<String, MaskingError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let json = require_json(json)?;
    let patterns = blacklist
        .ok_or(MaskingError::InvalidInput {
            parameter: "blacklist",
        })?
        .into_iter()
        .collect::<Vec<_>>();
    if patterns.is_empty() {
        debug!("empty blacklist, nothing to mask");
        return Ok(json.to_string());
    }

    let blacklist = Blacklist::new(&patterns)?;
    mask_text(json, &blacklist, mask, partial_masks)
}

/// Extension methods masking JSON text in place of [`mask_fields`].
///
/// ```rust
/// use json_masking::MaskFields;
///
/// # fn main() -> Result<(), json_masking::MaskingError> {
/// let json = r#"{"DepthObject":{"Test":"1","Password":"somepass#here"}}"#;
///
/// let masked = json.mask_fields(&["*.password"], "*******")?;
///
/// assert!(masked.contains(r#""Password": "*******""#));
/// # Ok(())
/// # }
/// ```
pub trait MaskFields {
    /// Masks the properties matching `blacklist` with `mask`.
    ///
    /// # Errors
    ///
    /// See [`mask_fields`].
    fn mask_fields<S: AsRef<str>>(&self, blacklist: &[S], mask: &str)
    -> Result<String, MaskingError>;

    /// Masks the properties matching `blacklist`, using `partial_masks` when
    /// one of its patterns matches the property path.
    ///
    /// # Errors
    ///
    /// See [`mask_fields`].
    fn mask_fields_with_partial<S: AsRef<str>>(
        &self,
        blacklist: &[S],
        mask: &str,
        partial_masks: &PartialMasks,
    ) -> Result<String, MaskingError>;
}

impl MaskFields for str {
    fn mask_fields<S: AsRef<str>>(
        &self,
        blacklist: &[S],
        mask: &str,
    ) -> Result<String, MaskingError> {
        mask_fields(Some(self), Some(blacklist), mask, None)
    }

    fn mask_fields_with_partial<S: AsRef<str>>(
        &self,
        blacklist: &[S],
        mask: &str,
        partial_masks: &PartialMasks,
    ) -> Result<String, MaskingError> {
        mask_fields(Some(self), Some(blacklist), mask, Some(partial_masks))
    }
}

/// A reusable masker with precompiled patterns.
///
/// Patterns are compiled once by [`JsonMaskerBuilder::build`] and never
/// modified afterwards, so a `JsonMasker` can be shared between threads.
///
/// # Example
///
/// ```rust
/// use json_masking::{JsonMasker, partial};
///
/// # fn main() -> Result<(), json_masking::MaskingError> {
/// let masker = JsonMasker::builder()
///     .with_pattern("*password")
///     .with_pattern("*card.number")
///     .with_mask("----")
///     .with_partial_mask(
///         "*card.number",
///         partial::from_fn(|number| format!("{}****", number.chars().take(4).collect::<String>())),
///     )?
///     .build()?;
///
/// let masked = masker.mask(r#"{"Card":{"Number":"4622943127049865","Password":"secret"}}"#)?;
///
/// assert!(masked.contains(r#""Number": "4622****""#));
/// assert!(masked.contains(r#""Password": "----""#));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct JsonMasker {
    blacklist: Blacklist,
    mask: String,
    partial_masks: Option<PartialMasks>,
}

impl JsonMasker {
    /// Creates a builder, see [`JsonMaskerBuilder`].
    #[must_use]
    pub fn builder() -> JsonMaskerBuilder {
        JsonMaskerBuilder::default()
    }

    /// The compiled blacklist.
    #[must_use]
    pub fn blacklist(&self) -> &Blacklist {
        &self.blacklist
    }

    /// Masks a JSON text, see [`mask_fields`].
    ///
    /// # Errors
    ///
    /// - [`MaskingError::InvalidInput`] if `json` is blank
    /// - [`MaskingError::MalformedInput`] if `json` is not valid JSON
    /// - [`MaskingError::TransformFailure`] if a partial mask fails
    pub fn mask(&self, json: &str) -> Result<String, MaskingError> {
        let json = require_json(Some(json))?;
        if self.blacklist.is_empty() {
            debug!("empty blacklist, nothing to mask");
            return Ok(json.to_string());
        }

        mask_text(
            json,
            &self.blacklist,
            &self.mask,
            self.partial_masks.as_ref(),
        )
    }

    /// Masks an already parsed document in place.
    ///
    /// # Errors
    ///
    /// Returns [`MaskingError::TransformFailure`] if a partial mask fails. The
    /// document may then be partially masked and must be discarded.
    pub fn mask_value(&self, document: &mut Value) -> Result<(), MaskingError> {
        mask_document(
            document,
            &self.blacklist,
            &self.mask,
            self.partial_masks.as_ref(),
        )
    }
}

/// Builder for [`JsonMasker`].
///
/// # Default Configuration
///
/// - **Blacklist**: no pattern and no field name (nothing is masked)
/// - **Mask**: [`DEFAULT_MASK`]
/// - **Partial masks**: none
#[derive(Debug)]
pub struct JsonMaskerBuilder {
    patterns: Vec<String>,
    field_names: Vec<String>,
    mask: String,
    partial_masks: Option<PartialMasks>,
}

impl Default for JsonMaskerBuilder {
    fn default() -> Self {
        Self {
            patterns: Vec::new(),
            field_names: Vec::new(),
            mask: DEFAULT_MASK.to_string(),
            partial_masks: None,
        }
    }
}

impl JsonMaskerBuilder {
    /// Appends wildcard patterns to the blacklist.
    #[must_use]
    pub fn with_blacklist<I>(mut self, patterns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.patterns.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Appends a single wildcard pattern to the blacklist.
    #[must_use]
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.patterns.push(pattern.into());
        self
    }

    /// Appends a field name, matched case-insensitively against the name of
    /// every property, whatever its depth.
    ///
    /// `with_field_name("password")` masks `Password` and
    /// `DepthObject.Password`, but not `MyPassword`.
    #[must_use]
    pub fn with_field_name(mut self, name: impl Into<String>) -> Self {
        self.field_names.push(name.into());
        self
    }

    /// Appends several field names, see [`Self::with_field_name`].
    #[must_use]
    pub fn with_field_names<I>(mut self, names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.field_names.extend(names.into_iter().map(Into::into));
        self
    }

    /// Sets the literal replacing fully masked values.
    #[must_use]
    pub fn with_mask(mut self, mask: impl Into<String>) -> Self {
        self.mask = mask.into();
        self
    }

    /// Sets the partial masks, replacing any previously registered one.
    #[must_use]
    pub fn with_partial_masks(mut self, partial_masks: PartialMasks) -> Self {
        self.partial_masks = Some(partial_masks);
        self
    }

    /// Registers a partial mask for a wildcard pattern.
    ///
    /// # Errors
    ///
    /// Returns [`MaskingError::InvalidPattern`] if the pattern cannot be compiled.
    pub fn with_partial_mask(
        mut self,
        pattern: impl Into<String>,
        mask: impl PartialMask + 'static,
    ) -> Result<Self, MaskingError> {
        self.partial_masks
            .get_or_insert_with(PartialMasks::new)
            .insert(pattern, mask)?;
        Ok(self)
    }

    /// Compiles the blacklist and builds the masker.
    ///
    /// # Errors
    ///
    /// Returns [`MaskingError::InvalidPattern`] if a pattern cannot be compiled.
    pub fn build(self) -> Result<JsonMasker, MaskingError> {
        let Self {
            patterns,
            field_names,
            mask,
            partial_masks,
        } = self;

        let mut blacklist = Blacklist::new(&patterns)?;
        for name in &field_names {
            blacklist.push_field_name(name);
        }

        Ok(JsonMasker {
            blacklist,
            mask,
            partial_masks,
        })
    }
}

fn require_json(json: Option<&str>) -> Result<&str, MaskingError> {
    json.filter(|json| !json.trim().is_empty())
        .ok_or(MaskingError::InvalidInput { parameter: "json" })
}

fn mask_text(
    json: &str,
    blacklist: &Blacklist,
    mask: &str,
    partial_masks: Option<&PartialMasks>,
) -> Result<String, MaskingError> {
    let mut document = serde_json::from_str::<Value>(json)?;

    mask_document(&mut document, blacklist, mask, partial_masks)?;

    serde_json::to_string_pretty(&document).map_err(MaskingError::SerializationError)
}

fn mask_document(
    document: &mut Value,
    blacklist: &Blacklist,
    mask: &str,
    partial_masks: Option<&PartialMasks>,
) -> Result<(), MaskingError> {
    debug!(
        patterns = blacklist.len(),
        partial_masks = partial_masks.map_or(0, PartialMasks::len),
        "masking document"
    );

    if let Value::Array(roots) = document {
        for root in roots {
            mask_root(root, blacklist, mask, partial_masks)?;
        }
        Ok(())
    } else {
        mask_root(document, blacklist, mask, partial_masks)
    }
}

fn mask_root(
    root: &mut Value,
    blacklist: &Blacklist,
    mask: &str,
    partial_masks: Option<&PartialMasks>,
) -> Result<(), MaskingError> {
    let matches = collect_matches(root, blacklist);
    if matches.is_empty() {
        return Ok(());
    }

    apply_redactions(root, matches, mask, partial_masks)
}
