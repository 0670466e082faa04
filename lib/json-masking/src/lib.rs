//! # JSON masking
//!
//! Mask sensitive fields of a JSON document before it is logged, stored or
//! transmitted.
//!
//! Properties are selected with case-insensitive wildcard patterns matched
//! against their full path (see [`pattern`]). A selected property is either
//! fully replaced by a literal mask, or partially redacted by a
//! [`PartialMask`] selected by path.
//!
//! ## Quick Start
//!
//! ```rust
//! use json_masking::MaskFields;
//!
//! # fn main() -> Result<(), json_masking::MaskingError> {
//! let json = r#"{"Test":"1","Password":"somepass#here"}"#;
//!
//! let masked = json.mask_fields(&["password"], "----")?;
//!
//! assert_eq!(masked, "{\n  \"Test\": \"1\",\n  \"Password\": \"----\"\n}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Property paths
//!
//! | Document | Property | Path |
//! |----------|----------|------|
//! | `{"Password": ".."}` | `Password` | `Password` |
//! | `{"Card": {"Number": ".."}}` | `Number` | `Card.Number` |
//! | `{"Items": [{"Id": ".."}]}` | `Id` | `Items[0].Id` |
//! | `{"first.name": ".."}` | `first.name` | `['first.name']` |
//!
//! A top-level array is a list of documents: each element is masked on its
//! own and paths restart from the element.
//!
//! Control characters inside bracket notation are escaped (`['multi\nline']`
//! for a name containing a new line), so `*` never spans a raw line break.
//!
//! ## Field names
//!
//! [`JsonMaskerBuilder::with_field_name`] masks every property with a given
//! name, whatever its depth: `password` masks `Password` and
//! `DepthObject.Password`, but not `MyPassword`.
//!
//! Numbers are kept as written in the input (`1e2`, 30-digit integers), both
//! in the output and in the text given to partial masks.
//!
//! ## Partial masks
//!
//! ```rust
//! use json_masking::{MaskFields, PartialMasks, partial};
//!
//! # fn main() -> Result<(), json_masking::MaskingError> {
//! fn mask_card(number: &str) -> String {
//!     let digits = number.chars().filter(char::is_ascii_digit).collect::<String>();
//!     match (digits.get(..6), digits.get(digits.len().saturating_sub(4)..)) {
//!         (Some(first), Some(last)) if digits.len() >= 13 => format!("{first}*****{last}"),
//!         _ => number.to_string(),
//!     }
//! }
//!
//! let partial_masks = PartialMasks::new().with("*card.number", partial::from_fn(mask_card))?;
//! let json = r#"{"Card":{"Number":"4622943127049865"}}"#;
//!
//! let masked = json.mask_fields_with_partial(&["*card.number"], "----", &partial_masks)?;
//!
//! assert!(masked.contains(r#""Number": "462294*****9865""#));
//! # Ok(())
//! # }
//! ```
//!
//! A partial mask returning its input unchanged means the value could not be
//! partially redacted: the literal mask is used instead. A failing partial
//! mask aborts the whole operation with [`MaskingError::TransformFailure`].
//!
//! ## Logging
//!
//! The crate emits `tracing` events (`debug` and `trace` levels) but never
//! logs property values, nor installs a subscriber.

mod apply;
mod error;
mod masker;
pub mod partial;
pub mod pattern;
mod path;
mod walker;

pub use self::error::{BoxError, MaskingError};
pub use self::masker::{
    DEFAULT_MASK, JsonMasker, JsonMaskerBuilder, MaskFields, mask_fields,
};
pub use self::partial::{PartialMask, PartialMasks};
pub use self::pattern::{Blacklist, WildcardPattern, wildcard_match};
