//! Redaction of collected matches.
//!
//! Each match is redacted exactly once, either with the literal mask or with a
//! partial mask selected by path. Matches are applied deepest first, so a
//! matched container is only replaced after the matches beneath it.

use std::borrow::Cow;
use std::cmp::Reverse;

use jsonptr::assign::Assign;
use jsonptr::resolve::Resolve;
use serde_json::Value;
use tracing::{debug, trace};

use crate::error::MaskingError;
use crate::partial::PartialMasks;
use crate::walker::Match;

/// Redacts every match of `document`.
///
/// # Errors
///
/// Returns [`MaskingError::TransformFailure`] as soon as a partial mask
/// fails; the offending property keeps its value but the document must be
/// discarded.
pub(crate) fn apply_redactions(
    document: &mut Value,
    mut matches: Vec<Match>,
    mask: &str,
    partial_masks: Option<&PartialMasks>,
) -> Result<(), MaskingError> {
    debug!(matches = matches.len(), "applying redactions");

    // stable: discovery order is kept within a depth
    matches.sort_by_key(|found| Reverse(found.depth));

    for found in &matches {
        let redacted = redacted_value(document, found, mask, partial_masks)?;
        document
            .assign(&found.pointer, Value::String(redacted))
            .map_err(|error| MaskingError::RedactionError {
                pointer: found.pointer.to_string(),
                message: error.to_string(),
            })?;
    }

    Ok(())
}

fn redacted_value(
    document: &Value,
    found: &Match,
    mask: &str,
    partial_masks: Option<&PartialMasks>,
) -> Result<String, MaskingError> {
    let Some(partial_mask) = partial_masks.and_then(|masks| masks.find(&found.path)) else {
        trace!(path = %found.path, "full mask");
        return Ok(mask.to_string());
    };

    let current = document
        .resolve(&found.pointer)
        .map_err(|error| MaskingError::RedactionError {
            pointer: found.pointer.to_string(),
            message: error.to_string(),
        })?;
    let text = value_as_text(current);

    let masked = partial_mask
        .mask(&text)
        .map_err(|error| MaskingError::transform_failure(&found.path, &error))?;

    if masked == text {
        trace!(path = %found.path, "partial mask left value unchanged, fallback to full mask");
        Ok(mask.to_string())
    } else {
        trace!(path = %found.path, "partial mask");
        Ok(masked)
    }
}

/// Textual form of a value handed to partial masks.
///
/// Strings are passed without quotes, `null` as an empty string, other
/// values as compact JSON.
pub(crate) fn value_as_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(text) => Cow::Borrowed(text),
        Value::Null => Cow::Borrowed(""),
        Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_) => {
            Cow::Owned(value.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use serde_json::json;

    use super::*;
    use crate::error::BoxError;
    use crate::partial::from_fn;
    use crate::pattern::Blacklist;
    use crate::walker::collect_matches;

    fn redact(
        mut document: Value,
        patterns: &[&str],
        partial_masks: Option<&PartialMasks>,
    ) -> Result<Value, MaskingError> {
        let blacklist = Blacklist::new(patterns)?;
        let matches = collect_matches(&document, &blacklist);
        apply_redactions(&mut document, matches, "----", partial_masks)?;
        Ok(document)
    }

    #[test]
    fn should_stringify_values_for_partial_masks() {
        insta::assert_snapshot!(value_as_text(&json!("text")).into_owned(), @"text");
        insta::assert_snapshot!(value_as_text(&json!(123_456)).into_owned(), @"123456");
        insta::assert_snapshot!(value_as_text(&json!(-1.5)).into_owned(), @"-1.5");
        insta::assert_snapshot!(value_as_text(&json!(true)).into_owned(), @"true");
        insta::assert_snapshot!(value_as_text(&Value::Null).into_owned(), @"");
        insta::assert_snapshot!(value_as_text(&json!({"a": [1, "b"]})).into_owned(), @r#"{"a":[1,"b"]}"#);
    }

    #[test]
    fn should_fully_mask_without_partial_masks() {
        let document = json!({ "Password": 123, "Nested": { "Password": null } });

        let redacted = redact(document, &["*password"], None).expect("should redact");

        assert_eq!(
            redacted,
            json!({ "Password": "----", "Nested": { "Password": "----" } })
        );
    }

    #[test]
    fn should_fully_mask_when_no_partial_pattern_matches() {
        let partial_masks = PartialMasks::new()
            .with("*iban", from_fn(|_| "partial".to_string()))
            .expect("pattern should compile");
        let document = json!({ "Card": { "Number": "4622943127049865" } });

        let redacted =
            redact(document, &["*card.number"], Some(&partial_masks)).expect("should redact");

        assert_eq!(redacted, json!({ "Card": { "Number": "----" } }));
    }

    #[test]
    fn should_feed_numbers_as_text_to_partial_masks() {
        let partial_masks = PartialMasks::new()
            .with("*pin", from_fn(|text| format!("{}**", text.get(..2).unwrap_or_default())))
            .expect("pattern should compile");
        let document = json!({ "Pin": 1234 });

        let redacted = redact(document, &["pin"], Some(&partial_masks)).expect("should redact");

        assert_eq!(redacted, json!({ "Pin": "12**" }));
    }

    #[test]
    fn should_fallback_to_full_mask_when_partial_mask_is_a_no_op() {
        let partial_masks = PartialMasks::new()
            .with("*card.number", from_fn(str::to_string))
            .expect("pattern should compile");
        let document = json!({ "Card": { "Number": "4622943127049865" } });

        let redacted =
            redact(document, &["*card.number"], Some(&partial_masks)).expect("should redact");

        assert_eq!(redacted, json!({ "Card": { "Number": "----" } }));
    }

    #[test]
    fn should_fail_when_partial_mask_fails() {
        let partial_masks = PartialMasks::new()
            .with("*card.number", |_: &str| -> Result<String, BoxError> {
                Err("startIndex cannot be larger than length of string".into())
            })
            .expect("pattern should compile");
        let document = json!({ "Card": { "Number": "4622943127049865" } });

        let error = redact(document, &["*card.number"], Some(&partial_masks))
            .expect_err("should fail");

        insta::assert_snapshot!(error, @"An error occurred while executing the function in the dictionary value. startIndex cannot be larger than length of string");
        assert!(matches!(
            error,
            MaskingError::TransformFailure { ref path, .. } if path == "Card.Number"
        ));
    }

    #[test]
    fn should_redact_nested_matches_before_their_container() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorder = Arc::clone(&seen);
        let partial_masks = PartialMasks::new()
            .with(
                "*",
                from_fn(move |text| {
                    if let Ok(mut seen) = recorder.lock() {
                        seen.push(text.to_string());
                    }
                    format!("<{}>", text.len())
                }),
            )
            .expect("pattern should compile");
        let document = json!({ "Secret": { "Secret": "abc", "Public": 1 } });

        let redacted = redact(document, &["*secret"], Some(&partial_masks)).expect("should redact");

        assert_eq!(redacted, json!({ "Secret": "<27>" }));
        let seen = seen.lock().expect("lock should not be poisoned").clone();
        insta::assert_debug_snapshot!(seen, @r#"
        [
            "abc",
            "{\"Secret\":\"<3>\",\"Public\":1}",
        ]
        "#);
    }
}
