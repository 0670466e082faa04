//! Depth-first traversal collecting blacklisted properties.
//!
//! The walker only reads the document. Matched properties are recorded with
//! their path and JSON Pointer so they can be redacted once the traversal is
//! over, which keeps every computed path independent of replacements.

use jsonptr::{PointerBuf, Token};
use serde_json::Value;
use tracing::trace;

use crate::path::{index_path, property_path};
use crate::pattern::Blacklist;

/// A blacklisted property found during traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Match {
    /// Canonical property path, e.g. `Card.Number`.
    pub(crate) path: String,
    /// Location of the property value inside the walked root.
    pub(crate) pointer: PointerBuf,
    /// Number of pointer segments, `1` for root-level properties.
    pub(crate) depth: usize,
}

/// Collects every property of `root` matched by the blacklist, by path or by
/// field name.
///
/// Matches are returned in discovery order (pre-order, depth-first). A
/// matched property is still descended into, so matched properties nested
/// under a matched property are collected too.
pub(crate) fn collect_matches(root: &Value, blacklist: &Blacklist) -> Vec<Match> {
    let mut matches = Vec::new();
    walk(root, "", &PointerBuf::new(), 0, blacklist, &mut |found| {
        matches.push(found);
    });
    matches
}

fn walk<F>(
    node: &Value,
    path: &str,
    pointer: &PointerBuf,
    depth: usize,
    blacklist: &Blacklist,
    on_match: &mut F,
) where
    F: FnMut(Match),
{
    match node {
        Value::Object(properties) => {
            for (name, child) in properties {
                let child_path = property_path(path, name);
                let mut child_pointer = pointer.clone();
                child_pointer.push_back(Token::new(name.as_str()));

                if blacklist.matches_property(&child_path, name) {
                    trace!(path = %child_path, "property matched");
                    on_match(Match {
                        path: child_path.clone(),
                        pointer: child_pointer.clone(),
                        depth: depth + 1,
                    });
                }

                walk(
                    child,
                    &child_path,
                    &child_pointer,
                    depth + 1,
                    blacklist,
                    on_match,
                );
            }
        }
        Value::Array(elements) => {
            for (index, element) in elements.iter().enumerate() {
                let element_path = index_path(path, index);
                let mut element_pointer = pointer.clone();
                element_pointer.push_back(Token::new(index.to_string()));

                walk(
                    element,
                    &element_path,
                    &element_pointer,
                    depth + 1,
                    blacklist,
                    on_match,
                );
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
    }
}
