//! Canonical property paths.
//!
//! Paths are the strings wildcard patterns are matched against:
//!
//! - `Password` - root-level property
//! - `Card.Number` - nested property
//! - `Items[0].Id` - property of an array element
//! - `['first.name']`, `User['e-mail address']` - names with special characters
//!
//! Property names containing a special character are written in bracket
//! notation so that the dot stays an unambiguous separator.

const SPECIAL_CHARACTERS: &[char] = &[
    '.', ' ', '\'', '/', '"', '[', ']', '(', ')', '\t', '\n', '\r', '\u{000C}', '\u{0008}', '\\',
    '\u{0085}', '\u{2028}', '\u{2029}',
];

/// Builds the path of the property `name` inside the object at `parent`.
///
/// An empty `parent` denotes the document root.
pub(crate) fn property_path(parent: &str, name: &str) -> String {
    if name.contains(SPECIAL_CHARACTERS) {
        [parent, "['", &escape_name(name), "']"].concat()
    } else if parent.is_empty() {
        name.to_string()
    } else {
        [parent, ".", name].concat()
    }
}

/// Escapes a name written between single quotes.
///
/// Control characters never appear raw in a path: they use their short form
/// (`\n`) or a lowercase `\uXXXX` escape.
fn escape_name(name: &str) -> String {
    let mut escaped = String::with_capacity(name.len() + 2);
    for ch in name.chars() {
        match ch {
            '\\' => escaped.push_str(r"\\"),
            '\'' => escaped.push_str(r"\'"),
            '\t' => escaped.push_str(r"\t"),
            '\n' => escaped.push_str(r"\n"),
            '\r' => escaped.push_str(r"\r"),
            '\u{000C}' => escaped.push_str(r"\f"),
            '\u{0008}' => escaped.push_str(r"\b"),
            '\u{0085}' | '\u{2028}' | '\u{2029}' => push_unicode_escape(&mut escaped, ch),
            ch if ch < ' ' => push_unicode_escape(&mut escaped, ch),
            ch => escaped.push(ch),
        }
    }
    escaped
}

fn push_unicode_escape(escaped: &mut String, ch: char) {
    escaped.push_str(&format!("\\u{:04x}", u32::from(ch)));
}

/// Builds the path of the element at `index` inside the array at `parent`.
pub(crate) fn index_path(parent: &str, index: usize) -> String {
    format!("{parent}[{index}]")
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::root("", "Password", "Password")]
    #[case::nested("Card", "Number", "Card.Number")]
    #[case::deep("A.B[2]", "C", "A.B[2].C")]
    #[case::dot_in_name("", "first.name", "['first.name']")]
    #[case::space_in_name("User", "e-mail address", "User['e-mail address']")]
    #[case::quote_in_name("", "it's", r"['it\'s']")]
    #[case::backslash_in_name("", r"a\b", r"['a\\b']")]
    #[case::dash_is_plain("Card", "card-number", "Card.card-number")]
    #[case::empty_name("Card", "", "Card.")]
    #[case::new_line_in_name("", "multi\nline", r"['multi\nline']")]
    #[case::control_characters_in_name("A", "tab\there\r\u{000C}\u{0008}", r"A['tab\there\r\f\b']")]
    #[case::unicode_separators_in_name("", "a\u{2028}b\u{0085}", r"['a\u2028b\u0085']")]
    #[case::other_control_in_bracket_name("", "a b\u{0001}", r"['a b\u0001']")]
    fn should_build_property_path(#[case] parent: &str, #[case] name: &str, #[case] expected: &str) {
        assert_eq!(property_path(parent, name), expected);
    }

    #[test]
    fn should_build_index_path() {
        insta::assert_snapshot!(index_path("Items", 3), @"Items[3]");
        insta::assert_snapshot!(index_path("Matrix[0]", 1), @"Matrix[0][1]");
        insta::assert_snapshot!(index_path("", 0), @"[0]");
    }
}
