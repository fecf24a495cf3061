//! Text helpers shared by the enhancements.

/// Whitespace as browsers strip it from form values: Unicode white space
/// plus the byte order mark, but not NEXT LINE (U+0085).
fn is_form_whitespace(c: char) -> bool {
    match c {
        '\u{FEFF}' => true,
        '\u{0085}' => false,
        c => c.is_whitespace(),
    }
}

/// Trim a field value the way page scripts do.
pub(crate) fn trim_value(value: &str) -> &str {
    value.trim_matches(is_form_whitespace)
}
