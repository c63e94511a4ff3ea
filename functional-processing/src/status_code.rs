//! Human-readable text for coded status identifiers

use regex::Regex;
use std::fmt::Debug;
use std::sync::OnceLock;

/// Lowercase-to-uppercase boundary pattern
static WORD_BOUNDARY_REGEX: OnceLock<Regex> = OnceLock::new();

// `regex` has no look-behind, so the lowercase letter is captured and re-emitted
fn get_word_boundary_regex() -> &'static Regex {
    WORD_BOUNDARY_REGEX
        .get_or_init(|| Regex::new(r"([a-z])([A-Z])").expect("Invalid word boundary regex"))
}

/// Insert a space before every uppercase letter that follows a lowercase one
///
/// `"NotFound"` becomes `"Not Found"`. Input without such a boundary, like
/// `"OK"`, is returned unchanged.
pub fn to_status_code_text(name: &str) -> String {
    get_word_boundary_regex().replace_all(name, "$1 $2").into_owned()
}

/// [`to_status_code_text`] applied to an enum variant's `Debug` name
pub fn status_text<S: Debug>(status: &S) -> String {
    to_status_code_text(&format!("{status:?}"))
}
