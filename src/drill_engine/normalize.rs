//! Repairs the shorthand learners type so the strict parser accepts it.

use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex literal"));

// 2x -> 2*x, 2(x+1) -> 2*(x+1), "4 x" -> 4*x
static DIGIT_BEFORE_FACTOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d)\s*([a-z(])").expect("valid regex literal"));

// )x -> )*x, )2 -> )*2, )( -> )*(
static PAREN_BEFORE_FACTOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\)\s*([a-z0-9(])").expect("valid regex literal"));

/// Trim, lowercase, collapse whitespace and make implicit multiplication explicit.
///
/// Returns an empty string for blank input.
pub fn normalize_answer(input: &str) -> String {
    let lowered = input.trim().to_lowercase();
    let collapsed = WHITESPACE.replace_all(&lowered, " ");
    let digits_done = DIGIT_BEFORE_FACTOR.replace_all(&collapsed, "${1}*${2}");
    PAREN_BEFORE_FACTOR
        .replace_all(&digits_done, ")*${1}")
        .into_owned()
}
