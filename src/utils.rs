use crate::constants::PATH_SEPARATOR;

/// Normalize a categorical value for lenient comparison, trimming
/// surrounding whitespace and lowercasing.
#[inline]
pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Compare two categorical values after normalization.
#[inline]
pub fn matches_normalized(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Format a decision path entry.
pub fn path_entry(attribute: &str, value: &str) -> String {
    format!("{}{}{}", attribute, PATH_SEPARATOR, value)
}

/// Split a decision path entry at the first separator.
pub fn split_path_entry(entry: &str) -> Option<(&str, &str)> {
    entry.split_once(PATH_SEPARATOR)
}

/// Join items into a comma separated list, used for prompts and messages.
pub fn items_to_strings<S: AsRef<str>>(items: &[S]) -> String {
    items.iter().map(|i| i.as_ref()).collect::<Vec<&str>>().join(", ")
}

pub fn precision_round(n: f64, precision: i32) -> f64 {
    let p = (10.0_f64).powi(precision);
    (n * p).round() / p
}
