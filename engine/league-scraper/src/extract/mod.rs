//! Page extractors.
//!
//! Each extractor reads one page's markup and returns typed records. They are
//! pure: no network access, no logging of progress, no shared state. Positions,
//! class markers and labels come from [`crate::layout`].

pub mod day;
pub mod matchups;
pub mod profile;
pub mod questions;
pub mod responses;
pub mod stats;

pub use day::extract_day;
pub use matchups::extract_matchups;
pub use profile::extract_profile;
pub use questions::extract_questions;
pub use responses::extract_responses;
pub use stats::extract_stats;

use scraper::{ElementRef, Selector};

use crate::error::{Result, ScrapeError};

/// Compile a CSS selector from the layout tables
pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector(format!("{css}: {e}")))
}

/// All text beneath an element, trimmed
pub(crate) fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Remove a leading label such as `"Gender:"` from a value
pub(crate) fn strip_label<'a>(text: &'a str, label: &str) -> &'a str {
    let text = text.trim();
    match text.strip_prefix(label) {
        Some(rest) => rest.trim_start_matches(|c: char| c == ':' || c.is_whitespace()).trim(),
        None => text,
    }
}

/// Text following `label`, skipping a short suffix ending in ':' such as `" by:"`
pub(crate) fn labelled_value<'a>(text: &'a str, label: &str) -> Option<&'a str> {
    let start = text.find(label)? + label.len();
    let mut rest = &text[start..];
    if let Some(colon) = rest.find(':') {
        if rest[..colon].chars().count() <= 8 {
            rest = &rest[colon + 1..];
        }
    }
    Some(rest.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_label() {
        assert_eq!(strip_label("Gender: Female ", "Gender"), "Female");
        assert_eq!(strip_label("Female", "Gender"), "Female");
    }

    #[test]
    fn test_labelled_value() {
        assert_eq!(labelled_value("Gender: M  Location: Duluth, MN", "Location"), Some("Duluth, MN"));
        assert_eq!(labelled_value("Referral by: Jane Doe", "Referral"), Some("Jane Doe"));
        assert_eq!(labelled_value("Branch Lakeside", "Branch"), Some("Lakeside"));
        assert_eq!(labelled_value("no label here", "Branch"), None);
    }

    #[test]
    fn test_selector_error_is_reported() {
        assert!(matches!(selector("td[["), Err(ScrapeError::Selector(_))));
    }
}
