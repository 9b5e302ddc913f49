//! Domain models that mirror the JSON payload of the book listing service and
//! get passed throughout the TUI. The intent is that these types stay
//! light-weight data holders so other layers can focus on presentation and
//! session logic. The catalog is loaded once per session and never mutated,
//! so every field is plain owned data that can be cloned freely into views.

use std::fmt;

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
/// One book record as served by the listing endpoint. Immutable once loaded.
pub struct Book {
    /// Title displayed in lists and matched by the filter engine.
    pub title: String,
    /// Optional tagline shown under the title. The service sometimes sends an
    /// empty string, so a missing field collapses to the same thing.
    #[serde(default)]
    pub subtitle: String,
    /// Unique identifier. Favorites are keyed on this so toggles survive
    /// re-filtering of the visible list.
    pub isbn13: String,
    /// Source-currency price as the service encodes it, e.g. `"$28.99"`. Kept
    /// as raw text; parsing lives in the `pricing` module.
    pub price: String,
    /// Cover image URL. Carried for completeness even though the terminal
    /// front-end cannot render it.
    #[serde(default)]
    pub image: String,
    /// Store page URL opened by the browse view's Enter action.
    #[serde(default)]
    pub url: String,
}

impl Book {
    /// Compose a `Title: Subtitle` string that gracefully omits the colon when
    /// the subtitle is blank. The cart view relies on this ready-to-use
    /// formatting.
    pub fn display_title(&self) -> String {
        if self.subtitle.trim().is_empty() {
            self.title.clone()
        } else {
            format!("{}: {}", self.title, self.subtitle)
        }
    }
}

impl fmt::Display for Book {
    /// Write the book title to any formatter. Display is implemented so the
    /// type plays nicely with Ratatui widgets that consume strings implicitly.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

#[cfg(test)]
mod model_tests {
    use super::*;

    fn book(title: &str, subtitle: &str) -> Book {
        Book {
            title: title.to_string(),
            subtitle: subtitle.to_string(),
            isbn13: "9781234567890".to_string(),
            price: "$10.00".to_string(),
            image: String::new(),
            url: String::new(),
        }
    }

    #[test]
    fn display_title_joins_subtitle() {
        let b = book("Python Basics", "A Practical Introduction");
        assert_eq!(b.display_title(), "Python Basics: A Practical Introduction");
    }

    #[test]
    fn display_title_omits_blank_subtitle() {
        assert_eq!(book("Python Basics", "").display_title(), "Python Basics");
        assert_eq!(book("Python Basics", "   ").display_title(), "Python Basics");
    }

    #[test]
    fn deserializes_without_optional_fields() {
        let b: Book = serde_json::from_str(
            r#"{"title":"Go in Action","subtitle":"","isbn13":"9781617291784","price":"$31.19"}"#,
        )
        .unwrap();
        assert_eq!(b.title, "Go in Action");
        assert!(b.image.is_empty());
        assert!(b.url.is_empty());
    }
}
