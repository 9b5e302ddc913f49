//! Filtering over the loaded catalog. The catalog itself is an ordered,
//! read-only `Vec<Book>`; every filter application derives a fresh visible
//! list from it, so re-filtering is always computed from the full catalog and
//! never from a previous result.

use crate::models::Book;

/// The fixed category set offered by the browse view. `All` is the wildcard
/// that disables category filtering. Categories are matched against book
/// titles as case-insensitive substrings, which is how the storefront this
/// mirrors classifies its listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    All,
    Web,
    Python,
    JavaScript,
    Data,
    Security,
}

impl Category {
    /// Every selectable category in display order.
    pub const ALL: [Category; 6] = [
        Category::All,
        Category::Web,
        Category::Python,
        Category::JavaScript,
        Category::Data,
        Category::Security,
    ];

    /// Human-facing label, also the substring used for matching.
    pub fn label(self) -> &'static str {
        match self {
            Category::All => "All",
            Category::Web => "Web",
            Category::Python => "Python",
            Category::JavaScript => "JavaScript",
            Category::Data => "Data",
            Category::Security => "Security",
        }
    }
}

/// Current filter inputs. The category is a member of the fixed set by
/// construction; the search term is free text from the search bar.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub search_term: String,
    pub category: Category,
}

/// Derive the visible subset of the catalog for the given filter state.
///
/// Category (unless `All`) and search term each retain books whose title
/// contains them case-insensitively. The result is a fresh list preserving
/// catalog order; an empty result is valid and the catalog is never mutated.
pub fn visible_books(catalog: &[Book], filter: &FilterState) -> Vec<Book> {
    let mut visible: Vec<Book> = catalog.to_vec();

    if filter.category != Category::All {
        let needle = filter.category.label().to_lowercase();
        visible.retain(|book| book.title.to_lowercase().contains(&needle));
    }

    let term = filter.search_term.to_lowercase();
    if !term.trim().is_empty() {
        visible.retain(|book| book.title.to_lowercase().contains(&term));
    }

    visible
}

#[cfg(test)]
mod filter_tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn book(isbn13: &str, title: &str) -> Book {
        Book {
            title: title.to_string(),
            subtitle: String::new(),
            isbn13: isbn13.to_string(),
            price: "$10.00".to_string(),
            image: String::new(),
            url: String::new(),
        }
    }

    fn catalog() -> Vec<Book> {
        vec![
            book("1", "Python Basics"),
            book("2", "Securing Web Applications"),
            book("3", "JavaScript Everywhere"),
            book("4", "Practical Data Engineering"),
            book("5", "Advanced Python Security"),
        ]
    }

    fn filter(term: &str, category: Category) -> FilterState {
        FilterState {
            search_term: term.to_string(),
            category,
        }
    }

    #[test]
    fn identity_filter_returns_the_whole_catalog() {
        let c = catalog();
        assert_eq!(visible_books(&c, &FilterState::default()), c);
        assert_eq!(visible_books(&c, &filter("", Category::All)), c);
    }

    #[test]
    fn result_is_an_order_preserving_subsequence() {
        let c = catalog();
        let visible = visible_books(&c, &filter("", Category::Python));
        let ids: Vec<&str> = visible.iter().map(|b| b.isbn13.as_str()).collect();
        assert_eq!(ids, vec!["1", "5"]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let c = catalog();
        let f = filter("python", Category::All);
        let once = visible_books(&c, &f);
        let twice = visible_books(&once, &f);
        assert_eq!(once, twice);
    }

    #[test]
    fn term_matches_are_case_insensitive() {
        let c = catalog();
        let visible = visible_books(&c, &filter("PYTHON", Category::All));
        assert_eq!(visible.len(), 2);
        assert!(visible_books(&c, &filter("java", Category::All))
            .iter()
            .all(|b| b.title.contains("JavaScript")));
    }

    #[test]
    fn unmatched_term_yields_an_empty_visible_set() {
        let c = vec![book("1", "Python Basics")];
        assert_eq!(visible_books(&c, &filter("python", Category::All)).len(), 1);
        assert!(visible_books(&c, &filter("java", Category::All)).is_empty());
    }

    #[test]
    fn category_and_term_are_conjunctive() {
        let c = catalog();
        let visible = visible_books(&c, &filter("advanced", Category::Python));
        let ids: Vec<&str> = visible.iter().map(|b| b.isbn13.as_str()).collect();
        assert_eq!(ids, vec!["5"]);
    }

    #[test]
    fn blank_term_does_not_filter() {
        let c = catalog();
        assert_eq!(visible_books(&c, &filter("   ", Category::All)), c);
    }
}
