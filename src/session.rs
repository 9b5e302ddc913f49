//! Session-scoped selection state: the favorites set and the shopping cart.
//! One session owns exactly one `Session` instance, created empty at startup
//! and dropped at exit; nothing here persists anywhere. The catalog itself is
//! immutable for the whole session, so cart entries can safely hold owned
//! copies of their books.

use std::collections::HashSet;

use crate::models::Book;
use crate::pricing;

/// Mutable per-session state, independent of the catalog and of any
/// rendering. All handlers receive it by reference from the application
/// state that owns it.
#[derive(Debug, Default)]
pub struct Session {
    /// Favorite books keyed by isbn13. Membership is only ever toggled for
    /// books drawn from the loaded catalog.
    favorites: HashSet<String>,
    /// Cart entries in insertion order. Duplicates are permitted; the same
    /// book added twice is simply two entries.
    cart: Vec<Book>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `isbn13` in the favorites set. Toggling twice
    /// restores the original state. Returns whether the book is a favorite
    /// afterwards so callers can phrase their feedback.
    pub fn toggle_favorite(&mut self, isbn13: &str) -> bool {
        if self.favorites.remove(isbn13) {
            false
        } else {
            self.favorites.insert(isbn13.to_string());
            true
        }
    }

    pub fn is_favorite(&self, isbn13: &str) -> bool {
        self.favorites.contains(isbn13)
    }

    pub fn favorite_count(&self) -> usize {
        self.favorites.len()
    }

    /// Append a book to the cart unconditionally. No dedup and no quantity
    /// field; repeats are represented as repeated entries.
    pub fn add_to_cart(&mut self, book: Book) {
        self.cart.push(book);
    }

    /// Cart entries in insertion order.
    pub fn cart(&self) -> &[Book] {
        &self.cart
    }

    /// Empty the cart wholesale. Invoked when the mock purchase completes.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    /// Sum the cart's source-currency amounts, convert at `rate` and round to
    /// two decimals. An entry whose price fails to parse contributes zero;
    /// the unparsable price is still visible on its card, so the masking is
    /// confined to this sum.
    pub fn cart_total(&self, rate: f64) -> f64 {
        let total: f64 = self
            .cart
            .iter()
            .map(|book| pricing::parse_usd(&book.price).unwrap_or(0.0) * rate)
            .sum();
        pricing::round_to_cents(total)
    }
}

#[cfg(test)]
mod session_tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn book(isbn13: &str, price: &str) -> Book {
        Book {
            title: format!("Book {isbn13}"),
            subtitle: String::new(),
            isbn13: isbn13.to_string(),
            price: price.to_string(),
            image: String::new(),
            url: String::new(),
        }
    }

    #[test]
    fn double_toggle_restores_the_favorites_set() {
        let mut session = Session::new();
        assert!(session.toggle_favorite("111"));
        assert!(session.is_favorite("111"));
        assert!(!session.toggle_favorite("111"));
        assert!(!session.is_favorite("111"));
        assert_eq!(session.favorite_count(), 0);
    }

    #[test]
    fn cart_permits_duplicates() {
        let mut session = Session::new();
        session.add_to_cart(book("111", "$10.00"));
        session.add_to_cart(book("111", "$10.00"));
        assert_eq!(session.cart().len(), 2);
    }

    #[test]
    fn clear_cart_empties_regardless_of_contents() {
        let mut session = Session::new();
        assert!(session.cart().is_empty());
        session.clear_cart();
        assert!(session.cart().is_empty());

        session.add_to_cart(book("111", "$10.00"));
        session.add_to_cart(book("222", "$12.50"));
        session.clear_cart();
        assert!(session.cart().is_empty());
    }

    #[test]
    fn cart_total_converts_and_rounds() {
        let mut session = Session::new();
        session.add_to_cart(book("111", "$10.00"));
        assert_eq!(session.cart_total(83.0), 830.0);

        session.add_to_cart(book("222", "$28.99"));
        // 10.00 + 28.99 = 38.99 dollars, times 83 = 3236.17 rupees.
        assert_eq!(session.cart_total(83.0), 3236.17);
    }

    #[test]
    fn malformed_prices_contribute_zero_to_the_total() {
        let mut session = Session::new();
        session.add_to_cart(book("111", "bad"));
        assert_eq!(session.cart_total(83.0), 0.0);

        session.add_to_cart(book("222", "$10.00"));
        assert_eq!(session.cart_total(83.0), 830.0);
    }

    #[test]
    fn clearing_does_not_touch_favorites() {
        let mut session = Session::new();
        session.toggle_favorite("111");
        session.add_to_cart(book("111", "$10.00"));
        session.clear_cart();
        assert!(session.is_favorite("111"));
    }
}
