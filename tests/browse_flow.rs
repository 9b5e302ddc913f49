//! End-to-end exercise of the library surface on a canned listing payload:
//! decode the envelope, filter the catalog, drive a session through
//! favorites, cart, and the mock checkout. No network involved.

use pretty_assertions::assert_eq;

use bookstore_browser::api::NewReleases;
use bookstore_browser::chat::ChatLog;
use bookstore_browser::pricing::{PriceTag, INR_RATE};
use bookstore_browser::{visible_books, Category, FilterState, Session};

const LISTING: &str = r#"{
    "error": "0",
    "total": "4",
    "books": [
        {
            "title": "Python Basics",
            "subtitle": "A Practical Introduction to Python 3",
            "isbn13": "9781775093329",
            "price": "$10.00",
            "image": "https://itbook.store/img/books/9781775093329.png",
            "url": "https://itbook.store/books/9781775093329"
        },
        {
            "title": "Practical Web Scraping for Data Science",
            "subtitle": "Best Practices and Examples with Python",
            "isbn13": "9781484235812",
            "price": "$41.73",
            "image": "https://itbook.store/img/books/9781484235812.png",
            "url": "https://itbook.store/books/9781484235812"
        },
        {
            "title": "Securing DevOps",
            "subtitle": "Security in the Cloud",
            "isbn13": "9781617294136",
            "price": "$26.98",
            "image": "https://itbook.store/img/books/9781617294136.png",
            "url": "https://itbook.store/books/9781617294136"
        },
        {
            "title": "Broken Price Sample",
            "subtitle": "",
            "isbn13": "9780000000000",
            "price": "bad",
            "image": "",
            "url": ""
        }
    ]
}"#;

fn load_catalog() -> Vec<bookstore_browser::Book> {
    let envelope: NewReleases = serde_json::from_str(LISTING).unwrap();
    envelope.into_books().unwrap()
}

#[test]
fn catalog_decodes_in_listing_order() {
    let catalog = load_catalog();
    let titles: Vec<&str> = catalog.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Python Basics",
            "Practical Web Scraping for Data Science",
            "Securing DevOps",
            "Broken Price Sample",
        ]
    );
}

#[test]
fn category_then_term_narrows_the_visible_set() {
    let catalog = load_catalog();

    let web = visible_books(
        &catalog,
        &FilterState {
            search_term: String::new(),
            category: Category::Web,
        },
    );
    assert_eq!(web.len(), 1);
    assert_eq!(web[0].isbn13, "9781484235812");

    let python = visible_books(
        &catalog,
        &FilterState {
            search_term: "basics".to_string(),
            category: Category::Python,
        },
    );
    assert_eq!(python.len(), 1);
    assert_eq!(python[0].title, "Python Basics");

    let nothing = visible_books(
        &catalog,
        &FilterState {
            search_term: "java".to_string(),
            category: Category::All,
        },
    );
    assert!(nothing.is_empty());
}

#[test]
fn session_flow_from_browse_to_mock_checkout() {
    let catalog = load_catalog();
    let mut session = Session::new();

    // Favorite the first visible Python book, then change our mind.
    let visible = visible_books(
        &catalog,
        &FilterState {
            search_term: "python".to_string(),
            category: Category::All,
        },
    );
    let pick = &visible[0];
    assert!(session.toggle_favorite(&pick.isbn13));
    assert!(session.is_favorite(&pick.isbn13));
    assert!(!session.toggle_favorite(&pick.isbn13));
    assert!(!session.is_favorite(&pick.isbn13));

    // Buy the same book twice plus one with a broken price string.
    session.add_to_cart(catalog[0].clone());
    session.add_to_cart(catalog[0].clone());
    session.add_to_cart(catalog[3].clone());
    assert_eq!(session.cart().len(), 3);

    // Two times $10.00 at the rupee rate; the broken entry contributes zero.
    assert_eq!(session.cart_total(INR_RATE), 1660.0);

    // Completing the mock purchase clears local state only.
    session.clear_cart();
    assert!(session.cart().is_empty());
    assert_eq!(session.cart_total(INR_RATE), 0.0);
}

#[test]
fn price_tags_render_all_three_currencies() {
    let catalog = load_catalog();
    let tag = PriceTag::from_source(&catalog[2].price);
    assert_eq!(tag.usd, "$26.98");
    assert_eq!(tag.inr, "₹2239");
    assert_eq!(tag.eur, "€25.09");

    let broken = PriceTag::from_source(&catalog[3].price);
    assert_eq!(broken.usd, "$0.00");
}

#[test]
fn chat_echo_is_canned_and_session_scoped() {
    let mut chat = ChatLog::new();
    chat.send("Do you stock Rust books?");
    assert_eq!(chat.messages().len(), 2);
    assert_eq!(
        chat.messages()[1].text,
        "You said: \"Do you stock Rust books?\""
    );
}
