//! Core library surface for the bookstore browser TUI application.
//!
//! The public modules exposed here provide an intentionally small API so the
//! `bin` target as well as the integration tests can reuse the same pieces.
//! Keeping the glue logic documented makes it easy to recall why each
//! re-export exists when revisiting the project.
pub mod api;
pub mod catalog;
pub mod chat;
pub mod models;
pub mod pricing;
pub mod session;
pub mod ui;

/// Convenience re-exports for the catalog boundary. `main.rs` uses these to
/// kick off the one-shot fetch before entering the event loop.
pub use api::{spawn_fetch, CatalogFetch, NEW_RELEASES_URL};

/// The filter engine pieces other layers manipulate.
pub use catalog::{visible_books, Category, FilterState};

/// The primary domain types.
pub use models::Book;
pub use session::Session;

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
