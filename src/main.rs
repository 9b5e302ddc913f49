//! Binary entry point that glues the HTTP-backed catalog to the TUI.
//! Summarizing the bootstrapping pipeline here keeps the intent obvious when
//! revisiting the code: we start the one-shot catalog fetch, seed the empty
//! session state, and drive the Ratatui event loop until the user exits.
use bookstore_browser::{run_app, spawn_fetch, App, NEW_RELEASES_URL};

/// Kick off the catalog fetch and launch the Ratatui event loop.
///
/// Returning a `Result` bubbles up fatal terminal-setup problems to the
/// caller's terminal instead of crashing silently. The fetch itself cannot
/// fail here; its outcome is delivered to the running app, which shows either
/// the catalog or the terminal load-failure screen.
fn main() -> anyhow::Result<()> {
    let fetch = spawn_fetch(NEW_RELEASES_URL.to_string());

    let mut app = App::new(fetch);
    run_app(&mut app)
}
