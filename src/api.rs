//! Catalog loader: the single outbound HTTP call of a session. The listing
//! service is queried exactly once at startup; success publishes the full
//! book list and any failure is terminal, with no retry. The request runs on
//! a worker thread so the UI can show a loading state while it is in flight,
//! and the worker reports exactly once over a channel the event loop polls
//! on its regular tick.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::models::Book;

/// Endpoint serving the "new releases" listing. No authentication and no
/// pagination; the response is one complete page.
pub const NEW_RELEASES_URL: &str = "https://api.itbook.store/1.0/new";

/// Cap on how long the one catalog request may take before it counts as a
/// fetch failure.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything that can go wrong with the catalog fetch. All variants surface
/// to the user as the terminal load-failure screen.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("catalog service answered HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("catalog service reported error code {0}")]
    Service(String),
    #[error("could not decode catalog payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("catalog fetch ended without a result")]
    WorkerGone,
}

/// Envelope returned by the listing endpoint. The service wraps its payloads
/// in `{ "error": "0", "total": "...", "books": [...] }` and signals its own
/// failures through a non-zero `error` string rather than an HTTP status.
#[derive(Debug, Deserialize)]
pub struct NewReleases {
    /// Service-level error code; `"0"` means success.
    pub error: String,
    /// Total result count as the service encodes it (a string). Unused
    /// beyond decoding but kept so the envelope mirrors the wire format.
    #[serde(default)]
    pub total: String,
    #[serde(default)]
    pub books: Vec<Book>,
}

impl NewReleases {
    /// Unwrap the envelope, rejecting payloads whose service-level error code
    /// is set even though the HTTP exchange succeeded.
    pub fn into_books(self) -> Result<Vec<Book>, ApiError> {
        if self.error != "0" {
            return Err(ApiError::Service(self.error));
        }
        Ok(self.books)
    }
}

/// Fetch and decode the catalog synchronously. Used by the worker thread;
/// callers wanting the non-blocking flow go through [`spawn_fetch`].
pub fn fetch_new_releases(url: &str) -> Result<Vec<Book>, ApiError> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!("bookstore-browser/", env!("CARGO_PKG_VERSION")))
        .timeout(REQUEST_TIMEOUT)
        .build()?;

    let response = client.get(url).send()?;
    if !response.status().is_success() {
        return Err(ApiError::Status(response.status()));
    }

    let body = response.text()?;
    let envelope: NewReleases = serde_json::from_str(&body)?;
    envelope.into_books()
}

/// Outcome of one poll of the in-flight fetch.
pub enum FetchPoll {
    /// The worker has not reported yet; keep showing the loading state.
    Pending,
    /// The one-and-only report. The fetch handle is spent after this.
    Ready(Result<Vec<Book>, ApiError>),
}

/// Handle to the in-flight catalog fetch. The worker sends exactly one
/// message and exits; there is no cancellation, so an abandoned fetch simply
/// finishes into a dropped channel with no observable effect.
pub struct CatalogFetch {
    receiver: Receiver<Result<Vec<Book>, ApiError>>,
}

impl CatalogFetch {
    /// Non-blocking check for the worker's report. A worker that died without
    /// sending anything is folded into a fetch failure.
    pub fn poll(&self) -> FetchPoll {
        match self.receiver.try_recv() {
            Ok(result) => FetchPoll::Ready(result),
            Err(TryRecvError::Empty) => FetchPoll::Pending,
            Err(TryRecvError::Disconnected) => FetchPoll::Ready(Err(ApiError::WorkerGone)),
        }
    }
}

/// Start the session's catalog fetch on a worker thread and hand back the
/// handle the event loop polls.
pub fn spawn_fetch(url: String) -> CatalogFetch {
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        // The session may already be gone when the request finishes; in that
        // case there is nobody left to notify.
        let _ = sender.send(fetch_new_releases(&url));
    });
    CatalogFetch { receiver }
}

#[cfg(test)]
mod api_tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const SAMPLE: &str = r#"{
        "error": "0",
        "total": "2",
        "books": [
            {
                "title": "Python Basics",
                "subtitle": "A Practical Introduction",
                "isbn13": "9781775093329",
                "price": "$10.00",
                "image": "https://itbook.store/img/books/9781775093329.png",
                "url": "https://itbook.store/books/9781775093329"
            },
            {
                "title": "Securing DevOps",
                "subtitle": "",
                "isbn13": "9781617294136",
                "price": "$26.98",
                "image": "https://itbook.store/img/books/9781617294136.png",
                "url": "https://itbook.store/books/9781617294136"
            }
        ]
    }"#;

    #[test]
    fn decodes_the_listing_envelope() {
        let envelope: NewReleases = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(envelope.error, "0");
        assert_eq!(envelope.total, "2");
        let books = envelope.into_books().unwrap();
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].isbn13, "9781775093329");
        assert_eq!(books[1].price, "$26.98");
    }

    #[test]
    fn nonzero_error_code_is_a_service_failure() {
        let envelope: NewReleases =
            serde_json::from_str(r#"{"error": "404", "total": "0", "books": []}"#).unwrap();
        match envelope.into_books() {
            Err(ApiError::Service(code)) => assert_eq!(code, "404"),
            other => panic!("expected a service error, got {other:?}"),
        }
    }

    #[test]
    fn poll_reports_pending_then_the_result() {
        let (sender, receiver) = mpsc::channel();
        let fetch = CatalogFetch { receiver };
        assert!(matches!(fetch.poll(), FetchPoll::Pending));

        sender.send(Ok(Vec::new())).unwrap();
        match fetch.poll() {
            FetchPoll::Ready(Ok(books)) => assert!(books.is_empty()),
            _ => panic!("expected the delivered result"),
        }
    }

    #[test]
    fn dead_worker_counts_as_failure() {
        let (sender, receiver) = mpsc::channel::<Result<Vec<Book>, ApiError>>();
        drop(sender);
        let fetch = CatalogFetch { receiver };
        assert!(matches!(
            fetch.poll(),
            FetchPoll::Ready(Err(ApiError::WorkerGone))
        ));
    }
}
