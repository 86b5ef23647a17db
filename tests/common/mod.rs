#![allow(dead_code)]
use async_trait::async_trait;
use http_client::{HttpClient, Request, Response};
use http_types::StatusCode;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use watchlog::{AppContext, MediaStore, TmdbClient};

pub const TEST_BASE_URL: &str = "http://catalog.test/3";
pub const TEST_IMAGE_BASE_URL: &str = "http://images.test/w500";
pub const TEST_API_KEY: &str = "test-key";

#[derive(Debug, Clone)]
struct StubRoute {
    path: String,
    status: StatusCode,
    body: String,
}

/// HTTP client that answers from canned responses keyed by URL path.
///
/// Clones share state, so a test can keep a handle to inspect the requests after
/// boxing a clone into a [`TmdbClient`]. Unknown paths fail like a network error.
#[derive(Debug, Clone, Default)]
pub struct StubHttpClient {
    routes: Arc<Mutex<Vec<StubRoute>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer requests for `path` (e.g. `/3/search/multi`) with `status` and `body`.
    pub fn route(self, path: &str, status: StatusCode, body: &str) -> Self {
        self.routes.lock().unwrap().push(StubRoute {
            path: path.to_string(),
            status,
            body: body.to_string(),
        });
        self
    }

    /// Full URLs of every request sent so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for StubHttpClient {
    async fn send(&self, req: Request) -> Result<Response, http_types::Error> {
        let url = req.url().clone();
        self.requests.lock().unwrap().push(url.to_string());

        let routes = self.routes.lock().unwrap();
        match routes.iter().find(|route| route.path == url.path()) {
            Some(route) => {
                let mut response = Response::new(route.status);
                response.set_body(route.body.clone());
                Ok(response)
            }
            None => Err(http_types::Error::from_str(
                StatusCode::BadGateway,
                format!("connection refused: {url}"),
            )),
        }
    }
}

pub fn tmdb_client(http: &StubHttpClient) -> TmdbClient {
    TmdbClient::with_base_urls(
        Box::new(http.clone()),
        TEST_API_KEY.to_string(),
        TEST_BASE_URL.to_string(),
        TEST_IMAGE_BASE_URL.to_string(),
    )
}

/// A store in a fresh temporary directory. Keep the `TempDir` alive for the test.
pub fn temp_store() -> (TempDir, MediaStore) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let store = MediaStore::open(dir.path().join("media_tracker.db")).expect("open store");
    (dir, store)
}

pub fn context_without_catalog() -> (TempDir, AppContext) {
    let (dir, store) = temp_store();
    (dir, AppContext::new(store, None))
}

pub fn context_with_catalog(http: &StubHttpClient) -> (TempDir, AppContext) {
    let (dir, store) = temp_store();
    (dir, AppContext::new(store, Some(Box::new(tmdb_client(http)))))
}

pub const INCEPTION_SEARCH: &str = r#"{
    "page": 1,
    "results": [
        {"id": 27205, "media_type": "movie", "title": "Inception",
         "release_date": "2010-07-15", "poster_path": "/inception.jpg"},
        {"id": 525, "media_type": "person", "name": "Christopher Nolan"},
        {"id": 64956, "media_type": "tv", "name": "Inception: The Cobol Job",
         "first_air_date": "2010-12-07", "poster_path": null}
    ],
    "total_pages": 1,
    "total_results": 3
}"#;

pub const INCEPTION_DETAILS: &str = r#"{
    "id": 27205,
    "title": "Inception",
    "runtime": 148,
    "genres": [{"id": 28, "name": "Action"}, {"id": 878, "name": "Science Fiction"}],
    "poster_path": "/inception.jpg"
}"#;

pub const EMPTY_SEARCH: &str = r#"{"page": 1, "results": [], "total_pages": 0, "total_results": 0}"#;
