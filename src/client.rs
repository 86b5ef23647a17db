use crate::catalog::CatalogClient;
use crate::parsing::{parse_details_response, parse_search_response};
use crate::types::{Candidate, MediaDetails, MediaType};
use crate::{Result, WatchLogError};
use async_trait::async_trait;
use http_client::{HttpClient, Request};
use http_types::{Method, StatusCode, Url};

/// Default TMDB v3 API root.
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Default root for poster images.
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Catalog client for The Movie Database (TMDB) v3 API.
///
/// The HTTP transport is injected, so any [`HttpClient`] implementation works: the
/// native curl client in production, a stub in tests.
///
/// # Examples
///
/// ```rust,no_run
/// use watchlog::{CatalogClient, TmdbClient};
///
/// # tokio_test::block_on(async {
/// let http_client = http_client::native::NativeClient::new();
/// let client = TmdbClient::new(Box::new(http_client), "my-api-key".to_string());
///
/// for candidate in client.resolve_candidates("The Wire").await? {
///     println!("{candidate}");
/// }
/// # Ok::<(), watchlog::WatchLogError>(())
/// # });
/// ```
pub struct TmdbClient {
    client: Box<dyn HttpClient>,
    api_key: String,
    base_url: String,
    image_base_url: String,
}

impl TmdbClient {
    /// Create a new [`TmdbClient`] against the public TMDB endpoints.
    pub fn new(client: Box<dyn HttpClient>, api_key: String) -> Self {
        Self::with_base_urls(
            client,
            api_key,
            DEFAULT_BASE_URL.to_string(),
            DEFAULT_IMAGE_BASE_URL.to_string(),
        )
    }

    /// Create a new [`TmdbClient`] with custom API and image roots.
    ///
    /// This is useful for testing or for pointing at a proxy.
    pub fn with_base_urls(
        client: Box<dyn HttpClient>,
        api_key: String,
        base_url: String,
        image_base_url: String,
    ) -> Self {
        Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            image_base_url,
        }
    }

    fn build_url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url> {
        let mut url = format!(
            "{}{}?api_key={}",
            self.base_url,
            path,
            urlencoding::encode(&self.api_key)
        );
        for (key, value) in query {
            url.push('&');
            url.push_str(key);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }

        Url::parse(&url).map_err(|e| WatchLogError::Http(format!("invalid URL for {path}: {e}")))
    }

    /// GET `path` and return the body, or `None` on 404.
    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Option<String>> {
        let url = self.build_url(path, query)?;
        log::debug!("GET {path} {query:?}");

        let mut request = Request::new(Method::Get, url);
        request.insert_header("Accept", "application/json");

        let mut response = self
            .client
            .send(request)
            .await
            .map_err(|e| WatchLogError::Http(e.to_string()))?;

        let status = response.status();
        log::debug!("GET {path} returned {status}");

        if status == StatusCode::NotFound {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(WatchLogError::Http(format!(
                "catalog request {path} failed with status {status}"
            )));
        }

        let body = response
            .body_string()
            .await
            .map_err(|e| WatchLogError::Parse(format!("unreadable response body: {e}")))?;
        Ok(Some(body))
    }
}

#[async_trait(?Send)]
impl CatalogClient for TmdbClient {
    async fn resolve_candidates(&self, query: &str) -> Result<Vec<Candidate>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let body = self
            .get("/search/multi", &[("query", query), ("page", "1")])
            .await?
            .ok_or_else(|| WatchLogError::Http("search endpoint not found".to_string()))?;

        let candidates = parse_search_response(&body, &self.image_base_url)?;
        log::debug!("Search for '{query}' gave {} candidates", candidates.len());
        Ok(candidates)
    }

    async fn fetch_details(&self, id: u64, media_type: MediaType) -> Result<Option<MediaDetails>> {
        let path = format!("/{}/{id}", media_type.as_str());
        match self.get(&path, &[]).await? {
            Some(body) => parse_details_response(&body, media_type).map(Some),
            None => {
                log::debug!("Catalog has no {media_type} with id {id}");
                Ok(None)
            }
        }
    }
}
