use crate::types::{Candidate, MediaDetails, MediaType};
use crate::Result;
use async_trait::async_trait;

/// Trait for catalog metadata lookups that can be mocked for testing.
///
/// Lookups follow a resolve-then-detail protocol: search by free-text title for
/// candidates, then fetch full details for the one the user picks.
///
/// # Mocking Support
///
/// When the `mock` feature is enabled, this crate provides `MockCatalogClient`
/// that implements this trait using the `mockall` library.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait(?Send)]
pub trait CatalogClient {
    /// Search the catalog for movies and TV shows matching `query`.
    ///
    /// Only the first page of results is considered. An empty list means no match.
    async fn resolve_candidates(&self, query: &str) -> Result<Vec<Candidate>>;

    /// Fetch details for a catalog id.
    ///
    /// Returns `Ok(None)` when the catalog does not know the id.
    async fn fetch_details(&self, id: u64, media_type: MediaType) -> Result<Option<MediaDetails>>;

    /// Resolve `query` and fetch details for the best-ranked candidate.
    async fn resolve_first(&self, query: &str) -> Result<Option<(Candidate, MediaDetails)>> {
        let candidates = self.resolve_candidates(query).await?;
        let Some(candidate) = candidates.into_iter().next() else {
            log::debug!("No catalog match for '{query}'");
            return Ok(None);
        };

        let details = self
            .fetch_details(candidate.id, candidate.media_type)
            .await?;
        Ok(details.map(|details| (candidate, details)))
    }
}
