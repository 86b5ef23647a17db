use crate::catalog::CatalogClient;
use crate::client::TmdbClient;
use crate::config::AppConfig;
use crate::store::MediaStore;
use crate::Result;
use http_client::HttpClient;

/// Everything a session needs: the store handle and, when configured, a catalog client.
///
/// Built once at startup and passed by reference to whatever runs the session.
pub struct AppContext {
    pub store: MediaStore,
    pub catalog: Option<Box<dyn CatalogClient>>,
}

impl AppContext {
    pub fn new(store: MediaStore, catalog: Option<Box<dyn CatalogClient>>) -> Self {
        Self { store, catalog }
    }

    /// Open the store and, if an API key is configured, a TMDB client over `http_client`.
    pub fn from_config(config: &AppConfig, http_client: Box<dyn HttpClient>) -> Result<Self> {
        let store = MediaStore::open(&config.database_path)?;

        let catalog: Option<Box<dyn CatalogClient>> = match &config.tmdb_api_key {
            Some(api_key) => Some(Box::new(TmdbClient::with_base_urls(
                http_client,
                api_key.clone(),
                config.tmdb_base_url.clone(),
                config.image_base_url.clone(),
            ))),
            None => {
                log::warn!("No TMDB API key configured, metadata lookups are disabled");
                None
            }
        };

        Ok(Self::new(store, catalog))
    }

    pub fn catalog(&self) -> Option<&dyn CatalogClient> {
        self.catalog.as_deref()
    }
}
