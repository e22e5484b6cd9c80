//! Read-through client for the external movie-metadata provider.
//!
//! The provider is a black box reachable over HTTP: a paginated list
//! and a detail lookup by numeric id. No caching; each request is a
//! single upstream round-trip.

use serde::{Deserialize, Serialize};

use boxd_core::types::MovieId;

/// A movie as described by the metadata provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogMovie {
    pub id: MovieId,
    pub title: String,
    pub description: String,
    pub year: i32,
    pub poster: String,
}

/// HTTP client for the metadata provider. Cheap to clone.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: String,
    http: reqwest::Client,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    /// Look up one movie by its provider-assigned id.
    pub async fn movie(&self, id: MovieId) -> Result<CatalogMovie, reqwest::Error> {
        self.http
            .get(format!("{}/api/movie", self.base_url))
            .query(&[("id", id)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    /// Fetch one page of the movie catalog (pages are 1-based).
    pub async fn list(&self, page: u32) -> Result<Vec<CatalogMovie>, reqwest::Error> {
        self.http
            .get(format!("{}/api/list", self.base_url))
            .query(&[("page", page)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}
