//! Remote artwork source.
//!
//! The [`ArtSource`] trait is the seam between the gallery and the network:
//! one call for a page of listing results, one for a single artwork's
//! details. The production implementation is [`HttpSource`], a blocking
//! `reqwest` client. Calls are made from dispatcher worker threads, so
//! implementations must be `Sync`.
//!
//! URL construction lives in [`Endpoints`] so the gallery can decide what to
//! ask for without owning a client.

use crate::config::ApiConfig;
use crate::types::{Artwork, DetailResponse, ListingPage, ListingResponse};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },
    #[error("Undecodable response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub trait ArtSource: Sync {
    /// Fetch one page of listing or search results from a fully built URL.
    fn fetch_listing(&self, url: &str) -> Result<ListingPage, SourceError>;

    /// Fetch a single artwork from its detail link.
    fn fetch_detail(&self, link: &str) -> Result<Artwork, SourceError>;
}

/// Listing, search and detail URLs under one API root.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base_url: String,
}

impl Endpoints {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Unfiltered listing: `<base>/artworks?page=N`.
    pub fn listing_url(&self, page: u32) -> String {
        format!("{}/artworks?page={}", self.base_url, page)
    }

    /// Full-text search: `<base>/artworks/search?q=Q&page=N`.
    pub fn search_url(&self, query: &str, page: u32) -> String {
        format!(
            "{}/artworks/search?q={}&page={}",
            self.base_url,
            urlencoding::encode(query),
            page
        )
    }

    /// Detail link for an artwork id, same shape as the API's `api_link`.
    pub fn detail_url(&self, id: u64) -> String {
        format!("{}/artworks/{}", self.base_url, id)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(&ApiConfig::default().base_url)
    }
}

/// [`ArtSource`] backed by the live collection API.
pub struct HttpSource {
    client: reqwest::blocking::Client,
}

impl HttpSource {
    pub fn new(config: &ApiConfig) -> Result<Self, SourceError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout_secs.map(Duration::from_secs))
            .build()?;
        Ok(Self { client })
    }

    fn get_text(&self, url: &str) -> Result<String, SourceError> {
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.text()?)
    }
}

impl ArtSource for HttpSource {
    fn fetch_listing(&self, url: &str) -> Result<ListingPage, SourceError> {
        let body = self.get_text(url)?;
        let response: ListingResponse = serde_json::from_str(&body)?;
        Ok(response.into())
    }

    fn fetch_detail(&self, link: &str) -> Result<Artwork, SourceError> {
        let body = self.get_text(link)?;
        let response: DetailResponse = serde_json::from_str(&body)?;
        Ok(response.data)
    }
}
