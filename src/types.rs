//! Artwork records as the collection API returns them.
//!
//! Only the fields the gallery displays are modelled; everything else in the
//! API payload is ignored by serde. Optional fields accept both a missing key
//! and an explicit JSON `null`.

use serde::{Deserialize, Serialize};

/// One artwork from a listing or detail response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artwork {
    pub id: u64,
    /// Listing results occasionally carry a null title.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    /// IIIF image identifier. Search results never include it.
    #[serde(default)]
    pub image_id: Option<String>,
    /// Detail link (`/api/v1/artworks/{id}`).
    #[serde(default)]
    pub api_link: String,
    #[serde(default)]
    pub artist_title: Option<String>,
    /// HTML fragment in the upstream payload.
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date_display: Option<String>,
    #[serde(default)]
    pub classification_titles: Option<Vec<String>>,
    #[serde(default)]
    pub material_titles: Option<Vec<String>>,
}

impl Artwork {
    /// Image id, treating an empty string the same as an absent one.
    pub fn image_ref(&self) -> Option<&str> {
        self.image_id.as_deref().filter(|id| !id.is_empty())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Pagination block of a listing response. Other keys are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Pagination {
    #[serde(default = "one")]
    pub total_pages: u32,
}

fn one() -> u32 {
    1
}

/// Raw body of `/artworks` and `/artworks/search`.
#[derive(Debug, Deserialize)]
pub struct ListingResponse {
    pub data: Vec<Artwork>,
    pub pagination: Pagination,
}

/// Raw body of `/artworks/{id}`.
#[derive(Debug, Deserialize)]
pub struct DetailResponse {
    pub data: Artwork,
}

/// A decoded page of listing results.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingPage {
    pub items: Vec<Artwork>,
    pub total_pages: u32,
}

impl From<ListingResponse> for ListingPage {
    fn from(response: ListingResponse) -> Self {
        Self {
            items: response.data,
            total_pages: response.pagination.total_pages,
        }
    }
}
