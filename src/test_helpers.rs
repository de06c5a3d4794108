//! Shared test utilities: artwork fixtures and canned listing pages.
//!
//! Fixture artworks get predictable values derived from their id so tests
//! can assert on them without spelling out every field:
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let art = artwork(5, None);
//! assert_eq!(art.title, "Artwork 5");
//! assert_eq!(art.api_link, "https://api.artic.edu/api/v1/artworks/5");
//! ```

use crate::source::SourceError;
use crate::types::{Artwork, ListingPage};
use std::ops::RangeInclusive;

/// A listing-style artwork: id, title, detail link, optional image id.
pub fn artwork(id: u64, image_id: Option<&str>) -> Artwork {
    Artwork {
        id,
        title: format!("Artwork {id}"),
        image_id: image_id.map(str::to_string),
        api_link: format!("https://api.artic.edu/api/v1/artworks/{id}"),
        artist_title: None,
        description: None,
        date_display: None,
        classification_titles: None,
        material_titles: None,
    }
}

/// A fully populated artwork as the detail endpoint returns it.
pub fn detailed_artwork(id: u64) -> Artwork {
    Artwork {
        artist_title: Some("Claude Monet".to_string()),
        description: Some("<p>Haystacks at dusk.</p>".to_string()),
        date_display: Some("1890–91".to_string()),
        classification_titles: Some(vec!["painting".to_string()]),
        material_titles: Some(vec!["oil on canvas".to_string()]),
        ..artwork(id, Some(&format!("img-{id}")))
    }
}

/// A listing page with one imaged artwork per id.
pub fn listing(ids: RangeInclusive<u64>, total_pages: u32) -> ListingPage {
    ListingPage {
        items: ids.map(|id| artwork(id, Some(&format!("img-{id}")))).collect(),
        total_pages,
    }
}

pub fn not_found(url: &str) -> SourceError {
    SourceError::Status {
        url: url.to_string(),
        status: 404,
    }
}
