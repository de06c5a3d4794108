//! Detail view content.
//!
//! [`DetailView`] is what the modal shows for one artwork, with every
//! missing field already replaced by its display default. Upstream
//! descriptions are HTML fragments; they are reduced to plain text here so
//! the renderer can escape them like any other value.

use crate::types::Artwork;
use scraper::Html;

pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const NO_DESCRIPTION: &str = "No description available";
pub const UNKNOWN: &str = "Unknown";

/// Everything the modal shows for one artwork, with defaults already applied.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub title: String,
    pub artist: String,
    pub description: String,
    /// Only present when the artwork has an image id.
    pub image_url: Option<String>,
    pub date: String,
    pub classifications: Vec<String>,
    pub materials: Vec<String>,
}

impl DetailView {
    pub fn from_artwork(artwork: &Artwork, image_url: Option<String>) -> Self {
        let description = artwork
            .description
            .as_deref()
            .map(|d| html_to_text(d).trim().to_string())
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| NO_DESCRIPTION.to_string());

        Self {
            title: artwork.title.clone(),
            artist: non_empty(artwork.artist_title.as_deref())
                .unwrap_or(UNKNOWN_ARTIST)
                .to_string(),
            description,
            image_url,
            date: non_empty(artwork.date_display.as_deref())
                .unwrap_or(UNKNOWN)
                .to_string(),
            classifications: list_or_unknown(artwork.classification_titles.as_deref()),
            materials: list_or_unknown(artwork.material_titles.as_deref()),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn list_or_unknown(items: Option<&[String]>) -> Vec<String> {
    match items {
        Some(items) if !items.is_empty() => items.to_vec(),
        _ => vec![UNKNOWN.to_string()],
    }
}

/// Text content of an HTML fragment: tags dropped, entities decoded.
pub fn html_to_text(html: &str) -> String {
    Html::parse_fragment(html)
        .root_element()
        .text()
        .collect::<String>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::artwork;

    #[test]
    fn html_to_text_removes_markup() {
        assert_eq!(html_to_text("<p>Hello <b>there</b></p>"), "Hello there");
    }

    #[test]
    fn html_to_text_decodes_entities() {
        assert_eq!(
            html_to_text("<p>Monet&rsquo;s haystacks &amp; fields</p>"),
            "Monet\u{2019}s haystacks & fields"
        );
    }

    #[test]
    fn present_fields_are_kept() {
        let mut art = artwork(3, Some("img3"));
        art.artist_title = Some("Georges Seurat".to_string());
        art.description = Some("<p>A <em>pointillist</em> scene.</p>".to_string());
        art.date_display = Some("1884–86".to_string());
        art.classification_titles = Some(vec!["painting".to_string()]);
        art.material_titles = Some(vec!["oil paint".to_string(), "canvas".to_string()]);

        let view = DetailView::from_artwork(&art, Some("u".to_string()));
        assert_eq!(view.artist, "Georges Seurat");
        assert_eq!(view.description, "A pointillist scene.");
        assert_eq!(view.date, "1884–86");
        assert_eq!(view.materials.len(), 2);
        assert_eq!(view.image_url.as_deref(), Some("u"));
    }

    #[test]
    fn blank_fields_fall_back_to_defaults() {
        let mut art = artwork(8, None);
        art.artist_title = Some("   ".to_string());
        art.description = Some("<p> </p>".to_string());
        art.date_display = None;
        art.material_titles = Some(vec![]);

        let view = DetailView::from_artwork(&art, None);
        assert_eq!(view.artist, UNKNOWN_ARTIST);
        assert_eq!(view.description, NO_DESCRIPTION);
        assert_eq!(view.date, UNKNOWN);
        assert_eq!(view.materials, vec![UNKNOWN.to_string()]);
    }
}
