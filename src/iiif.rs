//! IIIF image URL construction.
//!
//! The collection serves images through a IIIF Image API endpoint; given an
//! artwork's `image_id` the URL is a fixed template. Nothing here talks to
//! the network.

use crate::config::{IMAGE_ID_TOKEN, ImagesConfig};

#[derive(Debug, Clone)]
pub struct ImageService {
    template: String,
    placeholder: String,
}

impl ImageService {
    pub fn new(template: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            placeholder: placeholder.into(),
        }
    }

    pub fn from_config(config: &ImagesConfig) -> Self {
        Self::new(&config.url_template, &config.placeholder)
    }

    /// Fetchable image URL for `image_id`.
    pub fn url(&self, image_id: &str) -> String {
        self.template.replace(IMAGE_ID_TOKEN, image_id)
    }

    /// Image shown on a card before its real URL is known.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }
}

impl Default for ImageService {
    fn default() -> Self {
        Self::from_config(&ImagesConfig::default())
    }
}
