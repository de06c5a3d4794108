//! CLI output formatting.
//!
//! Every view has a `format_*` function returning lines (pure, testable) and,
//! where the CLI needs it, a `print_*` wrapper that writes them to stdout.
//!
//! ## Listing
//!
//! ```text
//! Search "monet" · page 1 of 7
//! 001 Water Lilies [16568]
//!     Image: https://www.artic.edu/iiif/2/3c27b499.../full/843,/0/default.jpg
//! 002 Stacks of Wheat [64818]
//!     Image: (placeholder)
//! ```
//!
//! ## Detail
//!
//! ```text
//! Water Lilies
//!     By Claude Monet
//!     Date: 1906
//!     Classifications: painting, oil on canvas
//!     Materials: oil paint, canvas
//!     Description: ...
//! ```

use crate::detail::DetailView;
use crate::gallery::{Gallery, Mode};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max).collect();
        format!("{head}...")
    }
}

/// One-line summary of where the gallery is.
pub fn format_status(gallery: &Gallery) -> Vec<String> {
    let pager = gallery.pager();
    let mode = match gallery.mode() {
        Mode::Browsing => "Browsing".to_string(),
        Mode::Searching => format!("Search \"{}\"", gallery.query()),
    };
    let mut line = format!(
        "{} · page {} of {} · {} cards",
        mode,
        pager.current_page(),
        pager.total_pages(),
        gallery.cards().len()
    );
    if gallery.modal().is_visible() {
        let title = gallery
            .modal()
            .content()
            .map(|v| v.title.as_str())
            .unwrap_or("loading");
        line.push_str(&format!(" · detail open: {title}"));
    }
    vec![line]
}

/// Status line followed by every card with its image state.
pub fn format_listing(gallery: &Gallery) -> Vec<String> {
    let mut lines = format_status(gallery);
    for (i, card) in gallery.cards().iter().enumerate() {
        lines.push(format!("{} {} [{}]", format_index(i + 1), card.title, card.id));
        if card.resolved {
            lines.push(format!("    Image: {}", card.image_src));
        } else {
            lines.push("    Image: (placeholder)".to_string());
        }
    }
    lines
}

pub fn format_detail(view: &DetailView) -> Vec<String> {
    let mut lines = vec![
        view.title.clone(),
        format!("    By {}", view.artist),
        format!("    Date: {}", view.date),
        format!("    Classifications: {}", view.classifications.join(", ")),
        format!("    Materials: {}", view.materials.join(", ")),
        format!("    Description: {}", truncate(&view.description, 200)),
    ];
    if let Some(url) = &view.image_url {
        lines.push(format!("    Image: {url}"));
    }
    lines
}

pub fn print_listing(gallery: &Gallery) {
    for line in format_listing(gallery) {
        println!("{}", line);
    }
}

pub fn print_detail(view: &DetailView) {
    for line in format_detail(view) {
        println!("{}", line);
    }
}
