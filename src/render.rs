//! HTML rendering of the gallery document.
//!
//! Produces one self-contained page: search bar, card grid, pager and the
//! detail modal. Class and id names are the contract the stylesheet and the
//! embedded modal script rely on:
//!
//! | Selector | Element |
//! |---|---|
//! | `#search`, `.btn-search` | search input and trigger |
//! | `.card-container` | card grid |
//! | `#card-<id>`, `#img-<id>`, `.btn-more[data-url]` | one card |
//! | `.pager`, `.info-page`, `.total-pages`, `.btn-previous`, `.btn-next` | pager |
//! | `.modal` (+ `.hidden`), `.modal-content`, `.btn-close` | detail overlay |
//!
//! Uses [maud](https://maud.lambda.xyz/); every interpolated value is escaped.

use crate::detail::DetailView;
use crate::gallery::{Card, Gallery};
use crate::pager::Pager;
use maud::{DOCTYPE, Markup, PreEscaped, html};

const CSS: &str = include_str!("../static/style.css");
const MODAL_JS: &str = include_str!("../static/modal.js");

/// Renders the base HTML document structure
fn base_document(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(CSS)) }
            }
            body {
                (content)
            }
        }
    }
}

/// Render the whole gallery as a standalone page.
pub fn render_page(gallery: &Gallery) -> Markup {
    let title = if gallery.query().is_empty() {
        "Art Gallery".to_string()
    } else {
        format!("Art Gallery · {}", gallery.query())
    };

    let content = html! {
        header.site-header {
            h1 { "Art Gallery" }
            (render_search(gallery.query()))
        }
        main {
            div.card-container {
                @for card in gallery.cards() {
                    (render_card(card))
                }
            }
            (render_pager(gallery.pager()))
        }
        (render_modal(gallery.modal().is_visible(), gallery.modal().content()))
        script { (PreEscaped(MODAL_JS)) }
    };

    base_document(&title, content)
}

fn render_search(query: &str) -> Markup {
    html! {
        form.search-bar {
            input #search type="search" name="q" placeholder="Search artworks" value=(query);
            button.btn-primary.btn-search type="submit" { "Search" }
        }
    }
}

/// One summary card. The image is the placeholder until resolved.
pub fn render_card(card: &Card) -> Markup {
    html! {
        div.card id={ "card-" (card.id) } {
            h3 { (card.title) }
            img.img-card src=(card.image_src) alt=(card.image_alt) id={ "img-" (card.id) } loading="lazy";
            button.btn-primary.btn-more data-url=(card.detail_link) { "More" }
        }
    }
}

pub fn render_pager(pager: &Pager) -> Markup {
    let display = pager.display();
    html! {
        nav.pager {
            button.btn-primary.btn-previous disabled[pager.current_page() <= 1] { "Previous" }
            span.info-page { (display.current) }
            button.btn-primary.btn-next disabled[pager.current_page() >= pager.total_pages()] { "Next" }
            span.total-pages { (display.total) }
        }
    }
}

pub fn render_modal(visible: bool, content: Option<&DetailView>) -> Markup {
    html! {
        div.modal.hidden[!visible] {
            div.modal-content {
                button.btn-close.btn-primary { "X" }
                @if let Some(view) = content {
                    (render_detail(view))
                }
            }
        }
    }
}

fn render_detail(view: &DetailView) -> Markup {
    html! {
        div.modal-content-wrapper {
            h3.title { (view.title) }
            h4.artist { "By " (view.artist) }
            @if let Some(url) = &view.image_url {
                img.img-card src=(url) alt=(view.title);
            }
            p.date { "Date: " (view.date) }
            p { "Description: " (view.description) }
            p { "Classifications:" }
            ul.classifications {
                @for item in &view.classifications {
                    li { (item) }
                }
            }
            p { "Materials:" }
            ul.materials {
                @for item in &view.materials {
                    li { (item) }
                }
            }
        }
    }
}
