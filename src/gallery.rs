//! Gallery controller.
//!
//! [`Gallery`] owns every piece of view state: the search query, the card
//! list, the [`Pager`] and the [`Modal`]. It never performs IO itself. User
//! actions queue [`Request`]s in an outbox; whoever drives the gallery (the
//! [`crate::runtime::Dispatcher`] in practice, tests directly) executes them
//! and feeds each outcome back through [`Gallery::handle`] as a [`Response`].
//!
//! ## Modes
//!
//! ```text
//! Browsing (query empty)  ⇄  Searching (query set)
//!          \                     /
//!           →  Detail view (modal open)  →  back
//! ```
//!
//! ## Response ordering
//!
//! Requests are fire-and-continue: nothing waits for the previous listing
//! before issuing the next one, so responses may be applied out of order and
//! the last one to land wins. Setting `stale_guard` tags listing and modal
//! requests with a generation and drops any response a newer request has
//! superseded.

use crate::config::ClientConfig;
use crate::detail::DetailView;
use crate::iiif::ImageService;
use crate::modal::{Modal, ModalTarget};
use crate::pager::Pager;
use crate::source::{Endpoints, SourceError};
use crate::types::{Artwork, ListingPage};
use log::{debug, error, info};
use std::collections::VecDeque;

pub const PLACEHOLDER_ALT: &str = "Image placeholder";

/// Which listing endpoint the gallery is paging through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Browsing,
    Searching,
}

/// Summary card for one artwork in the current listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub id: u64,
    pub title: String,
    /// Target of the card's "More" action.
    pub detail_link: String,
    pub image_src: String,
    pub image_alt: String,
    pub resolved: bool,
}

/// Why a detail request was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailPurpose {
    /// Find the image id for a card whose listing entry lacked one.
    CardImage(u64),
    /// Fill the modal after a "More" click.
    Modal { generation: u64 },
}

/// Work the gallery wants done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Listing { generation: u64, url: String },
    Detail { link: String, purpose: DetailPurpose },
}

/// Outcome of a [`Request`], fed back through [`Gallery::handle`].
#[derive(Debug)]
pub enum Response {
    Listing {
        generation: u64,
        result: Result<ListingPage, SourceError>,
    },
    Detail {
        link: String,
        purpose: DetailPurpose,
        result: Result<Artwork, SourceError>,
    },
}

impl Response {
    pub fn is_failure(&self) -> bool {
        match self {
            Response::Listing { result, .. } => result.is_err(),
            Response::Detail { result, .. } => result.is_err(),
        }
    }
}

pub struct Gallery {
    endpoints: Endpoints,
    images: ImageService,
    stale_guard: bool,
    query: String,
    pager: Pager,
    modal: Modal,
    cards: Vec<Card>,
    outbox: VecDeque<Request>,
    listing_generation: u64,
    detail_generation: u64,
}

impl Gallery {
    pub fn new(endpoints: Endpoints, images: ImageService) -> Self {
        Self {
            endpoints,
            images,
            stale_guard: false,
            query: String::new(),
            pager: Pager::default(),
            modal: Modal::new(),
            cards: Vec::new(),
            outbox: VecDeque::new(),
            listing_generation: 0,
            detail_generation: 0,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(
            Endpoints::new(&config.api.base_url),
            ImageService::from_config(&config.images),
        )
        .with_stale_guard(config.runtime.stale_guard)
    }

    pub fn with_stale_guard(mut self, enabled: bool) -> Self {
        self.stale_guard = enabled;
        self
    }

    /// Open on `page` instead of 1. The total stays provisional until the
    /// first listing reports it.
    pub fn with_initial_page(mut self, page: u32) -> Self {
        let page = page.max(1);
        self.pager = Pager::new(page, page);
        self
    }

    /// Open in search mode without going through [`Gallery::search`].
    pub fn with_query(mut self, text: &str) -> Self {
        self.query = text.trim().to_string();
        self
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, id: u64) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn mode(&self) -> Mode {
        if self.query.is_empty() {
            Mode::Browsing
        } else {
            Mode::Searching
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn placeholder(&self) -> &str {
        self.images.placeholder()
    }

    /// Remove and return every queued request, oldest first.
    pub fn take_requests(&mut self) -> Vec<Request> {
        self.outbox.drain(..).collect()
    }

    pub fn has_pending_requests(&self) -> bool {
        !self.outbox.is_empty()
    }

    // ------------------------------------------------------------------
    // User actions
    // ------------------------------------------------------------------

    /// Initial load: the unfiltered first page.
    pub fn start(&mut self) {
        self.load_listing(self.pager.current_page());
    }

    /// Submit the search box. Empty (after trimming) returns to browsing.
    pub fn search(&mut self, text: &str) {
        self.query = text.trim().to_string();
        let page = self.pager.reset_current_page();
        self.change_page(page);
    }

    pub fn next_page(&mut self) {
        if let Some(page) = self.pager.advance() {
            self.change_page(page);
        }
    }

    pub fn previous_page(&mut self) {
        if let Some(page) = self.pager.retreat() {
            self.change_page(page);
        }
    }

    /// Reload the current mode's listing at `page`. Pager page-change target.
    pub fn change_page(&mut self, page: u32) {
        self.load_listing(page);
    }

    /// Queue the listing request for `page` in the current mode.
    pub fn load_listing(&mut self, page: u32) {
        let url = match self.mode() {
            Mode::Searching => self.endpoints.search_url(&self.query, page),
            Mode::Browsing => self.endpoints.listing_url(page),
        };
        self.listing_generation += 1;
        debug!("Queue listing #{}: {}", self.listing_generation, url);
        self.outbox.push_back(Request::Listing {
            generation: self.listing_generation,
            url,
        });
    }

    /// "More" action on a card: open the modal and fetch its details.
    pub fn show_details(&mut self, detail_link: &str) {
        self.modal.show();
        self.detail_generation += 1;
        self.outbox.push_back(Request::Detail {
            link: detail_link.to_string(),
            purpose: DetailPurpose::Modal {
                generation: self.detail_generation,
            },
        });
    }

    /// "More" action addressed by card id. Returns false if no such card.
    pub fn show_card_details(&mut self, card_id: u64) -> bool {
        match self.card(card_id).map(|c| c.detail_link.clone()) {
            Some(link) => {
                self.show_details(&link);
                true
            }
            None => false,
        }
    }

    /// Modal close control.
    pub fn close_details(&mut self) {
        self.modal.click(ModalTarget::CloseButton);
    }

    pub fn click_modal(&mut self, target: ModalTarget) {
        self.modal.click(target);
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    /// Append a placeholder card for `artwork` and start resolving its image.
    pub fn render_card(&mut self, artwork: &Artwork) {
        let detail_link = if artwork.api_link.is_empty() {
            self.endpoints.detail_url(artwork.id)
        } else {
            artwork.api_link.clone()
        };

        self.cards.push(Card {
            id: artwork.id,
            title: artwork.title.clone(),
            detail_link: detail_link.clone(),
            image_src: self.images.placeholder().to_string(),
            image_alt: PLACEHOLDER_ALT.to_string(),
            resolved: false,
        });

        match artwork.image_ref() {
            Some(image_id) => self.resolve_image(artwork.id, image_id),
            None => self.outbox.push_back(Request::Detail {
                link: detail_link,
                purpose: DetailPurpose::CardImage(artwork.id),
            }),
        }
    }

    /// Swap a card's placeholder for the real image. No-op if the card is gone.
    pub fn resolve_image(&mut self, card_id: u64, image_ref: &str) {
        let url = self.images.url(image_ref);
        if let Some(card) = self.cards.iter_mut().find(|c| c.id == card_id) {
            card.image_src = url;
            card.image_alt = format!("Artwork ID: {card_id}");
            card.resolved = true;
        }
    }

    // ------------------------------------------------------------------
    // Responses
    // ------------------------------------------------------------------

    /// Apply the outcome of a request. Failures are logged and swallowed.
    pub fn handle(&mut self, response: Response) {
        match response {
            Response::Listing { generation, result } => {
                self.apply_listing(generation, result)
            }
            Response::Detail {
                link,
                purpose,
                result,
            } => self.apply_detail(&link, purpose, result),
        }
    }

    fn apply_listing(&mut self, generation: u64, result: Result<ListingPage, SourceError>) {
        let listing = match result {
            Ok(listing) => listing,
            Err(e) => {
                error!("Error fetching page: {e}");
                return;
            }
        };
        if self.stale_guard && generation < self.listing_generation {
            debug!(
                "Dropping stale listing #{generation} (latest #{})",
                self.listing_generation
            );
            return;
        }

        info!(
            "Listing #{generation}: {} artworks, {} pages",
            listing.items.len(),
            listing.total_pages
        );
        self.pager.set_total_pages(listing.total_pages);
        self.cards.clear();
        for artwork in &listing.items {
            self.render_card(artwork);
        }
    }

    fn apply_detail(
        &mut self,
        link: &str,
        purpose: DetailPurpose,
        result: Result<Artwork, SourceError>,
    ) {
        let artwork = match result {
            Ok(artwork) => artwork,
            Err(e) => {
                error!("Error fetching artwork details from {link}: {e}");
                return;
            }
        };

        match purpose {
            DetailPurpose::CardImage(card_id) => match artwork.image_ref() {
                Some(image_id) => self.resolve_image(card_id, image_id),
                None => debug!("Artwork {card_id} has no image, keeping placeholder"),
            },
            DetailPurpose::Modal { generation } => {
                if self.stale_guard && generation < self.detail_generation {
                    debug!("Dropping stale detail #{generation} for {link}");
                    return;
                }
                let image_url = artwork.image_ref().map(|id| self.images.url(id));
                self.modal
                    .set_content(DetailView::from_artwork(&artwork, image_url));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    fn gallery() -> Gallery {
        Gallery::new(Endpoints::default(), ImageService::default())
    }

    fn listing_urls(requests: &[Request]) -> Vec<&str> {
        requests
            .iter()
            .filter_map(|r| match r {
                Request::Listing { url, .. } => Some(url.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Answer the most recent listing request with `page`.
    fn answer_listing(gallery: &mut Gallery, requests: &[Request], page: ListingPage) {
        let generation = requests
            .iter()
            .rev()
            .find_map(|r| match r {
                Request::Listing { generation, .. } => Some(*generation),
                _ => None,
            })
            .expect("a listing request");
        gallery.handle(Response::Listing {
            generation,
            result: Ok(page),
        });
    }

    #[test]
    fn start_requests_unfiltered_first_page() {
        let mut g = gallery();
        g.start();
        let requests = g.take_requests();
        assert_eq!(
            listing_urls(&requests),
            vec!["https://api.artic.edu/api/v1/artworks?page=1"]
        );
        assert_eq!(g.mode(), Mode::Browsing);
    }

    #[test]
    fn search_resets_to_page_one_and_queries_search_endpoint() {
        let mut g = gallery();
        g.start();
        let requests = g.take_requests();
        answer_listing(&mut g, &requests, listing(1..=3, 7));
        g.take_requests();
        g.next_page();
        g.next_page();
        assert_eq!(g.pager().current_page(), 3);
        g.take_requests();

        g.search("monet");
        assert_eq!(g.pager().current_page(), 1);
        assert_eq!(g.mode(), Mode::Searching);
        let requests = g.take_requests();
        assert_eq!(
            listing_urls(&requests),
            vec!["https://api.artic.edu/api/v1/artworks/search?q=monet&page=1"]
        );
    }

    #[test]
    fn search_text_is_trimmed_and_empty_means_browse() {
        let mut g = gallery();
        g.search("  monet ");
        assert_eq!(g.query(), "monet");
        g.take_requests();

        g.search("   ");
        assert_eq!(g.mode(), Mode::Browsing);
        let requests = g.take_requests();
        assert_eq!(
            listing_urls(&requests),
            vec!["https://api.artic.edu/api/v1/artworks?page=1"]
        );
    }

    #[test]
    fn paging_keeps_search_mode() {
        let mut g = gallery();
        g.search("cat");
        let requests = g.take_requests();
        answer_listing(&mut g, &requests, listing(1..=2, 4));
        g.take_requests();

        g.next_page();
        let requests = g.take_requests();
        assert_eq!(
            listing_urls(&requests),
            vec!["https://api.artic.edu/api/v1/artworks/search?q=cat&page=2"]
        );
    }

    #[test]
    fn next_page_at_end_issues_nothing() {
        let mut g = gallery();
        g.start();
        let requests = g.take_requests();
        answer_listing(&mut g, &requests, listing(1..=2, 1));
        g.take_requests();

        g.next_page();
        g.previous_page();
        assert!(!g.has_pending_requests());
        assert_eq!(g.pager().current_page(), 1);
    }

    #[test]
    fn twenty_cards_with_one_missing_image() {
        let mut g = gallery();
        g.start();
        let requests = g.take_requests();

        let mut page = listing(1..=20, 3);
        page.items[4].image_id = None;
        answer_listing(&mut g, &requests, page);

        let ids: Vec<u64> = g.cards().iter().map(|c| c.id).collect();
        assert_eq!(ids, (1..=20).collect::<Vec<_>>());
        assert_eq!(g.cards().iter().filter(|c| c.resolved).count(), 19);

        let fifth = g.card(5).unwrap();
        assert!(!fifth.resolved);
        assert_eq!(fifth.image_src, "assets/img/logo.svg");
        assert_eq!(fifth.image_alt, PLACEHOLDER_ALT);

        let requests = g.take_requests();
        assert_eq!(
            requests,
            vec![Request::Detail {
                link: "https://api.artic.edu/api/v1/artworks/5".to_string(),
                purpose: DetailPurpose::CardImage(5),
            }]
        );

        g.handle(Response::Detail {
            link: "https://api.artic.edu/api/v1/artworks/5".to_string(),
            purpose: DetailPurpose::CardImage(5),
            result: Ok(artwork(5, Some("late-image"))),
        });
        let fifth = g.card(5).unwrap();
        assert!(fifth.resolved);
        assert_eq!(
            fifth.image_src,
            "https://www.artic.edu/iiif/2/late-image/full/843,/0/default.jpg"
        );
        assert_eq!(fifth.image_alt, "Artwork ID: 5");
    }

    #[test]
    fn resolved_card_uses_template_url() {
        let mut g = gallery();
        g.render_card(&artwork(42, Some("abc")));
        let card = g.card(42).unwrap();
        assert_eq!(
            card.image_src,
            "https://www.artic.edu/iiif/2/abc/full/843,/0/default.jpg"
        );
        assert!(!g.has_pending_requests());
    }

    #[test]
    fn resolve_image_for_missing_card_is_noop() {
        let mut g = gallery();
        g.render_card(&artwork(1, Some("a")));
        let before = g.cards().to_vec();
        g.resolve_image(99, "zzz");
        assert_eq!(g.cards(), before.as_slice());
    }

    #[test]
    fn listing_replaces_cards_and_sets_total() {
        let mut g = gallery();
        g.start();
        let requests = g.take_requests();
        answer_listing(&mut g, &requests, listing(1..=3, 7));
        assert_eq!(g.pager().display().total, "Total pages: 7");

        g.next_page();
        let requests = g.take_requests();
        answer_listing(&mut g, &requests, listing(10..=11, 7));
        let ids: Vec<u64> = g.cards().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![10, 11]);
    }

    #[test]
    fn failed_listing_keeps_previous_cards() {
        let mut g = gallery();
        g.start();
        let requests = g.take_requests();
        answer_listing(&mut g, &requests, listing(1..=3, 5));
        g.take_requests();

        g.next_page();
        let requests = g.take_requests();
        let Request::Listing { generation, url } = &requests[0] else {
            panic!("expected listing");
        };
        g.handle(Response::Listing {
            generation: *generation,
            result: Err(not_found(url)),
        });
        assert_eq!(g.cards().len(), 3);
        assert_eq!(g.pager().total_pages(), 5);
    }

    #[test]
    fn late_listing_wins_without_guard() {
        let mut g = gallery();
        g.load_listing(1);
        g.load_listing(2);
        let requests = g.take_requests();
        let gens: Vec<u64> = requests
            .iter()
            .filter_map(|r| match r {
                Request::Listing { generation, .. } => Some(*generation),
                _ => None,
            })
            .collect();

        // Page 2 lands first, then the older page 1 response.
        g.handle(Response::Listing {
            generation: gens[1],
            result: Ok(listing(20..=21, 9)),
        });
        g.handle(Response::Listing {
            generation: gens[0],
            result: Ok(listing(1..=2, 9)),
        });
        assert_eq!(g.cards()[0].id, 1);
    }

    #[test]
    fn stale_guard_drops_superseded_listing() {
        let mut g = gallery().with_stale_guard(true);
        g.load_listing(1);
        g.load_listing(2);
        g.take_requests();

        g.handle(Response::Listing {
            generation: 2,
            result: Ok(listing(20..=21, 9)),
        });
        g.handle(Response::Listing {
            generation: 1,
            result: Ok(listing(1..=2, 9)),
        });
        assert_eq!(g.cards()[0].id, 20);
    }

    #[test]
    fn show_details_opens_modal_and_requests_detail() {
        let mut g = gallery();
        g.show_details("https://api/7");
        assert!(g.modal().is_visible());
        assert_eq!(
            g.take_requests(),
            vec![Request::Detail {
                link: "https://api/7".to_string(),
                purpose: DetailPurpose::Modal { generation: 1 },
            }]
        );
    }

    #[test]
    fn modal_defaults_for_missing_fields() {
        let mut g = gallery();
        g.show_details("https://api/7");
        let mut art = artwork(7, None);
        art.description = None;
        art.material_titles = Some(vec![]);
        art.classification_titles = None;
        g.handle(Response::Detail {
            link: "https://api/7".to_string(),
            purpose: DetailPurpose::Modal { generation: 1 },
            result: Ok(art),
        });

        let view = g.modal().content().unwrap();
        assert_eq!(view.description, "No description available");
        assert_eq!(view.artist, "Unknown Artist");
        assert_eq!(view.materials, vec!["Unknown".to_string()]);
        assert_eq!(view.classifications, vec!["Unknown".to_string()]);
        assert_eq!(view.image_url, None);
    }

    #[test]
    fn card_image_detail_does_not_touch_modal() {
        let mut g = gallery();
        g.render_card(&artwork(4, None));
        g.take_requests();
        g.handle(Response::Detail {
            link: "https://api.artic.edu/api/v1/artworks/4".to_string(),
            purpose: DetailPurpose::CardImage(4),
            result: Ok(artwork(4, Some("i4"))),
        });
        assert!(g.modal().content().is_none());
        assert!(!g.modal().is_visible());
    }

    #[test]
    fn failed_detail_leaves_card_placeholder() {
        let mut g = gallery();
        g.render_card(&artwork(4, None));
        g.take_requests();
        g.handle(Response::Detail {
            link: "https://api/4".to_string(),
            purpose: DetailPurpose::CardImage(4),
            result: Err(not_found("https://api/4")),
        });
        assert!(!g.card(4).unwrap().resolved);
    }

    #[test]
    fn close_and_background_click_hide_modal() {
        let mut g = gallery();
        g.show_details("https://api/1");
        g.click_modal(ModalTarget::Content);
        assert!(g.modal().is_visible());
        g.close_details();
        assert!(!g.modal().is_visible());

        g.show_details("https://api/1");
        g.click_modal(ModalTarget::Background);
        assert!(!g.modal().is_visible());
    }

    #[test]
    fn show_card_details_uses_card_link() {
        let mut g = gallery();
        g.render_card(&artwork(8, Some("x")));
        assert!(g.show_card_details(8));
        assert!(!g.show_card_details(9));
        let requests = g.take_requests();
        assert_eq!(requests.len(), 1);
        assert!(matches!(
            &requests[0],
            Request::Detail { link, .. } if link == "https://api.artic.edu/api/v1/artworks/8"
        ));
    }

    #[test]
    fn initial_page_and_query_shape_first_request() {
        let mut g = gallery().with_query(" degas ").with_initial_page(4);
        g.start();
        assert_eq!(g.pager().current_page(), 4);
        let requests = g.take_requests();
        assert_eq!(
            listing_urls(&requests),
            vec!["https://api.artic.edu/api/v1/artworks/search?q=degas&page=4"]
        );
    }
}
