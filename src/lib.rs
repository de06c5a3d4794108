//! # artgal
//!
//! A gallery client for the Art Institute of Chicago public collection API.
//! It pages through artwork listings or full-text search results, shows each
//! artwork as a card, resolves missing thumbnails lazily, and opens a detail
//! view on demand. The view is an owned in-memory document rendered to a
//! standalone HTML page.
//!
//! # Architecture
//!
//! ```text
//! user action ──▶ Gallery ──(Request)──▶ Dispatcher ──▶ ArtSource (HTTP)
//!                    ▲                        │
//!                    └──────(Response)────────┘
//!                    │
//!                    └──▶ render ──▶ gallery.html
//! ```
//!
//! The [`gallery::Gallery`] controller does no IO. It queues requests and
//! applies responses; the [`runtime::Dispatcher`] runs the requests on a
//! rayon pool and feeds responses back one at a time, in completion order.
//! That split keeps every piece of controller logic testable with canned
//! responses and no network.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`gallery`] | Controller: search, paging, cards, image resolution, detail view |
//! | [`pager`] | Current/total page counters and their display text |
//! | [`modal`] | Detail overlay visibility and click containment |
//! | [`detail`] | Detail view content with display defaults applied |
//! | [`source`] | [`source::ArtSource`] trait, endpoints, blocking HTTP implementation |
//! | [`iiif`] | Image URL construction from the IIIF template |
//! | [`runtime`] | Fire-and-continue request dispatch on a rayon pool |
//! | [`render`] | Maud rendering of the gallery page |
//! | [`session`] | Line-oriented interactive session |
//! | [`config`] | TOML config loading, merging over defaults, validation |
//! | [`types`] | API payload types (`Artwork`, `ListingPage`) |
//! | [`output`] | CLI text output |
//!
//! # Response Ordering
//!
//! Nothing waits for an earlier request before issuing the next one, so fast
//! paging can have an older page land after a newer one and overwrite it.
//! That is the default behaviour. `runtime.stale_guard = true` in the config
//! tags requests with a generation number and drops superseded responses.

pub mod config;
pub mod detail;
pub mod gallery;
pub mod iiif;
pub mod modal;
pub mod output;
pub mod pager;
pub mod render;
pub mod runtime;
pub mod session;
pub mod source;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
