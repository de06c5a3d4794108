//! Request dispatch.
//!
//! The [`Dispatcher`] executes a gallery's queued requests against an
//! [`ArtSource`] on a rayon pool and hands the responses back to the gallery
//! one at a time, on the calling thread, in the order they complete. The
//! gallery is never touched from a worker.
//!
//! Handling a response can queue more requests (a listing queues detail
//! requests for image-less cards), so [`Dispatcher::settle`] keeps going
//! until nothing is queued and nothing is in flight. A request whose fetch
//! panics is counted as a failure and never reaches the gallery.

use crate::gallery::{Gallery, Request, Response};
use crate::source::ArtSource;
use log::{debug, error};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("Failed to start fetch workers: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

/// Counts for one [`Dispatcher::settle`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettleStats {
    pub listings: usize,
    pub details: usize,
    pub failures: usize,
}

impl std::fmt::Display for SettleStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} listing, {} detail requests, {} failed",
            self.listings, self.details, self.failures
        )
    }
}

pub struct Dispatcher<S: ArtSource> {
    source: S,
    pool: rayon::ThreadPool,
}

impl<S: ArtSource> Dispatcher<S> {
    pub fn new(source: S, workers: usize) -> Result<Self, RuntimeError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers.max(1))
            .thread_name(|i| format!("artgal-fetch-{i}"))
            .build()?;
        Ok(Self { source, pool })
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Run every queued request, applying responses as they arrive, until
    /// the gallery has nothing left to ask for.
    pub fn settle(&self, gallery: &mut Gallery) -> SettleStats {
        let source = &self.source;
        let (tx, rx) = mpsc::channel::<Option<Response>>();
        let mut stats = SettleStats::default();

        self.pool.in_place_scope(|scope| {
            let mut in_flight = 0usize;
            loop {
                for request in gallery.take_requests() {
                    match request {
                        Request::Listing { .. } => stats.listings += 1,
                        Request::Detail { .. } => stats.details += 1,
                    }
                    in_flight += 1;
                    let tx = tx.clone();
                    scope.spawn(move |_| {
                        let outcome =
                            panic::catch_unwind(AssertUnwindSafe(|| execute(source, request)))
                                .map_err(|payload| {
                                    error!("Fetch worker panicked: {}", panic_message(&*payload))
                                })
                                .ok();
                        // Every job sends exactly once, so the drain loop below
                        // always sees its in-flight count reach zero.
                        let _ = tx.send(outcome);
                    });
                }
                if in_flight == 0 {
                    break;
                }
                match rx.recv() {
                    Ok(Some(response)) => {
                        in_flight -= 1;
                        if response.is_failure() {
                            stats.failures += 1;
                        }
                        gallery.handle(response);
                    }
                    Ok(None) => {
                        in_flight -= 1;
                        stats.failures += 1;
                    }
                    Err(_) => break,
                }
            }
        });

        debug!("Settled: {stats}");
        stats
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic"
    }
}

/// Perform one request synchronously.
pub fn execute<S: ArtSource + ?Sized>(source: &S, request: Request) -> Response {
    match request {
        Request::Listing { generation, url } => {
            debug!("GET {url}");
            Response::Listing {
                generation,
                result: source.fetch_listing(&url),
            }
        }
        Request::Detail { link, purpose } => {
            debug!("GET {link}");
            let result = source.fetch_detail(&link);
            Response::Detail {
                link,
                purpose,
                result,
            }
        }
    }
}
