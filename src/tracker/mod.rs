//! Change tracking.
//!
//! A `Tracker` owns the previous scan of one page. Every scan is reconciled
//! against it; accepted changes overwrite the stored snapshot and are
//! broadcast to subscribers.
//!
//! # Module Structure
//!
//! - `reconcile`: positional comparison of two scans
//! - `refresh`: the debounced refresh loop that drives a tracker

pub mod reconcile;
pub mod refresh;

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::dom;
use crate::error::Result;
use crate::messages::{Event, Request, Response};
use crate::options::Options;
use crate::page::{page_title, Page, PageSource};
use crate::result::{PageSnapshot, Reference, ScanResult};
use crate::settings::Theme;
use crate::store::SnapshotStore;
use crate::url_utils::page_key;

pub use reconcile::{reconcile, Reconciliation};
pub use refresh::{LoopState, RefreshHandle, RefreshLoop};

/// Buffered events per subscriber before the slowest one starts lagging.
const EVENT_CAPACITY: usize = 16;

/// Scan, reconcile, persist and notify for one page.
pub struct Tracker {
    options: Options,
    store: Arc<dyn SnapshotStore>,
    previous: Vec<Reference>,
    events: broadcast::Sender<Event>,
}

impl Tracker {
    /// Create a tracker with no previous scan.
    pub fn new(options: Options, store: Arc<dyn SnapshotStore>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            options,
            store,
            previous: Vec::new(),
            events,
        }
    }

    /// Start from a known previous scan instead of an empty one.
    #[must_use]
    pub fn with_previous(mut self, previous: Vec<Reference>) -> Self {
        self.previous = previous;
        self
    }

    /// The scan the next one is compared against.
    #[must_use]
    pub fn previous(&self) -> &[Reference] {
        &self.previous
    }

    /// Options every scan starts from.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Receive future `Event`s.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }

    pub(crate) fn event_sender(&self) -> broadcast::Sender<Event> {
        self.events.clone()
    }

    /// Scan a page without touching any state.
    ///
    /// Links resolve against the page URL unless the page has none.
    #[must_use]
    pub fn scan(&self, page: &Page) -> ScanResult {
        self.scan_with_title(page).0
    }

    fn scan_with_title(&self, page: &Page) -> (ScanResult, String) {
        let mut options = self.options.clone();
        if !page.url.is_empty() {
            options.page_url = Some(page.url.clone());
        }

        let doc = dom::parse(&page.html);
        let result = crate::scan_document(&doc, &options);
        (result, page_title(&doc))
    }

    /// Scan and reconcile. Returns the fresh scan whether or not it changed.
    pub fn update(&mut self, page: &Page) -> ScanResult {
        let (result, title) = self.scan_with_title(page);
        self.commit(page, title, &result);
        result
    }

    /// Forget the previous scan, then update. A non-empty scan always
    /// counts as changed.
    pub fn force_refresh(&mut self, page: &Page) -> ScanResult {
        self.previous.clear();
        self.update(page)
    }

    /// Forget the previous scan and delete the stored snapshot of `page_url`.
    pub fn clear(&mut self, page_url: &str) {
        self.previous.clear();
        if let Err(err) = self.store.remove(&page_key(page_url)) {
            warn!(page = page_url, error = %err, "failed to delete snapshot");
        }
        debug!(page = page_url, "cleared references");
    }

    fn commit(&mut self, page: &Page, page_title: String, result: &ScanResult) -> Reconciliation {
        let outcome = reconcile(&self.previous, &result.references);
        if !outcome.changed {
            return outcome;
        }

        self.previous.clone_from(&result.references);

        let snapshot = PageSnapshot {
            references: result.references.clone(),
            last_update: Utc::now(),
            page_url: page.url.clone(),
            page_title,
        };
        match self.store.save(&page_key(&page.url), &snapshot) {
            Ok(()) => info!(page = %page.url, count = result.len(), "saved references"),
            Err(err) => warn!(page = %page.url, error = %err, "failed to save snapshot"),
        }

        // No subscribers is fine.
        let _ = self.events.send(Event::ReferencesUpdated {
            references: result.references.clone(),
            new_count: outcome.added_count,
        });

        outcome
    }

    /// Answer a request. Pages are captured only when the request needs one.
    ///
    /// Clearing always succeeds: when the page cannot be captured the
    /// snapshot of `Options::page_url` is deleted instead.
    pub fn handle(&mut self, request: Request, source: &dyn PageSource) -> Response {
        match request {
            Request::Ping => return Response::pong(),
            Request::ClearReferences => {
                self.clear_current(source);
                return Response::ok();
            }
            Request::GetReferences | Request::ForceRefresh => {}
        }

        let page = match source.capture() {
            Ok(page) => page,
            Err(err) => {
                warn!(?request, error = %err, "page unavailable");
                return Response::failure(err.to_string());
            }
        };

        match request {
            Request::GetReferences => {
                let result = self.update(&page);
                Response {
                    page_url: Some(page.url),
                    ..Response::with_references(result.into_references())
                }
            }
            Request::ForceRefresh => Response::with_references(self.force_refresh(&page).into_references()),
            Request::ClearReferences | Request::Ping => Response::ok(),
        }
    }

    fn clear_current(&mut self, source: &dyn PageSource) {
        let page_url = match source.capture() {
            Ok(page) if !page.url.is_empty() => Some(page.url),
            Ok(_) => self.options.page_url.clone(),
            Err(err) => {
                warn!(error = %err, "page unavailable, clearing configured page");
                self.options.page_url.clone()
            }
        };

        match page_url {
            Some(url) => self.clear(&url),
            None => {
                self.previous.clear();
                debug!("cleared references, no page to delete");
            }
        }
    }

    /// Stored theme preference.
    pub fn theme(&self) -> Result<Theme> {
        self.store.theme()
    }

    /// Persist a theme preference and announce it.
    pub fn set_theme(&self, theme: Theme) -> Result<()> {
        self.store.set_theme(theme)?;
        let _ = self.events.send(Event::ThemeChanged { theme });
        Ok(())
    }
}

impl std::fmt::Debug for Tracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tracker")
            .field("options", &self.options)
            .field("previous", &self.previous.len())
            .field("subscribers", &self.events.receiver_count())
            .finish_non_exhaustive()
    }
}
