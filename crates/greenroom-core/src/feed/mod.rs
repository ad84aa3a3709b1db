//! The feed engine: one struct owning the message store and the scroll
//! state machines, driven by [`FeedEvent`]s and per-frame geometry passes.
//!
//! All mutation happens here in response to discrete events; the
//! presentation layer only reads snapshots and applies the returned
//! effects.

pub mod autoscroll;
pub mod grouping;
pub mod hysteresis;
pub mod pagination;
pub mod pinning;
pub mod viewport;

pub use autoscroll::AutoScroll;
pub use grouping::{thread_flags, thread_flags_for, ThreadFlags};
pub use hysteresis::Hysteresis;
pub use pagination::{OlderPageRequest, PaginationController, ScrollAnchor};
pub use pinning::top_pinned;
pub use viewport::{Geometry, ViewportTracker};

use crate::events::FeedEvent;
use crate::models::Message;
use crate::session::Session;
use crate::store::MessageStore;
use crate::transport::PushState;
use tracing::{debug, warn};

/// Which messages the feed currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedFilter {
    #[default]
    All,
    /// Host messages only
    HostOnly,
}

/// Side effects the presentation layer must apply after an engine call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEffect {
    /// Scroll the view to the newest message
    ScrollToBottom,
    /// An older page landed at the head; re-measure and restore the
    /// captured scroll anchor
    PagePrepended { inserted: usize },
}

/// Sticky-overlay candidates derived from the current sets. Never stored.
#[derive(Debug, Default)]
pub struct Overlay<'a> {
    /// Most recent host message the user has scrolled above the header
    pub host: Option<&'a Message>,
    /// Top-paid pinned message, shown only while it is not in normal view
    pub pinned: Option<&'a Message>,
}

pub struct FeedEngine {
    store: MessageStore,
    pagination: PaginationController,
    viewport: ViewportTracker,
    autoscroll: AutoScroll,
    filter: FeedFilter,
    session: Session,
    push_state: PushState,
}

impl FeedEngine {
    pub fn new(session: Session) -> Self {
        Self {
            store: MessageStore::new(),
            pagination: PaginationController::default(),
            viewport: ViewportTracker::new(),
            autoscroll: AutoScroll::new(),
            filter: FeedFilter::All,
            session,
            push_state: PushState::Disconnected,
        }
    }

    /// Engine with a configured pagination page size.
    pub fn with_page_size(session: Session, page_size: usize) -> Self {
        Self {
            pagination: PaginationController::new(page_size),
            ..Self::new(session)
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn push_state(&self) -> PushState {
        self.push_state
    }

    pub fn filter(&self) -> FeedFilter {
        self.filter
    }

    pub fn store(&self) -> &MessageStore {
        &self.store
    }

    pub fn stick_to_bottom(&self) -> bool {
        self.autoscroll.stick_to_bottom()
    }

    /// Join the feed and apply the initial full fetch. Joining is a local
    /// content-producing action, so auto-scroll is forced before the content
    /// lands.
    pub fn join(&mut self, initial: Vec<Message>) -> Vec<EngineEffect> {
        self.session.join();
        self.autoscroll.force();
        self.store.replace_all(initial);
        self.viewport.reset();
        vec![EngineEffect::ScrollToBottom]
    }

    /// Leave the feed: the store is cleared and re-initialized on the next
    /// join. Transport teardown is the caller's job.
    pub fn leave(&mut self) {
        self.session.leave();
        self.store.clear();
        self.viewport.reset();
    }

    /// The user is about to send a message (text or voice). Forces the
    /// auto-scroll flag so the echo lands with the view pinned to the tail.
    pub fn note_local_send(&mut self) {
        self.autoscroll.force();
    }

    /// Switch the feed filter. Forces a scroll-to-bottom which the caller
    /// applies after one settled render pass of the re-filtered content.
    pub fn set_filter(&mut self, filter: FeedFilter) -> Vec<EngineEffect> {
        if filter == self.filter {
            return Vec::new();
        }
        self.filter = filter;
        self.viewport.reset();
        self.autoscroll.force();
        vec![EngineEffect::ScrollToBottom]
    }

    /// Handle one event from the transports or background fetches.
    pub fn handle_event(&mut self, event: FeedEvent) -> Vec<EngineEffect> {
        match event {
            FeedEvent::Push(message) => {
                let inserted = self.store.append_if_new(message);
                if inserted && self.autoscroll.stick_to_bottom() {
                    vec![EngineEffect::ScrollToBottom]
                } else {
                    Vec::new()
                }
            }
            FeedEvent::PollReload(messages) => {
                let before = self.store.len();
                self.store.reconcile(messages);
                if self.store.len() != before && self.autoscroll.stick_to_bottom() {
                    vec![EngineEffect::ScrollToBottom]
                } else {
                    Vec::new()
                }
            }
            FeedEvent::PushState(state) => {
                debug!(?state, "push state changed");
                self.push_state = state;
                Vec::new()
            }
            FeedEvent::OlderPage(Ok(page)) => {
                let inserted = self.pagination.apply_page(&mut self.store, page);
                if inserted > 0 {
                    vec![EngineEffect::PagePrepended { inserted }]
                } else {
                    Vec::new()
                }
            }
            FeedEvent::OlderPage(Err(err)) => {
                warn!(error = %err, "older-page fetch failed; retryable on next scroll");
                self.pagination.fail(&mut self.store);
                Vec::new()
            }
            FeedEvent::SendFinished(Ok(())) => Vec::new(),
            FeedEvent::SendFinished(Err(err)) => {
                warn!(error = %err, "send failed");
                Vec::new()
            }
        }
    }

    /// Scroll reading for this frame; feeds the auto-scroll evaluation.
    pub fn on_scroll(&mut self, geo: &dyn Geometry) {
        self.autoscroll.on_scroll(geo.distance_from_bottom());
    }

    /// Near-top check for this frame. On a go the caller performs the fetch
    /// and later delivers [`FeedEvent::OlderPage`].
    pub fn maybe_request_older(&mut self, geo: &dyn Geometry) -> Option<OlderPageRequest> {
        self.pagination
            .request_older(&mut self.store, self.autoscroll.stick_to_bottom(), geo)
    }

    /// Per-frame viewport classification pass. Returns whether overlay
    /// membership changed (re-render gate).
    pub fn update_viewport(&mut self, geo: &dyn Geometry) -> bool {
        let watch: Vec<String> = self
            .overlay_candidates()
            .into_iter()
            .map(|m| m.id.clone())
            .collect();
        let hosts: Vec<String> = self
            .display_messages()
            .into_iter()
            .filter(|m| m.is_from_host)
            .map(|m| m.id.clone())
            .collect();
        self.viewport.update(
            watch.iter().map(String::as_str),
            hosts.iter().map(String::as_str),
            geo,
        )
    }

    /// Messages in the current filter view, oldest-to-newest.
    pub fn display_messages(&self) -> Vec<&Message> {
        self.store
            .messages()
            .iter()
            .filter(|m| match self.filter {
                FeedFilter::All => true,
                FeedFilter::HostOnly => m.is_from_host,
            })
            .collect()
    }

    /// Display view with per-message thread-segment flags.
    pub fn display(&self) -> Vec<(&Message, ThreadFlags)> {
        let messages = self.display_messages();
        let flags = thread_flags_for(&messages);
        messages.into_iter().zip(flags).collect()
    }

    /// Current sticky-overlay derivation.
    pub fn overlay(&self) -> Overlay<'_> {
        let messages = self.display_messages();
        let host = messages
            .iter()
            .rev()
            .find(|m| m.is_from_host && self.viewport.above().contains(&m.id))
            .copied();
        let pinned = top_pinned(messages.into_iter())
            .filter(|m| !self.viewport.visible().contains(&m.id));
        Overlay { host, pinned }
    }

    /// Watch-list for visible-set tracking: the current overlay candidates.
    fn overlay_candidates(&self) -> Vec<&Message> {
        let messages = self.display_messages();
        let mut out = Vec::with_capacity(2);
        if let Some(host) = messages.iter().rev().find(|m| m.is_from_host) {
            out.push(*host);
        }
        if let Some(pinned) = top_pinned(messages.into_iter()) {
            out.push(pinned);
        }
        out
    }
}
