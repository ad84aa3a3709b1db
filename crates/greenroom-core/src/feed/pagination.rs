//! Backward pagination: fetching older pages when the user nears the top,
//! without letting the visible content jump.

use crate::constants::{NEAR_TOP_THRESHOLD, PAGE_SIZE};
use crate::feed::viewport::Geometry;
use crate::models::Message;
use crate::store::MessageStore;

/// Scroll geometry captured before a prepend, used to restore the visual
/// anchor afterwards: the same message stays at the same vertical position.
#[derive(Debug, Clone, Copy)]
pub struct ScrollAnchor {
    pub content_height: f64,
    pub scroll_top: f64,
}

impl ScrollAnchor {
    /// New scroll offset after the prepend grew the content: the old offset
    /// plus the inserted height delta.
    pub fn restored_top(&self, new_content_height: f64) -> f64 {
        self.scroll_top + (new_content_height - self.content_height)
    }
}

/// Parameters for an older-page fetch the caller should now perform.
#[derive(Debug, Clone, Copy)]
pub struct OlderPageRequest {
    /// Fetch messages created strictly before this timestamp
    pub before: i64,
    pub limit: usize,
    pub anchor: ScrollAnchor,
}

/// Near-top trigger and page application for backward history fetches.
///
/// The fetch itself happens elsewhere (it is async); this controller decides
/// when one may start, captures the anchor, and owns the store's loading and
/// exhaustion flags. A fetch in flight is never canceled: a second trigger
/// is suppressed by `loading_older` instead.
#[derive(Debug)]
pub struct PaginationController {
    page_size: usize,
}

impl Default for PaginationController {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

impl PaginationController {
    pub fn new(page_size: usize) -> Self {
        Self { page_size }
    }

    /// Decide whether an older-page fetch should start now.
    ///
    /// Requires the scroll position inside the near-top band, remaining
    /// history, no fetch in flight, and the feed not auto-scrolling (which
    /// would otherwise trigger accidental backward loads during initial
    /// population). On a go, marks the store loading and returns the fetch
    /// parameters with the captured anchor.
    pub fn request_older(
        &self,
        store: &mut MessageStore,
        auto_scrolling: bool,
        geo: &dyn Geometry,
    ) -> Option<OlderPageRequest> {
        if geo.scroll_top() >= NEAR_TOP_THRESHOLD
            || !store.has_more_older
            || store.loading_older
            || auto_scrolling
        {
            return None;
        }
        let before = store.oldest()?.created_at;
        store.loading_older = true;
        Some(OlderPageRequest {
            before,
            limit: self.page_size,
            anchor: ScrollAnchor {
                content_height: geo.content_height(),
                scroll_top: geo.scroll_top(),
            },
        })
    }

    /// Apply a fetched page. An empty page is the sole exhaustion signal.
    /// Returns the number of messages inserted; the caller restores the
    /// anchor only when that is non-zero.
    pub fn apply_page(&self, store: &mut MessageStore, page: Vec<Message>) -> usize {
        store.loading_older = false;
        store.has_more_older = !page.is_empty();
        store.prepend_batch(page)
    }

    /// A failed fetch leaves `has_more_older` unchanged and is retryable on
    /// the next qualifying scroll event. No retry timer.
    pub fn fail(&self, store: &mut MessageStore) {
        store.loading_older = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::viewport::Geometry;

    struct Geo {
        content_height: f64,
        scroll_top: f64,
    }

    impl Geometry for Geo {
        fn bottom_edge(&self, _id: &str) -> Option<f64> {
            None
        }
        fn content_height(&self) -> f64 {
            self.content_height
        }
        fn viewport_height(&self) -> f64 {
            40.0
        }
        fn scroll_top(&self) -> f64 {
            self.scroll_top
        }
    }

    fn seeded_store() -> MessageStore {
        let mut store = MessageStore::new();
        store.append_if_new(Message::text("m1", "ana", "hi", 10_000));
        store.append_if_new(Message::text("m2", "ana", "ho", 20_000));
        store
    }

    #[test]
    fn test_trigger_requires_near_top() {
        let pagination = PaginationController::default();
        let mut store = seeded_store();

        let far = Geo { content_height: 900.0, scroll_top: 400.0 };
        assert!(pagination.request_older(&mut store, false, &far).is_none());

        let near = Geo { content_height: 900.0, scroll_top: 50.0 };
        let req = pagination.request_older(&mut store, false, &near).unwrap();
        assert_eq!(req.before, 10_000);
        assert_eq!(req.limit, PAGE_SIZE);
        assert!(store.loading_older);
    }

    #[test]
    fn test_trigger_suppressed_by_guards() {
        let pagination = PaginationController::default();
        let near = Geo { content_height: 900.0, scroll_top: 0.0 };

        let mut store = seeded_store();
        store.loading_older = true;
        assert!(pagination.request_older(&mut store, false, &near).is_none());

        let mut store = seeded_store();
        store.has_more_older = false;
        assert!(pagination.request_older(&mut store, false, &near).is_none());

        // auto-scroll in progress: no accidental backward load
        let mut store = seeded_store();
        assert!(pagination.request_older(&mut store, true, &near).is_none());

        // empty store has no anchor timestamp to page before
        let mut store = MessageStore::new();
        assert!(pagination.request_older(&mut store, false, &near).is_none());
    }

    #[test]
    fn test_second_trigger_suppressed_while_loading() {
        let pagination = PaginationController::default();
        let mut store = seeded_store();
        let near = Geo { content_height: 900.0, scroll_top: 0.0 };

        assert!(pagination.request_older(&mut store, false, &near).is_some());
        assert!(pagination.request_older(&mut store, false, &near).is_none());
    }

    #[test]
    fn test_apply_page_prepends_and_clears_loading() {
        let pagination = PaginationController::default();
        let mut store = seeded_store();
        store.loading_older = true;

        let inserted = pagination.apply_page(
            &mut store,
            vec![
                Message::text("m0a", "ana", "old", 1_000),
                Message::text("m0b", "ana", "older", 2_000),
            ],
        );
        assert_eq!(inserted, 2);
        assert!(!store.loading_older);
        assert!(store.has_more_older);
        assert_eq!(store.oldest().unwrap().id, "m0a");
    }

    #[test]
    fn test_empty_page_is_the_exhaustion_signal() {
        let pagination = PaginationController::default();
        let mut store = seeded_store();
        store.loading_older = true;

        assert_eq!(pagination.apply_page(&mut store, vec![]), 0);
        assert!(!store.has_more_older);

        // and it stays exhausted for later triggers
        let near = Geo { content_height: 900.0, scroll_top: 0.0 };
        assert!(pagination.request_older(&mut store, false, &near).is_none());
    }

    #[test]
    fn test_failure_keeps_has_more_and_is_retryable() {
        let pagination = PaginationController::default();
        let mut store = seeded_store();
        let near = Geo { content_height: 900.0, scroll_top: 0.0 };

        assert!(pagination.request_older(&mut store, false, &near).is_some());
        pagination.fail(&mut store);
        assert!(store.has_more_older);
        assert!(!store.loading_older);
        assert!(pagination.request_older(&mut store, false, &near).is_some());
    }

    #[test]
    fn test_anchor_restores_visual_position() {
        let anchor = ScrollAnchor {
            content_height: 900.0,
            scroll_top: 30.0,
        };
        // the prepended page added 250 units of content
        assert_eq!(anchor.restored_top(1_150.0), 280.0);
    }
}
