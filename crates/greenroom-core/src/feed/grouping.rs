//! Thread segmentation: deciding where runs of consecutive messages start
//! and end for visual grouping.
//!
//! Pure functions over `(message, previous, next)` so flags can be
//! recomputed on every render with no cumulative state.

use crate::constants::THREAD_GAP_MS;
use crate::models::Message;

/// Per-message segment flags derived for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadFlags {
    /// First message of a visual thread segment (author header shown)
    pub starts_thread: bool,
    /// Last message of a segment (trailing timestamp label shown)
    pub ends_thread: bool,
}

/// Whether a segment boundary falls between adjacent messages `a` then `b`.
///
/// Host messages never merge with neighbors, pinned messages always open
/// their own segment, and a gap over the thread window splits same-sender
/// runs. Gap computation uses per-message timestamps, not insertion order;
/// a late-arriving push with an old timestamp can over-split a run but never
/// merges unrelated senders.
fn breaks_between(a: &Message, b: &Message) -> bool {
    a.sender != b.sender
        || a.is_from_host
        || b.is_from_host
        || b.is_pinned
        || b.created_at.saturating_sub(a.created_at) > THREAD_GAP_MS
}

/// Segment flags for one message given its neighbors in display order.
pub fn thread_flags(msg: &Message, prev: Option<&Message>, next: Option<&Message>) -> ThreadFlags {
    ThreadFlags {
        starts_thread: prev.map_or(true, |p| breaks_between(p, msg)),
        ends_thread: next.map_or(true, |n| breaks_between(msg, n)),
    }
}

/// Flags for every message of a display slice, in order.
pub fn thread_flags_for(messages: &[&Message]) -> Vec<ThreadFlags> {
    (0..messages.len())
        .map(|i| {
            thread_flags(
                messages[i],
                i.checked_sub(1).map(|p| messages[p]),
                messages.get(i + 1).copied(),
            )
        })
        .collect()
}
