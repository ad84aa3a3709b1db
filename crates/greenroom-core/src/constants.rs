//! Feed-engine constants
//!
//! Centralized location for thresholds and tuning values used across
//! multiple modules. Distances are in layout units (rows in the TUI).

use std::time::Duration;

/// Number of older messages requested per backward-pagination page
pub const PAGE_SIZE: usize = 50;

/// Poll-mode refetch interval while the push channel is down
pub const POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Scroll distance from the top that triggers a backward-pagination fetch
pub const NEAR_TOP_THRESHOLD: f64 = 100.0;

/// Scroll distance from the content bottom that counts as "near bottom"
/// for the auto-scroll flag
pub const NEAR_BOTTOM_THRESHOLD: f64 = 100.0;

/// Gap between consecutive messages from the same sender that still
/// merges them into one thread segment
pub const THREAD_GAP_MS: i64 = 5 * 60 * 1000; // 5 minutes

// Viewport hysteresis buffers. A message enters the visible set once its
// bottom edge sits this far below the header line, and leaves only after
// rising past the smaller exit buffer above it.
pub const VISIBLE_ENTER_BUFFER: f64 = 20.0;
pub const VISIBLE_EXIT_BUFFER: f64 = 5.0;

// Above-viewport (sticky-candidate) hysteresis thresholds, measured above
// the header line.
pub const ABOVE_ENTER_THRESHOLD: f64 = 50.0;
pub const ABOVE_EXIT_THRESHOLD: f64 = 20.0;
