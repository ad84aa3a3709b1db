use crate::constants::NEAR_BOTTOM_THRESHOLD;

/// Stick-to-bottom state: whether new content should force-scroll the view
/// to the newest message.
///
/// Explicit state container rather than an ambient flag so every handler
/// that touches it goes through the same two entry points and the rules stay
/// testable in isolation.
#[derive(Debug, Default)]
pub struct AutoScroll {
    stick: bool,
}

impl AutoScroll {
    pub fn new() -> Self {
        Self { stick: false }
    }

    pub fn stick_to_bottom(&self) -> bool {
        self.stick
    }

    /// Re-evaluate on a scroll reading. An already-set flag survives only
    /// while the view stays near the bottom, and an unset flag is re-armed
    /// only by reaching the bottom region; both rules reduce to the same
    /// predicate, so a single stale scroll read during an in-flight
    /// auto-scroll can do at most one transition.
    pub fn on_scroll(&mut self, distance_from_bottom: f64) {
        self.stick = distance_from_bottom < NEAR_BOTTOM_THRESHOLD;
    }

    /// Local user action guaranteed to produce tail content (send, join,
    /// initial load, filter switch): force the flag before the content lands.
    pub fn force(&mut self) {
        self.stick = true;
    }
}
