//! Scroll-driven viewport classification.
//!
//! A continuous scroll listener recomputes, once per frame, where a small
//! watch-list of messages sits relative to the bottom edge of the fixed
//! header, and maintains two hysteresis-debounced membership sets from the
//! measurements. The sticky overlay is derived from these sets by the
//! engine; nothing here is stored beyond the memberships themselves.

use crate::constants::{
    ABOVE_ENTER_THRESHOLD, ABOVE_EXIT_THRESHOLD, VISIBLE_ENTER_BUFFER, VISIBLE_EXIT_BUFFER,
};
use crate::feed::hysteresis::Hysteresis;
use std::collections::HashSet;

/// Scroll-geometry snapshot taken atomically within one frame callback.
///
/// The tracker only ever reads through this interface, so the hysteresis
/// logic can be exercised against synthetic geometry sequences without a
/// real rendering surface.
pub trait Geometry {
    /// Bottom edge of the message with `id`, in units relative to the header
    /// line: positive below the line, negative above. `None` when the
    /// message is not laid out this frame.
    fn bottom_edge(&self, id: &str) -> Option<f64>;

    /// Total laid-out content height
    fn content_height(&self) -> f64;

    /// Height of the scrollable window
    fn viewport_height(&self) -> f64;

    /// Scroll offset from the top of the content
    fn scroll_top(&self) -> f64;

    /// Distance of the view's bottom edge from the content bottom
    fn distance_from_bottom(&self) -> f64 {
        (self.content_height() - (self.scroll_top() + self.viewport_height())).max(0.0)
    }
}

/// Dual-set membership tracker behind the sticky overlay.
///
/// `visible` holds watch-list messages considered passed into normal view;
/// `above` holds host messages the user has scrolled past the header. Each
/// set has its own enter/exit thresholds so a bottom edge hovering at the
/// header line cannot flicker membership.
#[derive(Debug)]
pub struct ViewportTracker {
    visible: HashSet<String>,
    above: HashSet<String>,
    /// Measured below the header line
    visible_band: Hysteresis,
    /// Measured above the header line
    above_band: Hysteresis,
}

impl Default for ViewportTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewportTracker {
    pub fn new() -> Self {
        Self {
            visible: HashSet::new(),
            above: HashSet::new(),
            visible_band: Hysteresis::new(VISIBLE_ENTER_BUFFER, -VISIBLE_EXIT_BUFFER),
            above_band: Hysteresis::new(ABOVE_ENTER_THRESHOLD, -ABOVE_EXIT_THRESHOLD),
        }
    }

    pub fn visible(&self) -> &HashSet<String> {
        &self.visible
    }

    pub fn above(&self) -> &HashSet<String> {
        &self.above
    }

    /// One scroll/layout pass.
    ///
    /// `watch` is the visible-set watch-list (the current overlay
    /// candidates); `host_ids` are all host messages in the filtered feed,
    /// since any of them can become the sticky candidate as the user
    /// scrolls. Both sets are recomputed from scratch and diffed; output
    /// mutates only when membership actually changed, and the return value
    /// reports that change for downstream re-render gating.
    pub fn update<'a, W, H>(&mut self, watch: W, host_ids: H, geo: &dyn Geometry) -> bool
    where
        W: IntoIterator<Item = &'a str>,
        H: IntoIterator<Item = &'a str>,
    {
        // visible set: positive = bottom edge below the header line
        let next_visible = classify(&self.visible, watch, &self.visible_band, geo, 1.0);
        // above set: positive = bottom edge above the header line
        let next_above = classify(&self.above, host_ids, &self.above_band, geo, -1.0);

        let changed = next_visible != self.visible || next_above != self.above;
        if changed {
            self.visible = next_visible;
            self.above = next_above;
        }
        changed
    }

    /// Drop all membership; used on full reloads and filter switches.
    pub fn reset(&mut self) {
        self.visible.clear();
        self.above.clear();
    }
}

fn classify<'a, I>(
    current: &HashSet<String>,
    ids: I,
    band: &Hysteresis,
    geo: &dyn Geometry,
    sign: f64,
) -> HashSet<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut next = HashSet::new();
    for id in ids {
        let member = current.contains(id);
        let keep = match geo.bottom_edge(id) {
            Some(edge) => band.step(member, sign * edge),
            // not laid out this frame: hold the previous classification
            None => member,
        };
        if keep {
            next.insert(id.to_string());
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct FakeGeometry {
        edges: HashMap<String, f64>,
        content_height: f64,
        viewport_height: f64,
        scroll_top: f64,
    }

    impl FakeGeometry {
        fn with_edge(id: &str, edge: f64) -> Self {
            let mut geo = Self::default();
            geo.edges.insert(id.to_string(), edge);
            geo
        }
    }

    impl Geometry for FakeGeometry {
        fn bottom_edge(&self, id: &str) -> Option<f64> {
            self.edges.get(id).copied()
        }
        fn content_height(&self) -> f64 {
            self.content_height
        }
        fn viewport_height(&self) -> f64 {
            self.viewport_height
        }
        fn scroll_top(&self) -> f64 {
            self.scroll_top
        }
    }

    #[test]
    fn test_visible_membership_enter_and_exit() {
        let mut tracker = ViewportTracker::new();

        // bottom edge 10 below the line: inside the enter buffer, not visible
        assert!(!tracker.update(["m1"], [], &FakeGeometry::with_edge("m1", 10.0)));
        assert!(!tracker.visible().contains("m1"));

        // 25 below: past the enter buffer
        assert!(tracker.update(["m1"], [], &FakeGeometry::with_edge("m1", 25.0)));
        assert!(tracker.visible().contains("m1"));

        // rises to 3 above the line: inside the exit buffer, stays visible
        assert!(!tracker.update(["m1"], [], &FakeGeometry::with_edge("m1", -3.0)));
        assert!(tracker.visible().contains("m1"));

        // 8 above the line: past the exit buffer, leaves
        assert!(tracker.update(["m1"], [], &FakeGeometry::with_edge("m1", -8.0)));
        assert!(!tracker.visible().contains("m1"));
    }

    #[test]
    fn test_above_membership_enter_and_exit() {
        let mut tracker = ViewportTracker::new();

        // 30 above the line: under the 50-unit enter threshold
        tracker.update([], ["h1"], &FakeGeometry::with_edge("h1", -30.0));
        assert!(!tracker.above().contains("h1"));

        // 60 above: enters
        tracker.update([], ["h1"], &FakeGeometry::with_edge("h1", -60.0));
        assert!(tracker.above().contains("h1"));

        // back down to 10 below the line: inside the exit threshold, stays
        tracker.update([], ["h1"], &FakeGeometry::with_edge("h1", 10.0));
        assert!(tracker.above().contains("h1"));

        // 25 below the line: leaves
        tracker.update([], ["h1"], &FakeGeometry::with_edge("h1", 25.0));
        assert!(!tracker.above().contains("h1"));
    }

    #[test]
    fn test_hover_inside_buffers_never_flickers() {
        let mut tracker = ViewportTracker::new();
        tracker.update(["m1"], [], &FakeGeometry::with_edge("m1", 30.0));
        assert!(tracker.visible().contains("m1"));

        // cross the line by less than the exit buffer and come back, twice
        for edge in [-4.0, 12.0, -4.9, 3.0] {
            let changed = tracker.update(["m1"], [], &FakeGeometry::with_edge("m1", edge));
            assert!(!changed, "edge {edge} must not toggle membership");
            assert!(tracker.visible().contains("m1"));
        }
    }

    #[test]
    fn test_unlaid_out_message_holds_state() {
        let mut tracker = ViewportTracker::new();
        tracker.update([], ["h1"], &FakeGeometry::with_edge("h1", -60.0));
        assert!(tracker.above().contains("h1"));

        // id still watched but absent from this frame's layout
        let changed = tracker.update([], ["h1"], &FakeGeometry::default());
        assert!(!changed);
        assert!(tracker.above().contains("h1"));
    }

    #[test]
    fn test_unwatched_ids_drop_out() {
        let mut tracker = ViewportTracker::new();
        tracker.update(["m1"], [], &FakeGeometry::with_edge("m1", 30.0));
        assert!(tracker.visible().contains("m1"));

        // watch-list moved on (new overlay candidates)
        let changed = tracker.update(["m2"], [], &FakeGeometry::with_edge("m2", 5.0));
        assert!(changed);
        assert!(tracker.visible().is_empty());
    }

    #[test]
    fn test_distance_from_bottom_clamps() {
        let geo = FakeGeometry {
            content_height: 100.0,
            viewport_height: 40.0,
            scroll_top: 70.0,
            ..Default::default()
        };
        assert_eq!(geo.distance_from_bottom(), 0.0);
    }
}
