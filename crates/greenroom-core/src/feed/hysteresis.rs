/// Asymmetric threshold latch used for flicker-free set membership.
///
/// `value` is a signed distance past a reference line. Membership turns on
/// only when the value clears `enter`, and turns off only when it falls below
/// `exit`; with `enter > exit` the span between them is a dead band where a
/// hovering measurement cannot toggle the state.
#[derive(Debug, Clone, Copy)]
pub struct Hysteresis {
    pub enter: f64,
    pub exit: f64,
}

impl Hysteresis {
    pub fn new(enter: f64, exit: f64) -> Self {
        debug_assert!(enter > exit, "dead band requires enter > exit");
        Self { enter, exit }
    }

    /// One classification step: current membership + measured value → next
    /// membership.
    pub fn step(&self, member: bool, value: f64) -> bool {
        if member {
            value >= self.exit
        } else {
            value > self.enter
        }
    }
}
