/// Logical edge reported by the button line (already mapped from the
/// electrical edge, pressed = pulled low).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Pressed,
    Released,
}

impl Edge {
    pub fn is_press(self) -> bool {
        matches!(self, Edge::Pressed)
    }
}

/// Input to the press classifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ButtonEvent {
    PressStarted,
    /// Held-duration sample in seconds from the hold timer.
    HeldTick(f64),
    Released,
}
