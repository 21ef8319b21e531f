use crate::event::Edge;

/// Second debounce stage behind the interrupt's own debounce window.
///
/// An edge is only accepted when it changes the logical state and the line,
/// read back at processing time, still agrees with it. Anything else is
/// contact bounce that slipped through and is dropped silently.
#[derive(Debug, Clone, Copy)]
pub struct Debouncer {
    pressed: bool,
}

impl Debouncer {
    pub fn new(pressed: bool) -> Self {
        Self { pressed }
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn accept(&mut self, edge: Edge, line_pressed: bool) -> bool {
        if edge.is_press() == self.pressed || edge.is_press() != line_pressed {
            return false;
        }
        self.pressed = edge.is_press();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_alternating_confirmed_edges() {
        let mut d = Debouncer::new(false);
        assert!(d.accept(Edge::Pressed, true));
        assert!(d.is_pressed());
        assert!(d.accept(Edge::Released, false));
        assert!(!d.is_pressed());
    }

    #[test]
    fn drops_repeated_edges() {
        let mut d = Debouncer::new(false);
        assert!(!d.accept(Edge::Released, false));
        assert!(d.accept(Edge::Pressed, true));
        assert!(!d.accept(Edge::Pressed, true));
        assert!(d.is_pressed());
    }

    #[test]
    fn drops_edge_the_line_no_longer_shows() {
        let mut d = Debouncer::new(false);
        // glitch: falling edge, line already back high
        assert!(!d.accept(Edge::Pressed, false));
        assert!(!d.is_pressed());
        // the matching rising edge is then a duplicate as well
        assert!(!d.accept(Edge::Released, false));
    }

    #[test]
    fn starts_from_the_sampled_level() {
        let mut d = Debouncer::new(true);
        assert!(!d.accept(Edge::Pressed, true));
        assert!(d.accept(Edge::Released, false));
    }
}
