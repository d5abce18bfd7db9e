//! Normalized pointer signal with decay back to neutral.
//!
//! Mouse and single-touch positions are folded into one `[-1, 1]²` signal
//! with the origin at the window center and y pointing up. After
//! [`DECAY_TIMEOUT`] without movement the signal snaps back to neutral; the
//! deadline lives in a single slot, so each new event replaces any pending
//! reset rather than stacking timers. The deadline is checked from the tick
//! via [`PointerSignal::poll`].

use std::time::{Duration, Instant};

use glam::Vec2;
use winit::event::TouchPhase;

use crate::viewport::Viewport;

/// Inactivity window after which the signal returns to neutral.
pub const DECAY_TIMEOUT: Duration = Duration::from_millis(1000);

/// Latest normalized pointer position plus the pending decay deadline.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerSignal {
    position: Vec2,
    deadline: Option<Instant>,
    active_touch: Option<u64>,
}

impl PointerSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current normalized position; exactly `(0, 0)` when decayed.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Record a cursor position in physical window pixels.
    pub fn on_cursor_moved(&mut self, x: f64, y: f64, viewport: &Viewport, now: Instant) {
        self.record(x, y, viewport, now);
    }

    /// Record a touch contact. Only the first active contact drives the
    /// signal; additional fingers are ignored until it lifts.
    pub fn on_touch(
        &mut self,
        id: u64,
        phase: TouchPhase,
        x: f64,
        y: f64,
        viewport: &Viewport,
        now: Instant,
    ) {
        match phase {
            TouchPhase::Started | TouchPhase::Moved => {
                if self.active_touch.is_none() {
                    self.active_touch = Some(id);
                }
                if self.active_touch == Some(id) {
                    self.record(x, y, viewport, now);
                }
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                if self.active_touch == Some(id) {
                    self.active_touch = None;
                }
            }
        }
    }

    /// Apply the decay deadline; call once per tick.
    pub fn poll(&mut self, now: Instant) {
        if let Some(deadline) = self.deadline {
            if now >= deadline {
                self.position = Vec2::ZERO;
                self.deadline = None;
            }
        }
    }

    fn record(&mut self, x: f64, y: f64, viewport: &Viewport, now: Instant) {
        let width = viewport.width() as f64;
        let height = viewport.height() as f64;
        self.position = Vec2::new(
            ((x / width) * 2.0 - 1.0) as f32,
            (-(y / height) * 2.0 + 1.0) as f32,
        );
        self.deadline = Some(now + DECAY_TIMEOUT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(1920, 1080, 1.0)
    }

    #[test]
    fn cursor_is_normalized_to_centered_range() {
        let now = Instant::now();
        let mut signal = PointerSignal::new();

        signal.on_cursor_moved(0.0, 0.0, &viewport(), now);
        assert_eq!(signal.position(), Vec2::new(-1.0, 1.0));

        signal.on_cursor_moved(1920.0, 1080.0, &viewport(), now);
        assert_eq!(signal.position(), Vec2::new(1.0, -1.0));

        signal.on_cursor_moved(960.0, 540.0, &viewport(), now);
        assert_eq!(signal.position(), Vec2::ZERO);
    }

    #[test]
    fn on_screen_positions_stay_in_range() {
        let now = Instant::now();
        let mut signal = PointerSignal::new();
        for (x, y) in [(0.0, 0.0), (123.0, 987.0), (1919.0, 1.0), (1920.0, 1080.0)] {
            signal.on_cursor_moved(x, y, &viewport(), now);
            let p = signal.position();
            assert!((-1.0..=1.0).contains(&p.x));
            assert!((-1.0..=1.0).contains(&p.y));
        }
    }

    #[test]
    fn signal_decays_to_neutral_after_timeout() {
        let now = Instant::now();
        let mut signal = PointerSignal::new();
        signal.on_cursor_moved(100.0, 100.0, &viewport(), now);
        assert_ne!(signal.position(), Vec2::ZERO);

        signal.poll(now + DECAY_TIMEOUT - Duration::from_millis(1));
        assert_ne!(signal.position(), Vec2::ZERO);

        signal.poll(now + DECAY_TIMEOUT);
        assert_eq!(signal.position(), Vec2::ZERO);
    }

    #[test]
    fn new_event_restarts_the_decay_window() {
        let now = Instant::now();
        let mut signal = PointerSignal::new();
        signal.on_cursor_moved(100.0, 100.0, &viewport(), now);

        let later = now + Duration::from_millis(800);
        signal.on_cursor_moved(200.0, 200.0, &viewport(), later);

        // The first deadline has passed but was replaced.
        signal.poll(now + DECAY_TIMEOUT);
        assert_ne!(signal.position(), Vec2::ZERO);

        signal.poll(later + DECAY_TIMEOUT);
        assert_eq!(signal.position(), Vec2::ZERO);
    }

    #[test]
    fn second_touch_contact_is_ignored() {
        let now = Instant::now();
        let mut signal = PointerSignal::new();

        signal.on_touch(7, TouchPhase::Started, 960.0, 540.0, &viewport(), now);
        let first = signal.position();

        signal.on_touch(8, TouchPhase::Moved, 0.0, 0.0, &viewport(), now);
        assert_eq!(signal.position(), first);

        // Once the first contact lifts, a new contact takes over.
        signal.on_touch(7, TouchPhase::Ended, 960.0, 540.0, &viewport(), now);
        signal.on_touch(8, TouchPhase::Moved, 0.0, 0.0, &viewport(), now);
        assert_eq!(signal.position(), Vec2::new(-1.0, 1.0));
    }
}
