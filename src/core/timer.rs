/// Small timing helpers shared by the controller and the overlay
use std::cell::Cell;
use std::rc::Rc;

/// One-shot cancellation flag shared between the controller and a scheduled tick.
///
/// A tick holds its own clone, so it still sees the raised flag after the controller has
/// moved on to a newer signal or a new session.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    raised: Rc<Cell<bool>>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.raised.set(true);
    }

    pub fn is_raised(&self) -> bool {
        self.raised.get()
    }

    /// True when both handles refer to the same flag
    pub fn same_as(&self, other: &StopSignal) -> bool {
        Rc::ptr_eq(&self.raised, &other.raised)
    }
}

/// Hold-then-fade opacity curve anchored at the time a value was last edited
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeWindow {
    pub hold: f64,
    pub fade: f64,
}

impl FadeWindow {
    pub const READOUT: FadeWindow = FadeWindow {
        hold: 1.0,
        fade: 0.5,
    };

    /// Opacity in [0, 1] at `now` for an edit made at `since`
    pub fn alpha(&self, now: f64, since: f64) -> f32 {
        let elapsed = (now - since).max(0.0);
        if elapsed <= self.hold {
            1.0
        } else if self.fade <= 0.0 || elapsed >= self.hold + self.fade {
            0.0
        } else {
            (1.0 - (elapsed - self.hold) / self.fade) as f32
        }
    }

    pub fn is_visible(&self, now: f64, since: f64) -> bool {
        self.alpha(now, since) > 0.0
    }
}

/// Tracks how long an input has been held down
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HoldTimer {
    pressed_at: Option<f64>,
}

impl HoldTimer {
    pub fn press(&mut self, now: f64) {
        self.pressed_at = Some(now);
    }

    /// Release and report how long the input was held
    pub fn release(&mut self, now: f64) -> Option<f64> {
        self.pressed_at.take().map(|t| (now - t).max(0.0))
    }

    pub fn is_held(&self) -> bool {
        self.pressed_at.is_some()
    }

    pub fn held_for(&self, now: f64) -> Option<f64> {
        self.pressed_at.map(|t| (now - t).max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_signal_is_shared() {
        let signal = StopSignal::new();
        let pinned = signal.clone();
        assert!(!pinned.is_raised());
        signal.raise();
        assert!(pinned.is_raised());
        assert!(pinned.same_as(&signal));
        assert!(!StopSignal::new().same_as(&signal));
    }

    #[test]
    fn fade_window_holds_then_fades() {
        let window = FadeWindow::READOUT;
        assert_eq!(window.alpha(10.5, 10.0), 1.0);
        assert_eq!(window.alpha(11.0, 10.0), 1.0);
        assert!((window.alpha(11.25, 10.0) - 0.5).abs() < 1e-6);
        assert_eq!(window.alpha(11.5, 10.0), 0.0);
        assert!(!window.is_visible(12.0, 10.0));
    }

    #[test]
    fn hold_timer_measures_press() {
        let mut timer = HoldTimer::default();
        assert_eq!(timer.release(1.0), None);
        timer.press(2.0);
        assert!(timer.is_held());
        assert_eq!(timer.held_for(2.5), Some(0.5));
        assert_eq!(timer.release(3.25), Some(1.25));
        assert!(!timer.is_held());
    }
}
