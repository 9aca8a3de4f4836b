use super::controller::{ButtonSet, Modifiers};
use super::timer::{HoldTimer, StopSignal};
use super::warp_guard::WarpGuard;
use super::wasd::{WasdKeys, WasdRamp};
use crate::prefs::{ActivationMode, Preferences};

/// Outcome of the last pivot relocation, shown on the crosshair while the key is held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PivotFeedback {
    #[default]
    None,
    Success,
    Failure,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PivotStatus {
    pub key: HoldTimer,
    pub feedback: PivotFeedback,
    /// Auto mode was already toggled during this press
    pub locked: bool,
}

/// Times of the most recent edits, for the overlay fade-out
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EditStamps {
    pub sensitivity: Option<f64>,
    pub fov: Option<f64>,
    pub gear: Option<f64>,
    pub auto_pivot: Option<f64>,
    pub state_saved: Option<(u8, f64)>,
    pub state_loaded: Option<(u8, f64)>,
}

/// Transient state of one navigation session, dropped when the session ends
#[derive(Debug, Clone)]
pub struct NavigationSession {
    pub buttons: ButtonSet,
    pub modifiers: Modifiers,
    pub wasd: WasdKeys,
    pub ramp: Option<WasdRamp>,
    /// Signal handed to the host timer while movement keys are held
    pub stop_signal: Option<StopSignal>,
    /// Cursor hidden and captured while any mouse button is down
    pub mouse_mode: bool,
    pub activation_presses: u32,
    pub activation_down: bool,
    pub escape: bool,
    pub warp_guard: WarpGuard,
    pub ignore_motion: u32,
    pub pivot: PivotStatus,
    pub edits: EditStamps,
}

impl Default for NavigationSession {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationSession {
    /// Session opened by pressing the activation trigger
    pub fn new() -> Self {
        Self {
            buttons: ButtonSet::EMPTY,
            modifiers: Modifiers::NONE,
            wasd: WasdKeys::default(),
            ramp: None,
            stop_signal: None,
            mouse_mode: false,
            activation_presses: 1,
            activation_down: true,
            escape: false,
            warp_guard: WarpGuard::default(),
            ignore_motion: 0,
            pivot: PivotStatus::default(),
            edits: EditStamps::default(),
        }
    }

    /// Speed multiplier from the faster/slower modifiers. Faster only applies to travel.
    pub fn modifier_scale(&self, prefs: &Preferences, allow_fast: bool) -> f32 {
        if self.modifiers.faster() {
            if allow_fast {
                prefs.faster_factor
            } else {
                1.0
            }
        } else if self.modifiers.slower() {
            prefs.slower_factor
        } else {
            1.0
        }
    }

    pub fn should_exit(&self, mode: ActivationMode) -> bool {
        self.escape
            || match mode {
                ActivationMode::Toggle => self.activation_presses >= 2,
                ActivationMode::Hold => !self.activation_down && self.buttons.is_empty(),
            }
    }
}
