//! The navigation controller.
//!
//! A `Navigator` is idle until the activation trigger is pressed. While a session runs it
//! consumes every input event from the host, turns mouse motion into camera moves through
//! the configured button bindings, drives WASD travel from host timer ticks and handles
//! the one-shot gestures (pivot relocation, roll reset, gears, camera states, wheel nudges).

use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

use glam::{Vec2, Vec3};
use log::{debug, trace, warn};

use super::bindings::{resolve_action, ActionInput, NavigationAction};
use super::clock::{Clock, SystemClock};
use super::controller::{InputEvent, InputKind, Key, MouseButton, WheelDirection};
use super::gears::cycle_gear;
use super::overlay::{CrosshairMode, OverlayFrame, Readout};
use super::pivot::PivotRaycaster;
use super::session::{NavigationSession, PivotFeedback};
use super::state_store::StoreOutcome;
use super::timer::{FadeWindow, StopSignal};
use super::view::{apply_pose, capture_pose, current_lens, decompose_pose, restore_pose, set_lens};
use super::warp_guard::{needs_recenter, region_center};
use super::wasd::{WasdRamp, WASD_TICK_INTERVAL};
use crate::error::Result;
use crate::math::{
    focal_length_to_fov, fov_to_focal_length, nudge_by, reset_roll, scale_delta, sensor_extent,
    translate, FovAxis, FOCAL_LENGTH_TABLE, FOV_TABLE, STRAFE_SENSITIVITY_TABLE,
};
use crate::prefs::{FovMode, Preferences};
use crate::scene_state::SceneState;
use crate::traits::{NavigationHost, ViewState, ViewTransform, ViewportWindow};

/// Seconds the pivot key must be held for its release to toggle auto relocation
pub const PIVOT_TOGGLE_HOLD: f64 = 1.0;

/// Focal length at which the alternate modifier turns at its base rate
const ALTERNATE_TURN_LENS: f32 = 50.0;
const ALTERNATE_TURN_SCALE: f32 = 0.25;

/// Notches per wheel tick while the faster modifier is held
const FAST_NUDGE_NOTCHES: i32 = 5;

/// What the host should do with an event after the navigator saw it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    /// Consumed
    Handled,
    /// Not used by navigation; let the host process it
    PassThrough,
    /// Consumed, and the session ended
    Finished,
}

pub struct Navigator<C: Clock = SystemClock> {
    prefs: Preferences,
    scene: SceneState,
    clock: C,
    session: Option<NavigationSession>,
}

impl Navigator<SystemClock> {
    pub fn new(prefs: Preferences, scene: SceneState) -> Self {
        Self::with_clock(prefs, scene, SystemClock::new())
    }
}

impl<C: Clock> Navigator<C> {
    pub fn with_clock(prefs: Preferences, scene: SceneState, clock: C) -> Self {
        Self {
            prefs,
            scene,
            clock,
            session: None,
        }
    }

    pub fn prefs(&self) -> &Preferences {
        &self.prefs
    }

    /// Preferences apply from the next event on
    pub fn set_prefs(&mut self, prefs: Preferences) {
        self.prefs = prefs.validated();
    }

    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut SceneState {
        &mut self.scene
    }

    /// Preferences and scene state as left by the session, for writing back
    pub fn into_parts(self) -> (Preferences, SceneState) {
        (self.prefs, self.scene)
    }

    pub fn session(&self) -> Option<&NavigationSession> {
        self.session.as_ref()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn is_running(&self) -> bool {
        self.session.is_some()
    }

    /// Open a session. Does nothing and returns `false` while one is already running.
    pub fn start<H: NavigationHost + ?Sized>(&mut self, host: &mut H) -> Result<bool> {
        if self.session.is_some() {
            return Ok(false);
        }

        host.attach_overlay()?;
        self.session = Some(NavigationSession::new());
        host.request_redraw();
        debug!("navigation session started");
        Ok(true)
    }

    /// End the running session, if any
    pub fn stop<H: NavigationHost + ?Sized>(&mut self, host: &mut H) -> Result<()> {
        self.guarded(host, |nav, host| nav.teardown(host, true))
    }

    /// Feed one input event
    pub fn handle_event<H: NavigationHost + ?Sized>(
        &mut self,
        host: &mut H,
        event: &InputEvent,
    ) -> Result<Response> {
        if self.session.is_none() {
            if event.presses(self.prefs.keys.activation) {
                self.start(host)?;
                return Ok(Response::Handled);
            }
            return Ok(Response::PassThrough);
        }

        self.guarded(host, |nav, host| {
            let response = nav.dispatch(host, event)?;
            let exit = nav
                .session
                .as_ref()
                .is_some_and(|s| s.should_exit(nav.prefs.activation_mode));
            if exit {
                nav.teardown(host, true)?;
                return Ok(Response::Finished);
            }
            Ok(response)
        })
    }

    /// Timer callback for WASD travel. Returns the delay until the next tick, or `None`
    /// once `stop` is raised or belongs to a session that is gone.
    pub fn tick<H: NavigationHost + ?Sized>(
        &mut self,
        host: &mut H,
        stop: &StopSignal,
    ) -> Result<Option<Duration>> {
        if stop.is_raised() {
            return Ok(None);
        }
        let current = self
            .session
            .as_ref()
            .and_then(|s| s.stop_signal.as_ref())
            .is_some_and(|signal| signal.same_as(stop));
        if !current {
            return Ok(None);
        }

        self.guarded(host, |nav, host| nav.wasd_step(host))?;
        Ok(Some(WASD_TICK_INTERVAL))
    }

    /// Feedback to draw for the current state. Requests another redraw while animating.
    pub fn overlay<H: ViewTransform + ViewportWindow + ?Sized>(&self, host: &mut H) -> OverlayFrame {
        let Some(session) = self.session.as_ref() else {
            return OverlayFrame::default();
        };
        let now = self.clock.now();
        let window = FadeWindow::READOUT;

        let saved = session
            .edits
            .state_saved
            .filter(|(_, since)| window.is_visible(now, *since));
        let loaded = session
            .edits
            .state_loaded
            .filter(|(_, since)| window.is_visible(now, *since));

        let pivot_hold = session.pivot.key.held_for(now);
        let crosshair = self.prefs.show_crosshair.then(|| match pivot_hold {
            Some(held) if held >= PIVOT_TOGGLE_HOLD && !session.pivot.locked => {
                CrosshairMode::PivotPending
            }
            Some(_) if session.pivot.feedback == PivotFeedback::Success => {
                CrosshairMode::PivotSuccess
            }
            Some(_) if session.pivot.feedback == PivotFeedback::Failure => {
                CrosshairMode::PivotFailure
            }
            _ if loaded.is_some() => CrosshairMode::StateLoaded,
            _ if saved.is_some() => CrosshairMode::StateSaved,
            _ if session.mouse_mode => CrosshairMode::MouseActive,
            _ => CrosshairMode::Idle,
        });

        let lens = current_lens(host);
        let fov_text = match self.prefs.fov_mode {
            FovMode::FocalLength => format!("{lens:.1} mm"),
            FovMode::HorizontalFov | FovMode::VerticalFov => {
                let extent = self.fov_extent(host);
                format!("{:.1}°", focal_length_to_fov(lens as f64, extent))
            }
        };

        let readouts: Vec<Readout> = [
            Readout::fading(
                "Strafe sensitivity",
                format!("{:.2}", self.scene.strafe_sensitivity(&self.prefs)),
                window,
                now,
                session.edits.sensitivity,
            ),
            Readout::fading("FOV", fov_text, window, now, session.edits.fov),
            Readout::fading(
                "Gear",
                format!("x{}", self.scene.gear),
                window,
                now,
                session.edits.gear,
            ),
            Readout::fading(
                "Auto pivot",
                String::from(if self.scene.auto_pivot(&self.prefs) { "on" } else { "off" }),
                window,
                now,
                session.edits.auto_pivot,
            ),
            saved.and_then(|(slot, since)| {
                Readout::fading("Camera state", format!("{slot} saved"), window, now, Some(since))
            }),
            loaded.and_then(|(slot, since)| {
                Readout::fading("Camera state", format!("{slot} loaded"), window, now, Some(since))
            }),
        ]
        .into_iter()
        .flatten()
        .collect();

        let needs_redraw = !readouts.is_empty() || pivot_hold.is_some() || saved.is_some();
        if needs_redraw {
            host.request_redraw();
        }

        OverlayFrame {
            crosshair,
            readouts,
            needs_redraw,
        }
    }

    /// Run `work`, tearing the session down if it fails or panics
    fn guarded<H, T, F>(&mut self, host: &mut H, work: F) -> Result<T>
    where
        H: NavigationHost + ?Sized,
        F: FnOnce(&mut Self, &mut H) -> Result<T>,
    {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| work(&mut *self, &mut *host)));
        match outcome {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => {
                warn!("navigation aborted: {err}");
                self.abort(host);
                Err(err)
            }
            Err(payload) => {
                warn!("navigation panicked, restoring viewport");
                self.abort(host);
                panic::resume_unwind(payload)
            }
        }
    }

    /// Best-effort teardown after a failure; secondary errors are only logged
    fn abort<H: NavigationHost + ?Sized>(&mut self, host: &mut H) {
        if let Err(err) = self.teardown(host, false) {
            warn!("teardown after failure also failed: {err}");
        }
    }

    fn teardown<H: NavigationHost + ?Sized>(&mut self, host: &mut H, finish: bool) -> Result<()> {
        let Some(mut session) = self.session.take() else {
            return Ok(());
        };
        let mut first_error = None;

        if session.mouse_mode {
            let center = region_center(host.region_size());
            if let Err(err) = host.warp_cursor(center.x, center.y) {
                first_error.get_or_insert(err);
            }
        }
        host.set_cursor_visible(true);

        if let Some(signal) = session.stop_signal.take() {
            signal.raise();
        }

        if finish && self.scene.auto_pivot(&self.prefs) {
            if let Err(err) = self.relocate_pivot(host) {
                first_error.get_or_insert(err);
            }
        }

        self.scene.camera_states.flush(self.clock.now());
        host.detach_overlay();
        host.request_redraw();
        debug!("navigation session ended");

        first_error.map_or(Ok(()), Err)
    }

    fn dispatch<H: NavigationHost + ?Sized>(
        &mut self,
        host: &mut H,
        event: &InputEvent,
    ) -> Result<Response> {
        let activation = self.prefs.keys.activation;
        let Some(session) = self.session.as_mut() else {
            return Ok(Response::PassThrough);
        };
        session.modifiers = event.modifiers;

        if event.presses(activation) {
            session.activation_presses += 1;
            session.activation_down = true;
            return Ok(Response::Handled);
        }
        if event.releases(activation) {
            session.activation_down = false;
            return Ok(Response::Handled);
        }

        match event.kind {
            InputKind::ButtonDown { button } => self.button_down(host, button),
            InputKind::ButtonUp { button } => self.button_up(host, button),
            InputKind::Motion { x, y, dx, dy } => {
                self.motion(host, Vec2::new(x, y), Vec2::new(dx, dy))
            }
            InputKind::Wheel { direction } => self.wheel(host, direction),
            InputKind::KeyDown { key } => self.key_down(host, key),
            InputKind::KeyUp { key } => self.key_up(host, key),
        }
    }

    fn button_down<H: NavigationHost + ?Sized>(
        &mut self,
        host: &mut H,
        button: MouseButton,
    ) -> Result<Response> {
        let ignored = self.prefs.ignored_motion_events;
        let Some(session) = self.session.as_mut() else {
            return Ok(Response::PassThrough);
        };
        session.buttons.insert(button);
        session.ignore_motion = ignored;
        if !session.mouse_mode {
            session.mouse_mode = true;
            session.warp_guard.reset();
            host.set_cursor_visible(false);
            debug!("mouse mode on ({button})");
        }
        host.request_redraw();
        Ok(Response::Handled)
    }

    fn button_up<H: NavigationHost + ?Sized>(
        &mut self,
        host: &mut H,
        button: MouseButton,
    ) -> Result<Response> {
        let Some(session) = self.session.as_mut() else {
            return Ok(Response::PassThrough);
        };
        session.buttons.remove(button);
        if session.buttons.is_empty() && session.mouse_mode {
            session.mouse_mode = false;
            session.warp_guard.reset();
            let center = region_center(host.region_size());
            host.warp_cursor(center.x, center.y)?;
            host.set_cursor_visible(true);
            debug!("mouse mode off");
        }
        host.request_redraw();
        Ok(Response::Handled)
    }

    fn motion<H: NavigationHost + ?Sized>(
        &mut self,
        host: &mut H,
        cursor: Vec2,
        raw_delta: Vec2,
    ) -> Result<Response> {
        let Some(session) = self.session.as_mut() else {
            return Ok(Response::PassThrough);
        };
        if !session.mouse_mode {
            return Ok(Response::Handled);
        }
        if session.ignore_motion > 0 {
            session.ignore_motion -= 1;
            return Ok(Response::Handled);
        }

        let delta = session.warp_guard.filter(raw_delta);
        if let Some(action) = resolve_action(&self.prefs.button_bindings, session.buttons) {
            let input = self.action_input(action, delta, current_lens(host));
            let step = action.pose_delta(&input);
            if !step.is_identity() {
                let (position, orientation, _) = decompose_pose(host);
                let (position, orientation) = step.apply(position, orientation);
                apply_pose(host, position, orientation, false)?;
                trace!("{action:?} by {delta} -> {position}");
                self.follow_surface(host)?;
            }
        }

        let region = host.region_size();
        if needs_recenter(cursor, region) {
            let center = region_center(region);
            host.warp_cursor(center.x, center.y)?;
            if let Some(session) = self.session.as_mut() {
                session.warp_guard.arm(delta, cursor.distance(center));
            }
        }

        host.request_redraw();
        Ok(Response::Handled)
    }

    /// Convert a filtered pixel delta into action inputs for the current modifiers
    fn action_input(&self, action: NavigationAction, delta: Vec2, lens: f32) -> ActionInput {
        let Some(session) = self.session.as_ref() else {
            return ActionInput::default();
        };
        let prefs = &self.prefs;

        let mut strafe_scale = session.modifier_scale(prefs, true) * self.scene.gear;
        let mut turn_scale = session.modifier_scale(prefs, false);
        let mut roll_scale = turn_scale;
        if session.modifiers.alternate() {
            strafe_scale *= prefs.alternate_factor;
            roll_scale *= prefs.alternate_factor;
            turn_scale *=
                ALTERNATE_TURN_SCALE.min(ALTERNATE_TURN_SCALE * ALTERNATE_TURN_LENS / lens.max(1e-3));
        }

        let sensitivity = if session.wasd.any() {
            prefs.wasd_turn_sensitivity
        } else {
            prefs.turn_sensitivity
        };
        let rate = Preferences::turn_rate(sensitivity);
        // Screen y grows downwards
        let pitch_pixels = if prefs.invert_mouse { delta.y } else { -delta.y };

        let mut input = ActionInput {
            turn: Vec2::new(delta.x, pitch_pixels) * rate * turn_scale,
            rappel_turn: delta.x * Preferences::turn_rate(prefs.rappel_sensitivity) * turn_scale,
            roll: delta.x * rate * roll_scale,
            ..ActionInput::default()
        };
        if !action.turns() || action == NavigationAction::TurnXRappel {
            let distance = self.scene.strafe_sensitivity(prefs);
            let potential = prefs.strafe_potential;
            input.strafe = Vec2::new(
                scale_delta(delta.x, distance, potential),
                scale_delta(-delta.y, distance, potential),
            ) * strafe_scale;
        }
        input
    }

    fn wheel<H: NavigationHost + ?Sized>(
        &mut self,
        host: &mut H,
        direction: WheelDirection,
    ) -> Result<Response> {
        let now = self.clock.now();
        let Some(session) = self.session.as_ref() else {
            return Ok(Response::PassThrough);
        };
        let modifiers = session.modifiers;
        let notches = direction.sign() * if modifiers.shift { FAST_NUDGE_NOTCHES } else { 1 };
        let precise = modifiers.ctrl;

        if modifiers.alternate() {
            let lens = current_lens(host) as f64;
            let new_lens = match self.prefs.fov_mode {
                FovMode::FocalLength => nudge_by(lens, notches, precise, &FOCAL_LENGTH_TABLE),
                FovMode::HorizontalFov | FovMode::VerticalFov => {
                    let extent = self.fov_extent(host);
                    let fov = focal_length_to_fov(lens, extent);
                    // Wheel up zooms in, i.e. narrows the field of view
                    let fov = nudge_by(fov, -notches, precise, &FOV_TABLE);
                    fov_to_focal_length(fov, extent)
                }
            };
            set_lens(host, new_lens as f32)?;
            debug!("lens {lens:.3} -> {new_lens:.3}");
            if let Some(session) = self.session.as_mut() {
                session.edits.fov = Some(now);
            }
        } else if session.mouse_mode {
            let current = self.scene.strafe_sensitivity(&self.prefs) as f64;
            let value = nudge_by(current, notches, precise, &STRAFE_SENSITIVITY_TABLE) as f32;
            self.scene.set_strafe_sensitivity(&mut self.prefs, value);
            debug!("strafe sensitivity {current:.3} -> {value:.3}");
            if let Some(session) = self.session.as_mut() {
                session.edits.sensitivity = Some(now);
            }
        } else {
            let distance = self.prefs.wheel_distance
                * session.modifier_scale(&self.prefs, true)
                * self.scene.gear;
            let local = Vec3::new(0.0, 0.0, -distance * direction.sign() as f32);
            let (position, orientation, _) = decompose_pose(host);
            let position = translate(position, orientation, local, Vec3::ZERO);
            apply_pose(host, position, orientation, false)?;
            self.follow_surface(host)?;
        }

        host.request_redraw();
        Ok(Response::Handled)
    }

    fn key_down<H: NavigationHost + ?Sized>(&mut self, host: &mut H, key: Key) -> Result<Response> {
        let now = self.clock.now();
        let keys = self.prefs.keys;
        let Some(session) = self.session.as_mut() else {
            return Ok(Response::PassThrough);
        };
        let alternate = session.modifiers.alternate();

        if key == Key::Escape {
            session.escape = true;
            return Ok(Response::Handled);
        }

        if let Some(direction) = keys.direction_for(key) {
            if !session.wasd.any() {
                session.ramp = Some(WasdRamp::begin(now));
            }
            session.wasd.set(direction, true);
            if session.stop_signal.is_none() {
                let signal = StopSignal::new();
                session.stop_signal = Some(signal.clone());
                host.schedule_ticks(WASD_TICK_INTERVAL, signal);
                trace!("movement ticks scheduled");
            }
            return Ok(Response::Handled);
        }

        if key == keys.relocate_pivot {
            if session.pivot.key.is_held() {
                return Ok(Response::Handled);
            }
            session.pivot.key.press(now);
            session.pivot.locked = false;
            if alternate {
                session.pivot.locked = true;
                self.toggle_auto_pivot(now);
            } else {
                let success = self.relocate_pivot(host)?;
                if let Some(session) = self.session.as_mut() {
                    session.pivot.feedback = if success {
                        PivotFeedback::Success
                    } else {
                        PivotFeedback::Failure
                    };
                }
            }
            host.request_redraw();
            return Ok(Response::Handled);
        }

        if key == keys.reset_roll {
            let (position, orientation, forward) = decompose_pose(host);
            apply_pose(host, position, reset_roll(orientation, forward), false)?;
            host.request_redraw();
            return Ok(Response::Handled);
        }

        if key == keys.gear {
            let forward = !session.modifiers.slower();
            session.edits.gear = Some(now);
            let gear = cycle_gear(&self.prefs.gears, self.scene.gear, forward, self.prefs.gear_wrap);
            debug!("gear {} -> {gear}", self.scene.gear);
            self.scene.gear = gear;
            host.request_redraw();
            return Ok(Response::Handled);
        }

        if let Key::Digit(slot) = key {
            self.camera_state_key(host, slot, alternate, now)?;
            host.request_redraw();
            return Ok(Response::Handled);
        }

        Ok(Response::PassThrough)
    }

    fn key_up<H: NavigationHost + ?Sized>(&mut self, host: &mut H, key: Key) -> Result<Response> {
        let now = self.clock.now();
        let keys = self.prefs.keys;
        let Some(session) = self.session.as_mut() else {
            return Ok(Response::PassThrough);
        };

        if key == Key::Escape {
            return Ok(Response::Handled);
        }

        if let Some(direction) = keys.direction_for(key) {
            session.wasd.set(direction, false);
            if !session.wasd.any() {
                session.ramp = None;
                if let Some(signal) = session.stop_signal.take() {
                    signal.raise();
                    trace!("movement ticks stopped");
                }
            }
            return Ok(Response::Handled);
        }

        if key == keys.relocate_pivot {
            let held = session.pivot.key.release(now);
            let locked = session.pivot.locked;
            session.pivot.feedback = PivotFeedback::None;
            if held.is_some_and(|held| held >= PIVOT_TOGGLE_HOLD) && !locked {
                self.toggle_auto_pivot(now);
            }
            host.request_redraw();
            return Ok(Response::Handled);
        }

        let consumed = key == keys.reset_roll || key == keys.gear || matches!(key, Key::Digit(_));
        Ok(if consumed {
            Response::Handled
        } else {
            Response::PassThrough
        })
    }

    fn camera_state_key<H: NavigationHost + ?Sized>(
        &mut self,
        host: &mut H,
        slot: u8,
        recall: bool,
        now: f64,
    ) -> Result<()> {
        let keep_lens = self.prefs.recall_keeps_lens;
        let loaded = if recall {
            match self.scene.camera_states.recall(slot)? {
                Some(pose) => {
                    restore_pose(host, &pose, keep_lens)?;
                    true
                }
                None => false,
            }
        } else {
            let current = capture_pose(host);
            match self.scene.camera_states.confirm_or_swap(slot, current, now)? {
                StoreOutcome::Pending { slot } => {
                    if let Some(session) = self.session.as_mut() {
                        session.edits.state_saved = Some((slot, now));
                    }
                    false
                }
                StoreOutcome::Applied { pose, .. } => {
                    restore_pose(host, &pose, keep_lens)?;
                    true
                }
            }
        };

        if loaded {
            self.follow_surface(host)?;
            debug!("camera state {slot} loaded");
            if let Some(session) = self.session.as_mut() {
                session.edits.state_loaded = Some((slot, now));
                session.edits.state_saved = None;
            }
        }
        Ok(())
    }

    fn toggle_auto_pivot(&mut self, now: f64) {
        let enabled = !self.scene.auto_pivot(&self.prefs);
        self.scene.auto_pivot = Some(enabled);
        if let Some(session) = self.session.as_mut() {
            session.edits.auto_pivot = Some(now);
        }
        debug!("auto pivot {}", if enabled { "on" } else { "off" });
    }

    /// One WASD timer step
    fn wasd_step<H: NavigationHost + ?Sized>(&mut self, host: &mut H) -> Result<()> {
        let now = self.clock.now();
        let prefs = &self.prefs;
        let gear = self.scene.gear;
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        let Some(ramp) = session.ramp.as_mut() else {
            return Ok(());
        };

        let traveled = ramp.advance(
            now,
            prefs.wasd_top_speed as f64,
            prefs.wasd_accel_time as f64,
        ) as f32;
        let distance = traveled * session.modifier_scale(prefs, true) * gear;
        let local = session.wasd.local_delta(distance, prefs.wasd_normalize_diagonal);
        if local == Vec3::ZERO {
            return Ok(());
        }

        let (position, orientation, _) = decompose_pose(host);
        let position = translate(position, orientation, local, Vec3::ZERO);
        apply_pose(host, position, orientation, false)?;
        self.follow_surface(host)?;
        host.request_redraw();
        Ok(())
    }

    /// Re-run pivot relocation after a camera move when auto mode is on
    fn follow_surface<H: NavigationHost + ?Sized>(&mut self, host: &mut H) -> Result<()> {
        if self.scene.auto_pivot(&self.prefs) {
            let success = self.relocate_pivot(host)?;
            if let Some(session) = self.session.as_mut() {
                if session.pivot.key.is_held() {
                    session.pivot.feedback = if success {
                        PivotFeedback::Success
                    } else {
                        PivotFeedback::Failure
                    };
                }
            }
        }
        Ok(())
    }

    /// Cast along the view and move the pivot onto the surface hit, keeping the eye fixed.
    /// Returns whether a surface was found.
    fn relocate_pivot<H: NavigationHost + ?Sized>(&self, host: &mut H) -> Result<bool> {
        let (eye, orientation, forward) = decompose_pose(host);
        let (clip_start, clip_end) = host.clip_range();
        let caster = PivotRaycaster::new(self.prefs.backface_policy, self.prefs.pivot_dig);
        let culling = host.backface_culling();

        let Some(hit) = caster.cast(
            &*host,
            eye + forward * clip_start,
            forward,
            clip_end - clip_start,
            culling,
        ) else {
            trace!("pivot relocation found no surface");
            return Ok(false);
        };

        let pivot = caster.dig(eye, hit.point);
        let view = host.view();
        host.set_view(ViewState {
            distance: (pivot - eye).length(),
            ..view
        })?;
        apply_pose(host, eye, orientation, true)?;
        trace!("pivot moved to {pivot}");
        Ok(true)
    }

    fn fov_extent<H: ViewTransform + ViewportWindow + ?Sized>(&self, host: &H) -> f64 {
        let (width, height) = host.region_size();
        let aspect = width as f64 / (height.max(1)) as f64;
        let axis = match self.prefs.fov_mode {
            FovMode::VerticalFov => FovAxis::Vertical,
            _ => FovAxis::Horizontal,
        };
        sensor_extent(host.sensor_width() as f64, aspect, axis)
    }
}
