//! Scripted sessions: timestamped input events replayed against a [`SandboxHost`].

use std::fs;
use std::path::Path;

use glam::{Quat, Vec3};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::core::clock::{Clock, ManualClock};
use crate::core::controller::{InputEvent, InputKind, Modifiers};
use crate::core::navigator::{Navigator, Response};
use crate::core::timer::StopSignal;
use crate::core::view::{capture_pose, CameraPose};
use crate::error::{NavError, Result};
use crate::math::{reset_roll, AABB};
use crate::prefs::Preferences;
use crate::sandbox::SandboxHost;
use crate::scene_state::SceneState;
use crate::traits::ViewState;

/// Starting viewport of a script
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptView {
    pub eye: Vec3,
    pub look_at: Vec3,
    pub distance: f32,
    pub lens: f32,
}

impl Default for ScriptView {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, -10.0, 2.0),
            look_at: Vec3::new(0.0, 0.0, 2.0),
            distance: 10.0,
            lens: 50.0,
        }
    }
}

impl ScriptView {
    pub fn to_view_state(&self) -> ViewState {
        let forward = (self.look_at - self.eye).normalize_or(Vec3::Y);
        let rotation = reset_roll(Quat::IDENTITY, forward);
        ViewState {
            pivot: self.eye + forward * self.distance,
            rotation,
            distance: self.distance,
            lens: self.lens,
            perspective: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReplayStep {
    /// Seconds from the start of the replay
    pub at: f64,
    pub event: InputKind,
    #[serde(default)]
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayScript {
    pub scene: Vec<AABB>,
    pub view: ScriptView,
    pub steps: Vec<ReplayStep>,
}

impl ReplayScript {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| NavError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReplayReport {
    pub final_pose: CameraPose,
    pub events: usize,
    pub ticks: usize,
    pub pose_changes: usize,
    pub sessions: usize,
    pub prefs: Preferences,
    pub scene: SceneState,
}

struct PendingTick {
    signal: StopSignal,
    due: f64,
}

struct Replayer {
    clock: ManualClock,
    host: SandboxHost,
    navigator: Navigator<ManualClock>,
    ticks: Vec<PendingTick>,
    seen_schedules: usize,
    tick_count: usize,
}

impl Replayer {
    /// Register timers the host was asked for since the last call
    fn collect_schedules(&mut self) {
        let interval = self
            .host
            .tick_interval
            .map_or(0.001, |interval| interval.as_secs_f64());
        let now = self.clock.now();
        for signal in &self.host.scheduled[self.seen_schedules..] {
            self.ticks.push(PendingTick {
                signal: signal.clone(),
                due: now + interval,
            });
        }
        self.seen_schedules = self.host.scheduled.len();
    }

    /// Run every timer tick due up to `until`
    fn run_ticks(&mut self, until: f64) -> Result<()> {
        while let Some(index) = self.next_due(until) {
            let due = self.ticks[index].due;
            self.clock.set(due);
            let signal = self.ticks[index].signal.clone();
            match self.navigator.tick(&mut self.host, &signal)? {
                Some(interval) => {
                    self.tick_count += 1;
                    self.ticks[index].due = due + interval.as_secs_f64().max(1e-6);
                }
                None => {
                    self.ticks.swap_remove(index);
                }
            }
        }
        Ok(())
    }

    fn next_due(&self, until: f64) -> Option<usize> {
        self.ticks
            .iter()
            .enumerate()
            .filter(|(_, tick)| tick.due <= until)
            .min_by(|a, b| a.1.due.total_cmp(&b.1.due))
            .map(|(index, _)| index)
    }
}

/// Replay `script` and report where the camera ended up
pub fn run_replay(
    script: &ReplayScript,
    prefs: Preferences,
    scene: SceneState,
) -> Result<ReplayReport> {
    let clock = ManualClock::new(0.0);
    let mut host = SandboxHost::new().with_view(script.view.to_view_state());
    host.boxes = script.scene.clone();

    let mut replayer = Replayer {
        navigator: Navigator::with_clock(prefs, scene, clock.clone()),
        clock,
        host,
        ticks: Vec::new(),
        seen_schedules: 0,
        tick_count: 0,
    };

    let mut pose_changes = 0;
    let mut sessions = 0;
    for step in &script.steps {
        replayer.run_ticks(step.at)?;
        replayer.clock.set(step.at);

        let before = capture_pose(&replayer.host);
        let was_running = replayer.navigator.is_running();
        let event = InputEvent::with_modifiers(step.event, step.modifiers);
        let response = replayer.navigator.handle_event(&mut replayer.host, &event)?;
        if !was_running && replayer.navigator.is_running() {
            sessions += 1;
        }
        replayer.collect_schedules();

        let after = capture_pose(&replayer.host);
        if after != before {
            pose_changes += 1;
            info!(
                "t={:.3} {:?}: eye {} lens {:.1}",
                step.at, step.event, after.position, after.lens
            );
        }
        if response == Response::PassThrough {
            debug!("t={:.3} {:?} passed through", step.at, step.event);
        }
    }

    // Let held movement keys finish their last tick window
    if let Some(last) = script.steps.last() {
        replayer.run_ticks(last.at)?;
    }
    replayer.navigator.stop(&mut replayer.host)?;

    let (prefs, scene) = replayer.navigator.into_parts();
    Ok(ReplayReport {
        final_pose: capture_pose(&replayer.host),
        events: script.steps.len(),
        ticks: replayer.tick_count,
        pose_changes,
        sessions,
        prefs,
        scene,
    })
}
