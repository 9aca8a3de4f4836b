pub mod bindings;
pub mod clock;
pub mod controller;
pub mod gears;
pub mod input_adapter;
pub mod navigator;
pub mod overlay;
pub mod pivot;
pub mod session;
pub mod state_store;
pub mod timer;
pub mod view;
pub mod warp_guard;
pub mod wasd;

pub use bindings::{
    default_bindings, resolve_action, ActionInput, NavigationAction, NavigationButtonBinding,
    PoseDelta,
};
pub use clock::{Clock, ManualClock, SystemClock};
pub use controller::{
    ButtonSet, InputEvent, InputKind, Key, Modifiers, MouseButton, Trigger, WheelDirection,
};
pub use input_adapter::WinitTranslator;
pub use navigator::{Navigator, Response};
pub use overlay::{paint, CrosshairMode, OverlayFrame, Readout};
pub use pivot::{BackfacePolicy, PivotRaycaster, MAX_RAYCAST_ATTEMPTS};
pub use session::{NavigationSession, PivotFeedback};
pub use state_store::{CameraStateStore, StoreOutcome, DOUBLE_PRESS_WINDOW, SLOT_COUNT};
pub use timer::{FadeWindow, StopSignal};
pub use view::{apply_pose, capture_pose, decompose_pose, restore_pose, CameraPose};
pub use wasd::WASD_TICK_INTERVAL;
