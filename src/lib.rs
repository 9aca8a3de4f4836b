pub mod cli;
pub mod core;
pub mod error;
pub mod math;
pub mod prefs;
pub mod replay;
pub mod sandbox;
pub mod scene_state;
pub mod traits;

pub use crate::core::{InputEvent, Navigator, Response};
pub use error::{NavError, Result};
pub use prefs::Preferences;
pub use scene_state::SceneState;
