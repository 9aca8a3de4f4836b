pub mod scene;
pub mod timer;
pub mod view;
pub mod window;

pub use scene::*;
pub use timer::*;
pub use view::*;
pub use window::*;

/// Everything the navigator needs from its host application
pub trait NavigationHost: ViewTransform + ViewportWindow + SceneRaycast + TickScheduler {}

impl<T> NavigationHost for T where T: ?Sized + ViewTransform + ViewportWindow + SceneRaycast + TickScheduler {}
