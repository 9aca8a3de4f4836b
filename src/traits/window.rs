use crate::error::Result;

/// Viewport region the navigator draws into and captures the cursor from
pub trait ViewportWindow {
    /// Request the region to redraw
    fn request_redraw(&mut self);

    /// Region size in physical pixels
    fn region_size(&self) -> (u32, u32);

    /// Move the cursor to region coordinates (origin top-left, y down)
    fn warp_cursor(&mut self, x: f32, y: f32) -> Result<()>;

    /// Set cursor visibility
    fn set_cursor_visible(&mut self, visible: bool);

    /// Register the overlay draw callback
    fn attach_overlay(&mut self) -> Result<()>;

    /// Release the overlay draw callback
    fn detach_overlay(&mut self);
}
