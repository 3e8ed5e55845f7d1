use crate::frame::FrameInfo;
use crate::scene::SceneContext;

/// Draws a scene once per frame
pub trait RenderBackend {
    /// Render the current state of `ctx`
    fn draw(&mut self, ctx: &SceneContext, frame: &FrameInfo) -> Result<(), Box<dyn std::error::Error>>;

    /// New output size in pixels; zero sizes are ignored
    fn resize(&mut self, width: u32, height: u32);
}
