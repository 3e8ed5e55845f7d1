pub mod bloom;
pub mod framebuffer;
pub mod rasterizer;
pub mod software;

pub use bloom::{BloomPass, BloomSettings};
pub use framebuffer::FrameBuffer;
pub use rasterizer::Rasterizer;
pub use software::SoftwareRenderer;
