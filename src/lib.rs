pub mod animation;
pub mod cli;
pub mod config;
pub mod core;
pub mod frame;
pub mod input;
pub mod loaders;
pub mod math;
pub mod render;
pub mod render_loop;
pub mod scene;
pub mod traits;

pub use config::{AppConfig, SceneFlags};
pub use render_loop::RenderLoop;
pub use scene::{SceneBuilder, SceneContext};
pub use traits::RenderBackend;
