use std::path::PathBuf;

use crate::core::clock::DEFAULT_TIME_STEP;

/// Feature switches for scene construction and the per-frame loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneFlags {
    pub debug_helpers: bool,
    pub particles: bool,
    /// While on, the mouse does not move the camera
    pub orbit_controls: bool,
    pub bloom: bool,
}

impl Default for SceneFlags {
    fn default() -> Self {
        Self {
            debug_helpers: false,
            particles: true,
            orbit_controls: true,
            bloom: true,
        }
    }
}

/// Everything the application shell needs to start
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub model_path: PathBuf,
    pub time_step: f32,
    pub flags: SceneFlags,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("public/Ghost.gltf"),
            time_step: DEFAULT_TIME_STEP,
            flags: SceneFlags::default(),
        }
    }
}
