// cli.rs - Command-line interface configuration
use clap::Parser;
use std::path::PathBuf;

use crate::config::{AppConfig, SceneFlags};
use crate::core::clock::DEFAULT_TIME_STEP;

#[derive(Parser, Debug, Clone)]
#[command(name = "ghost-scene")]
#[command(about = "Animated ghost scene", long_about = None)]
pub struct Cli {
    /// glTF asset with Body, eyeLeft, eyeRight and Heart nodes
    #[arg(long, env = "GHOST_MODEL", default_value = "public/Ghost.gltf")]
    pub model: PathBuf,

    /// Draw the ground grid and axes
    #[arg(long = "debug-helpers", default_value = "false")]
    pub debug_helpers: bool,

    /// Skip the drifting particle lights
    #[arg(long = "no-particles", default_value = "false")]
    pub no_particles: bool,

    /// Let the mouse drift the camera
    #[arg(long = "no-orbit-controls", default_value = "false")]
    pub no_orbit_controls: bool,

    #[arg(long = "no-bloom", default_value = "false")]
    pub no_bloom: bool,

    /// Animation time added per frame
    #[arg(long = "time-step", default_value_t = DEFAULT_TIME_STEP)]
    pub time_step: f32,
}

impl Cli {
    pub fn into_config(self) -> AppConfig {
        AppConfig {
            model_path: self.model,
            time_step: self.time_step,
            flags: SceneFlags {
                debug_helpers: self.debug_helpers,
                particles: !self.no_particles,
                orbit_controls: !self.no_orbit_controls,
                bloom: !self.no_bloom,
            },
        }
    }
}
