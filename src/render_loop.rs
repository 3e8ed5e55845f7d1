use crate::core::TimeAccumulator;
use crate::frame::FrameInfo;
use crate::input::MousePosition;
use crate::scene::SceneContext;
use crate::traits::RenderBackend;

/// Ghost group tilt per unit of mouse
pub const GHOST_TILT: f32 = 0.35;
/// Eye turn per unit of mouse
pub const EYE_TURN: f32 = 0.5;
pub const CAMERA_DRIFT_X: f32 = -0.5;
pub const CAMERA_DRIFT_Y: f32 = 0.5;
pub const CAMERA_BASE_HEIGHT: f32 = 1.57;

/// Per-frame driver: advances time, runs animations, follows the mouse
#[derive(Debug, Clone)]
pub struct RenderLoop {
    time: TimeAccumulator,
    frame_number: u64,
}

impl RenderLoop {
    pub fn new(time_step: f32) -> Self {
        Self {
            time: TimeAccumulator::new(time_step),
            frame_number: 0,
        }
    }

    pub fn time(&self) -> f32 {
        self.time.time()
    }

    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    /// Advances one frame and updates the scene, without drawing
    pub fn advance(&mut self, ctx: &mut SceneContext, mouse: MousePosition) -> FrameInfo {
        let time = self.time.advance();
        let frame = FrameInfo::new(self.frame_number, time, self.time.step());
        self.frame_number += 1;

        ctx.animations.invoke_all(time, &mut ctx.graph);

        if let Some(particles) = &ctx.particles {
            particles.animate(time, &mut ctx.graph);
        }

        if let Some(ghost) = ctx.ghost_group {
            let rotation = &mut ctx.graph.transform_mut(ghost).rotation;
            rotation.y = mouse.x * GHOST_TILT;
            rotation.z = mouse.y * GHOST_TILT;
        }

        if let Some(eyes) = ctx.eyes() {
            for eye in eyes {
                let rotation = &mut ctx.graph.transform_mut(eye).rotation;
                rotation.y = mouse.x * EYE_TURN;
                rotation.x = mouse.y * -EYE_TURN;
            }
        }

        if !ctx.flags.orbit_controls {
            ctx.camera.position.z = mouse.x * CAMERA_DRIFT_X;
            ctx.camera.position.y = CAMERA_BASE_HEIGHT + mouse.y * CAMERA_DRIFT_Y;
        }

        frame
    }

    /// One full frame: [`advance`](Self::advance), then draw
    ///
    /// A backend error is returned after the scene update has happened, so
    /// the next tick carries on from the advanced time.
    pub fn tick<B: RenderBackend + ?Sized>(
        &mut self,
        ctx: &mut SceneContext,
        mouse: MousePosition,
        backend: &mut B,
    ) -> Result<FrameInfo, Box<dyn std::error::Error>> {
        let frame = self.advance(ctx, mouse);
        backend.draw(ctx, &frame)?;
        Ok(frame)
    }
}

impl Default for RenderLoop {
    fn default() -> Self {
        Self::new(crate::core::DEFAULT_TIME_STEP)
    }
}
