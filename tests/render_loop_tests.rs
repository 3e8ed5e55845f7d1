use glam::Vec3;
use ghost_scene::frame::FrameInfo;
use ghost_scene::input::MousePosition;
use ghost_scene::loaders::{AssetPart, AssetPrimitive, LoadedAsset};
use ghost_scene::scene::{Material, MeshData, PartRole, SceneContext, Transform};
use ghost_scene::{RenderBackend, RenderLoop, SceneBuilder, SceneFlags};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

/// Records every frame it is asked to draw
#[derive(Default)]
struct RecordingBackend {
    frames: Vec<FrameInfo>,
    fail: bool,
}

impl RenderBackend for RecordingBackend {
    fn draw(&mut self, _ctx: &SceneContext, frame: &FrameInfo) -> Result<(), Box<dyn std::error::Error>> {
        self.frames.push(*frame);
        if self.fail {
            return Err("device lost".into());
        }
        Ok(())
    }

    fn resize(&mut self, _width: u32, _height: u32) {}
}

fn ghost_asset() -> LoadedAsset {
    let geometry = Arc::new(MeshData::cube(0.5));
    LoadedAsset::from_parts(
        PartRole::ALL
            .iter()
            .map(|role| AssetPart {
                name: role.node_name().to_string(),
                transform: Transform::default(),
                primitives: vec![AssetPrimitive {
                    geometry: Arc::clone(&geometry),
                    material: Material::default(),
                }],
            })
            .collect(),
    )
}

fn context(flags: SceneFlags, with_ghost: bool) -> SceneContext {
    let mut builder = SceneBuilder::new(flags);
    builder.construct(1.0, &mut StdRng::seed_from_u64(11)).unwrap();
    if with_ghost {
        builder.request_asset().unwrap();
        builder.on_asset_loaded(&ghost_asset()).unwrap();
        builder.decorate().unwrap();
        builder.start().unwrap();
    }
    builder.into_context().unwrap()
}

#[cfg(test)]
mod render_loop_tests {
    use super::*;

    #[test]
    fn test_three_callbacks_once_per_tick_in_order() {
        let mut ctx = context(SceneFlags::default(), false);
        let calls = Rc::new(RefCell::new(Vec::new()));
        for tag in 0..3 {
            let calls = Rc::clone(&calls);
            ctx.animations
                .register(move |time, _| calls.borrow_mut().push((tag, time)));
        }

        let mut render_loop = RenderLoop::new(10.0);
        let mut backend = RecordingBackend::default();
        render_loop
            .tick(&mut ctx, MousePosition::default(), &mut backend)
            .unwrap();
        render_loop
            .tick(&mut ctx, MousePosition::default(), &mut backend)
            .unwrap();

        assert_eq!(
            *calls.borrow(),
            [(0, 10.0), (1, 10.0), (2, 10.0), (0, 20.0), (1, 20.0), (2, 20.0)]
        );
        assert_eq!(backend.frames.len(), 2);
        assert_eq!(backend.frames[1], FrameInfo::new(1, 20.0, 10.0));
    }

    #[test]
    fn test_loop_runs_before_asset_arrives() {
        let mut ctx = context(SceneFlags::default(), false);
        let mut render_loop = RenderLoop::default();
        let mut backend = RecordingBackend::default();

        for _ in 0..5 {
            render_loop
                .tick(&mut ctx, MousePosition::new(1.0, 1.0), &mut backend)
                .unwrap();
        }
        assert_eq!(render_loop.frame_number(), 5);
        assert!(ctx.ghost_group.is_none());
    }

    #[test]
    fn test_mouse_tilts_ghost_and_eyes() {
        let mut ctx = context(SceneFlags::default(), true);
        let mut render_loop = RenderLoop::default();
        render_loop.advance(&mut ctx, MousePosition::new(1.0, -0.5));

        let ghost = ctx.graph.node(ctx.ghost_group.unwrap()).transform.rotation;
        assert!((ghost.y - 0.35).abs() < 1e-6);
        assert!((ghost.z + 0.175).abs() < 1e-6);

        for eye in ctx.eyes().unwrap() {
            let rotation = ctx.graph.node(eye).transform.rotation;
            assert!((rotation.y - 0.5).abs() < 1e-6);
            assert!((rotation.x - 0.25).abs() < 1e-6);
        }
    }

    #[test]
    fn test_camera_fixed_with_orbit_controls() {
        let mut ctx = context(SceneFlags::default(), false);
        let before = ctx.camera.position;
        RenderLoop::default().advance(&mut ctx, MousePosition::new(0.8, 0.8));
        assert_eq!(ctx.camera.position, before);
    }

    #[test]
    fn test_camera_drifts_without_orbit_controls() {
        let flags = SceneFlags {
            orbit_controls: false,
            ..SceneFlags::default()
        };
        let mut ctx = context(flags, false);
        RenderLoop::default().advance(&mut ctx, MousePosition::new(1.0, 1.0));

        assert!((ctx.camera.position.z + 0.5).abs() < 1e-6);
        assert!((ctx.camera.position.y - 2.07).abs() < 1e-6);
        assert_eq!(ctx.camera.position.x, 4.12);
    }

    #[test]
    fn test_particles_move_inside_range() {
        let mut ctx = context(SceneFlags::default(), false);
        let mut render_loop = RenderLoop::default();

        for _ in 0..120 {
            render_loop.advance(&mut ctx, MousePosition::default());
            let particles = ctx.particles.as_ref().unwrap();
            for particle in particles.particles() {
                let position = ctx.graph.node(particle.light).transform.position;
                for (value, motion) in position.to_array().into_iter().zip(particle.motion) {
                    assert!(value.abs() <= motion.position_range + 1e-5);
                }
            }
        }
        let first = ctx.particles.as_ref().unwrap().particles()[0].light;
        assert_ne!(ctx.graph.node(first).transform.position, Vec3::ZERO);
    }

    #[test]
    fn test_backend_error_returned_after_update() {
        let mut ctx = context(SceneFlags::default(), true);
        let mut render_loop = RenderLoop::default();
        let mut backend = RecordingBackend {
            fail: true,
            ..Default::default()
        };

        let err = render_loop
            .tick(&mut ctx, MousePosition::default(), &mut backend)
            .unwrap_err();
        assert_eq!(err.to_string(), "device lost");
        assert_eq!(render_loop.frame_number(), 1);

        backend.fail = false;
        let frame = render_loop
            .tick(&mut ctx, MousePosition::default(), &mut backend)
            .unwrap();
        assert_eq!(frame.number, 1);
    }

    #[test]
    fn test_ghost_breathes_over_time() {
        let mut ctx = context(SceneFlags::default(), true);
        let ghost = ctx.ghost_group.unwrap();
        let mut render_loop = RenderLoop::default();

        let mut heights = Vec::new();
        for _ in 0..60 {
            render_loop.advance(&mut ctx, MousePosition::default());
            heights.push(ctx.graph.node(ghost).transform.position.y);
        }
        assert!(heights.iter().all(|y| (-0.55..=-0.5).contains(y)));
        assert!(heights.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn test_front_heart_stays_put() {
        let mut ctx = context(SceneFlags::default(), true);
        let heart = ctx.graph.find_by_name("Heart").unwrap();
        let before = ctx.graph.node(heart).transform;
        let mut render_loop = RenderLoop::default();

        for _ in 0..30 {
            render_loop.advance(&mut ctx, MousePosition::new(0.4, -0.6));
        }

        let after = ctx.graph.node(heart).transform;
        assert_eq!(after, before);
        assert_eq!(after.position, Vec3::new(1.4, 0.05, 0.25));
    }

    #[test]
    fn test_zero_step_still_advances() {
        let mut ctx = context(SceneFlags::default(), false);
        let mut render_loop = RenderLoop::new(0.0);

        let first = render_loop.advance(&mut ctx, MousePosition::default());
        let second = render_loop.advance(&mut ctx, MousePosition::default());
        assert!(first.time > 0.0);
        assert!(second.time > first.time);
    }
}
