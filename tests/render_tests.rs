use glam::Vec3;
use ghost_scene::frame::FrameInfo;
use ghost_scene::input::MousePosition;
use ghost_scene::render::{BloomPass, BloomSettings, FrameBuffer, SoftwareRenderer};
use ghost_scene::{RenderBackend, RenderLoop, SceneBuilder, SceneFlags};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn frame_from(values: &[f32], width: u32) -> FrameBuffer {
    let height = (values.len() as u32).div_ceil(width).max(1);
    let mut target = FrameBuffer::new(width, height);
    target.clear(Vec3::ZERO);
    for (color, &v) in target.colors_mut().iter_mut().zip(values) {
        *color = Vec3::new(v, v * 0.5, 1.0 - v);
    }
    target
}

#[cfg(test)]
mod bloom_tests {
    use super::*;

    proptest! {
        #[test]
        fn prop_zero_strength_is_identity(values in prop::collection::vec(0.0f32..4.0, 1..200)) {
            let mut target = frame_from(&values, 10);
            let before = target.colors().to_vec();
            let settings = BloomSettings { strength: 0.0, ..BloomSettings::default() };
            BloomPass::new().apply(&settings, &mut target);
            prop_assert_eq!(target.colors(), before.as_slice());
        }

        #[test]
        fn prop_bloom_never_darkens(
            values in prop::collection::vec(0.0f32..4.0, 1..200),
            threshold in 0.0f32..1.0,
            strength in 0.0f32..2.0,
            radius in 0.0f32..1.0,
        ) {
            let mut target = frame_from(&values, 10);
            let before = target.colors().to_vec();
            let settings = BloomSettings { threshold, strength, radius };
            BloomPass::new().apply(&settings, &mut target);

            for (after, before) in target.colors().iter().zip(&before) {
                prop_assert!(after.cmpge(*before).all());
            }
        }
    }
}

#[cfg(test)]
mod software_renderer_tests {
    use super::*;

    #[test]
    fn test_headless_frame_size() {
        let mut builder = SceneBuilder::new(SceneFlags::default());
        builder.construct(4.0 / 3.0, &mut StdRng::seed_from_u64(1)).unwrap();
        let ctx = builder.context().unwrap();

        let mut renderer = SoftwareRenderer::headless(64, 48);
        renderer.draw(ctx, &FrameInfo::new(0, 0.0, 0.0)).unwrap();

        assert_eq!(renderer.pixels().len(), 64 * 48 * 4);
        assert!(renderer.pixels().chunks_exact(4).all(|p| p[3] == 255));
    }

    #[test]
    fn test_resize_changes_output() {
        let mut builder = SceneBuilder::new(SceneFlags::default());
        builder.construct(1.0, &mut StdRng::seed_from_u64(1)).unwrap();
        let ctx = builder.context().unwrap();

        let mut renderer = SoftwareRenderer::headless(16, 16);
        renderer.resize(0, 0);
        renderer.resize(32, 8);
        renderer.draw(ctx, &FrameInfo::new(0, 0.0, 0.0)).unwrap();
        assert_eq!(renderer.target().dimensions(), (32, 8));
        assert_eq!(renderer.pixels().len(), 32 * 8 * 4);
    }

    #[test]
    fn test_particles_glow_in_view() {
        let mut builder = SceneBuilder::new(SceneFlags::default());
        builder.construct(1.0, &mut StdRng::seed_from_u64(8)).unwrap();
        let mut ctx = builder.into_context().unwrap();

        // Before the first tick the particles sit at the origin
        ctx.camera.position = Vec3::new(0.3, 0.0, 0.0);
        ctx.camera.look_at(Vec3::ZERO);
        let mut renderer = SoftwareRenderer::headless(64, 64);
        renderer.draw(&ctx, &FrameInfo::new(0, 0.0, 0.0)).unwrap();

        let centre = renderer.target().color_at(32, 32);
        assert!(centre.z > 0.0, "centre = {centre:?}");
    }

    #[test]
    fn test_bloom_flag_respected() {
        let flags = SceneFlags {
            bloom: false,
            ..SceneFlags::default()
        };
        let mut builder = SceneBuilder::new(flags);
        builder.construct(1.0, &mut StdRng::seed_from_u64(8)).unwrap();
        let mut ctx = builder.into_context().unwrap();
        ctx.camera.position = Vec3::new(0.3, 0.0, 0.0);
        ctx.camera.look_at(Vec3::ZERO);

        let mut plain = SoftwareRenderer::headless(32, 32);
        plain.draw(&ctx, &FrameInfo::new(0, 0.0, 0.0)).unwrap();

        ctx.flags.bloom = true;
        let mut glowing = SoftwareRenderer::headless(32, 32);
        glowing.draw(&ctx, &FrameInfo::new(0, 0.0, 0.0)).unwrap();

        let sum = |r: &SoftwareRenderer| r.target().colors().iter().map(|c| c.element_sum()).sum::<f32>();
        assert!(sum(&glowing) > sum(&plain));
    }

    #[test]
    fn test_render_loop_with_software_backend() {
        let mut builder = SceneBuilder::new(SceneFlags::default());
        builder.construct(1.0, &mut StdRng::seed_from_u64(4)).unwrap();
        let mut ctx = builder.into_context().unwrap();

        let mut renderer = SoftwareRenderer::headless(24, 24);
        let mut render_loop = RenderLoop::default();
        for _ in 0..3 {
            render_loop
                .tick(&mut ctx, MousePosition::default(), &mut renderer)
                .unwrap();
        }
        assert_eq!(render_loop.frame_number(), 3);
        assert_eq!(renderer.pixels().len(), 24 * 24 * 4);
    }
}
