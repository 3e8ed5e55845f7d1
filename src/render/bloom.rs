use glam::Vec3;

use super::framebuffer::FrameBuffer;

/// Box blur half-width at `radius` 0
const BASE_BLUR_RADIUS: usize = 4;
/// Extra half-width per unit of `radius`
const RADIUS_SCALE: f32 = 8.0;

/// Glow settings, matching an unreal-bloom style pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BloomSettings {
    /// Luminance a pixel must exceed to glow
    pub threshold: f32,
    pub strength: f32,
    /// Spread of the glow, 0 for the tightest blur
    pub radius: f32,
}

impl Default for BloomSettings {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            strength: 0.3,
            radius: 0.0,
        }
    }
}

impl BloomSettings {
    pub fn blur_radius(&self) -> usize {
        BASE_BLUR_RADIUS + (self.radius.max(0.0) * RADIUS_SCALE).round() as usize
    }
}

/// CPU bloom: bright-pass, separable box blur, additive composite
#[derive(Debug, Default)]
pub struct BloomPass {
    bright: Vec<Vec3>,
    scratch: Vec<Vec3>,
}

impl BloomPass {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the blurred bright parts of `target` back onto it
    pub fn apply(&mut self, settings: &BloomSettings, target: &mut FrameBuffer) {
        if settings.strength <= 0.0 {
            return;
        }

        let (width, height) = target.dimensions();
        let (width, height) = (width as usize, height as usize);
        let radius = settings.blur_radius();

        self.bright.clear();
        self.bright.extend(target.colors().iter().map(|&c| {
            if luminance(c) > settings.threshold {
                c.max(Vec3::ZERO)
            } else {
                Vec3::ZERO
            }
        }));
        self.scratch.resize(self.bright.len(), Vec3::ZERO);

        blur_rows(&self.bright, &mut self.scratch, width, height, radius);
        blur_columns(&self.scratch, &mut self.bright, width, height, radius);

        for (color, glow) in target.colors_mut().iter_mut().zip(&self.bright) {
            *color += *glow * settings.strength;
        }
    }
}

/// Rec. 709 relative luminance of a linear colour
pub fn luminance(c: Vec3) -> f32 {
    c.dot(Vec3::new(0.2126, 0.7152, 0.0722))
}

/// Horizontal box blur with clamp-to-edge sampling
fn blur_rows(src: &[Vec3], dst: &mut [Vec3], width: usize, height: usize, radius: usize) {
    let scale = 1.0 / (2 * radius + 1) as f32;
    for y in 0..height {
        let row = &src[y * width..(y + 1) * width];
        let out = &mut dst[y * width..(y + 1) * width];
        for (x, pixel) in out.iter_mut().enumerate() {
            let sum: Vec3 = (0..=2 * radius)
                .map(|k| row[(x + k).saturating_sub(radius).min(width - 1)])
                .sum();
            *pixel = sum * scale;
        }
    }
}

/// Vertical box blur with clamp-to-edge sampling
fn blur_columns(src: &[Vec3], dst: &mut [Vec3], width: usize, height: usize, radius: usize) {
    let scale = 1.0 / (2 * radius + 1) as f32;
    for y in 0..height {
        for x in 0..width {
            let sum: Vec3 = (0..=2 * radius)
                .map(|k| src[(y + k).saturating_sub(radius).min(height - 1) * width + x])
                .sum();
            dst[y * width + x] = sum * scale;
        }
    }
}
