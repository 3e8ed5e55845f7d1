use glam::Vec3;

use crate::math::linear_to_srgb;

/// Linear HDR colour plus depth, row 0 at the top
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    color: Vec<Vec3>,
    depth: Vec<f32>,
}

impl FrameBuffer {
    /// Zero sizes are bumped to one pixel
    pub fn new(width: u32, height: u32) -> Self {
        let (width, height) = (width.max(1), height.max(1));
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            color: vec![Vec3::ZERO; len],
            depth: vec![f32::INFINITY; len],
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Zero sizes are ignored; contents are undefined until the next clear
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.width = width;
        self.height = height;
        let len = width as usize * height as usize;
        self.color.resize(len, Vec3::ZERO);
        self.depth.resize(len, f32::INFINITY);
    }

    pub fn clear(&mut self, background: Vec3) {
        self.color.fill(background);
        self.depth.fill(f32::INFINITY);
    }

    pub fn color_at(&self, x: u32, y: u32) -> Vec3 {
        self.color[self.index(x, y)]
    }

    pub fn depth_at(&self, x: u32, y: u32) -> f32 {
        self.depth[self.index(x, y)]
    }

    pub fn colors(&self) -> &[Vec3] {
        &self.color
    }

    pub fn colors_mut(&mut self) -> &mut [Vec3] {
        &mut self.color
    }

    /// Depth-tested write; partial opacity blends without writing depth
    pub fn plot(&mut self, x: u32, y: u32, depth: f32, color: Vec3, opacity: f32) {
        let i = self.index(x, y);
        if depth >= self.depth[i] {
            return;
        }
        if opacity >= 1.0 {
            self.color[i] = color;
            self.depth[i] = depth;
        } else {
            self.color[i] = self.color[i].lerp(color, opacity.max(0.0));
        }
    }

    /// Clamps to [0, 1] and encodes as sRGB bytes with opaque alpha
    pub fn write_rgba8(&self, out: &mut Vec<u8>) {
        out.clear();
        out.reserve(self.color.len() * 4);
        for c in &self.color {
            out.extend_from_slice(&[encode(c.x), encode(c.y), encode(c.z), 255]);
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

fn encode(channel: f32) -> u8 {
    (linear_to_srgb(channel) * 255.0 + 0.5) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_and_encode() {
        let mut target = FrameBuffer::new(2, 1);
        target.clear(Vec3::new(1.0, 0.0, 2.0));

        let mut pixels = Vec::new();
        target.write_rgba8(&mut pixels);
        assert_eq!(pixels, [255, 0, 255, 255, 255, 0, 255, 255]);
    }

    #[test]
    fn test_plot_depth_test() {
        let mut target = FrameBuffer::new(1, 1);
        target.clear(Vec3::ZERO);
        target.plot(0, 0, 0.5, Vec3::X, 1.0);
        target.plot(0, 0, 0.7, Vec3::Y, 1.0);
        assert_eq!(target.color_at(0, 0), Vec3::X);
        assert_eq!(target.depth_at(0, 0), 0.5);
    }

    #[test]
    fn test_translucent_plot_blends() {
        let mut target = FrameBuffer::new(1, 1);
        target.clear(Vec3::ZERO);
        target.plot(0, 0, 0.5, Vec3::ONE, 0.25);
        assert_eq!(target.color_at(0, 0), Vec3::splat(0.25));
        assert_eq!(target.depth_at(0, 0), f32::INFINITY);
    }

    #[test]
    fn test_resize_ignores_zero() {
        let mut target = FrameBuffer::new(4, 4);
        target.resize(0, 8);
        assert_eq!(target.dimensions(), (4, 4));
        target.resize(8, 2);
        assert_eq!(target.dimensions(), (8, 2));
        assert_eq!(target.colors().len(), 16);
    }
}
