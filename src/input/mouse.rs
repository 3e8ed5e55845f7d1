use glam::Vec2;

/// Cursor position mapped to [-1, 1] on both axes, +Y up
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MousePosition {
    pub x: f32,
    pub y: f32,
}

impl MousePosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: x.clamp(-1.0, 1.0),
            y: y.clamp(-1.0, 1.0),
        }
    }

    /// Normalizes window pixel coordinates
    ///
    /// Positions outside the window are clamped, and a zero-sized window maps
    /// everything to the centre.
    pub fn from_cursor(cursor_x: f32, cursor_y: f32, width: f32, height: f32) -> Self {
        if width <= 0.0 || height <= 0.0 {
            return Self::default();
        }
        Self::new(
            (cursor_x / width) * 2.0 - 1.0,
            -(cursor_y / height) * 2.0 + 1.0,
        )
    }

    pub fn to_ndc(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corners() {
        assert_eq!(MousePosition::from_cursor(0.0, 0.0, 800.0, 600.0), MousePosition::new(-1.0, 1.0));
        assert_eq!(
            MousePosition::from_cursor(800.0, 600.0, 800.0, 600.0),
            MousePosition::new(1.0, -1.0)
        );
    }

    #[test]
    fn test_centre_is_origin() {
        let p = MousePosition::from_cursor(400.0, 300.0, 800.0, 600.0);
        assert_eq!(p, MousePosition::default());
    }

    #[test]
    fn test_outside_window_clamped() {
        let p = MousePosition::from_cursor(-50.0, 900.0, 800.0, 600.0);
        assert_eq!(p, MousePosition::new(-1.0, -1.0));
    }

    #[test]
    fn test_zero_window() {
        assert_eq!(MousePosition::from_cursor(10.0, 10.0, 0.0, 0.0), MousePosition::default());
    }
}
