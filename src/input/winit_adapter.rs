use winit::event::{ElementState, MouseButton, WindowEvent};

use super::mouse::MousePosition;

/// What a window event meant for the pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Moved(MousePosition),
    Click(MousePosition),
}

/// Adapter that turns winit cursor events into normalized mouse positions
#[derive(Debug, Clone)]
pub struct WinitMouse {
    window_size: (f32, f32),
    /// Last cursor position in window pixels
    cursor: Option<(f32, f32)>,
    position: MousePosition,
}

impl WinitMouse {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            window_size: (width as f32, height as f32),
            cursor: None,
            position: MousePosition::default(),
        }
    }

    /// Process a winit WindowEvent and report pointer changes
    pub fn process_event(&mut self, event: &WindowEvent) -> Option<PointerEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                Some(self.cursor_moved(position.x as f32, position.y as f32))
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => self.click(),
            WindowEvent::Resized(size) => {
                self.set_window_size(size.width, size.height);
                None
            }
            _ => None,
        }
    }

    pub fn cursor_moved(&mut self, x: f32, y: f32) -> PointerEvent {
        self.cursor = Some((x, y));
        self.position = self.normalize(x, y);
        PointerEvent::Moved(self.position)
    }

    /// A click at the last known cursor position
    pub fn click(&self) -> Option<PointerEvent> {
        self.cursor
            .map(|(x, y)| PointerEvent::Click(self.normalize(x, y)))
    }

    /// Window size used for normalization; re-maps the current cursor
    pub fn set_window_size(&mut self, width: u32, height: u32) {
        self.window_size = (width as f32, height as f32);
        if let Some((x, y)) = self.cursor {
            self.position = self.normalize(x, y);
        }
    }

    pub fn position(&self) -> MousePosition {
        self.position
    }

    fn normalize(&self, x: f32, y: f32) -> MousePosition {
        let (width, height) = self.window_size;
        MousePosition::from_cursor(x, y, width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_centred() {
        let mouse = WinitMouse::new(800, 600);
        assert_eq!(mouse.position(), MousePosition::default());
        assert!(mouse.click().is_none());
    }

    #[test]
    fn test_cursor_moved_updates_position() {
        let mut mouse = WinitMouse::new(800, 600);
        let event = mouse.cursor_moved(800.0, 0.0);
        assert_eq!(event, PointerEvent::Moved(MousePosition::new(1.0, 1.0)));
        assert_eq!(mouse.position(), MousePosition::new(1.0, 1.0));
    }

    #[test]
    fn test_click_uses_last_cursor() {
        let mut mouse = WinitMouse::new(800, 600);
        mouse.cursor_moved(200.0, 450.0);
        assert_eq!(
            mouse.click(),
            Some(PointerEvent::Click(MousePosition::new(-0.5, -0.5)))
        );
    }

    #[test]
    fn test_resize_renormalizes() {
        let mut mouse = WinitMouse::new(800, 600);
        mouse.cursor_moved(400.0, 300.0);
        mouse.set_window_size(400, 300);
        assert_eq!(mouse.position(), MousePosition::new(1.0, -1.0));
    }
}
