mod mouse;
mod winit_adapter;

pub use mouse::MousePosition;
pub use winit_adapter::{PointerEvent, WinitMouse};
