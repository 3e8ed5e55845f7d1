//! Per-frame procedural animation.
//!
//! Scene setup registers closures in an [`AnimationRegistry`]; the render loop
//! calls every entry once per frame with the accumulated time.

pub mod oscillator;
pub mod presets;
pub mod registry;

pub use oscillator::{oscillate, Axis, Property, SinAnimation};
pub use presets::{register_breathe, register_heart, register_rotation};
pub use registry::{AnimationEntry, AnimationFn, AnimationId, AnimationRegistry};
