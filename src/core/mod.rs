pub mod clock;
pub mod gpu_context;
pub mod surface_presenter;

pub use clock::{Clock, TimeAccumulator, DEFAULT_TIME_STEP};
pub use gpu_context::GpuContext;
pub use surface_presenter::SurfacePresenter;
