use log::debug;

use super::bloom::BloomPass;
use super::framebuffer::FrameBuffer;
use super::rasterizer::Rasterizer;
use crate::core::SurfacePresenter;
use crate::frame::FrameInfo;
use crate::scene::SceneContext;
use crate::traits::RenderBackend;

/// CPU renderer with optional window output
///
/// Without a presenter it renders into its own RGBA buffer only, which is
/// what tests and benches use.
pub struct SoftwareRenderer {
    target: FrameBuffer,
    rasterizer: Rasterizer,
    bloom: BloomPass,
    pixels: Vec<u8>,
    presenter: Option<SurfacePresenter>,
}

impl SoftwareRenderer {
    pub fn headless(width: u32, height: u32) -> Self {
        Self {
            target: FrameBuffer::new(width, height),
            rasterizer: Rasterizer::new(),
            bloom: BloomPass::new(),
            pixels: Vec::new(),
            presenter: None,
        }
    }

    /// Renders at the presenter's surface size and presents every frame
    pub fn with_presenter(presenter: SurfacePresenter) -> Self {
        let (width, height) = presenter.dimensions();
        Self {
            presenter: Some(presenter),
            ..Self::headless(width, height)
        }
    }

    /// Last frame as sRGB RGBA8, row 0 at the top
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn target(&self) -> &FrameBuffer {
        &self.target
    }
}

impl RenderBackend for SoftwareRenderer {
    fn draw(&mut self, ctx: &SceneContext, frame: &FrameInfo) -> Result<(), Box<dyn std::error::Error>> {
        self.target.clear(ctx.graph.background);
        self.rasterizer.draw(&mut self.target, &ctx.graph, &ctx.camera);
        if ctx.flags.bloom {
            self.bloom.apply(&ctx.bloom, &mut self.target);
        }
        self.target.write_rgba8(&mut self.pixels);

        if let Some(presenter) = &self.presenter {
            let (width, height) = self.target.dimensions();
            presenter.present(&self.pixels, width, height)?;
        }

        if frame.number % 600 == 0 {
            debug!("Frame {} rendered at t={:.0}", frame.number, frame.time);
        }
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.target.resize(width, height);
        if let Some(presenter) = &mut self.presenter {
            presenter.resize(width, height);
        }
    }
}
