use anyhow::Context;
use clap::Parser;
use log::{error, info, warn};
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use ghost_scene::cli::Cli;
use ghost_scene::core::{Clock, SurfacePresenter};
use ghost_scene::input::{PointerEvent, WinitMouse};
use ghost_scene::loaders::{spawn_load, LoadedAsset};
use ghost_scene::render::SoftwareRenderer;
use ghost_scene::scene::picking::handle_click;
use ghost_scene::{AppConfig, RenderBackend, RenderLoop, SceneBuilder};

// === Constants ===

const FPS_UPDATE_INTERVAL: f32 = 1.0;
const INITIAL_WINDOW_WIDTH: u32 = 800;
const INITIAL_WINDOW_HEIGHT: u32 = 600;

/// Events sent to the event loop from other threads
enum AppEvent {
    AssetLoaded(anyhow::Result<LoadedAsset>),
}

// === Application ===

struct App {
    config: AppConfig,
    proxy: EventLoopProxy<AppEvent>,
    window: Option<Arc<Window>>,
    renderer: Option<SoftwareRenderer>,
    builder: SceneBuilder,
    render_loop: RenderLoop,
    mouse: WinitMouse,
    clock: Clock,
    frame_count: u32,
    fps_update_timer: f32,
}

impl App {
    fn new(config: AppConfig, proxy: EventLoopProxy<AppEvent>) -> Self {
        Self {
            builder: SceneBuilder::new(config.flags),
            render_loop: RenderLoop::new(config.time_step),
            config,
            proxy,
            window: None,
            renderer: None,
            mouse: WinitMouse::new(INITIAL_WINDOW_WIDTH, INITIAL_WINDOW_HEIGHT),
            clock: Clock::new(),
            frame_count: 0,
            fps_update_timer: 0.0,
        }
    }

    fn update_fps(&mut self, delta: f32) {
        self.frame_count += 1;
        self.fps_update_timer += delta;

        if self.fps_update_timer >= FPS_UPDATE_INTERVAL {
            let fps = self.frame_count as f32 / self.fps_update_timer;
            info!("FPS: {:.1}", fps);
            self.frame_count = 0;
            self.fps_update_timer = 0.0;
        }
    }

    /// Window, presenter and the scene up to the asset request
    fn start(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window = Arc::new(
            event_loop
                .create_window(
                    Window::default_attributes()
                        .with_title("Ghost")
                        .with_inner_size(winit::dpi::LogicalSize::new(
                            INITIAL_WINDOW_WIDTH,
                            INITIAL_WINDOW_HEIGHT,
                        )),
                )
                .context("Failed to create window")?,
        );

        let presenter = SurfacePresenter::new(window.clone())
            .map_err(|e| anyhow::anyhow!("Failed to initialize surface: {e}"))?;
        let (width, height) = presenter.dimensions();
        self.mouse.set_window_size(width, height);

        self.builder
            .construct(width as f32 / height as f32, &mut rand::thread_rng())?;
        self.builder.request_asset()?;

        let proxy = self.proxy.clone();
        spawn_load(self.config.model_path.clone(), move |result| {
            // The loop may already be gone on shutdown
            proxy.send_event(AppEvent::AssetLoaded(result)).ok();
        })
        .context("Failed to spawn asset loader")?;

        self.renderer = Some(SoftwareRenderer::with_presenter(presenter));
        self.window = Some(window);
        Ok(())
    }

    fn finish_scene(&mut self, asset: &LoadedAsset) -> anyhow::Result<()> {
        self.builder.on_asset_loaded(asset)?;
        self.builder.decorate()?;
        self.builder.start()?;
        Ok(())
    }
}

impl ApplicationHandler<AppEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.start(event_loop) {
                error!("{e:#}");
                event_loop.exit();
            }
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: AppEvent) {
        match event {
            AppEvent::AssetLoaded(Ok(asset)) => {
                if let Err(e) = self.finish_scene(&asset) {
                    error!("Ghost model rejected: {e:#}");
                }
            }
            AppEvent::AssetLoaded(Err(e)) => {
                error!("Failed to load ghost model: {e:#}");
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(PointerEvent::Click(pointer)) = self.mouse.process_event(&event) {
            if let Some(ctx) = self.builder.context() {
                handle_click(&ctx.graph, &ctx.camera, pointer);
            }
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    return;
                }
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size.width, size.height);
                }
                if let Some(ctx) = self.builder.context_mut() {
                    ctx.camera.set_viewport(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                let delta = self.clock.tick();
                self.update_fps(delta);

                if let (Some(ctx), Some(renderer)) = (self.builder.context_mut(), &mut self.renderer) {
                    if let Err(e) = self.render_loop.tick(ctx, self.mouse.position(), renderer) {
                        warn!("Render error: {}", e);
                    }
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = Cli::parse().into_config();
    info!("Starting with {:?}", config);

    let event_loop = EventLoop::<AppEvent>::with_user_event().build()?;
    let mut app = App::new(config, event_loop.create_proxy());

    info!("Ghost scene - move the mouse to look around, Escape to quit");
    event_loop.run_app(&mut app)?;

    Ok(())
}
