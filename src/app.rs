use std::sync::Arc;

use anyhow::{Context, Result};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::{
    gfx::{
        camera::{
            camera_controller::CameraController, camera_utils::CameraManager,
            orbit_camera::OrbitCamera,
        },
        resources::LightConfig,
        scene::Scene,
        RenderEngine,
    },
    math::Vec3f,
    mesh::Mesh,
};

/// Window settings for the viewer
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "Scop (wgpu backend)".to_string(),
        }
    }
}

pub struct ViewerApp {
    event_loop: EventLoop<()>,
    app_state: AppState,
}

struct AppState {
    config: ViewerConfig,
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    scene: Scene,
    light: LightConfig,
    /// First fatal error raised inside the event loop.
    error: Option<anyhow::Error>,
}

impl ViewerApp {
    pub fn new(config: ViewerConfig) -> Result<Self> {
        let event_loop = EventLoop::new().context("failed to create event loop")?;

        let aspect = config.width.max(1) as f32 / config.height.max(1) as f32;
        let camera = OrbitCamera::new(5.0, 0.4, 0.6, Vec3f::new(0.0, 0.0, 0.0), aspect);
        let controller = CameraController::new(0.005, 0.1);

        let camera_manager = CameraManager::new(camera, controller);
        let scene = Scene::new(camera_manager);

        Ok(Self {
            event_loop,
            app_state: AppState {
                config,
                window: None,
                render_engine: None,
                scene,
                light: LightConfig::default(),
                error: None,
            },
        })
    }

    /// Adds a mesh to the scene; the camera is framed around it.
    pub fn add_mesh(&mut self, name: &str, mesh: Mesh) {
        self.app_state.scene.add_mesh(name, mesh);
    }

    /// Run the application (consumes self and starts the event loop)
    pub fn run(mut self) -> Result<()> {
        self.event_loop.set_control_flow(ControlFlow::Poll);
        self.event_loop
            .run_app(&mut self.app_state)
            .context("event loop terminated abnormally")?;

        match self.app_state.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl AppState {
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{:#}", error);
        self.error.get_or_insert(error);
        event_loop.exit();
    }

    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attributes = WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height));
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .context("failed to create window")?,
        );

        let PhysicalSize { width, height } = window.inner_size();
        let renderer = pollster::block_on(RenderEngine::new(window.clone(), width, height))?;

        self.scene
            .camera_manager
            .camera
            .resize_projection(width, height);
        self.scene
            .init_gpu_resources(renderer.device(), renderer.transform_layout());

        self.window = Some(window);
        self.render_engine = Some(renderer);
        Ok(())
    }

    fn redraw(&mut self) -> Result<()> {
        let Some(render_engine) = self.render_engine.as_mut() else {
            return Ok(());
        };

        self.scene.update();
        self.scene.update_all_transforms(render_engine.queue());

        let camera = &self.scene.camera_manager.camera;
        // Headlight: the light follows the eye.
        self.light.position = camera.eye.into();
        render_engine.update(camera.uniform, self.light);

        render_engine.render_frame(&self.scene)
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.init_graphics(event_loop) {
            self.fail(event_loop, e.context("failed to initialise graphics"));
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key_code),
                        state,
                        ..
                    },
                ..
            } => {
                if key_code == KeyCode::Escape && state == ElementState::Pressed {
                    event_loop.exit();
                    return;
                }
                self.scene
                    .camera_manager
                    .process_keyboard_event(key_code, state);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.scene
                    .camera_manager
                    .process_mouse_button(button, state);
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.scene
                    .camera_manager
                    .camera
                    .resize_projection(width, height);
                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.resize(width, height);
                }
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.redraw() {
                    self.fail(event_loop, e);
                }
            }
            _ => (),
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        if self.window.is_none() {
            return;
        }

        self.scene.camera_manager.process_event(&event);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
