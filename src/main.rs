#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
use anyhow::Result;
use bevy_ecs::prelude::*;
use bevy_ecs::system::RunSystemOnce;
use std::num::NonZeroUsize;
use std::sync::Arc;
use vello::util::{RenderContext, RenderSurface};
use vello::wgpu;
use vello::{AaConfig, Renderer, RendererOptions, Scene};
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::error::OsError;
use winit::event::*;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::Window;

use spline_pad::render::{draw_spline, rgb, ActiveRenderState, RenderState};
use spline_pad::systems::update_spline::sys_update_spline;
use spline_pad::{ControlPointEditor, EditCommand, EditMode, EditorOptions, Spline, Viewport};

struct SplinePadApp<'s> {
    context: RenderContext,
    renderers: Vec<Option<Renderer>>,
    state: RenderState<'s>,
    scene: Scene,
    options: EditorOptions,
    cursor: PhysicalPosition<f64>,
    world: World, // holds the editor and the per-frame spline
}

impl<'s> ApplicationHandler for SplinePadApp<'s> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let RenderState::Suspended(cached_window) = &mut self.state else {
            return;
        };

        let window = match cached_window.take() {
            Some(window) => window,
            None => match create_winit_window(event_loop, &self.options) {
                Ok(window) => window,
                Err(e) => {
                    log::error!("Could not create window: {}", e);
                    event_loop.exit();
                    return;
                }
            },
        };

        let size = window.inner_size();
        let surface_future = self.context.create_surface(
            window.clone(),
            size.width,
            size.height,
            wgpu::PresentMode::AutoVsync,
        );
        let surface = pollster::block_on(surface_future).expect("Error creating surface");

        self.renderers
            .resize_with(self.context.devices.len(), || None);
        self.renderers[surface.dev_id]
            .get_or_insert_with(|| create_vello_renderer(&self.context, &surface));

        self.state = RenderState::Active(ActiveRenderState { window, surface });
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        if let RenderState::Active(state) = &self.state {
            self.state = RenderState::Suspended(Some(state.window.clone()));
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let render_state = match &mut self.state {
            RenderState::Active(state) if state.window.id() == window_id => state,
            _ => return,
        };

        let viewport = Viewport::new(
            render_state.surface.config.width,
            render_state.surface.config.height,
        );

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    self.context
                        .resize_surface(&mut render_state.surface, size.width, size.height);
                    render_state.window.request_redraw();
                }
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                let mode = match event.logical_key.as_ref() {
                    Key::Named(NamedKey::Escape) => {
                        event_loop.exit();
                        return;
                    }
                    Key::Character(ch) => match ch.to_ascii_lowercase().as_str() {
                        "q" => {
                            event_loop.exit();
                            return;
                        }
                        "a" => EditMode::Add,
                        "r" => EditMode::Remove,
                        "d" => EditMode::Drag,
                        "i" => EditMode::Insert,
                        _ => return,
                    },
                    _ => return,
                };
                apply_edit(&mut self.world, event_loop, EditCommand::SelectMode(mode));
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                let command = match state {
                    ElementState::Pressed => {
                        EditCommand::Press(viewport.to_workspace(self.cursor.x, self.cursor.y))
                    }
                    ElementState::Released => EditCommand::Release,
                };
                if apply_edit(&mut self.world, event_loop, command) {
                    render_state.window.request_redraw();
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = position;

                if self.world.resource::<ControlPointEditor>().is_dragging() {
                    let command =
                        EditCommand::CursorMoved(viewport.to_workspace(position.x, position.y));
                    if apply_edit(&mut self.world, event_loop, command) {
                        render_state.window.request_redraw();
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                // full rebuild and resolve every frame
                if let Err(e) = self.world.run_system_once(sys_update_spline) {
                    log::error!("Spline rebuild failed: {}", e);
                    event_loop.exit();
                    return;
                }

                self.scene.reset();
                draw_spline(
                    &mut self.scene,
                    self.world.resource::<Spline>(),
                    &viewport,
                    &self.options,
                );

                let surface = &render_state.surface;
                let width = surface.config.width;
                let height = surface.config.height;
                let device_handle = &self.context.devices[surface.dev_id];
                let surface_texture = surface
                    .surface
                    .get_current_texture()
                    .expect("failed to get surface texture");

                let Some(renderer) = self.renderers[surface.dev_id].as_mut() else {
                    log::error!("No renderer for device {}", surface.dev_id);
                    return;
                };

                renderer
                    .render_to_surface(
                        &device_handle.device,
                        &device_handle.queue,
                        &self.scene,
                        &surface_texture,
                        &vello::RenderParams {
                            base_color: rgb(self.options.background_color),
                            width,
                            height,
                            antialiasing_method: AaConfig::Msaa16,
                        },
                    )
                    .expect("failed to render to surface");

                surface_texture.present();
                device_handle.device.poll(wgpu::Maintain::Poll);
            }
            _ => {}
        }
    }
}

/// Hands one command to the editor. Returns whether the picture changed.
/// A solver failure is an internal invariant violation and stops the app.
fn apply_edit(world: &mut World, event_loop: &ActiveEventLoop, command: EditCommand) -> bool {
    match world.resource_mut::<ControlPointEditor>().apply(command) {
        Ok(changed) => changed,
        Err(e) => {
            log::error!("Edit {:?} failed: {}", command, e);
            event_loop.exit();
            false
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("spline-pad v{} starting", env!("CARGO_PKG_VERSION"));
    log::info!("[a] add points, [r] remove points, [d] drag points, [i] insert on edges, [q] quit");

    let options = EditorOptions::load_from_file(&EditorOptions::config_path());

    let mut world = World::default();
    world.insert_resource(ControlPointEditor::from_options(&options));
    world.insert_resource(Spline::default());

    let mut app = SplinePadApp {
        context: RenderContext::new(),
        renderers: Vec::new(),
        state: RenderState::Suspended(None),
        scene: Scene::new(),
        options,
        cursor: PhysicalPosition::new(0.0, 0.0),
        world,
    };

    let event_loop = EventLoop::new()?;
    event_loop.run_app(&mut app)?;
    Ok(())
}

/// Helper function that creates a Winit window and returns it (wrapped in an Arc for sharing between threads)
fn create_winit_window(
    event_loop: &ActiveEventLoop,
    options: &EditorOptions,
) -> Result<Arc<Window>, OsError> {
    let attr = Window::default_attributes()
        .with_inner_size(LogicalSize::new(options.window_width, options.window_height))
        .with_resizable(true)
        .with_title("Natural Cubic Spline");
    Ok(Arc::new(event_loop.create_window(attr)?))
}

/// Helper function that creates a vello `Renderer` for a given `RenderContext` and `RenderSurface`
fn create_vello_renderer(render_cx: &RenderContext, surface: &RenderSurface) -> Renderer {
    Renderer::new(
        &render_cx.devices[surface.dev_id].device,
        RendererOptions {
            surface_format: Some(surface.format),
            use_cpu: false,
            antialiasing_support: vello::AaSupport::all(),
            num_init_threads: NonZeroUsize::new(1),
        },
    )
        .expect("Couldn't create renderer")
}
