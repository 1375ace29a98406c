use anyhow::{Context, Result};
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowId;

use prism_engine::coords::Offset;
use prism_engine::core::{App, AppControl, FrameCtx};
use prism_engine::device::GpuInit;
use prism_engine::logging::{init_logging, LoggingConfig};
use prism_engine::mesh::ShapeKind;
use prism_engine::paint::Color;
use prism_engine::render::{
    prepare_scene, FrameOutcome, FrameRenderer, LogSink, PreparedScene, RendererConfig,
    ShaderLibrary, WgpuResources,
};
use prism_engine::scene::{Primitive, RotationControls, Scene, SceneError};
use prism_engine::window::{Runtime, RuntimeConfig};

/// Degrees added per arrow key press.
const ROTATION_STEP_DEG: f32 = 5.0;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let scene = demo_scene().context("invalid demo scene")?;
    let config = RuntimeConfig {
        title: "prism".to_string(),
        initial_size: LogicalSize::new(800.0, 800.0),
    };

    Runtime::run(config, GpuInit::default(), DemoApp::new(scene))
}

/// Box at the origin, a sphere and an icosahedron sweeping the diagonal, and a
/// cone swinging left and right.
fn demo_scene() -> Result<Scene, SceneError> {
    Ok(Scene::new()
        .with(Primitive::new(ShapeKind::Box, 0.9, Color::RED)?)
        .with(
            Primitive::new(ShapeKind::Sphere, 0.9, Color::RED)?
                .with_behaviour(|t: f32| Offset::planar(t.sin(), t.sin())),
        )
        .with(
            Primitive::new(ShapeKind::Icosahedron, 0.3, Color::GREEN)?
                .with_behaviour(|t: f32| Offset::planar(t.tan(), t.tan())),
        )
        .with(
            Primitive::new(ShapeKind::Cone, 0.5, Color::BLUE)?
                .with_behaviour(|t: f32| Offset::planar(t.cos() * 0.5, 0.0)),
        ))
}

struct DemoApp {
    pending: Option<Scene>,
    library: Option<ShaderLibrary>,
    prepared: Option<PreparedScene<WgpuResources>>,
    renderer: FrameRenderer,
    controls: RotationControls,
    sink: LogSink,
}

impl DemoApp {
    fn new(scene: Scene) -> Self {
        Self {
            pending: Some(scene),
            library: None,
            prepared: None,
            renderer: FrameRenderer::new(RendererConfig::default()),
            controls: RotationControls::default(),
            sink: LogSink,
        }
    }
}

impl App for DemoApp {
    fn on_window_event(&mut self, _window_id: WindowId, event: &WindowEvent) -> AppControl {
        let WindowEvent::KeyboardInput { event, .. } = event else {
            return AppControl::Continue;
        };
        if event.state != ElementState::Pressed {
            return AppControl::Continue;
        }

        let PhysicalKey::Code(code) = event.physical_key else {
            return AppControl::Continue;
        };
        match code {
            KeyCode::Escape => return AppControl::Exit,
            KeyCode::ArrowUp => self.controls.nudge(ROTATION_STEP_DEG, 0.0),
            KeyCode::ArrowDown => self.controls.nudge(-ROTATION_STEP_DEG, 0.0),
            KeyCode::ArrowRight => self.controls.nudge(0.0, ROTATION_STEP_DEG),
            KeyCode::ArrowLeft => self.controls.nudge(0.0, -ROTATION_STEP_DEG),
            _ => return AppControl::Continue,
        }

        log::debug!(
            "rotation: vertical {}°, horizontal {}°",
            self.controls.vertical_deg(),
            self.controls.horizontal_deg()
        );
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let format = ctx.gpu.surface_format();
        let library = self
            .library
            .get_or_insert_with(|| ShaderLibrary::load(ctx.gpu.device()));
        let mut backend = ctx.backend(library);

        // Setup runs on the first frame, once the device exists.
        if let Some(scene) = self.pending.take() {
            match prepare_scene(&mut backend, scene, format) {
                Ok(prepared) => self.prepared = Some(prepared),
                Err(err) => {
                    log::error!("{:#}", anyhow::Error::new(err).context("scene setup failed"));
                    return AppControl::Exit;
                }
            }
        }

        let Some(prepared) = self.prepared.as_ref() else {
            return AppControl::Exit;
        };

        match self.renderer.render_frame(&mut backend, prepared, &mut self.sink) {
            FrameOutcome::Fatal(reason) => {
                log::error!("rendering stopped: {reason:?}");
                AppControl::Exit
            }
            _ => AppControl::Continue,
        }
    }
}
