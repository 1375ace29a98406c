use crate::device::SurfaceErrorAction;
use crate::time::AnimationClock;

use super::{
    Backend, DrawPass, ErrorSink, PreparedPrimitive, PreparedScene, RenderError, RendererConfig,
    Resources, Retained,
};

/// Why a frame ended the renderer's run.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FatalReason {
    /// The surface cannot produce frames any more (commonly OOM).
    Surface,
    /// Primitives have failed on this many consecutive frames.
    PersistentFailures { frames: u32 },
}

/// Result of one [`FrameRenderer::render_frame`] call.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameOutcome {
    /// No frame was available; nothing was recorded.
    Skipped,
    /// The frame was recorded and presented.
    Presented { drawn: usize, failed: usize },
    /// The frame was recorded but had no drawable, so nothing was submitted.
    Discarded { drawn: usize, failed: usize },
    /// Rendering cannot continue.
    Fatal(FatalReason),
}

impl FrameOutcome {
    #[inline]
    pub fn is_fatal(&self) -> bool {
        matches!(self, FrameOutcome::Fatal(_))
    }
}

/// Drives the per-frame loop over a prepared scene.
///
/// One call to [`render_frame`](Self::render_frame) per display refresh. The
/// method takes `&mut self`, so frames cannot overlap or nest.
#[derive(Debug, Clone)]
pub struct FrameRenderer {
    config: RendererConfig,
    clock: AnimationClock,
    failing_frames: u32,
}

impl FrameRenderer {
    pub fn new(config: RendererConfig) -> Self {
        let clock = AnimationClock::new(config.clock_step, config.clock_wrap);
        Self {
            config,
            clock,
            failing_frames: 0,
        }
    }

    #[inline]
    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    /// Consecutive frames that had at least one failed primitive.
    #[inline]
    pub fn failing_frames(&self) -> u32 {
        self.failing_frames
    }

    /// Advances the clock and renders one frame of `scene`.
    ///
    /// Primitive failures are reported to `sink` and skip only that primitive.
    pub fn render_frame<B: Backend>(
        &mut self,
        backend: &mut B,
        scene: &PreparedScene<B::Res>,
        sink: &mut dyn ErrorSink,
    ) -> FrameOutcome {
        let time = self.clock.tick();

        let mut frame = match backend.acquire_frame() {
            Ok(frame) => frame,
            Err(SurfaceErrorAction::Fatal) => {
                log::error!("surface lost beyond recovery; stopping renderer");
                return FrameOutcome::Fatal(FatalReason::Surface);
            }
            Err(action) => {
                log::trace!("frame {} skipped: {action:?}", self.clock.frame_index());
                return FrameOutcome::Skipped;
            }
        };

        let (drawn, failed) = {
            let backend: &B = backend;
            let mut pass = backend.begin_pass(&mut frame, self.config.clear_color);

            let mut drawn = 0;
            let mut failed = 0;
            for (index, prepared) in scene.primitives().iter().enumerate() {
                match draw_primitive(backend, &mut pass, index, prepared, time) {
                    Ok(()) => drawn += 1,
                    Err(err) => {
                        sink.report(&err);
                        failed += 1;
                    }
                }
            }
            (drawn, failed)
        };

        let presented = backend.finish_frame(frame);

        if let Some(reason) = self.track_failures(failed) {
            return FrameOutcome::Fatal(reason);
        }

        if presented {
            FrameOutcome::Presented { drawn, failed }
        } else {
            log::trace!("frame {} had no drawable; not submitted", self.clock.frame_index());
            FrameOutcome::Discarded { drawn, failed }
        }
    }

    fn track_failures(&mut self, failed: usize) -> Option<FatalReason> {
        if failed == 0 {
            if self.failing_frames > 0 {
                log::info!("primitives recovered after {} failing frames", self.failing_frames);
            }
            self.failing_frames = 0;
            return None;
        }

        self.failing_frames = self.failing_frames.saturating_add(1);
        let limit = self.config.max_consecutive_failures;
        if limit > 0 && self.failing_frames >= limit {
            log::error!("{failed} primitives still failing after {} frames", self.failing_frames);
            return Some(FatalReason::PersistentFailures { frames: self.failing_frames });
        }

        log::warn!("{failed} primitives failed this frame ({} in a row)", self.failing_frames);
        None
    }
}

impl Default for FrameRenderer {
    fn default() -> Self {
        Self::new(RendererConfig::default())
    }
}

/// Records one primitive: retain, bind, draw every submesh, release.
fn draw_primitive<B, P>(
    backend: &B,
    pass: &mut P,
    index: usize,
    prepared: &PreparedPrimitive<B::Res>,
    time: f32,
) -> Result<(), RenderError>
where
    B: Backend,
    P: DrawPass<B::Res>,
{
    let kind = prepared.primitive.kind();
    let offset = prepared.primitive.offset_at(time);
    let mesh = &prepared.mesh;

    let _retained = Retained::acquire(backend, &mesh.vertex_buffer);

    let pipeline: &<B::Res as Resources>::Pipeline = backend
        .realize_pipeline(&prepared.pipeline)
        .map_err(|source| RenderError::Pipeline { index, kind, source })?;

    pass.set_pipeline(pipeline);
    pass.set_vertex_buffer(0, &mesh.vertex_buffer);
    pass.set_offset(&prepared.bindings, offset.into());
    pass.set_color(&prepared.bindings, prepared.primitive.color().into());

    for (submesh, sub) in mesh.submeshes.iter().enumerate() {
        pass.draw_indexed(sub)
            .map_err(|source| RenderError::Draw { index, kind, submesh, source })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;
    use crate::coords::Offset;
    use crate::mesh::ShapeKind;
    use crate::paint::Color;
    use crate::render::testing::{Call, MockFrame, MockResources, RecordingBackend};
    use crate::render::{prepare_scene, LogSink, PurgeableState};
    use crate::scene::{Primitive, Scene};

    const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

    fn example_scene() -> Scene {
        Scene::new()
            .with(Primitive::new(ShapeKind::Box, 0.9, Color::RED).unwrap())
            .with(
                Primitive::new(ShapeKind::Sphere, 0.9, Color::RED)
                    .unwrap()
                    .with_behaviour(|t: f32| Offset::planar(t.sin(), t.sin())),
            )
    }

    fn renderer(step: f32) -> FrameRenderer {
        FrameRenderer::new(RendererConfig { clock_step: step, ..Default::default() })
    }

    fn prepared(backend: &mut RecordingBackend, scene: Scene) -> PreparedScene<MockResources> {
        let scene = prepare_scene(backend, scene, FORMAT).ok().unwrap();
        backend.clear_calls();
        scene
    }

    fn offsets(calls: &[Call]) -> Vec<[f32; 2]> {
        calls
            .iter()
            .filter_map(|c| match c {
                Call::SetOffset { offset, .. } => Some(*offset),
                _ => None,
            })
            .collect()
    }

    // ── offsets & colors ──────────────────────────────────────────────────

    #[test]
    fn offsets_at_time_zero_are_zero() {
        let mut backend = RecordingBackend::new();
        let scene = prepared(&mut backend, example_scene());
        let mut r = renderer(0.0);

        let outcome = r.render_frame(&mut backend, &scene, &mut LogSink);
        assert_eq!(outcome, FrameOutcome::Presented { drawn: 2, failed: 0 });
        assert_eq!(r.clock().time(), 0.0);
        assert_eq!(offsets(&backend.calls()), [[0.0, 0.0], [0.0, 0.0]]);
    }

    #[test]
    fn sphere_moves_at_half_pi_while_box_stays() {
        let mut backend = RecordingBackend::new();
        let scene = prepared(&mut backend, example_scene());
        let mut r = renderer(FRAC_PI_2);

        r.render_frame(&mut backend, &scene, &mut LogSink);
        let offs = offsets(&backend.calls());
        assert_eq!(offs[0], [0.0, 0.0]);
        assert!((offs[1][0] - 1.0).abs() < 1e-6 && (offs[1][1] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn color_reaches_fragment_uniform_unchanged() {
        let mut backend = RecordingBackend::new();
        let scene = prepared(&mut backend, example_scene());
        renderer(0.02).render_frame(&mut backend, &scene, &mut LogSink);

        let colors: Vec<_> = backend
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::SetColor { color, .. } => Some(color),
                _ => None,
            })
            .collect();
        assert_eq!(colors, [[1.0, 0.0, 0.0, 1.0], [1.0, 0.0, 0.0, 1.0]]);
    }

    #[test]
    fn clock_advances_once_per_frame() {
        let mut backend = RecordingBackend::new();
        let scene = prepared(&mut backend, example_scene());
        let mut r = FrameRenderer::default();
        for _ in 0..3 {
            r.render_frame(&mut backend, &scene, &mut LogSink);
        }
        assert_eq!(r.clock().frame_index(), 3);
        assert_eq!(r.clock().time(), ((0.02f32 + 0.02) % 1000.0 + 0.02) % 1000.0);
    }

    // ── ordering ──────────────────────────────────────────────────────────

    #[test]
    fn frame_records_binds_and_draws_in_scene_order() {
        let mut backend = RecordingBackend::new();
        let scene = prepared(&mut backend, example_scene());
        renderer(0.0).render_frame(&mut backend, &scene, &mut LogSink);

        let box_ = &scene.primitives()[0];
        let sphere = &scene.primitives()[1];
        let bind_and_draw = |p: &PreparedPrimitive<MockResources>| {
            vec![
                Call::Purgeable { buffer: p.mesh.vertex_buffer, state: PurgeableState::NonPurgeable },
                Call::Realize { pipeline: p.pipeline },
                Call::SetPipeline { pipeline: p.pipeline },
                Call::SetVertexBuffer { slot: 0, buffer: p.mesh.vertex_buffer },
                Call::SetOffset { bindings: p.bindings, offset: [0.0, 0.0] },
                Call::SetColor { bindings: p.bindings, color: [1.0, 0.0, 0.0, 1.0] },
                Call::DrawIndexed {
                    index_buffer: p.mesh.submeshes[0].index_buffer,
                    count: p.mesh.submeshes[0].index_count,
                },
                Call::Purgeable { buffer: p.mesh.vertex_buffer, state: PurgeableState::Purgeable },
            ]
        };

        let mut expected = vec![Call::AcquireFrame, Call::BeginPass { clear: [0.0; 4] }];
        expected.extend(bind_and_draw(box_));
        expected.extend(bind_and_draw(sphere));
        expected.push(Call::Present);

        assert_eq!(backend.calls(), expected);
    }

    #[test]
    fn rendering_twice_repeats_the_same_calls() {
        let mut backend = RecordingBackend::new();
        let scene = prepared(&mut backend, example_scene());
        let mut r = renderer(0.0);

        r.render_frame(&mut backend, &scene, &mut LogSink);
        let first = backend.take_calls();
        r.render_frame(&mut backend, &scene, &mut LogSink);
        let second = backend.take_calls();

        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn submeshes_are_drawn_in_order() {
        let mut backend = RecordingBackend::new();
        let scene = prepared(
            &mut backend,
            Scene::new().with(Primitive::new(ShapeKind::Cone, 0.5, Color::BLUE).unwrap()),
        );
        renderer(0.0).render_frame(&mut backend, &scene, &mut LogSink);

        let mesh = &scene.primitives()[0].mesh;
        let draws: Vec<_> = backend
            .calls()
            .into_iter()
            .filter(|c| matches!(c, Call::DrawIndexed { .. }))
            .collect();
        let expected: Vec<_> = mesh
            .submeshes
            .iter()
            .map(|s| Call::DrawIndexed { index_buffer: s.index_buffer, count: s.index_count })
            .collect();
        assert_eq!(expected.len(), 2);
        assert_eq!(draws, expected);
    }

    // ── skipped & discarded frames ────────────────────────────────────────

    #[test]
    fn skipped_frame_records_nothing() {
        let mut backend = RecordingBackend::new();
        let scene = prepared(&mut backend, example_scene());
        backend.script_frame(Err(SurfaceErrorAction::SkipFrame));
        backend.script_frame(Err(SurfaceErrorAction::Reconfigured));
        let mut r = renderer(0.02);

        assert_eq!(r.render_frame(&mut backend, &scene, &mut LogSink), FrameOutcome::Skipped);
        assert_eq!(r.render_frame(&mut backend, &scene, &mut LogSink), FrameOutcome::Skipped);
        assert_eq!(backend.calls(), [Call::AcquireFrame, Call::AcquireFrame]);
        assert_eq!(r.failing_frames(), 0);
    }

    #[test]
    fn frame_without_drawable_is_not_submitted() {
        let mut backend = RecordingBackend::new();
        let scene = prepared(&mut backend, example_scene());
        backend.script_frame(Ok(MockFrame { drawable: false }));

        let outcome = renderer(0.02).render_frame(&mut backend, &scene, &mut LogSink);
        assert_eq!(outcome, FrameOutcome::Discarded { drawn: 2, failed: 0 });
        let calls = backend.calls();
        assert_eq!(calls.last(), Some(&Call::Discard));
        assert!(!calls.contains(&Call::Present));
    }

    #[test]
    fn fatal_surface_error_stops_rendering() {
        let mut backend = RecordingBackend::new();
        let scene = prepared(&mut backend, example_scene());
        backend.script_frame(Err(SurfaceErrorAction::Fatal));

        let outcome = renderer(0.02).render_frame(&mut backend, &scene, &mut LogSink);
        assert_eq!(outcome, FrameOutcome::Fatal(FatalReason::Surface));
        assert!(outcome.is_fatal());
    }

    // ── failures ──────────────────────────────────────────────────────────

    #[test]
    fn failed_pipeline_skips_only_that_primitive() {
        let mut backend = RecordingBackend::new();
        let scene = prepared(&mut backend, example_scene());
        backend.fail_pipeline(scene.primitives()[0].pipeline);

        let mut errors = Vec::new();
        let mut sink = |e: &RenderError| errors.push(e.clone());
        let outcome = renderer(0.0).render_frame(&mut backend, &scene, &mut sink);

        assert_eq!(outcome, FrameOutcome::Presented { drawn: 1, failed: 1 });
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], RenderError::Pipeline { index: 0, kind: ShapeKind::Box, .. }));
        assert_eq!(errors[0].index(), 0);

        let draws = backend.calls().iter().filter(|c| matches!(c, Call::DrawIndexed { .. })).count();
        assert_eq!(draws, 1);
    }

    #[test]
    fn retention_is_released_on_every_path() {
        let mut backend = RecordingBackend::new();
        let scene = prepared(
            &mut backend,
            Scene::new()
                .with(Primitive::new(ShapeKind::Box, 0.9, Color::RED).unwrap())
                .with(Primitive::new(ShapeKind::Cone, 0.9, Color::RED).unwrap())
                .with(Primitive::new(ShapeKind::Sphere, 0.9, Color::RED).unwrap()),
        );
        // Box: pipeline fails. Cone: second submesh fails. Sphere: clean.
        backend.fail_pipeline(scene.primitives()[0].pipeline);
        backend.fail_draw(scene.primitives()[1].mesh.submeshes[1].index_buffer);

        let mut failures = 0;
        let mut sink = |_: &RenderError| failures += 1;
        renderer(0.0).render_frame(&mut backend, &scene, &mut sink);
        assert_eq!(failures, 2);

        for p in scene.primitives() {
            let states: Vec<_> = backend
                .calls()
                .into_iter()
                .filter_map(|c| match c {
                    Call::Purgeable { buffer, state } if buffer == p.mesh.vertex_buffer => Some(state),
                    _ => None,
                })
                .collect();
            assert_eq!(states, [PurgeableState::NonPurgeable, PurgeableState::Purgeable]);
        }
    }

    #[test]
    fn failed_draw_stops_remaining_submeshes() {
        let mut backend = RecordingBackend::new();
        let scene = prepared(
            &mut backend,
            Scene::new().with(Primitive::new(ShapeKind::Cone, 0.5, Color::BLUE).unwrap()),
        );
        let side = scene.primitives()[0].mesh.submeshes[0].index_buffer;
        backend.fail_draw(side);

        let mut errors = Vec::new();
        let mut sink = |e: &RenderError| errors.push(e.clone());
        renderer(0.0).render_frame(&mut backend, &scene, &mut sink);

        assert!(matches!(errors[..], [RenderError::Draw { index: 0, submesh: 0, .. }]));
        assert_eq!(errors[0].index(), 0);
        let draws = backend.calls().iter().filter(|c| matches!(c, Call::DrawIndexed { .. })).count();
        assert_eq!(draws, 1);
    }

    #[test]
    fn persistent_failures_escalate_after_threshold() {
        let mut backend = RecordingBackend::new();
        let scene = prepared(&mut backend, example_scene());
        backend.fail_pipeline(scene.primitives()[1].pipeline);
        let mut r = FrameRenderer::new(RendererConfig { max_consecutive_failures: 3, ..Default::default() });
        let mut sink = |_: &RenderError| {};

        assert!(!r.render_frame(&mut backend, &scene, &mut sink).is_fatal());
        assert!(!r.render_frame(&mut backend, &scene, &mut sink).is_fatal());
        assert_eq!(
            r.render_frame(&mut backend, &scene, &mut sink),
            FrameOutcome::Fatal(FatalReason::PersistentFailures { frames: 3 })
        );
    }

    #[test]
    fn clean_frame_resets_failure_streak() {
        let mut backend = RecordingBackend::new();
        let scene = prepared(&mut backend, example_scene());
        let pipeline = scene.primitives()[0].pipeline;
        let mut r = FrameRenderer::new(RendererConfig { max_consecutive_failures: 2, ..Default::default() });
        let mut sink = |_: &RenderError| {};

        backend.fail_pipeline(pipeline);
        r.render_frame(&mut backend, &scene, &mut sink);
        assert_eq!(r.failing_frames(), 1);

        backend.heal_pipeline(pipeline);
        r.render_frame(&mut backend, &scene, &mut sink);
        assert_eq!(r.failing_frames(), 0);

        backend.fail_pipeline(pipeline);
        assert!(!r.render_frame(&mut backend, &scene, &mut sink).is_fatal());
    }

    #[test]
    fn zero_threshold_never_escalates() {
        let mut backend = RecordingBackend::new();
        let scene = prepared(&mut backend, example_scene());
        backend.fail_pipeline(scene.primitives()[0].pipeline);
        let mut r = FrameRenderer::new(RendererConfig { max_consecutive_failures: 0, ..Default::default() });
        let mut sink = |_: &RenderError| {};

        for _ in 0..10 {
            assert!(!r.render_frame(&mut backend, &scene, &mut sink).is_fatal());
        }
        assert_eq!(r.failing_frames(), 10);
    }
}
