//! Curve editor demos.
//!
//! [`EditorState`] is the pointer state machine and knows nothing about the
//! GPU. [`CurveEditorApp`] owns the renderer and copies edited curves into
//! their object slots once per frame.

use glam::Vec2;
use tessera_engine::core::{App, AppControl, FrameCtx};
use tessera_engine::curves::{
    pick_curve, ControlPoint, CubicBezier, EditableCurve, QuadraticBezier, EDIT_DISTANCE_THRESHOLD,
};
use tessera_engine::input::{InputEvent, Key, MouseButton, MouseButtonState, PointerButtonEvent};
use tessera_engine::math::{rgb_to_screen_space, ColorRgba, Rng};
use tessera_engine::render::{
    shaders, BatchRenderer, ControlPointStreams, Projection, RendererSettings, Viewport,
};
use tessera_engine::scene::ObjectId;

use crate::fps::{window_title, FpsCounter};

/// Control points of a new cubic stay within this many pixels of its anchor.
pub const CUBIC_SPREAD: i32 = 100;

// ── state machine ────────────────────────────────────────────────────────

/// Selection and dirty tracking for a list of editable curves.
///
/// Curve `i` lives in renderer object slot `i`.
pub struct EditorState<C> {
    curves: Vec<C>,
    resized: Vec<bool>,
    selected: Option<(usize, ControlPoint)>,
    threshold: f32,
}

impl<C: EditableCurve> EditorState<C> {
    pub fn new(curves: Vec<C>) -> Self {
        let resized = vec![false; curves.len()];
        Self {
            curves,
            resized,
            selected: None,
            threshold: EDIT_DISTANCE_THRESHOLD,
        }
    }

    #[inline]
    pub fn curves(&self) -> &[C] {
        &self.curves
    }

    #[inline]
    pub fn selection(&self) -> Option<(usize, ControlPoint)> {
        self.selected
    }

    pub fn pointer_down(&mut self, pointer: Vec2) {
        self.selected = pick_curve(&self.curves, pointer, self.threshold);
        if let Some((index, point)) = self.selected {
            log::debug!("selected curve {index} point {point:?}");
        }
    }

    /// Drags the selected control point, if any, to `pointer`.
    pub fn pointer_moved(&mut self, pointer: Vec2) {
        let Some((index, point)) = self.selected else { return };
        let Some(curve) = self.curves.get_mut(index) else { return };
        curve.move_control_point(point, pointer);
        self.resized[index] = true;
    }

    pub fn pointer_up(&mut self) {
        self.selected = None;
    }

    /// Feeds one input event; only the left button edits.
    pub fn handle_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerButton(PointerButtonEvent {
                button: MouseButton::Left,
                state,
                position,
            }) => match state {
                MouseButtonState::Pressed => self.pointer_down(position),
                MouseButtonState::Released => self.pointer_up(),
            },
            InputEvent::PointerMoved(position) => self.pointer_moved(position),
            _ => {}
        }
    }

    /// Indices of curves edited since the last call; clears their flags.
    pub fn take_resized(&mut self) -> Vec<usize> {
        let mut dirty = Vec::new();
        for (i, flag) in self.resized.iter_mut().enumerate() {
            if std::mem::take(flag) {
                dirty.push(i);
            }
        }
        dirty
    }
}

// ── scene setup ──────────────────────────────────────────────────────────

fn random_point(rng: &mut Rng, viewport: Viewport) -> Vec2 {
    Vec2::new(
        rng.rand_int(0, viewport.width as i32) as f32,
        rng.rand_int(0, viewport.height as i32) as f32,
    )
}

/// Cubics scattered around random anchors inside the viewport.
pub fn spawn_cubics(rng: &mut Rng, viewport: Viewport, count: usize, colour: ColorRgba) -> Vec<CubicBezier> {
    (0..count)
        .map(|_| {
            let anchor = random_point(rng, viewport);
            let mut offset = || {
                anchor
                    + Vec2::new(
                        rng.rand_int(-CUBIC_SPREAD, CUBIC_SPREAD) as f32,
                        rng.rand_int(-CUBIC_SPREAD, CUBIC_SPREAD) as f32,
                    )
            };
            let (a, b, c, d) = (offset(), offset(), offset(), offset());
            CubicBezier::new(a, b, c, d, colour)
        })
        .collect()
}

/// Quadratics with every control point anywhere in the viewport.
pub fn spawn_quadratics(rng: &mut Rng, viewport: Viewport, count: usize, colour: ColorRgba) -> Vec<QuadraticBezier> {
    (0..count)
        .map(|_| {
            let a = random_point(rng, viewport);
            let b = random_point(rng, viewport);
            let c = random_point(rng, viewport);
            QuadraticBezier::new(a, b, c, colour)
        })
        .collect()
}

// ── app ──────────────────────────────────────────────────────────────────

type Spawner<C> = fn(&mut Rng, Viewport, usize, ColorRgba) -> Vec<C>;

/// Renders a set of curves in pixel space and lets the user drag their
/// control points.
pub struct CurveEditorApp<C> {
    name: &'static str,
    renderer: BatchRenderer,
    editor: Option<EditorState<C>>,
    spawn: Spawner<C>,
    rng: Rng,
    count: usize,
    fps: FpsCounter,
}

fn curve_settings(fragment: &'static str) -> RendererSettings {
    RendererSettings::new(shaders::CURVE_VERTEX, fragment)
        .with_background(rgb_to_screen_space(17, 17, 17))
        .with_projection(Projection::Screen2d)
        .with_extension(ControlPointStreams::new())
}

impl CurveEditorApp<CubicBezier> {
    pub fn cubic(rng: Rng, count: usize) -> Self {
        Self::new("cubic", shaders::CUBIC_BEZIER_FRAGMENT, spawn_cubics, rng, count)
    }
}

impl CurveEditorApp<QuadraticBezier> {
    pub fn quadratic(rng: Rng, count: usize) -> Self {
        Self::new("quadratic", shaders::QUADRATIC_BEZIER_FRAGMENT, spawn_quadratics, rng, count)
    }
}

impl<C: EditableCurve> CurveEditorApp<C> {
    fn new(name: &'static str, fragment: &'static str, spawn: Spawner<C>, rng: Rng, count: usize) -> Self {
        Self {
            name,
            renderer: BatchRenderer::new(curve_settings(fragment)),
            editor: None,
            spawn,
            rng,
            count,
            fps: FpsCounter::default(),
        }
    }

    /// Spawns the curves once the window size is known.
    fn populate(&mut self, viewport: Viewport) -> &mut EditorState<C> {
        let renderer = &mut self.renderer;
        let (spawn, rng, count, name) = (self.spawn, &mut self.rng, self.count, self.name);
        self.editor.get_or_insert_with(|| {
            let curves = spawn(rng, viewport, count, ColorRgba::white());
            renderer.objects_mut().clear();
            for curve in &curves {
                renderer.push_object(curve.object().clone());
            }
            log::info!("{name}: spawned {} curves over {}x{}", curves.len(), viewport.width, viewport.height);
            EditorState::new(curves)
        })
    }
}

impl<C: EditableCurve> App for CurveEditorApp<C> {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input_frame.key_pressed(Key::Escape) {
            return AppControl::Exit;
        }
        if let Some(fps) = self.fps.tick(ctx.time.elapsed) {
            ctx.runtime.set_title(window_title(self.name, fps));
        }

        let editor = self.populate(ctx.window.viewport());
        for event in &ctx.input_frame.events {
            editor.handle_event(event);
        }

        let Self { renderer, editor, .. } = self;
        let Some(editor) = editor.as_mut() else {
            return AppControl::Continue;
        };

        ctx.render(|rctx, target| {
            renderer.render_frame(rctx, target, |renderer, rctx| {
                let dirty = editor.take_resized();
                if dirty.is_empty() {
                    return;
                }
                for i in dirty {
                    if let (Some(slot), Some(curve)) = (renderer.object_mut(ObjectId(i)), editor.curves().get(i)) {
                        *slot = curve.object().clone();
                    }
                }
                renderer.write_objects_to_vertex_buffer(rctx);
            })
        })
    }
}
