//! Spinning cubes: geometry uploaded once, transforms every frame.

use glam::{Quat, Vec3};
use tessera_engine::core::{App, AppControl, FrameCtx};
use tessera_engine::input::Key;
use tessera_engine::math::{axis_angle_to_quat, rgb_to_screen_space, Rng};
use tessera_engine::render::{shaders, BatchRenderer, Projection, RendererSettings};
use tessera_engine::scene::Object;

use crate::cube::cube_object;
use crate::fps::{window_title, FpsCounter};

/// Per-cube rotation about a fixed axis.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Spin {
    pub axis: Vec3,
    /// Radians per second.
    pub speed: f32,
    pub angle: f32,
}

impl Spin {
    pub fn advance(&mut self, dt: f32) -> Quat {
        self.angle = (self.angle + self.speed * dt).rem_euclid(std::f32::consts::TAU);
        axis_angle_to_quat(self.axis, self.angle)
    }
}

fn random_axis(rng: &mut Rng) -> Vec3 {
    Vec3::new(rng.rand(-1.0, 1.0), rng.rand(-1.0, 1.0), rng.rand(-1.0, 1.0))
        .try_normalize()
        .unwrap_or(Vec3::Y)
}

/// Cubes in a box in front of a camera looking down -Z.
pub fn spawn_cubes(rng: &mut Rng, count: usize) -> (Vec<Object>, Vec<Spin>) {
    (0..count)
        .map(|_| {
            let mut cube = cube_object();
            cube.position = Vec3::new(rng.rand(-40.0, 40.0), rng.rand(-25.0, 25.0), rng.rand(-80.0, -5.0));
            let mut spin = Spin {
                axis: random_axis(rng),
                speed: rng.rand(0.5, 2.5),
                angle: rng.rand(0.0, std::f32::consts::TAU),
            };
            cube.rotation = spin.advance(0.0);
            (cube, spin)
        })
        .unzip()
}

pub struct CubesApp {
    renderer: BatchRenderer,
    spins: Vec<Spin>,
    fps: FpsCounter,
}

impl CubesApp {
    pub fn new(mut rng: Rng, count: usize) -> Self {
        let settings = RendererSettings::new(shaders::MESH_VERTEX, shaders::MESH_FRAGMENT)
            .with_background(rgb_to_screen_space(17, 17, 17))
            .with_projection(Projection::default());
        let mut renderer = BatchRenderer::new(settings);

        let (cubes, spins) = spawn_cubes(&mut rng, count);
        renderer.objects_mut().extend(cubes);
        log::info!("cubes: spawned {count}");

        Self {
            renderer,
            spins,
            fps: FpsCounter::default(),
        }
    }
}

impl App for CubesApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input_frame.key_pressed(Key::Escape) {
            return AppControl::Exit;
        }
        if let Some(fps) = self.fps.tick(ctx.time.elapsed) {
            ctx.runtime.set_title(window_title("cubes", fps));
        }

        let dt = ctx.time.dt;
        let Self { renderer, spins, .. } = self;

        ctx.render(|rctx, target| {
            renderer.render_frame(rctx, target, |renderer, rctx| {
                for (cube, spin) in renderer.objects_mut().iter_mut().zip(spins.iter_mut()) {
                    cube.rotation = spin.advance(dt);
                }
                renderer.update_model_view_matrices(rctx);
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawns_one_spin_per_cube_in_front_of_camera() {
        let (cubes, spins) = spawn_cubes(&mut Rng::new(9), 200);
        assert_eq!(cubes.len(), 200);
        assert_eq!(spins.len(), 200);
        for cube in &cubes {
            assert!(cube.position.z < 0.0);
            assert!(cube.rotation.is_normalized());
        }
    }

    #[test]
    fn spin_axes_are_unit_length() {
        let (_, spins) = spawn_cubes(&mut Rng::new(1), 50);
        for s in spins {
            assert!((s.axis.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn spin_advances_by_speed_times_dt() {
        let mut spin = Spin { axis: Vec3::Z, speed: 2.0, angle: 0.0 };
        let q = spin.advance(0.25);
        assert!((spin.angle - 0.5).abs() < 1e-6);
        let expected = Quat::from_axis_angle(Vec3::Z, 0.5);
        assert!(q.abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn spin_angle_wraps() {
        let mut spin = Spin { axis: Vec3::X, speed: 1.0, angle: 6.0 };
        spin.advance(1.0);
        assert!(spin.angle >= 0.0 && spin.angle < std::f32::consts::TAU);
    }
}
