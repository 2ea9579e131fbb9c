//! Unit cube mesh: 24 vertices (four per face, each with its own normal) and
//! 12 triangles.

use glam::Vec3;
use tessera_engine::math::{rgb_to_screen_space, ColorRgba};
use tessera_engine::scene::{Object, Triangle, Vertex};

struct Palette {
    dark_red: ColorRgba,
    pink: ColorRgba,
    salmon: ColorRgba,
    orange: ColorRgba,
}

fn palette() -> Palette {
    Palette {
        dark_red: rgb_to_screen_space(114, 0, 38),
        pink: rgb_to_screen_space(206, 66, 87),
        salmon: rgb_to_screen_space(255, 127, 81),
        orange: rgb_to_screen_space(255, 155, 84),
    }
}

/// Corner offsets are ±0.5 on every axis; quad corners are listed in
/// (-,-), (+,-), (-,+), (+,+) order over the face's two free axes.
fn face(corners: [[f32; 3]; 4], colour: ColorRgba, normal: Vec3) -> [Vertex; 4] {
    corners.map(|c| Vertex::new(Vec3::from_array(c), colour, normal))
}

pub fn cube_vertices() -> Vec<Vertex> {
    let p = palette();
    let faces = [
        // bottom
        face(
            [[-0.5, -0.5, -0.5], [0.5, -0.5, -0.5], [-0.5, -0.5, 0.5], [0.5, -0.5, 0.5]],
            p.orange,
            Vec3::NEG_Y,
        ),
        // top
        face(
            [[-0.5, 0.5, -0.5], [0.5, 0.5, -0.5], [-0.5, 0.5, 0.5], [0.5, 0.5, 0.5]],
            p.dark_red,
            Vec3::Y,
        ),
        // front
        face(
            [[-0.5, -0.5, -0.5], [0.5, -0.5, -0.5], [-0.5, 0.5, -0.5], [0.5, 0.5, -0.5]],
            p.orange,
            Vec3::Z,
        ),
        // back
        face(
            [[-0.5, -0.5, 0.5], [0.5, -0.5, 0.5], [-0.5, 0.5, 0.5], [0.5, 0.5, 0.5]],
            p.pink,
            Vec3::NEG_Z,
        ),
        // left
        face(
            [[-0.5, -0.5, -0.5], [-0.5, -0.5, 0.5], [-0.5, 0.5, -0.5], [-0.5, 0.5, 0.5]],
            p.salmon,
            Vec3::NEG_X,
        ),
        // right
        face(
            [[0.5, -0.5, -0.5], [0.5, -0.5, 0.5], [0.5, 0.5, -0.5], [0.5, 0.5, 0.5]],
            p.salmon,
            Vec3::X,
        ),
    ];
    faces.into_iter().flatten().collect()
}

pub const CUBE_TRIANGLES: [Triangle; 12] = [
    [2, 0, 1],
    [1, 3, 2], // bottom
    [16, 17, 18],
    [17, 18, 19], // left
    [20, 21, 22],
    [21, 22, 23], // right
    [6, 4, 5],
    [5, 7, 6], // top
    [8, 9, 10],
    [9, 10, 11], // front
    [12, 13, 14],
    [13, 14, 15], // back
];

/// A unit cube at the origin with identity rotation and unit scale.
pub fn cube_object() -> Object {
    Object::new(cube_vertices(), CUBE_TRIANGLES.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── mesh shape ──────────────────────────────────────────────────────

    #[test]
    fn cube_has_24_vertices_and_12_triangles() {
        let cube = cube_object();
        assert_eq!(cube.vertices.len(), 24);
        assert_eq!(cube.triangles.len(), 12);
        assert!(cube.indices_in_bounds());
    }

    #[test]
    fn every_vertex_is_a_cube_corner() {
        for v in cube_vertices() {
            for c in v.position.to_array() {
                assert_eq!(c.abs(), 0.5);
            }
        }
    }

    #[test]
    fn every_vertex_is_used() {
        let mut used = [false; 24];
        for tri in CUBE_TRIANGLES {
            for i in tri {
                used[i as usize] = true;
            }
        }
        assert!(used.iter().all(|&u| u));
    }

    // ── faces ───────────────────────────────────────────────────────────

    #[test]
    fn face_vertices_share_one_unit_normal() {
        let verts = cube_vertices();
        for quad in verts.chunks(4) {
            let n = quad[0].normal;
            assert_eq!(n.length(), 1.0);
            assert!(quad.iter().all(|v| v.normal == n && v.colour == quad[0].colour));
        }
    }

    #[test]
    fn side_faces_use_the_salmon_colour() {
        let verts = cube_vertices();
        let salmon = rgb_to_screen_space(255, 127, 81);
        assert!(verts[16..24].iter().all(|v| v.colour == salmon));
        assert_eq!(verts[4].colour, rgb_to_screen_space(114, 0, 38));
    }

    #[test]
    fn face_normals_point_along_their_fixed_axis() {
        let verts = cube_vertices();
        for v in &verts[16..20] {
            assert_eq!(v.position.x, -0.5);
            assert_eq!(v.normal, Vec3::NEG_X);
        }
        for v in &verts[4..8] {
            assert_eq!(v.position.y, 0.5);
        }
    }
}
