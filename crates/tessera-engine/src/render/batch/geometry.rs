use crate::scene::Object;

/// Flattened vertex streams for every object, ready for upload.
///
/// Each stream has one entry per vertex; `indices` are global (offset by the
/// number of vertices emitted before the owning object).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedGeometry {
    /// `xyz` plus `w = 1`.
    pub positions: Vec<[f32; 4]>,
    pub colours: Vec<[f32; 4]>,
    pub normals: Vec<[f32; 3]>,
    /// Owning object's slot, i.e. its matrix index in the matrix texture.
    pub matrix_indices: Vec<u32>,
    pub indices: Vec<u32>,
}

impl MergedGeometry {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

/// Concatenates all objects into shared streams.
pub fn merge_objects(objects: &[Object]) -> MergedGeometry {
    let vertex_total: usize = objects.iter().map(|o| o.vertices.len()).sum();
    let index_total: usize = objects.iter().map(|o| o.triangles.len() * 3).sum();

    let mut merged = MergedGeometry {
        positions: Vec::with_capacity(vertex_total),
        colours: Vec::with_capacity(vertex_total),
        normals: Vec::with_capacity(vertex_total),
        matrix_indices: Vec::with_capacity(vertex_total),
        indices: Vec::with_capacity(index_total),
    };

    let mut offset = 0u32;
    for (slot, object) in objects.iter().enumerate() {
        for v in &object.vertices {
            merged.positions.push(v.position.extend(1.0).to_array());
            merged.colours.push(v.colour.to_array());
            merged.normals.push(v.normal.to_array());
            merged.matrix_indices.push(slot as u32);
        }

        merged
            .indices
            .extend(object.triangles.iter().flatten().map(|&i| i + offset));

        offset += object.vertices.len() as u32;
    }

    merged
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::math::ColorRgba;
    use crate::scene::Vertex;

    fn fan(n: usize, colour: ColorRgba) -> Object {
        let vertices = (0..n)
            .map(|i| Vertex::new(Vec3::new(i as f32, 1.0, 2.0), colour, Vec3::Y))
            .collect();
        let triangles = (1..n as u32 - 1).map(|i| [0, i, i + 1]).collect();
        Object::new(vertices, triangles)
    }

    #[test]
    fn empty_scene_merges_to_nothing() {
        let merged = merge_objects(&[]);
        assert_eq!(merged.vertex_count(), 0);
        assert_eq!(merged.index_count(), 0);
    }

    #[test]
    fn index_count_is_three_per_triangle() {
        let objects = [fan(4, ColorRgba::white()), fan(3, ColorRgba::black()), fan(6, ColorRgba::white())];
        let merged = merge_objects(&objects);

        let expected: usize = objects.iter().map(|o| o.triangles.len() * 3).sum();
        assert_eq!(merged.index_count() as usize, expected);
        assert_eq!(merged.vertex_count(), 13);
    }

    #[test]
    fn indices_are_offset_into_the_owning_range() {
        let objects = [fan(4, ColorRgba::white()), fan(5, ColorRgba::white())];
        let merged = merge_objects(&objects);

        // First object: triangles [0,1,2], [0,2,3].
        assert_eq!(&merged.indices[..6], &[0, 1, 2, 0, 2, 3]);
        // Second object starts after four vertices.
        assert_eq!(&merged.indices[6..9], &[4, 5, 6]);

        let mut start = 0u32;
        let mut cursor = 0usize;
        for o in &objects {
            let end = start + o.vertices.len() as u32;
            for &i in &merged.indices[cursor..cursor + o.triangles.len() * 3] {
                assert!(i >= start && i < end);
            }
            cursor += o.triangles.len() * 3;
            start = end;
        }
    }

    #[test]
    fn per_vertex_streams_follow_objects() {
        let red = ColorRgba::new(1.0, 0.0, 0.0, 0.5);
        let objects = [fan(3, ColorRgba::white()), fan(3, red)];
        let merged = merge_objects(&objects);

        assert_eq!(merged.matrix_indices, vec![0, 0, 0, 1, 1, 1]);
        assert_eq!(merged.positions[4], [1.0, 1.0, 2.0, 1.0]);
        assert_eq!(merged.colours[5], [1.0, 0.0, 0.0, 0.5]);
        assert_eq!(merged.normals[0], [0.0, 1.0, 0.0]);
    }
}
