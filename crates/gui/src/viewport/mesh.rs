//! Procedural unit meshes for the puppet primitives.
//!
//! Geometry nodes reference meshes by name ("cube", "sphere"); sizing
//! comes from the node transform, so every mesh here is unit-sized
//! around the origin.

#![allow(dead_code)]

use std::collections::HashMap;

use glam::Vec3;

/// CPU-side mesh data: interleaved [pos.x, pos.y, pos.z, norm.x, norm.y, norm.z]
#[derive(Clone)]
pub struct MeshData {
    /// 6 floats per vertex: position(3) + normal(3)
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 6
    }
}

/// Lines mesh: interleaved [pos.x, pos.y, pos.z, r, g, b, a]
pub struct LineMeshData {
    /// 7 floats per vertex: position(3) + color(4)
    pub vertices: Vec<f32>,
}

impl LineMeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 7
    }
}

/// Segments in the trackball guide circle.
pub const CIRCLE_PTS: u32 = 48;

/// All meshes a puppet description may reference, keyed by name.
pub fn builtin_meshes() -> HashMap<String, MeshData> {
    let mut meshes = HashMap::new();
    meshes.insert("cube".to_string(), cube());
    meshes.insert("sphere".to_string(), sphere(24, 16));
    meshes
}

/// Unit cube centred at the origin (extent 0.5 per axis), flat-shaded.
pub fn cube() -> MeshData {
    let h = 0.5;

    let faces: [([Vec3; 4], Vec3); 6] = [
        // Front (+Z)
        ([Vec3::new(-h, -h, h), Vec3::new(h, -h, h), Vec3::new(h, h, h), Vec3::new(-h, h, h)], Vec3::Z),
        // Back (-Z)
        ([Vec3::new(h, -h, -h), Vec3::new(-h, -h, -h), Vec3::new(-h, h, -h), Vec3::new(h, h, -h)], Vec3::NEG_Z),
        // Right (+X)
        ([Vec3::new(h, -h, h), Vec3::new(h, -h, -h), Vec3::new(h, h, -h), Vec3::new(h, h, h)], Vec3::X),
        // Left (-X)
        ([Vec3::new(-h, -h, -h), Vec3::new(-h, -h, h), Vec3::new(-h, h, h), Vec3::new(-h, h, -h)], Vec3::NEG_X),
        // Top (+Y)
        ([Vec3::new(-h, h, h), Vec3::new(h, h, h), Vec3::new(h, h, -h), Vec3::new(-h, h, -h)], Vec3::Y),
        // Bottom (-Y)
        ([Vec3::new(-h, -h, -h), Vec3::new(h, -h, -h), Vec3::new(h, -h, h), Vec3::new(-h, -h, h)], Vec3::NEG_Y),
    ];

    let mut vertices = Vec::with_capacity(24 * 6);
    let mut indices = Vec::with_capacity(36);

    for (quad, normal) in &faces {
        let base = (vertices.len() / 6) as u32;
        for v in quad {
            vertices.extend_from_slice(&[v.x, v.y, v.z, normal.x, normal.y, normal.z]);
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    MeshData { vertices, indices }
}

/// Unit UV sphere (radius 0.5) centred at the origin.
pub fn sphere(segments: u32, rings: u32) -> MeshData {
    let radius = 0.5;
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for ring in 0..=rings {
        let phi = std::f32::consts::PI * ring as f32 / rings as f32;
        let y = phi.cos();
        let r = phi.sin();
        for seg in 0..=segments {
            let theta = std::f32::consts::TAU * seg as f32 / segments as f32;
            let n = Vec3::new(r * theta.cos(), y, r * theta.sin());
            let p = n * radius;
            vertices.extend_from_slice(&[p.x, p.y, p.z, n.x, n.y, n.z]);
        }
    }

    let stride = segments + 1;
    for ring in 0..rings {
        for seg in 0..segments {
            let a = ring * stride + seg;
            let b = a + stride;
            indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
        }
    }

    MeshData { vertices, indices }
}

/// Unit-radius circle in the xy plane, as a line loop expanded to
/// segments, for the trackball guide.
pub fn circle(color: [f32; 4]) -> LineMeshData {
    let mut vertices = Vec::with_capacity(CIRCLE_PTS as usize * 2 * 7);
    for i in 0..CIRCLE_PTS {
        let a0 = std::f32::consts::TAU * i as f32 / CIRCLE_PTS as f32;
        let a1 = std::f32::consts::TAU * (i + 1) as f32 / CIRCLE_PTS as f32;
        for a in [a0, a1] {
            vertices.extend_from_slice(&[a.cos(), a.sin(), 0.0]);
            vertices.extend_from_slice(&color);
        }
    }
    LineMeshData { vertices }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_has_24_vertices_36_indices() {
        let c = cube();
        assert_eq!(c.vertex_count(), 24);
        assert_eq!(c.indices.len(), 36);
    }

    #[test]
    fn test_cube_fits_unit_extent() {
        let c = cube();
        for v in c.vertices.chunks(6) {
            assert!(v[0].abs() <= 0.5 && v[1].abs() <= 0.5 && v[2].abs() <= 0.5);
        }
    }

    #[test]
    fn test_sphere_vertices_on_radius() {
        let s = sphere(24, 16);
        for v in s.vertices.chunks(6) {
            let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
            assert!((len - 0.5).abs() < 1e-4);
            // Normal is the unit position direction.
            let nlen = (v[3] * v[3] + v[4] * v[4] + v[5] * v[5]).sqrt();
            assert!((nlen - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_sphere_indices_in_bounds() {
        let s = sphere(12, 8);
        let count = s.vertex_count() as u32;
        assert!(s.indices.iter().all(|i| *i < count));
    }

    #[test]
    fn test_builtin_meshes_cover_description_names() {
        let meshes = builtin_meshes();
        assert!(meshes.contains_key("cube"));
        assert!(meshes.contains_key("sphere"));
    }

    #[test]
    fn test_circle_segment_count() {
        let c = circle([1.0, 1.0, 1.0, 1.0]);
        assert_eq!(c.vertex_count() as u32, CIRCLE_PTS * 2);
    }
}
