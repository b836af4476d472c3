//! Flat-top hexagonal prism geometry
//!
//! Vertex layout:
//! - 0: top center, 1-6: top corners
//! - 7: bottom center, 8-13: bottom corners
//! - 14-37: side quads, 4 per side (topA, topB, botA, botB)
//!
//! Caps and sides use separate vertices so every face gets its own normal.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

pub const VERTEX_COUNT: usize = 38;
pub const INDEX_COUNT: usize = 72;

/// Half of the prism's total height of 0.25
pub const HALF_HEIGHT: f32 = 0.125;

const TOP_CENTER: u32 = 0;
const BOTTOM_CENTER: u32 = 7;
const SIDE_START: u32 = 14;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HexPrismMesh {
    pub radius: f32,
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub indices: Vec<u32>,
}

impl HexPrismMesh {
    /// Prism with flat-top corners at 0, 60, ..., 300 degrees
    pub fn flat_top(radius: f32) -> Self {
        let corners: [Vec3; 6] = std::array::from_fn(|i| {
            let angle = (60.0 * i as f32).to_radians();
            Vec3::new(radius * angle.cos(), 0.0, radius * angle.sin())
        });
        let cap_uv = |i: usize| {
            let angle = (60.0 * i as f32).to_radians();
            Vec2::new(0.5 + 0.5 * angle.cos(), 0.5 + 0.5 * angle.sin())
        };
        let up = Vec3::new(0.0, HALF_HEIGHT, 0.0);

        let mut positions = Vec::with_capacity(VERTEX_COUNT);
        let mut normals = Vec::with_capacity(VERTEX_COUNT);
        let mut uvs = Vec::with_capacity(VERTEX_COUNT);

        // Top cap
        positions.push(up);
        normals.push(Vec3::Y);
        uvs.push(Vec2::splat(0.5));
        for (i, corner) in corners.iter().enumerate() {
            positions.push(*corner + up);
            normals.push(Vec3::Y);
            uvs.push(cap_uv(i));
        }

        // Bottom cap
        positions.push(-up);
        normals.push(Vec3::NEG_Y);
        uvs.push(Vec2::splat(0.5));
        for (i, corner) in corners.iter().enumerate() {
            positions.push(*corner - up);
            normals.push(Vec3::NEG_Y);
            uvs.push(cap_uv(i));
        }

        // Sides
        for i in 0..6 {
            let next = (i + 1) % 6;
            let top_a = corners[i] + up;
            let top_b = corners[next] + up;
            let normal = (top_b - top_a).cross(Vec3::NEG_Y).normalize();

            positions.extend([top_a, top_b, corners[i] - up, corners[next] - up]);
            normals.extend([normal; 4]);
            uvs.extend([
                Vec2::new(0.0, 1.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 0.0),
            ]);
        }

        let mut indices = Vec::with_capacity(INDEX_COUNT);
        for i in 0..6u32 {
            let next = (i + 1) % 6;
            indices.extend([TOP_CENTER, i + 1, next + 1]);
        }
        for i in 0..6u32 {
            let next = (i + 1) % 6;
            indices.extend([BOTTOM_CENTER, next + 8, i + 8]);
        }
        for side in 0..6u32 {
            let a = SIDE_START + side * 4;
            indices.extend([a, a + 2, a + 1, a + 1, a + 2, a + 3]);
        }

        Self {
            radius,
            positions,
            normals,
            uvs,
            indices,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Axis-aligned (min, max) corners
    pub fn bounds(&self) -> (Vec3, Vec3) {
        self.positions.iter().fold(
            (Vec3::splat(f32::MAX), Vec3::splat(f32::MIN)),
            |(min, max), p| (min.min(*p), max.max(*p)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_topology() {
        let mesh = HexPrismMesh::flat_top(1.0);
        assert_eq!(mesh.vertex_count(), VERTEX_COUNT);
        assert_eq!(mesh.normals.len(), VERTEX_COUNT);
        assert_eq!(mesh.uvs.len(), VERTEX_COUNT);
        assert_eq!(mesh.indices.len(), INDEX_COUNT);
        assert_eq!(mesh.triangle_count(), 24);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < VERTEX_COUNT));
    }

    #[test]
    fn test_cap_fans() {
        let mesh = HexPrismMesh::flat_top(1.0);
        assert_eq!(&mesh.indices[0..3], &[0, 1, 2]);
        assert_eq!(&mesh.indices[15..18], &[0, 6, 1]);
        assert_eq!(&mesh.indices[18..21], &[7, 9, 8]);
        assert_eq!(&mesh.indices[33..36], &[7, 8, 13]);
        assert_eq!(&mesh.indices[36..42], &[14, 16, 15, 15, 16, 17]);
        assert_eq!(&mesh.indices[66..72], &[34, 36, 35, 35, 36, 37]);
    }

    #[test]
    fn test_normals_face_outward() {
        let mesh = HexPrismMesh::flat_top(2.0);
        for i in 0..7 {
            assert_eq!(mesh.normals[i], Vec3::Y);
            assert_eq!(mesh.normals[i + 7], Vec3::NEG_Y);
        }
        for side in 0..6 {
            let base = 14 + side * 4;
            let normal = mesh.normals[base];
            let mid = (mesh.positions[base] + mesh.positions[base + 3]) * 0.5;
            assert!(normal.dot(mid) > 0.0, "side {} normal points inward", side);
            assert!((normal.length() - 1.0).abs() < 1e-5);
            assert!(normal.y.abs() < 1e-6);
            for k in 1..4 {
                assert_eq!(mesh.normals[base + k], normal);
            }
        }
    }

    #[test]
    fn test_dimensions() {
        let mesh = HexPrismMesh::flat_top(1.0);
        assert!(approx(mesh.positions[1], Vec3::new(1.0, HALF_HEIGHT, 0.0)));
        assert!(approx(mesh.positions[8], Vec3::new(1.0, -HALF_HEIGHT, 0.0)));
        let (min, max) = mesh.bounds();
        assert!((max.y - min.y - 0.25).abs() < 1e-6);
        assert!((max.x - 1.0).abs() < 1e-5 && (min.x + 1.0).abs() < 1e-5);
    }
}
