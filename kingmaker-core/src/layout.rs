//! Hex orientation and world-space conversion

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::hex::{FractionalHex, HexCoord};

pub const SQRT3: f32 = 1.732_050_8;

/// Hexagon orientation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Corner at the top; rows of hexes are horizontal
    PointyTop,
    /// Edge at the top; columns of hexes are vertical
    FlatTop,
}

/// Orientation plus hex size (center to corner)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HexLayout {
    pub orientation: Orientation,
    pub size: f32,
}

impl HexLayout {
    pub const fn pointy(size: f32) -> Self {
        Self { orientation: Orientation::PointyTop, size }
    }

    pub const fn flat(size: f32) -> Self {
        Self { orientation: Orientation::FlatTop, size }
    }

    /// Center of `hex` on the layout plane.
    ///
    /// Pointy-top returns (x, y); flat-top returns (x, z) for a ground plane.
    pub fn hex_to_world(&self, hex: HexCoord) -> Vec2 {
        let q = hex.q as f32;
        let r = hex.r as f32;
        match self.orientation {
            Orientation::PointyTop => Vec2::new(
                self.size * (SQRT3 * q + SQRT3 / 2.0 * r),
                self.size * (1.5 * r),
            ),
            Orientation::FlatTop => Vec2::new(
                self.size * (1.5 * q),
                self.size * (SQRT3 / 2.0 * q + SQRT3 * r),
            ),
        }
    }

    /// Fractional axial position of a plane point (inverse of [`Self::hex_to_world`])
    pub fn world_to_fractional(&self, pos: Vec2) -> FractionalHex {
        match self.orientation {
            Orientation::PointyTop => FractionalHex::new(
                (SQRT3 / 3.0 * pos.x - 1.0 / 3.0 * pos.y) / self.size,
                (2.0 / 3.0 * pos.y) / self.size,
            ),
            Orientation::FlatTop => FractionalHex::new(
                (2.0 / 3.0 * pos.x) / self.size,
                (-1.0 / 3.0 * pos.x + SQRT3 / 3.0 * pos.y) / self.size,
            ),
        }
    }

    /// Hex containing a plane point
    pub fn world_to_hex(&self, pos: Vec2) -> HexCoord {
        self.world_to_fractional(pos).round()
    }

    /// Hex center on the y=0 ground plane, (x, 0, z)
    pub fn hex_to_world_3d(&self, hex: HexCoord) -> Vec3 {
        let p = self.hex_to_world(hex);
        Vec3::new(p.x, 0.0, p.y)
    }

    /// Hex under a ground-plane point; the y component is ignored
    pub fn world_3d_to_hex(&self, pos: Vec3) -> HexCoord {
        self.world_to_hex(Vec2::new(pos.x, pos.z))
    }

    /// Six corners of `hex` on the layout plane. Pointy-top corners start at
    /// 30 degrees, flat-top corners at 0.
    pub fn corners(&self, hex: HexCoord) -> [Vec2; 6] {
        let center = self.hex_to_world(hex);
        let start = match self.orientation {
            Orientation::PointyTop => 30.0f32,
            Orientation::FlatTop => 0.0f32,
        };
        std::array::from_fn(|i| {
            let angle = (start + 60.0 * i as f32).to_radians();
            center + Vec2::new(angle.cos(), angle.sin()) * self.size
        })
    }

    /// Extent along the first plane axis
    pub fn hex_width(&self) -> f32 {
        match self.orientation {
            Orientation::PointyTop => SQRT3 * self.size,
            Orientation::FlatTop => 2.0 * self.size,
        }
    }

    /// Extent along the second plane axis
    pub fn hex_height(&self) -> f32 {
        match self.orientation {
            Orientation::PointyTop => 2.0 * self.size,
            Orientation::FlatTop => SQRT3 * self.size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_pointy_positions() {
        let layout = HexLayout::pointy(1.0);
        assert!(approx(layout.hex_to_world(HexCoord::ZERO), Vec2::ZERO));
        assert!(approx(layout.hex_to_world(HexCoord::new(1, 0)), Vec2::new(SQRT3, 0.0)));
        assert!(approx(layout.hex_to_world(HexCoord::new(0, 1)), Vec2::new(SQRT3 / 2.0, 1.5)));
    }

    #[test]
    fn test_flat_positions() {
        let layout = HexLayout::flat(2.0);
        assert!(approx(layout.hex_to_world(HexCoord::new(1, 0)), Vec2::new(3.0, SQRT3)));
        assert!(approx(layout.hex_to_world(HexCoord::new(0, 1)), Vec2::new(0.0, 2.0 * SQRT3)));
        let p = layout.hex_to_world_3d(HexCoord::new(1, 0));
        assert_eq!(p.y, 0.0);
        assert!((p.z - SQRT3).abs() < 1e-4);
    }

    #[test]
    fn test_point_near_center_maps_to_hex() {
        let layout = HexLayout::pointy(1.0);
        let center = layout.hex_to_world(HexCoord::new(2, -1));
        assert_eq!(layout.world_to_hex(center + Vec2::new(0.3, -0.2)), HexCoord::new(2, -1));
    }

    #[test]
    fn test_corners_at_size() {
        for layout in [HexLayout::pointy(1.5), HexLayout::flat(1.5)] {
            let hex = HexCoord::new(1, 1);
            let center = layout.hex_to_world(hex);
            for corner in layout.corners(hex) {
                assert!(((corner - center).length() - 1.5).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_adjacent_hexes_share_two_corners() {
        for layout in [HexLayout::pointy(1.0), HexLayout::flat(1.0)] {
            let a = layout.corners(HexCoord::ZERO);
            let b = layout.corners(HexCoord::new(1, 0));
            let shared = a
                .iter()
                .filter(|ca| b.iter().any(|cb| approx(**ca, *cb)))
                .count();
            assert_eq!(shared, 2);
        }
    }

    proptest! {
        #[test]
        fn prop_pointy_round_trip(q in -60i32..60, r in -60i32..60, size in 0.25f32..8.0) {
            let layout = HexLayout::pointy(size);
            let hex = HexCoord::new(q, r);
            prop_assert_eq!(layout.world_to_hex(layout.hex_to_world(hex)), hex);
        }

        #[test]
        fn prop_flat_round_trip(q in -60i32..60, r in -60i32..60, size in 0.25f32..8.0) {
            let layout = HexLayout::flat(size);
            let hex = HexCoord::new(q, r);
            prop_assert_eq!(layout.world_3d_to_hex(layout.hex_to_world_3d(hex)), hex);
        }
    }
}
