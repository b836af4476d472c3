//! Hex geometry with axial coordinates

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Axial hex coordinates. The cube component `s` is derived as `-q - r`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HexCoord {
    pub q: i32,
    pub r: i32,
}

/// Direction vectors in axial coordinates.
/// Index: 0=E, 1=NE, 2=NW, 3=W, 4=SW, 5=SE
pub const DIRECTIONS: [HexCoord; 6] = [
    HexCoord::new(1, 0),  // E
    HexCoord::new(1, -1), // NE
    HexCoord::new(0, -1), // NW
    HexCoord::new(-1, 0), // W
    HexCoord::new(-1, 1), // SW
    HexCoord::new(0, 1),  // SE
];

impl HexCoord {
    pub const ZERO: HexCoord = HexCoord::new(0, 0);

    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    pub const fn q(&self) -> i32 {
        self.q
    }

    pub const fn r(&self) -> i32 {
        self.r
    }

    pub const fn s(&self) -> i32 {
        -self.q - self.r
    }

    /// Distance between two hexes
    pub fn distance_to(&self, other: HexCoord) -> i32 {
        let dq = (self.q - other.q).abs();
        let dr = (self.r - other.r).abs();
        let ds = (self.s() - other.s()).abs();
        (dq + dr + ds) / 2
    }

    /// Distance from the origin
    pub fn length(&self) -> i32 {
        self.distance_to(Self::ZERO)
    }

    pub fn is_adjacent(&self, other: HexCoord) -> bool {
        self.distance_to(other) == 1
    }

    /// Get neighbor in direction. Any integer is accepted and wrapped into 0..6.
    pub fn neighbor(&self, direction: i32) -> HexCoord {
        *self + DIRECTIONS[direction.rem_euclid(6) as usize]
    }

    /// All six neighbors in direction order
    pub fn neighbors(&self) -> [HexCoord; 6] {
        DIRECTIONS.map(|dir| *self + dir)
    }

    /// Hexes at exactly `radius` steps from `self`, starting at the east
    /// corner. Empty for radius 0.
    pub fn ring(&self, radius: u32) -> Ring {
        Ring::new(*self, radius)
    }

    /// `self` followed by rings 1..=radius
    pub fn spiral(&self, radius: u32) -> impl Iterator<Item = HexCoord> {
        let center = *self;
        std::iter::once(center).chain((1..=radius).flat_map(move |k| center.ring(k)))
    }
}

impl Add for HexCoord {
    type Output = HexCoord;

    fn add(self, rhs: HexCoord) -> HexCoord {
        HexCoord::new(self.q + rhs.q, self.r + rhs.r)
    }
}

impl Sub for HexCoord {
    type Output = HexCoord;

    fn sub(self, rhs: HexCoord) -> HexCoord {
        HexCoord::new(self.q - rhs.q, self.r - rhs.r)
    }
}

impl Neg for HexCoord {
    type Output = HexCoord;

    fn neg(self) -> HexCoord {
        HexCoord::new(-self.q, -self.r)
    }
}

impl Mul<i32> for HexCoord {
    type Output = HexCoord;

    fn mul(self, k: i32) -> HexCoord {
        HexCoord::new(self.q * k, self.r * k)
    }
}

impl fmt::Display for HexCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

impl From<(i32, i32)> for HexCoord {
    fn from((q, r): (i32, i32)) -> Self {
        HexCoord::new(q, r)
    }
}

// ============================================================================
// RING WALK
// ============================================================================

/// Iterator over one hex ring.
///
/// Starts at `center + radius * DIRECTIONS[0]` and, for each of the six sides,
/// walks `radius` steps along `DIRECTIONS[(side + 2) % 6]`.
#[derive(Clone, Debug)]
pub struct Ring {
    current: HexCoord,
    radius: u32,
    side: usize,
    step: u32,
}

impl Ring {
    fn new(center: HexCoord, radius: u32) -> Self {
        Self {
            current: center + DIRECTIONS[0] * radius as i32,
            radius,
            side: 0,
            step: 0,
        }
    }
}

impl Iterator for Ring {
    type Item = HexCoord;

    fn next(&mut self) -> Option<HexCoord> {
        if self.radius == 0 || self.side >= 6 {
            return None;
        }

        let out = self.current;
        self.current = self.current + DIRECTIONS[(self.side + 2) % 6];
        self.step += 1;
        if self.step == self.radius {
            self.step = 0;
            self.side += 1;
        }
        Some(out)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.radius == 0 || self.side >= 6 {
            0
        } else {
            let total = 6 * self.radius as usize;
            total - (self.side * self.radius as usize + self.step as usize)
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Ring {}

// ============================================================================
// FRACTIONAL COORDINATES AND ROUNDING
// ============================================================================

/// Fractional axial coordinates, produced by inverse world transforms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FractionalHex {
    pub q: f32,
    pub r: f32,
}

impl FractionalHex {
    pub fn new(q: f32, r: f32) -> Self {
        Self { q, r }
    }

    pub fn s(&self) -> f32 {
        -self.q - self.r
    }

    /// Cube rounding.
    ///
    /// Each axis is rounded on its own, halves to even; the axis with the
    /// largest rounding error is then rebuilt from the other two so that
    /// `q + r + s == 0`.
    pub fn round(&self) -> HexCoord {
        let s = self.s();
        let mut q = self.q.round_ties_even();
        let mut r = self.r.round_ties_even();
        let rs = s.round_ties_even();

        let q_diff = (q - self.q).abs();
        let r_diff = (r - self.r).abs();
        let s_diff = (rs - s).abs();

        if q_diff > r_diff && q_diff > s_diff {
            q = -r - rs;
        } else if r_diff > s_diff {
            r = -q - rs;
        }

        HexCoord::new(q as i32, r as i32)
    }
}

impl From<HexCoord> for FractionalHex {
    fn from(hex: HexCoord) -> Self {
        FractionalHex::new(hex.q as f32, hex.r as f32)
    }
}

// ============================================================================
// OFFSET COORDINATES
// ============================================================================

/// Odd-q offset (column, row) to axial, for flat-top rectangular fields
pub fn offset_to_axial(col: i32, row: i32) -> HexCoord {
    HexCoord::new(col, row - col.div_euclid(2))
}

/// Inverse of [`offset_to_axial`], returns (col, row)
pub fn axial_to_offset(hex: HexCoord) -> (i32, i32) {
    (hex.q, hex.r + hex.q.div_euclid(2))
}
