//! Integer cell index in three dimensions.

use std::fmt;
use std::ops::{Add, Neg, Sub};

use super::Axis;

/// A cell index `(x, y, z)` in the (unbounded) integer index space.
///
/// Indices are signed: ghost cells of a patch whose valid region starts at
/// zero live at negative coordinates.
///
/// # Example
///
/// ```
/// use alap_rs::types::{Axis, IntVect3};
///
/// let p = IntVect3::new(4, 2, 1);
/// assert_eq!(p - IntVect3::unit(Axis::X), IntVect3::new(3, 2, 1));
/// assert_eq!(p.get(Axis::Z), 1);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct IntVect3 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl IntVect3 {
    /// The origin.
    pub const ZERO: Self = Self::new(0, 0, 0);

    /// Create a new index.
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Same value in every component.
    #[inline]
    pub const fn splat(v: i32) -> Self {
        Self::new(v, v, v)
    }

    /// Unit offset along an axis.
    #[inline]
    pub const fn unit(axis: Axis) -> Self {
        match axis {
            Axis::X => Self::new(1, 0, 0),
            Axis::Y => Self::new(0, 1, 0),
            Axis::Z => Self::new(0, 0, 1),
        }
    }

    /// Component along an axis.
    #[inline]
    pub const fn get(self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Copy with one component replaced.
    #[inline]
    pub const fn with(self, axis: Axis, value: i32) -> Self {
        match axis {
            Axis::X => Self::new(value, self.y, self.z),
            Axis::Y => Self::new(self.x, value, self.z),
            Axis::Z => Self::new(self.x, self.y, value),
        }
    }

    /// Copy moved by `n` cells along an axis.
    #[inline]
    pub const fn shift(self, axis: Axis, n: i32) -> Self {
        self.with(axis, self.get(axis) + n)
    }

    /// Sum of the components, the parity of which defines the cell color.
    #[inline]
    pub const fn sum(self) -> i32 {
        self.x + self.y + self.z
    }

    /// Component-wise `self <= other`.
    #[inline]
    pub const fn all_le(self, other: Self) -> bool {
        self.x <= other.x && self.y <= other.y && self.z <= other.z
    }

    /// Components as `[x, y, z]`.
    #[inline]
    pub const fn to_array(self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[i32; 3]> for IntVect3 {
    #[inline]
    fn from([x, y, z]: [i32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<(i32, i32, i32)> for IntVect3 {
    #[inline]
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}

impl Add for IntVect3 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for IntVect3 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for IntVect3 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl fmt::Display for IntVect3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.x, self.y, self.z)
    }
}
