//! Per-face storage with named fields.
//!
//! Provides a strongly-typed container for anything attached to the six
//! faces of a box, eliminating the need to remember the 0..5 numbering.

use super::Face;

/// One value per box face, with named fields for each face.
///
/// # Example
///
/// ```
/// use alap_rs::types::{Face, FaceArray};
///
/// let coef = FaceArray::from_fn(|face| face.index() as f64);
/// assert_eq!(coef.xhi, 3.0);
/// assert_eq!(*coef.get(Face::ZLO), 2.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceArray<T> {
    /// Low x face (face 0)
    pub xlo: T,
    /// Low y face (face 1)
    pub ylo: T,
    /// Low z face (face 2)
    pub zlo: T,
    /// High x face (face 3)
    pub xhi: T,
    /// High y face (face 4)
    pub yhi: T,
    /// High z face (face 5)
    pub zhi: T,
}

impl<T> FaceArray<T> {
    /// Create with the same value on all faces.
    pub fn uniform(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            xlo: value.clone(),
            ylo: value.clone(),
            zlo: value.clone(),
            xhi: value.clone(),
            yhi: value.clone(),
            zhi: value,
        }
    }

    /// Build each entry from its face.
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(Face) -> T,
    {
        Self {
            xlo: f(Face::XLO),
            ylo: f(Face::YLO),
            zlo: f(Face::ZLO),
            xhi: f(Face::XHI),
            yhi: f(Face::YHI),
            zhi: f(Face::ZHI),
        }
    }

    /// Entry for a face.
    #[inline]
    pub fn get(&self, face: Face) -> &T {
        match face.index() {
            0 => &self.xlo,
            1 => &self.ylo,
            2 => &self.zlo,
            3 => &self.xhi,
            4 => &self.yhi,
            _ => &self.zhi,
        }
    }

    /// Mutable entry for a face.
    #[inline]
    pub fn get_mut(&mut self, face: Face) -> &mut T {
        match face.index() {
            0 => &mut self.xlo,
            1 => &mut self.ylo,
            2 => &mut self.zlo,
            3 => &mut self.xhi,
            4 => &mut self.yhi,
            _ => &mut self.zhi,
        }
    }

    /// Convert to array in face order.
    pub fn to_array(self) -> [T; 6] {
        [self.xlo, self.ylo, self.zlo, self.xhi, self.yhi, self.zhi]
    }

    /// Iterate over `(face, value)` pairs in face order.
    pub fn iter(&self) -> impl Iterator<Item = (Face, &T)> {
        Face::ALL.into_iter().map(move |face| (face, self.get(face)))
    }
}

impl<T: Default> Default for FaceArray<T> {
    fn default() -> Self {
        Self::from_fn(|_| T::default())
    }
}
