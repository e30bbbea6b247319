//! Per-face boundary elimination data consumed by the relaxation sweep.
//!
//! For each of the six faces of the valid box, a boundary-condition
//! resolver supplies
//!
//! - a mask on the ghost layer just outside the face: `> 0` means the
//!   exterior neighbour is eliminated through the boundary condition;
//! - an effective coefficient on the boundary cell layer just inside the
//!   face, contributed by that eliminated exterior unknown.
//!
//! [`BoundaryFaces`] is the borrowed view the kernels read; [`BoundaryData`]
//! is an owned container allocated over exactly those layers.

use crate::field::Field3;
use crate::types::{Face, FaceArray, IndexBox, IntVect3};

/// Coefficient and mask arrays of one face.
#[derive(Clone, Copy, Debug)]
pub struct FaceBc<'a> {
    /// Effective coefficient, indexed at the boundary cell inside `vbox`
    pub coef: &'a Field3<f64>,
    /// Elimination flag, indexed at the ghost cell outside `vbox`
    pub mask: &'a Field3<i32>,
}

/// Borrowed boundary data for all six faces.
#[derive(Clone, Copy, Debug)]
pub struct BoundaryFaces<'a> {
    faces: FaceArray<FaceBc<'a>>,
}

impl<'a> BoundaryFaces<'a> {
    /// Wrap per-face `(coef, mask)` pairs.
    pub fn new(faces: FaceArray<FaceBc<'a>>) -> Self {
        Self { faces }
    }

    /// Arrays of one face.
    #[inline]
    pub fn face(&self, face: Face) -> &FaceBc<'a> {
        self.faces.get(face)
    }

    /// Eliminated-neighbour coefficient of `face` for `cell`.
    ///
    /// Non-zero only when `cell` lies on that face of `vbox` and the mask at
    /// the adjacent ghost index is positive; the mask is not read otherwise.
    #[inline]
    pub fn coefficient(&self, face: Face, vbox: &IndexBox, cell: IntVect3) -> f64 {
        let bc = self.faces.get(face);
        if face.on_face(vbox, cell) && bc.mask[face.ghost(vbox, cell)] > 0 {
            bc.coef[face.boundary(vbox, cell)]
        } else {
            0.0
        }
    }

    /// Coefficients of all six faces for `cell`.
    #[inline]
    pub fn coefficients(&self, vbox: &IndexBox, cell: IntVect3) -> FaceArray<f64> {
        FaceArray::from_fn(|face| self.coefficient(face, vbox, cell))
    }
}

/// Owned per-face coefficient and mask arrays for one valid box.
///
/// Face `f` stores its mask over `f.ghost_plane(vbox)` and its coefficient
/// over `f.boundary_plane(vbox)`. A freshly created container has every
/// mask at zero, i.e. no elimination anywhere.
///
/// # Example
///
/// ```
/// use alap_rs::kernels::BoundaryData;
/// use alap_rs::types::{Face, IndexBox, IntVect3};
///
/// let vbox = IndexBox::from_size(IntVect3::ZERO, [2, 2, 2]);
/// let mut bc = BoundaryData::new(vbox);
/// bc.set_uniform(Face::XLO, 1, 0.5);
///
/// let faces = bc.faces();
/// assert_eq!(faces.coefficient(Face::XLO, &vbox, IntVect3::new(0, 1, 1)), 0.5);
/// assert_eq!(faces.coefficient(Face::XLO, &vbox, IntVect3::new(1, 1, 1)), 0.0);
/// ```
#[derive(Clone, Debug)]
pub struct BoundaryData {
    vbox: IndexBox,
    coef: FaceArray<Field3<f64>>,
    mask: FaceArray<Field3<i32>>,
}

impl BoundaryData {
    /// Allocate zeroed arrays for the faces of `vbox`.
    pub fn new(vbox: IndexBox) -> Self {
        Self {
            vbox,
            coef: FaceArray::from_fn(|face| Field3::new(face.boundary_plane(&vbox), 0.0)),
            mask: FaceArray::from_fn(|face| Field3::new(face.ghost_plane(&vbox), 0)),
        }
    }

    /// The valid box the arrays were laid out for.
    pub fn vbox(&self) -> &IndexBox {
        &self.vbox
    }

    /// Set the mask and coefficient uniformly over one face.
    pub fn set_uniform(&mut self, face: Face, mask: i32, coef: f64) {
        self.mask.get_mut(face).fill(mask);
        self.coef.get_mut(face).fill(coef);
    }

    /// Coefficient array of a face.
    pub fn coef_mut(&mut self, face: Face) -> &mut Field3<f64> {
        self.coef.get_mut(face)
    }

    /// Mask array of a face.
    pub fn mask_mut(&mut self, face: Face) -> &mut Field3<i32> {
        self.mask.get_mut(face)
    }

    /// Borrowed view for the kernels.
    pub fn faces(&self) -> BoundaryFaces<'_> {
        BoundaryFaces::new(FaceArray::from_fn(|face| FaceBc {
            coef: self.coef.get(face),
            mask: self.mask.get(face),
        }))
    }
}
