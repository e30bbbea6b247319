//! The six faces of a patch.

use std::fmt;

use super::{Axis, IndexBox, IntVect3, Side};

/// A face of a box, identified by its normal axis and side.
///
/// Faces are numbered 0..5 in the order {-x, -y, -z, +x, +y, +z}; that
/// numbering is the one boundary-condition producers use when handing over
/// per-face coefficient and mask arrays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Face {
    pub axis: Axis,
    pub side: Side,
}

impl Face {
    pub const XLO: Face = Face::new(Axis::X, Side::Low);
    pub const YLO: Face = Face::new(Axis::Y, Side::Low);
    pub const ZLO: Face = Face::new(Axis::Z, Side::Low);
    pub const XHI: Face = Face::new(Axis::X, Side::High);
    pub const YHI: Face = Face::new(Axis::Y, Side::High);
    pub const ZHI: Face = Face::new(Axis::Z, Side::High);

    /// All faces in index order.
    pub const ALL: [Face; 6] = [
        Face::XLO,
        Face::YLO,
        Face::ZLO,
        Face::XHI,
        Face::YHI,
        Face::ZHI,
    ];

    pub const fn new(axis: Axis, side: Side) -> Self {
        Self { axis, side }
    }

    /// Face number in `0..6`.
    #[inline]
    pub const fn index(self) -> usize {
        match self.side {
            Side::Low => self.axis.index(),
            Side::High => 3 + self.axis.index(),
        }
    }

    /// Face for a face number, `None` outside `0..6`.
    pub fn from_index(index: usize) -> Option<Self> {
        Face::ALL.get(index).copied()
    }

    /// Unit offset pointing out of the box through this face.
    #[inline]
    pub const fn outward(self) -> IntVect3 {
        let u = IntVect3::unit(self.axis);
        match self.side {
            Side::Low => IntVect3::new(-u.x, -u.y, -u.z),
            Side::High => u,
        }
    }

    /// Index of the boundary cell layer of `vbox` on this face.
    #[inline]
    pub fn boundary_index(self, vbox: &IndexBox) -> i32 {
        match self.side {
            Side::Low => vbox.lo.get(self.axis),
            Side::High => vbox.hi.get(self.axis),
        }
    }

    /// True if `cell` lies in the boundary layer of `vbox` on this face.
    ///
    /// Only the normal coordinate is compared; transverse coordinates are
    /// not checked.
    #[inline]
    pub fn on_face(self, vbox: &IndexBox, cell: IntVect3) -> bool {
        cell.get(self.axis) == self.boundary_index(vbox)
    }

    /// Index of the ghost cell just outside `vbox` across this face, at the
    /// transverse position of `cell`.
    #[inline]
    pub fn ghost(self, vbox: &IndexBox, cell: IntVect3) -> IntVect3 {
        cell.with(self.axis, self.boundary_index(vbox) + self.side.sign())
    }

    /// Index of the boundary cell inside `vbox` on this face, at the
    /// transverse position of `cell`.
    #[inline]
    pub fn boundary(self, vbox: &IndexBox, cell: IntVect3) -> IntVect3 {
        cell.with(self.axis, self.boundary_index(vbox))
    }

    /// The ghost layer of `vbox` across this face.
    pub fn ghost_plane(self, vbox: &IndexBox) -> IndexBox {
        vbox.plane(self.axis, self.boundary_index(vbox) + self.side.sign())
    }

    /// The boundary cell layer of `vbox` on this face.
    pub fn boundary_plane(self, vbox: &IndexBox) -> IndexBox {
        vbox.plane(self.axis, self.boundary_index(vbox))
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self.side {
            Side::Low => '-',
            Side::High => '+',
        };
        write!(f, "{}{}", sign, self.axis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vbox() -> IndexBox {
        IndexBox::new(IntVect3::new(0, 0, 0), IntVect3::new(3, 4, 5))
    }

    #[test]
    fn test_index_order() {
        let names: Vec<String> = Face::ALL.iter().map(|f| f.to_string()).collect();
        assert_eq!(names, ["-x", "-y", "-z", "+x", "+y", "+z"]);
        for (n, face) in Face::ALL.iter().enumerate() {
            assert_eq!(face.index(), n);
            assert_eq!(Face::from_index(n), Some(*face));
        }
        assert_eq!(Face::from_index(6), None);
    }

    #[test]
    fn test_outward() {
        assert_eq!(Face::XLO.outward(), IntVect3::new(-1, 0, 0));
        assert_eq!(Face::ZHI.outward(), IntVect3::new(0, 0, 1));
    }

    #[test]
    fn test_on_face_and_ghost() {
        let vb = vbox();
        let cell = IntVect3::new(3, 4, 0);
        assert!(Face::XHI.on_face(&vb, cell));
        assert!(Face::YHI.on_face(&vb, cell));
        assert!(Face::ZLO.on_face(&vb, cell));
        assert!(!Face::XLO.on_face(&vb, cell));

        assert_eq!(Face::XHI.ghost(&vb, cell), IntVect3::new(4, 4, 0));
        assert_eq!(Face::ZLO.ghost(&vb, cell), IntVect3::new(3, 4, -1));
        assert_eq!(Face::YHI.boundary(&vb, cell), cell);
    }

    #[test]
    fn test_face_planes() {
        let vb = vbox();
        let g = Face::YLO.ghost_plane(&vb);
        assert_eq!(g.lo, IntVect3::new(0, -1, 0));
        assert_eq!(g.hi, IntVect3::new(3, -1, 5));

        let b = Face::ZHI.boundary_plane(&vb);
        assert_eq!(b.lo.z, 5);
        assert_eq!(b.hi.z, 5);
    }
}
