//! Strongly-typed index-space types for structured-grid patches.
//!
//! The kernels in this crate address cells with signed integer triples and
//! operate over inclusive rectangular index ranges. The types here keep the
//! axis/side/face conventions explicit so the per-face boundary logic never
//! depends on remembering an array ordering.
//!
//! # Example
//!
//! ```
//! use alap_rs::types::{Axis, Face, IndexBox, IntVect3};
//!
//! let vbox = IndexBox::new(IntVect3::new(0, 0, 0), IntVect3::new(7, 7, 7));
//! assert_eq!(vbox.num_cells(), 512);
//! assert_eq!(vbox.len(Axis::Y), 8);
//!
//! // The cell (0, 3, 3) sits on the low-x face; its ghost neighbour is at x = -1.
//! let cell = IntVect3::new(0, 3, 3);
//! assert!(Face::XLO.on_face(&vbox, cell));
//! assert_eq!(Face::XLO.ghost(&vbox, cell), IntVect3::new(-1, 3, 3));
//! ```

mod direction;
mod face;
mod face_array;
mod index_box;
mod int_vect;

pub use direction::{Axis, Side};
pub use face::Face;
pub use face_array::FaceArray;
pub use index_box::{Cells, IndexBox};
pub use int_vect::IntVect3;
