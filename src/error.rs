//! Error types for the checked patch-level entry points.
//!
//! The kernels themselves have no failure modes; these errors are raised
//! only by [`ALapPatch`](crate::patch::ALapPatch) when it refuses a call whose
//! fields would be read or written outside their allocation.

use thiserror::Error;

use crate::types::IndexBox;

/// Errors raised by the patch driver.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlapError {
    /// A field's allocation does not cover the cells the call touches.
    #[error("field `{field}` allocated over {allocated} does not cover required {required}")]
    FieldTooSmall {
        field: String,
        required: IndexBox,
        allocated: IndexBox,
    },

    /// A red-black selector other than 0 or 1.
    #[error("invalid red-black selector {0}, expected 0 or 1")]
    InvalidColor(i32),

    /// The computation box extends past the patch's valid box.
    #[error("box {bx} is not inside valid box {vbox}")]
    BoxOutsideValid { bx: IndexBox, vbox: IndexBox },

    /// Smoothing produced a NaN or infinite residual.
    #[error("non-finite residual norm after {sweeps} sweeps")]
    NonFiniteResidual { sweeps: usize },
}

impl AlapError {
    /// Create a coverage error.
    pub fn field_too_small(
        field: impl Into<String>,
        required: IndexBox,
        allocated: IndexBox,
    ) -> Self {
        Self::FieldTooSmall {
            field: field.into(),
            required,
            allocated,
        }
    }
}

/// Result alias for the patch driver.
pub type Result<T> = std::result::Result<T, AlapError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IntVect3;

    #[test]
    fn test_messages_name_the_boxes() {
        let small = IndexBox::from_size(IntVect3::ZERO, [2, 2, 2]);
        let err = AlapError::field_too_small("phi", small.grow(1), small);
        assert_eq!(
            err.to_string(),
            "field `phi` allocated over [(0,0,0) .. (1,1,1)] does not cover required [(-1,-1,-1) .. (2,2,2)]"
        );
        assert_eq!(
            AlapError::InvalidColor(3).to_string(),
            "invalid red-black selector 3, expected 0 or 1"
        );
    }
}
