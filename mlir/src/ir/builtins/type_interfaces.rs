//! # Builtin Type Interfaces
//!
//! This file contains definitions for type interfaces that closely interact with attributes, types, and operations in the builtin dialect.
//!
//! - include
//!   - <https://github.com/llvm/llvm-project/blob/main/mlir/include/mlir/IR/BuiltinTypeInterfaces.h>
//!   - <https://github.com/llvm/llvm-project/blob/main/mlir/include/mlir/IR/BuiltinTypeInterfaces.td>
//! - lib <https://github.com/llvm/llvm-project/blob/main/mlir/lib/IR/BuiltinTypeInterfaces.cpp>

use crate::ir::r#type::Type;

// ----------------------------------------------------------------------
// ShapedType
// ----------------------------------------------------------------------

/// Sentinel marking a size, stride or offset that is not known statically.
pub const DYNAMIC: i64 = i64::MIN;

/// Whether the given dimension size indicates a dynamic dimension.
pub const fn is_dynamic(value: i64) -> bool {
    value == DYNAMIC
}

/// Whether the given shape has any size that indicates a dynamic dimension.
pub fn is_dynamic_shape(sizes: &[i64]) -> bool {
    sizes.iter().any(|&size| is_dynamic(size))
}

/// This interface provides a common API for interacting with multi-dimensional container types. These types contain a shape and an element type.
///
/// A shape is a list of sizes corresponding to the dimensions of the container. The sizes of the dimensions of the shape must be positive, or [`DYNAMIC`] (in which case the size of the dimension is dynamic, or not statically known).
pub trait ShapedType {
    /// Returns the element type of this shaped type.
    fn element_type(&self) -> &Type;

    /// Returns the shape of this type.
    fn shape(&self) -> &[i64];

    fn rank(&self) -> usize {
        self.shape().len()
    }

    /// Returns if this type has a static shape, i.e. all dimensions have known size (>= 0).
    fn has_static_shape(&self) -> bool {
        !is_dynamic_shape(self.shape())
    }

    /// If an element type is an integer or a float, return its width.
    fn element_type_bit_width(&self) -> Option<usize> {
        self.element_type().int_or_float_bit_width()
    }
}

/// Format a shape as a dimension list, e.g. `8x?x16`.
pub(crate) fn format_dimension_list(shape: &[i64]) -> String {
    shape
        .iter()
        .map(|&size| if is_dynamic(size) { "?".to_string() } else { size.to_string() })
        .collect::<Vec<_>>()
        .join("x")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_list_marks_dynamic_sizes() {
        assert_eq!(format_dimension_list(&[DYNAMIC, 1024]), "?x1024");
        assert_eq!(format_dimension_list(&[8]), "8");
    }
}
