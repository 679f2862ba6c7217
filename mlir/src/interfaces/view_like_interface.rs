/*!
# View-Like Operations Interface

Defines the interface for view-like operations and for operations carrying mixed static/dynamic offsets, sizes and strides.

- include
  - <https://github.com/llvm/llvm-project/blob/main/mlir/include/mlir/Interfaces/ViewLikeInterface.h>
  - <https://github.com/llvm/llvm-project/blob/main/mlir/include/mlir/Interfaces/ViewLikeInterface.td>
- lib <https://github.com/llvm/llvm-project/blob/main/mlir/lib/Interfaces/ViewLikeInterface.cpp>
*/

use thiserror::Error;

use crate::{
    dialect::utils::static_value_utils::{is_constant_int_value, DynamicIndexList},
    ir::{operation::definition::FoldResult, value::Value},
    support::logical_result::LogicalResult
};

/**
A view-like operation 'views' a buffer in a potentially different way. It takes in a (view of) buffer (and potentially some other operands) and returns another view of buffer.
*/
pub trait ViewLikeOpInterface {
    /// Returns the source buffer from which the view is created.
    fn view_source(&self) -> &Value;
}

/**
Common interface for ops that allow specifying mixed dynamic and static offsets, sizes and strides.

The invariants of this interface are:

1. `static_offsets`, `static_sizes` and `static_strides` have length exactly `array_attr_max_ranks()`[0] (resp. [1], [2]).
2. if an entry of `static_offsets` (resp. `static_sizes`, `static_strides`) is equal to the `DYNAMIC` sentinel, then the corresponding entry is a dynamic offset (resp. size, stride).
3. a dynamic value must be present for each dynamic offset (resp. size, stride).

The third invariant is upheld by [`DynamicIndexList`] itself.
*/
pub trait OffsetSizeAndStrideOpInterface {
    /// Returns the expected rank of each of the offsets, sizes and strides lists.
    fn array_attr_max_ranks(&self) -> [usize; 3];

    fn offsets(&self) -> &DynamicIndexList;

    fn sizes(&self) -> &DynamicIndexList;

    fn strides(&self) -> &DynamicIndexList;

    /// Returns the static offset attributes.
    fn static_offsets(&self) -> &[i64] {
        self.offsets().static_values()
    }

    /// Returns the static size attributes.
    fn static_sizes(&self) -> &[i64] {
        self.sizes().static_values()
    }

    /// Returns the static stride attributes.
    fn static_strides(&self) -> &[i64] {
        self.strides().static_values()
    }

    /// Returns a vector of all the static or dynamic offsets of the op.
    fn mixed_offsets(&self) -> Vec<FoldResult> {
        self.offsets().mixed()
    }

    /// Returns a vector of all the static or dynamic sizes of the op.
    fn mixed_sizes(&self) -> Vec<FoldResult> {
        self.sizes().mixed()
    }

    /// Returns a vector of all the static or dynamic strides of the op.
    fn mixed_strides(&self) -> Vec<FoldResult> {
        self.strides().mixed()
    }

    fn is_dynamic_offset(&self, index: usize) -> bool {
        self.offsets().is_dynamic(index)
    }

    fn is_dynamic_size(&self, index: usize) -> bool {
        self.sizes().is_dynamic(index)
    }

    fn is_dynamic_stride(&self, index: usize) -> bool {
        self.strides().is_dynamic(index)
    }

    fn dynamic_offset(&self, index: usize) -> Option<&Value> {
        self.offsets().dynamic_value(index)
    }

    fn dynamic_size(&self, index: usize) -> Option<&Value> {
        self.sizes().dynamic_value(index)
    }

    fn dynamic_stride(&self, index: usize) -> Option<&Value> {
        self.strides().dynamic_value(index)
    }

    /// Return true if all strides are guaranteed to be 1.
    fn has_unit_stride(&self) -> bool {
        self.mixed_strides().iter().all(|ofr| is_constant_int_value(ofr, 1))
    }

    /// Return true if all offsets are guaranteed to be 0.
    fn has_zero_offset(&self) -> bool {
        self.mixed_offsets().iter().all(|ofr| is_constant_int_value(ofr, 0))
    }
}

/// A list whose length disagrees with `array_attr_max_ranks`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("expected {expected} {name} values, got {found}")]
pub struct RankMismatch {
    pub name: &'static str,
    pub expected: usize,
    pub found: usize
}

/// Check the length invariant of every list against `array_attr_max_ranks`.
pub fn verify_offset_size_and_stride_op(
    op: &impl OffsetSizeAndStrideOpInterface
) -> LogicalResult<RankMismatch> {
    let [offsets, sizes, strides] = op.array_attr_max_ranks();
    for (name, expected, found) in [
        ("offset", offsets, op.offsets().len()),
        ("size", sizes, op.sizes().len()),
        ("stride", strides, op.strides().len())
    ] {
        if expected != found {
            return Err(RankMismatch { name, expected, found });
        }
    }
    Ok(())
}
