//! - include <https://github.com/llvm/llvm-project/tree/main/mlir/include/mlir/Interfaces>
//! - lib <https://github.com/llvm/llvm-project/tree/main/mlir/lib/Interfaces>

pub mod side_effect_interfaces;
pub mod view_like_interface;
