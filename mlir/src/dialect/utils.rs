//! - include <https://github.com/llvm/llvm-project/tree/main/mlir/include/mlir/Dialect/Utils>
//! - lib <https://github.com/llvm/llvm-project/tree/main/mlir/lib/Dialect/Utils>

pub mod static_value_utils;
