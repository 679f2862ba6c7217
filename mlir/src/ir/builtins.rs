//! - include <https://github.com/llvm/llvm-project/tree/main/mlir/include/mlir/IR>
//! - lib <https://github.com/llvm/llvm-project/tree/main/mlir/lib/IR>

pub mod type_interfaces;
pub mod types;
