//! - include <https://github.com/llvm/llvm-project/tree/main/mlir/include/mlir/Support>
//! - lib <https://github.com/llvm/llvm-project/tree/main/mlir/lib/Support>

pub mod logical_result;
