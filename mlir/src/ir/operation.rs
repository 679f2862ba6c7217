//! - include <https://github.com/llvm/llvm-project/blob/main/mlir/include/mlir/IR/Operation.h>
//! - lib <https://github.com/llvm/llvm-project/blob/main/mlir/lib/IR/Operation.cpp>

pub mod definition;
