//! - include <https://github.com/llvm/llvm-project/tree/main/mlir/include/mlir/Dialect>
//! - lib <https://github.com/llvm/llvm-project/tree/main/mlir/lib/Dialect>

pub mod utils;
pub mod xegpu;
