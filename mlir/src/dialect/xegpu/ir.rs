/*!
- include <https://github.com/llvm/llvm-project/tree/main/mlir/include/mlir/Dialect/XeGPU/IR>
- lib <https://github.com/llvm/llvm-project/tree/main/mlir/lib/Dialect/XeGPU/IR>
*/

pub mod asm;
pub mod enums;
pub mod errors;
pub mod operations;
pub mod types;
pub mod xegpu;
