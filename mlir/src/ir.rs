//! - include <https://github.com/llvm/llvm-project/tree/main/mlir/include/mlir/IR>
//! - lib <https://github.com/llvm/llvm-project/tree/main/mlir/lib/IR>

pub mod builders;
pub mod builtins;
pub mod diagnostics;
pub mod dialect;
pub mod mlir_context;
pub mod operation;
pub mod r#type;
pub mod value;
