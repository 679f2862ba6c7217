//! # Dialect Classes
//!
//! - include <https://github.com/llvm/llvm-project/blob/main/mlir/include/mlir/IR/Dialect.h>
//! - lib <https://github.com/llvm/llvm-project/blob/main/mlir/lib/IR/Dialect.cpp>

use core::any::Any;

/**
Dialects are groups of MLIR operations, types and attributes, as well as behaviour associated with the entire group. A loaded dialect carries whatever configuration its operations consult while they are verified.
*/
pub trait Dialect: Any {
    /// The prefix used on every operation and type of this dialect.
    fn namespace(&self) -> &'static str;
}
