//! # Definition of the Value Type
//!
//! An SSA value is either a block argument or the result of an operation. Here values are handles with a context-unique id and an immutable type; they never own storage.
//!
//! - include <https://github.com/llvm/llvm-project/blob/main/mlir/include/mlir/IR/Value.h>
//! - lib <https://github.com/llvm/llvm-project/blob/main/mlir/lib/IR/Value.cpp>

use core::fmt;

use crate::ir::r#type::Type;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Value {
    id: usize,
    r#type: Type
}

impl Value {
    pub(crate) fn new(id: usize, r#type: Type) -> Self {
        Self { id, r#type }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Return the type of this value.
    pub fn r#type(&self) -> &Type {
        &self.r#type
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%{}", self.id)
    }
}
