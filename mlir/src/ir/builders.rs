//! # Helpers for Constructing MLIR Types and Values
//!
//! - include <https://github.com/llvm/llvm-project/blob/main/mlir/include/mlir/IR/Builders.h>
//! - lib <https://github.com/llvm/llvm-project/blob/main/mlir/lib/IR/Builders.cpp>

use crate::ir::{
    builtins::types::{IndexType, MemRef},
    mlir_context::MLIRContext,
    r#type::Type,
    value::Value
};

/**
This type is a general helper for creating values and types. Operations are built by their own `build` functions, which take a builder to reach the context they are verified in.
*/
#[derive(Clone, Copy)]
pub struct Builder<'c> {
    context: &'c MLIRContext
}

impl<'c> Builder<'c> {
    pub fn new(context: &'c MLIRContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &'c MLIRContext {
        self.context
    }

    /// Create a fresh value of `r#type`, standing in for a block argument or the result of an operation outside this dialect.
    pub fn argument(&self, r#type: impl Into<Type>) -> Value {
        Value::new(self.context.next_value_id(), r#type.into())
    }

    pub(crate) fn result(&self, r#type: impl Into<Type>) -> Value {
        self.argument(r#type)
    }

    /// An `index` typed value, the type of every dynamic offset, size and stride.
    pub fn index_argument(&self) -> Value {
        self.argument(IndexType)
    }

    pub fn memref_type(&self, shape: &[i64], element_type: impl Into<Type>) -> Type {
        Type::MemRef(MemRef::new(shape, element_type))
    }
}
