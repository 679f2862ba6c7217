/*!
# Classes for Defining Concrete Operation Types

This file implements helper traits for implementing concrete operations: naming, verification, and the `FoldResult` that stands for either a constant or an SSA value.

- include <https://github.com/llvm/llvm-project/blob/main/mlir/include/mlir/IR/OpDefinition.h>
*/

use core::fmt;

use crate::{
    ir::{
        diagnostics::{Diagnostic, Severity},
        mlir_context::MLIRContext,
        value::Value
    },
    support::logical_result::LogicalResult
};

/// Static information shared by every instance of a concrete operation.
pub trait Op {
    /// The fully qualified operation name, `dialect.mnemonic`.
    const NAME: &'static str;
}

/**
Operation-local invariants. Verification is synchronous and has no side effects; the context only supplies configuration. Builders report a failure through [`emit_op_error`] and reject the operation.
*/
pub trait Verify: Op {
    type Error: fmt::Display;

    fn verify(&self, context: &MLIRContext) -> LogicalResult<Self::Error>;
}

/// Report `error` against the operation `O` through the context's diagnostic engine and hand it back, ready to be returned.
pub fn emit_op_error<O: Op, E: fmt::Display>(context: &MLIRContext, error: E) -> E {
    context
        .diag_engine()
        .emit(Diagnostic::new(Severity::Error, O::NAME, error.to_string()));
    error
}

/// This type represents a single result from folding an operation: either a constant integer attribute or an SSA value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FoldResult {
    Attribute(i64),
    Value(Value)
}

impl From<i64> for FoldResult {
    fn from(value: i64) -> Self {
        FoldResult::Attribute(value)
    }
}

impl From<Value> for FoldResult {
    fn from(value: Value) -> Self {
        FoldResult::Value(value)
    }
}

impl From<&Value> for FoldResult {
    fn from(value: &Value) -> Self {
        FoldResult::Value(value.clone())
    }
}

impl fmt::Display for FoldResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FoldResult::Attribute(value) => value.fmt(f),
            FoldResult::Value(value) => value.fmt(f)
        }
    }
}
