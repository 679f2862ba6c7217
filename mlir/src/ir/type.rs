//! # Type Classes
//!
//! Types are immutable, compared structurally and cheap enough to clone. The builtin kinds live in [`builtins::types`](super::builtins::types); dialect types are carried as their own variants.
//!
//! - include <https://github.com/llvm/llvm-project/blob/main/mlir/include/mlir/IR/Types.h>
//! - lib <https://github.com/llvm/llvm-project/blob/main/mlir/lib/IR/Types.cpp>

use core::fmt;

use crate::{
    dialect::xegpu::ir::types::TensorDesc,
    ir::builtins::types::{FloatType, IndexType, IntegerType, MemRef, VectorType}
};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Type {
    Index(IndexType),
    Integer(IntegerType),
    Float(FloatType),
    MemRef(MemRef),
    Vector(VectorType),
    TensorDesc(TensorDesc)
}

impl Type {
    /// Return true if this is an integer or index type.
    pub fn is_int_or_index(&self) -> bool {
        matches!(self, Type::Integer(_) | Type::Index(_))
    }

    /// Return the bit width of an integer or a float type, `None` otherwise.
    pub fn int_or_float_bit_width(&self) -> Option<usize> {
        match self {
            Type::Integer(integer) => Some(integer.width()),
            Type::Float(float) => Some(float.width()),
            _ => None
        }
    }

    pub fn as_memref(&self) -> Option<&MemRef> {
        match self {
            Type::MemRef(memref) => Some(memref),
            _ => None
        }
    }

    pub fn as_vector(&self) -> Option<&VectorType> {
        match self {
            Type::Vector(vector) => Some(vector),
            _ => None
        }
    }

    pub fn as_tensor_desc(&self) -> Option<&TensorDesc> {
        match self {
            Type::TensorDesc(tensor_desc) => Some(tensor_desc),
            _ => None
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Index(index) => index.fmt(f),
            Type::Integer(integer) => integer.fmt(f),
            Type::Float(float) => float.fmt(f),
            Type::MemRef(memref) => memref.fmt(f),
            Type::Vector(vector) => vector.fmt(f),
            Type::TensorDesc(tensor_desc) => tensor_desc.fmt(f)
        }
    }
}

impl From<IndexType> for Type {
    fn from(index: IndexType) -> Self {
        Type::Index(index)
    }
}

impl From<IntegerType> for Type {
    fn from(integer: IntegerType) -> Self {
        Type::Integer(integer)
    }
}

impl From<FloatType> for Type {
    fn from(float: FloatType) -> Self {
        Type::Float(float)
    }
}

impl From<MemRef> for Type {
    fn from(memref: MemRef) -> Self {
        Type::MemRef(memref)
    }
}

impl From<VectorType> for Type {
    fn from(vector: VectorType) -> Self {
        Type::Vector(vector)
    }
}

impl From<TensorDesc> for Type {
    fn from(tensor_desc: TensorDesc) -> Self {
        Type::TensorDesc(tensor_desc)
    }
}
