//! <https://github.com/llvm/llvm-project/tree/main/mlir>
//!
//! A slice of MLIR sufficient to describe and verify the XeGPU nd tensor
//! descriptor: builtin shaped types, mixed static/dynamic index lists,
//! diagnostics, and the `xegpu` ops that create descriptors and move tiles
//! through them.

pub mod dialect;
pub mod interfaces;
pub mod ir;
pub mod support;
