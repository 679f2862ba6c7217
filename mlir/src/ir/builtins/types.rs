//! # Builtin Type Definitions
//!
//! Defines the set of builtin MLIR types needed by the tensor descriptor dialect: scalar element types, `memref` and `vector`.
//!
//! - include
//!   - <https://github.com/llvm/llvm-project/blob/main/mlir/include/mlir/IR/BuiltinTypes.h>
//!   - <https://github.com/llvm/llvm-project/blob/main/mlir/include/mlir/IR/BuiltinTypes.td>
//! - lib <https://github.com/llvm/llvm-project/blob/main/mlir/lib/IR/BuiltinTypes.cpp>

use core::fmt;

use thiserror::Error;

use crate::ir::{
    builtins::type_interfaces::{format_dimension_list, is_dynamic, ShapedType, DYNAMIC},
    r#type::Type
};

// ----------------------------------------------------------------------
// IndexType
// ----------------------------------------------------------------------

/// Integer-like type with unknown platform-dependent bit width.
///
/// ```text
/// index-type ::= `index`
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct IndexType;

impl fmt::Display for IndexType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("index")
    }
}

// ----------------------------------------------------------------------
// IntegerType
// ----------------------------------------------------------------------

/// Integer type with arbitrary precision up to a fixed limit.
///
/// # Syntax
///
/// ```text
/// signed-integer-type ::= `si` [1-9][0-9]*
/// unsigned-integer-type ::= `ui` [1-9][0-9]*
/// signless-integer-type ::= `i` [1-9][0-9]*
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IntegerType {
    width: usize,
    signedness: Signedness
}

/// Signedness semantics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Signedness {
    /// No signedness semantics
    Signless,
    /// Signed integer
    Signed,
    /// Unsigned integer
    Unsigned
}

impl IntegerType {
    pub const fn new(width: usize, signedness: Signedness) -> Self {
        Self { width, signedness }
    }

    pub const fn signless(width: usize) -> Self {
        Self::new(width, Signedness::Signless)
    }

    pub const fn unsigned(width: usize) -> Self {
        Self::new(width, Signedness::Unsigned)
    }

    pub const fn width(&self) -> usize {
        self.width
    }
}

impl fmt::Display for IntegerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.signedness {
            Signedness::Signless => write!(f, "i{}", self.width),
            Signedness::Signed => write!(f, "si{}", self.width),
            Signedness::Unsigned => write!(f, "ui{}", self.width)
        }
    }
}

// ----------------------------------------------------------------------
// FloatType
// ----------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FloatType {
    BF16,
    F16,
    F32,
    F64
}

impl FloatType {
    /// Return the bitwidth of this float type.
    pub const fn width(&self) -> usize {
        match self {
            FloatType::BF16 | FloatType::F16 => 16,
            FloatType::F32 => 32,
            FloatType::F64 => 64
        }
    }
}

impl fmt::Display for FloatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FloatType::BF16 => "bf16",
            FloatType::F16 => "f16",
            FloatType::F32 => "f32",
            FloatType::F64 => "f64"
        })
    }
}

// ----------------------------------------------------------------------
// MemRef
// ----------------------------------------------------------------------

/// Shaped reference to a region of memory.
///
/// # Syntax
///
/// ```text
/// memref-type ::= `memref` `<` dimension-list-ranked type
///                 (`,` layout-specification)? `>`
/// ```
///
/// A `memref` type is a reference to a region of memory. Memref types use the same shape specifier as vector types, with `?` for a dimension whose size is only known at run time.
///
/// # Layout
///
/// In absence of an explicit layout, a memref is considered to have a row-major identity layout. A strided layout encodes the distance, in number of elements, between successive entries along each dimension plus an offset to the first accessed element; both may be dynamic. Any other layout is kept as an opaque affine map and cannot be described by strides.
///
/// ```mlir
/// memref<1024x1024xf32>
/// memref<?x?xf16, strided<[?, 1], offset: ?>>
/// memref<4x4xf32, affine_map<(d0, d1) -> (d1, d0)>>
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MemRef {
    shape: Vec<i64>,
    element_type: Box<Type>,
    layout: MemRefLayout
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum MemRefLayout {
    Identity,
    Strided {
        strides: Vec<i64>,
        offset: i64
    },
    /// A layout only expressible as an affine map, stored in its textual form.
    AffineMap(String)
}

/// Failures of [`MemRef::strides_and_offset`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("layout `{0}` is not expressible as strides and offset")]
    NotStrided(String),
    #[error("strided layout has {strides} strides for a memref of rank {rank}")]
    RankMismatch { strides: usize, rank: usize }
}

impl MemRef {
    /// A memref with the identity (row-major) layout.
    pub fn new(shape: impl Into<Vec<i64>>, element_type: impl Into<Type>) -> Self {
        Self::with_layout(shape, element_type, MemRefLayout::Identity)
    }

    pub fn with_layout(
        shape: impl Into<Vec<i64>>,
        element_type: impl Into<Type>,
        layout: MemRefLayout
    ) -> Self {
        Self {
            shape: shape.into(),
            element_type: Box::new(element_type.into()),
            layout
        }
    }

    /**
    Returns the strides of the MemRef and the offset of its first element if the layout is in strided form:

    1. an identity layout, in which case the strides are the canonical row-major strides computed from sizes. Strides are multiplicative, so once a dynamic dimension is encountered every outer stride becomes dynamic;
    2. an explicit strided layout.

    A stride specification is a list of integer values that are either static or [`DYNAMIC`].
    */
    pub fn strides_and_offset(&self) -> Result<(Vec<i64>, i64), LayoutError> {
        match &self.layout {
            MemRefLayout::Identity => Ok((canonical_strides(&self.shape), 0)),
            MemRefLayout::Strided { strides, offset } => {
                if strides.len() != self.shape.len() {
                    return Err(LayoutError::RankMismatch {
                        strides: strides.len(),
                        rank: self.shape.len()
                    });
                }
                Ok((strides.clone(), *offset))
            }
            MemRefLayout::AffineMap(map) => Err(LayoutError::NotStrided(map.clone()))
        }
    }

    /// Return true if the layout for this memref is compatible with strided semantics.
    pub fn is_strided(&self) -> bool {
        self.strides_and_offset().is_ok()
    }
}

/// Row-major strides for `sizes`; the innermost stride is always `1`.
pub fn canonical_strides(sizes: &[i64]) -> Vec<i64> {
    let mut strides = vec![1; sizes.len()];
    let mut running = 1i64;
    for index in (0..sizes.len()).rev() {
        strides[index] = running;
        running = if is_dynamic(running) || is_dynamic(sizes[index]) {
            DYNAMIC
        } else {
            running.checked_mul(sizes[index]).unwrap_or(DYNAMIC)
        };
    }
    strides
}

impl ShapedType for MemRef {
    fn element_type(&self) -> &Type {
        &self.element_type
    }

    fn shape(&self) -> &[i64] {
        &self.shape
    }
}

impl fmt::Display for MemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("memref<")?;
        if !self.shape.is_empty() {
            write!(f, "{}x", format_dimension_list(&self.shape))?;
        }
        write!(f, "{}", self.element_type)?;
        match &self.layout {
            MemRefLayout::Identity => {}
            MemRefLayout::Strided { strides, offset } => {
                let strides = strides
                    .iter()
                    .map(|&stride| format_static_or_dynamic(stride))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, ", strided<[{}], offset: {}>", strides, format_static_or_dynamic(*offset))?;
            }
            MemRefLayout::AffineMap(map) => write!(f, ", affine_map<{}>", map)?
        }
        f.write_str(">")
    }
}

fn format_static_or_dynamic(value: i64) -> String {
    if is_dynamic(value) {
        "?".to_string()
    } else {
        value.to_string()
    }
}

// ----------------------------------------------------------------------
// Vector
// ----------------------------------------------------------------------

/// Multi-dimensional SIMD vector type, the register-resident form of a tile.
///
/// ```text
/// vector-type ::= `vector` `<` static-dim-list `x` vector-element-type `>`
/// ```
///
/// Vector shapes must be positive decimal integers.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct VectorType {
    shape: Vec<i64>,
    element_type: Box<Type>
}

impl VectorType {
    pub fn new(shape: impl Into<Vec<i64>>, element_type: impl Into<Type>) -> Self {
        Self {
            shape: shape.into(),
            element_type: Box::new(element_type.into())
        }
    }
}

impl ShapedType for VectorType {
    fn element_type(&self) -> &Type {
        &self.element_type
    }

    fn shape(&self) -> &[i64] {
        &self.shape
    }
}

impl fmt::Display for VectorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("vector<")?;
        if !self.shape.is_empty() {
            write!(f, "{}x", format_dimension_list(&self.shape))?;
        }
        write!(f, "{}>", self.element_type)
    }
}
