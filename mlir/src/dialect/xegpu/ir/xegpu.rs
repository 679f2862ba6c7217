/*!
# XeGPU Dialect Definition

The dialect carries the hardware tiling limits its ops are verified against. They are configuration: load an [`XeGpuDialect`] with a custom [`TilingLimits`] table into the context to model a different block unit.

- include <https://github.com/llvm/llvm-project/blob/main/mlir/include/mlir/Dialect/XeGPU/IR/XeGPUDialect.td>
- lib <https://github.com/llvm/llvm-project/blob/main/mlir/lib/Dialect/XeGPU/IR/XeGPUDialect.cpp>
*/

use std::{borrow::Cow, collections::BTreeMap};

use crate::{
    dialect::xegpu::ir::{
        errors::{Rule, XeGpuError},
        types::TensorDesc
    },
    ir::{
        builtins::type_interfaces::{is_dynamic, ShapedType},
        dialect::Dialect,
        mlir_context::MLIRContext
    }
};

/// Block-access limits for one element bit width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockLimits {
    /// Maximum number of rows in a block.
    pub max_height: i64,
    /// Maximum number of elements in a row.
    pub max_width: i64,
    /// Whether loads may pack narrow elements along an axis.
    pub packing: bool,
    /// Whether loads may transpose the block.
    pub transpose: bool
}

/// Block limits keyed by element bit width.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TilingLimits {
    entries: BTreeMap<usize, BlockLimits>
}

impl TilingLimits {
    /// Rows per block of the default 2D block unit.
    pub const DEFAULT_MAX_HEIGHT: i64 = 32;
    /// Bytes per row of the default 2D block unit.
    pub const DEFAULT_MAX_ROW_BYTES: i64 = 64;

    /// A table without entries; every tile is rejected until entries are added.
    pub fn empty() -> Self {
        Self { entries: BTreeMap::new() }
    }

    pub fn with_entry(mut self, bit_width: usize, limits: BlockLimits) -> Self {
        self.entries.insert(bit_width, limits);
        self
    }

    pub fn get(&self, bit_width: usize) -> Option<&BlockLimits> {
        self.entries.get(&bit_width)
    }
}

/// Packing for 8 and 16-bit elements, transpose for 32 and 64-bit elements, 32 rows of 64 bytes.
impl Default for TilingLimits {
    fn default() -> Self {
        [8usize, 16, 32, 64]
            .into_iter()
            .fold(Self::empty(), |limits, bit_width| {
                let narrow = bit_width < 32;
                limits.with_entry(bit_width, BlockLimits {
                    max_height: Self::DEFAULT_MAX_HEIGHT,
                    max_width: Self::DEFAULT_MAX_ROW_BYTES * 8 / bit_width as i64,
                    packing: narrow,
                    transpose: !narrow
                })
            })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct XeGpuDialect {
    limits: TilingLimits
}

impl XeGpuDialect {
    pub const NAMESPACE: &'static str = "xegpu";

    pub fn new(limits: TilingLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &TilingLimits {
        &self.limits
    }

    /// The dialect loaded in `context`, or one with the default limits.
    pub fn get_or_default(context: &MLIRContext) -> Cow<'_, XeGpuDialect> {
        match context.loaded_dialect::<XeGpuDialect>() {
            Some(dialect) => Cow::Borrowed(dialect),
            None => {
                tracing::debug!("xegpu dialect not loaded, using default tiling limits");
                Cow::Owned(XeGpuDialect::default())
            }
        }
    }

    /**
    Check that a descriptor tile is a 1D or 2D block of static positive extents that fits the limits for its element width, and return those limits.
    */
    pub fn verify_tile(&self, tensor_desc: &TensorDesc) -> Result<&BlockLimits, XeGpuError> {
        let shape = tensor_desc.shape();
        let (height, width) = match *shape {
            [width] => (1, width),
            [height, width] => (height, width),
            _ => {
                return Err(XeGpuError::verification(
                    Rule::TilingLimits,
                    format!("expected a 1D or 2D tile, got {}", tensor_desc)
                ))
            }
        };
        if shape.iter().any(|&extent| is_dynamic(extent) || extent <= 0) {
            return Err(XeGpuError::verification(
                Rule::TilingLimits,
                format!("tile extents must be static and positive, got {}", tensor_desc)
            ));
        }
        let bit_width = tensor_desc.element_type_bit_width().ok_or_else(|| {
            XeGpuError::verification(
                Rule::TilingLimits,
                format!("element type {} has no bit width", tensor_desc.element_type())
            )
        })?;
        let limits = self.limits.get(bit_width).ok_or_else(|| {
            XeGpuError::verification(
                Rule::TilingLimits,
                format!("no block limits for {}-bit elements", bit_width)
            )
        })?;
        if height > limits.max_height || width > limits.max_width {
            return Err(XeGpuError::verification(
                Rule::TilingLimits,
                format!(
                    "{}x{} tile exceeds the {}x{} block limit for {}-bit elements",
                    height, width, limits.max_height, limits.max_width, bit_width
                )
            ));
        }
        Ok(limits)
    }
}

impl Dialect for XeGpuDialect {
    fn namespace(&self) -> &'static str {
        Self::NAMESPACE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::builtins::types::{FloatType, IntegerType};

    #[test]
    fn default_limits_follow_row_bytes() {
        let limits = TilingLimits::default();
        assert_eq!(limits.get(32).map(|l| l.max_width), Some(16));
        assert_eq!(limits.get(16).map(|l| l.max_width), Some(32));
        assert_eq!(limits.get(8).map(|l| (l.packing, l.transpose)), Some((true, false)));
        assert_eq!(limits.get(64).map(|l| (l.packing, l.transpose)), Some((false, true)));
        assert_eq!(limits.get(4), None);
    }

    #[test]
    fn tile_within_limits_is_accepted() {
        let dialect = XeGpuDialect::default();
        assert!(dialect.verify_tile(&TensorDesc::new([8, 16], FloatType::F32)).is_ok());
        assert!(dialect.verify_tile(&TensorDesc::new([16], FloatType::F32)).is_ok());
        assert!(dialect.verify_tile(&TensorDesc::new([32, 32], FloatType::F16)).is_ok());
    }

    #[test]
    fn oversized_or_malformed_tiles_are_rejected() {
        let dialect = XeGpuDialect::default();
        for tensor_desc in [
            TensorDesc::new([8, 32], FloatType::F32),
            TensorDesc::new([64, 8], FloatType::F32),
            TensorDesc::new([2, 4, 8], FloatType::F32),
            TensorDesc::new([0, 8], FloatType::F32),
            TensorDesc::new([8, 8], IntegerType::signless(4))
        ] {
            let error = dialect.verify_tile(&tensor_desc).unwrap_err();
            assert_eq!(error.rule(), Some(Rule::TilingLimits), "{}", tensor_desc);
        }
    }

    #[test]
    fn injected_limits_replace_the_defaults() {
        let dialect = XeGpuDialect::new(TilingLimits::empty().with_entry(32, BlockLimits {
            max_height: 8,
            max_width: 8,
            packing: false,
            transpose: false
        }));
        assert!(dialect.verify_tile(&TensorDesc::new([8, 8], FloatType::F32)).is_ok());
        assert!(dialect.verify_tile(&TensorDesc::new([8, 16], FloatType::F32)).is_err());
        assert!(dialect.verify_tile(&TensorDesc::new([8, 8], FloatType::F16)).is_err());
    }
}
