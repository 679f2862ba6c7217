//! Verification failures of XeGPU operations. Every failure is terminal for the op being built; nothing is retried or coerced.

use core::fmt;

use thiserror::Error;

/// The check a [`XeGpuError::Verification`] failure violated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rule {
    /// Offsets, shape, strides and source must agree on rank.
    RankConsistency,
    /// The kind of source (memref or raw address) must match the parameters supplied.
    SourceKind,
    /// The descriptor element type must match the source element type.
    ElementType,
    /// The tile must fit the hardware block limits for its element width.
    TilingLimits,
    /// An operand has the wrong type.
    OperandType,
    /// The packed axis must index a tile dimension.
    PackedAxis,
    /// The transpose must permute the tile dimensions.
    Transpose,
    /// The hardware must support the requested transform for the element width.
    TransformSupport
}

impl Rule {
    pub const fn name(&self) -> &'static str {
        match self {
            Rule::RankConsistency => "rank-consistency",
            Rule::SourceKind => "source-kind",
            Rule::ElementType => "element-type",
            Rule::TilingLimits => "tiling-limits",
            Rule::OperandType => "operand-type",
            Rule::PackedAxis => "packed-axis",
            Rule::Transpose => "transpose",
            Rule::TransformSupport => "transform-support"
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum XeGpuError {
    /// Shape or strides cannot be resolved from the source nor from explicit parameters.
    #[error("invalid descriptor state: {0}")]
    InvalidDescriptorState(String),
    /// The source layout is not expressible as strides and an offset.
    #[error("unsupported layout: {0}")]
    UnsupportedLayout(String),
    #[error("packing and transpose are mutually exclusive")]
    ConflictingTransform,
    /// A tile disagrees with the descriptor on shape or element type.
    #[error("shape mismatch: expected {expected}, got {found}")]
    ShapeMismatch {
        expected: String,
        found: String
    },
    #[error("failed to verify '{rule}': {message}")]
    Verification {
        rule: Rule,
        message: String
    }
}

impl XeGpuError {
    pub(crate) fn verification(rule: Rule, message: impl Into<String>) -> Self {
        XeGpuError::Verification { rule, message: message.into() }
    }

    /// The violated rule, for `Verification` failures.
    pub fn rule(&self) -> Option<Rule> {
        match self {
            XeGpuError::Verification { rule, .. } => Some(*rule),
            _ => None
        }
    }
}
