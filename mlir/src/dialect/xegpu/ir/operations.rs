/*!
# XeGPU Operation Definitions

- include <https://github.com/llvm/llvm-project/blob/main/mlir/include/mlir/Dialect/XeGPU/IR/XeGPUOps.td>
- lib <https://github.com/llvm/llvm-project/blob/main/mlir/lib/Dialect/XeGPU/IR/XeGPUOps.cpp>
*/

use core::fmt;

use crate::{
    dialect::{
        utils::static_value_utils::{DynamicIndexList, IndexListError},
        xegpu::ir::{
            asm::print_attr_dict,
            enums::CacheHints,
            errors::{Rule, XeGpuError},
            types::TensorDesc,
            xegpu::XeGpuDialect
        }
    },
    interfaces::{
        side_effect_interfaces::{Effect, EffectInstance, MemoryEffectOpInterface},
        view_like_interface::{
            verify_offset_size_and_stride_op, OffsetSizeAndStrideOpInterface, ViewLikeOpInterface
        }
    },
    ir::{
        builders::Builder,
        builtins::{
            type_interfaces::{is_dynamic_shape, ShapedType},
            types::{MemRef, VectorType}
        },
        mlir_context::MLIRContext,
        operation::definition::{emit_op_error, FoldResult, Op, Verify},
        r#type::Type,
        value::Value
    },
    support::logical_result::{FailureOr, LogicalResult}
};

impl From<IndexListError> for XeGpuError {
    fn from(error: IndexListError) -> Self {
        let rule = match error {
            IndexListError::DynamicCountMismatch { .. } => Rule::RankConsistency,
            IndexListError::SentinelConstant { .. } => Rule::OperandType
        };
        XeGpuError::verification(rule, error.to_string())
    }
}

/// The tensor descriptor carried by `value`'s type.
fn tensor_desc_of<'v>(value: &'v Value, what: &str) -> Result<&'v TensorDesc, XeGpuError> {
    value.r#type().as_tensor_desc().ok_or_else(|| {
        XeGpuError::verification(
            Rule::OperandType,
            format!("expected {} {} to be a tensor descriptor, got {}", what, value, value.r#type())
        )
    })
}

/*
----------------------------------------------------------------------
CreateNdDesc
----------------------------------------------------------------------
*/

/// What a descriptor is carved from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceKind<'a> {
    /// A memref, carrying an element type and possibly static shape and strides.
    Typed(&'a MemRef),
    /// A 64-bit integer or `index` address without shape information.
    RawAddress
}

impl<'a> SourceKind<'a> {
    fn classify(source: &'a Value) -> Result<Self, XeGpuError> {
        match source.r#type() {
            Type::MemRef(memref) => Ok(SourceKind::Typed(memref)),
            Type::Integer(integer) if integer.width() == 64 => Ok(SourceKind::RawAddress),
            Type::Index(_) => Ok(SourceKind::RawAddress),
            other => Err(XeGpuError::verification(
                Rule::SourceKind,
                format!("expected source {} to be a memref or a 64-bit address, got {}", source, other)
            ))
        }
    }
}

/// Whether a shape or strides list was supplied explicitly or taken from the source memref.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Provenance {
    Source,
    Explicit
}

/**
`xegpu.create_nd_tdesc` creates a tensor descriptor for a sub-view of memory.

The source is either a memref or a raw 64-bit address. Offsets are always supplied, each statically or dynamically. Shape and strides are taken from a memref source when it has a fully static shape and a strided layout; otherwise the whole list must be supplied. A raw address source requires both as dynamic values.

```mlir
%1 = xegpu.create_nd_tdesc %0[0, 0] : memref<1024x1024xf32> -> !xegpu.tensor_desc<8x16xf32>
%3 = xegpu.create_nd_tdesc %2[%x, 0], [%h, %w], [%w, %c1] : ui64 -> !xegpu.tensor_desc<8x16xf16>
```

Shape and strides are resolved once, when the op is built; the op is immutable afterwards.
*/
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateNdDesc {
    source: Value,
    offsets: DynamicIndexList,
    shape: DynamicIndexList,
    strides: DynamicIndexList,
    shape_provenance: Provenance,
    strides_provenance: Provenance,
    tensor_desc: TensorDesc,
    result: Value
}

/// Offsets plus the optional explicit shape and strides of a [`CreateNdDesc`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NdDescParams {
    pub offsets: DynamicIndexList,
    pub shape: Option<DynamicIndexList>,
    pub strides: Option<DynamicIndexList>
}

impl NdDescParams {
    /// Offsets only; shape and strides come from the source memref.
    pub fn from_offsets(offsets: &[FoldResult]) -> Result<Self, IndexListError> {
        Ok(Self {
            offsets: DynamicIndexList::from_mixed(offsets)?,
            ..Self::default()
        })
    }

    /// Offsets with an explicit, possibly mixed, shape and strides.
    pub fn with_shape_and_strides(
        offsets: &[FoldResult],
        shape: &[FoldResult],
        strides: &[FoldResult]
    ) -> Result<Self, IndexListError> {
        Ok(Self {
            offsets: DynamicIndexList::from_mixed(offsets)?,
            shape: Some(DynamicIndexList::from_mixed(shape)?),
            strides: Some(DynamicIndexList::from_mixed(strides)?)
        })
    }
}

impl Op for CreateNdDesc {
    const NAME: &'static str = "xegpu.create_nd_tdesc";
}

impl CreateNdDesc {
    /// Build a descriptor over a memref with a fully static shape and strided layout.
    pub fn build_from_memref(
        builder: &Builder,
        result_type: TensorDesc,
        source: Value,
        offsets: &[FoldResult]
    ) -> Result<Self, XeGpuError> {
        let params = NdDescParams::from_offsets(offsets)
            .map_err(|error| emit_op_error::<Self, _>(builder.context(), XeGpuError::from(error)))?;
        Self::build(builder, result_type, source, params)
    }

    /// Build a descriptor over a raw address; shape and strides are run-time values.
    pub fn build_from_address(
        builder: &Builder,
        result_type: TensorDesc,
        source: Value,
        offsets: &[FoldResult],
        shape: &[Value],
        strides: &[Value]
    ) -> Result<Self, XeGpuError> {
        let params = NdDescParams::from_offsets(offsets)
            .map_err(|error| emit_op_error::<Self, _>(builder.context(), XeGpuError::from(error)))?;
        let params = NdDescParams {
            shape: Some(DynamicIndexList::from_values(shape)),
            strides: Some(DynamicIndexList::from_values(strides)),
            ..params
        };
        Self::build(builder, result_type, source, params)
    }

    /**
    Build and verify. Any failure is reported to the context's diagnostic engine and returned; no op is produced.
    */
    pub fn build(
        builder: &Builder,
        result_type: TensorDesc,
        source: Value,
        params: NdDescParams
    ) -> Result<Self, XeGpuError> {
        let context = builder.context();
        let op = Self::resolve(builder, result_type, source, params)
            .and_then(|op| op.verify(context).map(|()| op))
            .map_err(|error| emit_op_error::<Self, _>(context, error))?;
        tracing::debug!(
            op = %op,
            shape = ?op.shape.static_values(),
            strides = ?op.strides.static_values(),
            "created nd descriptor"
        );
        Ok(op)
    }

    fn resolve(
        builder: &Builder,
        result_type: TensorDesc,
        source: Value,
        params: NdDescParams
    ) -> Result<Self, XeGpuError> {
        let NdDescParams { offsets, shape, strides } = params;
        let kind = SourceKind::classify(&source)?;
        if matches!(kind, SourceKind::RawAddress) {
            for (name, list) in [("shape", &shape), ("strides", &strides)] {
                if list.is_none() {
                    return Err(XeGpuError::InvalidDescriptorState(format!(
                        "{} must be supplied for raw address source {}",
                        name, source
                    )));
                }
            }
        }
        let rank = match kind {
            SourceKind::Typed(memref) => memref.rank(),
            SourceKind::RawAddress => offsets.len()
        };
        for (name, list) in [("offset", Some(&offsets)), ("size", shape.as_ref()), ("stride", strides.as_ref())] {
            if let Some(list) = list.filter(|list| list.len() != rank) {
                return Err(XeGpuError::verification(
                    Rule::RankConsistency,
                    format!("expected {} {} values for source {}, got {}", rank, name, source, list.len())
                ));
            }
        }

        let (shape, shape_provenance, strides, strides_provenance) = match kind {
            SourceKind::RawAddress => {
                let (Some(shape), Some(strides)) = (shape, strides) else {
                    return Err(XeGpuError::InvalidDescriptorState(format!(
                        "shape and strides must be supplied for raw address source {}",
                        source
                    )));
                };
                if !shape.is_fully_dynamic() || !strides.is_fully_dynamic() {
                    return Err(XeGpuError::verification(
                        Rule::SourceKind,
                        format!(
                            "shape {} and strides {} must be entirely dynamic for raw address source {}",
                            shape, strides, source
                        )
                    ));
                }
                (shape, Provenance::Explicit, strides, Provenance::Explicit)
            }
            SourceKind::Typed(memref) => {
                let (shape, shape_provenance) = match shape {
                    Some(shape) => (shape, Provenance::Explicit),
                    None => (resolve_static_shape(&source, memref)?, Provenance::Source)
                };
                let (strides, strides_provenance) = match strides {
                    Some(strides) => (strides, Provenance::Explicit),
                    None => (resolve_static_strides(&source, memref)?, Provenance::Source)
                };
                (shape, shape_provenance, strides, strides_provenance)
            }
        };

        Ok(Self {
            result: builder.result(result_type.clone()),
            tensor_desc: result_type,
            source,
            offsets,
            shape,
            strides,
            shape_provenance,
            strides_provenance
        })
    }

    pub fn source(&self) -> &Value {
        &self.source
    }

    pub fn source_kind(&self) -> SourceKind<'_> {
        self.source
            .r#type()
            .as_memref()
            .map_or(SourceKind::RawAddress, SourceKind::Typed)
    }

    /// The descriptor value.
    pub fn result(&self) -> &Value {
        &self.result
    }

    pub fn tensor_desc_type(&self) -> &TensorDesc {
        &self.tensor_desc
    }

    /// Rank of the source memref, or the number of offsets for a raw address.
    pub fn expected_rank(&self) -> usize {
        match self.source_kind() {
            SourceKind::Typed(memref) => memref.rank(),
            SourceKind::RawAddress => self.offsets.len()
        }
    }

    pub fn shape_provenance(&self) -> Provenance {
        self.shape_provenance
    }

    pub fn strides_provenance(&self) -> Provenance {
        self.strides_provenance
    }
}

/**
The static shape a descriptor over `memref` addresses when no shape is supplied. Any dynamic extent leaves the shape unresolved: partially static shapes are not completed from dynamic values.
*/
pub fn resolve_static_shape(source: &Value, memref: &MemRef) -> FailureOr<DynamicIndexList, XeGpuError> {
    if !memref.has_static_shape() {
        return Err(XeGpuError::InvalidDescriptorState(format!(
            "source {} of type {} has no static shape; supply the shape explicitly",
            source, memref
        )));
    }
    tracing::trace!(source = %source, shape = ?memref.shape(), "shape taken from source");
    Ok(DynamicIndexList::new(memref.shape().to_vec(), Vec::new())?)
}

/**
The static strides of `memref` computed from its layout when no strides are supplied. Layouts that are not strided are unsupported; strided layouts with a dynamic stride leave the strides unresolved.
*/
pub fn resolve_static_strides(source: &Value, memref: &MemRef) -> FailureOr<DynamicIndexList, XeGpuError> {
    let (strides, offset) = memref
        .strides_and_offset()
        .map_err(|error| XeGpuError::UnsupportedLayout(format!("source {}: {}", source, error)))?;
    if is_dynamic_shape(&strides) {
        return Err(XeGpuError::InvalidDescriptorState(format!(
            "source {} of type {} has no static strides; supply the strides explicitly",
            source, memref
        )));
    }
    tracing::trace!(source = %source, ?strides, offset, "strides computed from source layout");
    Ok(DynamicIndexList::new(strides, Vec::new())?)
}

impl Verify for CreateNdDesc {
    type Error = XeGpuError;

    fn verify(&self, context: &MLIRContext) -> LogicalResult<XeGpuError> {
        verify_offset_size_and_stride_op(self)
            .map_err(|error| XeGpuError::verification(Rule::RankConsistency, error.to_string()))?;

        for value in self.offsets.dynamic().iter().chain(self.shape.dynamic()).chain(self.strides.dynamic()) {
            if !value.r#type().is_int_or_index() {
                return Err(XeGpuError::verification(
                    Rule::OperandType,
                    format!("expected index operand {}, got {}", value, value.r#type())
                ));
            }
        }

        let tensor_desc = self.tensor_desc_type();
        if tensor_desc.rank() > self.expected_rank() {
            return Err(XeGpuError::verification(
                Rule::RankConsistency,
                format!(
                    "tile rank {} of {} exceeds descriptor rank {}",
                    tensor_desc.rank(), tensor_desc, self.expected_rank()
                )
            ));
        }

        if let SourceKind::Typed(memref) = self.source_kind() {
            if memref.element_type() != tensor_desc.element_type() {
                return Err(XeGpuError::verification(
                    Rule::ElementType,
                    format!(
                        "element type {} of {} does not match source {} of type {}",
                        tensor_desc.element_type(), tensor_desc, self.source, memref
                    )
                ));
            }
        }

        XeGpuDialect::get_or_default(context).verify_tile(tensor_desc)?;
        Ok(())
    }
}

impl OffsetSizeAndStrideOpInterface for CreateNdDesc {
    fn array_attr_max_ranks(&self) -> [usize; 3] {
        let rank = self.expected_rank();
        [rank, rank, rank]
    }

    fn offsets(&self) -> &DynamicIndexList {
        &self.offsets
    }

    fn sizes(&self) -> &DynamicIndexList {
        &self.shape
    }

    fn strides(&self) -> &DynamicIndexList {
        &self.strides
    }
}

impl ViewLikeOpInterface for CreateNdDesc {
    fn view_source(&self) -> &Value {
        &self.source
    }
}

impl MemoryEffectOpInterface for CreateNdDesc {
    fn effects(&self) -> Vec<EffectInstance> {
        Vec::new()
    }
}

impl fmt::Display for CreateNdDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {} {}{}", self.result, Self::NAME, self.source, self.offsets)?;
        if self.shape_provenance == Provenance::Explicit {
            write!(f, ", {}", self.shape)?;
        }
        if self.strides_provenance == Provenance::Explicit {
            write!(f, ", {}", self.strides)?;
        }
        write!(f, " : {} -> {}", self.source.r#type(), self.result.r#type())
    }
}

/*
----------------------------------------------------------------------
PrefetchNd
----------------------------------------------------------------------
*/

/**
`xegpu.prefetch_nd` warms the caches with the block a descriptor addresses. It is a hint: it has no result, declares no memory effect and may be dropped without changing the program.

```mlir
xegpu.prefetch_nd %1 {l1_hint = #xegpu.cache_hint<cached>} : !xegpu.tensor_desc<8x16xf16>
```
*/
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrefetchNd {
    tensor_desc: Value,
    hints: CacheHints
}

impl Op for PrefetchNd {
    const NAME: &'static str = "xegpu.prefetch_nd";
}

impl PrefetchNd {
    pub fn build(builder: &Builder, tensor_desc: Value, hints: CacheHints) -> Result<Self, XeGpuError> {
        let context = builder.context();
        let op = Self { tensor_desc, hints };
        op.verify(context)
            .map_err(|error| emit_op_error::<Self, _>(context, error))?;
        tracing::trace!(op = %op, "created prefetch");
        Ok(op)
    }

    pub fn tensor_desc(&self) -> &Value {
        &self.tensor_desc
    }

    pub fn hints(&self) -> &CacheHints {
        &self.hints
    }
}

impl Verify for PrefetchNd {
    type Error = XeGpuError;

    fn verify(&self, _context: &MLIRContext) -> LogicalResult<XeGpuError> {
        tensor_desc_of(&self.tensor_desc, "prefetched").map(|_| ())
    }
}

impl MemoryEffectOpInterface for PrefetchNd {
    fn effects(&self) -> Vec<EffectInstance> {
        Vec::new()
    }
}

impl fmt::Display for PrefetchNd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}{} : {}",
            Self::NAME,
            self.tensor_desc,
            print_attr_dict(None, None, &self.hints),
            self.tensor_desc.r#type()
        )
    }
}

/*
----------------------------------------------------------------------
LoadNd
----------------------------------------------------------------------
*/

/// Optional attributes of [`LoadNd`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct LoadAttributes {
    /// Axis along which narrow elements are packed into native register width.
    pub packed: Option<usize>,
    /// Permutation applied to the tile axes.
    pub transpose: Option<Vec<i64>>,
    pub hints: CacheHints
}

impl LoadAttributes {
    pub fn packed(axis: usize) -> Self {
        Self { packed: Some(axis), ..Self::default() }
    }

    pub fn transpose(permutation: impl Into<Vec<i64>>) -> Self {
        Self { transpose: Some(permutation.into()), ..Self::default() }
    }

    pub fn with_hints(mut self, hints: CacheHints) -> Self {
        self.hints = hints;
        self
    }

    /// Packing and transpose are mutually exclusive.
    pub fn verify_transform(&self) -> LogicalResult<XeGpuError> {
        if self.packed.is_some() && self.transpose.is_some() {
            return Err(XeGpuError::ConflictingTransform);
        }
        Ok(())
    }
}

/**
`xegpu.load_nd` reads the block a descriptor addresses into a vector.

Packing and transpose are mutually exclusive. Packing regroups narrow elements along one axis but leaves the logical shape unchanged; transpose permutes the tile axes, so the result shape is the permuted descriptor tile shape.

```mlir
%2 = xegpu.load_nd %1 {transpose = array<i64: 1, 0>} : !xegpu.tensor_desc<8x16xf32> -> vector<16x8xf32>
```
*/
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadNd {
    tensor_desc: Value,
    attributes: LoadAttributes,
    result: Value
}

impl Op for LoadNd {
    const NAME: &'static str = "xegpu.load_nd";
}

impl LoadNd {
    pub fn build(
        builder: &Builder,
        result_type: VectorType,
        tensor_desc: Value,
        attributes: LoadAttributes
    ) -> Result<Self, XeGpuError> {
        let context = builder.context();
        let op = Self {
            result: builder.result(result_type),
            tensor_desc,
            attributes
        };
        op.verify(context)
            .map_err(|error| emit_op_error::<Self, _>(context, error))?;
        tracing::trace!(op = %op, "created load");
        Ok(op)
    }

    /// Build with the result type inferred from the descriptor and the transform.
    pub fn build_inferred(
        builder: &Builder,
        tensor_desc: Value,
        attributes: LoadAttributes
    ) -> Result<Self, XeGpuError> {
        let context = builder.context();
        let result_type = attributes
            .verify_transform()
            .and_then(|()| tensor_desc_of(&tensor_desc, "loaded"))
            .and_then(|desc| infer_result_type(desc, &attributes))
            .map_err(|error| emit_op_error::<Self, _>(context, error))?;
        Self::build(builder, result_type, tensor_desc, attributes)
    }

    pub fn tensor_desc(&self) -> &Value {
        &self.tensor_desc
    }

    pub fn attributes(&self) -> &LoadAttributes {
        &self.attributes
    }

    /// The loaded tile.
    pub fn result(&self) -> &Value {
        &self.result
    }
}

/**
The vector type a load of `tensor_desc` produces under `attributes`. Checks the transform itself, not whether the hardware supports it.
*/
pub fn infer_result_type(tensor_desc: &TensorDesc, attributes: &LoadAttributes) -> Result<VectorType, XeGpuError> {
    let rank = tensor_desc.rank();
    attributes.verify_transform()?;
    if let Some(axis) = attributes.packed {
        if axis >= rank {
            return Err(XeGpuError::verification(
                Rule::PackedAxis,
                format!("packed axis {} is out of range for {}", axis, tensor_desc)
            ));
        }
    }
    let mut shape = tensor_desc.shape().to_vec();
    if let Some(permutation) = &attributes.transpose {
        if !is_permutation(permutation, rank) {
            return Err(XeGpuError::verification(
                Rule::Transpose,
                format!("transpose {:?} is not a permutation of the axes of {}", permutation, tensor_desc)
            ));
        }
        shape = permutation
            .iter()
            .map(|&axis| tensor_desc.shape()[axis as usize])
            .collect();
    }
    Ok(VectorType::new(shape, tensor_desc.element_type().clone()))
}

fn is_permutation(permutation: &[i64], rank: usize) -> bool {
    let mut seen = vec![false; rank];
    permutation.len() == rank
        && permutation.iter().all(|&axis| {
            usize::try_from(axis)
                .ok()
                .and_then(|axis| seen.get_mut(axis))
                .map_or(false, |seen| !core::mem::replace(seen, true))
        })
}

impl Verify for LoadNd {
    type Error = XeGpuError;

    fn verify(&self, context: &MLIRContext) -> LogicalResult<XeGpuError> {
        self.attributes.verify_transform()?;
        let tensor_desc = tensor_desc_of(&self.tensor_desc, "loaded")?;
        let expected = infer_result_type(tensor_desc, &self.attributes)?;

        let dialect = XeGpuDialect::get_or_default(context);
        let limits = dialect.verify_tile(tensor_desc)?;
        let bit_width = tensor_desc.element_type_bit_width().unwrap_or_default();
        if self.attributes.packed.is_some() && !limits.packing {
            return Err(XeGpuError::verification(
                Rule::TransformSupport,
                format!("packing is not available for {}-bit elements of {}", bit_width, tensor_desc)
            ));
        }
        if self.attributes.transpose.is_some() && !limits.transpose {
            return Err(XeGpuError::verification(
                Rule::TransformSupport,
                format!("transpose is not available for {}-bit elements of {}", bit_width, tensor_desc)
            ));
        }

        let found = self.result.r#type();
        if found.as_vector() != Some(&expected) {
            return Err(XeGpuError::ShapeMismatch {
                expected: expected.to_string(),
                found: found.to_string()
            });
        }
        Ok(())
    }
}

impl MemoryEffectOpInterface for LoadNd {
    fn effects(&self) -> Vec<EffectInstance> {
        vec![EffectInstance::on_value(Effect::Read, &self.tensor_desc)]
    }
}

impl fmt::Display for LoadNd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = {} {}{} : {} -> {}",
            self.result,
            Self::NAME,
            self.tensor_desc,
            print_attr_dict(
                self.attributes.packed,
                self.attributes.transpose.as_deref(),
                &self.attributes.hints
            ),
            self.tensor_desc.r#type(),
            self.result.r#type()
        )
    }
}

/*
----------------------------------------------------------------------
StoreNd
----------------------------------------------------------------------
*/

/**
`xegpu.store_nd` writes a vector to the block a descriptor addresses. The vector must have exactly the descriptor's tile shape and element type: stores never transform.

```mlir
xegpu.store_nd %2, %1 {l1_hint = #xegpu.cache_hint<write_back>} : vector<8x16xf32>, !xegpu.tensor_desc<8x16xf32>
```
*/
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreNd {
    value: Value,
    tensor_desc: Value,
    hints: CacheHints
}

impl Op for StoreNd {
    const NAME: &'static str = "xegpu.store_nd";
}

impl StoreNd {
    pub fn build(
        builder: &Builder,
        value: Value,
        tensor_desc: Value,
        hints: CacheHints
    ) -> Result<Self, XeGpuError> {
        let context = builder.context();
        let op = Self { value, tensor_desc, hints };
        op.verify(context)
            .map_err(|error| emit_op_error::<Self, _>(context, error))?;
        tracing::trace!(op = %op, "created store");
        Ok(op)
    }

    /// The stored tile.
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn tensor_desc(&self) -> &Value {
        &self.tensor_desc
    }

    pub fn hints(&self) -> &CacheHints {
        &self.hints
    }
}

impl Verify for StoreNd {
    type Error = XeGpuError;

    fn verify(&self, _context: &MLIRContext) -> LogicalResult<XeGpuError> {
        let tensor_desc = tensor_desc_of(&self.tensor_desc, "stored-to")?;
        let found = self.value.r#type().as_vector().ok_or_else(|| {
            XeGpuError::verification(
                Rule::OperandType,
                format!("expected stored value {} to be a vector, got {}", self.value, self.value.r#type())
            )
        })?;
        let expected = VectorType::new(tensor_desc.shape(), tensor_desc.element_type().clone());
        if *found != expected {
            return Err(XeGpuError::ShapeMismatch {
                expected: expected.to_string(),
                found: found.to_string()
            });
        }
        Ok(())
    }
}

impl MemoryEffectOpInterface for StoreNd {
    fn effects(&self) -> Vec<EffectInstance> {
        vec![EffectInstance::on_value(Effect::Write, &self.tensor_desc)]
    }
}

impl fmt::Display for StoreNd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}, {}{} : {}, {}",
            Self::NAME,
            self.value,
            self.tensor_desc,
            print_attr_dict(None, None, &self.hints),
            self.value.r#type(),
            self.tensor_desc.r#type()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::builtins::{
        type_interfaces::DYNAMIC,
        types::{FloatType, IntegerType, MemRefLayout}
    };

    fn zero_offsets() -> Vec<FoldResult> {
        vec![FoldResult::Attribute(0), FoldResult::Attribute(0)]
    }

    #[test]
    fn static_memref_shape_and_strides_are_reused() {
        let context = MLIRContext::new();
        let builder = Builder::new(&context);
        let source = builder.memref_type(&[1024, 1024], FloatType::F32);
        let source = builder.argument(source);
        let op = CreateNdDesc::build_from_memref(
            &builder,
            TensorDesc::new([8, 16], FloatType::F32),
            source.clone(),
            &zero_offsets()
        )
        .unwrap();

        assert_eq!(op.static_sizes(), &[1024, 1024]);
        assert_eq!(op.static_strides(), &[1024, 1]);
        assert_eq!(op.shape_provenance(), Provenance::Source);
        assert!(op.has_zero_offset());
        assert!(!op.has_unit_stride());
        assert_eq!(op.view_source(), &source);
        assert!(op.has_no_effect());
    }

    #[test]
    fn strided_layout_strides_are_computed_upfront() {
        let context = MLIRContext::new();
        let builder = Builder::new(&context);
        let source = builder.argument(MemRef::with_layout(
            [64, 64],
            FloatType::F16,
            MemRefLayout::Strided { strides: vec![128, 1], offset: 32 }
        ));
        let op = CreateNdDesc::build_from_memref(
            &builder,
            TensorDesc::new([8, 16], FloatType::F16),
            source,
            &zero_offsets()
        )
        .unwrap();
        assert_eq!(op.static_strides(), &[128, 1]);
    }

    #[test]
    fn affine_layout_without_strides_is_unsupported() {
        let context = MLIRContext::new();
        let builder = Builder::new(&context);
        let source = builder.argument(MemRef::with_layout(
            [64, 64],
            FloatType::F32,
            MemRefLayout::AffineMap("(d0, d1) -> (d1, d0)".into())
        ));
        let error = CreateNdDesc::build_from_memref(
            &builder,
            TensorDesc::new([8, 16], FloatType::F32),
            source,
            &zero_offsets()
        )
        .unwrap_err();
        assert!(matches!(error, XeGpuError::UnsupportedLayout(_)));
    }

    #[test]
    fn partially_static_source_requires_the_whole_shape() {
        let context = MLIRContext::new();
        let builder = Builder::new(&context);
        let source = builder.argument(MemRef::new([DYNAMIC, 1024], FloatType::F32));
        let error = CreateNdDesc::build_from_memref(
            &builder,
            TensorDesc::new([8, 16], FloatType::F32),
            source,
            &zero_offsets()
        )
        .unwrap_err();
        assert!(matches!(error, XeGpuError::InvalidDescriptorState(_)));
    }

    #[test]
    fn element_type_must_match_source() {
        let context = MLIRContext::new();
        let builder = Builder::new(&context);
        let source = builder.argument(MemRef::new([64, 64], FloatType::F32));
        let error = CreateNdDesc::build_from_memref(
            &builder,
            TensorDesc::new([8, 16], FloatType::F16),
            source,
            &zero_offsets()
        )
        .unwrap_err();
        assert_eq!(error.rule(), Some(Rule::ElementType));
    }

    #[test]
    fn non_address_source_is_rejected() {
        let context = MLIRContext::new();
        let builder = Builder::new(&context);
        let source = builder.argument(IntegerType::signless(32));
        let h = builder.index_argument();
        let w = builder.index_argument();
        let error = CreateNdDesc::build_from_address(
            &builder,
            TensorDesc::new([8, 16], FloatType::F32),
            source,
            &zero_offsets(),
            &[h, w.clone()],
            &[w, builder.index_argument()]
        )
        .unwrap_err();
        assert_eq!(error.rule(), Some(Rule::SourceKind));
    }

    #[test]
    fn tile_rank_cannot_exceed_descriptor_rank() {
        let context = MLIRContext::new();
        let builder = Builder::new(&context);
        let source = builder.argument(MemRef::new([1024], FloatType::F32));
        let error = CreateNdDesc::build_from_memref(
            &builder,
            TensorDesc::new([8, 16], FloatType::F32),
            source,
            &[FoldResult::Attribute(0)]
        )
        .unwrap_err();
        assert_eq!(error.rule(), Some(Rule::RankConsistency));
    }

    #[test]
    fn inferred_load_type_follows_the_transform() {
        let desc = TensorDesc::new([8, 16], FloatType::F32);
        assert_eq!(
            infer_result_type(&desc, &LoadAttributes::default()),
            Ok(VectorType::new([8, 16], FloatType::F32))
        );
        assert_eq!(
            infer_result_type(&desc, &LoadAttributes::transpose([1, 0])),
            Ok(VectorType::new([16, 8], FloatType::F32))
        );
        assert_eq!(
            infer_result_type(&desc, &LoadAttributes::packed(1)),
            Ok(VectorType::new([8, 16], FloatType::F32))
        );
    }

    #[test]
    fn permutation_check() {
        assert!(is_permutation(&[1, 0], 2));
        assert!(is_permutation(&[0, 1], 2));
        assert!(!is_permutation(&[0, 0], 2));
        assert!(!is_permutation(&[1], 2));
        assert!(!is_permutation(&[2, 0], 2));
        assert!(!is_permutation(&[-1, 0], 2));
    }

    #[test]
    fn ops_print_in_assembly_form() {
        let context = MLIRContext::new();
        let builder = Builder::new(&context);
        let source = builder.argument(MemRef::new([1024, 1024], FloatType::F32));
        let create = CreateNdDesc::build_from_memref(
            &builder,
            TensorDesc::new([8, 16], FloatType::F32),
            source,
            &zero_offsets()
        )
        .unwrap();
        assert_eq!(
            create.to_string(),
            "%1 = xegpu.create_nd_tdesc %0[0, 0] : memref<1024x1024xf32> -> !xegpu.tensor_desc<8x16xf32>"
        );

        let load = LoadNd::build_inferred(
            &builder,
            create.result().clone(),
            LoadAttributes::transpose([1, 0])
        )
        .unwrap();
        assert_eq!(
            load.to_string(),
            "%2 = xegpu.load_nd %1 {transpose = array<i64: 1, 0>} : !xegpu.tensor_desc<8x16xf32> -> vector<16x8xf32>"
        );
    }
}
