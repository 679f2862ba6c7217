use mlir::{
    dialect::{
        utils::static_value_utils::DynamicIndexList,
        xegpu::ir::{
            errors::{Rule, XeGpuError},
            operations::{CreateNdDesc, LoadAttributes, LoadNd, NdDescParams},
            types::TensorDesc
        }
    },
    interfaces::view_like_interface::OffsetSizeAndStrideOpInterface,
    ir::{
        builders::Builder,
        builtins::types::{canonical_strides, FloatType, IntegerType, MemRef, VectorType},
        mlir_context::MLIRContext,
        operation::definition::FoldResult
    }
};
use proptest::prelude::*;

/// A 2D tile that fits the default limits for 32-bit elements.
fn f32_tile() -> impl Strategy<Value = (i64, i64)> {
    (1i64..=32, 1i64..=16)
}

/// A static memref shape large enough to hold `tile`.
fn source_shape(tile: (i64, i64)) -> impl Strategy<Value = Vec<i64>> {
    (tile.0..=4 * tile.0 + 64, tile.1..=4 * tile.1 + 64).prop_map(|(h, w)| vec![h, w])
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128, ..ProptestConfig::default()
    })]

    #[test]
    fn static_shapes_and_strides_are_taken_from_the_source(
        (tile, shape) in f32_tile().prop_flat_map(|tile| (Just(tile), source_shape(tile))),
        offsets in prop::collection::vec(0i64..64, 2)
    ) {
        let context = MLIRContext::new();
        let builder = Builder::new(&context);
        let source = builder.argument(MemRef::new(shape.clone(), FloatType::F32));
        let offsets: Vec<FoldResult> = offsets.into_iter().map(FoldResult::Attribute).collect();
        let op = CreateNdDesc::build_from_memref(
            &builder,
            TensorDesc::new([tile.0, tile.1], FloatType::F32),
            source,
            &offsets
        ).unwrap();

        prop_assert_eq!(op.static_sizes(), shape.as_slice());
        let expected_strides = canonical_strides(&shape);
        prop_assert_eq!(op.static_strides(), expected_strides.as_slice());
        prop_assert_eq!(op.mixed_offsets(), offsets);
    }

    #[test]
    fn offsets_of_the_wrong_rank_are_rejected(rank in 0usize..6) {
        prop_assume!(rank != 2);
        let context = MLIRContext::new();
        let builder = Builder::new(&context);
        let source = builder.argument(MemRef::new([256, 256], FloatType::F32));
        let offsets = vec![FoldResult::Attribute(0); rank];
        let error = CreateNdDesc::build_from_memref(
            &builder,
            TensorDesc::new([8, 16], FloatType::F32),
            source,
            &offsets
        ).unwrap_err();
        prop_assert_eq!(error.rule(), Some(Rule::RankConsistency));
    }

    #[test]
    fn explicit_shape_of_the_wrong_rank_is_rejected(
        raw in any::<bool>(),
        offsets_rank in 1usize..4,
        shape_rank in 0usize..5
    ) {
        prop_assume!(shape_rank != offsets_rank);
        let context = MLIRContext::new();
        let builder = Builder::new(&context);
        let source = if raw {
            builder.argument(IntegerType::unsigned(64))
        } else {
            builder.argument(MemRef::new(vec![64; offsets_rank], FloatType::F32))
        };
        let shape: Vec<_> = (0..shape_rank).map(|_| builder.index_argument()).collect();
        let strides: Vec<_> = (0..offsets_rank).map(|_| builder.index_argument()).collect();
        let params = NdDescParams {
            shape: Some(DynamicIndexList::from_values(&shape)),
            strides: Some(DynamicIndexList::from_values(&strides)),
            ..NdDescParams::from_offsets(&vec![FoldResult::Attribute(0); offsets_rank]).unwrap()
        };
        let error = CreateNdDesc::build(&builder, TensorDesc::new([16], FloatType::F32), source, params).unwrap_err();
        prop_assert_eq!(error.rule(), Some(Rule::RankConsistency));
    }

    #[test]
    fn packing_with_transpose_is_always_a_conflict(
        packed in 0usize..4,
        transpose in prop::collection::vec(0i64..4, 0..4),
        tile in f32_tile()
    ) {
        let context = MLIRContext::new();
        let builder = Builder::new(&context);
        let source = builder.argument(MemRef::new([256, 256], FloatType::F32));
        let create = CreateNdDesc::build_from_memref(
            &builder,
            TensorDesc::new([tile.0, tile.1], FloatType::F32),
            source,
            &[FoldResult::Attribute(0), FoldResult::Attribute(0)]
        ).unwrap();
        let attributes = LoadAttributes {
            packed: Some(packed),
            transpose: Some(transpose),
            ..LoadAttributes::default()
        };
        let error = LoadNd::build(
            &builder,
            VectorType::new([tile.0, tile.1], FloatType::F32),
            create.result().clone(),
            attributes
        ).unwrap_err();
        prop_assert_eq!(error, XeGpuError::ConflictingTransform);
    }
}
