/*!
This file defines utilities for dealing with static values, e.g., converting back and forth between Value and FoldResult. Such functionality is used in multiple dialects.

The mixed static/dynamic encoding keeps a list of static integers in which the [`DYNAMIC`] sentinel marks positions whose value is supplied by the next SSA value of a parallel dynamic list.

- include <https://github.com/llvm/llvm-project/blob/main/mlir/include/mlir/Dialect/Utils/StaticValueUtils.h>
- lib <https://github.com/llvm/llvm-project/blob/main/mlir/lib/Dialect/Utils/StaticValueUtils.cpp>
*/

use core::fmt;

use thiserror::Error;

use crate::ir::{
    builtins::type_interfaces::{is_dynamic, DYNAMIC},
    operation::definition::FoldResult,
    value::Value
};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum IndexListError {
    #[error("{sentinels} dynamic positions but {values} dynamic values")]
    DynamicCountMismatch { sentinels: usize, values: usize },
    #[error("constant at position {position} collides with the dynamic sentinel")]
    SentinelConstant { position: usize }
}

/// If `ofr` is a constant integer, return the integer.
pub fn constant_int_value(ofr: &FoldResult) -> Option<i64> {
    match ofr {
        FoldResult::Attribute(value) => Some(*value),
        FoldResult::Value(_) => None
    }
}

/// Return true if `ofr` is a constant integer equal to `value`.
pub fn is_constant_int_value(ofr: &FoldResult, value: i64) -> bool {
    constant_int_value(ofr) == Some(value)
}

/**
Helper function to dispatch a FoldResult into `static_values` if it is a constant, or into `dynamic_values` (with [`DYNAMIC`] recorded in its static position) if it is a Value.
*/
pub fn dispatch_index_op_fold_results(ofrs: &[FoldResult]) -> (Vec<Value>, Vec<i64>) {
    let mut dynamic_values = Vec::new();
    let mut static_values = Vec::with_capacity(ofrs.len());
    for ofr in ofrs {
        match ofr {
            FoldResult::Attribute(value) => static_values.push(*value),
            FoldResult::Value(value) => {
                dynamic_values.push(value.clone());
                static_values.push(DYNAMIC);
            }
        }
    }
    (dynamic_values, static_values)
}

/**
Return a vector of FoldResults combining the static and dynamic values: every [`DYNAMIC`] entry of `static_values` is replaced by the next entry of `dynamic_values`.
*/
pub fn mixed_values(
    static_values: &[i64],
    dynamic_values: &[Value]
) -> Result<Vec<FoldResult>, IndexListError> {
    check_dynamic_count(static_values, dynamic_values)?;
    let mut dynamic = dynamic_values.iter();
    Ok(static_values
        .iter()
        .filter_map(|&value| {
            if is_dynamic(value) {
                dynamic.next().map(FoldResult::from)
            } else {
                Some(FoldResult::Attribute(value))
            }
        })
        .collect())
}

fn check_dynamic_count(static_values: &[i64], dynamic_values: &[Value]) -> Result<(), IndexListError> {
    let sentinels = static_values.iter().filter(|&&value| is_dynamic(value)).count();
    if sentinels != dynamic_values.len() {
        return Err(IndexListError::DynamicCountMismatch {
            sentinels,
            values: dynamic_values.len()
        });
    }
    Ok(())
}

/**
A list of indices where each position is either a static constant or a dynamic SSA value, stored as the `(dynamic values, static values with sentinels)` pair. Used identically for offsets, sizes and strides.

```text
[%0, 4, %1]  =>  dynamic: [%0, %1], static: [?, 4, ?]
```
*/
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DynamicIndexList {
    dynamic: Vec<Value>,
    static_values: Vec<i64>
}

impl DynamicIndexList {
    /// Combine a static list with the values filling its dynamic positions.
    pub fn new(static_values: Vec<i64>, dynamic: Vec<Value>) -> Result<Self, IndexListError> {
        check_dynamic_count(&static_values, &dynamic)?;
        Ok(Self { dynamic, static_values })
    }

    pub fn from_mixed(ofrs: &[FoldResult]) -> Result<Self, IndexListError> {
        if let Some(position) = ofrs
            .iter()
            .position(|ofr| is_constant_int_value(ofr, DYNAMIC))
        {
            return Err(IndexListError::SentinelConstant { position });
        }
        let (dynamic, static_values) = dispatch_index_op_fold_results(ofrs);
        Ok(Self { dynamic, static_values })
    }

    /// A list whose every position is dynamic.
    pub fn from_values(values: &[Value]) -> Self {
        Self {
            dynamic: values.to_vec(),
            static_values: vec![DYNAMIC; values.len()]
        }
    }

    /// Number of logical positions.
    pub fn len(&self) -> usize {
        self.static_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.static_values.is_empty()
    }

    pub fn num_dynamic(&self) -> usize {
        self.dynamic.len()
    }

    /// The dynamic values, in position order.
    pub fn dynamic(&self) -> &[Value] {
        &self.dynamic
    }

    /// The static values, with [`DYNAMIC`] in dynamic positions.
    pub fn static_values(&self) -> &[i64] {
        &self.static_values
    }

    pub fn is_dynamic(&self, index: usize) -> bool {
        self.static_values.get(index).map_or(false, |&value| is_dynamic(value))
    }

    pub fn is_fully_static(&self) -> bool {
        self.dynamic.is_empty()
    }

    pub fn is_fully_dynamic(&self) -> bool {
        self.dynamic.len() == self.static_values.len()
    }

    /// The constant at `index`, `None` if that position is dynamic or out of range.
    pub fn static_value(&self, index: usize) -> Option<i64> {
        self.static_values
            .get(index)
            .copied()
            .filter(|&value| !is_dynamic(value))
    }

    /// The SSA value at `index`, `None` if that position is static or out of range.
    pub fn dynamic_value(&self, index: usize) -> Option<&Value> {
        if !self.is_dynamic(index) {
            return None;
        }
        let position = self.static_values[..index]
            .iter()
            .filter(|&&value| is_dynamic(value))
            .count();
        self.dynamic.get(position)
    }

    pub fn get(&self, index: usize) -> Option<FoldResult> {
        match self.static_value(index) {
            Some(value) => Some(FoldResult::Attribute(value)),
            None => self.dynamic_value(index).map(FoldResult::from)
        }
    }

    /// Decompose into one FoldResult per position.
    pub fn mixed(&self) -> Vec<FoldResult> {
        (0..self.len()).filter_map(|index| self.get(index)).collect()
    }
}

impl fmt::Display for DynamicIndexList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self
            .mixed()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "[{}]", entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{builders::Builder, mlir_context::MLIRContext};

    #[test]
    fn mixed_list_round_trips_through_the_encoding() {
        let context = MLIRContext::new();
        let builder = Builder::new(&context);
        let h = builder.index_argument();
        let w = builder.index_argument();
        let mixed = vec![FoldResult::from(&h), FoldResult::Attribute(4), FoldResult::from(&w)];

        let list = DynamicIndexList::from_mixed(&mixed).unwrap();
        assert_eq!(list.static_values(), &[DYNAMIC, 4, DYNAMIC]);
        assert_eq!(list.dynamic(), &[h.clone(), w.clone()]);
        assert_eq!((list.len(), list.num_dynamic()), (3, 2));
        assert_eq!(list.dynamic_value(2), Some(&w));
        assert_eq!(list.static_value(1), Some(4));
        assert_eq!(list.static_value(0), None);
        assert_eq!(list.mixed(), mixed);
        assert_eq!(mixed_values(list.static_values(), list.dynamic()).unwrap(), mixed);
        assert_eq!(list.to_string(), format!("[{}, 4, {}]", h, w));
    }

    #[test]
    fn sentinel_count_must_match_dynamic_values() {
        let context = MLIRContext::new();
        let value = Builder::new(&context).index_argument();
        assert_eq!(
            DynamicIndexList::new(vec![DYNAMIC, DYNAMIC], vec![value]),
            Err(IndexListError::DynamicCountMismatch { sentinels: 2, values: 1 })
        );
        assert!(DynamicIndexList::new(vec![0, 0], Vec::new()).unwrap().is_fully_static());
    }

    #[test]
    fn sentinel_constant_is_rejected() {
        assert_eq!(
            DynamicIndexList::from_mixed(&[FoldResult::Attribute(1), FoldResult::Attribute(DYNAMIC)]),
            Err(IndexListError::SentinelConstant { position: 1 })
        );
    }
}
