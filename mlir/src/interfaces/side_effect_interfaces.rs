/*!
This file contains traits, interfaces, and utilities for defining and querying the side effects of an operation.

Operations only declare their effects here. Analyses that need to know whether two operations touch overlapping memory live downstream and consume this interface.

- include
  - <https://github.com/llvm/llvm-project/blob/main/mlir/include/mlir/Interfaces/SideEffectInterfaces.h>
  - <https://github.com/llvm/llvm-project/blob/main/mlir/include/mlir/Interfaces/SideEffectInterfaces.td>
- lib <https://github.com/llvm/llvm-project/blob/main/mlir/lib/Interfaces/SideEffectInterfaces.cpp>
*/

use crate::ir::value::Value;

/// The memory effects an operation may have.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Effect {
    /// The reading of memory.
    Read,
    /// The writing of memory.
    Write
}

/**
This type represents a specific instance of an effect: the effect being applied and the value, if any, that designates the memory it applies to.
*/
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EffectInstance {
    effect: Effect,
    value: Option<Value>
}

impl EffectInstance {
    pub fn new(effect: Effect, value: Option<Value>) -> Self {
        Self { effect, value }
    }

    pub fn on_value(effect: Effect, value: &Value) -> Self {
        Self::new(effect, Some(value.clone()))
    }

    pub fn effect(&self) -> Effect {
        self.effect
    }

    /// Return the value the effect is applied on, if any.
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }
}

/// An interface used to query information about the memory effects applied by an operation.
pub trait MemoryEffectOpInterface {
    /// Collects all of the operation's effects.
    fn effects(&self) -> Vec<EffectInstance>;

    /// Returns true if this operation has no effects.
    fn has_no_effect(&self) -> bool {
        self.effects().is_empty()
    }

    /// Returns true if this operation only has the given effect on `value`.
    fn only_has_effect_on(&self, effect: Effect, value: &Value) -> bool {
        let effects = self.effects();
        !effects.is_empty()
            && effects
                .iter()
                .all(|instance| instance.effect == effect && instance.value() == Some(value))
    }
}
