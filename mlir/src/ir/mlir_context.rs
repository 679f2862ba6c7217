//! MLIR Global Context Class
//!
//! - include <https://github.com/llvm/llvm-project/blob/main/mlir/include/mlir/IR/MLIRContext.h>
//! - lib <https://github.com/llvm/llvm-project/blob/main/mlir/lib/IR/MLIRContext.cpp>

use std::{
    any::{Any, TypeId},
    cell::Cell,
    collections::HashMap
};

use crate::ir::{
    diagnostics::DiagnosticEngine,
    dialect::Dialect
};

/**
MLIRContext is the top-level object for a collection of MLIR operations. It holds the diagnostic engine, the loaded dialects and the counter used to give values unique ids.

The context is single-threaded: operations are built and verified synchronously, one at a time.
*/
#[derive(Default)]
pub struct MLIRContext {
    diag_engine: DiagnosticEngine,
    loaded_dialects: HashMap<TypeId, Box<dyn Any>>,
    next_value_id: Cell<usize>
}

impl MLIRContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the diagnostic engine for this context.
    pub fn diag_engine(&self) -> &DiagnosticEngine {
        &self.diag_engine
    }

    /// Load a dialect in the context, replacing a previously loaded instance of the same dialect.
    pub fn load_dialect<D: Dialect>(&mut self, dialect: D) {
        tracing::debug!(namespace = dialect.namespace(), "loading dialect");
        self.loaded_dialects.insert(TypeId::of::<D>(), Box::new(dialect));
    }

    /// Get a registered IR dialect of type `D`, `None` if it has not been loaded.
    pub fn loaded_dialect<D: Dialect>(&self) -> Option<&D> {
        self.loaded_dialects
            .get(&TypeId::of::<D>())
            .and_then(|dialect| dialect.downcast_ref::<D>())
    }

    pub(crate) fn next_value_id(&self) -> usize {
        let id = self.next_value_id.get();
        self.next_value_id.set(id + 1);
        id
    }
}
