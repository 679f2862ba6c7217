//! MLIR Diagnostics
//!
//! This file defines utilities for emitting diagnostics.
//!
//! - include <https://github.com/llvm/llvm-project/blob/main/mlir/include/mlir/IR/Diagnostics.h>
//! - lib <https://github.com/llvm/llvm-project/blob/main/mlir/lib/IR/Diagnostics.cpp>

use core::{cell::{Cell, RefCell}, fmt};
use std::rc::Rc;

/// Defines the different supported severity of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Note,
    Warning,
    Error,
    Remark
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Note => "note",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Remark => "remark"
        })
    }
}

/// A diagnostic attached to an operation: its severity, the name of the operation that raised it, a message and any number of notes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    severity: Severity,
    operation: String,
    message: String,
    notes: Vec<String>
}

impl Diagnostic {
    pub fn new(severity: Severity, operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            operation: operation.into(),
            message: message.into(),
            notes: Vec::new()
        }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Name of the operation the diagnostic was emitted on.
    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    /// Attaches a note to this diagnostic.
    pub fn attach_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: '{}' op {}", self.severity, self.operation, self.message)?;
        for note in &self.notes {
            write!(f, "\nnote: {}", note)?;
        }
        Ok(())
    }
}

/// The handler type for MLIR diagnostics. This function takes a diagnostic as input, and returns true if the handler has fully processed this diagnostic.
pub type Handler = Rc<dyn Fn(&Diagnostic) -> bool>;

/// Identifies a registered handler so that it can be erased again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

/**
This type is the main interface for diagnostics. The DiagnosticEngine manages the registration of diagnostic handlers as well as the core API for diagnostic emission. It is owned by an [`MLIRContext`](super::mlir_context::MLIRContext).

Tools are encouraged to register handlers. If none processes a diagnostic, it is forwarded to `tracing` at the matching level.
*/
pub struct DiagnosticEngine {
    /// These are the handlers used to report diagnostics.
    handlers: RefCell<Vec<(HandlerId, Handler)>>,

    /// This is a unique identifier counter for diagnostic handlers in the context. This id starts at 1 to allow for 0 to be used as a sentinel.
    unique_handler_id: Cell<u64>
}

impl Default for DiagnosticEngine {
    fn default() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
            unique_handler_id: Cell::new(1)
        }
    }
}

impl DiagnosticEngine {
    /**
    Register a new handler for diagnostics to the engine. Diagnostics are process by handlers in stack-like order, meaning that the last added handlers will process diagnostics first.
    */
    pub fn register_handler(&self, handler: impl Fn(&Diagnostic) -> bool + 'static) -> HandlerId {
        let id = HandlerId(self.unique_handler_id.get());
        self.unique_handler_id.set(id.0 + 1);
        self.handlers.borrow_mut().push((id, Rc::new(handler)));
        id
    }

    /// Erase the registered diagnostic handler with the given identifier.
    pub fn erase_handler(&self, id: HandlerId) {
        self.handlers.borrow_mut().retain(|(handler_id, _)| *handler_id != id);
    }

    /// Emit a diagnostic using the registered handlers, falling back to `tracing` when none of them processes it.
    pub fn emit(&self, diagnostic: Diagnostic) {
        // Handlers may register or erase handlers while they run.
        let handlers: Vec<Handler> = self
            .handlers
            .borrow()
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect();
        let handled = handlers.iter().rev().any(|handler| handler(&diagnostic));
        if handled {
            return;
        }
        match diagnostic.severity {
            Severity::Error => tracing::error!(operation = %diagnostic.operation, "{}", diagnostic.message),
            Severity::Warning => tracing::warn!(operation = %diagnostic.operation, "{}", diagnostic.message),
            Severity::Remark | Severity::Note => {
                tracing::info!(operation = %diagnostic.operation, "{}", diagnostic.message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_registered_handler_runs_first() {
        let engine = DiagnosticEngine::default();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let first = Rc::clone(&seen);
        engine.register_handler(move |_| {
            first.borrow_mut().push("first");
            true
        });
        let second = Rc::clone(&seen);
        let id = engine.register_handler(move |_| {
            second.borrow_mut().push("second");
            false
        });

        engine.emit(Diagnostic::new(Severity::Error, "test.op", "boom"));
        assert_eq!(*seen.borrow(), vec!["second", "first"]);

        engine.erase_handler(id);
        engine.emit(Diagnostic::new(Severity::Error, "test.op", "boom"));
        assert_eq!(*seen.borrow(), vec!["second", "first", "first"]);
    }

    #[test]
    fn handlers_can_register_handlers_while_running() {
        let engine = Rc::new(DiagnosticEngine::default());
        let seen = Rc::new(RefCell::new(Vec::new()));

        let nested_engine = Rc::downgrade(&engine);
        let nested_seen = Rc::clone(&seen);
        let outer = engine.register_handler(move |diagnostic| {
            if let Some(engine) = nested_engine.upgrade() {
                let inner_seen = Rc::clone(&nested_seen);
                engine.register_handler(move |diagnostic| {
                    inner_seen.borrow_mut().push(diagnostic.message().to_string());
                    true
                });
            }
            nested_seen.borrow_mut().push(format!("outer {}", diagnostic.message()));
            true
        });

        engine.emit(Diagnostic::new(Severity::Error, "test.op", "first"));
        engine.erase_handler(outer);
        engine.emit(Diagnostic::new(Severity::Error, "test.op", "second"));
        assert_eq!(*seen.borrow(), vec!["outer first".to_string(), "second".to_string()]);
    }

    #[test]
    fn diagnostic_prints_operation_and_notes() {
        let diagnostic = Diagnostic::new(Severity::Error, "xegpu.load_nd", "bad transpose")
            .attach_note("see operand #0");
        assert_eq!(
            diagnostic.to_string(),
            "error: 'xegpu.load_nd' op bad transpose\nnote: see operand #0"
        );
    }
}
