// ============================================================================
// Row Operation Observer Interface
// Defines the contract for watching elimination step by step
// ============================================================================

use crate::numeric::Scalar;
use parking_lot::Mutex;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Row operations applied by a linear system, in the order they happen
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RowOperation {
    /// Two equations exchanged places
    Swapped { first: usize, second: usize },

    /// An equation was multiplied by a coefficient
    Scaled { row: usize, coefficient: Scalar },

    /// `coefficient × source` was added to `target`
    Added {
        coefficient: Scalar,
        source: usize,
        target: usize,
    },
}

/// Observer trait for row operations.
/// Implementations can handle logging, step-by-step printing, auditing, etc.
pub trait RowOperationObserver: Send + Sync {
    /// Handle a completed row operation
    fn on_operation(&self, operation: &RowOperation);

    /// Batch handler (optional optimization)
    fn on_operations(&self, operations: &[RowOperation]) {
        for operation in operations {
            self.on_operation(operation);
        }
    }
}

/// No-op observer, the default for new systems
pub struct NoOpObserver;

impl RowOperationObserver for NoOpObserver {
    fn on_operation(&self, _operation: &RowOperation) {
        // Do nothing
    }
}

/// Logging observer
pub struct LoggingObserver;

impl RowOperationObserver for LoggingObserver {
    fn on_operation(&self, operation: &RowOperation) {
        tracing::debug!("Row operation: {:?}", operation);
    }
}

/// Records every operation for later replay.
///
/// Shared between a system and its working copies, so one log captures
/// the whole elimination.
#[derive(Default)]
pub struct RowOperationLog {
    operations: Mutex<Vec<RowOperation>>,
}

impl RowOperationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the operations recorded so far
    pub fn operations(&self) -> Vec<RowOperation> {
        self.operations.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.operations.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.lock().is_empty()
    }

    /// Drain the log
    pub fn take(&self) -> Vec<RowOperation> {
        std::mem::take(&mut *self.operations.lock())
    }
}

impl RowOperationObserver for RowOperationLog {
    fn on_operation(&self, operation: &RowOperation) {
        self.operations.lock().push(operation.clone());
    }
}
