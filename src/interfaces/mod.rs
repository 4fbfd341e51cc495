// ============================================================================
// Interfaces Module
// Contains all trait definitions and contracts
// ============================================================================

mod row_observer;

pub use row_observer::{
    LoggingObserver, NoOpObserver, RowOperation, RowOperationLog, RowOperationObserver,
};
