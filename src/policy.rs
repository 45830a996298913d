//! Pluggable error policy for recoverable parse and mutation errors.
//!
//! Each hook is invoked synchronously at the point of detection. The
//! default implementations return the matching [`TableError`], so a
//! table built with [`StrictPolicy`] fails fast. A policy that returns
//! `Ok(())` from a hook opts into the recovery behavior documented on
//! that hook.

use crate::error::{Result, TableError};

/// Caller-supplied hooks for every recoverable error category.
///
/// The unterminated-quote parse error is not represented here: it is
/// always fatal.
pub trait ErrorPolicy: Send + Sync {
    /// An adapter failed during materialization. Recovery substitutes
    /// the column default and continues.
    fn on_cell_conversion(&self, message: &str) -> Result<()> {
        Err(TableError::CellConversion(message.to_string()))
    }

    /// A declared column spec carries no adapter. Recovery drops the
    /// declaration and re-infers the column.
    fn on_column_without_adapter(&self, message: &str) -> Result<()> {
        Err(TableError::ColumnWithoutAdapter(message.to_string()))
    }

    /// A row's cell count disagrees with the column list. Recovery
    /// filters the row out entirely.
    fn on_inconsistent_column_count(&self, message: &str) -> Result<()> {
        Err(TableError::InconsistentColumnCount(message.to_string()))
    }

    /// A programmatic append does not match the table shape. Recovery
    /// rejects the append and leaves the table unchanged.
    fn on_invalid_row_append(&self, message: &str) -> Result<()> {
        Err(TableError::InvalidRowAppend(message.to_string()))
    }
}

/// The default policy: every hook returns its error.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictPolicy;

impl ErrorPolicy for StrictPolicy {}

/// A policy that recovers from every category silently.
#[derive(Debug, Clone, Copy, Default)]
pub struct LenientPolicy;

impl ErrorPolicy for LenientPolicy {
    fn on_cell_conversion(&self, _message: &str) -> Result<()> {
        Ok(())
    }

    fn on_column_without_adapter(&self, _message: &str) -> Result<()> {
        Ok(())
    }

    fn on_inconsistent_column_count(&self, _message: &str) -> Result<()> {
        Ok(())
    }

    fn on_invalid_row_append(&self, _message: &str) -> Result<()> {
        Ok(())
    }
}
