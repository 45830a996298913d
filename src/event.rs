use std::ops::Range;

/// Kind of structural change applied to a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// A row was appended.
    RowAppended,
    /// A row was removed.
    RowRemoved,
    /// A column was added.
    ColumnAdded,
    /// A column was removed.
    ColumnRemoved,
    /// Rows from another table were appended.
    Joined,
}

/// Immutable description of one structural change, dispatched to
/// listeners synchronously after the mutation, while the table guard
/// is still held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// What changed.
    pub kind: ChangeKind,
    /// Affected row index range, if the change touched rows.
    pub rows: Option<Range<usize>>,
    /// Affected column index, if the change touched one column.
    pub column: Option<usize>,
}

impl ChangeEvent {
    pub(crate) fn rows(kind: ChangeKind, rows: Range<usize>) -> Self {
        Self {
            kind,
            rows: Some(rows),
            column: None,
        }
    }

    pub(crate) fn column(kind: ChangeKind, column: usize) -> Self {
        Self {
            kind,
            rows: None,
            column: Some(column),
        }
    }
}

/// Observer of structural table changes.
///
/// Listeners are invoked while the table's exclusive guard is held, so
/// they observe a consistent snapshot; they must not call back into the
/// same table.
pub trait TableListener: Send {
    /// Called once per structural change.
    fn on_change(&mut self, event: &ChangeEvent);
}

impl<F: FnMut(&ChangeEvent) + Send> TableListener for F {
    fn on_change(&mut self, event: &ChangeEvent) {
        self(event);
    }
}
