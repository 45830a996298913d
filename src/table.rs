//! The typed table: load, mutate, observe, save.

use crate::column::ColumnSpec;
use crate::engine;
use crate::error::{Result, TableError};
use crate::event::{ChangeEvent, ChangeKind, TableListener};
use crate::materialize::materialize;
use crate::options::ParseOptions;
use crate::policy::{ErrorPolicy, StrictPolicy};
use crate::schema::{consolidate, resolve_titles};
use crate::serialize::write_table;
use crate::value::Value;
use std::io::{Read, Write};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A typed, observable table loaded from CSV text.
///
/// All structural mutations and listener-facing reads serialize
/// through one exclusive guard; listeners are notified synchronously
/// after a mutation, before the guard is released, so they always
/// observe a consistent snapshot.
///
/// # Example
///
/// ```
/// use csv_forge::{ParseOptions, Table, Value};
///
/// let table = Table::load("id,name\n1,Alice\n2,Bob\n", &ParseOptions::new()).unwrap();
/// assert_eq!(table.num_rows(), 2);
/// assert_eq!(table.cell(0, 1), Some(Value::Text("Alice".into())));
/// ```
pub struct Table {
    options: ParseOptions,
    state: Mutex<TableState>,
}

struct TableState {
    columns: Vec<ColumnSpec>,
    rows: Vec<Vec<Value>>,
    listeners: Vec<Box<dyn TableListener>>,
}

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table").finish_non_exhaustive()
    }
}

impl TableState {
    fn notify(&mut self, event: &ChangeEvent) {
        for listener in &mut self.listeners {
            listener.on_change(event);
        }
    }
}

impl Table {
    /// Load a table from decoded text with the default (strict)
    /// error policy.
    pub fn load(text: &str, options: &ParseOptions) -> Result<Self> {
        Self::load_with_policy(text, options, &StrictPolicy)
    }

    /// Load a table from decoded text with a caller-supplied error
    /// policy.
    pub fn load_with_policy(
        text: &str,
        options: &ParseOptions,
        policy: &dyn ErrorPolicy,
    ) -> Result<Self> {
        // Snapshot the options; the caller's instance is never touched.
        let options = options.clone();
        options.validate()?;

        let mut grid = engine::parse_grid(text, &options)?;

        let title_row = if options.has_title_row && !grid.is_empty() {
            Some(grid.remove(0))
        } else {
            None
        };
        let width = grid
            .iter()
            .map(Vec::len)
            .max()
            .unwrap_or(0)
            .max(title_row.as_ref().map_or(0, Vec::len));

        let titles = resolve_titles(title_row.as_deref(), &options.columns, width);
        let columns = consolidate(&titles, &grid, &options.columns, policy)?;
        let rows = materialize(grid, &columns, policy)?;

        Ok(Self {
            options,
            state: Mutex::new(TableState {
                columns,
                rows,
                listeners: Vec::new(),
            }),
        })
    }

    /// Load a table from raw bytes, decoding via the configured
    /// encoding (or detection when none is declared).
    pub fn load_bytes(data: &[u8], options: &ParseOptions) -> Result<Self> {
        Self::load_bytes_with_policy(data, options, &StrictPolicy)
    }

    /// Load a table from raw bytes with a caller-supplied error policy.
    pub fn load_bytes_with_policy(
        data: &[u8],
        options: &ParseOptions,
        policy: &dyn ErrorPolicy,
    ) -> Result<Self> {
        let (text, _) = crate::encoding::decode(data, options.encoding);
        Self::load_with_policy(&text, options, policy)
    }

    /// Load a table from a file path.
    pub fn load_path<P: AsRef<Path>>(path: P, options: &ParseOptions) -> Result<Self> {
        let mut data = Vec::new();
        std::fs::File::open(path.as_ref())?.read_to_end(&mut data)?;
        Self::load_bytes(&data, options)
    }

    fn lock(&self) -> MutexGuard<'_, TableState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of rows.
    pub fn num_rows(&self) -> usize {
        self.lock().rows.len()
    }

    /// Number of columns.
    pub fn num_columns(&self) -> usize {
        self.lock().columns.len()
    }

    /// The consolidated column specs, in order.
    pub fn columns(&self) -> Vec<ColumnSpec> {
        self.lock().columns.clone()
    }

    /// The ordered column titles.
    pub fn titles(&self) -> Vec<String> {
        self.lock()
            .columns
            .iter()
            .map(|spec| spec.title.clone())
            .collect()
    }

    /// One row by index.
    pub fn row(&self, index: usize) -> Option<Vec<Value>> {
        self.lock().rows.get(index).cloned()
    }

    /// One cell by row and column index.
    pub fn cell(&self, row: usize, column: usize) -> Option<Value> {
        self.lock().rows.get(row).and_then(|r| r.get(column)).cloned()
    }

    /// All rows, cloned.
    pub fn rows(&self) -> Vec<Vec<Value>> {
        self.lock().rows.clone()
    }

    /// Register a listener for structural changes.
    pub fn subscribe(&self, listener: Box<dyn TableListener>) {
        self.lock().listeners.push(listener);
    }

    /// Append a row with the default (strict) policy.
    pub fn add_row(&self, values: Vec<Value>) -> Result<()> {
        self.add_row_with_policy(values, &StrictPolicy)
    }

    /// Append a row. A cell count that disagrees with the column list
    /// is routed through the invalid-append policy; on recovery the
    /// append is rejected and the table left unchanged.
    pub fn add_row_with_policy(&self, values: Vec<Value>, policy: &dyn ErrorPolicy) -> Result<()> {
        let mut state = self.lock();
        if values.len() != state.columns.len() {
            policy.on_invalid_row_append(&format!(
                "row has {} cells, expected {}",
                values.len(),
                state.columns.len()
            ))?;
            return Ok(());
        }
        state.rows.push(values);
        let index = state.rows.len() - 1;
        state.notify(&ChangeEvent::rows(ChangeKind::RowAppended, index..index + 1));
        Ok(())
    }

    /// Remove a row by index; returns the removed row, or `None` when
    /// the index is out of range.
    pub fn remove_row(&self, index: usize) -> Option<Vec<Value>> {
        let mut state = self.lock();
        if index >= state.rows.len() {
            return None;
        }
        let removed = state.rows.remove(index);
        state.notify(&ChangeEvent::rows(ChangeKind::RowRemoved, index..index + 1));
        Some(removed)
    }

    /// Append a column with one value per existing row.
    pub fn add_column(&self, spec: ColumnSpec, values: Vec<Value>) -> Result<()> {
        let mut state = self.lock();
        if values.len() != state.rows.len() {
            return Err(TableError::InvalidRowAppend(format!(
                "column {:?} has {} values, expected {}",
                spec.title,
                values.len(),
                state.rows.len()
            )));
        }
        state.columns.push(spec);
        for (row, value) in state.rows.iter_mut().zip(values) {
            row.push(value);
        }
        let index = state.columns.len() - 1;
        state.notify(&ChangeEvent::column(ChangeKind::ColumnAdded, index));
        Ok(())
    }

    /// Remove a column by index; returns the removed spec, or `None`
    /// when the index is out of range.
    pub fn remove_column(&self, index: usize) -> Option<ColumnSpec> {
        let mut state = self.lock();
        if index >= state.columns.len() {
            return None;
        }
        let removed = state.columns.remove(index);
        for row in &mut state.rows {
            if index < row.len() {
                row.remove(index);
            }
        }
        state.notify(&ChangeEvent::column(ChangeKind::ColumnRemoved, index));
        Some(removed)
    }

    /// Append all rows of another table. The other table must have the
    /// same ordered titles and declared types.
    pub fn join(&self, other: &Table) -> Result<()> {
        let other_columns = other.columns();
        let other_rows = other.rows();

        let mut state = self.lock();
        let compatible = state.columns.len() == other_columns.len()
            && state
                .columns
                .iter()
                .zip(&other_columns)
                .all(|(a, b)| a.title == b.title && a.declared_type == b.declared_type);
        if !compatible {
            return Err(TableError::InvalidRowAppend(
                "joined tables must share titles and column types".to_string(),
            ));
        }

        let first = state.rows.len();
        state.rows.extend(other_rows);
        let last = state.rows.len();
        state.notify(&ChangeEvent::rows(ChangeKind::Joined, first..last));
        Ok(())
    }

    /// Serialize the table: quoted titles, quoted rows, LF-terminated.
    ///
    /// Embedded quote characters are not escaped on output, so content
    /// containing quotes or the delimiter does not round-trip.
    pub fn save<W: Write>(&self, writer: &mut W) -> Result<()> {
        let state = self.lock();
        write_table(writer, self.options.delimiter, &state.columns, &state.rows)?;
        Ok(())
    }

    /// Serialize to an in-memory string.
    pub fn to_csv_string(&self) -> String {
        let mut out = Vec::new();
        // Writing to a Vec cannot fail.
        let _ = self.save(&mut out);
        String::from_utf8(out).unwrap_or_default()
    }
}
