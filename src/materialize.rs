//! Typed row materialization.

use crate::column::ColumnSpec;
use crate::engine::Grid;
use crate::error::Result;
use crate::policy::ErrorPolicy;
use crate::value::Value;

/// Convert the string grid into typed rows via the per-column adapters.
///
/// Rows whose cell count disagrees with the column list are routed
/// through the inconsistent-count policy and, on recovery, filtered
/// out entirely (never truncated or padded here). A failed or
/// null-returning adapter substitutes the column default, subject to
/// the cell-conversion policy.
pub(crate) fn materialize(
    grid: Grid,
    columns: &[ColumnSpec],
    policy: &dyn ErrorPolicy,
) -> Result<Vec<Vec<Value>>> {
    let width = columns.len();
    let mut rows = Vec::with_capacity(grid.len());

    for (row_index, cells) in grid.into_iter().enumerate() {
        if cells.len() != width {
            policy.on_inconsistent_column_count(&format!(
                "row {row_index} has {} cells, expected {width}",
                cells.len()
            ))?;
            continue;
        }

        let mut row = Vec::with_capacity(width);
        for (spec, cell) in columns.iter().zip(cells) {
            row.push(convert_cell(spec, cell.as_deref(), row_index, policy)?);
        }
        rows.push(row);
    }

    Ok(rows)
}

fn convert_cell(
    spec: &ColumnSpec,
    cell: Option<&str>,
    row_index: usize,
    policy: &dyn ErrorPolicy,
) -> Result<Value> {
    let Some(text) = cell else {
        return Ok(spec.default_or_null());
    };

    let Some(adapter) = spec.adapter.as_ref() else {
        // Consolidation guarantees an adapter; raw text is the only
        // sensible fallback if one is missing anyway.
        return Ok(Value::Text(text.to_string()));
    };

    match adapter(text) {
        Ok(Value::Null) => Ok(spec.default_or_null()),
        Ok(value) => Ok(value),
        Err(message) => {
            policy.on_cell_conversion(&format!(
                "row {row_index}, column {:?}: {message} (value {text:?})",
                spec.title
            ))?;
            Ok(spec.default_or_null())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{LenientPolicy, StrictPolicy};
    use crate::value::TypeTag;

    fn int_column(title: &str) -> ColumnSpec {
        ColumnSpec::new(title, TypeTag::Int)
            .with_default(Value::Int(0))
            .with_adapter(|s| s.parse::<i32>().map(Value::Int).map_err(|e| e.to_string()))
    }

    fn grid(rows: &[&[Option<&str>]]) -> Grid {
        rows.iter()
            .map(|row| row.iter().map(|c| c.map(str::to_string)).collect())
            .collect()
    }

    #[test]
    fn test_materialize_basic() {
        let columns = vec![int_column("a"), int_column("b")];
        let rows = materialize(
            grid(&[&[Some("1"), Some("2")], &[Some("3"), Some("4")]]),
            &columns,
            &StrictPolicy,
        )
        .unwrap();
        assert_eq!(
            rows,
            vec![
                vec![Value::Int(1), Value::Int(2)],
                vec![Value::Int(3), Value::Int(4)],
            ]
        );
    }

    #[test]
    fn test_null_cell_gets_default() {
        let columns = vec![int_column("a")];
        let rows = materialize(grid(&[&[None]]), &columns, &StrictPolicy).unwrap();
        assert_eq!(rows, vec![vec![Value::Int(0)]]);
    }

    #[test]
    fn test_conversion_error_strict() {
        let columns = vec![int_column("a")];
        let err = materialize(grid(&[&[Some("x")]]), &columns, &StrictPolicy).unwrap_err();
        assert!(matches!(err, crate::TableError::CellConversion(_)));
    }

    #[test]
    fn test_conversion_error_recovers_to_default() {
        let columns = vec![int_column("a")];
        let rows = materialize(grid(&[&[Some("x")]]), &columns, &LenientPolicy).unwrap();
        assert_eq!(rows, vec![vec![Value::Int(0)]]);
    }

    #[test]
    fn test_adapter_null_gets_default() {
        let column = ColumnSpec::new("a", TypeTag::Int)
            .with_default(Value::Int(-1))
            .with_adapter(|_| Ok(Value::Null));
        let rows = materialize(grid(&[&[Some("anything")]]), &[column], &StrictPolicy).unwrap();
        assert_eq!(rows, vec![vec![Value::Int(-1)]]);
    }

    #[test]
    fn test_inconsistent_count_strict() {
        let columns = vec![int_column("a"), int_column("b")];
        let err = materialize(grid(&[&[Some("1")]]), &columns, &StrictPolicy).unwrap_err();
        assert!(matches!(err, crate::TableError::InconsistentColumnCount(_)));
    }

    #[test]
    fn test_inconsistent_count_drops_row() {
        let columns = vec![int_column("a"), int_column("b")];
        let rows = materialize(
            grid(&[&[Some("1"), Some("2")], &[Some("3")]]),
            &columns,
            &LenientPolicy,
        )
        .unwrap();
        assert_eq!(rows, vec![vec![Value::Int(1), Value::Int(2)]]);
    }
}
