//! Title resolution and consolidation of declared and inferred specs.

use crate::column::ColumnSpec;
use crate::engine::Grid;
use crate::error::Result;
use crate::infer::infer_column;
use crate::policy::ErrorPolicy;
use foldhash::{HashMap, HashMapExt, HashSet, HashSetExt};
use rayon::prelude::*;

/// Resolve the ordered title list for `width` columns: title-row cells
/// where present, positional declared titles otherwise, generated
/// `Column {n}` names (1-based, skipping names already taken) for the
/// rest.
pub(crate) fn resolve_titles(
    title_row: Option<&[Option<String>]>,
    declared: &[ColumnSpec],
    width: usize,
) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::new();
    if let Some(cells) = title_row {
        for title in cells.iter().flatten() {
            used.insert(title.clone());
        }
    } else {
        for spec in declared.iter().take(width) {
            used.insert(spec.title.clone());
        }
    }

    let mut next_generated = 1usize;
    let mut generate = move |used: &mut HashSet<String>| loop {
        let candidate = format!("Column {next_generated}");
        next_generated += 1;
        if used.insert(candidate.clone()) {
            return candidate;
        }
    };

    (0..width)
        .map(|i| {
            let named = match title_row {
                Some(cells) => cells.get(i).cloned().flatten(),
                None => declared.get(i).map(|spec| spec.title.clone()),
            };
            named.unwrap_or_else(|| generate(&mut used))
        })
        .collect()
}

/// Merge user-declared specs with inferred ones, per column.
///
/// A declared spec matched by title must carry an adapter; if it does
/// not, the column-spec error policy decides, and on recovery the
/// declaration is dropped in favor of inference. The returned ordered
/// list fully replaces the working copy of the columns.
pub(crate) fn consolidate(
    titles: &[String],
    grid: &Grid,
    declared: &[ColumnSpec],
    policy: &dyn ErrorPolicy,
) -> Result<Vec<ColumnSpec>> {
    let mut by_title: HashMap<&str, &ColumnSpec> = HashMap::with_capacity(declared.len());
    for spec in declared {
        by_title.insert(spec.title.as_str(), spec);
    }

    titles
        .par_iter()
        .enumerate()
        .map(|(index, title)| {
            if let Some(&spec) = by_title.get(title.as_str()) {
                if spec.adapter.is_some() {
                    return Ok(spec.clone());
                }
                policy.on_column_without_adapter(&format!(
                    "column {index} ({title:?}) is declared without an adapter"
                ))?;
            }
            Ok(infer_column(grid, index, title))
        })
        .collect()
}
