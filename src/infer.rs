//! Per-column type inference.
//!
//! The candidate ladder is a declarative ordered table of
//! `(tag, predicate, parser, default)` tuples tested first-match-wins:
//! the first candidate for which every distinct non-null value parses
//! wins the column. Columns with no matching candidate fall back to
//! Text with an identity adapter.

use crate::column::ColumnSpec;
use crate::value::{TypeTag, Value};
use foldhash::{HashSet, HashSetExt};
use rayon::prelude::*;
use std::sync::Arc;

/// One rung of the inference ladder.
struct Candidate {
    tag: TypeTag,
    accepts: fn(&str) -> bool,
    parse: fn(&str) -> Result<Value, String>,
    default: Value,
}

/// Candidates in fixed priority order.
static LADDER: &[Candidate] = &[
    Candidate {
        tag: TypeTag::Bool,
        accepts: accepts_bool,
        parse: parse_bool,
        default: Value::Bool(false),
    },
    Candidate {
        tag: TypeTag::Byte,
        accepts: accepts_byte,
        parse: parse_byte,
        default: Value::Byte(0),
    },
    Candidate {
        tag: TypeTag::Short,
        accepts: accepts_short,
        parse: parse_short,
        default: Value::Short(0),
    },
    Candidate {
        tag: TypeTag::Int,
        accepts: accepts_int,
        parse: parse_int,
        default: Value::Int(0),
    },
    Candidate {
        tag: TypeTag::Long,
        accepts: accepts_long,
        parse: parse_long,
        default: Value::Long(0),
    },
    Candidate {
        tag: TypeTag::Float,
        accepts: accepts_float,
        parse: parse_float,
        default: Value::Float(0.0),
    },
    Candidate {
        tag: TypeTag::Double,
        accepts: accepts_double,
        parse: parse_double,
        default: Value::Double(0.0),
    },
];

fn accepts_bool(s: &str) -> bool {
    s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("false")
}

fn parse_bool(s: &str) -> Result<Value, String> {
    if s.eq_ignore_ascii_case("true") {
        Ok(Value::Bool(true))
    } else if s.eq_ignore_ascii_case("false") {
        Ok(Value::Bool(false))
    } else {
        Err(format!("not a boolean: {s:?}"))
    }
}

fn accepts_byte(s: &str) -> bool {
    s.parse::<i8>().is_ok()
}

fn parse_byte(s: &str) -> Result<Value, String> {
    s.parse::<i8>().map(Value::Byte).map_err(|e| e.to_string())
}

fn accepts_short(s: &str) -> bool {
    s.parse::<i16>().is_ok()
}

fn parse_short(s: &str) -> Result<Value, String> {
    s.parse::<i16>().map(Value::Short).map_err(|e| e.to_string())
}

fn accepts_int(s: &str) -> bool {
    s.parse::<i32>().is_ok()
}

fn parse_int(s: &str) -> Result<Value, String> {
    s.parse::<i32>().map(Value::Int).map_err(|e| e.to_string())
}

fn accepts_long(s: &str) -> bool {
    s.parse::<i64>().is_ok()
}

fn parse_long(s: &str) -> Result<Value, String> {
    s.parse::<i64>().map(Value::Long).map_err(|e| e.to_string())
}

fn accepts_float(s: &str) -> bool {
    s.parse::<f32>().is_ok()
}

fn parse_float(s: &str) -> Result<Value, String> {
    s.parse::<f32>().map(Value::Float).map_err(|e| e.to_string())
}

fn accepts_double(s: &str) -> bool {
    s.parse::<f64>().is_ok()
}

fn parse_double(s: &str) -> Result<Value, String> {
    s.parse::<f64>()
        .map(Value::Double)
        .map_err(|e| e.to_string())
}

fn text_adapter() -> crate::column::Adapter {
    Arc::new(|s: &str| Ok(Value::Text(s.to_string())))
}

/// Infer a spec for one column of the grid.
///
/// Distinct non-null values are collected once; whether any value is
/// absent (including cells missing from short rows) decides
/// nullability. Candidate testing is sequential down the ladder, but
/// each candidate's predicate runs as a read-only parallel `all` over
/// the sampled values.
pub(crate) fn infer_column(
    grid: &[Vec<Option<String>>],
    column: usize,
    title: &str,
) -> ColumnSpec {
    let mut distinct: HashSet<&str> = HashSet::new();
    let mut nullable = false;
    for row in grid {
        match row.get(column) {
            Some(Some(value)) => {
                distinct.insert(value.as_str());
            }
            _ => nullable = true,
        }
    }
    let values: Vec<&str> = distinct.into_iter().collect();

    if !values.is_empty() {
        for candidate in LADDER {
            if values.par_iter().all(|value| (candidate.accepts)(value)) {
                let parse = candidate.parse;
                return ColumnSpec {
                    title: title.to_string(),
                    declared_type: candidate.tag,
                    nullable,
                    default_value: if nullable {
                        None
                    } else {
                        Some(candidate.default.clone())
                    },
                    adapter: Some(Arc::new(move |s: &str| parse(s))),
                };
            }
        }
    }

    // Text fallback; also covers all-null columns, where every ladder
    // predicate would hold vacuously.
    ColumnSpec {
        title: title.to_string(),
        declared_type: TypeTag::Text,
        nullable,
        default_value: if nullable {
            None
        } else {
            Some(Value::Text(String::new()))
        },
        adapter: Some(text_adapter()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_of(column: &[Option<&str>]) -> Vec<Vec<Option<String>>> {
        column
            .iter()
            .map(|cell| vec![cell.map(str::to_string)])
            .collect()
    }

    #[test]
    fn test_small_integers_infer_byte() {
        let grid = grid_of(&[Some("1"), Some("2"), Some("3")]);
        let spec = infer_column(&grid, 0, "n");
        assert_eq!(spec.declared_type, TypeTag::Byte);
        assert!(!spec.nullable);
        assert_eq!(spec.default_value, Some(Value::Byte(0)));
    }

    #[test]
    fn test_nullable_integers_default_null() {
        let grid = grid_of(&[Some("1"), Some("2"), None]);
        let spec = infer_column(&grid, 0, "n");
        assert_eq!(spec.declared_type, TypeTag::Byte);
        assert!(spec.nullable);
        assert_eq!(spec.default_value, None);
    }

    #[test]
    fn test_ladder_widens_past_small_types() {
        let grid = grid_of(&[Some("300"), Some("2")]);
        assert_eq!(infer_column(&grid, 0, "n").declared_type, TypeTag::Short);

        let grid = grid_of(&[Some("100000"), Some("2")]);
        assert_eq!(infer_column(&grid, 0, "n").declared_type, TypeTag::Int);

        let grid = grid_of(&[Some("3000000000"), Some("2")]);
        assert_eq!(infer_column(&grid, 0, "n").declared_type, TypeTag::Long);
    }

    #[test]
    fn test_float_and_bool() {
        let grid = grid_of(&[Some("1.5"), Some("2")]);
        assert_eq!(infer_column(&grid, 0, "n").declared_type, TypeTag::Float);

        let grid = grid_of(&[Some("true"), Some("FALSE")]);
        assert_eq!(infer_column(&grid, 0, "n").declared_type, TypeTag::Bool);
    }

    #[test]
    fn test_text_fallback() {
        let grid = grid_of(&[Some("1"), Some("a")]);
        let spec = infer_column(&grid, 0, "n");
        assert_eq!(spec.declared_type, TypeTag::Text);
        assert_eq!(spec.default_value, Some(Value::Text(String::new())));
    }

    #[test]
    fn test_all_null_column_is_nullable_text() {
        let grid = grid_of(&[None, None]);
        let spec = infer_column(&grid, 0, "n");
        assert_eq!(spec.declared_type, TypeTag::Text);
        assert!(spec.nullable);
        assert_eq!(spec.default_value, None);
    }

    #[test]
    fn test_short_rows_count_as_null() {
        let grid = vec![
            vec![Some("1".to_string()), Some("2".to_string())],
            vec![Some("3".to_string())],
        ];
        let spec = infer_column(&grid, 1, "n");
        assert!(spec.nullable);
    }

    #[test]
    fn test_inferred_adapter_parses() {
        let grid = grid_of(&[Some("1"), Some("2")]);
        let spec = infer_column(&grid, 0, "n");
        let adapter = spec.adapter.as_ref().unwrap();
        assert_eq!(adapter("7").unwrap(), Value::Byte(7));
        assert!(adapter("not a number").is_err());
    }
}
