//! Simple-mode tokenizer: the fast path.
//!
//! Assumes well-formed input (caller responsibility): one record per
//! physical line, no embedded newlines inside quoted cells, uniform
//! cell counts. Quoted cells are read verbatim up to the *first*
//! matching closing quote; there is no doubled-quote escaping here,
//! a deliberate simplification over the default-mode tokenizer.

use crate::error::{Result, TableError};
use crate::options::ParseOptions;
use rayon::prelude::*;
use std::sync::mpsc;

/// Parse the whole input line by line into the string grid.
///
/// The title row (if configured) is split off before the body so the
/// remaining lines can be processed independently, then reinserted at
/// index 0. Rows shorter than the widest row are padded with empty
/// trailing cells.
pub(crate) fn parse(input: &str, options: &ParseOptions) -> Result<Vec<Vec<Option<String>>>> {
    let mut lines: Vec<&str> = input.lines().filter(|line| !line.is_empty()).collect();
    lines.truncate(options.line_cap());

    let title_line = if options.has_title_row && !lines.is_empty() {
        Some(lines.remove(0))
    } else {
        None
    };

    let mut rows: Vec<Vec<Option<String>>> = if options.ordered_fast_mode {
        lines
            .par_iter()
            .map(|line| split_line(line, options))
            .collect::<Result<Vec<_>>>()?
    } else {
        // Caller opted out of ordering: collect rows as they finish.
        let (sender, receiver) = mpsc::channel();
        lines.par_iter().for_each_with(sender, |sender, line| {
            let _ = sender.send(split_line(line, options));
        });
        let mut rows = Vec::with_capacity(lines.len());
        for row in receiver {
            rows.push(row?);
        }
        rows
    };

    if let Some(title_line) = title_line {
        rows.insert(0, split_line(title_line, options)?);
    }

    let max_width = rows.iter().map(Vec::len).max().unwrap_or(0);
    for row in &mut rows {
        row.resize(max_width, None);
    }

    Ok(rows)
}

/// Split one physical line into cells. A leading enabled quote reads
/// verbatim up to the first matching quote; a delimiter at the cursor
/// yields an empty cell; otherwise the cell runs to the next delimiter
/// or end of line.
fn split_line(line: &str, options: &ParseOptions) -> Result<Vec<Option<String>>> {
    let delimiter = options.delimiter;
    let mut cells = Vec::new();
    let mut i = 0;

    loop {
        let quote = line[i..].chars().next().filter(|&c| options.is_quote(c));
        if let Some(q) = quote {
            let start = i + q.len_utf8();
            match line[start..].find(q) {
                None => return Err(TableError::UnterminatedQuote { offset: i }),
                Some(offset) => {
                    let end = start + offset;
                    cells.push(Some(line[start..end].to_string()));
                    i = end + q.len_utf8();
                }
            }
        } else {
            let stop = line[i..]
                .find(delimiter)
                .map_or(line.len(), |offset| i + offset);
            let raw = line[i..stop].trim_matches([' ', '\t']);
            cells.push(if raw.is_empty() {
                None
            } else {
                Some(raw.to_string())
            });
            i = stop;
        }

        if i < line.len() && line[i..].starts_with(delimiter) {
            i += delimiter.len_utf8();
            if i == line.len() {
                cells.push(None);
                break;
            }
        } else {
            break;
        }
    }

    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    fn fast_options() -> ParseOptions {
        let mut options = ParseOptions::new();
        options.fast_mode(true).has_title_row(false);
        options
    }

    #[test]
    fn test_split_basic() {
        let options = fast_options();
        assert_eq!(
            split_line("a,b,c", &options).unwrap(),
            vec![cell("a"), cell("b"), cell("c")]
        );
    }

    #[test]
    fn test_split_empty_cells() {
        let options = fast_options();
        assert_eq!(
            split_line(",a,,b,", &options).unwrap(),
            vec![None, cell("a"), None, cell("b"), None]
        );
    }

    #[test]
    fn test_split_quoted_verbatim() {
        let options = fast_options();
        assert_eq!(
            split_line("\"b,c\",d", &options).unwrap(),
            vec![cell("b,c"), cell("d")]
        );
        // First closing quote ends the cell; no doubled-quote escaping.
        assert_eq!(
            split_line("\"a\"\"b\"", &options).unwrap(),
            vec![cell("a")]
        );
    }

    #[test]
    fn test_split_unterminated_quote() {
        let options = fast_options();
        assert!(matches!(
            split_line("\"abc", &options),
            Err(TableError::UnterminatedQuote { offset: 0 })
        ));
    }

    #[test]
    fn test_parse_pads_short_rows() {
        let options = fast_options();
        let grid = parse("a,b,c\nx\n", &options).unwrap();
        assert_eq!(grid.len(), 2);
        assert_eq!(grid[0], vec![cell("a"), cell("b"), cell("c")]);
        assert_eq!(grid[1], vec![cell("x"), None, None]);
    }

    #[test]
    fn test_parse_title_row_reinserted_first() {
        let mut options = fast_options();
        options.has_title_row(true);
        let grid = parse("id,name\n1,a\n2,b\n", &options).unwrap();
        assert_eq!(grid[0], vec![cell("id"), cell("name")]);
        assert_eq!(grid.len(), 3);
    }

    #[test]
    fn test_parse_unordered_same_rows() {
        let mut options = fast_options();
        options.ordered_fast_mode(false);
        let grid = parse("1,a\n2,b\n3,c\n", &options).unwrap();
        let mut grid = grid;
        grid.sort();
        assert_eq!(
            grid,
            vec![
                vec![cell("1"), cell("a")],
                vec![cell("2"), cell("b")],
                vec![cell("3"), cell("c")],
            ]
        );
    }

    #[test]
    fn test_parse_line_cap() {
        let mut options = fast_options();
        options.max_lines(2);
        let grid = parse("1\n2\n3\n4\n5\n", &options).unwrap();
        assert_eq!(grid.len(), 2);
    }
}
