//! Partitioning, boundary repair, and separator cleanup.
//!
//! Groups the flat token stream into per-line buckets, synthesizes the
//! empty cells implied by separator placement, and strips separators
//! into the final string grid.

use super::token::Token;

/// Group tokens into per-line buckets. The line-delimiter token starts
/// a new bucket and is discarded. Accumulation stops once `line_cap`
/// buckets exist; trailing wholly-empty buckets are dropped.
pub(crate) fn partition(tokens: Vec<Token>, line_cap: usize) -> Vec<Vec<Token>> {
    if line_cap == 0 {
        return Vec::new();
    }

    let mut lines: Vec<Vec<Token>> = Vec::new();
    let mut current: Vec<Token> = Vec::new();

    for token in tokens {
        match token {
            Token::LineDelimiter => {
                lines.push(std::mem::take(&mut current));
                if lines.len() >= line_cap {
                    current.clear();
                    break;
                }
            }
            other => current.push(other),
        }
    }

    if !current.is_empty() && lines.len() < line_cap {
        lines.push(current);
    }

    while lines.last().is_some_and(Vec::is_empty) {
        lines.pop();
    }

    lines
}

/// Repair one line's cell boundaries: a line always starts and ends
/// with a cell, and two adjacent separators imply an empty cell
/// between them.
pub(crate) fn repair_line(line: &mut Vec<Token>) {
    if line.first().is_some_and(Token::is_separator) {
        line.insert(0, Token::empty_content());
    }
    if line.last().is_some_and(Token::is_separator) {
        line.push(Token::empty_content());
    }

    let mut i = 0;
    while i + 1 < line.len() {
        if line[i].is_separator() && line[i + 1].is_separator() {
            line.insert(i + 1, Token::empty_content());
        }
        i += 1;
    }
}

/// Extend every line shorter than the widest observed line by
/// alternating `Separator, empty Content` appends until the widths
/// match.
pub(crate) fn fill_missing(lines: &mut [Vec<Token>]) {
    let max_width = lines.iter().map(Vec::len).max().unwrap_or(0);
    for line in lines.iter_mut() {
        while line.len() < max_width {
            if line.last().is_some_and(Token::is_separator) {
                line.push(Token::empty_content());
            } else {
                line.push(Token::Separator);
            }
        }
    }
}

/// Strip separators and keep only the content values, yielding the
/// string grid consumed by inference and materialization.
pub(crate) fn cleanup(lines: Vec<Vec<Token>>) -> Vec<Vec<Option<String>>> {
    lines
        .into_iter()
        .map(|line| {
            line.into_iter()
                .filter_map(|token| match token {
                    Token::Content(value) => Some(value),
                    Token::Separator | Token::LineDelimiter => None,
                })
                .collect()
        })
        .collect()
}
