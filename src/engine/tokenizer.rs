//! Default-mode tokenizer.
//!
//! Turns the whole decoded input into a flat token stream in one pass,
//! recognizing quoted cells (with doubled-quote escapes), delimiters,
//! and collapsed line-break runs. Robust against structurally messy
//! input; the only fatal condition is an unterminated quote.

use super::token::Token;
use crate::error::{Result, TableError};
use crate::options::ParseOptions;

/// Tokenize the full input. Content tokens carry raw text (quotes
/// intact); normalization happens in a later pass.
pub(crate) fn tokenize(input: &str, options: &ParseOptions) -> Result<Vec<Token>> {
    // Two tokens per cell plus a line delimiter is the common shape.
    let estimated_lines = bytecount::count(input.as_bytes(), b'\n') + 1;
    let mut tokens = Vec::with_capacity(estimated_lines * 4);

    let mut i = 0;
    while i < input.len() {
        let rest = &input[i..];
        let c = match rest.chars().next() {
            Some(c) => c,
            None => break,
        };

        if c == '\r' || c == '\n' {
            i = consume_crlf(input, i);
            tokens.push(Token::LineDelimiter);
        } else if options.is_quote(c) {
            let end = consume_quoted(input, i, c)?;
            tokens.push(Token::Content(Some(input[i..end].to_string())));
            i = end;
        } else if c == options.delimiter {
            tokens.push(Token::Separator);
            i += c.len_utf8();
        } else {
            let (end, token) = consume_normal(input, i, options)?;
            tokens.push(token);
            i = end;
        }
    }

    Ok(tokens)
}

/// Collapse a maximal run of CR/LF starting at `start` into one line
/// delimiter; returns the index past the run.
fn consume_crlf(input: &str, start: usize) -> usize {
    input[start..]
        .find(|c| c != '\r' && c != '\n')
        .map_or(input.len(), |offset| start + offset)
}

/// Consume a quoted cell opening at `start` with quote character `q`.
/// A doubled quote is an escape and does not close the cell. Returns
/// the index one past the closing quote. If the closing quote is the
/// last character of the buffer the cell simply extends to the end.
fn consume_quoted(input: &str, start: usize, q: char) -> Result<usize> {
    let mut scan = start + q.len_utf8();
    loop {
        match input[scan..].find(q) {
            None => return Err(TableError::UnterminatedQuote { offset: start }),
            Some(offset) => {
                let after = scan + offset + q.len_utf8();
                if input[after..].starts_with(q) {
                    // Escaped quote: skip both, keep scanning.
                    scan = after + q.len_utf8();
                } else {
                    return Ok(after);
                }
            }
        }
    }
}

/// Consume an unquoted cell starting at `start`: scan to the next
/// delimiter, line break, or quote character. When the scan stops at a
/// quote, an unquoted prefix touches a quoted suffix without a
/// separator (e.g. `abc"def"`); the quoted portion is consumed and
/// prepended with the prefix to form one logical cell.
fn consume_normal(input: &str, start: usize, options: &ParseOptions) -> Result<(usize, Token)> {
    let stop = input[start..]
        .find(|c: char| c == '\r' || c == '\n' || c == options.delimiter || options.is_quote(c))
        .map_or(input.len(), |offset| start + offset);

    if stop < input.len() {
        let next = input[stop..].chars().next();
        if let Some(q) = next.filter(|&c| options.is_quote(c)) {
            let end = consume_quoted(input, stop, q)?;
            return Ok((end, Token::Content(Some(input[start..end].to_string()))));
        }
    }

    Ok((stop, Token::Content(Some(input[start..stop].to_string()))))
}

/// Remove `LineDelimiter, whitespace-only Content, LineDelimiter`
/// triples so that lines containing only whitespace collapse to a
/// single delimiter.
pub(crate) fn collapse_blank_lines(tokens: &mut Vec<Token>) {
    let mut i = 0;
    while i + 2 < tokens.len() {
        let is_triple = tokens[i] == Token::LineDelimiter
            && matches!(
                &tokens[i + 1],
                Token::Content(Some(s)) if s.trim_matches([' ', '\t']).is_empty()
            )
            && tokens[i + 2] == Token::LineDelimiter;
        if is_triple {
            // Keep one delimiter, drop the blank content and the other.
            tokens.drain(i + 1..i + 3);
        } else {
            i += 1;
        }
    }
}
