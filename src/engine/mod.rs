//! The parse pipeline: tokenize, classify, partition, repair, clean.
//!
//! Default mode runs the robust whole-input tokenizer; fast mode runs
//! the per-line simple tokenizer. Both produce the same output shape:
//! a grid of normalized cell values (`None` = no value), one inner
//! vector per logical line.

mod partition;
mod simple;
mod token;
mod tokenizer;

use crate::error::Result;
use crate::options::ParseOptions;
use rayon::prelude::*;
use token::Token;

/// The normalized string grid handed to inference and materialization.
pub(crate) type Grid = Vec<Vec<Option<String>>>;

/// Parse decoded text into the string grid according to the options.
pub(crate) fn parse_grid(input: &str, options: &ParseOptions) -> Result<Grid> {
    if options.fast_mode {
        return simple::parse(input, options);
    }

    let mut tokens = tokenizer::tokenize(input, options)?;
    tokenizer::collapse_blank_lines(&mut tokens);

    // Classification/normalization is independent per token; the
    // parallel map preserves token order.
    let tokens: Vec<Token> = tokens
        .into_par_iter()
        .map(|token| match token {
            Token::Content(Some(raw)) => Token::Content(token::normalize_content(&raw, options)),
            other => other,
        })
        .collect();

    let mut lines = partition::partition(tokens, options.line_cap());

    // Boundary repair is independent per line.
    lines.par_iter_mut().for_each(partition::repair_line);
    if options.fill_missing_columns {
        partition::fill_missing(&mut lines);
    }

    Ok(partition::cleanup(lines))
}
