use crate::column::ColumnSpec;
use crate::error::{Result, TableError};
use encoding_rs::Encoding;

/// Configuration for one load/save cycle.
///
/// The table clones the options before validation, so a caller-owned
/// instance is never mutated in place.
///
/// # Example
///
/// ```
/// use csv_forge::ParseOptions;
///
/// let mut options = ParseOptions::new();
/// options
///     .delimiter(';')
///     .has_title_row(false)
///     .max_lines(100);
/// ```
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// First row supplies column titles and is excluded from data.
    pub has_title_row: bool,
    /// Cell separator character.
    pub delimiter: char,
    /// Normalize CR and CRLF to LF inside cell content.
    pub collapse_cr: bool,
    /// Pad short rows to the widest observed row instead of failing.
    pub fill_missing_columns: bool,
    /// Recognize single-quoted cells.
    pub single_quote: bool,
    /// Recognize double-quoted cells.
    pub double_quote: bool,
    /// Use the simple per-line tokenizer (assumes well-formed input).
    pub fast_mode: bool,
    /// Preserve row order under fast mode.
    pub ordered_fast_mode: bool,
    /// Maximum number of lines to parse; -1 means unbounded.
    pub max_lines: i64,
    /// Text encoding of raw byte input. `None` detects the encoding.
    pub encoding: Option<&'static Encoding>,
    /// Explicit column overrides, matched by title.
    pub columns: Vec<ColumnSpec>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ParseOptions {
    /// Create options with default settings: comma-delimited,
    /// double-quoted, title row present, unbounded.
    pub fn new() -> Self {
        Self {
            has_title_row: true,
            delimiter: ',',
            collapse_cr: true,
            fill_missing_columns: false,
            single_quote: false,
            double_quote: true,
            fast_mode: false,
            ordered_fast_mode: true,
            max_lines: -1,
            encoding: None,
            columns: Vec::new(),
        }
    }

    /// Set whether the first row supplies column titles.
    pub fn has_title_row(&mut self, has_title_row: bool) -> &mut Self {
        self.has_title_row = has_title_row;
        self
    }

    /// Set the cell separator character.
    pub fn delimiter(&mut self, delimiter: char) -> &mut Self {
        self.delimiter = delimiter;
        self
    }

    /// Set CR/CRLF normalization inside cell content.
    pub fn collapse_cr(&mut self, collapse_cr: bool) -> &mut Self {
        self.collapse_cr = collapse_cr;
        self
    }

    /// Set short-row padding.
    pub fn fill_missing_columns(&mut self, fill: bool) -> &mut Self {
        self.fill_missing_columns = fill;
        self
    }

    /// Enable or disable single-quoted cells.
    pub fn single_quote(&mut self, enabled: bool) -> &mut Self {
        self.single_quote = enabled;
        self
    }

    /// Enable or disable double-quoted cells.
    pub fn double_quote(&mut self, enabled: bool) -> &mut Self {
        self.double_quote = enabled;
        self
    }

    /// Use the simple per-line tokenizer.
    pub fn fast_mode(&mut self, fast: bool) -> &mut Self {
        self.fast_mode = fast;
        self
    }

    /// Preserve row order under fast mode.
    pub fn ordered_fast_mode(&mut self, ordered: bool) -> &mut Self {
        self.ordered_fast_mode = ordered;
        self
    }

    /// Set the maximum number of lines to parse (-1 = unbounded).
    pub fn max_lines(&mut self, max_lines: i64) -> &mut Self {
        self.max_lines = max_lines;
        self
    }

    /// Set the text encoding for raw byte input (`None` = detect).
    pub fn encoding(&mut self, encoding: Option<&'static Encoding>) -> &mut Self {
        self.encoding = encoding;
        self
    }

    /// Add an explicit column override, matched by title.
    pub fn column(&mut self, spec: ColumnSpec) -> &mut Self {
        self.columns.push(spec);
        self
    }

    /// Returns true if `c` is an enabled quote character.
    #[inline]
    pub(crate) fn is_quote(&self, c: char) -> bool {
        (c == '"' && self.double_quote) || (c == '\'' && self.single_quote)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.delimiter == '\r' || self.delimiter == '\n' {
            return Err(TableError::InvalidConfig(
                "delimiter must not be a line break".to_string(),
            ));
        }
        if self.is_quote(self.delimiter) {
            return Err(TableError::InvalidConfig(format!(
                "delimiter {:?} collides with an enabled quote character",
                self.delimiter
            )));
        }
        if self.max_lines < -1 {
            return Err(TableError::InvalidConfig(format!(
                "max_lines must be -1 or non-negative, got {}",
                self.max_lines
            )));
        }
        Ok(())
    }

    /// The line cap as a count, or `usize::MAX` when unbounded.
    #[inline]
    pub(crate) fn line_cap(&self) -> usize {
        if self.max_lines < 0 {
            usize::MAX
        } else {
            usize::try_from(self.max_lines).unwrap_or(usize::MAX)
        }
    }
}
