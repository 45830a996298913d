//! Token sum type and content normalization.

use crate::options::ParseOptions;

/// One lexical unit of the default-mode token stream.
///
/// `Content(None)` is a cell with no value: either a normalized empty
/// cell or a synthetic cell inserted by boundary repair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    /// A maximal run of CR/LF characters, collapsed.
    LineDelimiter,
    /// A single delimiter character.
    Separator,
    /// Cell content. Raw (quotes intact) straight out of the tokenizer,
    /// normalized afterwards by [`normalize_content`].
    Content(Option<String>),
}

impl Token {
    #[inline]
    pub(crate) fn is_separator(&self) -> bool {
        matches!(self, Token::Separator)
    }

    /// An empty synthetic cell.
    #[inline]
    pub(crate) fn empty_content() -> Token {
        Token::Content(None)
    }
}

/// Normalize raw cell text, in this order: trim leading/trailing tab
/// and space; an empty result is "no value"; strip the surrounding
/// quote pair and unescape doubled quotes when the content starts with
/// an enabled quote character; collapse CRLF and lone CR inside the
/// content to LF when configured.
pub(crate) fn normalize_content(raw: &str, options: &ParseOptions) -> Option<String> {
    let trimmed = raw.trim_matches([' ', '\t']);
    if trimmed.is_empty() {
        return None;
    }

    let first = trimmed.chars().next()?;
    let mut text = if options.is_quote(first) {
        let inner = trimmed
            .strip_prefix(first)
            .unwrap_or(trimmed)
            .strip_suffix(first)
            .unwrap_or(&trimmed[first.len_utf8()..]);
        let doubled = format!("{first}{first}");
        inner.replace(&doubled, &first.to_string())
    } else {
        trimmed.to_string()
    };

    if options.collapse_cr && text.contains('\r') {
        text = text.replace("\r\n", "\n").replace('\r', "\n");
    }

    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_and_null() {
        let options = ParseOptions::new();
        assert_eq!(normalize_content("  abc\t", &options), Some("abc".into()));
        assert_eq!(normalize_content("   ", &options), None);
        assert_eq!(normalize_content("", &options), None);
    }

    #[test]
    fn test_unquote_and_unescape() {
        let options = ParseOptions::new();
        assert_eq!(normalize_content("\"b,c\"", &options), Some("b,c".into()));
        assert_eq!(
            normalize_content("\"he said \"\"hi\"\"\"", &options),
            Some("he said \"hi\"".into())
        );
        // Quoted empty cell is an empty string, not null.
        assert_eq!(normalize_content("\"\"", &options), Some(String::new()));
        // Inner whitespace of a quoted cell is preserved.
        assert_eq!(normalize_content("\" x \"", &options), Some(" x ".into()));
    }

    #[test]
    fn test_single_quote_requires_enabling() {
        let mut options = ParseOptions::new();
        assert_eq!(normalize_content("'a'", &options), Some("'a'".into()));
        options.single_quote(true);
        assert_eq!(normalize_content("'a'", &options), Some("a".into()));
    }

    #[test]
    fn test_collapse_cr() {
        let mut options = ParseOptions::new();
        assert_eq!(
            normalize_content("\"a\r\nb\rc\"", &options),
            Some("a\nb\nc".into())
        );
        options.collapse_cr(false);
        assert_eq!(
            normalize_content("\"a\r\nb\"", &options),
            Some("a\r\nb".into())
        );
    }

    #[test]
    fn test_unquoted_prefix_keeps_quotes() {
        // A cell like abc"def" does not start with a quote, so the
        // embedded quotes survive normalization.
        let options = ParseOptions::new();
        assert_eq!(
            normalize_content("abc\"def\"", &options),
            Some("abc\"def\"".into())
        );
    }
}
