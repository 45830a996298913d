//! Byte-to-text decoding using chardetng and `encoding_rs`.
//!
//! The parse engine only ever sees decoded `&str`; this module is the
//! upstream collaborator that turns raw bytes into text using the
//! declared encoding, a BOM, or charset detection.

use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use simdutf8::basic::from_utf8;
use std::borrow::Cow;

/// Decode raw bytes to text.
///
/// Resolution order:
/// 1. `declared` encoding, if any (a leading BOM of that encoding is
///    consumed);
/// 2. a BOM (UTF-8, UTF-16 LE/BE);
/// 3. valid UTF-8 passes through without copying;
/// 4. chardetng charset detection as the fallback.
///
/// Returns the decoded text and the encoding that was used.
pub fn decode<'a>(data: &'a [u8], declared: Option<&'static Encoding>) -> (Cow<'a, str>, &'static Encoding) {
    if let Some(encoding) = declared {
        let (text, _, _) = encoding.decode(data);
        return (text, encoding);
    }

    if let Some((encoding, bom_len)) = Encoding::for_bom(data) {
        let (text, _) = encoding.decode_without_bom_handling(&data[bom_len..]);
        return (text, encoding);
    }

    // UTF-8 fast path: validate once, borrow the whole buffer.
    if let Ok(text) = from_utf8(data) {
        return (Cow::Borrowed(text), encoding_rs::UTF_8);
    }

    let mut detector = EncodingDetector::new();
    detector.feed(data, true);
    let encoding = detector.guess(None, true);
    let (text, _, _) = encoding.decode(data);
    (text, encoding)
}
