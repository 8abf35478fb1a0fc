//! Byte-to-text decoding with legacy Cyrillic fallbacks.

use std::borrow::Cow;

use encoding_rs::{Encoding, UTF_8};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Outcome of decoding a byte buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub text: String,
    pub encoding: &'static Encoding,
    pub lossy: bool,
}

/// Decodes `bytes` as UTF-8, then each fallback in order, then lossy UTF-8.
///
/// A leading UTF-8 byte order mark is dropped. Single-byte fallbacks only
/// "fail" on bytes they leave unmapped, so the first fallback listed usually
/// wins for non-UTF-8 input.
pub fn decode_bytes(bytes: &[u8], fallbacks: &[&'static Encoding]) -> Decoded {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    if let Ok(text) = std::str::from_utf8(bytes) {
        return Decoded {
            text: text.to_owned(),
            encoding: UTF_8,
            lossy: false,
        };
    }

    for encoding in fallbacks {
        if let Some(text) = encoding.decode_without_bom_handling_and_without_replacement(bytes) {
            return Decoded {
                text: text.into_owned(),
                encoding,
                lossy: false,
            };
        }
    }

    let text = match String::from_utf8_lossy(bytes) {
        Cow::Borrowed(s) => s.to_owned(),
        Cow::Owned(s) => s,
    };
    Decoded {
        text,
        encoding: UTF_8,
        lossy: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{KOI8_R, WINDOWS_1251};

    #[test]
    fn utf8_passes_through_and_bom_is_dropped() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice("Привет, мир".as_bytes());
        let decoded = decode_bytes(&bytes, &[WINDOWS_1251]);
        assert_eq!(decoded.text, "Привет, мир");
        assert_eq!(decoded.encoding, UTF_8);
        assert!(!decoded.lossy);
    }

    #[test]
    fn windows_1251_fallback() {
        let (encoded, _, had_errors) = WINDOWS_1251.encode("Тестовый документ");
        assert!(!had_errors);
        let decoded = decode_bytes(&encoded, &[WINDOWS_1251, KOI8_R]);
        assert_eq!(decoded.text, "Тестовый документ");
        assert_eq!(decoded.encoding, WINDOWS_1251);
    }

    #[test]
    fn fallback_order_matters() {
        let (encoded, _, _) = KOI8_R.encode("текст");
        let decoded = decode_bytes(&encoded, &[KOI8_R, WINDOWS_1251]);
        assert_eq!(decoded.text, "текст");
        assert_eq!(decoded.encoding, KOI8_R);
    }

    #[test]
    fn no_fallbacks_means_lossy_utf8() {
        let decoded = decode_bytes(&[b'a', 0xFF, b'b'], &[]);
        assert_eq!(decoded.text, "a\u{FFFD}b");
        assert!(decoded.lossy);
    }
}
