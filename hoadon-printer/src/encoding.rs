//! Code page selection for printer text
//!
//! Receipt text is held as UTF-8 and encoded when it is appended to the
//! command stream, so every length prefix is computed over the bytes the
//! printer will actually receive. Command bytes are never passed through
//! here.

use std::borrow::Cow;

use encoding_rs::Encoding;

use crate::error::{EncodingError, EncodingResult};

/// Byte substituted for characters the code page cannot represent
const REPLACEMENT: u8 = b'?';

/// Character encoding the printer expects for text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodePage(&'static Encoding);

impl CodePage {
    /// Pass-through UTF-8 (print handlers that decode UTF-8 themselves)
    pub const UTF8: CodePage = CodePage(encoding_rs::UTF_8);

    /// Look up a code page by WHATWG label (`"windows-1258"`, `"gbk"`, ...)
    ///
    /// Only ASCII-compatible, stateless encodings are accepted. Stateful
    /// ones such as ISO-2022-JP shift with ESC sequences, which the printer
    /// would read as commands.
    pub fn from_label(label: &str) -> EncodingResult<Self> {
        let encoding = Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| EncodingError::UnknownCodePage(label.to_string()))?;
        if !encoding.is_ascii_compatible() || encoding.output_encoding() != encoding {
            return Err(EncodingError::UnknownCodePage(label.to_string()));
        }
        Ok(CodePage(encoding))
    }

    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    pub fn is_utf8(&self) -> bool {
        self.0 == encoding_rs::UTF_8
    }

    /// Encode text for the printer
    ///
    /// Characters without a mapping become `?`, one byte per character,
    /// rather than the numeric character references `encoding_rs` would
    /// otherwise emit.
    pub fn encode<'a>(&self, s: &'a str) -> Cow<'a, [u8]> {
        if self.is_utf8() || s.is_ascii() {
            return Cow::Borrowed(s.as_bytes());
        }
        let (out, _, had_errors) = self.0.encode(s);
        if !had_errors {
            return out;
        }

        let mut buf = Vec::with_capacity(s.len());
        let mut tmp = [0u8; 4];
        for c in s.chars() {
            let (bytes, _, unmappable) = self.0.encode(c.encode_utf8(&mut tmp));
            if unmappable {
                buf.push(REPLACEMENT);
            } else {
                buf.extend_from_slice(&bytes);
            }
        }
        tracing::debug!(code_page = self.name(), "unmappable characters replaced");
        Cow::Owned(buf)
    }
}

impl Default for CodePage {
    fn default() -> Self {
        Self::UTF8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_is_passthrough() {
        let page = CodePage::default();
        assert_eq!(page.encode("Cà phê").as_ref(), "Cà phê".as_bytes());
    }

    #[test]
    fn test_legacy_code_page() {
        let page = CodePage::from_label("windows-1258").unwrap();
        assert_eq!(page.name(), "windows-1258");
        // à is 0xE0 in windows-1258
        assert_eq!(page.encode("Cà").as_ref(), &[b'C', 0xE0]);
    }

    #[test]
    fn test_unmappable_becomes_question_mark() {
        let page = CodePage::from_label("windows-1252").unwrap();
        assert_eq!(page.encode("a中b").as_ref(), b"a?b");
    }

    #[test]
    fn test_escape_based_encodings_are_refused() {
        for label in ["iso-2022-jp", "utf-16le", "utf-16be", "replacement"] {
            assert!(
                matches!(
                    CodePage::from_label(label),
                    Err(EncodingError::UnknownCodePage(_))
                ),
                "{} accepted",
                label
            );
        }
        assert!(CodePage::from_label("gbk").is_ok());
        assert!(CodePage::from_label("shift_jis").is_ok());
    }

    #[test]
    fn test_unknown_label() {
        assert!(matches!(
            CodePage::from_label("klingon"),
            Err(EncodingError::UnknownCodePage(_))
        ));
    }
}
