//! Script asset output
//!
//! Renders `window.<name> = <JSON string literal>;`. The literal is produced
//! by `serde_json`; in ASCII-only mode a custom formatter additionally turns
//! every non-ASCII code point (and DEL) into `\uXXXX` escapes, with astral
//! characters written as UTF-16 surrogate pairs.

use std::io::{self, Write};

use serde::Serialize;
use serde_json::ser::Formatter;

use crate::config::is_js_identifier;
use crate::error::{ContextError, Result};

/// Compact JSON formatter that keeps string output 7-bit clean.
#[derive(Debug, Default)]
struct AsciiFormatter;

impl Formatter for AsciiFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            if ch.is_ascii() && ch != '\x7f' {
                continue;
            }
            writer.write_all(&fragment.as_bytes()[start..i])?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = i + ch.len_utf8();
        }
        writer.write_all(&fragment.as_bytes()[start..])
    }
}

/// Encodes `text` as a JSON string literal, quotes included.
pub fn encode_literal(text: &str, ascii_only: bool) -> Result<String> {
    if !ascii_only {
        return serde_json::to_string(text).map_err(|e| ContextError::Encode(e.to_string()));
    }

    let mut buffer = Vec::with_capacity(text.len() + 2);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, AsciiFormatter);
    text.serialize(&mut serializer)
        .map_err(|e| ContextError::Encode(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| ContextError::Encode(e.to_string()))
}

/// Builds the single assignment statement written to the asset file.
pub fn render_statement(global_name: &str, text: &str, ascii_only: bool) -> Result<String> {
    if !is_js_identifier(global_name) {
        return Err(ContextError::Config(format!(
            "global name {:?} is not a valid JavaScript identifier",
            global_name
        )));
    }
    let literal = encode_literal(text, ascii_only)?;
    Ok(format!("window.{} = {};", global_name, literal))
}

/// Recovers the text from a statement produced by [`render_statement`].
pub fn parse_statement(statement: &str) -> Option<(&str, String)> {
    let rest = statement.strip_prefix("window.")?;
    let (name, literal) = rest.split_once(" = ")?;
    let literal = literal.strip_suffix(';')?;
    let text = serde_json::from_str(literal).ok()?;
    Some((name, text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_three_page_example() -> Result<()> {
        let statement = render_statement("extractedPDFContext", "Hello\nWorld\n", true)?;
        assert_eq!(
            statement,
            r#"window.extractedPDFContext = "Hello\nWorld\n";"#
        );
        Ok(())
    }

    #[test]
    fn test_empty_text() -> Result<()> {
        let statement = render_statement("extractedPDFContext", "", true)?;
        assert_eq!(statement, r#"window.extractedPDFContext = "";"#);
        Ok(())
    }

    #[test]
    fn test_quotes_backslashes_and_controls() -> Result<()> {
        let literal = encode_literal("say \"hi\"\\ \t\r\u{8}\u{c}\u{1}", true)?;
        assert_eq!(literal, r#""say \"hi\"\\ \t\r\b\f\u0001""#);
        Ok(())
    }

    #[test]
    fn test_non_ascii_escaped_like_ascii_safe_encoders() -> Result<()> {
        assert_eq!(encode_literal("caf\u{e9}", true)?, r#""caf\u00e9""#);
        assert_eq!(
            encode_literal("\u{dc}n \u{2013} \u{201c}x\u{201d}", true)?,
            r#""\u00dcn \u2013 \u201cx\u201d""#
        );
        assert_eq!(encode_literal("\u{1f600}", true)?, r#""\ud83d\ude00""#);
        assert_eq!(encode_literal("\x7f", true)?, r#""\u007f""#);
        assert_eq!(encode_literal("a/b", true)?, r#""a/b""#);
        Ok(())
    }

    #[test]
    fn test_raw_mode_keeps_utf8() -> Result<()> {
        assert_eq!(encode_literal("café 😀", false)?, "\"café 😀\"");
        Ok(())
    }

    #[test]
    fn test_round_trip_through_json_decoder() -> Result<()> {
        let samples = [
            "",
            "plain",
            "line one\nline two\n",
            "\"quoted\" and \\backslashed\\",
            "tabs\tand\rcarriage\u{0}nul",
            "Het Achterhuis – dagboekbrieven 😀 ünïcode",
            "\u{2028}\u{2029}\u{feff}",
        ];
        for sample in samples {
            for ascii_only in [true, false] {
                let literal = encode_literal(sample, ascii_only)?;
                let decoded: String = serde_json::from_str(&literal).expect("valid JSON literal");
                assert_eq!(decoded, sample);
                if ascii_only {
                    assert!(literal.is_ascii());
                }
            }
        }
        Ok(())
    }

    #[test]
    fn test_parse_statement() -> Result<()> {
        let statement = render_statement("ctx", "a \"b\"\n", true)?;
        let (name, text) = parse_statement(&statement).expect("statement should parse");
        assert_eq!(name, "ctx");
        assert_eq!(text, "a \"b\"\n");
        assert!(parse_statement("var x = 1;").is_none());
        Ok(())
    }

    #[test]
    fn test_rejects_bad_global_name() {
        let result = render_statement("not valid", "text", true);
        assert!(matches!(result, Err(ContextError::Config(_))));
    }
}
