//! PDF text extraction.
//!
//! A lightweight content-stream parser: it pulls string literals out of
//! `Tj`/`TJ` text-showing operators between `BT`/`ET` markers. This
//! handles the common case of uncompressed text streams; scanned pages,
//! compressed streams, and exotic encodings come out empty rather than
//! erroring.

use crate::error::ExtractError;

/// PDF text extractor.
///
/// Stateless; one instance can serve any number of documents.
#[derive(Debug, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract the text of all pages, concatenated in page order.
    ///
    /// Page boundaries are not marked in the output. An empty string is a
    /// legal result (image-only or fully compressed documents).
    pub fn extract_text(&self, data: &[u8]) -> Result<String, ExtractError> {
        let pages = self.extract_pages(data)?;
        // Concatenate with no separator: downstream truncation works on a
        // single flat string.
        Ok(pages.concat())
    }

    /// Extract per-page text in page order.
    pub fn extract_pages(&self, data: &[u8]) -> Result<Vec<String>, ExtractError> {
        if !data.starts_with(b"%PDF") {
            return Err(ExtractError::NotAPdf);
        }

        let content = String::from_utf8_lossy(data);
        let mut pages = Vec::new();
        let mut current = String::new();
        let mut in_text_object = false;

        for line in content.lines() {
            let trimmed = line.trim();

            match trimmed {
                "BT" => {
                    if in_text_object {
                        return Err(ExtractError::Malformed {
                            reason: "nested BT text object".to_string(),
                        });
                    }
                    in_text_object = true;
                    continue;
                }
                "ET" => {
                    in_text_object = false;
                    if !current.is_empty() {
                        current.push('\n');
                    }
                    continue;
                }
                _ => {}
            }

            if in_text_object && let Some(text) = show_text_operand(trimmed) {
                current.push_str(&text);
            }

            // A /Page object marks the start of the next page's stream.
            if trimmed.contains("/Type /Page") && !current.is_empty() {
                pages.push(std::mem::take(&mut current));
            }
        }

        if !current.is_empty() {
            pages.push(current);
        }

        Ok(pages)
    }
}

/// Decode the string operand of a `Tj` or `TJ` text-showing operator.
fn show_text_operand(line: &str) -> Option<String> {
    if line.ends_with("Tj") {
        let start = line.find('(')?;
        let end = line.rfind(')')?;
        if start >= end {
            return None;
        }
        let text = decode_literal(&line[start + 1..end]);
        return Some(text);
    }

    if line.ends_with("TJ") {
        // TJ takes an array mixing string literals and kerning numbers:
        // [(Hel) -20 (lo)] TJ
        let mut text = String::new();
        let mut depth_in_string = false;
        let mut literal = String::new();
        let mut chars = line.chars();
        while let Some(ch) = chars.next() {
            match ch {
                '(' if !depth_in_string => depth_in_string = true,
                ')' if depth_in_string => {
                    depth_in_string = false;
                    text.push_str(&decode_literal(&literal));
                    literal.clear();
                }
                '\\' if depth_in_string => {
                    literal.push(ch);
                    if let Some(next) = chars.next() {
                        literal.push(next);
                    }
                }
                _ if depth_in_string => literal.push(ch),
                _ => {}
            }
        }
        if !text.is_empty() {
            return Some(text);
        }
    }

    None
}

/// Resolve backslash escapes inside a PDF string literal.
fn decode_literal(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(c @ ('(' | ')' | '\\')) => out.push(c),
            Some(other) => {
                // Unknown escape: keep both characters verbatim.
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Build a minimal one-stream PDF around the given text lines.
    fn pdf_with_text(lines: &[&str]) -> Vec<u8> {
        let mut body = String::from("%PDF-1.4\nBT\n");
        for line in lines {
            body.push_str(&format!("({}) Tj\n", line));
        }
        body.push_str("ET\n%%EOF\n");
        body.into_bytes()
    }

    #[test]
    fn test_rejects_non_pdf() {
        let extractor = PdfExtractor::new();
        assert!(matches!(
            extractor.extract_text(b"plain text"),
            Err(ExtractError::NotAPdf)
        ));
    }

    #[test]
    fn test_extracts_simple_text() {
        let extractor = PdfExtractor::new();
        let data = pdf_with_text(&["The sky is blue. Grass is green."]);
        let text = extractor.extract_text(&data).unwrap();
        assert_eq!(text, "The sky is blue. Grass is green.\n");
    }

    #[test]
    fn test_empty_pdf_extracts_to_empty_string() {
        let extractor = PdfExtractor::new();
        let text = extractor.extract_text(b"%PDF-1.4\n%%EOF").unwrap();
        assert_eq!(text, "");
    }

    #[test]
    fn test_pages_concatenated_without_separator() {
        let extractor = PdfExtractor::new();
        let data = b"%PDF-1.4\n\
            BT\n(first page.) Tj\nET\n\
            2 0 obj << /Type /Page >>\n\
            BT\n(second page.) Tj\nET\n\
            %%EOF";
        let text = extractor.extract_text(data).unwrap();
        assert_eq!(text, "first page.\nsecond page.\n");
    }

    #[test]
    fn test_nested_text_object_is_malformed() {
        let extractor = PdfExtractor::new();
        let data = b"%PDF-1.4\nBT\nBT\n(x) Tj\nET\n%%EOF";
        assert!(matches!(
            extractor.extract_text(data),
            Err(ExtractError::Malformed { .. })
        ));
    }

    #[test]
    fn test_tj_operator() {
        assert_eq!(
            show_text_operand("(Hello World) Tj"),
            Some("Hello World".to_string())
        );
        assert_eq!(show_text_operand("1 0 0 1 50 700 Tm"), None);
    }

    #[test]
    fn test_tj_array_operator() {
        assert_eq!(
            show_text_operand("[(Hel) -20 (lo)] TJ"),
            Some("Hello".to_string())
        );
    }

    #[test]
    fn test_escapes_decoded() {
        assert_eq!(
            show_text_operand(r"(a \(b\) \\ c\nd) Tj"),
            Some("a (b) \\ c\nd".to_string())
        );
    }
}
