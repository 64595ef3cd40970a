//! Text extraction from document bytes

use pulldown_cmark::{Event, Parser, Tag};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionError(pub String);

impl fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub trait TextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError>;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| ExtractionError(format!("Failed to extract text from PDF: {}", e)))
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        String::from_utf8(bytes.to_vec())
            .map_err(|e| ExtractionError(format!("Document is not valid UTF-8: {}", e)))
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let markdown = PlainTextExtractor.extract(bytes)?;
        Ok(self.markdown_to_text(&markdown))
    }
}

impl MarkdownExtractor {
    /// Keep text and code spans, turn block ends into line breaks so headings stay on their own line
    fn markdown_to_text(&self, markdown: &str) -> String {
        let mut text = String::new();

        for event in Parser::new(markdown) {
            match event {
                Event::Text(t) | Event::Code(t) => text.push_str(&t),
                Event::SoftBreak | Event::HardBreak => text.push('\n'),
                Event::End(Tag::Paragraph) | Event::End(Tag::Heading(..)) => text.push_str("\n\n"),
                Event::End(Tag::Item) => text.push('\n'),
                _ => {}
            }
        }

        text.lines()
            .map(str::trim_end)
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }
}
