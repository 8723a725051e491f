use crate::linker::types::Object;
use anyhow::{Context, Result};
use std::io::Write;

/// Writes JSON documents to a single output, one per line unless pretty-printed
pub struct DocumentWriter<W: Write> {
    writer: W,
    pretty: bool,
    written: usize,
    skipped: usize,
}

impl<W: Write> DocumentWriter<W> {
    pub fn new(writer: W) -> Self {
        DocumentWriter {
            writer,
            pretty: false,
            written: 0,
            skipped: 0,
        }
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Write a document, or count it as skipped when there is nothing to write
    pub fn write_document(&mut self, document: Option<&Object>) -> Result<()> {
        let Some(document) = document else {
            self.skipped += 1;
            return Ok(());
        };

        let json = if self.pretty {
            serde_json::to_string_pretty(document)
        } else {
            serde_json::to_string(document)
        }
        .context("Failed to serialize document")?;

        writeln!(self.writer, "{}", json).context("Failed to write document")?;
        self.written += 1;
        Ok(())
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().context("Failed to flush writer")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_compact_lines() {
        let mut buffer = Vec::new();
        let mut writer = DocumentWriter::new(&mut buffer);

        let first: Object = serde_json::from_value(json!({"id": 1})).unwrap();
        let second: Object = serde_json::from_value(json!({"id": 2})).unwrap();

        writer.write_document(Some(&first)).unwrap();
        writer.write_document(None).unwrap();
        writer.write_document(Some(&second)).unwrap();

        assert_eq!(writer.written(), 2);
        assert_eq!(writer.skipped(), 1);

        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(output, "{\"id\":1}\n{\"id\":2}\n");
    }

    #[test]
    fn test_pretty() {
        let mut buffer = Vec::new();
        let mut writer = DocumentWriter::new(&mut buffer).pretty(true);

        let document: Object = serde_json::from_value(json!({"id": 1})).unwrap();
        writer.write_document(Some(&document)).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(output, "{\n  \"id\": 1\n}\n");
    }
}
