//! # json-linker - link and embed related JSON objects
//!
//! Converts JSON documents between an embedded form, where related objects
//! are nested inside the primary object, and a linked form in the style of
//! JSON API documents (<http://jsonapi.org/format/#document-top-level>),
//! where the primary object only references related objects by `id` and
//! the related objects are collected in a `linked` side-table.
//!
//! ## Quick Start
//!
//! ```rust
//! use json_linker::{JsonLinker, LinkerConfig, Object};
//! use serde_json::json;
//!
//! # fn main() -> anyhow::Result<()> {
//! let post: Object = serde_json::from_value(json!({
//!     "id": 1,
//!     "tags": [{"id": 5}, {"id": 6}]
//! }))?;
//!
//! let linker = JsonLinker::new(LinkerConfig::new().relation("tags").with_root("model"));
//!
//! let envelope = linker.to_envelope(Some(&post))?.unwrap();
//! assert_eq!(
//!     serde_json::Value::Object(envelope.clone()),
//!     json!({
//!         "model": [{"id": 1, "links": {"tags": [5, 6]}}],
//!         "linked": {"tags": [{"id": 5}, {"id": 6}]}
//!     })
//! );
//!
//! let embedded = linker.from_envelope(Some(&envelope))?;
//! assert_eq!(embedded, Some(post));
//! # Ok(())
//! # }
//! ```

use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::io::{BufRead, Write};

pub mod linker;

// Re-export commonly used types for convenience
pub use linker::{
    extract_linked, extract_links, from_envelope, resolve_links, DocumentWriter, JsonLinker, LinkError,
    LinkerConfig, Object,
};

/// Wrap a stream of newline-delimited embedded objects into envelopes
pub fn link_json<R: BufRead, W: Write>(
    reader: R,
    writer: &mut DocumentWriter<W>,
    linker: &JsonLinker,
) -> Result<()> {
    process_lines(reader, |line_no, model| {
        let envelope = linker
            .to_envelope(Some(&model))
            .with_context(|| format!("Failed to link document on line {}", line_no))?;
        writer.write_document(envelope.as_ref())
    })
}

/// Unwrap a stream of newline-delimited envelopes into embedded objects
pub fn embed_json<R: BufRead, W: Write>(
    reader: R,
    writer: &mut DocumentWriter<W>,
    linker: &JsonLinker,
) -> Result<()> {
    process_lines(reader, |line_no, envelope| {
        let model = linker
            .from_envelope(Some(&envelope))
            .with_context(|| format!("Failed to embed document on line {}", line_no))?;
        writer.write_document(model.as_ref())
    })
}

fn process_lines<R, F>(reader: R, mut handle: F) -> Result<()>
where
    R: BufRead,
    F: FnMut(usize, Object) -> Result<()>,
{
    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.context("Failed to read line")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let value: Value = serde_json::from_str(line)
            .with_context(|| format!("Failed to parse JSON on line {}", line_no))?;
        let Value::Object(document) = value else {
            bail!("Expected a JSON object on line {}", line_no);
        };

        handle(line_no, document)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_link_then_embed_stream() {
        let input = concat!(
            "{\"id\": 1, \"author\": {\"id\": 9, \"name\": \"A\"}}\n",
            "\n",
            "{\"id\": 2, \"author\": null}\n",
        );
        let linker = JsonLinker::default().link(["author"]).root("posts");

        let mut linked = Vec::new();
        {
            let mut writer = DocumentWriter::new(&mut linked);
            link_json(Cursor::new(input), &mut writer, &linker).unwrap();
            assert_eq!(writer.written(), 2);
        }

        let text = String::from_utf8(linked.clone()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            serde_json::from_str::<Value>(lines[0]).unwrap(),
            serde_json::json!({
                "posts": [{"id": 1, "links": {"author": 9}}],
                "linked": {"author": {"id": 9, "name": "A"}}
            })
        );
        assert_eq!(
            serde_json::from_str::<Value>(lines[1]).unwrap(),
            serde_json::json!({"posts": [{"id": 2, "author": null}]})
        );

        let mut embedded = Vec::new();
        {
            let mut writer = DocumentWriter::new(&mut embedded);
            embed_json(Cursor::new(linked), &mut writer, &linker).unwrap();
        }

        let text = String::from_utf8(embedded).unwrap();
        let first: Value = serde_json::from_str(text.lines().next().unwrap()).unwrap();
        assert_eq!(first, serde_json::json!({"id": 1, "author": {"id": 9, "name": "A"}}));
    }

    #[test]
    fn test_non_object_line() {
        let linker = JsonLinker::default().link(["author"]);
        let mut writer = DocumentWriter::new(Vec::new());

        let err = link_json(Cursor::new("[1, 2]\n"), &mut writer, &linker).unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_link_error_names_line() {
        let linker = JsonLinker::default();
        let mut writer = DocumentWriter::new(Vec::new());

        let err = link_json(Cursor::new("{\"id\": 1}\n"), &mut writer, &linker).unwrap_err();
        assert!(err.to_string().contains("line 1"));
        assert_eq!(err.downcast_ref::<LinkError>(), Some(&LinkError::InvalidArguments));
    }
}
