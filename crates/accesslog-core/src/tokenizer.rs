//! Batch tokenizer.
//!
//! Splits a block of batch text into lines (CR/LF separated) of fields
//! (space/tab separated). Runs of either separator collapse, so no empty
//! field or empty line is ever produced, and end of input terminates the
//! last field and line.

use accesslog_types::{Error, Result};

/// One non-empty command line of a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchLine {
    /// 1-based line number in the source text where this line starts
    pub number: usize,
    pub fields: Vec<String>,
}

/// Tokenized batch: lines in input order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Batch {
    lines: Vec<BatchLine>,
}

impl Batch {
    /// Tokenize raw batch file contents.
    ///
    /// Fails with `MalformedBatch` when the bytes are not UTF-8 or contain NUL.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes).map_err(|err| {
            Error::MalformedBatch(format!(
                "invalid UTF-8 at byte offset {}",
                err.valid_up_to()
            ))
        })?;

        if let Some(pos) = text.find('\0') {
            return Err(Error::MalformedBatch(format!(
                "NUL byte at offset {}",
                pos
            )));
        }

        Ok(tokenize(text))
    }

    pub fn lines(&self) -> &[BatchLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BatchLine> {
        self.lines.iter()
    }

    /// Canonical text form: fields joined by one space, lines by one newline
    pub fn to_text(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.fields.join(" "))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl<'a> IntoIterator for &'a Batch {
    type Item = &'a BatchLine;
    type IntoIter = std::slice::Iter<'a, BatchLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

fn is_line_separator(c: char) -> bool {
    c == '\n' || c == '\r'
}

fn is_field_separator(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Incremental line/field builder over an immutable input
struct Builder<'a> {
    text: &'a str,
    lines: Vec<BatchLine>,
    fields: Vec<String>,
    field_start: Option<usize>,
    line_number: usize,
    line_start: usize,
}

impl<'a> Builder<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            lines: Vec::new(),
            fields: Vec::new(),
            field_start: None,
            line_number: 1,
            line_start: 1,
        }
    }

    fn begin_field(&mut self, offset: usize) {
        if self.field_start.is_none() {
            if self.fields.is_empty() {
                self.line_start = self.line_number;
            }
            self.field_start = Some(offset);
        }
    }

    fn end_field(&mut self, offset: usize) {
        if let Some(start) = self.field_start.take() {
            self.fields.push(self.text[start..offset].to_string());
        }
    }

    fn end_line(&mut self) {
        if !self.fields.is_empty() {
            self.lines.push(BatchLine {
                number: self.line_start,
                fields: std::mem::take(&mut self.fields),
            });
        }
    }

    fn finish(mut self) -> Batch {
        self.end_field(self.text.len());
        self.end_line();
        Batch { lines: self.lines }
    }
}

/// Split `text` into lines of whitespace-separated fields.
pub fn tokenize(text: &str) -> Batch {
    let mut builder = Builder::new(text);
    let mut prev = None;

    for (offset, c) in text.char_indices() {
        if is_line_separator(c) {
            builder.end_field(offset);
            builder.end_line();
            // CRLF counts as one source line break
            if !(c == '\n' && prev == Some('\r')) {
                builder.line_number += 1;
            }
        } else if is_field_separator(c) {
            builder.end_field(offset);
        } else {
            builder.begin_field(offset);
        }
        prev = Some(c);
    }

    builder.finish()
}
