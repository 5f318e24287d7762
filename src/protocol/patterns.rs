//! Protocol Pattern Set
//!
//! The compiled patterns that define the wire grammar spoken by the
//! interpreter: the prompt marker used to synchronize every exchange, the
//! error-record literal printed by the `errset` guard, the generic output
//! boundary, and the banner version shape.

use regex::bytes::Regex as BytesRegex;
use regex::Regex;

use crate::error::Result;

/// The literal token the interpreter prints for "no value".
pub const NIL: &str = "nil";

/// Default prompt marker: a line break followed by `> ` at the end of
/// buffered input.
pub const DEFAULT_PROMPT_PATTERN: &str = r"\r\n> $";

/// Immutable set of compiled protocol patterns.
///
/// Built once per session. The prompt marker is matched against raw bytes
/// while reading from the interpreter; the remaining patterns operate on
/// completed captured spans.
#[derive(Debug)]
pub struct PatternSet {
    /// Prompt marker, anchored at end of buffered input
    prompt: BytesRegex,
    /// Error-record literal: `("<class>" <code> t nil (<message>))`
    error_record: Regex,
    /// Printed output up to the trailing nil sentinel
    output_boundary: Regex,
    /// Version string inside the interpreter banner
    version: Regex,
}

impl PatternSet {
    /// Create a pattern set with the default prompt marker.
    pub fn new() -> Result<Self> {
        Self::with_prompt(DEFAULT_PROMPT_PATTERN)
    }

    /// Create a pattern set with a custom prompt marker pattern.
    ///
    /// The pattern must stay anchored at end of input (`$`) — the prompt is
    /// a synchronization boundary, only valid when nothing follows it.
    pub fn with_prompt(prompt_pattern: &str) -> Result<Self> {
        Ok(Self {
            prompt: BytesRegex::new(prompt_pattern)?,
            error_record: Regex::new(r#"\("(.*?)"\s+(\d+)\s+t\s+nil\s+\((.*?)\)\s*\)"#)?,
            output_boundary: Regex::new(r"(?s)^(.*?)(?:\r\n)?nil$")?,
            version: Regex::new(r"version (\d+(?:\.\d+)+)")?,
        })
    }

    /// Find the prompt marker at the end of `buffer`.
    ///
    /// Returns the byte offset where the marker starts; everything before
    /// it is the captured span. The end anchor guarantees a match only when
    /// the marker terminates the buffer, so partial markers split across
    /// read chunks are never matched early.
    pub fn match_prompt(&self, buffer: &[u8]) -> Option<usize> {
        self.prompt.find(buffer).map(|m| m.start())
    }

    /// The error-record pattern.
    pub fn error_record(&self) -> &Regex {
        &self.error_record
    }

    /// The generic output boundary pattern.
    pub fn output_boundary(&self) -> &Regex {
        &self.output_boundary
    }

    /// The banner version pattern.
    pub fn version(&self) -> &Regex {
        &self.version
    }
}
