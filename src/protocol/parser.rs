//! Output Parser
//!
//! Classifies the two captured spans of a cell execution — the
//! error-capturing span and the value span — into printed output plus
//! either a successful result or a structured error record.

use crate::error::EvalError;

use super::patterns::{PatternSet, NIL};

/// The parser's verdict on one cell execution.
///
/// `error` is `Some` exactly when the error-record pattern matched the
/// error-capturing span; `text` is the combined printed output and value
/// in every case, matching what the interpreter showed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedOutput {
    /// Combined printed output and unwrapped value
    pub text: String,
    /// Structured error record, when the cell raised
    pub error: Option<EvalError>,
}

impl ParsedOutput {
    /// Whether the execution raised.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Strip one layer of list-wrapper syntax: the first and last character.
pub fn strip_list_wrapper(span: &str) -> &str {
    let mut chars = span.char_indices();
    let Some((_, first)) = chars.next() else {
        return span;
    };
    let Some((last_start, _)) = span.char_indices().next_back() else {
        return span;
    };
    let inner_start = first.len_utf8();
    if inner_start > last_start {
        // single-character span, nothing between the delimiters
        return "";
    }
    &span[inner_start..last_start]
}

/// Unwrap a value span: the nil sentinel passes through verbatim, anything
/// else loses one list-wrapper layer.
pub fn unwrap_value(span: &str) -> &str {
    if span == NIL {
        span
    } else {
        strip_list_wrapper(span)
    }
}

/// Parse the two captured spans of one execution.
///
/// The error-record pattern is attempted first; the generic output
/// boundary is the fallback. A span matching neither is treated wholesale
/// as printed output.
pub fn parse_spans(patterns: &PatternSet, error_span: &str, value_span: &str) -> ParsedOutput {
    let value = unwrap_value(value_span);

    if let Some(caps) = patterns.error_record().captures(error_span) {
        let whole = caps.get(0).map(|m| m.start()).unwrap_or(0);
        let error = EvalError {
            class: caps[1].to_string(),
            code: caps[2].parse().unwrap_or(0),
            message: caps[3].to_string(),
        };
        let printed = &error_span[..whole];
        return ParsedOutput {
            text: format!("{}\r\n{}", printed, value),
            error: Some(error),
        };
    }

    let printed = match patterns.output_boundary().captures(error_span) {
        Some(caps) => caps.get(1).map(|m| m.as_str()).unwrap_or(""),
        // Neither grammar matched; keep the whole span as printed output.
        None => error_span,
    };

    ParsedOutput {
        text: format!("{}\r\n{}", printed, value),
        error: None,
    }
}
