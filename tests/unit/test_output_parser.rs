//! Unit Tests for Output Parsing
//!
//! Span-level coverage of the dual-pattern parser: error records, the
//! generic output boundary, list unwrapping, and classification
//! precedence.

use skillshell::protocol::{parse_spans, strip_list_wrapper, unwrap_value, PatternSet, NIL};

fn patterns() -> PatternSet {
    PatternSet::new().unwrap()
}

#[test]
fn test_success_with_empty_output() {
    let parsed = parse_spans(&patterns(), "nil", "nil");
    assert!(!parsed.is_error());
    assert_eq!(parsed.text, "\r\nnil");
}

#[test]
fn test_success_with_value() {
    let parsed = parse_spans(&patterns(), "nil", "(\"hi\")");
    assert!(!parsed.is_error());
    assert_eq!(parsed.text, "\r\n\"hi\"");
}

#[test]
fn test_success_with_printed_output_and_value() {
    let parsed = parse_spans(&patterns(), "computing...\r\nnil", "(3.14)");
    assert!(!parsed.is_error());
    assert_eq!(parsed.text, "computing...\r\n3.14");
}

#[test]
fn test_multiline_printed_output() {
    let span = "step 1\r\nstep 2\r\nstep 3\r\nnil";
    let parsed = parse_spans(&patterns(), span, "(t)");
    assert_eq!(parsed.text, "step 1\r\nstep 2\r\nstep 3\r\nt");
}

#[test]
fn test_error_record_detected() {
    let span = r#"("undefinedFunctionError" 7 t nil ("undefined_fn is not defined"))"#;
    let parsed = parse_spans(&patterns(), span, "nil");

    let error = parsed.error.expect("error record expected");
    assert_eq!(error.class, "undefinedFunctionError");
    assert_eq!(error.code, 7);
    assert!(error.message.contains("undefined_fn is not defined"));
}

#[test]
fn test_error_with_interleaved_printed_output() {
    let span = "partial result printed\r\n(\"divByZero\" 3 t nil (\"division by zero\"))";
    let parsed = parse_spans(&patterns(), span, "nil");

    assert!(parsed.is_error());
    assert!(parsed.text.starts_with("partial result printed"));
    assert_eq!(parsed.error.unwrap().class, "divByZero");
}

#[test]
fn test_error_precedence_over_value() {
    // classification follows the error span regardless of the value span
    let span = r#"("err" 1 t nil ("m"))"#;
    for value in ["nil", "(1)", "(a b c)"] {
        let parsed = parse_spans(&patterns(), span, value);
        assert!(parsed.is_error(), "value span {:?} must not mask the error", value);
    }
}

#[test]
fn test_mutual_exclusivity() {
    // a parse either carries an error or it does not; text is always set
    let success = parse_spans(&patterns(), "nil", "(1)");
    assert!(success.error.is_none());

    let failure = parse_spans(&patterns(), r#"("e" 2 t nil ("m"))"#, "nil");
    assert!(failure.error.is_some());
}

#[test]
fn test_unmatched_span_falls_back_to_printed_output() {
    let parsed = parse_spans(&patterns(), "garbled without sentinel", "nil");
    assert!(!parsed.is_error());
    assert!(parsed.text.starts_with("garbled without sentinel"));
}

#[test]
fn test_error_code_larger_than_u8() {
    let span = r#"("systemError" 32768 t nil ("overflowing code"))"#;
    let parsed = parse_spans(&patterns(), span, "nil");
    assert_eq!(parsed.error.unwrap().code, 32768);
}

#[test]
fn test_nil_value_passes_through() {
    assert_eq!(unwrap_value(NIL), "nil");
}

#[test]
fn test_value_unwrapping() {
    assert_eq!(unwrap_value("(42)"), "42");
    assert_eq!(unwrap_value("(\"text\")"), "\"text\"");
    assert_eq!(unwrap_value("(a b)"), "a b");
}

#[test]
fn test_wrapper_strip_and_rewrap() {
    for original in ["()", "(x)", "(print printf)", "(\"quoted value\")"] {
        let rewrapped = format!("({})", strip_list_wrapper(original));
        assert_eq!(rewrapped, original);
    }
}

#[test]
fn test_wrapper_strip_multibyte() {
    // delimiters are characters, not bytes
    assert_eq!(strip_list_wrapper("«été»"), "été");
}
