//! Unit Tests for the Protocol Pattern Set

use skillshell::protocol::{PatternSet, DEFAULT_PROMPT_PATTERN};

#[test]
fn test_default_prompt_pattern_value() {
    assert_eq!(DEFAULT_PROMPT_PATTERN, r"\r\n> $");
}

#[test]
fn test_prompt_boundary_detection() {
    let patterns = PatternSet::new().unwrap();

    // marker terminates the buffer: boundary
    assert!(patterns.match_prompt(b"any output\r\n> ").is_some());
    // marker mid-buffer: not a boundary yet
    assert!(patterns.match_prompt(b"a\r\n> b").is_none());
    // incomplete marker: keep reading
    assert!(patterns.match_prompt(b"a\r\n").is_none());
    assert!(patterns.match_prompt(b"a\r\n> \r\n").is_none());
}

#[test]
fn test_prompt_offset_bounds_captured_span() {
    let patterns = PatternSet::new().unwrap();
    let buffer = b"result line\r\n> ";
    assert_eq!(patterns.match_prompt(buffer), Some(11));
}

#[test]
fn test_repeated_prompts_match_final_one() {
    let patterns = PatternSet::new().unwrap();
    // a stray marker-shaped sequence earlier in the buffer is content;
    // only the terminal occurrence is a boundary
    let buffer = b"a\r\n> b\r\n> ";
    assert_eq!(patterns.match_prompt(buffer), Some(6));
}

#[test]
fn test_error_record_grammar() {
    let patterns = PatternSet::new().unwrap();
    let record = patterns.error_record();

    assert!(record.is_match(r#"("errorClass" 12 t nil ("Error Message"))"#));
    // the t/nil tokens are grammar-fixed
    assert!(!record.is_match(r#"("errorClass" 12 nil t ("Error Message"))"#));
    // the code is an integer
    assert!(!record.is_match(r#"("errorClass" twelve t nil ("Error Message"))"#));
}

#[test]
fn test_error_record_flexible_whitespace() {
    let patterns = PatternSet::new().unwrap();
    assert!(patterns
        .error_record()
        .is_match("(\"e\"  3\tt  nil  (\"m\") )"));
}

#[test]
fn test_output_boundary_variants() {
    let patterns = PatternSet::new().unwrap();
    let boundary = patterns.output_boundary();

    // bare sentinel
    assert_eq!(&boundary.captures("nil").unwrap()[1], "");
    // sentinel after a line break
    assert_eq!(&boundary.captures("out\r\nnil").unwrap()[1], "out");
    // sentinel directly appended
    assert_eq!(&boundary.captures("outnil").unwrap()[1], "out");
    // no sentinel at the end
    assert!(boundary.captures("nil in the middle").is_none());
}

#[test]
fn test_version_extraction_from_banner() {
    let patterns = PatternSet::new().unwrap();
    let banner = "\
sub-version  IC6.1.8-64b.500.21\r\n\
virtuoso version 6.1.8 64bit\r\n";

    let caps = patterns.version().captures(banner).unwrap();
    assert_eq!(&caps[1], "6.1.8");
}

#[test]
fn test_custom_prompt_round_trip() {
    let patterns = PatternSet::with_prompt(r"\r\n>> $").unwrap();
    assert_eq!(patterns.match_prompt(b"x\r\n>> "), Some(1));
    assert!(patterns.match_prompt(b"x\r\n> ").is_none());
}
