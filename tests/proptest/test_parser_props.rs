//! Property-based Tests for the Protocol Parser and Prompt Scanner

use proptest::prelude::*;

use skillshell::protocol::{parse_spans, strip_list_wrapper, PatternSet};

proptest! {
    /// Stripping then re-wrapping a well-formed list literal is lossless.
    #[test]
    fn prop_list_wrapper_round_trip(inner in "[a-zA-Z0-9_\" .]{0,64}") {
        let wrapped = format!("({})", inner);
        prop_assert_eq!(strip_list_wrapper(&wrapped), inner.as_str());
    }

    /// The prompt scanner consumes the marker as a boundary: the span it
    /// yields is exactly the bytes that preceded the marker.
    #[test]
    fn prop_prompt_scanner_excludes_marker(body in "[a-zA-Z0-9 \n().]{0,128}") {
        let patterns = PatternSet::new().unwrap();
        let buffer = format!("{}\r\n> ", body);

        let at = patterns.match_prompt(buffer.as_bytes())
            .expect("terminal marker must match");
        prop_assert_eq!(at, body.len());
        prop_assert_eq!(&buffer.as_bytes()[..at], body.as_bytes());
    }

    /// A marker not at the end of the buffer is never treated as a
    /// boundary, no matter what follows it.
    #[test]
    fn prop_prompt_mid_buffer_is_content(trailing in "[a-zA-Z0-9]{1,32}") {
        let patterns = PatternSet::new().unwrap();
        let buffer = format!("out\r\n> {}", trailing);
        prop_assert!(patterns.match_prompt(buffer.as_bytes()).is_none());
    }

    /// Plain printed output with the trailing sentinel never classifies
    /// as an error.
    #[test]
    fn prop_sentinel_terminated_output_is_success(printed in "[a-zA-Z0-9 ]{0,64}") {
        let patterns = PatternSet::new().unwrap();
        let span = format!("{}\r\nnil", printed);

        let parsed = parse_spans(&patterns, &span, "nil");
        prop_assert!(!parsed.is_error());
        prop_assert!(parsed.text.starts_with(printed.as_str()));
    }

    /// A well-formed error record always classifies as an error, for any
    /// code and regardless of the value span.
    #[test]
    fn prop_error_record_always_wins(code in 0i64..1_000_000, value_idx in 0usize..3) {
        let patterns = PatternSet::new().unwrap();
        let span = format!("(\"someError\" {} t nil (\"message\"))", code);
        let value = ["nil", "(1)", "(a b c)"][value_idx];

        let parsed = parse_spans(&patterns, &span, value);
        let error = parsed.error.expect("record must classify as error");
        prop_assert_eq!(error.class.as_str(), "someError");
        prop_assert_eq!(error.code, code);
    }
}
