//! Integration Tests for the Session Protocol
//!
//! Drives a full `ShellSession` against a scripted mock interpreter and
//! verifies both the wire traffic (framed commands) and the parsed
//! results for the documented exchange scenarios.

#[path = "../test_utils/mod.rs"]
mod test_utils;

use skillshell::{Error, SessionState, ShellConfig, ShellSession};
use test_utils::mock_shell::MockShell;

fn session_with_script(replies: &[&str]) -> (MockShell, ShellSession) {
    let (mock, streams) = MockShell::spawn(replies.iter().map(|r| r.to_string()).collect());
    let session = ShellSession::from_streams(ShellConfig::default(), streams).unwrap();
    (mock, session)
}

#[test]
fn test_successful_cell_round_trips() {
    // echo("hi"): the guard reports nil, the value is a one-element list
    let (mock, mut session) = session_with_script(&["nil", "(\"hi\")"]);

    let text = session.run_cell(r#"echo("hi")"#).unwrap();
    assert_eq!(text, "\r\n\"hi\"");
    assert!(session.last_error().is_none());

    let lines = mock.received_lines();
    assert_eq!(
        lines,
        vec![
            "_exc_res=errset({echo(\"hi\")}) errset.errset\n".to_string(),
            "_exc_res\n".to_string(),
        ]
    );
}

#[test]
fn test_failing_cell_raises_structured_error() {
    let (_mock, mut session) = session_with_script(&[
        "(\"undefinedFunctionError\" 7 t nil (\"undefined_fn is not defined\"))",
        "nil",
    ]);

    match session.run_cell("undefined_fn()") {
        Err(Error::Evaluation(record)) => {
            assert_eq!(record.class, "undefinedFunctionError");
            assert_eq!(record.code, 7);
            assert!(record.message.contains("undefined_fn is not defined"));
        }
        other => panic!("expected evaluation error, got {:?}", other),
    }
}

#[test]
fn test_error_classification_ignores_value_span() {
    // even with a plausible value, an error record wins
    let (_mock, mut session) =
        session_with_script(&["(\"fatalError\" 1 t nil (\"boom\"))", "(42)"]);

    assert!(matches!(
        session.run_cell("x"),
        Err(Error::Evaluation(_))
    ));
}

#[test]
fn test_printed_output_combined_with_value() {
    let (_mock, mut session) =
        session_with_script(&["loading library\r\nnil", "(done)"]);

    let text = session.run_cell("load(\"lib\")").unwrap();
    assert_eq!(text, "loading library\r\ndone");
}

#[test]
fn test_sequential_cells_share_the_session() {
    let (mock, mut session) =
        session_with_script(&["nil", "(1)", "nil", "(2)", "nil", "(3)"]);

    for expected in ["1", "2", "3"] {
        let text = session.run_cell("next()").unwrap();
        assert!(text.ends_with(expected));
    }
    assert_eq!(mock.received_lines().len(), 6);
}

#[test]
fn test_completion_matches() {
    let (mock, mut session) = session_with_script(&["(print printf)", "nil"]);

    let matches = session.get_matches("pr").unwrap();
    assert_eq!(matches, vec!["print".to_string(), "printf".to_string()]);

    let lines = mock.received_lines();
    assert_eq!(lines[0], "listFunctions(\"^pr\")\n");
    assert_eq!(lines[1], "listVariables(\"^pr\")\n");
}

#[test]
fn test_completion_concatenates_functions_then_variables() {
    let (_mock, mut session) =
        session_with_script(&["(setPlotStyle)", "(setupFile settings)"]);

    let matches = session.get_matches("set").unwrap();
    assert_eq!(
        matches,
        vec![
            "setPlotStyle".to_string(),
            "setupFile".to_string(),
            "settings".to_string(),
        ]
    );
}

#[test]
fn test_empty_completion_is_empty_not_nil() {
    let (_mock, mut session) = session_with_script(&["nil", "nil"]);

    let matches = session.get_matches("qqq").unwrap();
    assert!(matches.is_empty());
}

#[test]
fn test_help_lookup() {
    let (mock, mut session) = session_with_script(&["printf( format [args] ) => t"]);

    let info = session.get_info("printf").unwrap();
    assert_eq!(info, "printf( format [args] ) => t");
    assert_eq!(mock.received_lines()[0], "help(printf)\n");
}

#[test]
fn test_help_lookup_without_entry() {
    let (_mock, mut session) = session_with_script(&["nil"]);
    assert_eq!(session.get_info("unknown").unwrap(), "");
}

#[test]
fn test_shutdown_races_process_exit() {
    // no replies scripted: the "process" exits on the first command,
    // closing the stream before any prompt is echoed back
    let (mock, mut session) = session_with_script(&[]);

    session.shutdown(false).unwrap();
    assert_eq!(session.state(), SessionState::Closed);
    assert!(session.process().is_terminated());

    // the exit command went out through the normal framed path
    let lines = mock.received_lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("exit()"));
}

#[test]
fn test_commands_after_shutdown_fail() {
    let (_mock, mut session) = session_with_script(&[]);
    session.shutdown(false).unwrap();

    assert!(matches!(
        session.run_cell("x"),
        Err(Error::StreamClosed { .. })
    ));
    assert!(matches!(
        session.get_matches("x"),
        Err(Error::StreamClosed { .. })
    ));
    assert!(matches!(
        session.get_info("x"),
        Err(Error::StreamClosed { .. })
    ));
}

#[test]
fn test_restart_flag_is_accepted() {
    let (_mock, mut session) = session_with_script(&[]);
    // reserved parameter: same behavior as a plain shutdown
    session.shutdown(true).unwrap();
    assert_eq!(session.state(), SessionState::Closed);
}

#[test]
fn test_prompt_marker_absent_from_all_results() {
    let (_mock, mut session) = session_with_script(&[
        "line with > arrow\r\nnil",
        "(value)",
        "(help > text)",
    ]);

    let text = session.run_cell("x").unwrap();
    assert!(!text.contains("\r\n> "));

    let info = session.get_info("y").unwrap();
    assert!(!info.contains("\r\n> "));
}
