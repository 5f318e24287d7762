//! Command Framing
//!
//! Builders for every line sent to the interpreter. Cell code is wrapped
//! in the SKILL `errset` guard so a raised condition becomes a printable
//! error record instead of propagating, and the real result is stashed in
//! a sentinel variable fetched in a clean second round trip.

/// The sentinel variable holding the guarded cell's real result.
pub const RESULT_VAR: &str = "_exc_res";

/// The command that asks the interpreter to terminate.
pub const EXIT_COMMAND: &str = "exit()";

/// Wrap cell code in the error guard.
///
/// The framed line assigns the guarded evaluation to [`RESULT_VAR`] and
/// then references `errset.errset`, which prints `nil` on success or the
/// error-record literal when the code raised.
pub fn frame_cell(code: &str) -> String {
    format!("{}=errset({{{}}}) errset.errset", RESULT_VAR, code)
}

/// Listing command for functions starting with `token`.
pub fn list_functions(token: &str) -> String {
    format!(r#"listFunctions("^{}")"#, token)
}

/// Listing command for variables starting with `token`.
pub fn list_variables(token: &str) -> String {
    format!(r#"listVariables("^{}")"#, token)
}

/// Help lookup command for `token`.
pub fn help_lookup(token: &str) -> String {
    format!("help({})", token)
}
