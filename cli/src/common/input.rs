//! Expression input utilities.

use std::io::Read;

/// Returns `arg` itself, or the contents of stdin if `arg` is "-".
///
/// A trailing newline from stdin is dropped.
pub fn read_expression(arg: &str) -> Result<String, String> {
    if !is_stdin(arg) {
        return Ok(arg.to_string());
    }
    let mut content = String::new();
    std::io::stdin()
        .read_to_string(&mut content)
        .map_err(|e| format!("<stdin>: {}", e))?;
    let trimmed = content.trim_end_matches(['\n', '\r']).len();
    content.truncate(trimmed);
    Ok(content)
}

/// Check if the argument represents stdin.
pub fn is_stdin(arg: &str) -> bool {
    arg == "-"
}
