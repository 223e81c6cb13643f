//! Launching the user's editor.

use super::CliError;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Opens `path` in `editor` and waits for it to exit.
///
/// `editor` may carry arguments, e.g. `code --wait`.
pub fn open(editor: &str, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut parts = editor.split_whitespace();
    let program = parts.next().ok_or(CliError::NoEditor)?;
    debug!(editor, path = %path.display(), "launching editor");

    let status = Command::new(program).args(parts).arg(path).status()?;
    if !status.success() {
        return Err(CliError::EditorFailed {
            editor: editor.to_string(),
            status,
        }
        .into());
    }
    Ok(())
}

/// Lets the user compose text in a temporary file pre-filled with `initial`.
///
/// Returns the trimmed result; an empty string means the user wrote nothing.
pub fn compose(editor: &str, initial: &str) -> Result<String, Box<dyn std::error::Error>> {
    let mut file = tempfile::Builder::new()
        .prefix("recallvault-")
        .suffix(".txt")
        .tempfile()?;
    file.write_all(initial.as_bytes())?;
    file.flush()?;

    open(editor, file.path())?;

    // Editors may replace the file rather than write in place.
    let text = fs::read_to_string(file.path())?;
    Ok(finish(&text))
}

/// Normalizes composed text into an entry body.
pub fn finish(text: &str) -> String {
    text.trim().to_string()
}
