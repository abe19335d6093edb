use crate::error::CliError;
use std::io::Read;
use std::path::Path;

pub const STDIN_MARKER: &str = "-";

/// Reads a script from `path`, or from stdin when `path` is `-`.
pub fn read_script(path: &Path) -> Result<String, CliError> {
    read_script_from(path, std::io::stdin().lock())
}

pub fn read_script_from<R>(path: &Path, mut stdin: R) -> Result<String, CliError>
where
    R: Read,
{
    if path == Path::new(STDIN_MARKER) {
        let mut script = String::new();
        stdin.read_to_string(&mut script).map_err(|e| {
            CliError::user_error("Could not read script from stdin").with_reason(e.to_string())
        })?;
        return Ok(script);
    }

    std::fs::read_to_string(path).map_err(|e| {
        CliError::user_error(format!("Could not read script {}", path.display()))
            .with_reason(e.to_string())
            .with_action("Pass a readable UTF-8 SQL file, or `-` to read from stdin.")
    })
}
