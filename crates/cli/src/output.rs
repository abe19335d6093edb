use crate::error::CliError;
use serde::Serialize;
use std::io::Write;

pub fn line(message: impl AsRef<str>) {
    println!("{}", message.as_ref());
}

pub fn error(message: impl AsRef<str>) {
    let mut stderr = std::io::stderr().lock();
    let _ = writeln!(stderr, "{}", message.as_ref());
}

pub fn json<T>(value: &T) -> Result<(), CliError>
where
    T: Serialize + ?Sized,
{
    let text = serde_json::to_string_pretty(value).map_err(|e| {
        CliError::migration_failed("Could not serialize output").with_reason(e.to_string())
    })?;
    line(text);
    Ok(())
}
