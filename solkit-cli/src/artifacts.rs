//! Persisting generated artifacts.

use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;

/// Write text to `path`, creating parent directories as needed.
pub fn write_text(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)
}

/// Write a value as JSON, indented when `pretty` is set.
pub fn write_json<T: Serialize>(path: &Path, value: &T, pretty: bool) -> io::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .map_err(io::Error::from)?;
    write_text(path, &json)
}
