use anyhow::{anyhow, Result};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Opens a file, naming its `kind` ("project", ...) in the error.
pub fn open(path: &Path, kind: &str) -> Result<File> {
    File::open(path).map_err(|e| anyhow!("Opening {} file `{}`: {}", kind, path.display(), e))
}

/// The directory to start the project file search from: the absolute
/// directory of `input`, or its directory as given when it cannot be
/// resolved.
pub fn input_directory(input: &Path) -> PathBuf {
    let dir = match input.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_owned(),
        _ => PathBuf::from("."),
    };
    dir.canonicalize().unwrap_or(dir)
}
