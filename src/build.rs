//! Exports the [`build_guide`] function which stitches together the
//! high-level steps of generating a guide: reading the JSON input, loading the
//! theme, choosing a generator ([`crate::guide`] or [`crate::race`]) and
//! writing the result ([`crate::write`]).

use crate::config::{Config, Mode};
use crate::guide::render_guide;
use crate::race::{render_race_guide, resolve_level, resolve_tier};
use crate::theme::{Theme, ThemeFiles};
use crate::write::{write_output, Error as WriteError};
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Builds the guide described by a [`Config`] and returns the number of bytes
/// written.
pub fn build_guide(config: &Config) -> Result<usize> {
    if !config.input.exists() {
        return Err(Error::MissingInput(config.input.clone()));
    }

    info!("Reading data from: {}", config.input.display());
    let data = read_input(&config.input)?;
    let theme = load_theme(&config.theme)?;

    let mode = resolve_mode(config.mode, &data);
    info!("Generating HTML ({} mode)...", mode);
    let html = match mode {
        Mode::Race => render_race_guide(
            &data,
            &resolve_tier(&data, config.tier.as_deref()),
            &resolve_level(&data, config.level.as_deref()),
            &theme,
        ),
        _ => render_guide(
            &data,
            &theme,
            config.tier.as_deref(),
            config.level.as_deref(),
        )?,
    };

    info!("Writing output to: {}", config.output.display());
    let written = write_output(&config.output, &html)?;
    info!("Done! Generated {} bytes", written);
    Ok(written)
}

/// Picks the generator for [`Mode::Auto`]: structured documents have a
/// top-level `meta` or `sections` key.
pub fn resolve_mode(mode: Mode, data: &Value) -> Mode {
    match mode {
        Mode::Auto => match data.get("meta").is_some() || data.get("sections").is_some() {
            true => Mode::Structured,
            false => Mode::Race,
        },
        mode => mode,
    }
}

fn read_input(path: &Path) -> Result<Value> {
    let contents = std::fs::read_to_string(path).map_err(|e| Error::ReadInput {
        path: path.to_owned(),
        err: e,
    })?;
    serde_json::from_str(&contents).map_err(|e| Error::ParseJson {
        path: path.to_owned(),
        err: e,
    })
}

// Starts from the embedded theme and replaces each part that has a file.
fn load_theme(files: &ThemeFiles) -> Result<Theme> {
    let mut theme = Theme::default();
    if let Some(path) = &files.stylesheet {
        theme.stylesheet = read_theme_file(path)?;
    }
    if let Some(path) = &files.page_template {
        theme.page_template = read_theme_file(path)?;
    }
    if let Some(path) = &files.race_template {
        theme.race_template = read_theme_file(path)?;
    }
    Ok(theme)
}

fn read_theme_file(path: &Path) -> Result<String> {
    debug!("Loading theme file {}", path.display());
    std::fs::read_to_string(path).map_err(|e| Error::OpenThemeFile {
        path: path.to_owned(),
        err: e,
    })
}

type Result<T> = std::result::Result<T, Error>;

/// The error type for building a guide.
#[derive(Debug)]
pub enum Error {
    /// Returned when the input file does not exist.
    MissingInput(PathBuf),

    /// Returned for I/O problems while reading the input file.
    ReadInput { path: PathBuf, err: std::io::Error },

    /// Returned when the input file is not valid JSON.
    ParseJson {
        path: PathBuf,
        err: serde_json::Error,
    },

    /// Returned for I/O problems while reading a stylesheet or template
    /// override.
    OpenThemeFile { path: PathBuf, err: std::io::Error },

    /// Returned for errors rendering or writing the guide.
    Write(WriteError),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::MissingInput(path) => {
                write!(f, "Input file '{}' not found", path.display())
            }
            Error::ReadInput { path, err } => {
                write!(f, "Reading input file '{}': {}", path.display(), err)
            }
            Error::ParseJson { path, err } => {
                write!(f, "Parsing JSON in '{}': {}", path.display(), err)
            }
            Error::OpenThemeFile { path, err } => {
                write!(f, "Opening theme file '{}': {}", path.display(), err)
            }
            Error::Write(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::MissingInput(_) => None,
            Error::ReadInput { path: _, err } => Some(err),
            Error::ParseJson { path: _, err } => Some(err),
            Error::OpenThemeFile { path: _, err } => Some(err),
            Error::Write(err) => Some(err),
        }
    }
}

impl From<WriteError> for Error {
    /// Converts [`WriteError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: WriteError) -> Error {
        Error::Write(err)
    }
}
