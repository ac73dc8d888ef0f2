//! Executes the page template and writes finished guides to disk.

use gtmpl::{Template, Value};
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::Path;
use tracing::debug;

/// Parses `source` as a gtmpl template and executes it against `context`.
pub fn render_page(source: &str, context: Value) -> Result<String> {
    let mut template = Template::default();
    template
        .parse(source)
        .map_err(|e| Error::Template(e.to_string()))?;
    let context = gtmpl::Context::from(context).map_err(|e| Error::Template(e.to_string()))?;

    let mut out: Vec<u8> = Vec::new();
    template
        .execute(&mut out, &context)
        .map_err(|e| Error::Template(e.to_string()))?;
    String::from_utf8(out).map_err(|e| Error::Template(e.to_string()))
}

/// Writes `html` to `path`, creating the parent directory if needed. Returns
/// the number of bytes written.
pub fn write_output(path: &Path, html: &str) -> Result<usize> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)?;
        }
    }
    debug!("Writing {} bytes to {}", html.len(), path.display());
    std::fs::write(path, html)?;
    Ok(html.len())
}

/// Builds a [`Value::Object`] from string fields.
pub fn object<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> Value
where
    K: Into<String>,
    V: Into<Value>,
{
    let m: HashMap<String, Value> = fields
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect();
    Value::Object(m)
}

pub type Result<T> = std::result::Result<T, Error>;

/// The error type for rendering and writing guides.
#[derive(Debug)]
pub enum Error {
    /// Returned when the page template cannot be parsed or executed.
    Template(String),

    /// Returned when generated HTML cannot be formatted.
    Format(fmt::Error),

    /// Returned for I/O errors while writing output.
    Io(io::Error),
}

impl From<io::Error> for Error {
    /// Converts an [`io::Error`] into an [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<fmt::Error> for Error {
    fn from(err: fmt::Error) -> Error {
        Error::Format(err)
    }
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as presentable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Template(err) => write!(f, "Rendering page template: {}", err),
            Error::Format(err) => err.fmt(f),
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Template(_) => None,
            Error::Format(err) => Some(err),
            Error::Io(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_render_page() {
        let context = object(vec![
            ("title", Value::from("Unbound")),
            (
                "items",
                Value::Array(vec![
                    object(vec![("label", "Zones")]),
                    object(vec![("label", "Fuel")]),
                ]),
            ),
        ]);
        let html = render_page(
            "<h1>{{.title}}</h1>\n{{range .items}}<a>{{.label}}</a>\n{{end}}",
            context,
        )
        .unwrap();
        assert_eq!("<h1>Unbound</h1>\n<a>Zones</a>\n<a>Fuel</a>\n", html);
    }

    #[test]
    fn test_render_page_parse_error() {
        let result = render_page("{{.title", object(vec![("title", "x")]));
        assert!(matches!(result, Err(Error::Template(_))));
    }

    #[test]
    fn test_write_output_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("guides").join("unbound.html");
        let written = write_output(&path, "<html></html>").unwrap();
        assert_eq!(13, written);
        assert_eq!("<html></html>", std::fs::read_to_string(&path).unwrap());
    }
}
