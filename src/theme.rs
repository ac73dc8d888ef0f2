//! The stylesheet and templates that generated guides are built from. Defaults
//! are compiled into the binary; each one can be replaced by a file.

use std::path::PathBuf;

/// The neo-brutalist stylesheet inlined into every guide.
pub const STYLESHEET: &str = include_str!("../theme/guide.css");

/// The gtmpl page shell for structured guides. It is executed with
/// `race_name`, `tier`, `level`, `location`, `stylesheet`, `nav` (a list of
/// `{id, label}`), `sections` (pre-rendered HTML) and `footer`.
pub const PAGE_TEMPLATE: &str = include_str!("../theme/page.html");

/// The `{{PLACEHOLDER}}` template for race guides.
pub const RACE_TEMPLATE: &str = include_str!("../theme/race_template.html");

/// The theme contents used for one build.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub stylesheet: String,
    pub page_template: String,
    pub race_template: String,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            stylesheet: STYLESHEET.to_owned(),
            page_template: PAGE_TEMPLATE.to_owned(),
            race_template: RACE_TEMPLATE.to_owned(),
        }
    }
}

/// Files that replace parts of the default [`Theme`]. `None` keeps the
/// embedded default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThemeFiles {
    pub stylesheet: Option<PathBuf>,
    pub page_template: Option<PathBuf>,
    pub race_template: Option<PathBuf>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_page_template_fields() {
        for field in [
            "{{.race_name}}",
            "{{.stylesheet}}",
            "{{range .nav}}",
            "{{.sections}}",
            "{{.footer.motto}}",
        ] {
            assert!(PAGE_TEMPLATE.contains(field), "missing {}", field);
        }
    }

    #[test]
    fn test_race_template_markers() {
        assert!(RACE_TEMPLATE.contains("{{STYLESHEET}}"));
        assert!(RACE_TEMPLATE.contains("<!-- START ALTITUDE SECTION"));
        assert!(RACE_TEMPLATE.contains("<!-- END ALTITUDE SECTION -->"));
        assert!(RACE_TEMPLATE.contains("{{ALTITUDE_POWER_LOSS}}"));
    }

    #[test]
    fn test_stylesheet_covers_highlight_rows() {
        assert!(STYLESHEET.contains(".g-spot-row"));
        assert!(STYLESHEET.contains(".sticky-nav a.active"));
    }
}
