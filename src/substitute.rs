//! `{{PLACEHOLDER}}` substitution and conditional section removal for the
//! race template.

use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// The placeholder dictionary: key without braces to replacement text.
pub type Substitutions = BTreeMap<String, String>;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").expect("placeholder pattern is valid")
});

static ALTITUDE_SECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<!-- START ALTITUDE SECTION[^>]*-->.*?<!-- END ALTITUDE SECTION -->")
        .expect("altitude section pattern is valid")
});

/// Replaces every `{{KEY}}` whose key is in `values`. Placeholders with no
/// entry are left as they are.
pub fn substitute(template: &str, values: &Substitutions) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| match values.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_owned(),
        })
        .into_owned()
}

/// Removes every block between `<!-- START ALTITUDE SECTION ... -->` and the
/// next `<!-- END ALTITUDE SECTION -->`, markers included.
pub fn strip_altitude_section(html: &str) -> String {
    ALTITUDE_SECTION.replace_all(html, "").into_owned()
}

#[cfg(test)]
mod test {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> Substitutions {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn test_substitute() {
        let html = substitute(
            "<h1>{{RACE_NAME}}</h1><p>{{DISTANCE}} miles, {{DISTANCE}} again</p>",
            &values(&[("RACE_NAME", "Unbound"), ("DISTANCE", "200")]),
        );
        assert_eq!("<h1>Unbound</h1><p>200 miles, 200 again</p>", html);
    }

    #[test]
    fn test_unknown_placeholder_kept() {
        let html = substitute(
            "{{KEY_WORKOUT_1_NAME}} {{ NOT_A_PLACEHOLDER }} {{plan_weeks}}",
            &values(&[("plan_weeks", "12")]),
        );
        assert_eq!("{{KEY_WORKOUT_1_NAME}} {{ NOT_A_PLACEHOLDER }} 12", html);
    }

    #[test]
    fn test_replacement_is_literal() {
        let html = substitute("{{A}}", &values(&[("A", "$1 {{B}}"), ("B", "no")]));
        assert_eq!("$1 {{B}}", html);
    }

    #[test]
    fn test_strip_altitude_section() {
        let html = "<p>before</p>
<!-- START ALTITUDE SECTION: only above 3000 ft -->
<h3>Altitude</h3>
<p>Thin air.</p>
<!-- END ALTITUDE SECTION -->
<p>middle</p>
<!-- START ALTITUDE SECTION -->x<!-- END ALTITUDE SECTION -->
<p>after</p>";
        assert_eq!(
            "<p>before</p>\n\n<p>middle</p>\n\n<p>after</p>",
            strip_altitude_section(html)
        );
        assert_eq!("<p>plain</p>", strip_altitude_section("<p>plain</p>"));
    }
}
