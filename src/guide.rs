//! Structured guides: a `meta`/`sections`/`footer` document rendered into the
//! page shell.

use crate::lookup::{get, text_or};
use crate::section::{nav_label, ordered_sections, render_section, section_id};
use crate::theme::Theme;
use crate::tier::{DEFAULT_LEVEL, DEFAULT_TIER};
use crate::write::{object, render_page, Result};
use gtmpl::Value as TemplateValue;
use serde_json::Value;
use tracing::debug;

/// Footer fields passed to the page template, in display order.
const FOOTER_FIELDS: [&str; 8] = [
    "tagline",
    "body",
    "emphasis_1",
    "middle",
    "confidence",
    "emphasis_2",
    "email",
    "motto",
];

/// Renders a structured guide. `tier` and `level` replace `meta.tier` and
/// `meta.level` when given.
pub fn render_guide(
    data: &Value,
    theme: &Theme,
    tier: Option<&str>,
    level: Option<&str>,
) -> Result<String> {
    let null = Value::Null;
    let meta = get(data, &["meta"]).unwrap_or(&null);
    let radar = get(data, &["radar_chart"]).unwrap_or(&null);
    let footer = get(data, &["footer"]).unwrap_or(&null);

    let race_name = text_or(meta, &["race_name"], "Race Name");
    let tier = match tier {
        Some(tier) => tier.to_owned(),
        None => text_or(meta, &["tier"], DEFAULT_TIER),
    };
    let level = match level {
        Some(level) => level.to_owned(),
        None => text_or(meta, &["level"], DEFAULT_LEVEL),
    };

    let sections = match get(data, &["sections"]) {
        Some(Value::Object(sections)) => ordered_sections(sections),
        _ => Vec::new(),
    };

    let mut nav = Vec::with_capacity(sections.len());
    let mut rendered = Vec::with_capacity(sections.len());
    for (key, section) in &sections {
        debug!("Rendering section {}", key);
        nav.push(object(vec![
            ("id", section_id(key, section)),
            ("label", nav_label(key, section)),
        ]));
        let mut html = String::new();
        render_section(&mut html, key, section, meta, radar)?;
        rendered.push(html);
    }

    let context = object(vec![
        ("race_name", TemplateValue::from(race_name)),
        ("tier", TemplateValue::from(tier)),
        ("level", TemplateValue::from(level)),
        (
            "location",
            TemplateValue::from(text_or(meta, &["race_location"], "")),
        ),
        ("stylesheet", TemplateValue::from(theme.stylesheet.clone())),
        ("nav", TemplateValue::Array(nav)),
        ("sections", TemplateValue::from(rendered.join("\n\n"))),
        (
            "footer",
            object(
                FOOTER_FIELDS
                    .iter()
                    .map(|field| (*field, text_or(footer, &[*field], ""))),
            ),
        ),
    ]);
    render_page(&theme.page_template, context)
}
