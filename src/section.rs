//! Section layout for the structured guide: which sections appear, in which
//! order, under which nav label, and the HTML wrapper around each one.

use crate::chart::write_radar_svg;
use crate::content::{render_content, render_entry, Scope};
use crate::lookup::{format_content, get, list_at, text_or};
use serde_json::{Map, Value};
use std::fmt::{self, Write};

/// Known sections in page order, with their nav labels.
pub const SECTION_ORDER: [(&str, &str); 14] = [
    ("welcome", "Welcome"),
    ("structure", "Structure"),
    ("before_you_start", "Before"),
    ("how_training_works", "Training"),
    ("zones", "Zones"),
    ("execution", "Execution"),
    ("recovery", "Recovery"),
    ("strength", "Strength"),
    ("skills", "Skills"),
    ("fueling", "Fuel"),
    ("mental", "Mental"),
    ("race_tactics", "Race Day"),
    ("tires", "Tires"),
    ("glossary", "Glossary"),
];

/// Section keys that are rendered as one keyed block when they hold a list,
/// whatever the list contains.
const STRUCTURED_LIST_KEYS: [&str; 18] = [
    "cards",
    "non_negotiables",
    "safety_tips",
    "warnings",
    "health_advice",
    "skills_list",
    "terms",
    "key_workouts",
    "three_acts",
    "race_week",
    "phase_details",
    "zone_table",
    "weekly_structure",
    "quick_reference",
    "width_guide",
    "efficiency_tips",
    "tactical_principles",
    "race_morning",
];

/// Keys that describe the section rather than its content.
const HEADER_KEYS: [&str; 3] = ["number", "title", "id"];

/// Returns the sections to render: the known ones in [`SECTION_ORDER`], then
/// any others in input order.
pub fn ordered_sections(sections: &Map<String, Value>) -> Vec<(&str, &Value)> {
    let mut ordered: Vec<(&str, &Value)> = SECTION_ORDER
        .iter()
        .filter_map(|(key, _)| sections.get(*key).map(|value| (*key, value)))
        .collect();
    ordered.extend(
        sections
            .iter()
            .filter(|(key, _)| !SECTION_ORDER.iter().any(|(k, _)| *k == key.as_str()))
            .map(|(key, value)| (key.as_str(), value)),
    );
    ordered
}

/// The anchor id of a section: its `id`, or its key.
pub fn section_id(key: &str, section: &Value) -> String {
    text_or(section, &["id"], key)
}

/// The nav label of a section. Unknown sections use the last word of their
/// title, or their key in title case.
pub fn nav_label(key: &str, section: &Value) -> String {
    if let Some((_, label)) = SECTION_ORDER.iter().find(|(k, _)| *k == key) {
        return (*label).to_owned();
    }
    let title = text_or(section, &["title"], "");
    match title.split_whitespace().last() {
        Some(word) => word.to_owned(),
        None => title_case(key),
    }
}

fn title_case(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Renders one `<section>`: the comment banner, the numbered header and the
/// content. `radar` holds the scores drawn in the welcome section.
pub fn render_section(
    w: &mut dyn Write,
    key: &str,
    section: &Value,
    meta: &Value,
    radar: &Value,
) -> fmt::Result {
    let number = text_or(section, &["number"], "");
    let title = text_or(section, &["title"], "");
    write!(
        w,
        r#"<!-- SECTION {number}: {banner} -->
<section class="section" id="{id}">
    <div class="section-header">
        <span class="section-number">{number}</span>
        <h2>{title}</h2>
    </div>
    <div class="section-content">
"#,
        number = number,
        banner = title.to_uppercase(),
        id = section_id(key, section),
        title = title,
    )?;

    let welcome = key == "welcome" && get(section, &["intro_paragraphs"]).is_some();
    if welcome {
        w.write_str("        <div class=\"intro-box\">\n")?;
        for para in list_at(section, &["intro_paragraphs"]) {
            writeln!(w, "            <p>{}</p>", format_content(para))?;
        }
        w.write_str("        </div>\n")?;
        w.write_str("        <h3>Race Profile</h3>\n")?;
        w.write_str("        <div class=\"graphic-container\">\n")?;
        w.write_str("            <div class=\"graphic-title\">Course Demands</div>\n")?;
        write_radar_svg(w, radar)?;
        w.write_str("\n        </div>\n")?;
    }

    let scope = Scope::new(meta, Some(key));
    if let Value::Object(fields) = section {
        for (field, value) in fields {
            if HEADER_KEYS.contains(&field.as_str()) {
                continue;
            }
            if welcome && field == "intro_paragraphs" {
                continue;
            }
            render_field(w, field, value, &scope)?;
        }
    }

    w.write_str("    </div>\n</section>")
}

fn render_field(w: &mut dyn Write, field: &str, value: &Value, scope: &Scope) -> fmt::Result {
    match value {
        Value::Object(_) => render_content(w, value, scope),
        Value::Array(items) => {
            let structured = STRUCTURED_LIST_KEYS.contains(&field)
                || items.first().map_or(false, Value::is_object);
            match structured {
                true => render_entry(w, field, value, scope),
                false => {
                    for item in items {
                        render_content(w, item, scope)?;
                    }
                    Ok(())
                }
            }
        }
        Value::String(s) => writeln!(w, "        <p>{}</p>", s),
        _ => Ok(()),
    }
}
