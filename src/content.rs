//! Maps the content objects of a guide section onto HTML fragments.
//!
//! Every recognised key has a handler in [`HANDLERS`]. Handlers run in table
//! order rather than input order, so a section always lays out its intro
//! before its tables and its callouts after them. Keys that no handler
//! recognises fall through to plain paragraphs.
//!
//! A few keys appear in the table twice. The first entry covers the general
//! form and the second covers the form used inside the race tactics section;
//! each entry checks the shape of the value (or the parent section) and stays
//! quiet when the value is not its form.

use crate::chart::phase_bars;
use crate::lookup::{content_at, format_content, get, text_or, truthy};
use serde_json::{Map, Value};
use std::fmt::{self, Write};

/// Where a piece of content is being rendered.
#[derive(Clone, Copy, Debug)]
pub struct Scope<'a> {
    /// The guide's `meta` object.
    pub meta: &'a Value,

    /// Key of the section that holds the content.
    pub parent: Option<&'a str>,
}

impl<'a> Scope<'a> {
    pub fn new(meta: &'a Value, parent: Option<&'a str>) -> Scope<'a> {
        Scope { meta, parent }
    }

    fn is_race_tactics(&self) -> bool {
        self.parent == Some("race_tactics")
    }
}

type Handler = fn(&mut dyn Write, &Scope, &Value) -> fmt::Result;

/// Recognised content keys, in rendering order.
const HANDLERS: &[(&str, Handler)] = &[
    ("intro_paragraphs", intro_paragraphs),
    ("intro", intro),
    ("cards", cards),
    ("phases", phases),
    ("phase_list", phase_list),
    ("weekly_structure", weekly_structure),
    ("warnings", warnings),
    ("health_advice", health_advice),
    ("safety_tips", safety_tips),
    ("non_negotiables", non_negotiables_checklist),
    ("equipment_mandatory", equipment_mandatory),
    ("ftp_testing", ftp_testing),
    ("adaptation_steps", adaptation_steps),
    ("where_it_goes_wrong", where_it_goes_wrong),
    ("practical_rules", practical_rules),
    ("phase_details", understanding_phases),
    ("point_of_zones", point_of_zones),
    ("measurement_systems", measurement_systems),
    ("zone_table", zone_table),
    ("g_spot_callout", g_spot_callout),
    ("common_mistake_callout", common_mistake_callout),
    ("critical_notes", critical_notes),
    ("bottom_line", bottom_line),
    ("execution_gap", execution_gap),
    ("universal_rules", universal_rules),
    ("zone_execution", zone_execution),
    ("indoor_vs_outdoor", indoor_vs_outdoor),
    ("modification_rules", modification_rules),
    ("protocol", recovery_protocol),
    ("hrv", hrv),
    ("performance_benefits", performance_benefits),
    ("injury_benefits", injury_benefits),
    ("policy", policy),
    ("what_to_actually_do", what_to_actually_do),
    ("important_callout", important_callout),
    ("skills_list", skills_list),
    ("practice_callout", practice_callout),
    ("race_specific_callout", race_specific_callout),
    ("quick_reference", quick_reference),
    ("hydration", hydration),
    ("gut_training", gut_training),
    ("solution_callout", solution_callout),
    ("reality_check", reality_check),
    ("breathing_627", breathing_627),
    ("performance_statements", performance_statements),
    ("highlight_reel", highlight_reel),
    ("race_day_checklist", race_day_checklist),
    ("three_acts", three_acts),
    ("phase_details", race_phase_details),
    ("tactical_principles", tactical_principles),
    ("key_question", key_question),
    ("efficiency_explanation", efficiency_explanation),
    ("efficiency_tips", efficiency_tips),
    ("race_specific_callout", race_specific_notes),
    ("aid_station", aid_station),
    ("non_negotiables", non_negotiables_table),
    ("weather", weather),
    ("race_week", race_week),
    ("race_morning", race_morning),
    ("race_week_bottom_line", race_week_bottom_line),
    ("counterintuitive_truth", counterintuitive_truth),
    ("why_wider_faster", why_wider_faster),
    ("weight_myth", weight_myth),
    ("factors_that_matter", factors_that_matter),
    ("what_doesnt_matter", what_doesnt_matter),
    ("width_guide", width_guide),
    ("race_recommendation", race_recommendation),
    ("pressure", pressure),
    ("tubeless", tubeless),
    ("dont_switch_race_week", dont_switch_race_week),
    ("goal_callout", goal_callout),
    ("terms", glossary_terms),
    ("key_workouts", key_workouts),
    ("support", support),
    ("recovery_weeks_callout", recovery_weeks_callout),
    ("compliance_note", compliance_note),
    ("recovery_truth", recovery_truth),
    ("math", math),
];

/// Reports whether some handler recognises `key`.
pub fn is_known(key: &str) -> bool {
    HANDLERS.iter().any(|(k, _)| *k == key)
}

/// Renders any content value: objects go through the handler table, lists
/// render item by item and strings become paragraphs.
pub fn render_content(w: &mut dyn Write, value: &Value, scope: &Scope) -> fmt::Result {
    match value {
        Value::Object(map) => render_object(w, map, scope),
        Value::Array(items) => {
            for item in items {
                render_content(w, item, scope)?;
            }
            Ok(())
        }
        Value::String(s) => p(w, s),
        _ => Ok(()),
    }
}

/// Renders a single keyed entry as though it were the only key of an object.
pub fn render_entry(w: &mut dyn Write, key: &str, value: &Value, scope: &Scope) -> fmt::Result {
    if value.is_null() {
        return Ok(());
    }
    if !is_known(key) {
        return remainder(w, value);
    }
    for (_, handler) in HANDLERS.iter().filter(|(k, _)| *k == key) {
        handler(w, scope, value)?;
    }
    Ok(())
}

fn render_object(w: &mut dyn Write, map: &Map<String, Value>, scope: &Scope) -> fmt::Result {
    for (key, handler) in HANDLERS {
        if let Some(value) = map.get(*key).filter(|v| !v.is_null()) {
            handler(w, scope, value)?;
        }
    }
    for (key, value) in map {
        if !is_known(key) {
            remainder(w, value)?;
        }
    }
    Ok(())
}

/// Unrecognised keys: non-blank strings and the string items of lists become
/// paragraphs; everything else is dropped.
fn remainder(w: &mut dyn Write, value: &Value) -> fmt::Result {
    match value {
        Value::String(s) if !s.trim().is_empty() => p(w, s),
        Value::Array(items) => {
            for item in items.iter().filter(|item| item.is_string()) {
                p(w, &format_content(item))?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

// Fragment builders.

fn items(value: &Value) -> &[Value] {
    value.as_array().map(Vec::as_slice).unwrap_or_default()
}

fn field(value: &Value, key: &str) -> String {
    content_at(value, &[key])
}

fn h3(w: &mut dyn Write, title: &str) -> fmt::Result {
    writeln!(w, "        <h3>{}</h3>", title)
}

fn h4(w: &mut dyn Write, title: &str) -> fmt::Result {
    writeln!(w, "        <h4>{}</h4>", title)
}

fn p(w: &mut dyn Write, body: &str) -> fmt::Result {
    writeln!(w, "        <p>{}</p>", body)
}

fn paragraphs(w: &mut dyn Write, value: &Value) -> fmt::Result {
    for item in items(value) {
        p(w, &format_content(item))?;
    }
    Ok(())
}

fn labelled(w: &mut dyn Write, label: &str, body: &str) -> fmt::Result {
    writeln!(w, "        <p><strong>{}:</strong> {}</p>", label, body)
}

/// A labelled paragraph that is only written when `key` is present.
fn labelled_field(w: &mut dyn Write, value: &Value, key: &str, label: &str) -> fmt::Result {
    match get(value, &[key]) {
        Some(v) => labelled(w, label, &format_content(v)),
        None => Ok(()),
    }
}

fn emphasis(w: &mut dyn Write, body: &str) -> fmt::Result {
    writeln!(w, "        <p><strong>{}</strong></p>", body)
}

fn list_with(w: &mut dyn Write, tag: &str, class: Option<&str>, value: &Value) -> fmt::Result {
    match class {
        Some(class) => writeln!(w, r#"        <{} class="{}">"#, tag, class)?,
        None => writeln!(w, "        <{}>", tag)?,
    }
    for item in items(value) {
        writeln!(w, "            <li>{}</li>", format_content(item))?;
    }
    writeln!(w, "        </{}>", tag)
}

fn list(w: &mut dyn Write, value: &Value) -> fmt::Result {
    list_with(w, "ul", None, value)
}

fn checklist(w: &mut dyn Write, value: &Value) -> fmt::Result {
    list_with(w, "ul", Some("checklist"), value)
}

/// An `<h4>` followed by the list at `key`, written only when `key` is
/// present.
fn headed_list(w: &mut dyn Write, value: &Value, key: &str, heading: &str) -> fmt::Result {
    match get(value, &[key]) {
        Some(v) => {
            h4(w, heading)?;
            list(w, v)
        }
        None => Ok(()),
    }
}

/// An `<h4>` and a paragraph for each item of a list of objects.
fn headed_items(w: &mut dyn Write, value: &Value, head: &str, body: &str) -> fmt::Result {
    for item in items(value) {
        h4(w, &field(item, head))?;
        p(w, &field(item, body))?;
    }
    Ok(())
}

fn callout(w: &mut dyn Write, kind: &str, title: &str, body: &str) -> fmt::Result {
    write!(
        w,
        r#"        <div class="callout callout-{}">
            <div class="callout-title">{}</div>
            <p>{}</p>
        </div>
"#,
        kind, title, body
    )
}

/// A callout built from an object with `title` and `content`.
fn titled_callout(w: &mut dyn Write, kind: &str, value: &Value) -> fmt::Result {
    callout(w, kind, &field(value, "title"), &field(value, "content"))
}

fn row_class(row: &Value) -> &'static str {
    match get(row, &["highlight"]).map_or(false, truthy) {
        true => r#" class="g-spot-row""#,
        false => "",
    }
}

struct Table {
    headers: &'static [&'static str],
    columns: &'static [&'static str],
    bold_first: bool,
    highlight: bool,
}

fn table(w: &mut dyn Write, layout: &Table, rows: &Value) -> fmt::Result {
    w.write_str("        <div class=\"table-wrapper\">\n")?;
    w.write_str("            <table>\n")?;
    w.write_str("                <thead>\n")?;
    w.write_str("                    <tr>")?;
    for header in layout.headers {
        write!(w, "<th>{}</th>", header)?;
    }
    w.write_str("</tr>\n")?;
    w.write_str("                </thead>\n")?;
    w.write_str("                <tbody>\n")?;
    for row in items(rows) {
        let class = match layout.highlight {
            true => row_class(row),
            false => "",
        };
        writeln!(w, "                    <tr{}>", class)?;
        for (i, column) in layout.columns.iter().enumerate() {
            let cell = field(row, column);
            match layout.bold_first && i == 0 {
                true => writeln!(w, "                        <td><strong>{}</strong></td>", cell)?,
                false => writeln!(w, "                        <td>{}</td>", cell)?,
            }
        }
        w.write_str("                    </tr>\n")?;
    }
    w.write_str("                </tbody>\n")?;
    w.write_str("            </table>\n")?;
    w.write_str("        </div>\n")
}

fn first_is_object(value: &Value) -> bool {
    items(value).first().map_or(false, Value::is_object)
}

// Handlers, in table order.

fn intro_paragraphs(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    w.write_str("        <div class=\"intro-box\">\n")?;
    for para in items(value) {
        writeln!(w, "            <p>{}</p>", format_content(para))?;
    }
    w.write_str("        </div>\n")
}

fn intro(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    match value {
        Value::Array(_) => paragraphs(w, value),
        v => p(w, &format_content(v)),
    }
}

fn cards(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    w.write_str("        <div class=\"card-grid\">\n")?;
    for card in items(value) {
        write!(
            w,
            r#"            <div class="card">
                <h4>{}</h4>
                <p>{}</p>
            </div>
"#,
            field(card, "title"),
            field(card, "content"),
        )?;
    }
    w.write_str("        </div>\n")
}

fn phases(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    w.write_str("        <div class=\"graphic-container\">\n")?;
    w.write_str("            <div class=\"graphic-title\">Training Phases</div>\n")?;
    w.write_str("            <svg viewBox=\"0 0 600 120\" width=\"600\" height=\"120\">\n")?;
    w.write_str(
        "                <rect x=\"0\" y=\"0\" width=\"600\" height=\"120\" fill=\"white\"/>\n",
    )?;
    w.write_str(&phase_bars(items(value)))?;
    w.write_str("\n            </svg>\n")?;
    w.write_str("        </div>\n")
}

fn phase_list(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    w.write_str("        <div class=\"phase-list\">\n")?;
    for phase in items(value) {
        let name = text_or(phase, &["name"], "");
        let class = match name.as_str() {
            "Base Phase" => "phase-base",
            "Build Phase" => "phase-build",
            "Peak Phase" => "phase-peak",
            "Taper Phase" => "phase-taper",
            _ => "phase-item",
        };
        write!(
            w,
            r#"            <div class="phase-item {}">
                <span class="phase-weeks">{}</span>
                <span class="phase-name">{}</span>
                <span class="phase-desc">{}</span>
            </div>
"#,
            class,
            field(phase, "weeks"),
            name.to_uppercase(),
            field(phase, "description"),
        )?;
    }
    w.write_str("        </div>\n")
}

fn weekly_structure(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    h3(w, "Weekly Structure")?;
    table(
        w,
        &Table {
            headers: &["Day", "Session", "Duration"],
            columns: &["day", "session", "duration"],
            bold_first: true,
            highlight: true,
        },
        value,
    )
}

fn warnings(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    for warning in items(value) {
        titled_callout(w, &text_or(warning, &["type"], "danger"), warning)?;
    }
    Ok(())
}

fn health_advice(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    h3(w, "Health & Safety Check")?;
    paragraphs(w, value)
}

fn safety_tips(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    h3(w, "Safety Guidelines")?;
    checklist(w, value)
}

fn non_negotiables_checklist(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    if first_is_object(value) {
        return Ok(());
    }
    h3(w, "What You Need to Succeed")?;
    h4(w, "Non-Negotiables:")?;
    checklist(w, value)
}

fn equipment_mandatory(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    h3(w, "Equipment Requirements")?;
    emphasis(w, "Mandatory:")?;
    w.write_str("        <ul>\n")?;
    for item in items(value) {
        writeln!(
            w,
            "            <li><strong>{}</strong> &mdash; {}</li>",
            field(item, "item"),
            field(item, "reason"),
        )?;
    }
    w.write_str("        </ul>\n")
}

fn ftp_testing(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    h3(w, "FTP Testing")?;
    headed_list(w, value, "when_to_test", "When to test:")?;
    if let Some(protocol) = get(value, &["twenty_min_protocol"]) {
        h4(w, "How to test (20-Minute Test):")?;
        list_with(w, "ol", None, protocol)?;
    }
    labelled_field(w, value, "formula", "Formula")?;
    match get(value, &["execute_callout"]) {
        Some(execute) => titled_callout(w, "info", execute),
        None => Ok(()),
    }
}

fn adaptation_steps(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    h3(w, "The Foundational Model: How Adaptation Works")?;
    for (i, step) in items(value).iter().enumerate() {
        h4(w, &format!("Step {}: {}", i + 1, field(step, "name")))?;
        p(w, &field(step, "description"))?;
    }
    Ok(())
}

fn where_it_goes_wrong(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    h3(w, "Where It Goes Wrong")?;
    for item in items(value) {
        titled_callout(w, &text_or(item, &["type"], "warning"), item)?;
    }
    Ok(())
}

fn practical_rules(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    h3(w, "The Practical Rules")?;
    list(w, value)
}

fn understanding_phases(w: &mut dyn Write, scope: &Scope, value: &Value) -> fmt::Result {
    if scope.is_race_tactics() {
        return Ok(());
    }
    h3(w, "Understanding the Phases")?;
    for phase in items(value) {
        h4(w, &field(phase, "phase"))?;
        labelled_field(w, phase, "goal", "Goal")?;
        labelled_field(w, phase, "what_youre_doing", "What you're doing")?;
        labelled_field(w, phase, "why", "Why")?;
        labelled_field(w, phase, "how_it_feels", "How it feels")?;
        if let Some(content) = get(phase, &["content"]) {
            p(w, &format_content(content))?;
        }
    }
    Ok(())
}

fn point_of_zones(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    h3(w, "The Point of Zones")?;
    paragraphs(w, value)
}

fn measurement_systems(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    h3(w, "The Three Measurement Systems")?;
    headed_items(w, value, "name", "description")
}

fn zone_table(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    h3(w, "The Zone Chart")?;
    table(
        w,
        &Table {
            headers: &["Zone", "Name", "% FTP", "% HRmax", "RPE", "Feel"],
            columns: &["zone", "name", "ftp", "hrmax", "rpe", "feel"],
            bold_first: true,
            highlight: true,
        },
        value,
    )
}

fn g_spot_callout(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    titled_callout(w, "info", value)
}

fn common_mistake_callout(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    titled_callout(w, "warning", value)
}

fn critical_notes(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    h3(w, "Critical Notes on Using Zones")?;
    list(w, value)
}

fn bottom_line(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    labelled(w, "The Bottom Line", &format_content(value))
}

fn execution_gap(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    h3(w, "The Execution Gap")?;
    labelled(w, "The plan says", &field(value, "plan_says"))?;
    emphasis(w, "What actually happens:")?;
    list(w, get(value, &["what_happens"]).unwrap_or(&Value::Null))?;
    labelled(w, "Result", &field(value, "result"))
}

fn universal_rules(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    h3(w, "Universal Execution Rules")?;
    headed_items(w, value, "rule", "details")
}

fn zone_execution(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    h3(w, "Zone-Specific Execution")?;
    for zone in items(value) {
        h4(w, &field(zone, "zone"))?;
        labelled(w, "Target", &field(zone, "target"))?;
        if let Some(how_to) = get(zone, &["how_to"]) {
            emphasis(w, "How to:")?;
            list(w, how_to)?;
        }
        labelled_field(w, zone, "mistakes", "Common mistakes")?;
        labelled_field(w, zone, "fix", "Fix")?;
    }
    Ok(())
}

fn indoor_vs_outdoor(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    h3(w, "Indoor vs Outdoor Workouts")?;
    h4(w, "Best done indoors:")?;
    list(w, get(value, &["indoor"]).unwrap_or(&Value::Null))?;
    h4(w, "Best done outdoors:")?;
    list(w, get(value, &["outdoor"]).unwrap_or(&Value::Null))?;
    labelled_field(w, value, "balance", "Balance")
}

fn modification_rules(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    h3(w, "When and How to Modify Workouts")?;
    headed_list(w, value, "when_appropriate", "When modification is appropriate:")?;
    headed_list(w, value, "how_to_modify", "How to modify:")?;
    match get(value, &["missed_workouts_rule"]) {
        Some(rule) => emphasis(w, &format_content(rule)),
        None => Ok(()),
    }
}

fn recovery_protocol(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    h3(w, "Recovery Protocol")?;
    for step in items(value) {
        h4(w, &field(step, "timing"))?;
        list(w, get(step, &["actions"]).unwrap_or(&Value::Null))?;
    }
    Ok(())
}

fn hrv(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    h3(w, "HRV: What It Is, What It Isn't, and How to Use It")?;
    if let Some(measures) = get(value, &["what_it_measures"]) {
        p(w, &format_content(measures))?;
    }
    headed_list(w, value, "good_for", "What HRV Is Good For")?;
    headed_list(w, value, "not_good_for", "What HRV Is NOT Good For")?;
    headed_list(w, value, "how_to_use", "How to Actually Use HRV")?;
    labelled_field(w, value, "apps", "Recommended apps")
}

fn performance_benefits(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    h3(w, "The Performance Benefits")?;
    list(w, value)
}

fn injury_benefits(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    h3(w, "The Injury Prevention Benefits")?;
    list(w, value)
}

fn policy(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    h3(w, "Here's My Policy")?;
    labelled_field(w, value, "mobility", "Mobility and stability work")?;
    labelled_field(w, value, "full_strength", "Full periodized strength training")
}

fn what_to_actually_do(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    h3(w, "What To Actually Do")?;
    if let Some(with_habit) = get(value, &["with_habit"]) {
        h4(w, &field(with_habit, "title"))?;
        paragraphs(w, get(with_habit, &["content"]).unwrap_or(&Value::Null))?;
    }
    if let Some(without_habit) = get(value, &["without_habit"]) {
        h4(w, &field(without_habit, "title"))?;
        if let Some(intro) = get(without_habit, &["intro"]) {
            p(w, &format_content(intro))?;
        }
        list(w, get(without_habit, &["items"]).unwrap_or(&Value::Null))?;
    }
    if let Some(bottom_line) = get(value, &["bottom_line"]) {
        h4(w, "The Bottom Line")?;
        paragraphs(w, bottom_line)?;
    }
    Ok(())
}

fn important_callout(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    callout(w, "warning", "Important", &format_content(value))
}

fn skills_list(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    w.write_str("        <div class=\"skills-grid\">\n")?;
    for (i, skill) in items(value).iter().enumerate() {
        write!(
            w,
            r#"            <div class="skill-item">
                <h4>Skill {}: {}</h4>
                <p><strong>Why:</strong> {}</p>
                <p><strong>Technique:</strong> {}</p>
                <p><strong>Practice:</strong> {}</p>
                <p><strong>Cue:</strong> {}</p>
            </div>
"#,
            i + 1,
            field(skill, "name"),
            field(skill, "why"),
            field(skill, "technique"),
            field(skill, "practice"),
            field(skill, "cue"),
        )?;
    }
    w.write_str("        </div>\n")
}

fn practice_callout(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    titled_callout(w, "success", value)
}

fn race_specific_callout(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    match value {
        Value::Object(_) => titled_callout(w, "info", value),
        _ => Ok(()),
    }
}

fn quick_reference(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    h3(w, "Quick Reference: Fueling Guidelines")?;
    table(
        w,
        &Table {
            headers: &["Scenario", "Carbs", "Fluids", "Notes"],
            columns: &["scenario", "carbs", "fluids", "notes"],
            bold_first: true,
            highlight: true,
        },
        value,
    )
}

fn hydration(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    h3(w, "Understanding Hydration")?;
    for key in ["baseline", "sodium", "salty_sweater"] {
        if let Some(text) = get(value, &[key]) {
            p(w, &format_content(text))?;
        }
    }
    match get(value, &["verify_callout"]) {
        Some(verify) => titled_callout(w, "info", verify),
        None => Ok(()),
    }
}

fn gut_training(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    h3(w, "Training Your Gut")?;
    if let Some(intro) = get(value, &["intro"]) {
        p(w, &format_content(intro))?;
    }
    headed_list(w, value, "progression", "Progression:")?;
    labelled_field(w, value, "tip", "Tip")
}

fn solution_callout(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    titled_callout(w, "success", value)
}

fn reality_check(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    labelled(w, "Reality check", &format_content(value))
}

fn breathing_627(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    h3(w, "The 6-2-7 Breathing Technique")?;
    labelled(w, "Pattern", &field(value, "pattern"))?;
    labelled(w, "Key", &field(value, "key"))?;
    h4(w, "When to use:")?;
    list(w, get(value, &["when_to_use"]).unwrap_or(&Value::Null))?;
    labelled(w, "Practice", &field(value, "practice"))
}

fn performance_statements(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    h3(w, "Performance Statements")?;
    if let Some(intro) = get(value, &["intro"]) {
        p(w, &format_content(intro))?;
    }
    headed_list(w, value, "types", "Three types:")?;
    match get(value, &["callout"]) {
        Some(callout) => emphasis(w, &format_content(callout)),
        None => Ok(()),
    }
}

fn highlight_reel(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    h3(w, "Personal Highlight Reel")?;
    if let Some(intro) = get(value, &["intro"]) {
        p(w, &format_content(intro))?;
    }
    headed_list(w, value, "scenes", "Build your reel with these scenes:")?;
    headed_list(w, value, "when_to_use", "When to use:")
}

fn race_day_checklist(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    h3(w, "Race Day Mental Checklist")?;
    checklist(w, value)
}

fn three_acts(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    h3(w, "The Three-Act Structure")?;
    p(w, "Every long gravel race follows a predictable three-act structure.")?;
    table(
        w,
        &Table {
            headers: &["Phase", "When", "What's Happening", "Your Job"],
            columns: &["name", "when", "whats_happening", "your_job"],
            bold_first: true,
            highlight: true,
        },
        value,
    )
}

fn race_phase_details(w: &mut dyn Write, scope: &Scope, value: &Value) -> fmt::Result {
    if !scope.is_race_tactics() {
        return Ok(());
    }
    h3(w, "Phase Details")?;
    headed_items(w, value, "phase", "content")
}

fn tactical_principles(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    h3(w, "Tactical Principles")?;
    headed_items(w, value, "name", "content")
}

fn key_question(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    h4(w, "Be Efficient")?;
    p(w, "Keep asking yourself this question:")?;
    write!(
        w,
        r#"        <div class="callout callout-success">
            <div class="callout-title">The Key Question</div>
            <p style="font-size: 1.2rem; font-weight: 700;">"{}"</p>
        </div>
"#,
        format_content(value)
    )
}

fn efficiency_explanation(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    p(w, &format_content(value))
}

fn efficiency_tips(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    headed_items(w, value, "name", "content")
}

fn race_specific_notes(w: &mut dyn Write, scope: &Scope, value: &Value) -> fmt::Result {
    match value {
        Value::Object(_) => Ok(()),
        _ if !scope.is_race_tactics() => Ok(()),
        v => callout(w, "info", "Race-Specific Notes", &format_content(v)),
    }
}

fn aid_station(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    labelled(w, "Aid Station Strategy", &format_content(value))
}

fn non_negotiables_table(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    if !first_is_object(value) {
        return Ok(());
    }
    h3(w, "The Non-Negotiables")?;
    p(
        w,
        "These are the requirements that determine whether you finish strong, finish barely, or don't finish at all.",
    )?;
    table(
        w,
        &Table {
            headers: &["Requirement", "By When", "Why It Matters"],
            columns: &["requirement", "by_when", "why"],
            bold_first: false,
            highlight: false,
        },
        value,
    )
}

fn weather(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    h3(w, "Weather Strategy")?;
    p(w, &format_content(value))
}

fn race_week(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    h3(w, "The 7-Day Countdown")?;
    table(
        w,
        &Table {
            headers: &["Day", "Training", "Focus"],
            columns: &["day", "training", "focus"],
            bold_first: true,
            highlight: false,
        },
        value,
    )
}

fn race_morning(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    h3(w, "Race Morning Timeline")?;
    checklist(w, value)
}

fn race_week_bottom_line(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    titled_callout(w, "info", value)
}

fn counterintuitive_truth(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    h3(w, &field(value, "headline"))?;
    p(w, &field(value, "content"))?;
    labelled_field(w, value, "prediction", "Prediction")
}

fn why_wider_faster(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    h3(w, "Why Wider Tires Are Faster on Gravel")?;
    headed_items(w, value, "reason", "explanation")
}

fn weight_myth(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    h3(w, &field(value, "title"))?;
    p(w, &field(value, "content"))
}

fn factors_that_matter(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    h3(w, "The Factors That Actually Matter")?;
    headed_items(w, value, "factor", "explanation")
}

fn what_doesnt_matter(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    h3(w, "What Doesn't Matter (Much)")?;
    list(w, value)
}

fn width_guide(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    h3(w, "Width Selection Guide")?;
    table(
        w,
        &Table {
            headers: &["Width", "Best For", "Pros", "Cons"],
            columns: &["width", "best_for", "pros", "cons"],
            bold_first: true,
            highlight: true,
        },
        value,
    )
}

fn race_recommendation(w: &mut dyn Write, scope: &Scope, value: &Value) -> fmt::Result {
    labelled(
        w,
        &format!("For {}", text_or(scope.meta, &["race_name"], "this race")),
        &format_content(value),
    )
}

fn pressure(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    h3(w, "Pressure Guidelines")?;
    if let Some(guidelines) = get(value, &["guidelines"]) {
        list(w, guidelines)?;
    }
    match get(value, &["advice"]) {
        Some(advice) => p(w, &format_content(advice)),
        None => Ok(()),
    }
}

fn tubeless(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    h3(w, "Tubeless vs Tubes")?;
    labelled(w, "Pros", &field(value, "pros"))?;
    labelled(w, "Cons", &field(value, "cons"))?;
    labelled(w, "Verdict", &field(value, "verdict"))
}

fn dont_switch_race_week(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    callout(w, "warning", "Important", &format_content(value))
}

fn goal_callout(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    titled_callout(w, "info", value)
}

fn glossary_terms(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    w.write_str("        <div class=\"glossary-list\">\n")?;
    for term in items(value) {
        write!(
            w,
            r#"            <div class="glossary-item">
                <div class="glossary-term">{}</div>
                <div class="glossary-def">{}</div>
            </div>
"#,
            field(term, "term"),
            field(term, "definition"),
        )?;
    }
    w.write_str("        </div>\n")
}

fn key_workouts(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    h3(w, "Key Workouts in This Plan")?;
    w.write_str("        <div class=\"card-grid\">\n")?;
    for workout in items(value) {
        write!(
            w,
            r#"            <div class="card"{}>
                <h4>{}</h4>
                <p>{}</p>
            </div>
"#,
            row_class(workout),
            field(workout, "name"),
            field(workout, "purpose"),
        )?;
    }
    w.write_str("        </div>\n")
}

fn support(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    h3(w, "Support & Resources")?;
    if let Some(info) = get(value, &["race_info"]) {
        let url = field(info, "url");
        writeln!(
            w,
            r#"        <p><strong>{}</strong> <a href="{}">{}</a></p>"#,
            field(info, "text"),
            url,
            url,
        )?;
    }
    if let Some(questions) = get(value, &["questions"]) {
        let email = field(questions, "email");
        writeln!(
            w,
            r#"        <p><strong>{}</strong> <a href="mailto:{}">{}</a></p>"#,
            field(questions, "text"),
            email,
            email,
        )?;
    }
    Ok(())
}

fn recovery_weeks_callout(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    titled_callout(w, "info", value)
}

fn compliance_note(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    w.write_str("        <div class=\"callout callout-info\">\n")?;
    writeln!(
        w,
        "            <div class=\"callout-title\">{}</div>",
        field(value, "title")
    )?;
    for para in items(get(value, &["paragraphs"]).unwrap_or(&Value::Null)) {
        writeln!(w, "            <p>{}</p>", format_content(para))?;
    }
    w.write_str("        </div>\n")
}

fn recovery_truth(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    emphasis(w, &format_content(value))
}

fn math(w: &mut dyn Write, _: &Scope, value: &Value) -> fmt::Result {
    p(w, &format_content(value))
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn render(value: Value, parent: Option<&str>) -> String {
        let meta = json!({"race_name": "Unbound 200"});
        let mut html = String::new();
        render_content(&mut html, &value, &Scope::new(&meta, parent)).unwrap();
        html
    }

    #[test]
    fn test_unknown_keys_become_paragraphs() {
        let html = render(
            json!({
                "lede": "First words.",
                "blank": "   ",
                "extra": ["one", {"ignored": true}, "two"],
                "count": 3,
            }),
            None,
        );
        assert_eq!(
            "        <p>First words.</p>\n        <p>one</p>\n        <p>two</p>\n",
            html
        );
    }

    #[test]
    fn test_handlers_run_in_table_order() {
        let html = render(
            json!({"bottom_line": "Ride.", "intro": "Hello."}),
            None,
        );
        let intro = html.find("Hello.").unwrap();
        let bottom = html.find("The Bottom Line").unwrap();
        assert!(intro < bottom);
    }

    #[test]
    fn test_highlighted_rows() {
        let html = render(
            json!({"zone_table": [
                {"zone": "Z3", "name": "Tempo", "ftp": "76-87%"},
                {"zone": "G", "name": "G Spot", "ftp": "88-92%", "highlight": true},
            ]}),
            None,
        );
        assert!(html.contains("<h3>The Zone Chart</h3>"));
        assert!(html.contains("                    <tr>\n                        <td><strong>Z3</strong></td>"));
        assert!(html.contains(
            "                    <tr class=\"g-spot-row\">\n                        <td><strong>G</strong></td>"
        ));
        // missing columns render empty
        assert!(html.contains("                        <td></td>\n"));
    }

    #[test]
    fn test_non_negotiables_forms() {
        let checklist = render(json!({"non_negotiables": ["Power meter", "Bike fit"]}), None);
        assert!(checklist.contains("<h4>Non-Negotiables:</h4>"));
        assert!(checklist.contains("        <ul class=\"checklist\">\n            <li>Power meter</li>"));
        assert!(!checklist.contains("<table>"));

        let table = render(
            json!({"non_negotiables": [
                {"requirement": "Power meter", "by_when": "Week 1", "why": "Pacing"},
            ]}),
            Some("race_tactics"),
        );
        assert!(table.contains("<h3>The Non-Negotiables</h3>"));
        assert!(table.contains("                        <td>Power meter</td>"));
        assert!(!table.contains("checklist"));
    }

    #[test]
    fn test_phase_details_depend_on_parent() {
        let phases = json!({"phase_details": [{"phase": "Act I", "content": "Stay calm."}]});
        let tactics = render(phases.clone(), Some("race_tactics"));
        assert!(tactics.contains("<h3>Phase Details</h3>"));
        assert!(!tactics.contains("Understanding the Phases"));

        let structure = render(phases, Some("structure"));
        assert!(structure.contains("<h3>Understanding the Phases</h3>"));
        assert!(!structure.contains("Phase Details"));
    }

    #[test]
    fn test_race_specific_callout_forms() {
        let notes = render(
            json!({"race_specific_callout": "Mud after mile 40."}),
            Some("race_tactics"),
        );
        assert!(notes.contains("<div class=\"callout-title\">Race-Specific Notes</div>"));
        assert!(notes.contains("<p>Mud after mile 40.</p>"));

        let titled = render(
            json!({"race_specific_callout": {"title": "Flint Hills", "content": "Sharp rock."}}),
            Some("skills"),
        );
        assert!(titled.contains("<div class=\"callout-title\">Flint Hills</div>"));
        assert!(!titled.contains("Race-Specific Notes"));
    }

    #[test]
    fn test_race_specific_notes_only_in_race_tactics() {
        let html = render(json!({"race_specific_callout": "Mud."}), Some("skills"));
        assert!(!html.contains("Race-Specific Notes"));
        assert!(!html.contains("Mud."));
    }

    #[test]
    fn test_callout() {
        let html = render(
            json!({"warnings": [{"title": "Stop", "content": ["a", "b"]}]}),
            None,
        );
        assert_eq!(
            "        <div class=\"callout callout-danger\">\n            <div class=\"callout-title\">Stop</div>\n            <p>a\nb</p>\n        </div>\n",
            html
        );
    }

    #[test]
    fn test_race_recommendation_uses_meta() {
        let html = render(json!({"race_recommendation": "Run 45mm."}), None);
        assert_eq!(
            "        <p><strong>For Unbound 200:</strong> Run 45mm.</p>\n",
            html
        );
    }

    #[test]
    fn test_render_entry() {
        let meta = json!({});
        let scope = Scope::new(&meta, Some("skills"));
        let mut html = String::new();
        render_entry(
            &mut html,
            "skills_list",
            &json!([{"name": "Cornering", "why": "Speed"}]),
            &scope,
        )
        .unwrap();
        assert!(html.contains("<h4>Skill 1: Cornering</h4>"));
        assert!(html.contains("<p><strong>Cue:</strong> </p>"));

        let mut html = String::new();
        render_entry(&mut html, "notes", &json!(["a", "b"]), &scope).unwrap();
        assert_eq!("        <p>a</p>\n        <p>b</p>\n", html);
    }

    #[test]
    fn test_lists_and_strings() {
        assert_eq!(
            "        <p>one</p>\n        <p>two</p>\n",
            render(json!(["one", "two"]), None)
        );
        assert_eq!("", render(json!(42), None));
    }

    #[test]
    fn test_phases_graphic() {
        let html = render(
            json!({"phases": [{"name": "BASE", "weeks": "1-4", "color": "#4ecdc4"}]}),
            None,
        );
        assert!(html.contains("<div class=\"graphic-title\">Training Phases</div>"));
        assert!(html.contains("Weeks 1-4"));
        assert!(html.ends_with("            </svg>\n        </div>\n"));
    }
}
