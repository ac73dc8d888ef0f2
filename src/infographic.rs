//! HTML tables and diagrams generated from a race profile for the race
//! template's `INFOGRAPHIC_*` placeholders.

use crate::chart::phase_bars;
use crate::lookup::{as_f64, as_int, first_truthy, get, list_at, text, text_or, thousands};
use serde_json::Value;
use std::fmt::{self, Write};

/// Distance assumed when a race does not give one.
const DEFAULT_DISTANCE: f64 = 200.0;

/// Average speed used to estimate race duration, in miles per hour.
const ESTIMATED_SPEED_MPH: f64 = 15.0;

/// Runs a writer against a fresh string.
fn render(f: impl FnOnce(&mut String) -> fmt::Result) -> String {
    let mut html = String::new();
    f(&mut html).map(|()| html).unwrap_or_default()
}

/// Writes a table whose first column is bold. Every line is prefixed with
/// `indent` and nested two spaces per level.
fn table<R, S>(
    w: &mut String,
    indent: &str,
    class: &str,
    headers: &[&str],
    rows: &[R],
) -> fmt::Result
where
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    writeln!(w, r#"{}<table class="{}">"#, indent, class)?;
    writeln!(w, "{}  <thead>", indent)?;
    writeln!(w, "{}    <tr>", indent)?;
    for header in headers {
        writeln!(w, "{}      <th>{}</th>", indent, header)?;
    }
    writeln!(w, "{}    </tr>", indent)?;
    writeln!(w, "{}  </thead>", indent)?;
    writeln!(w, "{}  <tbody>", indent)?;
    for row in rows {
        writeln!(w, "{}    <tr>", indent)?;
        for (i, cell) in row.as_ref().iter().enumerate() {
            match i {
                0 => writeln!(w, "{}      <td><strong>{}</strong></td>", indent, cell.as_ref())?,
                _ => writeln!(w, "{}      <td>{}</td>", indent, cell.as_ref())?,
            }
        }
        writeln!(w, "{}    </tr>", indent)?;
    }
    writeln!(w, "{}  </tbody>", indent)?;
    write!(w, "{}</table>", indent)
}

fn distance(race: &Value) -> f64 {
    get(race, &["distance_miles"])
        .and_then(as_f64)
        .unwrap_or(DEFAULT_DISTANCE)
}

fn distance_text(race: &Value) -> String {
    get(race, &["distance_miles"])
        .map(text)
        .unwrap_or_else(|| String::from("200"))
}

fn estimated_hours(race: &Value) -> f64 {
    distance(race) / ESTIMATED_SPEED_MPH
}

/// A 1-5 rating: the first threshold that `value` reaches, counting down
/// from 5.
fn rate(value: f64, thresholds: [f64; 4]) -> i64 {
    thresholds
        .iter()
        .position(|threshold| value >= *threshold)
        .map_or(1, |i| 5 - i as i64)
}

/// Six 1-5 ratings derived from the race profile, in display order.
pub fn ratings(race: &Value) -> [(&'static str, i64); 6] {
    let number = |key: &str| get(race, &[key]).and_then(as_f64).unwrap_or(0.0);
    let dist = rate(distance(race), [200.0, 150.0, 100.0, 50.0]);
    let elev = rate(number("elevation_gain_feet"), [15000.0, 10000.0, 5000.0, 2000.0]);
    let tech = match text_or(race, &["terrain"], "rolling").as_str() {
        "mountain" => 5,
        "flint_hills" => 4,
        "flat" => 2,
        _ => 3,
    };
    let climate = 3;
    let alt = rate(number("altitude_feet"), [8000.0, 5000.0, 3000.0, 1000.0]);
    let adventure = ((dist + elev + tech) / 3).clamp(1, 5);
    [
        ("Elevation", elev),
        ("Length", dist),
        ("Technicality", tech),
        ("Climate", climate),
        ("Altitude", alt),
        ("Adventure", adventure),
    ]
}

/// The difficulty ratings as a table with bar visuals.
pub fn rating_hex(race: &Value) -> String {
    render(|w| {
        w.push_str("<div class=\"rating-hex\">\n");
        w.push_str("  <table class=\"rating-table\">\n");
        w.push_str("    <thead>\n      <tr>\n");
        for header in ["Dimension", "Rating (1-5)", "Visual"] {
            writeln!(w, "        <th>{}</th>", header)?;
        }
        w.push_str("      </tr>\n    </thead>\n    <tbody>\n");
        for (name, rating) in ratings(race) {
            let filled = rating.clamp(0, 5) as usize;
            writeln!(w, "      <tr>")?;
            writeln!(w, "        <td><strong>{}</strong></td>", name)?;
            writeln!(w, "        <td>{}/5</td>", rating)?;
            writeln!(
                w,
                r#"        <td class="rating-bars">{}{}</td>"#,
                "█".repeat(filled),
                "░".repeat(5 - filled)
            )?;
            writeln!(w, "      </tr>")?;
        }
        w.push_str("    </tbody>\n  </table>\n</div>");
        Ok(())
    })
}

/// Distance, climbing, technicality and cutoff at a glance.
pub fn difficulty_table(race: &Value) -> String {
    let distance = first_truthy([
        get(race, &["distance_miles"]),
        get(race, &["race_metadata", "distance_miles"]),
    ])
    .map(text)
    .unwrap_or_else(|| String::from("N/A"));
    let elevation = first_truthy([
        get(race, &["elevation_gain_feet"]),
        get(race, &["race_metadata", "elevation_feet"]),
    ])
    .and_then(as_int)
    .filter(|feet| *feet != 0)
    .map(|feet| format!("{} feet", thousands(feet)))
    .unwrap_or_else(|| String::from("N/A"));
    let technical = first_truthy([
        get(race, &["technical_rating"]),
        get(race, &["race_characteristics", "technical_difficulty"]),
    ])
    .map(text)
    .unwrap_or_else(|| String::from("Moderate"));
    let cutoff = text_or(race, &["time_cutoff"], "None");

    format!(
        r#"
    <table class="difficulty-table">
        <thead>
            <tr>
                <th>Category</th>
                <th>Rating</th>
            </tr>
        </thead>
        <tbody>
            <tr>
                <td><strong>Distance</strong></td>
                <td>{} miles</td>
            </tr>
            <tr>
                <td><strong>Elevation Gain</strong></td>
                <td>{}</td>
            </tr>
            <tr>
                <td><strong>Technical Difficulty</strong></td>
                <td>{}</td>
            </tr>
            <tr>
                <td><strong>Time Cutoff</strong></td>
                <td>{}</td>
            </tr>
        </tbody>
    </table>
    "#,
        distance, elevation, technical, cutoff
    )
}

/// Carbohydrate and fluid targets by scenario, including race day.
pub fn fueling_table(race: &Value) -> String {
    let race_day = format!(
        "Race Day ({} miles, ~{} hours)",
        distance_text(race),
        estimated_hours(race).trunc() as i64
    );
    let rows = [
        ["Training Ride < 2 hours", "30-45g/hour", "500-750ml/hour", "Water + electrolytes. Start fueling after 60 min if needed."],
        ["Training Ride 2-4 hours", "45-60g/hour", "500-750ml/hour", "Mix of gels, bars, and real food. Practice your race nutrition."],
        ["Long Training Ride 4-6 hours", "60-75g/hour", "500-750ml/hour", "Aggressive gut training. Test race-day nutrition strategy."],
        [race_day.as_str(), "60-90g/hour", "500-750ml/hour", "Start fueling in first 30 min. Mix multiple carb sources (glucose + fructose)."],
        ["Hot Conditions (>80°F)", "60-90g/hour", "750-1000ml/hour", "Increase sodium to 500-700mg/hour. Pre-cool if possible."],
        ["Cold Conditions (<50°F)", "60-90g/hour", "400-600ml/hour", "Lower fluid needs, but still fuel aggressively. Warm fluids help."],
    ];
    render(|w| {
        table(
            w,
            "",
            "fueling-table",
            &["Scenario", "Carbohydrate Intake", "Fluid Intake", "Notes"],
            &rows,
        )
    })
}

/// The gear list, with extra items for big climbing days and hot races.
pub fn equipment_items(race: &Value) -> Vec<String> {
    let mut items: Vec<String> = [
        "Power meter (calibrated)",
        "Heart rate monitor",
        "GPS bike computer",
    ]
    .iter()
    .map(|item| (*item).to_owned())
    .collect();
    items.push(format!(
        "Tires: {}",
        text_or(race, &["recommended_tire_width"], "38-42mm")
    ));
    items.extend(
        [
            "Spare tubes/plugs",
            "Multi-tool",
            "Pump/CO2",
            "Nutrition for race duration",
            "Water bottles (2-3)",
            "Race number",
            "ID and emergency contact",
        ]
        .iter()
        .map(|item| (*item).to_owned()),
    );

    let climbing = get(race, &["elevation_gain_feet"])
        .and_then(as_f64)
        .unwrap_or(0.0);
    if climbing > 5000.0 {
        items.push(String::from("Gear range for climbing"));
    }
    let weather = text_or(race, &["weather_strategy"], "").to_lowercase();
    if weather.contains("hot") {
        items.push(String::from("Extra electrolytes"));
        items.push(String::from("Sun protection"));
    }
    items
}

/// The gear list as checkboxes, with a link to the printable version.
pub fn equipment_checklist(race: &Value) -> String {
    render(|w| {
        w.push_str("<div class=\"equipment-checklist-items\">\n");
        for item in equipment_items(race) {
            w.push_str("  <label class=\"checklist-item\">\n");
            w.push_str("    <input type=\"checkbox\">\n");
            writeln!(w, "    <span>{}</span>", item)?;
            w.push_str("  </label>\n");
        }
        w.push_str("</div>\n");
        w.push_str(r##"<p class="checklist-download"><a href="#" onclick="downloadChecklistPDF()" class="download-link">📥 Download Printable Checklist (PDF)</a></p>"##);
        Ok(())
    })
}

/// When to ride inside and when to ride outside.
pub fn indoor_outdoor_decision() -> String {
    let rows = [
        ["Temperature < 20°F or > 100°F", "Yes - Safety risk", "No - Dangerous conditions"],
        ["Ice, snow, or dangerous road conditions", "Yes - Crash risk too high", "No - Unsafe"],
        ["Structured intervals (VO2max, Threshold)", "Yes - Better control, no traffic", "Maybe - If safe route available"],
        ["Endurance ride (Z1-Z2)", "Avoid - Too boring", "Yes - Mental training, skills practice"],
        ["Time-crunched (< 60 min)", "Yes - No travel time, immediate start", "No - Travel time wastes workout"],
        ["Long ride (4+ hours)", "No - Mental torture", "Yes - Essential for race prep"],
        ["Recovery ride", "Maybe - If weather is terrible", "Yes - Fresh air aids recovery"],
    ];
    render(|w| {
        table(
            w,
            "",
            "decision-table",
            &["Condition", "Ride Indoors", "Ride Outdoors"],
            &rows,
        )
    })
}

/// The five-layer mental training framework.
pub fn mental_map() -> String {
    String::from(
        r#"<div class="mental-map">
  <div class="mental-framework">
    <h3>Mental Training Framework</h3>
    <div class="mental-layers">
      <div class="mental-layer">
        <h4>1. Foundation: Breathing & Presence</h4>
        <p><strong>6-2-7 Technique:</strong> Inhale 6 counts, hold 2, exhale 7. Calms nervous system, brings focus to present moment.</p>
      </div>
      <div class="mental-layer">
        <h4>2. Reframing: Change Your Story</h4>
        <p><strong>Instead of:</strong> <q>This hurts</q> → <strong>Say:</strong> <q>This is my body adapting. I'm getting stronger.</q></p>
        <p><strong>Instead of:</strong> <q>I can't do this</q> → <strong>Say:</strong> <q>I'm doing it right now. One pedal stroke at a time.</q></p>
      </div>
      <div class="mental-layer">
        <h4>3. Anchoring: Physical Cues</h4>
        <p><strong>Power position:</strong> Hands in drops, core engaged, smooth pedal stroke. This is your <q>race mode</q> trigger.</p>
        <p><strong>Breathing rhythm:</strong> Match cadence to breath (e.g., 2 pedal strokes per breath). Creates flow state.</p>
      </div>
      <div class="mental-layer">
        <h4>4. Acceptance: The Suffering Contract</h4>
        <p><strong>You signed up for this.</strong> Discomfort is part of the deal. Accept it. Don't fight it. Work with it.</p>
        <p><strong>Pain is temporary. Quitting lasts forever.</strong></p>
      </div>
      <div class="mental-layer">
        <h4>5. Purpose: Remember Your Why</h4>
        <p><strong>Why are you here?</strong> Connect to your deeper motivation. This race matters because you chose it.</p>
      </div>
    </div>
  </div>
</div>"#,
    )
}

/// The race split into three acts, timed from the estimated duration. Act
/// boundaries fall at 20% and 80% of the estimate.
pub fn three_acts(race: &Value) -> String {
    let hours = estimated_hours(race);
    let early = (hours * 0.2).trunc() as i64;
    let late = (hours * 0.8).trunc() as i64;
    let rows = [
        [
            String::from("Act 1: The Start"),
            format!("0 - {} hours", early),
            String::from("High energy, adrenaline, everyone goes too hard. Groups form. Positioning matters."),
            String::from("Stay calm. Don't chase. Fuel early (first 30 min). Find your rhythm. Let the race come to you."),
        ],
        [
            String::from("Act 2: The Grind"),
            format!("{} - {} hours", early, late),
            String::from("The real race. Fatigue sets in. Groups break up. Mental game begins. This is where races are won or lost."),
            String::from("Stay consistent. Fuel every 20-30 min. Manage effort (don't redline). Use mental techniques. One section at a time."),
        ],
        [
            String::from("Act 3: The Finish"),
            format!("{} hours - Finish", late),
            String::from("Everything hurts. Decision fatigue. Final push. This is where training pays off."),
            String::from("Empty the tank. Use everything you've got. Remember your why. Push through the pain. Finish strong."),
        ],
    ];
    render(|w| {
        table(
            w,
            "",
            "three-acts-table",
            &["Phase", "When", "What's Happening", "Your Job"],
            &rows,
        )
    })
}

/// Tire width, tread and pressure by condition.
pub fn tire_decision() -> String {
    let rows = [
        ["Smooth gravel, dry", "38-40mm", "Semi-slick or light file tread", "35-40 PSI", "Low rolling resistance. Speed matters more than grip."],
        ["Rough/loose gravel", "40-42mm", "Moderate knobs (2-3mm)", "30-35 PSI", "Need grip and comfort. Wider = lower pressure = better traction."],
        ["Mud or wet conditions", "42-45mm", "Aggressive knobs (4-5mm)", "28-32 PSI", "Maximum grip. Lower pressure helps mud clear from tread."],
        ["Mixed terrain (your race)", "40-42mm", "Moderate knobs (2-3mm)", "32-36 PSI", "Versatile. Handles most conditions. Good balance of speed and grip."],
        ["Long distance (6+ hours)", "40-42mm", "Moderate knobs", "32-35 PSI", "Comfort matters. Lower pressure reduces fatigue. Still fast enough."],
    ];
    render(|w| {
        w.push_str("<div class=\"tire-decision\">\n");
        table(
            w,
            "  ",
            "tire-table",
            &["Condition", "Tire Width", "Tread", "Pressure", "Why"],
            &rows,
        )?;
        w.push_str("\n  <p class=\"tire-note\"><strong>Rule of thumb:</strong> When in doubt, go wider and lower pressure. Comfort and grip beat marginal speed gains on rough terrain.</p>\n");
        w.push_str("</div>");
        Ok(())
    })
}

/// The workout types used across the plan.
pub fn key_workout_summary() -> String {
    let rows = [
        ["Endurance", "Z1-Z2", "2-6 hours", "Aerobic base, fat adaptation", "Easy pace. Conversational. Builds durability."],
        ["G-Spot Intervals", "87-92% FTP", "15-60 min blocks", "Race-specific power", "Sustained gravel race pace. Practice position."],
        ["Threshold", "Z4 (93-105% FTP)", "10-30 min blocks", "Lactate clearance, sustained power", "Hard but controlled. Can say a few words."],
        ["VO2max", "Z5 (106-120% FTP)", "2-8 min intervals", "Max aerobic capacity", "Very hard. Near max. Single words only."],
        ["Anaerobic", "Z6 (121-150% FTP)", "30 sec - 3 min", "Power, lactate tolerance", "All-out efforts. Sharp, explosive."],
        ["Neuromuscular", "Z7 (>150% FTP)", "5-15 seconds", "Max power, sprint", "Pure explosive. All-out sprints."],
        ["Tempo", "Z3 (76-90% FTP)", "20-60 min", "Moderate intensity (limited use)", "Comfortably hard. Used sparingly in polarized plans."],
    ];
    render(|w| {
        table(
            w,
            "",
            "workout-summary-table",
            &["Workout Type", "Zone", "Duration", "Purpose", "Key Focus"],
            &rows,
        )
    })
}

/// The training phases as SVG bars when the race lists them, or a text
/// marker otherwise.
pub fn phase_progression(race: &Value) -> String {
    let phases = list_at(race, &["phases"]);
    if phases.is_empty() {
        return String::from("[Phase progression infographic]");
    }
    render(|w| {
        w.push_str("<svg viewBox=\"0 0 600 120\" width=\"600\" height=\"120\">\n");
        w.push_str("                <rect x=\"0\" y=\"0\" width=\"600\" height=\"120\" fill=\"white\"/>\n");
        w.push_str(&phase_bars(phases));
        w.push_str("\n            </svg>");
        Ok(())
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ratings() {
        let race = json!({
            "distance_miles": 200,
            "elevation_gain_feet": 11000,
            "terrain": "flint_hills",
            "altitude_feet": 1200,
        });
        assert_eq!(
            [
                ("Elevation", 4),
                ("Length", 5),
                ("Technicality", 4),
                ("Climate", 3),
                ("Altitude", 2),
                ("Adventure", 4),
            ],
            ratings(&race)
        );
    }

    #[test]
    fn test_ratings_defaults() {
        let ratings = ratings(&json!({}));
        // a missing distance is read as 200 miles
        assert_eq!(("Length", 5), ratings[1]);
        assert_eq!(("Elevation", 1), ratings[0]);
        assert_eq!(("Technicality", 3), ratings[2]);
        assert_eq!(("Adventure", 3), ratings[5]);
    }

    #[test]
    fn test_rating_hex_bars() {
        let html = rating_hex(&json!({"distance_miles": 60}));
        assert!(html.contains("        <td><strong>Length</strong></td>\n        <td>2/5</td>\n        <td class=\"rating-bars\">██░░░</td>"));
        assert!(html.ends_with("</div>"));
    }

    #[test]
    fn test_fueling_race_day_row() {
        let html = fueling_table(&json!({"distance_miles": 100}));
        assert!(html.contains("      <td><strong>Race Day (100 miles, ~6 hours)</strong></td>\n"));
        assert!(html.starts_with("<table class=\"fueling-table\">\n  <thead>\n    <tr>\n      <th>Scenario</th>\n"));
        assert!(html.ends_with("  </tbody>\n</table>"));
    }

    #[test]
    fn test_three_acts_boundaries() {
        // 200 miles at 15 mph is 13.3 hours: acts split at 2 and 10
        let html = three_acts(&json!({"distance_miles": 200}));
        assert!(html.contains("<td>0 - 2 hours</td>"));
        assert!(html.contains("<td>2 - 10 hours</td>"));
        assert!(html.contains("<td>10 hours - Finish</td>"));
    }

    #[test]
    fn test_equipment_extras() {
        let plain = equipment_items(&json!({}));
        assert_eq!(11, plain.len());
        assert!(plain.contains(&String::from("Tires: 38-42mm")));

        let hot_and_hilly = equipment_items(&json!({
            "elevation_gain_feet": 9000,
            "weather_strategy": "Expect HOT afternoons",
            "recommended_tire_width": "40-45mm",
        }));
        assert_eq!(14, hot_and_hilly.len());
        assert!(hot_and_hilly.contains(&String::from("Gear range for climbing")));
        assert!(hot_and_hilly.contains(&String::from("Sun protection")));
        assert!(hot_and_hilly.contains(&String::from("Tires: 40-45mm")));

        let html = equipment_checklist(&json!({}));
        assert!(html.contains("    <span>Multi-tool</span>\n"));
        assert!(html.ends_with("(PDF)</a></p>"));
    }

    #[test]
    fn test_difficulty_table() {
        let html = difficulty_table(&json!({
            "race_metadata": {"distance_miles": 100, "elevation_feet": 8500},
        }));
        assert!(html.contains("<td>100 miles</td>"));
        assert!(html.contains("<td>8,500 feet</td>"));
        assert!(html.contains("<td>Moderate</td>"));
        assert!(html.contains("<td>None</td>"));

        let empty = difficulty_table(&json!({}));
        assert!(empty.contains("<td>N/A miles</td>"));
        assert!(empty.contains("<td>N/A</td>"));
    }

    #[test]
    fn test_tire_decision_nesting() {
        let html = tire_decision();
        assert!(html.starts_with("<div class=\"tire-decision\">\n  <table class=\"tire-table\">\n    <thead>\n"));
        assert!(html.contains("\n  </table>\n  <p class=\"tire-note\">"));
    }

    #[test]
    fn test_phase_progression() {
        assert_eq!("[Phase progression infographic]", phase_progression(&json!({})));
        let html = phase_progression(&json!({"phases": [{"name": "BASE", "weeks": "1-4", "color": "#ccc"}]}));
        assert!(html.contains("Weeks 1-4"));
    }
}
