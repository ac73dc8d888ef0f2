//! Race guides: a flat race profile is turned into a placeholder dictionary
//! and substituted into the race template.

use crate::infographic;
use crate::lookup::{as_int, first_truthy, get, list_at, text, text_or, thousands, truthy};
use crate::narrative;
use crate::substitute::{strip_altitude_section, substitute, Substitutions};
use crate::theme::Theme;
use crate::tier::{self, DEFAULT_LEVEL, DEFAULT_TIER};
use serde_json::Value;
use tracing::{debug, info};

/// Races below this elevation, in feet, have their altitude section removed.
pub const ALTITUDE_THRESHOLD_FEET: i64 = 3000;

/// One row of the non-negotiables table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonNegotiable {
    pub requirement: String,
    pub by_when: String,
    pub why: String,
}

impl NonNegotiable {
    fn new(requirement: &str, by_when: &str, why: &str) -> Self {
        NonNegotiable {
            requirement: requirement.to_owned(),
            by_when: by_when.to_owned(),
            why: why.to_owned(),
        }
    }
}

const DEFAULT_NON_NEGOTIABLES: [(&str, &str, &str); 5] = [
    (
        "Power meter or heart rate monitor",
        "Week 1",
        "Precise power data ensures correct training zones and optimal adaptation",
    ),
    (
        "Heart rate monitor",
        "Week 1",
        "Heart rate provides backup data and helps gauge recovery status",
    ),
    (
        "Professional bike fit",
        "Week 2-3",
        "Proper position prevents injury and maximizes power transfer",
    ),
    (
        "Consistent training",
        "Ongoing",
        "Consistency is the foundation of adaptation - skip weeks, lose gains",
    ),
    (
        "Follow the plan",
        "Ongoing",
        "The plan works if you work it - modifications undermine the system",
    ),
];

/// The race's average elevation in feet, used to decide whether the
/// altitude section applies. 0 when unknown.
pub fn race_elevation(race: &Value) -> i64 {
    first_truthy([
        get(race, &["race_metadata", "avg_elevation_feet"]),
        get(race, &["race_characteristics", "altitude_feet"]),
        get(race, &["elevation_feet"]),
        get(race, &["avg_elevation_feet"]),
        get(race, &["altitude_feet"]),
    ])
    .and_then(as_int)
    .unwrap_or(0)
}

/// Total climbing in feet. 0 when unknown.
fn elevation_gain(race: &Value) -> i64 {
    first_truthy([
        get(race, &["elevation_gain_feet"]),
        get(race, &["race_metadata", "elevation_feet"]),
        get(race, &["elevation_feet"]),
    ])
    .and_then(as_int)
    .unwrap_or(0)
}

/// Returns the race name from the first place that has one.
pub fn race_name(race: &Value) -> String {
    first_truthy([
        get(race, &["name"]),
        get(race, &["race_metadata", "name"]),
        get(race, &["guide_variables", "race_name"]),
    ])
    .map(text)
    .unwrap_or_else(|| String::from("Race Name"))
}

/// The non-negotiable at `index`, from the race if it lists one and from the
/// defaults otherwise.
pub fn non_negotiable(race: &Value, index: usize) -> NonNegotiable {
    let listed = [
        get(race, &["non_negotiables"]),
        get(race, &["race_metadata", "non_negotiables"]),
        get(race, &["guide_variables", "non_negotiables"]),
    ]
    .into_iter()
    .flatten()
    .find(|v| truthy(v))
    .and_then(Value::as_array)
    .and_then(|items| items.get(index));

    match listed {
        Some(item @ Value::Object(_)) => NonNegotiable {
            requirement: text_or(item, &["requirement"], ""),
            by_when: text_or(item, &["by_when"], ""),
            why: text_or(item, &["why"], ""),
        },
        Some(item) => NonNegotiable::new(&text(item), "", ""),
        None => match DEFAULT_NON_NEGOTIABLES.get(index) {
            Some((requirement, by_when, why)) => NonNegotiable::new(requirement, by_when, why),
            None => NonNegotiable::new("", "", ""),
        },
    }
}

/// The expected power loss at `elevation`, unless the race states its own.
pub fn altitude_power_loss(race: &Value, elevation: i64) -> String {
    if let Some(stated) = get(race, &["altitude_power_loss"]).filter(|v| truthy(v)) {
        return text(stated);
    }
    match elevation >= ALTITUDE_THRESHOLD_FEET {
        true => format!(
            "~{:.1}% power loss at {} ft",
            elevation as f64 / 1000.0 * 1.75,
            thousands(elevation)
        ),
        false => String::from("Minimal - race is at low elevation"),
    }
}

/// The training tier: `tier`, the race's `tier_name`, or the default.
pub fn resolve_tier(race: &Value, tier: Option<&str>) -> String {
    match tier {
        Some(tier) => tier.to_owned(),
        None => text_or(race, &["tier_name"], DEFAULT_TIER),
    }
}

/// The ability level: `level`, the race's `ability_level`, or the default.
pub fn resolve_level(race: &Value, level: Option<&str>) -> String {
    match level {
        Some(level) => level.to_owned(),
        None => text_or(race, &["ability_level"], DEFAULT_LEVEL),
    }
}

/// Builds the placeholder dictionary for a race. `stylesheet` fills
/// `STYLESHEET`.
pub fn substitutions(race: &Value, tier: &str, level: &str, stylesheet: &str) -> Substitutions {
    let mut values = Substitutions::new();
    let mut set = |key: &str, value: String| {
        values.insert(key.to_owned(), value);
    };

    let name = race_name(race);
    let gain = elevation_gain(race);
    let elevation = race_elevation(race);
    let field_or = |path: &[&str], default: &str| {
        get(race, path)
            .filter(|v| truthy(v))
            .map(text)
            .unwrap_or_else(|| default.to_owned())
    };

    set("RACE_NAME", name.clone());
    set(
        "DISTANCE",
        first_truthy([
            get(race, &["distance_miles"]),
            get(race, &["race_metadata", "distance_miles"]),
        ])
        .map(text)
        .unwrap_or_else(|| String::from("XXX")),
    );
    set(
        "TERRAIN_DESCRIPTION",
        first_truthy([
            get(race, &["terrain_description"]),
            get(race, &["guide_variables", "race_terrain"]),
        ])
        .map(text)
        .unwrap_or_else(|| String::from("varied terrain")),
    );
    set(
        "ELEVATION_GAIN",
        match gain {
            0 => String::from("~11,000 ft"),
            gain => format!("~{} ft", thousands(gain)),
        },
    );
    set("DURATION_ESTIMATE", text_or(race, &["duration_estimate"], "10-15 hours"));
    set(
        "RACE_DESCRIPTION",
        first_truthy([
            get(race, &["description"]),
            get(race, &["race_hooks", "detail"]),
        ])
        .map(text)
        .unwrap_or_else(|| String::from("Race description here")),
    );
    set("ABILITY_LEVEL", level.to_owned());
    set("TIER_NAME", tier.to_owned());
    set("WEEKLY_HOURS", tier::weekly_hours(tier).to_owned());
    set("plan_weeks", String::from("12"));

    let challenges = match get(race, &["key_challenges"]).filter(|v| truthy(v)) {
        Some(challenges) => text(challenges),
        None => list_at(race, &["guide_variables", "race_challenges"])
            .iter()
            .map(text)
            .collect::<Vec<_>>()
            .join(", "),
    };
    set(
        "RACE_KEY_CHALLENGES",
        match challenges.is_empty() {
            true => String::from("technical terrain, elevation, and endurance"),
            false => challenges,
        },
    );
    set(
        "WEEKLY_STRUCTURE_DESCRIPTION",
        tier::weekly_structure(tier).to_owned(),
    );
    set("RACE_ELEVATION", gain.to_string());
    set(
        "RACE_SPECIFIC_SKILL_NOTES",
        field_or(
            &["specific_skill_notes"],
            "Practice descending, cornering, and rough terrain handling.",
        ),
    );
    set(
        "RACE_SPECIFIC_TACTICS",
        field_or(
            &["specific_tactics"],
            "Start conservatively. Fuel early and often. Be patient on climbs.",
        ),
    );
    set(
        "WEATHER_STRATEGY",
        first_truthy([
            get(race, &["race_characteristics", "typical_weather"]),
            get(race, &["weather_strategy"]),
        ])
        .map(text)
        .unwrap_or_else(|| String::from("Check forecast week of. Pack layers.")),
    );
    set(
        "AID_STATION_STRATEGY",
        field_or(
            &["aid_station_strategy"],
            "Use aid stations for quick refills. Don't linger.",
        ),
    );
    set("ALTITUDE_POWER_LOSS", altitude_power_loss(race, elevation));
    set(
        "RECOMMENDED_TIRE_WIDTH",
        field_or(&["recommended_tire_width"], "38-42mm"),
    );
    set("EQUIPMENT_CHECKLIST", infographic::equipment_checklist(race));
    set("RACE_SUPPORT_URL", field_or(&["website"], "https://unboundgravel.com"));

    set("PLAN_TITLE", tier::plan_title(tier, level, &name));
    set("RACE_INTRO_PARAGRAPH", narrative::race_intro(race));
    set(
        "COURSE_DESCRIPTION_PARAGRAPH",
        narrative::course_description(race),
    );
    set(
        "RACE_SIGNIFICANCE_PARAGRAPH",
        narrative::race_significance(race),
    );
    set("WHAT_IT_TAKES_TO_FINISH", narrative::what_it_takes(race));
    set(
        "PLAN_PREPARATION_SUMMARY",
        narrative::plan_preparation(race, &name),
    );
    set(
        "RACE_LOCATION_REFERENCE",
        match get(race, &["race_metadata", "location"]).filter(|v| truthy(v)) {
            Some(location) => format!(" in {}", text(location)),
            None => String::new(),
        },
    );
    set(
        "ABILITY_LEVEL_EXPLANATION",
        tier::ability_explanation(level).to_owned(),
    );
    set(
        "TIER_VOLUME_EXPLANATION",
        tier::volume_explanation(tier).to_owned(),
    );
    set(
        "PERFORMANCE_EXPECTATIONS",
        tier::performance_expectations(tier, level),
    );

    set("INFOGRAPHIC_PHASE_BARS", infographic::phase_progression(race));
    set("INFOGRAPHIC_RATING_HEX", infographic::rating_hex(race));
    set(
        "INFOGRAPHIC_DIFFICULTY_TABLE",
        infographic::difficulty_table(race),
    );
    set("INFOGRAPHIC_FUELING_TABLE", infographic::fueling_table(race));
    set("INFOGRAPHIC_MENTAL_MAP", infographic::mental_map());
    set("INFOGRAPHIC_THREE_ACTS", infographic::three_acts(race));
    set(
        "INFOGRAPHIC_INDOOR_OUTDOOR_DECISION",
        infographic::indoor_outdoor_decision(),
    );
    set("INFOGRAPHIC_TIRE_DECISION", infographic::tire_decision());
    set(
        "INFOGRAPHIC_KEY_WORKOUT_SUMMARY",
        infographic::key_workout_summary(),
    );

    for i in 0..DEFAULT_NON_NEGOTIABLES.len() {
        let row = non_negotiable(race, i);
        set(&format!("NON_NEG_{}_REQUIREMENT", i + 1), row.requirement);
        set(&format!("NON_NEG_{}_BY_WHEN", i + 1), row.by_when);
        set(&format!("NON_NEG_{}_WHY", i + 1), row.why);
    }

    // workouts the race doesn't list keep their placeholders
    for (i, workout) in list_at(race, &["key_workouts"]).iter().take(4).enumerate() {
        if let Some(name) = get(workout, &["name"]) {
            set(&format!("KEY_WORKOUT_{}_NAME", i + 1), text(name));
        }
        if let Some(purpose) = get(workout, &["purpose"]) {
            set(&format!("KEY_WORKOUT_{}_PURPOSE", i + 1), text(purpose));
        }
    }

    set(
        "SKILL_5_NAME",
        text_or(race, &["skills", "skill_5_name"], "Emergency Repairs"),
    );
    set(
        "SKILL_5_WHY",
        text_or(
            race,
            &["skills", "skill_5_why"],
            "Mechanical issues will happen. Knowing how to fix them keeps you racing.",
        ),
    );
    set(
        "SKILL_5_HOW",
        text_or(
            race,
            &["skills", "skill_5_how"],
            "Practice changing tubes, fixing chains, and adjusting brakes before race day.",
        ),
    );
    set(
        "SKILL_5_CUE",
        text_or(
            race,
            &["skills", "skill_5_cue"],
            "Carry tools. Know your bike. Practice fixes.",
        ),
    );

    set("STYLESHEET", stylesheet.to_owned());
    values
}

/// Renders the race guide: fills the race template, then drops the altitude
/// section for races below [`ALTITUDE_THRESHOLD_FEET`].
pub fn render_race_guide(race: &Value, tier: &str, level: &str, theme: &Theme) -> String {
    let values = substitutions(race, tier, level, &theme.stylesheet);
    debug!("Substituting {} placeholders", values.len());
    let html = substitute(&theme.race_template, &values);

    let elevation = race_elevation(race);
    match elevation < ALTITUDE_THRESHOLD_FEET {
        true => {
            info!(
                "Removed altitude section (race elevation: {} feet < {})",
                elevation, ALTITUDE_THRESHOLD_FEET
            );
            strip_altitude_section(&html)
        }
        false => {
            info!(
                "Included altitude section (race elevation: {} feet >= {})",
                elevation, ALTITUDE_THRESHOLD_FEET
            );
            html
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn render(race: &Value) -> String {
        render_race_guide(race, "FINISHER", "Intermediate", &Theme::default())
    }

    #[test]
    fn test_altitude_threshold() {
        let low = render(&json!({"name": "Low", "elevation_feet": 2999}));
        assert!(!low.contains("ALTITUDE SECTION"));
        assert!(!low.contains("<h3>Altitude</h3>"));

        let high = render(&json!({"name": "High", "elevation_feet": 3000}));
        assert!(high.contains("<!-- START ALTITUDE SECTION"));
        assert!(high.contains("<h3>Altitude</h3>"));
        assert!(high.contains("% power loss at 3,000 ft"));
    }

    #[test]
    fn test_race_elevation_fallbacks() {
        assert_eq!(0, race_elevation(&json!({})));
        assert_eq!(
            9000,
            race_elevation(&json!({
                "race_metadata": {"avg_elevation_feet": 0},
                "race_characteristics": {"altitude_feet": "9000"},
                "elevation_feet": 100,
            }))
        );
        assert_eq!(0, race_elevation(&json!({"altitude_feet": "high"})));
    }

    #[test]
    fn test_default_fields() {
        let values = substitutions(&json!({}), "FINISHER", "Intermediate", "");
        assert_eq!("~11,000 ft", values["ELEVATION_GAIN"]);
        assert_eq!("Race Name", values["RACE_NAME"]);
        assert_eq!("XXX", values["DISTANCE"]);
        assert_eq!("0", values["RACE_ELEVATION"]);
        assert_eq!("", values["RACE_LOCATION_REFERENCE"]);
        assert_eq!(
            "technical terrain, elevation, and endurance",
            values["RACE_KEY_CHALLENGES"]
        );
        assert_eq!("Minimal - race is at low elevation", values["ALTITUDE_POWER_LOSS"]);
        assert_eq!("8-12", values["WEEKLY_HOURS"]);
    }

    #[test]
    fn test_field_fallbacks() {
        let race = json!({
            "race_metadata": {"name": "Unbound 200", "distance_miles": 200, "elevation_feet": 11000, "location": "Emporia, Kansas"},
            "guide_variables": {"race_challenges": ["heat", "distance"], "race_terrain": "flint hills"},
            "race_characteristics": {"typical_weather": "Hot and humid"},
        });
        let values = substitutions(&race, "COMPETE", "Advanced", "body {}");
        assert_eq!("Unbound 200", values["RACE_NAME"]);
        assert_eq!("200", values["DISTANCE"]);
        assert_eq!("~11,000 ft", values["ELEVATION_GAIN"]);
        assert_eq!("11000", values["RACE_ELEVATION"]);
        assert_eq!("heat, distance", values["RACE_KEY_CHALLENGES"]);
        assert_eq!("flint hills", values["TERRAIN_DESCRIPTION"]);
        assert_eq!("Hot and humid", values["WEATHER_STRATEGY"]);
        assert_eq!(" in Emporia, Kansas", values["RACE_LOCATION_REFERENCE"]);
        assert_eq!("body {}", values["STYLESHEET"]);
        assert_eq!(
            "Unbound 200 &ndash; COMPETE &middot; Advanced (Podium Contender Plan)",
            values["PLAN_TITLE"]
        );
    }

    #[test]
    fn test_non_negotiables() {
        let race = json!({
            "non_negotiables": [
                {"requirement": "Tubeless setup", "by_when": "Week 4"},
                "Gut training",
            ],
        });
        assert_eq!(
            NonNegotiable::new("Tubeless setup", "Week 4", ""),
            non_negotiable(&race, 0)
        );
        assert_eq!(NonNegotiable::new("Gut training", "", ""), non_negotiable(&race, 1));
        let fallback = non_negotiable(&race, 2);
        assert_eq!("Professional bike fit", fallback.requirement);
        assert_eq!("Week 2-3", fallback.by_when);

        let defaults = non_negotiable(&json!({"non_negotiables": []}), 2);
        assert_eq!("Professional bike fit", defaults.requirement);
        assert_eq!("Week 2-3", defaults.by_when);
    }

    #[test]
    fn test_altitude_power_loss() {
        assert_eq!(
            "~17.8% power loss at 10,152 ft",
            altitude_power_loss(&json!({}), 10152)
        );
        assert_eq!(
            "Significant",
            altitude_power_loss(&json!({"altitude_power_loss": "Significant"}), 10152)
        );
    }

    #[test]
    fn test_key_workout_placeholders() {
        let race = json!({"key_workouts": [{"name": "Long Ride", "purpose": "Durability"}]});
        let html = render(&race);
        assert!(html.contains("<h4>Long Ride</h4><p>Durability</p>"));
        assert!(html.contains("{{KEY_WORKOUT_2_NAME}}"));
    }

    #[test]
    fn test_resolve_tier_and_level() {
        let race = json!({"tier_name": "PODIUM", "ability_level": "Advanced"});
        assert_eq!("PODIUM", resolve_tier(&race, None));
        assert_eq!("COMPETE", resolve_tier(&race, Some("COMPETE")));
        assert_eq!("Advanced", resolve_level(&race, None));
        assert_eq!("Intermediate", resolve_level(&json!({}), None));
    }

    #[test]
    fn test_render_is_deterministic() {
        let race = json!({"name": "Mid South", "distance_miles": 100});
        let html = render(&race);
        assert_eq!(html, render(&race));
        assert!(html.contains("<h1>Mid South</h1>"));
        assert!(!html.contains("{{STYLESHEET}}"));
    }
}
