//! Prose paragraphs assembled from a race profile for the race template.

use crate::lookup::{as_f64, as_int, get, list_at, text, text_or, thousands, truthy};
use serde_json::Value;

/// The opening paragraph: the race hooks, plus the overall score when both a
/// score and a rating are known.
pub fn race_intro(race: &Value) -> String {
    let punchy = text_or(race, &["race_hooks", "punchy"], "");
    let detail = text_or(race, &["race_hooks", "detail"], "");
    let mut intro = format!("{} {}", punchy, detail).trim().to_owned();

    let score = get(race, &["overall_score"]).filter(|v| truthy(v));
    let rating = get(race, &["tier_rating"]).filter(|v| truthy(v));
    if let (Some(score), Some(rating)) = (score, rating) {
        intro.push_str(&format!(
            " Overall Score: {} ({}).",
            text(score),
            text(rating)
        ));
    }

    match intro.is_empty() {
        true => String::from("This is a challenging gravel race that requires specific preparation."),
        false => intro,
    }
}

/// "What the course is like": distance, climbing, terrain, technicality,
/// climate, starting altitude, support and adventure.
pub fn course_description(race: &Value) -> String {
    let distance = get(race, &["race_metadata", "distance_miles"])
        .or_else(|| get(race, &["distance_miles"]))
        .map(text)
        .unwrap_or_else(|| String::from("200"));
    let elevation = get(race, &["race_metadata", "elevation_feet"])
        .or_else(|| get(race, &["elevation_feet"]))
        .and_then(as_int)
        .unwrap_or(0);
    let terrain = text_or(race, &["race_characteristics", "terrain"], "varied");
    let technical = text_or(race, &["race_characteristics", "technical_difficulty"], "moderate");
    let climate = text_or(race, &["race_characteristics", "climate"], "temperate");
    let weather = get(race, &["race_characteristics", "typical_weather"])
        .or_else(|| get(race, &["guide_variables", "race_weather"]))
        .map(text)
        .unwrap_or_else(|| String::from("Variable conditions"));
    let altitude = get(race, &["race_metadata", "start_elevation_feet"])
        .or_else(|| get(race, &["race_characteristics", "altitude_feet"]))
        .and_then(as_int)
        .unwrap_or(0);
    let support = text_or(race, &["aid_stations"], "well-supported");
    let adventure = text_or(race, &["adventure_factor"], "moderate");

    let mut desc = format!(
        "The {} covers {} miles",
        text_or(race, &["race_metadata", "name"], "race"),
        distance
    );
    if elevation > 0 {
        desc.push_str(&format!(
            " with {} feet of cumulative elevation gain",
            thousands(elevation)
        ));
    }
    desc.push_str(&format!(" through {} terrain", terrain.replace('_', " ")));
    if !technical.is_empty() {
        desc.push_str(&format!(
            "&mdash;this is a {} handling challenge",
            technical
        ));
    }
    if climate == "hot" || weather.to_lowercase().contains("hot") {
        desc.push_str(&format!(". Climate is the silent killer&mdash;{}", weather));
    } else if !climate.is_empty() {
        desc.push_str(&format!(". Climate: {}", weather));
    }
    if altitude > 5000 {
        desc.push_str(&format!(
            ". Starting elevation is around {} feet, so altitude adaptation is required",
            thousands(altitude)
        ));
    } else if altitude != 0 {
        desc.push_str(&format!(
            ". Starting elevation is around {} feet, so altitude isn't a factor",
            thousands(altitude)
        ));
    }
    if !support.is_empty() {
        desc.push_str(&format!(". The race is {} with aid stations", support));
    }
    if !adventure.is_empty() {
        desc.push_str(&format!(". The adventure factor is {}", adventure));
    }
    desc.push('.');
    desc
}

/// "Why this race matters". Unbound has its own paragraph; other races are
/// described from their `race_significance` fields, falling back to the
/// race hooks.
pub fn race_significance(race: &Value) -> String {
    let name = text_or(race, &["race_metadata", "name"], "This race");

    if name.to_lowercase().contains("unbound") {
        return format!(
            "{name} is the most iconic gravel race in the world&mdash;Unbound is gravel cycling. The organization is flawless, the course is legendary, and the event execution sets the industry standard. The energy, the field, the community&mdash;this is what gravel racing aspires to be. Thousands of riders create incredible camaraderie, and the volunteers make it unforgettable. The field depth is unmatched&mdash;the pros, the weekend warriors, and everyone in between. Entry fees are premium, but you get what you pay for. Travel and lodging in {location} aren't cheap, but manageable with planning.",
            name = name,
            location = text_or(race, &["race_metadata", "location"], "Emporia"),
        );
    }

    let fallback = format!("{} is a significant event in the gravel racing calendar.", name);
    let significance = get(race, &["race_significance"]).filter(|v| truthy(v));
    if let Some(sig) = significance {
        let field = |key: &str| text_or(sig, &[key], "");
        let iconic = [
            get(sig, &["iconic_status"]),
            get(race, &["iconic_status"]),
            get(race, &["marketplace_variables", "iconic_status"]),
        ]
        .into_iter()
        .flatten()
        .find(|v| truthy(v))
        .map(text);

        let mut parts = vec![match iconic {
            Some(iconic) => format!("{} is {}.", name, iconic),
            None => fallback.clone(),
        }];
        let organization = field("organization_quality");
        if !organization.is_empty() {
            parts.push(format!("The organization is {}.", organization));
        }
        let energy = field("energy");
        if !energy.is_empty() {
            parts.push(format!("The energy, the field, the community&mdash;{}.", energy));
        }
        let community = field("community");
        if !community.is_empty() {
            parts.push(format!("{}.", community));
        }
        let depth = field("field_depth");
        if !depth.is_empty() {
            parts.push(format!("The field depth is {}.", depth));
        }
        let fee = field("entry_fee");
        if !fee.is_empty() {
            parts.push(format!("Entry fees are {}, but you get what you pay for.", fee));
        }
        let travel = field("travel_lodging");
        if !travel.is_empty() {
            parts.push(format!("Travel and lodging {}.", travel));
        }
        return parts.join(" ");
    }

    match get(race, &["race_hooks", "detail"]).filter(|v| truthy(v)) {
        Some(detail) => format!("{} {}", fallback, text(detail)),
        None => fallback,
    }
}

/// Race challenges from `guide_variables.race_challenges`, as text.
fn challenges(race: &Value) -> Vec<String> {
    list_at(race, &["guide_variables", "race_challenges"])
        .iter()
        .map(text)
        .collect()
}

/// "What it takes to finish", driven by keywords in the race's challenges.
pub fn what_it_takes(race: &Value) -> String {
    let duration = text_or(race, &["duration_estimate"], "10-15 hours");
    let mut requirements = Vec::new();
    if !duration.is_empty() {
        requirements.push(format!("You'll be out there {}.", duration));
    }
    requirements.push(String::from(
        "Base fitness alone won't cut it&mdash;you need specific preparation for sustained output.",
    ));

    for challenge in challenges(race) {
        let challenge = challenge.to_lowercase();
        let has = |word: &str| challenge.contains(word);
        let requirement = if has("heat") {
            "Heat acclimatization isn't optional."
        } else if has("distance") || has("endurance") {
            "Endurance pacing is critical&mdash;smooth power wins over surges."
        } else if has("technical") || has("handling") {
            "Bike handling confidence at speed, especially in groups."
        } else if has("mental") {
            "Mental toughness for the dark miles when everything hurts."
        } else if has("fueling") || has("nutrition") {
            "Fueling execution&mdash;getting nutrition right or bonking catastrophically."
        } else {
            continue;
        };
        requirements.push(requirement.to_owned());
    }

    requirements.push(String::from(
        "Equipment reliability&mdash;mechanical issues end races.",
    ));
    requirements.join(" ")
}

/// "This plan prepares you for all of it".
pub fn plan_preparation(race: &Value, race_name: &str) -> String {
    let challenges = challenges(race).join(" ").to_lowercase();
    let mut items = Vec::new();

    if challenges.contains("heat")
        || text_or(race, &["race_characteristics", "climate"], "") == "hot"
    {
        items.push(String::from("Heat adaptation protocols."));
    }

    let distance = get(race, &["distance_miles"]).and_then(as_f64).unwrap_or(0.0);
    items.push(String::from(match distance >= 200.0 {
        true => "Endurance pacing for ultra-distance.",
        false => "Endurance pacing for race distance.",
    }));

    let technical = get(race, &["race_characteristics", "technical_difficulty"])
        .map_or(false, truthy);
    if challenges.contains("technical") || technical {
        let terrain = text_or(race, &["race_characteristics", "terrain"], "").replace('_', " ");
        items.push(format!(
            "Technical handling for {} terrain.",
            match terrain.is_empty() {
                true => "gravel",
                false => terrain.as_str(),
            }
        ));
    }

    items.push(String::from("Mental training for when it all falls apart."));

    format!(
        "Every workout, long ride, and recovery week is designed around {}'s specific demands. {}",
        race_name,
        items.join(" ")
    )
}
