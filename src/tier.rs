//! Fixed text keyed by training tier (`AYAHUASCA`, `FINISHER`, `COMPETE`,
//! `PODIUM`) and ability level (`Beginner`, `Intermediate`, `Advanced`,
//! `Masters`, `Save My Race`). Unknown tiers read as `FINISHER` and unknown
//! levels as `Intermediate`.

pub const DEFAULT_TIER: &str = "FINISHER";
pub const DEFAULT_LEVEL: &str = "Intermediate";

/// Weekly training hours for a tier.
pub fn weekly_hours(tier: &str) -> &'static str {
    match tier {
        "AYAHUASCA" => "0-5",
        "COMPETE" => "12-18",
        "PODIUM" => "18+",
        _ => "8-12",
    }
}

/// A one-line description of a tier's training week.
pub fn weekly_structure(tier: &str) -> &'static str {
    match tier {
        "AYAHUASCA" => "3-4 sessions per week: 2 high-intensity intervals, 1-2 endurance rides",
        "COMPETE" => "5-6 sessions per week: 2-3 intervals, 2-3 endurance rides, 1 long ride, 1 recovery",
        "PODIUM" => "6-7 sessions per week: 3 intervals, 2-3 endurance rides, 1 long ride, 1-2 recovery",
        _ => "4-5 sessions per week: 1-2 intervals, 2-3 endurance rides, 1 long weekend ride",
    }
}

/// The plan's display title, e.g. `Unbound 200 &ndash; FINISHER &middot;
/// Intermediate (Solid Finisher Plan)`.
pub fn plan_title(tier: &str, level: &str, race_name: &str) -> String {
    match level {
        "Save My Race" => match tier {
            "AYAHUASCA" | "COMPETE" | "FINISHER" => format!(
                "{} &ndash; {} &middot; Save My Race (6 weeks)",
                race_name, tier
            ),
            _ => format!("{} &ndash; {} &middot; Save My Race", race_name, tier),
        },
        "Masters" => format!(
            "{} &ndash; {} &middot; Masters (12 weeks)",
            race_name, tier
        ),
        "Advanced GOAT" => format!(
            "{} &ndash; PODIUM &middot; Advanced GOAT (12 weeks)",
            race_name
        ),
        _ => {
            let subtitle = match plan_name(tier, level) {
                Some(name) => name.to_owned(),
                None => format!("{} Plan", level),
            };
            format!(
                "{} &ndash; {} &middot; {} ({})",
                race_name, tier, level, subtitle
            )
        }
    }
}

fn plan_name(tier: &str, level: &str) -> Option<&'static str> {
    match (tier, level) {
        ("AYAHUASCA", "Beginner") => Some("Survival Plan"),
        ("AYAHUASCA", "Intermediate") | ("AYAHUASCA", "Advanced") => Some("Time Crunched Plan"),
        ("FINISHER", "Beginner") => Some("First Timer Plan"),
        ("FINISHER", "Intermediate") => Some("Solid Finisher Plan"),
        ("FINISHER", "Advanced") => Some("Strong Finish Plan"),
        ("COMPETE", "Intermediate") => Some("Competitive Plan"),
        ("COMPETE", "Advanced") => Some("Podium Contender Plan"),
        ("PODIUM", "Advanced") => Some("Elite Preparation Plan"),
        _ => None,
    }
}

/// Who an ability level is for.
pub fn ability_explanation(level: &str) -> &'static str {
    match level {
        "Beginner" => "You're a beginner if you've never trained systematically for endurance sports, you're currently out of shape or returning after significant time off (2+ years), you don't know your FTP, and long rides for you are 1-2 hours. Beginner plans build base fitness first. They assume you need to develop aerobic capacity, muscular endurance, and durability before you can handle intensity.",
        "Advanced" => "You're advanced if you're already fast, you've raced seriously, you know your FTP and understand interval structure, and your current fitness supports 4-6 hour rides. Advanced plans use block periodization or the GOAT Method&mdash;concentrated periods of specific intensity followed by recovery. They assume you know your body well enough to execute hard sessions without burying yourself.",
        "Masters" => "You're 50+ (or 40+ with significant recovery needs) with intermediate experience. Masters plans use moderate volume, emphasize recovery, and integrate HRV monitoring for autoregulation. They acknowledge that recovery takes longer as you age.",
        "Save My Race" => "You're short on time but have training experience. This 6-week emergency plan maximizes fitness gains from minimal time using high-intensity interval training to sharpen existing fitness quickly.",
        _ => "You're intermediate if you've got endurance sports background, you're currently fit enough to ride 3-4 hours without falling apart, you understand pacing and fueling, and you've done structured training before. Intermediate plans assume you can handle two quality sessions per week plus endurance volume. They use polarized training (80% easy, 20% hard) because your body can absorb that stress.",
    }
}

/// What a tier's training volume looks like.
pub fn volume_explanation(tier: &str) -> &'static str {
    match tier {
        "AYAHUASCA" => "Ayahuasca plans use high-intensity interval training (HIIT) to maximize fitness from minimal time. Two to three hard sessions per week, short endurance rides, and minimal long rides (capped at 2-3 hours). Critical caveat: These plans assume you already have fitness and experience. HIIT doesn't build base fitness&mdash;it sharpens existing fitness.",
        "COMPETE" => "You're training to race properly. Not just participate&mdash;compete. Compete plans include three to four quality sessions per week, multiple endurance rides, and long rides that hit 5-6 hours with race-specific intensity. You're building threshold power, repeatability, and the ability to hold race pace for hours. This volume typically places riders in the top third of the field.",
        "PODIUM" => "Professional-level commitment. At this volume, you're managing recovery protocols, tracking performance metrics closely, and building elite-level fitness. Podium plans use integrated pyramidal approaches or block periodization&mdash;massive aerobic base with strategic intensity throughout. This is for athletes who can handle 18-25+ hours per week consistently.",
        _ => "This is the sweet spot for most gravel racers. You've got enough time to build a real aerobic base, practice race-specific intensity, and complete long rides that prepare you for race distance. Finisher plans include two quality sessions per week, several endurance rides, and one long ride that builds to 4-5 hours by peak weeks. This volume is enough to finish strong at most gravel races.",
    }
}

/// Realistic race-day expectations for a tier, with a note for beginners and
/// advanced riders where it applies.
pub fn performance_expectations(tier: &str, level: &str) -> String {
    let base = match tier {
        "AYAHUASCA" => "With 0-5 hours per week, you're building minimal viable fitness. This is survival mode training. Realistic expectations: You'll finish the race, but it will be hard. You won't be competitive, but you'll complete the distance. If you're a true beginner on an Ayahuasca plan, adjust expectations further&mdash;you're showing up underprepared and should prioritize finishing over performance.",
        "COMPETE" => "With 12-18 hours per week, you're building race fitness. Realistic expectations: You'll be competitive. This volume typically places you in the top third of the field at most gravel races. You'll finish strong, potentially negative split, and have the fitness to respond to race dynamics. You're not just participating&mdash;you're racing.",
        "PODIUM" => "With 18-25+ hours per week, you're building elite-level fitness. Realistic expectations: You're training to compete at the front. This volume supports top-10 to podium finishes at most races, assuming you have the talent and race execution. You're managing everything like a professional&mdash;recovery, nutrition, training load, and performance metrics.",
        _ => "With 8-12 hours per week, you're building solid aerobic base and race-specific fitness. Realistic expectations: You'll finish strong at a moderate pace. You won't be competing for podiums at Tier 1 events, but you'll complete the distance without heroics. This volume typically places you in the middle to back half of the field at competitive races, but you'll finish with energy left.",
    };

    let nuance = match (level, tier) {
        ("Beginner", t) if t != "AYAHUASCA" => " As a beginner, focus on execution and learning. Your first race is about finishing and gaining experience, not setting records.",
        ("Advanced", "FINISHER") | ("Advanced", "COMPETE") => " As an advanced athlete, you'll maximize the fitness gains from this volume. Your experience helps you execute the plan more effectively than intermediate athletes.",
        _ => "",
    };

    format!("{}{}", base, nuance)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_weekly_hours() {
        assert_eq!("0-5", weekly_hours("AYAHUASCA"));
        assert_eq!("18+", weekly_hours("PODIUM"));
        assert_eq!("8-12", weekly_hours("UNKNOWN"));
        assert_eq!(weekly_structure("FINISHER"), weekly_structure("nope"));
    }

    #[test]
    fn test_plan_title() {
        assert_eq!(
            "Unbound &ndash; FINISHER &middot; Intermediate (Solid Finisher Plan)",
            plan_title("FINISHER", "Intermediate", "Unbound")
        );
        assert_eq!(
            "Unbound &ndash; PODIUM &middot; Beginner (Beginner Plan)",
            plan_title("PODIUM", "Beginner", "Unbound")
        );
        assert_eq!(
            "Unbound &ndash; PODIUM &middot; Save My Race",
            plan_title("PODIUM", "Save My Race", "Unbound")
        );
        assert_eq!(
            "Unbound &ndash; COMPETE &middot; Save My Race (6 weeks)",
            plan_title("COMPETE", "Save My Race", "Unbound")
        );
        assert_eq!(
            "Unbound &ndash; PODIUM &middot; Advanced GOAT (12 weeks)",
            plan_title("FINISHER", "Advanced GOAT", "Unbound")
        );
    }

    #[test]
    fn test_performance_expectations_nuance() {
        assert!(performance_expectations("FINISHER", "Beginner").ends_with("not setting records."));
        assert!(!performance_expectations("AYAHUASCA", "Beginner").contains("As a beginner"));
        assert!(performance_expectations("COMPETE", "Advanced").contains("As an advanced athlete"));
        assert!(!performance_expectations("PODIUM", "Advanced").contains("As an advanced athlete"));
        assert_eq!(
            performance_expectations("FINISHER", "Intermediate"),
            performance_expectations("MYSTERY", "Intermediate")
        );
    }

    #[test]
    fn test_explanations_fall_back() {
        assert_eq!(ability_explanation("Intermediate"), ability_explanation("Expert"));
        assert_eq!(volume_explanation("FINISHER"), volume_explanation(""));
    }

    #[test]
    fn test_prose_uses_mdash_entities() {
        assert!(ability_explanation("Advanced").contains("GOAT Method&mdash;concentrated"));
        assert!(volume_explanation("COMPETE").contains("Not just participate&mdash;compete."));
        assert!(performance_expectations("COMPETE", "Intermediate")
            .contains("not just participating&mdash;you're racing."));
        assert!(volume_explanation("AYAHUASCA").contains("base fitness&mdash;it sharpens"));
    }
}
