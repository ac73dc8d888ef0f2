use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn testdata(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("testdata").join(name)
}

fn guidegen(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_guidegen"))
        .args(args)
        .output()
        .unwrap()
}

fn generate(input: &Path, extra: &[&str]) -> String {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("guides").join("guide.html");
    let mut args = vec![input.to_str().unwrap(), output.to_str().unwrap()];
    args.extend_from_slice(extra);
    let result = guidegen(&args);
    assert!(
        result.status.success(),
        "guidegen failed: {}",
        String::from_utf8_lossy(&result.stderr)
    );
    fs::read_to_string(&output).unwrap()
}

#[test]
fn test_structured_guide() {
    let html = generate(&testdata("guide.json"), &[]);
    assert!(html.contains("<title>Unbound Gravel 200 Training Guide | FINISHER - Intermediate</title>"));
    assert!(html.contains("<a href=\"#section-welcome\">Welcome</a>"));
    assert!(html.contains("<div class=\"graphic-title\">Course Demands</div>"));
    assert!(html.contains("<tr class=\"g-spot-row\">"));
    assert!(html.contains("<div class=\"callout-title\">Race-Specific Notes</div>"));
    assert!(html.contains("<p>Start easy.</p>"));
    assert!(html.contains("<div class=\"glossary-term\">FTP</div>"));
    assert!(html.contains("<p class=\"footer-motto\">Ride. Recover. Repeat.</p>"));
    assert_eq!(1, html.matches("<script>").count());
}

#[test]
fn test_race_guide() {
    let html = generate(&testdata("race.json"), &["--tier", "COMPETE", "--level", "Advanced"]);
    assert!(html.contains("<h1>Leadville 100 MTB</h1>"));
    assert!(html.contains("Leadville 100 MTB &ndash; COMPETE &middot; Advanced (Podium Contender Plan)"));
    assert!(html.contains("<h3>Altitude</h3>"));
    assert!(html.contains("~17.8% power loss at 10,152 ft"));
    assert!(html.contains("<h4>Altitude Simulation</h4>"));
    assert!(html.contains("{{KEY_WORKOUT_3_NAME}}"));
    assert!(html.contains("Tires: 2.2in"));
    assert!(!html.contains("{{RACE_NAME}}"));
}

#[test]
fn test_forced_mode() {
    // a structured document rendered as a race falls back to race defaults
    let html = generate(&testdata("guide.json"), &["--mode", "race"]);
    assert!(html.contains("<h1>Race Name</h1>"));
    assert!(!html.contains("<h3>Altitude</h3>"));
}

#[test]
fn test_repeatable_output() {
    let input = testdata("race.json");
    assert_eq!(generate(&input, &[]), generate(&input, &[]));
}

#[test]
fn test_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("missing.json");
    let output = dir.path().join("out.html");
    let result = guidegen(&[input.to_str().unwrap(), output.to_str().unwrap()]);
    assert_eq!(Some(1), result.status.code());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("Error: Input file '"));
    assert!(stderr.contains("missing.json' not found"));
    assert!(!output.exists());
}

#[test]
fn test_malformed_json() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.json");
    fs::write(&input, "{\"name\": ").unwrap();
    let output = dir.path().join("out.html");
    let result = guidegen(&[input.to_str().unwrap(), output.to_str().unwrap()]);
    assert_eq!(Some(1), result.status.code());
    assert!(String::from_utf8_lossy(&result.stderr).contains("Parsing JSON in"));
}

#[test]
fn test_missing_arguments() {
    let result = guidegen(&[]);
    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("USAGE"));
}

#[test]
fn test_project_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::copy(testdata("race.json"), dir.path().join("race.json")).unwrap();
    fs::write(dir.path().join("plain.css"), ".plain { margin: 0; }").unwrap();
    fs::write(
        dir.path().join("guidegen.yaml"),
        "stylesheet: plain.css\ntier: PODIUM\n",
    )
    .unwrap();

    let html = generate(&dir.path().join("race.json"), &[]);
    assert!(html.contains(".plain { margin: 0; }"));
    assert!(html.contains("<span class=\"tier-badge\">PODIUM Tier</span>"));
}
