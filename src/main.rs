use anyhow::Result;
use clap::{App, Arg, ArgMatches};
use guidegen::build::build_guide;
use guidegen::config::{Config, Mode};
use guidegen::util::input_directory;
use std::path::{Path, PathBuf};

fn main() {
    let matches = App::new("guidegen")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generates static HTML training guides from JSON race data")
        .arg(
            Arg::with_name("INPUT")
                .help("The JSON race data")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("OUTPUT")
                .help("Where to write the HTML guide")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::with_name("mode")
                .long("mode")
                .takes_value(true)
                .possible_values(&["auto", "structured", "race"])
                .help("Which generator to use"),
        )
        .arg(
            Arg::with_name("tier")
                .long("tier")
                .takes_value(true)
                .help("Training tier: AYAHUASCA, FINISHER, COMPETE or PODIUM"),
        )
        .arg(
            Arg::with_name("level")
                .long("level")
                .takes_value(true)
                .help("Ability level: Beginner, Intermediate, Advanced, Masters or Save My Race"),
        )
        .arg(
            Arg::with_name("stylesheet")
                .long("stylesheet")
                .takes_value(true)
                .value_name("FILE")
                .help("Replaces the embedded stylesheet"),
        )
        .arg(
            Arg::with_name("page-template")
                .long("page-template")
                .takes_value(true)
                .value_name("FILE")
                .help("Replaces the embedded page shell for structured guides"),
        )
        .arg(
            Arg::with_name("template")
                .long("template")
                .takes_value(true)
                .value_name("FILE")
                .help("Replaces the embedded race template"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Logs each step in detail"),
        )
        .get_matches();

    let log_level = match matches.is_present("verbose") {
        true => "debug",
        false => "info",
    };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(false)
        .init();

    if let Err(e) = run(&matches) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<()> {
    // both are required, so clap has already rejected a missing one
    let input = Path::new(matches.value_of("INPUT").unwrap_or_default());
    let output = Path::new(matches.value_of("OUTPUT").unwrap_or_default());

    let mut config = Config::from_directory(&input_directory(input), input, output)?;
    if let Some(mode) = matches.value_of("mode") {
        config.mode = mode.parse::<Mode>()?;
    }
    if let Some(tier) = matches.value_of("tier") {
        config.tier = Some(tier.to_owned());
    }
    if let Some(level) = matches.value_of("level") {
        config.level = Some(level.to_owned());
    }
    if let Some(path) = matches.value_of("stylesheet") {
        config.theme.stylesheet = Some(PathBuf::from(path));
    }
    if let Some(path) = matches.value_of("page-template") {
        config.theme.page_template = Some(PathBuf::from(path));
    }
    if let Some(path) = matches.value_of("template") {
        config.theme.race_template = Some(PathBuf::from(path));
    }

    build_guide(&config)?;
    Ok(())
}
