use crate::theme::ThemeFiles;
use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// The name of the optional project file.
pub const PROJECT_FILE: &str = "guidegen.yaml";

/// Which generator handles the input.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Structured when the input has a top-level `meta` or `sections` key,
    /// race otherwise.
    #[default]
    Auto,
    Structured,
    Race,
}

impl FromStr for Mode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Mode> {
        match s {
            "auto" => Ok(Mode::Auto),
            "structured" => Ok(Mode::Structured),
            "race" => Ok(Mode::Race),
            _ => Err(anyhow!(
                "Unknown mode `{}`: expected auto, structured or race",
                s
            )),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Mode::Auto => "auto",
            Mode::Structured => "structured",
            Mode::Race => "race",
        })
    }
}

#[derive(Deserialize)]
struct Project {
    stylesheet: Option<PathBuf>,
    page_template: Option<PathBuf>,
    race_template: Option<PathBuf>,
    tier: Option<String>,
    ability_level: Option<String>,

    #[serde(default)]
    mode: Mode,
}

pub struct Config {
    pub input: PathBuf,
    pub output: PathBuf,
    pub mode: Mode,
    pub tier: Option<String>,
    pub level: Option<String>,
    pub theme: ThemeFiles,
}

impl Config {
    /// A configuration with no project file: embedded theme, auto mode.
    pub fn new(input: &Path, output: &Path) -> Config {
        Config {
            input: input.to_owned(),
            output: output.to_owned(),
            mode: Mode::Auto,
            tier: None,
            level: None,
            theme: ThemeFiles::default(),
        }
    }

    /// Looks for [`PROJECT_FILE`] in `dir` and each of its ancestors. The
    /// nearest one is loaded; with none, the defaults from [`Config::new`]
    /// apply.
    pub fn from_directory(dir: &Path, input: &Path, output: &Path) -> Result<Config> {
        let path = dir.join(PROJECT_FILE);
        if path.exists() {
            match Config::from_project_file(&path, input, output) {
                Ok(config) => Ok(config),
                Err(e) => Err(anyhow!("Loading configuration: {:?}", e)),
            }
        } else {
            match dir.parent() {
                Some(dir) => Config::from_directory(dir, input, output),
                None => Ok(Config::new(input, output)),
            }
        }
    }

    /// Loads a project file. Relative theme paths resolve against the
    /// project file's directory.
    pub fn from_project_file(path: &Path, input: &Path, output: &Path) -> Result<Config> {
        use crate::util::open;
        let project: Project = serde_yaml::from_reader(open(path, "project")?)?;
        match path.parent() {
            None => Err(anyhow!(
                "Can't get parent directory for provided project file path '{:?}'",
                path
            )),
            Some(project_root) => {
                let resolve = |relpath: Option<PathBuf>| relpath.map(|p| project_root.join(p));
                Ok(Config {
                    input: input.to_owned(),
                    output: output.to_owned(),
                    mode: project.mode,
                    tier: project.tier,
                    level: project.ability_level,
                    theme: ThemeFiles {
                        stylesheet: resolve(project.stylesheet),
                        page_template: resolve(project.page_template),
                        race_template: resolve(project.race_template),
                    },
                })
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;

    #[test]
    fn test_from_project_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PROJECT_FILE);
        fs::write(
            &path,
            "stylesheet: theme/custom.css\nmode: race\ntier: COMPETE\nability_level: Advanced\n",
        )
        .unwrap();

        let config =
            Config::from_project_file(&path, Path::new("in.json"), Path::new("out.html")).unwrap();
        assert_eq!(Mode::Race, config.mode);
        assert_eq!(Some("COMPETE"), config.tier.as_deref());
        assert_eq!(Some("Advanced"), config.level.as_deref());
        assert_eq!(
            Some(dir.path().join("theme/custom.css")),
            config.theme.stylesheet
        );
        assert_eq!(None, config.theme.page_template);
    }

    #[test]
    fn test_from_directory_searches_ancestors() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("races").join("kansas");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join(PROJECT_FILE), "mode: structured\n").unwrap();

        let config =
            Config::from_directory(&nested, Path::new("in.json"), Path::new("out.html")).unwrap();
        assert_eq!(Mode::Structured, config.mode);
        assert_eq!(None, config.tier);
    }

    #[test]
    fn test_project_file_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PROJECT_FILE);
        fs::write(&path, "# nothing overridden\n{}\n").unwrap();
        let config =
            Config::from_project_file(&path, Path::new("in.json"), Path::new("out.html")).unwrap();
        assert_eq!(Mode::Auto, config.mode);
        assert_eq!(ThemeFiles::default(), config.theme);
    }

    #[test]
    fn test_invalid_project_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(PROJECT_FILE), "mode: sideways\n").unwrap();
        let result = Config::from_directory(dir.path(), Path::new("in.json"), Path::new("out.html"));
        assert!(result.is_err());
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!(Mode::Race, "race".parse::<Mode>().unwrap());
        assert!("fast".parse::<Mode>().is_err());
        assert_eq!("structured", Mode::Structured.to_string());
    }
}
