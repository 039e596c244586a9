//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.scores.toml` files. Every default mirrors the course layout the tool
//! was written for, so the zero-config invocation works on a checkout of
//! the course repository as-is.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Course layout settings.
    #[serde(default)]
    pub course: CourseConfig,

    /// Input/output path settings.
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Course layout: servers, assignment count, scoring constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseConfig {
    /// Submission servers in merge-precedence order. The first server that
    /// yields a parseable score for a slot wins.
    #[serde(default = "default_servers")]
    pub servers: Vec<String>,

    /// Number of homework assignments (1-based indices 1..=N).
    #[serde(default = "default_max_assignments")]
    pub max_assignments: u32,

    /// Lecture-attendance credit added to every student's total.
    #[serde(default = "default_lecture_score")]
    pub lecture_score: f64,

    /// Key in `extra.yaml` holding the score substitutions.
    #[serde(default = "default_competition")]
    pub competition: String,

    /// Full score for assignments not listed in `full_score_overrides`.
    #[serde(default = "default_full_score")]
    pub default_full_score: f64,

    /// Assignments whose full score differs from the default.
    #[serde(default = "default_full_score_overrides")]
    pub full_score_overrides: Vec<FullScoreOverride>,
}

/// One entry of the per-assignment full-score table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FullScoreOverride {
    /// 1-based assignment index.
    pub assignment: u32,
    /// Maximum attainable score for that assignment.
    pub full_score: f64,
}

impl Default for CourseConfig {
    fn default() -> Self {
        Self {
            servers: default_servers(),
            max_assignments: default_max_assignments(),
            lecture_score: default_lecture_score(),
            competition: default_competition(),
            default_full_score: default_full_score(),
            full_score_overrides: default_full_score_overrides(),
        }
    }
}

fn default_servers() -> Vec<String> {
    vec!["58", "132", "197"].into_iter().map(String::from).collect()
}

fn default_max_assignments() -> u32 {
    7
}

fn default_lecture_score() -> f64 {
    30.0
}

fn default_competition() -> String {
    "图书馆 agent 比赛".to_string()
}

fn default_full_score() -> f64 {
    10.0
}

fn default_full_score_overrides() -> Vec<FullScoreOverride> {
    vec![
        FullScoreOverride { assignment: 5, full_score: 5.0 },
        FullScoreOverride { assignment: 6, full_score: 5.0 },
        FullScoreOverride { assignment: 7, full_score: 20.0 },
    ]
}

/// Input and output locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Score directory root, containing one subdirectory per server.
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,

    /// Override file name, resolved relative to `base_dir`.
    #[serde(default = "default_extra_file")]
    pub extra_file: String,

    /// Default workbook output path.
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            extra_file: default_extra_file(),
            output: default_output(),
        }
    }
}

fn default_base_dir() -> PathBuf {
    PathBuf::from("docs/public/score")
}

fn default_extra_file() -> String {
    "extra.yaml".to_string()
}

fn default_output() -> PathBuf {
    PathBuf::from("学生作业成绩统计.xlsx")
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but
    /// can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".scores.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings; only
    /// explicitly provided values override.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref base_dir) = args.base_dir {
            self.paths.base_dir = base_dir.clone();
        }
        if let Some(ref output) = args.output {
            self.paths.output = output.clone();
        }
    }

    /// Full score for an assignment, for display in roster listings.
    pub fn full_score(&self, assignment: u32) -> f64 {
        self.course
            .full_score_overrides
            .iter()
            .find(|o| o.assignment == assignment)
            .map(|o| o.full_score)
            .unwrap_or(self.course.default_full_score)
    }

    /// Path of the override file, relative to the base directory.
    pub fn extra_path(&self) -> PathBuf {
        self.paths.base_dir.join(&self.paths.extra_file)
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.course.servers, vec!["58", "132", "197"]);
        assert_eq!(config.course.max_assignments, 7);
        assert_eq!(config.course.lecture_score, 30.0);
        assert_eq!(config.paths.base_dir, PathBuf::from("docs/public/score"));
    }

    #[test]
    fn test_full_score_table() {
        let config = Config::default();
        assert_eq!(config.full_score(1), 10.0);
        assert_eq!(config.full_score(4), 10.0);
        assert_eq!(config.full_score(5), 5.0);
        assert_eq!(config.full_score(6), 5.0);
        assert_eq!(config.full_score(7), 20.0);
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[course]
servers = ["10", "20"]
max_assignments = 3
lecture_score = 20.0

[paths]
base_dir = "scores"
output = "out.xlsx"

[[course.full_score_overrides]]
assignment = 3
full_score = 15.0
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.course.servers, vec!["10", "20"]);
        assert_eq!(config.course.max_assignments, 3);
        assert_eq!(config.course.lecture_score, 20.0);
        assert_eq!(config.paths.base_dir, PathBuf::from("scores"));
        assert_eq!(config.paths.output, PathBuf::from("out.xlsx"));
        assert_eq!(config.full_score(3), 15.0);
        // Unlisted assignments fall back to the default full score.
        assert_eq!(config.full_score(1), 10.0);
    }

    #[test]
    fn test_extra_path_joins_base_dir() {
        let config = Config::default();
        assert_eq!(
            config.extra_path(),
            PathBuf::from("docs/public/score/extra.yaml")
        );
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[course]"));
        assert!(toml_str.contains("[paths]"));
        assert!(toml_str.contains("full_score_overrides"));
    }
}
