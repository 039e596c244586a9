//! Filesystem scanner for submission logs and score files.
//!
//! Everything here is deliberately forgiving: a missing log or score file
//! is absent data, a malformed score text is an ungraded slot. The scanner
//! never fails the run; it warns and moves on.

use crate::models::SubmissionRow;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Reads submission logs and per-student score files under one base
/// directory.
pub struct ScoreScanner {
    base_dir: PathBuf,
}

impl ScoreScanner {
    /// Create a scanner rooted at the score directory.
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Path of the submission log for one (server, assignment) pair.
    pub fn submission_log_path(&self, server: &str, assignment: u32) -> PathBuf {
        self.base_dir
            .join(server)
            .join(format!("assignment{}_update_log.csv", assignment))
    }

    /// Parse one submission log into its rows.
    ///
    /// A missing file contributes nothing. Rows that fail to deserialize
    /// (missing id column, broken encoding) are skipped with a warning,
    /// never fatal.
    pub fn parse_submission_log(&self, server: &str, assignment: u32) -> Vec<SubmissionRow> {
        let path = self.submission_log_path(server, assignment);

        let content = match read_text(&path) {
            Some(content) => content,
            None => {
                debug!("No submission log at {}", path.display());
                return Vec::new();
            }
        };

        let mut reader = csv::Reader::from_reader(content.as_bytes());
        let mut rows = Vec::new();

        for result in reader.deserialize::<SubmissionRow>() {
            match result {
                Ok(row) => rows.push(row),
                Err(e) => {
                    warn!("Skipping malformed row in {}: {}", path.display(), e);
                }
            }
        }

        rows
    }

    /// Resolve the score for one (server, student, assignment) triple.
    ///
    /// Tries the `{N}-score.txt` naming first, then `{N}_score.txt`. The
    /// first file that exists is read and its parse result is final; a
    /// present-but-malformed primary yields an ungraded slot rather than
    /// falling through to the secondary file.
    pub fn fetch_score(&self, server: &str, student_id: &str, assignment: u32) -> Option<f64> {
        let student_dir = self.base_dir.join(server).join(format!("stu{}", student_id));

        let primary = student_dir.join(format!("{}-score.txt", assignment));
        let secondary = student_dir.join(format!("{}_score.txt", assignment));

        let text = read_text(&primary).or_else(|| read_text(&secondary))?;
        parse_score_text(&text)
    }
}

/// Read a text file, stripping a UTF-8 BOM if present.
///
/// Returns `None` for missing or unreadable files; the caller treats both
/// as absent data.
fn read_text(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(content) => Some(content.trim_start_matches('\u{feff}').to_string()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => {
            warn!("Failed to read {}: {}", path.display(), e);
            None
        }
    }
}

/// Parse a score text into a numeric value.
///
/// Accepted formats:
/// - a bare number: `"10"` -> 10.0
/// - achieved over maximum: `"18.5/20"` -> 18.5 (only achieved is kept)
///
/// Empty or non-numeric content yields `None`.
pub fn parse_score_text(text: &str) -> Option<f64> {
    let text = text.trim();
    let achieved = match text.split_once('/') {
        Some((achieved, _)) => achieved.trim(),
        None => text,
    };
    achieved.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_parse_score_text_plain() {
        assert_eq!(parse_score_text("10"), Some(10.0));
        assert_eq!(parse_score_text(" 7.5 \n"), Some(7.5));
        assert_eq!(parse_score_text("0"), Some(0.0));
    }

    #[test]
    fn test_parse_score_text_fraction() {
        assert_eq!(parse_score_text("18.5/20"), Some(18.5));
        assert_eq!(parse_score_text(" 9 / 10 "), Some(9.0));
    }

    #[test]
    fn test_parse_score_text_malformed() {
        assert_eq!(parse_score_text(""), None);
        assert_eq!(parse_score_text("abc"), None);
        assert_eq!(parse_score_text("abc/20"), None);
        assert_eq!(parse_score_text("/20"), None);
    }

    #[test]
    fn test_parse_submission_log_basic() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "58/assignment1_update_log.csv",
            "学号,姓名\n2023001,张三\n2023002,李四\n",
        );

        let scanner = ScoreScanner::new(tmp.path().to_path_buf());
        let rows = scanner.parse_submission_log("58", 1);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].student_id, "2023001");
        assert_eq!(rows[0].name, "张三");
        assert_eq!(rows[1].student_id, "2023002");
    }

    #[test]
    fn test_parse_submission_log_strips_bom() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "58/assignment1_update_log.csv",
            "\u{feff}学号,姓名\n2023001,张三\n",
        );

        let scanner = ScoreScanner::new(tmp.path().to_path_buf());
        let rows = scanner.parse_submission_log("58", 1);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].student_id, "2023001");
    }

    #[test]
    fn test_parse_submission_log_missing_file() {
        let tmp = TempDir::new().unwrap();
        let scanner = ScoreScanner::new(tmp.path().to_path_buf());
        assert!(scanner.parse_submission_log("58", 1).is_empty());
    }

    #[test]
    fn test_parse_submission_log_extra_columns_ignored() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "132/assignment3_update_log.csv",
            "学号,姓名,提交时间\n2023001,张三,2024-01-01 10:00\n",
        );

        let scanner = ScoreScanner::new(tmp.path().to_path_buf());
        let rows = scanner.parse_submission_log("132", 3);
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_fetch_score_primary_naming() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "58/stu2023001/1-score.txt", "8.5");

        let scanner = ScoreScanner::new(tmp.path().to_path_buf());
        assert_eq!(scanner.fetch_score("58", "2023001", 1), Some(8.5));
    }

    #[test]
    fn test_fetch_score_secondary_naming() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "58/stu2023001/2_score.txt", "18.5/20");

        let scanner = ScoreScanner::new(tmp.path().to_path_buf());
        assert_eq!(scanner.fetch_score("58", "2023001", 2), Some(18.5));
    }

    #[test]
    fn test_fetch_score_primary_wins_over_secondary() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "58/stu2023001/1-score.txt", "9");
        write(tmp.path(), "58/stu2023001/1_score.txt", "3");

        let scanner = ScoreScanner::new(tmp.path().to_path_buf());
        assert_eq!(scanner.fetch_score("58", "2023001", 1), Some(9.0));
    }

    #[test]
    fn test_fetch_score_malformed_primary_does_not_fall_through() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "58/stu2023001/1-score.txt", "pending");
        write(tmp.path(), "58/stu2023001/1_score.txt", "10");

        // The fallback is on file existence, not parseability.
        let scanner = ScoreScanner::new(tmp.path().to_path_buf());
        assert_eq!(scanner.fetch_score("58", "2023001", 1), None);
    }

    #[test]
    fn test_fetch_score_missing() {
        let tmp = TempDir::new().unwrap();
        let scanner = ScoreScanner::new(tmp.path().to_path_buf());
        assert_eq!(scanner.fetch_score("58", "2023001", 1), None);
    }
}
