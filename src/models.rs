//! Data models for score aggregation.
//!
//! This module contains the core data structures shared by the scanner,
//! the merge step, and the workbook writer.

use serde::Deserialize;
use std::collections::BTreeMap;

/// One student's merged view across all submission servers.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentRecord {
    /// Unique student identifier (学号).
    pub student_id: String,
    /// Display name (姓名). First registration wins; later sightings of the
    /// same id never overwrite it.
    pub name: String,
    /// One slot per assignment, index 0 = assignment 1.
    ///
    /// `None` means ungraded, which is distinct from a real score of 0.
    pub scores: Vec<Option<f64>>,
}

impl StudentRecord {
    /// Creates a record with all assignment slots unset.
    pub fn new(student_id: String, name: String, assignment_count: usize) -> Self {
        Self {
            student_id,
            name,
            scores: vec![None; assignment_count],
        }
    }

    /// Sum of all graded assignments plus the lecture-attendance credit.
    ///
    /// The lecture credit is added unconditionally, so a student with no
    /// graded assignments totals exactly `lecture_score`.
    pub fn total(&self, lecture_score: f64) -> f64 {
        self.scores.iter().flatten().sum::<f64>() + lecture_score
    }

    /// Number of assignment slots that hold a score.
    pub fn graded_count(&self) -> usize {
        self.scores.iter().flatten().count()
    }
}

/// Roster keyed by student id.
///
/// `BTreeMap` iteration order is id-ascending, which is exactly the row
/// order the workbook requires, so no separate sort step is needed.
pub type Roster = BTreeMap<String, StudentRecord>;

/// One row of an `assignment{N}_update_log.csv` submission log.
///
/// Only the id and name columns matter; extra columns in the log are
/// ignored by the CSV deserializer.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionRow {
    /// Student identifier column.
    #[serde(rename = "学号")]
    pub student_id: String,
    /// Student display name column.
    #[serde(rename = "姓名", default)]
    pub name: String,
}

/// One competition substitution from `extra.yaml`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct OverrideEntry {
    /// Replacement score awarded for the competition project.
    pub score: f64,
    /// 1-based assignment index this score substitutes for. Entries
    /// without a target are informational only and never applied.
    #[serde(default)]
    pub substitute_homework: Option<u32>,
}
