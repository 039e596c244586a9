//! Student discovery and score merging.

use crate::config::Config;
use crate::models::{Roster, StudentRecord};
use crate::overrides::Overrides;
use crate::scanner::ScoreScanner;
use tracing::debug;

/// Collect one record per distinct student across all servers and
/// assignments, then apply competition overrides.
///
/// Iteration order is fixed (servers in config order, assignments 1..=N,
/// CSV rows in file order), so a given directory snapshot always produces
/// the same roster.
pub fn collect_students(scanner: &ScoreScanner, config: &Config, overrides: &Overrides) -> Roster {
    let mut roster = Roster::new();
    let assignment_count = config.course.max_assignments;

    for server in &config.course.servers {
        for assignment in 1..=assignment_count {
            for row in scanner.parse_submission_log(server, assignment) {
                let student_id = row.student_id.trim();
                if student_id.is_empty() {
                    continue;
                }

                let record = roster.entry(student_id.to_string()).or_insert_with(|| {
                    StudentRecord::new(
                        student_id.to_string(),
                        row.name.trim().to_string(),
                        assignment_count as usize,
                    )
                });

                // First server with a parseable score wins this slot;
                // once set, later servers are not consulted.
                let slot = (assignment - 1) as usize;
                if record.scores[slot].is_none() {
                    if let Some(score) = scanner.fetch_score(server, student_id, assignment) {
                        debug!(%server, student_id, assignment, score, "Score merged");
                        record.scores[slot] = Some(score);
                    }
                }
            }
        }
    }

    apply_overrides(&mut roster, overrides, assignment_count);
    roster
}

/// Force-replace assignment slots named by competition overrides.
///
/// An override always wins, even over a merged non-zero value. Entries
/// without a target assignment, or with one outside 1..=N, are ignored.
pub fn apply_overrides(roster: &mut Roster, overrides: &Overrides, max_assignments: u32) {
    if overrides.is_empty() {
        return;
    }

    for record in roster.values_mut() {
        let Some(entry) = overrides.lookup(&record.student_id) else {
            continue;
        };
        let Some(target) = entry.substitute_homework else {
            continue;
        };

        if (1..=max_assignments).contains(&target) {
            debug!(
                student_id = %record.student_id,
                target,
                score = entry.score,
                "Override applied"
            );
            record.scores[(target - 1) as usize] = Some(entry.score);
        } else {
            debug!(
                student_id = %record.student_id,
                target, "Override target out of range, ignored"
            );
        }
    }
}

/// Total number of graded slots across the roster, for the run summary.
pub fn graded_slot_count(roster: &Roster) -> usize {
    roster.values().map(StudentRecord::graded_count).sum()
}
