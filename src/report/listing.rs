//! Plain-text roster listing for dry runs.

use crate::config::Config;
use crate::models::Roster;

/// Render the roster as one line per student.
///
/// Graded slots show `achieved/full` using the per-assignment full-score
/// table; ungraded slots show `-`.
pub fn roster_listing(roster: &Roster, config: &Config) -> String {
    let mut lines = Vec::with_capacity(roster.len());

    for record in roster.values() {
        let mut parts = vec![format!("{} {}", record.student_id, record.name)];

        for (slot, score) in record.scores.iter().enumerate() {
            let assignment = slot as u32 + 1;
            match score {
                Some(value) => parts.push(format!(
                    "作业{}: {}/{}",
                    assignment,
                    value,
                    config.full_score(assignment)
                )),
                None => parts.push(format!("作业{}: -", assignment)),
            }
        }

        parts.push(format!(
            "总分: {}",
            record.total(config.course.lecture_score)
        ));
        lines.push(parts.join("  "));
    }

    lines.join("\n")
}
