//! Excel workbook generation.
//!
//! Renders the merged roster into one worksheet: a formatted header row,
//! then one row per student in id-ascending order. Unset assignment slots
//! stay blank; they must never render as 0.

use crate::config::Config;
use crate::models::Roster;
use rust_xlsxwriter::{Color, Format, FormatAlign, Workbook, XlsxError};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Header fill color, white bold text on institutional blue.
const HEADER_FILL: u32 = 0x366092;

/// The one fatal failure mode of the whole pipeline: the workbook cannot
/// be produced or saved. Everything upstream degrades to absent data.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write workbook: {0}")]
    Workbook(#[from] XlsxError),
}

/// Write the roster to an Excel workbook at `path`.
pub fn write_workbook(roster: &Roster, config: &Config, path: &Path) -> Result<(), ExportError> {
    let assignment_count = config.course.max_assignments as usize;

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("学生成绩统计")?;

    let header_format = Format::new()
        .set_bold()
        .set_font_size(12)
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(HEADER_FILL))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);
    let centered = Format::new().set_align(FormatAlign::Center);
    let total_format = Format::new().set_bold().set_align(FormatAlign::Center);

    for (col, header) in header_labels(config.course.max_assignments)
        .iter()
        .enumerate()
    {
        sheet.write_string_with_format(0, col as u16, header, &header_format)?;
    }

    for (row_idx, record) in roster.values().enumerate() {
        let row = (row_idx + 1) as u32;

        sheet.write_string(row, 0, &record.student_id)?;
        sheet.write_string(row, 1, &record.name)?;

        for (slot, score) in record.scores.iter().enumerate() {
            // An unset slot is left blank; 0 is a real grade.
            if let Some(value) = score {
                sheet.write_number_with_format(row, (2 + slot) as u16, *value, &centered)?;
            }
        }

        let lecture_col = (2 + assignment_count) as u16;
        sheet.write_number_with_format(row, lecture_col, config.course.lecture_score, &centered)?;
        sheet.write_number_with_format(
            row,
            lecture_col + 1,
            record.total(config.course.lecture_score),
            &total_format,
        )?;
    }

    sheet.set_column_width(0, 15.0)?;
    sheet.set_column_width(1, 12.0)?;
    for col in 2..(assignment_count + 4) {
        sheet.set_column_width(col as u16, 10.0)?;
    }

    workbook.save(path)?;
    info!("Wrote {} student rows to {}", roster.len(), path.display());
    Ok(())
}

/// Header row labels: id, name, one per assignment, lecture credit, total.
pub fn header_labels(max_assignments: u32) -> Vec<String> {
    let mut headers = vec!["学号".to_string(), "姓名".to_string()];
    for assignment in 1..=max_assignments {
        headers.push(format!("作业{}", assignment));
    }
    headers.push("讲座课".to_string());
    headers.push("总分".to_string());
    headers
}
