//! Output rendering.
//!
//! The real product is the Excel workbook; the dry-run roster listing is a
//! plain-text view over the same data.

pub mod excel;
pub mod listing;

pub use excel::{write_workbook, ExportError};
pub use listing::roster_listing;
