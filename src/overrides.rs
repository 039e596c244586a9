//! Competition override lookup from `extra.yaml`.
//!
//! The override file is a nested YAML map: competition name on top,
//! `stu<id>` keys underneath, each holding a replacement score and the
//! assignment it substitutes for. Only the configured competition's
//! entries are kept; the rest of the document is ignored.

use crate::models::OverrideEntry;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

/// Override entries for one competition, keyed by bare student id.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    entries: BTreeMap<String, OverrideEntry>,
}

impl Overrides {
    /// Load overrides from the given file for one competition.
    ///
    /// A missing file means no overrides. A file that exists but cannot be
    /// parsed also means no overrides, with a warning; a bad override file
    /// must never abort the export.
    pub fn load(path: &Path, competition: &str) -> Self {
        match Self::try_load(path, competition) {
            Ok(overrides) => overrides,
            Err(e) => {
                warn!("Ignoring override file {}: {:#}", path.display(), e);
                Self::default()
            }
        }
    }

    fn try_load(path: &Path, competition: &str) -> Result<Self> {
        if !path.exists() {
            debug!("No override file at {}", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        // Top level first, untyped, so unrelated keys with other shapes
        // don't poison the competition we care about.
        let doc: BTreeMap<String, serde_yaml::Value> =
            serde_yaml::from_str(&content).context("Not a YAML mapping")?;

        let entries = match doc.get(competition) {
            Some(value) => {
                let by_key: BTreeMap<String, OverrideEntry> =
                    serde_yaml::from_value(value.clone())
                        .with_context(|| format!("Bad entries under '{}'", competition))?;

                // Keys are written as `stu<id>`; index by bare id.
                by_key
                    .into_iter()
                    .map(|(key, entry)| {
                        let id = key.strip_prefix("stu").unwrap_or(&key).to_string();
                        (id, entry)
                    })
                    .collect()
            }
            None => {
                debug!("No '{}' section in {}", competition, path.display());
                BTreeMap::new()
            }
        };

        Ok(Self { entries })
    }

    /// Look up the override for one student, if any.
    pub fn lookup(&self, student_id: &str) -> Option<OverrideEntry> {
        self.entries.get(student_id).copied()
    }

    /// Number of loaded override entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no overrides were loaded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
