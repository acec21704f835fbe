//! Organic conversion
//!
//! Maps a chemical fertilizer label to an organic equivalent, notes and
//! ordered preparation steps. A label with no entry degrades to an empty
//! suggestion; the caller still renders the chemical recommendation.

mod table;

use anyhow::{Context, Result};
use polars::prelude::*;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One row of the conversion table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionEntry {
    pub organic_equivalent: String,
    pub notes: String,
    pub preparation_steps: Vec<String>,
}

impl ConversionEntry {
    /// Entry returned for labels the table does not know
    pub fn unknown(label: &str) -> Self {
        Self {
            organic_equivalent: String::new(),
            notes: format!(
                "No organic mapping is known for '{}'. Apply the chemical fertilizer as directed.",
                label.trim()
            ),
            preparation_steps: Vec::new(),
        }
    }

    pub fn has_equivalent(&self) -> bool {
        !self.organic_equivalent.is_empty()
    }

    /// Plain-text preparation guide, one numbered step per line
    pub fn preparation_text(&self) -> String {
        self.preparation_steps
            .iter()
            .enumerate()
            .map(|(i, step)| format!("{}. {}", i + 1, step))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Case-normalized lookup key
fn normalize(label: &str) -> String {
    label.trim().to_lowercase()
}

/// Read-only fertilizer → organic lookup
#[derive(Debug, Clone)]
pub struct ConversionTable {
    entries: FxHashMap<String, ConversionEntry>,
}

impl Default for ConversionTable {
    fn default() -> Self {
        Self::embedded()
    }
}

impl ConversionTable {
    /// Build from `(fertilizer label, entry)` pairs
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, ConversionEntry)>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(label, entry)| (normalize(&label), entry))
                .collect(),
        }
    }

    /// Table compiled into the crate; covers every heuristic label
    pub fn embedded() -> Self {
        Self::from_entries(table::EMBEDDED.iter().map(|row| {
            (
                row.fertilizer.to_string(),
                ConversionEntry {
                    organic_equivalent: row.organic.to_string(),
                    notes: row.notes.to_string(),
                    preparation_steps: row.steps.iter().map(|s| s.to_string()).collect(),
                },
            )
        }))
    }

    /// Load from CSV
    ///
    /// Columns: `fertilizer, organic_equivalent, notes, preparation_steps`,
    /// where steps are `|`-separated. Rows without a fertilizer label are skipped.
    pub fn load_csv(path: &Path) -> Result<Self> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.into()))
            .with_context(|| format!("Failed to create CSV reader: {:?}", path))?
            .finish()
            .with_context(|| format!("Failed to load conversion table: {:?}", path))?;

        let column = |name: &str| -> Result<StringChunked> {
            Ok(df
                .column(name)
                .with_context(|| format!("Column '{}' not found", name))?
                .str()
                .with_context(|| format!("Column '{}' is not string type", name))?
                .clone())
        };
        let fertilizer = column("fertilizer")?;
        let organic = column("organic_equivalent")?;
        let notes = column("notes")?;
        let steps = column("preparation_steps")?;

        let mut entries = Vec::with_capacity(df.height());
        for idx in 0..df.height() {
            let Some(label) = fertilizer.get(idx) else {
                continue;
            };

            let preparation_steps = steps
                .get(idx)
                .map(|s| {
                    s.split('|')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(|s| s.to_string())
                        .collect()
                })
                .unwrap_or_default();

            entries.push((
                label.to_string(),
                ConversionEntry {
                    organic_equivalent: organic.get(idx).unwrap_or_default().trim().to_string(),
                    notes: notes.get(idx).unwrap_or_default().to_string(),
                    preparation_steps,
                },
            ));
        }

        let table = Self::from_entries(entries);
        tracing::info!("Loaded {} conversion entries from {:?}", table.len(), path);
        Ok(table)
    }

    /// Organic alternative for a fertilizer label (case-insensitive); never fails
    pub fn convert(&self, fertilizer_label: &str) -> ConversionEntry {
        match self.entries.get(&normalize(fertilizer_label)) {
            Some(entry) => entry.clone(),
            None => {
                tracing::debug!("No organic conversion for '{}'", fertilizer_label);
                ConversionEntry::unknown(fertilizer_label)
            }
        }
    }

    pub fn contains(&self, fertilizer_label: &str) -> bool {
        self.entries.contains_key(&normalize(fertilizer_label))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predict::HEURISTIC_LABELS;
    use std::io::Write;

    #[test]
    fn test_urea_converts() {
        let table = ConversionTable::embedded();
        let entry = table.convert("Urea");
        assert!(entry.has_equivalent());
        assert!(!entry.preparation_steps.is_empty());
    }

    #[test]
    fn test_lookup_is_case_normalized() {
        let table = ConversionTable::embedded();
        assert_eq!(table.convert("  uREA "), table.convert("Urea"));
        assert_eq!(table.convert("dap"), table.convert("DAP"));
    }

    #[test]
    fn test_unknown_label_degrades() {
        let table = ConversionTable::embedded();
        let entry = table.convert("Unobtainium");
        assert!(entry.organic_equivalent.is_empty());
        assert!(entry.preparation_steps.is_empty());
        assert!(entry.notes.contains("Unobtainium"));
        assert_eq!(entry.preparation_text(), "");
    }

    #[test]
    fn test_every_heuristic_label_has_an_entry() {
        let table = ConversionTable::embedded();
        for label in HEURISTIC_LABELS {
            assert!(table.contains(label), "missing conversion for {}", label);
        }
    }

    #[test]
    fn test_preparation_text_is_numbered() {
        let entry = ConversionEntry {
            organic_equivalent: "Compost".into(),
            notes: String::new(),
            preparation_steps: vec!["Collect waste".into(), "Turn weekly".into()],
        };
        assert_eq!(entry.preparation_text(), "1. Collect waste\n2. Turn weekly");
    }

    #[test]
    fn test_load_csv() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "fertilizer,organic_equivalent,notes,preparation_steps").unwrap();
        writeln!(file, "Urea,Vermicompost,Slow nitrogen release,Shred waste|Add worms| Harvest castings").unwrap();
        writeln!(file, "MOP,Wood Ash,Potassium source,Burn hardwood|Sieve ash").unwrap();
        file.flush().unwrap();

        let table = ConversionTable::load_csv(file.path()).unwrap();
        assert_eq!(table.len(), 2);

        let entry = table.convert("urea");
        assert_eq!(entry.organic_equivalent, "Vermicompost");
        assert_eq!(entry.preparation_steps, vec!["Shred waste", "Add worms", "Harvest castings"]);
        assert!(!table.contains("DAP"));
    }
}
