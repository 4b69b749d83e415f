/*!
 * Per-file translation report.
 *
 * One row per processed file with the counts of translated units, collected
 * during the run and written out once as CSV at the end.
 */

use std::path::Path;

use anyhow::{Context, Result};
use log::debug;

/// One report row
#[derive(Debug, Clone)]
pub struct ReportRow {
    /// Path relative to the site root
    pub rel_path: String,
    /// Absolute or as-given source path
    pub source_path: String,
    /// Destination path in the mirror
    pub dest_path: String,
    /// Text-unit count column
    pub text_units: String,
    /// Attribute-unit count column
    pub attr_units: String,
    /// Meta-unit count column (`pdf` for PDF pass rows)
    pub meta_units: String,
}

impl ReportRow {
    /// Row for a translated HTML document
    pub fn html(
        rel_path: &str,
        source_path: &Path,
        dest_path: &Path,
        counts: (usize, usize, usize),
    ) -> Self {
        Self {
            rel_path: rel_path.to_string(),
            source_path: source_path.display().to_string(),
            dest_path: dest_path.display().to_string(),
            text_units: counts.0.to_string(),
            attr_units: counts.1.to_string(),
            meta_units: counts.2.to_string(),
        }
    }

    /// Row for a text-extracted PDF
    pub fn pdf(rel_path: &str, source_path: &Path, dest_path: &Path) -> Self {
        Self {
            rel_path: rel_path.to_string(),
            source_path: source_path.display().to_string(),
            dest_path: dest_path.display().to_string(),
            text_units: "0".to_string(),
            attr_units: "0".to_string(),
            meta_units: "pdf".to_string(),
        }
    }
}

/// Collects rows during a run and writes the report once at the end
#[derive(Debug, Default)]
pub struct ReportWriter {
    rows: Vec<ReportRow>,
}

impl ReportWriter {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row
    pub fn add(&mut self, row: ReportRow) {
        self.rows.push(row);
    }

    /// Number of rows collected so far
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no rows were collected
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Write all rows as CSV, overwriting any existing report
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create report directory: {:?}", parent))?;
        }

        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("Failed to create report file: {:?}", path))?;

        writer
            .write_record(["rel_path", "src", "dst", "text_nodes", "attr_texts", "meta_texts"])
            .context("Failed to write report header")?;

        for row in &self.rows {
            writer
                .write_record([
                    &row.rel_path,
                    &row.source_path,
                    &row.dest_path,
                    &row.text_units,
                    &row.attr_units,
                    &row.meta_units,
                ])
                .context("Failed to write report row")?;
        }

        writer.flush().context("Failed to flush report")?;
        debug!("Wrote {} report row(s) to {:?}", self.rows.len(), path);
        Ok(())
    }
}
