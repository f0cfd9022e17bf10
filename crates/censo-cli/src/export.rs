//! CSV exports of the raw and consolidated record sets.
//!
//! Both exports are side channels for auditing a run; the workbook stays the
//! primary output. Headers use the Portuguese analyte labels so the files
//! read like the reports they came from.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use censo_model::{Analyte, ConsolidatedRecord, RawReportRecord};

use crate::pipeline::DAY_FORMAT;

/// Writes one row per extracted report with every pattern's raw text,
/// including ionized calcium. The `Data` cell carries the sample day only;
/// records without a timestamp leave it empty.
///
/// # Errors
///
/// Returns an error when the file cannot be created or written.
pub fn write_raw_csv(records: &[RawReportRecord], path: &Path) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("create {}", path.display()))?;

    let mut header = vec!["Paciente".to_string(), "Data".to_string()];
    header.extend(
        Analyte::ALL
            .iter()
            .map(|analyte| analyte.as_str().to_string()),
    );
    writer.write_record(&header).context("write CSV header")?;

    for record in records {
        let mut row = vec![
            record.patient_name.clone(),
            record
                .sample_date()
                .map(|day| day.format(DAY_FORMAT).to_string())
                .unwrap_or_default(),
        ];
        row.extend(
            Analyte::ALL
                .iter()
                .map(|analyte| record.values.get(analyte).cloned().unwrap_or_default()),
        );
        writer.write_record(&row).context("write CSV row")?;
    }

    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))?;
    info!(rows = records.len(), path = %path.display(), "raw CSV written");
    Ok(())
}

/// Writes one row per consolidated (patient, day) pair, covering the output
/// panel only. Analytes with no usable reading become empty cells.
///
/// # Errors
///
/// Returns an error when the file cannot be created or written.
pub fn write_consolidated_csv(records: &[ConsolidatedRecord], path: &Path) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("create {}", path.display()))?;

    let mut header = vec!["Paciente".to_string(), "Data".to_string()];
    header.extend(
        Analyte::OUTPUT
            .iter()
            .map(|analyte| analyte.as_str().to_string()),
    );
    writer.write_record(&header).context("write CSV header")?;

    for record in records {
        let mut row = vec![record.patient_name.clone(), record.formatted_day()];
        row.extend(Analyte::OUTPUT.iter().map(|analyte| {
            record
                .values
                .get(analyte)
                .cloned()
                .flatten()
                .unwrap_or_default()
        }));
        writer.write_record(&row).context("write CSV row")?;
    }

    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))?;
    info!(rows = records.len(), path = %path.display(), "consolidated CSV written");
    Ok(())
}
