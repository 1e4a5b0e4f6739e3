use crate::error::{ProcessingError, Result};
use crate::models::MatchResult;
use crate::readers::MonitorTable;
use crate::utils::constants::MATCH_OUTPUT_COLUMNS;
use crate::writers::atomic::write_csv_atomically;
use csv::StringRecord;
use std::path::Path;
use tracing::info;

/// Where each of the four match columns goes in an output row
#[derive(Debug, Clone, PartialEq, Eq)]
enum ColumnSlot {
    /// The input already has this column; overwrite it in place
    Existing(usize),
    Appended,
}

pub struct MatchedTableWriter;

impl MatchedTableWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write the monitor table with the match columns, atomically
    pub fn write(&self, table: &MonitorTable, results: &[MatchResult], path: &Path) -> Result<()> {
        if table.sites.len() != results.len() {
            return Err(ProcessingError::InvalidFormat(format!(
                "{} monitor rows but {} match results",
                table.sites.len(),
                results.len()
            )));
        }

        let slots = column_slots(&table.headers);
        let headers = output_headers(&table.headers, &slots);

        write_csv_atomically(path, |writer| {
            writer.write_record(&headers)?;
            for (site, result) in table.sites.iter().zip(results) {
                writer.write_record(&output_row(&site.record, result, &slots))?;
            }
            Ok(())
        })?;

        info!(
            "Wrote {} rows with nearest centroids to {}",
            results.len(),
            path.display()
        );
        Ok(())
    }
}

impl Default for MatchedTableWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn column_slots(headers: &StringRecord) -> [ColumnSlot; 4] {
    MATCH_OUTPUT_COLUMNS.map(|name| match headers.iter().position(|h| h == name) {
        Some(idx) => ColumnSlot::Existing(idx),
        None => ColumnSlot::Appended,
    })
}

fn output_headers(headers: &StringRecord, slots: &[ColumnSlot; 4]) -> StringRecord {
    let mut out = headers.clone();
    for (name, slot) in MATCH_OUTPUT_COLUMNS.iter().zip(slots) {
        if *slot == ColumnSlot::Appended {
            out.push_field(name);
        }
    }
    out
}

fn output_row(record: &StringRecord, result: &MatchResult, slots: &[ColumnSlot; 4]) -> StringRecord {
    let fields = result.output_fields();
    let mut cells: Vec<String> = record.iter().map(str::to_string).collect();

    for (value, slot) in fields.into_iter().zip(slots) {
        match slot {
            ColumnSlot::Existing(idx) => cells[*idx] = value,
            ColumnSlot::Appended => cells.push(value),
        }
    }

    StringRecord::from(cells)
}
