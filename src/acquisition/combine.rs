use crate::error::{ProcessingError, Result};
use crate::utils::filename::has_csv_extension;
use crate::writers::write_csv_atomically;
use csv::StringRecord;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// A fully read CSV file: its header and rows
struct CsvTable {
    headers: StringRecord,
    rows: Vec<StringRecord>,
}

/// Concatenate every CSV in `input_dir` into `output`.
///
/// Files are taken in name order. Columns are the union of all headers in
/// first-seen order; cells for columns a file lacks are left empty. A header
/// repeated within one file is kept as a separate column named `Name.1`,
/// `Name.2` and so on. Files that cannot be parsed, or that have a row longer
/// than their header, are logged and skipped. Returns the number of rows
/// written, or `None` when there was nothing to combine.
pub fn combine_csv_files(input_dir: &Path, output: &Path) -> Result<Option<usize>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(input_dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && has_csv_extension(path))
        .filter(|path| !is_same_file(path, output))
        .collect();
    files.sort();

    let mut tables = Vec::new();
    for path in &files {
        match read_table(path) {
            Ok(table) => tables.push(table),
            Err(e) => warn!("Failed to read file {}: {}", path.display(), e),
        }
    }

    if tables.is_empty() {
        info!("No files to combine.");
        return Ok(None);
    }

    let mut columns: Vec<String> = Vec::new();
    let mut column_index: HashMap<String, usize> = HashMap::new();
    for table in &tables {
        for header in table.headers.iter() {
            if !column_index.contains_key(header) {
                column_index.insert(header.to_string(), columns.len());
                columns.push(header.to_string());
            }
        }
    }

    let mut total_rows = 0usize;
    write_csv_atomically(output, |writer| {
        writer.write_record(&columns)?;
        for table in &tables {
            let positions: Vec<usize> = table
                .headers
                .iter()
                .map(|h| column_index[h])
                .collect();

            for row in &table.rows {
                let mut cells = vec![""; columns.len()];
                for (value, &pos) in row.iter().zip(&positions) {
                    cells[pos] = value;
                }
                writer.write_record(&cells)?;
                total_rows += 1;
            }
        }
        Ok(())
    })?;

    info!("Combined data saved to {}", output.display());
    Ok(Some(total_rows))
}

fn read_table(path: &Path) -> Result<CsvTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let headers = rename_repeated_headers(reader.headers()?);
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.len() > headers.len() {
            let line = record.position().map_or(0, |p| p.line());
            return Err(ProcessingError::InvalidFormat(format!(
                "line {} has {} fields but the header has {}",
                line,
                record.len(),
                headers.len()
            )));
        }
        rows.push(record);
    }

    Ok(CsvTable { headers, rows })
}

/// Second and later copies of a header become `Name.1`, `Name.2`, ...
fn rename_repeated_headers(headers: &StringRecord) -> StringRecord {
    let mut seen: HashSet<String> = headers.iter().map(str::to_string).collect();
    let mut used: HashSet<&str> = HashSet::new();
    let mut renamed = StringRecord::new();

    for header in headers.iter() {
        if used.insert(header) {
            renamed.push_field(header);
            continue;
        }
        let mut suffix = 1;
        let mut candidate = format!("{}.{}", header, suffix);
        while seen.contains(&candidate) {
            suffix += 1;
            candidate = format!("{}.{}", header, suffix);
        }
        renamed.push_field(&candidate);
        seen.insert(candidate);
    }
    renamed
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
