use crate::error::Result;
use crate::models::pad_zip_code;
use crate::utils::filename::has_csv_extension;
use std::path::Path;

/// Load the ZIP codes to geocode.
///
/// A `.csv` file contributes the first column of each data row (the first
/// line is a header). Any other file is read as one ZIP per non-empty line.
/// Every value is zero-padded to five digits.
pub fn load_zip_codes(path: &Path) -> Result<Vec<String>> {
    if has_csv_extension(path) {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)?;

        let mut zips = Vec::new();
        for record in reader.records() {
            let record = record?;
            if let Some(value) = record.get(0).filter(|v| !v.trim().is_empty()) {
                zips.push(pad_zip_code(value));
            }
        }
        Ok(zips)
    } else {
        let content = std::fs::read_to_string(path)?;
        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(pad_zip_code)
            .collect())
    }
}
