use std::path::{Path, PathBuf};

/// File name for one downloaded pollutant/year export: `{pollutant}_{year}.csv`
pub fn pollutant_year_filename(output_dir: &Path, pollutant: &str, year: i32) -> PathBuf {
    output_dir.join(format!("{}_{}.csv", pollutant, year))
}

/// Whether a path names a CSV file (case-insensitive extension)
pub fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}
