use crate::error::Result;
use crate::matching::batch_matcher::{MatchStats, NearestCentroidMatcher};
use crate::readers::{CentroidReader, MonitorReader};
use crate::utils::progress::ProgressReporter;
use crate::writers::MatchedTableWriter;
use std::path::Path;
use tracing::info;

/// Load both tables, match every monitor row, and write the augmented table.
///
/// Both input schemas are checked before any row is matched, and nothing is
/// written unless every step before the write succeeds.
pub fn assign_nearest_centroids(
    centroids_file: &Path,
    monitors_file: &Path,
    output_file: &Path,
    silent: bool,
) -> Result<MatchStats> {
    info!("Loading ZIP Code centroids file...");
    let centroids = CentroidReader::new().read_centroids(centroids_file)?;
    info!("Loaded {} centroids.", centroids.len());

    info!("Loading monitors data file...");
    let monitors = MonitorReader::new().read_monitors(monitors_file)?;
    info!("Loaded {} monitor sites.", monitors.len());

    info!("Processing monitor sites...");
    let progress = ProgressReporter::new(monitors.len() as u64, "Matching monitor sites...", silent);
    let (results, stats) =
        NearestCentroidMatcher::new(&centroids).match_sites(&monitors.sites, Some(&progress));
    progress.finish_with_message(&format!("Matched {} monitor rows", stats.total_rows));

    info!("Saving updated monitors data...");
    MatchedTableWriter::new().write(&monitors, &results, output_file)?;
    info!("Updated monitors data saved to {}", output_file.display());

    Ok(stats)
}
