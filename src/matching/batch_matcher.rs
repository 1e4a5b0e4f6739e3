use crate::matching::cache::MatchCache;
use crate::matching::nearest::find_nearest;
use crate::models::{Centroid, MatchResult, MonitorSite};
use crate::utils::constants::PROGRESS_LOG_INTERVAL;
use crate::utils::progress::ProgressReporter;
use tracing::{debug, info};

/// Counters describing one matching pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchStats {
    pub total_rows: usize,
    pub searches: usize,
    pub cache_hits: usize,
    pub unmatched_rows: usize,
}

impl MatchStats {
    pub fn summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("=== Matching Report ===\n");
        summary.push_str(&format!("Monitor Rows: {}\n", self.total_rows));
        summary.push_str(&format!("Distinct Searches: {}\n", self.searches));
        summary.push_str(&format!("Cache Hits: {}\n", self.cache_hits));
        summary.push_str(&format!("Unmatched Rows: {}\n", self.unmatched_rows));

        summary
    }
}

/// Assigns every monitor row its nearest ZIP centroid, memoizing repeated sites
pub struct NearestCentroidMatcher<'a> {
    centroids: &'a [Centroid],
    log_interval: usize,
}

impl<'a> NearestCentroidMatcher<'a> {
    pub fn new(centroids: &'a [Centroid]) -> Self {
        Self {
            centroids,
            log_interval: PROGRESS_LOG_INTERVAL,
        }
    }

    pub fn with_log_interval(mut self, log_interval: usize) -> Self {
        self.log_interval = log_interval.max(1);
        self
    }

    /// Match all sites with a cache private to this call.
    ///
    /// Results are returned in the same order as `sites`, one per row.
    pub fn match_sites(
        &self,
        sites: &[MonitorSite],
        progress: Option<&ProgressReporter>,
    ) -> (Vec<MatchResult>, MatchStats) {
        let mut cache = MatchCache::new();
        self.match_sites_with_cache(sites, &mut cache, progress)
    }

    /// Match all sites, reusing and extending a caller-owned cache
    pub fn match_sites_with_cache(
        &self,
        sites: &[MonitorSite],
        cache: &mut MatchCache,
        progress: Option<&ProgressReporter>,
    ) -> (Vec<MatchResult>, MatchStats) {
        let mut results = Vec::with_capacity(sites.len());
        let mut stats = MatchStats {
            total_rows: sites.len(),
            ..MatchStats::default()
        };

        if self.centroids.is_empty() {
            info!("Centroid table is empty; every monitor row will be unmatched");
        }

        for (idx, site) in sites.iter().enumerate() {
            let (result, hit) = cache.get_or_compute(site.key(), || {
                find_nearest(site.latitude, site.longitude, self.centroids)
            });

            if hit {
                stats.cache_hits += 1;
            } else {
                stats.searches += 1;
                debug!(
                    site_id = %site.site_id,
                    zip = result.zip_code().unwrap_or("-"),
                    distance = result.distance_miles,
                    "Matched site"
                );
            }
            if !result.is_matched() {
                stats.unmatched_rows += 1;
            }

            results.push(result.clone());

            if idx % self.log_interval == 0 {
                info!("Processed {} monitor sites...", idx);
            }
            if let Some(p) = progress {
                p.increment(1);
            }
        }

        (results, stats)
    }
}
