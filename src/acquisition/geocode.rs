use crate::acquisition::fetch::HttpFetch;
use crate::error::{ProcessingError, Result};
use crate::models::{pad_zip_code, GeocodedZip};
use crate::utils::constants::DEFAULT_GEOCODE_BATCH_SIZE;
use crate::writers::write_csv_atomically;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};
use validator::Validate;

/// Resolves a ZIP code to a (latitude, longitude) point
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn locate(&self, zip_code: &str) -> Result<Option<(f64, f64)>>;
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

/// Google Maps Geocoding API client restricted to US addresses
pub struct GoogleGeocoder<F: HttpFetch> {
    fetcher: F,
    endpoint: String,
    api_key: String,
}

impl<F: HttpFetch> GoogleGeocoder<F> {
    pub fn new(fetcher: F, endpoint: &str, api_key: &str) -> Self {
        Self {
            fetcher,
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub fn request_url(&self, zip_code: &str) -> Result<String> {
        let url = reqwest::Url::parse_with_params(
            &self.endpoint,
            &[
                ("address", zip_code),
                ("components", "country:US"),
                ("key", self.api_key.as_str()),
            ],
        )
        .map_err(|e| ProcessingError::Config(format!("Invalid geocoding endpoint: {}", e)))?;
        Ok(url.into())
    }
}

/// First result's location for an `OK` response, otherwise `None`
fn parse_location(body: &str) -> Result<Option<(f64, f64)>> {
    let response: GeocodeResponse = serde_json::from_str(body)?;
    if response.status != "OK" {
        debug!(status = %response.status, "Geocoding returned no location");
        return Ok(None);
    }
    Ok(response
        .results
        .first()
        .map(|r| (r.geometry.location.lat, r.geometry.location.lng)))
}

#[async_trait]
impl<F: HttpFetch> Geocoder for GoogleGeocoder<F> {
    async fn locate(&self, zip_code: &str) -> Result<Option<(f64, f64)>> {
        let url = self.request_url(zip_code)?;
        match self.fetcher.fetch_text(&url).await? {
            Some(body) => parse_location(&body),
            None => Ok(None),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeocodeReport {
    pub total: usize,
    pub skipped: usize,
    pub located: usize,
    pub failed: usize,
}

impl GeocodeReport {
    pub fn summary(&self) -> String {
        format!(
            "{} ZIP codes: {} already processed, {} located, {} failed",
            self.total, self.skipped, self.located, self.failed
        )
    }
}

/// Geocodes a ZIP list into a centroid table, resuming from earlier output.
///
/// ZIP codes already present in the output file are skipped. Progress is
/// rewritten every `batch_size` input positions, at the end of the list, and
/// before a lookup error is returned.
pub struct GeocodeRun<'a, G: Geocoder> {
    geocoder: &'a G,
    output: PathBuf,
    batch_size: usize,
    delay: Duration,
}

impl<'a, G: Geocoder> GeocodeRun<'a, G> {
    pub fn new(geocoder: &'a G, output: &Path) -> Self {
        Self {
            geocoder,
            output: output.to_path_buf(),
            batch_size: DEFAULT_GEOCODE_BATCH_SIZE,
            delay: Duration::ZERO,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub async fn run(&self, zip_codes: &[String]) -> Result<GeocodeReport> {
        let mut rows = read_existing(&self.output)?;
        let mut processed: HashSet<String> = rows.iter().map(|r| r.zip_code.clone()).collect();
        if !processed.is_empty() {
            info!(
                "Found {} previously processed ZIPs in {}",
                processed.len(),
                self.output.display()
            );
        }

        let total = zip_codes.len();
        let mut report = GeocodeReport {
            total,
            ..GeocodeReport::default()
        };
        let mut unsaved = 0usize;

        for (i, zip_code) in zip_codes.iter().enumerate() {
            let position = i + 1;
            if !processed.insert(zip_code.clone()) {
                debug!("[{}/{}] Skipping {} (already processed)", position, total, zip_code);
                report.skipped += 1;
                continue;
            }

            let located = match self.geocoder.locate(zip_code).await {
                Ok(located) => located,
                Err(e) => {
                    if unsaved > 0 {
                        self.save(&rows)?;
                    }
                    return Err(e);
                }
            };

            let row = match located {
                Some((lat, lon)) => {
                    let row = GeocodedZip::located(zip_code.as_str(), lat, lon);
                    match row.validate() {
                        Ok(()) => row,
                        Err(e) => {
                            warn!("[{}/{}] {} returned an invalid location: {}", position, total, zip_code, e);
                            GeocodedZip::failed(zip_code.as_str())
                        }
                    }
                }
                None => GeocodedZip::failed(zip_code.as_str()),
            };

            if row.is_located() {
                report.located += 1;
                info!(
                    "[{}/{}] {} -> {:.5}, {:.5}",
                    position,
                    total,
                    zip_code,
                    row.latitude.unwrap_or_default(),
                    row.longitude.unwrap_or_default()
                );
            } else {
                report.failed += 1;
                warn!("[{}/{}] {} -> Failed", position, total, zip_code);
            }

            rows.push(row);
            unsaved += 1;

            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            if position % self.batch_size == 0 || position == total {
                self.save(&rows)?;
                unsaved = 0;
            }
        }

        if unsaved > 0 {
            self.save(&rows)?;
        }

        Ok(report)
    }

    fn save(&self, rows: &[GeocodedZip]) -> Result<()> {
        write_csv_atomically(&self.output, |writer| {
            for row in rows {
                writer.serialize(row)?;
            }
            Ok(())
        })?;
        info!("Saved progress to {}", self.output.display());
        Ok(())
    }
}

fn read_existing(path: &Path) -> Result<Vec<GeocodedZip>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for row in reader.deserialize::<GeocodedZip>() {
        let mut row = row?;
        row.zip_code = pad_zip_code(&row.zip_code);
        rows.push(row);
    }
    Ok(rows)
}
