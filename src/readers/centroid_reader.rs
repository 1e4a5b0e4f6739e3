use crate::error::Result;
use crate::models::{pad_zip_code, Centroid};
use crate::readers::schema::require_columns;
use crate::utils::constants::{COL_LATITUDE, COL_LONGITUDE, COL_ZIP_CODE, DEFAULT_BUFFER_SIZE};
use crate::utils::coordinates::parse_coordinate_lenient;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, warn};

pub const CENTROID_TABLE: &str = "centroids";

pub struct CentroidReader;

impl CentroidReader {
    pub fn new() -> Self {
        Self
    }

    /// Read ZIP centroids from a CSV file with `ZIP Code`, `Latitude`, `Longitude` columns
    pub fn read_centroids(&self, path: &Path) -> Result<Vec<Centroid>> {
        let file = File::open(path)?;
        self.read_from(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file))
    }

    pub fn read_from<R: Read>(&self, source: R) -> Result<Vec<Centroid>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(source);

        let headers = reader.headers()?.clone();
        let indices = require_columns(
            &headers,
            &[COL_ZIP_CODE, COL_LATITUDE, COL_LONGITUDE],
            CENTROID_TABLE,
        )?;
        let (zip_idx, lat_idx, lon_idx) = (indices[0], indices[1], indices[2]);

        let mut centroids = Vec::new();
        let mut without_coordinates = 0usize;

        for record in reader.records() {
            let record = record?;
            let cell = |idx: usize| record.get(idx).unwrap_or("");

            let centroid = Centroid::new(
                pad_zip_code(cell(zip_idx)),
                parse_coordinate_lenient(cell(lat_idx)),
                parse_coordinate_lenient(cell(lon_idx)),
            );

            if !centroid.has_coordinates() {
                without_coordinates += 1;
                debug!(zip = %centroid.zip_code, "Centroid has no usable coordinates");
            }

            centroids.push(centroid);
        }

        if without_coordinates > 0 {
            warn!(
                "{} of {} centroids have missing or malformed coordinates and can never be matched",
                without_coordinates,
                centroids.len()
            );
        }

        Ok(centroids)
    }
}

impl Default for CentroidReader {
    fn default() -> Self {
        Self::new()
    }
}
