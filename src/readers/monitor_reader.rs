use crate::error::{ProcessingError, Result};
use crate::models::MonitorSite;
use crate::readers::schema::require_columns;
use crate::utils::constants::{
    COL_LOCAL_SITE_NAME, COL_PARAMETER_DESCRIPTION, COL_SITE_ID, COL_SITE_LATITUDE,
    COL_SITE_LONGITUDE, DEFAULT_BUFFER_SIZE,
};
use crate::utils::coordinates::{is_valid_position, parse_coordinate_lenient};
use csv::StringRecord;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::warn;

pub const MONITOR_TABLE: &str = "monitors";

/// The monitor table: original header row plus one typed row per record
#[derive(Debug, Clone)]
pub struct MonitorTable {
    pub headers: StringRecord,
    pub sites: Vec<MonitorSite>,
}

impl MonitorTable {
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}

pub struct MonitorReader;

impl MonitorReader {
    pub fn new() -> Self {
        Self
    }

    /// Read an EPA monitor export, keeping every column for passthrough
    pub fn read_monitors(&self, path: &Path) -> Result<MonitorTable> {
        let file = File::open(path)?;
        self.read_from(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file))
    }

    pub fn read_from<R: Read>(&self, source: R) -> Result<MonitorTable> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(source);

        let headers = reader.headers()?.clone();
        let indices = require_columns(
            &headers,
            &[
                COL_SITE_LATITUDE,
                COL_SITE_LONGITUDE,
                COL_SITE_ID,
                COL_LOCAL_SITE_NAME,
                COL_PARAMETER_DESCRIPTION,
            ],
            MONITOR_TABLE,
        )?;
        let (lat_idx, lon_idx, id_idx, name_idx, param_idx) =
            (indices[0], indices[1], indices[2], indices[3], indices[4]);

        let width = headers.len();
        let mut sites = Vec::new();
        let mut out_of_range = 0usize;

        for (row, record) in reader.records().enumerate() {
            let mut record = record?;

            if record.len() > width {
                return Err(ProcessingError::InvalidFormat(format!(
                    "Monitor row {} has {} fields but the header has {}",
                    row + 1,
                    record.len(),
                    width
                )));
            }
            while record.len() < width {
                record.push_field("");
            }

            let cell = |idx: usize| record.get(idx).unwrap_or("").to_string();
            let latitude = parse_coordinate_lenient(&cell(lat_idx));
            let longitude = parse_coordinate_lenient(&cell(lon_idx));
            let site_id = cell(id_idx);
            let local_site_name = cell(name_idx);
            let parameter_description = cell(param_idx);

            if !is_valid_position(latitude, longitude) {
                out_of_range += 1;
            }

            sites.push(MonitorSite {
                site_id,
                local_site_name,
                parameter_description,
                latitude,
                longitude,
                record,
            });
        }

        if out_of_range > 0 {
            warn!(
                "{} monitor rows have missing or out-of-range coordinates",
                out_of_range
            );
        }

        Ok(MonitorTable { headers, sites })
    }
}

impl Default for MonitorReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "Date,Site ID,POC,Daily Mean,Local Site Name,AQS Parameter Description,Site Latitude,Site Longitude";

    #[test]
    fn test_read_monitors_keeps_passthrough_columns() -> Result<()> {
        let data = format!(
            "{}\n01/01/2016,420030008,1,0.031,Lawrenceville,Ozone,40.465420,-79.960757\n",
            HEADER
        );
        let table = MonitorReader::new().read_from(data.as_bytes())?;

        assert_eq!(table.headers.len(), 8);
        assert_eq!(table.len(), 1);

        let site = &table.sites[0];
        assert_eq!(site.site_id, "420030008");
        assert_eq!(site.local_site_name, "Lawrenceville");
        assert_eq!(site.parameter_description, "Ozone");
        assert_eq!(site.latitude, 40.46542);
        assert_eq!(site.longitude, -79.960757);
        assert_eq!(&site.record[3], "0.031");
        assert_eq!(&site.record[6], "40.465420");
        Ok(())
    }

    #[test]
    fn test_short_rows_are_padded() -> Result<()> {
        let data = "Site ID,Local Site Name,AQS Parameter Description,Site Latitude,Site Longitude,Notes\n\
                    1,A,Ozone,40.0,-80.0\n";
        let table = MonitorReader::new().read_from(data.as_bytes())?;

        assert_eq!(table.sites[0].record.len(), 6);
        assert_eq!(&table.sites[0].record[5], "");
        Ok(())
    }

    #[test]
    fn test_malformed_coordinates_are_kept() -> Result<()> {
        let data = "Site ID,Local Site Name,AQS Parameter Description,Site Latitude,Site Longitude\n\
                    1,A,Ozone,,-80.0\n\
                    2,B,Ozone,north,-80.0\n";
        let table = MonitorReader::new().read_from(data.as_bytes())?;

        assert_eq!(table.len(), 2);
        assert!(table.sites[0].latitude.is_nan());
        assert!(table.sites[1].latitude.is_nan());
        Ok(())
    }

    #[test]
    fn test_missing_monitor_columns() {
        let data = "Site ID,Site Latitude,Site Longitude\n1,40.0,-80.0\n";
        let err = MonitorReader::new().read_from(data.as_bytes()).unwrap_err();

        match err {
            ProcessingError::MissingColumns { table, columns } => {
                assert_eq!(table, MONITOR_TABLE);
                assert_eq!(columns, vec!["Local Site Name", "AQS Parameter Description"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_overlong_row_is_rejected() {
        let data = "Site ID,Local Site Name,AQS Parameter Description,Site Latitude,Site Longitude\n\
                    1,A,Ozone,40.0,-80.0,extra\n";
        assert!(matches!(
            MonitorReader::new().read_from(data.as_bytes()),
            Err(ProcessingError::InvalidFormat(_))
        ));
    }
}
