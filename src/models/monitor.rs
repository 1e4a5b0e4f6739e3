use csv::StringRecord;

/// One row of the monitor table.
///
/// The typed fields are the ones the matcher reads; `record` keeps every
/// original cell so the row can be written back verbatim.
#[derive(Debug, Clone)]
pub struct MonitorSite {
    pub site_id: String,
    pub local_site_name: String,
    pub parameter_description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub record: StringRecord,
}

impl MonitorSite {
    /// Memoization key shared by rows describing the same site and parameter
    pub fn key(&self) -> SiteKey {
        SiteKey::new(
            &self.site_id,
            &self.local_site_name,
            &self.parameter_description,
            self.latitude,
            self.longitude,
        )
    }
}

/// Composite cache key: (site id, site name, parameter, latitude, longitude).
///
/// Coordinates are compared by bit pattern so the key can be hashed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SiteKey {
    site_id: String,
    local_site_name: String,
    parameter_description: String,
    latitude_bits: u64,
    longitude_bits: u64,
}

impl SiteKey {
    pub fn new(
        site_id: &str,
        local_site_name: &str,
        parameter_description: &str,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            site_id: site_id.to_string(),
            local_site_name: local_site_name.to_string(),
            parameter_description: parameter_description.to_string(),
            latitude_bits: latitude.to_bits(),
            longitude_bits: longitude.to_bits(),
        }
    }
}
