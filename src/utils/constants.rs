/// Mean Earth radius used for all great-circle distances
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Centroid table columns
pub const COL_ZIP_CODE: &str = "ZIP Code";
pub const COL_LATITUDE: &str = "Latitude";
pub const COL_LONGITUDE: &str = "Longitude";

/// Monitor table columns
pub const COL_SITE_LATITUDE: &str = "Site Latitude";
pub const COL_SITE_LONGITUDE: &str = "Site Longitude";
pub const COL_SITE_ID: &str = "Site ID";
pub const COL_LOCAL_SITE_NAME: &str = "Local Site Name";
pub const COL_PARAMETER_DESCRIPTION: &str = "AQS Parameter Description";

/// Columns appended to the monitor table, in output order
pub const COL_CENTROID_ZIPCODE: &str = "Centroid_Zipcode";
pub const COL_CENTROID_LAT: &str = "Centroid_Lat";
pub const COL_CENTROID_LONG: &str = "Centroid_Long";
pub const COL_DISTANCE_TO_CENTROID: &str = "Distance_to_Centroid";

pub const MATCH_OUTPUT_COLUMNS: [&str; 4] = [
    COL_CENTROID_ZIPCODE,
    COL_CENTROID_LAT,
    COL_CENTROID_LONG,
    COL_DISTANCE_TO_CENTROID,
];

/// ZIP codes are zero-padded to this width
pub const ZIP_CODE_WIDTH: usize = 5;

/// Processing defaults
pub const PROGRESS_LOG_INTERVAL: usize = 100;
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB

/// EPA AirNow download defaults
pub const EPA_BROKER_URL: &str = "https://www3.epa.gov/cgi-bin/broker";
pub const EPA_DAILY_PROGRAM: &str = "dataprog.ad_data_daily_airnow_method.sas";
pub const DEFAULT_COUNTY_CODE: &str = "42003"; // Allegheny County
pub const DEFAULT_START_YEAR: i32 = 2016;
pub const DEFAULT_END_YEAR: i32 = 2016;
pub const DEFAULT_DOWNLOAD_DIR: &str = "aqi_data";
pub const DEFAULT_COMBINED_FILE: &str = "combined_aqi_data.csv";

/// Geocoding defaults
pub const GOOGLE_GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";
pub const DEFAULT_CENTROIDS_FILE: &str = "ZIP_Code_Centroids.csv";
pub const DEFAULT_GEOCODE_BATCH_SIZE: usize = 10;
pub const DEFAULT_GEOCODE_DELAY_SECS: f64 = 0.25;

/// Settings
pub const DEFAULT_SETTINGS_FILE: &str = "aqzip.toml";
pub const SETTINGS_ENV_PREFIX: &str = "AQZIP";
