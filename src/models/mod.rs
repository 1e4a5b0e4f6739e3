pub mod centroid;
pub mod match_result;
pub mod monitor;

pub use centroid::{pad_zip_code, Centroid, GeocodedZip};
pub use match_result::MatchResult;
pub use monitor::{MonitorSite, SiteKey};
