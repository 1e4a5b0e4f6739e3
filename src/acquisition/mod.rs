//! Fetching the two input tables: EPA monitor exports and ZIP centroids.

pub mod combine;
pub mod epa;
pub mod fetch;
pub mod geocode;
pub mod zip_list;

pub use combine::combine_csv_files;
pub use epa::{DownloadReport, EpaDownloader};
pub use fetch::{HttpFetch, ReqwestFetcher};
pub use geocode::{GeocodeReport, GeocodeRun, Geocoder, GoogleGeocoder};
pub use zip_list::load_zip_codes;
