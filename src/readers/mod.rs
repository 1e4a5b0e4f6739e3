pub mod centroid_reader;
pub mod monitor_reader;
pub mod schema;

pub use centroid_reader::CentroidReader;
pub use monitor_reader::{MonitorReader, MonitorTable};
pub use schema::require_columns;
