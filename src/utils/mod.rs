pub mod constants;
pub mod coordinates;
pub mod filename;
pub mod logging;
pub mod progress;

pub use constants::*;
pub use coordinates::{haversine_miles, parse_coordinate_lenient};
pub use filename::pollutant_year_filename;
pub use logging::init_logging;
pub use progress::ProgressReporter;
