pub mod batch_matcher;
pub mod cache;
pub mod nearest;
pub mod pipeline;

pub use batch_matcher::{MatchStats, NearestCentroidMatcher};
pub use cache::MatchCache;
pub use nearest::find_nearest;
pub use pipeline::assign_nearest_centroids;
