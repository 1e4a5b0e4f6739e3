use crate::models::{Centroid, MatchResult};
use crate::utils::coordinates::haversine_miles;

/// Find the centroid closest to a point by linear scan.
///
/// A strictly smaller distance is required to replace the running best, so
/// among equidistant centroids the earliest in `centroids` wins. Centroids
/// whose distance is NaN never win. An empty slice yields
/// [`MatchResult::unmatched`].
pub fn find_nearest(latitude: f64, longitude: f64, centroids: &[Centroid]) -> MatchResult {
    let mut best: Option<&Centroid> = None;
    let mut min_distance = f64::INFINITY;

    for centroid in centroids {
        let distance = haversine_miles(latitude, longitude, centroid.latitude, centroid.longitude);
        if distance < min_distance {
            min_distance = distance;
            best = Some(centroid);
        }
    }

    match best {
        Some(centroid) => MatchResult::matched(centroid.clone(), min_distance),
        None => MatchResult::unmatched(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pittsburgh() -> Vec<Centroid> {
        vec![
            Centroid::new("15201", 40.4900, -79.9500),
            Centroid::new("15213", 40.4440, -79.9530),
        ]
    }

    #[test]
    fn test_nearest_pittsburgh_site() {
        let result = find_nearest(40.4450, -79.9520, &pittsburgh());

        assert_eq!(result.zip_code(), Some("15213"));
        assert!((result.distance_miles - 0.0868).abs() < 0.005);
    }

    #[test]
    fn test_distance_is_minimum_over_all_centroids() {
        let centroids = vec![
            Centroid::new("15222", 40.4470, -79.9920),
            Centroid::new("15201", 40.4900, -79.9500),
            Centroid::new("15213", 40.4440, -79.9530),
            Centroid::new("15232", 40.4520, -79.9310),
        ];
        let (lat, lon) = (40.4600, -79.9400);

        let expected = centroids
            .iter()
            .map(|c| haversine_miles(lat, lon, c.latitude, c.longitude))
            .fold(f64::INFINITY, f64::min);

        let result = find_nearest(lat, lon, &centroids);
        assert_eq!(result.distance_miles, expected);
    }

    #[test]
    fn test_first_of_equal_distances_wins() {
        let centroids = vec![
            Centroid::new("AAAAA", 41.0, -80.0),
            Centroid::new("BBBBB", 41.0, -80.0),
        ];
        assert_eq!(find_nearest(40.0, -80.0, &centroids).zip_code(), Some("AAAAA"));

        let reversed: Vec<Centroid> = centroids.into_iter().rev().collect();
        assert_eq!(find_nearest(40.0, -80.0, &reversed).zip_code(), Some("BBBBB"));
    }

    #[test]
    fn test_mirrored_ties_keep_collection_order() {
        // Equidistant north and south of the query along one meridian
        let centroids = vec![
            Centroid::new("NORTH", 1.0, 0.0),
            Centroid::new("SOUTH", -1.0, 0.0),
        ];
        assert_eq!(find_nearest(0.0, 0.0, &centroids).zip_code(), Some("NORTH"));
    }

    #[test]
    fn test_empty_centroids_is_unmatched() {
        let result = find_nearest(40.4450, -79.9520, &[]);
        assert!(!result.is_matched());
        assert!(result.distance_miles.is_infinite());
        assert!(result.distance_miles > 0.0);
    }

    #[test]
    fn test_nan_centroids_are_skipped() {
        let centroids = vec![
            Centroid::new("99999", f64::NAN, f64::NAN),
            Centroid::new("15213", 40.4440, -79.9530),
        ];
        assert_eq!(find_nearest(40.4450, -79.9520, &centroids).zip_code(), Some("15213"));
    }

    #[test]
    fn test_nan_query_is_unmatched() {
        let result = find_nearest(f64::NAN, -79.9520, &pittsburgh());
        assert!(!result.is_matched());
        assert!(result.distance_miles.is_infinite());
    }
}
