use crate::models::Centroid;

/// Outcome of a nearest-centroid search for one query point.
///
/// `centroid` is `None` when no centroid could be chosen (empty table, or no
/// centroid with a finite distance); `distance_miles` is then infinite.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub centroid: Option<Centroid>,
    pub distance_miles: f64,
}

impl MatchResult {
    pub fn matched(centroid: Centroid, distance_miles: f64) -> Self {
        Self {
            centroid: Some(centroid),
            distance_miles,
        }
    }

    pub fn unmatched() -> Self {
        Self {
            centroid: None,
            distance_miles: f64::INFINITY,
        }
    }

    pub fn is_matched(&self) -> bool {
        self.centroid.is_some()
    }

    pub fn zip_code(&self) -> Option<&str> {
        self.centroid.as_ref().map(|c| c.zip_code.as_str())
    }

    /// The four appended output cells: zip, latitude, longitude, distance
    pub fn output_fields(&self) -> [String; 4] {
        match &self.centroid {
            Some(c) => [
                c.zip_code.clone(),
                format_float(c.latitude),
                format_float(c.longitude),
                format_float(self.distance_miles),
            ],
            None => [
                String::new(),
                String::new(),
                String::new(),
                format_float(self.distance_miles),
            ],
        }
    }
}

/// Shortest round-trip form that always keeps a decimal point (`40.0`, not `40`)
fn format_float(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        format!("{:?}", value)
    }
}
