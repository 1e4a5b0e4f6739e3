use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::constants::ZIP_CODE_WIDTH;

/// A ZIP code's representative point, as loaded by the matcher
#[derive(Debug, Clone, PartialEq)]
pub struct Centroid {
    pub zip_code: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Centroid {
    pub fn new(zip_code: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            zip_code: zip_code.into(),
            latitude,
            longitude,
        }
    }

    pub fn has_coordinates(&self) -> bool {
        !self.latitude.is_nan() && !self.longitude.is_nan()
    }
}

/// One row of the geocoder's output table.
///
/// Failed lookups are kept with empty coordinates so that a resumed run
/// treats them as already processed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct GeocodedZip {
    #[serde(rename = "ZIP Code")]
    pub zip_code: String,

    #[serde(rename = "Latitude")]
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,

    #[serde(rename = "Longitude")]
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
}

impl GeocodedZip {
    pub fn located(zip_code: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            zip_code: zip_code.into(),
            latitude: Some(latitude),
            longitude: Some(longitude),
        }
    }

    pub fn failed(zip_code: impl Into<String>) -> Self {
        Self {
            zip_code: zip_code.into(),
            latitude: None,
            longitude: None,
        }
    }

    pub fn is_located(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}

/// Left-pad an all-digit ZIP code with zeros to five characters.
///
/// Values that are not purely numeric, or already five or more characters,
/// are returned trimmed but otherwise untouched.
pub fn pad_zip_code(raw: &str) -> String {
    let trimmed = raw.trim();
    if !trimmed.is_empty()
        && trimmed.len() < ZIP_CODE_WIDTH
        && trimmed.chars().all(|c| c.is_ascii_digit())
    {
        format!("{:0>width$}", trimmed, width = ZIP_CODE_WIDTH)
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_zip_code() {
        assert_eq!(pad_zip_code("15213"), "15213");
        assert_eq!(pad_zip_code("2134"), "02134");
        assert_eq!(pad_zip_code(" 501 "), "00501");
        assert_eq!(pad_zip_code("15213-1234"), "15213-1234");
        assert_eq!(pad_zip_code("K1A"), "K1A");
        assert_eq!(pad_zip_code(""), "");
    }

    #[test]
    fn test_centroid_has_coordinates() {
        assert!(Centroid::new("15213", 40.444, -79.953).has_coordinates());
        assert!(!Centroid::new("15213", f64::NAN, -79.953).has_coordinates());
    }

    #[test]
    fn test_geocoded_zip_validation() {
        assert!(GeocodedZip::located("15213", 40.444, -79.953).validate().is_ok());
        assert!(GeocodedZip::failed("15213").validate().is_ok());
        assert!(GeocodedZip::located("15213", 91.0, -79.953).validate().is_err());
        assert!(GeocodedZip::located("15213", 40.0, 200.0).validate().is_err());
    }
}
