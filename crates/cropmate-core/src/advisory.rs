//! Domain models for crop recommendation and disease detection.

use crate::error::{CropmateError, Result};
use serde::{Deserialize, Serialize};

/// Maximum accepted size for a plant image upload, checked client-side
/// before any request is dispatched.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Soil and climate parameters submitted for a crop recommendation.
///
/// Field names on the wire follow the backend's request shape
/// (`N`/`P`/`K` uppercase, the rest lowercase).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilReadings {
    #[serde(rename = "N")]
    pub nitrogen: f64,
    #[serde(rename = "P")]
    pub phosphorus: f64,
    #[serde(rename = "K")]
    pub potassium: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub ph: f64,
    pub rainfall: f64,
}

impl SoilReadings {
    /// The demo preset offered by the recommendation form's autofill action.
    pub fn demo() -> Self {
        Self {
            nitrogen: 45.0,
            phosphorus: 22.0,
            potassium: 38.0,
            temperature: 28.0,
            humidity: 65.0,
            ph: 6.8,
            rainfall: 850.0,
        }
    }

    /// Rejects readings that are guaranteed to fail server-side, so the
    /// round-trip is avoided.
    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("nitrogen", self.nitrogen),
            ("phosphorus", self.phosphorus),
            ("potassium", self.potassium),
            ("humidity", self.humidity),
            ("rainfall", self.rainfall),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(CropmateError::invalid_input(
                    field,
                    "must be a non-negative number",
                ));
            }
        }
        if !self.temperature.is_finite() {
            return Err(CropmateError::invalid_input("temperature", "must be a number"));
        }
        if !self.ph.is_finite() || !(0.0..=14.0).contains(&self.ph) {
            return Err(CropmateError::invalid_input("ph", "must be between 0 and 14"));
        }
        Ok(())
    }
}

/// Confidence bands used by surfaces to color results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceBand {
    High,
    Moderate,
    Low,
}

impl ConfidenceBand {
    /// Band thresholds: High at 85 and above, Moderate at 70 and above.
    pub fn from_percent(confidence: f64) -> Self {
        if confidence >= 85.0 {
            Self::High
        } else if confidence >= 70.0 {
            Self::Moderate
        } else {
            Self::Low
        }
    }
}

/// One suggested crop with its confidence in [0, 100].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropSuggestion {
    pub crop: String,
    pub confidence: f64,
}

impl CropSuggestion {
    pub fn band(&self) -> ConfidenceBand {
        ConfidenceBand::from_percent(self.confidence)
    }
}

/// The ranked recommendation returned for one set of soil readings.
///
/// Suggestions are held in descending confidence order; the top entry is the
/// recommended crop.
#[derive(Debug, Clone, PartialEq)]
pub struct CropRecommendation {
    suggestions: Vec<CropSuggestion>,
}

impl CropRecommendation {
    /// Orders the suggestions by descending confidence. The backend usually
    /// sends them ranked already, but display depends on it.
    pub fn from_suggestions(mut suggestions: Vec<CropSuggestion>) -> Self {
        suggestions.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Self { suggestions }
    }

    /// The top-ranked crop, if the backend returned any.
    pub fn recommended(&self) -> Option<&CropSuggestion> {
        self.suggestions.first()
    }

    pub fn suggestions(&self) -> &[CropSuggestion] {
        &self.suggestions
    }

    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
    }
}

/// The diagnosis returned for an uploaded plant image.
#[derive(Debug, Clone, PartialEq)]
pub struct DiseaseDiagnosis {
    pub disease: String,
    pub confidence: f64,
}

impl DiseaseDiagnosis {
    pub fn band(&self) -> ConfidenceBand {
        ConfidenceBand::from_percent(self.confidence)
    }
}

/// A plant image staged for upload.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Enforces the client-side size cap before dispatch.
    pub fn ensure_within_cap(&self) -> Result<()> {
        if self.bytes.is_empty() {
            return Err(CropmateError::invalid_input("file", "image file is empty"));
        }
        if self.bytes.len() > MAX_UPLOAD_BYTES {
            return Err(CropmateError::invalid_input(
                "file",
                format!(
                    "image is {} bytes, the limit is {} bytes (10 MB)",
                    self.bytes.len(),
                    MAX_UPLOAD_BYTES
                ),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommendation_orders_by_descending_confidence() {
        let recommendation = CropRecommendation::from_suggestions(vec![
            CropSuggestion {
                crop: "wheat".to_string(),
                confidence: 70.0,
            },
            CropSuggestion {
                crop: "rice".to_string(),
                confidence: 92.0,
            },
        ]);

        let top = recommendation.recommended().unwrap();
        assert_eq!(top.crop, "rice");
        assert!(
            recommendation.suggestions()[0].confidence > recommendation.suggestions()[1].confidence
        );
    }

    #[test]
    fn test_confidence_bands() {
        assert_eq!(ConfidenceBand::from_percent(92.0), ConfidenceBand::High);
        assert_eq!(ConfidenceBand::from_percent(85.0), ConfidenceBand::High);
        assert_eq!(ConfidenceBand::from_percent(70.0), ConfidenceBand::Moderate);
        assert_eq!(ConfidenceBand::from_percent(69.9), ConfidenceBand::Low);
    }

    #[test]
    fn test_soil_readings_reject_out_of_range_ph() {
        let mut readings = SoilReadings::demo();
        assert!(readings.validate().is_ok());

        readings.ph = 15.2;
        let err = readings.validate().unwrap_err();
        assert!(matches!(err, CropmateError::InvalidInput { ref field, .. } if field == "ph"));
    }

    #[test]
    fn test_upload_cap() {
        let small = ImageUpload::new("leaf.jpg", vec![0u8; 16]);
        assert!(small.ensure_within_cap().is_ok());

        let oversized = ImageUpload::new("leaf.jpg", vec![0u8; MAX_UPLOAD_BYTES + 1]);
        assert!(oversized.ensure_within_cap().is_err());

        let empty = ImageUpload::new("leaf.jpg", Vec::new());
        assert!(empty.ensure_within_cap().is_err());
    }

    #[test]
    fn test_soil_readings_wire_names() {
        let json = serde_json::to_value(SoilReadings::demo()).unwrap();
        assert!(json.get("N").is_some());
        assert!(json.get("P").is_some());
        assert!(json.get("K").is_some());
        assert!(json.get("ph").is_some());
    }
}
