//! Recommendation and detection requests.

use crate::client::{AdvisoryClient, AuthFailurePolicy};
use cropmate_core::advisory::{
    CropRecommendation, CropSuggestion, DiseaseDiagnosis, ImageUpload, SoilReadings,
};
use cropmate_core::error::{CropmateError, Result};
use reqwest::multipart;
use serde::Deserialize;

/// The backend reports confidence either as a bare number or as a
/// percentage string like `"92.00%"`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ConfidenceValue {
    Number(f64),
    Text(String),
}

impl ConfidenceValue {
    /// Numeric confidence in [0, 100].
    fn as_percent(&self) -> Result<f64> {
        let value = match self {
            ConfidenceValue::Number(n) => *n,
            ConfidenceValue::Text(s) => {
                let trimmed = s.trim().trim_end_matches('%').trim();
                trimmed.parse::<f64>().map_err(|_| {
                    CropmateError::decode(format!("unparseable confidence value: {s:?}"))
                })?
            }
        };
        if !value.is_finite() {
            return Err(CropmateError::decode("non-finite confidence value"));
        }
        Ok(value.clamp(0.0, 100.0))
    }
}

#[derive(Deserialize)]
struct RecommendResponse {
    top_crops: Vec<TopCropRecord>,
}

#[derive(Deserialize)]
struct TopCropRecord {
    crop: String,
    confidence: ConfidenceValue,
}

#[derive(Deserialize)]
struct DetectResponse {
    #[serde(default)]
    disease: Option<String>,
    #[serde(default)]
    confidence: Option<ConfidenceValue>,
    /// Set when the model service failed behind a 200 from the backend.
    #[serde(default)]
    error: Option<String>,
}

impl AdvisoryClient {
    /// `POST /recommend`. The endpoint is public, but a present token is
    /// still attached so the backend records the event in history.
    pub async fn recommend(&self, readings: &SoilReadings) -> Result<CropRecommendation> {
        readings.validate()?;

        let builder = self
            .authorize(self.client.post(self.endpoint("/recommend")))
            .json(readings);
        let response = self.execute(builder, AuthFailurePolicy::Intercept).await?;
        let decoded: RecommendResponse = Self::decode(response).await?;

        let suggestions = decoded
            .top_crops
            .into_iter()
            .map(|record| {
                Ok(CropSuggestion {
                    crop: record.crop,
                    confidence: record.confidence.as_percent()?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(CropRecommendation::from_suggestions(suggestions))
    }

    /// `POST /detect` with a multipart body. The size cap is enforced before
    /// any dispatch; an unauthenticated caller is accepted, a present token
    /// is still attached.
    pub async fn detect(&self, image: ImageUpload) -> Result<DiseaseDiagnosis> {
        image.ensure_within_cap()?;

        let mime = mime_guess::from_path(&image.file_name).first_or_octet_stream();
        let part = multipart::Part::bytes(image.bytes)
            .file_name(image.file_name.clone())
            .mime_str(mime.as_ref())
            .map_err(|e| CropmateError::invalid_input("file", e.to_string()))?;
        let form = multipart::Form::new().part("file", part);

        let builder = self
            .authorize(self.client.post(self.endpoint("/detect")))
            .multipart(form);
        let response = self.execute(builder, AuthFailurePolicy::Intercept).await?;
        let status = response.status().as_u16();
        let decoded: DetectResponse = Self::decode(response).await?;

        if let Some(error) = decoded.error.filter(|e| !e.is_empty()) {
            return Err(CropmateError::server(status, error));
        }

        let disease = decoded
            .disease
            .ok_or_else(|| CropmateError::decode("detection response is missing 'disease'"))?;
        let confidence = decoded
            .confidence
            .ok_or_else(|| CropmateError::decode("detection response is missing 'confidence'"))?
            .as_percent()?;

        Ok(DiseaseDiagnosis {
            disease,
            confidence,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_string_parses() {
        let value = ConfidenceValue::Text("92.00%".to_string());
        assert_eq!(value.as_percent().unwrap(), 92.0);
    }

    #[test]
    fn test_bare_number_passes_through_clamped() {
        assert_eq!(ConfidenceValue::Number(70.0).as_percent().unwrap(), 70.0);
        assert_eq!(ConfidenceValue::Number(104.2).as_percent().unwrap(), 100.0);
    }

    #[test]
    fn test_garbage_confidence_is_a_decode_error() {
        let value = ConfidenceValue::Text("very sure".to_string());
        assert!(matches!(
            value.as_percent().unwrap_err(),
            CropmateError::Decode { .. }
        ));
    }
}
