//! Wire types for the inference backend
//!
//! The backend answers `/predict` with a loosely specified JSON object; every
//! field is checked here so that the rest of the crate only ever sees a
//! well-formed `PredictionResult`.

use serde::{Deserialize, Serialize};

use crate::errors::PredictionError;
use crate::prediction::{PredictionLabel, PredictionResult};

/// Body of `POST /predict`
#[derive(Debug, Clone, Serialize)]
pub struct PredictRequestBody<'a> {
    pub text: &'a str,
}

/// Body of a successful `/predict` response
#[derive(Debug, Clone, Deserialize)]
pub struct PredictResponseBody {
    pub prediction: String,
    pub confidence: f64,
}

impl PredictResponseBody {
    /// Parse raw response bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self, PredictionError> {
        serde_json::from_slice(bytes).map_err(|e| PredictionError::MalformedResponse(e.to_string()))
    }

    /// Check the contract and convert to the domain result
    pub fn into_result(self) -> Result<PredictionResult, PredictionError> {
        if !self.confidence.is_finite() || !(0.0..=1.0).contains(&self.confidence) {
            return Err(PredictionError::MalformedResponse(format!(
                "confidence {} is outside [0, 1]",
                self.confidence
            )));
        }

        Ok(PredictionResult {
            label: PredictionLabel::from_wire(&self.prediction),
            confidence: self.confidence,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let body = PredictRequestBody { text: "halo" };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({"text": "halo"}));
    }

    #[test]
    fn test_well_formed_response() {
        let body = PredictResponseBody::from_slice(br#"{"prediction":"Sarcasm","confidence":0.87}"#)
            .unwrap();
        let result = body.into_result().unwrap();
        assert_eq!(result.label, PredictionLabel::Sarcasm);
        assert_eq!(result.confidence, 0.87);
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let body = PredictResponseBody::from_slice(
            br#"{"prediction":"Non-Sarcasm","confidence":0.6,"model":"xlnet"}"#,
        )
        .unwrap();
        assert_eq!(body.into_result().unwrap().label, PredictionLabel::NonSarcasm);
    }

    #[test]
    fn test_missing_prediction_is_malformed() {
        let err = PredictResponseBody::from_slice(br#"{"confidence":0.5}"#).unwrap_err();
        assert!(matches!(err, PredictionError::MalformedResponse(_)));
    }

    #[test]
    fn test_string_confidence_is_malformed() {
        let body = br#"{"prediction":"Sarcasm","confidence":"high"}"#;
        let err = PredictResponseBody::from_slice(body).unwrap_err();
        assert!(matches!(err, PredictionError::MalformedResponse(_)));
    }

    #[test]
    fn test_non_json_is_malformed() {
        let err = PredictResponseBody::from_slice(b"<html>oops</html>").unwrap_err();
        assert!(matches!(err, PredictionError::MalformedResponse(_)));
    }

    #[test]
    fn test_confidence_out_of_range_is_malformed() {
        let body = PredictResponseBody {
            prediction: "Sarcasm".to_string(),
            confidence: 1.5,
        };
        assert!(matches!(
            body.into_result(),
            Err(PredictionError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_confidence_bounds_are_inclusive() {
        for confidence in [0.0, 1.0] {
            let body = PredictResponseBody {
                prediction: "Sarcasm".to_string(),
                confidence,
            };
            assert!(body.into_result().is_ok());
        }
    }
}
