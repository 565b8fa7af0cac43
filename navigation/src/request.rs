use serde::{Deserialize, Serialize};
use thiserror::Error;
use wayfind_core::error::{ErrorCode, WayfindError};
use wayfind_core::model::NodeId;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NavigateRequest {
    #[serde(alias = "startLocationId")]
    pub start_location_id: NodeId,
    #[serde(alias = "endLocationId")]
    pub end_location_id: NodeId,
    /// Route to the nearest exit and stay out of elevators.
    #[serde(default)]
    pub emergency: bool,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("malformed navigate request: {0}")]
    Malformed(String),
    #[error("start_location_id must be a positive integer")]
    InvalidStartId,
    #[error("end_location_id must be a positive integer")]
    InvalidEndId,
}

impl WayfindError for RequestError {
    fn error_code(&self) -> ErrorCode {
        ErrorCode::InvalidArgument
    }
}

impl NavigateRequest {
    pub fn new(start_location_id: NodeId, end_location_id: NodeId) -> Self {
        Self {
            start_location_id,
            end_location_id,
            emergency: false,
        }
    }

    pub fn emergency(mut self, emergency: bool) -> Self {
        self.emergency = emergency;
        self
    }

    pub fn parse_json(raw: &str) -> Result<Self, RequestError> {
        let request: Self =
            serde_json::from_str(raw).map_err(|err| RequestError::Malformed(err.to_string()))?;
        request.validate()?;
        Ok(request)
    }

    pub fn validate(&self) -> Result<(), RequestError> {
        if self.start_location_id == 0 {
            return Err(RequestError::InvalidStartId);
        }
        if self.end_location_id == 0 {
            return Err(RequestError::InvalidEndId);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults_emergency_to_false() {
        let request =
            NavigateRequest::parse_json(r#"{"start_location_id": 1, "end_location_id": 42}"#)
                .unwrap();
        assert_eq!(request, NavigateRequest::new(1, 42));
    }

    #[test]
    fn test_parse_emergency_flag() {
        let request = NavigateRequest::parse_json(
            r#"{"start_location_id": 3, "end_location_id": 4, "emergency": true}"#,
        )
        .unwrap();
        assert!(request.emergency);
    }

    #[test]
    fn test_accepts_camel_case_field_names() {
        let request = NavigateRequest::parse_json(
            r#"{"startLocationId": 12, "endLocationId": 4, "emergency": true}"#,
        )
        .unwrap();
        assert_eq!(request, NavigateRequest::new(12, 4).emergency(true));

        let err = NavigateRequest::parse_json(r#"{"startLocationId": 0, "endLocationId": 4}"#)
            .unwrap_err();
        assert_eq!(err, RequestError::InvalidStartId);
    }

    #[test]
    fn test_rejects_zero_and_negative_ids() {
        assert_eq!(
            NavigateRequest::parse_json(r#"{"start_location_id": 0, "end_location_id": 4}"#),
            Err(RequestError::InvalidStartId)
        );
        assert_eq!(
            NavigateRequest::parse_json(r#"{"start_location_id": 1, "end_location_id": 0}"#),
            Err(RequestError::InvalidEndId)
        );
        assert!(matches!(
            NavigateRequest::parse_json(r#"{"start_location_id": -1, "end_location_id": 4}"#),
            Err(RequestError::Malformed(_))
        ));
    }

    #[test]
    fn test_rejects_missing_fields() {
        let err = NavigateRequest::parse_json(r#"{"start_location_id": 1}"#).unwrap_err();
        assert!(matches!(err, RequestError::Malformed(_)));
        assert_eq!(err.error_code(), ErrorCode::InvalidArgument);
    }
}
