//! Error types shared across CourtVision crates.

/// Top-level error type for CourtVision operations.
#[derive(Debug, thiserror::Error)]
pub enum CourtVisionError {
    /// No image-to-court transform is available for the video. Fatal: zone
    /// mapping and hoop-relative geometry are meaningless without it.
    #[error("Calibration missing: {message}")]
    CalibrationMissing { message: String },

    #[error("Invalid calibration: {message}")]
    InvalidCalibration { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias using CourtVisionError.
pub type CourtVisionResult<T> = Result<T, CourtVisionError>;

impl CourtVisionError {
    pub fn calibration_missing(msg: impl Into<String>) -> Self {
        Self::CalibrationMissing {
            message: msg.into(),
        }
    }

    pub fn invalid_calibration(msg: impl Into<String>) -> Self {
        Self::InvalidCalibration {
            message: msg.into(),
        }
    }

    /// Whether this error aborts a whole analysis pass.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::CalibrationMissing { .. } | Self::InvalidCalibration { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calibration_missing_is_fatal() {
        let err = CourtVisionError::calibration_missing("video-1");
        assert!(err.is_fatal());
        assert_eq!(err.to_string(), "Calibration missing: video-1");
    }

    #[test]
    fn test_io_error_converts() {
        fn read() -> CourtVisionResult<()> {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))?;
            Ok(())
        }
        let err = read().unwrap_err();
        assert!(matches!(err, CourtVisionError::Io(_)));
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_json_error_converts() {
        fn parse() -> CourtVisionResult<serde_json::Value> {
            Ok(serde_json::from_str("{not json")?)
        }
        assert!(matches!(parse().unwrap_err(), CourtVisionError::Json(_)));
    }
}
