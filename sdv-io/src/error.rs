use thiserror::Error;

#[derive(Error, Debug)]
pub enum IoError {
    #[error("Malformed detection result ({reason}): {fragment}")]
    MalformedDetectionResult { reason: String, fragment: String },

    #[error("Calibration load failure: {0}")]
    CalibrationLoad(String),

    #[error("History write error: {0}")]
    HistoryWrite(#[from] std::io::Error),
}

impl IoError {
    pub(crate) fn malformed(reason: impl Into<String>, fragment: impl ToString) -> Self {
        IoError::MalformedDetectionResult {
            reason: reason.into(),
            fragment: fragment.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, IoError>;
