//! Error types for the meal_scan library

use thiserror::Error;

/// Result type alias for meal_scan operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Error types for meal analysis operations
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Input image missing, unreadable or undecodable
    #[error("Input unavailable: {message}")]
    InputUnavailable {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Analyzer configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A persisted classifier model exists but could not be loaded
    #[error("Model load error: {message}")]
    ModelLoadError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Classifier model and feature extractor disagree on descriptor length
    #[error("Feature dimension mismatch: model expects {expected} values, extractor produces {actual}")]
    FeatureDimensionMismatch { expected: usize, actual: usize },

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },

    /// Generic processing error
    #[error("Processing error: {message}")]
    ProcessingError { message: String },
}

impl AnalysisError {
    /// Create an input-unavailable error with context
    pub fn input_unavailable<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::InputUnavailable {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error with context
    pub fn config<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ConfigError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a model load error with context
    pub fn model_load<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ModelLoadError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn invalid_parameter(parameter: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            value: value.to_string(),
        }
    }

    pub fn processing(message: impl Into<String>) -> Self {
        Self::ProcessingError {
            message: message.into(),
        }
    }

    /// Check if this error is limited to a single input.
    ///
    /// Configuration and model errors describe an inconsistent deployment and
    /// will fail every subsequent call as well.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AnalysisError::InputUnavailable { .. } | AnalysisError::ProcessingError { .. }
        )
    }

    /// Get user-friendly error description for application display
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::InputUnavailable { .. } => {
                "Could not read the image. Please check the file path and format.".to_string()
            }
            AnalysisError::FeatureDimensionMismatch { expected, actual } => {
                format!(
                    "The classifier model was trained on {}-value descriptors but the analyzer produces {}. Retrain the model with the current feature settings.",
                    expected, actual
                )
            }
            AnalysisError::ModelLoadError { .. } => {
                "The classifier model file is damaged. Retrain it or remove it to use color rules.".to_string()
            }
            AnalysisError::ConfigError { .. } | AnalysisError::InvalidParameter { .. } => {
                "The analyzer configuration is invalid. Regenerate it with generate_config.".to_string()
            }
            _ => "Meal analysis failed. Please try with a different image.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_classification() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        assert!(AnalysisError::input_unavailable("plate.jpg", io).is_recoverable());
        assert!(!AnalysisError::FeatureDimensionMismatch { expected: 24, actual: 16 }.is_recoverable());
        assert!(!AnalysisError::invalid_parameter("hue_bins", 0).is_recoverable());
    }

    #[test]
    fn test_dimension_mismatch_message() {
        let err = AnalysisError::FeatureDimensionMismatch { expected: 24, actual: 16 };
        assert!(err.to_string().contains("24"));
        assert!(err.user_message().contains("Retrain"));
    }
}
