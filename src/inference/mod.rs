pub mod linear;

use std::path::Path;

use thiserror::Error;

use crate::inference::linear::{LinearSleepModel, load_linear_model};

/// Feature vector handed to a sleep model.
///
/// `wake` is seconds since midnight, `estimated_sleep` is hours and
/// `coffee` is a cup count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SleepFeatures {
    pub wake: f64,
    pub estimated_sleep: f64,
    pub coffee: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SleepPrediction {
    /// Predicted sleep duration in seconds.
    pub actual_sleep: f64,
}

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("sleep model unavailable: {0}")]
    ModelUnavailable(String),
    #[error("invalid feature values: {0}")]
    InvalidFeatures(String),
    #[error("inference failed: {0}")]
    Internal(String),
}

pub trait SleepPredictor {
    fn predict(&self, features: &SleepFeatures) -> Result<SleepPrediction, InferenceError>;
}

/// Predictor whose model could not be constructed. Every call fails the
/// same way a model that is missing at calculation time would.
pub struct UnavailablePredictor {
    reason: String,
}

impl UnavailablePredictor {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl SleepPredictor for UnavailablePredictor {
    fn predict(&self, _features: &SleepFeatures) -> Result<SleepPrediction, InferenceError> {
        Err(InferenceError::ModelUnavailable(self.reason.clone()))
    }
}

pub struct SelectedPredictor {
    pub predictor: Box<dyn SleepPredictor>,
    pub label: String,
    pub load_error: Option<String>,
}

pub fn select_predictor(model_path: Option<&Path>) -> SelectedPredictor {
    let Some(path) = model_path else {
        log::info!("using built-in sleep model coefficients");
        return SelectedPredictor {
            predictor: Box::new(LinearSleepModel::default()),
            label: "built-in".to_string(),
            load_error: None,
        };
    };

    match load_linear_model(path) {
        Ok(model) => {
            log::info!("loaded sleep model from {}", path.display());
            SelectedPredictor {
                predictor: Box::new(model),
                label: path.display().to_string(),
                load_error: None,
            }
        }
        Err(err) => {
            let reason = format!("{err:#}");
            log::warn!("sleep model unavailable: {reason}");
            SelectedPredictor {
                predictor: Box::new(UnavailablePredictor::new(reason.clone())),
                label: path.display().to_string(),
                load_error: Some(reason),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    fn default_features() -> SleepFeatures {
        SleepFeatures {
            wake: 25_200.0,
            estimated_sleep: 8.0,
            coffee: 1.0,
        }
    }

    #[test]
    fn no_path_selects_builtin_model() {
        let selected = select_predictor(None);
        assert_eq!(selected.label, "built-in");
        assert!(selected.load_error.is_none());
        assert!(selected.predictor.predict(&default_features()).is_ok());
    }

    #[test]
    fn missing_file_selects_unavailable_predictor() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("missing.json");
        let selected = select_predictor(Some(&path));
        assert!(
            selected
                .load_error
                .as_deref()
                .is_some_and(|reason| reason.contains("unable to read model file"))
        );
        let err = selected
            .predictor
            .predict(&default_features())
            .expect_err("unavailable model should fail");
        assert!(matches!(err, InferenceError::ModelUnavailable(_)));
    }

    #[test]
    fn valid_file_is_loaded() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("model.json");
        fs::write(
            &path,
            r#"{"version": 1, "intercept": 0, "coefficients": {"wake": 0, "estimated_sleep": 3600, "coffee": 0}}"#,
        )
        .expect("write model");
        let selected = select_predictor(Some(&path));
        assert!(selected.load_error.is_none());
        let prediction = selected
            .predictor
            .predict(&default_features())
            .expect("prediction");
        assert_eq!(prediction.actual_sleep, 28_800.0);
    }

    #[test]
    fn unavailable_predictor_always_fails() {
        let predictor = UnavailablePredictor::new("missing.json not found");
        let err = predictor
            .predict(&default_features())
            .expect_err("should fail");
        assert!(matches!(err, InferenceError::ModelUnavailable(_)));
        assert!(err.to_string().contains("missing.json"));
    }
}
