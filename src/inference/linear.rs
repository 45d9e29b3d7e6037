use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::inference::{InferenceError, SleepFeatures, SleepPrediction, SleepPredictor};

const DEFAULT_INTERCEPT: f64 = -1_800.0;
const DEFAULT_WAKE_WEIGHT: f64 = 0.02;
const DEFAULT_ESTIMATED_SLEEP_WEIGHT: f64 = 3_600.0;
const DEFAULT_COFFEE_WEIGHT: f64 = 600.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearCoefficients {
    pub wake: f64,
    pub estimated_sleep: f64,
    pub coffee: f64,
}

/// Linear regressor over the (wake, estimated_sleep, coffee) feature schema.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSleepModel {
    pub intercept: f64,
    pub coefficients: LinearCoefficients,
}

impl Default for LinearSleepModel {
    fn default() -> Self {
        Self {
            intercept: DEFAULT_INTERCEPT,
            coefficients: LinearCoefficients {
                wake: DEFAULT_WAKE_WEIGHT,
                estimated_sleep: DEFAULT_ESTIMATED_SLEEP_WEIGHT,
                coffee: DEFAULT_COFFEE_WEIGHT,
            },
        }
    }
}

impl SleepPredictor for LinearSleepModel {
    fn predict(&self, features: &SleepFeatures) -> Result<SleepPrediction, InferenceError> {
        let values = [
            ("wake", features.wake),
            ("estimated_sleep", features.estimated_sleep),
            ("coffee", features.coffee),
        ];
        if let Some((name, value)) = values.iter().find(|(_, value)| !value.is_finite()) {
            return Err(InferenceError::InvalidFeatures(format!(
                "{name} must be finite, got {value}"
            )));
        }

        let weights = &self.coefficients;
        let actual_sleep = self.intercept
            + weights.wake * features.wake
            + weights.estimated_sleep * features.estimated_sleep
            + weights.coffee * features.coffee;
        if !actual_sleep.is_finite() || actual_sleep <= 0.0 {
            return Err(InferenceError::Internal(format!(
                "model produced unusable sleep duration {actual_sleep}"
            )));
        }
        Ok(SleepPrediction { actual_sleep })
    }
}

pub fn load_linear_model(path: &Path) -> Result<LinearSleepModel> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("unable to read model file {}", path.display()))?;
    parse_linear_model_text(&content)
}

pub fn parse_linear_model_text(content: &str) -> Result<LinearSleepModel> {
    let raw = serde_json::from_str::<LinearModelFile>(content).map_err(|err| {
        let line = err.line();
        let column = err.column();
        anyhow::anyhow!("invalid JSON at line {line}, column {column}: {err}")
    })?;

    if raw.version != 1 {
        bail!(
            "unsupported model version {}; expected version 1",
            raw.version
        );
    }

    let defaults = LinearSleepModel::default();
    let intercept = raw.intercept.unwrap_or(defaults.intercept);
    let coefficients = LinearCoefficients {
        wake: raw.coefficients.wake,
        estimated_sleep: raw.coefficients.estimated_sleep,
        coffee: raw.coefficients.coffee,
    };
    for (name, value) in [
        ("intercept", intercept),
        ("wake", coefficients.wake),
        ("estimated_sleep", coefficients.estimated_sleep),
        ("coffee", coefficients.coffee),
    ] {
        if !value.is_finite() {
            bail!("model coefficient '{name}' must be finite");
        }
    }

    Ok(LinearSleepModel {
        intercept,
        coefficients,
    })
}

#[derive(Debug, Deserialize)]
struct LinearModelFile {
    version: u32,
    #[serde(default)]
    intercept: Option<f64>,
    coefficients: CoefficientsFile,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CoefficientsFile {
    wake: f64,
    estimated_sleep: f64,
    coffee: f64,
}
