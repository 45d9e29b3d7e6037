use chrono::{NaiveDateTime, NaiveTime, TimeDelta, Timelike};

use crate::inference::{InferenceError, SleepFeatures, SleepPredictor};

pub const SUCCESS_TITLE: &str = "Your ideal bedtime is";
pub const ERROR_TITLE: &str = "Error";
pub const ERROR_MESSAGE: &str = "Sorry, there was a problem calculating your bedtime.";

const NANOS_PER_SECOND: f64 = 1_000_000_000.0;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TimeDisplayMode {
    Hour24,
    Hour12,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BedtimeInputs {
    /// Wake time anchored on a calendar day so the subtraction can cross midnight.
    pub wake_time: NaiveDateTime,
    pub sleep_goal_hours: f64,
    pub coffee_count: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BedtimeOutcome {
    pub title: String,
    pub message: String,
    pub bedtime: Option<NaiveDateTime>,
}

impl BedtimeOutcome {
    fn success(bedtime: NaiveDateTime, mode: TimeDisplayMode) -> Self {
        Self {
            title: SUCCESS_TITLE.to_string(),
            message: format_time_of_day(bedtime.time(), mode),
            bedtime: Some(bedtime),
        }
    }

    fn failure() -> Self {
        Self {
            title: ERROR_TITLE.to_string(),
            message: ERROR_MESSAGE.to_string(),
            bedtime: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.bedtime.is_none()
    }
}

pub fn wake_seconds_since_midnight(wake: NaiveTime) -> u32 {
    wake.hour() * 60 * 60 + wake.minute() * 60
}

pub fn features_for(inputs: &BedtimeInputs) -> SleepFeatures {
    SleepFeatures {
        wake: f64::from(wake_seconds_since_midnight(inputs.wake_time.time())),
        estimated_sleep: inputs.sleep_goal_hours,
        coffee: f64::from(inputs.coffee_count),
    }
}

pub fn predict_bedtime(
    predictor: &dyn SleepPredictor,
    inputs: &BedtimeInputs,
) -> Result<NaiveDateTime, InferenceError> {
    let prediction = predictor.predict(&features_for(inputs))?;
    let sleep = duration_from_seconds(prediction.actual_sleep)?;
    inputs.wake_time.checked_sub_signed(sleep).ok_or_else(|| {
        InferenceError::Internal(format!(
            "bedtime out of calendar range for {} seconds of sleep",
            prediction.actual_sleep
        ))
    })
}

/// Runs one full recomputation. Every failure collapses into the same
/// user-facing error pair.
pub fn calculate_bedtime(
    predictor: &dyn SleepPredictor,
    inputs: &BedtimeInputs,
    mode: TimeDisplayMode,
) -> BedtimeOutcome {
    match predict_bedtime(predictor, inputs) {
        Ok(bedtime) => {
            log::debug!(
                "bedtime {} for wake {} (goal {}h, {} cup(s))",
                bedtime,
                inputs.wake_time,
                inputs.sleep_goal_hours,
                inputs.coffee_count
            );
            BedtimeOutcome::success(bedtime, mode)
        }
        Err(_) => {
            log::warn!("bedtime calculation failed");
            BedtimeOutcome::failure()
        }
    }
}

pub fn format_time_of_day(time: NaiveTime, mode: TimeDisplayMode) -> String {
    match mode {
        TimeDisplayMode::Hour24 => format!("{:02}:{:02}", time.hour(), time.minute()),
        TimeDisplayMode::Hour12 => {
            let (is_pm, hour12) = time.hour12();
            let meridiem = if is_pm { "PM" } else { "AM" };
            format!("{}:{:02} {}", hour12, time.minute(), meridiem)
        }
    }
}

fn duration_from_seconds(seconds: f64) -> Result<TimeDelta, InferenceError> {
    let nanos = seconds * NANOS_PER_SECOND;
    if !nanos.is_finite() || nanos.abs() >= i64::MAX as f64 {
        return Err(InferenceError::Internal(format!(
            "sleep duration {seconds} is not representable"
        )));
    }
    Ok(TimeDelta::nanoseconds(nanos.round() as i64))
}
