use chrono::{NaiveDate, NaiveTime, Timelike};

use crate::bedtime::calculator::{
    BedtimeInputs, BedtimeOutcome, TimeDisplayMode, calculate_bedtime,
};
use crate::inference::SleepPredictor;

pub const MIN_SLEEP_GOAL_HOURS: f64 = 4.0;
pub const MAX_SLEEP_GOAL_HOURS: f64 = 12.0;
pub const SLEEP_GOAL_STEP_HOURS: f64 = 0.25;
pub const MIN_COFFEE_COUNT: u8 = 1;
pub const MAX_COFFEE_COUNT: u8 = 10;
pub const DEFAULT_SLEEP_GOAL_HOURS: f64 = 8.0;
pub const DEFAULT_COFFEE_COUNT: u8 = 1;

pub fn default_wake_time() -> NaiveTime {
    NaiveTime::from_hms_opt(7, 0, 0).unwrap_or(NaiveTime::MIN)
}

/// Snaps a raw value onto the stepper grid: 4.0..=12.0 in quarter hours.
pub fn constrain_sleep_goal(hours: f64) -> f64 {
    if !hours.is_finite() {
        return DEFAULT_SLEEP_GOAL_HOURS;
    }
    let snapped = (hours / SLEEP_GOAL_STEP_HOURS).round() * SLEEP_GOAL_STEP_HOURS;
    snapped.clamp(MIN_SLEEP_GOAL_HOURS, MAX_SLEEP_GOAL_HOURS)
}

pub fn constrain_coffee_count(count: u8) -> u8 {
    count.clamp(MIN_COFFEE_COUNT, MAX_COFFEE_COUNT)
}

pub fn sleep_goal_label(hours: f64) -> String {
    let text = format!("{hours:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

pub fn coffee_label(count: u8) -> String {
    if count == 1 {
        "1 cup".to_string()
    } else {
        format!("{count} cups")
    }
}

/// Input values for the three form controls. Wake time carries only hour
/// and minute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormInputs {
    pub wake_time: NaiveTime,
    pub sleep_goal_hours: f64,
    pub coffee_count: u8,
}

impl Default for FormInputs {
    fn default() -> Self {
        Self {
            wake_time: default_wake_time(),
            sleep_goal_hours: DEFAULT_SLEEP_GOAL_HOURS,
            coffee_count: DEFAULT_COFFEE_COUNT,
        }
    }
}

/// Holds the form inputs and the latest result. Every setter that changes
/// a value reruns the calculation before returning.
pub struct BedtimeForm {
    predictor: Box<dyn SleepPredictor>,
    wake_date: NaiveDate,
    inputs: FormInputs,
    display_mode: TimeDisplayMode,
    outcome: BedtimeOutcome,
}

impl BedtimeForm {
    pub fn new(
        predictor: Box<dyn SleepPredictor>,
        wake_date: NaiveDate,
        inputs: FormInputs,
        display_mode: TimeDisplayMode,
    ) -> Self {
        let inputs = FormInputs {
            wake_time: truncate_to_minute(inputs.wake_time),
            sleep_goal_hours: constrain_sleep_goal(inputs.sleep_goal_hours),
            coffee_count: constrain_coffee_count(inputs.coffee_count),
        };
        let bedtime_inputs = to_bedtime_inputs(wake_date, &inputs);
        let outcome = calculate_bedtime(predictor.as_ref(), &bedtime_inputs, display_mode);
        Self {
            predictor,
            wake_date,
            inputs,
            display_mode,
            outcome,
        }
    }

    pub fn inputs(&self) -> &FormInputs {
        &self.inputs
    }

    pub fn outcome(&self) -> &BedtimeOutcome {
        &self.outcome
    }

    pub fn display_mode(&self) -> TimeDisplayMode {
        self.display_mode
    }

    pub fn set_wake_time(&mut self, wake_time: NaiveTime) -> bool {
        let wake_time = truncate_to_minute(wake_time);
        if wake_time == self.inputs.wake_time {
            return false;
        }
        self.inputs.wake_time = wake_time;
        self.recalculate();
        true
    }

    pub fn set_wake_hour_minute(&mut self, hour: u32, minute: u32) -> bool {
        match NaiveTime::from_hms_opt(hour, minute, 0) {
            Some(wake_time) => self.set_wake_time(wake_time),
            None => false,
        }
    }

    pub fn set_sleep_goal(&mut self, hours: f64) -> bool {
        let hours = constrain_sleep_goal(hours);
        if hours == self.inputs.sleep_goal_hours {
            return false;
        }
        self.inputs.sleep_goal_hours = hours;
        self.recalculate();
        true
    }

    /// Moves the sleep goal by `steps` quarter hours, stopping at the range ends.
    pub fn step_sleep_goal(&mut self, steps: i32) -> bool {
        let target = self.inputs.sleep_goal_hours + f64::from(steps) * SLEEP_GOAL_STEP_HOURS;
        self.set_sleep_goal(target)
    }

    pub fn set_coffee_count(&mut self, count: u8) -> bool {
        let count = constrain_coffee_count(count);
        if count == self.inputs.coffee_count {
            return false;
        }
        self.inputs.coffee_count = count;
        self.recalculate();
        true
    }

    pub fn set_display_mode(&mut self, mode: TimeDisplayMode) -> bool {
        if mode == self.display_mode {
            return false;
        }
        self.display_mode = mode;
        self.recalculate();
        true
    }

    fn recalculate(&mut self) {
        let bedtime_inputs = to_bedtime_inputs(self.wake_date, &self.inputs);
        self.outcome =
            calculate_bedtime(self.predictor.as_ref(), &bedtime_inputs, self.display_mode);
    }
}

fn to_bedtime_inputs(wake_date: NaiveDate, inputs: &FormInputs) -> BedtimeInputs {
    BedtimeInputs {
        wake_time: wake_date.and_time(inputs.wake_time),
        sleep_goal_hours: inputs.sleep_goal_hours,
        coffee_count: inputs.coffee_count,
    }
}

fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
}
