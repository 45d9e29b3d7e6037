mod bedtime;
mod inference;
mod ui;

use std::path::PathBuf;

use anyhow::{Result, bail};
use chrono::{Local, NaiveTime};
use clap::{Parser, ValueEnum};

use crate::bedtime::calculator::TimeDisplayMode;
use crate::bedtime::form::{
    BedtimeForm, DEFAULT_COFFEE_COUNT, DEFAULT_SLEEP_GOAL_HOURS, FormInputs, MAX_COFFEE_COUNT,
    MAX_SLEEP_GOAL_HOURS, MIN_COFFEE_COUNT, MIN_SLEEP_GOAL_HOURS, SLEEP_GOAL_STEP_HOURS,
};
use crate::inference::select_predictor;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliClock {
    #[value(name = "12h")]
    Hour12,
    #[value(name = "24h")]
    Hour24,
}

impl From<CliClock> for TimeDisplayMode {
    fn from(value: CliClock) -> Self {
        match value {
            CliClock::Hour12 => TimeDisplayMode::Hour12,
            CliClock::Hour24 => TimeDisplayMode::Hour24,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "betterrest",
    version,
    about = "Recommends a bedtime from wake time, sleep goal and coffee intake"
)]
struct Cli {
    /// JSON sleep model; built-in coefficients are used when omitted.
    #[arg(long)]
    model: Option<PathBuf>,

    #[arg(long, default_value = "07:00", value_parser = parse_wake_time)]
    wake: NaiveTime,

    #[arg(long, default_value_t = DEFAULT_SLEEP_GOAL_HOURS)]
    sleep: f64,

    #[arg(
        long,
        default_value_t = DEFAULT_COFFEE_COUNT,
        value_parser = clap::value_parser!(u8).range(i64::from(MIN_COFFEE_COUNT)..=i64::from(MAX_COFFEE_COUNT))
    )]
    coffee: u8,

    #[arg(long, value_enum, default_value_t = CliClock::Hour12)]
    clock: CliClock,

    /// Print one calculation and exit instead of opening the window.
    #[arg(long)]
    print: bool,
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    validate_sleep_goal(cli.sleep)?;

    let selected = select_predictor(cli.model.as_deref());
    let form = BedtimeForm::new(
        selected.predictor,
        Local::now().date_naive(),
        FormInputs {
            wake_time: cli.wake,
            sleep_goal_hours: cli.sleep,
            coffee_count: cli.coffee,
        },
        cli.clock.into(),
    );

    if cli.print {
        let outcome = form.outcome();
        println!("{}", outcome.title);
        println!("{}", outcome.message);
        return Ok(());
    }

    let model_label = match selected.load_error {
        Some(_) => format!("{} (unavailable)", selected.label),
        None => selected.label,
    };
    ui::app::run_gui(form, model_label)
}

fn parse_wake_time(input: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(input.trim(), "%H:%M")
        .map_err(|_| format!("invalid wake time '{input}', expected HH:MM"))
}

fn validate_sleep_goal(hours: f64) -> Result<()> {
    if !(MIN_SLEEP_GOAL_HOURS..=MAX_SLEEP_GOAL_HOURS).contains(&hours) {
        bail!("--sleep must be between {MIN_SLEEP_GOAL_HOURS} and {MAX_SLEEP_GOAL_HOURS} hours");
    }
    if (hours / SLEEP_GOAL_STEP_HOURS).fract() != 0.0 {
        bail!("--sleep must be a multiple of {SLEEP_GOAL_STEP_HOURS} hours");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wake_parser_accepts_hh_mm() {
        assert_eq!(
            parse_wake_time("06:45").expect("06:45"),
            NaiveTime::from_hms_opt(6, 45, 0).expect("time")
        );
        assert!(parse_wake_time("25:00").is_err());
        assert!(parse_wake_time("7am").is_err());
    }

    #[test]
    fn sleep_goal_validation_follows_stepper_domain() {
        assert!(validate_sleep_goal(4.0).is_ok());
        assert!(validate_sleep_goal(12.0).is_ok());
        assert!(validate_sleep_goal(7.75).is_ok());
        assert!(validate_sleep_goal(3.75).is_err());
        assert!(validate_sleep_goal(12.25).is_err());
        let err = validate_sleep_goal(8.1).expect_err("off-grid value");
        assert!(err.to_string().contains("multiple of 0.25"));
    }

    #[test]
    fn clock_flag_maps_to_display_mode() {
        let cli = Cli::parse_from(["betterrest", "--clock", "24h", "--print"]);
        assert_eq!(TimeDisplayMode::from(cli.clock), TimeDisplayMode::Hour24);
        assert_eq!(cli.coffee, 1);
        assert_eq!(cli.sleep, 8.0);
    }

    #[test]
    fn coffee_flag_rejects_out_of_range() {
        assert!(Cli::try_parse_from(["betterrest", "--coffee", "11"]).is_err());
        assert!(Cli::try_parse_from(["betterrest", "--coffee", "0"]).is_err());
        assert!(Cli::try_parse_from(["betterrest", "--coffee", "10"]).is_ok());
    }
}
