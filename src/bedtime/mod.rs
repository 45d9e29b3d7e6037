pub mod calculator;
pub mod form;
