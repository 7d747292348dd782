use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum DetectError {
    #[error("record {index} has a non-finite `{field}` value")]
    NonFiniteValue { index: usize, field: &'static str },
    #[error("baseline HRV must be a positive number, got {0}")]
    InvalidBaseline(f64),
}
