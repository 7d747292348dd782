#[macro_use]
extern crate log;

pub(crate) mod detector;
pub use detector::PatternDetector;

pub(crate) mod rules;
pub use rules::{Direction, Normalization, Rule, RULES};

mod error;
pub use error::DetectError;

pub mod helpers;
