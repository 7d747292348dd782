#[macro_use]
extern crate log;

pub mod loader;
pub use loader::LoadError;

pub mod report;

pub mod algo {
    pub use hrv_patterns_algos::*;
}

pub mod types {
    pub use hrv_patterns_types::*;
}
