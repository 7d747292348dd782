#[macro_use]
extern crate serde;

mod record;
pub use record::DailyRecord;

mod finding;
pub use finding::{Finding, Strength};
