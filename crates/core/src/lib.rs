pub mod clock;
pub mod config;
pub mod dates;
pub mod error;
pub mod keyed;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::AppConfig;
pub use dates::DurationUnit;
pub use error::HitFinderError;
pub use keyed::KeyedMap;
pub use types::*;
