//! Pure aggregations over repository output.
//!
//! Nothing here touches storage; callers pass loaded records and, for
//! calendar-based series, the reference time.

pub mod bmi;
pub mod mood;
pub mod trend;
