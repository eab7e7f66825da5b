use serde::{Deserialize, Serialize};

/// A single chartable point produced by generic time-series extraction.
///
/// `time` stays a label (date, ISO timestamp or whatever the mapped x path
/// yields) since generic responses carry no canonical time representation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    pub time: String,
    pub value: f64,
}

impl TimePoint {
    pub fn new(time: impl Into<String>, value: f64) -> Self {
        Self {
            time: time.into(),
            value,
        }
    }
}
