use serde::{Deserialize, Serialize};

use super::field::OhlcvField;

/// One OHLCV data point for a time bucket.
///
/// Candles are only produced by the provider adapters and are never mutated
/// afterwards. Collections of candles are ordered by `time` ascending.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Bucket start, epoch seconds (UTC)
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    /// Trading volume, when the provider reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

impl Candle {
    /// Create a candle without volume.
    pub fn new(time: i64, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
            volume: None,
        }
    }

    /// Attach a volume to the candle.
    pub fn with_volume(mut self, volume: Option<f64>) -> Self {
        self.volume = volume;
        self
    }

    /// Read one OHLCV component. Volume is `None` when absent.
    pub fn field(&self, field: OhlcvField) -> Option<f64> {
        match field {
            OhlcvField::Open => Some(self.open),
            OhlcvField::High => Some(self.high),
            OhlcvField::Low => Some(self.low),
            OhlcvField::Close => Some(self.close),
            OhlcvField::Volume => self.volume,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candle_field_access() {
        let candle = Candle::new(1_704_153_600, 150.0, 155.0, 149.0, 152.0);
        assert_eq!(candle.field(OhlcvField::Open), Some(150.0));
        assert_eq!(candle.field(OhlcvField::Close), Some(152.0));
        assert_eq!(candle.field(OhlcvField::Volume), None);

        let candle = candle.with_volume(Some(1_000.0));
        assert_eq!(candle.field(OhlcvField::Volume), Some(1_000.0));
    }

    #[test]
    fn test_candle_serializes_without_missing_volume() {
        let candle = Candle::new(10, 1.0, 2.0, 0.5, 1.5);
        let json = serde_json::to_value(candle).unwrap();
        assert!(json.get("volume").is_none());
        assert_eq!(json["close"], 1.5);
    }
}
