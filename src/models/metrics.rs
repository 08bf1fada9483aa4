use serde::{Deserialize, Serialize};

/// Minimum, mean and maximum observed temperature over a date span.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeMetrics {
    pub tmin: f64,
    pub tavg: f64,
    pub tmax: f64,
}

impl RangeMetrics {
    /// Reduce temperatures to min/mean/max. `None` when there are none.
    pub fn from_temperatures<I>(temperatures: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut tmin = f64::INFINITY;
        let mut tmax = f64::NEG_INFINITY;
        let mut sum = 0.0f64;
        let mut count = 0usize;

        for temp in temperatures {
            tmin = tmin.min(temp);
            tmax = tmax.max(temp);
            sum += temp;
            count += 1;
        }

        if count == 0 {
            return None;
        }

        Some(Self {
            tmin,
            tavg: sum / count as f64,
            tmax,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_temperatures() {
        let metrics = RangeMetrics::from_temperatures([60.0, 62.0, 58.0]).unwrap();
        assert_eq!(metrics.tmin, 58.0);
        assert_eq!(metrics.tavg, 60.0);
        assert_eq!(metrics.tmax, 62.0);
    }

    #[test]
    fn test_single_value() {
        let metrics = RangeMetrics::from_temperatures([71.5]).unwrap();
        assert_eq!(metrics.tmin, 71.5);
        assert_eq!(metrics.tavg, 71.5);
        assert_eq!(metrics.tmax, 71.5);
    }

    #[test]
    fn test_empty_is_none() {
        assert!(RangeMetrics::from_temperatures(Vec::new()).is_none());
    }

    #[test]
    fn test_serialized_field_names() {
        let metrics = RangeMetrics {
            tmin: 1.0,
            tavg: 2.0,
            tmax: 3.0,
        };
        let json = serde_json::to_value(metrics).unwrap();
        assert_eq!(json, serde_json::json!({"tmin": 1.0, "tavg": 2.0, "tmax": 3.0}));
    }
}
