//! Fulfillment durations.

use chrono::TimeDelta;
use serde::{Serialize, Serializer};

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Time between an order being placed and a line being marked fulfilled.
///
/// Displays as `D days HH hours MM minutes`, truncated to whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FulfillmentTime(TimeDelta);

impl FulfillmentTime {
    /// Wrap a raw duration.
    #[must_use]
    pub const fn new(duration: TimeDelta) -> Self {
        Self(duration)
    }

    /// Mean of `durations`, truncated to whole seconds.
    ///
    /// Returns `None` when there is nothing to average.
    pub fn mean<I>(durations: I) -> Option<Self>
    where
        I: IntoIterator<Item = TimeDelta>,
    {
        let (total, count) = durations
            .into_iter()
            .fold((0_i64, 0_i64), |(total, count), d| {
                (total.saturating_add(d.num_seconds()), count + 1)
            });
        if count == 0 {
            return None;
        }
        Some(Self(TimeDelta::seconds(total / count)))
    }

    /// The underlying duration.
    #[must_use]
    pub const fn as_duration(&self) -> TimeDelta {
        self.0
    }
}

impl std::fmt::Display for FulfillmentTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Clock skew can put a fulfillment mark before placement
        let minutes = self.0.num_minutes().max(0);
        let days = minutes / MINUTES_PER_DAY;
        let hours = (minutes % MINUTES_PER_DAY) / 60;
        let minutes = minutes % 60;
        write!(f, "{days} days {hours:02} hours {minutes:02} minutes")
    }
}

impl Serialize for FulfillmentTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.0.num_seconds())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_always_has_days() {
        let time = FulfillmentTime::new(TimeDelta::minutes(5));
        assert_eq!(time.to_string(), "0 days 00 hours 05 minutes");
    }

    #[test]
    fn test_display_multi_day() {
        let time = FulfillmentTime::new(
            TimeDelta::days(2) + TimeDelta::hours(5) + TimeDelta::minutes(30),
        );
        assert_eq!(time.to_string(), "2 days 05 hours 30 minutes");
    }

    #[test]
    fn test_display_truncates_seconds() {
        let time = FulfillmentTime::new(TimeDelta::hours(2) + TimeDelta::seconds(59));
        assert_eq!(time.to_string(), "0 days 02 hours 00 minutes");
    }

    #[test]
    fn test_negative_duration_displays_as_zero() {
        let time = FulfillmentTime::new(TimeDelta::minutes(-10));
        assert_eq!(time.to_string(), "0 days 00 hours 00 minutes");
    }

    #[test]
    fn test_mean() {
        let mean = FulfillmentTime::mean([TimeDelta::days(6), TimeDelta::days(3)]);
        assert_eq!(
            mean,
            Some(FulfillmentTime::new(TimeDelta::days(4) + TimeDelta::hours(12)))
        );
        assert_eq!(FulfillmentTime::mean(Vec::new()), None);
    }

    #[test]
    fn test_mean_truncates_to_seconds() {
        let mean = FulfillmentTime::mean([TimeDelta::seconds(1), TimeDelta::seconds(2)]);
        assert_eq!(mean, Some(FulfillmentTime::new(TimeDelta::seconds(1))));
    }
}
