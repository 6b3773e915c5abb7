use serde::{Deserialize, Serialize};

const MINUTE_MS: i64 = 60_000;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

/// Period selector driving bar resolution and default zoom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Timeframe {
    OneHour,
    FourHours,
    #[default]
    OneDay,
    OneWeek,
    OneMonth,
    OneYear,
    All,
}

/// Label pattern family used on the time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeLabelGranularity {
    Intraday,
    Daily,
    Monthly,
}

impl Timeframe {
    pub const ALL: [Timeframe; 7] = [
        Timeframe::OneHour,
        Timeframe::FourHours,
        Timeframe::OneDay,
        Timeframe::OneWeek,
        Timeframe::OneMonth,
        Timeframe::OneYear,
        Timeframe::All,
    ];

    /// Bar period in milliseconds.
    #[must_use]
    pub const fn resolution_ms(self) -> i64 {
        match self {
            Timeframe::OneHour => MINUTE_MS,
            Timeframe::FourHours => 5 * MINUTE_MS,
            Timeframe::OneDay => 15 * MINUTE_MS,
            Timeframe::OneWeek => HOUR_MS,
            Timeframe::OneMonth => 4 * HOUR_MS,
            Timeframe::OneYear => DAY_MS,
            Timeframe::All => 7 * DAY_MS,
        }
    }

    #[must_use]
    pub const fn is_longest(self) -> bool {
        matches!(self, Timeframe::All)
    }

    /// Lower bound for `Viewport::zoom_level`.
    #[must_use]
    pub const fn min_zoom_level(self) -> f64 {
        match self {
            Timeframe::All => 1.0,
            _ => 0.5,
        }
    }

    /// Bars shown after a reset. `None` means the whole loaded history.
    #[must_use]
    pub const fn default_visible_bars(self) -> Option<usize> {
        match self {
            Timeframe::All => None,
            _ => Some(100),
        }
    }

    #[must_use]
    pub const fn label_granularity(self) -> TimeLabelGranularity {
        match self {
            Timeframe::OneHour | Timeframe::FourHours | Timeframe::OneDay | Timeframe::OneWeek => {
                TimeLabelGranularity::Intraday
            }
            Timeframe::OneMonth | Timeframe::OneYear => TimeLabelGranularity::Daily,
            Timeframe::All => TimeLabelGranularity::Monthly,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Timeframe;

    #[test]
    fn resolutions_grow_with_timeframe() {
        let resolutions: Vec<i64> = Timeframe::ALL.iter().map(|t| t.resolution_ms()).collect();
        assert!(resolutions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn only_longest_timeframe_shows_everything_by_default() {
        for timeframe in Timeframe::ALL {
            assert_eq!(
                timeframe.default_visible_bars().is_none(),
                timeframe.is_longest()
            );
        }
    }
}
