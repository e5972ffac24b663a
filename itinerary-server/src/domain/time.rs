//! Wall-clock time handling for itinerary steps.
//!
//! The backend provides times as "HH:MM" or "HH:MM:SS" strings with no date.
//! Itineraries that run past midnight therefore appear to go backwards
//! (e.g. "23:50" followed by "00:10"); callers that need a span handle that
//! with [`WallTime::minutes_until`].

use chrono::{NaiveTime, Timelike};
use std::fmt;

/// Seconds in one day; the wraparound period for wall-clock spans.
const SECONDS_PER_DAY: i64 = 24 * 60 * 60;
const MINUTES_PER_DAY: i64 = 24 * 60;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time {input:?}: {reason}")]
pub struct TimeError {
    input: String,
    reason: &'static str,
}

impl TimeError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}

/// A time of day without a date.
///
/// # Examples
///
/// ```
/// use itinerary_server::domain::WallTime;
///
/// let t = WallTime::parse("14:30").unwrap();
/// assert_eq!(t.to_string(), "14:30");
///
/// let t = WallTime::parse("07:05:30").unwrap();
/// assert_eq!(t.to_string(), "07:05:30");
///
/// assert!(WallTime::parse("1430").is_err());
/// assert!(WallTime::parse("25:00").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WallTime(NaiveTime);

impl WallTime {
    /// Parse "HH:MM" or "HH:MM:SS".
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let bytes = s.as_bytes();

        if bytes.len() != 5 && bytes.len() != 8 {
            return Err(TimeError::new(s, "expected HH:MM or HH:MM:SS format"));
        }

        if bytes[2] != b':' {
            return Err(TimeError::new(s, "expected colon at position 2"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new(s, "invalid hour digits"))?;
        if hour > 23 {
            return Err(TimeError::new(s, "hour must be 0-23"));
        }

        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new(s, "invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new(s, "minute must be 0-59"));
        }

        let second = if bytes.len() == 8 {
            if bytes[5] != b':' {
                return Err(TimeError::new(s, "expected colon at position 5"));
            }
            let second = parse_two_digits(&bytes[6..8])
                .ok_or_else(|| TimeError::new(s, "invalid second digits"))?;
            if second > 59 {
                return Err(TimeError::new(s, "second must be 0-59"));
            }
            second
        } else {
            0
        };

        let time = NaiveTime::from_hms_opt(hour, minute, second)
            .ok_or_else(|| TimeError::new(s, "invalid time"))?;

        Ok(Self(time))
    }

    /// Seconds since midnight.
    pub fn seconds_from_midnight(&self) -> i64 {
        i64::from(self.0.num_seconds_from_midnight())
    }

    /// Seconds from `self` forward to `later`, wrapping past midnight when
    /// `later` is earlier in the day.
    ///
    /// Only meaningful for spans shorter than 24 hours: a span of exactly one
    /// day reads as zero, and anything longer loses whole days.
    pub fn seconds_until(&self, later: WallTime) -> i64 {
        let diff = later.seconds_from_midnight() - self.seconds_from_midnight();
        if diff < 0 { diff + SECONDS_PER_DAY } else { diff }
    }

    /// Whole minutes from `self` forward to `later`, with the same midnight
    /// wraparound as [`WallTime::seconds_until`].
    ///
    /// Seconds round to the nearest minute, so a span a few seconds short of
    /// a day reads as zero rather than 1440.
    ///
    /// # Examples
    ///
    /// ```
    /// use itinerary_server::domain::WallTime;
    ///
    /// let start = WallTime::parse("23:50").unwrap();
    /// let end = WallTime::parse("00:10").unwrap();
    /// assert_eq!(start.minutes_until(end), 20);
    /// ```
    pub fn minutes_until(&self, later: WallTime) -> i64 {
        let minutes = (self.seconds_until(later) as f64 / 60.0).round() as i64;
        minutes.rem_euclid(MINUTES_PER_DAY)
    }
}

impl fmt::Debug for WallTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WallTime({self})")
    }
}

impl fmt::Display for WallTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0.hour(), self.0.minute())?;
        if self.0.second() != 0 {
            write!(f, ":{:02}", self.0.second())?;
        }
        Ok(())
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> WallTime {
        WallTime::parse(s).unwrap()
    }

    #[test]
    fn parse_valid_times() {
        assert_eq!(t("00:00").seconds_from_midnight(), 0);
        assert_eq!(t("23:59").seconds_from_midnight(), 23 * 3600 + 59 * 60);
        assert_eq!(t("10:15:30").seconds_from_midnight(), 10 * 3600 + 15 * 60 + 30);
    }

    #[test]
    fn parse_invalid_format() {
        assert!(WallTime::parse("").is_err());
        assert!(WallTime::parse("1:30").is_err());
        assert!(WallTime::parse("14-30").is_err());
        assert!(WallTime::parse("14:30:5").is_err());
        assert!(WallTime::parse("14:30-05").is_err());
        assert!(WallTime::parse("ab:cd").is_err());
    }

    #[test]
    fn parse_out_of_range() {
        assert!(WallTime::parse("24:00").is_err());
        assert!(WallTime::parse("12:60").is_err());
        assert!(WallTime::parse("12:00:60").is_err());
    }

    #[test]
    fn error_mentions_input() {
        let err = WallTime::parse("25:00").unwrap_err();
        assert_eq!(err.to_string(), "invalid time \"25:00\": hour must be 0-23");
    }

    #[test]
    fn span_same_day() {
        assert_eq!(t("10:00").minutes_until(t("10:45")), 45);
        assert_eq!(t("10:00").minutes_until(t("10:00")), 0);
    }

    #[test]
    fn span_wraps_midnight() {
        assert_eq!(t("23:50").minutes_until(t("00:10")), 20);
        assert_eq!(t("23:59:30").seconds_until(t("00:00:15")), 45);
    }

    #[test]
    fn span_rounds_seconds() {
        assert_eq!(t("10:00:00").minutes_until(t("10:01:29")), 1);
        assert_eq!(t("10:00:00").minutes_until(t("10:01:30")), 2);
    }

    #[test]
    fn span_just_short_of_a_day_rounds_to_zero() {
        assert_eq!(t("10:00:30").seconds_until(t("10:00:10")), 86380);
        assert_eq!(t("10:00:30").minutes_until(t("10:00:10")), 0);
        assert_eq!(t("00:00:00").minutes_until(t("23:59:59")), 0);
        assert_eq!(t("00:00:00").minutes_until(t("23:59:29")), 1439);
    }

    #[test]
    fn display_omits_zero_seconds() {
        assert_eq!(t("08:05").to_string(), "08:05");
        assert_eq!(t("08:05:00").to_string(), "08:05");
        assert_eq!(t("08:05:09").to_string(), "08:05:09");
    }

    #[test]
    fn ordering_is_time_of_day() {
        assert!(t("00:10") < t("23:50"));
    }
}
