use crate::error::{parse_error, Error, ScheduleResult};
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Minutes in one calendar day
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// A wall-clock time with minute resolution, stored as minutes since midnight.
///
/// Serialized as an `"HH:MM"` string so the persisted shape stays readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// 00:00
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);

    /// Compile-time constructor for fixed catalog times
    pub const fn hm(hour: u16, minute: u16) -> Self {
        assert!(hour < 24 && minute < 60);
        Self(hour * 60 + minute)
    }

    /// Build a time from hour and minute, `None` if either is out of range
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self((hour * 60 + minute) as u16))
    }

    /// Build a time from minutes since midnight, `None` past 23:59
    pub fn from_minutes(minutes: u16) -> Option<Self> {
        (minutes < MINUTES_PER_DAY).then_some(Self(minutes))
    }

    /// Truncate a chrono time to minute resolution
    pub fn from_naive(time: &NaiveTime) -> Self {
        Self((time.hour() * 60 + time.minute()) as u16)
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u8 {
        (self.0 / 60) as u8
    }

    pub fn minute(self) -> u8 {
        (self.0 % 60) as u8
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        to_minutes(s).map(Self)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(time: TimeOfDay) -> Self {
        time.to_string()
    }
}

/// Parse time string in HH:MM format into minutes since midnight
pub fn to_minutes(hhmm: &str) -> ScheduleResult<u16> {
    let parts: Vec<&str> = hhmm.split(':').collect();
    if parts.len() != 2 {
        return Err(parse_error(hhmm));
    }

    let (hour_part, minute_part) = (parts[0], parts[1]);
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !digits(hour_part) || hour_part.len() > 2 || !digits(minute_part) || minute_part.len() != 2
    {
        return Err(parse_error(hhmm));
    }

    let hour = hour_part.parse::<u32>().map_err(|_| parse_error(hhmm))?;
    let minute = minute_part.parse::<u32>().map_err(|_| parse_error(hhmm))?;

    TimeOfDay::new(hour, minute)
        .map(TimeOfDay::minutes)
        .ok_or_else(|| parse_error(hhmm))
}

/// Format any minute count as a wall-clock label, wrapping past midnight
pub fn format_minutes(minutes: u32) -> String {
    let minutes = minutes % MINUTES_PER_DAY as u32;
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Shape of an open/close pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowKind {
    /// Closes later on the same calendar day
    SameDay,
    /// Closes on the following calendar day
    LateNight,
    /// Open and close are the same instant; treated as zero duration
    ZeroLength,
}

/// Classify an open/close pair
pub fn classify(open: TimeOfDay, close: TimeOfDay) -> WindowKind {
    match close.cmp(&open) {
        std::cmp::Ordering::Greater => WindowKind::SameDay,
        std::cmp::Ordering::Less => WindowKind::LateNight,
        std::cmp::Ordering::Equal => WindowKind::ZeroLength,
    }
}

/// True when the window rolls past midnight
pub fn is_late_night(open: TimeOfDay, close: TimeOfDay) -> bool {
    classify(open, close) == WindowKind::LateNight
}

/// Length of the window in minutes; zero for equal open and close
pub fn window_duration(open: TimeOfDay, close: TimeOfDay) -> u16 {
    match classify(open, close) {
        WindowKind::SameDay => close.minutes() - open.minutes(),
        WindowKind::LateNight => close.minutes() + MINUTES_PER_DAY - open.minutes(),
        WindowKind::ZeroLength => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    #[test]
    fn test_to_minutes() {
        // Valid cases
        assert_eq!(to_minutes("00:00").unwrap(), 0);
        assert_eq!(to_minutes("12:30").unwrap(), 750);
        assert_eq!(to_minutes("23:59").unwrap(), 1439);
        assert_eq!(to_minutes("9:05").unwrap(), 545);

        // Invalid cases
        assert!(matches!(to_minutes("24:00"), Err(Error::Parse(_))));
        assert!(to_minutes("12:60").is_err());
        assert!(to_minutes("12:30:45").is_err());
        assert!(to_minutes("12").is_err());
        assert!(to_minutes("12:ab").is_err());
        assert!(to_minutes("ab:30").is_err());
        assert!(to_minutes("+1:30").is_err());
        assert!(to_minutes("12:5").is_err());
        assert!(to_minutes("").is_err());
    }

    #[test]
    fn test_display_and_serde() {
        assert_eq!(t("7:05").to_string(), "07:05");
        assert_eq!(format_minutes(1500), "01:00");

        let json = serde_json::to_string(&t("18:30")).unwrap();
        assert_eq!(json, "\"18:30\"");
        assert_eq!(serde_json::from_str::<TimeOfDay>(&json).unwrap(), t("18:30"));
        assert!(serde_json::from_str::<TimeOfDay>("\"25:00\"").is_err());
    }

    #[test]
    fn test_late_night_detection() {
        assert!(!is_late_night(t("16:00"), t("23:00")));
        assert!(is_late_night(t("18:00"), t("02:00")));
        assert!(!is_late_night(t("10:00"), t("10:00")));
        assert_eq!(classify(t("10:00"), t("10:00")), WindowKind::ZeroLength);
    }

    #[test]
    fn test_window_duration() {
        assert_eq!(window_duration(t("16:00"), t("23:00")), 420);
        assert_eq!(window_duration(t("18:00"), t("02:00")), 480);
        assert_eq!(window_duration(t("00:00"), t("23:59")), 1439);
        assert_eq!(window_duration(t("10:00"), t("10:00")), 0);
    }
}
