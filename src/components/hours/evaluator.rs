use super::models::{weekday_number, DayWindow, WeeklySchedule, DAYS_PER_WEEK};
use super::time::{classify, window_duration, TimeOfDay, WindowKind, MINUTES_PER_DAY};
use chrono::{DateTime, Datelike, TimeZone};
use serde::Serialize;

/// Outcome of checking an open/close pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeValidation {
    pub is_valid: bool,
    pub is_late_night: bool,
    /// Open duration in minutes after late-night adjustment
    pub duration: u16,
}

/// Check an open/close pair. This is the single source for "invalid day" warnings.
pub fn validate_range(open: Option<TimeOfDay>, close: Option<TimeOfDay>) -> RangeValidation {
    let (Some(open), Some(close)) = (open, close) else {
        return RangeValidation {
            is_valid: false,
            is_late_night: false,
            duration: 0,
        };
    };

    let duration = window_duration(open, close);
    RangeValidation {
        is_valid: duration > 0,
        is_late_night: classify(open, close) == WindowKind::LateNight,
        duration,
    }
}

/// Decide whether a booking from `start` to `end` fits entirely inside the day's window.
///
/// For late-night windows the close boundary is projected past midnight:
/// the start is placed on the window's own timeline and the end is taken as
/// the first matching instant at or after the start, so a booking from 23:30
/// to 01:00 fits 18:00-02:00 while one ending at 03:00 does not. A same-day
/// window never wraps, so an end before the start is rejected there.
pub fn contains_interval(day: &DayWindow, start: TimeOfDay, end: TimeOfDay) -> bool {
    let Some((open_time, close_time)) = day.times() else {
        return false;
    };

    let (open, close) = (open_time.minutes(), close_time.minutes());
    let (start, end) = (start.minutes(), end.minutes());

    match classify(open_time, close_time) {
        WindowKind::SameDay => start >= open && end >= start && end <= close,
        WindowKind::ZeroLength => false,
        WindowKind::LateNight => {
            let virtual_close = close + MINUTES_PER_DAY;
            let start = if start >= open {
                start
            } else if start < close {
                start + MINUTES_PER_DAY
            } else {
                return false;
            };
            let end = if end >= start { end } else { end + MINUTES_PER_DAY };
            end <= virtual_close
        }
    }
}

impl WeeklySchedule {
    /// Whether the room is open at a weekday and time.
    ///
    /// Early-morning times also count against the previous weekday's
    /// late-night window.
    pub fn is_open_at(&self, weekday: u8, time: TimeOfDay) -> bool {
        if weekday >= DAYS_PER_WEEK {
            return false;
        }

        if let Some((open, close)) = self.get(weekday).times() {
            let open_today = match classify(open, close) {
                WindowKind::SameDay => time >= open && time < close,
                WindowKind::LateNight => time >= open,
                WindowKind::ZeroLength => false,
            };
            if open_today {
                return true;
            }
        }

        let previous = (weekday + DAYS_PER_WEEK - 1) % DAYS_PER_WEEK;
        match self.get(previous).times() {
            Some((open, close)) => classify(open, close) == WindowKind::LateNight && time < close,
            None => false,
        }
    }

    /// Whether the room is open at a zoned instant
    pub fn is_open_at_datetime<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> bool {
        let local = instant.naive_local();
        self.is_open_at(
            weekday_number(local.weekday()),
            TimeOfDay::from_naive(&local.time()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::hours::models::DayField;
    use chrono_tz::Europe::Helsinki;

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    fn window(open: &str, close: &str) -> DayWindow {
        DayWindow::open(5, t(open), t(close))
    }

    #[test]
    fn test_validate_range() {
        assert_eq!(
            validate_range(Some(t("16:00")), Some(t("23:00"))),
            RangeValidation {
                is_valid: true,
                is_late_night: false,
                duration: 420
            }
        );
        assert_eq!(
            validate_range(Some(t("18:00")), Some(t("02:00"))),
            RangeValidation {
                is_valid: true,
                is_late_night: true,
                duration: 480
            }
        );
        assert!(!validate_range(Some(t("10:00")), Some(t("10:00"))).is_valid);
        assert!(!validate_range(None, Some(t("10:00"))).is_valid);
        assert!(!validate_range(Some(t("10:00")), None).is_valid);
    }

    #[test]
    fn test_contains_interval_same_day() {
        let day = window("16:00", "23:00");
        assert!(contains_interval(&day, t("16:00"), t("23:00")));
        assert!(contains_interval(&day, t("18:00"), t("20:00")));
        assert!(!contains_interval(&day, t("15:45"), t("17:00")));
        assert!(!contains_interval(&day, t("22:00"), t("23:15")));

        // Reversed bookings do not wrap inside a same-day window
        assert!(!contains_interval(&day, t("20:00"), t("17:00")));
        assert!(contains_interval(&day, t("20:00"), t("20:00")));
    }

    #[test]
    fn test_contains_interval_across_midnight() {
        let day = window("18:00", "02:00");

        // Starts before midnight, ends after
        assert!(contains_interval(&day, t("23:30"), t("01:00")));
        assert!(contains_interval(&day, t("23:30"), t("02:00")));
        assert!(!contains_interval(&day, t("23:30"), t("03:00")));

        // Entirely before or after midnight
        assert!(contains_interval(&day, t("19:00"), t("21:00")));
        assert!(contains_interval(&day, t("00:30"), t("01:30")));

        // Outside the window
        assert!(!contains_interval(&day, t("17:00"), t("19:00")));
        assert!(!contains_interval(&day, t("02:00"), t("03:00")));
        assert!(!contains_interval(&day, t("12:00"), t("13:00")));
    }

    #[test]
    fn test_contains_interval_closed_or_degenerate() {
        let mut day = window("18:00", "02:00");
        day.is_closed = true;
        assert!(!contains_interval(&day, t("19:00"), t("20:00")));

        let zero = window("10:00", "10:00");
        assert!(!contains_interval(&zero, t("10:00"), t("10:00")));

        let missing = DayWindow {
            close_time: None,
            ..window("10:00", "12:00")
        };
        assert!(!contains_interval(&missing, t("10:00"), t("11:00")));
    }

    #[test]
    fn test_is_open_at_with_previous_day_spill() {
        let schedule = WeeklySchedule::from_fn(DayWindow::fallback)
            .set(5, DayField::CloseTime(Some(t("02:00"))))
            .unwrap()
            .set(6, DayField::IsClosed(true))
            .unwrap();

        // Friday evening
        assert!(schedule.is_open_at(5, t("22:00")));
        assert!(!schedule.is_open_at(5, t("15:00")));
        // Saturday is closed, but Friday's window runs until 02:00
        assert!(schedule.is_open_at(6, t("01:59")));
        assert!(!schedule.is_open_at(6, t("02:00")));
        assert!(!schedule.is_open_at(6, t("20:00")));
        // Thursday closes at 23:00 sharp
        assert!(!schedule.is_open_at(4, t("23:00")));
        assert!(!schedule.is_open_at(9, t("20:00")));
    }

    #[test]
    fn test_is_open_at_datetime() {
        let schedule = WeeklySchedule::from_fn(DayWindow::fallback)
            .set(5, DayField::CloseTime(Some(t("02:00"))))
            .unwrap();

        // Saturday 2023-01-07 01:30 local time
        let instant = Helsinki.with_ymd_and_hms(2023, 1, 7, 1, 30, 0).unwrap();
        assert!(schedule.is_open_at_datetime(&instant));

        // Saturday 2023-01-07 03:00 local time
        let instant = Helsinki.with_ymd_and_hms(2023, 1, 7, 3, 0, 0).unwrap();
        assert!(!schedule.is_open_at_datetime(&instant));
    }
}
