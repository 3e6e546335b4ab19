use super::time::TimeOfDay;
use crate::error::{Error, ScheduleResult};
use serde::{Deserialize, Serialize};

/// Number of entries in a weekly schedule
pub const DAYS_PER_WEEK: u8 = 7;

/// Fallback window handed out before the first load completes.
///
/// Every caller that needs "some day" before data arrives goes through
/// [`DayWindow::fallback`], which copies this value.
pub const DEFAULT_WINDOW: DayWindow = DayWindow {
    weekday: 0,
    open_time: Some(TimeOfDay::hm(16, 0)),
    close_time: Some(TimeOfDay::hm(23, 0)),
    is_closed: false,
};

/// One weekday's operating window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayWindow {
    /// 0 = Sunday ... 6 = Saturday
    pub weekday: u8,
    #[serde(default, with = "optional_time")]
    pub open_time: Option<TimeOfDay>,
    #[serde(default, with = "optional_time")]
    pub close_time: Option<TimeOfDay>,
    #[serde(default)]
    pub is_closed: bool,
}

impl DayWindow {
    /// Create an open window for a weekday
    pub fn open(weekday: u8, open_time: TimeOfDay, close_time: TimeOfDay) -> Self {
        Self {
            weekday,
            open_time: Some(open_time),
            close_time: Some(close_time),
            is_closed: false,
        }
    }

    /// Create a window that is closed all day
    pub fn closed(weekday: u8) -> Self {
        Self {
            weekday,
            is_closed: true,
            ..DEFAULT_WINDOW
        }
    }

    /// The shared default window, relabelled for `weekday`
    pub fn fallback(weekday: u8) -> Self {
        Self {
            weekday,
            ..DEFAULT_WINDOW
        }
    }

    /// Open and close times when the day is open and both are set
    pub fn times(&self) -> Option<(TimeOfDay, TimeOfDay)> {
        if self.is_closed {
            return None;
        }
        Some((self.open_time?, self.close_time?))
    }

    /// Format the window as a human-readable string
    pub fn format(&self) -> String {
        if self.is_closed {
            return "Closed".to_string();
        }

        match (self.open_time, self.close_time) {
            (Some(open), Some(close)) => format!("{} - {}", open, close),
            (Some(open), None) => format!("Opens at {}", open),
            (None, Some(close)) => format!("Closes at {}", close),
            (None, None) => "No hours set".to_string(),
        }
    }
}

/// A single field of a [`DayWindow`] together with its new value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayField {
    OpenTime(Option<TimeOfDay>),
    CloseTime(Option<TimeOfDay>),
    IsClosed(bool),
}

/// Exactly seven day windows ordered by weekday.
///
/// The empty value stands for "not loaded yet"; anything else has passed
/// [`WeeklySchedule::from_days`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<DayWindow>", into = "Vec<DayWindow>")]
pub struct WeeklySchedule {
    days: Vec<DayWindow>,
}

impl WeeklySchedule {
    /// Validate and order a persisted snapshot
    pub fn from_days(mut days: Vec<DayWindow>) -> ScheduleResult<Self> {
        if days.len() != DAYS_PER_WEEK as usize {
            return Err(Error::InvalidSchedule(format!(
                "expected {} days, got {}",
                DAYS_PER_WEEK,
                days.len()
            )));
        }

        days.sort_by_key(|day| day.weekday);
        for (index, day) in days.iter().enumerate() {
            if day.weekday as usize != index {
                return Err(Error::InvalidSchedule(format!(
                    "weekday {} is missing or duplicated",
                    index
                )));
            }
        }

        Ok(Self { days })
    }

    /// Build a schedule from a function of the weekday
    pub fn from_fn(f: impl Fn(u8) -> DayWindow) -> Self {
        let days = (0..DAYS_PER_WEEK)
            .map(|weekday| DayWindow { weekday, ..f(weekday) })
            .collect();
        Self { days }
    }

    /// False until a snapshot has been loaded
    pub fn is_loaded(&self) -> bool {
        !self.days.is_empty()
    }

    pub fn days(&self) -> &[DayWindow] {
        &self.days
    }

    pub(crate) fn days_mut(&mut self) -> &mut [DayWindow] {
        &mut self.days
    }

    pub fn into_days(self) -> Vec<DayWindow> {
        self.days
    }
}

impl TryFrom<Vec<DayWindow>> for WeeklySchedule {
    type Error = Error;

    fn try_from(days: Vec<DayWindow>) -> Result<Self, Self::Error> {
        Self::from_days(days)
    }
}

impl From<WeeklySchedule> for Vec<DayWindow> {
    fn from(schedule: WeeklySchedule) -> Self {
        schedule.days
    }
}

/// One labelled instant in a generated slot sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub time: String,
    pub hour: u8,
    pub minute: u8,
    pub is_next_day: bool,
}

/// A canned weekly schedule that replaces the working copy as a unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub description: String,
    pub hours: WeeklySchedule,
}

/// Weekday number (Sunday = 0) for a chrono weekday
pub fn weekday_number(weekday: chrono::Weekday) -> u8 {
    weekday.num_days_from_sunday() as u8
}

/// English name of a weekday number
pub fn weekday_name(weekday: u8) -> &'static str {
    match weekday {
        0 => "Sunday",
        1 => "Monday",
        2 => "Tuesday",
        3 => "Wednesday",
        4 => "Thursday",
        5 => "Friday",
        6 => "Saturday",
        _ => "Unknown",
    }
}

/// Serde adapter for optional "HH:MM" fields; an empty string means unset
mod optional_time {
    use super::TimeOfDay;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<TimeOfDay>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(time) => s.serialize_str(&time.to_string()),
            None => s.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<TimeOfDay>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
        }
    }
}
