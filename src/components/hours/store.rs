use super::evaluator::validate_range;
use super::models::{DayField, DayWindow, WeeklySchedule, DAYS_PER_WEEK};
use crate::error::{invalid_window, Error, ScheduleResult};

impl WeeklySchedule {
    /// Get the window for a weekday.
    ///
    /// Before the first load (or for a weekday outside 0-6) this returns the
    /// shared fallback window so readers never have to special-case it.
    pub fn get(&self, weekday: u8) -> DayWindow {
        self.days()
            .get(weekday as usize)
            .cloned()
            .unwrap_or_else(|| DayWindow::fallback(weekday))
    }

    /// Return a new schedule with one field of one weekday replaced
    pub fn set(&self, weekday: u8, field: DayField) -> ScheduleResult<WeeklySchedule> {
        let mut next = self.clone();
        let day = next.day_mut(weekday)?;
        match field {
            DayField::OpenTime(value) => day.open_time = value,
            DayField::CloseTime(value) => day.close_time = value,
            DayField::IsClosed(value) => day.is_closed = value,
        }
        Ok(next)
    }

    /// Per-day warnings for open days whose window is unusable
    pub fn warnings(&self) -> Vec<Error> {
        self.days()
            .iter()
            .filter(|day| !day.is_closed)
            .filter_map(|day| {
                let check = validate_range(day.open_time, day.close_time);
                if check.is_valid {
                    return None;
                }
                let reason = match (day.open_time, day.close_time) {
                    (Some(_), Some(_)) => "open and close times leave no open duration",
                    _ => "open and close times are both required",
                };
                Some(invalid_window(day.weekday, reason))
            })
            .collect()
    }

    pub(crate) fn day_mut(&mut self, weekday: u8) -> ScheduleResult<&mut DayWindow> {
        if weekday >= DAYS_PER_WEEK {
            return Err(Error::InvalidWeekday(weekday));
        }
        if !self.is_loaded() {
            return Err(Error::NotLoaded);
        }
        Ok(&mut self.days_mut()[weekday as usize])
    }
}

/// True when the working copy differs from the persisted baseline
pub fn is_dirty(working: &WeeklySchedule, baseline: &WeeklySchedule) -> bool {
    working != baseline
}
