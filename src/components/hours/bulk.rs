use super::models::{DayWindow, Preset, WeeklySchedule, DAYS_PER_WEEK};
use super::time::TimeOfDay;
use crate::error::{Error, ScheduleResult};

/// Named weekday subsets for group edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayGroup {
    /// Monday to Friday
    Weekdays,
    /// Saturday and Sunday
    Weekends,
    All,
}

impl DayGroup {
    pub fn contains(self, weekday: u8) -> bool {
        match self {
            DayGroup::Weekdays => (1..=5).contains(&weekday),
            DayGroup::Weekends => weekday == 0 || weekday == 6,
            DayGroup::All => weekday < DAYS_PER_WEEK,
        }
    }
}

/// The canonical default week: weekends open from noon, weekdays from 16:00,
/// every day closing at 23:00.
pub fn default_week_window(weekday: u8) -> DayWindow {
    let open = if DayGroup::Weekends.contains(weekday) {
        TimeOfDay::hm(12, 0)
    } else {
        TimeOfDay::hm(16, 0)
    };
    DayWindow::open(weekday, open, TimeOfDay::hm(23, 0))
}

impl WeeklySchedule {
    /// Regenerate the canonical default schedule
    pub fn reset_to_defaults() -> WeeklySchedule {
        WeeklySchedule::from_fn(default_week_window)
    }

    /// Replace the whole schedule with a preset's hours
    pub fn apply_preset(preset: &Preset) -> WeeklySchedule {
        preset.hours.clone()
    }

    /// Copy the hours and closed flag of one weekday onto another
    pub fn copy_day(&self, from: u8, to: u8) -> ScheduleResult<WeeklySchedule> {
        let source = self.source(from)?;
        let mut next = self.clone();
        assign(next.day_mut(to)?, &source);
        Ok(next)
    }

    /// Broadcast one weekday's window to all seven days
    pub fn copy_to_all(&self, from: u8) -> ScheduleResult<WeeklySchedule> {
        let source = self.source(from)?;
        let mut next = self.clone();
        for day in next.days_mut() {
            assign(day, &source);
        }
        Ok(next)
    }

    /// Apply one window to every weekday matching `predicate`
    pub fn set_group(
        &self,
        predicate: impl Fn(u8) -> bool,
        open_time: Option<TimeOfDay>,
        close_time: Option<TimeOfDay>,
        is_closed: bool,
    ) -> ScheduleResult<WeeklySchedule> {
        if !self.is_loaded() {
            return Err(Error::NotLoaded);
        }

        let source = DayWindow {
            weekday: 0,
            open_time,
            close_time,
            is_closed,
        };
        let mut next = self.clone();
        for day in next.days_mut().iter_mut().filter(|day| predicate(day.weekday)) {
            assign(day, &source);
        }
        Ok(next)
    }

    /// Apply one window to a named group of days
    pub fn set_day_group(
        &self,
        group: DayGroup,
        open_time: Option<TimeOfDay>,
        close_time: Option<TimeOfDay>,
        is_closed: bool,
    ) -> ScheduleResult<WeeklySchedule> {
        self.set_group(|weekday| group.contains(weekday), open_time, close_time, is_closed)
    }

    /// Mark every day closed, keeping the configured times
    pub fn close_all(&self) -> ScheduleResult<WeeklySchedule> {
        if !self.is_loaded() {
            return Err(Error::NotLoaded);
        }

        let mut next = self.clone();
        for day in next.days_mut() {
            day.is_closed = true;
        }
        Ok(next)
    }

    fn source(&self, weekday: u8) -> ScheduleResult<DayWindow> {
        if weekday >= DAYS_PER_WEEK {
            return Err(Error::InvalidWeekday(weekday));
        }
        if !self.is_loaded() {
            return Err(Error::NotLoaded);
        }
        Ok(self.get(weekday))
    }
}

// Copies everything except the weekday itself
fn assign(target: &mut DayWindow, source: &DayWindow) {
    target.open_time = source.open_time;
    target.close_time = source.close_time;
    target.is_closed = source.is_closed;
}
