use super::models::{DayWindow, TimeSlot};
use super::time::{window_duration, MINUTES_PER_DAY};

/// Upper bound on the span any slot sequence may cover, in minutes.
///
/// Valid windows never exceed one day; this only caps malformed input.
pub const MAX_SLOT_SPAN_MINUTES: u32 = 50 * 60;

/// Lazy sequence of calendar slots for one day's window.
///
/// Cloning a sequence restarts it from the same position.
#[derive(Debug, Clone)]
pub struct Slots {
    open: u32,
    span: u32,
    interval: u32,
    elapsed: u32,
}

impl Slots {
    /// A sequence that yields nothing
    pub fn empty() -> Self {
        Self {
            open: 0,
            span: 0,
            interval: 1,
            elapsed: 0,
        }
    }

    fn remaining(&self) -> usize {
        if self.elapsed >= self.span {
            return 0;
        }
        ((self.span - self.elapsed).div_ceil(self.interval)) as usize
    }
}

impl Iterator for Slots {
    type Item = TimeSlot;

    fn next(&mut self) -> Option<TimeSlot> {
        if self.elapsed >= self.span {
            return None;
        }

        // Elapsed minutes are tracked apart from the wall clock so the
        // hour can wrap while the day boundary stays known.
        let absolute = self.open + self.elapsed;
        let hour = (absolute / 60) % 24;
        let minute = absolute % 60;
        self.elapsed = self.elapsed.saturating_add(self.interval);

        Some(TimeSlot {
            time: format!("{:02}:{:02}", hour, minute),
            hour: hour as u8,
            minute: minute as u8,
            is_next_day: absolute >= MINUTES_PER_DAY as u32,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Slots {}

/// Slots from the day's opening time up to, but not including, its closing time.
///
/// Closed days, days without both times, and a zero interval all yield an
/// empty sequence.
pub fn generate_slots(day: &DayWindow, interval_minutes: u32) -> Slots {
    let Some((open, close)) = day.times() else {
        return Slots::empty();
    };
    if interval_minutes == 0 {
        return Slots::empty();
    }

    let span = (window_duration(open, close) as u32).min(MAX_SLOT_SPAN_MINUTES);
    Slots {
        open: open.minutes() as u32,
        span,
        interval: interval_minutes,
        elapsed: 0,
    }
}

/// Most slots a single sequence can yield at the given interval
pub fn max_slots(interval_minutes: u32) -> usize {
    if interval_minutes == 0 {
        return 0;
    }
    MAX_SLOT_SPAN_MINUTES.div_ceil(interval_minutes) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::hours::time::TimeOfDay;

    fn window(open: &str, close: &str) -> DayWindow {
        DayWindow::open(1, open.parse().unwrap(), close.parse().unwrap())
    }

    #[test]
    fn test_late_night_slots() {
        let slots: Vec<TimeSlot> = generate_slots(&window("23:00", "01:00"), 15).collect();

        let labels: Vec<&str> = slots.iter().map(|s| s.time.as_str()).collect();
        assert_eq!(
            labels,
            vec!["23:00", "23:15", "23:30", "23:45", "00:00", "00:15", "00:30", "00:45"]
        );

        let next_day: Vec<bool> = slots.iter().map(|s| s.is_next_day).collect();
        assert_eq!(
            next_day,
            vec![false, false, false, false, true, true, true, true]
        );

        assert_eq!(slots[4].hour, 0);
        assert_eq!(slots[7].minute, 45);
    }

    #[test]
    fn test_same_day_slots_exclude_closing_instant() {
        let slots: Vec<TimeSlot> = generate_slots(&window("16:00", "23:00"), 30).collect();
        assert_eq!(slots.len(), 14);
        assert_eq!(slots.first().unwrap().time, "16:00");
        assert_eq!(slots.last().unwrap().time, "22:30");
        assert!(slots.iter().all(|s| !s.is_next_day));
    }

    #[test]
    fn test_uneven_interval_stops_before_close() {
        let slots: Vec<String> = generate_slots(&window("10:00", "11:00"), 25)
            .map(|s| s.time)
            .collect();
        assert_eq!(slots, vec!["10:00", "10:25", "10:50"]);
    }

    #[test]
    fn test_closed_and_zero_interval_are_empty() {
        let closed = DayWindow::closed(0);
        assert_eq!(generate_slots(&closed, 15).count(), 0);
        assert_eq!(generate_slots(&window("16:00", "23:00"), 0).count(), 0);

        let missing = DayWindow {
            open_time: None,
            ..window("16:00", "23:00")
        };
        assert_eq!(generate_slots(&missing, 15).count(), 0);
    }

    #[test]
    fn test_equal_open_and_close_stays_bounded() {
        let slots = generate_slots(&window("10:00", "10:00"), 1);
        assert!(slots.len() <= max_slots(1));
        assert_eq!(slots.count(), 0);

        // Longest valid window at one-minute granularity
        let widest = generate_slots(&window("00:00", "23:59"), 1);
        assert_eq!(widest.len(), 1439);
        assert!(widest.len() <= max_slots(1));
    }

    #[test]
    fn test_sequence_restarts_from_clone() {
        let day = DayWindow::open(2, TimeOfDay::hm(18, 0), TimeOfDay::hm(2, 0));
        let slots = generate_slots(&day, 60);
        let first: Vec<TimeSlot> = slots.clone().collect();
        let second: Vec<TimeSlot> = slots.collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 8);
        assert_eq!(first.last().unwrap().time, "01:00");
    }
}
