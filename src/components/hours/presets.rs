use super::bulk::{default_week_window, DayGroup};
use super::models::{DayWindow, Preset, WeeklySchedule};
use super::time::TimeOfDay;
use crate::error::{Error, ScheduleResult};
use lazy_static::lazy_static;

lazy_static! {
    /// Presets shipped with the engine
    pub static ref BUILTIN_PRESETS: Vec<Preset> = vec![
        Preset {
            name: "standard".to_string(),
            description: "Weekdays 16:00-23:00, weekends 12:00-23:00".to_string(),
            hours: WeeklySchedule::from_fn(default_week_window),
        },
        Preset {
            name: "late_night".to_string(),
            description: "Open from 18:00 past midnight, until 04:00 on Friday and Saturday"
                .to_string(),
            hours: WeeklySchedule::from_fn(|weekday| {
                let close = if weekday == 5 || weekday == 6 {
                    TimeOfDay::hm(4, 0)
                } else {
                    TimeOfDay::hm(2, 0)
                };
                DayWindow::open(weekday, TimeOfDay::hm(18, 0), close)
            }),
        },
        Preset {
            name: "all_day".to_string(),
            description: "Open 00:00-23:59 every day".to_string(),
            hours: WeeklySchedule::from_fn(|weekday| {
                DayWindow::open(weekday, TimeOfDay::MIDNIGHT, TimeOfDay::hm(23, 59))
            }),
        },
        Preset {
            name: "business".to_string(),
            description: "Weekdays 09:00-18:00, closed on weekends".to_string(),
            hours: WeeklySchedule::from_fn(|weekday| {
                if DayGroup::Weekends.contains(weekday) {
                    DayWindow::closed(weekday)
                } else {
                    DayWindow::open(weekday, TimeOfDay::hm(9, 0), TimeOfDay::hm(18, 0))
                }
            }),
        },
    ];
}

/// Built-in presets plus any site-specific ones from configuration
#[derive(Debug, Clone)]
pub struct PresetCatalog {
    presets: Vec<Preset>,
}

impl PresetCatalog {
    /// Merge custom presets over the built-in ones; a custom preset shadows
    /// a built-in preset with the same name.
    pub fn new(custom: Vec<Preset>) -> Self {
        let mut presets: Vec<Preset> = BUILTIN_PRESETS
            .iter()
            .filter(|builtin| !custom.iter().any(|c| c.name == builtin.name))
            .cloned()
            .collect();
        presets.extend(custom);
        Self { presets }
    }

    /// Find a preset by name
    pub fn find(&self, name: &str) -> ScheduleResult<&Preset> {
        self.presets
            .iter()
            .find(|preset| preset.name == name)
            .ok_or_else(|| Error::UnknownPreset(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.iter()
    }
}

impl Default for PresetCatalog {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
