//! Operating-hours engine: weekly windows, late-night wraparound, booking
//! containment and calendar slots.

pub mod bulk;
pub mod evaluator;
pub mod models;
pub mod persistence;
pub mod presets;
pub mod session;
pub mod slots;
mod store;
pub mod time;

pub use bulk::DayGroup;
pub use evaluator::{contains_interval, validate_range, RangeValidation};
pub use models::{DayField, DayWindow, Preset, TimeSlot, WeeklySchedule, DEFAULT_WINDOW};
pub use persistence::SchedulePersistence;
pub use presets::PresetCatalog;
pub use session::{SaveOutcome, ScheduleSession};
pub use slots::{generate_slots, Slots};
pub use store::is_dirty;
pub use time::TimeOfDay;
