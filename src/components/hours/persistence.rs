use super::models::WeeklySchedule;
use crate::error::ScheduleResult;
use async_trait::async_trait;

/// Storage collaborator that owns the persisted baseline.
///
/// Both calls report transport or storage failures as [`crate::error::Error::Fetch`].
#[async_trait]
pub trait SchedulePersistence: Send + Sync {
    /// Load the persisted weekly schedule
    async fn load_weekly_schedule(&self) -> ScheduleResult<WeeklySchedule>;

    /// Replace the persisted weekly schedule
    async fn save_weekly_schedule(&self, schedule: &WeeklySchedule) -> ScheduleResult<()>;
}
