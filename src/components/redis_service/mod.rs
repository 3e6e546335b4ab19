mod actor;

pub use actor::{keys, RedisActor, RedisActorHandle};

use crate::components::hours::models::WeeklySchedule;
use crate::components::hours::persistence::SchedulePersistence;
use crate::error::ScheduleResult;
use async_trait::async_trait;

/// Persistence for one room's hours through the Redis actor
#[derive(Clone)]
pub struct RoomSchedules {
    handle: RedisActorHandle,
    room_id: String,
}

impl RoomSchedules {
    pub fn new(handle: RedisActorHandle, room_id: impl Into<String>) -> Self {
        Self {
            handle,
            room_id: room_id.into(),
        }
    }

    pub fn room_id(&self) -> &str {
        &self.room_id
    }
}

#[async_trait]
impl SchedulePersistence for RoomSchedules {
    async fn load_weekly_schedule(&self) -> ScheduleResult<WeeklySchedule> {
        self.handle.load_schedule(self.room_id.clone()).await
    }

    async fn save_weekly_schedule(&self, schedule: &WeeklySchedule) -> ScheduleResult<()> {
        self.handle
            .save_schedule(self.room_id.clone(), schedule.clone())
            .await
    }
}
