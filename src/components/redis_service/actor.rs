use crate::components::hours::models::WeeklySchedule;
use crate::error::{config_error, fetch_error, Error, ScheduleResult};
use redis::{aio::MultiplexedConnection, AsyncCommands, Client as RedisClient};
use tokio::sync::mpsc;
use tracing::{debug, info};

// Redis key constants
pub mod keys {
    pub const ROOM_HOURS_ROOMS: &str = "room_hours:rooms";
    pub const ROOM_HOURS_SCHEDULE_PREFIX: &str = "room_hours:schedule:";
}

/// The Redis actor that processes messages
pub struct RedisActor {
    client: RedisClient,
    command_rx: mpsc::Receiver<RedisCommand>,
}

/// Commands that can be sent to the Redis actor
pub enum RedisCommand {
    LoadSchedule(String, mpsc::Sender<ScheduleResult<WeeklySchedule>>),
    SaveSchedule(String, WeeklySchedule, mpsc::Sender<ScheduleResult<()>>),
    ListRooms(mpsc::Sender<ScheduleResult<Vec<String>>>),
    Shutdown,
}

/// Handle for communicating with the Redis actor
#[derive(Clone)]
pub struct RedisActorHandle {
    command_tx: mpsc::Sender<RedisCommand>,
}

impl RedisActorHandle {
    /// Create a handle that is not connected to any actor
    pub fn empty() -> Self {
        let (command_tx, _) = mpsc::channel(32);
        Self { command_tx }
    }

    /// Load a room's weekly schedule
    pub async fn load_schedule(
        &self,
        room_id: impl Into<String>,
    ) -> ScheduleResult<WeeklySchedule> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(RedisCommand::LoadSchedule(room_id.into(), response_tx))
            .await
            .map_err(|e| fetch_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| fetch_error("Response channel closed"))?
    }

    /// Save a room's weekly schedule
    pub async fn save_schedule(
        &self,
        room_id: impl Into<String>,
        schedule: WeeklySchedule,
    ) -> ScheduleResult<()> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(RedisCommand::SaveSchedule(room_id.into(), schedule, response_tx))
            .await
            .map_err(|e| fetch_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| fetch_error("Response channel closed"))?
    }

    /// List rooms that have a saved schedule
    pub async fn list_rooms(&self) -> ScheduleResult<Vec<String>> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(RedisCommand::ListRooms(response_tx))
            .await
            .map_err(|e| fetch_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| fetch_error("Response channel closed"))?
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> ScheduleResult<()> {
        let _ = self.command_tx.send(RedisCommand::Shutdown).await;
        Ok(())
    }
}

impl RedisActor {
    /// Create a new actor and return its handle
    pub fn new(redis_url: &str) -> ScheduleResult<(Self, RedisActorHandle)> {
        let client = RedisClient::open(redis_url)
            .map_err(|e| config_error(&format!("Invalid Redis URL {}: {}", redis_url, e)))?;
        let (command_tx, command_rx) = mpsc::channel(32);

        let actor = Self { client, command_rx };
        let handle = RedisActorHandle { command_tx };

        Ok((actor, handle))
    }

    /// Start the actor's processing loop
    pub async fn run(&mut self) {
        info!("Redis actor started");

        // Process commands one at a time
        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                RedisCommand::LoadSchedule(room_id, response_tx) => {
                    let result = self.load_schedule_from_redis(&room_id).await;
                    let _ = response_tx.send(result).await;
                }
                RedisCommand::SaveSchedule(room_id, schedule, response_tx) => {
                    let result = self.save_schedule_to_redis(&room_id, &schedule).await;
                    let _ = response_tx.send(result).await;
                }
                RedisCommand::ListRooms(response_tx) => {
                    let result = self.list_rooms_from_redis().await;
                    let _ = response_tx.send(result).await;
                }
                RedisCommand::Shutdown => {
                    info!("Redis actor shutting down");
                    break;
                }
            }
        }

        info!("Redis actor shut down");
    }

    /// Get a redis connection
    async fn get_redis_connection(&self) -> ScheduleResult<MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| fetch_error(&format!("Failed to connect to Redis: {}", e)))
    }

    /// Load a schedule, falling back to the default week when none is stored
    async fn load_schedule_from_redis(&self, room_id: &str) -> ScheduleResult<WeeklySchedule> {
        let mut conn = self.get_redis_connection().await?;
        let key = schedule_key(room_id);

        let stored: Option<String> = conn
            .get(&key)
            .await
            .map_err(|e| fetch_error(&format!("Failed to read hours for {}: {}", room_id, e)))?;

        stored_or_default(room_id, stored.as_deref())
    }

    /// Save a schedule and register the room
    async fn save_schedule_to_redis(
        &self,
        room_id: &str,
        schedule: &WeeklySchedule,
    ) -> ScheduleResult<()> {
        let mut conn = self.get_redis_connection().await?;
        let json = serde_json::to_string(schedule)?;

        conn.set::<_, _, ()>(schedule_key(room_id), &json)
            .await
            .map_err(|e| fetch_error(&format!("Failed to save hours for {}: {}", room_id, e)))?;

        conn.sadd::<_, _, ()>(keys::ROOM_HOURS_ROOMS, room_id)
            .await
            .map_err(|e| fetch_error(&format!("Redis SADD error: {}", e)))?;

        debug!("Stored hours for room {}", room_id);
        Ok(())
    }

    /// Get all rooms with stored hours
    async fn list_rooms_from_redis(&self) -> ScheduleResult<Vec<String>> {
        let mut conn = self.get_redis_connection().await?;

        let mut rooms: Vec<String> = conn
            .smembers(keys::ROOM_HOURS_ROOMS)
            .await
            .map_err(|e| fetch_error(&format!("Redis SMEMBERS error: {}", e)))?;
        rooms.sort();

        Ok(rooms)
    }
}

fn schedule_key(room_id: &str) -> String {
    format!("{}{}", keys::ROOM_HOURS_SCHEDULE_PREFIX, room_id)
}

/// A room without a stored record starts from the default week
fn stored_or_default(room_id: &str, stored: Option<&str>) -> ScheduleResult<WeeklySchedule> {
    match stored {
        Some(json) => decode_schedule(json),
        None => {
            info!("No stored hours for room {}, using defaults", room_id);
            Ok(WeeklySchedule::reset_to_defaults())
        }
    }
}

/// Decode a stored snapshot; a corrupt record is a fetch failure
fn decode_schedule(json: &str) -> ScheduleResult<WeeklySchedule> {
    serde_json::from_str(json).map_err(|e| -> Error {
        fetch_error(&format!("Stored hours are not a valid weekly schedule: {}", e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_key() {
        assert_eq!(schedule_key("studio-a"), "room_hours:schedule:studio-a");
    }

    #[test]
    fn test_decode_schedule() {
        let stored = serde_json::to_string(&WeeklySchedule::reset_to_defaults()).unwrap();
        assert_eq!(
            decode_schedule(&stored).unwrap(),
            WeeklySchedule::reset_to_defaults()
        );

        // Six days only
        let truncated = serde_json::to_string(
            &WeeklySchedule::reset_to_defaults().into_days()[..6].to_vec(),
        )
        .unwrap();
        assert!(matches!(decode_schedule(&truncated), Err(Error::Fetch(_))));
    }

    #[test]
    fn test_missing_record_uses_defaults() {
        assert_eq!(
            stored_or_default("studio-a", None).unwrap(),
            WeeklySchedule::reset_to_defaults()
        );

        let closed = WeeklySchedule::reset_to_defaults().close_all().unwrap();
        let stored = serde_json::to_string(&closed).unwrap();
        assert_eq!(stored_or_default("studio-a", Some(&stored)).unwrap(), closed);
        assert!(matches!(
            stored_or_default("studio-a", Some("{}")),
            Err(Error::Fetch(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_handle_reports_fetch_error() {
        let handle = RedisActorHandle::empty();
        assert!(matches!(
            handle.load_schedule("studio-a").await,
            Err(Error::Fetch(_))
        ));
        assert!(handle.shutdown().await.is_ok());
    }
}
