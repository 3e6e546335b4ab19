// Export components
pub mod hours;
pub mod redis_service;

// Re-export the editing session and its Redis-backed persistence
pub use hours::ScheduleSession;
pub use redis_service::{RedisActorHandle, RoomSchedules};
