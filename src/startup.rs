use crate::components::hours::persistence::SchedulePersistence;
use crate::components::hours::session::ScheduleSession;
use crate::components::redis_service::{RedisActor, RedisActorHandle, RoomSchedules};
use crate::config::Config;
use crate::error::{other_error, Error};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,redis=warn")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| other_error(&format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load the application config
pub fn load_config() -> miette::Result<Config> {
    match Config::load() {
        Ok(config) => Ok(config),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Spawn the Redis actor and return its handle
pub fn start_redis(config: &Config) -> Result<RedisActorHandle, Error> {
    let (mut redis_actor, redis_handle) = RedisActor::new(&config.redis_url)?;

    tokio::spawn(async move {
        redis_actor.run().await;
    });

    Ok(redis_handle)
}

/// Open an editing session for the configured room and load its baseline
pub async fn open_session(
    config: &Config,
    redis_handle: RedisActorHandle,
) -> Result<ScheduleSession<RoomSchedules>, Error> {
    info!("Opening hours for room {}", config.room_id);
    let session = ScheduleSession::new(RoomSchedules::new(redis_handle, config.room_id.clone()));
    session.load().await?;
    Ok(session)
}

/// Persist pending edits, logging the outcome
pub async fn commit<P: SchedulePersistence>(session: &ScheduleSession<P>) -> Result<(), Error> {
    let outcome = session.save().await?;
    info!("Save finished: {:?}", outcome);
    Ok(())
}
