use chrono::{Datelike, Utc};
use clap::{Parser, Subcommand};
use roomhours::components::hours::models::{weekday_name, weekday_number};
use roomhours::components::hours::{
    contains_interval, generate_slots, validate_range, ScheduleSession, TimeOfDay, WeeklySchedule,
};
use roomhours::components::redis_service::{RedisActorHandle, RoomSchedules};
use roomhours::config::Config;
use roomhours::error::ScheduleResult;
use roomhours::startup;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "roomhours")]
#[command(version = "0.1.0")]
#[command(
    about = "Inspect and edit the weekly operating hours of a bookable room",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show whether the room is open right now
    Status,
    /// Show the whole week with per-day warnings
    Week,
    /// Print the calendar slots for one day
    Slots {
        /// Weekday (0 = Sunday), defaults to today
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=6))]
        weekday: Option<u8>,
        /// Slot length in minutes, defaults to the configured interval
        #[arg(short, long)]
        interval: Option<u32>,
    },
    /// Check whether a booking fits inside a day's hours
    Check {
        #[arg(value_parser = clap::value_parser!(u8).range(0..=6))]
        weekday: u8,
        start: TimeOfDay,
        end: TimeOfDay,
    },
    /// List the available presets
    Presets,
    /// Replace the week with a preset and save it
    Preset { name: String },
    /// Copy one day's hours to every day and save
    CopyToAll {
        #[arg(value_parser = clap::value_parser!(u8).range(0..=6))]
        weekday: u8,
    },
    /// Close every day and save
    CloseAll,
    /// Restore the default week and save
    ResetDefaults,
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    startup::init_logging()?;

    info!("Starting roomhours");

    // Load configuration
    let config = startup::load_config()?;
    let redis_handle = startup::start_redis(&config)?;

    let command = cli.command.unwrap_or(Commands::Status);
    let result = run(command, &config, redis_handle.clone()).await;

    redis_handle.shutdown().await?;
    result.map_err(Into::into)
}

async fn run(
    command: Commands,
    config: &Config,
    redis_handle: RedisActorHandle,
) -> ScheduleResult<()> {
    if let Commands::Presets = command {
        for preset in config.preset_catalog().iter() {
            println!("{:<12} {}", preset.name, preset.description);
        }
        return Ok(());
    }

    let session = startup::open_session(config, redis_handle).await?;
    let tz = config.tz()?;
    let now = Utc::now().with_timezone(&tz);
    let today = weekday_number(now.weekday());

    match command {
        Commands::Status => {
            let schedule = session.working().await;
            let state = if schedule.is_open_at_datetime(&now) {
                "open"
            } else {
                "closed"
            };
            println!(
                "Room {} is {} ({} {})",
                config.room_id,
                state,
                weekday_name(today),
                now.format("%H:%M")
            );
            println!("Today: {}", schedule.get(today).format());
        }
        Commands::Week => print_week(&session.working().await),
        Commands::Slots { weekday, interval } => {
            let weekday = weekday.unwrap_or(today);
            let interval = interval.unwrap_or(config.slot_interval_minutes);
            let day = session.get(weekday).await;
            println!("{} ({})", weekday_name(weekday), day.format());
            for slot in generate_slots(&day, interval) {
                let marker = if slot.is_next_day { " (+1)" } else { "" };
                println!("  {}{}", slot.time, marker);
            }
        }
        Commands::Check { weekday, start, end } => {
            let day = session.get(weekday).await;
            let verdict = if contains_interval(&day, start, end) {
                "fits"
            } else {
                "does not fit"
            };
            println!(
                "{} - {} {} {} ({})",
                start,
                end,
                verdict,
                weekday_name(weekday),
                day.format()
            );
        }
        Commands::Preset { name } => {
            let catalog = config.preset_catalog();
            let preset = catalog.find(&name)?;
            session.apply_preset(preset).await?;
            save(&session).await?;
        }
        Commands::CopyToAll { weekday } => {
            session.update(|schedule| schedule.copy_to_all(weekday)).await?;
            save(&session).await?;
        }
        Commands::CloseAll => {
            session.update(WeeklySchedule::close_all).await?;
            save(&session).await?;
        }
        Commands::ResetDefaults => {
            session.update(|_| Ok(WeeklySchedule::reset_to_defaults())).await?;
            save(&session).await?;
        }
        Commands::Presets => {}
    }

    Ok(())
}

async fn save(session: &ScheduleSession<RoomSchedules>) -> ScheduleResult<()> {
    if !session.can_save().await {
        info!("No changes to save");
        return Ok(());
    }
    startup::commit(session).await?;
    print_week(&session.working().await);
    Ok(())
}

fn print_week(schedule: &WeeklySchedule) {
    for day in schedule.days() {
        let check = validate_range(day.open_time, day.close_time);
        let suffix = if !day.is_closed && check.is_late_night {
            " (late night)"
        } else {
            ""
        };
        println!("{:<10} {}{}", weekday_name(day.weekday), day.format(), suffix);
    }
    for warning in schedule.warnings() {
        warn!("{}", warning);
    }
}
