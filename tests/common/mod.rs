#![allow(dead_code)]

use async_trait::async_trait;
use roomhours::components::hours::{SchedulePersistence, WeeklySchedule};
use roomhours::error::{fetch_error, ScheduleResult};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, Notify};

/// Lets a test hold a save open until it decides to release it
#[derive(Debug, Default)]
pub struct SaveGate {
    pub started: Notify,
    pub release: Notify,
}

/// In-memory stand-in for the persistence service
#[derive(Debug, Clone, Default)]
pub struct MockPersistence {
    stored: Arc<Mutex<Option<WeeklySchedule>>>,
    saves: Arc<AtomicUsize>,
    offline: Arc<AtomicBool>,
    gate: Option<Arc<SaveGate>>,
}

impl MockPersistence {
    /// Create an empty mock store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock store whose saves wait on the returned gate
    pub fn gated() -> (Self, Arc<SaveGate>) {
        let gate = Arc::new(SaveGate::default());
        let mock = Self {
            gate: Some(Arc::clone(&gate)),
            ..Self::default()
        };
        (mock, gate)
    }

    /// Seed the stored baseline
    pub async fn seed(&self, schedule: WeeklySchedule) {
        *self.stored.lock().await = Some(schedule);
    }

    /// Make every following call fail like a dropped connection
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Schedule currently held by the store
    pub async fn stored(&self) -> Option<WeeklySchedule> {
        self.stored.lock().await.clone()
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SchedulePersistence for MockPersistence {
    async fn load_weekly_schedule(&self) -> ScheduleResult<WeeklySchedule> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(fetch_error("mock store is offline"));
        }

        Ok(self
            .stored
            .lock()
            .await
            .clone()
            .unwrap_or_else(WeeklySchedule::reset_to_defaults))
    }

    async fn save_weekly_schedule(&self, schedule: &WeeklySchedule) -> ScheduleResult<()> {
        if let Some(gate) = &self.gate {
            gate.started.notify_one();
            gate.release.notified().await;
        }

        if self.offline.load(Ordering::SeqCst) {
            return Err(fetch_error("mock store is offline"));
        }

        *self.stored.lock().await = Some(schedule.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
