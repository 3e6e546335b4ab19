use super::models::{DayField, DayWindow, Preset, WeeklySchedule};
use super::persistence::SchedulePersistence;
use super::store::is_dirty;
use crate::error::ScheduleResult;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{watch, RwLock};
use tracing::{debug, error, info, warn};

/// Result of a save request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The working copy was written and is now the baseline
    Saved,
    /// Nothing differs from the baseline
    NoChanges,
    /// Another save is still outstanding
    InFlight,
}

/// Clears the in-flight flag when the save finishes or its future is dropped
struct SavingGuard<'a>(&'a AtomicBool);

impl Drop for SavingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

#[derive(Default)]
struct SessionState {
    working: WeeklySchedule,
    baseline: WeeklySchedule,
}

/// Editing session for one room's weekly schedule.
///
/// Holds the working copy next to the persisted baseline. Clones share the
/// same session, so a handle can be passed to every reader and editor.
pub struct ScheduleSession<P> {
    persistence: Arc<P>,
    state: Arc<RwLock<SessionState>>,
    saving: Arc<AtomicBool>,
    updates: Arc<watch::Sender<WeeklySchedule>>,
}

impl<P> Clone for ScheduleSession<P> {
    fn clone(&self) -> Self {
        Self {
            persistence: Arc::clone(&self.persistence),
            state: Arc::clone(&self.state),
            saving: Arc::clone(&self.saving),
            updates: Arc::clone(&self.updates),
        }
    }
}

impl<P: SchedulePersistence> ScheduleSession<P> {
    /// Create an empty session; nothing is loaded until [`Self::load`]
    pub fn new(persistence: P) -> Self {
        let (updates, _) = watch::channel(WeeklySchedule::default());
        Self {
            persistence: Arc::new(persistence),
            state: Arc::new(RwLock::new(SessionState::default())),
            saving: Arc::new(AtomicBool::new(false)),
            updates: Arc::new(updates),
        }
    }

    /// Fetch the baseline and replace the working copy with it.
    ///
    /// On failure the current working copy is left as it was.
    pub async fn load(&self) -> ScheduleResult<()> {
        let schedule = match self.persistence.load_weekly_schedule().await {
            Ok(schedule) => schedule,
            Err(e) => {
                error!("Failed to load weekly schedule: {}", e);
                return Err(e);
            }
        };

        for warning in schedule.warnings() {
            warn!("Loaded schedule has an invalid day: {}", warning);
        }

        {
            let mut state = self.state.write().await;
            state.baseline = schedule.clone();
            state.working = schedule.clone();
        }
        self.updates.send_replace(schedule);

        info!("Weekly schedule loaded");
        Ok(())
    }

    /// Discard the working copy and fetch the baseline again
    pub async fn reload(&self) -> ScheduleResult<()> {
        debug!("Reloading weekly schedule, discarding local edits");
        self.load().await
    }

    /// Discard local edits without a round-trip
    pub async fn reset(&self) {
        let working = {
            let mut state = self.state.write().await;
            let baseline = state.baseline.clone();
            state.working = baseline.clone();
            baseline
        };
        self.updates.send_replace(working);
    }

    /// Snapshot of the working copy
    pub async fn working(&self) -> WeeklySchedule {
        self.state.read().await.working.clone()
    }

    /// Snapshot of the last persisted schedule
    pub async fn baseline(&self) -> WeeklySchedule {
        self.state.read().await.baseline.clone()
    }

    /// One day of the working copy, or the fallback window before loading
    pub async fn get(&self, weekday: u8) -> DayWindow {
        self.state.read().await.working.get(weekday)
    }

    /// Receive every new working copy
    pub fn subscribe(&self) -> watch::Receiver<WeeklySchedule> {
        self.updates.subscribe()
    }

    /// Replace the working copy with the result of `edit`.
    ///
    /// A failing edit leaves the working copy unchanged.
    pub async fn update<F>(&self, edit: F) -> ScheduleResult<()>
    where
        F: FnOnce(&WeeklySchedule) -> ScheduleResult<WeeklySchedule>,
    {
        let working = {
            let mut state = self.state.write().await;
            let next = edit(&state.working)?;
            state.working = next.clone();
            next
        };
        debug!("Working schedule updated");
        self.updates.send_replace(working);
        Ok(())
    }

    /// Change a single field of one weekday
    pub async fn set_field(&self, weekday: u8, field: DayField) -> ScheduleResult<()> {
        self.update(|schedule| schedule.set(weekday, field)).await
    }

    /// Replace the working copy with a preset
    pub async fn apply_preset(&self, preset: &Preset) -> ScheduleResult<()> {
        info!("Applying preset {}", preset.name);
        self.update(|_| Ok(WeeklySchedule::apply_preset(preset))).await
    }

    /// True when the working copy differs from the baseline
    pub async fn is_dirty(&self) -> bool {
        let state = self.state.read().await;
        is_dirty(&state.working, &state.baseline)
    }

    /// True while a save is outstanding
    pub fn is_saving(&self) -> bool {
        self.saving.load(Ordering::SeqCst)
    }

    /// Whether the save action should be offered
    pub async fn can_save(&self) -> bool {
        !self.is_saving() && self.is_dirty().await
    }

    /// Persist the working copy.
    ///
    /// Only one save runs at a time. A failed save keeps the working copy so
    /// no edits are lost.
    pub async fn save(&self) -> ScheduleResult<SaveOutcome> {
        if self.saving.swap(true, Ordering::SeqCst) {
            warn!("Save requested while another save is in flight");
            return Ok(SaveOutcome::InFlight);
        }
        let _guard = SavingGuard(&self.saving);

        let snapshot = {
            let state = self.state.read().await;
            if !is_dirty(&state.working, &state.baseline) {
                return Ok(SaveOutcome::NoChanges);
            }
            state.working.clone()
        };

        for warning in snapshot.warnings() {
            warn!("Saving schedule with an invalid day: {}", warning);
        }

        let result = self.persistence.save_weekly_schedule(&snapshot).await;
        if result.is_ok() {
            // Edits made while the save was running stay dirty
            self.state.write().await.baseline = snapshot;
        }

        match result {
            Ok(()) => {
                info!("Weekly schedule saved");
                Ok(SaveOutcome::Saved)
            }
            Err(e) => {
                error!("Failed to save weekly schedule: {}", e);
                Err(e)
            }
        }
    }
}
