use crate::model::WeeklySchedule;
use crate::scheduler::{Generation, Rules, SchedError, Scheduler};
use crate::storage::{ScheduleRecord, Storage, SCHEDULE_KEY};
use std::sync::Mutex;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TimetableError {
    #[error(transparent)]
    Config(#[from] SchedError),
    #[error("persistence failure: {0:#}")]
    Persistence(anyhow::Error),
}

/// Point d'entrée : génère, persiste et relit le planning courant.
///
/// Les appels à [`Timetable::generate`] sont sérialisés dans le processus.
/// Entre processus partageant le même stockage, le dernier écrivain gagne.
pub struct Timetable<S: Storage> {
    storage: S,
    rules: Rules,
    gate: Mutex<()>,
}

impl<S: Storage> Timetable<S> {
    pub fn new(storage: S, rules: Rules) -> Self {
        Self {
            storage,
            rules,
            gate: Mutex::new(()),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn rules(&self) -> Rules {
        self.rules
    }

    /// Recalcule entièrement le planning et écrase celui stocké.
    /// Rien n'est écrit si la génération échoue.
    pub fn generate(&self) -> Result<Generation, TimetableError> {
        let _guard = self.gate.lock().unwrap_or_else(|poison| poison.into_inner());

        let roster = self
            .storage
            .fetch_roster()
            .map_err(TimetableError::Persistence)?;
        let generation = Scheduler::new(roster, self.rules).generate()?;

        let record = ScheduleRecord::new(SCHEDULE_KEY, generation.schedule.clone());
        self.storage
            .upsert_schedule(SCHEDULE_KEY, &record)
            .map_err(TimetableError::Persistence)?;

        tracing::info!(
            assignments = generation.schedule.len(),
            shortfalls = generation.shortfalls.len(),
            "weekly schedule generated and saved"
        );
        Ok(generation)
    }

    /// Planning stocké tel quel, `None` si jamais généré.
    pub fn current(&self) -> Result<Option<WeeklySchedule>, TimetableError> {
        let record = self
            .storage
            .fetch_schedule(SCHEDULE_KEY)
            .map_err(TimetableError::Persistence)?;
        Ok(record.map(|r| r.schedule))
    }
}
