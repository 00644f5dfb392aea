mod assignment;
mod checks;
mod types;
mod util;

pub use checks::check_schedule;
pub use types::{
    Generation, Rules, SchedError, Shortfall, Violation, ViolationKind, MAX_SHIFTS_PER_WEEK,
    MIN_NURSES_PER_SHIFT,
};

use crate::model::{StaffId, StaffMember};
use std::collections::BTreeSet;

/// Scheduler : instantané figé du roster pour une génération.
#[derive(Debug, Clone)]
pub struct Scheduler {
    roster: Vec<StaffMember>,
    rules: Rules,
}

impl Scheduler {
    pub fn new(roster: Vec<StaffMember>, rules: Rules) -> Self {
        Self { roster, rules }
    }

    pub fn roster(&self) -> &[StaffMember] {
        &self.roster
    }

    pub fn rules(&self) -> Rules {
        self.rules
    }

    pub fn nurses(&self) -> impl Iterator<Item = &StaffMember> {
        self.roster.iter().filter(|m| m.is_nurse())
    }

    pub fn receptionists(&self) -> impl Iterator<Item = &StaffMember> {
        self.roster.iter().filter(|m| m.is_receptionist())
    }

    /// Génère le planning de la semaine (lundi → dimanche, matin → nuit).
    ///
    /// Échoue avant tout calcul si un `workid` est en double ou si l'effectif
    /// global est insuffisant. Les créneaux impossibles à pourvoir sont omis et
    /// listés dans [`Generation::shortfalls`].
    pub fn generate(&self) -> Result<Generation, SchedError> {
        self.rules.validate()?;

        let mut seen: BTreeSet<&StaffId> = BTreeSet::new();
        if let Some(dup) = self.roster.iter().find(|m| !seen.insert(&m.work_id)) {
            return Err(SchedError::DuplicateStaff(dup.work_id.clone()));
        }

        let nurses = self.nurses().count();
        if nurses < self.rules.min_nurses_per_shift {
            return Err(SchedError::InsufficientNurses {
                found: nurses,
                required: self.rules.min_nurses_per_shift,
            });
        }
        let receptionists = self.receptionists().count();
        if receptionists < 1 {
            return Err(SchedError::InsufficientReceptionists {
                found: receptionists,
                required: 1,
            });
        }

        Ok(assignment::plan_week(self))
    }
}
