use crate::model::{Day, Shift, StaffId, WeeklySchedule, Workload};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const MIN_NURSES_PER_SHIFT: usize = 3;
pub const MAX_SHIFTS_PER_WEEK: u32 = 5;

/// Règles de génération
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    pub min_nurses_per_shift: usize,
    pub max_shifts_per_week: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            min_nurses_per_shift: MIN_NURSES_PER_SHIFT,
            max_shifts_per_week: MAX_SHIFTS_PER_WEEK,
        }
    }
}

impl Rules {
    pub fn validate(&self) -> Result<(), SchedError> {
        if self.min_nurses_per_shift == 0 {
            return Err(SchedError::InvalidRules("min_nurses_per_shift must be > 0"));
        }
        if self.max_shifts_per_week == 0 {
            return Err(SchedError::InvalidRules("max_shifts_per_week must be > 0"));
        }
        Ok(())
    }
}

/// Créneau laissé vacant faute de personnel éligible (non bloquant).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shortfall {
    pub day: Day,
    pub shift: Shift,
    pub nurses_available: usize,
    pub receptionists_available: usize,
}

impl fmt::Display for Shortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "not enough staff for {} {} shift (nurses available: {}, receptionists available: {})",
            self.day, self.shift, self.nurses_available, self.receptionists_available
        )
    }
}

/// Résultat d'une génération.
#[derive(Debug, Clone)]
pub struct Generation {
    pub schedule: WeeklySchedule,
    pub workload: Workload,
    pub shortfalls: Vec<Shortfall>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    DoubleAssignment,
    WeeklyCapExceeded,
    RestViolation,
    Understaffed,
    WrongRole,
    DayOff,
}

impl ViolationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationKind::DoubleAssignment => "double",
            ViolationKind::WeeklyCapExceeded => "cap",
            ViolationKind::RestViolation => "rest",
            ViolationKind::Understaffed => "understaffed",
            ViolationKind::WrongRole => "role",
            ViolationKind::DayOff => "day_off",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub staff: Option<StaffId>,
    pub day: Day,
    pub shift: Shift,
    pub kind: ViolationKind,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SchedError {
    #[error("not enough nurses available: found {found}, need at least {required}")]
    InsufficientNurses { found: usize, required: usize },
    #[error("not enough receptionists available: found {found}, need at least {required}")]
    InsufficientReceptionists { found: usize, required: usize },
    #[error("duplicate workid in roster: {0}")]
    DuplicateStaff(StaffId),
    #[error("invalid rules: {0}")]
    InvalidRules(&'static str),
}
