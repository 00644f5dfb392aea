#![forbid(unsafe_code)]
//! Roulement — génération du planning hebdomadaire infirmiers/accueil (sans BD).
//!
//! - 7 jours × 3 créneaux (matin, après-midi, nuit).
//! - Affectation gloutonne : les moins chargés d'abord.
//! - Plafond hebdomadaire, un seul créneau par jour, repos après la nuit.
//! - Stockage fichiers (JSON/CSV), un seul planning courant.

pub mod io;
pub mod model;
pub mod scheduler;
pub mod service;
pub mod storage;

pub use model::{Day, Role, Shift, ShiftAssignment, StaffId, StaffMember, WeeklySchedule, Workload};
pub use scheduler::{
    check_schedule, Generation, Rules, SchedError, Scheduler, Shortfall, Violation, ViolationKind,
};
pub use service::{Timetable, TimetableError};
pub use storage::{JsonStorage, MemoryStorage, ScheduleRecord, Storage, SCHEDULE_KEY};
