use super::{util, Generation, Scheduler, Shortfall};
use crate::model::{Day, Shift, ShiftAssignment, StaffId, StaffMember, WeeklySchedule, Workload};
use std::collections::BTreeSet;

/// Accumulateurs d'une génération, remis à neuf à chaque appel.
struct Week {
    schedule: WeeklySchedule,
    workload: Workload,
    shortfalls: Vec<Shortfall>,
}

pub(super) fn plan_week(scheduler: &Scheduler) -> Generation {
    let mut week = Week {
        schedule: WeeklySchedule::new(),
        workload: Workload::zeroed(scheduler.nurses().chain(scheduler.receptionists())),
        shortfalls: Vec::new(),
    };

    // Équipe de la nuit précédente ; vide le lundi ou si la nuit d'hier n'a pas été pourvue.
    let mut night_carryover: BTreeSet<StaffId> = BTreeSet::new();
    for day in Day::ALL {
        night_carryover = plan_day(scheduler, day, &night_carryover, &mut week);
    }

    Generation {
        schedule: week.schedule,
        workload: week.workload,
        shortfalls: week.shortfalls,
    }
}

/// Planifie une journée et renvoie l'équipe de nuit à reporter sur le lendemain.
fn plan_day(
    scheduler: &Scheduler,
    day: Day,
    night_carryover: &BTreeSet<StaffId>,
    week: &mut Week,
) -> BTreeSet<StaffId> {
    let rules = scheduler.rules();
    let nurses: Vec<&StaffMember> = scheduler.nurses().filter(|m| m.available_on(day)).collect();
    let receptionists: Vec<&StaffMember> = scheduler
        .receptionists()
        .filter(|m| m.available_on(day))
        .collect();

    let mut assigned_today: BTreeSet<StaffId> = BTreeSet::new();
    let mut night_crew: BTreeSet<StaffId> = BTreeSet::new();

    for shift in Shift::ALL {
        let shift_nurses: Vec<&StaffMember> = nurses
            .iter()
            .copied()
            .filter(|m| util::eligible(m, &assigned_today, &week.workload, rules))
            .filter(|m| !util::resting_after_night(m, shift, night_carryover))
            .collect();
        let shift_receptionists: Vec<&StaffMember> = receptionists
            .iter()
            .copied()
            .filter(|m| util::eligible(m, &assigned_today, &week.workload, rules))
            .collect();

        let nurses_available = shift_nurses.len();
        let receptionists_available = shift_receptionists.len();
        let receptionist = util::least_loaded(shift_receptionists, &week.workload, 1)
            .into_iter()
            .next();

        let receptionist = match receptionist {
            Some(r) if nurses_available >= rules.min_nurses_per_shift => r,
            _ => {
                let shortfall = Shortfall {
                    day,
                    shift,
                    nurses_available,
                    receptionists_available,
                };
                tracing::warn!(
                    day = %day,
                    shift = %shift,
                    nurses_available,
                    receptionists_available,
                    "not enough staff for shift, leaving it unassigned"
                );
                week.shortfalls.push(shortfall);
                continue;
            }
        };

        let picked = util::least_loaded(shift_nurses, &week.workload, rules.min_nurses_per_shift);
        let assignment = ShiftAssignment {
            nurses: picked.iter().map(|m| m.work_id.clone()).collect(),
            receptionist: receptionist.work_id.clone(),
        };

        for id in assignment.staff() {
            assigned_today.insert(id.clone());
            week.workload.increment(id);
        }
        if shift.is_night() {
            night_crew = assignment.nurses.iter().cloned().collect();
        }

        tracing::debug!(
            day = %day,
            shift = %shift,
            nurses = ?assignment.nurses,
            receptionist = %assignment.receptionist,
            "shift assigned"
        );
        week.schedule.insert(day, shift, assignment);
    }

    night_crew
}
