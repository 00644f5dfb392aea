use super::{Rules, Violation, ViolationKind};
use crate::model::{Day, Role, Shift, StaffId, StaffMember, WeeklySchedule};
use std::collections::{BTreeMap, BTreeSet};

/// Audite un planning (généré ou retouché à la main) contre le roster et les règles.
pub fn check_schedule(
    schedule: &WeeklySchedule,
    roster: &[StaffMember],
    rules: Rules,
) -> Vec<Violation> {
    let mut out = Vec::new();
    let by_id: BTreeMap<&StaffId, &StaffMember> = roster.iter().map(|m| (&m.work_id, m)).collect();
    let mut weekly: BTreeMap<&StaffId, u32> = BTreeMap::new();

    for day in Day::ALL {
        let Some(shifts) = schedule.day(day) else {
            continue;
        };
        let mut seen_today: BTreeSet<&StaffId> = BTreeSet::new();

        for (&shift, assignment) in shifts {
            let distinct: BTreeSet<&StaffId> = assignment.nurses.iter().collect();
            if assignment.nurses.len() != rules.min_nurses_per_shift
                || distinct.len() != assignment.nurses.len()
            {
                out.push(violation(None, day, shift, ViolationKind::Understaffed));
            }

            let slots = assignment
                .nurses
                .iter()
                .map(|id| (id, Role::Nurse))
                .chain(std::iter::once((&assignment.receptionist, Role::Receptionist)));
            for (id, expected) in slots {
                if !seen_today.insert(id) {
                    out.push(violation(Some(id), day, shift, ViolationKind::DoubleAssignment));
                }
                let count = weekly.entry(id).or_insert(0);
                *count += 1;
                if *count == rules.max_shifts_per_week + 1 {
                    out.push(violation(Some(id), day, shift, ViolationKind::WeeklyCapExceeded));
                }
                match by_id.get(id) {
                    Some(member) if member.role == expected => {
                        if !member.available_on(day) {
                            out.push(violation(Some(id), day, shift, ViolationKind::DayOff));
                        }
                    }
                    _ => out.push(violation(Some(id), day, shift, ViolationKind::WrongRole)),
                }
            }
        }

        if let (Some(night), Some(next)) = (shifts.get(&Shift::Night), day.next()) {
            for shift in [Shift::Morning, Shift::Afternoon] {
                let Some(following) = schedule.get(next, shift) else {
                    continue;
                };
                for id in following.nurses.iter().filter(|id| night.nurses.contains(*id)) {
                    out.push(violation(Some(id), next, shift, ViolationKind::RestViolation));
                }
            }
        }
    }

    out
}

fn violation(staff: Option<&StaffId>, day: Day, shift: Shift, kind: ViolationKind) -> Violation {
    Violation {
        staff: staff.cloned(),
        day,
        shift,
        kind,
    }
}
