use super::Rules;
use crate::model::{Shift, StaffId, StaffMember, Workload};
use std::collections::BTreeSet;

/// Vrai si `member` peut encore prendre un créneau aujourd'hui.
pub(super) fn eligible(
    member: &StaffMember,
    assigned_today: &BTreeSet<StaffId>,
    workload: &Workload,
    rules: Rules,
) -> bool {
    !assigned_today.contains(&member.work_id)
        && workload.count(&member.work_id) < rules.max_shifts_per_week
}

/// Vrai si l'infirmier sort de la nuit précédente et que `shift` tombe dans son repos.
pub(super) fn resting_after_night(
    member: &StaffMember,
    shift: Shift,
    night_carryover: &BTreeSet<StaffId>,
) -> bool {
    shift.needs_rest_after_night() && night_carryover.contains(&member.work_id)
}

/// Les `n` membres les moins chargés ; tri stable, donc l'ordre du roster départage.
pub(super) fn least_loaded<'a>(
    mut pool: Vec<&'a StaffMember>,
    workload: &Workload,
    n: usize,
) -> Vec<&'a StaffMember> {
    pool.sort_by_key(|m| workload.count(&m.work_id));
    pool.truncate(n);
    pool
}
