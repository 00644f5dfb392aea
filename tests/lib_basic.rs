#![forbid(unsafe_code)]
use roulement::{
    check_schedule, Day, Role, Rules, SchedError, Scheduler, Shift, ShiftAssignment, StaffId,
    StaffMember, ViolationKind, WeeklySchedule,
};

fn nurses(ids: &[&str]) -> Vec<StaffMember> {
    ids.iter().map(|id| StaffMember::nurse(id)).collect()
}

fn receptionists(ids: &[&str]) -> Vec<StaffMember> {
    ids.iter().map(|id| StaffMember::receptionist(id)).collect()
}

fn ids(raw: &[&str]) -> Vec<StaffId> {
    raw.iter().map(StaffId::new).collect()
}

fn nurses_on(schedule: &WeeklySchedule, day: Day, shift: Shift) -> Option<Vec<StaffId>> {
    schedule.get(day, shift).map(|a| a.nurses.clone())
}

#[test]
fn three_nurses_only_cover_weekday_mornings() {
    let mut roster = nurses(&["N1", "N2", "N3"]);
    roster.extend(receptionists(&["R1"]));

    let generation = Scheduler::new(roster, Rules::default()).generate().unwrap();
    let schedule = &generation.schedule;

    for day in [Day::Monday, Day::Tuesday, Day::Wednesday, Day::Thursday, Day::Friday] {
        let morning = schedule.get(day, Shift::Morning).expect("morning staffed");
        assert_eq!(morning.nurses, ids(&["N1", "N2", "N3"]));
        assert_eq!(morning.receptionist, StaffId::new("R1"));
        assert!(schedule.get(day, Shift::Afternoon).is_none());
        assert!(schedule.get(day, Shift::Night).is_none());
    }
    // plafond atteint le vendredi
    assert!(schedule.day(Day::Saturday).is_none());
    assert!(schedule.day(Day::Sunday).is_none());
    assert_eq!(schedule.len(), 5);

    for id in ["N1", "N2", "N3", "R1"] {
        assert_eq!(generation.workload.count(&StaffId::new(id)), 5);
    }
    assert_eq!(generation.shortfalls.len(), 16);
    let saturday = generation
        .shortfalls
        .iter()
        .find(|s| s.day == Day::Saturday && s.shift == Shift::Morning)
        .unwrap();
    assert_eq!(saturday.nurses_available, 0);
    assert_eq!(saturday.receptionists_available, 0);
}

#[test]
fn day_off_and_rotation_favour_least_loaded() {
    let mut roster = nurses(&["N1", "N2", "N3"]);
    roster.push(StaffMember::nurse("N4").with_day_off(Day::Monday));
    roster.extend(receptionists(&["R1", "R2", "R3"]));

    let generation = Scheduler::new(roster, Rules::default()).generate().unwrap();
    let schedule = &generation.schedule;

    assert_eq!(
        nurses_on(schedule, Day::Monday, Shift::Morning),
        Some(ids(&["N1", "N2", "N3"]))
    );
    assert!(schedule.get(Day::Monday, Shift::Afternoon).is_none());

    // N4 n'a encore rien fait : prioritaire, puis ordre du roster
    assert_eq!(
        nurses_on(schedule, Day::Tuesday, Shift::Morning),
        Some(ids(&["N4", "N1", "N2"]))
    );
    assert_eq!(
        schedule.get(Day::Tuesday, Shift::Morning).unwrap().receptionist,
        StaffId::new("R2")
    );
    assert_eq!(
        nurses_on(schedule, Day::Wednesday, Shift::Morning),
        Some(ids(&["N3", "N4", "N1"]))
    );
    assert_eq!(
        schedule.get(Day::Wednesday, Shift::Morning).unwrap().receptionist,
        StaffId::new("R3")
    );
}

#[test]
fn night_crew_rests_through_next_afternoon_even_when_morning_is_staffed() {
    let mut roster = nurses(&["N1", "N2", "N3"])
        .into_iter()
        .map(|m| m.with_day_off(Day::Tuesday))
        .collect::<Vec<_>>();
    roster.extend(nurses(&["N4", "N5", "N6", "N7", "N8", "N9"]));
    roster.extend(receptionists(&["R1", "R2", "R3"]));

    let generation = Scheduler::new(roster, Rules::default()).generate().unwrap();
    let schedule = &generation.schedule;

    assert_eq!(
        nurses_on(schedule, Day::Monday, Shift::Night),
        Some(ids(&["N7", "N8", "N9"]))
    );
    assert_eq!(
        nurses_on(schedule, Day::Tuesday, Shift::Morning),
        Some(ids(&["N4", "N5", "N6"]))
    );
    // seuls N7-N9 restent, tous sortant de nuit
    assert!(schedule.get(Day::Tuesday, Shift::Afternoon).is_none());
    let shortfall = generation
        .shortfalls
        .iter()
        .find(|s| s.day == Day::Tuesday && s.shift == Shift::Afternoon)
        .unwrap();
    assert_eq!(shortfall.nurses_available, 0);
    assert_eq!(shortfall.receptionists_available, 2);

    // nuit → nuit autorisé
    assert_eq!(
        nurses_on(schedule, Day::Tuesday, Shift::Night),
        Some(ids(&["N7", "N8", "N9"]))
    );
}

#[test]
fn unstaffed_night_clears_rest_constraint() {
    let mut roster = nurses(&["N1", "N2", "N3", "N4", "N5", "N6"]);
    roster.extend(
        nurses(&["N7", "N8", "N9"])
            .into_iter()
            .map(|m| m.with_day_off(Day::Tuesday)),
    );
    roster.extend(receptionists(&["R1", "R2", "R3"]));

    let generation = Scheduler::new(roster, Rules::default()).generate().unwrap();
    let schedule = &generation.schedule;

    assert_eq!(
        nurses_on(schedule, Day::Monday, Shift::Night),
        Some(ids(&["N7", "N8", "N9"]))
    );
    assert!(schedule.get(Day::Tuesday, Shift::Night).is_none());
    // l'équipe de nuit du lundi n'est plus bloquée le mercredi
    assert_eq!(
        nurses_on(schedule, Day::Wednesday, Shift::Morning),
        Some(ids(&["N7", "N8", "N9"]))
    );
}

#[test]
fn rejects_insufficient_global_pool() {
    let mut roster = nurses(&["N1", "N2"]);
    roster.push(StaffMember::new("D1", Role::Other("Doctor".into())));
    roster.extend(receptionists(&["R1"]));
    let err = Scheduler::new(roster, Rules::default()).generate().unwrap_err();
    assert_eq!(err, SchedError::InsufficientNurses { found: 2, required: 3 });

    let roster = nurses(&["N1", "N2", "N3"]);
    let err = Scheduler::new(roster, Rules::default()).generate().unwrap_err();
    assert_eq!(
        err,
        SchedError::InsufficientReceptionists { found: 0, required: 1 }
    );
}

#[test]
fn rejects_duplicate_work_ids() {
    let roster = vec![
        StaffMember::nurse("N1"),
        StaffMember::nurse("N1"),
        StaffMember::nurse("N2"),
        StaffMember::receptionist("R1"),
    ];
    let err = Scheduler::new(roster, Rules::default()).generate().unwrap_err();
    assert_eq!(err, SchedError::DuplicateStaff(StaffId::new("N1")));

    // même id sur deux métiers
    let mut roster = nurses(&["N1", "N2", "N3"]);
    roster.push(StaffMember::receptionist("N2"));
    let err = Scheduler::new(roster, Rules::default()).generate().unwrap_err();
    assert_eq!(err, SchedError::DuplicateStaff(StaffId::new("N2")));
}

#[test]
fn rejects_zero_rules() {
    let mut roster = nurses(&["N1", "N2", "N3"]);
    roster.extend(receptionists(&["R1"]));
    let rules = Rules {
        min_nurses_per_shift: 0,
        ..Rules::default()
    };
    let err = Scheduler::new(roster, rules).generate().unwrap_err();
    assert!(matches!(err, SchedError::InvalidRules(_)));
}

#[test]
fn same_day_off_everywhere_degrades_to_shortfalls() {
    let mut roster: Vec<StaffMember> = nurses(&["N1", "N2", "N3", "N4"])
        .into_iter()
        .map(|m| m.with_day_off(Day::Sunday))
        .collect();
    roster.extend(receptionists(&["R1", "R2"]));

    let generation = Scheduler::new(roster, Rules::default()).generate().unwrap();
    assert!(generation.schedule.day(Day::Sunday).is_none());
    assert!(generation
        .shortfalls
        .iter()
        .any(|s| s.day == Day::Sunday && s.nurses_available == 0));
}

fn large_roster() -> Vec<StaffMember> {
    let mut roster = Vec::new();
    for i in 0..16 {
        let mut m = StaffMember::nurse(format!("N{i:02}"));
        if i % 3 != 0 {
            m = m.with_day_off(Day::ALL[i % 7]);
        }
        roster.push(m);
    }
    for i in 0..4 {
        roster.push(StaffMember::receptionist(format!("R{i}")).with_day_off(Day::ALL[(i * 2) % 7]));
    }
    roster.push(StaffMember::new("D0", Role::Other("Doctor".into())));
    roster
}

#[test]
fn generated_schedule_respects_every_invariant() {
    let roster = large_roster();
    let rules = Rules::default();
    let generation = Scheduler::new(roster.clone(), rules).generate().unwrap();
    let schedule = &generation.schedule;

    assert!(schedule.len() <= 21);
    assert!(!schedule.is_empty());
    for (_, _, assignment) in schedule.iter() {
        assert_eq!(assignment.nurses.len(), 3);
    }
    for member in &roster {
        let worked = schedule.shifts_of(&member.work_id);
        assert!(worked <= 5, "{} worked {worked} shifts", member.work_id);
        assert_eq!(generation.workload.count(&member.work_id) as usize, worked);
    }
    assert_eq!(schedule.shifts_of(&StaffId::new("D0")), 0);

    let violations = check_schedule(schedule, &roster, rules);
    assert!(violations.is_empty(), "{violations:?}");
}

#[test]
fn generation_is_deterministic() {
    let roster = large_roster();
    let a = Scheduler::new(roster.clone(), Rules::default()).generate().unwrap();
    let b = Scheduler::new(roster, Rules::default()).generate().unwrap();
    assert_eq!(a.schedule, b.schedule);
    assert_eq!(a.workload, b.workload);
    assert_eq!(a.shortfalls, b.shortfalls);
}

#[test]
fn check_flags_hand_edited_schedule() {
    let mut roster = nurses(&["N1", "N2", "N3", "N4", "N5"]);
    roster.extend(receptionists(&["R1", "R2"]));

    let mut schedule = WeeklySchedule::new();
    schedule.insert(
        Day::Monday,
        Shift::Morning,
        ShiftAssignment {
            nurses: ids(&["N1", "N2", "N3"]),
            receptionist: StaffId::new("R1"),
        },
    );
    schedule.insert(
        Day::Monday,
        Shift::Night,
        ShiftAssignment {
            nurses: ids(&["N1", "N4", "N5"]),
            receptionist: StaffId::new("R2"),
        },
    );
    schedule.insert(
        Day::Tuesday,
        Shift::Morning,
        ShiftAssignment {
            nurses: ids(&["N4", "N2"]),
            receptionist: StaffId::new("N3"),
        },
    );

    let violations = check_schedule(&schedule, &roster, Rules::default());
    let has = |kind: ViolationKind, staff: Option<&str>, day: Day, shift: Shift| {
        violations.iter().any(|v| {
            v.kind == kind && v.staff.as_ref().map(StaffId::as_str) == staff && v.day == day && v.shift == shift
        })
    };

    assert!(has(ViolationKind::DoubleAssignment, Some("N1"), Day::Monday, Shift::Night));
    assert!(has(ViolationKind::RestViolation, Some("N4"), Day::Tuesday, Shift::Morning));
    assert!(has(ViolationKind::Understaffed, None, Day::Tuesday, Shift::Morning));
    assert!(has(ViolationKind::WrongRole, Some("N3"), Day::Tuesday, Shift::Morning));
    assert!(!violations.iter().any(|v| v.day == Day::Monday && v.shift == Shift::Morning));
}

#[test]
fn check_flags_day_off_and_weekly_cap() {
    let mut roster = nurses(&["N1", "N2"]);
    roster.push(StaffMember::nurse("N3").with_day_off(Day::Friday));
    roster.extend(receptionists(&["R1", "R2"]));

    let mut schedule = WeeklySchedule::new();
    for day in Day::ALL.into_iter().take(6) {
        schedule.insert(
            day,
            Shift::Morning,
            ShiftAssignment {
                nurses: ids(&["N1", "N2", "N3"]),
                receptionist: StaffId::new(if day == Day::Saturday { "R2" } else { "R1" }),
            },
        );
    }

    let violations = check_schedule(&schedule, &roster, Rules::default());
    assert!(violations
        .iter()
        .any(|v| v.kind == ViolationKind::DayOff && v.day == Day::Friday));
    let capped: Vec<_> = violations
        .iter()
        .filter(|v| v.kind == ViolationKind::WeeklyCapExceeded)
        .collect();
    assert_eq!(capped.len(), 3);
    assert!(capped.iter().all(|v| v.day == Day::Saturday));
}
