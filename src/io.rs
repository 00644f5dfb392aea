use crate::model::{Day, Role, StaffId, StaffMember, WeeklySchedule};
use anyhow::{bail, Context};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Import du personnel depuis CSV: header `workid,work[,off]`.
/// Un `workid` vide reçoit un identifiant aléatoire.
pub fn import_staff_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<StaffMember>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for (line, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let work_id = rec.get(0).context("missing workid")?.trim();
        let work = rec.get(1).context("missing work")?.trim();
        if work.is_empty() {
            bail!("invalid staff row {} (empty work)", line + 1);
        }
        let mut member = StaffMember {
            work_id: if work_id.is_empty() {
                StaffId::random()
            } else {
                StaffId::new(work_id)
            },
            role: Role::from(work.to_string()),
            day_off: None,
        };
        if let Some(off) = rec.get(2) {
            let off = off.trim();
            if !off.is_empty() {
                let day = off
                    .parse::<Day>()
                    .map_err(anyhow::Error::msg)
                    .with_context(|| format!("invalid off value for workid {}", member.work_id))?;
                member.day_off = Some(day);
            }
        }
        out.push(member);
    }
    Ok(out)
}

/// Fusionne `incoming` dans `roster` : même `workid` remplacé, sinon ajouté.
pub fn merge_staff(roster: &mut Vec<StaffMember>, incoming: Vec<StaffMember>) {
    for member in incoming {
        match roster.iter_mut().find(|m| m.work_id == member.work_id) {
            Some(existing) => *existing = member,
            None => roster.push(member),
        }
    }
}

/// Export JSON du planning (jolie mise en forme)
pub fn export_schedule_json<P: AsRef<Path>>(path: P, schedule: &WeeklySchedule) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(schedule)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV: header `day,shift,nurses,receptionist`, infirmiers séparés par `;`.
pub fn write_schedule_csv<W: Write>(writer: W, schedule: &WeeklySchedule) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_writer(writer);
    w.write_record(["day", "shift", "nurses", "receptionist"])?;
    for (day, shift, assignment) in schedule.iter() {
        let nurses = assignment
            .nurses
            .iter()
            .map(StaffId::as_str)
            .collect::<Vec<_>>()
            .join(";");
        w.write_record([
            day.name(),
            shift.name(),
            nurses.as_str(),
            assignment.receptionist.as_str(),
        ])?;
    }
    w.flush()?;
    Ok(())
}

pub fn export_schedule_csv<P: AsRef<Path>>(path: P, schedule: &WeeklySchedule) -> anyhow::Result<()> {
    let file = fs::File::create(path.as_ref())
        .with_context(|| format!("creating {}", path.as_ref().display()))?;
    write_schedule_csv(file, schedule)
}
