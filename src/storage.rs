use crate::model::{StaffMember, WeeklySchedule};
use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;

/// Clé unique du planning courant.
pub const SCHEDULE_KEY: &str = "weekly_schedule";

/// Document persisté pour un planning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRecord {
    #[serde(rename = "type")]
    pub key: String,
    pub generated_at: DateTime<Utc>,
    pub schedule: WeeklySchedule,
}

impl ScheduleRecord {
    pub fn new<K: Into<String>>(key: K, schedule: WeeklySchedule) -> Self {
        Self {
            key: key.into(),
            generated_at: Utc::now(),
            schedule,
        }
    }
}

pub trait Storage {
    /// Charge le personnel.
    fn fetch_roster(&self) -> anyhow::Result<Vec<StaffMember>>;
    /// Remplace le personnel.
    fn save_roster(&self, roster: &[StaffMember]) -> anyhow::Result<()>;
    /// Crée ou remplace entièrement le planning stocké sous `key`.
    fn upsert_schedule(&self, key: &str, record: &ScheduleRecord) -> anyhow::Result<()>;
    /// `None` si aucun planning n'a encore été généré.
    fn fetch_schedule(&self, key: &str) -> anyhow::Result<Option<ScheduleRecord>>;
}

/// Stockage fichiers : `staff.json` et `timetables.json` dans un répertoire.
pub struct JsonStorage {
    dir: PathBuf,
}

impl JsonStorage {
    pub fn open<P: AsRef<Path>>(dir: P) -> anyhow::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).with_context(|| format!("creating data directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn staff_path(&self) -> PathBuf {
        self.dir.join("staff.json")
    }

    pub fn timetables_path(&self) -> PathBuf {
        self.dir.join("timetables.json")
    }

    fn read_all<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
        if !path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_slice(&data).with_context(|| format!("parsing {}", path.display()))
    }

    fn write_atomic<T: Serialize>(path: &Path, items: &[T]) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(items)?;
        let mut tmp = NamedTempFile::new_in(path.parent().unwrap_or_else(|| Path::new(".")))
            .with_context(|| "creating temp file")?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).with_context(|| "atomic rename")?;
        Ok(())
    }
}

impl Storage for JsonStorage {
    fn fetch_roster(&self) -> anyhow::Result<Vec<StaffMember>> {
        Self::read_all(&self.staff_path())
    }

    fn save_roster(&self, roster: &[StaffMember]) -> anyhow::Result<()> {
        Self::write_atomic(&self.staff_path(), roster)
    }

    fn upsert_schedule(&self, key: &str, record: &ScheduleRecord) -> anyhow::Result<()> {
        let path = self.timetables_path();
        let mut records: Vec<ScheduleRecord> = Self::read_all(&path)?;
        records.retain(|r| r.key != key);
        let mut record = record.clone();
        record.key = key.to_string();
        records.push(record);
        Self::write_atomic(&path, &records)
    }

    fn fetch_schedule(&self, key: &str) -> anyhow::Result<Option<ScheduleRecord>> {
        let records: Vec<ScheduleRecord> = Self::read_all(&self.timetables_path())?;
        Ok(records.into_iter().find(|r| r.key == key))
    }
}

/// Stockage en mémoire (tests, intégration dans un autre processus).
#[derive(Debug, Default)]
pub struct MemoryStorage {
    roster: Mutex<Vec<StaffMember>>,
    schedules: Mutex<Vec<ScheduleRecord>>,
}

impl MemoryStorage {
    pub fn with_roster(roster: Vec<StaffMember>) -> Self {
        Self {
            roster: Mutex::new(roster),
            schedules: Mutex::new(Vec::new()),
        }
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> anyhow::Error {
    anyhow::anyhow!("memory storage lock poisoned")
}

impl Storage for MemoryStorage {
    fn fetch_roster(&self) -> anyhow::Result<Vec<StaffMember>> {
        Ok(self.roster.lock().map_err(poisoned)?.clone())
    }

    fn save_roster(&self, roster: &[StaffMember]) -> anyhow::Result<()> {
        *self.roster.lock().map_err(poisoned)? = roster.to_vec();
        Ok(())
    }

    fn upsert_schedule(&self, key: &str, record: &ScheduleRecord) -> anyhow::Result<()> {
        let mut schedules = self.schedules.lock().map_err(poisoned)?;
        let mut record = record.clone();
        record.key = key.to_string();
        match schedules.iter_mut().find(|r| r.key == key) {
            Some(existing) => *existing = record,
            None => schedules.push(record),
        }
        Ok(())
    }

    fn fetch_schedule(&self, key: &str) -> anyhow::Result<Option<ScheduleRecord>> {
        let schedules = self.schedules.lock().map_err(poisoned)?;
        Ok(schedules.iter().find(|r| r.key == key).cloned())
    }
}
