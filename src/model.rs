use chrono::Weekday;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifiant fort pour un membre du personnel (`workid`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaffId(String);

impl StaffId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StaffId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Métier. Seuls `Nurse` et `Receptionist` participent au planning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Nurse,
    Receptionist,
    Other(String),
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Nurse" => Role::Nurse,
            "Receptionist" => Role::Receptionist,
            _ => Role::Other(s),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Nurse => "Nurse".to_string(),
            Role::Receptionist => "Receptionist".to_string(),
            Role::Other(s) => s,
        }
    }
}

/// Jour de la semaine, dans l'ordre de planification (lundi → dimanche).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }

    /// Jour suivant dans la même semaine (`None` après dimanche).
    pub fn next(self) -> Option<Day> {
        let idx = self as usize;
        Day::ALL.get(idx + 1).copied()
    }
}

impl From<Weekday> for Day {
    fn from(w: Weekday) -> Self {
        Day::ALL[w.num_days_from_monday() as usize]
    }
}

impl FromStr for Day {
    type Err = String;

    /// Accepte les noms anglais complets ou abrégés, sans tenir compte de la casse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<Weekday>()
            .map(Day::from)
            .map_err(|_| format!("invalid day name: {s}"))
    }
}

impl TryFrom<String> for Day {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Créneau quotidien, dans l'ordre de planification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Shift {
    Morning,
    Afternoon,
    Night,
}

impl Shift {
    pub const ALL: [Shift; 3] = [Shift::Morning, Shift::Afternoon, Shift::Night];

    pub fn name(self) -> &'static str {
        match self {
            Shift::Morning => "Morning",
            Shift::Afternoon => "Afternoon",
            Shift::Night => "Night",
        }
    }

    pub fn is_night(self) -> bool {
        self == Shift::Night
    }

    /// Créneaux interdits à l'équipe de nuit de la veille.
    pub fn needs_rest_after_night(self) -> bool {
        matches!(self, Shift::Morning | Shift::Afternoon)
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Membre du personnel, tel que stocké (`workid`, `work`, `off`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffMember {
    #[serde(rename = "workid")]
    pub work_id: StaffId,
    #[serde(rename = "work")]
    pub role: Role,
    #[serde(
        rename = "off",
        default,
        deserialize_with = "day_off_from_str",
        skip_serializing_if = "Option::is_none"
    )]
    pub day_off: Option<Day>,
}

/// `off` absent, `null` ou vide : pas de jour de repos.
fn day_off_from_str<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Day>, D::Error> {
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => raw.parse::<Day>().map(Some).map_err(de::Error::custom),
        _ => Ok(None),
    }
}

impl StaffMember {
    pub fn new<S: AsRef<str>>(work_id: S, role: Role) -> Self {
        Self {
            work_id: StaffId::new(work_id),
            role,
            day_off: None,
        }
    }

    pub fn nurse<S: AsRef<str>>(work_id: S) -> Self {
        Self::new(work_id, Role::Nurse)
    }

    pub fn receptionist<S: AsRef<str>>(work_id: S) -> Self {
        Self::new(work_id, Role::Receptionist)
    }

    pub fn with_day_off(mut self, day: Day) -> Self {
        self.day_off = Some(day);
        self
    }

    pub fn is_nurse(&self) -> bool {
        self.role == Role::Nurse
    }

    pub fn is_receptionist(&self) -> bool {
        self.role == Role::Receptionist
    }

    pub fn available_on(&self, day: Day) -> bool {
        self.day_off != Some(day)
    }
}

/// Affectation d'un créneau : infirmiers puis accueil.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftAssignment {
    pub nurses: Vec<StaffId>,
    pub receptionist: StaffId,
}

impl ShiftAssignment {
    pub fn staff(&self) -> impl Iterator<Item = &StaffId> {
        self.nurses.iter().chain(std::iter::once(&self.receptionist))
    }
}

/// Planning hebdomadaire. Les créneaux non pourvus sont absents,
/// un jour sans aucun créneau pourvu l'est aussi.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklySchedule {
    days: BTreeMap<Day, BTreeMap<Shift, ShiftAssignment>>,
}

impl WeeklySchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, day: Day, shift: Shift, assignment: ShiftAssignment) {
        self.days.entry(day).or_default().insert(shift, assignment);
    }

    pub fn get(&self, day: Day, shift: Shift) -> Option<&ShiftAssignment> {
        self.days.get(&day).and_then(|shifts| shifts.get(&shift))
    }

    pub fn day(&self, day: Day) -> Option<&BTreeMap<Shift, ShiftAssignment>> {
        self.days.get(&day)
    }

    /// Parcourt les affectations dans l'ordre jour puis créneau.
    pub fn iter(&self) -> impl Iterator<Item = (Day, Shift, &ShiftAssignment)> {
        self.days.iter().flat_map(|(day, shifts)| {
            shifts.iter().map(move |(shift, a)| (*day, *shift, a))
        })
    }

    pub fn len(&self) -> usize {
        self.days.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Nombre de créneaux attribués à `id` sur la semaine.
    pub fn shifts_of(&self, id: &StaffId) -> usize {
        self.iter().filter(|(_, _, a)| a.staff().any(|s| s == id)).count()
    }
}

/// Compteur de charge : nombre de créneaux attribués par personne.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Workload(BTreeMap<StaffId, u32>);

impl Workload {
    /// Initialise à zéro pour chaque membre fourni.
    pub fn zeroed<'a, I: IntoIterator<Item = &'a StaffMember>>(staff: I) -> Self {
        Self(staff.into_iter().map(|m| (m.work_id.clone(), 0)).collect())
    }

    pub fn count(&self, id: &StaffId) -> u32 {
        self.0.get(id).copied().unwrap_or(0)
    }

    pub fn increment(&mut self, id: &StaffId) {
        *self.0.entry(id.clone()).or_insert(0) += 1;
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StaffId, u32)> {
        self.0.iter().map(|(id, n)| (id, *n))
    }
}
