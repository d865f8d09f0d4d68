use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
#[cfg(feature = "serde")]
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::scheduler::ValidationError;

/// Identifiant fort pour un employé (son nom).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EmployeeId(String);

impl EmployeeId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }

    /// Variante validée : refuse un identifiant vide (après trim).
    pub fn parse<S: AsRef<str>>(s: S) -> Result<Self, ValidationError> {
        let trimmed = s.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyEmployeeId);
        }
        Ok(Self::new(trimmed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Jour de la semaine, dans l'ordre fixe lundi → dimanche.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
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

    pub fn index(self) -> usize {
        self as usize
    }

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
}

impl From<Weekday> for Day {
    fn from(w: Weekday) -> Self {
        Day::ALL[w.num_days_from_monday() as usize]
    }
}

impl From<Day> for Weekday {
    fn from(d: Day) -> Self {
        match d {
            Day::Monday => Weekday::Mon,
            Day::Tuesday => Weekday::Tue,
            Day::Wednesday => Weekday::Wed,
            Day::Thursday => Weekday::Thu,
            Day::Friday => Weekday::Fri,
            Day::Saturday => Weekday::Sat,
            Day::Sunday => Weekday::Sun,
        }
    }
}

impl FromStr for Day {
    type Err = ValidationError;

    /// Accepte "Monday", "monday", "Mon"... (parseur de `chrono::Weekday`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<Weekday>()
            .map(Day::from)
            .map_err(|_| ValidationError::UnknownDay(s.to_string()))
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Poste de la journée, dans l'ordre fixe matin → soir.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Shift {
    Morning,
    Afternoon,
    Evening,
}

impl Shift {
    pub const ALL: [Shift; 3] = [Shift::Morning, Shift::Afternoon, Shift::Evening];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Shift::Morning => "morning",
            Shift::Afternoon => "afternoon",
            Shift::Evening => "evening",
        }
    }

    /// Libellé capitalisé pour l'affichage ("Morning").
    pub fn label(self) -> &'static str {
        match self {
            Shift::Morning => "Morning",
            Shift::Afternoon => "Afternoon",
            Shift::Evening => "Evening",
        }
    }
}

impl FromStr for Shift {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "morning" => Ok(Shift::Morning),
            "afternoon" => Ok(Shift::Afternoon),
            "evening" => Ok(Shift::Evening),
            _ => Err(ValidationError::UnknownShift(s.to_string())),
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classement des trois postes pour un jour : position 0 = préférence la plus forte.
///
/// Le seul constructeur valide qu'il s'agit d'une permutation de {matin, après-midi, soir}.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ShiftRanking([Shift; 3]);

impl ShiftRanking {
    pub fn new(order: &[Shift]) -> Result<Self, ValidationError> {
        if order.len() != Shift::ALL.len() {
            return Err(ValidationError::IncompleteRanking { len: order.len() });
        }
        let mut seen = [false; 3];
        for shift in order {
            if std::mem::replace(&mut seen[shift.index()], true) {
                return Err(ValidationError::DuplicateShift { shift: *shift });
            }
        }
        Ok(Self([order[0], order[1], order[2]]))
    }

    /// Parse une liste de noms ("morning", "Evening", ...).
    pub fn parse<S: AsRef<str>>(names: &[S]) -> Result<Self, ValidationError> {
        let order = names
            .iter()
            .map(|n| n.as_ref().parse::<Shift>())
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(&order)
    }

    /// Position (0-based) du poste dans le classement.
    pub fn rank_of(&self, shift: Shift) -> usize {
        self.0.iter().position(|s| *s == shift).unwrap_or(Shift::ALL.len())
    }

    pub fn contains(&self, shift: Shift) -> bool {
        self.0.contains(&shift)
    }
}

impl Default for ShiftRanking {
    fn default() -> Self {
        Self(Shift::ALL)
    }
}

/// Préférences d'un employé pour la semaine. Un jour absent = table partielle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WeeklyPreferences {
    days: BTreeMap<Day, ShiftRanking>,
}

impl WeeklyPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Même classement les sept jours.
    pub fn uniform(ranking: ShiftRanking) -> Self {
        let mut prefs = Self::new();
        for day in Day::ALL {
            prefs.set(day, ranking);
        }
        prefs
    }

    pub fn set(&mut self, day: Day, ranking: ShiftRanking) -> Option<ShiftRanking> {
        self.days.insert(day, ranking)
    }

    pub fn with(mut self, day: Day, ranking: ShiftRanking) -> Self {
        self.set(day, ranking);
        self
    }

    pub fn ranking(&self, day: Day) -> Option<&ShiftRanking> {
        self.days.get(&day)
    }

    /// Rang du poste ce jour-là, `None` si le jour n'est pas renseigné.
    pub fn rank_of(&self, day: Day, shift: Shift) -> Option<usize> {
        self.ranking(day)
            .filter(|r| r.contains(shift))
            .map(|r| r.rank_of(shift))
    }

    pub fn is_complete(&self) -> bool {
        Day::ALL.iter().all(|d| self.days.contains_key(d))
    }
}

/// Employés affectés aux trois postes d'un jour (ordre d'insertion significatif).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayRoster {
    shifts: [Vec<EmployeeId>; 3],
}

impl DayRoster {
    pub fn get(&self, shift: Shift) -> &[EmployeeId] {
        &self.shifts[shift.index()]
    }

    pub fn get_mut(&mut self, shift: Shift) -> &mut Vec<EmployeeId> {
        &mut self.shifts[shift.index()]
    }

    /// L'employé figure-t-il sur l'un des trois postes du jour ?
    pub fn works(&self, employee: &EmployeeId) -> bool {
        self.shifts.iter().any(|list| list.contains(employee))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Shift, &[EmployeeId])> {
        Shift::ALL.into_iter().map(move |s| (s, self.get(s)))
    }
}

/// Planning de la semaine : jour → poste → liste ordonnée d'employés.
///
/// Toujours complet (7 jours × 3 postes), éventuellement vide.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    days: [DayRoster; 7],
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn day(&self, day: Day) -> &DayRoster {
        &self.days[day.index()]
    }

    pub fn day_mut(&mut self, day: Day) -> &mut DayRoster {
        &mut self.days[day.index()]
    }

    pub fn get(&self, day: Day, shift: Shift) -> &[EmployeeId] {
        self.day(day).get(shift)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Day, &DayRoster)> {
        Day::ALL.into_iter().map(move |d| (d, self.day(d)))
    }

    /// Nombre total d'affectations (toutes cases confondues).
    pub fn assignment_count(&self) -> usize {
        self.iter()
            .flat_map(|(_, roster)| roster.iter())
            .map(|(_, list)| list.len())
            .sum()
    }

    /// Postes tenus par un employé, dans l'ordre de la semaine.
    pub fn shifts_of<'a>(
        &'a self,
        employee: &'a EmployeeId,
    ) -> impl Iterator<Item = (Day, Shift)> + 'a {
        self.iter().flat_map(move |(day, roster)| {
            roster
                .iter()
                .filter(move |(_, list)| list.contains(employee))
                .map(move |(shift, _)| (day, shift))
        })
    }
}

#[cfg(feature = "serde")]
impl Serialize for DayRoster {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Shift::ALL.len()))?;
        for (shift, list) in self.iter() {
            map.serialize_entry(shift.name(), list)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
impl Serialize for Schedule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Day::ALL.len()))?;
        for (day, roster) in self.iter() {
            map.serialize_entry(day.name(), roster)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_parses_long_short_and_lowercase_names() {
        assert_eq!("Monday".parse::<Day>().unwrap(), Day::Monday);
        assert_eq!("sunday".parse::<Day>().unwrap(), Day::Sunday);
        assert_eq!("Wed".parse::<Day>().unwrap(), Day::Wednesday);
        assert!(matches!(
            "Moonday".parse::<Day>(),
            Err(ValidationError::UnknownDay(_))
        ));
    }

    #[test]
    fn day_converts_to_and_from_chrono() {
        for day in Day::ALL {
            assert_eq!(Day::from(Weekday::from(day)), day);
        }
    }

    #[test]
    fn ranking_rejects_duplicates_and_missing_shifts() {
        let dup = ShiftRanking::new(&[Shift::Morning, Shift::Morning, Shift::Evening]);
        assert!(matches!(
            dup,
            Err(ValidationError::DuplicateShift {
                shift: Shift::Morning
            })
        ));

        let short = ShiftRanking::new(&[Shift::Morning, Shift::Evening]);
        assert!(matches!(
            short,
            Err(ValidationError::IncompleteRanking { len: 2 })
        ));

        let typo = ShiftRanking::parse(&["morning", "afternon", "evening"]);
        assert!(matches!(typo, Err(ValidationError::UnknownShift(_))));
    }

    #[test]
    fn ranking_reports_position() {
        let r = ShiftRanking::parse(&["evening", "Morning", "afternoon"]).unwrap();
        assert_eq!(r.rank_of(Shift::Evening), 0);
        assert_eq!(r.rank_of(Shift::Morning), 1);
        assert_eq!(r.rank_of(Shift::Afternoon), 2);
    }

    #[test]
    fn partial_preferences_have_no_rank_on_missing_days() {
        let prefs = WeeklyPreferences::new().with(Day::Monday, ShiftRanking::default());
        assert_eq!(prefs.rank_of(Day::Monday, Shift::Afternoon), Some(1));
        assert_eq!(prefs.rank_of(Day::Tuesday, Shift::Afternoon), None);
        assert!(!prefs.is_complete());
        assert!(WeeklyPreferences::uniform(ShiftRanking::default()).is_complete());
    }

    #[test]
    fn empty_employee_id_is_rejected() {
        assert!(matches!(
            EmployeeId::parse("   "),
            Err(ValidationError::EmptyEmployeeId)
        ));
        assert_eq!(EmployeeId::parse(" Ana ").unwrap().as_str(), "Ana");
    }
}
