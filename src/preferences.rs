use crate::model::{Day, EmployeeId, Shift, ShiftRanking, WeeklyPreferences};
use crate::scheduler::ValidationError;

/// Stockage des préférences, dans l'ordre d'enregistrement des employés.
///
/// L'ordre d'enregistrement sert de départage stable à toutes les étapes
/// de l'allocation : deux exécutions sur les mêmes entrées donnent le même planning.
#[derive(Debug, Clone, Default)]
pub struct PreferenceStore {
    entries: Vec<(EmployeeId, WeeklyPreferences)>,
}

impl PreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enregistre (ou remplace) la table d'un employé. Un remplacement garde la position initiale.
    pub fn record(&mut self, employee: EmployeeId, prefs: WeeklyPreferences) {
        match self.entries.iter_mut().find(|(id, _)| *id == employee) {
            Some((_, existing)) => *existing = prefs,
            None => self.entries.push((employee, prefs)),
        }
    }

    /// Enregistre une table brute `jour → noms de postes`, validée jour par jour.
    pub fn record_raw<D, S>(
        &mut self,
        employee: &str,
        table: impl IntoIterator<Item = (D, Vec<S>)>,
    ) -> Result<EmployeeId, ValidationError>
    where
        D: AsRef<str>,
        S: AsRef<str>,
    {
        let id = EmployeeId::parse(employee)?;
        let mut prefs = WeeklyPreferences::new();
        for (day_name, shifts) in table {
            let day_name = day_name.as_ref();
            let wrap = |source: ValidationError| ValidationError::InvalidPreferences {
                employee: id.to_string(),
                day: day_name.to_string(),
                source: Box::new(source),
            };
            let day: Day = day_name.parse().map_err(wrap)?;
            let ranking = ShiftRanking::parse(&shifts).map_err(wrap)?;
            if prefs.set(day, ranking).is_some() {
                return Err(wrap(ValidationError::DuplicateDay { day }));
            }
        }
        self.record(id.clone(), prefs);
        Ok(id)
    }

    pub fn get(&self, employee: &EmployeeId) -> Option<&WeeklyPreferences> {
        self.entries
            .iter()
            .find(|(id, _)| id == employee)
            .map(|(_, p)| p)
    }

    pub fn employees(&self) -> impl Iterator<Item = &EmployeeId> {
        self.entries.iter().map(|(id, _)| id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Équipe d'exemple : "Employee A" à "Employee J", cinq profils de classement répétés.
pub fn sample_roster() -> Vec<(EmployeeId, WeeklyPreferences)> {
    use Shift::{Afternoon, Evening, Morning};
    let patterns = [
        [Morning, Afternoon, Evening],
        [Afternoon, Morning, Evening],
        [Evening, Morning, Afternoon],
        [Morning, Evening, Afternoon],
        [Afternoon, Evening, Morning],
    ];
    ('A'..='J')
        .zip(patterns.iter().cycle())
        .map(|(letter, pattern)| {
            // les motifs sont des permutations
            let ranking = ShiftRanking::new(pattern).unwrap_or_default();
            (
                EmployeeId::new(format!("Employee {letter}")),
                WeeklyPreferences::uniform(ranking),
            )
        })
        .collect()
}
