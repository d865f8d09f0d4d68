mod assignment;
mod conflicts;
mod types;
mod util;

pub use types::{
    AssignOptions, CounterPolicy, CoverageWarning, DroppedAssignmentWarning, SchedError,
    ValidationError, Warning,
};

use crate::model::{EmployeeId, Schedule, WeeklyPreferences};
use crate::preferences::PreferenceStore;
use crate::workload::WorkloadTracker;

/// Scheduler : préférences, compteurs et planning de la semaine en cours de construction.
///
/// Tout l'état mutable appartient à l'instance ; rien n'est partagé entre deux schedulers.
#[derive(Debug, Default)]
pub struct Scheduler {
    store: PreferenceStore,
    tracker: WorkloadTracker,
    schedule: Schedule,
    warnings: Vec<Warning>,
    opts: AssignOptions,
    passes: u32,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::with_options(AssignOptions::default())
    }

    pub fn with_options(opts: AssignOptions) -> Self {
        Self {
            opts,
            ..Self::default()
        }
    }

    pub fn options(&self) -> AssignOptions {
        self.opts
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }
    pub fn schedule_mut(&mut self) -> &mut Schedule {
        &mut self.schedule
    }

    pub fn workload(&self) -> &WorkloadTracker {
        &self.tracker
    }

    pub fn preferences(&self) -> &PreferenceStore {
        &self.store
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn employees(&self) -> impl Iterator<Item = &EmployeeId> {
        self.store.employees()
    }

    pub fn preferences_of(&self, employee: &EmployeeId) -> Result<&WeeklyPreferences, SchedError> {
        self.store
            .get(employee)
            .ok_or_else(|| SchedError::UnknownEmployee(employee.as_str().to_string()))
    }

    /// Enregistre (ou remplace) les préférences déjà validées d'un employé.
    pub fn record_preferences(&mut self, employee: EmployeeId, prefs: WeeklyPreferences) {
        self.store.record(employee, prefs);
    }

    /// Enregistre une table brute `jour → [postes]` ; échoue si un jour n'est pas
    /// une permutation de matin/après-midi/soir.
    pub fn record_raw_preferences<D, S>(
        &mut self,
        employee: &str,
        table: impl IntoIterator<Item = (D, Vec<S>)>,
    ) -> Result<EmployeeId, SchedError>
    where
        D: AsRef<str>,
        S: AsRef<str>,
    {
        Ok(self.store.record_raw(employee, table)?)
    }

    /// Passe d'allocation unique, jour par jour puis poste par poste.
    pub fn assign_shifts(&mut self) {
        assignment::assign_shifts(self)
    }

    /// Plafonne les postes en surnombre après l'allocation.
    pub fn resolve_conflicts(&mut self) {
        conflicts::resolve_conflicts(self)
    }

    /// `assign_shifts` puis `resolve_conflicts`.
    pub fn run(&mut self) -> &Schedule {
        self.assign_shifts();
        self.resolve_conflicts();
        &self.schedule
    }

    /// Vide planning, compteurs et avertissements ; garde les préférences.
    pub fn reset(&mut self) {
        self.schedule = Schedule::new();
        self.tracker.clear();
        self.warnings.clear();
        self.passes = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Day, Shift, ShiftRanking};

    fn dropped(s: &Scheduler) -> Vec<&DroppedAssignmentWarning> {
        s.warnings()
            .iter()
            .filter_map(|w| match w {
                Warning::DroppedAssignment(d) => Some(d),
                Warning::Coverage(_) => None,
            })
            .collect()
    }

    fn scheduler_with(names: &[&str]) -> Scheduler {
        let mut s = Scheduler::new();
        for name in names {
            s.record_preferences(
                EmployeeId::new(name),
                WeeklyPreferences::uniform(ShiftRanking::default()),
            );
        }
        s
    }

    #[test]
    fn stronger_preference_breaks_equal_load() {
        let mut s = Scheduler::new();
        let evening_first =
            ShiftRanking::new(&[Shift::Evening, Shift::Afternoon, Shift::Morning]).unwrap();
        let afternoon_first =
            ShiftRanking::new(&[Shift::Afternoon, Shift::Morning, Shift::Evening]).unwrap();
        s.record_preferences(EmployeeId::new("A"), WeeklyPreferences::uniform(evening_first));
        s.record_preferences(EmployeeId::new("B"), WeeklyPreferences::uniform(evening_first));
        s.record_preferences(EmployeeId::new("C"), WeeklyPreferences::uniform(afternoon_first));

        s.assign_shifts();

        // A, B, C à zéro poste : C classe le matin en 2e, A et B en 3e.
        let monday = s.schedule().day(Day::Monday);
        assert_eq!(monday.get(Shift::Morning), [EmployeeId::new("C"), EmployeeId::new("A")]);
        assert_eq!(monday.get(Shift::Afternoon), [EmployeeId::new("B")]);
        assert!(monday.get(Shift::Evening).is_empty());
    }

    #[test]
    fn excess_moves_to_first_open_shift_of_the_day() {
        let mut s = scheduler_with(&[]);
        let day = s.schedule_mut().day_mut(Day::Tuesday);
        for name in ["A", "B", "C", "D"] {
            day.get_mut(Shift::Afternoon).push(EmployeeId::new(name));
        }
        day.get_mut(Shift::Morning).push(EmployeeId::new("E"));

        s.resolve_conflicts();

        let tuesday = s.schedule().day(Day::Tuesday);
        assert_eq!(tuesday.get(Shift::Afternoon), [EmployeeId::new("A"), EmployeeId::new("B")]);
        assert_eq!(tuesday.get(Shift::Morning), [EmployeeId::new("E"), EmployeeId::new("C")]);
        assert_eq!(tuesday.get(Shift::Evening), [EmployeeId::new("D")]);
        assert!(dropped(&s).is_empty());
    }

    #[test]
    fn excess_without_room_is_dropped_with_warning() {
        let mut s = scheduler_with(&[]);
        let day = s.schedule_mut().day_mut(Day::Friday);
        for name in ["A", "B", "C"] {
            day.get_mut(Shift::Evening).push(EmployeeId::new(name));
        }
        for name in ["D", "E"] {
            day.get_mut(Shift::Morning).push(EmployeeId::new(name));
            day.get_mut(Shift::Afternoon).push(EmployeeId::new(name));
        }

        s.resolve_conflicts();

        assert_eq!(s.schedule().get(Day::Friday, Shift::Evening).len(), 2);
        assert_eq!(
            dropped(&s),
            [&DroppedAssignmentWarning {
                day: Day::Friday,
                shift: Shift::Evening,
                employee: EmployeeId::new("C"),
            }]
        );
    }

    #[test]
    fn reset_keeps_preferences() {
        let mut s = scheduler_with(&["A", "B"]);
        s.run();
        assert!(s.schedule().assignment_count() > 0);
        s.reset();
        assert_eq!(s.schedule().assignment_count(), 0);
        assert_eq!(s.workload().shifts(&EmployeeId::new("A")), 0);
        assert_eq!(s.employees().count(), 2);
    }

    #[test]
    fn unknown_employee_lookup_fails() {
        let s = scheduler_with(&["A"]);
        assert!(s.preferences_of(&EmployeeId::new("A")).is_ok());
        assert!(matches!(
            s.preferences_of(&EmployeeId::new("Z")),
            Err(SchedError::UnknownEmployee(name)) if name == "Z"
        ));
    }
}
