use super::{CoverageWarning, Warning};
use crate::model::{Day, EmployeeId, Schedule, Shift};
use crate::preferences::PreferenceStore;
use crate::workload::WorkloadTracker;
use tracing::warn;

/// Tri stable par (postes déjà attribués, rang de préférence pour ce poste).
pub(super) fn sort_by_load_then_rank(
    pool: &mut [&EmployeeId],
    tracker: &WorkloadTracker,
    store: &PreferenceStore,
    day: Day,
    shift: Shift,
) {
    pool.sort_by_key(|e| {
        let rank = store
            .get(e)
            .and_then(|p| p.rank_of(day, shift))
            .unwrap_or(Shift::ALL.len());
        (tracker.shifts(e), rank)
    });
}

/// Tri stable par postes déjà attribués uniquement (préférences ignorées).
pub(super) fn sort_by_load(pool: &mut [&EmployeeId], tracker: &WorkloadTracker) {
    pool.sort_by_key(|e| tracker.shifts(e));
}

/// Premier autre poste du jour, dans l'ordre fixe, ayant encore de la place.
pub(super) fn first_open_shift(
    lens: impl Fn(Shift) -> usize,
    skip: Shift,
    capacity: usize,
) -> Option<Shift> {
    Shift::ALL
        .into_iter()
        .filter(|s| *s != skip)
        .find(|s| lens(*s) < capacity)
}

/// Remplace les avertissements de couverture par ceux du planning courant :
/// au plus une entrée par (jour, poste), dans l'ordre de la semaine.
pub(super) fn refresh_coverage(schedule: &Schedule, warnings: &mut Vec<Warning>, required: usize) {
    warnings.retain(|w| !matches!(w, Warning::Coverage(_)));
    for (day, roster) in schedule.iter() {
        for (shift, employees) in roster.iter() {
            let assigned = employees.len();
            if assigned < required {
                warn!(%day, %shift, assigned, required, "shift under-covered");
                warnings.push(Warning::Coverage(CoverageWarning {
                    day,
                    shift,
                    assigned,
                    required,
                }));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ShiftRanking, WeeklyPreferences};

    #[test]
    fn load_wins_over_preference_and_ties_keep_input_order() {
        let mut store = PreferenceStore::new();
        let morning_first = WeeklyPreferences::uniform(ShiftRanking::default());
        let morning_last = WeeklyPreferences::uniform(
            ShiftRanking::new(&[Shift::Evening, Shift::Afternoon, Shift::Morning]).unwrap(),
        );
        let (a, b, c, d) = (
            EmployeeId::new("A"),
            EmployeeId::new("B"),
            EmployeeId::new("C"),
            EmployeeId::new("D"),
        );
        store.record(a.clone(), morning_last.clone());
        store.record(b.clone(), morning_first.clone());
        store.record(c.clone(), morning_first);
        store.record(d.clone(), morning_last);

        let mut tracker = WorkloadTracker::new();
        tracker.record_assignment(&b);

        let mut pool = vec![&a, &b, &c, &d];
        sort_by_load_then_rank(&mut pool, &tracker, &store, Day::Monday, Shift::Morning);
        assert_eq!(pool, [&c, &a, &d, &b]);

        let mut pool = vec![&b, &d, &a];
        sort_by_load(&mut pool, &tracker);
        assert_eq!(pool, [&d, &a, &b]);
    }

    #[test]
    fn coverage_is_recomputed_not_accumulated() {
        let mut schedule = Schedule::new();
        for day in Day::ALL {
            for shift in Shift::ALL {
                schedule
                    .day_mut(day)
                    .get_mut(shift)
                    .extend([EmployeeId::new("A"), EmployeeId::new("B")]);
            }
        }
        schedule.day_mut(Day::Monday).get_mut(Shift::Evening).clear();

        let mut warnings = Vec::new();
        refresh_coverage(&schedule, &mut warnings, 2);
        refresh_coverage(&schedule, &mut warnings, 2);
        assert_eq!(
            warnings,
            [Warning::Coverage(CoverageWarning {
                day: Day::Monday,
                shift: Shift::Evening,
                assigned: 0,
                required: 2,
            })]
        );

        schedule
            .day_mut(Day::Monday)
            .get_mut(Shift::Evening)
            .extend([EmployeeId::new("C"), EmployeeId::new("D")]);
        refresh_coverage(&schedule, &mut warnings, 2);
        assert!(warnings.is_empty());
    }

    #[test]
    fn open_shift_skips_the_trimmed_one() {
        let lens = |s: Shift| match s {
            Shift::Morning => 1,
            Shift::Afternoon => 3,
            Shift::Evening => 0,
        };
        assert_eq!(first_open_shift(lens, Shift::Afternoon, 2), Some(Shift::Morning));
        assert_eq!(first_open_shift(lens, Shift::Morning, 2), Some(Shift::Evening));
        assert_eq!(first_open_shift(|_| 2, Shift::Morning, 2), None);
    }
}
