use super::{util, Scheduler};
use crate::model::{Day, EmployeeId, Schedule, Shift};
use crate::workload::WorkloadTracker;
use tracing::{debug, info, warn};

pub(super) fn assign_shifts(scheduler: &mut Scheduler) {
    let Scheduler {
        store,
        tracker,
        schedule,
        warnings,
        opts,
        passes,
    } = scheduler;

    if *passes > 0 {
        warn!(
            passes = *passes,
            "assign_shifts called again without reset: counters and schedule keep accumulating"
        );
    }
    *passes += 1;

    let staff = opts.staff_per_shift;
    let cap = opts.max_workdays;
    let employees: Vec<&EmployeeId> = store.employees().collect();

    for day in Day::ALL {
        let mut unassigned: Vec<&EmployeeId> = employees.clone();

        for shift in Shift::ALL {
            let mut eligible: Vec<&EmployeeId> = unassigned
                .iter()
                .copied()
                .filter(|e| tracker.under_cap(e, cap))
                .filter(|e| store.get(e).and_then(|p| p.rank_of(day, shift)).is_some())
                .collect();

            let chosen: Vec<&EmployeeId> = if eligible.len() >= staff {
                util::sort_by_load_then_rank(&mut eligible, tracker, store, day, shift);
                eligible.truncate(staff);
                eligible
            } else {
                let mut fallback: Vec<&EmployeeId> = unassigned
                    .iter()
                    .copied()
                    .filter(|e| tracker.under_cap(e, cap) && !eligible.contains(e))
                    .collect();
                util::sort_by_load(&mut fallback, tracker);
                let missing = staff - eligible.len();
                eligible.extend(fallback.into_iter().take(missing));
                eligible
            };

            for employee in chosen {
                if let Some(pos) = unassigned.iter().position(|e| *e == employee) {
                    unassigned.remove(pos);
                    commit(schedule, tracker, day, shift, employee);
                }
            }

            // Couverture minimale : un employé déjà placé aujourd'hui reste dans `unassigned`
            // et peut donc prendre un second poste plus tard dans la journée.
            let filled = schedule.get(day, shift).len();
            if filled < staff {
                let mut extra: Vec<&EmployeeId> = employees
                    .iter()
                    .copied()
                    .filter(|e| tracker.under_cap(e, cap) && !schedule.day(day).works(e))
                    .collect();
                util::sort_by_load(&mut extra, tracker);
                for employee in extra.into_iter().take(staff - filled) {
                    commit(schedule, tracker, day, shift, employee);
                }
            }
        }
    }

    util::refresh_coverage(schedule, warnings, staff);

    info!(
        employees = employees.len(),
        assignments = schedule.assignment_count(),
        "allocation pass done"
    );
}

fn commit(
    schedule: &mut Schedule,
    tracker: &mut WorkloadTracker,
    day: Day,
    shift: Shift,
    employee: &EmployeeId,
) {
    debug!(%day, %shift, %employee, "assigned");
    schedule.day_mut(day).get_mut(shift).push(employee.clone());
    tracker.record_assignment(employee);
}
