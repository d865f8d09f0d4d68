use super::{util, CounterPolicy, DroppedAssignmentWarning, Scheduler, Warning};
use crate::model::{Day, Shift};
use tracing::{debug, info, warn};

/// Plafonne chaque poste à `staff_per_shift` et replace l'excédent sur un autre poste du jour.
///
/// Ni les compteurs ni le plafond de jours ne sont revérifiés pour l'employé déplacé,
/// sauf décompte d'un employé retiré en `CounterPolicy::Reconciled`.
pub(super) fn resolve_conflicts(scheduler: &mut Scheduler) {
    let Scheduler {
        tracker,
        schedule,
        warnings,
        opts,
        ..
    } = scheduler;

    let capacity = opts.staff_per_shift;
    let (mut moved, mut dropped) = (0usize, 0usize);

    for day in Day::ALL {
        for shift in Shift::ALL {
            let list = schedule.day_mut(day).get_mut(shift);
            if list.len() <= capacity {
                continue;
            }
            let excess = list.split_off(capacity);

            for employee in excess {
                let roster = schedule.day(day);
                match util::first_open_shift(|s| roster.get(s).len(), shift, capacity) {
                    Some(alt) => {
                        debug!(%day, from = %shift, to = %alt, %employee, "moved");
                        schedule.day_mut(day).get_mut(alt).push(employee);
                        moved += 1;
                    }
                    None => {
                        warn!(%day, %shift, %employee, "no free shift left, assignment dropped");
                        if opts.counter_policy == CounterPolicy::Reconciled {
                            tracker.revert_assignment(&employee);
                        }
                        warnings.push(Warning::DroppedAssignment(DroppedAssignmentWarning {
                            day,
                            shift,
                            employee,
                        }));
                        dropped += 1;
                    }
                }
            }
        }
    }

    util::refresh_coverage(schedule, warnings, capacity);
    info!(moved, dropped, "conflict resolution done");
}
