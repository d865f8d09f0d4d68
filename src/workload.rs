use crate::model::EmployeeId;
use std::collections::HashMap;

/// Compteurs courants par employé sur la semaine.
///
/// `workdays` est incrémenté à chaque affectation, pas une fois par jour distinct :
/// un employé sur deux postes le même jour compte deux jours.
#[derive(Debug, Clone, Default)]
pub struct WorkloadTracker {
    workdays: HashMap<EmployeeId, u32>,
    shifts: HashMap<EmployeeId, u32>,
}

impl WorkloadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn workdays(&self, employee: &EmployeeId) -> u32 {
        self.workdays.get(employee).copied().unwrap_or(0)
    }

    pub fn shifts(&self, employee: &EmployeeId) -> u32 {
        self.shifts.get(employee).copied().unwrap_or(0)
    }

    /// Sous le plafond de jours travaillés ?
    pub fn under_cap(&self, employee: &EmployeeId, max_workdays: u32) -> bool {
        self.workdays(employee) < max_workdays
    }

    pub(crate) fn record_assignment(&mut self, employee: &EmployeeId) {
        *self.workdays.entry(employee.clone()).or_default() += 1;
        *self.shifts.entry(employee.clone()).or_default() += 1;
    }

    pub(crate) fn revert_assignment(&mut self, employee: &EmployeeId) {
        for counter in [&mut self.workdays, &mut self.shifts] {
            if let Some(n) = counter.get_mut(employee) {
                *n = n.saturating_sub(1);
            }
        }
    }

    pub fn clear(&mut self) {
        self.workdays.clear();
        self.shifts.clear();
    }
}
