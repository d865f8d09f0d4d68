use crate::model::{Day, EmployeeId, Shift};
use std::fmt;
use thiserror::Error;

/// Politique des compteurs lors de la résolution des conflits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CounterPolicy {
    /// Les compteurs ne sont pas touchés par la résolution (comportement historique) :
    /// ils peuvent sous- ou sur-estimer les affectations réelles.
    #[default]
    Frozen,
    /// Un employé retiré sans poste de repli est décompté (jours et postes).
    /// Un employé déplacé garde ses compteurs : il travaille toujours ce jour-là.
    Reconciled,
}

/// Options d'allocation
#[derive(Debug, Clone, Copy)]
pub struct AssignOptions {
    pub max_workdays: u32,
    pub staff_per_shift: usize,
    pub counter_policy: CounterPolicy,
}

impl Default for AssignOptions {
    fn default() -> Self {
        Self {
            max_workdays: 5,
            staff_per_shift: 2,
            counter_policy: CounterPolicy::Frozen,
        }
    }
}

/// Poste sous l'effectif cible dans le planning courant, recalculé à chaque passe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageWarning {
    pub day: Day,
    pub shift: Shift,
    pub assigned: usize,
    pub required: usize,
}

/// Employé en excès qu'aucun autre poste du jour n'a pu accueillir.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedAssignmentWarning {
    pub day: Day,
    pub shift: Shift,
    pub employee: EmployeeId,
}

/// Avertissements non bloquants collectés pendant le calcul.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    Coverage(CoverageWarning),
    DroppedAssignment(DroppedAssignmentWarning),
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::Coverage(w) => write!(
                f,
                "under-coverage: {} {} has {}/{} employee(s)",
                w.day, w.shift, w.assigned, w.required
            ),
            Warning::DroppedAssignment(w) => write!(
                f,
                "dropped: {} removed from {} {} with no free shift that day",
                w.employee, w.day, w.shift
            ),
        }
    }
}

/// Erreurs de validation des préférences.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("unknown day: {0}")]
    UnknownDay(String),
    #[error("unknown shift: {0}")]
    UnknownShift(String),
    #[error("ranking must list exactly 3 shifts, got {len}")]
    IncompleteRanking { len: usize },
    #[error("shift listed twice in ranking: {shift}")]
    DuplicateShift { shift: Shift },
    #[error("day listed twice: {day}")]
    DuplicateDay { day: Day },
    #[error("employee identifier cannot be empty")]
    EmptyEmployeeId,
    #[error("invalid preferences for {employee} on {day}: {source}")]
    InvalidPreferences {
        employee: String,
        day: String,
        #[source]
        source: Box<ValidationError>,
    },
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("unknown employee: {0}")]
    UnknownEmployee(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
