#![forbid(unsafe_code)]
//! Roulement — moteur d'allocation hebdomadaire de postes.
//!
//! - Sept jours, trois postes par jour (matin, après-midi, soir), deux employés par poste.
//! - Sélection gloutonne : équité (postes déjà attribués) puis force de la préférence.
//! - Plafond de cinq jours travaillés, repli sans préférence, couverture minimale.
//! - Résolution des surnombres a posteriori ; avertissements collectés, jamais levés.

pub mod display;
#[cfg(feature = "serde")]
pub mod io;
pub mod model;
pub mod preferences;
pub mod scheduler;
pub mod workload;

pub use display::{render_warnings, ScheduleRenderer, TextRenderer};
pub use model::{Day, DayRoster, EmployeeId, Schedule, Shift, ShiftRanking, WeeklyPreferences};
pub use preferences::{sample_roster, PreferenceStore};
pub use scheduler::{
    AssignOptions, CounterPolicy, CoverageWarning, DroppedAssignmentWarning, SchedError,
    Scheduler, ValidationError, Warning,
};
pub use workload::WorkloadTracker;
