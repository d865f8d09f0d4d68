use crate::model::{Schedule, Shift};
use crate::scheduler::Warning;

/// Permet de customiser le rendu du planning (texte, tableau, etc.).
pub trait ScheduleRenderer {
    fn render(&self, schedule: &Schedule) -> String;
}

/// Rendu texte : un bloc par jour, un poste par ligne, séparateur de 30 tirets.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextRenderer;

impl ScheduleRenderer for TextRenderer {
    fn render(&self, schedule: &Schedule) -> String {
        let separator = "-".repeat(30);
        let mut out = String::new();
        for (day, roster) in schedule.iter() {
            out.push_str(&format!("{day}:\n"));
            for shift in Shift::ALL {
                let names = roster
                    .get(shift)
                    .iter()
                    .map(|e| e.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                let names = if names.is_empty() {
                    "No employees assigned"
                } else {
                    names.as_str()
                };
                out.push_str(&format!("  {}: {names}\n", shift.label()));
            }
            out.push_str(&separator);
            out.push('\n');
        }
        out
    }
}

/// Une ligne par avertissement.
pub fn render_warnings(warnings: &[Warning]) -> String {
    warnings.iter().map(|w| format!("warning: {w}\n")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Day, EmployeeId};
    use crate::scheduler::CoverageWarning;

    #[test]
    fn empty_shift_shows_placeholder() {
        let mut schedule = Schedule::new();
        schedule
            .day_mut(Day::Monday)
            .get_mut(Shift::Evening)
            .extend([EmployeeId::new("Ana"), EmployeeId::new("Bo")]);

        let text = TextRenderer.render(&schedule);
        let monday: Vec<&str> = text.lines().take(5).collect();
        assert_eq!(
            monday,
            [
                "Monday:",
                "  Morning: No employees assigned",
                "  Afternoon: No employees assigned",
                "  Evening: Ana, Bo",
                "------------------------------",
            ]
        );
        assert_eq!(text.lines().count(), 7 * 5);
    }

    #[test]
    fn warnings_render_one_per_line() {
        let warnings = [Warning::Coverage(CoverageWarning {
            day: Day::Sunday,
            shift: Shift::Morning,
            assigned: 1,
            required: 2,
        })];
        assert_eq!(
            render_warnings(&warnings),
            "warning: under-coverage: Sunday morning has 1/2 employee(s)\n"
        );
    }
}
