use crate::model::Schedule;
use crate::scheduler::Scheduler;
use anyhow::{bail, Context};
use csv::{ReaderBuilder, WriterBuilder};
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

type RawTable = Vec<(String, Vec<String>)>;

/// Import JSON : `{ "employé": { "Monday": ["morning", "afternoon", "evening"], ... }, ... }`.
///
/// L'ordre des employés dans le fichier est conservé. Retourne le nombre d'employés enregistrés.
pub fn import_preferences_json<P: AsRef<Path>>(
    path: P,
    scheduler: &mut Scheduler,
) -> anyhow::Result<usize> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let root: Value = serde_json::from_slice(&data)
        .with_context(|| format!("parsing {}", path.display()))?;
    let Value::Object(employees) = root else {
        bail!("expected a JSON object keyed by employee");
    };

    for (name, days) in &employees {
        let Value::Object(days) = days else {
            bail!("preferences of {name} must be an object keyed by day");
        };
        let mut table = RawTable::new();
        for (day, shifts) in days {
            let shifts: Vec<String> = serde_json::from_value(shifts.clone())
                .with_context(|| format!("{name}/{day}: expected a list of shift names"))?;
            table.push((day.clone(), shifts));
        }
        scheduler.record_raw_preferences(name, table)?;
    }
    Ok(employees.len())
}

/// Import CSV : header `employee,day,first,second,third`, une ligne par employé et par jour.
pub fn import_preferences_csv<P: AsRef<Path>>(
    path: P,
    scheduler: &mut Scheduler,
) -> anyhow::Result<usize> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;
    let mut grouped: Vec<(String, RawTable)> = Vec::new();
    for (line, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let employee = rec.get(0).context("missing employee")?;
        let day = rec.get(1).context("missing day")?;
        if employee.is_empty() || day.is_empty() {
            bail!("invalid preference row {} (empty)", line + 2);
        }
        let shifts: Vec<String> = rec.iter().skip(2).map(str::to_string).collect();
        match grouped.iter_mut().find(|(name, _)| name == employee) {
            Some((_, table)) => table.push((day.to_string(), shifts)),
            None => grouped.push((employee.to_string(), vec![(day.to_string(), shifts)])),
        }
    }

    let count = grouped.len();
    for (employee, table) in grouped {
        scheduler.record_raw_preferences(&employee, table)?;
    }
    Ok(count)
}

/// Export JSON du planning, écrit de manière atomique.
pub fn export_schedule_json<P: AsRef<Path>>(path: P, schedule: &Schedule) -> anyhow::Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_vec_pretty(schedule)?;
    let mut tmp = NamedTempFile::new_in(
        path.parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new(".")),
    )
    .with_context(|| "creating temp file")?;
    tmp.write_all(&json)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).with_context(|| "atomic rename")?;
    Ok(())
}

/// Export CSV : header `day,shift,position,employee` (position 1-based, ordre d'affectation).
pub fn export_schedule_csv<P: AsRef<Path>>(path: P, schedule: &Schedule) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["day", "shift", "position", "employee"])?;
    for (day, roster) in schedule.iter() {
        for (shift, employees) in roster.iter() {
            for (idx, employee) in employees.iter().enumerate() {
                let position = (idx + 1).to_string();
                w.write_record([day.name(), shift.name(), position.as_str(), employee.as_str()])?;
            }
        }
    }
    w.flush()?;
    Ok(())
}
