use super::PersistenceResult;
use crate::sprint::SprintSection;
use crate::table::SprintTable;
use serde::Serialize;
use std::fs::File;
use std::path::Path;

pub fn save_table_to_json<P: AsRef<Path>>(table: &SprintTable, path: P) -> PersistenceResult<()> {
    table.validate()?;
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, table)?;
    Ok(())
}

pub fn load_table_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<SprintTable> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let table: SprintTable = serde_json::from_reader(file)?;
    table.validate()?;
    tracing::debug!(path = %path.display(), sprints = table.len(), "loaded sprint table");
    Ok(table)
}

#[derive(Serialize)]
struct DayCsvRecord<'a> {
    sprint: &'a str,
    month_label: &'a str,
    week_index: u32,
    column: usize,
    year: i32,
    month: u32,
    day: u32,
    classification: &'static str,
}

/// Flatten generated sections into one CSV row per day cell.
pub fn save_days_to_csv<P: AsRef<Path>>(
    sections: &[SprintSection],
    path: P,
) -> PersistenceResult<()> {
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    for section in sections {
        let month_label = section.month_label.as_deref().unwrap_or_default();
        for week in &section.weeks {
            for (column, cell) in week.iter().enumerate() {
                writer.serialize(DayCsvRecord {
                    sprint: &section.id,
                    month_label,
                    week_index: cell.week_index,
                    column,
                    year: cell.year,
                    month: cell.month,
                    day: cell.day,
                    classification: cell.classification.as_str(),
                })?;
            }
        }
    }
    writer.flush()?;
    Ok(())
}
