use crate::day::{CalendarDay, DayClassification};
use crate::holiday::HolidayTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_YEAR: i32 = 2026;

pub type Week = [u32; 7];

/// Hand-authored description of one sprint, as stored in the sprint table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SprintSpec {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month_label: Option<String>,
    pub week_start: u32,
    pub month: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    pub days: Vec<Week>,
    #[serde(default)]
    pub overrides: BTreeMap<u32, DayClassification>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SprintSection {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month_label: Option<String>,
    pub weeks: Vec<[CalendarDay; 7]>,
}

impl SprintSpec {
    pub fn new(id: impl Into<String>, month_label: Option<&str>, week_start: u32, month: u32) -> Self {
        Self {
            id: id.into(),
            month_label: month_label.map(str::to_string),
            week_start,
            month,
            year: None,
            days: Vec::new(),
            overrides: BTreeMap::new(),
        }
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_week(mut self, week: Week) -> Self {
        self.days.push(week);
        self
    }

    pub fn with_override(mut self, day: u32, classification: DayClassification) -> Self {
        self.overrides.insert(day, classification);
        self
    }

    pub fn year_or(&self, default_year: i32) -> i32 {
        self.year.unwrap_or(default_year)
    }

    /// Build the section for this sprint, filling in `default_year` when
    /// the record does not name one.
    pub fn generate(&self, holidays: &HolidayTable, default_year: i32) -> SprintSection {
        generate_sprint(
            &self.id,
            self.month_label.as_deref(),
            self.week_start,
            &self.days,
            &self.overrides,
            self.month,
            self.year_or(default_year),
            holidays,
        )
    }
}

/// Classify every literal day of a sprint.
///
/// Column 5 and 6 start out as weekend, holidays beat that, and an entry
/// in `overrides` for the day-of-month beats everything. Overrides for
/// days that do not appear in `days` have no effect.
#[allow(clippy::too_many_arguments)]
pub fn generate_sprint(
    id: &str,
    month_label: Option<&str>,
    week_start: u32,
    days: &[Week],
    overrides: &BTreeMap<u32, DayClassification>,
    month: u32,
    year: i32,
    holidays: &HolidayTable,
) -> SprintSection {
    let weeks = days
        .iter()
        .enumerate()
        .map(|(w_idx, week)| {
            let week_index = week_start.saturating_add(w_idx as u32);
            let mut cells = [CalendarDay {
                day: 0,
                month,
                year,
                classification: DayClassification::Normal,
                week_index,
            }; 7];
            for (c_idx, &day) in week.iter().enumerate() {
                let mut classification = DayClassification::column_default(c_idx);
                if holidays.is_holiday(year, month, day) {
                    classification = DayClassification::Holiday;
                }
                if let Some(&forced) = overrides.get(&day) {
                    classification = forced;
                }
                cells[c_idx] = CalendarDay {
                    day,
                    month,
                    year,
                    classification,
                    week_index,
                };
            }
            cells
        })
        .collect();

    SprintSection {
        id: id.to_string(),
        month_label: month_label.map(str::to_string),
        weeks,
    }
}

impl SprintSection {
    pub fn week_indices(&self) -> Vec<u32> {
        self.weeks.iter().map(|week| week[0].week_index).collect()
    }

    pub fn days(&self) -> impl Iterator<Item = &CalendarDay> {
        self.weeks.iter().flat_map(|week| week.iter())
    }

    /// First cell carrying this day-of-month, in week order
    pub fn find_day(&self, day: u32) -> Option<&CalendarDay> {
        self.days().find(|cell| cell.day == day)
    }

    pub fn count(&self, classification: DayClassification) -> usize {
        self.days()
            .filter(|cell| cell.classification == classification)
            .count()
    }
}
