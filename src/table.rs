use crate::holiday::HolidayTable;
use crate::persistence::{PersistenceError, PersistenceResult};
use crate::sprint::{DEFAULT_YEAR, SprintSection, SprintSpec};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const H1_2026_JSON: &str = include_str!("../data/sprints_2026_h1.json");

fn default_year() -> i32 {
    DEFAULT_YEAR
}

/// Ordered, immutable list of sprint records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SprintTable {
    #[serde(default = "default_year")]
    default_year: i32,
    sprints: Vec<SprintSpec>,
}

impl SprintTable {
    pub fn new(default_year: i32, sprints: Vec<SprintSpec>) -> PersistenceResult<Self> {
        let table = Self {
            default_year,
            sprints,
        };
        table.validate()?;
        Ok(table)
    }

    /// The 2026 H1 delivery schedule compiled into the crate.
    pub fn h1_2026() -> PersistenceResult<Self> {
        Self::from_json_str(H1_2026_JSON)
    }

    pub fn from_json_str(json: &str) -> PersistenceResult<Self> {
        let table: SprintTable = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    pub fn default_year(&self) -> i32 {
        self.default_year
    }

    pub fn sprints(&self) -> &[SprintSpec] {
        &self.sprints
    }

    pub fn ids(&self) -> Vec<&str> {
        self.sprints.iter().map(|s| s.id.as_str()).collect()
    }

    pub fn get(&self, id: &str) -> Option<&SprintSpec> {
        self.sprints.iter().find(|s| s.id.eq_ignore_ascii_case(id))
    }

    pub fn len(&self) -> usize {
        self.sprints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprints.is_empty()
    }

    /// Run every record through the generator, in table order.
    pub fn generate(&self, holidays: &HolidayTable) -> Vec<SprintSection> {
        self.sprints
            .iter()
            .map(|spec| spec.generate(holidays, self.default_year))
            .collect()
    }

    pub fn generate_one(&self, id: &str, holidays: &HolidayTable) -> Option<SprintSection> {
        self.get(id)
            .map(|spec| spec.generate(holidays, self.default_year))
    }

    /// Structural checks for tables loaded from disk. Calendar consistency
    /// between day numbers and months is intentionally not checked.
    pub fn validate(&self) -> PersistenceResult<()> {
        let mut seen = HashSet::new();
        for spec in &self.sprints {
            if spec.id.trim().is_empty() {
                return Err(PersistenceError::InvalidData(
                    "sprint id must not be empty".into(),
                ));
            }
            if !seen.insert(spec.id.to_ascii_uppercase()) {
                return Err(PersistenceError::InvalidData(format!(
                    "duplicate sprint id '{}'",
                    spec.id
                )));
            }
            if !(1..=12).contains(&spec.month) {
                return Err(PersistenceError::InvalidData(format!(
                    "sprint {} has invalid month {}",
                    spec.id, spec.month
                )));
            }
            if spec.days.is_empty() {
                return Err(PersistenceError::InvalidData(format!(
                    "sprint {} has no weeks",
                    spec.id
                )));
            }
            let last_week = u32::try_from(spec.days.len() - 1)
                .ok()
                .and_then(|extra| spec.week_start.checked_add(extra));
            if last_week.is_none() {
                return Err(PersistenceError::InvalidData(format!(
                    "sprint {} week_start {} overflows the week index",
                    spec.id, spec.week_start
                )));
            }
            let out_of_range = spec
                .days
                .iter()
                .flatten()
                .chain(spec.overrides.keys())
                .find(|day| !(1..=31).contains(*day));
            if let Some(day) = out_of_range {
                return Err(PersistenceError::InvalidData(format!(
                    "sprint {} has invalid day-of-month {}",
                    spec.id, day
                )));
            }
        }
        Ok(())
    }
}
