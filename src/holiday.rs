use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Public holidays observed by the delivery team in 2026.
const HOLIDAYS_2026: [(i32, u32, u32); 19] = [
    (2026, 1, 1),
    (2026, 2, 16),
    (2026, 2, 17),
    (2026, 2, 18),
    (2026, 2, 19),
    (2026, 2, 20),
    (2026, 2, 21),
    (2026, 2, 22),
    (2026, 4, 4),
    (2026, 4, 5),
    (2026, 4, 6),
    (2026, 5, 1),
    (2026, 5, 2),
    (2026, 5, 3),
    (2026, 5, 4),
    (2026, 5, 5),
    (2026, 6, 19),
    (2026, 6, 20),
    (2026, 6, 21),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolidayTable {
    holidays: HashSet<NaiveDate>,
}

impl Default for HolidayTable {
    fn default() -> Self {
        Self::from_dates(
            HOLIDAYS_2026
                .iter()
                .filter_map(|&(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
        )
    }
}

impl HolidayTable {
    /// Create an empty table
    pub fn empty() -> Self {
        Self {
            holidays: HashSet::new(),
        }
    }

    pub fn from_dates<I>(dates: I) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        Self {
            holidays: dates.into_iter().collect(),
        }
    }

    /// Add a single holiday
    pub fn add_holiday(&mut self, date: NaiveDate) {
        self.holidays.insert(date);
    }

    /// Check a literal (year, month, day) triple against the table.
    ///
    /// Triples that do not form a real calendar date (day 0, Feb 31,
    /// month 13) never match.
    pub fn is_holiday(&self, year: i32, month: u32, day: u32) -> bool {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(|date| self.contains(date))
            .unwrap_or(false)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }

    /// All holidays in ascending order
    pub fn dates(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self.holidays.iter().copied().collect();
        dates.sort();
        dates
    }

    /// Canonical `YYYY-MM-DD` keys, ascending
    pub fn keys(&self) -> Vec<String> {
        self.dates()
            .into_iter()
            .map(|d| date_key(d.year(), d.month(), d.day()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.holidays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }
}

/// Canonical `YYYY-MM-DD` key for a literal triple, zero padded the same
/// way holiday dates are written.
pub fn date_key(year: i32, month: u32, day: u32) -> String {
    format!("{year:04}-{month:02}-{day:02}")
}
