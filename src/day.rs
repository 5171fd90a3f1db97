use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Classification of a single calendar cell.
///
/// When several conditions apply the precedence is
/// override > holiday > weekend > normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayClassification {
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "weekend")]
    Weekend,
    #[serde(rename = "holiday")]
    Holiday,
    #[serde(rename = "brd")]
    MilestoneBrd,
    #[serde(rename = "rpd")]
    MilestoneRpd,
}

impl DayClassification {
    pub const ALL: [DayClassification; 5] = [
        DayClassification::Normal,
        DayClassification::Weekend,
        DayClassification::Holiday,
        DayClassification::MilestoneBrd,
        DayClassification::MilestoneRpd,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DayClassification::Normal => "normal",
            DayClassification::Weekend => "weekend",
            DayClassification::Holiday => "holiday",
            DayClassification::MilestoneBrd => "brd",
            DayClassification::MilestoneRpd => "rpd",
        }
    }

    pub fn is_milestone(&self) -> bool {
        matches!(
            self,
            DayClassification::MilestoneBrd | DayClassification::MilestoneRpd
        )
    }

    /// Classification a column gets before holidays and overrides apply.
    pub fn column_default(column: usize) -> Self {
        if column >= 5 {
            DayClassification::Weekend
        } else {
            DayClassification::Normal
        }
    }
}

impl fmt::Display for DayClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownClassification(pub String);

impl fmt::Display for UnknownClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown day classification '{}'", self.0)
    }
}

impl std::error::Error for UnknownClassification {}

impl FromStr for DayClassification {
    type Err = UnknownClassification;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        DayClassification::ALL
            .into_iter()
            .find(|c| c.as_str() == key)
            .ok_or(UnknownClassification(s.to_string()))
    }
}

/// One generated day cell.
///
/// `day`, `month` and `year` are carried exactly as authored; a day that
/// belongs to the adjacent month keeps the section's month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub day: u32,
    pub month: u32,
    pub year: i32,
    pub classification: DayClassification,
    pub week_index: u32,
}
