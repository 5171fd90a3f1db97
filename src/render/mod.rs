use crate::day::DayClassification;

#[cfg(feature = "http_api")]
pub mod html;
pub mod text;

/// Column headers, Monday first.
pub const WEEKDAYS: [&str; 7] = ["一", "二", "三", "四", "五", "六", "日"];

pub const NEUTRAL_ACCENT: &str = "#94a3b8";

const DEFAULT_BACKGROUND: &str = "#ffffff";
const MUTED_BACKGROUND: &str = "#f8fafc";
const DEFAULT_TEXT: &str = "#475569";
const ALERT_TEXT: &str = "#f43f5e";
const INVERSE_TEXT: &str = "#ffffff";
const BRD_ACCENT: &str = "#f43f5e";
const RPD_ACCENT: &str = "#6366f1";

/// Accent color for a sprint id; unknown ids get the neutral slate.
pub fn sprint_accent(id: &str) -> &'static str {
    match id {
        "PRE" => "#9ca3af",
        "S1" => "#10b981",
        "S2" => "#0ea5e9",
        "S3" => "#6366f1",
        "S4" => "#fb923c",
        "S5" => "#f43f5e",
        "S6" => "#a855f7",
        "S7" => "#14b8a6",
        "S8" => "#3b82f6",
        "S9" => "#8b5cf6",
        "S10" => "#f59e0b",
        "S11" => "#ec4899",
        "S12" => "#06b6d4",
        "S13" => "#84cc16",
        _ => NEUTRAL_ACCENT,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub background: &'static str,
    pub text: &'static str,
    pub bold: bool,
    pub shadow: Option<&'static str>,
    pub label: Option<&'static str>,
}

impl CellStyle {
    /// Visual rule for one classification. Milestones never pick up the
    /// holiday or weekend look.
    pub fn for_classification(classification: DayClassification) -> Self {
        let plain = CellStyle {
            background: DEFAULT_BACKGROUND,
            text: DEFAULT_TEXT,
            bold: false,
            shadow: None,
            label: None,
        };
        match classification {
            DayClassification::Normal => plain,
            DayClassification::Weekend => CellStyle {
                background: MUTED_BACKGROUND,
                ..plain
            },
            DayClassification::Holiday => CellStyle {
                text: ALERT_TEXT,
                ..plain
            },
            DayClassification::MilestoneBrd => CellStyle {
                background: BRD_ACCENT,
                text: INVERSE_TEXT,
                bold: true,
                shadow: Some("0 4px 6px -1px rgba(244, 63, 94, 0.35)"),
                label: Some("BRD"),
            },
            DayClassification::MilestoneRpd => CellStyle {
                background: RPD_ACCENT,
                text: INVERSE_TEXT,
                bold: true,
                shadow: Some("0 4px 6px -1px rgba(99, 102, 241, 0.35)"),
                label: Some("RPD"),
            },
        }
    }
}
