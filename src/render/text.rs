use super::CellStyle;
use crate::day::{CalendarDay, DayClassification};
use crate::sprint::SprintSection;

const TEXT_WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const CELL_WIDTH: usize = 6;
const WEEK_WIDTH: usize = 3;

pub const LEGEND: &str = "Legend: we=weekend  hol=holiday  BRD=BRD review  RPD=RPD review";

fn marker(classification: DayClassification) -> &'static str {
    match CellStyle::for_classification(classification).label {
        Some(label) => label,
        None => match classification {
            DayClassification::Weekend => "we",
            DayClassification::Holiday => "hol",
            _ => "",
        },
    }
}

pub fn cell_text(cell: &CalendarDay) -> String {
    let marker = marker(cell.classification);
    if marker.is_empty() {
        format!("{:>2}", cell.day)
    } else {
        format!("{:>2} {}", cell.day, marker)
    }
}

fn separator() -> String {
    let mut sep = String::new();
    sep.push('+');
    sep.push_str(&"-".repeat(WEEK_WIDTH + 2));
    sep.push('+');
    for _ in 0..7 {
        sep.push_str(&"-".repeat(CELL_WIDTH + 2));
        sep.push('+');
    }
    sep
}

fn push_row(out: &mut String, lead: &str, cells: &[String]) {
    out.push('|');
    out.push_str(&format!(" {:>width$} |", lead, width = WEEK_WIDTH));
    for cell in cells {
        out.push_str(&format!(" {:<width$} |", cell, width = CELL_WIDTH));
    }
    out.push('\n');
}

/// Grid for a single sprint: title line, weekday header, one row per week.
pub fn render_section(section: &SprintSection) -> String {
    let sep = separator();
    let mut out = String::new();

    out.push_str(&section.id);
    if let Some(label) = &section.month_label {
        out.push_str("  ");
        out.push_str(label);
    }
    out.push('\n');

    out.push_str(&sep);
    out.push('\n');
    let header: Vec<String> = TEXT_WEEKDAYS.iter().map(|w| w.to_string()).collect();
    push_row(&mut out, "Wk", &header);
    out.push_str(&sep);
    out.push('\n');

    for week in &section.weeks {
        let cells: Vec<String> = week.iter().map(cell_text).collect();
        push_row(&mut out, &week[0].week_index.to_string(), &cells);
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

pub fn render_calendar(sections: &[SprintSection]) -> String {
    let mut out = String::new();
    out.push_str(LEGEND);
    out.push_str("\n\n");
    for section in sections {
        out.push_str(&render_section(section));
        out.push('\n');
    }
    out
}
