use vop_calendar::render::text::{cell_text, render_calendar, render_section};
use vop_calendar::render::{CellStyle, NEUTRAL_ACCENT, sprint_accent};
use vop_calendar::{CalendarDay, DayClassification, HolidayTable, SprintTable};

fn cell(day: u32, classification: DayClassification) -> CalendarDay {
    CalendarDay {
        day,
        month: 1,
        year: 2026,
        classification,
        week_index: 1,
    }
}

#[test]
fn milestone_cells_are_bold_with_labels() {
    let brd = CellStyle::for_classification(DayClassification::MilestoneBrd);
    assert_eq!(brd.label, Some("BRD"));
    assert!(brd.bold);
    assert!(brd.shadow.is_some());

    let rpd = CellStyle::for_classification(DayClassification::MilestoneRpd);
    assert_eq!(rpd.label, Some("RPD"));
    assert_ne!(rpd.background, brd.background);
}

#[test]
fn holiday_keeps_default_background_with_alert_text() {
    let normal = CellStyle::for_classification(DayClassification::Normal);
    let holiday = CellStyle::for_classification(DayClassification::Holiday);
    assert_eq!(holiday.background, normal.background);
    assert_ne!(holiday.text, normal.text);
    assert_eq!(holiday.label, None);
}

#[test]
fn weekend_is_muted_only() {
    let normal = CellStyle::for_classification(DayClassification::Normal);
    let weekend = CellStyle::for_classification(DayClassification::Weekend);
    assert_ne!(weekend.background, normal.background);
    assert_eq!(weekend.text, normal.text);
    assert!(!weekend.bold);
}

#[test]
fn accents_are_mapped_with_neutral_fallback() {
    assert_eq!(sprint_accent("S1"), "#10b981");
    assert_eq!(sprint_accent("PRE"), "#9ca3af");
    assert_eq!(sprint_accent("S14"), NEUTRAL_ACCENT);
    assert_eq!(sprint_accent(""), NEUTRAL_ACCENT);
}

#[test]
fn cell_text_marks_each_classification() {
    assert_eq!(cell_text(&cell(5, DayClassification::Normal)), " 5");
    assert_eq!(cell_text(&cell(17, DayClassification::Weekend)), "17 we");
    assert_eq!(cell_text(&cell(1, DayClassification::Holiday)), " 1 hol");
    assert_eq!(cell_text(&cell(16, DayClassification::MilestoneBrd)), "16 BRD");
    assert_eq!(cell_text(&cell(23, DayClassification::MilestoneRpd)), "23 RPD");
}

#[test]
fn section_grid_has_week_rows_and_label() {
    let table = SprintTable::h1_2026().unwrap();
    let section = table.generate_one("S1", &HolidayTable::default()).unwrap();
    let grid = render_section(&section);

    let mut lines = grid.lines();
    assert_eq!(lines.next(), Some("S1  2026.01"));
    assert!(grid.contains("| Mon    |"));
    assert!(grid.contains("|   3 | 12     | 13     | 14     | 15     | 16 BRD | 17 we  | 18 we  |"));
    assert!(grid.contains("|   4 |"));
    assert!(grid.contains("23 RPD"));
}

#[test]
fn calendar_lists_every_sprint_after_legend() {
    let table = SprintTable::h1_2026().unwrap();
    let out = render_calendar(&table.generate(&HolidayTable::default()));
    assert!(out.starts_with("Legend:"));
    for id in table.ids() {
        assert!(out.lines().any(|line| line.split_whitespace().next() == Some(id)));
    }
}
