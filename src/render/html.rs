use super::{CellStyle, WEEKDAYS, sprint_accent};
use crate::day::CalendarDay;
use crate::indicator::ExportState;
use crate::sprint::SprintSection;
use askama::Template;
use std::time::Duration;

pub const TITLE: &str = "VOP 定制项目";
pub const SUBTITLE: &str = "26年 H1 交付版本日历";
pub const FOOTER: &str = "INTERNAL AGILITY TOOL V2.0";
pub const FOOTER_HINT: &str = "防止丢失：点击右下角按钮下载备份文件";
pub const EXPORT_IDLE_CAPTION: &str = "一键下载备份";
pub const EXPORT_DONE_CAPTION: &str = "已保存备份文件";
/// Shown by the page script when the browser cannot fetch or save the backup.
pub const DOWNLOAD_UNAVAILABLE_NOTICE: &str = "无法下载备份文件，日历本身不受影响。";

pub struct CellView {
    pub day: u32,
    pub background: &'static str,
    pub text: &'static str,
    pub weight: &'static str,
    pub shadow: &'static str,
    pub label: &'static str,
}

impl From<&CalendarDay> for CellView {
    fn from(cell: &CalendarDay) -> Self {
        let style = CellStyle::for_classification(cell.classification);
        Self {
            day: cell.day,
            background: style.background,
            text: style.text,
            weight: if style.bold { "700" } else { "600" },
            shadow: style.shadow.unwrap_or("none"),
            label: style.label.unwrap_or_default(),
        }
    }
}

pub struct WeekView {
    pub index: u32,
    pub cells: Vec<CellView>,
}

pub struct SectionView {
    pub id: String,
    pub month_label: String,
    pub accent: &'static str,
    pub weeks: Vec<WeekView>,
}

impl From<&SprintSection> for SectionView {
    fn from(section: &SprintSection) -> Self {
        Self {
            id: section.id.clone(),
            month_label: section.month_label.clone().unwrap_or_default(),
            accent: sprint_accent(&section.id),
            weeks: section
                .weeks
                .iter()
                .map(|week| WeekView {
                    index: week[0].week_index,
                    cells: week.iter().map(CellView::from).collect(),
                })
                .collect(),
        }
    }
}

#[derive(Template)]
#[template(path = "calendar.html")]
pub struct CalendarPage {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub footer: &'static str,
    pub footer_hint: &'static str,
    pub weekdays: [&'static str; 7],
    pub sections: Vec<SectionView>,
    pub host: String,
    pub exporting: bool,
    pub export_caption: &'static str,
    pub idle_caption: &'static str,
    pub done_caption: &'static str,
    pub reset_after_ms: u64,
    pub download_notice: &'static str,
}

impl CalendarPage {
    /// `reset_after` is how long the page script keeps the saved caption up
    /// after a click, matching the server-side indicator delay.
    pub fn new(
        sections: &[SprintSection],
        host: &str,
        state: ExportState,
        reset_after: Duration,
    ) -> Self {
        let exporting = state == ExportState::Exporting;
        Self {
            title: TITLE,
            subtitle: SUBTITLE,
            footer: FOOTER,
            footer_hint: FOOTER_HINT,
            weekdays: WEEKDAYS,
            sections: sections.iter().map(SectionView::from).collect(),
            host: host.to_string(),
            exporting,
            export_caption: if exporting {
                EXPORT_DONE_CAPTION
            } else {
                EXPORT_IDLE_CAPTION
            },
            idle_caption: EXPORT_IDLE_CAPTION,
            done_caption: EXPORT_DONE_CAPTION,
            reset_after_ms: reset_after.as_millis() as u64,
            download_notice: DOWNLOAD_UNAVAILABLE_NOTICE,
        }
    }
}

pub fn render_page(page: &CalendarPage) -> Result<String, askama::Error> {
    page.render()
}
