pub mod config;
pub mod day;
pub mod export;
pub mod holiday;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod indicator;
pub mod logging;
pub mod persistence;
pub mod render;
pub mod sprint;
pub mod table;

pub use config::{AppConfig, ConfigError};
pub use day::{CalendarDay, DayClassification};
pub use export::{
    BackupFile, BackupFormat, BackupMetadata, BackupProfile, BackupSink, DirectorySink,
    ExportError, ExportOutcome, Exporter,
};
pub use holiday::HolidayTable;
pub use indicator::{ExportIndicator, ExportState, ResetTicket};
pub use persistence::{
    PersistenceError, load_table_from_json, save_days_to_csv, save_table_to_json,
};
pub use sprint::{SprintSection, SprintSpec, generate_sprint};
pub use table::SprintTable;
