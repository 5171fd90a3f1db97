use chrono::NaiveDate;
use clap::Parser;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Instant;
use vop_calendar::render::text::{render_calendar, render_section};
use vop_calendar::{
    AppConfig, BackupFormat, DirectorySink, ExportIndicator, Exporter, HolidayTable, SprintTable,
    load_table_from_json, logging, save_days_to_csv, save_table_to_json,
};

#[derive(Parser)]
#[command(name = "cli", about = "Interactive VOP 2026 H1 sprint calendar")]
struct Args {
    /// JSON config file (falls back to VOP_CALENDAR_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

struct Session {
    table: SprintTable,
    holidays: HolidayTable,
    exporter: Exporter,
    indicator: ExportIndicator,
    host: String,
    output_dir: PathBuf,
}

impl Session {
    fn from_config(config: &AppConfig) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            table: config.load_sprint_table()?,
            holidays: config.holiday_table(),
            exporter: Exporter::new(config.backup.clone()),
            indicator: ExportIndicator::new(config.export_reset_delay()),
            host: config.display_host(),
            output_dir: config.output_dir.clone(),
        })
    }

    fn render_all(&self) -> String {
        render_calendar(&self.table.generate(&self.holidays))
    }
}

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  show [id]                          Show the whole calendar or one sprint\n  sprints                            List sprint ids and month labels\n  holiday <YYYY-MM-DD>               Check a date against the holiday table\n  holidays                           List all holidays\n  export <json|text> [dir]           Save a backup file (default: output_dir)\n  status                             Show the export indicator state\n  table load <json_path>             Load a sprint table from JSON\n  table save <json_path>             Save the current sprint table to JSON\n  table default                      Restore the built-in 2026 H1 table\n  save csv <path>                    Save every generated day as CSV\n  quit|exit                          Exit"
    );
}

fn print_sprints(table: &SprintTable) {
    for spec in table.sprints() {
        let last_week = spec.week_start + spec.days.len().saturating_sub(1) as u32;
        println!(
            "  {:<4} {:<18} weeks {}-{}",
            spec.id,
            spec.month_label.as_deref().unwrap_or("-"),
            spec.week_start,
            last_week
        );
    }
}

fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    let config = match AppConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(1);
        }
    };
    let mut session = match Session::from_config(&config) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Startup error: {}", e);
            std::process::exit(1);
        }
    };

    println!("VOP Calendar (CLI) - type 'help' for commands\n");
    println!("{}", session.render_all());

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        session.indicator.poll(Instant::now());

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "show" => match parts.next() {
                Some(id) => match session.table.generate_one(id, &session.holidays) {
                    Some(section) => println!("{}", render_section(&section)),
                    None => println!("Sprint {id} not found."),
                },
                None => println!("{}", session.render_all()),
            },
            "sprints" => print_sprints(&session.table),
            "holiday" => match parts.next() {
                Some(date_s) => match NaiveDate::parse_from_str(date_s, "%Y-%m-%d") {
                    Ok(date) if session.holidays.contains(date) => {
                        println!("{date} is a holiday.")
                    }
                    Ok(date) => println!("{date} is not a holiday."),
                    Err(_) => println!("Invalid date (YYYY-MM-DD)"),
                },
                None => println!("Usage: holiday <YYYY-MM-DD>"),
            },
            "holidays" => println!("Holidays: {}", session.holidays.keys().join(", ")),
            "export" => {
                let format = match parts.next().map(BackupFormat::from_str) {
                    Some(Ok(format)) => format,
                    Some(Err(e)) => {
                        println!("Error: {}", e);
                        continue;
                    }
                    None => {
                        println!("Usage: export <json|text> [dir]");
                        continue;
                    }
                };
                let dir = parts
                    .next()
                    .map(PathBuf::from)
                    .unwrap_or_else(|| session.output_dir.clone());
                let sink = DirectorySink::new(&dir);
                let sections = session.table.generate(&session.holidays);
                let outcome = session.exporter.export(
                    &mut session.indicator,
                    format,
                    &session.host,
                    &sections,
                    &sink,
                );
                match outcome.notice() {
                    Some(notice) => println!("Notice: {}", notice),
                    None => println!(
                        "Backup saved to {}.",
                        dir.join(&outcome.file.file_name).display()
                    ),
                }
                println!(
                    "Export state: {} (resets in {}s)",
                    session.indicator.state().as_str(),
                    outcome.ticket.delay().as_secs()
                );
            }
            "status" => println!("Export state: {}", session.indicator.state().as_str()),
            "table" => {
                let sub = parts.next();
                let path = parts.next().map(Path::new);
                match (sub, path) {
                    (Some("load"), Some(path)) => match load_table_from_json(path) {
                        Ok(table) => {
                            println!(
                                "Sprint table loaded from {} ({} sprints).",
                                path.display(),
                                table.len()
                            );
                            session.table = table;
                        }
                        Err(e) => println!("Error loading table: {}", e),
                    },
                    (Some("save"), Some(path)) => match save_table_to_json(&session.table, path) {
                        Ok(()) => println!("Sprint table saved to {}.", path.display()),
                        Err(e) => println!("Error saving table: {}", e),
                    },
                    (Some("default"), _) => match SprintTable::h1_2026() {
                        Ok(table) => {
                            session.table = table;
                            println!("Built-in sprint table restored.");
                        }
                        Err(e) => println!("Error: {}", e),
                    },
                    _ => println!("Usage: table <load|save> <json_path> | table default"),
                }
            }
            "save" => match (parts.next(), parts.next()) {
                (Some("csv"), Some(path)) => {
                    let sections = session.table.generate(&session.holidays);
                    match save_days_to_csv(&sections, path) {
                        Ok(()) => println!("Calendar days saved to {}.", path),
                        Err(e) => println!("Error saving days: {}", e),
                    }
                }
                _ => println!("Usage: save csv <path>"),
            },
            _ => println!("Unknown command. Type 'help'."),
        }
    }
}
