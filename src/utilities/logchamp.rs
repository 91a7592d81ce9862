use std::env;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::sync::Mutex;

use colored::{Color, Colorize};
use log::{Level, LevelFilter, Log, Metadata, Record};
use time::macros;

const DEFAULT_LOG_FILE: &str = ".log";

struct Logger {
    file: Option<Mutex<BufWriter<File>>>,
}

impl Logger {
    fn new(filename: &str) -> Self {
        log::set_max_level(LevelFilter::Debug);
        let file = match File::create(filename) {
            Ok(file) => Some(Mutex::new(BufWriter::new(file))),
            Err(err) => {
                eprintln!("cannot open log file {filename:?}: {err}");
                None
            }
        };

        Self { file }
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        match metadata.target().split("::").next() {
            Some("a4_collage") => true,
            _ => metadata.level() <= Level::Info,
        }
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let timestamp = time::OffsetDateTime::now_utc()
            .format(macros::format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"))
            .unwrap_or_default();
        let target = record.target();
        let level = record.level().as_str();
        let args = record.args();

        let color = match record.level() {
            Level::Error => Color::BrightRed,
            Level::Warn => Color::BrightYellow,
            Level::Info => Color::BrightCyan,
            Level::Debug => Color::Magenta,
            Level::Trace => Color::Green,
        };

        // stdout belongs to the shell replies
        eprintln!("{} {} {args}", timestamp.color(Color::BrightBlack), level.color(color));
        if let Some(file) = &self.file {
            writeln!(file.lock().unwrap(), "{timestamp} [{target} {level}] {args}").ok();
        }
    }

    fn flush(&self) {
        if let Some(file) = &self.file {
            file.lock().unwrap().flush().ok();
        }
    }
}

/// Installs the logger. Records go to stderr and to the file named by `COLLAGE_LOG_FILE`.
pub fn init() {
    let filename = env::var("COLLAGE_LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.into());
    if log::set_boxed_logger(Box::new(Logger::new(&filename))).is_err() {
        eprintln!("logger already initialized");
    }
}
