use std::sync::OnceLock;
use chrono::Local;

static LOGGER: OnceLock<Logger> = OnceLock::new();

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
}

pub struct Logger {
    prefix: Option<String>,
    min_level: LogLevel,
}

impl Logger {
    fn new(prefix: Option<String>, verbose: bool) -> Self {
        let min_level = if verbose { LogLevel::Debug } else { LogLevel::Info };
        Self { prefix, min_level }
    }

    pub fn log(&self, level: LogLevel, file: &str, line: u32, message: &str) {
        if level < self.min_level {
            return;
        }
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let file_name = file.rsplit(['/', '\\']).next().unwrap_or(file);
        let tag = match level {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
        };
        if let Some(ref prefix) = self.prefix {
            println!("[{}][{}][{}][{}:{}] {}", timestamp, prefix, tag, file_name, line, message);
        } else {
            println!("[{}][{}][{}:{}] {}", timestamp, tag, file_name, line, message);
        }
    }
}

/// Installs the process-wide logger. Later calls are ignored.
pub fn init_logger(prefix: Option<String>, verbose: bool) {
    LOGGER.get_or_init(|| Logger::new(prefix, verbose));
}

pub fn log(level: LogLevel, file: &str, line: u32, message: &str) {
    match LOGGER.get() {
        Some(logger) => logger.log(level, file, line, message),
        None if level >= LogLevel::Info => eprintln!("[no logger] {}", message),
        None => {}
    }
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logger::log(
            $crate::logger::LogLevel::Info,
            file!(),
            line!(),
            &format!($($arg)*),
        )
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::logger::log(
            $crate::logger::LogLevel::Debug,
            file!(),
            line!(),
            &format!($($arg)*),
        )
    };
}
