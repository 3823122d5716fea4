use chrono::Local;
use log::{LevelFilter, Metadata, Record, SetLoggerError};
use std::collections::HashSet;
use std::io::{self, Write};
use std::sync::OnceLock;

// Custom logger structure
#[derive(Debug)]
struct BridgeLogger {
    level: LevelFilter,
    debug_filters: Option<HashSet<String>>,
}

// Implement the log::Log trait for our custom logger
impl log::Log for BridgeLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        // Check if the record's level is enabled
        if metadata.level() <= self.level {
            // If we have debug filters, check if the target matches any filter
            if let Some(filters) = &self.debug_filters {
                if metadata.level() == log::Level::Debug || metadata.level() == log::Level::Trace {
                    return filters.contains(metadata.target())
                        || filters.iter().any(|f| metadata.target().starts_with(f));
                }
            }
            return true;
        }
        false
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let level_color = match record.level() {
                log::Level::Error => "\x1B[31m", // Red
                log::Level::Warn => "\x1B[33m",  // Yellow
                log::Level::Info => "\x1B[32m",  // Green
                log::Level::Debug => "\x1B[36m", // Cyan
                log::Level::Trace => "\x1B[35m", // Magenta
            };

            let reset = "\x1B[0m";
            let now = Local::now();
            let timestamp = now.format("%H:%M:%S%.3f");

            let message = record.args().to_string();

            // Pull tick and episode numbers out of the message for a compact
            // context prefix, e.g. "[E02][T00417]".
            let episode = find_number(&message, "Episode #");
            let tick = find_number(&message, "Tick ");

            let mut context = String::new();
            if let Some(e) = episode {
                context.push_str(&format!("[E{:02}]", e));
            }
            if let Some(t) = tick {
                context.push_str(&format!("[T{:05}]", t));
            }
            if !context.is_empty() {
                context.push(' ');
            }

            // Standard output format with context
            let mut output = format!(
                "{timestamp} {level_color}{level:5}{reset} {context}{target}: {message}",
                timestamp = timestamp,
                level_color = level_color,
                level = record.level(),
                reset = reset,
                context = context,
                target = record.target(),
                message = record.args()
            );

            // Add module path if available and different from target
            if let Some(module_path) = record.module_path() {
                if module_path != record.target() {
                    output.push_str(&format!(" [{}]", module_path));
                }
            }

            let mut stdout = io::stdout();
            writeln!(stdout, "{}", output).expect("Failed to write to stdout");
            stdout.flush().expect("Failed to flush stdout");
        }
    }

    fn flush(&self) {
        io::stdout().flush().expect("Failed to flush stdout");
    }
}

// Parse the unsigned number immediately following `prefix` in `message`.
fn find_number(message: &str, prefix: &str) -> Option<u32> {
    let start = message.find(prefix)? + prefix.len();
    let rest = &message[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    rest[..end].parse().ok()
}

// Use OnceLock instead of unsafe static mut
static LOGGER: OnceLock<BridgeLogger> = OnceLock::new();

// Initialize the logger with optional debug filters
pub fn init_logger(level: LevelFilter, debug_filter: Option<String>) -> Result<(), SetLoggerError> {
    let debug_filters = debug_filter.map(|filter_str| {
        filter_str
            .split(',')
            .map(|s| s.trim().to_string())
            .collect::<HashSet<String>>()
    });

    // Initialize the logger if it hasn't been initialized yet
    if LOGGER.get().is_none() {
        let logger = BridgeLogger {
            level,
            debug_filters,
        };

        // Try to set the logger
        LOGGER.set(logger).expect("Failed to set logger");
    }

    // Set the logger
    log::set_logger(LOGGER.get().unwrap()).map(|()| log::set_max_level(level))
}

// Helper macros for specific debug topics
#[macro_export]
macro_rules! debug_zone {
    ($tick:expr, $($arg:tt)*) => {
        log::debug!(target: "zone", "Tick {} {}", $tick, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_pulse {
    ($tick:expr, $($arg:tt)*) => {
        log::debug!(target: "pulse", "Tick {} {}", $tick, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_frame {
    ($tick:expr, $($arg:tt)*) => {
        log::debug!(target: "frame", "Tick {} {}", $tick, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_link {
    ($($arg:tt)*) => {
        log::debug!(target: "link", "{}", format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_sim {
    ($($arg:tt)*) => {
        log::debug!(target: "sim", "{}", format_args!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_number() {
        assert_eq!(find_number("Episode #12 started", "Episode #"), Some(12));
        assert_eq!(find_number("Tick 417", "Tick "), Some(417));
        assert_eq!(find_number("no context here", "Tick "), None);
        assert_eq!(find_number("Tick end", "Tick "), None);
    }
}
