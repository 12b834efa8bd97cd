use owo_colors::OwoColorize;
use std::sync::OnceLock;

/// Ambient status/debug logger for the resolution-and-hoisting engine.
///
/// This is deliberately not a terminal pretty-printer: no cursor movement,
/// no progress bars. Those belong to the (out-of-scope) renderer that sits
/// on top of this engine's output.
pub struct Logger {
    quiet: bool,
}

pub enum LogLevel {
    Status,
    Warning,
    Error,
    Debug,
}

impl Logger {
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn log(&self, level: LogLevel, message: &str) {
        if self.quiet && !matches!(level, LogLevel::Error) {
            return;
        }

        let (prefix, colored) = match level {
            LogLevel::Status => ("◦".bright_cyan().to_string(), message.white().to_string()),
            LogLevel::Warning => (
                "⚠".bright_yellow().bold().to_string(),
                message.bright_yellow().to_string(),
            ),
            LogLevel::Error => (
                "✗".bright_red().bold().to_string(),
                message.bright_red().to_string(),
            ),
            LogLevel::Debug => (
                "•".bright_black().bold().to_string(),
                message.bright_black().to_string(),
            ),
        };

        eprintln!("{prefix} {colored}");
    }

    pub fn status(&self, message: &str) {
        self.log(LogLevel::Status, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warning, message);
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    pub fn debug(&self, message: &str, debug_enabled: bool) {
        if debug_enabled {
            self.log(LogLevel::Debug, message);
        }
    }
}

static LOGGER: OnceLock<Logger> = OnceLock::new();

pub fn init_logger(quiet: bool) {
    let _ = LOGGER.set(Logger::new(quiet));
}

fn get_logger() -> &'static Logger {
    LOGGER.get_or_init(|| Logger::new(false))
}

pub fn status(message: &str) {
    get_logger().status(message);
}

pub fn warn(message: &str) {
    get_logger().warn(message);
}

pub fn error(message: &str) {
    get_logger().error(message);
}

pub fn debug(message: &str, debug_enabled: bool) {
    get_logger().debug(message, debug_enabled);
}
