//! User-facing message sinks and `env_logger` initialisation.
//!
//! Progress messages flow through a [`Logger`] chosen once in `main` and
//! passed by reference to every component. Internal diagnostics keep using
//! the `log` macros directly.

use std::cell::RefCell;

use clap::ValueEnum;

/// Destination for user-facing progress and error messages.
pub trait Logger {
    fn info(&self, message: &str);
    fn error(&self, message: &str);

    /// Non-fatal problems. Sinks without a separate channel treat them as info.
    fn warn(&self, message: &str) {
        self.info(message);
    }
}

/// Keeps every message in memory. Used by tests to assert on output.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    info: RefCell<Vec<String>>,
    error: RefCell<Vec<String>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn infos(&self) -> Vec<String> {
        self.info.borrow().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.error.borrow().clone()
    }
}

impl Logger for MemoryLogger {
    fn info(&self, message: &str) {
        self.info.borrow_mut().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.error.borrow_mut().push(message.to_string());
    }
}

/// Prints to the terminal.
#[derive(Debug, Default)]
pub struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn info(&self, message: &str) {
        println!("{message}");
    }

    fn error(&self, message: &str) {
        eprintln!("ERROR {message}");
    }

    fn warn(&self, message: &str) {
        eprintln!("WARNING {message}");
    }
}

/// Forwards to the `log` facade, so output follows the `env_logger` setup.
#[derive(Debug, Default)]
pub struct SystemLogger;

impl Logger for SystemLogger {
    fn info(&self, message: &str) {
        log::info!("{message}");
    }

    fn error(&self, message: &str) {
        log::error!("{message}");
    }

    fn warn(&self, message: &str) {
        log::warn!("{message}");
    }
}

/// Discards everything.
#[derive(Debug, Default)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn info(&self, _message: &str) {}

    fn error(&self, _message: &str) {}
}

/// Logger variants selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LoggerKind {
    #[default]
    Console,
    System,
    Null,
}

impl LoggerKind {
    pub fn build(self) -> Box<dyn Logger> {
        match self {
            LoggerKind::Console => Box::new(ConsoleLogger),
            LoggerKind::System => Box::new(SystemLogger),
            LoggerKind::Null => Box::new(NullLogger),
        }
    }
}

/// Initialises `env_logger`.
///
/// Verbose runs trace everything; the system logger needs at least `Info`
/// to be visible; otherwise diagnostics stay off.
pub fn init_logger(verbose: bool, kind: LoggerKind) {
    let level = if verbose {
        log::LevelFilter::Trace
    } else if kind == LoggerKind::System {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Off
    };
    env_logger::Builder::new().filter_level(level).init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_logger_collects_by_channel() {
        let logger = MemoryLogger::new();
        logger.info("test");
        logger.error("something");
        logger.warn("careful");

        assert_eq!(logger.infos(), vec!["test", "careful"]);
        assert_eq!(logger.errors(), vec!["something"]);
    }

    #[test]
    fn test_null_logger_is_silent() {
        let logger = LoggerKind::Null.build();
        logger.info("ignored");
        logger.error("ignored");
    }
}
