//! Logger initialization. Library code only talks to the `log` facade, binaries and tests
//! call `init_logger` once to see the messages on the terminal.
use log::LevelFilter;
use simplelog::{ColorChoice, Config, SimpleLogger, TermLogger, TerminalMode};

/// Installs a terminal logger with the given level, falls back to a plain stdout logger
/// when no terminal is available. Returns false if a logger was already installed,
/// so calling it from several tests is harmless.
pub fn init_logger(level: LevelFilter) -> bool {
    if TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto).is_ok() {
        return true;
    }
    SimpleLogger::init(level, Config::default()).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{info, warn};

    #[test]
    fn test_init_is_idempotent() {
        init_logger(LevelFilter::Info);
        assert!(!init_logger(LevelFilter::Debug));
        info!("logger test message");
        warn!("logger test warning");
    }
}
