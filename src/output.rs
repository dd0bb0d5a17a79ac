//! Global output configuration and utilities.
//!
//! Status lines and progress bars go to stderr and respect quiet mode.
//! Diagnostics go through the `log` facade and are filtered by verbosity,
//! independent of quiet mode. Colors can be disabled via flag or the
//! `NO_COLOR` environment variable.

use std::sync::OnceLock;

static OUTPUT_CONFIG: OnceLock<OutputConfig> = OnceLock::new();

#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Disable colored output.
    pub no_color: bool,
    /// Number of `-v` flags given.
    pub verbosity: u8,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            quiet: false,
            // https://no-color.org/
            no_color: std::env::var("NO_COLOR").is_ok(),
            verbosity: 0,
        }
    }
}

/// Initialize the global output configuration and the logger.
///
/// Subsequent calls are ignored.
pub fn init(config: OutputConfig) {
    init_logger(config.verbosity);
    let _ = OUTPUT_CONFIG.set(config);
}

/// Default level is `warn`; each `-v` raises it one step. `RUST_LOG`
/// overrides both.
fn init_logger(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .try_init();
}

pub fn config() -> &'static OutputConfig {
    OUTPUT_CONFIG.get_or_init(OutputConfig::default)
}

pub fn is_quiet() -> bool {
    config().quiet
}

pub fn is_no_color() -> bool {
    config().no_color
}

/// Print a status message to stderr (respects quiet mode).
#[macro_export]
macro_rules! status {
    ($($arg:tt)*) => {
        if !$crate::output::is_quiet() {
            eprintln!($($arg)*);
        }
    };
}
