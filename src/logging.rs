//! Logging setup for the `font-fetcher` binary.
//!
//! The library only emits through the `log` facade. The binary routes those
//! records to stderr as `[LEVEL] [target] message` lines, and optionally
//! appends the same lines to a log file (`--log-file`). The level comes from
//! the `--log-level` flag, else `RUST_LOG` (a plain level name), else `warn`.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::OnceLock;

use log::{LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;

struct Logger {
    /// Replaced when logging is initialized again with another file
    file: Mutex<Option<File>>,
}

impl Logger {
    fn write_line(&self, line: &str) {
        let _ = writeln!(std::io::stderr().lock(), "{}", line);
        if let Some(file) = self.file.lock().as_mut() {
            let _ = writeln!(file, "{}", line);
        }
    }
}

fn format_record(record: &Record) -> String {
    format!(
        "[{:<5}] [{}] {}",
        record.level(),
        record.target(),
        record.args()
    )
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        self.write_line(&format_record(record));
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
        if let Some(file) = self.file.lock().as_mut() {
            let _ = file.flush();
        }
    }
}

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Parse a level name such as `debug` or `WARN`; `None` if unrecognized.
pub fn parse_level(value: &str) -> Option<LevelFilter> {
    value.trim().parse::<LevelFilter>().ok()
}

/// Pick the effective level from the CLI flag and `RUST_LOG`.
pub fn resolve_level(cli_level: Option<LevelFilter>, env_value: Option<&str>) -> LevelFilter {
    cli_level
        .or_else(|| env_value.and_then(parse_level))
        .unwrap_or(LevelFilter::Warn)
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the logger. Later calls adjust the level and log file.
pub fn init_logging(
    cli_level: Option<LevelFilter>,
    log_file: Option<&Path>,
) -> std::io::Result<()> {
    let env_value = std::env::var("RUST_LOG").ok();
    let level = resolve_level(cli_level, env_value.as_deref());
    let file = log_file.map(open_log_file).transpose()?;

    let logger = LOGGER.get_or_init(|| Logger {
        file: Mutex::new(None),
    });
    *logger.file.lock() = file;
    // Already set (e.g. by a test harness) is fine
    let _ = log::set_logger(logger);
    log::set_max_level(level);
    Ok(())
}
