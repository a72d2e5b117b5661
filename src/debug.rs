use parking_lot::Mutex;
/// Logging backend for carbono-verde
///
/// Routes the `log` facade to a debug log file so CLI output stays clean:
/// /tmp/carbono_verde_debug.log on Unix/macOS,
/// or %TEMP%\carbono_verde_debug.log on Windows.
///
/// When RUST_LOG is set, records are mirrored to stderr as well.
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

/// Debug log file name inside the temp dir
pub const LOG_FILE_NAME: &str = "carbono_verde_debug.log";

struct LogBridge {
    level: log::LevelFilter,
    mirror_stderr: bool,
    file: Mutex<Option<File>>,
}

impl LogBridge {
    fn new(level: log::LevelFilter, mirror_stderr: bool) -> Self {
        let file = match OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(log_path())
        {
            Ok(mut f) => {
                let _ = writeln!(
                    f,
                    "{}\ncarbono-verde session started at {} (level={})\n{}",
                    "=".repeat(80),
                    get_timestamp(),
                    level,
                    "=".repeat(80)
                );
                Some(f)
            }
            // Silently fall back to stderr-only (or nothing)
            Err(_) => None,
        };
        Self {
            level,
            mirror_stderr,
            file: Mutex::new(file),
        }
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "[{}] [{:<5}] [{}] {}",
            get_timestamp(),
            record.level(),
            record.target(),
            record.args()
        );
        if let Some(ref mut file) = *self.file.lock() {
            let _ = writeln!(file, "{line}");
        }
        if self.mirror_stderr {
            eprintln!("{line}");
        }
    }

    fn flush(&self) {
        if let Some(ref mut file) = *self.file.lock() {
            let _ = file.flush();
        }
    }
}

static BRIDGE: OnceLock<LogBridge> = OnceLock::new();

/// Path of the debug log file
pub fn log_path() -> PathBuf {
    std::env::temp_dir().join(LOG_FILE_NAME)
}

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Level from RUST_LOG when it names a plain level (e.g. `debug`)
fn env_level() -> Option<log::LevelFilter> {
    std::env::var("RUST_LOG").ok()?.trim().parse().ok()
}

/// Install the log bridge.
///
/// Precedence: `override_level` (CLI), then RUST_LOG, then Info. Calling
/// this more than once keeps the first installation.
pub fn init_log_bridge(override_level: Option<log::LevelFilter>) {
    let mirror_stderr = std::env::var_os("RUST_LOG").is_some();
    let level = override_level
        .or_else(env_level)
        .unwrap_or(log::LevelFilter::Info);

    let bridge = BRIDGE.get_or_init(|| LogBridge::new(level, mirror_stderr));
    if log::set_logger(bridge).is_ok() {
        log::set_max_level(bridge.level);
    }
}

/// Apply a level from config once it is loaded; the CLI flag still wins.
pub fn set_config_level(level: log::LevelFilter, cli_override: bool) {
    if !cli_override && std::env::var_os("RUST_LOG").is_none() {
        log::set_max_level(level);
    }
}
