use log::LevelFilter;
use log4rs::append::rolling_file::RollingFileAppender;
use log4rs::append::rolling_file::policy::compound::{
    CompoundPolicy, roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger,
};
use log4rs::config::{Appender, Config, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::path::{Path, PathBuf};

/// Target for teardown/audit records, routed to `audit.log`.
pub const AUDIT_TARGET: &str = "temptrack::audit";

const ENC_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} [{l}] {t} - {m}{n}";
const ROLL_SIZE: u64 = 10 * 1024 * 1024;

/// Initializes the logging system from a log4rs YAML config file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed, or a logger is already set.
pub fn init_path(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    log4rs::init_file(path, log4rs::config::Deserializers::default())?;
    Ok(())
}

#[must_use]
pub fn parse_level(level: Option<&str>) -> LevelFilter {
    match level.unwrap_or("info").to_ascii_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

fn rolling(
    base: &Path,
    stem: &str,
    keep: u32,
) -> Result<RollingFileAppender, Box<dyn std::error::Error>> {
    let roller = FixedWindowRoller::builder()
        .build(&format!("{}", base.join(format!("{stem}.{{}}.log")).display()), keep)?;
    let policy = CompoundPolicy::new(Box::new(SizeTrigger::new(ROLL_SIZE)), Box::new(roller));
    let appender = RollingFileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(ENC_PATTERN)))
        .build(base.join(format!("{stem}.log")), Box::new(policy))?;
    Ok(appender)
}

/// Build the log4rs config: `app.log` for everything, `audit.log` for teardown
/// records, and optionally `fs.log` for per-action filesystem events.
///
/// # Errors
/// Returns an error if an appender cannot be built (e.g. `base` is not writable).
pub fn build_config(
    base: &Path,
    level: LevelFilter,
    retention: usize,
    enable_fs_events: bool,
) -> Result<Config, Box<dyn std::error::Error>> {
    let keep = u32::try_from(retention).unwrap_or(u32::MAX);
    let mut builder = Config::builder()
        .appender(Appender::builder().build("app", Box::new(rolling(base, "app", keep)?)))
        .appender(Appender::builder().build("audit", Box::new(rolling(base, "audit", keep)?)))
        .logger(Logger::builder().appender("audit").additive(false).build(AUDIT_TARGET, level));

    if enable_fs_events {
        builder = builder
            .appender(Appender::builder().build("fs", Box::new(rolling(base, "fs", keep)?)))
            .logger(
                Logger::builder()
                    .appender("fs")
                    .additive(false)
                    .build(crate::events::FS_TARGET, LevelFilter::Trace),
            );
    } else {
        builder = builder
            .logger(Logger::builder().additive(false).build(crate::events::FS_TARGET, LevelFilter::Off));
    }

    Ok(builder.build(Root::builder().appender("app").build(level))?)
}

/// Configure logging globally for the process.
/// - dir: base directory for logs; if None, current directory.
/// - level: off|error|warn|info|debug|trace
/// - retention: number of rolled files to keep (default 7)
///
/// A second call in the same process is ignored, since `log` allows one logger.
///
/// # Errors
/// Returns an error if the appenders cannot be built.
pub fn configure_logging(
    dir: Option<&Path>,
    level: Option<&str>,
    retention: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    configure_logging_with_fs_events(dir, level, retention, false)
}

/// Like [`configure_logging`], additionally persisting per-action filesystem
/// events (target `temptrack::fs`) to `fs.log` when `enable_fs_events` is set.
///
/// # Errors
/// Returns an error if the appenders cannot be built.
pub fn configure_logging_with_fs_events(
    dir: Option<&Path>,
    level: Option<&str>,
    retention: Option<usize>,
    enable_fs_events: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let base = dir
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
    let config = build_config(&base, parse_level(level), retention.unwrap_or(7), enable_fs_events)?;
    let _ = log4rs::init_config(config);
    Ok(())
}

/// Configure logging from `TEMPTRACK_*` variables resolved through `lookup`
/// (normally `|k| std::env::var(k).ok()` at suite bootstrap):
/// - TEMPTRACK_LOG_DIR
/// - TEMPTRACK_LOG_LEVEL
/// - TEMPTRACK_LOG_RETENTION
/// - TEMPTRACK_FS_EVENTS (1|true|yes enables `fs.log`)
///
/// # Errors
/// Returns an error if the appenders cannot be built.
pub fn configure_from_vars<F>(lookup: F) -> Result<(), Box<dyn std::error::Error>>
where
    F: Fn(&str) -> Option<String>,
{
    let dir = lookup("TEMPTRACK_LOG_DIR").map(PathBuf::from);
    let level = lookup("TEMPTRACK_LOG_LEVEL");
    let retention = lookup("TEMPTRACK_LOG_RETENTION").and_then(|s| s.parse::<usize>().ok());
    let fs_events = lookup("TEMPTRACK_FS_EVENTS")
        .is_some_and(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes"));
    configure_logging_with_fs_events(dir.as_deref(), level.as_deref(), retention, fs_events)
}
