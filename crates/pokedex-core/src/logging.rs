//! Logging for the viewer.
//!
//! Everything goes to a daily log file. Events at `INFO` and above are also
//! kept in a small [`FooterLog`] sized to the number of lines the TUI footer
//! shows, so the footer always reads the newest entries and nothing else.

use std::collections::VecDeque;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use tracing::Level;
use tracing_appender::rolling;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const LOG_FILE_PREFIX: &str = "pokedex.log";
const RETENTION: Duration = Duration::from_secs(7 * 86_400);

/// One line of the footer tail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterLine {
    pub level: Level,
    pub text: String,
}

impl fmt::Display for FooterLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<5} {}", self.level.as_str(), self.text)
    }
}

/// Bounded, shareable tail of recent footer lines.
///
/// A capacity of zero keeps nothing.
#[derive(Debug, Clone)]
pub struct FooterLog {
    lines: Arc<Mutex<VecDeque<FooterLine>>>,
    capacity: usize,
}

impl FooterLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            lines: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append a line, evicting the oldest when full.
    pub fn push(&self, line: FooterLine) {
        if self.capacity == 0 {
            return;
        }
        if let Ok(mut lines) = self.lines.lock() {
            if lines.len() == self.capacity {
                lines.pop_front();
            }
            lines.push_back(line);
        }
    }

    /// Current lines, oldest first.
    pub fn snapshot(&self) -> Vec<FooterLine> {
        self.lines
            .lock()
            .map(|lines| lines.iter().cloned().collect())
            .unwrap_or_default()
    }
}

/// Where and how much to log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub dir: PathBuf,
    pub retention: Duration,
    pub footer_capacity: usize,
}

impl LogSettings {
    /// Settings for a footer of `footer_capacity` lines.
    ///
    /// The directory comes from `POKEDEX_LOG_DIR` when set, otherwise
    /// [`default_log_dir`].
    pub fn from_env(footer_capacity: usize) -> Self {
        let dir = std::env::var_os("POKEDEX_LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_log_dir);
        Self {
            dir,
            retention: RETENTION,
            footer_capacity,
        }
    }
}

/// Platform state directory (`$XDG_STATE_HOME/pokedex` on Linux), falling
/// back to the local data directory, then `./logs`.
pub fn default_log_dir() -> PathBuf {
    dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .map(|dir| dir.join("pokedex"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Delete rolled log files last modified before `now - retention`.
///
/// Returns how many files were removed. Files without the log prefix are
/// never touched.
fn prune_rolled_logs(dir: &Path, retention: Duration) -> usize {
    let Some(cutoff) = SystemTime::now().checked_sub(retention) else {
        return 0;
    };
    let Ok(entries) = fs::read_dir(dir) else {
        return 0;
    };

    entries
        .flatten()
        .filter(|entry| {
            entry
                .file_name()
                .to_string_lossy()
                .starts_with(LOG_FILE_PREFIX)
        })
        .filter(|entry| {
            entry
                .metadata()
                .and_then(|meta| meta.modified())
                .is_ok_and(|modified| modified < cutoff)
        })
        .filter(|entry| fs::remove_file(entry.path()).is_ok())
        .count()
}

/// Feeds `INFO`-and-above events into a [`FooterLog`].
struct FooterLayer {
    log: FooterLog,
}

impl<S: tracing::Subscriber> Layer<S> for FooterLayer {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let level = *event.metadata().level();
        if level > Level::INFO {
            return;
        }
        let mut writer = FieldWriter::default();
        event.record(&mut writer);
        self.log.push(FooterLine {
            level,
            text: writer.into_text(),
        });
    }
}

/// Renders an event as `message key=value ...`.
#[derive(Default)]
struct FieldWriter {
    message: String,
    extras: String,
}

impl FieldWriter {
    fn into_text(self) -> String {
        if self.message.is_empty() {
            self.extras.trim_start().to_string()
        } else {
            self.message + &self.extras
        }
    }
}

impl tracing::field::Visit for FieldWriter {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.extras.push_str(&format!(" {}={value:?}", field.name()));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.extras.push_str(&format!(" {}={value}", field.name()));
        }
    }
}

/// Install the global subscriber and return the footer tail.
///
/// Filter comes from `POKEDEX_LOG`, then `RUST_LOG`, default `info`. If the
/// log directory cannot be created, file output is skipped with a warning on
/// stderr. Expired rolled files are pruned once the subscriber is live.
pub fn init(settings: &LogSettings) -> FooterLog {
    let footer = FooterLog::with_capacity(settings.footer_capacity);

    let filter = EnvFilter::try_from_env("POKEDEX_LOG")
        .or_else(|_| EnvFilter::try_from_env("RUST_LOG"))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = match fs::create_dir_all(&settings.dir) {
        Ok(()) => Some(
            tracing_subscriber::fmt::layer()
                .with_writer(rolling::daily(&settings.dir, LOG_FILE_PREFIX))
                .with_ansi(false),
        ),
        Err(err) => {
            eprintln!(
                "warning: logging to file disabled, cannot create {}: {err}",
                settings.dir.display()
            );
            None
        }
    };

    let footer_layer = (footer.capacity() > 0).then(|| FooterLayer {
        log: footer.clone(),
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(footer_layer)
        .init();

    let pruned = prune_rolled_logs(&settings.dir, settings.retention);
    if pruned > 0 {
        tracing::debug!(pruned, dir = %settings.dir.display(), "removed expired log files");
    }

    footer
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex as StdMutex;

    // Serialize env-mutating tests to avoid data races.
    static ENV_LOCK: StdMutex<()> = StdMutex::new(());

    fn line(text: &str) -> FooterLine {
        FooterLine {
            level: Level::INFO,
            text: text.into(),
        }
    }

    fn texts(log: &FooterLog) -> Vec<String> {
        log.snapshot().into_iter().map(|l| l.text).collect()
    }

    #[test]
    fn settings_respect_log_dir_override() {
        let _guard = ENV_LOCK.lock().unwrap();
        let original = std::env::var("POKEDEX_LOG_DIR").ok();

        unsafe { std::env::set_var("POKEDEX_LOG_DIR", "/tmp/pokedex-test-logs") };
        let settings = LogSettings::from_env(2);
        assert_eq!(settings.dir, PathBuf::from("/tmp/pokedex-test-logs"));
        assert_eq!(settings.footer_capacity, 2);
        assert_eq!(settings.retention, RETENTION);

        match original {
            Some(v) => unsafe { std::env::set_var("POKEDEX_LOG_DIR", v) },
            None => unsafe { std::env::remove_var("POKEDEX_LOG_DIR") },
        }
    }

    #[test]
    fn footer_log_keeps_only_newest_lines() {
        let log = FooterLog::with_capacity(2);
        for i in 0..5 {
            log.push(line(&format!("msg {i}")));
        }
        assert_eq!(texts(&log), vec!["msg 3", "msg 4"]);
    }

    #[test]
    fn zero_capacity_footer_keeps_nothing() {
        let log = FooterLog::with_capacity(0);
        log.push(line("dropped"));
        assert!(log.snapshot().is_empty());
    }

    #[test]
    fn footer_log_clones_share_lines() {
        let log = FooterLog::with_capacity(3);
        log.clone().push(line("shared"));
        assert_eq!(texts(&log), vec!["shared"]);
    }

    #[test]
    fn footer_line_pads_level() {
        assert_eq!(line("loaded").to_string(), "INFO  loaded");
        let warn = FooterLine {
            level: Level::WARN,
            text: "dup".into(),
        };
        assert_eq!(warn.to_string(), "WARN  dup");
    }

    #[test]
    fn footer_layer_records_info_and_above_with_fields() {
        let log = FooterLog::with_capacity(4);
        let subscriber = tracing_subscriber::registry().with(FooterLayer { log: log.clone() });

        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!("selected record");
            tracing::info!(count = 3, "loaded pokemon records");
            tracing::warn!(type_name = %"fire", "duplicate type name in record");
        });

        let lines = log.snapshot();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "loaded pokemon records count=3");
        assert_eq!(lines[1].level, Level::WARN);
        assert_eq!(lines[1].text, "duplicate type name in record type_name=fire");
    }

    #[test]
    fn field_writer_without_message() {
        let writer = FieldWriter {
            message: String::new(),
            extras: " a=1 b=2".into(),
        };
        assert_eq!(writer.into_text(), "a=1 b=2");
        assert_eq!(FieldWriter::default().into_text(), "");
    }

    #[test]
    fn prune_removes_only_expired_log_files() {
        let tmp = std::env::temp_dir().join("pokedex-test-prune");
        let _ = fs::create_dir_all(&tmp);

        let rolled = tmp.join("pokedex.log.2025-01-01");
        let other = tmp.join("other.txt");
        fs::write(&rolled, "a").unwrap();
        fs::write(&other, "c").unwrap();

        assert_eq!(prune_rolled_logs(&tmp, RETENTION), 0);
        assert!(rolled.exists(), "fresh log file should survive");

        // Zero retention puts the cutoff at "now".
        assert_eq!(prune_rolled_logs(&tmp, Duration::ZERO), 1);
        assert!(!rolled.exists(), "expired log file should be deleted");
        assert!(other.exists(), "unrelated file should be preserved");

        let _ = fs::remove_dir_all(&tmp);
    }
}
