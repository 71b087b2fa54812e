//! Logging for extraction diagnostics.
//!
//! The extractor never logs through a global: it is handed a [`Log`] sink.
//! [`TracingLog`] forwards to `tracing` (the binary installs the subscriber
//! with [`init`]), [`BufferingLog`] keeps numbered records in memory.
//!
//! `RUST_LOG` takes precedence over the configured level:
//! ```bash
//! RUST_LOG=debug javadoc-index paths src/main/java
//! ```

use std::fmt;
use std::io::IsTerminal;
use std::sync::{Mutex, Once};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Leveled sink for diagnostics.
pub trait Log {
    fn log(&self, level: Level, message: &str);

    fn is_enabled(&self, _level: Level) -> bool {
        true
    }

    fn debug(&self, message: &str) {
        self.log(Level::DEBUG, message);
    }

    fn info(&self, message: &str) {
        self.log(Level::INFO, message);
    }

    fn warn(&self, message: &str) {
        self.log(Level::WARN, message);
    }

    fn error(&self, message: &str) {
        self.log(Level::ERROR, message);
    }
}

/// Forwards to the `tracing` macros under the `javadoc_index` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLog;

impl Log for TracingLog {
    fn log(&self, level: Level, message: &str) {
        match level {
            Level::ERROR => tracing::error!(target: "javadoc_index", "{message}"),
            Level::WARN => tracing::warn!(target: "javadoc_index", "{message}"),
            Level::INFO => tracing::info!(target: "javadoc_index", "{message}"),
            Level::DEBUG => tracing::debug!(target: "javadoc_index", "{message}"),
            _ => tracing::trace!(target: "javadoc_index", "{message}"),
        }
    }

    fn is_enabled(&self, level: Level) -> bool {
        match level {
            Level::ERROR => tracing::enabled!(target: "javadoc_index", Level::ERROR),
            Level::WARN => tracing::enabled!(target: "javadoc_index", Level::WARN),
            Level::INFO => tracing::enabled!(target: "javadoc_index", Level::INFO),
            Level::DEBUG => tracing::enabled!(target: "javadoc_index", Level::DEBUG),
            _ => tracing::enabled!(target: "javadoc_index", Level::TRACE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub sequence: usize,
    pub level: Level,
    pub message: String,
}

impl fmt::Display for LogRecord {
    /// `001: (INFO) Processing [1] java sources.`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}: ({}) {}", self.sequence, self.level, self.message)
    }
}

/// Records every message at or above `threshold`, numbered from zero in
/// arrival order.
#[derive(Debug)]
pub struct BufferingLog {
    threshold: Level,
    records: Mutex<Vec<LogRecord>>,
}

impl BufferingLog {
    pub fn new(threshold: Level) -> Self {
        Self {
            threshold,
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.lock().clone()
    }

    /// Records rendered as `NNN: (LEVEL) message`.
    pub fn lines(&self) -> Vec<String> {
        self.lock().iter().map(ToString::to_string).collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<LogRecord>> {
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Log for BufferingLog {
    fn log(&self, level: Level, message: &str) {
        if !self.is_enabled(level) {
            return;
        }
        let mut records = self.lock();
        let sequence = records.len();
        records.push(LogRecord {
            sequence,
            level,
            message: message.to_string(),
        });
    }

    // tracing orders levels by verbosity: TRACE > DEBUG > INFO > WARN > ERROR.
    fn is_enabled(&self, level: Level) -> bool {
        level <= self.threshold
    }
}

static INIT: Once = Once::new();

/// Installs the stderr subscriber. Only the first call has an effect.
///
/// `level` is an `EnvFilter` directive such as `warn` or
/// `javadoc_index=debug`; `RUST_LOG` replaces it when set.
pub fn init(level: &str) {
    INIT.call_once(|| {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
        };

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_ansi(std::io::stderr().is_terminal())
            .with_target(false)
            .compact()
            .init();
    });
}
