//! Process-wide `log` backend for SocialFlow.
//!
//! Lines go to stderr so stdout stays free for results. Each record becomes a
//! [`LogEntry`] rendered as a colored console line, a plain line or a JSON
//! object, and is optionally appended to a file (never with ANSI escapes).

use crate::config::GeminiConfig;
use chrono::{DateTime, Utc};
use colored::*;
use log::{Level, LevelFilter, Metadata, Record};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::env;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use uuid::Uuid;

static LOGGER: Lazy<SocialFlowLogger> = Lazy::new(SocialFlowLogger::default);

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

pub fn init() -> Result<(), String> {
    init_with_config(LoggerConfig::default())
}

/// Installs the global logger. A second call only swaps the configuration.
pub fn init_with_config(config: LoggerConfig) -> Result<(), String> {
    let level = config.level;
    LOGGER.configure(config)?;

    // Already installed by an earlier call; the new config is live anyway.
    let _ = log::set_logger(&*LOGGER);
    log::set_max_level(level);
    Ok(())
}

/// How a record is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Colors and level badges, for a terminal.
    #[default]
    Pretty,
    Plain,
    /// One JSON object per line.
    Json,
}

impl LogFormat {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "pretty" => Some(LogFormat::Pretty),
            "plain" | "text" => Some(LogFormat::Plain),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoggerConfig {
    pub level: LevelFilter,
    pub format: LogFormat,
    pub timestamps: bool,
    pub show_location: bool,
    pub file: Option<PathBuf>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::Info,
            format: LogFormat::Pretty,
            timestamps: true,
            show_location: false,
            file: None,
        }
    }
}

impl LoggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Reads `SOCIALFLOW_LOG` (level), `SOCIALFLOW_LOG_FORMAT`
    /// (`pretty`/`plain`/`json`) and `SOCIALFLOW_LOG_FILE`.
    /// `SOCIALFLOW_LOG_JSON=true` is accepted as a shorthand for JSON.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(level) = lookup("SOCIALFLOW_LOG").and_then(|l| l.trim().parse().ok()) {
            config.level = level;
        }
        if let Some(format) = lookup("SOCIALFLOW_LOG_FORMAT").and_then(|f| LogFormat::parse(&f)) {
            config.format = format;
        } else if lookup("SOCIALFLOW_LOG_JSON").as_deref() == Some("true") {
            config.format = LogFormat::Json;
        }
        if let Some(path) = lookup("SOCIALFLOW_LOG_FILE").filter(|p| !p.trim().is_empty()) {
            config.file = Some(PathBuf::from(path));
        }
        config
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub level: String,
    pub target: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl LogEntry {
    fn from_record(record: &Record) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            level: record.level().to_string(),
            target: record.target().to_string(),
            message: record.args().to_string(),
            location: record
                .file()
                .map(|file| format!("{}:{}", file, record.line().unwrap_or(0))),
        }
    }

    fn level(&self) -> Level {
        self.level.parse().unwrap_or(Level::Info)
    }
}

fn badge(level: Level) -> (&'static str, Color) {
    match level {
        Level::Error => ("❌", Color::Red),
        Level::Warn => ("⚠️", Color::Yellow),
        Level::Info => ("💡", Color::Green),
        Level::Debug => ("🐛", Color::Blue),
        Level::Trace => ("🔍", Color::Cyan),
    }
}

/// Renders one entry. `Pretty` is the only format that emits ANSI escapes.
pub fn render(entry: &LogEntry, config: &LoggerConfig, format: LogFormat) -> String {
    if format == LogFormat::Json {
        return serde_json::to_string(entry).unwrap_or_default();
    }
    let pretty = format == LogFormat::Pretty;
    let mut line = String::new();

    if config.timestamps {
        let timestamp = entry.timestamp.format(TIMESTAMP_FORMAT).to_string();
        if pretty {
            line.push_str(&format!("{} ", timestamp.bright_black()));
        } else {
            line.push_str(&format!("{} ", timestamp));
        }
    }

    if pretty {
        let (emoji, color) = badge(entry.level());
        let label = format!("{} {}", emoji, entry.level);
        line.push_str(&format!(
            "[{}] {}: {}",
            label.color(color).bold(),
            entry.target.bright_blue(),
            entry.message
        ));
    } else {
        line.push_str(&format!("[{}] {}: {}", entry.level, entry.target, entry.message));
    }

    if config.show_location {
        if let Some(location) = &entry.location {
            line.push_str(&format!(" ({})", location));
        }
    }
    line
}

#[derive(Default)]
pub struct SocialFlowLogger {
    config: Mutex<LoggerConfig>,
    file: Mutex<Option<File>>,
}

impl SocialFlowLogger {
    fn configure(&self, config: LoggerConfig) -> Result<(), String> {
        let file = match &config.file {
            Some(path) => Some(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|e| format!("Failed to open log file {}: {}", path.display(), e))?,
            ),
            None => None,
        };
        if let Ok(mut slot) = self.file.lock() {
            *slot = file;
        }
        if let Ok(mut current) = self.config.lock() {
            *current = config;
        }
        Ok(())
    }
}

impl log::Log for SocialFlowLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.config
            .lock()
            .map_or(true, |config| metadata.level() <= config.level)
    }

    fn log(&self, record: &Record) {
        let Ok(config) = self.config.lock() else {
            return;
        };
        if record.level() > config.level {
            return;
        }

        let entry = LogEntry::from_record(record);
        eprintln!("{}", render(&entry, &config, config.format));

        if let Ok(mut file) = self.file.lock() {
            if let Some(file) = file.as_mut() {
                let format = match config.format {
                    LogFormat::Json => LogFormat::Json,
                    _ => LogFormat::Plain,
                };
                let _ = writeln!(file, "{}", render(&entry, &config, format));
            }
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
        if let Ok(mut file) = self.file.lock() {
            if let Some(file) = file.as_mut() {
                let _ = file.flush();
            }
        }
    }
}

/// Logs how long a gateway operation took when dropped.
pub struct Timer {
    start: Instant,
    name: &'static str,
}

impl Timer {
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        log::info!("⏱️  {} finished in {}ms", self.name, self.elapsed().as_millis());
    }
}

pub fn timer(name: &'static str) -> Timer {
    log::debug!("⏱️  Starting {}", name);
    Timer {
        start: Instant::now(),
        name,
    }
}

pub fn log_startup_info(app_name: &str, version: &str) {
    log::info!("🚀 Starting {} v{}", app_name, version);
}

/// Summarizes the gateway settings without printing the key itself.
pub fn log_config_info(config: &GeminiConfig) {
    log::info!("⚙️  Gateway {}", config.base_url);
    log::info!(
        "   models: text={} image={} video={}",
        config.text_model,
        config.image_model,
        config.video_model
    );
    log::info!(
        "   video polling: every {:?}, max attempts {:?}, timeout {:?}",
        config.poll.interval,
        config.poll.max_attempts,
        config.poll.timeout
    );
    log::info!(
        "   API key: {}",
        if config.resolve_api_key().is_ok() { "✅" } else { "❌ missing" }
    );
}
