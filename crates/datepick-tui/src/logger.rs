/// Logger that captures records to a memory buffer instead of stdout, so
/// they never corrupt the terminal while the demo is drawn
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};
use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

const MAX_LOG_LINES: usize = 5_000;

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: String,
    pub target: String,
    pub message: String,
}

impl LogEntry {
    pub fn format(&self) -> String {
        format!(
            "[{}] {} {}: {}",
            self.timestamp, self.level, self.target, self.message
        )
    }
}

/// Thread-safe bounded log buffer
#[derive(Clone)]
pub struct LogBuffer {
    logs: Arc<RwLock<VecDeque<LogEntry>>>,
    capacity: usize,
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl LogBuffer {
    pub fn new() -> Self {
        Self::with_capacity(MAX_LOG_LINES)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            logs: Arc::new(RwLock::new(VecDeque::with_capacity(capacity))),
            capacity: capacity.max(1),
        }
    }

    pub fn add_log(&self, entry: LogEntry) {
        let mut logs = self.logs.write().unwrap();

        // Remove oldest log if we've hit the limit
        if logs.len() >= self.capacity {
            logs.pop_front();
        }

        logs.push_back(entry);
    }

    pub fn len(&self) -> usize {
        self.logs.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get_recent_logs(&self, count: usize) -> Vec<String> {
        let logs = self.logs.read().unwrap();
        let start = logs.len().saturating_sub(count);
        logs.iter()
            .skip(start)
            .map(|entry| entry.format())
            .collect()
    }
}

pub struct BufferedLogger {
    buffer: LogBuffer,
    level: Level,
}

impl BufferedLogger {
    pub fn new(buffer: LogBuffer, level: Level) -> Self {
        Self { buffer, level }
    }
}

impl log::Log for BufferedLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let entry = LogEntry {
                timestamp: chrono::Local::now().format("%H:%M:%S%.3f").to_string(),
                level: record.level().to_string(),
                target: record.target().to_string(),
                message: format!("{}", record.args()),
            };

            self.buffer.add_log(entry);
        }
    }

    fn flush(&self) {}
}

/// Install the buffered logger and return the buffer for reading logs.
/// A logger installed earlier (tests, the CLI) is left in place and the
/// returned buffer simply stays empty.
pub fn init_memory_logger() -> LogBuffer {
    let buffer = LogBuffer::new();
    if let Err(e) = init_buffered_logger(buffer.clone(), Level::Debug) {
        // nothing can be printed once the terminal is in raw mode
        buffer.add_log(LogEntry {
            timestamp: chrono::Local::now().format("%H:%M:%S%.3f").to_string(),
            level: Level::Warn.to_string(),
            target: module_path!().to_string(),
            message: format!("Buffered logger not installed: {}", e),
        });
    }
    buffer
}

pub fn init_buffered_logger(buffer: LogBuffer, level: Level) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(BufferedLogger::new(buffer, level)))?;
    log::set_max_level(LevelFilter::Debug);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Log;

    fn entry(message: &str) -> LogEntry {
        LogEntry {
            timestamp: "09:30:00.000".to_string(),
            level: "INFO".to_string(),
            target: "datepick".to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_buffer_drops_oldest() {
        let buffer = LogBuffer::with_capacity(2);
        buffer.add_log(entry("one"));
        buffer.add_log(entry("two"));
        buffer.add_log(entry("three"));

        assert_eq!(buffer.len(), 2);
        let recent = buffer.get_recent_logs(10);
        assert_eq!(recent[0], "[09:30:00.000] INFO datepick: two");
        assert!(recent[1].ends_with("three"));
    }

    #[test]
    fn test_logger_respects_level() {
        let buffer = LogBuffer::new();
        let logger = BufferedLogger::new(buffer.clone(), Level::Info);
        logger.log(
            &Record::builder()
                .level(Level::Debug)
                .args(format_args!("hidden"))
                .build(),
        );
        logger.log(
            &Record::builder()
                .level(Level::Warn)
                .target("datepick_core")
                .args(format_args!("Ignoring DATEPICK_MONTHS"))
                .build(),
        );

        let logs = buffer.get_recent_logs(10);
        assert_eq!(logs.len(), 1);
        assert!(logs[0].contains("WARN datepick_core: Ignoring DATEPICK_MONTHS"));
    }
}
