use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Shared, bounded buffer of formatted log lines.
#[derive(Debug, Clone, Default)]
pub struct LogBuffer {
    lines: Arc<Mutex<VecDeque<String>>>,
}

impl LogBuffer {
    pub const CAPACITY: usize = 100;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, line: String) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push_back(line);
            while lines.len() > Self::CAPACITY {
                lines.pop_front();
            }
        }
    }

    /// Snapshot of the most recent `n` lines, oldest first.
    pub fn recent(&self, n: usize) -> Vec<String> {
        match self.lines.lock() {
            Ok(lines) => lines.iter().skip(lines.len().saturating_sub(n)).cloned().collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.lines.lock().map(|l| l.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// `log` backend for the TUI: stderr is hidden behind the alternate screen,
/// so records go into a [`LogBuffer`] the log overlay renders.
#[derive(Debug)]
pub struct TuiLogger {
    buffer: LogBuffer,
    level: LevelFilter,
}

impl TuiLogger {
    pub fn new(level: LevelFilter) -> (Self, LogBuffer) {
        let buffer = LogBuffer::new();
        (Self { buffer: buffer.clone(), level }, buffer)
    }

    /// Install as the global logger.
    pub fn install(level: LevelFilter) -> Result<LogBuffer, SetLoggerError> {
        let (logger, buffer) = Self::new(level);
        log::set_boxed_logger(Box::new(logger)).map(|()| log::set_max_level(level))?;
        Ok(buffer)
    }
}

impl Log for TuiLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.buffer.push(format!("{:<5} {}", record.level(), record.args()));
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    #[test]
    fn buffer_is_bounded() {
        let buf = LogBuffer::new();
        for i in 0..(LogBuffer::CAPACITY + 5) {
            buf.push(format!("line {i}"));
        }
        assert_eq!(buf.len(), LogBuffer::CAPACITY);
        assert_eq!(buf.recent(1), vec![format!("line {}", LogBuffer::CAPACITY + 4)]);
    }

    #[test]
    fn logger_filters_by_level() {
        let (logger, buf) = TuiLogger::new(LevelFilter::Info);
        logger.log(
            &Record::builder().level(Level::Debug).args(format_args!("hidden")).build(),
        );
        logger.log(&Record::builder().level(Level::Warn).args(format_args!("shown")).build());
        assert_eq!(buf.recent(10), vec!["WARN  shown".to_string()]);
    }
}
