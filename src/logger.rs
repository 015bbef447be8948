use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

lazy_static::lazy_static! {
    static ref LOGGER: Mutex<Option<File>> = Mutex::new(None);
}

/// Open (or create) the debug log. The terminal owns stdout, so every
/// diagnostic goes to this file instead.
pub fn init(path: &Path) {
    let Ok(mut logger) = LOGGER.lock() else {
        return;
    };
    if logger.is_none()
        && let Ok(file) = OpenOptions::new().create(true).append(true).open(path)
    {
        *logger = Some(file);
    }
}

pub fn log(message: &str) {
    write_line("INFO", message);
}

pub fn error(message: &str) {
    write_line("ERROR", message);
}

fn write_line(level: &str, message: &str) {
    if let Ok(mut guard) = LOGGER.lock()
        && let Some(logger) = guard.as_mut()
    {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let _ = writeln!(logger, "[{}] {} {}", timestamp, level, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_before_init_is_noop() {
        log("nobody is listening");
        error("still nobody");
    }

    #[test]
    fn test_logger_writes_levels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("debug.log");
        init(&path);
        log("Test log message");
        error("Test error message");

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("INFO Test log message"));
        assert!(content.contains("ERROR Test error message"));
    }
}
