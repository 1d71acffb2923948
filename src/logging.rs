//! Forwards `log` records to the browser console.

use log::{Level, LevelFilter, Log, Metadata, Record};

struct ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = format_record(record.target(), record.line(), &record.args().to_string());
        let value = wasm_bindgen::JsValue::from(message);
        match record.level() {
            Level::Error => web_sys::console::error_1(&value),
            Level::Warn => web_sys::console::warn_1(&value),
            _ => web_sys::console::log_1(&value),
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Installs the console logger. Calling it again only adjusts the level.
pub fn init(level: LevelFilter) {
    // set_logger fails after the first call; the level is still applied
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}

fn format_record(target: &str, line: Option<u32>, args: &str) -> String {
    format!("[{}:{}] {}", target, line.unwrap_or(0), args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_prefix() {
        assert_eq!(
            format_record("pdf_viewer_wasm::viewer", Some(42), "rendered page 3"),
            "[pdf_viewer_wasm::viewer:42] rendered page 3"
        );
        assert_eq!(format_record("x", None, "y"), "[x:0] y");
    }
}
