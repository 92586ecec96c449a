#![forbid(unsafe_code)]

//! `tracing` output to the browser console.
//!
//! A `tracing-subscriber` fmt layer formats events (no timestamps: there is
//! no wall clock on `wasm32-unknown-unknown`; no ANSI) and hands each one to
//! a [`ConsoleWriter`], which forwards whole lines to the console method
//! matching the event level.

use std::io;
use std::sync::Once;

use tracing::level_filters::LevelFilter;
use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use wasm_bindgen::JsValue;

use crate::log_sink::{LineBuffer, panic_line};

pub struct ConsoleWriter {
    level: Level,
    lines: LineBuffer,
}

impl ConsoleWriter {
    fn emit(&self, line: &str) {
        let msg = JsValue::from_str(line);
        if self.level == Level::ERROR {
            web_sys::console::error_1(&msg);
        } else if self.level == Level::WARN {
            web_sys::console::warn_1(&msg);
        } else if self.level == Level::INFO {
            web_sys::console::info_1(&msg);
        } else {
            web_sys::console::debug_1(&msg);
        }
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.lines.push(bytes);
        while let Some(line) = self.lines.take_line() {
            self.emit(&line);
        }
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Some(rest) = self.lines.finish() {
            self.emit(&rest);
        }
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let _ = io::Write::flush(self);
    }
}

/// [`MakeWriter`] producing one [`ConsoleWriter`] per event.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeConsoleWriter;

impl<'a> MakeWriter<'a> for MakeConsoleWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            level: Level::INFO,
            lines: LineBuffer::default(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            level: *meta.level(),
            lines: LineBuffer::default(),
        }
    }
}

/// Install the console subscriber once. Later calls are no-ops.
pub fn install(max_level: LevelFilter) {
    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        let installed = tracing_subscriber::fmt()
            .with_writer(MakeConsoleWriter)
            .with_max_level(max_level)
            .with_ansi(false)
            .without_time()
            .try_init();
        if let Err(err) = installed {
            web_sys::console::warn_1(&JsValue::from_str(&format!(
                "folio: console logging unavailable: {err}"
            )));
        }
    });
}

/// Route panics to `console.error`.
pub fn install_panic_hook() {
    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let payload = info.payload();
            let message = payload
                .downcast_ref::<&str>()
                .copied()
                .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
                .unwrap_or("non-string panic payload");
            let location = info.location().map(|loc| (loc.file(), loc.line()));
            web_sys::console::error_1(&JsValue::from_str(&panic_line(location, message)));
        }));
    });
}
