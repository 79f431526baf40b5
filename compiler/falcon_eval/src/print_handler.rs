//! Print handler for configurable program output.
//!
//! `print`/`say` write to the output stream, `log` to the log stream
//! with a `log:` prefix. The handler decides where those streams go:
//! stdout/stderr in the CLI, a capture buffer in tests, or nowhere.
//! Enum dispatch keeps this frequently-hit path free of vtable calls.

use parking_lot::Mutex;

/// Where interpreter output goes.
pub enum PrintHandler {
    /// Output to stdout, log lines to stderr (CLI default).
    Stdout,
    /// Capture everything into one buffer, in emit order.
    Buffer(Mutex<String>),
    /// Discard all output.
    Silent,
}

impl PrintHandler {
    /// Create a capturing handler for tests and embedding.
    pub fn buffer() -> PrintHandler {
        PrintHandler::Buffer(Mutex::new(String::new()))
    }

    /// Emit one line of program output (`print` / `say`).
    pub fn say(&self, msg: &str) {
        match self {
            PrintHandler::Stdout => println!("{msg}"),
            PrintHandler::Buffer(buf) => {
                let mut buf = buf.lock();
                buf.push_str(msg);
                buf.push('\n');
            }
            PrintHandler::Silent => {}
        }
    }

    /// Emit one line to the log stream (`log`).
    pub fn log(&self, msg: &str) {
        match self {
            PrintHandler::Stdout => eprintln!("log: {msg}"),
            PrintHandler::Buffer(buf) => {
                let mut buf = buf.lock();
                buf.push_str("log: ");
                buf.push_str(msg);
                buf.push('\n');
            }
            PrintHandler::Silent => {}
        }
    }

    /// All captured output. Empty for handlers that do not capture.
    pub fn get_output(&self) -> String {
        match self {
            PrintHandler::Buffer(buf) => buf.lock().clone(),
            PrintHandler::Stdout | PrintHandler::Silent => String::new(),
        }
    }

    /// Drop captured output.
    pub fn clear(&self) {
        if let PrintHandler::Buffer(buf) = self {
            buf.lock().clear();
        }
    }
}

impl Default for PrintHandler {
    fn default() -> Self {
        PrintHandler::Stdout
    }
}
