//! Terminal alert fallback

use std::io::{self, Write};

use super::Alert;

/// Rings the terminal bell and prints the message to stderr.
///
/// The write is flushed before returning, so the caller is blocked until the
/// alert has been delivered to the terminal.
#[derive(Debug, Clone, Default)]
pub struct TerminalAlert;

impl TerminalAlert {
    pub fn new() -> Self {
        Self
    }
}

impl Alert for TerminalAlert {
    fn alert(&self, message: &str) {
        let mut stderr = io::stderr().lock();
        // Nowhere left to report a broken stderr.
        let _ = writeln!(stderr, "\x07{}", message);
        let _ = stderr.flush();
    }
}
