//! Diagnostic sink: collects error lines and pass output for one run.
//!
//! Diagnostics carry no source position. A failed run appends exactly one
//! newline-terminated error line; the dump pass appends to the separate
//! output stream.

/// Accumulates the error and output streams of a front-end run.
#[derive(Debug, Default)]
pub struct Diagnostics {
    errors: String,
    output: String,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one error line. The terminating newline is added here so
    /// callers store messages without it.
    pub fn error(&mut self, message: &str) {
        self.errors.push_str(message);
        self.errors.push('\n');
    }

    /// Append pass output (e.g. the rendered tree).
    pub fn append_output(&mut self, text: &str) {
        self.output.push_str(text);
    }

    pub fn errors(&self) -> &str {
        &self.errors
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
