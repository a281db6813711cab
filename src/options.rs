//! Front-end configuration: pass gates and the language dialect.

/// Line-comment dialect selector.
///
/// Under [`Dialect::C89`] a `//` is not a comment: the lexer returns a
/// division token for the first `/` and leaves the second one pending.
/// Under [`Dialect::C99`] a `//` starts a line comment that must be closed
/// by a newline before end of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    C89,
    C99,
}

/// Options controlling a single front-end run.
#[derive(Debug, Clone)]
pub struct Options {
    /// Run the parse pass at all.
    pub parse: bool,
    /// Render the parsed tree into the diagnostics output stream.
    pub dump_parse: bool,
    pub dialect: Dialect,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            parse: true,
            dump_parse: false,
            dialect: Dialect::C99,
        }
    }
}
