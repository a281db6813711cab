//! Named immutable source buffers and the character cursor used by the lexer.

/// An in-memory compilation unit: a name (for reporting) and its text.
///
/// The buffer is immutable after construction and is only ever read through
/// random access by offset; no line or column bookkeeping is done.
#[derive(Debug, Clone)]
pub struct SourceFile {
    name: String,
    chars: Vec<char>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, text: &str) -> Self {
        Self {
            name: name.into(),
            chars: text.chars().collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Character at `pos`, or `None` past the end.
    pub fn peek(&self, pos: usize) -> Option<char> {
        self.chars.get(pos).copied()
    }
}

/// Forward-only cursor over a [`SourceFile`].
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    file: &'a SourceFile,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(file: &'a SourceFile) -> Self {
        Self { file, pos: 0 }
    }

    pub fn at_end(&self) -> bool {
        self.pos == self.file.len()
    }

    /// Current character without consuming it; `None` at end of input.
    pub fn peek(&self) -> Option<char> {
        self.file.peek(self.pos)
    }

    /// Consume one character. Must not be called at end of input.
    pub fn advance(&mut self) {
        debug_assert!(!self.at_end());
        self.pos += 1;
    }

    /// Current character, consuming it; `None` at end of input.
    pub fn peek_and_advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.advance();
        Some(c)
    }
}
