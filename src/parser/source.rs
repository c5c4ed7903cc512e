//! Descriptor text scanning.
//!
//! Two layers sit under the state machine:
//!
//! - [`mask_source`] blanks comments and preprocessor lines so they never
//!   produce delimiters. Byte length and newlines are preserved, so offsets
//!   into the masked text are offsets into the original.
//! - [`Cursor`] splits the masked text into [`Segment`]s ending at `{`, `;`
//!   or `}`. Delimiters inside double-quoted strings do not count.

/// What ended a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Text before a `{`: a class header, or a nameless block.
    Open,
    /// Text before a `;`: an assignment, declaration, or stray text.
    Statement,
    /// Text before a `}`: closes the innermost block.
    Close,
}

/// A slice of descriptor text up to (not including) its delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub kind: SegmentKind,
    pub text: &'a str,
    /// Byte offset of `text` in the source.
    pub start: usize,
}

impl<'a> Segment<'a> {
    pub fn new(kind: SegmentKind, text: &'a str, start: usize) -> Self {
        Self { kind, text, start }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mask {
    Code,
    Str,
    LineComment,
    BlockComment,
    Directive,
}

/// Replace comments and preprocessor directives with spaces.
///
/// `//` and `/* */` comments are blanked outside strings. A line whose first
/// non-blank character is `#` is a directive and is blanked to its end,
/// following `\` line continuations. Newlines are kept.
pub fn mask_source(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut mode = Mask::Code;
    let mut line_blank = true;
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        match mode {
            Mask::Code => match c {
                '"' => {
                    mode = Mask::Str;
                    out.push(c);
                }
                '/' if chars.peek() == Some(&'/') => {
                    mode = Mask::LineComment;
                    out.push(' ');
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    mode = Mask::BlockComment;
                    out.push_str("  ");
                }
                '#' if line_blank => {
                    mode = Mask::Directive;
                    out.push(' ');
                }
                _ => out.push(c),
            },
            Mask::Str => {
                if c == '"' {
                    mode = Mask::Code;
                }
                out.push(c);
            }
            Mask::LineComment => {
                if c == '\n' {
                    mode = Mask::Code;
                    out.push('\n');
                } else {
                    blank(&mut out, c);
                }
            }
            Mask::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    mode = Mask::Code;
                    out.push_str("  ");
                } else {
                    blank(&mut out, c);
                }
            }
            Mask::Directive => match c {
                '\\' if chars.peek() == Some(&'\n') => {
                    chars.next();
                    out.push_str(" \n");
                }
                // CRLF continuation
                '\\' if chars.peek() == Some(&'\r') => {
                    chars.next();
                    if chars.peek() == Some(&'\n') {
                        chars.next();
                        out.push_str("  \n");
                    } else {
                        out.push_str("  ");
                    }
                }
                '\n' => {
                    mode = Mask::Code;
                    out.push('\n');
                }
                _ => blank(&mut out, c),
            },
        }

        if c == '\n' {
            line_blank = true;
        } else if !c.is_whitespace() {
            line_blank = false;
        }
    }

    out
}

/// Push one space per byte of `c` (newlines stay).
fn blank(out: &mut String, c: char) {
    if c == '\n' {
        out.push('\n');
    } else {
        out.extend(std::iter::repeat(' ').take(c.len_utf8()));
    }
}

/// Forward-only segment reader over masked descriptor text.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    /// Current byte position.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// Read the next segment, or `None` when no delimiter remains.
    ///
    /// An opening brace after an assignment (`color[] = {0,0,0,1};`) is an
    /// array value, not a block: the whole assignment through its `;` comes
    /// back as one statement.
    pub fn next_segment(&mut self) -> Option<Segment<'a>> {
        let start = self.pos;
        let (at, delim) = self.find_delimiter(start)?;
        let text = &self.text[start..at];
        self.pos = at + 1;

        match delim {
            b'{' if text.trim_end().ends_with('=') => self.array_statement(start),
            b'{' => Some(Segment::new(SegmentKind::Open, text, start)),
            b';' => Some(Segment::new(SegmentKind::Statement, text, start)),
            _ => Some(Segment::new(SegmentKind::Close, text, start)),
        }
    }

    /// Skip the rest of a block whose `{` was just consumed.
    ///
    /// Returns `false` if the input ended before the block closed.
    pub fn skip_block(&mut self) -> bool {
        let mut depth = 1usize;
        while let Some((at, delim)) = self.find_delimiter(self.pos) {
            self.pos = at + 1;
            match delim {
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        return true;
                    }
                }
                _ => {}
            }
        }
        self.pos = self.text.len();
        false
    }

    fn array_statement(&mut self, start: usize) -> Option<Segment<'a>> {
        if !self.skip_block() {
            return None;
        }
        // The array ends at the next `;`. Without one, the statement stops
        // after the array and the following delimiter is left for the caller.
        if let Some((at, b';')) = self.find_delimiter(self.pos) {
            self.pos = at + 1;
            return Some(Segment::new(SegmentKind::Statement, &self.text[start..at], start));
        }
        Some(Segment::new(
            SegmentKind::Statement,
            &self.text[start..self.pos],
            start,
        ))
    }

    /// Find the next `{`, `;` or `}` at or after `from`, outside strings.
    fn find_delimiter(&self, from: usize) -> Option<(usize, u8)> {
        let bytes = self.text.as_bytes();
        let mut in_string = false;
        for (i, &b) in bytes.iter().enumerate().skip(from) {
            match b {
                b'"' => in_string = !in_string,
                b'{' | b';' | b'}' if !in_string => return Some((i, b)),
                _ => {}
            }
        }
        None
    }
}
