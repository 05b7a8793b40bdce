//! Byte cursor used by the OBJ parser.
//!
//! The scanner never fails on its own: numeric parsers return `None` and leave
//! the cursor where it was, and the caller decides whether that is an error.
//! Line and column are tracked as the cursor moves so errors can be reported
//! without rescanning the buffer.

pub struct Scanner<'a> {
    text: &'a [u8],
    offset: usize,
    line: usize,
    line_start: usize,
}

/// Whitespace as C's `isspace` defines it.
fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

fn is_inline_space(byte: u8) -> bool {
    byte != b'\n' && is_space(byte)
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a [u8]) -> Self {
        Self {
            text,
            offset: 0,
            line: 1,
            line_start: 0,
        }
    }

    pub fn at_end(&self) -> bool {
        self.offset >= self.text.len()
    }

    pub fn peek(&self) -> Option<u8> {
        self.text.get(self.offset).copied()
    }

    fn peek_at(&self, ahead: usize) -> Option<u8> {
        self.text.get(self.offset + ahead).copied()
    }

    fn remaining(&self) -> &'a [u8] {
        &self.text[self.offset.min(self.text.len())..]
    }

    /// Moves the cursor forward by `count` bytes, stopping at the end of the buffer.
    pub fn advance(&mut self, count: usize) {
        let end = self.offset.saturating_add(count).min(self.text.len());
        for position in self.offset..end {
            if self.text[position] == b'\n' {
                self.line += 1;
                self.line_start = position + 1;
            }
        }
        self.offset = end;
    }

    /// 1-based line and column of the cursor.
    pub fn location(&self) -> (usize, usize) {
        (self.line, self.offset - self.line_start + 1)
    }

    /// Skips to just past the next newline, or to the end of the buffer.
    pub fn skip_line(&mut self) {
        let rest = self.remaining();
        let count = match rest.iter().position(|&b| b == b'\n') {
            Some(newline) => newline + 1,
            None => rest.len(),
        };
        self.advance(count);
    }

    pub fn skip_whitespace_and_comments(&mut self) {
        while let Some(byte) = self.peek() {
            if is_space(byte) {
                self.advance(1);
            } else if byte == b'#' {
                self.skip_line();
            } else {
                break;
            }
        }
    }

    /// Skips whitespace without crossing a newline.
    pub fn skip_inline_whitespace(&mut self) {
        let count = self
            .remaining()
            .iter()
            .take_while(|&&b| is_inline_space(b))
            .count();
        self.advance(count);
    }

    /// True at the end of the buffer, on a newline, or at the start of a comment.
    pub fn at_line_end(&self) -> bool {
        matches!(self.peek(), None | Some(b'\n') | Some(b'#'))
    }

    pub fn match_literal(&mut self, literal: &str) -> bool {
        if self.remaining().starts_with(literal.as_bytes()) {
            self.advance(literal.len());
            true
        } else {
            false
        }
    }

    /// Like [`match_literal`](Self::match_literal), but `word` must not be
    /// followed by an alphanumeric byte, so `"v"` does not match `"vt"`.
    pub fn match_word(&mut self, word: &str) -> bool {
        if !self.remaining().starts_with(word.as_bytes()) {
            return false;
        }
        match self.peek_at(word.len()) {
            Some(next) if next.is_ascii_alphanumeric() => false,
            _ => {
                self.advance(word.len());
                true
            }
        }
    }

    /// Parses a C-style floating point literal at the cursor.
    pub fn parse_float(&mut self) -> Option<f32> {
        let length = float_literal_length(self.remaining())?;
        let literal = std::str::from_utf8(&self.remaining()[..length]).ok()?;
        let value = literal.parse::<f32>().ok()?;
        self.advance(length);
        Some(value)
    }

    /// Parses a base-10 signed integer at the cursor.
    ///
    /// Values outside the `i64` range saturate instead of failing, so the
    /// caller still sees that a number was written.
    pub fn parse_int(&mut self) -> Option<i64> {
        let rest = self.remaining();
        let sign = usize::from(matches!(rest.first(), Some(b'+' | b'-')));
        let digits = count_digits(&rest[sign..]);
        if digits == 0 {
            return None;
        }

        let length = sign + digits;
        let magnitude = rest[sign..length].iter().fold(0i64, |acc, &digit| {
            acc.saturating_mul(10)
                .saturating_add(i64::from(digit - b'0'))
        });
        let value = if rest[0] == b'-' { -magnitude } else { magnitude };
        self.advance(length);
        Some(value)
    }
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Length of the float literal at the start of `bytes`, if there is one.
///
/// Accepts `[+-]? (digits [. digits?] | . digits) ([eE] [+-]? digits)?` and
/// the special values `inf`, `infinity` and `nan` (any case). An exponent
/// marker with no digits after it is not part of the literal.
fn float_literal_length(bytes: &[u8]) -> Option<usize> {
    let mut length = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    for special in ["infinity", "inf", "nan"] {
        let candidate = &bytes[length..];
        if candidate.len() >= special.len()
            && candidate[..special.len()].eq_ignore_ascii_case(special.as_bytes())
        {
            return Some(length + special.len());
        }
    }

    let integer_digits = count_digits(&bytes[length..]);
    length += integer_digits;

    let mut fraction_digits = 0;
    if bytes.get(length) == Some(&b'.') {
        fraction_digits = count_digits(&bytes[length + 1..]);
        if integer_digits > 0 || fraction_digits > 0 {
            length += 1 + fraction_digits;
        }
    }

    if integer_digits == 0 && fraction_digits == 0 {
        return None;
    }

    if matches!(bytes.get(length), Some(b'e' | b'E')) {
        let mut exponent = length + 1;
        if matches!(bytes.get(exponent), Some(b'+' | b'-')) {
            exponent += 1;
        }
        let exponent_digits = count_digits(&bytes[exponent.min(bytes.len())..]);
        if exponent_digits > 0 {
            length = exponent + exponent_digits;
        }
    }

    Some(length)
}
