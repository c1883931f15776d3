//! Position-tracking scanner over the joined text of one block.
//!
//! Every primitive either matches and advances, or returns `None`/`false`
//! and leaves the position unchanged. A miss is not an error; entity
//! parsers decide which misses are fatal.

/// Scanner over a single logical line.
#[derive(Clone, Debug)]
pub struct Scanner<'a> {
    text: &'a str,
    pos: usize,
    marks: Vec<usize>,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner at the start of `text`.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            marks: Vec::new(),
        }
    }

    /// The whole text being scanned.
    #[must_use]
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Byte offset of the current position.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Text from the current position on.
    #[must_use]
    pub fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    /// True when nothing but whitespace remains.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.rest().trim().is_empty()
    }

    /// The next character without consuming it.
    #[must_use]
    pub fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// True if the remaining text starts with `lit`.
    #[must_use]
    pub fn looking_at(&self, lit: &str) -> bool {
        self.rest().starts_with(lit)
    }

    // =========================================================================
    // Literals and whitespace
    // =========================================================================

    /// Skips spaces and tabs.
    pub fn skip_whitespace(&mut self) -> &mut Self {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
        self
    }

    /// Consumes `lit` if the remaining text starts with it.
    pub fn match_literal(&mut self, lit: &str) -> bool {
        if self.rest().starts_with(lit) {
            self.pos += lit.len();
            true
        } else {
            false
        }
    }

    /// Consumes `lit` ignoring ASCII case.
    pub fn match_ignore_case(&mut self, lit: &str) -> bool {
        match self.rest().get(..lit.len()) {
            Some(head) if head.eq_ignore_ascii_case(lit) => {
                self.pos += lit.len();
                true
            }
            _ => false,
        }
    }

    /// Consumes one character if it equals `c`.
    pub fn match_char(&mut self, c: char) -> bool {
        if self.peek_char() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    // =========================================================================
    // Numbers
    // =========================================================================

    /// Reads an optionally signed integer.
    pub fn integer(&mut self) -> Option<i64> {
        let rest = self.rest();
        let sign_len = usize::from(rest.starts_with('-') || rest.starts_with('+'));
        let digits = rest[sign_len..]
            .bytes()
            .take_while(u8::is_ascii_digit)
            .count();
        if digits == 0 {
            return None;
        }
        let value = rest[..sign_len + digits].parse().ok()?;
        self.pos += sign_len + digits;
        Some(value)
    }

    /// Reads an unsigned integer that fits in `u32`.
    pub fn number(&mut self) -> Option<u32> {
        let digits = self.rest().bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return None;
        }
        let value = self.rest()[..digits].parse().ok()?;
        self.pos += digits;
        Some(value)
    }

    /// Reads a decimal such as `15.2`. A trailing sentence period is not
    /// consumed.
    pub fn decimal(&mut self) -> Option<f64> {
        let rest = self.rest();
        let whole = rest.bytes().take_while(u8::is_ascii_digit).count();
        if whole == 0 {
            return None;
        }
        let mut len = whole;
        let tail = &rest.as_bytes()[whole..];
        if tail.first() == Some(&b'.') {
            let frac = tail[1..].iter().take_while(|b| b.is_ascii_digit()).count();
            if frac > 0 {
                len += 1 + frac;
            }
        }
        let value = rest[..len].parse().ok()?;
        self.pos += len;
        Some(value)
    }

    // =========================================================================
    // Delimited text
    // =========================================================================

    /// Returns the text before the first `delim` and moves past the delimiter.
    pub fn before(&mut self, delim: &str) -> Option<&'a str> {
        let rest = self.rest();
        let at = rest.find(delim)?;
        self.pos += at + delim.len();
        Some(&rest[..at])
    }

    /// Moves past the first `delim`. The skipped text is returned.
    pub fn after(&mut self, delim: &str) -> Option<&'a str> {
        self.before(delim)
    }

    /// Returns the text before the last `delim` and moves past it.
    pub fn before_backwards(&mut self, delim: &str) -> Option<&'a str> {
        let rest = self.rest();
        let at = rest.rfind(delim)?;
        self.pos += at + delim.len();
        Some(&rest[..at])
    }

    /// Reads `open ... close` at the current position and returns the inner
    /// text. Nested pairs are balanced when `open != close`.
    pub fn between(&mut self, open: char, close: char) -> Option<&'a str> {
        let rest = self.rest();
        let mut chars = rest.char_indices();
        match chars.next() {
            Some((_, c)) if c == open => {}
            _ => return None,
        }
        let start = open.len_utf8();
        let mut depth = 1usize;
        for (i, c) in chars {
            if c == close {
                depth -= 1;
                if depth == 0 {
                    self.pos += i + close.len_utf8();
                    return Some(&rest[start..i]);
                }
            } else if c == open {
                depth += 1;
            }
        }
        None
    }

    /// Reads a `[CODE]` abbreviation.
    pub fn bracketed_code(&mut self) -> Option<&'a str> {
        self.between('[', ']')
    }

    /// Reads a `"quoted"` string.
    pub fn quoted(&mut self) -> Option<&'a str> {
        self.between('"', '"')
    }

    /// Reads up to (not including) the first of `stops`, or to the end.
    pub fn until_any(&mut self, stops: &[char]) -> &'a str {
        let rest = self.rest();
        let at = rest.find(stops).unwrap_or(rest.len());
        self.pos += at;
        &rest[..at]
    }

    /// Consumes everything that remains.
    pub fn take_rest(&mut self) -> &'a str {
        let rest = self.rest();
        self.pos = self.text.len();
        rest
    }

    /// Reads one clause: text up to a `,` or `;` outside brackets and
    /// parentheses, or up to a period that ends a sentence. The terminator
    /// is not consumed. Returns `None` if the clause would be empty.
    pub fn clause(&mut self) -> Option<&'a str> {
        let rest = self.rest();
        let bytes = rest.as_bytes();
        let mut depth = 0usize;
        let mut end = rest.len();
        for (i, &b) in bytes.iter().enumerate() {
            match b {
                b'(' | b'[' => depth += 1,
                b')' | b']' => depth = depth.saturating_sub(1),
                b',' | b';' if depth == 0 => {
                    end = i;
                    break;
                }
                b'.' if depth == 0 && bytes.get(i + 1).is_none_or(|n| *n == b' ') => {
                    end = i;
                    break;
                }
                _ => {}
            }
        }
        let clause = rest[..end].trim();
        if clause.is_empty() {
            return None;
        }
        self.pos += end;
        Some(clause)
    }

    /// Reads free text up to a sentence-ending period outside brackets and
    /// parentheses. Commas and semicolons are part of the sentence. The
    /// period is not consumed.
    pub fn sentence(&mut self) -> Option<&'a str> {
        let rest = self.rest();
        let bytes = rest.as_bytes();
        let mut depth = 0usize;
        let mut end = rest.len();
        for (i, &b) in bytes.iter().enumerate() {
            match b {
                b'(' | b'[' => depth += 1,
                b')' | b']' => depth = depth.saturating_sub(1),
                b'.' if depth == 0 && bytes.get(i + 1).is_none_or(|n| *n == b' ') => {
                    end = i;
                    break;
                }
                _ => {}
            }
        }
        let sentence = rest[..end].trim();
        if sentence.is_empty() {
            return None;
        }
        self.pos += end;
        Some(sentence)
    }

    /// Reads a `sep`-separated list. If an item fails after a separator the
    /// separator is left unconsumed.
    pub fn list<T>(
        &mut self,
        sep: &str,
        mut item: impl FnMut(&mut Scanner<'a>) -> Option<T>,
    ) -> Vec<T> {
        let mut out = Vec::new();
        self.skip_whitespace();
        let Some(first) = self.attempt(&mut item) else {
            return out;
        };
        out.push(first);
        loop {
            let before = self.pos;
            self.skip_whitespace();
            if !self.match_literal(sep) {
                self.pos = before;
                break;
            }
            self.skip_whitespace();
            match self.attempt(&mut item) {
                Some(next) => out.push(next),
                None => {
                    self.pos = before;
                    break;
                }
            }
        }
        out
    }

    // =========================================================================
    // Bookmarks
    // =========================================================================

    /// Remembers the current position.
    pub fn push_bookmark(&mut self) {
        self.marks.push(self.pos);
    }

    /// Returns to the innermost bookmark. False if none was set.
    pub fn pop_bookmark(&mut self) -> bool {
        match self.marks.pop() {
            Some(pos) => {
                self.pos = pos;
                true
            }
            None => false,
        }
    }

    /// Forgets the innermost bookmark, keeping the position.
    pub fn remove_bookmark(&mut self) -> bool {
        self.marks.pop().is_some()
    }

    /// Runs `f`, restoring the position if it returns `None`.
    pub fn attempt<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        self.push_bookmark();
        let result = f(self);
        if result.is_some() {
            self.remove_bookmark();
        } else {
            self.pop_bookmark();
        }
        result
    }
}
