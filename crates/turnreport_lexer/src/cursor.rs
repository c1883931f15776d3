//! Buffered, rewindable cursor over a lazy item stream.
//!
//! The cursor pulls items from the underlying iterator only when asked and
//! keeps a short history so parsers can step back. Bookmarks pin the buffer
//! so a speculative parse can be rolled back to any depth.
//!
//! Positions are absolute indices into the stream. Items older than the
//! history window and older than the lowest live bookmark are dropped.

use std::collections::VecDeque;

use turnreport_foundation::{CancelFlag, Error, ErrorKind, Result};

use crate::block::Block;

/// Items retained behind the current position by default.
pub const DEFAULT_HISTORY: usize = 4;

/// Items that know the last source line they cover.
pub trait Located {
    /// Last 1-based source line of the item.
    fn source_line(&self) -> usize;
}

impl Located for Block {
    fn source_line(&self) -> usize {
        self.last_line()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Mark {
    pos: Option<usize>,
    at_end: bool,
}

/// A cursor over blocks read from a report.
pub type BlockCursor<I> = Cursor<I, Block>;

/// A rewindable cursor.
pub struct Cursor<I, T> {
    source: I,
    buffer: VecDeque<T>,
    /// Absolute index of `buffer[0]`.
    base: usize,
    /// Absolute index of the current item. `None` before the first `next`.
    pos: Option<usize>,
    at_end: bool,
    exhausted: bool,
    bookmarks: Vec<Mark>,
    history: usize,
    cancel: Option<CancelFlag>,
    last_line: usize,
}

impl<I, T> Cursor<I, T>
where
    I: Iterator<Item = Result<T>>,
    T: Located,
{
    /// Creates a cursor with the default history window.
    pub fn new(source: I) -> Self {
        Self::with_history(source, DEFAULT_HISTORY)
    }

    /// Creates a cursor that keeps `history` items behind the current one.
    pub fn with_history(source: I, history: usize) -> Self {
        Self {
            source,
            buffer: VecDeque::new(),
            base: 0,
            pos: None,
            at_end: false,
            exhausted: false,
            bookmarks: Vec::new(),
            history,
            cancel: None,
            last_line: 0,
        }
    }

    /// Makes `next` fail with [`ErrorKind::Cancelled`] once `flag` is set.
    #[must_use]
    pub fn with_cancel(mut self, flag: CancelFlag) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Advances to the next item. Returns false at end of stream.
    ///
    /// # Errors
    /// Returns the source's error, or [`ErrorKind::Cancelled`] if the
    /// cancel flag is set.
    pub fn next(&mut self) -> Result<bool> {
        if self.at_end {
            return Ok(false);
        }
        if let Some(flag) = &self.cancel {
            if flag.is_cancelled() {
                return Err(Error::new(ErrorKind::Cancelled {
                    line: self.last_line,
                }));
            }
        }
        let target = self.pos.map_or(0, |p| p + 1);
        if !self.fill_to(target)? {
            self.at_end = true;
            return Ok(false);
        }
        self.pos = Some(target);
        self.trim();
        Ok(true)
    }

    /// Steps back one item.
    ///
    /// After a `next` that returned false this only leaves the end state, so
    /// the last item becomes current again.
    ///
    /// # Errors
    /// Returns a cursor error before the first `next`, at the first item, or
    /// when the previous item is outside the retained history.
    pub fn back(&mut self) -> Result<()> {
        if self.at_end {
            self.at_end = false;
            return Ok(());
        }
        match self.pos {
            None => Err(Error::cursor("back() called before next()")),
            Some(0) => Err(Error::cursor("back() past the start of the stream")),
            Some(p) if p - 1 < self.base => Err(Error::cursor(format!(
                "back() beyond retained history ({} items)",
                self.history
            ))),
            Some(p) => {
                self.pos = Some(p - 1);
                Ok(())
            }
        }
    }

    /// The current item, if any.
    #[must_use]
    pub fn current(&self) -> Option<&T> {
        if self.at_end {
            return None;
        }
        self.pos.and_then(|p| self.buffer.get(p - self.base))
    }

    /// Looks `n` items ahead of the current one without moving.
    /// `peek(0)` is the current item.
    ///
    /// # Errors
    /// Propagates source errors.
    pub fn peek(&mut self, n: usize) -> Result<Option<&T>> {
        if self.at_end {
            return Ok(None);
        }
        let target = match self.pos {
            Some(p) => p + n,
            None => match n.checked_sub(1) {
                Some(t) => t,
                None => return Ok(None),
            },
        };
        if !self.fill_to(target)? {
            return Ok(None);
        }
        Ok(self.buffer.get(target - self.base))
    }

    /// Advances past every upcoming item matching `pred`. The next call to
    /// `next` yields the first item that did not match.
    ///
    /// Returns the number of items skipped.
    ///
    /// # Errors
    /// Propagates source and cancellation errors.
    pub fn skip_while(&mut self, mut pred: impl FnMut(&T) -> bool) -> Result<usize> {
        let mut skipped = 0;
        while self.peek(1)?.is_some_and(&mut pred) {
            self.next()?;
            skipped += 1;
        }
        Ok(skipped)
    }

    /// Advances until the upcoming item matches `pred`.
    ///
    /// # Errors
    /// Propagates source and cancellation errors.
    pub fn skip_until(&mut self, mut pred: impl FnMut(&T) -> bool) -> Result<usize> {
        self.skip_while(|item| !pred(item))
    }

    /// True once `next` has returned false.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.at_end
    }

    /// Absolute index of the current item.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        if self.at_end { None } else { self.pos }
    }

    /// Last source line pulled from the stream.
    #[must_use]
    pub fn last_line(&self) -> usize {
        self.last_line
    }

    // -------------------------------------------------------------------------
    // Bookmarks
    // -------------------------------------------------------------------------

    /// Remembers the current position. Returns the new bookmark depth.
    pub fn push_bookmark(&mut self) -> usize {
        self.bookmarks.push(Mark {
            pos: self.pos,
            at_end: self.at_end,
        });
        self.bookmarks.len()
    }

    /// Returns to the innermost bookmark and discards it.
    ///
    /// # Errors
    /// Returns a cursor error if no bookmark is set.
    pub fn pop_bookmark(&mut self) -> Result<()> {
        let mark = self
            .bookmarks
            .pop()
            .ok_or_else(|| Error::cursor("pop_bookmark() without a bookmark"))?;
        self.pos = mark.pos;
        self.at_end = mark.at_end;
        self.trim();
        Ok(())
    }

    /// Discards the innermost bookmark and keeps the current position.
    ///
    /// # Errors
    /// Returns a cursor error if no bookmark is set.
    pub fn remove_bookmark(&mut self) -> Result<()> {
        self.bookmarks
            .pop()
            .ok_or_else(|| Error::cursor("remove_bookmark() without a bookmark"))?;
        self.trim();
        Ok(())
    }

    /// Number of live bookmarks.
    #[must_use]
    pub fn bookmark_depth(&self) -> usize {
        self.bookmarks.len()
    }

    /// Runs a speculative parse. The position is kept when `f` returns
    /// `Some` and restored when it returns `None` or fails.
    ///
    /// # Errors
    /// Propagates the error from `f` after restoring the position.
    pub fn attempt<R>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<Option<R>>,
    ) -> Result<Option<R>> {
        self.push_bookmark();
        match f(self) {
            Ok(Some(value)) => {
                self.remove_bookmark()?;
                Ok(Some(value))
            }
            Ok(None) => {
                self.pop_bookmark()?;
                Ok(None)
            }
            Err(e) => {
                self.pop_bookmark()?;
                Err(e)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Buffer management
    // -------------------------------------------------------------------------

    /// Pulls until absolute index `target` is buffered. False if the stream
    /// ends first.
    fn fill_to(&mut self, target: usize) -> Result<bool> {
        while target >= self.base + self.buffer.len() {
            if self.exhausted {
                return Ok(false);
            }
            match self.source.next() {
                Some(item) => {
                    let item = item?;
                    self.last_line = item.source_line();
                    self.buffer.push_back(item);
                }
                None => {
                    self.exhausted = true;
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }

    fn trim(&mut self) {
        let Some(pos) = self.pos else {
            return;
        };
        let mut keep_from = pos.saturating_sub(self.history);
        for mark in &self.bookmarks {
            // A bookmark taken before the first item pins everything.
            keep_from = keep_from.min(mark.pos.unwrap_or(0));
        }
        while self.base < keep_from && !self.buffer.is_empty() {
            self.buffer.pop_front();
            self.base += 1;
        }
    }
}
