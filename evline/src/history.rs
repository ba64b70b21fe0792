//! Line history
//!
//! Entries are kept oldest first. While browsing, the navigator holds
//! an index into the entries together with the input that was being
//! typed when browsing started, so it can be put back afterwards.

use std::collections::VecDeque;

use tracing::debug;

/// Number of entries kept unless configured otherwise
pub const DEFAULT_HISTORY_LIMIT: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Browsing {
    index: usize,
    unsaved: String,
}

#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<String>,
    limit: Option<usize>,
    browsing: Option<Browsing>,
}

impl History {
    /// Create empty history holding at most `limit` entries, `None`
    /// meaning unbounded
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            entries: VecDeque::new(),
            limit,
            browsing: None,
        }
    }

    pub fn unbounded() -> Self {
        Self::new(None)
    }

    /// Entries, oldest first
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Index of the entry being browsed
    pub fn position(&self) -> Option<usize> {
        self.browsing.as_ref().map(|browsing| browsing.index)
    }

    /// Append an entry. Returns the unsaved input if the limit evicted
    /// the entry being browsed.
    pub fn add(&mut self, entry: impl Into<String>) -> Option<String> {
        self.entries.push_back(entry.into());
        self.enforce_limit()
    }

    /// Change the limit, dropping the oldest entries that no longer
    /// fit. Returns the unsaved input if browsing had to stop.
    pub fn set_limit(&mut self, limit: Option<usize>) -> Option<String> {
        self.limit = limit;
        self.enforce_limit()
    }

    /// Remove all entries. Returns the unsaved input if browsing was
    /// active.
    pub fn clear(&mut self) -> Option<String> {
        self.entries.clear();
        self.stop_browsing()
    }

    fn enforce_limit(&mut self) -> Option<String> {
        let excess = self.entries.len().saturating_sub(self.limit?);

        if excess == 0 {
            return None;
        }

        self.entries.drain(..excess);
        debug!(excess, "evicted history entries");

        match self.browsing.as_mut() {
            Some(browsing) if browsing.index >= excess => {
                browsing.index -= excess;
                None
            }
            Some(_) => self.stop_browsing(),
            None => None,
        }
    }

    fn stop_browsing(&mut self) -> Option<String> {
        self.browsing.take().map(|browsing| browsing.unsaved)
    }

    /// Forget the browse position without restoring anything
    pub(crate) fn reset(&mut self) {
        self.browsing = None;
    }

    /// Step to the previous entry. `current` is remembered when
    /// browsing starts.
    pub(crate) fn move_up(&mut self, current: &str) -> Option<&str> {
        let index = match self.position() {
            None if self.entries.is_empty() => return None,
            None => {
                let index = self.entries.len() - 1;

                self.browsing = Some(Browsing {
                    index,
                    unsaved: current.to_string(),
                });

                index
            }
            Some(0) => return None,
            Some(index) => {
                self.set_position(index - 1);
                index - 1
            }
        };

        self.entries.get(index).map(String::as_str)
    }

    /// Step to the next entry. Moving past the newest entry ends
    /// browsing and yields the unsaved input.
    pub(crate) fn move_down(&mut self) -> Option<String> {
        let index = self.position()? + 1;

        if index < self.entries.len() {
            self.set_position(index);
            self.entries.get(index).cloned()
        } else {
            self.stop_browsing()
        }
    }

    fn set_position(&mut self, index: usize) {
        if let Some(browsing) = self.browsing.as_mut() {
            browsing.index = index;
        }
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(Some(DEFAULT_HISTORY_LIMIT))
    }
}
