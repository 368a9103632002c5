//! In-memory history stack.

use crate::history::History;
use crate::routing::matcher::Location;

/// A linear history with a cursor, like a browser tab's session history.
#[derive(Debug, Default)]
pub struct MemoryHistory {
    entries: Vec<Location>,
    index: usize,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn entries(&self) -> &[Location] {
        &self.entries
    }

    fn offset(&self, delta: isize) -> Option<usize> {
        if self.entries.is_empty() {
            return None;
        }
        let target = self.index.checked_add_signed(delta)?;
        (target < self.entries.len()).then_some(target)
    }
}

impl History for MemoryHistory {
    fn current(&self) -> Option<&Location> {
        self.entries.get(self.index)
    }

    fn push(&mut self, location: Location) {
        if self.entries.is_empty() {
            self.entries.push(location);
            self.index = 0;
            return;
        }
        self.entries.truncate(self.index + 1);
        self.entries.push(location);
        self.index = self.entries.len() - 1;
    }

    fn replace(&mut self, location: Location) {
        match self.entries.get_mut(self.index) {
            Some(entry) => *entry = location,
            None => self.push(location),
        }
    }

    fn peek(&self, delta: isize) -> Option<&Location> {
        self.offset(delta).map(|i| &self.entries[i])
    }

    fn go(&mut self, delta: isize) -> bool {
        match self.offset(delta) {
            Some(target) => {
                self.index = target;
                true
            }
            None => false,
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
