//! Fixed-length ordered series
//!
//! Holds a series whose length is decided once at construction. Items can be
//! read and the newest item updated in place, but nothing can be appended or removed.

use serde::{Deserialize, Serialize};

/// A fixed-length series ordered oldest to newest
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FixedSeries<T> {
    buf: Box<[T]>,
}

impl<T> FixedSeries<T> {
    /// Freeze the given items into a series of their current length
    pub fn new(items: Vec<T>) -> Self {
        Self {
            buf: items.into_boxed_slice(),
        }
    }

    /// Update the newest item in place
    pub fn update_last(&mut self, f: impl FnOnce(&mut T)) {
        if let Some(slot) = self.buf.last_mut() {
            f(slot);
        }
    }

    /// Iterate oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buf.iter()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Get the most recent item
    pub fn last(&self) -> Option<&T> {
        self.buf.last()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.buf
    }
}

impl<T> FromIterator<T> for FixedSeries<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
