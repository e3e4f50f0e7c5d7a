//! Bounded ring buffer
//!
//! Fixed-capacity deque that drops the oldest entry once full.

use std::collections::VecDeque;

#[derive(Clone, Debug)]
pub struct BoundedDeque<T> {
    cap: usize,
    buf: VecDeque<T>,
}

impl<T> BoundedDeque<T> {
    /// A capacity of 0 makes every push a no-op
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            buf: VecDeque::with_capacity(cap.min(256)),
        }
    }

    /// Push a value, returning the evicted one if the buffer was full
    pub fn push(&mut self, value: T) -> Option<T> {
        if self.cap == 0 {
            return None;
        }
        let evicted = if self.buf.len() == self.cap {
            self.buf.pop_front()
        } else {
            None
        };
        self.buf.push_back(value);
        evicted
    }

    pub fn extend(&mut self, values: impl IntoIterator<Item = T>) {
        for value in values {
            self.push(value);
        }
    }

    /// Oldest to newest
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> {
        self.buf.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.buf.iter_mut()
    }

    pub fn retain(&mut self, f: impl FnMut(&T) -> bool) {
        self.buf.retain(f);
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.cap
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }

    pub fn last(&self) -> Option<&T> {
        self.buf.back()
    }
}

impl<T> Default for BoundedDeque<T> {
    fn default() -> Self {
        Self::new(100)
    }
}
