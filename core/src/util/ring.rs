use std::collections::vec_deque::{Iter, IterMut};
use std::collections::VecDeque;

/// Fixed-capacity FIFO. Pushing onto a full deque evicts the oldest entry.
#[derive(Debug, Clone)]
pub struct BoundedDeque<T> {
    inner: VecDeque<T>,
    cap: usize,
}

impl<T> BoundedDeque<T> {
    pub fn new(cap: usize) -> Self {
        Self {
            inner: VecDeque::with_capacity(cap),
            cap,
        }
    }

    pub fn push(&mut self, item: T) {
        if self.cap == 0 {
            return;
        }
        if self.inner.len() == self.cap {
            self.inner.pop_front();
        }
        self.inner.push_back(item);
    }

    pub fn extend<I: IntoIterator<Item = T>>(&mut self, items: I) {
        for item in items {
            self.push(item);
        }
    }

    /// Drops every entry matching `pred`, keeping the order of the rest.
    pub fn remove_where<F: FnMut(&T) -> bool>(&mut self, mut pred: F) {
        self.inner.retain(|item| !pred(item));
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.inner.iter()
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        self.inner.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<T: Clone> BoundedDeque<T> {
    pub fn to_vec(&self) -> Vec<T> {
        let mut vec = Vec::with_capacity(self.inner.len());
        vec.extend(self.inner.iter().cloned());
        vec
    }
}

impl<'a, T> IntoIterator for &'a BoundedDeque<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}
