//! Merge iteration over two sorted sequences.
//!
//! `MergeIter` walks `a` and `b` in the order their merged and sorted
//! concatenation would have, without building that concatenation. Both inputs
//! must already be sorted according to the comparator.
//!
//! When the comparator reports a tie, the element from `a` is emitted and the
//! equal element from `b` is skipped, so equal entries surface once.

use std::cmp::Ordering;

/// Cursor over two sorted slices.
pub struct MergeIter<'a, T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    a: &'a [T],
    b: &'a [T],
    ia: usize,
    ib: usize,
    cmp: F,
    /// Whether the current element comes from `a`.
    last_a: bool,
}

impl<'a, T, F> MergeIter<'a, T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    pub fn new(a: &'a [T], b: &'a [T], cmp: F) -> Self {
        let mut iter = Self {
            a,
            b,
            ia: 0,
            ib: 0,
            cmp,
            last_a: false,
        };
        iter.last_a = iter.next_a();
        iter
    }

    /// Element at the current position, `None` once both inputs are exhausted.
    pub fn get(&self) -> Option<&'a T> {
        if self.last_a {
            self.a.get(self.ia)
        } else {
            self.b.get(self.ib)
        }
    }

    /// Move to the next position.
    pub fn advance(&mut self) {
        if self.last_a {
            if self.ia < self.a.len()
                && self.ib < self.b.len()
                && (self.cmp)(&self.a[self.ia], &self.b[self.ib]) == Ordering::Equal
            {
                self.ib += 1;
            }
            self.ia += 1;
        } else if self.ib < self.b.len() {
            self.ib += 1;
        }

        self.last_a = self.next_a();
    }

    fn next_a(&self) -> bool {
        match (self.a.get(self.ia), self.b.get(self.ib)) {
            (Some(a), Some(b)) => (self.cmp)(a, b) != Ordering::Greater,
            (Some(_), None) => true,
            _ => false,
        }
    }
}

impl<'a, T, F> Iterator for MergeIter<'a, T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.get()?;
        self.advance();
        Some(item)
    }
}
