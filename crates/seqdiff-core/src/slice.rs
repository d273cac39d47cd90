//! Bounded, zero-copy views over a backing collection.

use std::ops::Index;

use crate::error::{check_bounds, Error, Result};

/// A half-open window `[lower, upper)` into a borrowed collection.
///
/// Unlike a plain `&[T]`, a `Slice` remembers where it sits in its backing
/// collection so aligners can report absolute element indices.
#[derive(Debug)]
pub struct Slice<'a, T> {
    collection: &'a [T],
    lower: usize,
    upper: usize,
}

impl<T> Clone for Slice<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Slice<'_, T> {}

impl<'a, T> Slice<'a, T> {
    pub fn new(collection: &'a [T], lower: usize, upper: usize) -> Result<Self> {
        check_bounds("lower", lower, "upper", upper, collection.len())?;
        Ok(Self {
            collection,
            lower,
            upper,
        })
    }

    /// A slice covering `length` elements from `start`.
    pub fn with_length(collection: &'a [T], start: usize, length: usize) -> Result<Self> {
        let upper = start
            .checked_add(length)
            .ok_or_else(|| Error::OutOfRange {
                name: "length",
                value: length,
                limit: collection.len().saturating_sub(start),
            })?;
        check_bounds("start", start, "length", upper, collection.len())?;
        Ok(Self {
            collection,
            lower: start,
            upper,
        })
    }

    pub fn full(collection: &'a [T]) -> Self {
        Self {
            collection,
            lower: 0,
            upper: collection.len(),
        }
    }

    pub fn collection(&self) -> &'a [T] {
        self.collection
    }

    pub fn lower(&self) -> usize {
        self.lower
    }

    pub fn upper(&self) -> usize {
        self.upper
    }

    pub fn len(&self) -> usize {
        self.upper - self.lower
    }

    pub fn is_empty(&self) -> bool {
        self.lower == self.upper
    }

    /// Element at a position relative to the start of the slice.
    pub fn get(&self, index: usize) -> Option<&'a T> {
        if index < self.len() {
            self.collection.get(self.lower + index)
        } else {
            None
        }
    }

    pub fn as_slice(&self) -> &'a [T] {
        &self.collection[self.lower..self.upper]
    }

    pub fn iter(&self) -> std::slice::Iter<'a, T> {
        self.as_slice().iter()
    }

    /// Keep only the first `count` elements.
    pub fn constrain_from_start(&self, count: usize) -> Result<Self> {
        self.narrow(0, self.remaining_after("count", count)?)
    }

    /// Keep only the last `count` elements.
    pub fn constrain_from_end(&self, count: usize) -> Result<Self> {
        self.narrow(self.remaining_after("count", count)?, 0)
    }

    /// Keep `length` elements starting at relative `position`.
    pub fn constrain_absolute(&self, position: usize, length: usize) -> Result<Self> {
        let available = self.remaining_after("position", position)?;
        if length > available {
            return Err(Error::OutOfRange {
                name: "length",
                value: length,
                limit: available,
            });
        }
        self.narrow(position, available - length)
    }

    /// Drop the first `position` elements.
    pub fn constrain_from(&self, position: usize) -> Result<Self> {
        self.remaining_after("position", position)?;
        self.narrow(position, 0)
    }

    /// Drop `remove_start` elements from the front and `remove_end` from the back.
    pub fn constrain(&self, remove_start: usize, remove_end: usize) -> Result<Self> {
        self.narrow(remove_start, remove_end)
    }

    fn remaining_after(&self, name: &'static str, count: usize) -> Result<usize> {
        self.len()
            .checked_sub(count)
            .ok_or(Error::OutOfRange {
                name,
                value: count,
                limit: self.len(),
            })
    }

    fn narrow(&self, remove_start: usize, remove_end: usize) -> Result<Self> {
        let len = self.len();
        if remove_start > len {
            return Err(Error::OutOfRange {
                name: "remove_start",
                value: remove_start,
                limit: len,
            });
        }
        if remove_end > len - remove_start {
            return Err(Error::OutOfRange {
                name: "remove_end",
                value: remove_end,
                limit: len - remove_start,
            });
        }
        Ok(Self {
            collection: self.collection,
            lower: self.lower + remove_start,
            upper: self.upper - remove_end,
        })
    }
}

impl<T> Index<usize> for Slice<'_, T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<'a, T> IntoIterator for Slice<'a, T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
