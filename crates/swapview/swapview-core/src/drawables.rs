//! Ordered, mutable sequence of drawable identifiers.

use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::error::SwapError;

/// Insertion order defines next/previous adjacency. Duplicates are allowed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawableList<D> {
    items: Vec<D>,
}

impl<D> Default for DrawableList<D> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<D> DrawableList<D> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard the previous contents and take `items` in order.
    pub fn replace_all<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = D>,
    {
        self.items.clear();
        self.items.extend(items);
    }

    /// Insert `id` before `position`; `position` is clamped into `[0, len]`.
    /// Returns the position actually used.
    pub fn insert_at(&mut self, position: usize, id: D) -> usize {
        let at = position.min(self.items.len());
        self.items.insert(at, id);
        at
    }

    pub fn get(&self, index: usize) -> Result<&D, SwapError> {
        self.items.get(index).ok_or(SwapError::OutOfRange {
            index,
            len: self.items.len(),
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Read-only view for behaviors and hosts.
    #[inline]
    pub fn as_slice(&self) -> &[D] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, D> {
        self.items.iter()
    }
}

impl<D> Index<usize> for DrawableList<D> {
    type Output = D;

    fn index(&self, index: usize) -> &D {
        &self.items[index]
    }
}

impl<D> FromIterator<D> for DrawableList<D> {
    fn from_iter<I: IntoIterator<Item = D>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a, D> IntoIterator for &'a DrawableList<D> {
    type Item = &'a D;
    type IntoIter = std::slice::Iter<'a, D>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
