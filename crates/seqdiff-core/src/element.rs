//! Element-level alignment output.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::optional::Optional;

/// How an element of the first collection relates to one of the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffOperation {
    /// Both elements are equal and carried through unchanged.
    Match,
    /// The element only exists in the second collection.
    Insert,
    /// The element only exists in the first collection.
    Delete,
    /// Aligned but dissimilar: one element was swapped for another.
    Replace,
    /// Aligned, not equal, but similar enough to count as a change.
    Modify,
}

impl DiffOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiffOperation::Match => "match",
            DiffOperation::Insert => "insert",
            DiffOperation::Delete => "delete",
            DiffOperation::Replace => "replace",
            DiffOperation::Modify => "modify",
        }
    }

    /// Whether the operation consumes an element from the first collection.
    pub fn uses_collection1(&self) -> bool {
        !matches!(self, DiffOperation::Insert)
    }

    /// Whether the operation consumes an element from the second collection.
    pub fn uses_collection2(&self) -> bool {
        !matches!(self, DiffOperation::Delete)
    }
}

impl fmt::Display for DiffOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One aligned pairing between the two collections.
///
/// For `Insert` the first side is absent, for `Delete` the second side is
/// absent, every other operation carries both sides. Indices are absolute
/// positions in the collections that were diffed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(
    rename_all = "camelCase",
    try_from = "RawDiffElement<T>",
    bound(deserialize = "T: Deserialize<'de>")
)]
pub struct DiffElement<T> {
    index1: Option<usize>,
    element1: Optional<T>,
    index2: Option<usize>,
    element2: Optional<T>,
    operation: DiffOperation,
}

impl<T> DiffElement<T> {
    /// Build an element, checking that its sides agree with `operation`.
    pub fn new(
        index1: Option<usize>,
        element1: Optional<T>,
        index2: Option<usize>,
        element2: Optional<T>,
        operation: DiffOperation,
    ) -> Result<Self> {
        if index1.is_some() != element1.has_value() {
            return Err(Error::InvalidElement(
                "index1 must be set exactly when element1 is present".into(),
            ));
        }
        if index2.is_some() != element2.has_value() {
            return Err(Error::InvalidElement(
                "index2 must be set exactly when element2 is present".into(),
            ));
        }
        if element1.has_value() != operation.uses_collection1()
            || element2.has_value() != operation.uses_collection2()
        {
            return Err(Error::InvalidElement(format!(
                "{} element has the wrong sides present",
                operation
            )));
        }
        Ok(Self {
            index1,
            element1,
            index2,
            element2,
            operation,
        })
    }

    pub fn matched(index1: usize, element1: T, index2: usize, element2: T) -> Self {
        Self::paired(index1, element1, index2, element2, DiffOperation::Match)
    }

    pub fn replaced(index1: usize, element1: T, index2: usize, element2: T) -> Self {
        Self::paired(index1, element1, index2, element2, DiffOperation::Replace)
    }

    pub fn modified(index1: usize, element1: T, index2: usize, element2: T) -> Self {
        Self::paired(index1, element1, index2, element2, DiffOperation::Modify)
    }

    pub fn inserted(index2: usize, element2: T) -> Self {
        Self {
            index1: None,
            element1: Optional::Absent,
            index2: Some(index2),
            element2: Optional::Present(element2),
            operation: DiffOperation::Insert,
        }
    }

    pub fn deleted(index1: usize, element1: T) -> Self {
        Self {
            index1: Some(index1),
            element1: Optional::Present(element1),
            index2: None,
            element2: Optional::Absent,
            operation: DiffOperation::Delete,
        }
    }

    fn paired(index1: usize, element1: T, index2: usize, element2: T, operation: DiffOperation) -> Self {
        Self {
            index1: Some(index1),
            element1: Optional::Present(element1),
            index2: Some(index2),
            element2: Optional::Present(element2),
            operation,
        }
    }

    pub fn index1(&self) -> Option<usize> {
        self.index1
    }

    pub fn element1(&self) -> &Optional<T> {
        &self.element1
    }

    pub fn index2(&self) -> Option<usize> {
        self.index2
    }

    pub fn element2(&self) -> &Optional<T> {
        &self.element2
    }

    pub fn operation(&self) -> DiffOperation {
        self.operation
    }

    pub fn into_parts(self) -> (Optional<T>, Optional<T>, DiffOperation) {
        (self.element1, self.element2, self.operation)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDiffElement<T> {
    index1: Option<usize>,
    element1: Optional<T>,
    index2: Option<usize>,
    element2: Optional<T>,
    operation: DiffOperation,
}

impl<T> TryFrom<RawDiffElement<T>> for DiffElement<T> {
    type Error = Error;

    fn try_from(raw: RawDiffElement<T>) -> Result<Self> {
        DiffElement::new(raw.index1, raw.element1, raw.index2, raw.element2, raw.operation)
    }
}

impl<T: fmt::Display> fmt::Display for DiffElement<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.operation {
            DiffOperation::Match => write!(f, "same: {}", self.element1),
            DiffOperation::Insert => write!(f, "insert: {}", self.element2),
            DiffOperation::Delete => write!(f, "delete: {}", self.element1),
            DiffOperation::Replace => {
                write!(f, "replace: {} with: {}", self.element1, self.element2)
            }
            DiffOperation::Modify => write!(f, "modify: {} to: {}", self.element1, self.element2),
        }
    }
}
