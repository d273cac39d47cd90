use std::fmt;

use serde::{Deserialize, Serialize};

use seqdiff_core::{Error, Result};

/// A run of elements that either lines up between the two collections or
/// does not.
///
/// Matched sections always have equal, non-zero lengths on both sides. An
/// unmatched section may be empty on one side (a pure insert or delete) but
/// never on both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawDiffSection")]
pub struct DiffSection {
    is_match: bool,
    length_in_collection1: usize,
    length_in_collection2: usize,
}

impl DiffSection {
    pub fn new(is_match: bool, length_in_collection1: usize, length_in_collection2: usize) -> Result<Self> {
        if is_match {
            if length_in_collection1 != length_in_collection2 {
                return Err(Error::InvalidSection(format!(
                    "a matched section must have equal lengths, got {} and {}",
                    length_in_collection1, length_in_collection2
                )));
            }
            if length_in_collection1 == 0 {
                return Err(Error::InvalidSection(
                    "a matched section cannot be empty".into(),
                ));
            }
        } else if length_in_collection1 == 0 && length_in_collection2 == 0 {
            return Err(Error::InvalidSection(
                "an unmatched section must cover at least one element".into(),
            ));
        }
        Ok(Self {
            is_match,
            length_in_collection1,
            length_in_collection2,
        })
    }

    pub(crate) fn matched(length: usize) -> Self {
        debug_assert!(length > 0);
        Self {
            is_match: true,
            length_in_collection1: length,
            length_in_collection2: length,
        }
    }

    pub(crate) fn unmatched(length_in_collection1: usize, length_in_collection2: usize) -> Self {
        debug_assert!(length_in_collection1 + length_in_collection2 > 0);
        Self {
            is_match: false,
            length_in_collection1,
            length_in_collection2,
        }
    }

    /// Skips validation so malformed sections can be fed to consumers.
    #[cfg(test)]
    pub(crate) fn unchecked(is_match: bool, length_in_collection1: usize, length_in_collection2: usize) -> Self {
        Self {
            is_match,
            length_in_collection1,
            length_in_collection2,
        }
    }

    pub fn is_match(&self) -> bool {
        self.is_match
    }

    pub fn length_in_collection1(&self) -> usize {
        self.length_in_collection1
    }

    pub fn length_in_collection2(&self) -> usize {
        self.length_in_collection2
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDiffSection {
    is_match: bool,
    length_in_collection1: usize,
    length_in_collection2: usize,
}

impl TryFrom<RawDiffSection> for DiffSection {
    type Error = Error;

    fn try_from(raw: RawDiffSection) -> Result<Self> {
        DiffSection::new(raw.is_match, raw.length_in_collection1, raw.length_in_collection2)
    }
}

impl fmt::Display for DiffSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (len1, len2) = (self.length_in_collection1, self.length_in_collection2);
        if self.is_match {
            write!(f, "{} matched", len1)
        } else if len1 == len2 {
            write!(f, "{} did not match", len1)
        } else if len1 == 0 {
            write!(f, "{} was present in collection2, but not in collection1", len2)
        } else if len2 == 0 {
            write!(f, "{} was present in collection1, but not in collection2", len1)
        } else {
            write!(f, "{} did not match with {}", len1, len2)
        }
    }
}
