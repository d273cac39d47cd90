//! Standalone longest common substring search over two whole collections.

use std::collections::HashMap;

use seqdiff_core::error::check_bounds;
use seqdiff_core::{ElementComparer, Error, Result};

/// Location of a common substring. Always describes at least one element;
/// "no common substring" is expressed by returning no result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LongestCommonSubstringResult {
    position_in_collection1: usize,
    position_in_collection2: usize,
    length: usize,
}

impl LongestCommonSubstringResult {
    pub fn new(position_in_collection1: usize, position_in_collection2: usize, length: usize) -> Result<Self> {
        if length == 0 {
            return Err(Error::ZeroLength);
        }
        Ok(Self {
            position_in_collection1,
            position_in_collection2,
            length,
        })
    }

    pub fn position_in_collection1(&self) -> usize {
        self.position_in_collection1
    }

    pub fn position_in_collection2(&self) -> usize {
        self.position_in_collection2
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

pub struct LongestCommonSubstring<'a, T, C> {
    collection1: &'a [T],
    collection2: &'a [T],
    comparer: C,
    positions2: HashMap<u64, Vec<usize>>,
}

impl<'a, T, C: ElementComparer<T>> LongestCommonSubstring<'a, T, C> {
    /// Indexes every position of `collection2` up front.
    pub fn new(collection1: &'a [T], collection2: &'a [T], comparer: C) -> Self {
        let mut positions2: HashMap<u64, Vec<usize>> = HashMap::new();
        for (position, element) in collection2.iter().enumerate() {
            positions2
                .entry(comparer.hash_code(element))
                .or_default()
                .push(position);
        }
        Self {
            collection1,
            collection2,
            comparer,
            positions2,
        }
    }

    pub fn find(&self) -> Option<LongestCommonSubstringResult> {
        self.scan(0, self.collection1.len(), 0, self.collection2.len())
    }

    pub fn find_range(
        &self,
        lower1: usize,
        upper1: usize,
        lower2: usize,
        upper2: usize,
    ) -> Result<Option<LongestCommonSubstringResult>> {
        check_bounds("lower1", lower1, "upper1", upper1, self.collection1.len())?;
        check_bounds("lower2", lower2, "upper2", upper2, self.collection2.len())?;
        Ok(self.scan(lower1, upper1, lower2, upper2))
    }

    fn scan(&self, lower1: usize, upper1: usize, lower2: usize, upper2: usize) -> Option<LongestCommonSubstringResult> {
        let (c1, c2) = (self.collection1, self.collection2);
        let mut best: Option<LongestCommonSubstringResult> = None;

        for index1 in lower1..upper1 {
            let best_length = best.map_or(0, |b| b.length);
            if index1 + best_length >= upper1 {
                break;
            }

            let Some(candidates) = self.positions2.get(&self.comparer.hash_code(&c1[index1])) else {
                continue;
            };
            for &index2 in candidates {
                let best_length = best.map_or(0, |b| b.length);
                if index2 < lower2 || index2 + best_length >= upper2 {
                    continue;
                }
                if !self.comparer.equals(&c1[index1 + best_length], &c2[index2 + best_length]) {
                    continue;
                }

                let length = c1[index1..upper1]
                    .iter()
                    .zip(&c2[index2..upper2])
                    .take_while(|&(a, b)| self.comparer.equals(a, b))
                    .count();
                if length > best_length {
                    best = Some(LongestCommonSubstringResult {
                        position_in_collection1: index1,
                        position_in_collection2: index2,
                        length,
                    });
                }
            }
        }

        best
    }
}
