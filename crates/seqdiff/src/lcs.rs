//! Longest common run search used by the section splitter.

use std::collections::HashMap;

use tracing::trace;

use seqdiff_core::error::check_bounds;
use seqdiff_core::{ElementComparer, Result};

/// A run of `length` pairwise-equal elements starting at `position1` in the
/// first collection and `position2` in the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommonRun {
    pub position1: usize,
    pub position2: usize,
    pub length: usize,
}

/// Outcome of a search with a minimum context size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LcsSearch {
    /// The longest run is at least as long as the context size.
    Found(CommonRun),
    /// Runs exist, but the longest is shorter than the context size.
    BelowContext(CommonRun),
    /// The ranges share no element at all.
    NotFound,
}

impl LcsSearch {
    pub fn found(self) -> Option<CommonRun> {
        match self {
            LcsSearch::Found(run) => Some(run),
            _ => None,
        }
    }
}

/// Finds the first-found longest common run between ranges of two
/// collections.
///
/// Positions in `collection2` are indexed by hash code. The index only ever
/// grows, so repeated searches over shrinking sub-ranges of one diff reuse
/// it; candidates outside the requested range are filtered at lookup.
///
/// Candidates for an element are visited in the order their positions were
/// indexed, which for a fresh search is ascending. Among equally long runs
/// the one with the lowest `position1` wins, then the lowest `position2`:
/// searching `"ab"` in `"aXabYab"` yields the run at position 2, not 5.
pub struct LongestCommonSubsequence<'a, T, C> {
    collection1: &'a [T],
    collection2: &'a [T],
    comparer: C,
    hash_codes2: HashMap<u64, Vec<usize>>,
    indexed: Option<(usize, usize)>,
}

impl<'a, T, C: ElementComparer<T>> LongestCommonSubsequence<'a, T, C> {
    pub fn new(collection1: &'a [T], collection2: &'a [T], comparer: C) -> Self {
        Self {
            collection1,
            collection2,
            comparer,
            hash_codes2: HashMap::new(),
            indexed: None,
        }
    }

    pub fn comparer(&self) -> &C {
        &self.comparer
    }

    /// Longest run with `position1` in `[lower1, upper1)` and `position2`
    /// in `[lower2, upper2)`, or `None` if the ranges share nothing.
    pub fn find(
        &mut self,
        lower1: usize,
        upper1: usize,
        lower2: usize,
        upper2: usize,
    ) -> Result<Option<CommonRun>> {
        self.check_ranges(lower1, upper1, lower2, upper2)?;
        Ok(self.scan(lower1, upper1, lower2, upper2))
    }

    /// Like [`find`](Self::find), but classifies runs shorter than
    /// `context_size` separately from having no run at all.
    pub fn find_with_context(
        &mut self,
        lower1: usize,
        upper1: usize,
        lower2: usize,
        upper2: usize,
        context_size: usize,
    ) -> Result<LcsSearch> {
        self.check_ranges(lower1, upper1, lower2, upper2)?;
        Ok(self.search(lower1, upper1, lower2, upper2, context_size))
    }

    /// Caller guarantees both ranges are valid.
    pub(crate) fn search(
        &mut self,
        lower1: usize,
        upper1: usize,
        lower2: usize,
        upper2: usize,
        context_size: usize,
    ) -> LcsSearch {
        match self.scan(lower1, upper1, lower2, upper2) {
            Some(run) if run.length >= context_size => LcsSearch::Found(run),
            Some(run) => LcsSearch::BelowContext(run),
            None => LcsSearch::NotFound,
        }
    }

    fn check_ranges(&self, lower1: usize, upper1: usize, lower2: usize, upper2: usize) -> Result<()> {
        check_bounds("lower1", lower1, "upper1", upper1, self.collection1.len())?;
        check_bounds("lower2", lower2, "upper2", upper2, self.collection2.len())
    }

    fn scan(&mut self, lower1: usize, upper1: usize, lower2: usize, upper2: usize) -> Option<CommonRun> {
        self.ensure_indexed(lower2, upper2);

        let (c1, c2) = (self.collection1, self.collection2);
        let mut best = CommonRun {
            position1: 0,
            position2: 0,
            length: 0,
        };

        for index1 in lower1..upper1 {
            // nothing starting here can beat the current best
            if index1 + best.length >= upper1 {
                break;
            }

            let hash = self.comparer.hash_code(&c1[index1]);
            let Some(candidates) = self.hash_codes2.get(&hash) else {
                continue;
            };

            for &index2 in candidates {
                if index2 < lower2 || index2 + best.length >= upper2 {
                    continue;
                }
                // a longer run must also agree at the current best length
                if !self
                    .comparer
                    .equals(&c1[index1 + best.length], &c2[index2 + best.length])
                {
                    continue;
                }

                let length = self.count_equal(index1, upper1, index2, upper2);
                if length > best.length {
                    best = CommonRun {
                        position1: index1,
                        position2: index2,
                        length,
                    };
                }

                if index1 + best.length >= upper1 {
                    break;
                }
            }
        }

        trace!(
            lower1,
            upper1,
            lower2,
            upper2,
            length = best.length,
            "lcs scan finished"
        );
        (best.length > 0).then_some(best)
    }

    fn count_equal(&self, mut index1: usize, upper1: usize, mut index2: usize, upper2: usize) -> usize {
        let mut count = 0;
        while index1 < upper1
            && index2 < upper2
            && self
                .comparer
                .equals(&self.collection1[index1], &self.collection2[index2])
        {
            count += 1;
            index1 += 1;
            index2 += 1;
        }
        count
    }

    fn ensure_indexed(&mut self, lower: usize, upper: usize) {
        let Some((mut indexed_lower, mut indexed_upper)) = self.indexed else {
            for position in lower..upper {
                self.add_position(position);
            }
            self.indexed = Some((lower, upper));
            return;
        };

        while indexed_lower > lower {
            indexed_lower -= 1;
            self.add_position(indexed_lower);
        }
        while indexed_upper < upper {
            self.add_position(indexed_upper);
            indexed_upper += 1;
        }
        self.indexed = Some((indexed_lower, indexed_upper));
    }

    fn add_position(&mut self, position: usize) {
        let hash = self.comparer.hash_code(&self.collection2[position]);
        self.hash_codes2.entry(hash).or_default().push(position);
    }
}
