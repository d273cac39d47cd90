//! Splits two collections into an ordered stream of matched and unmatched
//! sections.

use tracing::debug;

use seqdiff_core::{DiffOptions, ElementComparer};

use crate::lcs::{LcsSearch, LongestCommonSubsequence};
use crate::section::DiffSection;

enum Work {
    Range {
        lower1: usize,
        upper1: usize,
        lower2: usize,
        upper2: usize,
    },
    Emit(DiffSection),
}

/// Lazy section stream returned by [`calculate_sections`].
///
/// Each pulled range is split around its longest common run; the pieces are
/// pushed onto a work stack in reverse so sections come out left to right.
/// Pulling a section may run one LCS search; nothing is computed ahead of
/// the consumer beyond that.
pub struct Sections<'a, T, C> {
    collection1: &'a [T],
    collection2: &'a [T],
    options: DiffOptions,
    lcs: LongestCommonSubsequence<'a, T, C>,
    stack: Vec<Work>,
}

/// Partition `collection1` and `collection2` into sections whose lengths
/// add up to each collection's length.
pub fn calculate_sections<'a, T, C>(
    collection1: &'a [T],
    collection2: &'a [T],
    options: &DiffOptions,
    comparer: C,
) -> Sections<'a, T, C>
where
    C: ElementComparer<T>,
{
    Sections {
        collection1,
        collection2,
        options: *options,
        lcs: LongestCommonSubsequence::new(collection1, collection2, comparer),
        stack: vec![Work::Range {
            lower1: 0,
            upper1: collection1.len(),
            lower2: 0,
            upper2: collection2.len(),
        }],
    }
}

impl<'a, T, C: ElementComparer<T>> Sections<'a, T, C> {
    /// Expands one range onto the stack. A leading matched run is returned
    /// directly since it precedes everything that was pushed.
    fn expand(
        &mut self,
        mut lower1: usize,
        mut upper1: usize,
        mut lower2: usize,
        mut upper2: usize,
    ) -> Option<DiffSection> {
        if lower1 == upper1 && lower2 == upper2 {
            return None;
        }

        let mut leading = None;
        if self.options.enable_patience_optimization() {
            let start = self.match_start(lower1, upper1, lower2, upper2);
            if start > 0 {
                leading = Some(DiffSection::matched(start));
                lower1 += start;
                lower2 += start;
            }

            let end = self.match_end(lower1, upper1, lower2, upper2);
            if end > 0 {
                upper1 -= end;
                upper2 -= end;
                self.stack.push(Work::Emit(DiffSection::matched(end)));
            }
        }

        if lower1 < upper1 || lower2 < upper2 {
            let unmatched = DiffSection::unmatched(upper1 - lower1, upper2 - lower2);
            if lower1 == upper1 || lower2 == upper2 {
                self.stack.push(Work::Emit(unmatched));
            } else {
                let context_size = self.options.context_size();
                match self.lcs.search(lower1, upper1, lower2, upper2, context_size) {
                    LcsSearch::Found(run) => {
                        self.stack.push(Work::Range {
                            lower1: run.position1 + run.length,
                            upper1,
                            lower2: run.position2 + run.length,
                            upper2,
                        });
                        self.stack.push(Work::Emit(DiffSection::matched(run.length)));
                        self.stack.push(Work::Range {
                            lower1,
                            upper1: run.position1,
                            lower2,
                            upper2: run.position2,
                        });
                    }
                    LcsSearch::BelowContext(run) => {
                        debug!(
                            length = run.length,
                            context_size, "common run shorter than context size, not used as anchor"
                        );
                        self.stack.push(Work::Emit(unmatched));
                    }
                    LcsSearch::NotFound => self.stack.push(Work::Emit(unmatched)),
                }
            }
        }

        leading
    }

    fn match_start(&self, mut lower1: usize, upper1: usize, mut lower2: usize, upper2: usize) -> usize {
        let comparer = self.lcs.comparer();
        let mut count = 0;
        while lower1 < upper1
            && lower2 < upper2
            && comparer.equals(&self.collection1[lower1], &self.collection2[lower2])
        {
            count += 1;
            lower1 += 1;
            lower2 += 1;
        }
        count
    }

    fn match_end(&self, lower1: usize, mut upper1: usize, lower2: usize, mut upper2: usize) -> usize {
        let comparer = self.lcs.comparer();
        let mut count = 0;
        while upper1 > lower1
            && upper2 > lower2
            && comparer.equals(&self.collection1[upper1 - 1], &self.collection2[upper2 - 1])
        {
            count += 1;
            upper1 -= 1;
            upper2 -= 1;
        }
        count
    }
}

impl<'a, T, C: ElementComparer<T>> Iterator for Sections<'a, T, C> {
    type Item = DiffSection;

    fn next(&mut self) -> Option<DiffSection> {
        loop {
            match self.stack.pop()? {
                Work::Emit(section) => return Some(section),
                Work::Range {
                    lower1,
                    upper1,
                    lower2,
                    upper2,
                } => {
                    if let Some(section) = self.expand(lower1, upper1, lower2, upper2) {
                        return Some(section);
                    }
                }
            }
        }
    }
}

impl<'a, T, C: ElementComparer<T>> std::iter::FusedIterator for Sections<'a, T, C> {}

#[cfg(test)]
mod tests {
    use super::*;
    use seqdiff_core::NaturalComparer;

    fn shape(a: &str, b: &str, options: DiffOptions) -> Vec<(bool, usize, usize)> {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        calculate_sections(&a, &b, &options, NaturalComparer)
            .map(|s| (s.is_match(), s.length_in_collection1(), s.length_in_collection2()))
            .collect()
    }

    #[test]
    fn test_both_empty_yields_nothing() {
        assert!(shape("", "", DiffOptions::default()).is_empty());
    }

    #[test]
    fn test_one_side_empty_yields_single_unmatched() {
        assert_eq!(shape("abc", "", DiffOptions::default()), vec![(false, 3, 0)]);
        assert_eq!(shape("", "ab", DiffOptions::default()), vec![(false, 0, 2)]);
    }

    #[test]
    fn test_identical_yields_single_match() {
        assert_eq!(shape("abcdef", "abcdef", DiffOptions::default()), vec![(true, 6, 6)]);
        let no_patience = DiffOptions::default().with_patience_optimization(false);
        assert_eq!(shape("abcdef", "abcdef", no_patience), vec![(true, 6, 6)]);
    }

    #[test]
    fn test_nothing_in_common() {
        assert_eq!(shape("abc", "xyz", DiffOptions::default()), vec![(false, 3, 3)]);
    }

    #[test]
    fn test_insert_and_delete_in_the_middle() {
        let expected = vec![
            (true, 3, 3),
            (false, 0, 1),
            (true, 1, 1),
            (false, 1, 0),
            (true, 2, 2),
        ];
        assert_eq!(shape("  123  ", "  1x2  ", DiffOptions::default()), expected);
        let no_patience = DiffOptions::default().with_patience_optimization(false);
        assert_eq!(shape("  123  ", "  1x2  ", no_patience), expected);
    }

    #[test]
    fn test_context_size_suppresses_short_anchors() {
        let strict = DiffOptions::new(false, 3).unwrap();
        assert_eq!(shape("aXbY", "aZbW", strict), vec![(false, 4, 4)]);

        let loose = DiffOptions::new(false, 1).unwrap();
        assert_eq!(
            shape("aXbY", "aZbW", loose),
            vec![(true, 1, 1), (false, 1, 1), (true, 1, 1), (false, 1, 1)]
        );
    }

    #[test]
    fn test_patience_emits_prefix_before_search() {
        let mut sections = {
            let a: &'static [u8] = b"abXcd";
            let b: &'static [u8] = b"abYcd";
            calculate_sections(a, b, &DiffOptions::default(), NaturalComparer)
        };
        assert_eq!(sections.next(), Some(DiffSection::matched(2)));
        assert_eq!(sections.next(), Some(DiffSection::unmatched(1, 1)));
        assert_eq!(sections.next(), Some(DiffSection::matched(2)));
        assert_eq!(sections.next(), None);
        assert_eq!(sections.next(), None);
    }
}
