//! Element-level alignment of a section stream.
//!
//! Matched sections are expanded pairwise into `Match` elements. Unmatched
//! sections are handed to a [`DiffElementAligner`], which decides how the
//! elements on either side pair up.

mod basic;
mod similarity;
mod string;

use std::collections::VecDeque;

use seqdiff_core::{DiffElement, Error, Result, Slice};

use crate::section::DiffSection;

pub use basic::{BasicInsertDeleteDiffElementAligner, BasicReplaceInsertDeleteDiffElementAligner};
pub use similarity::{ElementSimilarityDiffElementAligner, DEFAULT_MODIFICATION_THRESHOLD, MAX_ALIGNED_ELEMENTS};
pub use string::{string_similarity, StringSimilarityDiffElementAligner, TextElement, TextSimilarity};

/// Turns one unmatched section into element operations.
///
/// Implementations must consume every element of both slices exactly once,
/// in order, and report absolute indices into the backing collections.
pub trait DiffElementAligner<T> {
    fn align(&self, slice1: Slice<'_, T>, slice2: Slice<'_, T>) -> Vec<DiffElement<T>>;
}

impl<T, A: DiffElementAligner<T> + ?Sized> DiffElementAligner<T> for &A {
    fn align(&self, slice1: Slice<'_, T>, slice2: Slice<'_, T>) -> Vec<DiffElement<T>> {
        (**self).align(slice1, slice2)
    }
}

impl<T, A: DiffElementAligner<T> + ?Sized> DiffElementAligner<T> for Box<A> {
    fn align(&self, slice1: Slice<'_, T>, slice2: Slice<'_, T>) -> Vec<DiffElement<T>> {
        (**self).align(slice1, slice2)
    }
}

/// Scores how alike two elements are, from 0 (unrelated) to 1 (identical).
pub trait ElementSimilarity<T: ?Sized> {
    fn similarity(&self, a: &T, b: &T) -> f64;
}

impl<T: ?Sized, F: Fn(&T, &T) -> f64> ElementSimilarity<T> for F {
    fn similarity(&self, a: &T, b: &T) -> f64 {
        self(a, b)
    }
}

/// Lazy element stream returned by [`align_elements`].
///
/// Yields an error and then stops if the sections run past the end of
/// either collection.
pub struct AlignElements<'a, T, I, A> {
    collection1: &'a [T],
    collection2: &'a [T],
    sections: I,
    aligner: A,
    position1: usize,
    position2: usize,
    matching: usize,
    pending: VecDeque<DiffElement<T>>,
    failed: bool,
}

/// Expand `sections` (as produced for these two collections) into aligned
/// elements, delegating unmatched sections to `aligner`.
pub fn align_elements<'a, T, S, A>(
    collection1: &'a [T],
    collection2: &'a [T],
    sections: S,
    aligner: A,
) -> AlignElements<'a, T, S::IntoIter, A>
where
    T: Clone,
    S: IntoIterator<Item = DiffSection>,
    A: DiffElementAligner<T>,
{
    AlignElements {
        collection1,
        collection2,
        sections: sections.into_iter(),
        aligner,
        position1: 0,
        position2: 0,
        matching: 0,
        pending: VecDeque::new(),
        failed: false,
    }
}

impl<'a, T, I, A> AlignElements<'a, T, I, A>
where
    T: Clone,
    I: Iterator<Item = DiffSection>,
    A: DiffElementAligner<T>,
{
    fn start_section(&mut self, section: DiffSection) -> Result<()> {
        if section.is_match() && section.length_in_collection1() != section.length_in_collection2() {
            return Err(Error::InvalidSection(format!(
                "a matched section must have equal lengths, got {} and {}",
                section.length_in_collection1(),
                section.length_in_collection2()
            )));
        }
        let slice1 = Slice::with_length(
            self.collection1,
            self.position1,
            section.length_in_collection1(),
        )?;
        let slice2 = Slice::with_length(
            self.collection2,
            self.position2,
            section.length_in_collection2(),
        )?;

        if section.is_match() {
            self.matching = section.length_in_collection1();
            return Ok(());
        }

        self.pending.extend(self.aligner.align(slice1, slice2));
        self.position1 = slice1.upper();
        self.position2 = slice2.upper();
        Ok(())
    }
}

impl<'a, T, I, A> Iterator for AlignElements<'a, T, I, A>
where
    T: Clone,
    I: Iterator<Item = DiffSection>,
    A: DiffElementAligner<T>,
{
    type Item = Result<DiffElement<T>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            if self.matching > 0 {
                let (index1, index2) = (self.position1, self.position2);
                self.matching -= 1;
                self.position1 += 1;
                self.position2 += 1;
                return Some(Ok(DiffElement::matched(
                    index1,
                    self.collection1[index1].clone(),
                    index2,
                    self.collection2[index2].clone(),
                )));
            }
            if let Some(element) = self.pending.pop_front() {
                return Some(Ok(element));
            }

            let section = self.sections.next()?;
            if let Err(err) = self.start_section(section) {
                self.failed = true;
                return Some(Err(err));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seqdiff_core::{DiffOperation, DiffOptions, NaturalComparer};

    use crate::sections::calculate_sections;

    #[test]
    fn test_match_sections_expand_pairwise() {
        let a = ['a', 'b', 'c'];
        let b = ['a', 'x', 'c'];
        let sections = calculate_sections(&a, &b, &DiffOptions::default(), NaturalComparer);
        let elements: Vec<_> = align_elements(&a, &b, sections, BasicInsertDeleteDiffElementAligner)
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(
            elements,
            vec![
                DiffElement::matched(0, 'a', 0, 'a'),
                DiffElement::deleted(1, 'b'),
                DiffElement::inserted(1, 'x'),
                DiffElement::matched(2, 'c', 2, 'c'),
            ]
        );
    }

    #[test]
    fn test_sections_past_the_end_fail_once() {
        let a = ['a'];
        let b = ['a'];
        let sections = vec![
            DiffSection::new(true, 1, 1).unwrap(),
            DiffSection::new(false, 1, 0).unwrap(),
        ];
        let mut elements = align_elements(&a, &b, sections, BasicInsertDeleteDiffElementAligner);
        assert_eq!(
            elements.next().map(|e| e.unwrap().operation()),
            Some(DiffOperation::Match)
        );
        assert!(matches!(elements.next(), Some(Err(Error::OutOfRange { .. }))));
        assert!(elements.next().is_none());
    }

    #[test]
    fn test_unequal_matched_section_is_an_error() {
        let a = ['a', 'b', 'c'];
        let b = ['a', 'b'];
        let sections = vec![DiffSection::unchecked(true, 3, 2)];
        let mut elements = align_elements(&a, &b, sections, BasicInsertDeleteDiffElementAligner);
        assert!(matches!(elements.next(), Some(Err(Error::InvalidSection(_)))));
        assert!(elements.next().is_none());
    }

    #[test]
    fn test_closure_similarity() {
        let exact = |a: &char, b: &char| if a == b { 1.0 } else { 0.0 };
        assert_eq!(exact.similarity(&'a', &'a'), 1.0);
        assert_eq!(exact.similarity(&'a', &'b'), 0.0);
    }
}
