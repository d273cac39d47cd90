//! Three-way merge over two diffs against a common base.
//!
//! Both sides are diffed against the base and aligned element by element.
//! Those two element streams are then diffed against each other, keyed on
//! the base element each step touches, so the merge can walk both sides in
//! lockstep and decide per base element which side wins.

pub mod resolver;

use std::collections::VecDeque;

use tracing::{debug, trace, warn};

use seqdiff_core::{DiffElement, DiffOperation, DiffOptions, ElementComparer, Optional, Result};

use crate::align::{align_elements, DiffElementAligner};
use crate::section::DiffSection;
use crate::sections::calculate_sections;

pub use resolver::{
    AbortOnConflict, ConflictMarkers, MergeConflict, MergeConflictResolver, TakeLeft, TakeLeftThenRight,
    TakeLeftThenRightIfRightDiffersFromLeft, TakeRight, TakeRightThenLeft,
};

/// Compares aligned elements by the base element they consume, or by the
/// inserted element when there is none.
struct MergeKeyComparer<C>(C);

impl<C> MergeKeyComparer<C> {
    fn key<'e, T>(element: &'e DiffElement<T>) -> Option<&'e T> {
        element
            .element1()
            .as_option()
            .or_else(|| element.element2().as_option())
    }
}

impl<T, C: ElementComparer<T>> ElementComparer<DiffElement<T>> for MergeKeyComparer<C> {
    fn equals(&self, a: &DiffElement<T>, b: &DiffElement<T>) -> bool {
        match (Self::key(a), Self::key(b)) {
            (Some(a), Some(b)) => self.0.equals(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    fn hash_code(&self, value: &DiffElement<T>) -> u64 {
        Self::key(value).map_or(0, |v| self.0.hash_code(v))
    }
}

/// Lazy merge result returned by [`Merge::new`] and [`merge`].
///
/// Yields merged elements in order. A failed resolution is yielded once as
/// an error, after which the iterator is exhausted.
pub struct Merge<T, R> {
    base_to_left: Vec<DiffElement<T>>,
    base_to_right: Vec<DiffElement<T>>,
    sections: std::vec::IntoIter<DiffSection>,
    resolver: R,
    left_index: usize,
    right_index: usize,
    matching: usize,
    pending: VecDeque<T>,
    finished: bool,
}

impl<T, R> Merge<T, R>
where
    T: Clone,
    R: MergeConflictResolver<T>,
{
    /// Diffs both sides against `common_base` up front; merging itself
    /// happens as the result is iterated.
    pub fn new<A, C>(
        common_base: &[T],
        left: &[T],
        right: &[T],
        options: &DiffOptions,
        aligner: A,
        resolver: R,
        comparer: C,
    ) -> Result<Self>
    where
        A: DiffElementAligner<T>,
        C: ElementComparer<T>,
    {
        let base_to_left = align_elements(
            common_base,
            left,
            calculate_sections(common_base, left, options, &comparer),
            &aligner,
        )
        .collect::<Result<Vec<_>>>()?;
        let base_to_right = align_elements(
            common_base,
            right,
            calculate_sections(common_base, right, options, &comparer),
            &aligner,
        )
        .collect::<Result<Vec<_>>>()?;

        let sections: Vec<DiffSection> = calculate_sections(
            &base_to_left,
            &base_to_right,
            options,
            MergeKeyComparer(&comparer),
        )
        .collect();

        trace!(
            base = common_base.len(),
            left_steps = base_to_left.len(),
            right_steps = base_to_right.len(),
            sections = sections.len(),
            "merge prepared"
        );

        Ok(Self {
            base_to_left,
            base_to_right,
            sections: sections.into_iter(),
            resolver,
            left_index: 0,
            right_index: 0,
            matching: 0,
            pending: VecDeque::new(),
            finished: false,
        })
    }

    /// Settles one base element both sides stepped over together.
    fn resolve_matching(&self, left: &DiffElement<T>, right: &DiffElement<T>) -> std::result::Result<Vec<T>, MergeConflict<T>> {
        let base = values(left.element1());
        let left_value = values(left.element2());
        let right_value = values(right.element2());

        use DiffOperation::*;
        match (normalize(left.operation()), normalize(right.operation())) {
            (Match, Match) => Ok(left_value),
            (Match, Modify) => Ok(right_value),
            (Modify, Match) => Ok(left_value),
            (Match, Delete) | (Delete, Match) | (Delete, Delete) => Ok(Vec::new()),
            (Modify, Modify) => self.defer(&base, &left_value, &right_value),
            (Modify, Delete) => self.defer(&base, &left_value, &[]),
            (Delete, Modify) => self.defer(&base, &[], &right_value),
            (left_op, right_op) => {
                warn!(%left_op, %right_op, "unhandled operation pair in merge");
                Err(MergeConflict::new(
                    format!("Unable to process {} vs. {}", left_op, right_op),
                    base,
                    left_value,
                    right_value,
                ))
            }
        }
    }

    /// Settles a region only one side, or both sides differently, added.
    fn resolve_unmatched(&self, section: DiffSection) -> std::result::Result<Vec<T>, MergeConflict<T>> {
        let left = inserted_values(&self.base_to_left[self.left_index..][..section.length_in_collection1()]);
        let right = inserted_values(&self.base_to_right[self.right_index..][..section.length_in_collection2()]);

        if section.length_in_collection1() == 0 {
            Ok(right)
        } else if section.length_in_collection2() == 0 {
            Ok(left)
        } else {
            self.defer(&[], &left, &right)
        }
    }

    fn defer(&self, common_base: &[T], left: &[T], right: &[T]) -> std::result::Result<Vec<T>, MergeConflict<T>> {
        debug!(
            base = common_base.len(),
            left = left.len(),
            right = right.len(),
            "deferring conflict to resolver"
        );
        self.resolver.resolve(common_base, left, right)
    }
}

fn normalize(operation: DiffOperation) -> DiffOperation {
    match operation {
        DiffOperation::Replace => DiffOperation::Modify,
        other => other,
    }
}

fn values<T: Clone>(side: &Optional<T>) -> Vec<T> {
    side.as_option().cloned().into_iter().collect()
}

/// What a run of aligned elements turned the base into; deleted elements
/// contribute nothing.
fn inserted_values<T: Clone>(elements: &[DiffElement<T>]) -> Vec<T> {
    elements
        .iter()
        .filter_map(|element| element.element2().as_option().cloned())
        .collect()
}

impl<T, R> Iterator for Merge<T, R>
where
    T: Clone,
    R: MergeConflictResolver<T>,
{
    type Item = std::result::Result<T, MergeConflict<T>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(value) = self.pending.pop_front() {
                return Some(Ok(value));
            }
            if self.finished {
                return None;
            }

            let resolved = if self.matching > 0 {
                self.matching -= 1;
                let resolved = self.resolve_matching(
                    &self.base_to_left[self.left_index],
                    &self.base_to_right[self.right_index],
                );
                self.left_index += 1;
                self.right_index += 1;
                resolved
            } else {
                let Some(section) = self.sections.next() else {
                    self.finished = true;
                    return None;
                };
                if section.is_match() {
                    self.matching = section.length_in_collection1();
                    continue;
                }
                let resolved = self.resolve_unmatched(section);
                self.left_index += section.length_in_collection1();
                self.right_index += section.length_in_collection2();
                resolved
            };

            match resolved {
                Ok(values) => self.pending.extend(values),
                Err(conflict) => {
                    self.finished = true;
                    self.pending.clear();
                    return Some(Err(conflict));
                }
            }
        }
    }
}

impl<T, R> std::iter::FusedIterator for Merge<T, R>
where
    T: Clone,
    R: MergeConflictResolver<T>,
{
}

/// Merge `left` and `right`, both derived from `common_base`.
pub fn merge<T, A, R, C>(
    common_base: &[T],
    left: &[T],
    right: &[T],
    options: &DiffOptions,
    aligner: A,
    resolver: R,
    comparer: C,
) -> Result<Merge<T, R>>
where
    T: Clone,
    A: DiffElementAligner<T>,
    R: MergeConflictResolver<T>,
    C: ElementComparer<T>,
{
    Merge::new(common_base, left, right, options, aligner, resolver, comparer)
}
