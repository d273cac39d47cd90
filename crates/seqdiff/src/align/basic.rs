use seqdiff_core::{DiffElement, Slice};

use super::DiffElementAligner;

/// Deletes everything on the first side, then inserts everything on the
/// second.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicInsertDeleteDiffElementAligner;

impl<T: Clone> DiffElementAligner<T> for BasicInsertDeleteDiffElementAligner {
    fn align(&self, slice1: Slice<'_, T>, slice2: Slice<'_, T>) -> Vec<DiffElement<T>> {
        let deletes = (slice1.lower()..)
            .zip(slice1.iter())
            .map(|(index, element)| DiffElement::deleted(index, element.clone()));
        let inserts = (slice2.lower()..)
            .zip(slice2.iter())
            .map(|(index, element)| DiffElement::inserted(index, element.clone()));
        deletes.chain(inserts).collect()
    }
}

/// Pairs leading elements positionally as `Replace`, then deletes or
/// inserts whatever is left on the longer side.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicReplaceInsertDeleteDiffElementAligner;

impl<T: Clone> DiffElementAligner<T> for BasicReplaceInsertDeleteDiffElementAligner {
    fn align(&self, slice1: Slice<'_, T>, slice2: Slice<'_, T>) -> Vec<DiffElement<T>> {
        let count = slice1.len().min(slice2.len());
        let mut elements: Vec<DiffElement<T>> = (0..count)
            .map(|offset| {
                DiffElement::replaced(
                    slice1.lower() + offset,
                    slice1[offset].clone(),
                    slice2.lower() + offset,
                    slice2[offset].clone(),
                )
            })
            .collect();

        // constraining by `count` cannot overshoot either side
        if let (Ok(rest1), Ok(rest2)) = (slice1.constrain_from(count), slice2.constrain_from(count)) {
            elements.extend(BasicInsertDeleteDiffElementAligner.align(rest1, rest2));
        }
        elements
    }
}
