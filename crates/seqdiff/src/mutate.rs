use seqdiff_core::{DiffOperation, DiffOptions, ElementComparer, NaturalComparer, Result};

use crate::align::{align_elements, BasicReplaceInsertDeleteDiffElementAligner, DiffElementAligner};
use crate::sections::calculate_sections;

/// Edit `target` in place until it equals `source`, replaying the aligned
/// operations positionally.
pub fn mutate_to_be_like<T, A, C>(
    target: &mut Vec<T>,
    source: &[T],
    options: &DiffOptions,
    aligner: A,
    comparer: C,
) -> Result<()>
where
    T: Clone,
    A: DiffElementAligner<T>,
    C: ElementComparer<T>,
{
    let elements = {
        let sections = calculate_sections(target.as_slice(), source, options, comparer);
        align_elements(target.as_slice(), source, sections, aligner).collect::<Result<Vec<_>>>()?
    };

    let mut cursor = 0;
    for element in elements {
        let (_, replacement, operation) = element.into_parts();
        match operation {
            DiffOperation::Match => cursor += 1,
            DiffOperation::Insert => {
                target.insert(cursor, replacement.into_value()?);
                cursor += 1;
            }
            DiffOperation::Delete => {
                target.remove(cursor);
            }
            DiffOperation::Replace | DiffOperation::Modify => {
                target[cursor] = replacement.into_value()?;
                cursor += 1;
            }
        }
    }
    Ok(())
}

/// [`mutate_to_be_like`] with default options, natural equality and
/// positional replacement.
pub fn mutate_to_be_like_default<T>(target: &mut Vec<T>, source: &[T]) -> Result<()>
where
    T: Clone + PartialEq + std::hash::Hash,
{
    mutate_to_be_like(
        target,
        source,
        &DiffOptions::default(),
        BasicReplaceInsertDeleteDiffElementAligner,
        NaturalComparer,
    )
}
