//! Builds aligners and conflict resolvers from [`DiffSettings`].

use std::hash::Hash;

use seqdiff_core::{
    AlignmentSettings, AlignmentStrategy, ConflictStrategy, DiffElement, DiffSettings, NaturalComparer, Result,
    Slice,
};

use crate::align::{
    BasicInsertDeleteDiffElementAligner, BasicReplaceInsertDeleteDiffElementAligner, DiffElementAligner,
    StringSimilarityDiffElementAligner, TextElement,
};
use crate::merge::{
    AbortOnConflict, ConflictMarkers, MergeConflict, MergeConflictResolver, TakeLeft, TakeLeftThenRight,
    TakeLeftThenRightIfRightDiffersFromLeft, TakeRight, TakeRightThenLeft,
};

/// The aligner selected by [`AlignmentSettings`].
#[derive(Debug, Clone)]
pub enum ConfiguredAligner {
    InsertDelete(BasicInsertDeleteDiffElementAligner),
    ReplaceInsertDelete(BasicReplaceInsertDeleteDiffElementAligner),
    StringSimilarity(StringSimilarityDiffElementAligner),
}

impl ConfiguredAligner {
    pub fn from_settings(settings: &AlignmentSettings) -> Result<Self> {
        Ok(match settings.strategy {
            AlignmentStrategy::InsertDelete => ConfiguredAligner::InsertDelete(BasicInsertDeleteDiffElementAligner),
            AlignmentStrategy::ReplaceInsertDelete => {
                ConfiguredAligner::ReplaceInsertDelete(BasicReplaceInsertDeleteDiffElementAligner)
            }
            AlignmentStrategy::StringSimilarity => ConfiguredAligner::StringSimilarity(
                StringSimilarityDiffElementAligner::with_threshold(settings.modification_threshold)?,
            ),
        })
    }
}

impl<T: TextElement + Clone> DiffElementAligner<T> for ConfiguredAligner {
    fn align(&self, slice1: Slice<'_, T>, slice2: Slice<'_, T>) -> Vec<DiffElement<T>> {
        match self {
            ConfiguredAligner::InsertDelete(aligner) => aligner.align(slice1, slice2),
            ConfiguredAligner::ReplaceInsertDelete(aligner) => aligner.align(slice1, slice2),
            ConfiguredAligner::StringSimilarity(aligner) => aligner.align(slice1, slice2),
        }
    }
}

/// The resolver selected by a [`ConflictStrategy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfiguredResolver(pub ConflictStrategy);

impl<T> MergeConflictResolver<T> for ConfiguredResolver
where
    T: Clone + PartialEq + Hash + From<&'static str>,
{
    fn resolve(&self, common_base: &[T], left: &[T], right: &[T]) -> std::result::Result<Vec<T>, MergeConflict<T>> {
        match self.0 {
            ConflictStrategy::TakeLeft => TakeLeft.resolve(common_base, left, right),
            ConflictStrategy::TakeRight => TakeRight.resolve(common_base, left, right),
            ConflictStrategy::TakeLeftThenRight => TakeLeftThenRight.resolve(common_base, left, right),
            ConflictStrategy::TakeRightThenLeft => TakeRightThenLeft.resolve(common_base, left, right),
            ConflictStrategy::TakeLeftThenRightIfDifferent => {
                TakeLeftThenRightIfRightDiffersFromLeft::new(NaturalComparer).resolve(common_base, left, right)
            }
            ConflictStrategy::Markers => ConflictMarkers.resolve(common_base, left, right),
            ConflictStrategy::Abort => AbortOnConflict.resolve(common_base, left, right),
        }
    }
}

/// Validated aligner and resolver for a settings file.
pub fn from_settings(settings: &DiffSettings) -> Result<(ConfiguredAligner, ConfiguredResolver)> {
    settings.validate()?;
    Ok((
        ConfiguredAligner::from_settings(&settings.alignment)?,
        ConfiguredResolver(settings.merge.conflict_strategy),
    ))
}
