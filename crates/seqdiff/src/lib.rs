//! Generic sequence diffing, element alignment and three-way merging.
//!
//! The pipeline has three stages:
//!
//! 1. [`calculate_sections`] splits two collections into matched and
//!    unmatched [`DiffSection`]s.
//! 2. [`align_elements`] expands those sections into [`DiffElement`]s,
//!    asking a [`DiffElementAligner`] how unmatched elements pair up.
//! 3. [`merge`] runs both stages for two descendants of a common base and
//!    reconciles them, deferring real conflicts to a
//!    [`MergeConflictResolver`].
//!
//! Every stage returns a lazy iterator.

pub mod align;
pub mod lcs;
pub mod merge;
pub mod mutate;
pub mod section;
pub mod sections;
pub mod settings;
pub mod substring;
pub mod text;

pub use seqdiff_core::{config, logging};
pub use seqdiff_core::{
    AlignmentSettings, AlignmentStrategy, ConflictStrategy, DiffElement, DiffOperation, DiffOptions, DiffSettings,
    ElementComparer, Error, KeyComparer, MergeSettings, NaturalComparer, NullAware, Optional, Result, Slice,
};

pub use align::{
    align_elements, string_similarity, AlignElements, BasicInsertDeleteDiffElementAligner,
    BasicReplaceInsertDeleteDiffElementAligner, DiffElementAligner, ElementSimilarity,
    ElementSimilarityDiffElementAligner, StringSimilarityDiffElementAligner, TextElement, TextSimilarity,
};
pub use lcs::{CommonRun, LcsSearch, LongestCommonSubsequence};
pub use merge::{
    merge, AbortOnConflict, ConflictMarkers, Merge, MergeConflict, MergeConflictResolver, TakeLeft,
    TakeLeftThenRight, TakeLeftThenRightIfRightDiffersFromLeft, TakeRight, TakeRightThenLeft,
};
pub use mutate::{mutate_to_be_like, mutate_to_be_like_default};
pub use section::DiffSection;
pub use sections::{calculate_sections, Sections};
pub use settings::{ConfiguredAligner, ConfiguredResolver};
pub use substring::{LongestCommonSubstring, LongestCommonSubstringResult};
pub use text::{diff_lines, merge_lines, MergeError};
