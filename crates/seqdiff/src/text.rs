//! Line-oriented diff and merge for plain text.

use thiserror::Error;

use seqdiff_core::{DiffElement, DiffSettings, NaturalComparer};

use crate::align::align_elements;
use crate::merge::{Merge, MergeConflict};
use crate::sections::calculate_sections;
use crate::settings::from_settings;

/// Failure of a text merge: bad settings, or a conflict the configured
/// strategy refused to settle.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MergeError {
    #[error(transparent)]
    Invalid(#[from] seqdiff_core::Error),

    #[error("merge conflict: {0}")]
    Conflict(#[from] MergeConflict<String>),
}

/// Aligned line operations turning `text1` into `text2`.
pub fn diff_lines<'a>(
    text1: &'a str,
    text2: &'a str,
    settings: &DiffSettings,
) -> seqdiff_core::Result<Vec<DiffElement<&'a str>>> {
    let (aligner, _) = from_settings(settings)?;
    let lines1: Vec<&str> = text1.lines().collect();
    let lines2: Vec<&str> = text2.lines().collect();

    let sections = calculate_sections(&lines1, &lines2, &settings.options, NaturalComparer);
    align_elements(&lines1, &lines2, sections, aligner).collect()
}

/// Three-way merge of `left` and `right` against `base`, one line at a
/// time. Every merged line is terminated with `\n`.
pub fn merge_lines(base: &str, left: &str, right: &str, settings: &DiffSettings) -> Result<String, MergeError> {
    let (aligner, resolver) = from_settings(settings)?;
    let to_lines = |text: &str| text.lines().map(str::to_owned).collect::<Vec<String>>();
    let (base, left, right) = (to_lines(base), to_lines(left), to_lines(right));

    let merge = Merge::new(
        &base,
        &left,
        &right,
        &settings.options,
        aligner,
        resolver,
        NaturalComparer,
    )?;

    let mut merged = String::new();
    for line in merge {
        merged.push_str(&line?);
        merged.push('\n');
    }
    Ok(merged)
}
