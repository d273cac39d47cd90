use std::borrow::Cow;

use seqdiff_core::{DiffElement, DiffOptions, NaturalComparer, Result, Slice};

use super::similarity::ElementSimilarityDiffElementAligner;
use super::{DiffElementAligner, ElementSimilarity};
use crate::sections::calculate_sections;

/// Elements that can be scored as text. `None` reads as the empty string.
pub trait TextElement {
    fn text(&self) -> Option<&str>;
}

impl TextElement for str {
    fn text(&self) -> Option<&str> {
        Some(self)
    }
}

impl TextElement for String {
    fn text(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl TextElement for Cow<'_, str> {
    fn text(&self) -> Option<&str> {
        Some(self.as_ref())
    }
}

impl<T: TextElement + ?Sized> TextElement for &T {
    fn text(&self) -> Option<&str> {
        (**self).text()
    }
}

impl<T: TextElement> TextElement for Option<T> {
    fn text(&self) -> Option<&str> {
        self.as_ref().and_then(|value| value.text())
    }
}

/// Dice-style similarity of two strings: twice the number of characters the
/// section splitter matches, over the combined character count.
pub fn string_similarity(a: &str, b: &str) -> f64 {
    if std::ptr::eq(a, b) {
        return 1.0;
    }
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let chars1: Vec<char> = a.chars().collect();
    let chars2: Vec<char> = b.chars().collect();
    let matched: usize = calculate_sections(&chars1, &chars2, &DiffOptions::default(), NaturalComparer)
        .filter(|section| section.is_match())
        .map(|section| section.length_in_collection1())
        .sum();

    (matched * 2) as f64 / (chars1.len() + chars2.len()) as f64
}

/// [`string_similarity`] over anything that reads as text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextSimilarity;

impl<T: TextElement + ?Sized> ElementSimilarity<T> for TextSimilarity {
    fn similarity(&self, a: &T, b: &T) -> f64 {
        string_similarity(a.text().unwrap_or_default(), b.text().unwrap_or_default())
    }
}

/// Similarity aligner for lines of text.
#[derive(Debug, Clone)]
pub struct StringSimilarityDiffElementAligner {
    inner: ElementSimilarityDiffElementAligner<TextSimilarity>,
}

impl StringSimilarityDiffElementAligner {
    pub fn new() -> Self {
        Self {
            inner: ElementSimilarityDiffElementAligner::new(TextSimilarity),
        }
    }

    pub fn with_threshold(modification_threshold: f64) -> Result<Self> {
        Ok(Self {
            inner: ElementSimilarityDiffElementAligner::with_threshold(
                TextSimilarity,
                modification_threshold,
            )?,
        })
    }

    pub fn modification_threshold(&self) -> f64 {
        self.inner.modification_threshold()
    }
}

impl Default for StringSimilarityDiffElementAligner {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TextElement + Clone> DiffElementAligner<T> for StringSimilarityDiffElementAligner {
    fn align(&self, slice1: Slice<'_, T>, slice2: Slice<'_, T>) -> Vec<DiffElement<T>> {
        self.inner.align(slice1, slice2)
    }
}
