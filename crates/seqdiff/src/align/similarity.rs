use tracing::debug;

use seqdiff_core::{DiffElement, DiffOperation, Error, Result, Slice};

use super::basic::BasicInsertDeleteDiffElementAligner;
use super::{DiffElementAligner, ElementSimilarity};

/// Sections with more elements than this (both sides combined) are aligned
/// with plain deletes and inserts instead.
pub const MAX_ALIGNED_ELEMENTS: usize = 15;

pub const DEFAULT_MODIFICATION_THRESHOLD: f64 = 0.3333;

/// Aligns short unmatched sections by searching for the sequence of
/// insert, delete and modify steps with the best average similarity.
///
/// Two elements are only paired up as a `Modify` when their similarity
/// reaches the modification threshold.
#[derive(Debug, Clone)]
pub struct ElementSimilarityDiffElementAligner<S> {
    similarity: S,
    modification_threshold: f64,
}

impl<S> ElementSimilarityDiffElementAligner<S> {
    pub fn new(similarity: S) -> Self {
        Self {
            similarity,
            modification_threshold: DEFAULT_MODIFICATION_THRESHOLD,
        }
    }

    pub fn with_threshold(similarity: S, modification_threshold: f64) -> Result<Self> {
        if !modification_threshold.is_finite() || !(0.0..=1.0).contains(&modification_threshold) {
            return Err(Error::InvalidThreshold(modification_threshold));
        }
        Ok(Self {
            similarity,
            modification_threshold,
        })
    }

    pub fn modification_threshold(&self) -> f64 {
        self.modification_threshold
    }
}

/// One cell of the alignment table: the best path from `(i, j)` to the end.
#[derive(Debug, Clone, Copy)]
struct AlignmentNode {
    operation: DiffOperation,
    similarity: f64,
    node_count: usize,
}

impl AlignmentNode {
    const END: AlignmentNode = AlignmentNode {
        operation: DiffOperation::Match,
        similarity: 0.0,
        node_count: 0,
    };

    fn average_similarity(&self) -> f64 {
        if self.node_count == 0 {
            0.0
        } else {
            self.similarity / self.node_count as f64
        }
    }

    fn step(operation: DiffOperation, gain: f64, rest: &AlignmentNode) -> Self {
        Self {
            operation,
            similarity: gain + rest.similarity,
            node_count: rest.node_count + 1,
        }
    }
}

/// Row-major `(length1 + 1) x (length2 + 1)` table of best continuations.
struct AlignmentTable {
    width: usize,
    nodes: Vec<AlignmentNode>,
}

impl AlignmentTable {
    fn at(&self, i: usize, j: usize) -> &AlignmentNode {
        &self.nodes[i * self.width + j]
    }
}

impl<S> ElementSimilarityDiffElementAligner<S> {
    fn build_table<T>(&self, slice1: Slice<'_, T>, slice2: Slice<'_, T>) -> AlignmentTable
    where
        S: ElementSimilarity<T>,
    {
        let (length1, length2) = (slice1.len(), slice2.len());
        let width = length2 + 1;
        let mut table = AlignmentTable {
            width,
            nodes: vec![AlignmentNode::END; (length1 + 1) * width],
        };

        for i in (0..=length1).rev() {
            for j in (0..=length2).rev() {
                let node = if i == length1 && j == length2 {
                    AlignmentNode::END
                } else if i == length1 {
                    AlignmentNode::step(DiffOperation::Insert, 0.0, table.at(i, j + 1))
                } else if j == length2 {
                    AlignmentNode::step(DiffOperation::Delete, 0.0, table.at(i + 1, j))
                } else {
                    let insert = AlignmentNode::step(DiffOperation::Insert, 0.0, table.at(i, j + 1));
                    let delete = AlignmentNode::step(DiffOperation::Delete, 0.0, table.at(i + 1, j));

                    // delete wins ties with insert; modify must strictly beat both
                    let mut best = delete;
                    if insert.average_similarity() > best.average_similarity() {
                        best = insert;
                    }

                    let similarity = self.similarity.similarity(&slice1[i], &slice2[j]);
                    if similarity >= self.modification_threshold {
                        let modify = AlignmentNode::step(
                            DiffOperation::Modify,
                            similarity,
                            table.at(i + 1, j + 1),
                        );
                        if modify.average_similarity() > best.average_similarity() {
                            best = modify;
                        }
                    }
                    best
                };
                table.nodes[i * width + j] = node;
            }
        }

        table
    }
}

impl<T: Clone, S: ElementSimilarity<T>> DiffElementAligner<T> for ElementSimilarityDiffElementAligner<S> {
    fn align(&self, slice1: Slice<'_, T>, slice2: Slice<'_, T>) -> Vec<DiffElement<T>> {
        let total = slice1.len() + slice2.len();
        if total > MAX_ALIGNED_ELEMENTS {
            debug!(
                length1 = slice1.len(),
                length2 = slice2.len(),
                limit = MAX_ALIGNED_ELEMENTS,
                "section too large for similarity alignment, using inserts and deletes"
            );
            return BasicInsertDeleteDiffElementAligner.align(slice1, slice2);
        }
        if slice1.is_empty() || slice2.is_empty() {
            return BasicInsertDeleteDiffElementAligner.align(slice1, slice2);
        }

        let table = self.build_table(slice1, slice2);

        let mut elements = Vec::with_capacity(total);
        let (mut i, mut j) = (0, 0);
        loop {
            let node = table.at(i, j);
            if node.node_count == 0 {
                break;
            }
            match node.operation {
                DiffOperation::Insert => {
                    elements.push(DiffElement::inserted(slice2.lower() + j, slice2[j].clone()));
                    j += 1;
                }
                DiffOperation::Delete => {
                    elements.push(DiffElement::deleted(slice1.lower() + i, slice1[i].clone()));
                    i += 1;
                }
                _ => {
                    elements.push(DiffElement::modified(
                        slice1.lower() + i,
                        slice1[i].clone(),
                        slice2.lower() + j,
                        slice2[j].clone(),
                    ));
                    i += 1;
                    j += 1;
                }
            }
        }

        if elements.is_empty() {
            return BasicInsertDeleteDiffElementAligner.align(slice1, slice2);
        }
        elements
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case_similarity(a: &char, b: &char) -> f64 {
        if a == b {
            1.0
        } else if a.to_ascii_lowercase() == b.to_ascii_lowercase() {
            0.75
        } else {
            0.0
        }
    }

    #[test]
    fn test_threshold_validation() {
        assert!(ElementSimilarityDiffElementAligner::with_threshold(case_similarity, 1.5).is_err());
        assert!(ElementSimilarityDiffElementAligner::with_threshold(case_similarity, f64::NAN).is_err());
        let aligner = ElementSimilarityDiffElementAligner::with_threshold(case_similarity, 0.5).unwrap();
        assert_eq!(aligner.modification_threshold(), 0.5);
        assert_eq!(
            ElementSimilarityDiffElementAligner::new(case_similarity).modification_threshold(),
            DEFAULT_MODIFICATION_THRESHOLD
        );
    }

    #[test]
    fn test_similar_elements_become_modify() {
        let a = ['a', 'B'];
        let b = ['A', 'b'];
        let aligner = ElementSimilarityDiffElementAligner::new(case_similarity);
        let elements = aligner.align(Slice::full(&a), Slice::full(&b));
        assert_eq!(
            elements,
            vec![
                DiffElement::modified(0, 'a', 0, 'A'),
                DiffElement::modified(1, 'B', 1, 'b'),
            ]
        );
    }

    #[test]
    fn test_dissimilar_elements_delete_before_insert() {
        let a = ['x'];
        let b = ['y'];
        let aligner = ElementSimilarityDiffElementAligner::new(case_similarity);
        let elements = aligner.align(Slice::full(&a), Slice::full(&b));
        assert_eq!(
            elements,
            vec![DiffElement::deleted(0, 'x'), DiffElement::inserted(0, 'y')]
        );
    }

    #[test]
    fn test_over_ceiling_falls_back() {
        let a = ['a'; 8];
        let b = ['A'; 8];
        let aligner = ElementSimilarityDiffElementAligner::new(case_similarity);
        let elements = aligner.align(Slice::full(&a), Slice::full(&b));
        assert_eq!(elements.len(), 16);
        assert!(elements[..8]
            .iter()
            .all(|e| e.operation() == DiffOperation::Delete));
        assert!(elements[8..]
            .iter()
            .all(|e| e.operation() == DiffOperation::Insert));
    }
}
