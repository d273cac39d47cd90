//! Conflict resolution policies for three-way merges.

use thiserror::Error;

use seqdiff_core::{ElementComparer, NaturalComparer};

/// A merge step that could not be settled. Carries the elements involved
/// so callers can report or hand-resolve the conflict.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct MergeConflict<T> {
    pub message: String,
    pub common_base: Vec<T>,
    pub left: Vec<T>,
    pub right: Vec<T>,
}

impl<T> MergeConflict<T> {
    pub fn new(message: impl Into<String>, common_base: Vec<T>, left: Vec<T>, right: Vec<T>) -> Self {
        Self {
            message: message.into(),
            common_base,
            left,
            right,
        }
    }
}

/// Settles a region where both sides changed the same base elements.
///
/// `common_base` is empty when both sides inserted different content at the
/// same position. Returning an error aborts the merge.
pub trait MergeConflictResolver<T> {
    fn resolve(&self, common_base: &[T], left: &[T], right: &[T]) -> Result<Vec<T>, MergeConflict<T>>;
}

impl<T, F> MergeConflictResolver<T> for F
where
    F: Fn(&[T], &[T], &[T]) -> Result<Vec<T>, MergeConflict<T>>,
{
    fn resolve(&self, common_base: &[T], left: &[T], right: &[T]) -> Result<Vec<T>, MergeConflict<T>> {
        self(common_base, left, right)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TakeLeft;

impl<T: Clone> MergeConflictResolver<T> for TakeLeft {
    fn resolve(&self, _common_base: &[T], left: &[T], _right: &[T]) -> Result<Vec<T>, MergeConflict<T>> {
        Ok(left.to_vec())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TakeRight;

impl<T: Clone> MergeConflictResolver<T> for TakeRight {
    fn resolve(&self, _common_base: &[T], _left: &[T], right: &[T]) -> Result<Vec<T>, MergeConflict<T>> {
        Ok(right.to_vec())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TakeLeftThenRight;

impl<T: Clone> MergeConflictResolver<T> for TakeLeftThenRight {
    fn resolve(&self, _common_base: &[T], left: &[T], right: &[T]) -> Result<Vec<T>, MergeConflict<T>> {
        Ok(left.iter().chain(right).cloned().collect())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TakeRightThenLeft;

impl<T: Clone> MergeConflictResolver<T> for TakeRightThenLeft {
    fn resolve(&self, _common_base: &[T], left: &[T], right: &[T]) -> Result<Vec<T>, MergeConflict<T>> {
        Ok(right.iter().chain(left).cloned().collect())
    }
}

/// Takes left, then right unless both sides made the same change.
#[derive(Debug, Clone, Copy, Default)]
pub struct TakeLeftThenRightIfRightDiffersFromLeft<C = NaturalComparer> {
    comparer: C,
}

impl<C> TakeLeftThenRightIfRightDiffersFromLeft<C> {
    pub fn new(comparer: C) -> Self {
        Self { comparer }
    }
}

impl<T: Clone, C: ElementComparer<T>> MergeConflictResolver<T> for TakeLeftThenRightIfRightDiffersFromLeft<C> {
    fn resolve(&self, _common_base: &[T], left: &[T], right: &[T]) -> Result<Vec<T>, MergeConflict<T>> {
        let same = left.len() == right.len()
            && left
                .iter()
                .zip(right)
                .all(|(l, r)| self.comparer.equals(l, r));
        if same {
            return Ok(left.to_vec());
        }
        Ok(left.iter().chain(right).cloned().collect())
    }
}

/// Refuses every conflict.
#[derive(Debug, Clone, Copy, Default)]
pub struct AbortOnConflict;

impl<T: Clone> MergeConflictResolver<T> for AbortOnConflict {
    fn resolve(&self, common_base: &[T], left: &[T], right: &[T]) -> Result<Vec<T>, MergeConflict<T>> {
        Err(MergeConflict::new(
            "conflicting changes require manual resolution",
            common_base.to_vec(),
            left.to_vec(),
            right.to_vec(),
        ))
    }
}

/// Keeps both sides of a conflict between git-style marker lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConflictMarkers;

impl ConflictMarkers {
    pub const LEFT: &'static str = "<<<<<<< LEFT";
    pub const BASE: &'static str = "||||||| BASE";
    pub const SEPARATOR: &'static str = "=======";
    pub const RIGHT: &'static str = ">>>>>>> RIGHT";
}

impl<T: Clone + From<&'static str>> MergeConflictResolver<T> for ConflictMarkers {
    fn resolve(&self, common_base: &[T], left: &[T], right: &[T]) -> Result<Vec<T>, MergeConflict<T>> {
        let mut out = Vec::with_capacity(common_base.len() + left.len() + right.len() + 4);
        out.push(T::from(Self::LEFT));
        out.extend_from_slice(left);
        out.push(T::from(Self::BASE));
        out.extend_from_slice(common_base);
        out.push(T::from(Self::SEPARATOR));
        out.extend_from_slice(right);
        out.push(T::from(Self::RIGHT));
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seqdiff_core::KeyComparer;

    const BASE: &[&str] = &["b"];
    const LEFT: &[&str] = &["l1", "l2"];
    const RIGHT: &[&str] = &["r"];

    #[test]
    fn test_take_policies() {
        assert_eq!(TakeLeft.resolve(BASE, LEFT, RIGHT).unwrap(), vec!["l1", "l2"]);
        assert_eq!(TakeRight.resolve(BASE, LEFT, RIGHT).unwrap(), vec!["r"]);
        assert_eq!(
            TakeLeftThenRight.resolve(BASE, LEFT, RIGHT).unwrap(),
            vec!["l1", "l2", "r"]
        );
        assert_eq!(
            TakeRightThenLeft.resolve(BASE, LEFT, RIGHT).unwrap(),
            vec!["r", "l1", "l2"]
        );
    }

    #[test]
    fn test_take_left_then_right_if_different() {
        let resolver: TakeLeftThenRightIfRightDiffersFromLeft = Default::default();
        assert_eq!(resolver.resolve(BASE, &["x"], &["x"]).unwrap(), vec!["x"]);
        assert_eq!(resolver.resolve(BASE, &["x"], &["y"]).unwrap(), vec!["x", "y"]);

        let folded = TakeLeftThenRightIfRightDiffersFromLeft::new(KeyComparer(|s: &&str| s.to_lowercase()));
        assert_eq!(folded.resolve(BASE, &["X"], &["x"]).unwrap(), vec!["X"]);
    }

    #[test]
    fn test_abort_carries_operands() {
        let conflict = AbortOnConflict.resolve(BASE, LEFT, RIGHT).unwrap_err();
        assert_eq!(conflict.common_base, vec!["b"]);
        assert_eq!(conflict.left, vec!["l1", "l2"]);
        assert_eq!(conflict.right, vec!["r"]);
        assert!(conflict.to_string().contains("manual resolution"));
    }

    #[test]
    fn test_conflict_markers() {
        let merged: Vec<String> = ConflictMarkers
            .resolve(
                &["base".to_string()],
                &["mine".to_string()],
                &["theirs".to_string()],
            )
            .unwrap();
        assert_eq!(
            merged,
            vec![
                "<<<<<<< LEFT",
                "mine",
                "||||||| BASE",
                "base",
                "=======",
                "theirs",
                ">>>>>>> RIGHT"
            ]
        );
    }

    #[test]
    fn test_closure_resolver() {
        let pick_longer = |_: &[String], left: &[String], right: &[String]| -> Result<Vec<String>, MergeConflict<String>> {
            Ok(if left.len() >= right.len() { left } else { right }.to_vec())
        };
        let left = vec!["l1".to_string(), "l2".to_string()];
        let right = vec!["r".to_string()];
        assert_eq!(pick_longer.resolve(&[], &left, &right).unwrap(), left);
    }
}
