//! Equality/hash adapters used by the matching engines.
//!
//! Hash codes are only ever a candidate filter. Every engine re-checks a hash
//! hit with `equals` before accepting it, so a comparer may return colliding
//! codes freely as long as equal elements hash alike.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Caller-supplied element equality.
pub trait ElementComparer<T: ?Sized> {
    fn equals(&self, a: &T, b: &T) -> bool;

    /// Equal elements must produce equal codes.
    fn hash_code(&self, value: &T) -> u64;
}

impl<T: ?Sized, C: ElementComparer<T> + ?Sized> ElementComparer<T> for &C {
    fn equals(&self, a: &T, b: &T) -> bool {
        (**self).equals(a, b)
    }

    fn hash_code(&self, value: &T) -> u64 {
        (**self).hash_code(value)
    }
}

/// The element type's own `PartialEq` and `Hash`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaturalComparer;

impl<T: PartialEq + Hash + ?Sized> ElementComparer<T> for NaturalComparer {
    fn equals(&self, a: &T, b: &T) -> bool {
        a == b
    }

    fn hash_code(&self, value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }
}

/// Lifts a comparer over `T` to nullable elements.
///
/// Two `None` elements are equal, `None` never equals `Some`, and `None`
/// always hashes to 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAware<C>(pub C);

impl<T, C: ElementComparer<T>> ElementComparer<Option<T>> for NullAware<C> {
    fn equals(&self, a: &Option<T>, b: &Option<T>) -> bool {
        match (a, b) {
            (None, None) => true,
            (Some(a), Some(b)) => self.0.equals(a, b),
            _ => false,
        }
    }

    fn hash_code(&self, value: &Option<T>) -> u64 {
        value.as_ref().map_or(0, |v| self.0.hash_code(v))
    }
}

/// Compares elements through a derived key, e.g. case-folded or trimmed text.
#[derive(Debug, Clone, Copy)]
pub struct KeyComparer<F>(pub F);

impl<T: ?Sized, K, F> ElementComparer<T> for KeyComparer<F>
where
    F: Fn(&T) -> K,
    K: PartialEq + Hash,
{
    fn equals(&self, a: &T, b: &T) -> bool {
        (self.0)(a) == (self.0)(b)
    }

    fn hash_code(&self, value: &T) -> u64 {
        NaturalComparer.hash_code(&(self.0)(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_comparer() {
        assert!(NaturalComparer.equals("abc", "abc"));
        assert!(!NaturalComparer.equals(&1, &2));
        assert_eq!(
            NaturalComparer.hash_code("abc"),
            NaturalComparer.hash_code(&String::from("abc")[..])
        );
    }

    #[test]
    fn test_null_aware_treats_none_uniformly() {
        let comparer = NullAware(NaturalComparer);
        assert!(comparer.equals(&None::<i32>, &None));
        assert!(!comparer.equals(&None, &Some(0)));
        assert!(comparer.equals(&Some(3), &Some(3)));
        assert_eq!(comparer.hash_code(&None::<i32>), 0);
    }

    #[test]
    fn test_key_comparer_case_insensitive() {
        let comparer = KeyComparer(|s: &&str| s.to_lowercase());
        assert!(comparer.equals(&"Hello", &"hELLO"));
        assert_eq!(comparer.hash_code(&"Hello"), comparer.hash_code(&"hello"));
        assert!(!comparer.equals(&"Hello", &"World"));
    }

    #[test]
    fn test_reference_forwarding() {
        fn takes<C: ElementComparer<u8>>(c: C) -> bool {
            c.equals(&1, &1)
        }
        assert!(takes(&NaturalComparer));
    }
}
