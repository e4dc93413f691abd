//! Static analysis of a parameter list's composition: how many invocations a
//! product expands to and how result slots map back to combinations.

use crate::param::ParamKind;

/// Product of every position's factor. Ordinary parameters contribute 1, so
/// a list without index sets has a total of 1.
///
/// # Panics
///
/// If the product overflows `usize`. Through [`crate::ParamList::TOTAL`] this
/// fails constant evaluation; called at runtime it panics instead of wrapping.
pub const fn total(kinds: &[ParamKind]) -> usize {
    let mut acc: usize = 1;
    let mut i = 0;
    while i < kinds.len() {
        acc = match acc.checked_mul(kinds[i].factor()) {
            Some(acc) => acc,
            None => panic!("cartesian product size overflows usize"),
        };
        i += 1;
    }
    acc
}

pub const fn has_empty(kinds: &[ParamKind]) -> bool {
    let mut i = 0;
    while i < kinds.len() {
        if let ParamKind::IndexSet { len: 0 } = kinds[i] {
            return true;
        }
        i += 1;
    }
    false
}

pub const fn index_sets(kinds: &[ParamKind]) -> usize {
    let mut count = 0;
    let mut i = 0;
    while i < kinds.len() {
        if kinds[i].is_index_set() {
            count += 1;
        }
        i += 1;
    }
    count
}

/// Runtime view of a parameter list's shape, see [`crate::ParamList::shape`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProductShape {
    kinds: Vec<ParamKind>,
    total: usize,
    has_empty: bool,
}

impl ProductShape {
    /// # Panics
    ///
    /// If the product of the index set lengths overflows `usize`.
    pub fn new(kinds: Vec<ParamKind>) -> Self {
        let total = total(&kinds);
        let has_empty = has_empty(&kinds);
        Self {
            kinds,
            total,
            has_empty,
        }
    }

    pub fn kinds(&self) -> &[ParamKind] {
        &self.kinds
    }

    pub fn arity(&self) -> usize {
        self.kinds.len()
    }

    pub fn index_sets(&self) -> usize {
        index_sets(&self.kinds)
    }

    /// Lengths of the index sets, left to right. Ordinary positions are skipped.
    pub fn lengths(&self) -> Vec<usize> {
        self.kinds
            .iter()
            .filter_map(|kind| match kind {
                ParamKind::IndexSet { len } => Some(*len),
                ParamKind::Ordinary => None,
            })
            .collect()
    }

    /// number of invocations (and result slots) the product expands to
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn has_empty(&self) -> bool {
        self.has_empty
    }

    /// true if results are collected into a container rather than returned directly
    pub fn is_expanded(&self) -> bool {
        self.index_sets() > 0
    }

    /// Position within each index set (left to right) that produced the
    /// result at `slot`. The rightmost index set varies fastest.
    pub fn coordinates(&self, slot: usize) -> Option<Vec<usize>> {
        if slot >= self.total || !self.is_expanded() {
            return None;
        }
        let lengths = self.lengths();
        let mut coordinates = vec![0; lengths.len()];
        let mut rest = slot;
        for (coordinate, len) in coordinates.iter_mut().zip(lengths).rev() {
            *coordinate = rest % len;
            rest /= len;
        }
        Some(coordinates)
    }

    /// Inverse of [`ProductShape::coordinates`].
    pub fn slot(&self, coordinates: &[usize]) -> Option<usize> {
        let lengths = self.lengths();
        if lengths.is_empty() || coordinates.len() != lengths.len() {
            return None;
        }
        coordinates
            .iter()
            .zip(lengths)
            .try_fold(0, |acc, (&coordinate, len)| {
                (coordinate < len).then_some(acc * len + coordinate)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: ParamKind = ParamKind::IndexSet { len: 3 };
    const B: ParamKind = ParamKind::IndexSet { len: 2 };
    const C: ParamKind = ParamKind::Ordinary;
    const EMPTY: ParamKind = ParamKind::IndexSet { len: 0 };

    #[test]
    fn counts() {
        assert_eq!(total(&[]), 1);
        assert_eq!(total(&[C]), 1);
        assert_eq!(total(&[A, B, C]), 6);
        assert_eq!(total(&[A, EMPTY, B]), 0);
        assert!(has_empty(&[A, EMPTY]));
        assert!(!has_empty(&[A, B, C]));
        assert_eq!(index_sets(&[C, A, C, B]), 2);
    }

    #[test]
    #[should_panic(expected = "overflows")]
    fn overflow() {
        let huge = ParamKind::IndexSet { len: usize::MAX };
        total(&[huge, B]);
    }

    #[test]
    #[should_panic(expected = "overflows")]
    fn runtime_shape_overflow_panics() {
        let huge = ParamKind::IndexSet { len: usize::MAX / 2 };
        ProductShape::new(vec![huge, C, B, B]);
    }

    #[test]
    fn slot_mapping() {
        let shape = ProductShape::new(vec![A, C, B]);
        assert_eq!(shape.lengths(), vec![3, 2]);
        assert_eq!(shape.total(), 6);

        let visited: Vec<_> = (0..shape.total())
            .map(|slot| shape.coordinates(slot).unwrap())
            .collect();
        assert_eq!(
            visited,
            vec![
                vec![0, 0],
                vec![0, 1],
                vec![1, 0],
                vec![1, 1],
                vec![2, 0],
                vec![2, 1],
            ]
        );
        for (slot, coordinates) in visited.iter().enumerate() {
            assert_eq!(shape.slot(coordinates), Some(slot));
        }

        assert_eq!(shape.coordinates(6), None);
        assert_eq!(shape.slot(&[3, 0]), None);
        assert_eq!(shape.slot(&[0]), None);
    }

    #[test]
    fn direct_shape_has_no_slots() {
        let shape = ProductShape::new(vec![C, C]);
        assert!(!shape.is_expanded());
        assert_eq!(shape.total(), 1);
        assert_eq!(shape.coordinates(0), None);
        assert_eq!(shape.slot(&[]), None);
    }
}
