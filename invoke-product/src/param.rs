use std::borrow::Cow;
use std::rc::Rc;
use std::sync::Arc;

use crate::layout::{Direct, Expanded, Layout};

/// Static descriptor of a single parameter position.
///
/// Every [`Param`] carries its descriptor as an associated constant, so the
/// kind of a position is fixed by its type and can never change while a
/// product is being expanded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParamKind {
    /// passed through unchanged to every invocation
    Ordinary,
    /// expanded: one invocation per element
    IndexSet { len: usize },
}

impl ParamKind {
    /// Number of values this position contributes to the product.
    pub const fn factor(self) -> usize {
        match self {
            ParamKind::Ordinary => 1,
            ParamKind::IndexSet { len } => len,
        }
    }

    pub const fn is_index_set(self) -> bool {
        matches!(self, ParamKind::IndexSet { .. })
    }
}

/// A single position in a parameter list.
///
/// `realize` produces the value handed to the callable for some position
/// within this parameter. Ordinary parameters ignore the position and yield a
/// fresh clone of their value; index sets yield the element at that position.
///
/// Note that a shared reference is always an ordinary parameter: passing
/// `&index_set` hands the index set itself to the callable instead of
/// expanding it.
pub trait Param {
    /// the value handed to the callable
    type Value: Clone;
    /// [`Direct`] for ordinary parameters, [`Expanded`] for index sets
    type Layout: Layout;

    const KIND: ParamKind;

    fn realize(&self, position: usize) -> Self::Value;
}

/// Integer types that may be stored in an [`IndexSet`].
pub trait IndexInt: Copy + Eq + std::fmt::Debug + sealed::Sealed {
    /// Convert a position within an index set to this type, if it fits.
    fn from_position(position: usize) -> Option<Self>;

    fn checked_add(self, rhs: Self) -> Option<Self>;
}

mod sealed {
    pub trait Sealed {}
}

macro_rules! index_ints {
    ($($t:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $t {}

            impl IndexInt for $t {
                #[inline]
                fn from_position(position: usize) -> Option<Self> {
                    <$t>::try_from(position).ok()
                }

                #[inline]
                fn checked_add(self, rhs: Self) -> Option<Self> {
                    <$t>::checked_add(self, rhs)
                }
            }
        )*
    };
}

index_ints!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

/// Failure to build an [`IndexSet`] from runtime data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IndexSetError {
    #[error("index set holds {expected} values but {found} were provided")]
    LengthMismatch { expected: usize, found: usize },
    #[error("value at position {position} does not fit in {ty}")]
    OutOfRange { position: usize, ty: &'static str },
}

/// A fixed, ordered collection of `N` integers marking a parameter position
/// for expansion. May be empty.
///
/// ```rust
/// # use invoke_product::{invoke_over_product, IndexSet};
/// let sums = invoke_over_product(
///     |a: u8, b: u8| a + b,
///     (IndexSet::new([1, 2]), IndexSet::new([10, 20])),
/// );
/// assert_eq!(sums, [11, 21, 12, 22]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IndexSet<T, const N: usize> {
    values: [T; N],
}

impl<T: IndexInt, const N: usize> IndexSet<T, N> {
    pub const fn new(values: [T; N]) -> Self {
        Self { values }
    }

    /// `0, 1, .., N - 1`
    pub fn sequence() -> Result<Self, IndexSetError> {
        Self::build(|position| T::from_position(position))
    }

    /// `start, start + 1, .., start + N - 1`
    pub fn offset_sequence(start: T) -> Result<Self, IndexSetError> {
        Self::build(|position| T::from_position(position).and_then(|p| start.checked_add(p)))
    }

    fn build(mut value_at: impl FnMut(usize) -> Option<T>) -> Result<Self, IndexSetError> {
        let mut values = Vec::with_capacity(N);
        for position in 0..N {
            let value = value_at(position).ok_or_else(|| IndexSetError::OutOfRange {
                position,
                ty: std::any::type_name::<T>(),
            })?;
            values.push(value);
        }
        Self::try_from(values)
    }

    pub fn values(&self) -> &[T; N] {
        &self.values
    }

    pub fn get(&self, position: usize) -> Option<T> {
        self.values.get(position).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.values.iter().copied()
    }

    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }
}

impl<T: IndexInt> IndexSet<T, 0> {
    pub const fn empty() -> Self {
        Self { values: [] }
    }
}

impl<T: IndexInt, const N: usize> TryFrom<&[T]> for IndexSet<T, N> {
    type Error = IndexSetError;

    fn try_from(values: &[T]) -> Result<Self, Self::Error> {
        let values = <[T; N]>::try_from(values).map_err(|_| IndexSetError::LengthMismatch {
            expected: N,
            found: values.len(),
        })?;
        Ok(Self::new(values))
    }
}

impl<T: IndexInt, const N: usize> TryFrom<Vec<T>> for IndexSet<T, N> {
    type Error = IndexSetError;

    fn try_from(values: Vec<T>) -> Result<Self, Self::Error> {
        let found = values.len();
        let values = <[T; N]>::try_from(values)
            .map_err(|_| IndexSetError::LengthMismatch { expected: N, found })?;
        Ok(Self::new(values))
    }
}

impl<T: IndexInt, const N: usize> Param for IndexSet<T, N> {
    type Value = T;
    type Layout = Expanded;

    const KIND: ParamKind = ParamKind::IndexSet { len: N };

    #[inline(always)]
    fn realize(&self, position: usize) -> T {
        self.values[position]
    }
}

/// Build an [`IndexSet`] from a list of integers.
///
/// ```rust
/// # use invoke_product::{index_set, IndexSet};
/// let set: IndexSet<i32, 3> = index_set![1, 2, 3];
/// assert_eq!(set.values(), &[1, 2, 3]);
/// ```
#[macro_export]
macro_rules! index_set {
    ($($value:expr),* $(,)?) => {
        $crate::IndexSet::new([$($value),*])
    };
}

/// Marks any cloneable value as an ordinary parameter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Ordinary<T>(pub T);

impl<T: Clone> Param for Ordinary<T> {
    type Value = T;
    type Layout = Direct;

    const KIND: ParamKind = ParamKind::Ordinary;

    #[inline(always)]
    fn realize(&self, _position: usize) -> T {
        self.0.clone()
    }
}

impl<'a, T: ?Sized> Param for &'a T {
    type Value = &'a T;
    type Layout = Direct;

    const KIND: ParamKind = ParamKind::Ordinary;

    #[inline(always)]
    fn realize(&self, _position: usize) -> &'a T {
        *self
    }
}

macro_rules! ordinary {
    ($($t:ty),* $(,)?) => {
        $(
            impl Param for $t {
                type Value = $t;
                type Layout = Direct;

                const KIND: ParamKind = ParamKind::Ordinary;

                #[inline(always)]
                fn realize(&self, _position: usize) -> $t {
                    self.clone()
                }
            }
        )*
    };
}

ordinary!(
    bool, char, f32, f64, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize,
    String,
);

macro_rules! ordinary_generic {
    ($($t:ident),* $(,)?) => {
        $(
            impl<T: Clone> Param for $t<T> {
                type Value = $t<T>;
                type Layout = Direct;

                const KIND: ParamKind = ParamKind::Ordinary;

                #[inline(always)]
                fn realize(&self, _position: usize) -> $t<T> {
                    self.clone()
                }
            }
        )*
    };
}

ordinary_generic!(Vec, Option, Box);

impl<T: ?Sized> Param for Rc<T> {
    type Value = Rc<T>;
    type Layout = Direct;

    const KIND: ParamKind = ParamKind::Ordinary;

    fn realize(&self, _position: usize) -> Rc<T> {
        Rc::clone(self)
    }
}

impl<T: ?Sized> Param for Arc<T> {
    type Value = Arc<T>;
    type Layout = Direct;

    const KIND: ParamKind = ParamKind::Ordinary;

    fn realize(&self, _position: usize) -> Arc<T> {
        Arc::clone(self)
    }
}

impl<'a, B: ?Sized + ToOwned> Param for Cow<'a, B> {
    type Value = Cow<'a, B>;
    type Layout = Direct;

    const KIND: ParamKind = ParamKind::Ordinary;

    fn realize(&self, _position: usize) -> Cow<'a, B> {
        self.clone()
    }
}

#[test]
fn sequences() {
    let set = IndexSet::<u8, 4>::sequence().unwrap();
    assert_eq!(set.values(), &[0, 1, 2, 3]);

    let set = IndexSet::<i16, 3>::offset_sequence(-1).unwrap();
    assert_eq!(set.values(), &[-1, 0, 1]);

    let err = IndexSet::<u8, 300>::sequence().unwrap_err();
    assert_eq!(err, IndexSetError::OutOfRange { position: 256, ty: "u8" });

    let err = IndexSet::<i8, 3>::offset_sequence(126).unwrap_err();
    assert_eq!(err, IndexSetError::OutOfRange { position: 2, ty: "i8" });
}

#[test]
fn from_runtime_values() {
    let set = IndexSet::<u32, 2>::try_from(vec![7, 9]).unwrap();
    assert_eq!(set.get(1), Some(9));
    assert_eq!(set.get(2), None);

    let err = IndexSet::<u32, 2>::try_from(&[1, 2, 3][..]).unwrap_err();
    assert_eq!(err, IndexSetError::LengthMismatch { expected: 2, found: 3 });
    assert_eq!(err.to_string(), "index set holds 2 values but 3 were provided");
}

#[test]
fn kinds_are_static() {
    assert_eq!(<IndexSet<i64, 5> as Param>::KIND, ParamKind::IndexSet { len: 5 });
    assert_eq!(<IndexSet<i64, 0> as Param>::KIND.factor(), 0);
    assert_eq!(<&str as Param>::KIND, ParamKind::Ordinary);
    assert_eq!(<Ordinary<Vec<u8>> as Param>::KIND.factor(), 1);
    assert!(IndexSet::<i8, 0>::empty().is_empty());
}
