use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap, HashMap, HashSet, LinkedList, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

use crate::collect::{Batch, Builder, Collector, Discard};

/// How the results of an expanded call are gathered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Category {
    /// `()`: invocations happen for their side effects only, nothing is collected
    NoValue,
    /// `&'a T`: slots borrow values owned elsewhere
    Reference,
    /// slots own the values returned by each invocation
    ByValue,
}

/// Classifies a callable's result type and picks the collector for it.
///
/// The result type is fixed by the callable's signature, so it is the same
/// for every combination in the product. A type that does not implement
/// `Classify` cannot be used as a result at all; use [`by_value!`] to opt a
/// type of your own into by-value collection.
///
/// [`by_value!`]: crate::by_value
pub trait Classify: Sized {
    const CATEGORY: Category;

    type Collector: Collector<Self>;
}

impl Classify for () {
    const CATEGORY: Category = Category::NoValue;

    type Collector = Discard;
}

impl<'a, T: ?Sized> Classify for &'a T {
    const CATEGORY: Category = Category::Reference;

    type Collector = Builder<&'a T>;
}

/// Collect results of the given types by value.
///
/// ```rust
/// # use invoke_product::{by_value, invoke_over_product, IndexSet};
/// #[derive(Debug, PartialEq)]
/// struct Tile { w: u32, h: u32 }
///
/// by_value!(Tile);
///
/// let tiles = invoke_over_product(
///     |w: u32, h: u32| Tile { w, h },
///     (IndexSet::new([8, 16]), IndexSet::new([4])),
/// );
/// assert_eq!(tiles[1], Tile { w: 16, h: 4 });
/// ```
#[macro_export]
macro_rules! by_value {
    ($($t:ty),* $(,)?) => {
        $(
            impl $crate::Classify for $t {
                const CATEGORY: $crate::Category = $crate::Category::ByValue;

                type Collector = $crate::Builder<$t>;
            }
        )*
    };
}

by_value!(
    bool, char, f32, f64, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize,
    String, std::time::Duration, std::cmp::Ordering,
);

macro_rules! by_value_generic {
    ($([$($g:tt)*] $t:ty),* $(,)?) => {
        $(
            impl<$($g)*> Classify for $t {
                const CATEGORY: Category = Category::ByValue;

                type Collector = Builder<$t>;
            }
        )*
    };
}

by_value_generic!(
    [T] Vec<T>,
    [T] VecDeque<T>,
    [T] LinkedList<T>,
    [T] BinaryHeap<T>,
    [T] Option<T>,
    [T: ?Sized] Box<T>,
    [T: ?Sized] Rc<T>,
    [T: ?Sized] Arc<T>,
    [T, E] Result<T, E>,
    [K, V, S] HashMap<K, V, S>,
    [T, S] HashSet<T, S>,
    [K, V] BTreeMap<K, V>,
    [T] BTreeSet<T>,
    ['a, B: ?Sized + ToOwned] Cow<'a, B>,
    [T] Batch<T>,
    [T, const N: usize] [T; N],
);

macro_rules! by_value_tuples {
    ($(($($t:ident),+)),* $(,)?) => {
        $(
            impl<$($t),+> Classify for ($($t,)+) {
                const CATEGORY: Category = Category::ByValue;

                type Collector = Builder<($($t,)+)>;
            }
        )*
    };
}

by_value_tuples!(
    (A),
    (A, B),
    (A, B, C),
    (A, B, C, D),
    (A, B, C, D, E),
    (A, B, C, D, E, F),
    (A, B, C, D, E, F, G),
    (A, B, C, D, E, F, G, H),
    (A, B, C, D, E, F, G, H, I),
    (A, B, C, D, E, F, G, H, I, J),
    (A, B, C, D, E, F, G, H, I, J, K),
    (A, B, C, D, E, F, G, H, I, J, K, L),
);

#[test]
fn categories() {
    assert_eq!(<() as Classify>::CATEGORY, Category::NoValue);
    assert_eq!(<&str as Classify>::CATEGORY, Category::Reference);
    assert_eq!(<&[u8] as Classify>::CATEGORY, Category::Reference);
    assert_eq!(<i64 as Classify>::CATEGORY, Category::ByValue);
    assert_eq!(<Result<u8, String> as Classify>::CATEGORY, Category::ByValue);
    assert_eq!(<(u8, &str) as Classify>::CATEGORY, Category::ByValue);
}
