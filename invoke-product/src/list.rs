use crate::collect::Sink;
use crate::layout::{Direct, Layout};
use crate::param::{Param, ParamKind};
use crate::shape::{self, ProductShape};
use crate::walk::{Call, Walk};

/// An ordered list of parameters: a tuple of up to 12 [`Param`]s.
///
/// Everything about the product is known from the list's type: how many
/// invocations it expands to, whether any index set is empty and how the
/// results are delivered.
///
/// ```rust
/// # use invoke_product::{IndexSet, ParamList};
/// type Params = (IndexSet<u8, 3>, &'static str, IndexSet<u8, 2>);
///
/// assert_eq!(Params::TOTAL, 6);
/// assert_eq!(Params::INDEX_SETS, 2);
/// assert!(!Params::HAS_EMPTY);
/// ```
pub trait ParamList {
    /// the argument tuple handed to the callable, one realized value per position
    type Args;
    type Layout: Layout;

    const ARITY: usize;
    /// number of invocations: product of index-set lengths, 1 without index sets
    const TOTAL: usize;
    const HAS_EMPTY: bool;
    const INDEX_SETS: usize;

    fn kinds() -> Vec<ParamKind>;

    /// Runtime counterpart of the constants above.
    ///
    /// Panics if the product of the index set lengths overflows `usize`.
    fn shape() -> ProductShape {
        ProductShape::new(Self::kinds())
    }

    /// Every position realized at its first element.
    ///
    /// Panics if the list contains an empty index set.
    fn first_combination(&self) -> Self::Args;

    /// Invoke `f` once per combination, in visitation order, handing each
    /// output to `sink`. Stops at the first error returned by the sink.
    fn walk<F, Out, S>(&self, f: &mut F, sink: &mut S) -> Result<(), S::Error>
    where
        F: Call<Self::Args, Out>,
        S: Sink<Out>;
}

macro_rules! one {
    ($t:tt) => {
        1
    };
}

macro_rules! join {
    () => { Direct };
    ($P:ident) => { <$P as Param>::Layout };
    ($P:ident, $($rest:ident),+) => {
        <<$P as Param>::Layout as Layout>::Join<join!($($rest),+)>
    };
}

macro_rules! cons {
    () => { () };
    ($head:expr $(, $rest:expr)*) => { ($head, cons!($($rest),*)) };
}

macro_rules! param_lists {
    ($(($($P:ident $idx:tt),*)),* $(,)?) => {
        $(
            impl<$($P: Param),*> ParamList for ($($P,)*) {
                type Args = ($(<$P as Param>::Value,)*);
                type Layout = join!($($P),*);

                const ARITY: usize = 0 $(+ one!($P))*;
                const TOTAL: usize = shape::total(&[$(<$P as Param>::KIND),*]);
                const HAS_EMPTY: bool = shape::has_empty(&[$(<$P as Param>::KIND),*]);
                const INDEX_SETS: usize = shape::index_sets(&[$(<$P as Param>::KIND),*]);

                fn kinds() -> Vec<ParamKind> {
                    vec![$(<$P as Param>::KIND),*]
                }

                fn first_combination(&self) -> Self::Args {
                    ($(self.$idx.realize(0),)*)
                }

                fn walk<Func, Out, S>(&self, f: &mut Func, sink: &mut S) -> Result<(), S::Error>
                where
                    Func: Call<Self::Args, Out>,
                    S: Sink<Out>,
                {
                    Walk::walk(cons!($(&self.$idx),*), (), f, sink)
                }
            }
        )*
    };
}

param_lists!(
    (),
    (P0 0),
    (P0 0, P1 1),
    (P0 0, P1 1, P2 2),
    (P0 0, P1 1, P2 2, P3 3),
    (P0 0, P1 1, P2 2, P3 3, P4 4),
    (P0 0, P1 1, P2 2, P3 3, P4 4, P5 5),
    (P0 0, P1 1, P2 2, P3 3, P4 4, P5 5, P6 6),
    (P0 0, P1 1, P2 2, P3 3, P4 4, P5 5, P6 6, P7 7),
    (P0 0, P1 1, P2 2, P3 3, P4 4, P5 5, P6 6, P7 7, P8 8),
    (P0 0, P1 1, P2 2, P3 3, P4 4, P5 5, P6 6, P7 7, P8 8, P9 9),
    (P0 0, P1 1, P2 2, P3 3, P4 4, P5 5, P6 6, P7 7, P8 8, P9 9, P10 10),
    (P0 0, P1 1, P2 2, P3 3, P4 4, P5 5, P6 6, P7 7, P8 8, P9 9, P10 10, P11 11),
);
