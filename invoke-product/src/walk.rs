//! Depth-first expansion of a parameter list into a sequence of invocations.
//!
//! The list is walked left to right as a chain of `(&head, rest)` pairs
//! terminated by `()`. Each level extends the argument prefix by one realized
//! value; an index set extends it once per element and fully walks the rest
//! of the list before moving to its next element, so the leftmost index set
//! is the outermost loop and the rightmost varies fastest.

use std::convert::Infallible;

use crate::collect::Sink;
use crate::param::{Param, ParamKind};

/// A callable invoked with a tuple of arguments.
///
/// Implemented for every `FnMut` taking up to 12 arguments, so plain
/// closures and fn items can be handed to the engine directly.
pub trait Call<Args, R> {
    fn call(&mut self, args: Args) -> R;
}

macro_rules! call_impls {
    ($(($($A:ident $a:ident),*)),* $(,)?) => {
        $(
            impl<Func, R, $($A),*> Call<($($A,)*), R> for Func
            where
                Func: FnMut($($A),*) -> R,
            {
                #[inline(always)]
                fn call(&mut self, ($($a,)*): ($($A,)*)) -> R {
                    self($($a),*)
                }
            }
        )*
    };
}

call_impls!(
    (),
    (A a),
    (A a, B b),
    (A a, B b, C c),
    (A a, B b, C c, D d),
    (A a, B b, C c, D d, E e),
    (A a, B b, C c, D d, E e, F f),
    (A a, B b, C c, D d, E e, F f, G g),
    (A a, B b, C c, D d, E e, F f, G g, H h),
    (A a, B b, C c, D d, E e, F f, G g, H h, I i),
    (A a, B b, C c, D d, E e, F f, G g, H h, I i, J j),
    (A a, B b, C c, D d, E e, F f, G g, H h, I i, J j, K k),
    (A a, B b, C c, D d, E e, F f, G g, H h, I i, J j, K k, L l),
);

/// Wraps an infallible callable so it can drive the fallible walk.
pub(crate) struct Unfailing<F>(pub(crate) F);

impl<F, Args, R> Call<Args, Result<R, Infallible>> for Unfailing<F>
where
    F: Call<Args, R>,
{
    #[inline(always)]
    fn call(&mut self, args: Args) -> Result<R, Infallible> {
        Ok(self.0.call(args))
    }
}

/// Extend an argument prefix (a tuple) by one value.
pub trait Append<X> {
    type Extended;

    fn append(self, x: X) -> Self::Extended;
}

macro_rules! append_impls {
    ($(($($A:ident $a:ident),*)),* $(,)?) => {
        $(
            impl<$($A,)* X> Append<X> for ($($A,)*) {
                type Extended = ($($A,)* X,);

                #[inline(always)]
                fn append(self, x: X) -> Self::Extended {
                    let ($($a,)*) = self;
                    ($($a,)* x,)
                }
            }
        )*
    };
}

append_impls!(
    (),
    (A a),
    (A a, B b),
    (A a, B b, C c),
    (A a, B b, C c, D d),
    (A a, B b, C c, D d, E e),
    (A a, B b, C c, D d, E e, F f),
    (A a, B b, C c, D d, E e, F f, G g),
    (A a, B b, C c, D d, E e, F f, G g, H h),
    (A a, B b, C c, D d, E e, F f, G g, H h, I i),
    (A a, B b, C c, D d, E e, F f, G g, H h, I i, J j),
    (A a, B b, C c, D d, E e, F f, G g, H h, I i, J j, K k),
);

/// The not-yet-realized remainder of a parameter list.
///
/// `prefix` holds the values realized so far. Once nothing remains, the
/// prefix is the complete argument tuple and the callable is invoked.
pub trait Walk<Prefix, F, Out, S: Sink<Out>> {
    fn walk(self, prefix: Prefix, f: &mut F, sink: &mut S) -> Result<(), S::Error>;
}

impl<Prefix, F, Out, S> Walk<Prefix, F, Out, S> for ()
where
    F: Call<Prefix, Out>,
    S: Sink<Out>,
{
    #[inline(always)]
    fn walk(self, prefix: Prefix, f: &mut F, sink: &mut S) -> Result<(), S::Error> {
        sink.accept(f.call(prefix))
    }
}

impl<'p, P, Rest, Prefix, F, Out, S> Walk<Prefix, F, Out, S> for (&'p P, Rest)
where
    P: Param,
    Prefix: Append<P::Value> + Clone,
    Rest: Walk<Prefix::Extended, F, Out, S> + Copy,
    S: Sink<Out>,
{
    #[inline(always)]
    fn walk(self, prefix: Prefix, f: &mut F, sink: &mut S) -> Result<(), S::Error> {
        let (head, rest) = self;
        match P::KIND {
            ParamKind::Ordinary => rest.walk(prefix.append(head.realize(0)), f, sink),
            ParamKind::IndexSet { len } => {
                for position in 0..len {
                    rest.walk(prefix.clone().append(head.realize(position)), f, sink)?;
                }
                Ok(())
            }
        }
    }
}
