//! Containers that receive the results of an expanded call, one invocation at
//! a time, in visitation order.

use std::convert::Infallible;
use std::ops::{Deref, Index};

/// Receives the output of each invocation as the walk reaches it.
///
/// Returning `Err` aborts the walk; no further invocations happen.
pub trait Sink<Out> {
    type Error;

    fn accept(&mut self, out: Out) -> Result<(), Self::Error>;
}

/// A [`Sink`] that is sized up front and turned into the caller-visible
/// output once every invocation has been accepted.
pub trait Collector<R>: Sink<R, Error = Infallible> {
    type Output;

    /// allocate room for exactly `total` results
    fn with_total(total: usize) -> Self;

    fn finish(self) -> Self::Output;
}

/// Pre-sized result container with a monotonic write cursor.
///
/// Slots are written strictly in order. [`Builder::finish`] only exposes the
/// [`Batch`] once every one of the `total` slots has been written.
#[derive(Debug)]
pub struct Builder<T> {
    slots: Vec<T>,
    total: usize,
}

impl<T> Builder<T> {
    pub fn with_total(total: usize) -> Self {
        Self {
            slots: Vec::with_capacity(total),
            total,
        }
    }

    /// index of the next slot to be written
    pub fn cursor(&self) -> usize {
        self.slots.len()
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Write `value` at the cursor and advance it.
    ///
    /// Panics if every slot has already been written.
    pub fn write(&mut self, value: T) {
        assert!(
            self.cursor() < self.total,
            "result container overrun: all {} slots already written",
            self.total
        );
        self.slots.push(value);
    }

    /// Panics if any slot is still unwritten.
    pub fn finish(self) -> Batch<T> {
        assert_eq!(
            self.cursor(),
            self.total,
            "result container sealed with unwritten slots"
        );
        tracing::trace!(total = self.total, "sealed result container");
        Batch {
            slots: self.slots.into_boxed_slice(),
        }
    }
}

impl<T> Sink<T> for Builder<T> {
    type Error = Infallible;

    #[inline(always)]
    fn accept(&mut self, out: T) -> Result<(), Infallible> {
        self.write(out);
        Ok(())
    }
}

impl<T> Collector<T> for Builder<T> {
    type Output = Batch<T>;

    fn with_total(total: usize) -> Self {
        Builder::with_total(total)
    }

    fn finish(self) -> Batch<T> {
        Builder::finish(self)
    }
}

/// Degenerate collector for callables that return nothing.
#[derive(Debug, Default)]
pub struct Discard;

impl Sink<()> for Discard {
    type Error = Infallible;

    #[inline(always)]
    fn accept(&mut self, _out: ()) -> Result<(), Infallible> {
        Ok(())
    }
}

impl Collector<()> for Discard {
    type Output = ();

    fn with_total(_total: usize) -> Self {
        Discard
    }

    fn finish(self) {}
}

/// Adapts a collector to callables returning `Result`: `Ok` values are
/// forwarded, the first `Err` stops the walk.
pub(crate) struct Fallible<'c, C>(pub(crate) &'c mut C);

impl<'c, C, R, E> Sink<Result<R, E>> for Fallible<'c, C>
where
    C: Sink<R, Error = Infallible>,
{
    type Error = E;

    #[inline(always)]
    fn accept(&mut self, out: Result<R, E>) -> Result<(), E> {
        match self.0.accept(out?) {
            Ok(()) => Ok(()),
            Err(never) => match never {},
        }
    }
}

/// Fixed-size ordered results of an expanded call. Slot `i` holds the result
/// of the `i`-th invocation in visitation order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Batch<T> {
    slots: Box<[T]>,
}

impl<T> Batch<T> {
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.slots
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.slots.iter()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.slots.into_vec()
    }

    pub fn into_boxed_slice(self) -> Box<[T]> {
        self.slots
    }
}

impl<T> Deref for Batch<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.slots
    }
}

impl<T> AsRef<[T]> for Batch<T> {
    fn as_ref(&self) -> &[T] {
        &self.slots
    }
}

impl<T> Index<usize> for Batch<T> {
    type Output = T;

    fn index(&self, slot: usize) -> &T {
        &self.slots[slot]
    }
}

impl<T> IntoIterator for Batch<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.into_vec().into_iter()
    }
}

impl<'b, T> IntoIterator for &'b Batch<T> {
    type Item = &'b T;
    type IntoIter = std::slice::Iter<'b, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}

impl<T> From<Batch<T>> for Vec<T> {
    fn from(batch: Batch<T>) -> Vec<T> {
        batch.into_vec()
    }
}

impl<T: PartialEq<U>, U, const N: usize> PartialEq<[U; N]> for Batch<T> {
    fn eq(&self, other: &[U; N]) -> bool {
        self.slots[..] == other[..]
    }
}

impl<T: PartialEq<U>, U> PartialEq<[U]> for Batch<T> {
    fn eq(&self, other: &[U]) -> bool {
        self.slots[..] == other[..]
    }
}

impl<T: PartialEq<U>, U> PartialEq<Vec<U>> for Batch<T> {
    fn eq(&self, other: &Vec<U>) -> bool {
        self.slots[..] == other[..]
    }
}

#[test]
fn builder_fills_in_order() {
    let mut builder = Builder::with_total(3);
    for (slot, value) in ["a", "b", "c"].into_iter().enumerate() {
        assert_eq!(builder.cursor(), slot);
        builder.write(value);
    }
    assert_eq!(builder.total(), 3);
    let batch = builder.finish();
    assert_eq!(batch, ["a", "b", "c"]);
    assert_eq!(batch.into_vec(), vec!["a", "b", "c"]);
}

#[test]
#[should_panic(expected = "overrun")]
fn builder_rejects_overrun() {
    let mut builder = Builder::with_total(1);
    builder.write(1);
    builder.write(2);
}

#[test]
#[should_panic(expected = "unwritten")]
fn builder_rejects_partial_container() {
    let mut builder = Builder::with_total(2);
    builder.write(1);
    builder.finish();
}

#[test]
fn fallible_stops_at_first_error() {
    let mut builder = Builder::with_total(2);
    let mut sink = Fallible(&mut builder);
    assert_eq!(sink.accept(Ok::<_, &str>(1)), Ok(()));
    assert_eq!(sink.accept(Err("boom")), Err("boom"));
    assert_eq!(builder.cursor(), 1);
}
