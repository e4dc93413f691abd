use crate::classify::{Category, Classify};
use crate::collect::{Collector, Fallible};
use crate::list::ParamList;
use crate::walk::Call;

/// How the results of a call over a parameter list are delivered, decided
/// by the list's type alone.
///
/// A list made only of ordinary parameters is [`Direct`]: the callable runs
/// once and its result is returned as is. A single index set anywhere in the
/// list makes it [`Expanded`]: results are collected per combination.
pub trait Layout {
    /// layout of a list made of this position followed by a list laid out as `Next`
    type Join<Next: Layout>: Layout;

    type Output<R: Classify>;

    fn deliver<L, F, R, E>(params: &L, f: F) -> Result<Self::Output<R>, E>
    where
        L: ParamList,
        F: Call<L::Args, Result<R, E>>,
        R: Classify;
}

/// No index sets: invoke once, return the result unwrapped.
#[derive(Clone, Copy, Debug)]
pub enum Direct {}

/// At least one index set: invoke once per combination.
#[derive(Clone, Copy, Debug)]
pub enum Expanded {}

impl Layout for Direct {
    type Join<Next: Layout> = Next;

    type Output<R: Classify> = R;

    fn deliver<L, F, R, E>(params: &L, mut f: F) -> Result<R, E>
    where
        L: ParamList,
        F: Call<L::Args, Result<R, E>>,
        R: Classify,
    {
        tracing::debug!(arity = L::ARITY, "no index sets, invoking once");
        f.call(params.first_combination())
    }
}

impl Layout for Expanded {
    type Join<Next: Layout> = Expanded;

    type Output<R: Classify> = <R::Collector as Collector<R>>::Output;

    fn deliver<L, F, R, E>(params: &L, mut f: F) -> Result<Self::Output<R>, E>
    where
        L: ParamList,
        F: Call<L::Args, Result<R, E>>,
        R: Classify,
    {
        if L::HAS_EMPTY {
            tracing::debug!(
                index_sets = L::INDEX_SETS,
                "empty index set, skipping every invocation"
            );
            return Ok(<R::Collector as Collector<R>>::with_total(0).finish());
        }

        let slots = match R::CATEGORY {
            Category::NoValue => 0,
            Category::Reference | Category::ByValue => L::TOTAL,
        };
        tracing::debug!(
            invocations = L::TOTAL,
            slots,
            category = ?R::CATEGORY,
            "expanding cartesian product"
        );

        let mut collector = <R::Collector as Collector<R>>::with_total(slots);
        params.walk(&mut f, &mut Fallible(&mut collector))?;
        Ok(collector.finish())
    }
}
