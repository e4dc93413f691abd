//! Invoke a callable once for every combination in the cartesian product of
//! a parameter list's index sets, and collect the results.
//!
//! A parameter list is a tuple. Positions holding an [`IndexSet`] are
//! expanded; every other position is an ordinary parameter, passed unchanged
//! to each invocation. Combinations are visited in nested-loop order: the
//! leftmost index set is the outermost loop, the rightmost varies fastest.
//!
//! ```rust
//! use invoke_product::{invoke_over_product, IndexSet};
//!
//! let labels = invoke_over_product(
//!     |a: u32, b: u32, c: &str| format!("{c}{}", a + b),
//!     (IndexSet::new([1, 2, 3]), IndexSet::new([10, 20]), "x"),
//! );
//! assert_eq!(labels, ["x11", "x21", "x12", "x22", "x13", "x23"]);
//! ```
//!
//! What comes back depends on the list's shape and the callable's result:
//!
//! | index sets       | result `R`   | output                       |
//! |------------------|--------------|------------------------------|
//! | none             | any          | `R`, from a single call      |
//! | some, none empty | `()`         | `()`, every call still made  |
//! | some, none empty | `&'a T`      | [`Batch<&'a T>`](Batch)      |
//! | some, none empty | owned value  | [`Batch<R>`](Batch)          |
//! | some empty       | any          | empty `Batch` (or `()`), no calls |
//!
//! The result type must implement [`Classify`]; types of your own opt in
//! with [`by_value!`].
mod classify;
mod collect;
mod layout;
mod list;
mod param;
pub mod shape;
mod walk;

pub use classify::{Category, Classify};
pub use collect::{Batch, Builder, Collector, Discard, Sink};
pub use layout::{Direct, Expanded, Layout};
pub use list::ParamList;
pub use param::{IndexInt, IndexSet, IndexSetError, Ordinary, Param, ParamKind};
pub use shape::ProductShape;
pub use walk::{Append, Call, Walk};

use walk::Unfailing;

/// What [`invoke_over_product`] returns for a parameter list `L` and a
/// callable returning `R`.
pub type Output<L, R> = <<L as ParamList>::Layout as Layout>::Output<R>;

/// Invoke `f` once per combination of `params` and collect the results.
///
/// Without index sets, `f` runs once and its result is returned directly.
/// If any index set is empty, `f` never runs and the output is empty, even
/// though ordinary parameters were supplied.
///
/// A panic in `f` unwinds through the walk; no partial output is produced.
///
/// `R` must implement [`Classify`] even when `params` holds no index sets and
/// nothing is collected. A struct of your own returned from a direct call
/// still needs [`by_value!`].
#[tracing::instrument(level = "debug", skip_all, fields(arity = L::ARITY, total = L::TOTAL))]
pub fn invoke_over_product<L, F, R>(f: F, params: L) -> Output<L, R>
where
    L: ParamList,
    F: Call<L::Args, R>,
    R: Classify,
{
    match <L::Layout as Layout>::deliver(&params, Unfailing(f)) {
        Ok(out) => out,
        Err(never) => match never {},
    }
}

/// Like [`invoke_over_product`], for callables that can fail.
///
/// The first `Err` stops the walk: later combinations are never invoked and
/// the error is returned unchanged, with no partial output.
///
/// ```rust
/// use invoke_product::{try_invoke_over_product, IndexSet};
///
/// let checked = try_invoke_over_product(
///     |a: u8, b: u8| a.checked_mul(b).ok_or((a, b)),
///     (IndexSet::new([2, 200]), IndexSet::new([3, 4])),
/// );
/// assert_eq!(checked, Err((200, 3)));
/// ```
#[tracing::instrument(level = "debug", skip_all, fields(arity = L::ARITY, total = L::TOTAL))]
pub fn try_invoke_over_product<L, F, R, E>(f: F, params: L) -> Result<Output<L, R>, E>
where
    L: ParamList,
    F: Call<L::Args, Result<R, E>>,
    R: Classify,
{
    <L::Layout as Layout>::deliver(&params, f)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn direct_call_is_not_wrapped() {
        let doubled: i64 = invoke_over_product(|x: i64| x * 2, (21i64,));
        assert_eq!(doubled, 42);

        let mut calls = 0;
        invoke_over_product(|| calls += 1, ());
        assert_eq!(calls, 1);
    }

    #[test]
    fn expanded_call_fills_every_slot() {
        let products = invoke_over_product(
            |a: i32, scale: i32, b: i32| a * b * scale,
            (IndexSet::new([1, 2, 3]), 10i32, IndexSet::new([1, -1])),
        );
        assert_eq!(products, [10, -10, 20, -20, 30, -30]);
    }

    #[test]
    fn empty_index_set_skips_every_call() {
        let mut calls = 0;
        let out = invoke_over_product(
            |a: i32, b: i32| {
                calls += 1;
                a + b
            },
            (IndexSet::<i32, 0>::empty(), IndexSet::new([1, 2])),
        );
        assert!(out.is_empty());
        assert_eq!(calls, 0);
    }

    #[test]
    fn no_value_results_run_for_side_effects() {
        let mut seen = Vec::new();
        let () = invoke_over_product(
            |a: u8, b: u8| seen.push((a, b)),
            (IndexSet::new([0, 1]), IndexSet::new([5, 6])),
        );
        assert_eq!(seen, vec![(0, 5), (0, 6), (1, 5), (1, 6)]);
    }

    #[test]
    fn reference_results_alias_the_owner() {
        fn pick(cells: &[Cell<i32>], i: usize) -> &Cell<i32> {
            &cells[i]
        }

        let cells = [Cell::new(0), Cell::new(1), Cell::new(2)];
        let picked = invoke_over_product(
            pick,
            (&cells[..], IndexSet::new([2usize, 0])),
        );
        assert_eq!(picked.len(), 2);
        picked[0].set(20);
        assert_eq!(cells[2].get(), 20);
        assert!(std::ptr::eq(picked[1], &cells[0]));
    }

    #[test]
    fn first_error_aborts() {
        let mut calls = 0;
        let out = try_invoke_over_product(
            |a: i32| {
                calls += 1;
                if a == 2 {
                    Err(format!("bad {a}"))
                } else {
                    Ok(a)
                }
            },
            (IndexSet::new([1, 2, 3]),),
        );
        assert_eq!(out, Err("bad 2".to_string()));
        assert_eq!(calls, 2);
    }

    #[test]
    fn empty_index_set_skips_no_value_calls() {
        let mut calls = 0;
        let () = invoke_over_product(
            |_: u8, _: u8| calls += 1,
            (IndexSet::new([1u8, 2]), IndexSet::<u8, 0>::empty()),
        );
        assert_eq!(calls, 0);
    }

    #[test]
    fn empty_index_set_yields_no_references() {
        fn pick(cells: &[Cell<i32>], i: usize) -> &Cell<i32> {
            &cells[i]
        }

        let cells = [Cell::new(0), Cell::new(1)];
        let picked = invoke_over_product(pick, (&cells[..], IndexSet::<usize, 0>::empty()));
        assert!(picked.is_empty());
    }

    #[test]
    fn fallible_empty_product_is_ok() {
        let mut calls = 0;
        let out = try_invoke_over_product(
            |a: i32| {
                calls += 1;
                if a < 0 {
                    Err("neg")
                } else {
                    Ok(a)
                }
            },
            (IndexSet::<i32, 0>::empty(),),
        );
        assert_eq!(out.map(|batch| batch.len()), Ok(0));
        assert_eq!(calls, 0);
    }

    #[test]
    fn fallible_direct_call_passes_error_through() {
        let check = |a: i32| if a < 0 { Err("neg") } else { Ok(a) };
        let failed: Result<i32, &str> = try_invoke_over_product(check, (-1i32,));
        assert_eq!(failed, Err("neg"));

        let passed: Result<i32, &str> = try_invoke_over_product(check, (5i32,));
        assert_eq!(passed, Ok(5));
    }
}
