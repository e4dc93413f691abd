//! Hand-written loop nests, the reference the engine is checked against.

use proptest::prelude::*;

use crate::sweep::Problem;

pub fn nested2<A: Copy, B: Copy, R>(a: &[A], b: &[B], mut f: impl FnMut(A, B) -> R) -> Vec<R> {
    let mut out = Vec::with_capacity(a.len() * b.len());
    for &a in a {
        for &b in b {
            out.push(f(a, b));
        }
    }
    out
}

pub fn nested3<A: Copy, B: Copy, C: Copy, R>(
    a: &[A],
    b: &[B],
    c: &[C],
    mut f: impl FnMut(A, B, C) -> R,
) -> Vec<R> {
    let mut out = Vec::with_capacity(a.len() * b.len() * c.len());
    for &a in a {
        for &b in b {
            for &c in c {
                out.push(f(a, b, c));
            }
        }
    }
    out
}

pub fn arb_problem() -> impl Strategy<Value = Problem> {
    ("[a-z]{1,8}", 1u32..4096, 1u32..4096).prop_map(|(name, rows, cols)| Problem { name, rows, cols })
}
