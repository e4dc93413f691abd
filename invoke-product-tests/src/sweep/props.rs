use invoke_product::{
    invoke_over_product, try_invoke_over_product, Batch, Expanded, IndexSet, ParamList,
};
use proptest::{array::uniform2, array::uniform3, array::uniform4, prelude::*};

use crate::sweep::{estimate, naive, sweep};

/// Calls made and slots returned for a three-position list of byte index sets.
fn calls_and_slots<L>(params: L) -> (usize, usize)
where
    L: ParamList<Layout = Expanded, Args = (u8, u8, u8)>,
{
    let mut calls = 0;
    let out: Batch<u32> = invoke_over_product(
        |x: u8, y: u8, z: u8| {
            calls += 1;
            u32::from(x) + u32::from(y) + u32::from(z)
        },
        params,
    );
    (calls, out.len())
}

proptest! {
    #[test]
    fn matches_nested_loops(
        a in uniform3(any::<i16>()),
        b in uniform2(any::<i16>()),
        c in uniform4(any::<i16>()),
        k in any::<i32>(),
    ) {
        let mut calls = Vec::new();
        let out = invoke_over_product(
            |a: i16, k: i32, b: i16, c: i16| {
                calls.push((a, b, c));
                i64::from(a) * i64::from(b) - i64::from(c) + i64::from(k)
            },
            (IndexSet::new(a), k, IndexSet::new(b), IndexSet::new(c)),
        );

        let expected = naive::nested3(&a, &b, &c, |a, b, c| {
            i64::from(a) * i64::from(b) - i64::from(c) + i64::from(k)
        });
        prop_assert_eq!(out.len(), 3 * 2 * 4);
        prop_assert_eq!(out.into_vec(), expected);
        prop_assert_eq!(calls, naive::nested3(&a, &b, &c, |a, b, c| (a, b, c)));
    }

    #[test]
    fn empty_set_anywhere_skips_every_call(
        a in uniform3(any::<u8>()),
        b in uniform2(any::<u8>()),
    ) {
        let empty = IndexSet::<u8, 0>::empty();
        let (a, b) = (IndexSet::new(a), IndexSet::new(b));

        prop_assert_eq!(calls_and_slots((empty, a, b)), (0, 0));
        prop_assert_eq!(calls_and_slots((a, empty, b)), (0, 0));
        prop_assert_eq!(calls_and_slots((a, b, empty)), (0, 0));
        prop_assert_eq!(calls_and_slots((a, b, IndexSet::new([7]))), (6, 6));
    }

    #[test]
    fn no_value_results_still_run_everything(
        a in uniform3(any::<u8>()),
        b in uniform4(any::<u8>()),
    ) {
        let mut log = Vec::new();
        invoke_over_product(
            |x: u8, y: u8| log.push((x, y)),
            (IndexSet::new(a), IndexSet::new(b)),
        );
        prop_assert_eq!(log, naive::nested2(&a, &b, |x, y| (x, y)));
    }

    #[test]
    fn first_failure_aborts_the_walk(fail_at in 0usize..12) {
        let mut calls = 0;
        let out = try_invoke_over_product(
            |a: usize, b: usize| {
                calls += 1;
                let slot = a * 4 + b;
                if slot == fail_at { Err(slot) } else { Ok(slot) }
            },
            (IndexSet::<usize, 3>::sequence().unwrap(), IndexSet::<usize, 4>::sequence().unwrap()),
        );
        prop_assert_eq!(out, Err(fail_at));
        prop_assert_eq!(calls, fail_at + 1);
    }

    #[test]
    fn slots_map_back_to_coordinates(slot in 0usize..30) {
        type Params = (IndexSet<usize, 2>, &'static str, IndexSet<usize, 3>, IndexSet<usize, 5>);
        let params: Params = (
            IndexSet::sequence().unwrap(),
            "ignored",
            IndexSet::sequence().unwrap(),
            IndexSet::sequence().unwrap(),
        );
        let visited = invoke_over_product(|a: usize, _: &str, b: usize, c: usize| vec![a, b, c], params);
        let shape = Params::shape();

        prop_assert_eq!(visited.len(), shape.total());
        prop_assert_eq!(shape.coordinates(slot), Some(visited[slot].clone()));
        prop_assert_eq!(shape.slot(&visited[slot]), Some(slot));
    }

    #[test]
    fn sweep_matches_direct_estimates(problem in naive::arb_problem()) {
        let blocks = [8u32, 16, 32, 64];
        let unrolls = [1u8, 2, 4];
        let estimates = sweep(IndexSet::new(blocks), IndexSet::new(unrolls), &problem);
        let expected = naive::nested2(&blocks, &unrolls, |block, unroll| estimate(block, unroll, &problem));
        prop_assert_eq!(estimates, expected);
    }
}
