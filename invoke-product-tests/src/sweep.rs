pub mod naive;
#[cfg(test)]
mod props;

use invoke_product::{by_value, invoke_over_product, try_invoke_over_product, Batch, IndexSet};

/// A matrix problem that kernel configurations are scored against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub name: String,
    pub rows: u32,
    pub cols: u32,
}

/// Estimated cost of one kernel configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Estimate {
    pub block: u32,
    pub unroll: u8,
    pub cost: u64,
}

by_value!(Estimate);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SweepError {
    #[error("unroll factor must be non-zero")]
    ZeroUnroll,
    #[error("block size {block} exceeds {problem}")]
    BlockTooLarge { block: u32, problem: String },
}

/// Cost model: tiles times per-tile work, unrolling trades loop overhead for
/// register pressure. `block` and `unroll` must be non-zero.
pub fn estimate(block: u32, unroll: u8, problem: &Problem) -> Estimate {
    let tiles = u64::from((problem.rows + block - 1) / block)
        * u64::from((problem.cols + block - 1) / block);
    let per_tile = u64::from(block) * u64::from(block) / u64::from(unroll) + 8 * u64::from(unroll);
    Estimate {
        block,
        unroll,
        cost: tiles * per_tile,
    }
}

pub fn checked_estimate(block: u32, unroll: u8, problem: &Problem) -> Result<Estimate, SweepError> {
    if unroll == 0 {
        return Err(SweepError::ZeroUnroll);
    }
    if block > problem.rows.min(problem.cols) {
        return Err(SweepError::BlockTooLarge {
            block,
            problem: problem.name.clone(),
        });
    }
    Ok(estimate(block, unroll, problem))
}

/// Score every (block, unroll) pair against `problem`, block sizes outermost.
pub fn sweep<const B: usize, const U: usize>(
    blocks: IndexSet<u32, B>,
    unrolls: IndexSet<u8, U>,
    problem: &Problem,
) -> Batch<Estimate> {
    invoke_over_product(estimate, (blocks, unrolls, problem))
}

pub fn checked_sweep<const B: usize, const U: usize>(
    blocks: IndexSet<u32, B>,
    unrolls: IndexSet<u8, U>,
    problem: &Problem,
) -> Result<Batch<Estimate>, SweepError> {
    try_invoke_over_product(checked_estimate, (blocks, unrolls, problem))
}

pub fn cheapest(estimates: &Batch<Estimate>) -> Option<&Estimate> {
    estimates.iter().min_by_key(|e| e.cost)
}

/// Problems owned in one place and handed out by reference.
#[derive(Debug, Default)]
pub struct Catalog {
    problems: Vec<Problem>,
}

impl Catalog {
    pub fn new(problems: Vec<Problem>) -> Self {
        Self { problems }
    }

    pub fn problem(&self, id: usize) -> &Problem {
        &self.problems[id]
    }
}

pub fn lookup(catalog: &Catalog, id: usize) -> &Problem {
    catalog.problem(id)
}
