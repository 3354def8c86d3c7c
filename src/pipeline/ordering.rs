//! Ordering policy for stages within a job.
//!
//! Stages sort ascending by `order`; the insertion sequence breaks ties so the
//! result is stable but carries no meaning beyond that. `order` values may
//! have gaps and per-job uniqueness is not enforced, they are sort hints.
//! Reorders are swap-based: a move exchanges two adjacent stages' `order`
//! values and touches nothing else, so moving a stage up and then immediately
//! down restores the original values exactly.

use super::domain::{MoveDirection, Stage};

/// Sort same-job stages into pipeline order.
pub(crate) fn sort_by_rank(entries: &mut [(&Stage, u64)]) {
    entries.sort_by_key(|(stage, seq)| (stage.order, *seq));
}

/// Index of the neighbor a stage at `index` would swap `order` values with.
/// `None` when the stage is already at the requested boundary.
pub(crate) fn swap_partner(len: usize, index: usize, direction: MoveDirection) -> Option<usize> {
    match direction {
        MoveDirection::Up => index.checked_sub(1),
        MoveDirection::Down => {
            let next = index + 1;
            (next < len).then_some(next)
        }
    }
}
