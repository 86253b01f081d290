use crate::comm::Endpoint;
use thiserror::Error;

/// A violation of the global non-decreasing order, reported by the rank that
/// observed it.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("rank {rank}: partition out of order at index {index}")]
    LocalOrder { rank: usize, index: usize },
    #[error("rank {rank}: first element precedes the tail of rank {prev}")]
    BoundaryOrder { rank: usize, prev: usize },
}

/// Check this rank's share of the global ordering after a sort: the local
/// partition must be non-decreasing and must not dip below the last element
/// of the previous rank.
///
/// Every rank of the group must call this together. The boundary elements
/// travel over the same endpoints as the sort itself, and the exchange is
/// completed before any failure is reported, so one bad partition cannot
/// leave a neighbour blocked.
pub fn validate_global_order<T>(endpoint: &Endpoint<T>, local: &[T]) -> Result<(), ValidationError>
where
    T: Copy + Ord + Send,
{
    let rank = endpoint.rank();
    let size = endpoint.size();

    if rank + 1 < size {
        if let Some(&last) = local.last() {
            endpoint.send(rank + 1, 0, vec![last]);
        }
    }

    let boundary_violation = if rank > 0 {
        let batch = endpoint.recv(rank - 1);
        match (batch.payload.first(), local.first()) {
            (Some(prev_tail), Some(head)) => prev_tail > head,
            _ => false,
        }
    } else {
        false
    };

    for i in 0..local.len().saturating_sub(1) {
        if local[i] > local[i + 1] {
            return Err(ValidationError::LocalOrder { rank, index: i });
        }
    }

    if boundary_violation {
        return Err(ValidationError::BoundaryOrder {
            rank,
            prev: rank - 1,
        });
    }

    Ok(())
}
