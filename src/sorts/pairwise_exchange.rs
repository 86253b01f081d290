use crate::direction::Direction;
use std::mem;

/// Element-wise merge-exchange between a local batch and the batch received
/// from the partner rank.
///
/// On return, when ascending, `local[i] <= recv[i]` for every position; when
/// descending, `local[i] >= recv[i]`. Each position is handled independently,
/// so the result does not depend on traversal order or on how the partition
/// was split into batches. Applying the exchange twice is a no-op.
pub fn pairwise_exchange<T>(local: &mut [T], recv: &mut [T], direction: Direction)
where
    T: Ord,
{
    debug_assert_eq!(local.len(), recv.len());

    for (l, r) in local.iter_mut().zip(recv.iter_mut()) {
        if direction.out_of_order(l, r) {
            mem::swap(l, r);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::pairwise_exchange;
    use crate::direction::Direction;
    use rand::prelude::*;

    #[test]
    pub fn test_ascending_keeps_mins_local() {
        let mut local = vec![4, 1, 3, 2];
        let mut recv = vec![2, 5, 3, 1];

        pairwise_exchange(&mut local, &mut recv, Direction::Ascending);

        assert_eq!(local, vec![2, 1, 3, 1]);
        assert_eq!(recv, vec![4, 5, 3, 2]);
    }

    #[test]
    pub fn test_descending_keeps_maxes_local() {
        let mut local = vec![4, 1, 3, 2];
        let mut recv = vec![2, 5, 3, 1];

        pairwise_exchange(&mut local, &mut recv, Direction::Descending);

        assert_eq!(local, vec![4, 5, 3, 2]);
        assert_eq!(recv, vec![2, 1, 3, 1]);
    }

    #[test]
    pub fn test_idempotent() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..100 {
            let len = rng.gen_range(1..256);
            let mut local: Vec<i32> = (0..len).map(|_| rng.gen()).collect();
            let mut recv: Vec<i32> = (0..len).map(|_| rng.gen()).collect();

            pairwise_exchange(&mut local, &mut recv, Direction::Ascending);
            let first = (local.clone(), recv.clone());
            pairwise_exchange(&mut local, &mut recv, Direction::Ascending);

            assert_eq!((local, recv), first);
        }
    }

    #[test]
    pub fn test_preserves_multiset() {
        let mut rng = StdRng::seed_from_u64(8);

        for &direction in &[Direction::Ascending, Direction::Descending] {
            let len = 512;
            let local_before: Vec<i32> = (0..len).map(|_| rng.gen()).collect();
            let recv_before: Vec<i32> = (0..len).map(|_| rng.gen()).collect();

            let mut local = local_before.clone();
            let mut recv = recv_before.clone();
            pairwise_exchange(&mut local, &mut recv, direction);

            for i in 0..len {
                if direction.is_ascending() {
                    assert!(local[i] <= recv[i]);
                } else {
                    assert!(local[i] >= recv[i]);
                }
            }

            let mut before: Vec<i32> = local_before.iter().chain(&recv_before).copied().collect();
            let mut after: Vec<i32> = local.iter().chain(&recv).copied().collect();
            before.sort_unstable();
            after.sort_unstable();
            assert_eq!(before, after);
        }
    }
}
