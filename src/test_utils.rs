use crate::comm::ProcessGroup;
use crate::hypercube_sort::distributed_bitonic_sort;
use crate::timings::SortTimings;
use crossbeam::thread;
use rand::prelude::*;
use std::panic;

/// Run one full group sort, one scoped thread per rank, and hand back the
/// sorted partitions in rank order. A panic on any rank (a failed assertion,
/// a rejected precondition) is re-raised on the caller's thread.
pub fn run_group_sort<T>(partitions: Vec<Vec<T>>, batch_size: usize, depth: usize) -> Vec<Vec<T>>
where
    T: Copy + Ord + Send,
{
    run_group_sort_timed(partitions, batch_size, depth)
        .into_iter()
        .map(|(partition, _)| partition)
        .collect()
}

/// Like [`run_group_sort`], but also returns each rank's phase timings.
pub fn run_group_sort_timed<T>(
    partitions: Vec<Vec<T>>,
    batch_size: usize,
    depth: usize,
) -> Vec<(Vec<T>, SortTimings)>
where
    T: Copy + Ord + Send,
{
    let endpoints = ProcessGroup::new(partitions.len()).into_endpoints();

    thread::scope(|s| {
        let handles: Vec<_> = endpoints
            .into_iter()
            .zip(partitions)
            .map(|(endpoint, mut local)| {
                s.spawn(move |_| {
                    let mut recv = local.clone();
                    let timings =
                        distributed_bitonic_sort(&endpoint, &mut local, &mut recv, batch_size, depth);
                    (local, timings)
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|e| panic::resume_unwind(e)))
            .collect()
    })
    .unwrap()
}

/// Per-rank reproducible random partitions: rank r draws 2^q values from
/// `StdRng` seeded with r.
pub fn seeded_partitions(p: u32, q: u32) -> Vec<Vec<i32>> {
    (0..1usize << p)
        .map(|rank| {
            let mut rng = StdRng::seed_from_u64(rank as u64);
            (0..1usize << q).map(|_| rng.gen()).collect()
        })
        .collect()
}

/// Assert global monotonicity: each partition non-decreasing, and no
/// partition starting below the tail of its predecessor.
pub fn assert_globally_sorted<T>(partitions: &[Vec<T>])
where
    T: Ord + std::fmt::Debug,
{
    for (rank, partition) in partitions.iter().enumerate() {
        for i in 0..partition.len().saturating_sub(1) {
            assert!(
                partition[i] <= partition[i + 1],
                "rank {} out of order at index {}",
                rank,
                i
            );
        }
    }

    for rank in 0..partitions.len().saturating_sub(1) {
        if let (Some(tail), Some(head)) = (partitions[rank].last(), partitions[rank + 1].first()) {
            assert!(
                tail <= head,
                "rank {} tail exceeds rank {} head",
                rank,
                rank + 1
            );
        }
    }
}

/// Assert the sort moved elements around without creating or losing any.
pub fn assert_same_multiset<T>(before: &[Vec<T>], after: &[Vec<T>])
where
    T: Copy + Ord + std::fmt::Debug,
{
    let mut flat_before: Vec<T> = before.iter().flatten().copied().collect();
    let mut flat_after: Vec<T> = after.iter().flatten().copied().collect();

    flat_before.sort_unstable();
    flat_after.sort_unstable();

    assert_eq!(flat_before, flat_after);
}
