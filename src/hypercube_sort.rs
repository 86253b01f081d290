use crate::comm::Endpoint;
use crate::direction::Direction;
use crate::sorts::elbow_merge::elbow_merge;
use crate::sorts::pairwise_exchange::pairwise_exchange;
use crate::sorts::seed_sort::seed_sort;
use crate::timings::SortTimings;
use std::time::Instant;

/// Sort the sequence spread across a hypercube of ranks, in place.
///
/// Every rank of `endpoint`'s group must enter this call; on return each
/// rank's `local` partition is sorted ascending and the concatenation of the
/// partitions in rank order is non-decreasing. `recv` is scratch of the same
/// length, undefined on return. `batch_size` is the message granularity:
/// each step exchanges `local.len() / batch_size` independently tagged
/// batches with the partner, so a batch still in flight never blocks work on
/// one that has already landed. `depth` is the fan-out budget handed to the
/// seed sort.
///
/// Panics unless `local.len()` and `batch_size` are powers of two with
/// `batch_size <= local.len()` and `recv` is the same length as `local`.
pub fn distributed_bitonic_sort<T>(
    endpoint: &Endpoint<T>,
    local: &mut [T],
    recv: &mut [T],
    batch_size: usize,
    depth: usize,
) -> SortTimings
where
    T: Copy + Ord + Send,
{
    let n = local.len();
    assert!(
        n > 0 && n.is_power_of_two(),
        "partition length must be a positive power of two, got {}",
        n
    );
    assert_eq!(recv.len(), n, "receive partition length must match");
    assert!(
        batch_size > 0 && batch_size.is_power_of_two() && batch_size <= n,
        "batch size must be a power of two no larger than the partition, got {}",
        batch_size
    );

    let rank = endpoint.rank();
    let stages = endpoint.size().trailing_zeros() as usize;
    let batches_per_step = n / batch_size;

    let mut timings = SortTimings::default();
    let started = Instant::now();

    let mut scratch = local.to_vec();

    seed_sort(local, Direction::for_rank(rank), depth);
    endpoint.barrier();
    timings.seed_sort = started.elapsed().as_secs_f64();

    for stage in 1..=stages {
        // All ranks of a chunk agree on the direction for the whole stage;
        // in the final stage chunk 0 spans the cube and forces ascending.
        let direction = Direction::for_chunk(rank >> stage);

        for step in (0..stage).rev() {
            let partner = rank ^ (1 << step);
            let step_started = Instant::now();

            if rank > partner {
                mirror_step(endpoint, partner, local, batch_size, batches_per_step);
            } else {
                worker_step(
                    endpoint,
                    partner,
                    local,
                    recv,
                    direction,
                    batch_size,
                    batches_per_step,
                );
            }

            endpoint.barrier();
            timings.exchange += step_started.elapsed().as_secs_f64();
        }

        let merge_started = Instant::now();
        elbow_merge(local, &mut scratch, direction);
        endpoint.barrier();
        timings.elbow_merge += merge_started.elapsed().as_secs_f64();
    }

    endpoint.barrier();
    timings.total = started.elapsed().as_secs_f64();
    timings
}

/// Passive (upper) half of one butterfly step: ship every batch to the
/// partner, then overwrite the same slices with whatever comes back. The
/// partner computes both halves; by the time the last batch lands this
/// partition holds the maxes (ascending) or mins (descending).
fn mirror_step<T>(
    endpoint: &Endpoint<T>,
    partner: usize,
    local: &mut [T],
    batch_size: usize,
    batches_per_step: usize,
) where
    T: Copy + Send,
{
    for (tag, chunk) in local.chunks_exact(batch_size).enumerate() {
        endpoint.send(partner, tag, chunk.to_vec());
    }

    for _ in 0..batches_per_step {
        let batch = endpoint.recv(partner);
        let start = batch.tag * batch_size;
        local[start..start + batch_size].copy_from_slice(&batch.payload);
    }
}

/// Active (lower) half: take each partner batch as it arrives, run the
/// merge-exchange against the matching local slice, and return the partner's
/// half under the same tag. Batches are processed in arrival order; the tags
/// keep the slices straight.
fn worker_step<T>(
    endpoint: &Endpoint<T>,
    partner: usize,
    local: &mut [T],
    recv: &mut [T],
    direction: Direction,
    batch_size: usize,
    batches_per_step: usize,
) where
    T: Copy + Ord + Send,
{
    for _ in 0..batches_per_step {
        let mut batch = endpoint.recv(partner);
        let start = batch.tag * batch_size;

        let recv_slice = &mut recv[start..start + batch_size];
        recv_slice.copy_from_slice(&batch.payload);
        pairwise_exchange(&mut local[start..start + batch_size], recv_slice, direction);

        batch.payload.copy_from_slice(recv_slice);
        endpoint.send(partner, batch.tag, batch.payload);
    }
}
