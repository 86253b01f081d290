use crate::direction::Direction;

/// Slices shorter than this are not worth forking onto the pool; below it the
/// recursion stays on the calling thread regardless of the remaining depth.
const FORK_THRESHOLD: usize = 1024;

/// Sort a rank's partition in the direction assigned to it.
///
/// This seeds the bitonic network: even ranks sort ascending, odd ranks
/// descending, and the exchange stages rely only on the resulting total
/// order. The sort is a stable top-down merge sort; `depth` is a recursion
/// budget for fanning the two halves out onto the rayon pool, with `0`
/// meaning fully serial. The budget only affects scheduling, never the
/// result.
pub fn seed_sort<T>(data: &mut [T], direction: Direction, depth: usize)
where
    T: Copy + Ord + Send,
{
    let n = data.len();
    if n < 2 {
        return;
    }

    let mid = n / 2;
    let (left, right) = data.split_at_mut(mid);

    if depth == 0 || n < FORK_THRESHOLD {
        seed_sort(left, direction, 0);
        seed_sort(right, direction, 0);
    } else {
        rayon::join(
            || seed_sort(left, direction, depth - 1),
            || seed_sort(right, direction, depth - 1),
        );
    }

    merge_halves(data, mid, direction);
}

// Stable two-way merge of data[..mid] and data[mid..]; only the left run is
// staged out of line. Ties take the left run.
fn merge_halves<T>(data: &mut [T], mid: usize, direction: Direction)
where
    T: Copy + Ord,
{
    let left: Vec<T> = data[..mid].to_vec();

    let mut i = 0;
    let mut j = mid;
    let mut k = 0;

    while i < left.len() && j < data.len() {
        if direction.out_of_order(&left[i], &data[j]) {
            data[k] = data[j];
            j += 1;
        } else {
            data[k] = left[i];
            i += 1;
        }
        k += 1;
    }

    while i < left.len() {
        data[k] = left[i];
        i += 1;
        k += 1;
    }
}
