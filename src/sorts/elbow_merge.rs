use crate::direction::Direction;

/// Recover a fully sorted partition from a bitonic one in linear time.
///
/// `data` must be cyclically bitonic: traversed as a ring it has exactly one
/// local minimum and one local maximum. The merge locates the elbow (the
/// global minimum for ascending output, the global maximum for descending)
/// and walks two cursors outward from it, wrapping around the ends, emitting
/// into `scratch` before copying back. When the cursors hold equal elements
/// the left cursor wins, so the output is deterministic.
///
/// A non-bitonic input yields a permutation of `data` in no particular order.
pub fn elbow_merge<T>(data: &mut [T], scratch: &mut [T], direction: Direction)
where
    T: Copy + Ord,
{
    let n = data.len();
    debug_assert_eq!(n, scratch.len());
    if n < 2 {
        return;
    }

    // First occurrence of the extreme wins the tie-break.
    let mut elbow = 0;
    for i in 1..n {
        if direction.out_of_order(&data[elbow], &data[i]) {
            elbow = i;
        }
    }

    let mut l = (elbow + n - 1) % n;
    let mut r = (elbow + 1) % n;

    scratch[0] = data[elbow];
    for slot in scratch[1..].iter_mut() {
        if direction.out_of_order(&data[l], &data[r]) {
            *slot = data[r];
            r = (r + 1) % n;
        } else {
            *slot = data[l];
            l = (l + n - 1) % n;
        }
    }

    data.copy_from_slice(scratch);
}

#[cfg(test)]
mod tests {
    use super::elbow_merge;
    use crate::direction::Direction;
    use rand::prelude::*;

    fn check(input: Vec<i32>, direction: Direction) {
        let mut data = input.clone();
        let mut scratch = data.clone();
        elbow_merge(&mut data, &mut scratch, direction);

        let mut expected = input;
        expected.sort_unstable();
        if !direction.is_ascending() {
            expected.reverse();
        }

        assert_eq!(data, expected);
    }

    #[test]
    pub fn test_up_then_down() {
        check(vec![1, 4, 9, 8, 3, 2], Direction::Ascending);
        check(vec![1, 4, 9, 8, 3, 2], Direction::Descending);
    }

    #[test]
    pub fn test_down_then_up() {
        check(vec![9, 5, 1, 2, 6, 8], Direction::Ascending);
        check(vec![9, 5, 1, 2, 6, 8], Direction::Descending);
    }

    #[test]
    pub fn test_monotone_inputs() {
        check(vec![1, 2, 3, 4, 5], Direction::Ascending);
        check(vec![5, 4, 3, 2, 1], Direction::Ascending);
        check(vec![1, 2, 3, 4, 5], Direction::Descending);
    }

    #[test]
    pub fn test_degenerate() {
        check(vec![], Direction::Ascending);
        check(vec![7], Direction::Ascending);
        check(vec![7, 7, 7, 7], Direction::Ascending);
        check(vec![3, 3, 1, 3], Direction::Descending);
    }

    // Every cyclic rotation of a bitonic sequence is still bitonic, so the
    // merge must sort all of them.
    #[test]
    pub fn test_rotations() {
        let base = vec![2, 5, 7, 11, 10, 6, 4, 1];
        for shift in 0..base.len() {
            let mut rotated = base.clone();
            rotated.rotate_left(shift);
            check(rotated.clone(), Direction::Ascending);
            check(rotated, Direction::Descending);
        }
    }

    #[test]
    pub fn test_large_partition() {
        let mut rng = StdRng::seed_from_u64(43);
        let n = 1usize << 16;
        let mut values: Vec<i32> = (0..n).map(|_| rng.gen()).collect();

        values[..n / 2].sort_unstable();
        values[n / 2..].sort_unstable_by(|a, b| b.cmp(a));

        check(values.clone(), Direction::Ascending);
        check(values, Direction::Descending);
    }

    #[test]
    pub fn test_random_bitonic() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..200 {
            let n = 1usize << rng.gen_range(0..11);
            let peak = rng.gen_range(0..=n);
            let mut values: Vec<i32> = (0..n).map(|_| rng.gen_range(-1000..1000)).collect();

            // Build monotone-up-then-down, then rotate to exercise the
            // cyclic form.
            values[..peak].sort_unstable();
            values[peak..].sort_unstable_by(|a, b| b.cmp(a));
            let shift = rng.gen_range(0..n.max(1));
            values.rotate_left(shift);

            let direction = if rng.gen() {
                Direction::Ascending
            } else {
                Direction::Descending
            };
            check(values, direction);
        }
    }
}
