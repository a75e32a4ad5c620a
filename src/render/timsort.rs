//! Stable TimSort driven by the sign of a comparison result.
//!
//! `slice::sort_by` may panic when the comparator is not a total order. This
//! sort never does, and for any comparator it visits elements in the same
//! order as the `Array.prototype.sort` TimSort in V8, so inconsistent
//! comparators still produce the same permutation.

const MIN_GALLOP: usize = 7;

#[derive(Debug, Clone, Copy)]
struct Run {
    base: usize,
    len: usize,
}

enum MergeExit {
    /// Only the buffered run has elements left
    Drain,
    /// One buffered element is left and goes past the unbuffered run
    Last,
}

/// Sort `items` so that `b` stays after `a` unless `compare(b, a) < 0`.
pub fn sort_by_sign<T, F>(items: &mut [T], compare: F)
where
    T: Copy,
    F: Fn(&T, &T) -> i128,
{
    let len = items.len();
    if len < 2 {
        return;
    }

    let mut state = MergeState {
        items,
        compare,
        runs: Vec::new(),
        min_gallop: MIN_GALLOP,
    };
    let min_run = min_run_length(len);
    let mut low = 0;
    while low < len {
        let remaining = len - low;
        let mut run = state.count_and_make_run(low, len);
        if run < min_run {
            let forced = min_run.min(remaining);
            state.binary_insertion_sort(low, low + run, low + forced);
            run = forced;
        }
        state.runs.push(Run { base: low, len: run });
        state.merge_collapse();
        low += run;
    }
    state.merge_force_collapse();
}

fn min_run_length(mut n: usize) -> usize {
    let mut r = 0;
    while n >= 64 {
        r |= n & 1;
        n >>= 1;
    }
    n + r
}

fn less<T, F>(compare: &F, a: T, b: T) -> bool
where
    F: Fn(&T, &T) -> i128,
{
    compare(&a, &b) < 0
}

/// Leftmost position in `run` where `key` can go, searching outwards from `hint`.
fn gallop_left<T, F>(key: T, run: &[T], hint: usize, compare: &F) -> usize
where
    T: Copy,
    F: Fn(&T, &T) -> i128,
{
    let len = run.len() as isize;
    let hint = hint as isize;
    let at = |i: isize| run[i as usize];
    let (mut last, mut offset): (isize, isize) = (0, 1);

    if less(compare, at(hint), key) {
        let max = len - hint;
        while offset < max {
            if !less(compare, at(hint + offset), key) {
                break;
            }
            last = offset;
            offset = (offset << 1) + 1;
        }
        offset = offset.min(max);
        last += hint;
        offset += hint;
    } else {
        let max = hint + 1;
        while offset < max {
            if less(compare, at(hint - offset), key) {
                break;
            }
            last = offset;
            offset = (offset << 1) + 1;
        }
        offset = offset.min(max);
        (last, offset) = (hint - offset, hint - last);
    }

    last += 1;
    while last < offset {
        let mid = last + ((offset - last) >> 1);
        if less(compare, at(mid), key) {
            last = mid + 1;
        } else {
            offset = mid;
        }
    }
    offset as usize
}

/// Rightmost position in `run` where `key` can go, searching outwards from `hint`.
fn gallop_right<T, F>(key: T, run: &[T], hint: usize, compare: &F) -> usize
where
    T: Copy,
    F: Fn(&T, &T) -> i128,
{
    let len = run.len() as isize;
    let hint = hint as isize;
    let at = |i: isize| run[i as usize];
    let (mut last, mut offset): (isize, isize) = (0, 1);

    if less(compare, key, at(hint)) {
        let max = hint + 1;
        while offset < max {
            if !less(compare, key, at(hint - offset)) {
                break;
            }
            last = offset;
            offset = (offset << 1) + 1;
        }
        offset = offset.min(max);
        (last, offset) = (hint - offset, hint - last);
    } else {
        let max = len - hint;
        while offset < max {
            if less(compare, key, at(hint + offset)) {
                break;
            }
            last = offset;
            offset = (offset << 1) + 1;
        }
        offset = offset.min(max);
        last += hint;
        offset += hint;
    }

    last += 1;
    while last < offset {
        let mid = last + ((offset - last) >> 1);
        if less(compare, key, at(mid)) {
            offset = mid;
        } else {
            last = mid + 1;
        }
    }
    offset as usize
}

struct MergeState<'a, T, F> {
    items: &'a mut [T],
    compare: F,
    runs: Vec<Run>,
    min_gallop: usize,
}

impl<T, F> MergeState<'_, T, F>
where
    T: Copy,
    F: Fn(&T, &T) -> i128,
{
    /// Length of the run starting at `low`. A strictly descending run is
    /// reversed in place.
    fn count_and_make_run(&mut self, low: usize, high: usize) -> usize {
        if low + 1 == high {
            return 1;
        }
        let descending = less(&self.compare, self.items[low + 1], self.items[low]);
        let mut run = 2;
        for idx in low + 2..high {
            if less(&self.compare, self.items[idx], self.items[idx - 1]) != descending {
                break;
            }
            run += 1;
        }
        if descending {
            self.items[low..low + run].reverse();
        }
        run
    }

    /// Extend the sorted prefix `low..start` to `low..high`.
    fn binary_insertion_sort(&mut self, low: usize, start: usize, high: usize) {
        let start = if low == start { start + 1 } else { start };
        for idx in start..high {
            let pivot = self.items[idx];
            let (mut left, mut right) = (low, idx);
            while left < right {
                let mid = left + ((right - left) >> 1);
                if less(&self.compare, pivot, self.items[mid]) {
                    right = mid;
                } else {
                    left = mid + 1;
                }
            }
            self.items[left..=idx].rotate_right(1);
        }
    }

    fn run_invariant_holds(&self, n: usize) -> bool {
        if n < 2 {
            return true;
        }
        self.runs[n - 2].len > self.runs[n - 1].len + self.runs[n].len
    }

    fn merge_collapse(&mut self) {
        while self.runs.len() > 1 {
            let mut n = self.runs.len() - 2;
            if !self.run_invariant_holds(n + 1) || !self.run_invariant_holds(n) {
                if self.runs[n - 1].len < self.runs[n + 1].len {
                    n -= 1;
                }
                self.merge_at(n);
            } else if self.runs[n].len <= self.runs[n + 1].len {
                self.merge_at(n);
            } else {
                break;
            }
        }
    }

    fn merge_force_collapse(&mut self) {
        while self.runs.len() > 1 {
            let mut n = self.runs.len() - 2;
            if n > 0 && self.runs[n - 1].len < self.runs[n + 1].len {
                n -= 1;
            }
            self.merge_at(n);
        }
    }

    /// Merge runs `i` and `i + 1` of the pending stack.
    fn merge_at(&mut self, i: usize) {
        let Run {
            base: mut base_a,
            len: mut len_a,
        } = self.runs[i];
        let Run {
            base: base_b,
            len: mut len_b,
        } = self.runs[i + 1];
        self.runs[i].len = len_a + len_b;
        self.runs.remove(i + 1);

        // Leading elements of A already in place
        let skip = gallop_right(
            self.items[base_b],
            &self.items[base_a..base_a + len_a],
            0,
            &self.compare,
        );
        base_a += skip;
        len_a -= skip;
        if len_a == 0 {
            return;
        }

        // Trailing elements of B already in place
        len_b = gallop_left(
            self.items[base_a + len_a - 1],
            &self.items[base_b..base_b + len_b],
            len_b - 1,
            &self.compare,
        );
        if len_b == 0 {
            return;
        }

        if len_a <= len_b {
            self.merge_low(base_a, len_a, base_b, len_b);
        } else {
            self.merge_high(base_a, len_a, base_b, len_b);
        }
    }

    /// Merge front to back, buffering run A.
    fn merge_low(&mut self, base_a: usize, mut len_a: usize, base_b: usize, mut len_b: usize) {
        let compare = &self.compare;
        let items = &mut *self.items;
        let temp = items[base_a..base_a + len_a].to_vec();
        let mut dest = base_a;
        let mut cursor_temp = 0;
        let mut cursor_b = base_b;

        items[dest] = items[cursor_b];
        dest += 1;
        cursor_b += 1;
        len_b -= 1;

        let exit = if len_b == 0 {
            MergeExit::Drain
        } else if len_a == 1 {
            MergeExit::Last
        } else {
            let mut min_gallop = self.min_gallop;
            'merge: loop {
                let mut wins_a = 0;
                let mut wins_b = 0;

                loop {
                    if less(compare, items[cursor_b], temp[cursor_temp]) {
                        items[dest] = items[cursor_b];
                        dest += 1;
                        cursor_b += 1;
                        wins_b += 1;
                        wins_a = 0;
                        len_b -= 1;
                        if len_b == 0 {
                            break 'merge MergeExit::Drain;
                        }
                        if wins_b >= min_gallop {
                            break;
                        }
                    } else {
                        items[dest] = temp[cursor_temp];
                        dest += 1;
                        cursor_temp += 1;
                        wins_a += 1;
                        wins_b = 0;
                        len_a -= 1;
                        if len_a == 1 {
                            break 'merge MergeExit::Last;
                        }
                        if wins_a >= min_gallop {
                            break;
                        }
                    }
                }

                min_gallop += 1;
                let mut first = true;
                while first || wins_a >= MIN_GALLOP || wins_b >= MIN_GALLOP {
                    first = false;
                    min_gallop = min_gallop.saturating_sub(1).max(1);
                    self.min_gallop = min_gallop;

                    wins_a = gallop_right(
                        items[cursor_b],
                        &temp[cursor_temp..cursor_temp + len_a],
                        0,
                        compare,
                    );
                    if wins_a > 0 {
                        items[dest..dest + wins_a]
                            .copy_from_slice(&temp[cursor_temp..cursor_temp + wins_a]);
                        dest += wins_a;
                        cursor_temp += wins_a;
                        len_a -= wins_a;
                        if len_a == 1 {
                            break 'merge MergeExit::Last;
                        }
                        if len_a == 0 {
                            break 'merge MergeExit::Drain;
                        }
                    }
                    items[dest] = items[cursor_b];
                    dest += 1;
                    cursor_b += 1;
                    len_b -= 1;
                    if len_b == 0 {
                        break 'merge MergeExit::Drain;
                    }

                    wins_b = gallop_left(
                        temp[cursor_temp],
                        &items[cursor_b..cursor_b + len_b],
                        0,
                        compare,
                    );
                    if wins_b > 0 {
                        items.copy_within(cursor_b..cursor_b + wins_b, dest);
                        dest += wins_b;
                        cursor_b += wins_b;
                        len_b -= wins_b;
                        if len_b == 0 {
                            break 'merge MergeExit::Drain;
                        }
                    }
                    items[dest] = temp[cursor_temp];
                    dest += 1;
                    cursor_temp += 1;
                    len_a -= 1;
                    if len_a == 1 {
                        break 'merge MergeExit::Last;
                    }
                }
                min_gallop += 1;
                self.min_gallop = min_gallop;
            }
        };

        match exit {
            MergeExit::Drain => {
                items[dest..dest + len_a]
                    .copy_from_slice(&temp[cursor_temp..cursor_temp + len_a]);
            }
            MergeExit::Last => {
                items.copy_within(cursor_b..cursor_b + len_b, dest);
                items[dest + len_b] = temp[cursor_temp];
            }
        }
    }

    /// Merge back to front, buffering run B. Cursors point one past the next
    /// element to take.
    fn merge_high(&mut self, base_a: usize, mut len_a: usize, base_b: usize, mut len_b: usize) {
        let compare = &self.compare;
        let items = &mut *self.items;
        let temp = items[base_b..base_b + len_b].to_vec();
        let mut dest = base_b + len_b;
        let mut cursor_temp = len_b;
        let mut cursor_a = base_a + len_a;

        dest -= 1;
        cursor_a -= 1;
        items[dest] = items[cursor_a];
        len_a -= 1;

        let exit = if len_a == 0 {
            MergeExit::Drain
        } else if len_b == 1 {
            MergeExit::Last
        } else {
            let mut min_gallop = self.min_gallop;
            'merge: loop {
                let mut wins_a = 0;
                let mut wins_b = 0;

                loop {
                    if less(compare, temp[cursor_temp - 1], items[cursor_a - 1]) {
                        dest -= 1;
                        cursor_a -= 1;
                        items[dest] = items[cursor_a];
                        wins_a += 1;
                        wins_b = 0;
                        len_a -= 1;
                        if len_a == 0 {
                            break 'merge MergeExit::Drain;
                        }
                        if wins_a >= min_gallop {
                            break;
                        }
                    } else {
                        dest -= 1;
                        cursor_temp -= 1;
                        items[dest] = temp[cursor_temp];
                        wins_b += 1;
                        wins_a = 0;
                        len_b -= 1;
                        if len_b == 1 {
                            break 'merge MergeExit::Last;
                        }
                        if wins_b >= min_gallop {
                            break;
                        }
                    }
                }

                min_gallop += 1;
                let mut first = true;
                while first || wins_a >= MIN_GALLOP || wins_b >= MIN_GALLOP {
                    first = false;
                    min_gallop = min_gallop.saturating_sub(1).max(1);
                    self.min_gallop = min_gallop;

                    let k = gallop_right(
                        temp[cursor_temp - 1],
                        &items[base_a..base_a + len_a],
                        len_a - 1,
                        compare,
                    );
                    wins_a = len_a - k;
                    if wins_a > 0 {
                        dest -= wins_a;
                        cursor_a -= wins_a;
                        items.copy_within(cursor_a..cursor_a + wins_a, dest);
                        len_a -= wins_a;
                        if len_a == 0 {
                            break 'merge MergeExit::Drain;
                        }
                    }
                    dest -= 1;
                    cursor_temp -= 1;
                    items[dest] = temp[cursor_temp];
                    len_b -= 1;
                    if len_b == 1 {
                        break 'merge MergeExit::Last;
                    }

                    let k = gallop_left(items[cursor_a - 1], &temp[..len_b], len_b - 1, compare);
                    wins_b = len_b - k;
                    if wins_b > 0 {
                        dest -= wins_b;
                        cursor_temp -= wins_b;
                        items[dest..dest + wins_b]
                            .copy_from_slice(&temp[cursor_temp..cursor_temp + wins_b]);
                        len_b -= wins_b;
                        if len_b == 1 {
                            break 'merge MergeExit::Last;
                        }
                        if len_b == 0 {
                            break 'merge MergeExit::Drain;
                        }
                    }
                    dest -= 1;
                    cursor_a -= 1;
                    items[dest] = items[cursor_a];
                    len_a -= 1;
                    if len_a == 0 {
                        break 'merge MergeExit::Drain;
                    }
                }
                min_gallop += 1;
                self.min_gallop = min_gallop;
            }
        };

        match exit {
            MergeExit::Drain => {
                items[dest - len_b..dest].copy_from_slice(&temp[..len_b]);
            }
            MergeExit::Last => {
                dest -= len_a;
                cursor_a -= len_a;
                items.copy_within(cursor_a..cursor_a + len_a, dest);
                items[dest - 1] = temp[cursor_temp - 1];
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_run_length() {
        assert_eq!(min_run_length(10), 10);
        assert_eq!(min_run_length(63), 63);
        assert_eq!(min_run_length(64), 32);
        assert_eq!(min_run_length(65), 33);
        assert_eq!(min_run_length(200), 50);
    }

    #[test]
    fn test_total_order_matches_std_stable_sort() {
        let mut state = 7u64;
        let values: Vec<(u64, usize)> = (0..500)
            .map(|i| {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                ((state >> 33) % 40, i)
            })
            .collect();

        let mut sorted = values.clone();
        sort_by_sign(&mut sorted, |a, b| i128::from(a.0) - i128::from(b.0));
        let mut expected = values;
        expected.sort_by_key(|v| v.0);

        assert_eq!(sorted, expected);
    }

    #[test]
    fn test_presorted_runs_are_merged() {
        let mut values: Vec<i64> = (0..150).rev().chain(0..150).collect();
        sort_by_sign(&mut values, |a, b| i128::from(*a) - i128::from(*b));

        assert!(values.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(values.len(), 300);
    }

    #[test]
    fn test_inconsistent_comparator_keeps_every_element() {
        let mut values: Vec<usize> = (0..257).collect();
        sort_by_sign(&mut values, |a, b| if (a ^ b) % 3 == 0 { -1 } else { 1 });

        let mut seen = values.clone();
        seen.sort_unstable();
        assert_eq!(seen, (0..257).collect::<Vec<_>>());
    }
}
