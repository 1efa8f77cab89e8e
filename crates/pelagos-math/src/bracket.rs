//! Bracketing searches over sample sequences.

use smallvec::SmallVec;

/// Upper bound on matches returned by [`bracket_all`].
///
/// A returning ray can cross the same range many times; the cap keeps the
/// scan's output bounded on pathological trajectories.
pub const MAX_BRACKET_MATCHES: usize = 32;

/// Binary search for the interval containing `x` in a monotonically
/// increasing sequence.
///
/// Returns `Some(i)` with `xs[i] <= x < xs[i + 1]`; a query equal to the
/// last sample maps into the final interval so an interpolation window is
/// always available. Returns `None` when `x` is out of range or the
/// sequence has fewer than two samples — callers use that as a normal
/// skip signal, not a failure.
pub fn bracket(xs: &[f64], x: f64) -> Option<usize> {
    if xs.len() < 2 || x < xs[0] || x > xs[xs.len() - 1] {
        return None;
    }
    if x == xs[xs.len() - 1] {
        return Some(xs.len() - 2);
    }
    let mut lo = 0;
    let mut hi = xs.len() - 1;
    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        if xs[mid] <= x {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    Some(lo)
}

/// Linear scan returning every adjacent pair that brackets `x`, for
/// non-monotonic sequences such as a returning ray's range samples.
///
/// Each returned index `i` satisfies `min(xs[i], xs[i+1]) <= x <=
/// max(xs[i], xs[i+1])` with `xs[i] != xs[i+1]`. Output is capped at
/// [`MAX_BRACKET_MATCHES`]; an exact hit on a shared sample is reported
/// once, for the earlier pair.
pub fn bracket_all(xs: &[f64], x: f64) -> SmallVec<[usize; 8]> {
    let mut out = SmallVec::new();
    for i in 0..xs.len().saturating_sub(1) {
        if out.len() == MAX_BRACKET_MATCHES {
            break;
        }
        let (a, b) = (xs[i], xs[i + 1]);
        if a == b {
            continue;
        }
        let inside = (a - x) * (b - x) <= 0.0;
        // An exact hit on xs[i+1] belongs to this pair; skip the duplicate
        // report from the next pair's left endpoint.
        let duplicate = x == a && i > 0 && (xs[i - 1] - x) * (a - x) <= 0.0 && xs[i - 1] != a;
        if inside && !duplicate {
            out.push(i);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn bracket_finds_interior_interval() {
        let xs = [0.0, 1.0, 2.0, 5.0, 10.0];
        assert_eq!(bracket(&xs, 0.5), Some(0));
        assert_eq!(bracket(&xs, 1.0), Some(1));
        assert_eq!(bracket(&xs, 4.9), Some(2));
        assert_eq!(bracket(&xs, 10.0), Some(3));
    }

    #[test]
    fn bracket_out_of_range_is_none() {
        let xs = [0.0, 1.0, 2.0];
        assert_eq!(bracket(&xs, -0.001), None);
        assert_eq!(bracket(&xs, 2.001), None);
        assert_eq!(bracket(&[1.0], 1.0), None);
        assert_eq!(bracket(&[], 1.0), None);
    }

    #[test]
    fn bracket_all_finds_every_pass() {
        // A range sequence that goes out, comes back, and goes out again.
        let xs = [0.0, 2.0, 4.0, 3.0, 1.0, 2.5, 5.0];
        let hits = bracket_all(&xs, 2.2);
        assert_eq!(hits.as_slice(), &[1, 3, 4]);
    }

    #[test]
    fn bracket_all_exact_hit_reported_once() {
        let xs = [0.0, 2.0, 4.0];
        let hits = bracket_all(&xs, 2.0);
        assert_eq!(hits.as_slice(), &[0]);
    }

    #[test]
    fn bracket_all_skips_stationary_pairs() {
        let xs = [0.0, 1.0, 1.0, 2.0];
        let hits = bracket_all(&xs, 1.0);
        assert_eq!(hits.as_slice(), &[0]);
    }

    #[test]
    fn bracket_all_respects_cap() {
        // Zig-zag crossing 1.0 on every pair.
        let mut xs = Vec::new();
        for i in 0..2 * MAX_BRACKET_MATCHES + 4 {
            xs.push(if i % 2 == 0 { 0.0 } else { 2.0 });
        }
        let hits = bracket_all(&xs, 1.0);
        assert_eq!(hits.len(), MAX_BRACKET_MATCHES);
    }

    proptest! {
        #[test]
        fn bracket_postcondition(
            mut xs in prop::collection::vec(-1000.0_f64..1000.0, 2..64),
            x in -1000.0_f64..1000.0,
        ) {
            xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
            xs.dedup();
            prop_assume!(xs.len() >= 2);
            match bracket(&xs, x) {
                Some(i) => {
                    prop_assert!(i + 1 < xs.len());
                    prop_assert!(xs[i] <= x);
                    prop_assert!(x <= xs[i + 1]);
                }
                None => {
                    prop_assert!(x < xs[0] || x > xs[xs.len() - 1]);
                }
            }
        }

        #[test]
        fn bracket_all_pairs_contain_query(
            xs in prop::collection::vec(-100.0_f64..100.0, 2..48),
            x in -100.0_f64..100.0,
        ) {
            for i in bracket_all(&xs, x) {
                let lo = xs[i].min(xs[i + 1]);
                let hi = xs[i].max(xs[i + 1]);
                prop_assert!(lo <= x && x <= hi);
            }
        }
    }
}
