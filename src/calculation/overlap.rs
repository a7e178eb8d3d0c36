//! Interval overlap arithmetic.

/// Returns the number of minutes two half-open intervals have in common.
///
/// Intervals are `[a_start, a_end)` and `[b_start, b_end)`. Disjoint and
/// merely adjacent intervals overlap by 0. The result is never negative.
///
/// # Examples
///
/// ```
/// use flextime_engine::calculation::overlap_minutes;
///
/// // Work 08:00-17:00 against a 12:00-12:30 window
/// assert_eq!(overlap_minutes(480, 1020, 720, 750), 30);
/// // 08:00-12:00 and 12:00-12:30 only touch
/// assert_eq!(overlap_minutes(480, 720, 720, 750), 0);
/// ```
pub fn overlap_minutes(a_start: i32, a_end: i32, b_start: i32, b_end: i32) -> i32 {
    let start = a_start.max(b_start);
    let end = a_end.min(b_end);
    (end - start).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_window_inside_interval() {
        assert_eq!(overlap_minutes(480, 1020, 720, 750), 30);
    }

    #[test]
    fn test_partial_overlap_at_start() {
        // Work starts 12:10 inside a 12:00-12:30 window
        assert_eq!(overlap_minutes(730, 1020, 720, 750), 20);
    }

    #[test]
    fn test_adjacent_intervals_do_not_overlap() {
        assert_eq!(overlap_minutes(480, 720, 720, 750), 0);
        assert_eq!(overlap_minutes(750, 1020, 720, 750), 0);
    }

    #[test]
    fn test_disjoint_intervals() {
        assert_eq!(overlap_minutes(480, 600, 720, 750), 0);
    }

    #[test]
    fn test_identical_intervals() {
        assert_eq!(overlap_minutes(720, 750, 720, 750), 30);
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(
            a in 0i32..1440, a_len in 0i32..600,
            b in 0i32..1440, b_len in 0i32..600,
        ) {
            prop_assert_eq!(
                overlap_minutes(a, a + a_len, b, b + b_len),
                overlap_minutes(b, b + b_len, a, a + a_len)
            );
        }

        #[test]
        fn prop_overlap_bounded_by_shorter_interval(
            a in 0i32..1440, a_len in 0i32..600,
            b in 0i32..1440, b_len in 0i32..600,
        ) {
            let result = overlap_minutes(a, a + a_len, b, b + b_len);
            prop_assert!(result >= 0);
            prop_assert!(result <= a_len.min(b_len));
        }

        #[test]
        fn prop_adjacent_intervals_never_overlap(
            a in 0i32..1000, a_len in 1i32..200, b_len in 1i32..200,
        ) {
            prop_assert_eq!(overlap_minutes(a, a + a_len, a + a_len, a + a_len + b_len), 0);
        }
    }
}
