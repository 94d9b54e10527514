//! Sliding window over a list taller than the screen

use core::ops::Range;

use barograph_display::MAX_LINES;

/// Rows of a `len`-long list to show with `selected` highlighted
///
/// The window keeps the selection on the middle row, except at either end
/// of the list where it is clamped so every row is used.
pub fn visible_window(len: usize, selected: usize) -> Range<usize> {
    let start = selected
        .saturating_sub(1)
        .min(len.saturating_sub(MAX_LINES));
    start..(start + MAX_LINES).min(len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_five_entries() {
        assert_eq!(visible_window(5, 0), 0..3);
        assert_eq!(visible_window(5, 1), 0..3);
        assert_eq!(visible_window(5, 2), 1..4);
        assert_eq!(visible_window(5, 3), 2..5);
        assert_eq!(visible_window(5, 4), 2..5);
    }

    #[test]
    fn test_short_lists() {
        assert_eq!(visible_window(0, 0), 0..0);
        assert_eq!(visible_window(1, 0), 0..1);
        assert_eq!(visible_window(2, 1), 0..2);
        assert_eq!(visible_window(3, 2), 0..3);
    }

    proptest! {
        #[test]
        fn prop_selection_always_visible(len in 1usize..64, pick in 0usize..64) {
            let selected = pick % len;
            let w = visible_window(len, selected);
            prop_assert!(w.contains(&selected));
            prop_assert_eq!(w.len(), len.min(MAX_LINES));
        }
    }
}
