//! Sparse line sizing for one grid axis.
//!
//! Positions are computed from the default size plus the (sparse) overrides and
//! hidden lines, so lookups never walk the whole sheet.

use std::collections::{BTreeMap, BTreeSet};

/// Sizes of the lines (rows or columns) along one axis
#[derive(Debug, Clone, PartialEq)]
pub struct LineAxis {
    default_size: f32,
    overrides: BTreeMap<u32, f32>,
    hidden: BTreeSet<u32>,
}

impl LineAxis {
    pub fn new(default_size: f32) -> Self {
        Self {
            default_size: sanitize(default_size),
            overrides: BTreeMap::new(),
            hidden: BTreeSet::new(),
        }
    }

    pub fn default_size(&self) -> f32 {
        self.default_size
    }

    /// Set a size override. A size `<= 0` removes the override.
    pub fn set_size(&mut self, index: u32, size: f32) {
        if size.is_finite() && size > 0.0 {
            self.overrides.insert(index, size);
        } else {
            self.overrides.remove(&index);
        }
    }

    pub fn set_hidden(&mut self, index: u32, hidden: bool) {
        if hidden {
            self.hidden.insert(index);
        } else {
            self.hidden.remove(&index);
        }
    }

    pub fn is_hidden(&self, index: u32) -> bool {
        self.hidden.contains(&index)
    }

    /// Effective size of a line (0 for hidden lines)
    pub fn size(&self, index: u32) -> f32 {
        if self.hidden.contains(&index) {
            return 0.0;
        }
        self.overrides
            .get(&index)
            .copied()
            .unwrap_or(self.default_size)
    }

    /// Leading edge of `index`: the sum of all sizes before it
    pub fn offset(&self, index: u32) -> f32 {
        let mut pos = index as f32 * self.default_size;
        for (&i, &size) in self.overrides.range(..index) {
            if !self.hidden.contains(&i) {
                pos += size - self.default_size;
            }
        }
        for _ in self.hidden.range(..index) {
            pos -= self.default_size;
        }
        pos
    }

    /// Sum of sizes over `start..=end`. Zero when the range is inverted.
    pub fn span(&self, start: u32, end: u32) -> f32 {
        if end < start {
            return 0.0;
        }
        self.offset(end.saturating_add(1)) - self.offset(start)
    }

    /// Index of the line covering `pos` (sheet space, no scroll).
    ///
    /// Positions before the first line resolve to line 0. Zero-size lines are
    /// skipped: a position on their boundary resolves to the next visible line.
    pub fn index_at(&self, pos: f32) -> u32 {
        if !pos.is_finite() || pos <= 0.0 {
            return self.first_visible_from(0);
        }

        let mut cursor_idx: u32 = 0;
        let mut cursor_pos: f32 = 0.0;
        for special in self.special_indices() {
            if special < cursor_idx {
                continue;
            }
            let run = (special - cursor_idx) as f32 * self.default_size;
            if pos < cursor_pos + run {
                return cursor_idx + self.lines_in(pos - cursor_pos);
            }
            cursor_pos += run;
            let size = self.size(special);
            if pos < cursor_pos + size {
                return special;
            }
            cursor_pos += size;
            cursor_idx = special.saturating_add(1);
        }
        cursor_idx.saturating_add(self.lines_in(pos - cursor_pos))
    }

    /// First line at or after `index` with a non-zero size
    fn first_visible_from(&self, index: u32) -> u32 {
        if self.default_size <= 0.0 {
            return index;
        }
        let mut i = index;
        while self.hidden.contains(&i) {
            match i.checked_add(1) {
                Some(next) => i = next,
                None => break,
            }
        }
        i
    }

    /// Number of whole default-size lines that fit in `distance`
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn lines_in(&self, distance: f32) -> u32 {
        if self.default_size <= 0.0 || distance <= 0.0 {
            return 0;
        }
        let n = (distance / self.default_size).floor();
        if n >= u32::MAX as f32 {
            u32::MAX
        } else {
            n as u32
        }
    }

    /// Override and hidden indices, merged, ascending, deduplicated
    fn special_indices(&self) -> impl Iterator<Item = u32> + '_ {
        let merged: BTreeSet<u32> = self
            .overrides
            .keys()
            .copied()
            .chain(self.hidden.iter().copied())
            .collect();
        merged.into_iter()
    }
}

fn sanitize(size: f32) -> f32 {
    if size.is_finite() && size > 0.0 {
        size
    } else {
        0.0
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_default_offsets() {
        let axis = LineAxis::new(64.0);
        assert_eq!(axis.offset(0), 0.0);
        assert_eq!(axis.offset(3), 192.0);
        assert_eq!(axis.span(1, 2), 128.0);
    }

    #[test]
    fn test_override_and_hidden_offsets() {
        let mut axis = LineAxis::new(20.0);
        axis.set_size(1, 50.0);
        axis.set_hidden(3, true);
        // 20 + 50 + 20 + 0
        assert_eq!(axis.offset(4), 90.0);
        assert_eq!(axis.size(3), 0.0);
        assert_eq!(axis.span(0, 4), 110.0);
    }

    #[test]
    fn test_hidden_override_counts_as_zero() {
        let mut axis = LineAxis::new(20.0);
        axis.set_size(2, 100.0);
        axis.set_hidden(2, true);
        assert_eq!(axis.offset(3), 40.0);
    }

    #[test]
    fn test_non_positive_size_removes_override() {
        let mut axis = LineAxis::new(20.0);
        axis.set_size(0, 30.0);
        axis.set_size(0, 0.0);
        assert_eq!(axis.size(0), 20.0);
        axis.set_size(0, f32::NAN);
        assert_eq!(axis.size(0), 20.0);
    }

    #[test]
    fn test_index_at_default() {
        let axis = LineAxis::new(20.0);
        assert_eq!(axis.index_at(0.0), 0);
        assert_eq!(axis.index_at(10.0), 0);
        assert_eq!(axis.index_at(20.0), 1);
        assert_eq!(axis.index_at(50.0), 2);
        assert_eq!(axis.index_at(-5.0), 0);
    }

    #[test]
    fn test_index_at_with_specials() {
        let mut axis = LineAxis::new(20.0);
        axis.set_size(1, 50.0); // 20..70
        axis.set_hidden(2, true); // 70..70
        // row 3 = 70..90, row 4 = 90..110
        assert_eq!(axis.index_at(30.0), 1);
        assert_eq!(axis.index_at(69.0), 1);
        assert_eq!(axis.index_at(70.0), 3);
        assert_eq!(axis.index_at(95.0), 4);
    }

    #[test]
    fn test_index_at_skips_hidden_leading_line() {
        let mut axis = LineAxis::new(20.0);
        axis.set_hidden(0, true);
        assert_eq!(axis.index_at(0.0), 1);
        assert_eq!(axis.index_at(5.0), 1);
    }

    #[test]
    fn test_index_at_inverts_offset() {
        let mut axis = LineAxis::new(25.0);
        axis.set_size(4, 40.0);
        axis.set_size(9, 10.0);
        axis.set_hidden(6, true);
        for i in 0..20 {
            if axis.size(i) > 0.0 {
                assert_eq!(axis.index_at(axis.offset(i)), i, "line {i}");
            }
        }
    }
}
