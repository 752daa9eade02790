//! Finder-pattern zone classification.
//!
//! The three 7x7 corner blocks of a QR symbol are what scanners lock onto,
//! so modules inside them are always drawn as solid squares.

use std::collections::HashSet;

/// Side length of a finder pattern, in modules.
pub const FINDER_SIZE: usize = 7;

/// The set of module coordinates covered by finder patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinderZones {
    cells: HashSet<(usize, usize)>,
}

impl FinderZones {
    /// Compute the top-left, top-right and bottom-left blocks for a
    /// `size x size` matrix.
    ///
    /// Block origins clamp to zero for symbols smaller than a finder, and
    /// cells outside the matrix are dropped, so overlapping blocks simply
    /// merge.
    pub fn new(size: usize) -> Self {
        let far = size.saturating_sub(FINDER_SIZE);
        let origins = [(0, 0), (far, 0), (0, far)];

        let mut cells = HashSet::with_capacity(3 * FINDER_SIZE * FINDER_SIZE);
        for (fx, fy) in origins {
            for dy in 0..FINDER_SIZE {
                for dx in 0..FINDER_SIZE {
                    let (x, y) = (fx + dx, fy + dy);
                    if x < size && y < size {
                        cells.insert((x, y));
                    }
                }
            }
        }

        Self { cells }
    }

    /// Whether module `(x, y)` belongs to a finder pattern.
    pub fn contains(&self, x: usize, y: usize) -> bool {
        self.cells.contains(&(x, y))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Shorthand for [`FinderZones::new`].
pub fn finder_zones(size: usize) -> FinderZones {
    FinderZones::new(size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_2_has_three_disjoint_blocks() {
        let zones = finder_zones(25);
        assert_eq!(zones.len(), 147);

        assert!(zones.contains(0, 0));
        assert!(zones.contains(6, 6));
        assert!(zones.contains(18, 0));
        assert!(zones.contains(24, 6));
        assert!(zones.contains(0, 18));
        assert!(zones.contains(6, 24));

        assert!(!zones.contains(7, 7));
        assert!(!zones.contains(24, 24));
        assert!(!zones.contains(18, 18));
        assert!(!zones.contains(12, 0));
    }

    #[test]
    fn test_smaller_than_finder_clamps() {
        let zones = finder_zones(5);
        assert_eq!(zones.len(), 25);
        assert!(zones.contains(4, 4));
        assert!(!zones.contains(5, 0));
    }

    #[test]
    fn test_overlapping_blocks_merge() {
        // 7 + 6: the top-left and top-right blocks share column 6
        let zones = finder_zones(13);
        assert!(zones.contains(6, 0));
        assert!(zones.contains(12, 6));
        assert!(!zones.contains(12, 12));
        assert_eq!(zones.len(), 3 * 49 - 2 * 7);
    }

    #[test]
    fn test_empty_matrix() {
        assert!(finder_zones(0).is_empty());
    }
}
