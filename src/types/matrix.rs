//! The boolean module grid produced by the QR encoder.

/// Square grid of modules; `true` is a dark module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMatrix {
    size: usize,
    modules: Vec<bool>,
}

impl BitMatrix {
    /// Build a matrix from row-major modules.
    ///
    /// Returns `None` when `modules.len()` is not `size * size`.
    pub fn new(size: usize, modules: Vec<bool>) -> Option<Self> {
        (modules.len() == size * size).then_some(Self { size, modules })
    }

    /// Build a matrix from rows. Returns `None` unless the rows form a square.
    pub fn from_rows(rows: &[Vec<bool>]) -> Option<Self> {
        let size = rows.len();
        if rows.iter().any(|row| row.len() != size) {
            return None;
        }
        Self::new(size, rows.concat())
    }

    /// Number of modules per side.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Module at `(x, y)`; out of range reads as light.
    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.size && y < self.size && self.modules[y * self.size + x]
    }

    /// Count of dark modules.
    pub fn dark_count(&self) -> usize {
        self.modules.iter().filter(|&&m| m).count()
    }

    /// Iterate `(x, y)` of every dark module in row-major order.
    pub fn dark_modules(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let size = self.size;
        self.modules
            .iter()
            .enumerate()
            .filter(|(_, &dark)| dark)
            .map(move |(i, _)| (i % size, i / size))
    }
}
