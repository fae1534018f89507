//! The lattice itself: an H×W array of species codes, owned by the engine
//! for the duration of a run and mutated only by it.

use ndarray::Array2;

use crate::species::Code;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Array2<Code>,
}

impl Grid {
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            cells: Array2::zeros((height, width)),
        }
    }

    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    #[inline]
    pub fn get(&self, coord: (usize, usize)) -> Code {
        self.cells[[coord.0, coord.1]]
    }

    #[inline]
    pub fn set(&mut self, coord: (usize, usize), code: Code) {
        self.cells[[coord.0, coord.1]] = code;
    }

    /// Convert to a nested `Vec<Vec<i16>>`, the shape the engine's history
    /// snapshots and the over-the-wire tensor use.
    pub fn to_rows(&self) -> Vec<Vec<Code>> {
        self.cells
            .outer_iter()
            .map(|row| row.to_vec())
            .collect()
    }

    pub fn from_rows(rows: Vec<Vec<Code>>) -> Self {
        let height = rows.len();
        let width = rows.first().map(|r| r.len()).unwrap_or(0);
        let mut cells = Array2::zeros((height, width));
        for (r, row) in rows.into_iter().enumerate() {
            for (c, code) in row.into_iter().enumerate() {
                cells[[r, c]] = code;
            }
        }
        Self { cells }
    }

    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|&&c| c == 0).count()
    }

    pub fn count_occupied(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }

    pub fn iter_coords(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let (h, w) = (self.height(), self.width());
        (0..h).flat_map(move |r| (0..w).map(move |c| (r, c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_all_empty() {
        let g = Grid::new(4, 5);
        assert_eq!(g.count_empty(), 20);
        assert_eq!(g.count_occupied(), 0);
    }

    #[test]
    fn set_get_round_trip() {
        let mut g = Grid::new(3, 3);
        g.set((1, 2), 5);
        assert_eq!(g.get((1, 2)), 5);
        assert_eq!(g.count_occupied(), 1);
    }

    #[test]
    fn rows_round_trip() {
        let mut g = Grid::new(2, 2);
        g.set((0, 1), 7);
        let rows = g.to_rows();
        let g2 = Grid::from_rows(rows);
        assert_eq!(g, g2);
    }
}
