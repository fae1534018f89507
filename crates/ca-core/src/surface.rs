//! Lattice topology: maps a possibly-out-of-range `(row, col)` to a valid
//! in-lattice coordinate, or reports that the coordinate falls off the
//! surface.

use serde::{Deserialize, Serialize};

/// A lattice coordinate.
pub type Coord = (usize, usize);

/// Von Neumann neighbor order. Must stay N, W, S, E — the rotation manager
/// and the rotation-aware pair-label lookups key off this exact index.
pub const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (0, -1), (1, 0), (0, 1)];

pub const NORTH: usize = 0;
pub const WEST: usize = 1;
pub const SOUTH: usize = 2;
pub const EAST: usize = 3;

/// Boundary condition for the lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    /// Wraps both axes.
    Torus,
    /// Wraps columns only; rows are hard edges.
    Cylinder,
    /// Hard edges on both axes.
    Box,
}

impl Surface {
    /// Resolve a (possibly out-of-range) coordinate against a lattice of
    /// size `height x width`. Returns `None` if the coordinate falls off the
    /// surface under this boundary condition.
    pub fn resolve(&self, height: usize, width: usize, row: isize, col: isize) -> Option<Coord> {
        let h = height as isize;
        let w = width as isize;
        match self {
            Surface::Torus => Some((rem_euclid(row, h), rem_euclid(col, w))),
            Surface::Cylinder => {
                if row < 0 || row >= h {
                    None
                } else {
                    Some((row as usize, rem_euclid(col, w)))
                }
            }
            Surface::Box => {
                if row < 0 || row >= h || col < 0 || col >= w {
                    None
                } else {
                    Some((row as usize, col as usize))
                }
            }
        }
    }

    /// Resolve the inner neighbor (one step) in direction `d`.
    pub fn inner(&self, height: usize, width: usize, from: Coord, d: usize) -> Option<Coord> {
        let (dr, dc) = DIRECTIONS[d];
        self.resolve(height, width, from.0 as isize + dr, from.1 as isize + dc)
    }

    /// Resolve the outer neighbor (two steps) in direction `d`.
    pub fn outer(&self, height: usize, width: usize, from: Coord, d: usize) -> Option<Coord> {
        let (dr, dc) = DIRECTIONS[d];
        self.resolve(
            height,
            width,
            from.0 as isize + 2 * dr,
            from.1 as isize + 2 * dc,
        )
    }
}

fn rem_euclid(x: isize, m: isize) -> usize {
    x.rem_euclid(m) as usize
}
