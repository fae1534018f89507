//! Diffusive hopping: affinity-driven target selection among empty inner
//! neighbors, gated by a mobility/break-probability trial.

use ca_core::species::{self, Code};
use ca_core::surface::{Coord, Surface, DIRECTIONS};
use ca_core::{Grid, Parameters};

use crate::iteration_state::IterationState;
use crate::rng::CaRng;

struct EmptyNeighbor {
    direction: usize,
    target: Coord,
    affinity: f64,
}

pub struct MovementAnalyzer<'a> {
    params: &'a Parameters,
}

impl<'a> MovementAnalyzer<'a> {
    pub fn new(params: &'a Parameters) -> Self {
        Self { params }
    }

    /// Attempt to move the focal cell. Returns `true` (and mutates the grid
    /// + `state.moved`) if the cell hopped.
    pub fn attempt(
        &self,
        grid: &mut Grid,
        surface: Surface,
        state: &mut IterationState,
        focal: Coord,
        code: Code,
        rng: &mut CaRng,
    ) -> bool {
        let mut empties = Vec::new();
        let mut occupied_neighbors = Vec::new();

        for d in 0..DIRECTIONS.len() {
            let Some(inner) = surface.inner(grid.height(), grid.width(), focal, d) else {
                continue;
            };
            let inner_code = grid.get(inner);
            if species::is_empty(inner_code) {
                let affinity = self.outer_affinity(grid, surface, focal, code, d);
                empties.push(EmptyNeighbor {
                    direction: d,
                    target: inner,
                    affinity,
                });
            } else {
                occupied_neighbors.push((d, inner_code));
            }
        }

        let Some(target) = self.select_target(&empties, rng) else {
            return false;
        };

        let pb_prod: f64 = occupied_neighbors
            .iter()
            .map(|&(d, neighbor_code)| {
                if species::is_intermediate(neighbor_code) {
                    1.0
                } else {
                    self.params.break_probability(code, neighbor_code, d)
                }
            })
            .product();
        let species_index = species::plain_or_rotation_species(code);
        let m = self.params.pm[species_index - 1];

        if rng.bernoulli(m * pb_prod) {
            grid.set(target, code);
            grid.set(focal, species::EMPTY);
            state.mark_moved(target);
            true
        } else {
            false
        }
    }

    fn outer_affinity(
        &self,
        grid: &Grid,
        surface: Surface,
        focal: Coord,
        code: Code,
        direction: usize,
    ) -> f64 {
        let Some(outer) = surface.outer(grid.height(), grid.width(), focal, direction) else {
            return 0.0;
        };
        let outer_code = grid.get(outer);
        if species::is_intermediate(outer_code) || species::is_empty(outer_code) {
            return 0.0;
        }
        self.params.affinity(code, outer_code, direction)
    }

    /// Tie-breaking: `0 < J_max < 1` prefers zero-affinity neighbors
    /// (strict repulsion), `J_max == 0` is indifferent among all empties,
    /// `J_max >= 1` prefers the maximal-affinity neighbors.
    fn select_target(&self, empties: &[EmptyNeighbor], rng: &mut CaRng) -> Option<Coord> {
        if empties.is_empty() {
            return None;
        }
        let j_max = empties.iter().map(|e| e.affinity).fold(f64::MIN, f64::max);

        let pool: Vec<&EmptyNeighbor> = if j_max > 0.0 && j_max < 1.0 {
            empties.iter().filter(|e| e.affinity == 0.0).collect()
        } else if j_max == 0.0 {
            empties.iter().collect()
        } else {
            empties.iter().filter(|e| e.affinity == j_max).collect()
        };

        if pool.is_empty() {
            return None;
        }
        let pick = rng.uniform_index(pool.len());
        Some(pool[pick].target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ca_core::params::{Ingredient, RotationSpec};
    use ca_core::params::JEntry;
    use ca_core::Parameters;

    fn params(j: &[JEntry]) -> Parameters {
        let ings = vec![Ingredient::new('A', 0.0, "#fff"), Ingredient::new('B', 0.0, "#fff")];
        Parameters::build(&ings, vec![1.0, 1.0], j, vec![], RotationSpec::none()).unwrap()
    }

    #[test]
    fn no_move_when_fully_surrounded() {
        let p = params(&[]);
        let analyzer = MovementAnalyzer::new(&p);
        let mut grid = Grid::new(3, 3);
        for (r, c) in grid.iter_coords() {
            grid.set((r, c), 1);
        }
        let mut state = IterationState::new();
        let mut rng = CaRng::from_seed(0);
        let moved = analyzer.attempt(&mut grid, Surface::Box, &mut state, (1, 1), 1, &mut rng);
        assert!(!moved);
    }

    #[test]
    fn strict_repulsion_skips_move_when_no_zero_affinity_empty_exists() {
        // The only empty neighbor has positive outer affinity < 1: strict
        // repulsion means no zero-affinity empty exists to fall back on.
        let p = params(&[JEntry {
            relation: "A|B".into(),
            value: 0.5,
        }]);
        let analyzer = MovementAnalyzer::new(&p);
        let mut grid = Grid::new(5, 5);
        grid.set((2, 2), 1); // focal A
        grid.set((0, 2), 2); // outer north is B, J=0.5
        grid.set((2, 1), 1); // west inner occupied
        grid.set((3, 2), 1); // south inner occupied
        grid.set((2, 3), 1); // east inner occupied
        let mut state = IterationState::new();
        let mut rng = CaRng::from_seed(0);
        let moved = analyzer.attempt(&mut grid, Surface::Box, &mut state, (2, 2), 1, &mut rng);
        assert!(!moved);
    }

    #[test]
    fn moves_to_zero_affinity_neighbor_when_mobility_is_certain() {
        let ings = vec![Ingredient::new('A', 0.0, "#fff")];
        let p = Parameters::build(&ings, vec![1.0], &[], vec![], RotationSpec::none()).unwrap();
        let analyzer = MovementAnalyzer::new(&p);
        let mut grid = Grid::new(5, 5);
        grid.set((2, 2), 1);
        let mut state = IterationState::new();
        let mut rng = CaRng::from_seed(0);
        let moved = analyzer.attempt(&mut grid, Surface::Box, &mut state, (2, 2), 1, &mut rng);
        assert!(moved);
        assert_eq!(grid.get((2, 2)), 0);
    }
}
