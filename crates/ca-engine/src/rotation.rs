//! The (at most one) rotatable species: eligibility and face selection.

use ca_core::species::{self, Code};
use ca_core::surface::{Coord, Surface, DIRECTIONS};
use ca_core::{Grid, Parameters};

use crate::rng::CaRng;

/// Summary of the designated rotatable species, or `None` if this run has
/// none.
pub struct RotationInfo {
    pub species_index: usize,
    pub prot: f64,
}

pub struct RotationManager<'a> {
    params: &'a Parameters,
}

impl<'a> RotationManager<'a> {
    pub fn new(params: &'a Parameters) -> Self {
        Self { params }
    }

    pub fn get_info(&self) -> Option<RotationInfo> {
        self.params.rotatable_species().map(|species_index| RotationInfo {
            species_index,
            prot: self.params.rotation.prot,
        })
    }

    /// A rotation-state cell is eligible iff every in-surface inner
    /// neighbor is empty.
    pub fn is_eligible(&self, grid: &Grid, surface: Surface, at: Coord) -> bool {
        for d in 0..DIRECTIONS.len() {
            if let Some(n) = surface.inner(grid.height(), grid.width(), at, d) {
                if !species::is_empty(grid.get(n)) {
                    return false;
                }
            }
        }
        true
    }

    /// Attempt to rotate the cell at `at` (which must hold a rotation-state
    /// code). Returns the new code if the rotation happened.
    pub fn attempt(
        &self,
        grid: &Grid,
        surface: Surface,
        at: Coord,
        code: Code,
        rng: &mut CaRng,
    ) -> Option<Code> {
        if !self.is_eligible(grid, surface, at) {
            return None;
        }
        let info = self.get_info()?;
        if !rng.bernoulli(info.prot) {
            return None;
        }
        let (r, current_face) = species::rotation_parts(code);
        let mut faces: Vec<u8> = (1..=4).filter(|&f| f != current_face).collect();
        let pick = rng.uniform_index(faces.len());
        Some(species::rotation_code(r, faces.remove(pick)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ca_core::params::{Ingredient, RotationSpec};

    fn params_with_rotation() -> Parameters {
        let ings = vec![Ingredient::new('A', 100.0, "#fff")];
        Parameters::build(
            &ings,
            vec![1.0],
            &[],
            vec![],
            RotationSpec {
                component: Some('A'),
                prot: 1.0,
            },
        )
        .unwrap()
    }

    #[test]
    fn eligible_when_all_inner_neighbors_empty() {
        let params = params_with_rotation();
        let mgr = RotationManager::new(&params);
        let grid = Grid::new(5, 5);
        assert!(mgr.is_eligible(&grid, Surface::Box, (2, 2)));
    }

    #[test]
    fn not_eligible_when_a_neighbor_is_occupied() {
        let params = params_with_rotation();
        let mgr = RotationManager::new(&params);
        let mut grid = Grid::new(5, 5);
        grid.set((1, 2), 1);
        assert!(!mgr.is_eligible(&grid, Surface::Box, (2, 2)));
    }

    #[test]
    fn rotation_changes_face_when_eligible() {
        let params = params_with_rotation();
        let mgr = RotationManager::new(&params);
        let grid = Grid::new(5, 5);
        let code = species::rotation_code(1, 1);
        let mut rng = CaRng::from_seed(3);
        let new_code = mgr.attempt(&grid, Surface::Box, (2, 2), code, &mut rng);
        assert!(new_code.is_some());
        let (r, face) = species::rotation_parts(new_code.unwrap());
        assert_eq!(r, 1);
        assert_ne!(face, 1);
    }
}
