//! Initial random placement: largest-remainder rounding to split `NCELL`
//! among ingredients, then rejection sampling over empty coordinates.

use ca_core::config::EMPTY_FRACTION;
use ca_core::species::{self, Code};
use ca_core::{Grid, Ingredient, Parameters};

use crate::rng::CaRng;

/// Number of occupied cells for an `H x W` lattice at the fixed empty
/// fraction.
pub fn ncell(height: usize, width: usize) -> usize {
    let total = height * width;
    total - ((EMPTY_FRACTION * total as f64).floor() as usize)
}

/// Split `total` among `fractions` (percentages, should sum to ~100) using
/// largest-remainder rounding: floor every raw share, then hand out the
/// shortfall to the entries with the largest fractional remainder.
pub fn calculate_cell_counts(total: usize, fractions: &[f64]) -> Vec<usize> {
    let raw: Vec<f64> = fractions.iter().map(|f| total as f64 * f / 100.0).collect();
    let mut floors: Vec<usize> = raw.iter().map(|r| (r + 1e-9).floor() as usize).collect();
    let assigned: usize = floors.iter().sum();
    let deficit = total.saturating_sub(assigned);

    let mut remainders: Vec<(usize, f64)> = raw
        .iter()
        .zip(floors.iter())
        .enumerate()
        .map(|(i, (r, f))| (i, r - *f as f64))
        .collect();
    remainders.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap());

    for &(i, _) in remainders.iter().take(deficit) {
        floors[i] += 1;
    }
    floors
}

/// Place the initial lattice: `NCELL` occupied cells split among
/// `ingredients` by molar fraction, each placed at a uniformly random empty
/// coordinate. If `rotatable_index` names the rotatable species, placed
/// cells of that species get a uniformly random starting face.
pub fn place_initial_grid(
    height: usize,
    width: usize,
    ingredients: &[Ingredient],
    params: &Parameters,
    rng: &mut CaRng,
) -> Grid {
    let mut grid = Grid::new(height, width);
    let n = ncell(height, width);
    let fractions: Vec<f64> = ingredients.iter().map(|i| i.molar_fraction).collect();
    let counts = calculate_cell_counts(n, &fractions);
    let rotatable = params.rotatable_species();

    for (idx, &count) in counts.iter().enumerate() {
        let species_index = idx + 1;
        for _ in 0..count {
            let coord = sample_empty_coord(&grid, rng);
            let code: Code = if rotatable == Some(species_index) {
                let face = (rng.uniform_index(4) + 1) as u8;
                species::rotation_code(species_index, face)
            } else {
                species_index as Code
            };
            grid.set(coord, code);
        }
    }
    grid
}

fn sample_empty_coord(grid: &Grid, rng: &mut CaRng) -> (usize, usize) {
    loop {
        let r = rng.uniform_index(grid.height());
        let c = rng.uniform_index(grid.width());
        if species::is_empty(grid.get((r, c))) {
            return (r, c);
        }
    }
}
