//! Reaction candidate enumeration, categorical sampling, and application.
//!
//! Each candidate is a tagged record; "no reaction" is its own outcome
//! variant rather than a sentinel id mixed into the candidate list.

use ca_core::species::{self, Code};
use ca_core::surface::{Coord, Surface, DIRECTIONS};
use ca_core::{Grid, Parameters, Reaction};

use crate::iteration_state::IterationState;
use crate::rng::CaRng;

#[derive(Debug, Clone)]
struct Candidate {
    products: [Code; 2],
    positions: [Coord; 2],
    prob: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionOutcome {
    /// A reaction was applied; the focal cell must not also move.
    Reacted,
    /// Total candidate weight was zero; every candidate endpoint was marked
    /// not-reacted and the focal cell must not also move this sweep.
    TotalZeroSkip,
    /// Candidates existed but "no reaction" was sampled; movement may still
    /// be attempted.
    NoReactionChosen,
    /// No neighbor produced any reaction candidate; movement may still be
    /// attempted.
    NoCandidates,
}

impl ReactionOutcome {
    pub fn blocks_movement(self) -> bool {
        matches!(self, ReactionOutcome::Reacted | ReactionOutcome::TotalZeroSkip)
    }
}

pub struct ReactionProcessor<'a> {
    params: &'a Parameters,
}

impl<'a> ReactionProcessor<'a> {
    pub fn new(params: &'a Parameters) -> Self {
        Self { params }
    }

    pub fn process(
        &self,
        grid: &mut Grid,
        surface: Surface,
        state: &mut IterationState,
        focal: Coord,
        code: Code,
        rng: &mut CaRng,
    ) -> ReactionOutcome {
        let mut candidates = Vec::new();

        for d in 0..DIRECTIONS.len() {
            let Some(neighbor) = surface.inner(grid.height(), grid.width(), focal, d) else {
                continue;
            };
            let neighbor_code = grid.get(neighbor);

            if neighbor_code == 0
                || neighbor_code == code
                || state.is_not_reacted(focal, neighbor)
                || state.is_reacted(neighbor)
                || state.is_moved(neighbor)
            {
                continue;
            }
            if species::is_intermediate(code)
                && species::is_intermediate(neighbor_code)
                && !state.is_paired_with(focal, neighbor)
            {
                continue;
            }

            self.collect_candidates(code, neighbor_code, focal, neighbor, &mut candidates);
        }

        if candidates.is_empty() {
            return ReactionOutcome::NoCandidates;
        }

        let total: f64 = candidates.iter().map(|c| c.prob).sum();
        if total == 0.0 {
            for c in &candidates {
                state.mark_not_reacted(c.positions[0], c.positions[1]);
            }
            return ReactionOutcome::TotalZeroSkip;
        }

        let focal_is_intermediate = species::is_intermediate(code);
        let mut weights: Vec<f64> = candidates.iter().map(|c| c.prob).collect();
        let denom = if focal_is_intermediate {
            total
        } else {
            let no_reaction_weight: f64 = candidates.iter().map(|c| 1.0 - c.prob).sum();
            weights.push(no_reaction_weight);
            total + no_reaction_weight
        };
        for w in &mut weights {
            *w /= denom;
        }

        let chosen = rng.categorical(&weights);
        let no_reaction_index = if focal_is_intermediate {
            None
        } else {
            Some(candidates.len())
        };

        if Some(chosen) == no_reaction_index {
            for c in &candidates {
                state.mark_not_reacted(c.positions[0], c.positions[1]);
            }
            return ReactionOutcome::NoReactionChosen;
        }

        let winner = candidates[chosen].clone();
        let [pos1, pos2] = winner.positions;
        let [prod1, prod2] = winner.products;

        if species::is_intermediate(grid.get(pos1)) && species::is_intermediate(grid.get(pos2)) {
            state.unpair_intermediates(pos1, pos2);
        }

        grid.set(pos1, prod1);
        grid.set(pos2, prod2);
        state.mark_reacted(pos1);
        state.mark_reacted(pos2);

        for (i, c) in candidates.iter().enumerate() {
            if i != chosen {
                state.mark_not_reacted(c.positions[0], c.positions[1]);
            }
        }

        if species::is_intermediate(prod1) && species::is_intermediate(prod2) {
            state.pair_intermediates(pos1, pos2);
        }

        ReactionOutcome::Reacted
    }

    /// Build every reaction candidate the focal/neighbor pair `(code,
    /// neighbor_code)` at positions `(p, q)` can produce: forward and
    /// reverse transitions for every declared reaction, plus both halves
    /// of the intermediate step when that reaction declares one.
    fn collect_candidates(
        &self,
        code: Code,
        neighbor_code: Code,
        p: Coord,
        q: Coord,
        out: &mut Vec<Candidate>,
    ) {
        for reaction in &self.params.reactions {
            // Parameters::build already rejected any reaction whose letters
            // don't resolve to a known ingredient.
            let a = self
                .params
                .species_index_of(reaction.reactants[0])
                .expect("reaction validated against ingredient list");
            let b = self
                .params
                .species_index_of(reaction.reactants[1])
                .expect("reaction validated against ingredient list");
            let x = self
                .params
                .species_index_of(reaction.products[0])
                .expect("reaction validated against ingredient list");
            let y = self
                .params
                .species_index_of(reaction.products[1])
                .expect("reaction validated against ingredient list");
            let a = a as Code;
            let b = b as Code;
            let x = x as Code;
            let y = y as Code;
            let h = reaction.has_intermediate;
            let intermediates = if h {
                Some(species::intermediate_codes(a as usize, b as usize))
            } else {
                None
            };
            let pair = [code, neighbor_code];

            let forward_products = |swap: bool| -> [Code; 2] {
                match (intermediates, swap) {
                    (Some([i0, i1]), false) => [i0, i1],
                    (Some([i0, i1]), true) => [i1, i0],
                    (None, false) => [x, y],
                    (None, true) => [y, x],
                }
            };
            let reverse_products = |swap: bool| -> [Code; 2] {
                match (intermediates, swap) {
                    (Some([i0, i1]), false) => [i0, i1],
                    (Some([i0, i1]), true) => [i1, i0],
                    (None, false) => [a, b],
                    (None, true) => [b, a],
                }
            };

            if pair == [a, b] {
                out.push(Candidate {
                    products: forward_products(false),
                    positions: [p, q],
                    prob: reaction.pr[0],
                });
            }
            if pair == [b, a] {
                out.push(Candidate {
                    products: forward_products(true),
                    positions: [p, q],
                    prob: reaction.pr[0],
                });
            }
            if pair == [x, y] {
                let prob = if h { reaction.reverse_pr[1] } else { reaction.reverse_pr[0] };
                out.push(Candidate {
                    products: reverse_products(false),
                    positions: [p, q],
                    prob,
                });
            }
            if pair == [y, x] {
                let prob = if h { reaction.reverse_pr[1] } else { reaction.reverse_pr[0] };
                out.push(Candidate {
                    products: reverse_products(true),
                    positions: [p, q],
                    prob,
                });
            }

            if let Some([i0, i1]) = intermediates {
                if pair == [i0, i1] {
                    out.push(Candidate {
                        products: [x, y],
                        positions: [p, q],
                        prob: reaction.pr[1],
                    });
                    out.push(Candidate {
                        products: [a, b],
                        positions: [p, q],
                        prob: reaction.reverse_pr[0],
                    });
                }
                if pair == [i1, i0] {
                    out.push(Candidate {
                        products: [y, x],
                        positions: [p, q],
                        prob: reaction.pr[1],
                    });
                    out.push(Candidate {
                        products: [b, a],
                        positions: [p, q],
                        prob: reaction.reverse_pr[0],
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ca_core::params::{Ingredient, RotationSpec};

    fn simple_params() -> Parameters {
        let ings = vec![
            Ingredient::new('A', 0.0, "#fff"),
            Ingredient::new('B', 0.0, "#fff"),
            Ingredient::new('C', 0.0, "#fff"),
        ];
        let reaction = Reaction {
            reactants: ['A', 'B'],
            products: ['A', 'C'],
            pr: [1.0, 1.0],
            reverse_pr: [0.0, 0.0],
            has_intermediate: false,
        };
        Parameters::build(&ings, vec![1.0, 1.0, 1.0], &[], vec![reaction], RotationSpec::none())
            .unwrap()
    }

    #[test]
    fn direct_forward_reaction_applies() {
        let params = simple_params();
        let processor = ReactionProcessor::new(&params);
        let mut grid = Grid::new(3, 3);
        grid.set((1, 1), 1); // A
        grid.set((1, 2), 2); // B (east neighbor)
        let mut state = IterationState::new();
        let mut rng = CaRng::from_seed(0);

        let outcome = processor.process(&mut grid, Surface::Box, &mut state, (1, 1), 1, &mut rng);
        assert_eq!(outcome, ReactionOutcome::Reacted);
        assert_eq!(grid.get((1, 1)), 1); // A unchanged
        assert_eq!(grid.get((1, 2)), 3); // B -> C
    }

    #[test]
    fn no_candidates_when_neighbors_do_not_match_any_reaction() {
        let params = simple_params();
        let processor = ReactionProcessor::new(&params);
        let mut grid = Grid::new(3, 3);
        grid.set((1, 1), 3); // C, not a reactant/product pair partner here alone
        let mut state = IterationState::new();
        let mut rng = CaRng::from_seed(0);

        let outcome = processor.process(&mut grid, Surface::Box, &mut state, (1, 1), 3, &mut rng);
        assert_eq!(outcome, ReactionOutcome::NoCandidates);
    }

    #[test]
    fn intermediate_pairing_round_trips_through_reaction() {
        let ings = vec![Ingredient::new('A', 0.0, "#fff"), Ingredient::new('B', 0.0, "#fff")];
        let reaction = Reaction {
            reactants: ['A', 'B'],
            products: ['A', 'B'],
            pr: [1.0, 0.9],
            reverse_pr: [0.3, 0.1],
            has_intermediate: true,
        };
        let params =
            Parameters::build(&ings, vec![1.0, 1.0], &[], vec![reaction], RotationSpec::none())
                .unwrap();
        let processor = ReactionProcessor::new(&params);
        let mut grid = Grid::new(3, 3);
        grid.set((1, 1), 1);
        grid.set((1, 2), 2);
        let mut state = IterationState::new();
        let mut rng = CaRng::from_seed(5);

        let outcome = processor.process(&mut grid, Surface::Box, &mut state, (1, 1), 1, &mut rng);
        assert_eq!(outcome, ReactionOutcome::Reacted);
        assert!(species::is_intermediate(grid.get((1, 1))));
        assert!(species::is_intermediate(grid.get((1, 2))));
        assert!(state.is_paired_with((1, 1), (1, 2)));
    }
}
