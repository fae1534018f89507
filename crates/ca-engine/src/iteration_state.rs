//! Per-sweep scratch state and the cross-sweep intermediate pairing.
//!
//! `moved`, `reacted`, and `not_reacted` are cleared at the start of every
//! sweep; `intermediate_pairs` persists across sweeps. Pairing is a
//! coordinate→coordinate map rather than a list of duplicated 4-tuples, so
//! membership and partner lookups are O(1) and the "both sides present"
//! invariant is enforced in one place.

use std::collections::{HashMap, HashSet};

pub type Coord = (usize, usize);

#[derive(Debug, Default)]
pub struct IterationState {
    moved: HashSet<Coord>,
    reacted: HashSet<Coord>,
    not_reacted: HashSet<(Coord, Coord)>,
    intermediate_pairs: HashMap<Coord, Coord>,
}

impl IterationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the per-sweep sets. `intermediate_pairs` is untouched.
    pub fn clear_sweep(&mut self) {
        self.moved.clear();
        self.reacted.clear();
        self.not_reacted.clear();
    }

    pub fn mark_moved(&mut self, c: Coord) {
        self.moved.insert(c);
    }

    pub fn is_moved(&self, c: Coord) -> bool {
        self.moved.contains(&c)
    }

    pub fn mark_reacted(&mut self, c: Coord) {
        self.reacted.insert(c);
    }

    pub fn is_reacted(&self, c: Coord) -> bool {
        self.reacted.contains(&c)
    }

    /// Mark the unordered pair `(p, q)` as not-reacted this sweep.
    pub fn mark_not_reacted(&mut self, p: Coord, q: Coord) {
        self.not_reacted.insert((p, q));
    }

    /// `(p, q) ∈ not_reacted` or `(q, p) ∈ not_reacted`.
    pub fn is_not_reacted(&self, p: Coord, q: Coord) -> bool {
        self.not_reacted.contains(&(p, q)) || self.not_reacted.contains(&(q, p))
    }

    /// Record `a` and `b` as a bonded intermediate pair (symmetric).
    pub fn pair_intermediates(&mut self, a: Coord, b: Coord) {
        self.intermediate_pairs.insert(a, b);
        self.intermediate_pairs.insert(b, a);
    }

    /// Remove the bond between `a` and `b`, whichever side it's stored
    /// under.
    pub fn unpair_intermediates(&mut self, a: Coord, b: Coord) {
        self.intermediate_pairs.remove(&a);
        self.intermediate_pairs.remove(&b);
    }

    pub fn partner_of(&self, c: Coord) -> Option<Coord> {
        self.intermediate_pairs.get(&c).copied()
    }

    pub fn is_paired_with(&self, a: Coord, b: Coord) -> bool {
        self.partner_of(a) == Some(b)
    }

    pub fn intermediate_pair_count(&self) -> usize {
        self.intermediate_pairs.len()
    }

    /// Every pairing is supposed to be mutual (`a -> b` implies `b -> a`).
    /// Returns the first coordinate pair found where that breaks, if any.
    pub fn first_asymmetric_pair(&self) -> Option<(Coord, Coord)> {
        self.intermediate_pairs
            .iter()
            .find(|&(&a, &b)| self.intermediate_pairs.get(&b) != Some(&a))
            .map(|(&a, &b)| (a, b))
    }
}
