//! Parameter tables: per-species mobility, pair affinity/break probability,
//! reaction definitions, and the rotation spec — all precomputed once from
//! user input and treated as read-only for the duration of a run.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{CaError, Result};
use crate::species::{self, Code};

/// One lattice species: a name (A-Z), a molar fraction (0-100), and an
/// opaque display color the engine never interprets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: char,
    pub molar_fraction: f64,
    pub color: String,
}

impl Ingredient {
    pub fn new(name: char, molar_fraction: f64, color: impl Into<String>) -> Self {
        Self {
            name,
            molar_fraction,
            color: color.into(),
        }
    }
}

/// A single `J` (affinity) table entry as supplied by the caller, keyed by an
/// unordered pair relation string such as `"A|B"` (or a rotation-aware form
/// like `"A1|B"`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JEntry {
    pub relation: String,
    pub value: f64,
}

/// A symmetric pair table keyed by `"X|Y"` strings; lookup tries both
/// orderings. Missing entries default per the caller-supplied `default`.
#[derive(Debug, Clone, Default)]
pub struct PairTable {
    entries: HashMap<String, f64>,
}

impl PairTable {
    pub fn from_entries(entries: &[JEntry]) -> Self {
        let mut map = HashMap::with_capacity(entries.len());
        for e in entries {
            map.insert(e.relation.clone(), e.value);
        }
        Self { entries: map }
    }

    pub fn get(&self, left: &str, right: &str, default: f64) -> f64 {
        let fwd = format!("{left}|{right}");
        if let Some(v) = self.entries.get(&fwd) {
            return *v;
        }
        let rev = format!("{right}|{left}");
        if let Some(v) = self.entries.get(&rev) {
            return *v;
        }
        default
    }

    pub fn insert(&mut self, left: &str, right: &str, value: f64) {
        self.entries.insert(format!("{left}|{right}"), value);
    }
}

/// The designated rotatable species (at most one per simulation) and its
/// rotation probability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotationSpec {
    /// `None` (or the string `"None"`/empty on the wire) means no species
    /// rotates in this run.
    pub component: Option<char>,
    pub prot: f64,
}

impl RotationSpec {
    pub fn none() -> Self {
        Self {
            component: None,
            prot: 0.0,
        }
    }
}

/// A reaction between an ordered reactant pair and an ordered product pair,
/// optionally passing through a transient intermediate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reaction {
    pub reactants: [char; 2],
    pub products: [char; 2],
    /// `[forward, forward_from_intermediate]`.
    pub pr: [f64; 2],
    /// `[reverse, reverse_from_intermediate]`.
    pub reverse_pr: [f64; 2],
    pub has_intermediate: bool,
}

/// Precomputed, read-only parameter tables for one simulation run.
#[derive(Debug, Clone)]
pub struct Parameters {
    /// Letter of species at 1-based index `i-1`.
    letters: Vec<char>,
    /// Self-mobility `Pm[species_index - 1]`.
    pub pm: Vec<f64>,
    pub j: PairTable,
    pub pb: PairTable,
    pub reactions: Vec<Reaction>,
    pub rotation: RotationSpec,
}

impl Parameters {
    pub fn build(
        ingredients: &[Ingredient],
        pm: Vec<f64>,
        j_entries: &[JEntry],
        reactions: Vec<Reaction>,
        rotation: RotationSpec,
    ) -> Result<Self> {
        if pm.len() != ingredients.len() {
            return Err(CaError::Validation(format!(
                "Pm has {} entries but there are {} ingredients",
                pm.len(),
                ingredients.len()
            )));
        }
        for ing in ingredients {
            if !ing.name.is_ascii_uppercase() {
                return Err(CaError::Validation(format!(
                    "ingredient name '{}' is not an uppercase letter A-Z",
                    ing.name
                )));
            }
        }
        let letters: Vec<char> = ingredients.iter().map(|i| i.name).collect();
        for reaction in &reactions {
            for &letter in reaction.reactants.iter().chain(reaction.products.iter()) {
                if !letters.contains(&letter) {
                    return Err(CaError::Validation(format!(
                        "reaction references species '{letter}', which is not in the ingredient list"
                    )));
                }
            }
        }
        let j = PairTable::from_entries(j_entries);
        let pb = derive_pb(&j);

        Ok(Self {
            letters,
            pm,
            j,
            pb,
            reactions,
            rotation,
        })
    }

    pub fn species_count(&self) -> usize {
        self.letters.len()
    }

    pub fn letter(&self, species_index: usize) -> char {
        self.letters[species_index - 1]
    }

    pub fn species_index_of(&self, letter: char) -> Option<usize> {
        self.letters.iter().position(|&l| l == letter).map(|i| i + 1)
    }

    /// 1-based species index of the designated rotatable species, if any.
    pub fn rotatable_species(&self) -> Option<usize> {
        self.rotation
            .component
            .and_then(|c| self.species_index_of(c))
    }

    /// Build the rotation-aware label part for one side of a pair lookup.
    ///
    /// `focal_side` selects which face convention applies: the side the
    /// direction `d` points *from* uses the direct convention (face 1 iff
    /// the rotation state equals `d`), the side `d` points *to* uses the
    /// opposing-face convention (face 1 iff `|state - d| == 2`).
    pub fn label_part(&self, code: Code, direction: usize, focal_side: bool) -> String {
        if species::is_rotation(code) {
            let (r, k) = species::rotation_parts(code);
            let state = (k - 1) as isize;
            let d = direction as isize;
            let face = if focal_side {
                if state == d {
                    1
                } else {
                    2
                }
            } else if (state - d).abs() == 2 {
                1
            } else {
                2
            };
            format!("{}{}", self.letter(r), face)
        } else {
            debug_assert!(species::is_plain(code));
            self.letter(species::plain_species(code)).to_string()
        }
    }

    /// Affinity `J` between two occupied, non-intermediate cells, looked up
    /// via rotation-aware labels. `direction` is the index from `code_a` to
    /// `code_b`.
    pub fn affinity(&self, code_a: Code, code_b: Code, direction: usize) -> f64 {
        let left = self.label_part(code_a, direction, true);
        let right = self.label_part(code_b, direction, false);
        self.j.get(&left, &right, 0.0)
    }

    /// Break probability between two occupied, non-intermediate cells.
    pub fn break_probability(&self, code_a: Code, code_b: Code, direction: usize) -> f64 {
        let left = self.label_part(code_a, direction, true);
        let right = self.label_part(code_b, direction, false);
        self.pb.get(&left, &right, 1.0)
    }
}

/// `Pb[p] = 1.5 / (J[p] + 1.5)` for every entry present in `j`.
fn derive_pb(j: &PairTable) -> PairTable {
    let mut pb = PairTable::default();
    for (relation, value) in j.entries.iter() {
        let derived = 1.5 / (value + 1.5);
        pb.entries.insert(relation.clone(), derived);
    }
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingredients(names: &[char]) -> Vec<Ingredient> {
        names.iter().map(|&n| Ingredient::new(n, 0.0, "#fff")).collect()
    }

    #[test]
    fn pb_formula() {
        let j = PairTable::from_entries(&[
            JEntry {
                relation: "A|B".into(),
                value: 1.0,
            },
            JEntry {
                relation: "B|C".into(),
                value: 2.0,
            },
        ]);
        let pb = derive_pb(&j);
        assert!((pb.get("A", "B", 1.0) - 0.6).abs() < 1e-12);
        assert!((pb.get("B", "C", 1.0) - 0.42857142857142855).abs() < 1e-12);
    }

    #[test]
    fn missing_pair_defaults() {
        let j = PairTable::default();
        assert_eq!(j.get("A", "B", 0.0), 0.0);
        let pb = derive_pb(&j);
        assert_eq!(pb.get("A", "B", 1.0), 1.0);
    }

    #[test]
    fn pm_length_mismatch_is_validation_error() {
        let ings = ingredients(&['A', 'B']);
        let err = Parameters::build(&ings, vec![1.0], &[], vec![], RotationSpec::none());
        assert!(err.is_err());
    }

    #[test]
    fn reaction_with_unknown_species_is_validation_error() {
        let ings = ingredients(&['A', 'B']);
        let reaction = Reaction {
            reactants: ['A', 'B'],
            products: ['A', 'C'],
            pr: [1.0, 1.0],
            reverse_pr: [0.0, 0.0],
            has_intermediate: false,
        };
        let err = Parameters::build(&ings, vec![1.0, 1.0], &[], vec![reaction], RotationSpec::none());
        assert!(matches!(err, Err(CaError::Validation(_))));
    }

    #[test]
    fn lookup_tries_both_orderings() {
        let ings = ingredients(&['A', 'B']);
        let j = vec![JEntry {
            relation: "B|A".into(),
            value: 0.5,
        }];
        let params = Parameters::build(&ings, vec![1.0, 1.0], &j, vec![], RotationSpec::none())
            .unwrap();
        assert_eq!(params.affinity(1, 2, 3), 0.5);
    }
}
