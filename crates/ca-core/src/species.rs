//! Species encoding: a single integer distinguishes empty / plain /
//! rotation-state / intermediate cells by range.
//!
//! - `0` = empty
//! - `1..=10` = plain species (species index = code)
//! - `10 < code < 200` = rotation-state `k` of species `r`, where
//!   `code = 10*r + k`, `k in 1..=4`
//! - `code > 200` = intermediate; for a reactant pair `(a, b)` the two
//!   intermediate codes are `(a+b)*100 + a*10` and `(a+b)*100 + b*10`

pub type Code = i16;

pub const EMPTY: Code = 0;

#[inline]
pub fn is_empty(code: Code) -> bool {
    code == 0
}

#[inline]
pub fn is_plain(code: Code) -> bool {
    code > 0 && code <= 10
}

#[inline]
pub fn is_rotation(code: Code) -> bool {
    code > 10 && code < 200
}

#[inline]
pub fn is_intermediate(code: Code) -> bool {
    code > 200
}

#[inline]
pub fn is_occupied(code: Code) -> bool {
    code > 0
}

/// Species index (1-based) of a plain cell. Panics if `code` is not plain;
/// callers must check `is_plain` first, as with the other decomposition
/// helpers here.
#[inline]
pub fn plain_species(code: Code) -> usize {
    debug_assert!(is_plain(code));
    code as usize
}

/// `(species_index, face)` of a rotation-state cell, `face in 1..=4`.
#[inline]
pub fn rotation_parts(code: Code) -> (usize, u8) {
    debug_assert!(is_rotation(code));
    let r = code / 10;
    let k = code % 10;
    (r as usize, k as u8)
}

/// Build a rotation-state code for species `r` at face `k` (`k in 1..=4`).
#[inline]
pub fn rotation_code(species_index: usize, face: u8) -> Code {
    debug_assert!((1..=4).contains(&face));
    (species_index as Code) * 10 + face as Code
}

/// Intermediate codes `[I0, I1]` for a reactant pair `(a, b)` (species
/// indices, 1-based).
#[inline]
pub fn intermediate_codes(a: usize, b: usize) -> [Code; 2] {
    let base = (a + b) as Code * 100;
    [base + a as Code * 10, base + b as Code * 10]
}

/// Species index (1-based) of a plain or rotation-state cell, whichever it
/// is. Panics on empty or intermediate codes, which have no single species
/// index (movement and self-mobility lookups only apply to the other two
/// classes).
#[inline]
pub fn plain_or_rotation_species(code: Code) -> usize {
    if is_plain(code) {
        plain_species(code)
    } else {
        let (r, _) = rotation_parts(code);
        r
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_predicates_partition_the_range() {
        assert!(is_empty(0));
        assert!(is_plain(1) && is_plain(10));
        assert!(is_rotation(11) && is_rotation(194));
        assert!(is_intermediate(201));
        assert!(!is_occupied(0));
        assert!(is_occupied(1) && is_occupied(201));
    }

    #[test]
    fn rotation_round_trip() {
        let code = rotation_code(3, 2);
        assert!(is_rotation(code));
        assert_eq!(rotation_parts(code), (3, 2));
    }

    #[test]
    fn intermediate_codes_formula() {
        // reactants A=1, B=2: (1+2)*100 + 1*10 = 310, + 2*10 = 320
        assert_eq!(intermediate_codes(1, 2), [310, 320]);
    }

    #[test]
    fn plain_or_rotation_species_covers_both_classes() {
        assert_eq!(plain_or_rotation_species(4), 4);
        assert_eq!(plain_or_rotation_species(rotation_code(4, 3)), 4);
    }
}
