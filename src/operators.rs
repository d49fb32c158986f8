//! Genetic operators on symbolic allele sequences.
//!
//! These operate on `&[u8]` ordinal slices, where each value is an allele
//! index in `[0, K)`. [`Genome`](crate::Genome) builds on them; they are
//! exposed so that callers can test or reuse the raw operators.
//!
//! # Operators
//!
//! - [`random_alleles`]: independent uniform draws per locus
//! - [`uniform_crossover`]: one fair coin per locus, O(n)
//! - [`substitution_mutation`]: per-locus substitution that always changes
//!   the allele, O(n) expected
//!
//! # References
//!
//! - Syswerda (1989), "Uniform Crossover in Genetic Algorithms"
//! - Bäck (1993), "Optimal Mutation Rates in Genetic Search"

use rand::Rng;

/// Draws `length` alleles independently and uniformly from `[0, alleles)`.
///
/// # Panics
/// Panics if `alleles == 0`.
pub fn random_alleles<R: Rng>(length: usize, alleles: u8, rng: &mut R) -> Vec<u8> {
    assert!(alleles > 0, "alphabet must not be empty");
    (0..length).map(|_| rng.random_range(0..alleles)).collect()
}

/// Uniform crossover: each locus takes its allele from `parent1` or
/// `parent2` with equal probability, independently of every other locus.
///
/// # Panics
/// Panics if parents have different lengths.
pub fn uniform_crossover<R: Rng>(parent1: &[u8], parent2: &[u8], rng: &mut R) -> Vec<u8> {
    assert_eq!(
        parent1.len(),
        parent2.len(),
        "parents must have equal length"
    );

    parent1
        .iter()
        .zip(parent2)
        .map(|(&a, &b)| if rng.random_bool(0.5) { a } else { b })
        .collect()
}

/// Substitution mutation.
///
/// Each locus mutates with probability `rate`. A mutated locus receives a
/// value drawn uniformly from `[0, alleles)`, redrawn until it differs from
/// the current one, so every triggered mutation changes the sequence.
///
/// Does nothing when `alleles < 2`: there is no alternative value.
///
/// Returns the number of loci that changed.
pub fn substitution_mutation<R: Rng>(
    genes: &mut [u8],
    alleles: u8,
    rate: f64,
    rng: &mut R,
) -> usize {
    if alleles < 2 {
        return 0;
    }

    let mut mutated = 0;
    for gene in genes.iter_mut() {
        if rng.random_range(0.0..1.0) < rate {
            *gene = loop {
                let candidate = rng.random_range(0..alleles);
                if candidate != *gene {
                    break candidate;
                }
            };
            mutated += 1;
        }
    }
    mutated
}
