//! Fixed-length symbolic genomes.
//!
//! A [`Genome`] is immutable once built. Offspring receive their single
//! mutation pass inside the constructor; founders are never mutated.

use crate::config::SimConfig;
use crate::operators::{random_alleles, substitution_mutation, uniform_crossover};
use rand::Rng;
use std::fmt;

/// Mutation settings applied to every offspring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MutationParams {
    /// Alphabet size K.
    pub alleles: u8,

    /// Per-locus mutation probability.
    pub rate: f64,
}

impl MutationParams {
    /// Derives the mutation settings from a simulation config.
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            alleles: config.alleles,
            rate: config.effective_mutation_rate(),
        }
    }
}

/// A candidate solution: one allele index per locus plus the generation
/// in which it was created.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Genome {
    alleles: Vec<u8>,
    birth_generation: usize,
}

impl Genome {
    /// Creates a founder with uniformly random alleles in `[0, alleles)`.
    pub fn random<R: Rng>(length: usize, alleles: u8, generation: usize, rng: &mut R) -> Self {
        Self {
            alleles: random_alleles(length, alleles, rng),
            birth_generation: generation,
        }
    }

    /// Creates a genome from explicit allele indices.
    pub fn from_alleles(alleles: Vec<u8>, generation: usize) -> Self {
        Self {
            alleles,
            birth_generation: generation,
        }
    }

    /// Asexual reproduction: a copy of `parent` followed by one mutation pass.
    pub fn from_parent<R: Rng>(
        parent: &Genome,
        generation: usize,
        mutation: MutationParams,
        rng: &mut R,
    ) -> Self {
        Self::offspring(parent.alleles.clone(), generation, mutation, rng)
    }

    /// Sexual reproduction: uniform crossover of two parents followed by one
    /// mutation pass.
    ///
    /// The same genome may be passed as both parents.
    ///
    /// # Panics
    /// Panics if the parents have different lengths.
    pub fn from_parents<R: Rng>(
        parent1: &Genome,
        parent2: &Genome,
        generation: usize,
        mutation: MutationParams,
        rng: &mut R,
    ) -> Self {
        let alleles = uniform_crossover(&parent1.alleles, &parent2.alleles, rng);
        Self::offspring(alleles, generation, mutation, rng)
    }

    fn offspring<R: Rng>(
        mut alleles: Vec<u8>,
        generation: usize,
        mutation: MutationParams,
        rng: &mut R,
    ) -> Self {
        let mutated = substitution_mutation(&mut alleles, mutation.alleles, mutation.rate, rng);
        log::trace!("offspring for generation {generation}: {mutated} mutation(s)");
        Self {
            alleles,
            birth_generation: generation,
        }
    }

    /// Number of loci.
    pub fn len(&self) -> usize {
        self.alleles.len()
    }

    /// Returns `true` if the genome has no loci.
    pub fn is_empty(&self) -> bool {
        self.alleles.is_empty()
    }

    /// Allele index at `locus`.
    ///
    /// # Panics
    /// Panics if `locus >= self.len()`.
    pub fn allele(&self, locus: usize) -> u8 {
        self.alleles[locus]
    }

    /// All allele indices in locus order.
    pub fn alleles(&self) -> &[u8] {
        &self.alleles
    }

    /// Generation in which this genome was created.
    pub fn birth_generation(&self) -> usize {
        self.birth_generation
    }
}

/// Maps an allele index to its display letter (`0 → 'A'`).
pub fn allele_symbol(allele: u8) -> char {
    char::from(b'A' + allele)
}

impl fmt::Display for Genome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &allele in &self.alleles {
            write!(f, "{}", allele_symbol(allele))?;
        }
        Ok(())
    }
}
