//! Simulation configuration.
//!
//! [`SimConfig`] holds every parameter that shapes a simulation. It is built
//! once at start-up and handed to [`Population::new`](crate::Population::new);
//! nothing in the engine reads global constants.

use crate::error::{Result, SimError};

/// Largest supported alphabet: alleles display as the letters `A..=Z`.
pub const MAX_ALLELES: u8 = 26;

/// Truncation-selection policy: how many genomes survive each generation.
///
/// The two policies diverge at small population sizes. A rate scales with
/// the population, a count does not.
///
/// # Examples
///
/// ```
/// use genetic_demo::Elitism;
///
/// assert_eq!(Elitism::Rate(0.5).survivors(100), 50);
/// assert_eq!(Elitism::Rate(0.5).survivors(3), 2); // 1.5 rounds up
/// assert_eq!(Elitism::Count(10).survivors(4), 3); // clamped to size - 1
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Elitism {
    /// Fraction of the population that survives, rounded to nearest.
    Rate(f64),

    /// Absolute number of survivors, independent of population size.
    Count(usize),
}

impl Default for Elitism {
    fn default() -> Self {
        Elitism::Rate(0.5)
    }
}

impl Elitism {
    /// Number of survivors for a population of `size` genomes.
    ///
    /// Always in `[1, size - 1]`: at least one parent remains and at least
    /// one slot is left for offspring.
    ///
    /// # Panics
    /// Panics if `size < 2`.
    pub fn survivors(&self, size: usize) -> usize {
        assert!(size >= 2, "population size must be at least 2");
        let raw = match *self {
            Elitism::Rate(rate) => (size as f64 * rate).round() as usize,
            Elitism::Count(count) => count,
        };
        raw.clamp(1, size - 1)
    }
}

/// Configuration for a simulation.
///
/// # Defaults
///
/// The defaults reproduce the classic demo: 32 loci, 4 alleles, 100
/// genomes, half the population surviving, one expected mutation per
/// genome per generation.
///
/// ```
/// use genetic_demo::SimConfig;
///
/// let config = SimConfig::default();
/// assert_eq!(config.genome_length, 32);
/// assert_eq!(config.population_size, 100);
/// assert!((config.effective_mutation_rate() - 1.0 / 32.0).abs() < 1e-12);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use genetic_demo::{Elitism, SimConfig};
///
/// let config = SimConfig::default()
///     .with_genome_length(8)
///     .with_alleles(2)
///     .with_population_size(20)
///     .with_elitism(Elitism::Count(5))
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Number of loci per genome (L). Fixed for the simulation.
    pub genome_length: usize,

    /// Number of distinct allele values (K). Valid range: 1–26.
    ///
    /// With a single allele no mutation is possible and the mutation pass
    /// is skipped.
    pub alleles: u8,

    /// Number of genomes in the population. Must be at least 2.
    pub population_size: usize,

    /// Truncation-selection policy.
    pub elitism: Elitism,

    /// Per-locus mutation probability for each offspring (0.0–1.0).
    ///
    /// `None` means `1 / genome_length`, one expected mutation per genome
    /// per generation.
    pub mutation_rate: Option<f64>,

    /// Whether offspring come from two-parent uniform crossover.
    ///
    /// When disabled (or when only one genome survives selection),
    /// offspring are mutated clones of a single parent.
    pub crossover: bool,

    /// Whether every row of the fitness matrix is guaranteed a 1.0 cell.
    pub guarantee_max: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            genome_length: 32,
            alleles: 4,
            population_size: 100,
            elitism: Elitism::default(),
            mutation_rate: None,
            crossover: true,
            guarantee_max: true,
            seed: None,
        }
    }
}

impl SimConfig {
    /// Sets the genome length.
    pub fn with_genome_length(mut self, n: usize) -> Self {
        self.genome_length = n;
        self
    }

    /// Sets the number of allele values.
    pub fn with_alleles(mut self, k: u8) -> Self {
        self.alleles = k;
        self
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the elitism policy.
    pub fn with_elitism(mut self, elitism: Elitism) -> Self {
        self.elitism = elitism;
        self
    }

    /// Sets an explicit per-locus mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = Some(rate.clamp(0.0, 1.0));
        self
    }

    /// Enables or disables two-parent crossover.
    pub fn with_crossover(mut self, crossover: bool) -> Self {
        self.crossover = crossover;
        self
    }

    /// Enables or disables the per-locus 1.0 guarantee.
    pub fn with_guarantee_max(mut self, guarantee_max: bool) -> Self {
        self.guarantee_max = guarantee_max;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The per-locus mutation probability actually used.
    pub fn effective_mutation_rate(&self) -> f64 {
        self.mutation_rate
            .unwrap_or(1.0 / self.genome_length.max(1) as f64)
    }

    /// Number of genomes that survive truncation selection.
    ///
    /// # Panics
    /// Panics if `population_size < 2`; call [`validate`](Self::validate) first.
    pub fn survivors(&self) -> usize {
        self.elitism.survivors(self.population_size)
    }

    /// Validates the configuration.
    ///
    /// Returns [`SimError::Config`] describing the first out-of-range field.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(SimError::Config(
                "population_size must be at least 2".into(),
            ));
        }
        if self.genome_length == 0 {
            return Err(SimError::Config("genome_length must be at least 1".into()));
        }
        if self.alleles == 0 || self.alleles > MAX_ALLELES {
            return Err(SimError::Config(format!(
                "alleles must be in [1, {MAX_ALLELES}], got {}",
                self.alleles
            )));
        }
        if let Some(rate) = self.mutation_rate {
            if !(0.0..=1.0).contains(&rate) {
                return Err(SimError::Config(format!(
                    "mutation_rate must be in [0, 1], got {rate}"
                )));
            }
        }
        match self.elitism {
            Elitism::Rate(rate) if !(0.0..=1.0).contains(&rate) => {
                return Err(SimError::Config(format!(
                    "elitism rate must be in [0, 1], got {rate}"
                )));
            }
            Elitism::Count(count) if count == 0 || count >= self.population_size => {
                return Err(SimError::Config(format!(
                    "elitism count must be in [1, {}], got {count}",
                    self.population_size - 1
                )));
            }
            _ => {}
        }
        Ok(())
    }
}
