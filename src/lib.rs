//! Generational genetic algorithm demo.
//!
//! A population of fixed-length symbolic genomes evolves on a randomized
//! fitness landscape:
//!
//! - **Fitness model**: [`FitnessMatrix`], an `L × K` table of per-locus
//!   allele contributions in `[0, 1]`; a genome's fitness is their mean.
//! - **Genomes**: [`Genome`], built by random initialization, mutated
//!   cloning, or uniform crossover followed by mutation.
//! - **Population**: [`Population`], which runs truncation selection,
//!   propagation and re-ranking each generation and tracks [`Statistics`].
//!
//! Every random draw comes from one seeded RNG owned by the population, so
//! a fixed [`SimConfig::seed`] reproduces a run exactly.
//!
//! # Example
//!
//! ```
//! use genetic_demo::{Elitism, Population, SimConfig};
//!
//! let config = SimConfig::default()
//!     .with_genome_length(16)
//!     .with_population_size(50)
//!     .with_elitism(Elitism::Rate(0.3))
//!     .with_seed(7);
//!
//! let mut population = Population::new(&config).unwrap();
//! population.advance(25).unwrap();
//! assert_eq!(population.generation(), 25);
//! ```
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Mühlenbein & Schlierkamp-Voosen (1993), "Predictive Models for the
//!   Breeder Genetic Algorithm" (truncation selection)

pub mod command;
pub mod config;
pub mod error;
pub mod fitness;
pub mod genome;
pub mod operators;
pub mod population;
pub mod random;
pub mod stats;

pub use config::{Elitism, SimConfig};
pub use error::{Result, SimError};
pub use fitness::FitnessMatrix;
pub use genome::{Genome, MutationParams};
pub use population::{GenerationStats, GenomeRecord, Population, Summary};
pub use stats::Statistics;
