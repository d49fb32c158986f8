//! Population lifecycle and the generational loop.
//!
//! [`Population`] orchestrates one simulation:
//! initialization → (selection → propagation → re-ranking) × N → statistics.
//!
//! Between public calls the population is always *stable*: members are
//! sorted by descending fitness and the cached [`Statistics`] are current.

use crate::config::SimConfig;
use crate::error::{Result, SimError};
use crate::fitness::FitnessMatrix;
use crate::genome::{Genome, MutationParams};
use crate::random::{create_rng, resolve_seed};
use crate::stats::{median, Statistics};
use rand::rngs::StdRng;
use rand::Rng;

/// A genome paired with its cached fitness.
///
/// Genomes never change after construction, so the cache never goes stale.
#[derive(Debug, Clone)]
struct Member {
    genome: Genome,
    fitness: f64,
}

/// Progress snapshot handed to [`Population::advance_with`] observers.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// Generation that just completed.
    pub generation: usize,

    /// Highest fitness in the population.
    pub best: f64,

    /// Median fitness of the population.
    pub median: f64,
}

/// Headline figures for the current generation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Summary {
    /// Number of completed generations.
    pub generation: usize,

    /// Number of genomes.
    pub size: usize,

    /// Fitness statistics over all genomes.
    pub statistics: Statistics,
}

/// One row of the detailed report.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenomeRecord {
    /// 1-based position in the current ranking.
    pub rank: usize,

    /// Alleles rendered as letters.
    pub genome: String,

    /// Normalized fitness.
    pub fitness: f64,

    /// Generation in which the genome was created.
    pub birth_generation: usize,
}

/// A fixed-size population evolving on a random fitness landscape.
///
/// # Usage
///
/// ```
/// use genetic_demo::{Population, SimConfig};
///
/// let config = SimConfig::default().with_population_size(20).with_seed(42);
/// let mut population = Population::new(&config).unwrap();
/// population.advance(10).unwrap();
///
/// let summary = population.summary();
/// assert_eq!(summary.generation, 10);
/// assert_eq!(summary.size, 20);
/// assert!(summary.statistics.stddev >= 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct Population {
    config: SimConfig,
    fitness: FitnessMatrix,
    members: Vec<Member>,
    generation: usize,
    statistics: Statistics,
    rng: StdRng,
}

impl Population {
    /// Creates a population of `config.population_size` random founders.
    ///
    /// The RNG is seeded from `config.seed`, or from a fresh random seed
    /// (logged at info level) when none is configured.
    ///
    /// Returns [`SimError::Config`] if the configuration is out of range.
    pub fn new(config: &SimConfig) -> Result<Self> {
        config.validate()?;
        let seed = resolve_seed(config.seed);
        log::info!("seeding simulation with {seed}");
        Ok(Self::build(config.clone(), create_rng(seed)))
    }

    /// Creates a population drawing every random value from `rng`.
    ///
    /// Returns [`SimError::Config`] if the configuration is out of range.
    pub fn with_rng(config: &SimConfig, rng: StdRng) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config.clone(), rng))
    }

    fn build(config: SimConfig, mut rng: StdRng) -> Self {
        let fitness = FitnessMatrix::random(
            config.genome_length,
            config.alleles,
            config.guarantee_max,
            &mut rng,
        );

        let members = (0..config.population_size)
            .map(|_| {
                let genome = Genome::random(config.genome_length, config.alleles, 0, &mut rng);
                score(&fitness, genome)
            })
            .collect();

        let mut population = Self {
            config,
            fitness,
            members,
            generation: 0,
            statistics: Statistics::default(),
            rng,
        };
        population.sort();
        population.refresh_statistics();

        log::info!(
            "created population of {} genomes (L={}, K={}, survivors={})",
            population.config.population_size,
            population.config.genome_length,
            population.config.alleles,
            population.config.survivors(),
        );
        population
    }

    /// Discards every genome and the fitness landscape and starts over with
    /// the same configuration.
    ///
    /// Nothing of the old population survives except its configuration and
    /// RNG stream, so a seeded process replays identically across resets.
    pub fn reset(&mut self) {
        log::info!("resetting simulation at generation {}", self.generation);
        *self = Self::build(self.config.clone(), self.rng.clone());
    }

    /// Advances the simulation by `generations` generations.
    ///
    /// Returns [`SimError::InvalidParameter`] without touching any state if
    /// `generations` is zero.
    pub fn advance(&mut self, generations: usize) -> Result<()> {
        self.advance_with(generations, |_| {})
    }

    /// Like [`advance`](Self::advance), calling `observer` after every
    /// generation with the best and median fitness.
    ///
    /// Full statistics are recomputed once, after the last generation.
    pub fn advance_with<F>(&mut self, generations: usize, mut observer: F) -> Result<()>
    where
        F: FnMut(&GenerationStats),
    {
        if generations == 0 {
            return Err(SimError::InvalidParameter(generations.to_string()));
        }

        log::debug!(
            "advancing {generations} generation(s) from generation {}",
            self.generation
        );

        for _ in 0..generations {
            self.step();

            let values: Vec<f64> = self.members.iter().map(|m| m.fitness).collect();
            let progress = GenerationStats {
                generation: self.generation,
                best: self.members[0].fitness,
                median: median(&values),
            };
            log::trace!(
                "generation {}: best {:.4}, median {:.4}",
                progress.generation,
                progress.best,
                progress.median
            );
            observer(&progress);
        }

        self.refresh_statistics();
        log::debug!(
            "generation {}: max {:.4}, mean {:.4}, sd {:.4}",
            self.generation,
            self.statistics.max,
            self.statistics.mean,
            self.statistics.stddev
        );
        Ok(())
    }

    /// One generation: select, propagate, re-rank.
    fn step(&mut self) {
        self.generation += 1;

        let survivors = self.select();
        let offspring = propagate(
            &self.members[..survivors],
            self.config.population_size - survivors,
            self.config.crossover,
            self.generation,
            MutationParams::from_config(&self.config),
            &self.fitness,
            &mut self.rng,
        );

        self.members.truncate(survivors);
        self.members.extend(offspring);
        assert_eq!(
            self.members.len(),
            self.config.population_size,
            "population size drifted"
        );

        self.sort();
    }

    /// Truncation selection: the number of top-ranked members that survive.
    fn select(&self) -> usize {
        self.config.survivors()
    }

    /// Stable sort by descending fitness.
    ///
    /// Equal fitness keeps the previous relative order, so survivors stay
    /// ahead of offspring that tie with them.
    fn sort(&mut self) {
        self.members.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
    }

    fn refresh_statistics(&mut self) {
        let values: Vec<f64> = self.members.iter().map(|m| m.fitness).collect();
        self.statistics = Statistics::from_values(&values);
    }

    // ---- Read-only accessors ----

    /// Number of completed generations.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Number of genomes (constant for the simulation).
    pub fn size(&self) -> usize {
        self.members.len()
    }

    /// Cached statistics for the current generation.
    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// The configuration this population was built with.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// The fitness landscape.
    pub fn fitness_matrix(&self) -> &FitnessMatrix {
        &self.fitness
    }

    /// Genomes with their fitness, best first.
    pub fn genomes(&self) -> impl Iterator<Item = (&Genome, f64)> + '_ {
        self.members.iter().map(|m| (&m.genome, m.fitness))
    }

    /// The fittest genome and its fitness.
    pub fn best(&self) -> (&Genome, f64) {
        let top = &self.members[0];
        (&top.genome, top.fitness)
    }

    /// Generation number, size and statistics.
    pub fn summary(&self) -> Summary {
        Summary {
            generation: self.generation,
            size: self.size(),
            statistics: self.statistics,
        }
    }

    /// Every genome in rank order.
    pub fn detail(&self) -> Vec<GenomeRecord> {
        self.members
            .iter()
            .enumerate()
            .map(|(i, m)| GenomeRecord {
                rank: i + 1,
                genome: m.genome.to_string(),
                fitness: m.fitness,
                birth_generation: m.genome.birth_generation(),
            })
            .collect()
    }
}

fn score(fitness: &FitnessMatrix, genome: Genome) -> Member {
    let value = fitness.evaluate(&genome);
    Member {
        genome,
        fitness: value,
    }
}

/// Breeds `count` offspring from the survivor pool.
///
/// With crossover and at least two survivors, both parents are drawn
/// uniformly with replacement. Otherwise each offspring is a mutated clone
/// of one uniformly drawn survivor.
fn propagate<R: Rng>(
    pool: &[Member],
    count: usize,
    crossover: bool,
    generation: usize,
    mutation: MutationParams,
    fitness: &FitnessMatrix,
    rng: &mut R,
) -> Vec<Member> {
    assert!(!pool.is_empty(), "cannot propagate from an empty pool");
    let n = pool.len();

    (0..count)
        .map(|_| {
            let genome = if crossover && n > 1 {
                let p1 = &pool[rng.random_range(0..n)].genome;
                let p2 = &pool[rng.random_range(0..n)].genome;
                Genome::from_parents(p1, p2, generation, mutation, rng)
            } else {
                let parent = &pool[rng.random_range(0..n)].genome;
                Genome::from_parent(parent, generation, mutation, rng)
            };
            score(fitness, genome)
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Elitism;
    use proptest::prelude::*;

    fn small_config() -> SimConfig {
        SimConfig::default()
            .with_genome_length(16)
            .with_alleles(4)
            .with_population_size(30)
            .with_seed(42)
    }

    fn assert_sorted(population: &Population) {
        let fitness: Vec<f64> = population.genomes().map(|(_, f)| f).collect();
        for window in fitness.windows(2) {
            assert!(
                window[0] >= window[1],
                "population not sorted: {} < {}",
                window[0],
                window[1]
            );
        }
    }

    #[test]
    fn test_construction() {
        let population = Population::new(&small_config()).unwrap();
        assert_eq!(population.generation(), 0);
        assert_eq!(population.size(), 30);
        assert!(population.genomes().all(|(g, _)| g.birth_generation() == 0));
        assert!(population.genomes().all(|(g, _)| g.len() == 16));
        assert_sorted(&population);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = small_config().with_population_size(1);
        assert!(matches!(Population::new(&config), Err(SimError::Config(_))));
    }

    #[test]
    fn test_cached_fitness_matches_matrix() {
        let mut population = Population::new(&small_config()).unwrap();
        population.advance(5).unwrap();
        let matrix = population.fitness_matrix();
        for (genome, fitness) in population.genomes() {
            assert_eq!(matrix.evaluate(genome), fitness);
        }
    }

    #[test]
    fn test_statistics_match_members() {
        let mut population = Population::new(&small_config()).unwrap();
        population.advance(3).unwrap();
        let values: Vec<f64> = population.genomes().map(|(_, f)| f).collect();
        assert_eq!(*population.statistics(), Statistics::from_values(&values));
        assert_eq!(population.statistics().max, population.best().1);
    }

    #[test]
    fn test_advance_zero_rejected_and_state_unchanged() {
        let mut population = Population::new(&small_config()).unwrap();
        population.advance(2).unwrap();
        let before = population.detail();
        let summary = population.summary();

        let err = population.advance(0).unwrap_err();
        assert!(matches!(err, SimError::InvalidParameter(_)));
        assert_eq!(population.generation(), 2);
        assert_eq!(population.detail(), before);
        assert_eq!(population.summary(), summary);
    }

    #[test]
    fn test_advance_sorted_and_sized() {
        let mut population = Population::new(&small_config()).unwrap();
        for _ in 0..10 {
            population.advance(1).unwrap();
            assert_eq!(population.size(), 30);
            assert_sorted(&population);
        }
        assert_eq!(population.generation(), 10);
    }

    #[test]
    fn test_offspring_stamped_with_generation() {
        let mut population = Population::new(&small_config()).unwrap();
        population.advance(4).unwrap();
        assert!(population
            .genomes()
            .all(|(g, _)| g.birth_generation() <= 4));
        // 15 of 30 slots are refilled each generation.
        let newborn = population
            .genomes()
            .filter(|(g, _)| g.birth_generation() == 4)
            .count();
        assert_eq!(newborn, 15);
    }

    #[test]
    fn test_deterministic_with_seed() {
        let run = || {
            let mut population = Population::new(&small_config().with_population_size(10)).unwrap();
            population.advance(1).unwrap();
            let first = population.summary();
            population.advance(3).unwrap();
            (first, population.summary(), population.detail())
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_different_seeds_diverge() {
        let a = Population::new(&small_config().with_seed(1)).unwrap();
        let b = Population::new(&small_config().with_seed(2)).unwrap();
        assert_ne!(a.detail(), b.detail());
    }

    #[test]
    fn test_elitism_best_never_decreases() {
        let mut population = Population::new(&small_config()).unwrap();
        let mut best = Vec::new();
        best.push(population.best().1);
        population
            .advance_with(50, |stats| best.push(stats.best))
            .unwrap();
        assert_eq!(best.len(), 51);
        for window in best.windows(2) {
            assert!(window[1] >= window[0], "best fitness dropped");
        }
    }

    #[test]
    fn test_observer_sees_each_generation() {
        let mut population = Population::new(&small_config()).unwrap();
        let mut seen = Vec::new();
        population
            .advance_with(5, |stats| seen.push(stats.generation))
            .unwrap();
        assert_eq!(seen, vec![1, 2, 3, 4, 5]);

        let mut final_median = -1.0;
        population
            .advance_with(1, |stats| final_median = stats.median)
            .unwrap();
        assert_eq!(final_median, population.statistics().median);
    }

    #[test]
    fn test_converges_on_default_landscape() {
        let config = SimConfig::default().with_seed(7);
        let mut population = Population::new(&config).unwrap();
        let initial = population.statistics().mean;
        population.advance(200).unwrap();
        let stats = population.statistics();
        assert!(stats.mean > initial);
        assert!(
            stats.max >= 0.95,
            "expected near-optimal genome after 200 generations, got {}",
            stats.max
        );
    }

    #[test]
    fn test_top_two_survive_one_generation() {
        let config = SimConfig::default()
            .with_genome_length(4)
            .with_alleles(2)
            .with_population_size(4)
            .with_elitism(Elitism::Count(2))
            .with_crossover(true)
            .with_mutation_rate(0.0)
            .with_seed(1234);
        let mut population = Population::new(&config).unwrap();
        let top_two: Vec<Vec<u8>> = population
            .genomes()
            .take(2)
            .map(|(g, _)| g.alleles().to_vec())
            .collect();

        population.advance(1).unwrap();
        assert_eq!(population.generation(), 1);
        assert_eq!(population.size(), 4);

        let founders: Vec<Vec<u8>> = population
            .genomes()
            .filter(|(g, _)| g.birth_generation() == 0)
            .map(|(g, _)| g.alleles().to_vec())
            .collect();
        assert_eq!(founders.len(), 2);
        for alleles in &top_two {
            assert!(founders.contains(alleles));
        }

        // Without mutation every offspring locus comes from a surviving parent.
        for (genome, _) in population.genomes() {
            for locus in 0..4 {
                let a = genome.allele(locus);
                assert!(top_two.iter().any(|p| p[locus] == a));
            }
        }
    }

    #[test]
    fn test_single_survivor_clones() {
        let config = small_config()
            .with_elitism(Elitism::Count(1))
            .with_mutation_rate(0.0);
        let mut population = Population::new(&config).unwrap();
        let champion = population.best().0.alleles().to_vec();
        population.advance(1).unwrap();
        assert!(population.genomes().all(|(g, _)| g.alleles() == champion));
        assert!(population.statistics().stddev < 1e-6);
    }

    #[test]
    fn test_cloning_without_crossover() {
        let config = small_config()
            .with_crossover(false)
            .with_mutation_rate(0.0);
        let mut population = Population::new(&config).unwrap();
        let survivors: Vec<Vec<u8>> = population
            .genomes()
            .take(15)
            .map(|(g, _)| g.alleles().to_vec())
            .collect();
        population.advance(1).unwrap();
        for (genome, _) in population.genomes() {
            assert!(survivors.iter().any(|s| s == genome.alleles()));
        }
    }

    #[test]
    fn test_single_allele_never_mutates() {
        let config = small_config().with_alleles(1).with_mutation_rate(1.0);
        let mut population = Population::new(&config).unwrap();
        population.advance(3).unwrap();
        assert!(population.genomes().all(|(g, _)| g.alleles().iter().all(|&a| a == 0)));
    }

    #[test]
    fn test_detail_report() {
        let population = Population::new(&small_config()).unwrap();
        let detail = population.detail();
        assert_eq!(detail.len(), 30);
        for (i, record) in detail.iter().enumerate() {
            assert_eq!(record.rank, i + 1);
            assert_eq!(record.genome.len(), 16);
            assert!(record.genome.chars().all(|c| ('A'..='D').contains(&c)));
            assert_eq!(record.birth_generation, 0);
        }
        assert_eq!(population.fitness_matrix().table().len(), 16);
    }

    #[test]
    fn test_reset_starts_over() {
        let mut population = Population::new(&small_config()).unwrap();
        population.advance(10).unwrap();
        let old_matrix = population.fitness_matrix().clone();

        population.reset();
        assert_eq!(population.generation(), 0);
        assert_eq!(population.size(), 30);
        assert_ne!(population.fitness_matrix(), &old_matrix);
        assert!(population.genomes().all(|(g, _)| g.birth_generation() == 0));
    }

    #[test]
    fn test_reset_reproducible_with_seed() {
        let run = || {
            let mut population = Population::new(&small_config()).unwrap();
            population.advance(2).unwrap();
            population.reset();
            population.advance(2).unwrap();
            population.detail()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_with_rng_matches_seeded_new() {
        let a = Population::new(&small_config()).unwrap();
        let b = Population::with_rng(&small_config(), create_rng(42)).unwrap();
        assert_eq!(a.detail(), b.detail());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_invariants_hold_across_configs(
            seed in any::<u64>(),
            length in 1usize..12,
            alleles in 1u8..=6,
            size in 2usize..24,
            rate in 0.0f64..=1.0,
            crossover in any::<bool>(),
            generations in 1usize..8,
        ) {
            let config = SimConfig::default()
                .with_genome_length(length)
                .with_alleles(alleles)
                .with_population_size(size)
                .with_elitism(Elitism::Rate(rate))
                .with_crossover(crossover)
                .with_seed(seed);
            let mut population = Population::new(&config).unwrap();
            population.advance(generations).unwrap();

            prop_assert_eq!(population.size(), size);
            prop_assert_eq!(population.generation(), generations);
            let fitness: Vec<f64> = population.genomes().map(|(_, f)| f).collect();
            for window in fitness.windows(2) {
                prop_assert!(window[0] >= window[1]);
            }
            prop_assert!(population.statistics().stddev >= 0.0);
            for (genome, _) in population.genomes() {
                prop_assert_eq!(genome.len(), length);
                prop_assert!(genome.alleles().iter().all(|&a| a < alleles));
            }
        }
    }
}
