//! Randomized fitness landscape.
//!
//! [`FitnessMatrix`] assigns every (locus, allele) pair a contribution in
//! `[0, 1]`. A genome's fitness is the mean contribution of its alleles,
//! so fitness is also normalized to `[0, 1]`. Loci are independent: the
//! landscape has no epistasis, and the optimum is the per-row argmax.

use crate::genome::Genome;
use rand::Rng;

/// Immutable `L × K` table of per-locus allele contributions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FitnessMatrix {
    table: Vec<Vec<f64>>,
}

impl FitnessMatrix {
    /// Fills a `length × alleles` table with independent uniform draws.
    ///
    /// With `guarantee_max`, the largest cell of each row is raised to
    /// exactly 1.0 (the first one in column order if several tie), so every
    /// locus has an attainable full contribution.
    ///
    /// # Panics
    /// Panics if `alleles == 0`.
    pub fn random<R: Rng>(length: usize, alleles: u8, guarantee_max: bool, rng: &mut R) -> Self {
        assert!(alleles > 0, "alphabet must not be empty");

        let table = (0..length)
            .map(|_| {
                let mut row: Vec<f64> = (0..alleles)
                    .map(|_| rng.random_range(0.0..1.0))
                    .collect();
                if guarantee_max {
                    let best = argmax(&row);
                    row[best] = 1.0;
                }
                row
            })
            .collect();

        Self { table }
    }

    /// Builds a matrix from explicit rows.
    ///
    /// # Panics
    /// Panics if rows differ in width, are empty, or hold values outside `[0, 1]`.
    pub fn from_table(table: Vec<Vec<f64>>) -> Self {
        let width = table.first().map_or(0, Vec::len);
        for row in &table {
            assert!(!row.is_empty(), "rows must not be empty");
            assert_eq!(row.len(), width, "rows must have equal width");
            assert!(
                row.iter().all(|v| (0.0..=1.0).contains(v)),
                "contributions must lie in [0, 1]"
            );
        }
        Self { table }
    }

    /// Normalized fitness of `genome`: mean of `table[i][allele_i]`.
    ///
    /// # Panics
    /// Panics if the genome length differs from the number of rows, or an
    /// allele is outside the alphabet.
    pub fn evaluate(&self, genome: &Genome) -> f64 {
        assert_eq!(
            genome.len(),
            self.table.len(),
            "genome length must match fitness matrix"
        );

        let total: f64 = genome
            .alleles()
            .iter()
            .zip(&self.table)
            .map(|(&allele, row)| row[allele as usize])
            .sum();
        total / self.table.len() as f64
    }

    /// Number of loci (rows).
    pub fn length(&self) -> usize {
        self.table.len()
    }

    /// Alphabet size (columns).
    pub fn alleles(&self) -> usize {
        self.table.first().map_or(0, Vec::len)
    }

    /// Raw table, one row per locus, one column per allele.
    pub fn table(&self) -> &[Vec<f64>] {
        &self.table
    }

    /// Contribution of `allele` at `locus`.
    pub fn value(&self, locus: usize, allele: u8) -> f64 {
        self.table[locus][allele as usize]
    }

    /// Highest fitness any genome can reach on this landscape.
    pub fn max_attainable(&self) -> f64 {
        if self.table.is_empty() {
            return 0.0;
        }
        let total: f64 = self.table.iter().map(|row| row[argmax(row)]).sum();
        total / self.table.len() as f64
    }

    /// The allele sequence reaching [`max_attainable`](Self::max_attainable).
    pub fn best_alleles(&self) -> Vec<u8> {
        self.table.iter().map(|row| argmax(row) as u8).collect()
    }
}

/// Index of the first maximal value.
fn argmax(row: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in row.iter().enumerate().skip(1) {
        if v > row[best] {
            best = i;
        }
    }
    best
}
