//! Interactive console for the genetic algorithm demo.

use anyhow::{Context, Result};
use clap::Parser;
use genetic_demo::command::{Outcome, Session, HELP};
use genetic_demo::{Elitism, Population, SimConfig};
use std::io::{self, BufRead, Write};

/// Genetic algorithm demo - evolve random genomes on a random fitness matrix
#[derive(Parser, Debug)]
#[command(name = "genetic-demo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Loci per genome
    #[arg(short = 'l', long, default_value = "32")]
    length: usize,

    /// Distinct allele values (1-26)
    #[arg(short = 'k', long, default_value = "4")]
    alleles: u8,

    /// Population size
    #[arg(short = 'n', long, default_value = "100")]
    size: usize,

    /// Fraction of the population surviving each generation
    #[arg(long, default_value = "0.5", conflicts_with = "elitism_count")]
    elitism_rate: f64,

    /// Fixed number of survivors each generation
    #[arg(long)]
    elitism_count: Option<usize>,

    /// Per-locus mutation probability (default: 1 / length)
    #[arg(short, long)]
    mutation_rate: Option<f64>,

    /// Clone a single parent instead of recombining two
    #[arg(long)]
    no_crossover: bool,

    /// Do not force a 1.0 cell into every fitness matrix row
    #[arg(long)]
    no_guarantee_max: bool,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    fn config(&self) -> SimConfig {
        let elitism = match self.elitism_count {
            Some(count) => Elitism::Count(count),
            None => Elitism::Rate(self.elitism_rate),
        };
        SimConfig {
            genome_length: self.length,
            alleles: self.alleles,
            population_size: self.size,
            elitism,
            mutation_rate: self.mutation_rate,
            crossover: !self.no_crossover,
            guarantee_max: !self.no_guarantee_max,
            seed: self.seed,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let population = Population::new(&cli.config()).context("failed to create population")?;
    let mut session = Session::new(population);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{HELP}")?;
    writeln!(out, "\n{}", session.population().summary())?;

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read command")?;
        match session.handle_line(&line) {
            Outcome::Continue(text) => writeln!(out, "{text}")?,
            Outcome::Exit => break,
        }
        out.flush()?;
    }

    Ok(())
}
