//! Console command layer.
//!
//! Parses one-line textual commands, dispatches them to a [`Population`],
//! and renders reports. This is a thin wrapper: all evolutionary logic
//! lives in [`crate::population`].

use crate::error::{Result, SimError};
use crate::genome::allele_symbol;
use crate::population::{Population, Summary};
use std::fmt::{self, Write as _};

/// Command listing shown at start-up and on `h`.
pub const HELP: &str = "Commands:
'n <c>' to simulate c generations (c > 0: default 1)
'i' to display raw population data
'r' to reset simulation
'x' to exit";

/// A parsed console command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `n [count]`: advance `count` generations (default 1).
    Next(usize),

    /// `i`: print every genome and the fitness matrix.
    Inspect,

    /// `r`: discard the population and start over.
    Reset,

    /// `h`: print the command listing.
    Help,

    /// `x`: leave the loop.
    Exit,
}

impl Command {
    /// Parses one input line. Case-insensitive; extra tokens are ignored.
    ///
    /// # Errors
    ///
    /// - [`SimError::UnknownCommand`] for an unrecognized keyword.
    /// - [`SimError::InvalidParameter`] for a generation count that is not a
    ///   positive integer.
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim().to_lowercase();
        let mut tokens = line.split_whitespace();
        let keyword = tokens.next().unwrap_or("");

        match keyword {
            "n" => match tokens.next() {
                Some(count) => parse_generations(count).map(Command::Next),
                None => Ok(Command::Next(1)),
            },
            "i" => Ok(Command::Inspect),
            "r" => Ok(Command::Reset),
            "h" => Ok(Command::Help),
            "x" => Ok(Command::Exit),
            other => Err(SimError::UnknownCommand(other.to_string())),
        }
    }
}

/// Parses a generation count, rejecting zero, negatives and non-numbers.
pub fn parse_generations(token: &str) -> Result<usize> {
    match token.parse::<usize>() {
        Ok(count) if count >= 1 => Ok(count),
        _ => Err(SimError::InvalidParameter(token.to_string())),
    }
}

/// What the caller should do after a command ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print the text and keep reading commands.
    Continue(String),

    /// Stop the loop.
    Exit,
}

/// An interactive session around one population.
#[derive(Debug)]
pub struct Session {
    population: Population,
}

impl Session {
    /// Wraps an existing population.
    pub fn new(population: Population) -> Self {
        Self { population }
    }

    /// The population driven by this session.
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Parses and runs one input line.
    ///
    /// Parse errors are rendered into the output with a hint instead of
    /// being returned, so the loop never stops on bad input.
    pub fn handle_line(&mut self, line: &str) -> Outcome {
        match Command::parse(line) {
            Ok(command) => self.execute(command),
            Err(err @ SimError::UnknownCommand(_)) => {
                Outcome::Continue(format!("{}\nType 'h' for help.", capitalize(&err.to_string())))
            }
            Err(err) => Outcome::Continue(capitalize(&err.to_string())),
        }
    }

    /// Runs a parsed command.
    pub fn execute(&mut self, command: Command) -> Outcome {
        match command {
            Command::Next(count) => match self.population.advance(count) {
                Ok(()) => Outcome::Continue(format!(
                    "Advancing {count} generations...\n{}",
                    self.population.summary()
                )),
                Err(err) => Outcome::Continue(capitalize(&err.to_string())),
            },
            Command::Inspect => Outcome::Continue(format_detail(&self.population)),
            Command::Reset => {
                self.population.reset();
                Outcome::Continue(format!(
                    "Resetting simulation...\n{}",
                    self.population.summary()
                ))
            }
            Command::Help => Outcome::Continue(HELP.to_string()),
            Command::Exit => Outcome::Exit,
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.statistics;
        write!(
            f,
            "Generation: {}  Population: {}\nMax: {:.3}  Min: {:.3}  Mean: {:.3}  Med: {:.3}  SD: {:.3}",
            self.generation, self.size, s.max, s.min, s.mean, s.median, s.stddev
        )
    }
}

/// Renders every genome in rank order followed by the fitness matrix.
///
/// Ranks are zero-padded to the width of the population size. The matrix is
/// printed transposed: one line per allele, one column per locus.
pub fn format_detail(population: &Population) -> String {
    let width = population.size().to_string().len();
    let mut out = String::new();

    for record in population.detail() {
        let _ = writeln!(
            out,
            "{:0width$} {}  Fit:{:.2}  Gen:{}",
            record.rank, record.genome, record.fitness, record.birth_generation
        );
    }

    out.push_str("\nFitness Matrix:");
    let table = population.fitness_matrix().table();
    let alleles = population.fitness_matrix().alleles();
    for allele in 0..alleles {
        let row: Vec<String> = table
            .iter()
            .map(|locus| format!("{:.2}", locus[allele]))
            .collect();
        let _ = write!(out, "\n{} [{}]", allele_symbol(allele as u8), row.join(" "));
    }
    out
}
