//! Genetic operators for timetable chromosomes.
//!
//! Provides runtime-selectable selection and crossover strategies via
//! [`GeneticOperators`], plus gene-assignment mutation. All operators
//! take the RNG as an explicit argument, so a seeded run is fully
//! reproducible.
//!
//! Gene *identity* (subject, meeting kind, section) is positional and
//! never altered: crossover exchanges whole assignments between the
//! same positions of two same-length parents, and mutation only
//! redraws the instructor, room, or time slot of a gene.

use rand::Rng;
use rand::prelude::IndexedRandom;
use rand::seq::index;

use crate::models::SchedulingWindow;

use super::chromosome::{Chromosome, Gene};
use super::problem::MeetingRequirement;

/// Parent selection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionType {
    /// Best of `k` uniformly drawn competitors.
    Tournament(usize),
    /// Fitness-proportionate (roulette wheel) selection.
    RouletteWheel,
}

/// Crossover strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossoverType {
    /// Swap all gene assignments at and after one random cut point.
    SinglePoint,
    /// Swap each gene assignment independently with probability 0.5.
    Uniform,
}

/// Runtime-selectable operator configuration.
#[derive(Debug, Clone)]
pub struct GeneticOperators {
    /// Parent selection strategy.
    pub selection: SelectionType,
    /// Crossover strategy.
    pub crossover: CrossoverType,
}

impl Default for GeneticOperators {
    fn default() -> Self {
        Self {
            selection: SelectionType::Tournament(3),
            crossover: CrossoverType::SinglePoint,
        }
    }
}

impl GeneticOperators {
    /// Picks one parent index from an evaluated population.
    pub fn select<R: Rng>(&self, population: &[Chromosome], rng: &mut R) -> usize {
        match self.selection {
            SelectionType::Tournament(size) => tournament_select(population, size, rng),
            SelectionType::RouletteWheel => roulette_select(population, rng),
        }
    }

    /// Produces two children using the configured crossover strategy.
    pub fn crossover<R: Rng>(
        &self,
        p1: &Chromosome,
        p2: &Chromosome,
        rng: &mut R,
    ) -> (Chromosome, Chromosome) {
        match self.crossover {
            CrossoverType::SinglePoint => single_point_crossover(p1, p2, rng),
            CrossoverType::Uniform => uniform_crossover(p1, p2, rng),
        }
    }
}

fn fitness_of(chromosome: &Chromosome) -> f64 {
    chromosome.fitness.unwrap_or(0.0)
}

/// Tournament selection: best of `size` uniformly drawn competitors.
///
/// # Panics
///
/// Panics if `population` is empty.
pub fn tournament_select<R: Rng>(population: &[Chromosome], size: usize, rng: &mut R) -> usize {
    assert!(!population.is_empty(), "selection requires a non-empty population");
    let size = size.clamp(1, population.len());
    index::sample(rng, population.len(), size)
        .into_iter()
        .max_by(|&a, &b| {
            fitness_of(&population[a])
                .partial_cmp(&fitness_of(&population[b]))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .unwrap_or(0)
}

/// Roulette-wheel selection over fitness values.
///
/// Fitness is always in (0, 1], so the wheel is well-defined for any
/// evaluated population.
///
/// # Panics
///
/// Panics if `population` is empty.
pub fn roulette_select<R: Rng>(population: &[Chromosome], rng: &mut R) -> usize {
    assert!(!population.is_empty(), "selection requires a non-empty population");
    let total: f64 = population.iter().map(fitness_of).sum();
    if total <= 0.0 {
        return rng.random_range(0..population.len());
    }
    let mut spin = rng.random_range(0.0..total);
    for (idx, chromosome) in population.iter().enumerate() {
        spin -= fitness_of(chromosome);
        if spin <= 0.0 {
            return idx;
        }
    }
    population.len() - 1
}

/// Single-point crossover: children swap assignments at and after a cut.
///
/// Parents of length < 2 are returned as clones.
pub fn single_point_crossover<R: Rng>(
    p1: &Chromosome,
    p2: &Chromosome,
    rng: &mut R,
) -> (Chromosome, Chromosome) {
    let len = p1.len();
    if len < 2 {
        return (p1.clone(), p2.clone());
    }
    let cut = rng.random_range(1..len);

    let mut c1 = p1.clone();
    let mut c2 = p2.clone();
    c1.genes[cut..].clone_from_slice(&p2.genes[cut..]);
    c2.genes[cut..].clone_from_slice(&p1.genes[cut..]);
    c1.invalidate_fitness();
    c2.invalidate_fitness();
    (c1, c2)
}

/// Uniform crossover: each position swaps independently with p = 0.5.
pub fn uniform_crossover<R: Rng>(
    p1: &Chromosome,
    p2: &Chromosome,
    rng: &mut R,
) -> (Chromosome, Chromosome) {
    let mut c1 = p1.clone();
    let mut c2 = p2.clone();
    for i in 0..c1.len().min(c2.len()) {
        if rng.random_bool(0.5) {
            std::mem::swap(&mut c1.genes[i], &mut c2.genes[i]);
        }
    }
    c1.invalidate_fitness();
    c2.invalidate_fitness();
    (c1, c2)
}

/// Redraws one assignment field (instructor, room, or slot) of a gene.
///
/// Subject, meeting kind, and section are identity and never change.
pub fn mutate_gene<R: Rng>(
    gene: &mut Gene,
    requirement: &MeetingRequirement,
    window: &SchedulingWindow,
    rng: &mut R,
) {
    match rng.random_range(0..3) {
        0 => {
            if let Some(id) = requirement.candidate_instructors.choose(rng) {
                gene.instructor_id = id.clone();
            }
        }
        1 => {
            if let Some(id) = requirement.candidate_rooms.choose(rng) {
                gene.room_id = id.clone();
            }
        }
        _ => {
            if let Some(slot) = window.random_slot(requirement.duration_min, rng) {
                gene.slot = slot;
            }
        }
    }
}

/// Mutates each gene independently with the given probability.
///
/// Clears the cached fitness if any gene was touched.
pub fn mutate<R: Rng>(
    chromosome: &mut Chromosome,
    requirements: &[MeetingRequirement],
    window: &SchedulingWindow,
    probability: f64,
    rng: &mut R,
) {
    if probability <= 0.0 {
        return;
    }
    let mut touched = false;
    for (gene, requirement) in chromosome.genes.iter_mut().zip(requirements) {
        if rng.random_bool(probability) {
            mutate_gene(gene, requirement, window, rng);
            touched = true;
        }
    }
    if touched {
        chromosome.invalidate_fitness();
    }
}
