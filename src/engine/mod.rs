//! Generation loop and orchestration.
//!
//! The engine drives a standard generational GA over timetable
//! chromosomes: evaluate the whole population (in parallel), copy the
//! elites, refill via selection + crossover + mutation, repeat until
//! the generation budget is spent, a perfect timetable appears, or the
//! caller cancels.
//!
//! # Determinism
//!
//! Breeding is strictly sequential and driven by one seeded RNG;
//! evaluation is pure, so parallelism never affects results. Two runs
//! with the same seed and input produce identical timetables.
//!
//! # Submodules
//!
//! - [`job`]: background-thread wrapper with a polling-readable status

mod job;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::constraints::ViolationReport;
use crate::error::{EngineError, EngineResult};
use crate::ga::{mutate, Chromosome, GeneticOperators, TimetableProblem};
use crate::models::{Instructor, Room, Schedule, SchedulingWindow, SubjectOffering};

pub use job::{GenerationJob, JobState, JobStatus};

/// GA tuning parameters for one generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaParams {
    /// Number of chromosomes per generation (10–500).
    pub population_size: usize,
    /// Maximum generations to evolve (10–1000).
    pub generations: u32,
    /// Per-gene mutation probability in percent (0–100).
    pub mutation_rate: u8,
    /// Per-offspring-pair crossover probability in percent (0–100).
    pub crossover_rate: u8,
    /// Chromosomes copied unchanged into the next generation (1–50,
    /// strictly less than `population_size`).
    pub elite_size: usize,
}

impl Default for GaParams {
    fn default() -> Self {
        Self {
            population_size: 50,
            generations: 100,
            mutation_rate: 10,
            crossover_rate: 80,
            elite_size: 2,
        }
    }
}

impl GaParams {
    /// Validates every parameter against its allowed range.
    pub fn validate(&self) -> EngineResult<()> {
        if !(10..=500).contains(&self.population_size) {
            return Err(EngineError::InvalidParameter(format!(
                "population_size must be 10..=500, got {}",
                self.population_size
            )));
        }
        if !(10..=1000).contains(&self.generations) {
            return Err(EngineError::InvalidParameter(format!(
                "generations must be 10..=1000, got {}",
                self.generations
            )));
        }
        if self.mutation_rate > 100 {
            return Err(EngineError::InvalidParameter(format!(
                "mutation_rate must be 0..=100, got {}",
                self.mutation_rate
            )));
        }
        if self.crossover_rate > 100 {
            return Err(EngineError::InvalidParameter(format!(
                "crossover_rate must be 0..=100, got {}",
                self.crossover_rate
            )));
        }
        if !(1..=50).contains(&self.elite_size) {
            return Err(EngineError::InvalidParameter(format!(
                "elite_size must be 1..=50, got {}",
                self.elite_size
            )));
        }
        if self.elite_size >= self.population_size {
            return Err(EngineError::InvalidParameter(format!(
                "elite_size ({}) must be less than population_size ({})",
                self.elite_size, self.population_size
            )));
        }
        Ok(())
    }
}

/// What the caller asked to generate a timetable for.
///
/// Consumed by one run; the identifiers flow through unchanged into
/// the output [`Schedule`] header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Academic year identifier.
    pub academic_year_id: String,
    /// Semester within the academic year.
    pub semester: u8,
    /// Department identifier.
    pub department_id: String,
    /// Program identifier.
    pub program_id: String,
    /// Year level.
    pub year_level: u8,
    /// Block sections to schedule.
    pub sections: Vec<String>,
    /// GA tuning parameters.
    pub params: GaParams,
}

/// The data pools a timetable is generated from.
///
/// A plain value bundle, deserializable as one payload: the caller
/// fetches curriculum, instructors, and rooms up front and hands them
/// to [`Engine::from_request`] together with a [`GenerationRequest`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationInput {
    /// Subjects of the curriculum term.
    pub curriculum: Vec<SubjectOffering>,
    /// Available instructors.
    pub instructors: Vec<Instructor>,
    /// Available rooms.
    pub rooms: Vec<Room>,
    /// Window meetings are placed in.
    #[serde(default)]
    pub window: SchedulingWindow,
}

/// Per-generation progress, pushed to the caller's sink.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// Completed generation number (0 = initial population).
    pub generation: u32,
    /// Best fitness in the population.
    pub best_fitness: f64,
    /// Total violation count of the best chromosome.
    pub conflict_count: u32,
}

/// Receives progress updates during a run.
///
/// Implemented for closures, so `|u: &ProgressUpdate| ...` works
/// directly; the background job uses it to feed its polling status.
pub trait ProgressSink {
    /// Called once per completed generation.
    fn report(&mut self, update: &ProgressUpdate);
}

impl<F: FnMut(&ProgressUpdate)> ProgressSink for F {
    fn report(&mut self, update: &ProgressUpdate) {
        self(update)
    }
}

/// Cooperative cancellation flag.
///
/// Cancelling stops the run after the in-flight generation completes;
/// the best chromosome found so far is still returned.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a fresh, uncancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// The result of a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationOutcome {
    /// Fittest chromosome of the final population.
    pub best: Chromosome,
    /// Its fitness in (0, 1].
    pub fitness: f64,
    /// Its violation report (re-checked after termination).
    pub report: ViolationReport,
    /// Generations actually evolved.
    pub generations_run: u32,
    /// Whether a zero-violation timetable was reached early.
    pub converged: bool,
    /// Whether the run was cancelled before its generation budget.
    pub cancelled: bool,
}

impl GenerationOutcome {
    /// Maps the winning chromosome into a persistable [`Schedule`].
    pub fn to_schedule(&self, request: &GenerationRequest) -> Schedule {
        let mut schedule = Schedule::new(
            request.academic_year_id.clone(),
            request.semester,
            request.program_id.clone(),
            request.year_level,
        );
        schedule.replace_items(self.best.to_schedule_items());
        schedule
    }
}

/// The GA timetable generation engine.
///
/// Construction validates parameters; [`TimetableProblem::build`] has
/// already validated the input data, so `run` itself cannot fail.
pub struct Engine {
    problem: TimetableProblem,
    params: GaParams,
    operators: GeneticOperators,
    seed: Option<u64>,
    cancel: Option<CancellationToken>,
}

impl Engine {
    /// Creates an engine for a problem, rejecting out-of-range parameters.
    pub fn new(problem: TimetableProblem, params: GaParams) -> EngineResult<Self> {
        params.validate()?;
        Ok(Self {
            problem,
            params,
            operators: GeneticOperators::default(),
            seed: None,
            cancel: None,
        })
    }

    /// Builds the problem from a request and its input pools.
    ///
    /// `request.sections` and `request.params` are wired straight
    /// through, so the engine runs exactly what the request describes.
    /// Fails like [`TimetableProblem::build`] on bad input data and
    /// like [`Engine::new`] on out-of-range parameters.
    pub fn from_request(
        request: &GenerationRequest,
        input: &GenerationInput,
    ) -> EngineResult<Self> {
        let problem = TimetableProblem::build(
            &input.curriculum,
            &request.sections,
            &input.instructors,
            &input.rooms,
            input.window.clone(),
        )?;
        Self::new(problem, request.params.clone())
    }

    /// Fixes the RNG seed for a reproducible run.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Overrides the genetic operator strategies.
    pub fn with_operators(mut self, operators: GeneticOperators) -> Self {
        self.operators = operators;
        self
    }

    /// Attaches a cancellation token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// The problem this engine runs.
    pub fn problem(&self) -> &TimetableProblem {
        &self.problem
    }

    /// Runs the full generation loop without progress reporting.
    pub fn run(&self) -> GenerationOutcome {
        self.run_with_progress(&mut |_: &ProgressUpdate| {})
    }

    /// Runs the full generation loop, reporting each generation.
    pub fn run_with_progress(&self, sink: &mut dyn ProgressSink) -> GenerationOutcome {
        let mut rng = match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };

        let mut population: Vec<Chromosome> = (0..self.params.population_size)
            .map(|_| self.problem.random_chromosome(&mut rng))
            .collect();
        evaluate_population(&mut population, &self.problem);
        sort_by_fitness(&mut population);

        let mut generations_run = 0;
        let mut cancelled = false;
        let mut converged = self.report_generation(&population, 0, sink);

        for generation in 1..=self.params.generations {
            if converged {
                break;
            }
            if let Some(token) = &self.cancel {
                if token.is_cancelled() {
                    cancelled = true;
                    break;
                }
            }

            population = next_generation(
                &self.problem,
                &self.params,
                &self.operators,
                &population,
                &mut rng,
            );
            evaluate_population(&mut population, &self.problem);
            sort_by_fitness(&mut population);

            generations_run = generation;
            converged = self.report_generation(&population, generation, sink);
        }

        let best = population[0].clone();
        let (report, fitness) = self.problem.evaluate(&best);
        info!(
            generations_run,
            fitness, converged, cancelled, "generation run finished"
        );
        GenerationOutcome {
            best,
            fitness,
            report,
            generations_run,
            converged,
            cancelled,
        }
    }

    /// Reports one generation to the sink; returns whether the best
    /// chromosome is already perfect.
    fn report_generation(
        &self,
        population: &[Chromosome],
        generation: u32,
        sink: &mut dyn ProgressSink,
    ) -> bool {
        let best = &population[0];
        let best_fitness = best.fitness.unwrap_or(0.0);
        let conflict_count = self.problem.check(best).total();
        debug!(generation, best_fitness, conflict_count, "generation evaluated");
        sink.report(&ProgressUpdate {
            generation,
            best_fitness,
            conflict_count,
        });
        conflict_count == 0
    }
}

/// Re-runs the constraint checker over a finished chromosome.
///
/// Pure and idempotent: validating an already-validated timetable
/// yields the identical report.
pub fn validate_generated_schedule(
    chromosome: &Chromosome,
    problem: &TimetableProblem,
) -> ViolationReport {
    problem.check(chromosome)
}

/// Evaluates every unevaluated chromosome, in parallel.
///
/// Each worker reads one chromosome and writes only its own fitness;
/// the rayon join is the generation barrier.
fn evaluate_population(population: &mut [Chromosome], problem: &TimetableProblem) {
    population.par_iter_mut().for_each(|chromosome| {
        if chromosome.fitness.is_none() {
            let (_, fitness) = problem.evaluate(chromosome);
            chromosome.fitness = Some(fitness);
        }
    });
}

/// Sorts a population best-first.
fn sort_by_fitness(population: &mut [Chromosome]) {
    population.sort_by(|a, b| {
        b.fitness
            .unwrap_or(0.0)
            .partial_cmp(&a.fitness.unwrap_or(0.0))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Breeds the next population from a best-first-sorted parent snapshot.
///
/// The first `elite_size` parents are copied unchanged (cloned, never
/// aliased); the remainder is refilled with offspring. With both rates
/// at zero the result is exactly elite copies plus unchanged parent
/// copies.
fn next_generation<R: Rng>(
    problem: &TimetableProblem,
    params: &GaParams,
    operators: &GeneticOperators,
    parents: &[Chromosome],
    rng: &mut R,
) -> Vec<Chromosome> {
    let mut next = Vec::with_capacity(params.population_size);
    next.extend_from_slice(&parents[..params.elite_size]);

    let crossover_p = f64::from(params.crossover_rate) / 100.0;
    let mutation_p = f64::from(params.mutation_rate) / 100.0;

    while next.len() < params.population_size {
        let p1 = &parents[operators.select(parents, rng)];
        let p2 = &parents[operators.select(parents, rng)];

        let (mut c1, mut c2) = if crossover_p > 0.0 && rng.random_bool(crossover_p) {
            operators.crossover(p1, p2, rng)
        } else {
            (p1.clone(), p2.clone())
        };
        mutate(&mut c1, &problem.requirements, &problem.window, mutation_p, rng);
        mutate(&mut c2, &problem.requirements, &problem.window, mutation_p, rng);

        next.push(c1);
        if next.len() < params.population_size {
            next.push(c2);
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Instructor, Room, SchedulingWindow, SubjectOffering};

    fn small_problem() -> TimetableProblem {
        let curriculum = vec![
            SubjectOffering::new("S1", "CS101").with_lecture_hours(2),
            SubjectOffering::new("S2", "CS102").with_lecture_hours(2),
            SubjectOffering::new("S3", "CS103").with_lecture_hours(2).with_lab_hours(2),
        ];
        let instructors = vec![
            Instructor::permanent("I1")
                .with_subject("S1")
                .with_subject("S2")
                .with_subject("S3"),
            Instructor::permanent("I2").with_subject("S2").with_subject("S3"),
        ];
        let rooms = vec![Room::lecture("R1"), Room::lecture("R2"), Room::lab("L1")];
        TimetableProblem::build(
            &curriculum,
            &["A".to_string()],
            &instructors,
            &rooms,
            SchedulingWindow::default(),
        )
        .unwrap()
    }

    fn small_params() -> GaParams {
        GaParams {
            population_size: 20,
            generations: 40,
            mutation_rate: 15,
            crossover_rate: 80,
            elite_size: 2,
        }
    }

    #[test]
    fn test_params_validation() {
        assert!(GaParams::default().validate().is_ok());

        let too_small = GaParams {
            population_size: 5,
            ..GaParams::default()
        };
        assert!(matches!(
            too_small.validate(),
            Err(EngineError::InvalidParameter(_))
        ));

        let elite_too_big = GaParams {
            population_size: 10,
            elite_size: 10,
            ..GaParams::default()
        };
        assert!(elite_too_big.validate().is_err());

        let bad_rate = GaParams {
            mutation_rate: 101,
            ..GaParams::default()
        };
        assert!(bad_rate.validate().is_err());
    }

    #[test]
    fn test_run_produces_complete_chromosome() {
        let problem = small_problem();
        let gene_count = problem.gene_count();
        let engine = Engine::new(problem, small_params()).unwrap().with_seed(42);

        let outcome = engine.run();
        assert_eq!(outcome.best.len(), gene_count);
        assert!(outcome.fitness > 0.0 && outcome.fitness <= 1.0);
    }

    #[test]
    fn test_elitism_keeps_best_fitness_monotonic() {
        let problem = small_problem();
        let engine = Engine::new(problem, small_params()).unwrap().with_seed(7);

        let mut history: Vec<f64> = Vec::new();
        let mut sink = |u: &ProgressUpdate| history.push(u.best_fitness);
        engine.run_with_progress(&mut sink);

        assert!(history.len() > 1);
        for pair in history.windows(2) {
            assert!(
                pair[1] >= pair[0],
                "best fitness regressed: {} -> {}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let params = small_params();
        let a = Engine::new(small_problem(), params.clone())
            .unwrap()
            .with_seed(99)
            .run();
        let b = Engine::new(small_problem(), params)
            .unwrap()
            .with_seed(99)
            .run();

        assert_eq!(a.best.genes, b.best.genes);
        assert_eq!(a.fitness, b.fitness);
        assert_eq!(a.generations_run, b.generations_run);
    }

    #[test]
    fn test_elite_size_one_below_population() {
        let problem = small_problem();
        let params = GaParams {
            population_size: 10,
            generations: 10,
            elite_size: 9,
            ..GaParams::default()
        };
        let engine = Engine::new(problem, params).unwrap().with_seed(3);
        let outcome = engine.run();
        assert!(outcome.fitness > 0.0);
    }

    #[test]
    fn test_zero_rates_produce_no_drift() {
        let problem = small_problem();
        let params = GaParams {
            population_size: 12,
            generations: 10,
            mutation_rate: 0,
            crossover_rate: 0,
            elite_size: 3,
        };

        let mut rng = SmallRng::seed_from_u64(5);
        let mut parents: Vec<Chromosome> = (0..params.population_size)
            .map(|_| problem.random_chromosome(&mut rng))
            .collect();
        evaluate_population(&mut parents, &problem);
        sort_by_fitness(&mut parents);

        let next = next_generation(
            &problem,
            &params,
            &GeneticOperators::default(),
            &parents,
            &mut rng,
        );

        assert_eq!(next.len(), params.population_size);
        // Elites first, byte-for-byte
        for i in 0..params.elite_size {
            assert_eq!(next[i].genes, parents[i].genes);
        }
        // Every remaining child is an unchanged copy of some parent
        for child in &next[params.elite_size..] {
            assert!(
                parents.iter().any(|p| p.genes == child.genes),
                "offspring drifted with zero-rate operators"
            );
        }
    }

    #[test]
    fn test_cancellation_returns_best_so_far() {
        let problem = small_problem();
        let params = GaParams {
            generations: 1000,
            mutation_rate: 0,
            crossover_rate: 0,
            ..small_params()
        };
        let token = CancellationToken::new();
        let engine = Engine::new(problem, params)
            .unwrap()
            .with_seed(11)
            .with_cancellation(token.clone());

        // Cancel after the second generation completes.
        let cancel = token.clone();
        let mut sink = move |u: &ProgressUpdate| {
            if u.generation >= 2 {
                cancel.cancel();
            }
        };
        let outcome = engine.run_with_progress(&mut sink);

        if !outcome.converged {
            assert!(outcome.cancelled);
            assert!(outcome.generations_run < 1000);
        }
        assert!(!outcome.best.is_empty());
    }

    #[test]
    fn test_post_validation_is_idempotent() {
        let problem = small_problem();
        let engine = Engine::new(problem, small_params()).unwrap().with_seed(42);
        let outcome = engine.run();

        let first = validate_generated_schedule(&outcome.best, engine.problem());
        let second = validate_generated_schedule(&outcome.best, engine.problem());
        assert_eq!(first, second);
        assert_eq!(first.all_valid(), outcome.report.all_valid());
    }

    #[test]
    fn test_outcome_to_schedule() {
        let problem = small_problem();
        let gene_count = problem.gene_count();
        let engine = Engine::new(problem, small_params()).unwrap().with_seed(42);
        let outcome = engine.run();

        let request = GenerationRequest {
            academic_year_id: "AY2025".into(),
            semester: 1,
            department_id: "D1".into(),
            program_id: "BSCS".into(),
            year_level: 2,
            sections: vec!["A".into()],
            params: small_params(),
        };
        let schedule = outcome.to_schedule(&request);
        assert_eq!(schedule.item_count(), gene_count);
        assert_eq!(schedule.program_id, "BSCS");
        assert_eq!(schedule.semester, 1);
    }

    #[test]
    fn test_from_request_wires_sections_and_params() {
        let input = GenerationInput {
            curriculum: vec![SubjectOffering::new("S1", "CS101").with_lecture_hours(2)],
            instructors: vec![Instructor::permanent("I1").with_subject("S1")],
            rooms: vec![Room::lecture("R1")],
            window: SchedulingWindow::default(),
        };
        let request = GenerationRequest {
            academic_year_id: "AY2025".into(),
            semester: 1,
            department_id: "D1".into(),
            program_id: "BSCS".into(),
            year_level: 1,
            sections: vec!["A".into(), "B".into()],
            params: small_params(),
        };

        let engine = Engine::from_request(&request, &input).unwrap();
        // One lecture meeting per requested section
        assert_eq!(engine.problem().gene_count(), 2);

        let schedule = engine.run().to_schedule(&request);
        assert_eq!(schedule.item_count(), 2);
        assert_eq!(schedule.academic_year_id, "AY2025");

        // Out-of-range request parameters are rejected on the same path.
        let mut bad = request.clone();
        bad.params.population_size = 5;
        assert!(matches!(
            Engine::from_request(&bad, &input),
            Err(EngineError::InvalidParameter(_))
        ));
    }
}
