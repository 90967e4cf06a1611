//! Background generation jobs.
//!
//! Generation runs for real population sizes take seconds, so they
//! never run on a request thread. [`GenerationJob`] wraps an [`Engine`]
//! in a worker thread and exposes a polling-readable [`JobStatus`] the
//! surrounding application can serve from its progress endpoint.

use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use serde::{Deserialize, Serialize};

use super::{CancellationToken, Engine, GenerationOutcome, ProgressUpdate};

/// Lifecycle of a background generation job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobState {
    /// Spawned, first generation not yet reported.
    Pending,
    /// Evolving.
    Running,
    /// Finished its generation budget or converged.
    Completed,
    /// Stopped early by cancellation.
    Cancelled,
}

/// Polling-readable snapshot of a running job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobStatus {
    /// Current lifecycle state.
    pub state: JobState,
    /// Last completed generation.
    pub generation: u32,
    /// Best fitness seen so far.
    pub best_fitness: f64,
    /// Violation count of the current best chromosome.
    pub conflict_count: u32,
}

impl Default for JobStatus {
    fn default() -> Self {
        Self {
            state: JobState::Pending,
            generation: 0,
            best_fitness: 0.0,
            conflict_count: 0,
        }
    }
}

/// A generation run executing on a background thread.
pub struct GenerationJob {
    handle: JoinHandle<GenerationOutcome>,
    status: Arc<Mutex<JobStatus>>,
    token: CancellationToken,
}

impl GenerationJob {
    /// Spawns the engine on a worker thread.
    ///
    /// The job attaches its own cancellation token if the engine does
    /// not already carry one.
    pub fn spawn(mut engine: Engine) -> Self {
        let token = engine
            .cancel
            .get_or_insert_with(CancellationToken::new)
            .clone();
        let status = Arc::new(Mutex::new(JobStatus::default()));

        let shared = Arc::clone(&status);
        let handle = thread::spawn(move || {
            let mut sink = |update: &ProgressUpdate| {
                let mut s = lock_status(&shared);
                s.state = JobState::Running;
                s.generation = update.generation;
                s.best_fitness = update.best_fitness;
                s.conflict_count = update.conflict_count;
            };
            let outcome = engine.run_with_progress(&mut sink);

            let mut s = lock_status(&shared);
            s.state = if outcome.cancelled {
                JobState::Cancelled
            } else {
                JobState::Completed
            };
            s.generation = outcome.generations_run;
            s.best_fitness = outcome.fitness;
            s.conflict_count = outcome.report.total();
            drop(s);

            outcome
        });

        Self {
            handle,
            status,
            token,
        }
    }

    /// Current status snapshot.
    pub fn status(&self) -> JobStatus {
        lock_status(&self.status).clone()
    }

    /// Requests cancellation; the run stops after the in-flight
    /// generation and still yields its best chromosome.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Whether the worker thread has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the run and returns its outcome.
    pub fn join(self) -> GenerationOutcome {
        match self.handle.join() {
            Ok(outcome) => outcome,
            Err(payload) => std::panic::resume_unwind(payload),
        }
    }
}

fn lock_status(status: &Mutex<JobStatus>) -> std::sync::MutexGuard<'_, JobStatus> {
    match status.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
