//! Genetic-algorithm timetable generation engine.
//!
//! Given a curriculum term (required subjects with lecture/lab hour
//! splits), a pool of eligible instructors, and a room inventory, the
//! engine evolves a conflict-free weekly class schedule. It is a pure
//! computation core: the caller fetches all input data up front,
//! passes it in as plain value structures, and persists the output —
//! there is no database, HTTP, or UI surface here.
//!
//! # Modules
//!
//! - **`models`**: domain value types — `SubjectOffering`, `Instructor`,
//!   `Room`, `TimeSlot`, `Schedule`
//! - **`constraints`**: pure hard-constraint checker producing a
//!   [`ViolationReport`](constraints::ViolationReport)
//! - **`fitness`**: weighted-penalty scalar fitness in (0, 1]
//! - **`ga`**: gene/chromosome encoding, problem assembly, genetic
//!   operators
//! - **`engine`**: generation loop, progress reporting, cancellation,
//!   background jobs
//!
//! # Example
//!
//! ```no_run
//! use timetable_ga::engine::{Engine, GaParams};
//! use timetable_ga::ga::TimetableProblem;
//! use timetable_ga::models::{Instructor, Room, SchedulingWindow, SubjectOffering};
//!
//! let curriculum = vec![SubjectOffering::new("S1", "CS101").with_lecture_hours(3)];
//! let instructors = vec![Instructor::permanent("I1").with_subject("S1")];
//! let rooms = vec![Room::lecture("R1")];
//!
//! let problem = TimetableProblem::build(
//!     &curriculum,
//!     &["A".to_string()],
//!     &instructors,
//!     &rooms,
//!     SchedulingWindow::default(),
//! )?;
//! let outcome = Engine::new(problem, GaParams::default())?.with_seed(42).run();
//! assert!(outcome.report.all_valid());
//! # Ok::<(), timetable_ga::error::EngineError>(())
//! ```

pub mod constraints;
pub mod engine;
pub mod error;
pub mod fitness;
pub mod ga;
pub mod models;

pub use constraints::{check_violations, ConstraintConfig, ViolationReport};
pub use engine::{
    validate_generated_schedule, CancellationToken, Engine, GaParams, GenerationInput,
    GenerationOutcome, GenerationRequest, ProgressSink, ProgressUpdate,
};
pub use error::{ConfigurationError, EngineError, EngineResult};
pub use fitness::FitnessWeights;
pub use ga::{Chromosome, Gene, TimetableProblem};
