//! # Studydesk Core Library
//!
//! Core logic for a small study-productivity desk: a persisted to-do list
//! with a daily streak, a semester-based CGPA ledger, and a target-CGPA
//! projection. Every operation is reachable through the CLI binary; any other
//! front end is a thin layer over the same [`StudyDesk`] controller.
//!
//! ## Architecture
//!
//! - **Tasks**: ordered study items with a two-phase removal
//! - **Streak**: consecutive-day counter advanced by adding tasks
//! - **CGPA ledger**: per-semester subjects, SGPA and cumulative CGPA
//! - **Projection**: stateless required-average calculator
//! - **Storage**: JSON records in a SQLite key-value table, TOML configuration
//!
//! ## Key Components
//!
//! - [`StudyDesk`]: owns feature state; turns [`Action`]s into [`Event`]s
//! - [`KvStore`]: persistence seam ([`Database`], [`MemoryStore`])
//! - [`Config`]: application configuration management

pub mod action;
pub mod cgpa;
pub mod clock;
pub mod desk;
pub mod error;
pub mod events;
pub mod projection;
pub mod shortcuts;
pub mod storage;
pub mod streak;
pub mod task;

pub use action::Action;
pub use cgpa::{CgpaReport, CgpaState, Credits, Grade, LedgerSummary, SemesterOutcome, Subject, SubjectUpdate};
pub use clock::{Clock, FixedClock, SystemClock};
pub use desk::StudyDesk;
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use events::{Event, MessageScope};
pub use projection::{project, project_inputs, Projection, ProjectionError};
pub use shortcuts::{resolve_shortcut, KeyPress};
pub use storage::{Config, Database, KvStore, MemoryStore};
pub use streak::{StreakChange, StreakGlyph, StreakState, StreakView};
pub use task::{Task, TaskList};
