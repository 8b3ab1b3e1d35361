#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod catalog;

mod error;
mod progress;
mod service;
mod set;
mod workout;

pub use catalog::ProgramID;
pub use error::{CreateError, DeleteError, ReadError, StorageError};
pub use progress::{ExerciseProgress, exercise_progress};
pub use service::{Service, WorkoutService};
pub use set::{Reps, RepsError, SetEntry, Weight, WeightError};
pub use workout::{ExerciseRecord, WorkoutID, WorkoutRecord, WorkoutRepository, history};
